use std::fmt;

use crate::foundation::error::{QuotegramError, QuotegramResult};

/// Environment variable holding the account name.
pub const DEFAULT_USER_ENV: &str = "IG_USER";
/// Environment variable holding the account password.
pub const DEFAULT_PASS_ENV: &str = "IG_PASS";

/// Username and password for the publish account.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Build credentials from their two parts.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Account name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Account password.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Source of publish credentials, consulted once per publish.
pub trait CredentialProvider: Send + Sync {
    /// Current credentials.
    fn credentials(&self) -> QuotegramResult<Credentials>;
}

/// Reads credentials from two environment variables at call time.
#[derive(Clone, Debug)]
pub struct EnvCredentials {
    user_var: String,
    pass_var: String,
}

impl EnvCredentials {
    /// Provider reading `user_var` and `pass_var`.
    pub fn new(user_var: impl Into<String>, pass_var: impl Into<String>) -> Self {
        Self {
            user_var: user_var.into(),
            pass_var: pass_var.into(),
        }
    }

    fn read(var: &str) -> QuotegramResult<String> {
        match std::env::var(var) {
            Ok(v) if !v.is_empty() => Ok(v),
            Ok(_) => Err(QuotegramError::publish(format!(
                "environment variable {var} is empty"
            ))),
            Err(_) => Err(QuotegramError::publish(format!(
                "environment variable {var} is not set"
            ))),
        }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_USER_ENV, DEFAULT_PASS_ENV)
    }
}

impl CredentialProvider for EnvCredentials {
    fn credentials(&self) -> QuotegramResult<Credentials> {
        Ok(Credentials::new(
            Self::read(&self.user_var)?,
            Self::read(&self.pass_var)?,
        ))
    }
}

/// Fixed credentials held in memory.
#[derive(Clone, Debug)]
pub struct StaticCredentials(Credentials);

impl StaticCredentials {
    /// Provider that always returns `credentials`.
    pub fn new(credentials: Credentials) -> Self {
        Self(credentials)
    }
}

impl CredentialProvider for StaticCredentials {
    fn credentials(&self) -> QuotegramResult<Credentials> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/publish/credentials.rs"]
mod tests;
