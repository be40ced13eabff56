use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use serde::Deserialize;

use crate::foundation::error::{QuotegramError, QuotegramResult};
use crate::publish::Publisher;
use crate::publish::credentials::{CredentialProvider, Credentials};

/// Default Instagram web origin.
pub const DEFAULT_INSTAGRAM_BASE_URL: &str = "https://www.instagram.com";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const CSRF_COOKIE: &str = "csrftoken";

/// Publishes photos through the Instagram web endpoints.
///
/// Each call runs a fresh session: landing page for the CSRF cookie, login, photo upload,
/// then feed configuration with the caption.
pub struct InstagramPublisher {
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl std::fmt::Debug for InstagramPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstagramPublisher")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoginResponse {
    authenticated: bool,
    user: bool,
    status: String,
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StatusResponse {
    status: String,
    message: Option<String>,
}

struct Session {
    http: reqwest::Client,
    csrf: String,
}

impl InstagramPublisher {
    /// Publisher against `base_url` using `credentials` at publish time.
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn client(&self) -> QuotegramResult<reqwest::Client> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        if let Ok(referer) = HeaderValue::from_str(&self.url("/")) {
            headers.insert(REFERER, referer);
        }
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(30))
            .cookie_store(true)
            .build()
            .map_err(|e| QuotegramError::publish(format!("build publish http client: {e}")))
    }

    async fn open_session(&self) -> QuotegramResult<Session> {
        let http = self.client()?;
        let resp = http
            .get(self.url("/"))
            .send()
            .await
            .map_err(|e| QuotegramError::publish(format!("landing page request failed: {e}")))?;
        let csrf = csrf_from(&resp).unwrap_or_default();
        if csrf.is_empty() {
            tracing::debug!("landing page set no csrf cookie");
        }
        Ok(Session { http, csrf })
    }

    #[tracing::instrument(skip_all, fields(user = credentials.username()))]
    async fn login(&self, session: &mut Session, credentials: &Credentials) -> QuotegramResult<()> {
        let enc_password = encode_password(credentials.password(), chrono::Utc::now().timestamp());
        let resp = session
            .http
            .post(self.url("/accounts/login/ajax/"))
            .header("X-CSRFToken", session.csrf.as_str())
            .form(&[
                ("username", credentials.username()),
                ("enc_password", enc_password.as_str()),
                ("queryParams", "{}"),
                ("optIntoOneTap", "false"),
            ])
            .send()
            .await
            .map_err(|e| QuotegramError::publish(format!("login request failed: {e}")))?;

        if let Some(token) = csrf_from(&resp) {
            session.csrf = token;
        }
        let status = resp.status();
        if !status.is_success() {
            return Err(QuotegramError::publish(format!(
                "login rejected: {}",
                reason(status)
            )));
        }
        let body: LoginResponse = resp
            .json()
            .await
            .map_err(|e| QuotegramError::publish(format!("invalid login response: {e}")))?;
        if !body.authenticated {
            let detail = body.message.unwrap_or_else(|| {
                if body.user {
                    "wrong password".to_string()
                } else {
                    format!("unknown user (status {})", body.status)
                }
            });
            return Err(QuotegramError::publish(format!("login failed: {detail}")));
        }
        tracing::info!("logged in");
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(upload_id = %upload_id, bytes = photo.len()))]
    async fn upload(&self, session: &Session, upload_id: &str, photo: Vec<u8>) -> QuotegramResult<()> {
        let params = rupload_params(upload_id, &photo)?;
        let entity = format!("fb_uploader_{upload_id}");
        let resp = session
            .http
            .post(self.url(&format!("/rupload_igphoto/{entity}")))
            .header("X-CSRFToken", session.csrf.as_str())
            .header("X-Instagram-Rupload-Params", params)
            .header("X-Entity-Name", entity.as_str())
            .header("X-Entity-Length", photo.len().to_string())
            .header("Offset", "0")
            .header(reqwest::header::CONTENT_TYPE, "image/jpeg")
            .body(photo)
            .send()
            .await
            .map_err(|e| QuotegramError::publish(format!("upload request failed: {e}")))?;
        expect_ok(resp, "upload").await
    }

    #[tracing::instrument(skip_all, fields(upload_id = %upload_id))]
    async fn configure(&self, session: &Session, upload_id: &str, caption: &str) -> QuotegramResult<()> {
        let resp = session
            .http
            .post(self.url("/create/configure/"))
            .header("X-CSRFToken", session.csrf.as_str())
            .form(&[
                ("upload_id", upload_id),
                ("caption", caption),
                ("usertags", ""),
                ("custom_accessibility_caption", ""),
                ("retry_timeout", ""),
            ])
            .send()
            .await
            .map_err(|e| QuotegramError::publish(format!("configure request failed: {e}")))?;
        expect_ok(resp, "configure").await
    }
}

#[async_trait]
impl Publisher for InstagramPublisher {
    #[tracing::instrument(skip_all, fields(photo = %photo.display()))]
    async fn publish(&self, photo: &Path, caption: &str) -> QuotegramResult<()> {
        let credentials = self.credentials.credentials()?;
        let bytes = tokio::fs::read(photo).await.map_err(|e| {
            QuotegramError::publish(format!("read photo '{}': {e}", photo.display()))
        })?;

        let mut session = self.open_session().await?;
        self.login(&mut session, &credentials).await?;

        let upload_id = chrono::Utc::now().timestamp_millis().to_string();
        self.upload(&session, &upload_id, bytes).await?;
        self.configure(&session, &upload_id, caption).await?;
        tracing::info!(upload_id = %upload_id, "published feed post");
        Ok(())
    }
}

/// Browser-style password envelope sent to the login endpoint.
pub fn encode_password(password: &str, unix_secs: i64) -> String {
    format!("#PWD_INSTAGRAM_BROWSER:0:{unix_secs}:{password}")
}

/// JSON value of the `X-Instagram-Rupload-Params` header for a JPEG upload.
pub fn rupload_params(upload_id: &str, photo: &[u8]) -> QuotegramResult<String> {
    let (width, height) = image::ImageReader::new(Cursor::new(photo))
        .with_guessed_format()
        .map_err(|e| QuotegramError::publish(format!("inspect photo: {e}")))?
        .into_dimensions()
        .map_err(|e| QuotegramError::publish(format!("photo is not a readable image: {e}")))?;
    Ok(serde_json::json!({
        "media_type": 1,
        "upload_id": upload_id,
        "upload_media_height": height,
        "upload_media_width": width,
    })
    .to_string())
}

fn csrf_from(resp: &reqwest::Response) -> Option<String> {
    resp.cookies()
        .find(|c| c.name() == CSRF_COOKIE)
        .map(|c| c.value().to_string())
}

fn reason(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string())
}

async fn expect_ok(resp: reqwest::Response, step: &str) -> QuotegramResult<()> {
    let status = resp.status();
    if !status.is_success() {
        return Err(QuotegramError::publish(format!(
            "{step} rejected: {}",
            reason(status)
        )));
    }
    let body: StatusResponse = resp
        .json()
        .await
        .map_err(|e| QuotegramError::publish(format!("invalid {step} response: {e}")))?;
    if body.status != "ok" {
        let detail = body.message.unwrap_or(body.status);
        return Err(QuotegramError::publish(format!("{step} failed: {detail}")));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/publish/instagram.rs"]
mod tests;
