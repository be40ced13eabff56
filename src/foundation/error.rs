use std::path::{Path, PathBuf};

/// Convenience result type used across quotegram.
pub type QuotegramResult<T> = Result<T, QuotegramError>;

/// Top-level error taxonomy for a single bot tick.
///
/// None of these are caught inside a tick: they surface at the scheduler boundary, which logs
/// them and waits for the next trigger.
#[derive(thiserror::Error, Debug)]
pub enum QuotegramError {
    /// The quote API answered with a non-success status, or its body could not be read.
    #[error("remote fetch error: {0}")]
    RemoteFetch(String),

    /// A background, logo or font asset is missing or cannot be decoded.
    #[error("asset load error: '{}': {reason}", path.display())]
    AssetLoad {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying failure.
        reason: String,
    },

    /// Compositing, encoding or writing the post image failed.
    #[error("pipeline error: {0}")]
    Pipeline(String),

    /// Authentication or upload against the social platform failed.
    #[error("publish error: {0}")]
    Publish(String),

    /// Invalid settings, layout geometry or cron expression.
    #[error("configuration error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QuotegramError {
    /// Build a [`QuotegramError::RemoteFetch`] value.
    pub fn remote_fetch(msg: impl Into<String>) -> Self {
        Self::RemoteFetch(msg.into())
    }

    /// Build a [`QuotegramError::AssetLoad`] value.
    pub fn asset_load(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::AssetLoad {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Build a [`QuotegramError::Pipeline`] value.
    pub fn pipeline(msg: impl Into<String>) -> Self {
        Self::Pipeline(msg.into())
    }

    /// Build a [`QuotegramError::Publish`] value.
    pub fn publish(msg: impl Into<String>) -> Self {
        Self::Publish(msg.into())
    }

    /// Build a [`QuotegramError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Re-tag a [`QuotegramError::Config`] raised inside the image pipeline as
    /// [`QuotegramError::Pipeline`]; other variants pass through.
    pub(crate) fn in_pipeline(self) -> Self {
        match self {
            Self::Config(msg) => Self::Pipeline(msg),
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
