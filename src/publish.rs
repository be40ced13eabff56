//! Social feed publishing.
//!
//! The bot only knows the [`Publisher`] contract: a photo path plus a caption. Credentials come
//! from a [`CredentialProvider`] so secret storage can change without touching the publisher.

use std::path::Path;

use async_trait::async_trait;

use crate::foundation::error::QuotegramResult;

/// Credential sources for the publish account.
pub mod credentials;
/// Instagram web client.
pub mod instagram;

pub use credentials::{CredentialProvider, Credentials, EnvCredentials, StaticCredentials};
pub use instagram::InstagramPublisher;

/// Hashtag line attached to every post.
pub const DEFAULT_CAPTION: &str = "#quotes #stirring #inhalation #breathing_in #encouragement #muse #inspire #impetus #motivation #imagination #ennobling #exalting #inspirational #uplifting #motivating #enlightening #invigorating #exhilarating #rewarding #heartening #motive #need #motivator #motivated #motivates #motivating #reason #daily #desire #inspiration #quotation #cite #quotation_mark #paraphrase #quotations #phrase #excerpt #read #unquote #fine #well #better #form #fun #happy #like #love #meaning #nice ";

/// Uploads a finished post to a social feed.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Authenticate and upload `photo` with `caption` as a feed post.
    ///
    /// Any failure is a [`crate::QuotegramError::Publish`].
    async fn publish(&self, photo: &Path, caption: &str) -> QuotegramResult<()>;
}
