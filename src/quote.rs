//! Quote value object and the quote-of-the-day API client.

use std::time::Duration;

use serde::Deserialize;

use crate::foundation::error::{QuotegramError, QuotegramResult};

/// Default quote API origin.
pub const DEFAULT_QUOTES_BASE_URL: &str = "https://quotes.rest";
/// Category used when none is configured.
pub const DEFAULT_CATEGORY: &str = "inspire";
/// Language requested from the API.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Text and author of a single post. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Quote {
    content: String,
    author: String,
}

impl Quote {
    /// Build a quote from its two fields.
    pub fn new(content: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            author: author.into(),
        }
    }

    /// Quote text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Quote author.
    pub fn author(&self) -> &str {
        &self.author
    }
}

/// Fixed quote for offline runs; performs no IO.
pub fn sample_quote() -> Quote {
    Quote::new(
        "Lorem ipsum dolor sit amet amet kriza kriza barak obama mi zvani.",
        "Toster Testov",
    )
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QodResponse {
    contents: QodContents,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QodContents {
    quotes: Vec<QodQuote>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QodQuote {
    quote: Option<String>,
    author: Option<String>,
}

impl QodResponse {
    fn into_quote(self) -> Quote {
        let first = self.contents.quotes.into_iter().next().unwrap_or_default();
        Quote::new(
            first.quote.unwrap_or_default(),
            first.author.unwrap_or_default(),
        )
    }
}

/// Parse a quote-of-the-day payload.
///
/// Missing `contents`, `quotes`, `quote` or `author` degrade to empty strings; only a body that
/// is not JSON at all is an error.
pub fn parse_qod(body: &str) -> QuotegramResult<Quote> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| QuotegramError::remote_fetch(format!("invalid quote payload: {e}")))?;
    let parsed = QodResponse::deserialize(&value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "unexpected quote payload shape; using empty quote");
        QodResponse::default()
    });
    Ok(parsed.into_quote())
}

/// HTTP client for the quote-of-the-day endpoint.
#[derive(Clone, Debug)]
pub struct QuoteClient {
    http: reqwest::Client,
    base_url: String,
    language: String,
}

impl QuoteClient {
    /// Client against `base_url` (no trailing path), requesting `language`.
    pub fn new(base_url: impl Into<String>, language: impl Into<String>) -> QuotegramResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| QuotegramError::config(format!("build quote http client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            language: language.into(),
        })
    }

    /// Endpoint URL queried by [`Self::fetch_quote`].
    pub fn endpoint(&self) -> String {
        format!("{}/qod", self.base_url)
    }

    /// Fetch today's quote for `category`.
    ///
    /// A non-success status fails with [`QuotegramError::RemoteFetch`] carrying the status text.
    #[tracing::instrument(skip(self), fields(endpoint = %self.endpoint()))]
    pub async fn fetch_quote(&self, category: &str) -> QuotegramResult<Quote> {
        let resp = self
            .http
            .get(self.endpoint())
            .query(&[("category", category), ("language", self.language.as_str())])
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| QuotegramError::remote_fetch(format!("quote request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let text = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string());
            return Err(QuotegramError::remote_fetch(text));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| QuotegramError::remote_fetch(format!("read quote body: {e}")))?;
        let quote = parse_qod(&body)?;
        tracing::info!(author = quote.author(), "fetched quote");
        Ok(quote)
    }
}

impl Default for QuoteClient {
    fn default() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_QUOTES_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Fetch today's quote for `category` from the public API.
pub async fn fetch_quote(category: &str) -> QuotegramResult<Quote> {
    QuoteClient::default().fetch_quote(category).await
}

#[cfg(test)]
#[path = "../tests/unit/quote/quote.rs"]
mod tests;
