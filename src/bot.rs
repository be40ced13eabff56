//! One bot tick: fetch, render, write, publish.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::assets::font::FontFace;
use crate::config::Settings;
use crate::foundation::error::{QuotegramError, QuotegramResult};
use crate::publish::{EnvCredentials, InstagramPublisher, Publisher};
use crate::quote::{Quote, QuoteClient, sample_quote};
use crate::render::post::{PostSpec, generate_post_image};

/// Production posts fetched quotes; test mode uses the sample quote and never publishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// Fetch from the quote API and publish.
    Production,
    /// Sample quote, no publishing.
    Test,
}

impl RunMode {
    /// Mode for a `--test` flag.
    pub fn from_test_flag(test: bool) -> Self {
        if test { Self::Test } else { Self::Production }
    }
}

/// What a successful tick produced.
#[derive(Clone, Debug)]
pub struct TickOutcome {
    /// Quote that was rendered.
    pub quote: Quote,
    /// Written JPEG.
    pub path: PathBuf,
    /// Whether the post was handed to the publisher.
    pub published: bool,
}

/// Everything a tick needs, built once at startup.
pub struct Bot {
    quotes: QuoteClient,
    category: String,
    spec: Arc<PostSpec>,
    publisher: Option<Arc<dyn Publisher>>,
    caption: String,
    mode: RunMode,
}

impl Bot {
    /// Bot without a publisher.
    pub fn new(quotes: QuoteClient, category: impl Into<String>, spec: PostSpec, mode: RunMode) -> Self {
        Self {
            quotes,
            category: category.into(),
            spec: Arc::new(spec),
            publisher: None,
            caption: String::new(),
            mode,
        }
    }

    /// Attach the publisher and the caption it posts with.
    pub fn with_publisher(mut self, publisher: Arc<dyn Publisher>, caption: impl Into<String>) -> Self {
        self.publisher = Some(publisher);
        self.caption = caption.into();
        self
    }

    /// Wire a bot from resolved settings. Resolves the font once; a missing font fails here.
    pub fn from_settings(settings: &Settings, mode: RunMode) -> QuotegramResult<Self> {
        let font = FontFace::resolve(settings.assets.font.as_deref(), &settings.assets.path)?;
        tracing::info!(font = font.origin(), "resolved font");

        let spec = PostSpec {
            assets_dir: settings.assets.path.clone(),
            output_dir: settings.output.directory.clone(),
            font,
            layout: settings.layout,
        };
        let quotes = QuoteClient::new(&settings.quotes.base_url, &settings.quotes.language)?;
        let bot = Self::new(quotes, &settings.quotes.category, spec, mode);

        let credentials = Arc::new(EnvCredentials::new(
            &settings.publish.user_env,
            &settings.publish.pass_env,
        ));
        let publisher = InstagramPublisher::new(&settings.publish.base_url, credentials);
        Ok(bot.with_publisher(Arc::new(publisher), &settings.publish.caption))
    }

    /// Selected mode.
    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Run one tick to completion.
    ///
    /// Steps run strictly in sequence and the first failure ends the tick: a failed fetch loads
    /// no assets, a failed render publishes nothing.
    #[tracing::instrument(skip(self), fields(mode = ?self.mode))]
    pub async fn run_tick(&self) -> QuotegramResult<TickOutcome> {
        let started = Instant::now();

        let quote = match self.mode {
            RunMode::Test => {
                tracing::info!("using sample quote");
                sample_quote()
            }
            RunMode::Production => self.quotes.fetch_quote(&self.category).await?,
        };

        let spec = Arc::clone(&self.spec);
        let rendered = quote.clone();
        let path = tokio::task::spawn_blocking(move || generate_post_image(&rendered, &spec))
            .await
            .map_err(|e| QuotegramError::pipeline(format!("render task failed: {e}")))??;

        let published = match (self.mode, self.publisher.as_ref()) {
            (RunMode::Test, _) => false,
            (RunMode::Production, Some(publisher)) => {
                publisher.publish(&path, &self.caption).await?;
                true
            }
            (RunMode::Production, None) => {
                return Err(QuotegramError::publish("no publisher configured"));
            }
        };

        tracing::info!(
            path = %path.display(),
            published,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "tick complete"
        );
        Ok(TickOutcome {
            quote,
            path,
            published,
        })
    }

    /// [`Self::run_tick`] with the outcome discarded, for the scheduler.
    pub async fn tick(self: Arc<Self>) -> QuotegramResult<()> {
        self.run_tick().await.map(|_| ())
    }
}
