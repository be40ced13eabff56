//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;

use crate::foundation::error::{QuotegramError, QuotegramResult};
use crate::foundation::layout::LayoutConfig;
use crate::publish::DEFAULT_CAPTION;
use crate::publish::credentials::{DEFAULT_PASS_ENV, DEFAULT_USER_ENV};
use crate::publish::instagram::DEFAULT_INSTAGRAM_BASE_URL;
use crate::quote::{DEFAULT_CATEGORY, DEFAULT_LANGUAGE, DEFAULT_QUOTES_BASE_URL};
use crate::render::post::DEFAULT_OUTPUT_DIR;
use crate::schedule::{DEFAULT_CRON, DEFAULT_TEST_CRON, parse_cron};

/// Command-line surface.
pub mod cli;

pub use cli::{CliArgs, Command, ModeArgs};

const LOCAL_CONFIG_BASENAME: &str = "quotegram";
const ENV_PREFIX: &str = "QUOTEGRAM";
const DEFAULT_ASSETS_DIR: &str = "assets";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Asset locations.
    pub assets: AssetSettings,
    /// Where post images are written.
    pub output: OutputSettings,
    /// Quote API.
    pub quotes: QuoteSettings,
    /// Publish target.
    pub publish: PublishSettings,
    /// Trigger cadence.
    pub schedule: ScheduleSettings,
    /// Post geometry.
    pub layout: LayoutConfig,
    /// Log output.
    pub logging: LoggingSettings,
}

/// Asset locations.
#[derive(Debug, Clone)]
pub struct AssetSettings {
    /// Directory holding `blackboard.jpg`, `logo.png` and optionally `font.ttf`.
    pub path: PathBuf,
    /// Explicit font file; wins over `font.ttf` and the system face.
    pub font: Option<PathBuf>,
}

/// Output location.
#[derive(Debug, Clone)]
pub struct OutputSettings {
    /// Directory post images are written to.
    pub directory: PathBuf,
}

/// Quote API settings.
#[derive(Debug, Clone)]
pub struct QuoteSettings {
    /// API origin.
    pub base_url: String,
    /// Quote category.
    pub category: String,
    /// Requested language.
    pub language: String,
}

/// Publish target settings.
#[derive(Debug, Clone)]
pub struct PublishSettings {
    /// Instagram web origin.
    pub base_url: String,
    /// Caption attached to every post.
    pub caption: String,
    /// Environment variable holding the account name.
    pub user_env: String,
    /// Environment variable holding the account password.
    pub pass_env: String,
}

/// Trigger cadence.
#[derive(Debug, Clone)]
pub struct ScheduleSettings {
    /// Production cron expression.
    pub cron: String,
    /// Test-mode cron expression.
    pub test_cron: String,
}

impl ScheduleSettings {
    /// Expression for the selected mode.
    pub fn for_mode(&self, test: bool) -> &str {
        if test { &self.test_cron } else { &self.cron }
    }
}

/// Log output settings.
#[derive(Debug, Clone)]
pub struct LoggingSettings {
    /// Default level directive; `RUST_LOG` still overrides it.
    pub level: LevelFilter,
    /// Line format.
    pub format: LogFormat,
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Compact human-readable lines.
    Compact,
}

fn invalid(key: &str, reason: impl std::fmt::Display) -> QuotegramError {
    QuotegramError::config(format!("invalid configuration for `{key}`: {reason}"))
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> QuotegramResult<Settings> {
    let mut builder =
        Config::builder().add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder
        .build()
        .and_then(|c| c.try_deserialize::<RawSettings>())
        .map_err(|e| QuotegramError::config(format!("failed to build configuration: {e}")))?;

    raw.apply_cli_overrides(cli);
    Settings::from_raw(raw)
}

/// Parse the process arguments and resolve settings, returning both.
pub fn load_with_cli() -> QuotegramResult<(CliArgs, Settings)> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    assets: RawAssetSettings,
    output: RawOutputSettings,
    quotes: RawQuoteSettings,
    publish: RawPublishSettings,
    schedule: RawScheduleSettings,
    layout: LayoutConfig,
    logging: RawLoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawAssetSettings {
    path: Option<PathBuf>,
    font: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawOutputSettings {
    directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawQuoteSettings {
    base_url: Option<String>,
    category: Option<String>,
    language: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawPublishSettings {
    base_url: Option<String>,
    caption: Option<String>,
    user_env: Option<String>,
    pass_env: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawScheduleSettings {
    cron: Option<String>,
    test_cron: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

impl RawSettings {
    fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(path) = cli.assets_path.as_ref() {
            self.assets.path = Some(path.clone());
        }
        if let Some(level) = cli.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = cli.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> QuotegramResult<Self> {
        let RawSettings {
            assets,
            output,
            quotes,
            publish,
            schedule,
            layout,
            logging,
        } = raw;

        layout.validate()?;

        Ok(Self {
            assets: AssetSettings {
                path: non_empty_path(assets.path, DEFAULT_ASSETS_DIR),
                font: assets.font.filter(|p| !p.as_os_str().is_empty()),
            },
            output: OutputSettings {
                directory: non_empty_path(output.directory, DEFAULT_OUTPUT_DIR),
            },
            quotes: build_quote_settings(quotes)?,
            publish: build_publish_settings(publish)?,
            schedule: build_schedule_settings(schedule)?,
            layout,
            logging: build_logging_settings(logging)?,
        })
    }
}

fn non_empty_path(value: Option<PathBuf>, default: &str) -> PathBuf {
    value
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(default))
}

fn trimmed_or(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn http_url(key: &str, value: Option<String>, default: &str) -> QuotegramResult<String> {
    let url = trimmed_or(value, default);
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(invalid(key, format!("`{url}` is not an http(s) URL")));
    }
    Ok(url)
}

fn build_quote_settings(quotes: RawQuoteSettings) -> QuotegramResult<QuoteSettings> {
    Ok(QuoteSettings {
        base_url: http_url("quotes.base_url", quotes.base_url, DEFAULT_QUOTES_BASE_URL)?,
        category: trimmed_or(quotes.category, DEFAULT_CATEGORY),
        language: trimmed_or(quotes.language, DEFAULT_LANGUAGE),
    })
}

fn build_publish_settings(publish: RawPublishSettings) -> QuotegramResult<PublishSettings> {
    Ok(PublishSettings {
        base_url: http_url("publish.base_url", publish.base_url, DEFAULT_INSTAGRAM_BASE_URL)?,
        caption: publish
            .caption
            .unwrap_or_else(|| DEFAULT_CAPTION.to_string()),
        user_env: trimmed_or(publish.user_env, DEFAULT_USER_ENV),
        pass_env: trimmed_or(publish.pass_env, DEFAULT_PASS_ENV),
    })
}

fn build_schedule_settings(schedule: RawScheduleSettings) -> QuotegramResult<ScheduleSettings> {
    let cron = trimmed_or(schedule.cron, DEFAULT_CRON);
    let test_cron = trimmed_or(schedule.test_cron, DEFAULT_TEST_CRON);
    parse_cron(&cron).map_err(|e| invalid("schedule.cron", e))?;
    parse_cron(&test_cron).map_err(|e| invalid("schedule.test_cron", e))?;
    Ok(ScheduleSettings { cron, test_cron })
}

fn build_logging_settings(logging: RawLoggingSettings) -> QuotegramResult<LoggingSettings> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str())
            .map_err(|err| invalid("logging.level", format!("failed to parse: {err}")))?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
