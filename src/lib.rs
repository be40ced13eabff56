//! Quotegram is a scheduled quote-of-the-day image bot.
//!
//! Every tick fetches a quote, renders it onto a darkened, desaturated background with a logo
//! overlay, writes the post as JPEG and hands it to a social feed publisher:
//!
//! - [`quote`]: quote value object and API client
//! - [`render`]: background compositor, text panel renderer, post assembler
//! - [`publish`]: publisher contract and the Instagram web client
//! - [`schedule`]: cron trigger loop that never overlaps ticks
//! - [`bot`]: the per-tick sequence tying them together
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

/// Asset decoding and font resolution.
pub mod assets;
pub mod bot;
pub mod config;
/// Pixel compositing.
pub mod effects;
pub mod publish;
pub mod quote;
/// Image rendering pipeline.
pub mod render;
pub mod schedule;
pub mod telemetry;

pub use crate::foundation::error::{QuotegramError, QuotegramResult};
pub use crate::foundation::layout::LayoutConfig;

pub use crate::assets::font::FontFace;
pub use crate::bot::{Bot, RunMode, TickOutcome};
pub use crate::effects::composite::{BlendMode, CompositeOpts};
pub use crate::publish::{CredentialProvider, Credentials, Publisher};
pub use crate::quote::{Quote, QuoteClient, fetch_quote, sample_quote};
pub use crate::render::background::{compose_background, prepare_background};
pub use crate::render::post::{PostSpec, generate_post_image};
pub use crate::render::text_panel::{TextPanelRenderer, prepare_text};
