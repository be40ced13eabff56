use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::assets::font::FontFace;
use crate::effects::composite::{BlendMode, CompositeOpts, composite_in_place};
use crate::foundation::error::{QuotegramError, QuotegramResult};
use crate::foundation::layout::LayoutConfig;
use crate::quote::Quote;
use crate::render::background::prepare_background;
use crate::render::text_panel::TextPanelRenderer;

/// Text panel overlay onto the background.
pub const TEXT_OVERLAY: CompositeOpts = CompositeOpts::new(BlendMode::Add, 0.8, 1.0);

/// Default directory post images are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "images";

/// Inputs that stay fixed across ticks.
#[derive(Clone, Debug)]
pub struct PostSpec {
    /// Directory holding `blackboard.jpg` and `logo.png`.
    pub assets_dir: PathBuf,
    /// Directory the JPEG is written to.
    pub output_dir: PathBuf,
    /// Font for the quote and author lines.
    pub font: FontFace,
    /// Post geometry.
    pub layout: LayoutConfig,
}

/// Composite the text panel onto the background at the content offset.
pub fn assemble(background: &mut RgbaImage, text: &RgbaImage, layout: &LayoutConfig) {
    composite_in_place(
        background,
        text,
        layout.content_x,
        layout.content_y,
        TEXT_OVERLAY,
    );
}

/// Output path for a post created at `millis` since the Unix epoch.
pub fn post_file_path(output_dir: &Path, millis: i64) -> PathBuf {
    output_dir.join(format!("{millis}_quote.jpg"))
}

/// Render the full post for `quote` and write it as JPEG.
///
/// Returns `<output_dir>/<unix-millis>_quote.jpg`. Asset errors pass through unchanged; any
/// other failure is a pipeline error and leaves no file behind.
#[tracing::instrument(skip_all, fields(author = quote.author()))]
pub fn generate_post_image(quote: &Quote, spec: &PostSpec) -> QuotegramResult<PathBuf> {
    let mut background = prepare_background(&spec.assets_dir, &spec.layout)?;
    let panel = TextPanelRenderer::new(spec.font.clone(), spec.layout)?.render(quote)?;
    assemble(&mut background, &panel.image, &spec.layout);

    let path = post_file_path(&spec.output_dir, chrono::Utc::now().timestamp_millis());
    write_jpeg(&background, &path)?;
    tracing::info!(path = %path.display(), "wrote post image");
    Ok(path)
}

/// Encode `img` as JPEG (alpha dropped) and write it to `path`, creating parent directories.
pub fn write_jpeg(img: &RgbaImage, path: &Path) -> QuotegramResult<()> {
    let rgb = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
    let mut buf = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .map_err(|e| QuotegramError::pipeline(format!("encode jpeg: {e}")))?;

    ensure_parent_dir(path)?;
    if let Err(e) = std::fs::write(path, &buf) {
        std::fs::remove_file(path).ok();
        return Err(QuotegramError::pipeline(format!(
            "write '{}': {e}",
            path.display()
        )));
    }
    Ok(())
}

/// Create `path`'s parent directory if it does not exist.
pub fn ensure_parent_dir(path: &Path) -> QuotegramResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            QuotegramError::pipeline(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/post.rs"]
mod tests;
