use std::path::Path;

use image::RgbaImage;

use crate::foundation::error::{QuotegramError, QuotegramResult};

/// Decode an in-memory encoded image (JPEG, PNG, ...) to straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> QuotegramResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| QuotegramError::pipeline(format!("decode image from memory: {e}")))?;
    Ok(dyn_img.to_rgba8())
}

/// Read and decode an image file.
///
/// Both a missing file and an undecodable one are reported as [`QuotegramError::AssetLoad`]
/// naming `path`.
pub fn load_image(path: &Path) -> QuotegramResult<RgbaImage> {
    let bytes = std::fs::read(path).map_err(|e| QuotegramError::asset_load(path, e.to_string()))?;
    let img = decode_image(&bytes).map_err(|e| QuotegramError::asset_load(path, e.to_string()))?;
    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "loaded image asset"
    );
    Ok(img)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
