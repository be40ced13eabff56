use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::assets::decode::load_image;
use crate::effects::composite::{
    BlendMode, CompositeOpts, composite_in_place, grayscale_in_place,
};
use crate::foundation::error::{QuotegramError, QuotegramResult};
use crate::foundation::layout::LayoutConfig;

/// Base photo file inside the assets directory.
pub const BACKGROUND_FILE: &str = "blackboard.jpg";
/// Logo file inside the assets directory.
pub const LOGO_FILE: &str = "logo.png";

/// Black layer blended over the photo to darken it.
pub const DARKEN: CompositeOpts = CompositeOpts::new(BlendMode::Multiply, 0.5, 0.9);
/// Logo overlay onto the desaturated photo.
pub const LOGO_OVERLAY: CompositeOpts = CompositeOpts::new(BlendMode::Add, 1.0, 0.8);

/// Load `blackboard.jpg` and `logo.png` from `assets_dir` and build the post background.
///
/// Either asset failing to load is fatal and reported as an asset error naming the file.
#[tracing::instrument(skip(layout), fields(assets = %assets_dir.display()))]
pub fn prepare_background(assets_dir: &Path, layout: &LayoutConfig) -> QuotegramResult<RgbaImage> {
    layout.validate().map_err(QuotegramError::in_pipeline)?;
    let photo = load_image(&assets_dir.join(BACKGROUND_FILE))?;
    let logo = load_image(&assets_dir.join(LOGO_FILE))?;
    Ok(compose_background(&photo, &logo, layout))
}

/// Build the background from already-decoded assets.
///
/// Order matters for the exact pixels: resize, darken, desaturate, then add the logo.
pub fn compose_background(photo: &RgbaImage, logo: &RgbaImage, layout: &LayoutConfig) -> RgbaImage {
    let logo_h = layout.logo_height_for(logo.width(), logo.height());
    let logo = imageops::resize(logo, layout.logo_width, logo_h, FilterType::Triangle);

    let mut bg = imageops::resize(
        photo,
        layout.post_width,
        layout.post_height,
        FilterType::CatmullRom,
    );

    let black = RgbaImage::from_pixel(layout.post_width, layout.post_height, Rgba([0, 0, 0, 255]));
    composite_in_place(&mut bg, &black, 0, 0, DARKEN);
    grayscale_in_place(&mut bg);
    composite_in_place(&mut bg, &logo, layout.logo_x, layout.logo_y, LOGO_OVERLAY);

    tracing::debug!(
        width = bg.width(),
        height = bg.height(),
        logo_w = logo.width(),
        logo_h = logo.height(),
        "composed background"
    );
    bg
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
