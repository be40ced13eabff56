use image::{Rgba, RgbaImage};

use crate::foundation::math::{scale_u8, store_unit, unit};

/// Pixel-wise blend rule used when compositing one buffer onto another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Multiply colors; darkens the destination.
    Multiply,
    /// Add colors; brightens the destination.
    Add,
}

/// How a source buffer is blended onto a destination.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositeOpts {
    /// Blend rule.
    pub mode: BlendMode,
    /// Multiplier applied to every source alpha before blending.
    pub opacity_source: f32,
    /// Multiplier applied once to the whole destination alpha channel before blending.
    pub opacity_dest: f32,
}

impl CompositeOpts {
    /// Options for `mode` with the given source and destination opacities.
    pub const fn new(mode: BlendMode, opacity_source: f32, opacity_dest: f32) -> Self {
        Self {
            mode,
            opacity_source,
            opacity_dest,
        }
    }
}

/// Blend one straight-alpha pixel onto another.
///
/// Channels are blended in unit space with the source alpha pre-scaled by `opacity_source`:
///
/// - `out_a = da + sa - da * sa`
/// - multiply: `out_c = (sc*sa * dc*da + sc*sa * (1 - da) + dc*da * (1 - sa)) / out_a`
/// - add: `out_c = (sc*sa + dc*da) / out_a`
pub fn blend_pixel(src: Rgba<u8>, dst: Rgba<u8>, mode: BlendMode, opacity_source: f32) -> Rgba<u8> {
    let sa = unit(src[3]) * opacity_source.clamp(0.0, 1.0);
    let da = unit(dst[3]);
    let a = da + sa - da * sa;

    let mut out = [0u8; 4];
    for i in 0..3 {
        let sp = unit(src[i]) * sa;
        let dp = unit(dst[i]) * da;
        let c = match mode {
            BlendMode::Multiply => (sp * dp + sp * (1.0 - da) + dp * (1.0 - sa)) / a,
            BlendMode::Add => (sp + dp) / a,
        };
        out[i] = store_unit(c);
    }
    out[3] = store_unit(a);
    Rgba(out)
}

/// Composite `src` onto `dst` with its top-left corner at (`x`, `y`).
///
/// Source pixels that land outside `dst` are cropped.
pub fn composite_in_place(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64, opts: CompositeOpts) {
    if opts.opacity_dest != 1.0 {
        opacity_in_place(dst, opts.opacity_dest);
    }

    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    for (sx, sy, s) in src.enumerate_pixels() {
        let dx = x + i64::from(sx);
        let dy = y + i64::from(sy);
        if dx < 0 || dy < 0 || dx >= dw || dy >= dh {
            continue;
        }
        let d = dst.get_pixel_mut(dx as u32, dy as u32);
        *d = blend_pixel(*s, *d, opts.mode, opts.opacity_source);
    }
}

/// Multiply every alpha value by `factor` (clamped to `[0, 1]`).
pub fn opacity_in_place(img: &mut RgbaImage, factor: f32) {
    let f = factor.clamp(0.0, 1.0);
    for px in img.pixels_mut() {
        px[3] = scale_u8(px[3], f);
    }
}

/// Desaturate with Rec. 709 luma weights, keeping alpha.
pub fn grayscale_in_place(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        let grey = 0.2126 * f32::from(px[0]) + 0.7152 * f32::from(px[1]) + 0.0722 * f32::from(px[2]);
        let g = grey.clamp(0.0, 255.0) as u8;
        px[0] = g;
        px[1] = g;
        px[2] = g;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
