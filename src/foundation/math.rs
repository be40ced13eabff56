/// Map an 8-bit channel into `[0, 1]`.
#[inline]
pub(crate) fn unit(v: u8) -> f32 {
    f32::from(v) / 255.0
}

/// Store a `[0, 1]` channel back into 8 bits.
///
/// Values are clamped and truncated (not rounded), and NaN maps to 0. The blend rules produce
/// NaN when both inputs are fully transparent. The small bias keeps `store_unit(unit(v)) == v`
/// despite float error.
#[inline]
pub(crate) fn store_unit(v: f32) -> u8 {
    (v * 255.0 + STORE_BIAS).clamp(0.0, 255.0) as u8
}

const STORE_BIAS: f32 = 1e-3;

/// Scale an 8-bit channel by `f`, truncating.
#[inline]
pub(crate) fn scale_u8(v: u8, f: f32) -> u8 {
    (f32::from(v) * f).clamp(0.0, 255.0) as u8
}

/// Convert premultiplied RGBA8 to straight alpha in place.
pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
