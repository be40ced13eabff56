use crate::foundation::error::{QuotegramError, QuotegramResult};

/// Fixed geometry of a post image, shared by every pipeline stage.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Final post width in pixels.
    pub post_width: u32,
    /// Final post height in pixels.
    pub post_height: u32,
    /// Text panel width; also the line-wrapping width.
    pub content_width: u32,
    /// Text panel height.
    pub content_height: u32,
    /// Horizontal offset of the text panel inside the post.
    pub content_x: i64,
    /// Vertical offset of the text panel inside the post.
    pub content_y: i64,
    /// Gap between the measured quote height and the author line.
    pub author_offset: u32,
    /// Logo width after resizing; the height follows the aspect ratio.
    pub logo_width: u32,
    /// Horizontal offset of the logo inside the post.
    pub logo_x: i64,
    /// Vertical offset of the logo inside the post.
    pub logo_y: i64,
    /// Font size in pixels for both the quote and the author line.
    pub font_size_px: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            post_width: 800,
            post_height: 800,
            content_width: 600,
            content_height: 400,
            content_x: 100,
            content_y: 150,
            author_offset: 20,
            logo_width: 300,
            logo_x: 250,
            logo_y: 550,
            font_size_px: 32.0,
        }
    }
}

impl LayoutConfig {
    /// Check that every size is usable by the rasterizer.
    pub fn validate(&self) -> QuotegramResult<()> {
        for (key, v) in [
            ("layout.post_width", self.post_width),
            ("layout.post_height", self.post_height),
            ("layout.content_width", self.content_width),
            ("layout.content_height", self.content_height),
            ("layout.logo_width", self.logo_width),
        ] {
            if v == 0 {
                return Err(QuotegramError::config(format!("{key} must be > 0")));
            }
            if v > u32::from(u16::MAX) {
                return Err(QuotegramError::config(format!(
                    "{key} must be <= {}",
                    u16::MAX
                )));
            }
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(QuotegramError::config(
                "layout.font_size_px must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Logo height after scaling an `orig_w`×`orig_h` logo to [`Self::logo_width`].
    pub fn logo_height_for(&self, orig_w: u32, orig_h: u32) -> u32 {
        if orig_w == 0 {
            return 1;
        }
        let h = f64::from(orig_h) * f64::from(self.logo_width) / f64::from(orig_w);
        (h.round() as u32).max(1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/layout.rs"]
mod tests;
