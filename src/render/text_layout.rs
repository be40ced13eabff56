use crate::assets::font::FontFace;
use crate::foundation::error::{QuotegramError, QuotegramResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl TextBrushRgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
}

/// Horizontal placement of each wrapped line inside the wrapping width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Flush left.
    #[default]
    Start,
    /// Centered.
    Center,
}

impl TextAlign {
    fn to_parley(self) -> parley::Alignment {
        match self {
            TextAlign::Start => parley::Alignment::Start,
            TextAlign::Center => parley::Alignment::Center,
        }
    }
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    registered: Option<(String, String)>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: None,
        }
    }

    /// Family name of the most recently registered font.
    pub fn last_family_name(&self) -> Option<&str> {
        self.registered.as_ref().map(|(_, family)| family.as_str())
    }

    fn family_for(&mut self, font: &FontFace) -> QuotegramResult<String> {
        if let Some((origin, family)) = &self.registered
            && origin == font.origin()
        {
            return Ok(family.clone());
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        // Collections register one family per face; shape with the family of the chosen face.
        let family_id = families
            .iter()
            .find(|(_, infos)| infos.iter().any(|info| info.index() == font.index()))
            .map(|(id, _)| *id)
            .ok_or_else(|| {
                QuotegramError::asset_load(
                    font.origin(),
                    format!("no font face at index {} in font bytes", font.index()),
                )
            })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| {
                QuotegramError::asset_load(font.origin(), "registered font family has no name")
            })?
            .to_string();

        self.registered = Some((font.origin().to_string(), family_name.clone()));
        Ok(family_name)
    }

    /// Shape, wrap and align plain text.
    pub fn layout_plain(
        &mut self,
        text: &str,
        font: &FontFace,
        size_px: f32,
        brush: TextBrushRgba8,
        max_width_px: Option<f32>,
        align: TextAlign,
    ) -> QuotegramResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(QuotegramError::config(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = self.family_for(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(max_width_px);
        layout.align(max_width_px, align.to_parley(), parley::AlignmentOptions::default());

        Ok(layout)
    }
}

/// Height of a finished layout in whole pixels, rounded up.
pub fn layout_height(layout: &parley::Layout<TextBrushRgba8>) -> u32 {
    layout.height().ceil().max(0.0) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/render/text_layout.rs"]
mod tests;
