use image::RgbaImage;

use crate::assets::font::FontFace;
use crate::foundation::error::{QuotegramError, QuotegramResult};
use crate::foundation::layout::LayoutConfig;
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::quote::Quote;
use crate::render::text_layout::{TextAlign, TextBrushRgba8, TextLayoutEngine, layout_height};

/// Rendered text panel plus the measurements used to place the author line.
#[derive(Clone, Debug)]
pub struct TextPanel {
    /// Transparent `content_width`×`content_height` canvas with both text blocks burned in.
    pub image: RgbaImage,
    /// Measured height of the wrapped quote text.
    pub quote_height: u32,
    /// Top edge of the author line (`quote_height + author_offset`).
    pub author_y: u32,
}

/// Renders the quote and its author onto a transparent canvas.
pub struct TextPanelRenderer {
    engine: TextLayoutEngine,
    font: FontFace,
    layout: LayoutConfig,
}

impl TextPanelRenderer {
    /// Build a renderer for `font` and `layout`.
    pub fn new(font: FontFace, layout: LayoutConfig) -> QuotegramResult<Self> {
        layout.validate().map_err(QuotegramError::in_pipeline)?;
        Ok(Self {
            engine: TextLayoutEngine::new(),
            font,
            layout,
        })
    }

    /// Render `quote` into a fresh panel.
    #[tracing::instrument(skip_all, fields(chars = quote.content().len()))]
    pub fn render(&mut self, quote: &Quote) -> QuotegramResult<TextPanel> {
        let w: u16 = self
            .layout
            .content_width
            .try_into()
            .map_err(|_| QuotegramError::pipeline("text panel width exceeds u16"))?;
        let h: u16 = self
            .layout
            .content_height
            .try_into()
            .map_err(|_| QuotegramError::pipeline("text panel height exceeds u16"))?;
        let max_w = self.layout.content_width as f32;
        let size = self.layout.font_size_px;

        let quote_layout = self.engine.layout_plain(
            quote.content(),
            &self.font,
            size,
            TextBrushRgba8::WHITE,
            Some(max_w),
            TextAlign::Center,
        )?;
        let quote_height = layout_height(&quote_layout);
        let author_y = quote_height + self.layout.author_offset;

        let author_line = format!("- {}", quote.author());
        let author_layout = self.engine.layout_plain(
            &author_line,
            &self.font,
            size,
            TextBrushRgba8::WHITE,
            Some(max_w),
            TextAlign::Center,
        )?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        draw_layout(&mut ctx, &quote_layout, 0.0);
        draw_layout(&mut ctx, &author_layout, f64::from(author_y));

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        let mut bytes = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut bytes);
        let image = RgbaImage::from_raw(u32::from(w), u32::from(h), bytes)
            .ok_or_else(|| QuotegramError::pipeline("text panel buffer size mismatch"))?;

        tracing::debug!(quote_height, author_y, "rendered text panel");
        Ok(TextPanel {
            image,
            quote_height,
            author_y,
        })
    }
}

fn draw_layout(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<TextBrushRgba8>,
    y: f64,
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((0.0, y)));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let mut pen_x = run.offset();
            let baseline = run.baseline();
            let glyphs = run.glyphs().map(|g| {
                let glyph = vello_cpu::Glyph {
                    id: g.id,
                    x: pen_x + g.x,
                    y: baseline - g.y,
                };
                pen_x += g.advance;
                glyph
            });
            // Glyph ids are only valid for the face the run was shaped with.
            ctx.glyph_run(run.run().font())
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

/// Render `quote` with `font` and `layout` into a transparent text panel.
pub fn prepare_text(
    quote: &Quote,
    font: &FontFace,
    layout: &LayoutConfig,
) -> QuotegramResult<RgbaImage> {
    let mut renderer = TextPanelRenderer::new(font.clone(), *layout)?;
    Ok(renderer.render(quote)?.image)
}

#[cfg(test)]
#[path = "../../tests/unit/render/text_panel.rs"]
mod tests;
