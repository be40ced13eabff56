use super::*;

fn fixture_font() -> FontFace {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts/Tuffy.ttf");
    FontFace::from_path(&path).unwrap()
}

fn row_has_ink(img: &RgbaImage, y: u32) -> bool {
    (0..img.width()).any(|x| img.get_pixel(x, y)[3] > 0)
}

#[test]
fn panel_is_content_sized_and_transparent_outside_glyphs() {
    let font = fixture_font();
    let layout = LayoutConfig::default();
    let mut renderer = TextPanelRenderer::new(font, layout).unwrap();
    let panel = renderer.render(&crate::quote::sample_quote()).unwrap();

    assert_eq!(panel.image.dimensions(), (600, 400));
    assert_eq!(panel.author_y, panel.quote_height + 20);
    assert!(panel.quote_height > 0);

    // Glyph pixels are neutral white; everything else is fully transparent.
    let mut opaque_ink = 0usize;
    for px in panel.image.pixels() {
        if px[3] == 0 {
            assert_eq!(px.0, [0, 0, 0, 0]);
        } else {
            assert!(px[0] == px[1] && px[1] == px[2], "{px:?}");
            if px[3] == 255 {
                assert_eq!(px[0], 255);
                opaque_ink += 1;
            }
        }
    }
    assert!(opaque_ink > 0);

    // Gap between quote and author stays clear, author ink starts below it.
    assert!(!row_has_ink(&panel.image, panel.quote_height + 2));
    assert!(
        (panel.author_y..panel.author_y + 40).any(|y| row_has_ink(&panel.image, y)),
        "author line should be drawn below the quote"
    );
    assert!(!row_has_ink(&panel.image, 399));
}

#[test]
fn text_is_horizontally_centered() {
    let font = fixture_font();
    let img = prepare_text(&Quote::new("Hi", "A"), &font, &LayoutConfig::default()).unwrap();

    let mut min_x = u32::MAX;
    let mut max_x = 0;
    for (x, _, px) in img.enumerate_pixels() {
        if px[3] > 0 {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
        }
    }
    assert!(min_x < max_x);
    let center = (min_x + max_x) / 2;
    assert!((280..=320).contains(&center), "ink centered at {center}");
}

#[test]
fn empty_quote_still_renders_author_dash() {
    let font = fixture_font();
    let img = prepare_text(&Quote::default(), &font, &LayoutConfig::default()).unwrap();
    assert_eq!(img.dimensions(), (600, 400));
    assert!(img.pixels().any(|p| p[3] > 0));
}

#[test]
fn invalid_layout_is_rejected_before_rendering() {
    let font = FontFace::from_bytes(vec![0u8; 4], 0, "unused");
    let layout = LayoutConfig {
        content_height: 0,
        ..LayoutConfig::default()
    };
    match TextPanelRenderer::new(font, layout) {
        Err(QuotegramError::Pipeline(msg)) => assert!(msg.contains("layout.content_height")),
        Err(other) => panic!("expected Pipeline, got {other:?}"),
        Ok(_) => panic!("zero-height panel accepted"),
    }
}

#[test]
fn long_quote_is_clipped_to_the_panel() {
    let font = fixture_font();
    let quote = Quote::new("word ".repeat(600), "Someone");
    let img = prepare_text(&quote, &font, &LayoutConfig::default()).unwrap();
    assert_eq!(img.dimensions(), (600, 400));
    assert!((0..40).any(|y| row_has_ink(&img, y)));
}
