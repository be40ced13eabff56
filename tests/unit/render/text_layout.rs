use super::*;

fn fixture_font() -> FontFace {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts/Tuffy.ttf");
    FontFace::from_path(&path).unwrap()
}

#[test]
fn rejects_invalid_font_size() {
    let font = FontFace::from_bytes(vec![0u8; 4], 0, "bogus");
    let mut engine = TextLayoutEngine::new();
    let Err(err) =
        engine.layout_plain("x", &font, 0.0, TextBrushRgba8::WHITE, None, TextAlign::Start)
    else {
        panic!("zero font size accepted");
    };
    assert!(err.to_string().contains("size_px"));
}

#[test]
fn garbage_font_bytes_are_an_asset_error() {
    let font = FontFace::from_bytes(b"definitely not a font".to_vec(), 0, "garbage");
    let mut engine = TextLayoutEngine::new();
    let Err(err) =
        engine.layout_plain("x", &font, 32.0, TextBrushRgba8::WHITE, None, TextAlign::Start)
    else {
        panic!("garbage font bytes accepted");
    };
    assert!(matches!(err, QuotegramError::AssetLoad { .. }));
}

#[test]
fn wrapping_grows_height_downward() {
    let font = fixture_font();
    let mut engine = TextLayoutEngine::new();
    let one = engine
        .layout_plain("short", &font, 32.0, TextBrushRgba8::WHITE, Some(600.0), TextAlign::Center)
        .unwrap();
    let many = engine
        .layout_plain(
            &"wrap these words please ".repeat(12),
            &font,
            32.0,
            TextBrushRgba8::WHITE,
            Some(600.0),
            TextAlign::Center,
        )
        .unwrap();
    assert_eq!(one.lines().count(), 1);
    assert!(many.lines().count() > 1);
    assert!(layout_height(&many) > layout_height(&one));
    assert!(engine.last_family_name().is_some_and(|f| !f.trim().is_empty()));
}

#[test]
fn runs_are_shaped_with_the_selected_face() {
    let font = fixture_font();
    let mut engine = TextLayoutEngine::new();
    let layout = engine
        .layout_plain("Hello there", &font, 32.0, TextBrushRgba8::WHITE, Some(600.0), TextAlign::Start)
        .unwrap();
    let mut runs = 0;
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let used = run.run().font();
            assert_eq!(used.index, font.index());
            assert_eq!(used.data.data(), font.bytes());
            runs += 1;
        }
    }
    assert!(runs > 0);
    assert_eq!(engine.last_family_name(), Some("Tuffy"));
}

#[test]
fn face_index_outside_the_file_is_an_asset_error() {
    let font = fixture_font();
    let font = FontFace::from_bytes(font.bytes().to_vec(), 3, "tuffy#3");
    let mut engine = TextLayoutEngine::new();
    let Err(err) =
        engine.layout_plain("x", &font, 32.0, TextBrushRgba8::WHITE, None, TextAlign::Start)
    else {
        panic!("missing face index accepted");
    };
    assert!(err.to_string().contains("index 3"), "{err}");
}
