use super::*;

#[test]
fn defaults_match_post_geometry() {
    let l = LayoutConfig::default();
    assert_eq!((l.post_width, l.post_height), (800, 800));
    assert_eq!((l.content_width, l.content_height), (600, 400));
    assert_eq!((l.content_x, l.content_y), (100, 150));
    assert_eq!((l.logo_width, l.logo_x, l.logo_y), (300, 250, 550));
    assert_eq!(l.author_offset, 20);
    l.validate().unwrap();
}

#[test]
fn validate_rejects_zero_and_oversized_dimensions() {
    let l = LayoutConfig {
        content_width: 0,
        ..LayoutConfig::default()
    };
    let err = l.validate().unwrap_err().to_string();
    assert!(err.contains("layout.content_width"));

    let l = LayoutConfig {
        post_width: 70_000,
        ..LayoutConfig::default()
    };
    assert!(l.validate().is_err());

    let l = LayoutConfig {
        font_size_px: f32::NAN,
        ..LayoutConfig::default()
    };
    assert!(l.validate().is_err());
}

#[test]
fn logo_height_preserves_aspect_ratio() {
    let l = LayoutConfig::default();
    assert_eq!(l.logo_height_for(600, 200), 100);
    assert_eq!(l.logo_height_for(900, 101), 34);
    assert_eq!(l.logo_height_for(3000, 1), 1);
}

#[test]
fn partial_override_deserializes_over_defaults() {
    let l: LayoutConfig = serde_json::from_str(r#"{"post_width": 400, "post_height": 400}"#).unwrap();
    assert_eq!(l.post_width, 400);
    assert_eq!(l.content_width, 600);
}
