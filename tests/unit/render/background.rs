use super::*;

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "quotegram_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn photo() -> RgbaImage {
    RgbaImage::from_pixel(40, 30, Rgba([200, 180, 160, 255]))
}

fn white_logo() -> RgbaImage {
    RgbaImage::from_pixel(600, 200, Rgba([255, 255, 255, 255]))
}

#[test]
fn background_is_post_sized_darkened_grayscale() {
    let layout = LayoutConfig::default();
    let bg = compose_background(&photo(), &white_logo(), &layout);
    assert_eq!(bg.dimensions(), (800, 800));

    let px = bg.get_pixel(100, 100);
    assert_eq!(px[0], px[1]);
    assert_eq!(px[1], px[2]);
    assert!(px[0] < 180, "expected darkened pixel, got {px:?}");
    assert!(px[0] > 40, "expected partial darkening, got {px:?}");
    // 255 * 0.9 -> 229, multiply with alpha 0.5 -> 242, logo pass * 0.8 -> 193.
    assert_eq!(px[3], 193);
}

#[test]
fn logo_is_scaled_to_width_and_added_at_offset() {
    let layout = LayoutConfig::default();
    let bg = compose_background(&photo(), &white_logo(), &layout);

    // 600x200 logo -> 300x100 at (250, 550).
    assert_eq!(*bg.get_pixel(250, 550), Rgba([255, 255, 255, 255]));
    assert_eq!(*bg.get_pixel(549, 649), Rgba([255, 255, 255, 255]));
    assert_ne!(*bg.get_pixel(249, 600), Rgba([255, 255, 255, 255]));
    assert_ne!(*bg.get_pixel(400, 650), Rgba([255, 255, 255, 255]));
}

#[test]
fn transparent_logo_leaves_background_untouched_in_color() {
    let layout = LayoutConfig::default();
    let clear = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 0]));
    let bg = compose_background(&photo(), &clear, &layout);
    assert_eq!(bg.get_pixel(400, 600)[0], bg.get_pixel(10, 10)[0]);
}

#[test]
fn compose_background_is_deterministic() {
    let layout = LayoutConfig::default();
    let a = compose_background(&photo(), &white_logo(), &layout);
    let b = compose_background(&photo(), &white_logo(), &layout);
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn custom_geometry_is_honored() {
    let layout = LayoutConfig {
        post_width: 64,
        post_height: 48,
        logo_width: 8,
        logo_x: 0,
        logo_y: 0,
        ..LayoutConfig::default()
    };
    let bg = compose_background(&photo(), &white_logo(), &layout);
    assert_eq!(bg.dimensions(), (64, 48));
    assert_eq!(*bg.get_pixel(7, 2), Rgba([255, 255, 255, 255]));
    assert_ne!(*bg.get_pixel(8, 2), Rgba([255, 255, 255, 255]));
}

#[test]
fn prepare_background_missing_assets_names_file() {
    let tmp = temp_dir("bg_missing");
    let err = prepare_background(&tmp, &LayoutConfig::default()).unwrap_err();
    match err {
        crate::QuotegramError::AssetLoad { path, .. } => {
            assert_eq!(path, tmp.join(BACKGROUND_FILE));
        }
        other => panic!("expected AssetLoad, got {other:?}"),
    }

    std::fs::create_dir_all(&tmp).unwrap();
    image::DynamicImage::ImageRgba8(photo())
        .to_rgb8()
        .save_with_format(tmp.join(BACKGROUND_FILE), image::ImageFormat::Jpeg)
        .unwrap();
    let err = prepare_background(&tmp, &LayoutConfig::default()).unwrap_err();
    match err {
        crate::QuotegramError::AssetLoad { path, .. } => {
            assert_eq!(path, tmp.join(LOGO_FILE));
        }
        other => panic!("expected AssetLoad, got {other:?}"),
    }

    white_logo().save(tmp.join(LOGO_FILE)).unwrap();
    let bg = prepare_background(&tmp, &LayoutConfig::default()).unwrap();
    assert_eq!(bg.dimensions(), (800, 800));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn invalid_layout_fails_as_pipeline_before_touching_assets() {
    let tmp = temp_dir("bg_bad_layout");
    let layout = LayoutConfig {
        logo_width: 0,
        ..LayoutConfig::default()
    };
    match prepare_background(&tmp, &layout).unwrap_err() {
        crate::QuotegramError::Pipeline(msg) => assert!(msg.contains("layout.logo_width")),
        other => panic!("expected Pipeline, got {other:?}"),
    }
}
