use image::Rgba;

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

#[test]
fn post_file_path_uses_millis_and_suffix() {
    let p = post_file_path(Path::new("images"), 1_700_000_000_123);
    assert_eq!(p, PathBuf::from("images/1700000000123_quote.jpg"));
}

#[test]
fn assemble_places_text_at_content_offset() {
    let layout = LayoutConfig::default();
    let mut bg = RgbaImage::from_pixel(800, 800, Rgba([40, 40, 40, 193]));
    let mut text = RgbaImage::new(600, 400);
    text.put_pixel(0, 0, Rgba([255, 255, 255, 255]));

    assemble(&mut bg, &text, &layout);

    let hit = bg.get_pixel(100, 150);
    assert!(hit[0] > 200, "text pixel should brighten background: {hit:?}");
    assert_eq!(*bg.get_pixel(101, 150), Rgba([40, 40, 40, 193]));
    assert_eq!(*bg.get_pixel(99, 149), Rgba([40, 40, 40, 193]));
}

#[test]
fn write_jpeg_creates_directory_and_readable_file() {
    let tmp = temp_dir("post_write_jpeg");
    let path = tmp.join("nested").join("1_quote.jpg");
    let img = RgbaImage::from_pixel(16, 8, Rgba([10, 20, 30, 128]));

    write_jpeg(&img, &path).unwrap();

    let decoded = image::open(&path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (16, 8));
    assert_eq!(
        image::ImageFormat::from_path(&path).unwrap(),
        image::ImageFormat::Jpeg
    );

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn write_jpeg_into_file_parent_fails_as_pipeline_error() {
    let tmp = temp_dir("post_write_blocked");
    std::fs::create_dir_all(&tmp).unwrap();
    let blocker = tmp.join("images");
    std::fs::write(&blocker, b"not a dir").unwrap();

    let err = write_jpeg(&RgbaImage::new(2, 2), &blocker.join("x_quote.jpg")).unwrap_err();
    assert!(matches!(err, QuotegramError::Pipeline(_)));

    std::fs::remove_dir_all(&tmp).ok();
}
