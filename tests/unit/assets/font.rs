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
fn explicit_font_must_exist() {
    let tmp = temp_dir("font_explicit_missing");
    let missing = tmp.join("nope.ttf");
    let err = FontFace::resolve(Some(&missing), &tmp).unwrap_err();
    assert!(matches!(err, QuotegramError::AssetLoad { ref path, .. } if *path == missing));
}

#[test]
fn bundled_font_in_assets_dir_wins_over_system() {
    let tmp = temp_dir("font_bundled");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(tmp.join(DEFAULT_FONT_FILE), b"not-really-a-font").unwrap();

    let face = FontFace::resolve(None, &tmp).unwrap();
    assert_eq!(face.bytes(), b"not-really-a-font");
    assert_eq!(face.index(), 0);
    assert!(face.origin().ends_with(DEFAULT_FONT_FILE));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn empty_font_file_is_rejected() {
    let tmp = temp_dir("font_empty");
    std::fs::create_dir_all(&tmp).unwrap();
    let p = tmp.join("empty.ttf");
    std::fs::write(&p, b"").unwrap();
    assert!(FontFace::from_path(&p).is_err());
    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn debug_output_omits_font_bytes() {
    let face = FontFace::from_bytes(vec![1, 2, 3], 0, "inline");
    let dbg = format!("{face:?}");
    assert!(dbg.contains("inline"));
    assert!(dbg.contains("len: 3"));
}

fn fixture_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts/Tuffy.ttf")
}

#[test]
fn sans_serif_falls_back_when_generic_family_is_missing() {
    let mut db = fontdb::Database::new();
    db.load_font_file(fixture_path()).unwrap();
    assert!(
        db.query(&fontdb::Query {
            families: &[fontdb::Family::SansSerif],
            ..fontdb::Query::default()
        })
        .is_none()
    );

    let face = FontFace::sans_serif_from(&mut db).unwrap();
    assert_eq!(face.origin(), "Tuffy");
    assert_eq!(face.index(), 0);
    assert_eq!(face.bytes(), std::fs::read(fixture_path()).unwrap().as_slice());
}

#[test]
fn named_fallback_family_is_preferred_over_arbitrary_faces() {
    let mut db = fontdb::Database::new();
    db.load_font_file(fixture_path()).unwrap();
    let tuffy = db.faces().next().unwrap().id;
    let mut aliased = db.face(tuffy).unwrap().clone();
    aliased.families = vec![("Liberation Sans".to_string(), fontdb::Language::English_UnitedStates)];
    aliased.post_script_name = "LiberationSans".to_string();
    db.push_face_info(aliased);

    let face = FontFace::sans_serif_from(&mut db).unwrap();
    assert_eq!(face.origin(), "LiberationSans");
}

#[test]
fn empty_font_database_is_an_asset_error() {
    let mut db = fontdb::Database::new();
    let err = FontFace::sans_serif_from(&mut db).unwrap_err();
    assert!(matches!(err, QuotegramError::AssetLoad { .. }));
}
