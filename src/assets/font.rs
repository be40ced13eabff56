use std::path::{Path, PathBuf};
use std::sync::Arc;

use usvg::fontdb;

use crate::foundation::error::{QuotegramError, QuotegramResult};

/// File name probed inside the assets directory when no font is configured.
pub const DEFAULT_FONT_FILE: &str = "font.ttf";

const SANS_SERIF_FALLBACKS: &[&str] = &["DejaVu Sans", "Liberation Sans", "Noto Sans"];

/// Raw font bytes plus the face index inside the file (non-zero only for collections).
#[derive(Clone)]
pub struct FontFace {
    bytes: Arc<Vec<u8>>,
    index: u32,
    origin: String,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("origin", &self.origin)
            .field("index", &self.index)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FontFace {
    /// Wrap already-loaded font bytes.
    pub fn from_bytes(bytes: Vec<u8>, index: u32, origin: impl Into<String>) -> Self {
        Self {
            bytes: Arc::new(bytes),
            index,
            origin: origin.into(),
        }
    }

    /// Read a font file from disk.
    pub fn from_path(path: &Path) -> QuotegramResult<Self> {
        let bytes =
            std::fs::read(path).map_err(|e| QuotegramError::asset_load(path, e.to_string()))?;
        if bytes.is_empty() {
            return Err(QuotegramError::asset_load(path, "font file is empty"));
        }
        Ok(Self::from_bytes(bytes, 0, path.display().to_string()))
    }

    /// First sans-serif face known to the system font database.
    pub fn system_sans_serif() -> QuotegramResult<Self> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        Self::sans_serif_from(&mut db)
    }

    /// Pick a sans-serif face from `db`.
    ///
    /// The generic family maps to Arial. Common open families are tried after it, then any
    /// regular face.
    pub(crate) fn sans_serif_from(db: &mut fontdb::Database) -> QuotegramResult<Self> {
        let id = query_sans_serif(db).ok_or_else(|| {
            QuotegramError::asset_load("<system fonts>", "no sans-serif system font found")
        })?;
        let origin = db
            .face(id)
            .map(|f| f.post_script_name.clone())
            .unwrap_or_else(|| "system sans-serif".to_string());
        db.with_face_data(id, |data, index| {
            Self::from_bytes(data.to_vec(), index, origin.clone())
        })
        .ok_or_else(|| {
            QuotegramError::asset_load("<system fonts>", "sans-serif face data unavailable")
        })
    }

    /// Resolve the single font used for post text.
    ///
    /// Order: `explicit` (must exist), then `<assets_dir>/font.ttf` when present, then the system
    /// sans-serif face.
    pub fn resolve(explicit: Option<&Path>, assets_dir: &Path) -> QuotegramResult<Self> {
        if let Some(p) = explicit {
            return Self::from_path(p);
        }
        let bundled: PathBuf = assets_dir.join(DEFAULT_FONT_FILE);
        if bundled.is_file() {
            return Self::from_path(&bundled);
        }
        let face = Self::system_sans_serif()?;
        tracing::debug!(origin = %face.origin, "using system font");
        Ok(face)
    }

    /// Font bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Face index inside the font file.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Human-readable source of the font (path or PostScript name).
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

fn query_sans_serif(db: &mut fontdb::Database) -> Option<fontdb::ID> {
    fn regular_sans(db: &fontdb::Database) -> Option<fontdb::ID> {
        db.query(&fontdb::Query {
            families: &[fontdb::Family::SansSerif],
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        })
    }

    if let Some(id) = regular_sans(db) {
        return Some(id);
    }
    for family in SANS_SERIF_FALLBACKS {
        db.set_sans_serif_family(*family);
        if let Some(id) = regular_sans(db) {
            return Some(id);
        }
    }
    db.faces()
        .find(|f| f.style == fontdb::Style::Normal && f.weight == fontdb::Weight::NORMAL)
        .or_else(|| db.faces().next())
        .map(|f| f.id)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
