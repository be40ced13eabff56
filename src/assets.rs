/// Image decoding with asset-aware error reporting.
pub mod decode;
/// Font resolution for post text.
pub mod font;
