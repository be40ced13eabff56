/// Pixel compositing rules.
pub mod composite;
