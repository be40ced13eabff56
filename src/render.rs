/// Background compositor: photo, darkening, desaturation, logo.
pub mod background;
/// Post image assembler and JPEG output.
pub mod post;
/// Parley text shaping and line layout.
pub mod text_layout;
/// Text panel renderer.
pub mod text_panel;
