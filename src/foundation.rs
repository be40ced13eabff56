/// Error taxonomy.
pub mod error;
/// Post geometry.
pub mod layout;
pub(crate) mod math;
