//! CPU frame composition.

/// Frame painting and PNG persistence.
pub mod frame;
/// Font loading and text shaping.
pub mod text;
