//! Run-wide settings with documented defaults.

/// Canvas, colors, offsets and fonts shared by layout and rendering.
pub mod canvas;
/// Paths, encoder and tagging-service settings.
pub mod pipeline;
