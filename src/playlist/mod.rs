//! Playlist entries and how they are gathered from disk.

/// Directory scan and ordered resolution.
pub mod collect;
/// Track model.
pub mod track;
