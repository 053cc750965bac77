use std::path::PathBuf;

use crate::metadata::resolver::ResolvedTags;

/// Stable per-run identity of a track: its zero-based playlist index.
///
/// The active row of a frame is chosen by comparing ids, so two songs that resolve to
/// the same label still get separate frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackId(pub usize);

impl TrackId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One playlist entry backed by one audio file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub id: TrackId,
    pub source_path: PathBuf,
    /// Canonical name from the tagging service.
    pub name: String,
    /// Label drawn in the track listing.
    pub display_name: String,
    pub extension: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Set once this track's frame has been written.
    pub frame_image_path: Option<PathBuf>,
}

impl Track {
    pub fn from_resolved(id: TrackId, source_path: impl Into<PathBuf>, tags: ResolvedTags) -> Self {
        Self {
            id,
            source_path: source_path.into(),
            name: tags.name,
            display_name: tags.render,
            extension: tags.ext,
            artist: tags.artist,
            album: tags.album,
            frame_image_path: None,
        }
    }

    /// Track with a fixed label and no remote lookup.
    pub fn with_label(id: TrackId, source_path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        let source_path = source_path.into();
        let label = label.into();
        let extension = source_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_string();
        Self {
            id,
            source_path,
            name: label.clone(),
            display_name: label,
            extension,
            artist: None,
            album: None,
            frame_image_path: None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playlist/track.rs"]
mod tests;
