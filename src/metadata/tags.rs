use std::path::Path;

use anyhow::Context as _;
use lofty::prelude::{ItemKey, TaggedFileExt};

use crate::foundation::error::PlaylistResult;

/// Tags read straight from an audio file, before any remote normalization.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LocalTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

/// Read title/artist/album from the primary tag, falling back to the first tag present.
pub fn read_local_tags(path: &Path) -> PlaylistResult<LocalTags> {
    let tagged_file = lofty::read_from_path(path)
        .with_context(|| format!("read audio tags from '{}'", path.display()))?;

    let mut tags = LocalTags::default();

    if let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) {
        tags.title = non_blank(tag.get_string(&ItemKey::TrackTitle));
        tags.album = non_blank(tag.get_string(&ItemKey::AlbumTitle));
        tags.artist = non_blank(tag.get_string(&ItemKey::TrackArtist))
            .or_else(|| non_blank(tag.get_string(&ItemKey::AlbumArtist)));
    }

    Ok(tags)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "../../tests/unit/metadata/tags.rs"]
mod tests;
