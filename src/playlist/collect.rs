use std::path::{Path, PathBuf};

use anyhow::Context as _;
use walkdir::WalkDir;

use crate::{
    foundation::error::{PlaylistError, PlaylistResult},
    metadata::{
        resolver::{ResolveRequest, TrackResolver},
        tags::{LocalTags, read_local_tags},
    },
    playlist::track::{Track, TrackId},
};

/// Files directly inside `dir`, sorted by file name. That order is the playlist order.
pub fn collect_audio_files(dir: &Path) -> PlaylistResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("list music directory '{}'", dir.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Resolve every file in order; the first failure aborts the whole playlist.
#[tracing::instrument(skip(paths, resolver), fields(tracks = paths.len()))]
pub fn resolve_tracks(
    paths: &[PathBuf],
    resolver: &dyn TrackResolver,
) -> PlaylistResult<Vec<Track>> {
    let mut tracks = Vec::with_capacity(paths.len());
    for (idx, path) in paths.iter().enumerate() {
        tracing::info!("getting metadata for '{}'", path.display());

        if !path.exists() {
            tracing::warn!("song '{}' does not exist", path.display());
        }

        let tags = read_local_tags(path).unwrap_or_else(|err| {
            tracing::warn!("no usable tags in '{}': {err:#}", path.display());
            LocalTags::default()
        });

        let request = ResolveRequest::from_local(path, &tags);
        let resolved = resolver.resolve(&request).map_err(|err| match err {
            PlaylistError::Resolution(msg) => PlaylistError::resolution(format!(
                "tagging '{}' failed: {msg}",
                path.display()
            )),
            other => other,
        })?;

        tracks.push(Track::from_resolved(TrackId(idx), path.clone(), resolved));
    }
    Ok(tracks)
}

#[cfg(test)]
#[path = "../../tests/unit/playlist/collect.rs"]
mod tests;
