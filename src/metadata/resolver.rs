use std::path::{Component, Path, PathBuf};

use reqwest::{StatusCode, blocking::Client};
use serde::{Deserialize, Serialize};

use crate::{
    config::pipeline::ResolverConfig,
    foundation::error::{PlaylistError, PlaylistResult},
    metadata::tags::LocalTags,
};

/// Query sent to the tagging service for one file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolveRequest {
    /// `"{title}.{ext}"` when the file has both, otherwise the raw path.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
}

impl ResolveRequest {
    pub fn from_local(path: &Path, tags: &LocalTags) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty());
        let name = match (tags.title.as_deref(), ext) {
            (Some(title), Some(ext)) => format!("{title}.{ext}"),
            _ => without_leading_cur_dir(path).to_string_lossy().into_owned(),
        };

        Self {
            name,
            artist: tags.artist.clone(),
            album: tags.album.clone(),
        }
    }
}

/// `./music/a.mp3` -> `music/a.mp3`; other paths are unchanged.
fn without_leading_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .skip_while(|c| matches!(c, Component::CurDir))
        .collect()
}

/// Canonical metadata returned by the tagging service.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ResolvedTags {
    pub name: String,
    /// Label drawn on the frame.
    pub render: String,
    pub ext: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
}

#[derive(Deserialize)]
struct ResolveEnvelope {
    body: ResolvedTags,
}

/// Turns local tags into display metadata.
pub trait TrackResolver {
    fn resolve(&self, request: &ResolveRequest) -> PlaylistResult<ResolvedTags>;
}

/// Resolver backed by the tagzen HTTP API (`POST {base}/music/song?name=..&artist=..&album=..`).
pub struct TagzenResolver {
    client: Client,
    endpoint: String,
}

impl TagzenResolver {
    pub fn new(cfg: &ResolverConfig) -> PlaylistResult<Self> {
        let client = Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| PlaylistError::resolution(format!("build http client: {e}")))?;
        Ok(Self {
            client,
            endpoint: cfg.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TrackResolver for TagzenResolver {
    fn resolve(&self, request: &ResolveRequest) -> PlaylistResult<ResolvedTags> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(request)
            .send()
            .map_err(|e| {
                PlaylistError::resolution(format!("request to {} failed: {e}", self.endpoint))
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PlaylistError::resolution(format!(
                "tagging service answered http {status} for '{}'",
                request.name
            )));
        }

        let envelope: ResolveEnvelope = response.json().map_err(|e| {
            PlaylistError::resolution(format!(
                "tagging service returned an unexpected body for '{}': {e}",
                request.name
            ))
        })?;
        Ok(envelope.body)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/metadata/resolver.rs"]
mod tests;
