use std::{path::PathBuf, time::Duration};

use crate::foundation::error::{PlaylistError, PlaylistResult};

/// Where a run reads audio from, keeps its frames, and writes the video.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelinePaths {
    pub music_dir: PathBuf,
    /// Holds `{index}.png` frames; deleted after a written output.
    pub scratch_dir: PathBuf,
    pub output: PathBuf,
}

impl Default for PipelinePaths {
    fn default() -> Self {
        Self {
            music_dir: PathBuf::from("./music"),
            scratch_dir: PathBuf::from("./tmp"),
            output: PathBuf::from("./playlist.mp4"),
        }
    }
}

/// Encoder settings for the single concatenation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct AssemblyConfig {
    /// Output video frame rate. Still frames need very few.
    pub frame_rate: f64,
    /// Output audio bitrate in bits per second.
    pub audio_bitrate: u32,
    /// Rate at which each still is looped before resampling to `frame_rate`; keeps each
    /// segment's video length within one input frame of its audio.
    pub still_input_rate: u32,
    /// Sample rate every audio input is normalized to before concatenation.
    pub sample_rate: u32,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            frame_rate: 0.5,
            audio_bitrate: 256_000,
            still_input_rate: 25,
            sample_rate: 48_000,
        }
    }
}

impl AssemblyConfig {
    pub fn validate(&self) -> PlaylistResult<()> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(PlaylistError::validation(
                "output frame_rate must be finite and > 0",
            ));
        }
        if self.audio_bitrate == 0 {
            return Err(PlaylistError::validation("audio_bitrate must be non-zero"));
        }
        if self.still_input_rate == 0 {
            return Err(PlaylistError::validation(
                "still_input_rate must be non-zero",
            ));
        }
        if self.sample_rate == 0 {
            return Err(PlaylistError::validation("sample_rate must be non-zero"));
        }
        Ok(())
    }
}

/// Remote tagging service endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverConfig {
    pub base_url: String,
    pub route: String,
    pub timeout: Duration,
}

pub const DEFAULT_TAGGING_URL: &str = "https://tagzen.ogriffiths.com";

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TAGGING_URL.to_string(),
            route: "/music/song".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ResolverConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.route.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/pipeline.rs"]
mod tests;
