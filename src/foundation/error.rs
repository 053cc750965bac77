/// Convenience result type used across the playlist pipeline.
pub type PlaylistResult<T> = Result<T, PlaylistError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// Every variant is fatal for the run that produced it. Missing audio files are
/// not represented here: they are reported as `tracing` warnings and the run continues.
#[derive(thiserror::Error, Debug)]
pub enum PlaylistError {
    /// Invalid user-provided input or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The remote tagging service rejected or failed a track.
    #[error("resolution error: {0}")]
    Resolution(String),

    /// Font loading, canvas composition, or frame persistence failed.
    #[error("render error: {0}")]
    Render(String),

    /// Missing segment inputs or an `ffmpeg`/`ffprobe` failure while building the output.
    #[error("assembly error: {0}")]
    Assembly(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlaylistError {
    /// Build a [`PlaylistError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PlaylistError::Resolution`] value.
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    /// Build a [`PlaylistError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PlaylistError::Assembly`] value.
    pub fn assembly(msg: impl Into<String>) -> Self {
        Self::Assembly(msg.into())
    }

    /// Build a [`PlaylistError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
