//! Final media assembly through the system `ffmpeg`/`ffprobe` binaries.

/// Segment planning and the single concatenation encode.
pub mod ffmpeg;
/// Audio duration probing.
pub mod probe;
