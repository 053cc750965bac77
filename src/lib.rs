//! Turn a directory of songs into a single "now playing" playlist video.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: local tags + the remote tagging service -> ordered [`Track`]s
//! 2. **Layout**: [`RowLayout`] maps a row index to pixel positions
//! 3. **Render**: [`FrameRenderer`] draws one frame per track, listing every track and marking
//!    the active one
//! 4. **Assemble**: each frame is held for its song's duration and every segment is
//!    concatenated in one `ffmpeg` encode
//!
//! Phases run strictly in sequence; the first error aborts the run.
#![forbid(unsafe_code)]

mod config;
mod encode;
mod foundation;
mod layout;
mod metadata;
mod pipeline;
mod playlist;
mod prompt;
mod render;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;

pub use config::canvas::{Background, CanvasConfig, FontSpec, FontsConfig, HACK_BOLD, HACK_REGULAR};
pub use config::pipeline::{AssemblyConfig, DEFAULT_TAGGING_URL, PipelinePaths, ResolverConfig};
pub use encode::ffmpeg::{
    AssembleOutcome, Segment, assemble, build_ffmpeg_args, ensure_parent_dir, filter_graph,
    is_ffmpeg_on_path, partial_path, plan_segments,
};
pub use encode::probe::{is_ffprobe_on_path, probe_duration_sec};
pub use foundation::core::{Canvas, Rgb8};
pub use foundation::error::{PlaylistError, PlaylistResult};
pub use layout::rows::RowLayout;
pub use metadata::resolver::{ResolveRequest, ResolvedTags, TagzenResolver, TrackResolver};
pub use metadata::tags::{LocalTags, read_local_tags};
pub use pipeline::driver::{PipelineOptions, PipelineOutcome, run_pipeline, run_pipeline_with_probe};
pub use playlist::collect::{collect_audio_files, resolve_tracks};
pub use playlist::track::{Track, TrackId};
pub use prompt::{RunInputs, prompt_line, prompt_run_inputs};
pub use render::frame::{FrameRenderer, FrameRgba, Listing, frame_path};
pub use render::text::{FontSet, LoadedFont, TextBrushRgba8, TextLayoutEngine};
