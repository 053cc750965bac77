use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    config::{
        canvas::CanvasConfig,
        pipeline::{AssemblyConfig, PipelinePaths},
    },
    encode::{
        ffmpeg::{AssembleOutcome, assemble, plan_segments},
        probe::probe_duration_sec,
    },
    foundation::error::PlaylistResult,
    metadata::resolver::TrackResolver,
    playlist::collect::{collect_audio_files, resolve_tracks},
    render::frame::FrameRenderer,
};

/// Everything one run needs besides the resolver.
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    pub title: String,
    pub canvas: CanvasConfig,
    pub paths: PipelinePaths,
    pub assembly: AssemblyConfig,
}

impl PipelineOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            canvas: CanvasConfig::default(),
            paths: PipelinePaths::default(),
            assembly: AssemblyConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The playlist video was written with one segment per track.
    Written { path: PathBuf, segments: usize },
    /// The music directory held no files; nothing was rendered or written.
    Empty,
}

/// Resolve, render and assemble the playlist found in `opts.paths.music_dir`.
///
/// Phases run strictly in sequence and the first error aborts the run. The scratch directory
/// is removed only after a video has been written.
pub fn run_pipeline(
    opts: &PipelineOptions,
    resolver: &dyn TrackResolver,
) -> PlaylistResult<PipelineOutcome> {
    run_pipeline_with_probe(opts, resolver, probe_duration_sec)
}

/// [`run_pipeline`] with a custom audio duration probe.
#[tracing::instrument(skip_all, fields(title = %opts.title))]
pub fn run_pipeline_with_probe(
    opts: &PipelineOptions,
    resolver: &dyn TrackResolver,
    probe: impl Fn(&Path) -> PlaylistResult<f64>,
) -> PlaylistResult<PipelineOutcome> {
    let mut renderer = FrameRenderer::new(opts.canvas.clone(), opts.title.clone())?;

    tracing::info!("collecting songs");
    ensure_dir(&opts.paths.music_dir, "music input")?;
    ensure_dir(&opts.paths.scratch_dir, "temp images")?;

    let files = collect_audio_files(&opts.paths.music_dir)?;
    let mut tracks = resolve_tracks(&files, resolver)?;

    tracing::info!("rendering songs");
    renderer.render_playlist(&mut tracks, &opts.paths.scratch_dir)?;

    tracing::info!("rendering final video");
    let segments = plan_segments(&tracks, probe)?;
    match assemble(&segments, &opts.assembly, &opts.paths.output)? {
        AssembleOutcome::Written { path, segments } => {
            remove_scratch_dir(&opts.paths.scratch_dir)?;
            Ok(PipelineOutcome::Written { path, segments })
        }
        AssembleOutcome::Empty => Ok(PipelineOutcome::Empty),
    }
}

fn ensure_dir(dir: &Path, purpose: &str) -> PlaylistResult<()> {
    if !dir.exists() {
        tracing::info!(
            "directory for {purpose} '{}' does not exist, creating",
            dir.display()
        );
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create {purpose} directory '{}'", dir.display()))?;
    }
    Ok(())
}

fn remove_scratch_dir(dir: &Path) -> PlaylistResult<()> {
    if dir.exists() {
        tracing::info!("deleting '{}' temp directory", dir.display());
        std::fs::remove_dir_all(dir)
            .with_context(|| format!("remove temp directory '{}'", dir.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/driver.rs"]
mod tests;
