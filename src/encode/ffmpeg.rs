use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::Context as _;

use crate::{
    config::pipeline::AssemblyConfig,
    foundation::error::{PlaylistError, PlaylistResult},
    playlist::track::Track,
};

/// One (frame, audio) pair; the frame is held for the audio's full duration.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub frame_path: PathBuf,
    pub audio_path: PathBuf,
    pub duration_sec: f64,
}

/// Result of an assembly attempt that did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssembleOutcome {
    /// A complete video with this many segments now exists at `path`.
    Written { path: PathBuf, segments: usize },
    /// There was nothing to encode; no file was written and any old output is untouched.
    Empty,
}

/// Pair every track with its rendered frame and probed audio duration, in playlist order.
///
/// Every input must exist before `ffmpeg` is started.
pub fn plan_segments(
    tracks: &[Track],
    probe: impl Fn(&Path) -> PlaylistResult<f64>,
) -> PlaylistResult<Vec<Segment>> {
    let mut segments = Vec::with_capacity(tracks.len());
    for (idx, track) in tracks.iter().enumerate() {
        let frame_path = track.frame_image_path.clone().ok_or_else(|| {
            PlaylistError::assembly(format!(
                "track {idx} ('{}') has no rendered frame",
                track.source_path.display()
            ))
        })?;
        if !frame_path.is_file() {
            return Err(PlaylistError::assembly(format!(
                "frame '{}' for track {idx} does not exist",
                frame_path.display()
            )));
        }
        if !track.source_path.is_file() {
            return Err(PlaylistError::assembly(format!(
                "audio '{}' for track {idx} does not exist",
                track.source_path.display()
            )));
        }

        let duration_sec = probe(&track.source_path)?;
        if !duration_sec.is_finite() || duration_sec <= 0.0 {
            return Err(PlaylistError::assembly(format!(
                "audio '{}' has no playable duration",
                track.source_path.display()
            )));
        }

        segments.push(Segment {
            frame_path,
            audio_path: track.source_path.clone(),
            duration_sec,
        });
    }
    Ok(segments)
}

/// `concat` filter graph joining `n` segments. Input `2i` is still `i`, input `2i + 1` its audio.
pub fn filter_graph(n: usize, cfg: &AssemblyConfig) -> String {
    let mut graph = String::new();
    let mut concat_inputs = String::new();
    for i in 0..n {
        let video_in = 2 * i;
        let audio_in = 2 * i + 1;
        graph.push_str(&format!(
            "[{video_in}:v]setsar=1,format=yuv420p[v{i}];\
             [{audio_in}:a]aresample={},aformat=sample_fmts=fltp:channel_layouts=stereo[a{i}];",
            cfg.sample_rate
        ));
        concat_inputs.push_str(&format!("[v{i}][a{i}]"));
    }
    graph.push_str(&format!("{concat_inputs}concat=n={n}:v=1:a=1[v][a]"));
    graph
}

/// Full `ffmpeg` argument list for one encode pass over every segment.
pub fn build_ffmpeg_args(segments: &[Segment], cfg: &AssemblyConfig, out: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-y", "-nostdin", "-loglevel", "error"]
        .into_iter()
        .map(OsString::from)
        .collect();

    for seg in segments {
        args.extend(
            [
                "-loop".to_string(),
                "1".to_string(),
                "-framerate".to_string(),
                cfg.still_input_rate.to_string(),
                "-t".to_string(),
                format!("{:.6}", seg.duration_sec),
                "-i".to_string(),
            ]
            .map(OsString::from),
        );
        args.push(seg.frame_path.clone().into_os_string());
        args.push(OsString::from("-i"));
        args.push(seg.audio_path.clone().into_os_string());
    }

    args.extend(
        [
            "-filter_complex".to_string(),
            filter_graph(segments.len(), cfg),
            "-map".to_string(),
            "[v]".to_string(),
            "-map".to_string(),
            "[a]".to_string(),
            "-c:v".to_string(),
            "libx264".to_string(),
            "-tune".to_string(),
            "stillimage".to_string(),
            "-pix_fmt".to_string(),
            "yuv420p".to_string(),
            "-r".to_string(),
            cfg.frame_rate.to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
            "-b:a".to_string(),
            cfg.audio_bitrate.to_string(),
            "-movflags".to_string(),
            "+faststart".to_string(),
            "-f".to_string(),
            "mp4".to_string(),
        ]
        .map(OsString::from),
    );
    args.push(out.as_os_str().to_os_string());
    args
}

/// Sibling file `ffmpeg` writes into; only renamed onto `out` once the encode succeeds.
pub fn partial_path(out: &Path) -> PathBuf {
    let name = out
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "playlist.mp4".to_string());
    out.with_file_name(format!(".{name}.partial"))
}

/// Encode every segment, in order, into a single video at `out`.
///
/// A pre-existing `out` is deleted first. On any failure the partial file is removed, so a
/// file at `out` always means a complete encode.
#[tracing::instrument(skip(segments, cfg), fields(segments = segments.len()))]
pub fn assemble(
    segments: &[Segment],
    cfg: &AssemblyConfig,
    out: &Path,
) -> PlaylistResult<AssembleOutcome> {
    cfg.validate()?;
    if segments.is_empty() {
        tracing::warn!("no segments to assemble; '{}' not written", out.display());
        return Ok(AssembleOutcome::Empty);
    }

    for seg in segments {
        for input in [&seg.frame_path, &seg.audio_path] {
            if !input.is_file() {
                return Err(PlaylistError::assembly(format!(
                    "segment input '{}' does not exist",
                    input.display()
                )));
            }
        }
    }

    if !is_ffmpeg_on_path() {
        return Err(PlaylistError::assembly(
            "ffmpeg is required for MP4 encoding, but was not found on PATH",
        ));
    }

    if out.exists() {
        tracing::info!("deleting '{}' old playlist", out.display());
        std::fs::remove_file(out)
            .with_context(|| format!("remove old output '{}'", out.display()))?;
    }
    ensure_parent_dir(out)?;

    let partial = partial_path(out);
    let args = build_ffmpeg_args(segments, cfg, &partial);
    tracing::debug!(?args, "spawning ffmpeg");

    let result = Command::new("ffmpeg")
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output();

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            discard_partial(&partial);
            return Err(PlaylistError::assembly(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            )));
        }
    };

    if !output.status.success() {
        discard_partial(&partial);
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PlaylistError::assembly(format!(
            "ffmpeg exited with status {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    if let Err(e) = std::fs::rename(&partial, out) {
        discard_partial(&partial);
        return Err(PlaylistError::assembly(format!(
            "move '{}' to '{}': {e}",
            partial.display(),
            out.display()
        )));
    }

    Ok(AssembleOutcome::Written {
        path: out.to_path_buf(),
        segments: segments.len(),
    })
}

fn discard_partial(partial: &Path) {
    if partial.exists()
        && let Err(e) = std::fs::remove_file(partial)
    {
        tracing::warn!("could not remove partial output '{}': {e}", partial.display());
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> PlaylistResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
