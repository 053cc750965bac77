use std::path::Path;

use crate::foundation::error::{PlaylistError, PlaylistResult};

/// Return `true` when `ffprobe` can be invoked from `PATH`.
pub fn is_ffprobe_on_path() -> bool {
    std::process::Command::new("ffprobe")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Container duration of a media file in seconds, as reported by `ffprobe`.
pub fn probe_duration_sec(source_path: &Path) -> PlaylistResult<f64> {
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        format: Option<ProbeFormat>,
    }

    let out = std::process::Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_format"])
        .arg(source_path)
        .output()
        .map_err(|e| PlaylistError::assembly(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(PlaylistError::assembly(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| PlaylistError::assembly(format!("ffprobe json parse failed: {e}")))?;
    parse_duration(parsed.format.and_then(|f| f.duration).as_deref()).ok_or_else(|| {
        PlaylistError::assembly(format!(
            "ffprobe reported no usable duration for '{}'",
            source_path.display()
        ))
    })
}

fn parse_duration(raw: Option<&str>) -> Option<f64> {
    raw?.trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d > 0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/probe.rs"]
mod tests;
