use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::{
    core::{Canvas, Rgb8},
    error::{PlaylistError, PlaylistResult},
};

/// One font face at a fixed pixel size.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontSpec {
    /// TrueType/OpenType file containing exactly the face to draw with.
    pub path: PathBuf,
    /// Em size in pixels.
    pub size_px: f32,
}

impl FontSpec {
    pub fn new(path: impl Into<PathBuf>, size_px: f32) -> Self {
        Self {
            path: path.into(),
            size_px,
        }
    }
}

/// Title, body and marker faces.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontsConfig {
    pub title: FontSpec,
    pub body: FontSpec,
    pub marker: FontSpec,
}

pub const HACK_BOLD: &str = "/usr/share/fonts/truetype/hack/Hack-Bold.ttf";
pub const HACK_REGULAR: &str = "/usr/share/fonts/truetype/hack/Hack-Regular.ttf";

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            title: FontSpec::new(HACK_BOLD, 75.0),
            body: FontSpec::new(HACK_REGULAR, 40.0),
            marker: FontSpec::new(HACK_BOLD, 55.0),
        }
    }
}

/// What every frame is painted on before any text.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// Flat fill.
    Color(Rgb8),
    /// Image file that must already match [`CanvasConfig::canvas`]; it is never resized.
    Image(PathBuf),
}

impl Default for Background {
    fn default() -> Self {
        Self::Color(Rgb8::NAVY)
    }
}

/// Every fixed value the layout engine and frame renderer read.
///
/// Immutable for the duration of a run. The defaults reproduce the original 1440p look:
/// a navy canvas, white Hack text, song rows starting at (300, 300) spaced 50px apart,
/// the title 100px above the first row and the `→` marker 65px left of the active label.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub canvas: Canvas,
    pub background: Background,
    pub text_color: Rgb8,
    /// Left edge of every song label.
    pub song_x: f64,
    /// Top of the first song label.
    pub song_y: f64,
    pub row_height: f64,
    /// Extra gap added between rows on top of `row_height`.
    pub row_spacing: f64,
    /// Offset of the title from `(song_x, song_y)`.
    pub title_offset: (f64, f64),
    pub marker_glyph: String,
    /// Offset of the marker from the active label's position.
    pub marker_offset: (f64, f64),
    pub fonts: FontsConfig,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::QHD,
            background: Background::default(),
            text_color: Rgb8::WHITE,
            song_x: 300.0,
            song_y: 300.0,
            row_height: 50.0,
            row_spacing: 0.0,
            title_offset: (-5.0, -100.0),
            marker_glyph: "→".to_string(),
            marker_offset: (-65.0, -11.5),
            fonts: FontsConfig::default(),
        }
    }
}

impl CanvasConfig {
    /// Load a JSON config; absent fields fall back to their defaults.
    pub fn from_path(path: &Path) -> PlaylistResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read canvas config '{}'", path.display()))?;
        let cfg: CanvasConfig = serde_json::from_str(&text).map_err(|e| {
            PlaylistError::serde(format!("parse canvas config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> PlaylistResult<()> {
        self.canvas.validate()?;
        if self.row_height < 0.0 || self.row_spacing < 0.0 {
            return Err(PlaylistError::validation(
                "row_height and row_spacing must be >= 0",
            ));
        }
        if self.row_height + self.row_spacing <= 0.0 {
            return Err(PlaylistError::validation(
                "row_height + row_spacing must be > 0 so rows do not overlap",
            ));
        }
        if self.marker_glyph.is_empty() {
            return Err(PlaylistError::validation("marker_glyph must be non-empty"));
        }
        for (label, font) in [
            ("title", &self.fonts.title),
            ("body", &self.fonts.body),
            ("marker", &self.fonts.marker),
        ] {
            if !font.size_px.is_finite() || font.size_px <= 0.0 {
                return Err(PlaylistError::validation(format!(
                    "{label} font size must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/canvas.rs"]
mod tests;
