use std::path::Path;

use anyhow::Context as _;

use crate::{
    config::canvas::{FontSpec, FontsConfig},
    foundation::{
        core::Rgb8,
        error::{PlaylistError, PlaylistResult},
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgb8> for TextBrushRgba8 {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// A registered face at a fixed size, ready for both shaping and rasterising.
#[derive(Clone)]
pub struct LoadedFont {
    pub family: String,
    pub weight: parley::fontique::FontWeight,
    pub style: parley::fontique::FontStyle,
    pub size_px: f32,
    /// Same bytes Parley shaped with, so glyph ids line up.
    pub data: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("family", &self.family)
            .field("weight", &self.weight)
            .field("size_px", &self.size_px)
            .finish()
    }
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Register a font file's bytes and remember which face they contain.
    pub fn register(&mut self, font_bytes: Vec<u8>, size_px: f32) -> PlaylistResult<LoadedFont> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PlaylistError::render("font size_px must be finite and > 0"));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let (family_id, faces) = families
            .first()
            .ok_or_else(|| PlaylistError::render("no font families registered from font bytes"))?;
        let face = faces
            .first()
            .ok_or_else(|| PlaylistError::render("registered font family has no faces"))?;

        let family = self
            .font_ctx
            .collection
            .family_name(*family_id)
            .ok_or_else(|| PlaylistError::render("registered font family has no name"))?
            .to_string();

        Ok(LoadedFont {
            family,
            weight: face.weight(),
            style: face.style(),
            size_px,
            data: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0),
        })
    }

    /// Shape a single unwrapped line of text with `font`.
    pub fn layout_line(
        &mut self,
        text: &str,
        font: &LoadedFont,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(font.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(font.weight));
        builder.push_default(parley::style::StyleProperty::FontStyle(font.style));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

/// The three faces a frame is drawn with.
#[derive(Clone, Debug)]
pub struct FontSet {
    pub title: LoadedFont,
    pub body: LoadedFont,
    pub marker: LoadedFont,
}

impl FontSet {
    /// Read and register every configured font; any unreadable file is fatal.
    pub fn load(engine: &mut TextLayoutEngine, fonts: &FontsConfig) -> PlaylistResult<Self> {
        Ok(Self {
            title: load_font(engine, &fonts.title)?,
            body: load_font(engine, &fonts.body)?,
            marker: load_font(engine, &fonts.marker)?,
        })
    }
}

fn load_font(engine: &mut TextLayoutEngine, spec: &FontSpec) -> PlaylistResult<LoadedFont> {
    let bytes = read_font_file(&spec.path)?;
    engine.register(bytes, spec.size_px).map_err(|e| {
        PlaylistError::render(format!("font '{}' is unusable: {e}", spec.path.display()))
    })
}

fn read_font_file(path: &Path) -> PlaylistResult<Vec<u8>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("load font '{}'", path.display()))
        .map_err(|e| PlaylistError::render(format!("{e:#}")))?;
    Ok(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
