use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;

use crate::{
    config::canvas::{Background, CanvasConfig},
    foundation::{
        core::Rgb8,
        error::{PlaylistError, PlaylistResult},
    },
    layout::rows::RowLayout,
    playlist::track::{Track, TrackId},
    render::text::{FontSet, LoadedFont, TextBrushRgba8, TextLayoutEngine},
};

/// One composited frame as opaque, row-major RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRgba {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    pub fn save_png(&self, path: &Path) -> PlaylistResult<()> {
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))
        .map_err(|e| PlaylistError::render(format!("{e:#}")))
    }
}

enum BackgroundPaint {
    Color(Rgb8),
    Image(vello_cpu::Image),
}

/// The text of a track listing, shaped once and reused for every frame.
pub struct Listing {
    title: parley::Layout<TextBrushRgba8>,
    rows: Vec<(TrackId, parley::Layout<TextBrushRgba8>)>,
    marker: parley::Layout<TextBrushRgba8>,
}

impl Listing {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Draws "now playing" frames: the full listing with a marker beside the active row.
pub struct FrameRenderer {
    cfg: CanvasConfig,
    layout: RowLayout,
    title: String,
    engine: TextLayoutEngine,
    fonts: FontSet,
    background: BackgroundPaint,
    width: u16,
    height: u16,
}

impl FrameRenderer {
    /// Validate the canvas, load every font and decode the background image up front.
    pub fn new(cfg: CanvasConfig, title: impl Into<String>) -> PlaylistResult<Self> {
        cfg.validate()?;
        let width: u16 = cfg
            .canvas
            .width
            .try_into()
            .map_err(|_| PlaylistError::render("canvas width exceeds u16"))?;
        let height: u16 = cfg
            .canvas
            .height
            .try_into()
            .map_err(|_| PlaylistError::render("canvas height exceeds u16"))?;

        let background = match &cfg.background {
            Background::Color(c) => BackgroundPaint::Color(*c),
            Background::Image(path) => BackgroundPaint::Image(load_background_image(
                path,
                cfg.canvas.width,
                cfg.canvas.height,
            )?),
        };

        let mut engine = TextLayoutEngine::new();
        let fonts = FontSet::load(&mut engine, &cfg.fonts)?;

        Ok(Self {
            layout: RowLayout::from_config(&cfg),
            cfg,
            title: title.into(),
            engine,
            fonts,
            background,
            width,
            height,
        })
    }

    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.cfg
    }

    /// Shape the title, every track label and the marker glyph.
    pub fn listing(&mut self, tracks: &[Track]) -> Listing {
        let brush = TextBrushRgba8::from(self.cfg.text_color);
        let title = self.engine.layout_line(&self.title, &self.fonts.title, brush);
        let rows = tracks
            .iter()
            .map(|t| {
                (
                    t.id,
                    self.engine
                        .layout_line(&t.display_name, &self.fonts.body, brush),
                )
            })
            .collect();
        let marker = self
            .engine
            .layout_line(&self.cfg.marker_glyph, &self.fonts.marker, brush);
        Listing {
            title,
            rows,
            marker,
        }
    }

    /// Render one frame in memory with `active` marked.
    pub fn compose(&mut self, tracks: &[Track], active: TrackId) -> PlaylistResult<FrameRgba> {
        let listing = self.listing(tracks);
        self.paint(&listing, active)
    }

    /// Paint a shaped listing. Exactly one row, the one whose id is `active`, gets the marker.
    pub fn paint(&self, listing: &Listing, active: TrackId) -> PlaylistResult<FrameRgba> {
        if !listing.rows.iter().any(|(id, _)| *id == active) {
            return Err(PlaylistError::validation(format!(
                "active track {} is not part of the listing",
                active.index()
            )));
        }

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        let w = f64::from(self.width);
        let h = f64::from(self.height);

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match &self.background {
            BackgroundPaint::Color(c) => {
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255));
            }
            BackgroundPaint::Image(img) => ctx.set_paint(img.clone()),
        }
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));

        draw_text(
            &mut ctx,
            &listing.title,
            &self.fonts.title,
            self.layout.title_position(),
        );

        for (row, (id, label)) in listing.rows.iter().enumerate() {
            draw_text(
                &mut ctx,
                label,
                &self.fonts.body,
                self.layout.label_position(row),
            );
            if *id == active {
                draw_text(
                    &mut ctx,
                    &listing.marker,
                    &self.fonts.marker,
                    self.layout.marker_position(row),
                );
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut pixmap);

        let src = pixmap.data_as_u8_slice();
        let mut data = vec![0u8; src.len()];
        flatten_premul_to_opaque_rgba8(&mut data, src, [0, 0, 0, 255])?;

        Ok(FrameRgba {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
        })
    }

    /// Write `{i}.png` into `scratch_dir` for every track, in playlist order, and record each
    /// path on its track. Any failure aborts the whole run.
    #[tracing::instrument(skip(self, tracks), fields(tracks = tracks.len()))]
    pub fn render_playlist(
        &mut self,
        tracks: &mut [Track],
        scratch_dir: &Path,
    ) -> PlaylistResult<Vec<PathBuf>> {
        let listing = self.listing(tracks);
        let mut written = Vec::with_capacity(tracks.len());

        for (idx, track) in tracks.iter_mut().enumerate() {
            tracing::info!("rendering image for active '{}'", track.source_path.display());
            let frame = self.paint(&listing, track.id)?;

            let path = frame_path(scratch_dir, idx);
            tracing::info!(
                "saving '{}' image to '{}'",
                track.source_path.display(),
                path.display()
            );
            frame.save_png(&path)?;

            track.frame_image_path = Some(path.clone());
            written.push(path);
        }

        Ok(written)
    }
}

/// `{scratch_dir}/{index}.png`.
pub fn frame_path(scratch_dir: &Path, index: usize) -> PathBuf {
    scratch_dir.join(format!("{index}.png"))
}

fn draw_text(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<TextBrushRgba8>,
    font: &LoadedFont,
    at: kurbo::Point,
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((at.x, at.y)));

    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));

            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font.data)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
}

fn load_background_image(path: &Path, width: u32, height: u32) -> PlaylistResult<vello_cpu::Image> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read background image '{}'", path.display()))
        .map_err(|e| PlaylistError::render(format!("{e:#}")))?;
    let rgba = image::load_from_memory(&bytes)
        .map_err(|e| {
            PlaylistError::render(format!(
                "decode background image '{}': {e}",
                path.display()
            ))
        })?
        .to_rgba8();

    if rgba.dimensions() != (width, height) {
        let (w, h) = rgba.dimensions();
        return Err(PlaylistError::render(format!(
            "background image '{}' is {w}x{h}, expected {width}x{height}",
            path.display()
        )));
    }

    let mut premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut premul);
    let pixmap = premul_bytes_to_pixmap(&premul, width, height)?;

    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = mul_div255(u16::from(px[0]), a) as u8;
        px[1] = mul_div255(u16::from(px[1]), a) as u8;
        px[2] = mul_div255(u16::from(px[2]), a) as u8;
    }
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> PlaylistResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PlaylistError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PlaylistError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(PlaylistError::render("background image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

/// Composite premultiplied pixels over an opaque backdrop so every output pixel has alpha 255.
fn flatten_premul_to_opaque_rgba8(
    dst: &mut [u8],
    src_premul: &[u8],
    bg_rgba: [u8; 4],
) -> PlaylistResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(PlaylistError::render(
            "flatten_premul_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg_r = u16::from(bg_rgba[0]);
    let bg_g = u16::from(bg_rgba[1]);
    let bg_b = u16::from(bg_rgba[2]);

    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        d[0] = (u16::from(s[0]) + mul_div255(bg_r, inv)).min(255) as u8;
        d[1] = (u16::from(s[1]) + mul_div255(bg_g, inv)).min(255) as u8;
        d[2] = (u16::from(s[2]) + mul_div255(bg_b, inv)).min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
