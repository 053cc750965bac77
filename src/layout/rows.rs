use kurbo::{Point, Vec2};

use crate::config::canvas::CanvasConfig;

/// Pixel positions of the title, each song label, and the active-row marker.
///
/// All positions are the top-left corner of the text's layout box. Pure and infallible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowLayout {
    /// Top-left of the first song label.
    pub origin: Point,
    pub row_height: f64,
    /// Extra gap between consecutive rows.
    pub row_spacing: f64,
    pub title_offset: Vec2,
    pub marker_offset: Vec2,
}

impl RowLayout {
    pub fn from_config(cfg: &CanvasConfig) -> Self {
        Self {
            origin: Point::new(cfg.song_x, cfg.song_y),
            row_height: cfg.row_height,
            row_spacing: cfg.row_spacing,
            title_offset: Vec2::new(cfg.title_offset.0, cfg.title_offset.1),
            marker_offset: Vec2::new(cfg.marker_offset.0, cfg.marker_offset.1),
        }
    }

    /// `base + row_height * index + row_spacing * index`.
    pub fn position_for(&self, index: usize) -> f64 {
        let i = index as f64;
        self.origin.y + self.row_height * i + self.row_spacing * i
    }

    /// Independent of how many rows follow.
    pub fn title_position(&self) -> Point {
        self.origin + self.title_offset
    }

    pub fn label_position(&self, index: usize) -> Point {
        Point::new(self.origin.x, self.position_for(index))
    }

    pub fn marker_position(&self, index: usize) -> Point {
        self.label_position(index) + self.marker_offset
    }
}

impl Default for RowLayout {
    fn default() -> Self {
        Self::from_config(&CanvasConfig::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/rows.rs"]
mod tests;
