use crate::foundation::error::{PlaylistError, PlaylistResult};

/// Pixel dimensions of every rendered frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// 1440p, the size every frame and background image is expected to have.
    pub const QHD: Canvas = Canvas {
        width: 2560,
        height: 1440,
    };

    pub fn validate(&self) -> PlaylistResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PlaylistError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(PlaylistError::validation(format!(
                "canvas {}x{} exceeds the raster limit of {}",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        Ok(())
    }
}

/// Opaque 8-bit RGB color.
///
/// Serialized as a `#RRGGBB` string so configuration files stay readable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);
    pub const NAVY: Rgb8 = Rgb8::new(12, 27, 51);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse exactly six hex digits, with or without a leading `#`.
    pub fn from_hex(s: &str) -> PlaylistResult<Self> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PlaylistError::validation(format!(
                "color '{s}' must be 6 hex digits (RRGGBB)"
            )));
        }

        let channel = |range: std::ops::Range<usize>| -> PlaylistResult<u8> {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| PlaylistError::validation(format!("invalid color '{s}': {e}")))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl TryFrom<String> for Rgb8 {
    type Error = PlaylistError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb8> for String {
    fn from(value: Rgb8) -> Self {
        value.to_hex()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
