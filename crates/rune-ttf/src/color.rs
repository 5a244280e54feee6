use crate::error::{Result, TtfError};

/// 8-bit RGB color used for text foreground and background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise complement, used for the unused palette slot of solid renders.
    #[inline]
    pub const fn inverted(self) -> Self {
        Self::rgb(255 - self.r, 255 - self.g, 255 - self.b)
    }

    /// Linear interpolation from `self` (t = 0) to `to` (t = 255).
    pub fn lerp(self, to: Color, t: u8) -> Self {
        let mix = |a: u8, b: u8| -> u8 {
            let a = a as i32;
            let b = b as i32;
            (a + (b - a) * t as i32 / 255) as u8
        };
        Self::rgb(mix(self.r, to.r), mix(self.g, to.g), mix(self.b, to.b))
    }

    /// Parse `RRGGBB` or `#RRGGBB`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(TtfError::argument(format!("invalid color '{s}' (expected RRGGBB)")));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| TtfError::argument(format!("invalid color '{s}' (expected RRGGBB)")))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    #[inline]
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from(c: [u8; 3]) -> Self {
        Self::rgb(c[0], c[1], c[2])
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

/// Only the first three channels are read; extra entries are ignored.
impl TryFrom<&[i64]> for Color {
    type Error = TtfError;

    fn try_from(channels: &[i64]) -> Result<Self> {
        if channels.len() < 3 {
            return Err(TtfError::argument(format!(
                "color needs 3 channels, got {}",
                channels.len()
            )));
        }
        let channel = |v: i64| {
            u8::try_from(v)
                .map_err(|_| TtfError::argument(format!("color channel {v} out of range 0..=255")))
        };
        Ok(Self::rgb(
            channel(channels[0])?,
            channel(channels[1])?,
            channel(channels[2])?,
        ))
    }
}
