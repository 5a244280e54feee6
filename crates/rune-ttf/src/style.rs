use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// Style bits applied to glyphs at rasterization time.
///
/// Bit values match the classic TrueType binding constants so they can be
/// passed straight through a C ABI.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontStyle(u8);

impl FontStyle {
    pub const NORMAL: FontStyle = FontStyle(0x00);
    pub const BOLD: FontStyle = FontStyle(0x01);
    pub const ITALIC: FontStyle = FontStyle(0x02);
    pub const UNDERLINE: FontStyle = FontStyle(0x04);

    const ALL: u8 = 0x07;

    /// Build from raw bits; unknown bits are dropped.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        FontStyle(bits & Self::ALL)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: FontStyle) -> bool {
        self.0 & other.0 == other.0
    }

    /// Return a copy with `flag` set or cleared.
    pub const fn with(self, flag: FontStyle, enabled: bool) -> Self {
        if enabled {
            FontStyle(self.0 | flag.0)
        } else {
            FontStyle(self.0 & !flag.0)
        }
    }

    pub const fn is_normal(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for FontStyle {
    type Output = FontStyle;
    fn bitor(self, rhs: Self) -> Self {
        FontStyle(self.0 | rhs.0)
    }
}

impl BitOrAssign for FontStyle {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for FontStyle {
    type Output = FontStyle;
    fn bitand(self, rhs: Self) -> Self {
        FontStyle(self.0 & rhs.0)
    }
}

impl Not for FontStyle {
    type Output = FontStyle;
    fn not(self) -> Self {
        FontStyle(!self.0 & Self::ALL)
    }
}

impl fmt::Debug for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_normal() {
            return f.write_str("FontStyle(NORMAL)");
        }
        let mut names = Vec::new();
        if self.contains(Self::BOLD) {
            names.push("BOLD");
        }
        if self.contains(Self::ITALIC) {
            names.push("ITALIC");
        }
        if self.contains(Self::UNDERLINE) {
            names.push("UNDERLINE");
        }
        write!(f, "FontStyle({})", names.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_sets_and_clears() {
        let s = FontStyle::NORMAL.with(FontStyle::BOLD, true);
        assert!(s.contains(FontStyle::BOLD));
        let s = s.with(FontStyle::UNDERLINE, true).with(FontStyle::BOLD, false);
        assert_eq!(s, FontStyle::UNDERLINE);
    }

    #[test]
    fn test_truncate_unknown_bits() {
        assert_eq!(FontStyle::from_bits_truncate(0xff).bits(), 0x07);
        assert_eq!(!FontStyle::BOLD, FontStyle::ITALIC | FontStyle::UNDERLINE);
    }

    #[test]
    fn test_debug_names() {
        assert_eq!(format!("{:?}", FontStyle::NORMAL), "FontStyle(NORMAL)");
        assert_eq!(
            format!("{:?}", FontStyle::BOLD | FontStyle::UNDERLINE),
            "FontStyle(BOLD | UNDERLINE)"
        );
    }
}
