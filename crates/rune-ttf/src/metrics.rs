/// Line metrics in pixels at the font's size, before rounding.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ScaledLineMetrics {
    /// Ascent above baseline (positive).
    pub ascent: f32,
    /// Descent below baseline (positive).
    pub descent: f32,
    /// Line gap (leading).
    pub line_gap: f32,
    /// Distance from baseline to the top of the underline, negative below.
    pub underline_offset: f32,
    pub underline_thickness: f32,
}

impl ScaledLineMetrics {
    pub fn ascent_px(&self) -> i32 {
        self.ascent.ceil() as i32
    }

    /// Zero or negative: the baseline-to-bottom distance, pointing down.
    pub fn descent_px(&self) -> i32 {
        (-self.descent).ceil() as i32
    }

    pub fn height_px(&self) -> i32 {
        self.ascent_px()
            .saturating_sub(self.descent_px())
            .saturating_add(1)
    }

    pub fn line_skip_px(&self) -> i32 {
        (self.ascent + self.descent + self.line_gap).ceil() as i32
    }

    /// Top row and thickness of the underline bar in a surface whose
    /// baseline sits at `ascent_px()`, clamped inside `surface_height`.
    pub fn underline_rows(&self, surface_height: i32) -> (i32, i32) {
        let thickness = (self.underline_thickness.floor() as i32).max(1);
        let mut row = self
            .ascent_px()
            .saturating_sub(self.underline_offset.floor() as i32)
            .saturating_sub(1);
        if row.saturating_add(thickness) > surface_height {
            row = surface_height.saturating_sub(thickness);
        }
        (row.max(0), thickness)
    }

    pub fn rounded(&self) -> FontMetrics {
        FontMetrics {
            height: self.height_px(),
            ascent: self.ascent_px(),
            descent: self.descent_px(),
            line_skip: self.line_skip_px(),
        }
    }
}

/// Rounded font-wide metrics in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    /// Bottom of the descent to top of the ascent.
    pub height: i32,
    /// Baseline to top.
    pub ascent: i32,
    /// Baseline to bottom, zero or negative.
    pub descent: i32,
    /// Recommended baseline-to-baseline distance.
    pub line_skip: i32,
}

/// Per-glyph box and advance in pixels, y pointing up from the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetrics {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
    pub advance: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScaledLineMetrics {
        ScaledLineMetrics {
            ascent: 14.2,
            descent: 3.6,
            line_gap: 0.5,
            underline_offset: -1.5,
            underline_thickness: 0.8,
        }
    }

    #[test]
    fn test_rounding() {
        let m = sample().rounded();
        assert_eq!(m.ascent, 15);
        assert_eq!(m.descent, -3);
        assert_eq!(m.height, 19);
        assert_eq!(m.line_skip, 19);
    }

    #[test]
    fn test_underline_rows() {
        // ascent 15, offset floor(-1.5) = -2 => row 15 + 2 - 1
        assert_eq!(sample().underline_rows(19), (16, 1));
        // clamped to the bottom edge
        assert_eq!(sample().underline_rows(16), (15, 1));
    }

    #[test]
    fn test_huge_sizes_saturate() {
        let m = ScaledLineMetrics {
            ascent: 3.0e9,
            descent: 1.0e9,
            line_gap: 0.0,
            underline_offset: -1.0e9,
            underline_thickness: 1.0,
        };
        assert_eq!(m.ascent_px(), i32::MAX);
        assert_eq!(m.height_px(), i32::MAX);
        assert_eq!(m.underline_rows(100), (99, 1));
    }
}
