//! Sub-cell dot resolution.

/// Dot resolution of a canvas marker, in dots per terminal cell.
///
/// Plays the role a device pixel ratio plays on a browser canvas: pane
/// geometry is in cells, the drawing surface is in dots, and cell-unit
/// sizes are scaled by the vertical dot count so proportions carry over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotScale {
    /// Horizontal dots per cell.
    pub x: u16,
    /// Vertical dots per cell.
    pub y: u16,
}

impl DotScale {
    /// Braille marker resolution (2x4 dots per cell).
    pub const BRAILLE: Self = Self { x: 2, y: 4 };

    /// Scalar applied to cell-unit sizes to get dot units.
    pub fn size_factor(&self) -> f32 {
        self.y as f32
    }

    /// Surface size in dots for a pane of the given cell size.
    pub fn surface(&self, cols: u16, rows: u16) -> (u16, u16) {
        (cols.saturating_mul(self.x), rows.saturating_mul(self.y))
    }
}

impl Default for DotScale {
    fn default() -> Self {
        Self::BRAILLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braille_surface() {
        let scale = DotScale::BRAILLE;
        assert_eq!(scale.surface(10, 5), (20, 20));
        assert_eq!(scale.size_factor(), 4.0);
    }

    #[test]
    fn test_surface_saturates() {
        let scale = DotScale::BRAILLE;
        let (w, h) = scale.surface(u16::MAX, u16::MAX);
        assert_eq!((w, h), (u16::MAX, u16::MAX));
    }
}
