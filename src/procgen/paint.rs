//! Paint layer
//!
//! Post-pass that assigns a difficulty tier to every placed brick from a 2D
//! spatial gradient. Painting reconfigures bricks in place; handles and
//! world positions are untouched. Empty cells are skipped.

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::palette::Palette;
use crate::consts::{GRID_COLS, GRID_ROWS};

/// Spatial gradient used to assign tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaintPattern {
    #[default]
    BottomToTop,
    LeftToRight,
    ZebraHorizontal,
    CenterOut,
}

impl PaintPattern {
    /// Number of patterns (for the chaos-mode draw)
    pub const COUNT: usize = 4;

    pub fn from_index(index: usize) -> Self {
        match index % Self::COUNT {
            0 => PaintPattern::BottomToTop,
            1 => PaintPattern::LeftToRight,
            2 => PaintPattern::ZebraHorizontal,
            _ => PaintPattern::CenterOut,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaintPattern::BottomToTop => "bottom-to-top",
            PaintPattern::LeftToRight => "left-to-right",
            PaintPattern::ZebraHorizontal => "zebra",
            PaintPattern::CenterOut => "center-out",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bottom-to-top" | "bottom" => Some(PaintPattern::BottomToTop),
            "left-to-right" | "left" => Some(PaintPattern::LeftToRight),
            "zebra" => Some(PaintPattern::ZebraHorizontal),
            "center-out" | "center" => Some(PaintPattern::CenterOut),
            _ => None,
        }
    }

    /// Gradient value in `[0, 1]` for a grid cell.
    ///
    /// The exact formulas are load-bearing: `BottomToTop` gives `t = 1` at
    /// row 0, matching the placement engine's row direction.
    pub fn gradient(&self, col: usize, row: usize) -> f32 {
        match self {
            PaintPattern::BottomToTop => {
                (GRID_ROWS - 1 - row) as f32 / (GRID_ROWS - 1) as f32
            }
            PaintPattern::LeftToRight => col as f32 / (GRID_COLS - 1) as f32,
            PaintPattern::ZebraHorizontal => {
                if row.is_multiple_of(2) {
                    0.0
                } else {
                    1.0
                }
            }
            PaintPattern::CenterOut => {
                let cx = (GRID_COLS - 1) as f32 / 2.0;
                let cy = (GRID_ROWS - 1) as f32 / 2.0;
                let dx = col as f32 - cx;
                let dy = row as f32 - cy;
                let max_dist = (cx * cx + cy * cy).sqrt();
                1.0 - (dx * dx + dy * dy).sqrt() / max_dist
            }
        }
    }
}

/// Overwrite every placed brick's configuration with the tier its gradient
/// value selects
pub fn paint_grid(grid: &mut Grid, palette: &Palette, pattern: PaintPattern) {
    for (col, row, brick) in grid.iter_mut() {
        let kind = palette.tier(pattern.gradient(col, row));
        brick.kind = *kind;
        brick.hp = kind.hit_points;
    }
}
