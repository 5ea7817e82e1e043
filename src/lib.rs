//! Quad Breaker - a brick breaker with procedural, seed-deterministic levels
//!
//! Core modules:
//! - `procgen`: Deterministic level generation (chunks, symmetry, paint, obstacles)
//! - `sim`: Deterministic simulation (paddle, ball, collisions, game state)
//! - `settings`: Data-driven configuration

pub mod procgen;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Level grid dimensions (cells)
    pub const GRID_COLS: usize = 12;
    pub const GRID_ROWS: usize = 12;
    /// Quadrants span half the grid on each axis
    pub const HALF_COLS: usize = GRID_COLS / 2;
    pub const HALF_ROWS: usize = GRID_ROWS / 2;

    /// Cell size in world units
    pub const CELL_WIDTH: f32 = 32.0;
    pub const CELL_HEIGHT: f32 = 16.0;

    /// Playfield extents
    pub const FIELD_HALF_WIDTH: f32 = GRID_COLS as f32 * CELL_WIDTH / 2.0;
    pub const FIELD_TOP: f32 = 260.0;
    pub const FIELD_BOTTOM: f32 = -300.0;

    /// World position of grid cell (0, 0); rows extend downward from here
    pub const GRID_ORIGIN: Vec2 = Vec2::new(-FIELD_HALF_WIDTH + CELL_WIDTH / 2.0, 224.0);

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 72.0;
    pub const PADDLE_THICKNESS: f32 = 12.0;
    pub const PADDLE_Y: f32 = -260.0;
    pub const PADDLE_MAX_SPEED: f32 = 620.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 6.0;
    pub const BALL_START_SPEED: f32 = 260.0;
    /// Minimum ball speed (english can't slow it below this)
    pub const BALL_MIN_SPEED: f32 = 200.0;
    /// Maximum ball speed
    pub const BALL_MAX_SPEED: f32 = 520.0;
    /// Speed boost when ball hits paddle (multiplicative)
    pub const PADDLE_BOOST: f32 = 1.04;
}

/// World-space center of a grid cell.
///
/// Grid rows grow downward while world Y grows upward, hence the negated
/// row term.
#[inline]
pub fn cell_to_world(col: usize, row: usize) -> Vec2 {
    consts::GRID_ORIGIN
        + Vec2::new(
            col as f32 * consts::CELL_WIDTH,
            -(row as f32) * consts::CELL_HEIGHT,
        )
}

/// Nearest grid cell for a world-space position (may be out of bounds)
#[inline]
pub fn world_to_cell(pos: Vec2) -> (i32, i32) {
    let col = ((pos.x - consts::GRID_ORIGIN.x) / consts::CELL_WIDTH).round() as i32;
    let row = (-(pos.y - consts::GRID_ORIGIN.y) / consts::CELL_HEIGHT).round() as i32;
    (col, row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_world_roundtrip() {
        for col in 0..consts::GRID_COLS {
            for row in 0..consts::GRID_ROWS {
                let pos = cell_to_world(col, row);
                assert_eq!(world_to_cell(pos), (col as i32, row as i32));
            }
        }
    }

    #[test]
    fn test_rows_grow_downward_in_world() {
        let top = cell_to_world(0, 0);
        let below = cell_to_world(0, 1);
        assert!(below.y < top.y);
    }
}
