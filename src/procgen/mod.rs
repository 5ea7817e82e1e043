//! Deterministic level generation
//!
//! A level build is a pure, synchronous pipeline from one integer seed to a
//! populated grid:
//! - Seeded RNG only, consumed strictly sequentially by every step
//! - Stable library ordering (chunks sorted by name before any shuffle)
//! - No rendering or platform dependencies

pub mod chunk;
pub mod distribute;
pub mod grid;
pub mod level;
pub mod paint;
pub mod palette;
pub mod rng;
pub mod symmetry;

pub use chunk::{Chunk, ChunkEntry, ChunkLibrary};
pub use distribute::distribute;
pub use grid::{
    Brick, BrickHandle, BrickPool, Grid, QUADRANT_COUNT, QUADRANT_OFFSETS, overlay_chunk,
    place_chunk,
};
pub use level::{BuildError, BuildPhase, BuildReport, GenConfig, LevelGen};
pub use paint::{PaintPattern, paint_grid};
pub use palette::{BrickType, Palette};
pub use rng::LevelRng;
pub use symmetry::{QuadrantPlan, SymmetryMode, compose};
