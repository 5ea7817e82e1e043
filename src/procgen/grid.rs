//! Level grid, brick pool, and chunk placement
//!
//! The grid is a fixed 12x12 array of cells, each holding at most one brick.
//! Placement maps chunk-local coordinates (with optional axis flips) into
//! absolute cells. Chunk-local Y grows upward while grid rows grow downward,
//! so placement inverts the row: `row = oy + (height - 1 - ly)`. This
//! inversion is load-bearing for determinism tests; do not re-derive it.

use glam::Vec2;

use super::chunk::Chunk;
use super::palette::BrickType;
use crate::cell_to_world;
use crate::consts::{GRID_COLS, GRID_ROWS, HALF_COLS, HALF_ROWS};

/// Number of quadrants in the level grid
pub const QUADRANT_COUNT: usize = 4;

/// Column/row offsets of the four quadrants
pub const QUADRANT_OFFSETS: [(i32, i32); QUADRANT_COUNT] = [
    (0, 0),
    (HALF_COLS as i32, 0),
    (0, HALF_ROWS as i32),
    (HALF_COLS as i32, HALF_ROWS as i32),
];

/// Handle to a pooled brick instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BrickHandle(pub u32);

/// A placed brick: a pooled instance configured with a brick type
#[derive(Debug, Clone)]
pub struct Brick {
    pub handle: BrickHandle,
    pub kind: BrickType,
    pub hp: u8,
    /// World-space center
    pub pos: Vec2,
    pub visible: bool,
}

/// Recycling pool for brick instances.
///
/// The core never constructs or destroys bricks ad hoc: every placement goes
/// through `acquire`, and clearing a grid returns every handle via `release`
/// before the next build acquires any.
#[derive(Debug, Default)]
pub struct BrickPool {
    free: Vec<BrickHandle>,
    next: u32,
    live: usize,
}

impl BrickPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a recycled handle, minting a new one if the pool is dry
    pub fn acquire(&mut self) -> BrickHandle {
        self.live += 1;
        self.free.pop().unwrap_or_else(|| {
            let handle = BrickHandle(self.next);
            self.next += 1;
            handle
        })
    }

    /// Return a handle for reuse
    pub fn release(&mut self, handle: BrickHandle) {
        self.live = self.live.saturating_sub(1);
        self.free.push(handle);
    }

    /// Handles currently out on loan
    pub fn live(&self) -> usize {
        self.live
    }

    /// Handles waiting for reuse
    pub fn pooled(&self) -> usize {
        self.free.len()
    }
}

/// The level grid: `GRID_COLS` x `GRID_ROWS` cells
#[derive(Debug)]
pub struct Grid {
    cells: Vec<Option<Brick>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: (0..GRID_COLS * GRID_ROWS).map(|_| None).collect(),
        }
    }

    #[inline]
    pub fn in_bounds(col: i32, row: i32) -> bool {
        (0..GRID_COLS as i32).contains(&col) && (0..GRID_ROWS as i32).contains(&row)
    }

    #[inline]
    fn index(col: usize, row: usize) -> usize {
        row * GRID_COLS + col
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Brick> {
        self.cells[Self::index(col, row)].as_ref()
    }

    pub fn get_mut(&mut self, col: usize, row: usize) -> Option<&mut Brick> {
        self.cells[Self::index(col, row)].as_mut()
    }

    pub fn set(&mut self, col: usize, row: usize, brick: Brick) {
        self.cells[Self::index(col, row)] = Some(brick);
    }

    /// Remove and return the brick at a cell
    pub fn take(&mut self, col: usize, row: usize) -> Option<Brick> {
        self.cells[Self::index(col, row)].take()
    }

    /// Return every brick to the pool and empty the grid.
    ///
    /// All releases happen before the next build's first acquire.
    pub fn clear_into(&mut self, pool: &mut BrickPool) {
        for cell in &mut self.cells {
            if let Some(brick) = cell.take() {
                pool.release(brick.handle);
            }
        }
    }

    /// Iterate occupied cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Brick)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.as_ref().map(|b| (i % GRID_COLS, i / GRID_COLS, b)))
    }

    /// Iterate occupied cells mutably in row-major order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut Brick)> {
        self.cells
            .iter_mut()
            .enumerate()
            .filter_map(|(i, cell)| cell.as_mut().map(|b| (i % GRID_COLS, i / GRID_COLS, b)))
    }

    pub fn count_bricks(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Count bricks that must be destroyed to clear the level
    pub fn count_destructible(&self) -> usize {
        self.iter().filter(|(_, _, b)| b.kind.destructible).count()
    }

    /// Toggle whether placed bricks are shown; does not rebuild
    pub fn set_visible(&mut self, visible: bool) {
        for (_, _, brick) in self.iter_mut() {
            brick.visible = visible;
        }
    }
}

/// Absolute cell for a chunk entry under the given flips and quadrant offset
#[inline]
fn transform_entry(
    chunk: &Chunk,
    lx: u8,
    ly: u8,
    flip_x: bool,
    flip_y: bool,
    ox: i32,
    oy: i32,
) -> (i32, i32) {
    let lx = if flip_x { chunk.width - 1 - lx } else { lx };
    let ly = if flip_y { chunk.height - 1 - ly } else { ly };
    let col = ox + lx as i32;
    let row = oy + (chunk.height - 1 - ly) as i32;
    (col, row)
}

/// Place a chunk's entries into the grid (geometry pass).
///
/// Every placed brick gets the single `fill` type; tier assignment is the
/// paint layer's job, a separate pass over the same grid. Out-of-bounds
/// entries are silently dropped. Returns the number of bricks placed.
pub fn place_chunk(
    grid: &mut Grid,
    pool: &mut BrickPool,
    chunk: &Chunk,
    offset: (i32, i32),
    flip_x: bool,
    flip_y: bool,
    fill: &BrickType,
) -> usize {
    let mut placed = 0;
    for entry in &chunk.entries {
        let (col, row) = transform_entry(chunk, entry.x, entry.y, flip_x, flip_y, offset.0, offset.1);
        if !Grid::in_bounds(col, row) {
            log::trace!("chunk '{}' entry out of bounds at ({col}, {row})", chunk.name);
            continue;
        }
        let (col, row) = (col as usize, row as usize);
        if grid.get(col, row).is_some() {
            continue;
        }
        let handle = pool.acquire();
        grid.set(
            col,
            row,
            Brick {
                handle,
                kind: *fill,
                hp: fill.hit_points,
                pos: cell_to_world(col, row),
                visible: true,
            },
        );
        placed += 1;
    }
    placed
}

/// Overlay a chunk with merge semantics (obstacle pass).
///
/// An occupied cell's brick is reconfigured in place to `kind` (no new
/// instance, no double count); an empty cell spawns a new brick. Returns the
/// number of cells touched.
pub fn overlay_chunk(
    grid: &mut Grid,
    pool: &mut BrickPool,
    chunk: &Chunk,
    offset: (i32, i32),
    flip_x: bool,
    flip_y: bool,
    kind: &BrickType,
) -> usize {
    let mut touched = 0;
    for entry in &chunk.entries {
        let (col, row) = transform_entry(chunk, entry.x, entry.y, flip_x, flip_y, offset.0, offset.1);
        if !Grid::in_bounds(col, row) {
            continue;
        }
        let (col, row) = (col as usize, row as usize);
        match grid.get_mut(col, row) {
            Some(brick) => {
                brick.kind = *kind;
                brick.hp = kind.hit_points;
            }
            None => {
                let handle = pool.acquire();
                grid.set(
                    col,
                    row,
                    Brick {
                        handle,
                        kind: *kind,
                        hp: kind.hit_points,
                        pos: cell_to_world(col, row),
                        visible: true,
                    },
                );
            }
        }
        touched += 1;
    }
    touched
}
