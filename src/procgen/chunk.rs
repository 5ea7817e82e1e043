//! Authored chunk catalog
//!
//! A chunk is an immutable rectangular fragment of brick layout, authored as
//! an ASCII template and compiled to a sparse entry list at load time.
//! Chunk-local Y grows upward: the first template line is the chunk's top
//! row (`y = height - 1`). `#` marks a filled cell, `.` an empty one.

use serde::Serialize;

/// One occupied cell of a chunk, in chunk-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkEntry {
    pub x: u8,
    pub y: u8,
}

/// An authored rectangular brick-layout fragment
#[derive(Debug, Clone, Serialize)]
pub struct Chunk {
    pub name: &'static str,
    pub width: u8,
    pub height: u8,
    /// Sparse occupied cells; not every cell is populated
    pub entries: Vec<ChunkEntry>,
}

impl Chunk {
    /// Compile an ASCII template into a chunk.
    ///
    /// Lines are read top to bottom; blank lines and leading/trailing
    /// whitespace are ignored. Any non-`.` glyph marks a filled cell.
    pub fn from_template(name: &'static str, template: &str) -> Self {
        let lines: Vec<&str> = template
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = lines.len() as u8;
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u8;

        let mut entries = Vec::new();
        for (line_idx, line) in lines.iter().enumerate() {
            // First line is the top of the chunk
            let y = height - 1 - line_idx as u8;
            for (x, ch) in line.chars().enumerate() {
                if ch != '.' {
                    entries.push(ChunkEntry { x: x as u8, y });
                }
            }
        }

        Self {
            name,
            width,
            height,
            entries,
        }
    }
}

/// Immutable, name-sorted catalog of chunks.
///
/// Sorting by name at construction makes downstream shuffles deterministic
/// given a seed, independent of declaration or load order.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkLibrary {
    chunks: Vec<Chunk>,
}

impl ChunkLibrary {
    pub fn new(mut chunks: Vec<Chunk>) -> Self {
        chunks.sort_by_key(|c| c.name);
        Self { chunks }
    }

    /// An empty library; the corresponding generation phase is skipped
    pub fn empty() -> Self {
        Self { chunks: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn get(&self, index: usize) -> &Chunk {
        &self.chunks[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    /// Built-in geometry chunks (6x6, one per quadrant)
    pub fn builtin_geometry() -> Self {
        Self::new(vec![
            Chunk::from_template("bands", BANDS),
            Chunk::from_template("checker", CHECKER),
            Chunk::from_template("columns", COLUMNS),
            Chunk::from_template("diamond", DIAMOND),
            Chunk::from_template("frame", FRAME),
            Chunk::from_template("wedge", WEDGE),
        ])
    }

    /// Built-in obstacle chunks (sparse, indestructible)
    pub fn builtin_obstacles() -> Self {
        Self::new(vec![
            Chunk::from_template("post", POST),
            Chunk::from_template("rail", RAIL),
            Chunk::from_template("tee", TEE),
        ])
    }
}

const CHECKER: &str = "
    #.#.#.
    .#.#.#
    #.#.#.
    .#.#.#
    #.#.#.
    .#.#.#";

const FRAME: &str = "
    ######
    #....#
    #....#
    #....#
    #....#
    ######";

const DIAMOND: &str = "
    ..##..
    .####.
    ######
    ######
    .####.
    ..##..";

const COLUMNS: &str = "
    #.#.#.
    #.#.#.
    #.#.#.
    #.#.#.
    #.#.#.
    #.#.#.";

const BANDS: &str = "
    ######
    ......
    ######
    ......
    ######
    ......";

const WEDGE: &str = "
    #.....
    ##....
    ###...
    ####..
    #####.
    ######";

const POST: &str = "
    ......
    ......
    ..##..
    ..##..
    ......
    ......";

const RAIL: &str = "
    ......
    ......
    .####.
    ......
    ......
    ......";

const TEE: &str = "
    ......
    .###..
    ..#...
    ..#...
    ......
    ......";
