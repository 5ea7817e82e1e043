//! Symmetry composer
//!
//! Decides, per level build, which source chunks the four quadrants reuse
//! and which axis flips each gets. Mirror modes are deterministic pairings
//! of at most two drawn chunks; Chaos bypasses pairing and randomizes each
//! quadrant independently through the template distributor.

use serde::{Deserialize, Serialize};

use super::chunk::ChunkLibrary;
use super::distribute::distribute;
use super::rng::LevelRng;

/// Quadrant mirroring policy, selected once per level build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SymmetryMode {
    MirrorHorizontal,
    MirrorVertical,
    #[default]
    MirrorBoth,
    Chaos,
}

impl SymmetryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymmetryMode::MirrorHorizontal => "mirror-h",
            SymmetryMode::MirrorVertical => "mirror-v",
            SymmetryMode::MirrorBoth => "mirror-both",
            SymmetryMode::Chaos => "chaos",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mirror-h" | "horizontal" => Some(SymmetryMode::MirrorHorizontal),
            "mirror-v" | "vertical" => Some(SymmetryMode::MirrorVertical),
            "mirror-both" | "both" => Some(SymmetryMode::MirrorBoth),
            "chaos" => Some(SymmetryMode::Chaos),
            _ => None,
        }
    }
}

/// One quadrant's assignment: a library index plus axis flips.
///
/// Flips are booleans only, never combined with rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadrantPlan {
    pub chunk: usize,
    pub flip_x: bool,
    pub flip_y: bool,
}

/// Produce exactly one plan per quadrant (indices 0..3), or an empty plan
/// for an empty library.
///
/// Non-chaos modes draw chunk A and, when `template_count > 1`, chunk B from
/// the full library; with a single requested template B is forced equal to A.
pub fn compose(
    mode: SymmetryMode,
    library: &ChunkLibrary,
    template_count: usize,
    rng: &mut LevelRng,
) -> Vec<QuadrantPlan> {
    if library.is_empty() {
        return Vec::new();
    }

    if mode == SymmetryMode::Chaos {
        let slots = distribute(library.len(), template_count, rng);
        let mut plans = Vec::with_capacity(slots.len());
        for chunk in slots {
            let flip_x = rng.coin();
            let flip_y = rng.coin();
            plans.push(QuadrantPlan {
                chunk,
                flip_x,
                flip_y,
            });
        }
        return plans;
    }

    let len = library.len() as i32;
    let a = rng.next_int(0, len) as usize;
    let b = if template_count <= 1 {
        a
    } else {
        rng.next_int(0, len) as usize
    };

    let plan = |chunk: usize, flip_x: bool, flip_y: bool| QuadrantPlan {
        chunk,
        flip_x,
        flip_y,
    };

    match mode {
        SymmetryMode::MirrorHorizontal => vec![
            plan(a, false, false),
            plan(a, true, false),
            plan(b, false, false),
            plan(b, true, false),
        ],
        SymmetryMode::MirrorVertical => vec![
            plan(a, false, false),
            plan(b, false, false),
            plan(a, false, true),
            plan(b, false, true),
        ],
        SymmetryMode::MirrorBoth => vec![
            plan(a, false, false),
            plan(a, true, false),
            plan(a, false, true),
            plan(a, true, true),
        ],
        SymmetryMode::Chaos => unreachable!(),
    }
}
