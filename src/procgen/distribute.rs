//! Template distributor
//!
//! Selects a bounded subset of a chunk library and assigns one chunk index
//! to each of the four quadrants, with repetition when the active set is
//! smaller than four. Both the subset draw and the final slot order come
//! from the build's sequence generator.

use super::grid::QUADRANT_COUNT;
use super::rng::LevelRng;

/// Assign a library index to each quadrant.
///
/// Steps, each consuming the rng in a fixed order:
/// 1. Clamp `requested` to the library size (and at least 1).
/// 2. Shuffle the index list of the name-sorted library; the first
///    `requested` indices form the active set.
/// 3. Cycle the active set across the four slots (`i % len`).
/// 4. Shuffle the four slots once more so quadrant assignment order is also
///    seed-controlled.
///
/// An empty library yields an empty plan; the caller skips the phase.
pub fn distribute(library_len: usize, requested: usize, rng: &mut LevelRng) -> Vec<usize> {
    if library_len == 0 {
        return Vec::new();
    }
    let count = requested.clamp(1, library_len);

    let mut order: Vec<usize> = (0..library_len).collect();
    rng.shuffle(&mut order);
    order.truncate(count);

    let mut slots: Vec<usize> = (0..QUADRANT_COUNT).map(|i| order[i % count]).collect();
    rng.shuffle(&mut slots);
    slots
}
