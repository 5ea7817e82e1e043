//! Level build pipeline
//!
//! One `build` call runs the whole synchronous pipeline for a seed:
//! clear -> compose quadrants -> place geometry -> paint -> overlay
//! obstacles -> report. The sequence generator is constructed here and
//! consumed in a fixed order (symmetry/distributor draws, then the
//! chaos-mode paint draw, then the obstacle distributor and flips), so a
//! seed reproduces the identical grid across machines and runs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::chunk::ChunkLibrary;
use super::distribute::distribute;
use super::grid::{BrickPool, Grid, QUADRANT_OFFSETS, overlay_chunk, place_chunk};
use super::paint::{PaintPattern, paint_grid};
use super::palette::{BrickType, Palette};
use super::rng::LevelRng;
use super::symmetry::{SymmetryMode, compose};

/// Build-aborting configuration problems.
///
/// These are checked before any placement, so a failed build never leaves a
/// partially populated grid behind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("brick palette is empty")]
    EmptyPalette,
}

/// Lifecycle of one build; terminal and initial state are both `Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    Idle,
    ClearingPreviousGrid,
    PlacingGeometry,
    Painting,
    OverlayingObstacles,
    Reporting,
}

/// Generator tuning, configured externally per level build
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenConfig {
    pub symmetry: SymmetryMode,
    /// Ignored in chaos mode, which draws its own pattern
    pub paint: PaintPattern,
    pub geometry_templates: usize,
    pub obstacle_templates: usize,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            symmetry: SymmetryMode::default(),
            paint: PaintPattern::default(),
            geometry_templates: 2,
            obstacle_templates: 2,
        }
    }
}

/// Outcome of a completed build, handed to the game-state collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BuildReport {
    pub seed: i64,
    /// "Bricks remaining" baseline; zero means an immediately-clearable
    /// level, not an error
    pub destructible: usize,
    pub total: usize,
    /// The pattern actually used (relevant in chaos mode)
    pub paint: PaintPattern,
}

/// The procedural level generator: chunk libraries, palette, and tuning.
///
/// A plain value owned by the caller; there is no process-wide instance.
#[derive(Debug, Clone)]
pub struct LevelGen {
    pub geometry: ChunkLibrary,
    pub obstacles: ChunkLibrary,
    pub palette: Palette,
    pub config: GenConfig,
}

impl LevelGen {
    pub fn new(
        geometry: ChunkLibrary,
        obstacles: ChunkLibrary,
        palette: Palette,
        config: GenConfig,
    ) -> Self {
        Self {
            geometry,
            obstacles,
            palette,
            config,
        }
    }

    /// Generator with the built-in libraries and standard palette
    pub fn standard(config: GenConfig) -> Self {
        Self::new(
            ChunkLibrary::builtin_geometry(),
            ChunkLibrary::builtin_obstacles(),
            Palette::standard(),
            config,
        )
    }

    /// Run the full deterministic build for `seed`.
    ///
    /// Idempotent given the same seed and libraries. The previous level's
    /// bricks are all returned to the pool before any new acquire.
    pub fn build(
        &self,
        seed: i64,
        grid: &mut Grid,
        pool: &mut BrickPool,
    ) -> Result<BuildReport, BuildError> {
        if self.palette.is_empty() {
            return Err(BuildError::EmptyPalette);
        }

        let mut rng = LevelRng::new(seed);
        let mut phase = BuildPhase::Idle;

        advance(&mut phase, BuildPhase::ClearingPreviousGrid);
        grid.clear_into(pool);

        advance(&mut phase, BuildPhase::PlacingGeometry);
        let default_kind = *self.palette.tier(0.0);
        let plans = compose(
            self.config.symmetry,
            &self.geometry,
            self.config.geometry_templates,
            &mut rng,
        );
        if plans.is_empty() {
            log::info!("geometry library empty, skipping placement");
        }
        for (quadrant, plan) in plans.iter().enumerate() {
            let chunk = self.geometry.get(plan.chunk);
            let placed = place_chunk(
                grid,
                pool,
                chunk,
                QUADRANT_OFFSETS[quadrant],
                plan.flip_x,
                plan.flip_y,
                &default_kind,
            );
            log::debug!(
                "quadrant {quadrant}: chunk '{}' flip_x={} flip_y={} placed={placed}",
                chunk.name,
                plan.flip_x,
                plan.flip_y
            );
        }

        advance(&mut phase, BuildPhase::Painting);
        let paint = if self.config.symmetry == SymmetryMode::Chaos {
            PaintPattern::from_index(rng.next_int(0, PaintPattern::COUNT as i32) as usize)
        } else {
            self.config.paint
        };
        paint_grid(grid, &self.palette, paint);

        advance(&mut phase, BuildPhase::OverlayingObstacles);
        self.overlay_obstacles(grid, pool, &mut rng);

        advance(&mut phase, BuildPhase::Reporting);
        let destructible = grid.count_destructible();
        let total = grid.count_bricks();
        advance(&mut phase, BuildPhase::Idle);

        log::info!(
            "level built: seed={seed} {} {} bricks={total} destructible={destructible}",
            self.config.symmetry.as_str(),
            paint.as_str(),
        );
        Ok(BuildReport {
            seed,
            destructible,
            total,
            paint,
        })
    }

    /// Second placement pass with merge semantics over the obstacle library.
    ///
    /// Runs after painting, so obstacles are never themselves re-painted.
    /// Public so the pass can be replayed against a known grid state; with
    /// the same rng seed and prior grid this is idempotent.
    pub fn overlay_obstacles(
        &self,
        grid: &mut Grid,
        pool: &mut BrickPool,
        rng: &mut LevelRng,
    ) -> usize {
        let slots = distribute(self.obstacles.len(), self.config.obstacle_templates, rng);
        if slots.is_empty() {
            log::debug!("obstacle library empty, skipping overlay");
            return 0;
        }
        let mut touched = 0;
        for (quadrant, &chunk_idx) in slots.iter().enumerate() {
            let flip_x = rng.coin();
            let flip_y = rng.coin();
            touched += overlay_chunk(
                grid,
                pool,
                self.obstacles.get(chunk_idx),
                QUADRANT_OFFSETS[quadrant],
                flip_x,
                flip_y,
                &BrickType::OBSTACLE,
            );
        }
        touched
    }
}

fn advance(phase: &mut BuildPhase, next: BuildPhase) {
    log::debug!("build phase {phase:?} -> {next:?}");
    *phase = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GRID_COLS, GRID_ROWS, HALF_ROWS};
    use crate::procgen::chunk::Chunk;
    use proptest::prelude::*;

    fn snapshot(grid: &Grid) -> Vec<(usize, usize, &'static str)> {
        grid.iter().map(|(c, r, b)| (c, r, b.kind.name)).collect()
    }

    fn build_once(generator: &LevelGen, seed: i64) -> (Grid, BrickPool, BuildReport) {
        let mut grid = Grid::new();
        let mut pool = BrickPool::new();
        let report = generator.build(seed, &mut grid, &mut pool).unwrap();
        (grid, pool, report)
    }

    #[test]
    fn test_determinism_across_builds() {
        let generator = LevelGen::standard(GenConfig::default());
        let (grid_a, _, report_a) = build_once(&generator, 12345);
        let (grid_b, _, report_b) = build_once(&generator, 12345);
        assert_eq!(snapshot(&grid_a), snapshot(&grid_b));
        assert_eq!(report_a, report_b);
    }

    #[test]
    fn test_rebuild_on_same_grid_is_idempotent() {
        let generator = LevelGen::standard(GenConfig::default());
        let mut grid = Grid::new();
        let mut pool = BrickPool::new();
        generator.build(4242, &mut grid, &mut pool).unwrap();
        let first = snapshot(&grid)
            .into_iter()
            .map(|(c, r, n)| (c, r, n.to_owned()))
            .collect::<Vec<_>>();
        let live_first = pool.live();

        generator.build(4242, &mut grid, &mut pool).unwrap();
        let second = snapshot(&grid)
            .into_iter()
            .map(|(c, r, n)| (c, r, n.to_owned()))
            .collect::<Vec<_>>();
        assert_eq!(first, second);
        assert_eq!(pool.live(), live_first, "handles recycled, not leaked");
    }

    #[test]
    fn test_seed_sensitivity() {
        let generator = LevelGen::standard(GenConfig {
            symmetry: SymmetryMode::Chaos,
            ..GenConfig::default()
        });
        let mut distinct = 0;
        for pair in [(1, 2), (3, 4), (100, 101), (777, 778)] {
            let (a, _, _) = build_once(&generator, pair.0);
            let (b, _, _) = build_once(&generator, pair.1);
            if snapshot(&a) != snapshot(&b) {
                distinct += 1;
            }
        }
        assert!(distinct >= 3, "most seed pairs must differ");
    }

    #[test]
    fn test_quadrant_coverage_non_chaos() {
        // A full 6x6 chunk in every quadrant partitions the grid exactly
        let generator = LevelGen::new(
            ChunkLibrary::new(vec![Chunk::from_template(
                "full",
                "######\n######\n######\n######\n######\n######",
            )]),
            ChunkLibrary::empty(),
            Palette::standard(),
            GenConfig {
                symmetry: SymmetryMode::MirrorBoth,
                geometry_templates: 1,
                ..GenConfig::default()
            },
        );
        let (grid, _, report) = build_once(&generator, 9);
        assert_eq!(report.total, GRID_COLS * GRID_ROWS);
        for col in 0..GRID_COLS {
            for row in 0..GRID_ROWS {
                assert!(grid.get(col, row).is_some(), "cell ({col},{row}) empty");
            }
        }
    }

    #[test]
    fn test_scenario_seed_777_mirror_horizontal() {
        // Four single-brick 6x6 chunks, MirrorHorizontal, two templates:
        // the top quadrant pair shares chunk A (right side flipped on X),
        // the bottom pair shares chunk B, and the choice is stable across
        // re-runs.
        let single = "#.....\n......\n......\n......\n......\n......";
        let lib = ChunkLibrary::new(
            ["a", "b", "c", "d"]
                .into_iter()
                .map(|n| Chunk::from_template(n, single))
                .collect(),
        );
        let generator = LevelGen::new(
            lib.clone(),
            ChunkLibrary::empty(),
            Palette::standard(),
            GenConfig {
                symmetry: SymmetryMode::MirrorHorizontal,
                geometry_templates: 2,
                ..GenConfig::default()
            },
        );

        let mut rng = LevelRng::new(777);
        let plans = compose(SymmetryMode::MirrorHorizontal, &lib, 2, &mut rng);
        assert_eq!(plans[0].chunk, plans[1].chunk);
        assert_eq!(plans[2].chunk, plans[3].chunk);

        let mut rng2 = LevelRng::new(777);
        assert_eq!(
            plans,
            compose(SymmetryMode::MirrorHorizontal, &lib, 2, &mut rng2)
        );

        // The entry sits at local (0, 5): top-left of each unflipped
        // quadrant, mirrored to the top-right corner when flipped on X
        let (grid, _, _) = build_once(&generator, 777);
        assert!(grid.get(0, 0).is_some());
        assert!(grid.get(GRID_COLS - 1, 0).is_some());
        assert!(grid.get(0, HALF_ROWS).is_some());
        assert!(grid.get(GRID_COLS - 1, HALF_ROWS).is_some());
        assert_eq!(grid.count_bricks(), 4);

        let (grid_again, _, _) = build_once(&generator, 777);
        assert_eq!(snapshot(&grid), snapshot(&grid_again));
    }

    #[test]
    fn test_empty_geometry_library_reports_zero() {
        let generator = LevelGen::new(
            ChunkLibrary::empty(),
            ChunkLibrary::empty(),
            Palette::standard(),
            GenConfig::default(),
        );
        let (grid, pool, report) = build_once(&generator, 5);
        assert_eq!(report.destructible, 0);
        assert_eq!(report.total, 0);
        assert_eq!(grid.count_bricks(), 0);
        assert_eq!(pool.live(), 0);
    }

    #[test]
    fn test_empty_obstacle_library_is_noop() {
        let base = GenConfig::default();
        let with = LevelGen::standard(base);
        let without = LevelGen::new(
            ChunkLibrary::builtin_geometry(),
            ChunkLibrary::empty(),
            Palette::standard(),
            base,
        );
        let (_, _, report_with) = build_once(&with, 321);
        let (grid, _, report_without) = build_once(&without, 321);
        // Without obstacles the report equals the post-paint count, and
        // every brick stays destructible
        assert_eq!(report_without.destructible, report_without.total);
        assert_eq!(grid.count_destructible(), grid.count_bricks());
        // Overlay only ever reduces the destructible count
        assert!(report_with.destructible <= report_without.destructible);
    }

    #[test]
    fn test_obstacle_overlay_idempotent() {
        let generator = LevelGen::standard(GenConfig::default());
        let mut grid = Grid::new();
        let mut pool = BrickPool::new();
        generator.build(777, &mut grid, &mut pool).unwrap();
        let first = snapshot(&grid)
            .into_iter()
            .map(|(c, r, n)| (c, r, n.to_owned()))
            .collect::<Vec<_>>();

        // Replaying the overlay against the same prior grid with the same
        // rng state changes nothing
        let mut rng = LevelRng::new(99);
        generator.overlay_obstacles(&mut grid, &mut pool, &mut rng);
        let mut rng = LevelRng::new(99);
        generator.overlay_obstacles(&mut grid, &mut pool, &mut rng);
        let second = snapshot(&grid)
            .into_iter()
            .map(|(c, r, n)| (c, r, n.to_owned()))
            .collect::<Vec<_>>();

        let mut once_grid = Grid::new();
        let mut once_pool = BrickPool::new();
        generator.build(777, &mut once_grid, &mut once_pool).unwrap();
        let mut rng = LevelRng::new(99);
        generator.overlay_obstacles(&mut once_grid, &mut once_pool, &mut rng);
        let once = snapshot(&once_grid)
            .into_iter()
            .map(|(c, r, n)| (c, r, n.to_owned()))
            .collect::<Vec<_>>();

        assert_eq!(second, once);
        assert_ne!(first.len(), 0);
    }

    #[test]
    fn test_empty_palette_aborts_before_placement() {
        let generator = LevelGen::new(
            ChunkLibrary::builtin_geometry(),
            ChunkLibrary::builtin_obstacles(),
            Palette::new(Vec::new()),
            GenConfig::default(),
        );
        let mut grid = Grid::new();
        let mut pool = BrickPool::new();
        let err = generator.build(1, &mut grid, &mut pool).unwrap_err();
        assert_eq!(err, BuildError::EmptyPalette);
        assert_eq!(grid.count_bricks(), 0);
        assert_eq!(pool.live(), 0);
    }

    #[test]
    fn test_chaos_draws_paint_pattern_from_seed() {
        let generator = LevelGen::standard(GenConfig {
            symmetry: SymmetryMode::Chaos,
            ..GenConfig::default()
        });
        let (_, _, a) = build_once(&generator, 2024);
        let (_, _, b) = build_once(&generator, 2024);
        assert_eq!(a.paint, b.paint);
    }

    #[test]
    fn test_all_bricks_inside_grid() {
        let generator = LevelGen::standard(GenConfig {
            symmetry: SymmetryMode::Chaos,
            ..GenConfig::default()
        });
        let (grid, _, _) = build_once(&generator, 31337);
        for (col, row, brick) in grid.iter() {
            assert!(col < GRID_COLS && row < GRID_ROWS);
            // World position matches the cell it is stored in
            assert_eq!(
                crate::world_to_cell(brick.pos),
                (col as i32, row as i32)
            );
        }
    }

    proptest! {
        #[test]
        fn prop_any_seed_builds_identically_twice(seed in any::<i64>()) {
            let generator = LevelGen::standard(GenConfig {
                symmetry: SymmetryMode::Chaos,
                ..GenConfig::default()
            });
            let (a, _, ra) = build_once(&generator, seed);
            let (b, _, rb) = build_once(&generator, seed);
            prop_assert_eq!(snapshot(&a), snapshot(&b));
            prop_assert_eq!(ra, rb);
        }

        #[test]
        fn prop_destructible_never_exceeds_total(seed in any::<i64>()) {
            let generator = LevelGen::standard(GenConfig::default());
            let (_, _, report) = build_once(&generator, seed);
            prop_assert!(report.destructible <= report.total);
        }
    }
}
