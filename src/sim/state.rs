//! Game state and core simulation types
//!
//! `Session` is the game-state collaborator around the level generator: it
//! owns the grid, the brick pool, and the generator context, and carries
//! the "bricks remaining" baseline each build reports.

use glam::Vec2;

use crate::consts::*;
use crate::procgen::{BrickPool, GenConfig, Grid, LevelGen};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Ball attached to paddle, waiting for launch input
    Serve,
    /// Active gameplay
    Playing,
    /// Between-level rest period
    Cleared,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Ball state - attached to paddle or free-moving
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallState {
    /// Ball rests on the paddle at the given x offset from paddle center
    Attached { offset: f32 },
    /// Ball is free-moving
    Free,
}

/// A ball entity
#[derive(Debug, Clone)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub state: BallState,
    /// Cooldown ticks before paddle can be hit again (prevents sticking)
    pub paddle_cooldown: u32,
}

impl Ball {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            state: BallState::Attached { offset: 0.0 },
            paddle_cooldown: 0,
        }
    }

    /// Update attached ball position based on paddle
    pub fn update_attached(&mut self, paddle: &Paddle) {
        if let BallState::Attached { offset } = self.state {
            self.pos = Vec2::new(
                paddle.x + offset,
                PADDLE_Y + PADDLE_THICKNESS / 2.0 + self.radius + 2.0,
            );
        }
    }

    /// Launch the ball from attached state, mostly upward with a small
    /// sideways component from paddle motion
    pub fn launch(&mut self, paddle: &Paddle, base_speed: f32, english_factor: f32) {
        if matches!(self.state, BallState::Attached { .. }) {
            let english = (paddle.vel / PADDLE_MAX_SPEED * english_factor).clamp(-0.4, 0.4);
            self.vel = Vec2::new(english, 1.0).normalize() * base_speed;
            self.state = BallState::Free;
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    /// Center x position
    pub x: f32,
    pub width: f32,
    /// Horizontal velocity (for "english" on ball)
    pub vel: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: 0.0,
            width: PADDLE_WIDTH,
            vel: 0.0,
        }
    }
}

impl Paddle {
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    /// AABB corners for collision detection
    pub fn aabb(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(self.x - self.half_width(), PADDLE_Y - PADDLE_THICKNESS / 2.0),
            Vec2::new(self.x + self.half_width(), PADDLE_Y + PADDLE_THICKNESS / 2.0),
        )
    }

    /// Move toward a target x with clamped speed, staying inside the walls
    pub fn move_toward(&mut self, target_x: f32, dt: f32, max_speed: f32) {
        let limit = FIELD_HALF_WIDTH - self.half_width();
        let target = target_x.clamp(-limit, limit);
        let delta = target - self.x;
        let max_delta = max_speed * dt;
        let clamped = delta.clamp(-max_delta, max_delta);
        self.vel = clamped / dt;
        self.x += clamped;
    }
}

/// Between-level rest duration in ticks (2 seconds at 120 Hz)
pub const CLEARED_DURATION_TICKS: u32 = 2 * 120;

/// Complete game state for one run
#[derive(Debug)]
pub struct Session {
    /// Run seed; per-level seeds derive from it
    pub seed: i64,
    /// Current level index (0-based)
    pub level_index: u32,
    pub lives: u8,
    pub score: u64,
    pub combo: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Rest timer (ticks remaining in `Cleared`)
    pub cleared_ticks: u32,
    pub paddle: Paddle,
    /// Active balls (sorted by id for determinism)
    pub balls: Vec<Ball>,
    pub grid: Grid,
    pub pool: BrickPool,
    pub generator: LevelGen,
    /// Destructible bricks left; reaches zero when the level is cleared
    pub bricks_remaining: usize,
    /// Launch speed for new balls
    pub ball_speed: f32,
    next_id: u32,
}

impl Session {
    /// Create a new run: builds level 0 and spawns a ball on the paddle
    pub fn new(seed: i64, settings: &Settings) -> Self {
        let mut session = Self {
            seed,
            level_index: 0,
            lives: settings.starting_lives,
            score: 0,
            combo: 0,
            time_ticks: 0,
            phase: GamePhase::Serve,
            cleared_ticks: 0,
            paddle: Paddle::default(),
            balls: Vec::new(),
            grid: Grid::new(),
            pool: BrickPool::new(),
            generator: LevelGen::standard(settings.gen_config()),
            bricks_remaining: 0,
            ball_speed: BALL_START_SPEED * settings.ball_speed_scale,
            next_id: 1,
        };
        session.build_level();
        session.spawn_ball_attached();
        session
    }

    /// Run with an explicit generator config (tests, demo tooling)
    pub fn with_config(seed: i64, config: GenConfig) -> Self {
        let mut settings = Settings::default();
        settings.symmetry = config.symmetry;
        settings.paint = config.paint;
        settings.geometry_templates = config.geometry_templates;
        settings.obstacle_templates = config.obstacle_templates;
        Self::new(seed, &settings)
    }

    /// Seed for the current level, derived from the run seed so each level
    /// differs while the run stays reproducible
    pub fn level_seed(&self) -> i64 {
        (self.level_index as i64)
            .wrapping_mul(2654435761)
            .wrapping_add(self.seed)
    }

    /// Rebuild the grid for the current level and take the reported
    /// destructible count as the new baseline.
    ///
    /// A failed build leaves an empty grid and an immediately-clearable
    /// level; the error is logged, not propagated into gameplay.
    pub fn build_level(&mut self) {
        let seed = self.level_seed();
        match self.generator.build(seed, &mut self.grid, &mut self.pool) {
            Ok(report) => {
                self.bricks_remaining = report.destructible;
                log::info!(
                    "level {} ready: {} destructible bricks",
                    self.level_index,
                    report.destructible
                );
            }
            Err(err) => {
                self.bricks_remaining = 0;
                log::error!("level {} build failed: {err}", self.level_index);
            }
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a ball attached to the paddle
    pub fn spawn_ball_attached(&mut self) {
        let id = self.next_entity_id();
        let mut ball = Ball::new(id);
        ball.update_attached(&self.paddle);
        self.balls.push(ball);
    }

    /// Toggle whether placed bricks are shown (does not rebuild)
    pub fn set_bricks_visible(&mut self, visible: bool) {
        self.grid.set_visible(visible);
    }

    /// Ensure balls are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.balls.sort_by_key(|b| b.id);
    }
}
