//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::collision::{circle_aabb, reflect};
use super::state::{BallState, CLEARED_DURATION_TICKS, GamePhase, Session};
use crate::consts::*;
use crate::procgen::Grid;
use crate::world_to_cell;

/// Maximum bounce angle off the paddle, radians from vertical
const PADDLE_BOUNCE_ANGLE: f32 = 1.05;
/// Cooldown ticks after a paddle hit (prevents sticking)
const PADDLE_COOLDOWN_TICKS: u32 = 8;
/// Flat bonus for clearing a level
const LEVEL_CLEAR_BONUS: u64 = 500;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Target paddle x (from mouse/touch position)
    pub target_x: Option<f32>,
    /// Launch ball (click/tap/space)
    pub launch: bool,
    /// Pause toggle
    pub pause: bool,
    /// Skip to next level (debug/testing)
    pub skip_level: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match session.phase {
            GamePhase::Playing | GamePhase::Serve => {
                session.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => {
                session.phase = if session
                    .balls
                    .iter()
                    .any(|b| matches!(b.state, BallState::Attached { .. }))
                {
                    GamePhase::Serve
                } else {
                    GamePhase::Playing
                };
            }
            _ => {}
        }
    }

    // Don't tick if paused or game over
    match session.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        _ => {}
    }

    // Idle/demo mode - AI plays the game
    let mut input = input.clone();
    if input.idle_mode {
        if matches!(session.phase, GamePhase::Serve) {
            input.launch = true;
        }

        // Track the most dangerous ball (lowest, closest to the paddle),
        // leading its horizontal motion slightly
        let maybe_ball = session
            .balls
            .iter()
            .filter(|b| matches!(b.state, BallState::Free))
            .min_by(|a, b| {
                a.pos
                    .y
                    .partial_cmp(&b.pos.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        if let Some(ball) = maybe_ball {
            input.target_x = Some(ball.pos.x + ball.vel.x * 0.15);
        }
    }
    let input = &input;

    // Debug: skip to next level
    if input.skip_level {
        session.balls.clear();
        session.level_index += 1;
        session.build_level();
        session.spawn_ball_attached();
        session.phase = GamePhase::Serve;
        return;
    }

    session.time_ticks += 1;

    // Update paddle position
    if let Some(target) = input.target_x {
        session.paddle.move_toward(target, dt, PADDLE_MAX_SPEED);
    } else {
        session.paddle.vel = 0.0;
    }

    match session.phase {
        GamePhase::Serve => {
            // Attached balls follow the paddle
            for ball in &mut session.balls {
                ball.update_attached(&session.paddle);
            }

            if input.launch {
                let speed = session.ball_speed;
                for ball in &mut session.balls {
                    if matches!(ball.state, BallState::Attached { .. }) {
                        ball.launch(&session.paddle, speed, 0.5);
                    }
                }
                session.phase = GamePhase::Playing;
            }
        }

        GamePhase::Playing => {
            step_balls(session, dt);

            // Drop balls that fell past the bottom
            session
                .balls
                .retain(|b| b.pos.y - b.radius > FIELD_BOTTOM);

            if session.balls.is_empty() {
                session.combo = 0;
                session.lives = session.lives.saturating_sub(1);
                if session.lives == 0 {
                    log::info!(
                        "game over: score={} level={}",
                        session.score,
                        session.level_index
                    );
                    session.phase = GamePhase::GameOver;
                } else {
                    session.spawn_ball_attached();
                    session.phase = GamePhase::Serve;
                }
            } else if session.bricks_remaining == 0 {
                session.score += LEVEL_CLEAR_BONUS;
                log::info!(
                    "level {} cleared: score={}",
                    session.level_index,
                    session.score
                );
                session.balls.clear();
                session.cleared_ticks = CLEARED_DURATION_TICKS;
                session.phase = GamePhase::Cleared;
            }
        }

        GamePhase::Cleared => {
            session.cleared_ticks = session.cleared_ticks.saturating_sub(1);
            if session.cleared_ticks == 0 {
                session.level_index += 1;
                session.build_level();
                session.spawn_ball_attached();
                session.phase = GamePhase::Serve;
            }
        }

        _ => {}
    }

    // Ensure deterministic ordering
    session.normalize_order();
}

/// Integrate free balls and resolve wall, paddle, and brick collisions
fn step_balls(session: &mut Session, dt: f32) {
    let Session {
        balls,
        grid,
        pool,
        paddle,
        score,
        combo,
        bricks_remaining,
        ..
    } = session;

    for ball in balls.iter_mut() {
        if !matches!(ball.state, BallState::Free) {
            continue;
        }
        if ball.paddle_cooldown > 0 {
            ball.paddle_cooldown -= 1;
        }

        ball.pos += ball.vel * dt;

        // Side and top walls
        if ball.pos.x - ball.radius < -FIELD_HALF_WIDTH {
            ball.pos.x = -FIELD_HALF_WIDTH + ball.radius;
            ball.vel.x = ball.vel.x.abs();
        } else if ball.pos.x + ball.radius > FIELD_HALF_WIDTH {
            ball.pos.x = FIELD_HALF_WIDTH - ball.radius;
            ball.vel.x = -ball.vel.x.abs();
        }
        if ball.pos.y + ball.radius > FIELD_TOP {
            ball.pos.y = FIELD_TOP - ball.radius;
            ball.vel.y = -ball.vel.y.abs();
        }

        // Paddle: angle of reflection depends on where the ball lands
        if ball.paddle_cooldown == 0 && ball.vel.y < 0.0 {
            let (pmin, pmax) = paddle.aabb();
            if let Some(_hit) = circle_aabb(ball.pos, ball.radius, pmin, pmax) {
                let offset = ((ball.pos.x - paddle.x) / paddle.half_width()).clamp(-1.0, 1.0);
                let theta = offset * PADDLE_BOUNCE_ANGLE;
                let speed = (ball.vel.length() * PADDLE_BOOST)
                    .clamp(BALL_MIN_SPEED, BALL_MAX_SPEED);
                ball.vel = Vec2::new(theta.sin(), theta.cos()) * speed;
                ball.pos.y = pmax.y + ball.radius + 0.1;
                ball.paddle_cooldown = PADDLE_COOLDOWN_TICKS;
            }
        }

        // Bricks: test the 3x3 cell neighborhood around the ball, one
        // collision response per tick
        let (col, row) = world_to_cell(ball.pos);
        let half_cell = Vec2::new(CELL_WIDTH / 2.0, CELL_HEIGHT / 2.0);
        'cells: for dr in -1..=1 {
            for dc in -1..=1 {
                let (c, r) = (col + dc, row + dr);
                if !Grid::in_bounds(c, r) {
                    continue;
                }
                let (c, r) = (c as usize, r as usize);

                let mut destroyed = false;
                let mut bounced = false;
                if let Some(brick) = grid.get_mut(c, r) {
                    let hit = circle_aabb(
                        ball.pos,
                        ball.radius,
                        brick.pos - half_cell,
                        brick.pos + half_cell,
                    );
                    if let Some(hit) = hit {
                        ball.vel = reflect(ball.vel, hit.normal);
                        ball.pos += hit.normal * hit.penetration;
                        bounced = true;
                        if brick.kind.destructible {
                            brick.hp = brick.hp.saturating_sub(1);
                            destroyed = brick.hp == 0;
                        }
                    }
                }
                if destroyed {
                    if let Some(brick) = grid.take(c, r) {
                        pool.release(brick.handle);
                        *score += brick.kind.score as u64;
                        *combo += 1;
                        *bricks_remaining = bricks_remaining.saturating_sub(1);
                    }
                }
                if bounced {
                    break 'cells;
                }
            }
        }
    }
}
