//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded level generation only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Hit, circle_aabb, reflect};
pub use state::{Ball, BallState, GamePhase, Paddle, Session, CLEARED_DURATION_TICKS};
pub use tick::{TickInput, tick};
