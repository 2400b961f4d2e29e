//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick steps only
//! - Injected RNG only
//! - Stable iteration order (oldest obstacle first)
//! - No rendering, timer or storage dependencies

pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{Rect, check_bounds, check_obstacle, detect};
pub use obstacles::{spawn, spawn_with_gap};
pub use state::{Collision, GameEvent, GamePhase, GameState, Obstacle, Player};
pub use tick::{jump, tick};
