//! Flappy Degen - a one-button arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `game`: Controller owning the session, storage and trigger schedule
//! - `persistence`: Key/value storage and the persisted best score
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance
//! - `donation`: Local validation of donation requests
//! - `autopilot`: Idle/demo mode player

pub mod autopilot;
pub mod donation;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use game::{Game, Snapshot};
pub use persistence::{KeyValueStore, MemoryStore, StorageError};
pub use tuning::{JumpMode, Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Playfield dimensions
    pub const GAME_WIDTH: f32 = 320.0;
    pub const GAME_HEIGHT: f32 = 480.0;

    /// Player is a square at a fixed horizontal position
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_X: f32 = 60.0;

    /// Added to velocity every tick (pixels/tick²)
    pub const GRAVITY: f32 = 0.4;
    /// Velocity after a jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -7.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 52.0;
    pub const OBSTACLE_GAP: f32 = 140.0;
    pub const OBSTACLE_SPEED: f32 = 2.5;
    /// Keeps the gap away from the top and bottom edges
    pub const GAP_MARGIN: f32 = 50.0;
    /// Wall-clock spawn interval
    pub const SPAWN_INTERVAL_MS: f64 = 1450.0;

    /// Render tick interval used by headless runs (~60 Hz)
    pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

    /// Best score divisor for the derived points value
    pub const POINTS_PER_BEST: u32 = 10;
}
