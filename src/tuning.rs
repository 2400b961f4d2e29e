//! Data-driven game balance
//!
//! Defaults live in [`crate::consts`]. A JSON override can be stored next to
//! the best score; a missing, malformed or invalid override falls back to the
//! defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::persistence::KeyValueStore;

/// How a jump moves the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum JumpMode {
    /// Velocity is set to the impulse and the player is also nudged up by it
    #[default]
    VelocityAndPosition,
    /// Velocity is set to the impulse; position changes on the next tick
    VelocityOnly,
}

#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    #[error("playfield must be positive, got {width}x{height}")]
    Playfield { width: f32, height: f32 },

    #[error("player of size {size} at x={x} does not fit the playfield")]
    Player { size: f32, x: f32 },

    #[error("gap {gap} with margin {margin} does not fit playfield height {height}")]
    GapTooLarge { gap: f32, margin: f32, height: f32 },

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("jump impulse must be negative (upwards), got {0}")]
    JumpImpulse(f32),
}

/// Game balance constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub width: f32,
    pub height: f32,
    pub player_size: f32,
    pub player_x: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub jump_mode: JumpMode,
    pub obstacle_width: f32,
    pub gap: f32,
    pub obstacle_speed: f32,
    pub gap_margin: f32,
    pub spawn_interval_ms: f64,
    pub frame_interval_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: GAME_WIDTH,
            height: GAME_HEIGHT,
            player_size: PLAYER_SIZE,
            player_x: PLAYER_X,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            jump_mode: JumpMode::default(),
            obstacle_width: OBSTACLE_WIDTH,
            gap: OBSTACLE_GAP,
            obstacle_speed: OBSTACLE_SPEED,
            gap_margin: GAP_MARGIN,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            frame_interval_ms: FRAME_INTERVAL_MS,
        }
    }
}

impl Tuning {
    /// LocalStorage key for the JSON override
    pub const STORAGE_KEY: &'static str = "flappyDegenTuning";

    /// Lowest y the player can occupy without touching the floor
    pub fn floor(&self) -> f32 {
        self.height - self.player_size
    }

    /// Valid range for an obstacle's gap-top height
    ///
    /// Never empty: when the margins do not fit, the range collapses to the
    /// highest gap-top that still keeps the gap on screen.
    pub fn gap_top_range(&self) -> (f32, f32) {
        let max_top = (self.height - self.gap).max(0.0);
        let lo = self.gap_margin.clamp(0.0, max_top);
        let hi = (self.height - self.gap - self.gap_margin).clamp(lo, max_top);
        (lo, hi)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(TuningError::Playfield {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.player_size > 0.0)
            || self.player_size >= self.height
            || self.player_x < 0.0
            || self.player_x + self.player_size > self.width
        {
            return Err(TuningError::Player {
                size: self.player_size,
                x: self.player_x,
            });
        }
        if self.gap <= 0.0 || self.gap + 2.0 * self.gap_margin > self.height {
            return Err(TuningError::GapTooLarge {
                gap: self.gap,
                margin: self.gap_margin,
                height: self.height,
            });
        }
        let positives = [
            ("obstacle_width", self.obstacle_width as f64),
            ("obstacle_speed", self.obstacle_speed as f64),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("frame_interval_ms", self.frame_interval_ms),
        ];
        for (name, value) in positives {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { name, value });
            }
        }
        if !(self.jump_impulse < 0.0) {
            return Err(TuningError::JumpImpulse(self.jump_impulse));
        }
        Ok(())
    }

    /// Load the tuning override from storage, falling back to defaults
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let json = match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => {
                log::info!("Using default tuning");
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read tuning, using defaults: {}", e);
                return Self::default();
            }
        };

        let tuning = match serde_json::from_str::<Tuning>(&json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Malformed tuning override, using defaults: {}", e);
                return Self::default();
            }
        };

        match tuning.validate() {
            Ok(()) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning override, using defaults: {}", e);
                Self::default()
            }
        }
    }
}
