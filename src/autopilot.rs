//! Idle/demo mode player
//!
//! Aims the player's bottom edge at a line just above the bottom of the next
//! gap and jumps whenever it is about to sink below it.

use crate::sim::{GamePhase, GameState};
use crate::tuning::Tuning;

/// Fraction of the gap kept clear above the gap bottom
const GAP_CLEARANCE: f32 = 0.15;
/// Re-jump only once upward speed has decayed to this share of the impulse
const REJUMP_FRACTION: f32 = 0.3;

/// Line the player's bottom edge should stay above
pub fn target_line(state: &GameState, tuning: &Tuning) -> f32 {
    state
        .obstacles
        .iter()
        .find(|o| o.trailing_edge(tuning) >= tuning.player_x)
        .map(|o| o.gap_bottom(tuning) - tuning.gap * GAP_CLEARANCE)
        .unwrap_or(tuning.height / 2.0 + tuning.player_size)
}

/// Decide whether to jump this tick
pub fn should_jump(state: &GameState, tuning: &Tuning) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }

    let next_vel = state.player.vel + tuning.gravity;
    let next_bottom = state.player.y + tuning.player_size + next_vel;
    let still_rising = state.player.vel < tuning.jump_impulse * REJUMP_FRACTION;

    next_bottom > target_line(state, tuning) && !still_rising
}
