//! Vertical physics for the player

use super::state::Player;
use crate::tuning::{JumpMode, Tuning};

/// Advance one tick under gravity
#[inline]
pub fn integrate(player: &mut Player, gravity: f32) {
    player.vel += gravity;
    player.y += player.vel;
}

/// Apply a jump impulse
///
/// Velocity is overridden (not added to). In [`JumpMode::VelocityAndPosition`]
/// the player is also moved by the impulse right away, never above the top
/// edge.
pub fn jump(player: &mut Player, tuning: &Tuning) {
    player.vel = tuning.jump_impulse;
    if tuning.jump_mode == JumpMode::VelocityAndPosition {
        player.y = (player.y + tuning.jump_impulse).max(0.0);
    }
}
