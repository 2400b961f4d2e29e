//! Obstacle pipeline: spawn, advance, score, retire

use rand::Rng;

use super::state::{GameEvent, GamePhase, GameState, Obstacle};
use crate::tuning::Tuning;

/// Spawn an obstacle at the right edge with a random gap
///
/// Does nothing outside [`GamePhase::Playing`].
pub fn spawn<R: Rng>(state: &mut GameState, tuning: &Tuning, rng: &mut R) -> Option<GameEvent> {
    if state.phase != GamePhase::Playing {
        return None;
    }
    let (lo, hi) = tuning.gap_top_range();
    let gap_top = rng.random_range(lo..=hi);
    Some(spawn_with_gap(state, tuning, gap_top))
}

/// Spawn an obstacle at the right edge with a given gap-top height
///
/// The height is clamped into [`Tuning::gap_top_range`].
pub fn spawn_with_gap(state: &mut GameState, tuning: &Tuning, gap_top: f32) -> GameEvent {
    let (lo, hi) = tuning.gap_top_range();
    let gap_top = gap_top.clamp(lo, hi);
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        x: tuning.width,
        gap_top,
        scored: false,
    });
    log::trace!("Spawned obstacle {} (gap top {:.1})", id, gap_top);
    GameEvent::Spawned { id, gap_top }
}

/// Move every obstacle left, tag passed ones, drop off-screen ones
///
/// Each obstacle adds exactly one point, on the first tick its trailing edge
/// is left of the player.
pub fn advance(state: &mut GameState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    for obstacle in &mut state.obstacles {
        obstacle.x -= tuning.obstacle_speed;

        if !obstacle.scored && obstacle.trailing_edge(tuning) < tuning.player_x {
            obstacle.scored = true;
            state.score += 1;
            events.push(GameEvent::Scored {
                id: obstacle.id,
                score: state.score,
            });
        }
    }

    // retain keeps order, oldest first
    state.obstacles.retain(|o| {
        let keep = o.x >= -tuning.obstacle_width;
        if !keep {
            events.push(GameEvent::Retired { id: o.id });
        }
        keep
    });
}
