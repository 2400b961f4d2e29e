//! Fixed-rate simulation tick
//!
//! One tick runs physics, then the obstacle pipeline, then collision
//! detection. Spawning is driven separately (see `game`), so it is not part
//! of the tick.

use super::collision;
use super::obstacles;
use super::physics;
use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// Advance the game state by one render tick
///
/// Does nothing outside [`GamePhase::Playing`]. A collision ends the session
/// in the same tick.
pub fn tick(state: &mut GameState, tuning: &Tuning) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;

    physics::integrate(&mut state.player, tuning.gravity);
    obstacles::advance(state, tuning, &mut events);

    if let Some(hit) = collision::detect(&state.player, &state.obstacles, tuning) {
        state.end();
        log::debug!(
            "Collision {:?} at tick {} (score {})",
            hit,
            state.time_ticks,
            state.score
        );
        events.push(GameEvent::Collided(hit));
    }

    events
}

/// Jump input; ignored unless playing
///
/// Returns whether the jump was applied.
pub fn jump(state: &mut GameState, tuning: &Tuning) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    physics::jump(&mut state.player, tuning);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacles::{spawn, spawn_with_gap};
    use crate::sim::state::{Collision, Player};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn playing() -> (GameState, Tuning) {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 0);
        state.start(&tuning);
        (state, tuning)
    }

    #[test]
    fn test_tick_ignored_outside_playing() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 0);
        let before = state.player;
        assert!(tick(&mut state, &tuning).is_empty());
        assert_eq!(state.player, before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_fall_to_floor_ends_game() {
        let (mut state, tuning) = playing();
        let mut last = Vec::new();
        for _ in 0..1000 {
            last = tick(&mut state, &tuning);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 0);
        assert_eq!(last, vec![GameEvent::Collided(Collision::Floor)]);
        assert!(state.player.y >= tuning.floor());
    }

    #[test]
    fn test_obstacle_ahead_is_harmless() {
        let (mut state, tuning) = playing();
        spawn_with_gap(&mut state, &tuning, 100.0);
        state.player = Player { y: 50.0, vel: 0.0 };

        let events = tick(&mut state, &tuning);

        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.obstacles[0].trailing_edge(&tuning) > tuning.player_x);
    }

    #[test]
    fn test_passing_obstacle_scores_once() {
        let (mut state, tuning) = playing();
        spawn_with_gap(&mut state, &tuning, 100.0);

        let mut scored_ticks = Vec::new();
        for t in 0..200 {
            // Hold the player in the middle of the gap
            state.player = Player { y: 150.0, vel: -tuning.gravity };
            for event in tick(&mut state, &tuning) {
                if let GameEvent::Scored { .. } = event {
                    scored_ticks.push(t);
                }
            }
            assert_eq!(state.phase, GamePhase::Playing);
        }

        assert_eq!(scored_ticks.len(), 1);
        assert_eq!(state.score, 1);
        // x = 320 - 2.5 * (t + 1); trailing edge x + 52 < 60 first at t = 124
        assert_eq!(scored_ticks[0], 124);
    }

    #[test]
    fn test_jump_in_menu_is_ignored() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 0);
        let before = state.player;
        assert!(!jump(&mut state, &tuning));
        assert_eq!(state.player, before);
    }

    #[test]
    fn test_jump_in_game_over_is_ignored() {
        let (mut state, tuning) = playing();
        state.end();
        let before = state.player;
        assert!(!jump(&mut state, &tuning));
        assert_eq!(state.player, before);
    }

    #[test]
    fn test_collision_raises_best_score() {
        let (mut state, tuning) = playing();
        state.score = 3;
        state.player.y = tuning.floor();
        tick(&mut state, &tuning);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.best_score, 3);
    }

    #[test]
    fn test_hitting_obstacle_ends_game() {
        let (mut state, tuning) = playing();
        spawn_with_gap(&mut state, &tuning, 200.0);
        state.obstacles[0].x = tuning.player_x;
        state.player = Player { y: 100.0, vel: 0.0 };

        let events = tick(&mut state, &tuning);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(events, vec![GameEvent::Collided(Collision::Obstacle { id: 1 })]);
    }

    proptest! {
        #[test]
        fn prop_velocity_follows_gravity_or_jump(
            jumps in prop::collection::vec(any::<bool>(), 1..120),
        ) {
            let (mut state, tuning) = playing();
            for jumped in jumps {
                if state.phase != GamePhase::Playing {
                    break;
                }
                if jumped {
                    jump(&mut state, &tuning);
                    prop_assert_eq!(state.player.vel, tuning.jump_impulse);
                }
                let before = state.player.vel;
                tick(&mut state, &tuning);
                prop_assert_eq!(state.player.vel, before + tuning.gravity);
            }
        }

        #[test]
        fn prop_score_matches_scored_obstacles(
            seed in any::<u64>(),
            jumps in prop::collection::vec(any::<bool>(), 1..600),
        ) {
            let (mut state, tuning) = playing();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut scored_ids = Vec::new();

            for (t, jumped) in jumps.into_iter().enumerate() {
                if state.phase != GamePhase::Playing {
                    break;
                }
                if t % 87 == 0 {
                    spawn(&mut state, &tuning, &mut rng);
                }
                if jumped && state.player.y > 150.0 {
                    jump(&mut state, &tuning);
                }
                for event in tick(&mut state, &tuning) {
                    if let GameEvent::Scored { id, score } = event {
                        prop_assert!(!scored_ids.contains(&id));
                        scored_ids.push(id);
                        prop_assert_eq!(score as usize, scored_ids.len());
                    }
                }
                for o in &state.obstacles {
                    prop_assert_eq!(o.scored, o.trailing_edge(&tuning) < tuning.player_x);
                }
                prop_assert_eq!(state.score as usize, scored_ids.len());
            }
        }
    }
}
