//! Headless session driver
//!
//! Replays what the browser does with `requestAnimationFrame` and
//! `setInterval`, using a simulated clock: every frame advances time by
//! [`Tuning::frame_interval_ms`] and the spawn timer fires from an
//! [`IntervalTimer`].

use rand::Rng;

use super::Game;
use crate::persistence::KeyValueStore;
use crate::platform::IntervalTimer;
use crate::sim::{GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// Result of a headless session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessOutcome {
    pub score: u32,
    pub best_score: u32,
    pub ticks: u64,
    pub spawned: u32,
    /// False if the tick cap was hit first (the session is then abandoned)
    pub ended: bool,
}

/// Run one session from the menu until game over or `max_ticks`
///
/// `pilot` is asked before every frame whether to jump. A game sitting in
/// game over is first returned to the menu. Hitting the cap abandons the
/// session, so the game is always left in game over and can be run again.
pub fn run_headless<S, R, P>(
    game: &mut Game<S, R>,
    max_ticks: u64,
    mut pilot: P,
) -> HeadlessOutcome
where
    S: KeyValueStore,
    R: Rng,
    P: FnMut(&GameState, &Tuning) -> bool,
{
    game.return_to_menu();
    let Some(token) = game.start() else {
        log::warn!("Could not start a headless session from {:?}", game.phase());
        return HeadlessOutcome {
            score: game.score(),
            best_score: game.best_score(),
            ticks: 0,
            spawned: 0,
            ended: false,
        };
    };

    let mut spawner = IntervalTimer::new(game.tuning().spawn_interval_ms);
    let frame_ms = game.tuning().frame_interval_ms;
    let mut spawned = 0;
    let mut ticks = 0;

    while ticks < max_ticks && game.is_live(token) {
        for _ in 0..spawner.advance(frame_ms) {
            if game.on_spawn(token).is_some() {
                spawned += 1;
            }
        }

        if pilot(game.state(), game.tuning()) {
            game.jump();
        }

        for event in game.on_frame(token) {
            if let GameEvent::Scored { score, .. } = event {
                log::debug!("Scored ({})", score);
            }
        }
        ticks += 1;
    }

    let ended = game.phase() == GamePhase::GameOver;
    if !ended {
        log::debug!("Tick cap reached after {} ticks", ticks);
        game.abandon();
    }

    HeadlessOutcome {
        score: game.score(),
        best_score: game.best_score(),
        ticks,
        spawned,
        ended,
    }
}
