//! Game controller
//!
//! [`Game`] is the single owner of the session state, tuning, random source,
//! storage and trigger schedule. The platform layer talks to the simulation
//! only through it: `start`/`jump`/`return_to_menu` for input, `on_frame` and
//! `on_spawn` for the two periodic triggers, and [`Snapshot`] for drawing.

pub mod headless;
pub mod schedule;

pub use headless::{HeadlessOutcome, run_headless};
pub use schedule::{TriggerSchedule, TriggerToken};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::persistence::{KeyValueStore, load_best_score, save_best_score};
use crate::sim::{self, GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// Read-only view handed to the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub width: f32,
    pub height: f32,
    pub player_x: f32,
    pub player_y: f32,
    pub player_vel: f32,
    pub player_size: f32,
    pub obstacle_width: f32,
    pub obstacles: Vec<ObstacleView>,
    pub score: u32,
    pub best_score: u32,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub x: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
    pub scored: bool,
}

impl Snapshot {
    pub fn to_json(&self) -> String {
        // Only plain numbers and enums; serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Session controller
pub struct Game<S: KeyValueStore, R: Rng = Pcg32> {
    state: GameState,
    tuning: Tuning,
    store: S,
    rng: R,
    schedule: TriggerSchedule,
}

impl<S: KeyValueStore> Game<S, Pcg32> {
    /// Controller with a seeded PCG random source
    pub fn new(store: S, tuning: Tuning, seed: u64) -> Self {
        Self::with_rng(store, tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<S: KeyValueStore, R: Rng> Game<S, R> {
    /// Controller with an injected random source; loads the best score once
    pub fn with_rng(store: S, tuning: Tuning, rng: R) -> Self {
        let best = load_best_score(&store);
        Self {
            state: GameState::new(&tuning, best),
            tuning,
            store,
            rng,
            schedule: TriggerSchedule::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.state.best_score
    }

    pub fn points(&self) -> u32 {
        self.state.points()
    }

    /// Whether a trigger holding `token` may still run
    pub fn is_live(&self, token: TriggerToken) -> bool {
        self.schedule.is_live(token) && self.state.phase == GamePhase::Playing
    }

    /// `Menu -> Playing`
    ///
    /// Returns the token both periodic triggers must present, or `None` when
    /// not in the menu.
    pub fn start(&mut self) -> Option<TriggerToken> {
        if !self.state.start(&self.tuning) {
            return None;
        }
        let token = self.schedule.open();
        log::info!("Session started (generation {})", token.generation());
        Some(token)
    }

    /// `GameOver -> Menu`
    pub fn return_to_menu(&mut self) -> bool {
        let moved = self.state.return_to_menu();
        if moved {
            log::info!("Returned to menu");
        }
        moved
    }

    /// `Playing -> GameOver` without a collision
    ///
    /// Used when the driver stops a session early. The score still counts
    /// toward the best score.
    pub fn abandon(&mut self) -> bool {
        if self.state.phase != GamePhase::Playing {
            log::debug!("Ignoring abandon in {:?}", self.state.phase);
            return false;
        }
        let new_best = self.state.end();
        log::info!("Session abandoned");
        self.finish_session(new_best);
        true
    }

    /// Jump input; a no-op unless playing
    pub fn jump(&mut self) -> bool {
        sim::jump(&mut self.state, &self.tuning)
    }

    /// Render-tick trigger
    ///
    /// Runs one simulation tick. A stale token, or any phase but `Playing`,
    /// makes this a no-op.
    pub fn on_frame(&mut self, token: TriggerToken) -> Vec<GameEvent> {
        if !self.is_live(token) {
            log::trace!("Dropping stale frame (generation {})", token.generation());
            return Vec::new();
        }

        let best_before = self.state.best_score;
        let events = sim::tick(&mut self.state, &self.tuning);

        if self.state.phase != GamePhase::Playing {
            self.finish_session(self.state.best_score > best_before);
        }
        events
    }

    /// Spawn-timer trigger
    pub fn on_spawn(&mut self, token: TriggerToken) -> Option<GameEvent> {
        if !self.is_live(token) {
            log::trace!("Dropping stale spawn (generation {})", token.generation());
            return None;
        }
        sim::spawn(&mut self.state, &self.tuning, &mut self.rng)
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        let tuning = &self.tuning;
        Snapshot {
            phase: self.state.phase,
            width: tuning.width,
            height: tuning.height,
            player_x: tuning.player_x,
            player_y: self.state.player.y,
            player_vel: self.state.player.vel,
            player_size: tuning.player_size,
            obstacle_width: tuning.obstacle_width,
            obstacles: self
                .state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    x: o.x,
                    gap_top: o.gap_top,
                    gap_bottom: o.gap_bottom(tuning),
                    scored: o.scored,
                })
                .collect(),
            score: self.state.score,
            best_score: self.state.best_score,
            points: self.state.points(),
        }
    }

    /// Phase left `Playing`: stop the triggers, persist a new best
    fn finish_session(&mut self, new_best: bool) {
        self.schedule.close();
        log::info!(
            "Game over: score {} (best {})",
            self.state.score,
            self.state.best_score
        );
        if new_best {
            log::info!("New high score: {}", self.state.best_score);
            if let Err(e) = save_best_score(&mut self.store, self.state.best_score) {
                log::warn!("Could not persist best score: {}", e);
            }
        }
    }
}
