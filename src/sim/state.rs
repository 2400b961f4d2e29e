//! Game state and core simulation types

use serde::{Deserialize, Serialize};

use crate::consts::POINTS_PER_BEST;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Waiting for the player to start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended; waits for return to menu
    GameOver,
}

/// The player entity
///
/// Horizontal position is fixed by [`Tuning::player_x`]; only `y` moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top edge (0 = top of the playfield, grows downwards)
    pub y: f32,
    /// Vertical velocity (pixels/tick, positive is down)
    pub vel: f32,
}

impl Player {
    /// Player resting at the vertical centre of the playfield
    pub fn centered(tuning: &Tuning) -> Self {
        Self {
            y: tuning.height / 2.0,
            vel: 0.0,
        }
    }
}

/// A pair of obstacles (above and below a gap)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Height of the upper obstacle, i.e. where the gap starts
    pub gap_top: f32,
    /// Set once when the trailing edge passes the player
    pub scored: bool,
}

impl Obstacle {
    /// Trailing (right) edge
    pub fn trailing_edge(&self, tuning: &Tuning) -> f32 {
        self.x + tuning.obstacle_width
    }

    /// Bottom of the gap, where the lower obstacle starts
    pub fn gap_bottom(&self, tuning: &Tuning) -> f32 {
        self.gap_top + tuning.gap
    }
}

/// Things that happened during a tick or trigger
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A new obstacle entered at the right edge
    Spawned { id: u32, gap_top: f32 },
    /// An obstacle was passed; `score` is the new total
    Scored { id: u32, score: u32 },
    /// An obstacle left the playfield
    Retired { id: u32 },
    /// The session ended
    Collided(Collision),
}

/// What ended the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// Hit the bottom edge
    Floor,
    /// Went above the top edge
    Ceiling,
    /// Hit the upper or lower part of an obstacle
    Obstacle { id: u32 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Player,
    /// Active obstacles, oldest-spawned first
    pub obstacles: Vec<Obstacle>,
    /// Score of the current (or last) session
    pub score: u32,
    /// Best score across sessions, including any value loaded at startup
    pub best_score: u32,
    /// Simulation ticks in the current session
    pub time_ticks: u64,
    /// Next obstacle ID
    next_id: u32,
}

impl GameState {
    /// Fresh state in the menu, carrying over a previously stored best score
    pub fn new(tuning: &Tuning, best_score: u32) -> Self {
        Self {
            phase: GamePhase::Menu,
            player: Player::centered(tuning),
            obstacles: Vec::new(),
            score: 0,
            best_score,
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Derived reward value (one point per ten best-score)
    pub fn points(&self) -> u32 {
        self.best_score / POINTS_PER_BEST
    }

    /// `Menu -> Playing`: reset the session
    ///
    /// Returns false (and changes nothing) from any other phase.
    pub fn start(&mut self, tuning: &Tuning) -> bool {
        if self.phase != GamePhase::Menu {
            log::debug!("Ignoring start in {:?}", self.phase);
            return false;
        }
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.player = Player::centered(tuning);
        self.obstacles.clear();
        self.time_ticks = 0;
        self.next_id = 1;
        true
    }

    /// `Playing -> GameOver`: fold the score into the best score
    ///
    /// Returns true when the best score was raised.
    pub fn end(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::GameOver;
        if self.score > self.best_score {
            self.best_score = self.score;
            true
        } else {
            false
        }
    }

    /// `GameOver -> Menu`
    pub fn return_to_menu(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            log::debug!("Ignoring return to menu in {:?}", self.phase);
            return false;
        }
        self.phase = GamePhase::Menu;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_menu() {
        let tuning = Tuning::default();
        let state = GameState::new(&tuning, 25);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.best_score, 25);
        assert_eq!(state.points(), 2);
        assert_eq!(state.player.y, 240.0);
    }

    #[test]
    fn test_start_resets_session() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 0);
        state.score = 4;
        state.player.y = 10.0;
        state.player.vel = 3.0;
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            x: 100.0,
            gap_top: 100.0,
            scored: false,
        });

        assert!(state.start(&tuning));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.player, Player::centered(&tuning));
        assert!(state.obstacles.is_empty());
        assert_eq!(state.next_entity_id(), 1);
    }

    #[test]
    fn test_no_direct_restart_from_game_over() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 0);
        assert!(state.start(&tuning));
        assert!(!state.start(&tuning));
        state.end();
        assert!(!state.start(&tuning));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.return_to_menu());
        assert!(state.start(&tuning));
    }

    #[test]
    fn test_end_raises_best_only_when_beaten() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 5);

        state.start(&tuning);
        state.score = 3;
        assert!(!state.end());
        assert_eq!(state.best_score, 5);

        state.return_to_menu();
        state.start(&tuning);
        state.score = 9;
        assert!(state.end());
        assert_eq!(state.best_score, 9);
    }

    #[test]
    fn test_return_to_menu_only_from_game_over() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 0);
        assert!(!state.return_to_menu());
        state.start(&tuning);
        assert!(!state.return_to_menu());
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
