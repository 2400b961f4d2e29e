//! Collision detection
//!
//! Everything is an axis-aligned box: the player, and the two halves of each
//! obstacle (above and below its gap). Screen coordinates, y grows downwards.

use glam::Vec2;

use super::state::{Collision, Obstacle, Player};
use crate::tuning::Tuning;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos, pos + size)
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Player bounding box
pub fn player_rect(player: &Player, tuning: &Tuning) -> Rect {
    Rect::from_pos_size(
        Vec2::new(tuning.player_x, player.y),
        Vec2::splat(tuning.player_size),
    )
}

/// Upper and lower boxes of an obstacle
pub fn obstacle_rects(obstacle: &Obstacle, tuning: &Tuning) -> (Rect, Rect) {
    let top = Rect::new(
        Vec2::new(obstacle.x, f32::NEG_INFINITY),
        Vec2::new(obstacle.trailing_edge(tuning), obstacle.gap_top),
    );
    let bottom = Rect::new(
        Vec2::new(obstacle.x, obstacle.gap_bottom(tuning)),
        Vec2::new(obstacle.trailing_edge(tuning), f32::INFINITY),
    );
    (top, bottom)
}

/// Check the player against the top and bottom of the playfield
pub fn check_bounds(player: &Player, tuning: &Tuning) -> Option<Collision> {
    if player.y >= tuning.floor() {
        Some(Collision::Floor)
    } else if player.y < 0.0 {
        Some(Collision::Ceiling)
    } else {
        None
    }
}

/// Check the player against a single obstacle
///
/// Only obstacles that overlap the player horizontally can hit. Within that
/// column the player must sit fully inside the gap.
pub fn check_obstacle(player: &Player, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    let body = player_rect(player, tuning);
    let (top, bottom) = obstacle_rects(obstacle, tuning);
    body.overlaps(&top) || body.overlaps(&bottom)
}

/// First collision of the tick, if any (bounds first, then obstacles in order)
pub fn detect(player: &Player, obstacles: &[Obstacle], tuning: &Tuning) -> Option<Collision> {
    if let Some(hit) = check_bounds(player, tuning) {
        return Some(hit);
    }
    obstacles
        .iter()
        .find(|o| check_obstacle(player, o, tuning))
        .map(|o| Collision::Obstacle { id: o.id })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle_at(x: f32, gap_top: f32) -> Obstacle {
        Obstacle {
            id: 1,
            x,
            gap_top,
            scored: false,
        }
    }

    #[test]
    fn test_rect_overlap_is_strict() {
        let a = Rect::from_pos_size(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::from_pos_size(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let c = Rect::from_pos_size(Vec2::new(5.0, 5.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_bounds() {
        let tuning = Tuning::default();
        assert_eq!(check_bounds(&Player { y: 100.0, vel: 0.0 }, &tuning), None);
        assert_eq!(
            check_bounds(&Player { y: 440.0, vel: 0.0 }, &tuning),
            Some(Collision::Floor)
        );
        assert_eq!(
            check_bounds(&Player { y: -0.1, vel: 0.0 }, &tuning),
            Some(Collision::Ceiling)
        );
        // Exactly at the top is still in bounds
        assert_eq!(check_bounds(&Player { y: 0.0, vel: 0.0 }, &tuning), None);
    }

    #[test]
    fn test_inside_gap_is_safe() {
        let tuning = Tuning::default();
        let obstacle = obstacle_at(tuning.player_x, 100.0);
        let player = Player { y: 150.0, vel: 0.0 };
        assert!(!check_obstacle(&player, &obstacle, &tuning));
    }

    #[test]
    fn test_hits_upper_and_lower_obstacle() {
        let tuning = Tuning::default();
        let obstacle = obstacle_at(tuning.player_x, 100.0);
        let above = Player { y: 99.0, vel: 0.0 };
        let below = Player { y: 201.0, vel: 0.0 };
        assert!(check_obstacle(&above, &obstacle, &tuning));
        assert!(check_obstacle(&below, &obstacle, &tuning));
    }

    #[test]
    fn test_no_hit_when_not_overlapping_horizontally() {
        let tuning = Tuning::default();
        // Left edge exactly at the player's right edge
        let ahead = obstacle_at(tuning.player_x + tuning.player_size, 100.0);
        // Trailing edge exactly at the player's left edge
        let behind = obstacle_at(tuning.player_x - tuning.obstacle_width, 100.0);
        let player = Player { y: 50.0, vel: 0.0 };
        assert!(!check_obstacle(&player, &ahead, &tuning));
        assert!(!check_obstacle(&player, &behind, &tuning));
    }

    #[test]
    fn test_detect_reports_first_obstacle() {
        let tuning = Tuning::default();
        let player = Player { y: 50.0, vel: 0.0 };
        let obstacles = vec![
            Obstacle {
                id: 4,
                ..obstacle_at(tuning.player_x, 100.0)
            },
            Obstacle {
                id: 5,
                ..obstacle_at(tuning.player_x + 10.0, 100.0)
            },
        ];
        assert_eq!(
            detect(&player, &obstacles, &tuning),
            Some(Collision::Obstacle { id: 4 })
        );
    }
}
