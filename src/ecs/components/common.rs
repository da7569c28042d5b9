use bevy_ecs::component::Component;
use serde::{Deserialize, Serialize};

/// Core identity component present on every ECS entity that maps to a
/// simulation actor.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct SimEntity {
    pub id: u64,
    pub name: String,
}

/// Tile position. Owned by the simulation core only for distance checks and
/// one-tile steps; the world map itself is an external collaborator.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another tile.
    pub fn distance_to(&self, other: Position) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }

    /// The adjacent tile one step toward `target` (sign of each axis delta).
    pub fn step_toward(&self, target: Position) -> Position {
        Position {
            x: self.x + (target.x - self.x).signum(),
            y: self.y + (target.y - self.y).signum(),
        }
    }

    /// The adjacent tile one step directly away from `target`.
    pub fn step_away(&self, target: Position) -> Position {
        Position {
            x: self.x - (target.x - self.x).signum(),
            y: self.y - (target.y - self.y).signum(),
        }
    }
}

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

/// Marks a live actor. Actors occupy their tile and block movement through it.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Actor;

/// Marks the player-controlled actor. The AI decision system skips it; the
/// game loop drives it directly.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct IsPlayer;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0, 0);
        assert_eq!(a.distance_to(Position::new(3, 4)), 5.0);
        assert_eq!(a.distance_to(Position::new(1, 0)), 1.0);
    }

    #[test]
    fn step_toward_moves_one_tile_per_axis() {
        let a = Position::new(0, 0);
        assert_eq!(a.step_toward(Position::new(5, -3)), Position::new(1, -1));
        assert_eq!(a.step_toward(Position::new(0, 2)), Position::new(0, 1));
        assert_eq!(a.step_toward(a), a);
    }

    #[test]
    fn step_away_mirrors_step_toward() {
        let a = Position::new(2, 2);
        assert_eq!(a.step_away(Position::new(5, 2)), Position::new(1, 2));
        assert_eq!(a.step_away(Position::new(0, 0)), Position::new(3, 3));
    }
}
