use bevy_ecs::resource::Resource;

use crate::ecs::components::Position;

/// Walkability predicate supplied by the world-map collaborator. The
/// simulation core owns no tile state; it only asks.
pub trait Terrain: Send + Sync {
    fn is_walkable(&self, x: i32, y: i32) -> bool;
}

/// Injected terrain predicate resource. Defaults to an open field so the
/// core runs standalone in tests.
#[derive(Resource)]
pub struct TerrainOracle(pub Box<dyn Terrain>);

impl TerrainOracle {
    pub fn new(terrain: impl Terrain + 'static) -> Self {
        Self(Box::new(terrain))
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.0.is_walkable(pos.x, pos.y)
    }
}

impl Default for TerrainOracle {
    fn default() -> Self {
        Self::new(OpenField)
    }
}

/// Every tile walkable.
#[derive(Debug, Clone, Copy)]
pub struct OpenField;

impl Terrain for OpenField {
    fn is_walkable(&self, _x: i32, _y: i32) -> bool {
        true
    }
}

/// Rectangular walkable area, for tests and bounded arenas.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Terrain for Bounds {
    fn is_walkable(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_reject_outside_tiles() {
        let oracle = TerrainOracle::new(Bounds {
            min_x: 0,
            min_y: 0,
            max_x: 4,
            max_y: 4,
        });
        assert!(oracle.is_walkable(Position::new(0, 4)));
        assert!(!oracle.is_walkable(Position::new(5, 0)));
        assert!(!oracle.is_walkable(Position::new(-1, 2)));
    }
}
