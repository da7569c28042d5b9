pub mod entity_map;
pub mod event_log;
pub mod factions;
pub mod relations;
pub mod sim_resources;
pub mod terrain;

pub use entity_map::SimEntityMap;
pub use event_log::{AttackResult, EventKind, EventLog, SimEvent};
pub use factions::{
    FactionId, FactionInfo, FactionRegistry, should_attack_faction,
};
pub use relations::{RelationData, RelationMap};
pub use sim_resources::{AiRng, CombatRng, EcsIdGenerator, SimRng, StatusRng, distribute_rng};
pub use terrain::{Bounds, OpenField, Terrain, TerrainOracle};
