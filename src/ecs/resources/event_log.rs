use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};

/// The result surfaced to rendering/UI/logging collaborators after a melee
/// resolution. `hit = false` means the swing connected with nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackResult {
    pub hit: bool,
    pub damage: f64,
    pub killed: bool,
}

/// What happened, for the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    Attack {
        attacker: u64,
        target: u64,
        result: AttackResult,
    },
    Death {
        entity: u64,
    },
    StatusApplied {
        entity: u64,
        effect: crate::ecs::components::StatusEffectType,
    },
    RelationShift {
        holder: u64,
        target: u64,
        delta: f64,
    },
    Moved {
        entity: u64,
        x: i32,
        y: i32,
    },
}

/// One audit record. `data` carries structured detail for external
/// consumers (damage breakdowns, interaction names).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimEvent {
    pub id: u64,
    pub turn: u64,
    pub kind: EventKind,
    pub description: String,
    pub data: serde_json::Value,
}

/// Ordered audit log of everything the simulation did, per turn. The UI
/// collaborator drains it; tests assert determinism over it.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<SimEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
