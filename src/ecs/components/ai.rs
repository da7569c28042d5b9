use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;
use serde::{Deserialize, Serialize};

/// Fixed behavioral archetype, chosen at spawn and never mutated by the
/// decision system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disposition {
    Peaceful,
    Neutral,
    Defensive,
    Aggressive,
    Hostile,
    Patrol,
    Fleeing,
}

/// Live FSM state, rewritten every tick by the decision system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    Idle,
    Pursuing,
    Attacking,
    Fleeing,
    Patrolling,
}

/// Decision state for a non-player actor.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Ai {
    pub disposition: Disposition,
    pub detection_range: f64,
    pub state: AiState,
    #[serde(skip)]
    pub target: Option<Entity>,
}

impl Ai {
    pub fn new(disposition: Disposition, detection_range: f64) -> Self {
        Self {
            disposition,
            detection_range,
            state: AiState::Idle,
            target: None,
        }
    }
}
