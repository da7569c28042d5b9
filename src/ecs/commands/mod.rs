pub mod applicator;
mod apply_combat;
mod apply_lifecycle;
mod apply_move;

use bevy_ecs::entity::Entity;
use bevy_ecs::message::Message;

use crate::ecs::components::Position;

pub use applicator::apply_sim_commands;
pub use apply_combat::melee_attack;

/// A command describing an intended state change in the simulation.
///
/// Decision systems emit these via `MessageWriter<SimCommand>`. The
/// centralized applicator in `SimPhase::PostUpdate` processes them:
/// applies the change, records an `EventLog` entry, and emits
/// `SimReactiveEvent` messages for the Reactions phase.
#[derive(Message, Clone, Debug)]
pub struct SimCommand {
    pub kind: SimCommandKind,
    /// Human-readable description for the EventLog.
    pub description: String,
}

impl SimCommand {
    pub fn new(kind: SimCommandKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }
}

/// All possible state-change intents.
#[derive(Clone, Copy, Debug)]
pub enum SimCommandKind {
    /// Step one tile. With `attack_if_blocked` (pursuit steps), a
    /// destination occupied by a blocking actor resolves as an attack on
    /// that actor instead of movement; otherwise the step is dropped.
    Move {
        entity: Entity,
        to: Position,
        attack_if_blocked: bool,
    },
    /// Melee attack against whatever occupies the target tile.
    Attack { attacker: Entity, x: i32, y: i32 },
    /// Remove an actor from the simulation (death from status damage).
    EndEntity { entity: Entity },
}
