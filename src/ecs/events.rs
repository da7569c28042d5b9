use bevy_ecs::entity::Entity;
use bevy_ecs::message::Message;

/// Reactive events emitted by the command applicator for cross-system
/// reactions (relation fallout from combat, UI hooks).
///
/// Each variant carries the `event_id` of the EventLog entry that caused
/// it, so consumers can follow the causal chain.
#[derive(Message, Clone, Debug)]
pub enum SimReactiveEvent {
    Attacked {
        event_id: u64,
        attacker: Entity,
        target: Entity,
        damage: f64,
        killed: bool,
    },
    StatusInflicted {
        event_id: u64,
        target: Entity,
        effect: crate::ecs::components::StatusEffectType,
    },
    EntityDied {
        event_id: u64,
        entity: Entity,
        killer: Option<Entity>,
        /// Faction the victim belonged to, captured before the despawn
        /// sweep so Reactions-phase handlers can still see it.
        faction: Option<crate::ecs::resources::FactionId>,
    },
}
