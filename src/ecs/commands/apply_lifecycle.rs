use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::ecs::components::{FactionMember, SimEntity};
use crate::ecs::events::SimReactiveEvent;
use crate::ecs::resources::event_log::EventKind;

use super::applicator::ApplyCtx;

/// Remove an actor and everything referencing it. The despawn sweeps every
/// component; the entity-map entry and all relation entries go with it.
/// `killer` is carried into the death event when combat caused it.
pub(crate) fn apply_end_entity(
    ctx: &mut ApplyCtx,
    world: &mut World,
    entity: Entity,
    killer: Option<Entity>,
) {
    let Ok(entity_ref) = world.get_entity(entity) else {
        tracing::debug!(?entity, "EndEntity for already-removed actor, skipping");
        return;
    };
    let (sim_id, name) = entity_ref
        .get::<SimEntity>()
        .map_or((0, String::new()), |s| (s.id, s.name.clone()));
    let faction = entity_ref.get::<FactionMember>().map(|m| m.faction_id);

    world.despawn(entity);
    ctx.entity_map.remove(entity);
    ctx.relations.sweep(entity);

    let event_id = ctx.record_event(
        EventKind::Death { entity: sim_id },
        format!("{name} died"),
        serde_json::Value::Null,
    );
    ctx.emit(SimReactiveEvent::EntityDied {
        event_id,
        entity,
        killer,
        faction,
    });
}
