use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::ecs::components::{Position, SimEntity};
use crate::ecs::resources::TerrainOracle;
use crate::ecs::resources::event_log::EventKind;

use super::applicator::ApplyCtx;
use super::apply_combat;

/// Resolve a one-tile step. The terrain collaborator decides walkability;
/// occupancy comes from the live actor set. A pursuit step into a blocking
/// actor becomes an attack on it.
pub(crate) fn apply_move(
    ctx: &mut ApplyCtx,
    world: &mut World,
    entity: Entity,
    to: Position,
    attack_if_blocked: bool,
    description: &str,
) {
    if world.get_entity(entity).is_err() {
        tracing::debug!(?entity, "move for already-removed actor, skipping");
        return;
    }

    if let Some(blocker) = apply_combat::occupant_at(world, to.x, to.y, entity) {
        if attack_if_blocked {
            let _ = apply_combat::resolve_melee(ctx, world, entity, blocker);
        }
        return;
    }

    let walkable = world
        .get_resource::<TerrainOracle>()
        .is_none_or(|oracle| oracle.is_walkable(to));
    if !walkable {
        return;
    }

    let sim_id = world.get::<SimEntity>(entity).map_or(0, |s| s.id);
    if let Some(mut pos) = world.get_mut::<Position>(entity) {
        *pos = to;
        ctx.record_event(
            EventKind::Moved {
                entity: sim_id,
                x: to.x,
                y: to.y,
            },
            description,
            serde_json::Value::Null,
        );
    }
}
