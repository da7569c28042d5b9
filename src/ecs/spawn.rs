use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::ecs::components::{
    Actor, Ai, ElementalAttack, ElementalResistances, EquipmentWeight, Health, Position,
    SimEntity, StatModifiers, Stats, StatusEffects,
};
use crate::ecs::resources::{RelationMap, SimEntityMap};

fn register(world: &mut World, id: u64, entity: Entity) {
    // Graceful when SimEntityMap is temporarily removed from the world
    // (the command applicator extracts it while applying lifecycle
    // commands and handles registration itself).
    if let Some(mut map) = world.get_resource_mut::<SimEntityMap>() {
        map.insert(id, entity);
    }
}

/// Spawn a live actor with the full combat component set. Resistances,
/// elemental attack entries, and AI are attachable afterwards via
/// `world.entity_mut(e).insert(..)`.
pub fn spawn_actor(
    world: &mut World,
    id: u64,
    name: String,
    position: Position,
    stats: Stats,
    health: Health,
) -> Entity {
    let entity = world
        .spawn((
            SimEntity { id, name },
            Actor,
            position,
            stats,
            health,
            StatModifiers::default(),
            StatusEffects::default(),
            ElementalResistances::default(),
            ElementalAttack::default(),
            EquipmentWeight::default(),
        ))
        .id();
    register(world, id, entity);
    entity
}

/// Spawn an AI-driven actor.
pub fn spawn_npc(
    world: &mut World,
    id: u64,
    name: String,
    position: Position,
    stats: Stats,
    health: Health,
    ai: Ai,
) -> Entity {
    let entity = spawn_actor(world, id, name, position, stats, health);
    world.entity_mut(entity).insert(ai);
    entity
}

/// Remove an actor and everything that references it: every component (the
/// despawn sweeps all of them), its sim-id mapping, and every relation
/// entry naming it on either side. A component or relation existing for a
/// removed actor is a correctness bug.
pub fn despawn_actor(world: &mut World, entity: Entity) {
    world.despawn(entity);
    if let Some(mut map) = world.get_resource_mut::<SimEntityMap>() {
        map.remove(entity);
    }
    if let Some(mut relations) = world.get_resource_mut::<RelationMap>() {
        relations.sweep(entity);
    }
}
