use std::collections::BTreeMap;

use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;

/// Bidirectional mapping between simulation ids (u64) and Bevy entities.
///
/// External collaborators (UI, save system) refer to actors by sim id;
/// systems translate through this map. Entries are removed together with
/// the actor, so a stale sim id simply resolves to `None`.
#[derive(Resource, Debug, Clone, Default)]
pub struct SimEntityMap {
    to_bevy: BTreeMap<u64, Entity>,
    to_sim: BTreeMap<Entity, u64>,
}

impl SimEntityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mapping. Panics if the sim id is already registered —
    /// ids are never reused, so a collision is a programming bug.
    pub fn insert(&mut self, sim_id: u64, entity: Entity) {
        let prev = self.to_bevy.insert(sim_id, entity);
        assert!(prev.is_none(), "duplicate sim_id {sim_id} in SimEntityMap");
        self.to_sim.insert(entity, sim_id);
    }

    /// Remove the mapping for a despawned actor.
    pub fn remove(&mut self, entity: Entity) {
        if let Some(sim_id) = self.to_sim.remove(&entity) {
            self.to_bevy.remove(&sim_id);
        }
    }

    pub fn get_bevy(&self, sim_id: u64) -> Option<Entity> {
        self.to_bevy.get(&sim_id).copied()
    }

    pub fn get_sim(&self, entity: Entity) -> Option<u64> {
        self.to_sim.get(&entity).copied()
    }

    pub fn len(&self) -> usize {
        self.to_bevy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_bevy.is_empty()
    }
}
