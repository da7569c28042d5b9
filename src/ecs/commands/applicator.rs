use bevy_ecs::message::Messages;
use bevy_ecs::world::World;
use rand::rngs::SmallRng;

use crate::ecs::clock::TurnClock;
use crate::ecs::events::SimReactiveEvent;
use crate::ecs::resources::event_log::{EventKind, SimEvent};
use crate::ecs::resources::{CombatRng, EcsIdGenerator, EventLog, RelationMap, SimEntityMap};

use super::{SimCommand, SimCommandKind};
use super::apply_combat;
use super::apply_lifecycle;
use super::apply_move;

/// Context passed to all `apply_*` sub-functions, providing mutable access
/// to the resources they need without holding borrows on the `World`.
pub(crate) struct ApplyCtx {
    pub event_log: EventLog,
    pub id_gen: EcsIdGenerator,
    pub entity_map: SimEntityMap,
    pub relations: RelationMap,
    pub combat_rng: SmallRng,
    pub turn: u64,
    pub reactive_events: Vec<SimReactiveEvent>,
    /// True when applying inside a running turn, i.e. before this turn's
    /// status aging pass. Freshly inflicted effects then get one extra
    /// duration point so that pass does not consume a tick they never had.
    pub mid_turn: bool,
}

impl ApplyCtx {
    /// Pull the shared resources out of the world. `restore` must follow
    /// before anything else reads them.
    pub(crate) fn extract(world: &mut World) -> Self {
        let turn = world.resource::<TurnClock>().turn;
        let event_log = world.remove_resource::<EventLog>().unwrap_or_default();
        let id_gen = world.remove_resource::<EcsIdGenerator>().unwrap_or_default();
        let entity_map = world.remove_resource::<SimEntityMap>().unwrap_or_default();
        let relations = world.remove_resource::<RelationMap>().unwrap_or_default();
        let combat_rng = world
            .remove_resource::<CombatRng>()
            .unwrap_or_default()
            .0;
        Self {
            event_log,
            id_gen,
            entity_map,
            relations,
            combat_rng,
            turn,
            reactive_events: Vec::new(),
            mid_turn: false,
        }
    }

    /// Put the resources back and publish queued reactive events.
    pub(crate) fn restore(self, world: &mut World) {
        world.insert_resource(self.event_log);
        world.insert_resource(self.id_gen);
        world.insert_resource(self.entity_map);
        world.insert_resource(self.relations);
        world.insert_resource(CombatRng(self.combat_rng));
        if let Some(mut messages) = world.get_resource_mut::<Messages<SimReactiveEvent>>() {
            for event in self.reactive_events {
                messages.write(event);
            }
        }
    }

    /// Record an audit entry and return its event id.
    pub(crate) fn record_event(
        &mut self,
        kind: EventKind,
        description: impl Into<String>,
        data: serde_json::Value,
    ) -> u64 {
        let event_id = self.id_gen.0.next_id();
        self.event_log.events.push(SimEvent {
            id: event_id,
            turn: self.turn,
            kind,
            description: description.into(),
            data,
        });
        event_id
    }

    /// Queue a reactive event for emission after all commands are applied.
    pub(crate) fn emit(&mut self, event: SimReactiveEvent) {
        self.reactive_events.push(event);
    }
}

/// Exclusive system that drains all pending `SimCommand` messages, applies
/// state changes, records the audit trail, and emits `SimReactiveEvent`
/// messages for the Reactions phase.
///
/// Runs in `SimPhase::PostUpdate`. Commands referencing actors that died
/// earlier in the drain are silently skipped — missing data is not
/// exceptional here.
pub fn apply_sim_commands(world: &mut World) {
    let commands: Vec<SimCommand> = {
        let Some(mut messages) = world.get_resource_mut::<Messages<SimCommand>>() else {
            return;
        };
        messages.drain().collect()
    };

    if commands.is_empty() {
        return;
    }

    let mut ctx = ApplyCtx::extract(world);
    ctx.mid_turn = true;

    for cmd in &commands {
        match cmd.kind {
            SimCommandKind::Move {
                entity,
                to,
                attack_if_blocked,
            } => {
                apply_move::apply_move(
                    &mut ctx,
                    world,
                    entity,
                    to,
                    attack_if_blocked,
                    &cmd.description,
                );
            }
            SimCommandKind::Attack { attacker, x, y } => {
                apply_combat::apply_attack(&mut ctx, world, attacker, x, y);
            }
            SimCommandKind::EndEntity { entity } => {
                apply_lifecycle::apply_end_entity(&mut ctx, world, entity, None);
            }
        }
    }

    ctx.restore(world);
}
