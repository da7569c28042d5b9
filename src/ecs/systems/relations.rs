//! Relation fallout from combat, plus the faction-wide broadcast.
//!
//! Runs in `SimPhase::Reactions`, after the applicator has resolved the
//! turn's combat — the last step of the per-turn order.

use bevy_app::{App, Plugin};
use bevy_ecs::entity::Entity;
use bevy_ecs::message::MessageReader;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res, ResMut};
use bevy_ecs::world::World;

use crate::ecs::clock::TurnClock;
use crate::ecs::components::{FactionMember, SimEntity};
use crate::ecs::events::SimReactiveEvent;
use crate::ecs::resources::event_log::{EventKind, SimEvent};
use crate::ecs::resources::{EcsIdGenerator, EventLog, FactionId, RelationMap};
use crate::ecs::schedule::{SimPhase, SimTick};

// ---------------------------------------------------------------------------
// Relation deltas
// ---------------------------------------------------------------------------
/// How much a victim's view of its attacker worsens per hit.
const ATTACKED_RELATION_PENALTY: f64 = -10.0;
/// Broadcast penalty to a victim's whole faction when one of them is killed.
const KILL_FACTION_RELATION_PENALTY: f64 = -5.0;
/// Share of a faction-wide delta applied to the actor's own reputation
/// when the actor is a co-member of the affected faction.
const CO_MEMBER_REPUTATION_FACTOR: f64 = 0.1;

// ---------------------------------------------------------------------------
// Plugin registration
// ---------------------------------------------------------------------------

pub struct RelationsPlugin;

impl Plugin for RelationsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(SimTick, handle_combat_events.in_set(SimPhase::Reactions));
    }
}

// ---------------------------------------------------------------------------
// Faction-wide broadcast
// ---------------------------------------------------------------------------

/// Append a `RelationShift` audit entry.
fn record_shift(
    event_log: &mut EventLog,
    id_gen: &mut EcsIdGenerator,
    turn: u64,
    holder: u64,
    target: u64,
    delta: f64,
) {
    event_log.events.push(SimEvent {
        id: id_gen.0.next_id(),
        turn,
        kind: EventKind::RelationShift {
            holder,
            target,
            delta,
        },
        description: format!("relation shifted by {delta}"),
        data: serde_json::Value::Null,
    });
}

#[allow(clippy::too_many_arguments)]
fn broadcast(
    relations: &mut RelationMap,
    members: &mut Query<(Entity, &mut FactionMember)>,
    identities: &Query<&SimEntity>,
    event_log: &mut EventLog,
    id_gen: &mut EcsIdGenerator,
    turn: u64,
    actor: Entity,
    faction: FactionId,
    delta: f64,
) {
    let actor_id = identities.get(actor).map_or(0, |s| s.id);
    for (member, membership) in members.iter() {
        if membership.faction_id != faction || member == actor {
            continue;
        }
        relations.init_and_adjust(member, actor, delta);
        let member_id = identities.get(member).map_or(0, |s| s.id);
        record_shift(event_log, id_gen, turn, member_id, actor_id, delta);
    }
    // Co-members take the actor's conduct personally.
    if let Ok((_, mut membership)) = members.get_mut(actor)
        && membership.faction_id == faction
    {
        membership.reputation += delta * CO_MEMBER_REPUTATION_FACTOR;
    }
}

/// Broadcast a relation delta from `actor` to every member of `faction`,
/// nudging the actor's own reputation when it is a co-member. Exposed for
/// the game loop (quest outcomes, theft witnessed by a guard).
pub fn apply_faction_wide_relation(
    world: &mut World,
    actor: Entity,
    faction: FactionId,
    delta: f64,
) {
    let turn = world.resource::<TurnClock>().turn;
    let actor_id = world.get::<SimEntity>(actor).map_or(0, |s| s.id);

    let mut shifted: Vec<u64> = Vec::new();
    world.resource_scope(|world, mut relations: bevy_ecs::world::Mut<RelationMap>| {
        let mut members = world.query::<(Entity, &mut FactionMember, Option<&SimEntity>)>();
        for (member, mut membership, identity) in members.iter_mut(world) {
            if membership.faction_id != faction {
                continue;
            }
            if member == actor {
                membership.reputation += delta * CO_MEMBER_REPUTATION_FACTOR;
                continue;
            }
            relations.init_and_adjust(member, actor, delta);
            shifted.push(identity.map_or(0, |s| s.id));
        }
    });

    if shifted.is_empty() {
        return;
    }
    world.resource_scope(|world, mut event_log: bevy_ecs::world::Mut<EventLog>| {
        let mut id_gen = world.resource_mut::<EcsIdGenerator>();
        for member_id in shifted {
            record_shift(&mut event_log, &mut id_gen, turn, member_id, actor_id, delta);
        }
    });
}

// ---------------------------------------------------------------------------
// System: combat fallout (SimPhase::Reactions)
// ---------------------------------------------------------------------------

fn handle_combat_events(
    mut events: MessageReader<SimReactiveEvent>,
    mut relations: ResMut<RelationMap>,
    mut members: Query<(Entity, &mut FactionMember)>,
    identities: Query<&SimEntity>,
    mut event_log: ResMut<EventLog>,
    mut id_gen: ResMut<EcsIdGenerator>,
    clock: Res<TurnClock>,
) {
    for event in events.read() {
        match event {
            SimReactiveEvent::Attacked {
                attacker,
                target,
                damage,
                killed,
                ..
            } => {
                // A dead victim was already swept from the relation map;
                // reviving the pair here would leave a dangling entry. A
                // dodged swing drew no blood and earns no grudge.
                if *killed || *damage <= 0.0 {
                    continue;
                }
                // First offenses initialize the pair; grudges need ground
                // truth to accumulate on.
                relations.init_and_adjust(*target, *attacker, ATTACKED_RELATION_PENALTY);
                let holder = identities.get(*target).map_or(0, |s| s.id);
                let offender = identities.get(*attacker).map_or(0, |s| s.id);
                record_shift(
                    &mut event_log,
                    &mut id_gen,
                    clock.turn,
                    holder,
                    offender,
                    ATTACKED_RELATION_PENALTY,
                );
            }
            SimReactiveEvent::EntityDied {
                killer: Some(killer),
                faction: Some(faction),
                ..
            } => {
                broadcast(
                    &mut relations,
                    &mut members,
                    &identities,
                    &mut event_log,
                    &mut id_gen,
                    clock.turn,
                    *killer,
                    *faction,
                    KILL_FACTION_RELATION_PENALTY,
                );
            }
            _ => {}
        }
    }
}
