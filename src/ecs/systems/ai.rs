//! AI decision system.
//!
//! One FSM pass per non-player actor per turn. Priority order is the
//! contract and must not be reordered: faction hostility over disposition
//! thresholds, flee over pursue/attack, pursue/attack over patrol, patrol
//! over idle. Decisions are emitted as commands; the PostUpdate applicator
//! resolves them against terrain and occupancy.

use bevy_app::{App, Plugin};
use bevy_ecs::entity::Entity;
use bevy_ecs::message::MessageWriter;
use bevy_ecs::query::{With, Without};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res, ResMut};
use rand::Rng;
use rand::rngs::SmallRng;

use crate::ecs::commands::{SimCommand, SimCommandKind};
use crate::ecs::components::{
    Actor, Ai, AiState, Disposition, FactionMember, Health, IsPlayer, Position, StatusEffects,
};
use crate::ecs::resources::factions::should_attack_faction;
use crate::ecs::resources::{AiRng, FactionRegistry, RelationMap, StatusRng};
use crate::ecs::schedule::{DomainSet, SimTick};
use crate::ecs::systems::status::should_skip_turn;

// ---------------------------------------------------------------------------
// Disposition relation thresholds (attack when relation falls below;
// hostile attacks at or below — it attacks unless relation is clearly
// positive)
// ---------------------------------------------------------------------------
const NEUTRAL_ATTACK_BELOW: f64 = -20.0;
const DEFENSIVE_ATTACK_BELOW: f64 = -40.0;
const AGGRESSIVE_ATTACK_BELOW: f64 = 0.0;
const HOSTILE_ATTACK_AT_OR_BELOW: f64 = 10.0;
const PATROL_ATTACK_BELOW: f64 = -10.0;

// ---------------------------------------------------------------------------
// Movement tuning
// ---------------------------------------------------------------------------
/// Adjacency bound; at or under this the actor attacks instead of stepping.
const MELEE_RANGE: f64 = 1.0;
/// Health fraction under which an engaged actor prefers retreat.
const FLEE_HEALTH_FRACTION: f64 = 0.25;
/// Below this gap a retreat-preferring actor cannot disengage safely and
/// fights instead.
const SAFE_RETREAT_DISTANCE: f64 = 1.5;
/// Chance per turn of a patrol step.
const PATROL_STEP_CHANCE: f64 = 0.3;
/// Chance per turn of an idle wander step.
const WANDER_CHANCE: f64 = 0.1;

// ---------------------------------------------------------------------------
// Plugin registration
// ---------------------------------------------------------------------------

pub struct AiPlugin;

impl Plugin for AiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(SimTick, ai_decide.in_set(DomainSet::Ai));
    }
}

// ---------------------------------------------------------------------------
// Hostility resolution
// ---------------------------------------------------------------------------

/// Disposition-specific relation threshold, used when at least one side
/// carries no faction.
fn disposition_attacks(disposition: Disposition, relation: f64) -> bool {
    match disposition {
        Disposition::Peaceful | Disposition::Fleeing => false,
        Disposition::Neutral => relation < NEUTRAL_ATTACK_BELOW,
        Disposition::Defensive => relation < DEFENSIVE_ATTACK_BELOW,
        Disposition::Aggressive => relation < AGGRESSIVE_ATTACK_BELOW,
        Disposition::Hostile => relation <= HOSTILE_ATTACK_AT_OR_BELOW,
        Disposition::Patrol => relation < PATROL_ATTACK_BELOW,
    }
}

/// Whether `me` should attack `other`. The faction check takes priority
/// over the disposition threshold when both sides carry factions.
pub fn should_attack(
    registry: &FactionRegistry,
    relations: &RelationMap,
    me: Entity,
    my_faction: Option<&FactionMember>,
    my_disposition: Disposition,
    other: Entity,
    other_faction: Option<&FactionMember>,
) -> bool {
    let relation = relations.score_or_default(me, other);
    match (my_faction, other_faction) {
        (Some(mine), Some(theirs)) => should_attack_faction(
            registry,
            Some(mine.faction_id),
            Some(theirs.faction_id),
            relation,
        ),
        _ => disposition_attacks(my_disposition, relation),
    }
}

// ---------------------------------------------------------------------------
// System: one decision per non-player actor per turn (DomainSet::Ai)
// ---------------------------------------------------------------------------

#[allow(clippy::type_complexity)]
fn ai_decide(
    mut deciders: Query<
        (
            Entity,
            &Position,
            &mut Ai,
            &Health,
            &StatusEffects,
            Option<&FactionMember>,
        ),
        (With<Actor>, Without<IsPlayer>),
    >,
    candidates: Query<(Entity, &Position, Option<&FactionMember>), With<Actor>>,
    registry: Res<FactionRegistry>,
    relations: Res<RelationMap>,
    mut ai_rng: ResMut<AiRng>,
    mut status_rng: ResMut<StatusRng>,
    mut commands: MessageWriter<SimCommand>,
) {
    for (entity, pos, mut ai, health, effects, faction) in deciders.iter_mut() {
        // Exactly one skip query per decision point; shock re-rolls here
        // and nowhere else for this actor this turn.
        if should_skip_turn(effects, &mut status_rng.0) {
            continue;
        }

        let mut target = acquire_target(
            &candidates,
            &registry,
            &relations,
            entity,
            *pos,
            &ai,
            faction,
        );
        // A fleeing disposition treats any nearby actor as a threat to run
        // from, even though it never attacks anyone.
        if target.is_none() && ai.disposition == Disposition::Fleeing {
            target = nearest_actor(&candidates, entity, *pos, ai.detection_range);
        }

        if let Some((target_entity, target_pos, distance)) = target {
            ai.target = Some(target_entity);

            // A fleeing disposition always runs; a wounded actor only runs
            // while the gap is still wide enough to disengage — cornered,
            // it fights.
            let flee_move = ai.disposition == Disposition::Fleeing
                || (health.current < FLEE_HEALTH_FRACTION * health.max
                    && distance > SAFE_RETREAT_DISTANCE);

            if flee_move {
                ai.state = AiState::Fleeing;
                commands.write(SimCommand::new(
                    SimCommandKind::Move {
                        entity,
                        to: pos.step_away(target_pos),
                        attack_if_blocked: false,
                    },
                    "fleeing",
                ));
            } else if distance > MELEE_RANGE {
                ai.state = AiState::Pursuing;
                commands.write(SimCommand::new(
                    SimCommandKind::Move {
                        entity,
                        to: pos.step_toward(target_pos),
                        attack_if_blocked: true,
                    },
                    "pursuing",
                ));
            } else {
                ai.state = AiState::Attacking;
                commands.write(SimCommand::new(
                    SimCommandKind::Attack {
                        attacker: entity,
                        x: target_pos.x,
                        y: target_pos.y,
                    },
                    "attacking",
                ));
            }
            continue;
        }

        ai.target = None;
        if ai.disposition == Disposition::Patrol {
            ai.state = AiState::Patrolling;
            random_step(entity, *pos, PATROL_STEP_CHANCE, &mut ai_rng.0, &mut commands);
        } else {
            ai.state = AiState::Idle;
            random_step(entity, *pos, WANDER_CHANCE, &mut ai_rng.0, &mut commands);
        }
    }
}

/// Keep a still-valid hostile target, otherwise the nearest hostile actor
/// within detection range. Ties break on entity order so a fixed world
/// state always acquires the same target.
fn acquire_target(
    candidates: &Query<(Entity, &Position, Option<&FactionMember>), With<Actor>>,
    registry: &FactionRegistry,
    relations: &RelationMap,
    me: Entity,
    my_pos: Position,
    ai: &Ai,
    my_faction: Option<&FactionMember>,
) -> Option<(Entity, Position, f64)> {
    let hostile_in_range = |other: Entity, other_pos: &Position, other_faction: Option<&FactionMember>| {
        let distance = my_pos.distance_to(*other_pos);
        (distance <= ai.detection_range
            && should_attack(
                registry,
                relations,
                me,
                my_faction,
                ai.disposition,
                other,
                other_faction,
            ))
        .then_some(distance)
    };

    if let Some(current) = ai.target
        && let Ok((other, other_pos, other_faction)) = candidates.get(current)
        && let Some(distance) = hostile_in_range(other, other_pos, other_faction)
    {
        return Some((current, *other_pos, distance));
    }

    candidates
        .iter()
        .filter(|(other, _, _)| *other != me)
        .filter_map(|(other, other_pos, other_faction)| {
            hostile_in_range(other, other_pos, other_faction)
                .map(|distance| (other, *other_pos, distance))
        })
        .min_by(|a, b| a.2.total_cmp(&b.2).then(a.0.cmp(&b.0)))
}

/// Nearest other actor within `range`, hostile or not.
fn nearest_actor(
    candidates: &Query<(Entity, &Position, Option<&FactionMember>), With<Actor>>,
    me: Entity,
    my_pos: Position,
    range: f64,
) -> Option<(Entity, Position, f64)> {
    candidates
        .iter()
        .filter(|(other, _, _)| *other != me)
        .filter_map(|(other, other_pos, _)| {
            let distance = my_pos.distance_to(*other_pos);
            (distance <= range).then_some((other, *other_pos, distance))
        })
        .min_by(|a, b| a.2.total_cmp(&b.2).then(a.0.cmp(&b.0)))
}

/// Emit a random one-tile step with probability `chance`.
fn random_step(
    entity: Entity,
    pos: Position,
    chance: f64,
    rng: &mut SmallRng,
    commands: &mut MessageWriter<SimCommand>,
) {
    if rng.random_range(0.0..1.0) >= chance {
        return;
    }
    let dx = rng.random_range(-1..=1);
    let dy = rng.random_range(-1..=1);
    if dx == 0 && dy == 0 {
        return;
    }
    commands.write(SimCommand::new(
        SimCommandKind::Move {
            entity,
            to: Position::new(pos.x + dx, pos.y + dy),
            attack_if_blocked: false,
        },
        "wandering",
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peaceful_and_fleeing_never_attack_on_disposition() {
        assert!(!disposition_attacks(Disposition::Peaceful, -100.0));
        assert!(!disposition_attacks(Disposition::Fleeing, -100.0));
    }

    #[test]
    fn hostile_attacks_unless_clearly_positive() {
        assert!(disposition_attacks(Disposition::Hostile, 0.0));
        assert!(disposition_attacks(Disposition::Hostile, 10.0));
        assert!(!disposition_attacks(Disposition::Hostile, 11.0));
    }

    #[test]
    fn threshold_ladder() {
        assert!(disposition_attacks(Disposition::Neutral, -21.0));
        assert!(!disposition_attacks(Disposition::Neutral, -20.0));
        assert!(disposition_attacks(Disposition::Defensive, -41.0));
        assert!(!disposition_attacks(Disposition::Defensive, -40.0));
        assert!(disposition_attacks(Disposition::Aggressive, -0.1));
        assert!(!disposition_attacks(Disposition::Aggressive, 0.0));
        assert!(disposition_attacks(Disposition::Patrol, -11.0));
        assert!(!disposition_attacks(Disposition::Patrol, -10.0));
    }
}
