use bevy_ecs::entity::Entity;
use bevy_ecs::query::With;
use bevy_ecs::world::World;

use crate::ecs::components::{
    Actor, BaseStat, ElementalAttack, ElementalResistances, EquipmentWeight, Health, Position,
    SimEntity, StatId, StatModifiers, Stats, StatusEffectType, StatusEffects,
};
use crate::ecs::events::SimReactiveEvent;
use crate::ecs::resources::event_log::{AttackResult, EventKind};
use crate::ecs::systems::elemental;
use crate::ecs::systems::stats::{
    effective_defense, effective_dodge, effective_stat, effective_strength,
};

use super::applicator::ApplyCtx;
use super::apply_lifecycle;

/// Melee always connects for at least this much once it hits.
const MELEE_MIN_DAMAGE: f64 = 1.0;
/// Accuracy multiplier while the attacker is blinded.
const BLINDED_ACCURACY_MULT: f64 = 0.5;

/// The blocking actor occupying a tile, if any. Deterministic for a fixed
/// world state.
pub(crate) fn occupant_at(
    world: &mut World,
    x: i32,
    y: i32,
    exclude: Entity,
) -> Option<Entity> {
    let mut query = world.query_filtered::<(Entity, &Position), With<Actor>>();
    query
        .iter(world)
        .find(|(e, pos)| *e != exclude && pos.x == x && pos.y == y)
        .map(|(e, _)| e)
}

/// Combat entry point: melee attack by `attacker` against whatever occupies
/// the target tile. `None` means no combat occurred — the tile is empty,
/// holds only the attacker, or one side has no stat block.
pub fn melee_attack(world: &mut World, attacker: Entity, x: i32, y: i32) -> Option<AttackResult> {
    let mut ctx = ApplyCtx::extract(world);
    let result = attack_tile(&mut ctx, world, attacker, x, y);
    ctx.restore(world);
    result
}

/// Applicator entry for a queued `Attack` command.
pub(crate) fn apply_attack(ctx: &mut ApplyCtx, world: &mut World, attacker: Entity, x: i32, y: i32) {
    attack_tile(ctx, world, attacker, x, y);
}

pub(crate) fn attack_tile(
    ctx: &mut ApplyCtx,
    world: &mut World,
    attacker: Entity,
    x: i32,
    y: i32,
) -> Option<AttackResult> {
    let target = occupant_at(world, x, y, attacker)?;
    resolve_melee(ctx, world, attacker, target)
}

/// Full melee resolution: deterministic hit check, melee damage through
/// defense, every carried elemental damage through resistances,
/// interactions, and status procs. The proc roll is the only randomness
/// on this path.
pub(crate) fn resolve_melee(
    ctx: &mut ApplyCtx,
    world: &mut World,
    attacker: Entity,
    target: Entity,
) -> Option<AttackResult> {
    let (Some(atk_stats), Some(def_stats)) =
        (world.get::<Stats>(attacker).copied(), world.get::<Stats>(target).copied())
    else {
        tracing::debug!(?attacker, ?target, "melee between statless actors, skipping");
        return None;
    };
    let atk_mods = world.get::<StatModifiers>(attacker).cloned().unwrap_or_default();
    let atk_effects = world.get::<StatusEffects>(attacker).cloned().unwrap_or_default();
    let atk_elemental = world.get::<ElementalAttack>(attacker).cloned().unwrap_or_default();
    let atk_id = world.get::<SimEntity>(attacker).map_or(0, |s| s.id);

    let def_mods = world.get::<StatModifiers>(target).cloned().unwrap_or_default();
    let def_weight = world.get::<EquipmentWeight>(target).map_or(0.0, |w| w.0);
    let def_resistances = world
        .get::<ElementalResistances>(target)
        .cloned()
        .unwrap_or_default();
    let def_effects = world.get::<StatusEffects>(target).cloned().unwrap_or_default();
    let def_id = world.get::<SimEntity>(target).map_or(0, |s| s.id);

    // Deterministic hit check: attacker accuracy (dexterity, halved while
    // blinded) against the defender's effective dodge.
    let mut accuracy = effective_stat(&atk_stats, &atk_mods, 0.0, StatId::Base(BaseStat::Dexterity));
    if atk_effects.has(StatusEffectType::Blinded) {
        accuracy *= BLINDED_ACCURACY_MULT;
    }
    let dodge = effective_dodge(&def_stats, &def_mods, def_weight);

    if accuracy < dodge {
        let result = AttackResult {
            hit: false,
            damage: 0.0,
            killed: false,
        };
        let event_id = ctx.record_event(
            EventKind::Attack {
                attacker: atk_id,
                target: def_id,
                result,
            },
            "attack missed",
            serde_json::Value::Null,
        );
        ctx.emit(SimReactiveEvent::Attacked {
            event_id,
            attacker,
            target,
            damage: 0.0,
            killed: false,
        });
        return Some(result);
    }

    let melee_damage = (effective_strength(&atk_stats, &atk_mods)
        - effective_defense(&def_stats, &def_mods, def_weight))
        .max(MELEE_MIN_DAMAGE);

    let (results, queued_effects) = elemental::apply_all_elemental_damages(
        &atk_elemental,
        &def_resistances,
        &def_effects,
        &mut ctx.combat_rng,
    );
    let total = melee_damage + elemental::total_damage(&results);

    // Queue procced and interaction-born effects on the target.
    if let Some(mut effects) = world.get_mut::<StatusEffects>(target) {
        for mut effect in queued_effects {
            let effect_type = effect.effect_type;
            if ctx.mid_turn {
                // This turn's aging pass still runs; pad so the effect
                // lives its full listed duration.
                effect.duration += 1;
            }
            effects.apply(effect);
            let event_id = ctx.record_event(
                EventKind::StatusApplied {
                    entity: def_id,
                    effect: effect_type,
                },
                format!("{effect_type:?} inflicted"),
                serde_json::Value::Null,
            );
            ctx.emit(SimReactiveEvent::StatusInflicted {
                event_id,
                target,
                effect: effect_type,
            });
        }
    }

    let mut killed = false;
    if let Some(mut health) = world.get_mut::<Health>(target) {
        health.current -= total;
        killed = health.is_dead();
    }

    let result = AttackResult {
        hit: true,
        damage: total,
        killed,
    };
    let breakdown: Vec<serde_json::Value> = results
        .iter()
        .map(|r| {
            serde_json::json!({
                "element": format!("{:?}", r.element),
                "damage": r.final_damage,
                "resisted": r.resisted_amount,
                "weakness": r.was_weakness,
                "interaction": r.interaction,
            })
        })
        .collect();
    let event_id = ctx.record_event(
        EventKind::Attack {
            attacker: atk_id,
            target: def_id,
            result,
        },
        format!("attack dealt {total:.1}"),
        serde_json::json!({ "melee": melee_damage, "elemental": breakdown }),
    );
    ctx.emit(SimReactiveEvent::Attacked {
        event_id,
        attacker,
        target,
        damage: total,
        killed,
    });

    if killed {
        apply_lifecycle::apply_end_entity(ctx, world, target, Some(attacker));
    }

    Some(result)
}
