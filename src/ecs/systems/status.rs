//! Status effect engine.
//!
//! Once per turn every active effect is converted to an impact: health
//! loss, forced turn skips, and stat penalties materialized as modifiers
//! for the next tick's stat resolution. Impacts read pre-decrement
//! duration/strength, so an effect's final tick still fires at full
//! strength; only then are durations decremented and expired entries
//! dropped.

use bevy_app::{App, Plugin};
use bevy_ecs::entity::Entity;
use bevy_ecs::message::MessageWriter;
use bevy_ecs::query::With;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::Query;
use rand::Rng;

use crate::ecs::commands::{SimCommand, SimCommandKind};
use crate::ecs::components::{
    Actor, BaseStat, DerivedStat, Health, ModifierKind, PERMANENT, StatId, StatModifier,
    StatModifiers, StatusEffect, StatusEffectType, StatusEffects,
};
use crate::ecs::schedule::{DomainSet, SimPhase, SimTick};

// ---------------------------------------------------------------------------
// Impact tuning
// ---------------------------------------------------------------------------
/// Chance that shock denies the turn, re-rolled per query.
const SHOCK_SKIP_CHANCE: f64 = 0.5;
/// Speed penalty per point of chill/mud strength, multiplicative.
const SLOW_PER_STRENGTH: f64 = 0.1;
/// Cap on the multiplicative slow from a single effect.
const SLOW_CAP: f64 = 0.5;

/// Source prefix for modifiers owned by this engine. Re-synced wholesale
/// each tick from the active effect list.
const STATUS_SOURCE_PREFIX: &str = "status:";

// ---------------------------------------------------------------------------
// Plugin registration
// ---------------------------------------------------------------------------

pub struct StatusPlugin;

impl Plugin for StatusPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(SimTick, apply_status_impacts.in_set(DomainSet::StatusEffects));
        // Aging runs at the end of the turn, after AI and combat, so skip
        // queries and impact computation both see pre-decrement state and
        // an effect's last tick still fires at full strength.
        app.add_systems(SimTick, age_status_effects.in_set(SimPhase::Last));
    }
}

// ---------------------------------------------------------------------------
// Per-type impact functions (pure)
// ---------------------------------------------------------------------------

/// Health lost this tick from one active effect.
fn health_loss(effect: &StatusEffect) -> f64 {
    match effect.effect_type {
        StatusEffectType::Burning | StatusEffectType::Bleeding | StatusEffectType::Poisoned => {
            effect.strength
        }
        _ => 0.0,
    }
}

fn source_for(effect_type: StatusEffectType) -> String {
    format!("{STATUS_SOURCE_PREFIX}{effect_type:?}").to_lowercase()
}

/// Stat modifiers one active effect contributes for the next tick.
/// Blinded's accuracy impact is consumed directly by combat, and soaked is
/// a pure tag for the interaction table; neither touches stats.
fn stat_modifiers_for(effect: &StatusEffect) -> Vec<StatModifier> {
    let source = source_for(effect.effect_type);
    let flat = |stat: StatId, value: f64| StatModifier {
        stat,
        kind: ModifierKind::Flat,
        value,
        duration: PERMANENT,
        source: source.clone(),
    };
    match effect.effect_type {
        // Poison saps body as well as health.
        StatusEffectType::Poisoned => vec![
            flat(StatId::Base(BaseStat::Strength), -effect.strength),
            flat(StatId::Base(BaseStat::Toughness), -effect.strength),
        ],
        // Multiplicative, capped slow on the movement stat.
        StatusEffectType::Chilled | StatusEffectType::Mudded => vec![StatModifier {
            stat: StatId::Derived(DerivedStat::Speed),
            kind: ModifierKind::Percent,
            value: -(SLOW_PER_STRENGTH * effect.strength).min(SLOW_CAP),
            duration: PERMANENT,
            source,
        }],
        StatusEffectType::Corroded => {
            vec![flat(StatId::Derived(DerivedStat::Defense), -effect.strength)]
        }
        StatusEffectType::Blessed => [
            BaseStat::Strength,
            BaseStat::Dexterity,
            BaseStat::Toughness,
            BaseStat::Willpower,
        ]
        .into_iter()
        .map(|s| flat(StatId::Base(s), effect.strength))
        .collect(),
        StatusEffectType::Cursed => [
            BaseStat::Strength,
            BaseStat::Dexterity,
            BaseStat::Toughness,
            BaseStat::Willpower,
        ]
        .into_iter()
        .map(|s| flat(StatId::Base(s), -effect.strength))
        .collect(),
        _ => Vec::new(),
    }
}

/// Read-only turn-skip query: stun and freeze always deny the turn; shock
/// denies it half the time, re-rolled per call. Callers must call this
/// exactly once per decision point to avoid double-rolling shock.
pub fn should_skip_turn(effects: &StatusEffects, rng: &mut impl Rng) -> bool {
    if effects.has(StatusEffectType::Stunned) || effects.has(StatusEffectType::Frozen) {
        return true;
    }
    if effects.has(StatusEffectType::Shocked) {
        return rng.random_range(0.0..1.0) < SHOCK_SKIP_CHANCE;
    }
    false
}

// ---------------------------------------------------------------------------
// Systems: impacts at the status phase, aging at end of turn
// ---------------------------------------------------------------------------

fn apply_status_impacts(
    mut actors: Query<(Entity, &StatusEffects, &mut Health), With<Actor>>,
    mut commands: MessageWriter<SimCommand>,
) {
    for (entity, effects, mut health) in actors.iter_mut() {
        if effects.0.is_empty() {
            continue;
        }

        // Impacts from pre-decrement state.
        let damage: f64 = effects.0.iter().map(health_loss).sum();
        if damage > 0.0 {
            health.current -= damage;
            if health.is_dead() {
                commands.write(SimCommand::new(
                    SimCommandKind::EndEntity { entity },
                    "succumbed to status damage",
                ));
            }
        }
    }
}

fn age_status_effects(
    mut actors: Query<(&mut StatusEffects, &mut StatModifiers), With<Actor>>,
) {
    for (mut effects, mut modifiers) in actors.iter_mut() {
        // Status-owned modifiers are rebuilt from scratch each turn so
        // expired effects leave no residue.
        modifiers
            .0
            .retain(|m| !m.source.starts_with(STATUS_SOURCE_PREFIX));

        if effects.0.is_empty() {
            continue;
        }

        for effect in &mut effects.0 {
            effect.duration -= 1;
        }
        effects.0.retain(|e| e.duration > 0);

        // Surviving effects re-assert their stat penalties for next turn.
        for effect in &effects.0 {
            modifiers.0.extend(stat_modifiers_for(effect));
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn effect(effect_type: StatusEffectType, duration: i32, strength: f64) -> StatusEffect {
        StatusEffect {
            effect_type,
            duration,
            strength,
            source: "test".into(),
        }
    }

    #[test]
    fn burning_and_bleeding_cost_health() {
        assert_eq!(health_loss(&effect(StatusEffectType::Burning, 3, 5.0)), 5.0);
        assert_eq!(health_loss(&effect(StatusEffectType::Bleeding, 2, 2.0)), 2.0);
        assert_eq!(health_loss(&effect(StatusEffectType::Chilled, 2, 2.0)), 0.0);
    }

    #[test]
    fn poison_penalizes_strength_and_toughness() {
        let mods = stat_modifiers_for(&effect(StatusEffectType::Poisoned, 4, 2.0));
        assert_eq!(mods.len(), 2);
        assert!(mods.iter().all(|m| m.value == -2.0 && m.kind == ModifierKind::Flat));
        assert!(mods.iter().any(|m| m.stat == StatId::Base(BaseStat::Strength)));
        assert!(mods.iter().any(|m| m.stat == StatId::Base(BaseStat::Toughness)));
    }

    #[test]
    fn chill_slow_is_capped() {
        let mods = stat_modifiers_for(&effect(StatusEffectType::Chilled, 3, 20.0));
        assert_eq!(mods.len(), 1);
        assert_eq!(mods[0].value, -SLOW_CAP);
        assert_eq!(mods[0].kind, ModifierKind::Percent);
    }

    #[test]
    fn bless_and_curse_are_symmetric() {
        let blessed = stat_modifiers_for(&effect(StatusEffectType::Blessed, 5, 3.0));
        let cursed = stat_modifiers_for(&effect(StatusEffectType::Cursed, 5, 3.0));
        assert_eq!(blessed.len(), 4);
        assert_eq!(cursed.len(), 4);
        for (b, c) in blessed.iter().zip(&cursed) {
            assert_eq!(b.value, -c.value);
            assert_eq!(b.stat, c.stat);
        }
    }

    #[test]
    fn stun_and_freeze_always_skip() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut effects = StatusEffects::default();
        effects.apply(effect(StatusEffectType::Stunned, 1, 1.0));
        for _ in 0..16 {
            assert!(should_skip_turn(&effects, &mut rng));
        }
    }

    #[test]
    fn shock_skips_about_half_the_time() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut effects = StatusEffects::default();
        effects.apply(effect(StatusEffectType::Shocked, 3, 1.0));
        let skips = (0..1000)
            .filter(|_| should_skip_turn(&effects, &mut rng))
            .count();
        assert!((350..=650).contains(&skips), "skips = {skips}");
    }

    #[test]
    fn clean_actor_never_skips() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(!should_skip_turn(&StatusEffects::default(), &mut rng));
    }
}
