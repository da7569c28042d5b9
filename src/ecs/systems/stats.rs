//! Stat modifier and derivation pipeline.
//!
//! Base stats are ground truth; derived stats are always recomputed by
//! `derive_stats` and never stored. Effective-stat resolution is two-stage
//! for derived stats: base-stat modifiers are applied to the whole base
//! set, all derived stats are re-derived from that modified set, and only
//! then do modifiers targeting the derived stat itself apply on top.
//! Collapsing the stages into a single pass is a semantic bug: a +strength
//! modifier must flow into carry capacity before a +carry_capacity
//! modifier multiplies it.

use bevy_app::{App, Plugin};
use bevy_ecs::query::With;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::Query;

use crate::ecs::components::{
    Actor, BaseStat, DerivedStat, DerivedStats, EquipmentWeight, ModifierKind, StatId,
    StatModifier, StatModifiers, Stats,
};
use crate::ecs::schedule::{SimPhase, SimTick};

// ---------------------------------------------------------------------------
// Derivation coefficients (tuning values, not architectural contract)
// ---------------------------------------------------------------------------
const DEFENSE_PER_TOUGHNESS: f64 = 0.5;
const DODGE_PER_DEXTERITY: f64 = 0.5;
const CARRY_PER_STRENGTH: f64 = 10.0;
const SPEED_BASE: f64 = 10.0;
const SPEED_PER_DEXTERITY: f64 = 0.25;
const SPEED_PENALTY_PER_WEIGHT: f64 = 0.1;
const SPEED_FLOOR: f64 = 1.0;

// ---------------------------------------------------------------------------
// Plugin registration
// ---------------------------------------------------------------------------

pub struct StatsPlugin;

impl Plugin for StatsPlugin {
    fn build(&self, app: &mut App) {
        // Durations age at the end of the turn so a modifier on its last
        // tick still applies to everything that resolves this turn.
        app.add_systems(SimTick, tick_modifiers.in_set(SimPhase::Last));
    }
}

// ---------------------------------------------------------------------------
// Pure derivation
// ---------------------------------------------------------------------------

/// Re-derive the full derived block from a base-stat set and carried
/// equipment weight. Pure; returns a fresh snapshot.
pub fn derive_stats(base: &Stats, equipment_weight: f64) -> DerivedStats {
    DerivedStats {
        defense: base.toughness * DEFENSE_PER_TOUGHNESS,
        dodge: base.dexterity * DODGE_PER_DEXTERITY,
        speed: (SPEED_BASE + base.dexterity * SPEED_PER_DEXTERITY
            - equipment_weight * SPEED_PENALTY_PER_WEIGHT)
            .max(SPEED_FLOOR),
        carry_capacity: base.strength * CARRY_PER_STRENGTH,
    }
}

/// Fold modifiers targeting `stat` over a raw value: all flat entries sum
/// first, then all percentage entries multiply the (raw + flat) result.
/// That ordering is load-bearing.
fn apply_modifiers(raw: f64, modifiers: &[StatModifier], stat: StatId) -> f64 {
    let mut flat = 0.0;
    let mut percent = 0.0;
    for m in modifiers.iter().filter(|m| m.stat == stat) {
        match m.kind {
            ModifierKind::Flat => flat += m.value,
            ModifierKind::Percent => percent += m.value,
        }
    }
    (raw + flat) * (1.0 + percent)
}

/// A base-stat set with all base-stat modifiers applied — the input to
/// stage two of derived-stat resolution.
pub fn modified_base(base: &Stats, modifiers: &StatModifiers) -> Stats {
    let mut out = *base;
    for stat in [
        BaseStat::Strength,
        BaseStat::Dexterity,
        BaseStat::Toughness,
        BaseStat::Willpower,
    ] {
        out.set(stat, apply_modifiers(base.get(stat), &modifiers.0, StatId::Base(stat)));
    }
    out
}

/// Resolve the effective value of any stat.
///
/// Base stats: `(base + Σflat) × (1 + Σpercent)` over modifiers tagged with
/// that stat. Derived stats: two stages — modified base set, re-derive,
/// then derived-stat modifiers on top.
pub fn effective_stat(
    base: &Stats,
    modifiers: &StatModifiers,
    equipment_weight: f64,
    stat: StatId,
) -> f64 {
    match stat {
        StatId::Base(b) => apply_modifiers(base.get(b), &modifiers.0, stat),
        StatId::Derived(d) => {
            let modified = modified_base(base, modifiers);
            let derived = derive_stats(&modified, equipment_weight);
            apply_modifiers(derived.get(d), &modifiers.0, stat)
        }
    }
}

/// Convenience wrappers for the stats combat reads every swing.
pub fn effective_strength(base: &Stats, modifiers: &StatModifiers) -> f64 {
    effective_stat(base, modifiers, 0.0, StatId::Base(BaseStat::Strength))
}

pub fn effective_defense(base: &Stats, modifiers: &StatModifiers, equipment_weight: f64) -> f64 {
    effective_stat(base, modifiers, equipment_weight, StatId::Derived(DerivedStat::Defense))
}

pub fn effective_dodge(base: &Stats, modifiers: &StatModifiers, equipment_weight: f64) -> f64 {
    effective_stat(base, modifiers, equipment_weight, StatId::Derived(DerivedStat::Dodge))
}

// ---------------------------------------------------------------------------
// System: tick modifier durations (SimPhase::Last)
// ---------------------------------------------------------------------------

fn tick_modifiers(mut actors: Query<&mut StatModifiers, With<Actor>>) {
    for mut modifiers in actors.iter_mut() {
        if modifiers.0.is_empty() {
            continue;
        }
        modifiers.tick();
    }
}

// ---------------------------------------------------------------------------
// Queries for external callers (game loop, UI)
// ---------------------------------------------------------------------------

/// Effective stat for an actor in a world, by component lookup. Absent when
/// the actor lacks a stat block.
pub fn effective_stat_of(
    world: &bevy_ecs::world::World,
    entity: bevy_ecs::entity::Entity,
    stat: StatId,
) -> Option<f64> {
    let base = world.get::<Stats>(entity)?;
    let modifiers = world.get::<StatModifiers>(entity).cloned().unwrap_or_default();
    let weight = world.get::<EquipmentWeight>(entity).map_or(0.0, |w| w.0);
    Some(effective_stat(base, &modifiers, weight, stat))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::PERMANENT;

    fn base10() -> Stats {
        Stats {
            strength: 10.0,
            dexterity: 10.0,
            toughness: 10.0,
            willpower: 10.0,
        }
    }

    #[test]
    fn flat_modifiers_sum() {
        let mut mods = StatModifiers::default();
        mods.add(StatId::Base(BaseStat::Strength), ModifierKind::Flat, 5.0, PERMANENT, "class");
        mods.add(StatId::Base(BaseStat::Strength), ModifierKind::Flat, 3.0, PERMANENT, "race");
        let v = effective_stat(&base10(), &mods, 0.0, StatId::Base(BaseStat::Strength));
        assert_eq!(v, 18.0);
    }

    #[test]
    fn percent_applies_after_flat_sum() {
        let mut mods = StatModifiers::default();
        mods.add(StatId::Base(BaseStat::Strength), ModifierKind::Flat, 5.0, PERMANENT, "class");
        mods.add(StatId::Base(BaseStat::Strength), ModifierKind::Flat, 3.0, PERMANENT, "race");
        mods.add(StatId::Base(BaseStat::Strength), ModifierKind::Percent, 0.5, PERMANENT, "blessing");
        let v = effective_stat(&base10(), &mods, 0.0, StatId::Base(BaseStat::Strength));
        assert_eq!(v, 27.0); // (10 + 5 + 3) * 1.5
    }

    #[test]
    fn zero_value_modifier_is_a_noop_slot() {
        let mut mods = StatModifiers::default();
        mods.add(StatId::Base(BaseStat::Strength), ModifierKind::Flat, 0.0, PERMANENT, "charm");
        assert_eq!(mods.0.len(), 1);
        let v = effective_stat(&base10(), &mods, 0.0, StatId::Base(BaseStat::Strength));
        assert_eq!(v, 10.0);
    }

    #[test]
    fn derived_defense_from_toughness() {
        let derived = derive_stats(&base10(), 0.0);
        assert_eq!(derived.defense, 5.0);
        assert_eq!(derived.carry_capacity, 100.0);
    }

    #[test]
    fn equipment_weight_penalizes_speed() {
        let light = derive_stats(&base10(), 0.0);
        let heavy = derive_stats(&base10(), 50.0);
        assert!(heavy.speed < light.speed);
        let crushing = derive_stats(&base10(), 10_000.0);
        assert_eq!(crushing.speed, SPEED_FLOOR);
    }

    #[test]
    fn derived_resolution_is_two_stage() {
        // +10 toughness flows into defense before the derived percent
        // modifier multiplies it.
        let mut mods = StatModifiers::default();
        mods.add(StatId::Base(BaseStat::Toughness), ModifierKind::Flat, 10.0, PERMANENT, "armor");
        mods.add(StatId::Derived(DerivedStat::Defense), ModifierKind::Percent, 0.2, PERMANENT, "stance");
        let v = effective_stat(&base10(), &mods, 0.0, StatId::Derived(DerivedStat::Defense));
        // ((10 + 10) * 0.5) * 1.2
        assert_eq!(v, 12.0);
    }

    #[test]
    fn base_modifier_does_not_leak_into_other_stats() {
        let mut mods = StatModifiers::default();
        mods.add(StatId::Base(BaseStat::Strength), ModifierKind::Flat, 5.0, PERMANENT, "class");
        let v = effective_stat(&base10(), &mods, 0.0, StatId::Base(BaseStat::Dexterity));
        assert_eq!(v, 10.0);
    }
}
