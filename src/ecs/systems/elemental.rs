//! Elemental damage and resistance engine.
//!
//! Everything here is pure except the status proc roll, which takes an
//! injected RNG — the single place randomness enters the combat path, so
//! the rest of the pipeline stays replayable for tests.

use rand::Rng;

use crate::ecs::components::{
    Element, ElementalAttack, ElementalDamage, ElementalResistances, Resistance, StatusEffect,
    StatusEffectType, StatusEffects,
};

// ---------------------------------------------------------------------------
// Proc tuning (chance = base + min(damage / 50, 0.5); strength =
// max(1, floor(damage * 0.2)))
// ---------------------------------------------------------------------------
const PROC_DAMAGE_DIVISOR: f64 = 50.0;
const PROC_DAMAGE_CAP: f64 = 0.5;
const PROC_STRENGTH_SCALE: f64 = 0.2;

// ---------------------------------------------------------------------------
// Per-element base proc chance
// ---------------------------------------------------------------------------
const fn base_proc_chance(element: Element) -> f64 {
    match element {
        Element::Physical => 0.05,
        Element::Fire => 0.15,
        Element::Ice => 0.15,
        Element::Lightning => 0.20,
        Element::Water => 0.25,
        Element::Poison => 0.20,
        Element::Acid => 0.15,
        Element::Earth => 0.10,
    }
}

/// Which effect an element inflicts when its proc lands.
const fn proc_effect(element: Element) -> StatusEffectType {
    match element {
        Element::Physical => StatusEffectType::Bleeding,
        Element::Fire => StatusEffectType::Burning,
        Element::Ice => StatusEffectType::Chilled,
        Element::Lightning => StatusEffectType::Shocked,
        Element::Water => StatusEffectType::Soaked,
        Element::Poison => StatusEffectType::Poisoned,
        Element::Acid => StatusEffectType::Corroded,
        Element::Earth => StatusEffectType::Mudded,
    }
}

// ---------------------------------------------------------------------------
// Per-effect-type proc duration (turns)
// ---------------------------------------------------------------------------
pub(crate) const fn proc_duration(effect: StatusEffectType) -> i32 {
    match effect {
        StatusEffectType::Burning => 3,
        StatusEffectType::Bleeding => 4,
        StatusEffectType::Poisoned => 5,
        StatusEffectType::Frozen => 2,
        StatusEffectType::Stunned => 1,
        StatusEffectType::Shocked => 3,
        StatusEffectType::Chilled => 4,
        StatusEffectType::Mudded => 3,
        StatusEffectType::Corroded => 5,
        StatusEffectType::Blessed | StatusEffectType::Cursed => 10,
        StatusEffectType::Blinded => 3,
        StatusEffectType::Soaked => 6,
    }
}

/// Result of resolving one damage instance against a target's resistances.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementalDamageResult {
    pub element: Element,
    pub final_damage: f64,
    /// `base - final` before the zero clamp; negative when a vulnerability
    /// increased the damage.
    pub resisted_amount: f64,
    pub was_weakness: bool,
    /// Name of the elemental interaction that fired, if any.
    pub interaction: Option<&'static str>,
}

/// `max(0, (base - flat) × (1 - percent))`. A missing resistance component
/// is all-zeros, not immunity; callers pass `Resistance::default()`.
pub fn calculate_elemental_damage(
    base_damage: f64,
    element: Element,
    resistance: Resistance,
) -> ElementalDamageResult {
    let reduced = (base_damage - resistance.flat_reduction) * (1.0 - resistance.percent_resistance);
    let final_damage = reduced.max(0.0);
    let resisted_amount = base_damage - reduced;
    ElementalDamageResult {
        element,
        final_damage,
        resisted_amount,
        was_weakness: resisted_amount < 0.0,
        interaction: None,
    }
}

// ---------------------------------------------------------------------------
// Elemental interaction table
// ---------------------------------------------------------------------------

/// One entry: incoming element applied to a target already carrying a
/// status of the secondary element.
struct Interaction {
    primary: Element,
    secondary: Element,
    damage_multiplier: f64,
    name: &'static str,
    resulting_effect: Option<StatusEffectType>,
}

/// Fixed reaction table, e.g. lightning applied to a soaked target
/// electrocutes.
const INTERACTIONS: &[Interaction] = &[
    Interaction {
        primary: Element::Lightning,
        secondary: Element::Water,
        damage_multiplier: 1.8,
        name: "electrocuted",
        resulting_effect: Some(StatusEffectType::Stunned),
    },
    Interaction {
        primary: Element::Fire,
        secondary: Element::Water,
        damage_multiplier: 0.5,
        name: "dampened",
        resulting_effect: None,
    },
    Interaction {
        primary: Element::Ice,
        secondary: Element::Water,
        damage_multiplier: 1.5,
        name: "deep freeze",
        resulting_effect: Some(StatusEffectType::Frozen),
    },
    Interaction {
        primary: Element::Fire,
        secondary: Element::Ice,
        damage_multiplier: 1.25,
        name: "thawed",
        resulting_effect: None,
    },
    Interaction {
        primary: Element::Earth,
        secondary: Element::Water,
        damage_multiplier: 1.2,
        name: "mired",
        resulting_effect: Some(StatusEffectType::Mudded),
    },
    Interaction {
        primary: Element::Fire,
        secondary: Element::Poison,
        damage_multiplier: 1.4,
        name: "ignited fumes",
        resulting_effect: Some(StatusEffectType::Burning),
    },
];

/// Look up a reaction for an incoming element against the target's active
/// effects (reverse lookup from effect type to element). First active
/// match in table order wins.
fn find_interaction(incoming: Element, target_effects: &StatusEffects) -> Option<&'static Interaction> {
    INTERACTIONS.iter().find(|entry| {
        entry.primary == incoming
            && target_effects
                .0
                .iter()
                .any(|e| e.effect_type.element() == Some(entry.secondary))
    })
}

/// Roll the status proc for one resolved damage instance. Returns the
/// effect to queue on success.
pub fn roll_status_proc(
    element: Element,
    damage: f64,
    rng: &mut impl Rng,
) -> Option<StatusEffect> {
    if damage <= 0.0 {
        return None;
    }
    let chance = base_proc_chance(element) + (damage / PROC_DAMAGE_DIVISOR).min(PROC_DAMAGE_CAP);
    if rng.random_range(0.0..1.0) >= chance {
        return None;
    }
    let effect_type = proc_effect(element);
    Some(StatusEffect {
        effect_type,
        duration: proc_duration(effect_type),
        strength: (damage * PROC_STRENGTH_SCALE).floor().max(1.0),
        source: "combat".into(),
    })
}

/// Resolve every elemental damage entry an attacker carries against one
/// target: resistance formula, interaction table, proc roll. Returns one
/// result per entry plus the status effects to queue on the target.
pub fn apply_all_elemental_damages(
    attack: &ElementalAttack,
    resistances: &ElementalResistances,
    target_effects: &StatusEffects,
    rng: &mut impl Rng,
) -> (Vec<ElementalDamageResult>, Vec<StatusEffect>) {
    let mut results = Vec::with_capacity(attack.0.len());
    let mut queued = Vec::new();

    for &ElementalDamage { element, amount } in &attack.0 {
        let mut result = calculate_elemental_damage(amount, element, resistances.get(element));

        if let Some(interaction) = find_interaction(element, target_effects) {
            result.final_damage *= interaction.damage_multiplier;
            result.interaction = Some(interaction.name);
            if let Some(effect_type) = interaction.resulting_effect {
                queued.push(StatusEffect {
                    effect_type,
                    duration: proc_duration(effect_type),
                    strength: (result.final_damage * PROC_STRENGTH_SCALE).floor().max(1.0),
                    source: "interaction".into(),
                });
            }
        }

        if let Some(proc) = roll_status_proc(element, result.final_damage, rng) {
            queued.push(proc);
        }
        results.push(result);
    }

    (results, queued)
}

/// Sum of final damage across a result set.
pub fn total_damage(results: &[ElementalDamageResult]) -> f64 {
    results.iter().map(|r| r.final_damage).sum()
}
