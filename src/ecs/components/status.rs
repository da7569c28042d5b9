use bevy_ecs::component::Component;
use serde::{Deserialize, Serialize};

use super::resistance::Element;

/// Timed conditions an actor can carry. Each maps to a per-type impact
/// function in `systems::status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusEffectType {
    Burning,
    Bleeding,
    Poisoned,
    Frozen,
    Stunned,
    Shocked,
    Chilled,
    Mudded,
    Corroded,
    Blessed,
    Cursed,
    Blinded,
    Soaked,
}

impl StatusEffectType {
    /// Reverse lookup used by the elemental interaction table: which element
    /// does an active effect expose on its carrier? Effects with no elemental
    /// signature (stun, bless, blind...) expose none.
    pub fn element(self) -> Option<Element> {
        match self {
            StatusEffectType::Burning => Some(Element::Fire),
            StatusEffectType::Bleeding => Some(Element::Physical),
            StatusEffectType::Poisoned => Some(Element::Poison),
            StatusEffectType::Frozen | StatusEffectType::Chilled => Some(Element::Ice),
            StatusEffectType::Shocked => Some(Element::Lightning),
            StatusEffectType::Mudded => Some(Element::Earth),
            StatusEffectType::Corroded => Some(Element::Acid),
            StatusEffectType::Soaked => Some(Element::Water),
            StatusEffectType::Stunned
            | StatusEffectType::Blessed
            | StatusEffectType::Cursed
            | StatusEffectType::Blinded => None,
        }
    }
}

/// One active timed effect. `duration` strictly decreases each tick; the
/// effect is removed once it reaches zero. Impact computation reads the
/// pre-decrement state, so the last tick still fires at full strength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub effect_type: StatusEffectType,
    pub duration: i32,
    pub strength: f64,
    pub source: String,
}

/// Ordered per-actor effect list.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusEffects(pub Vec<StatusEffect>);

impl StatusEffects {
    /// Apply a new effect. A repeat application of the same type refreshes
    /// the slot (longest duration, strongest strength win) instead of
    /// stacking a duplicate entry.
    pub fn apply(&mut self, effect: StatusEffect) {
        if let Some(existing) = self
            .0
            .iter_mut()
            .find(|e| e.effect_type == effect.effect_type)
        {
            existing.duration = existing.duration.max(effect.duration);
            existing.strength = existing.strength.max(effect.strength);
        } else {
            self.0.push(effect);
        }
    }

    pub fn has(&self, effect_type: StatusEffectType) -> bool {
        self.0.iter().any(|e| e.effect_type == effect_type)
    }

    pub fn get(&self, effect_type: StatusEffectType) -> Option<&StatusEffect> {
        self.0.iter().find(|e| e.effect_type == effect_type)
    }
}
