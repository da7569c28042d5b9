use std::collections::BTreeMap;

use bevy_ecs::component::Component;
use serde::{Deserialize, Serialize};

/// Damage elements. `Physical` covers mundane weapon damage carried as an
/// elemental entry (e.g. a serrated blade that can cause bleeding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    Physical,
    Fire,
    Ice,
    Lightning,
    Water,
    Poison,
    Acid,
    Earth,
}

/// Per-element reduction knobs. Both are signed; negative values mark a
/// vulnerability that increases incoming damage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Resistance {
    pub flat_reduction: f64,
    pub percent_resistance: f64,
}

/// Per-actor elemental resistances. Lookups default to zero for unset
/// elements; an actor without this component resists nothing.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementalResistances(pub BTreeMap<Element, Resistance>);

impl ElementalResistances {
    pub fn get(&self, element: Element) -> Resistance {
        self.0.get(&element).copied().unwrap_or_default()
    }

    pub fn set(&mut self, element: Element, resistance: Resistance) {
        self.0.insert(element, resistance);
    }
}

/// One damage instance of a single element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementalDamage {
    pub element: Element,
    pub amount: f64,
}

/// The elemental damage entries an attacker's strikes carry, typically
/// granted by the equipped weapon. An attack may carry several.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementalAttack(pub Vec<ElementalDamage>);
