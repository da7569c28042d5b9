mod ai;
mod common;
mod faction;
mod resistance;
mod stats;
mod status;

pub use ai::{Ai, AiState, Disposition};
pub use common::{Actor, IsPlayer, Position, SimEntity};
pub use faction::FactionMember;
pub use resistance::{
    Element, ElementalAttack, ElementalDamage, ElementalResistances, Resistance,
};
pub use stats::{
    BaseStat, DerivedStat, DerivedStats, EquipmentWeight, Health, ModifierKind, PERMANENT,
    StatId, StatModifier, StatModifiers, Stats,
};
pub use status::{StatusEffect, StatusEffectType, StatusEffects};
