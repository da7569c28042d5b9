pub mod app;
pub mod clock;
pub mod commands;
pub mod components;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod schedule;
pub mod spawn;
pub mod systems;
pub mod test_helpers;

pub use app::{build_sim_app, build_sim_app_with_executor};
pub use clock::TurnClock;
pub use commands::{SimCommand, SimCommandKind, melee_attack};
pub use components::{
    Actor, Ai, AiState, BaseStat, DerivedStat, DerivedStats, Disposition, Element,
    ElementalAttack, ElementalDamage, ElementalResistances, EquipmentWeight, FactionMember,
    Health, IsPlayer, ModifierKind, PERMANENT, Position, Resistance, SimEntity, StatId,
    StatModifier, StatModifiers, Stats, StatusEffect, StatusEffectType, StatusEffects,
};
pub use events::SimReactiveEvent;
pub use plugin::SimPlugin;
pub use resources::{
    AttackResult, EventLog, FactionId, FactionInfo, FactionRegistry, RelationData, RelationMap,
    SimEntityMap, TerrainOracle, should_attack_faction,
};
pub use schedule::{DomainSet, SimPhase, SimTick, configure_sim_schedule};
pub use systems::{
    apply_all_elemental_damages, apply_faction_wide_relation, calculate_elemental_damage,
    derive_stats, effective_stat, effective_stat_of, should_attack, should_skip_turn,
};
