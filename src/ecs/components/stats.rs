use bevy_ecs::component::Component;
use serde::{Deserialize, Serialize};

/// The four ground-truth attributes every actor carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseStat {
    Strength,
    Dexterity,
    Toughness,
    Willpower,
}

/// Attributes computed from base stats by a fixed formula. Never stored as
/// ground truth; always re-derived by the stat pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DerivedStat {
    Defense,
    Dodge,
    Speed,
    CarryCapacity,
}

/// Closed set of stat names a modifier can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatId {
    Base(BaseStat),
    Derived(DerivedStat),
}

impl StatId {
    /// Parse an external string name. Unknown names are absent, not zero.
    pub fn parse(name: &str) -> Option<StatId> {
        match name {
            "strength" => Some(StatId::Base(BaseStat::Strength)),
            "dexterity" => Some(StatId::Base(BaseStat::Dexterity)),
            "toughness" => Some(StatId::Base(BaseStat::Toughness)),
            "willpower" => Some(StatId::Base(BaseStat::Willpower)),
            "defense" => Some(StatId::Derived(DerivedStat::Defense)),
            "dodge" => Some(StatId::Derived(DerivedStat::Dodge)),
            "speed" => Some(StatId::Derived(DerivedStat::Speed)),
            "carry_capacity" => Some(StatId::Derived(DerivedStat::CarryCapacity)),
            _ => None,
        }
    }
}

/// Base attribute block. Derived values are intentionally not stored here;
/// see `systems::stats::derive_stats`.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Stats {
    pub strength: f64,
    pub dexterity: f64,
    pub toughness: f64,
    pub willpower: f64,
}

impl Stats {
    pub fn get(&self, stat: BaseStat) -> f64 {
        match stat {
            BaseStat::Strength => self.strength,
            BaseStat::Dexterity => self.dexterity,
            BaseStat::Toughness => self.toughness,
            BaseStat::Willpower => self.willpower,
        }
    }

    pub fn set(&mut self, stat: BaseStat, value: f64) {
        match stat {
            BaseStat::Strength => self.strength = value,
            BaseStat::Dexterity => self.dexterity = value,
            BaseStat::Toughness => self.toughness = value,
            BaseStat::Willpower => self.willpower = value,
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            strength: 10.0,
            dexterity: 10.0,
            toughness: 10.0,
            willpower: 10.0,
        }
    }
}

/// Immutable snapshot of re-derived values, returned by the derivation
/// pipeline. Callers replace rather than mutate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub defense: f64,
    pub dodge: f64,
    pub speed: f64,
    pub carry_capacity: f64,
}

impl DerivedStats {
    pub fn get(&self, stat: DerivedStat) -> f64 {
        match stat {
            DerivedStat::Defense => self.defense,
            DerivedStat::Dodge => self.dodge,
            DerivedStat::Speed => self.speed,
            DerivedStat::CarryCapacity => self.carry_capacity,
        }
    }
}

/// How a modifier combines with the stat it targets.
///
/// For a given stat all flat modifiers sum first, then all percentage
/// modifiers multiply the (base + flat) result. That ordering is
/// load-bearing; see `systems::stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierKind {
    Flat,
    Percent,
}

/// Duration value marking a modifier as permanent.
pub const PERMANENT: i32 = -1;

/// One stat adjustment granted by equipment, class, race, or a status
/// effect. `duration` counts down in turns; `PERMANENT` entries never expire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatModifier {
    pub stat: StatId,
    pub kind: ModifierKind,
    pub value: f64,
    pub duration: i32,
    pub source: String,
}

/// Append-only per-actor modifier list. Entries leave only by source match
/// or by their duration reaching zero.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatModifiers(pub Vec<StatModifier>);

impl StatModifiers {
    pub fn add(&mut self, stat: StatId, kind: ModifierKind, value: f64, duration: i32, source: impl Into<String>) {
        self.0.push(StatModifier {
            stat,
            kind,
            value,
            duration,
            source: source.into(),
        });
    }

    /// Remove every entry granted by `source`. Idempotent; a second call
    /// with the same source is a no-op.
    pub fn remove_by_source(&mut self, source: &str) {
        self.0.retain(|m| m.source != source);
    }

    /// Decrement non-permanent durations by one turn and drop expired
    /// entries. Permanent entries are untouched.
    pub fn tick(&mut self) {
        for m in &mut self.0 {
            if m.duration != PERMANENT {
                m.duration -= 1;
            }
        }
        self.0.retain(|m| m.duration == PERMANENT || m.duration > 0);
    }
}

/// Current and maximum hit points.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

impl Health {
    pub fn new(max: f64) -> Self {
        Self { current: max, max }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Total carried equipment weight, fed into the speed derivation. Supplied
/// by the (external) inventory system.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EquipmentWeight(pub f64);
