use std::collections::{BTreeMap, BTreeSet};

use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};

/// Relation score below which an unaffiliated pair turns hostile.
pub const UNAFFILIATED_ATTACK_THRESHOLD: f64 = -20.0;
/// Stricter bar for members of allied factions; loyalty resists one-off
/// slights.
pub const ALLIED_ATTACK_THRESHOLD: f64 = -50.0;

/// Identifier of a registered faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FactionId(pub u32);

/// Static diplomacy record for one faction. Registered once at world setup;
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactionInfo {
    pub id: FactionId,
    pub name: String,
    pub allies: BTreeSet<FactionId>,
    pub enemies: BTreeSet<FactionId>,
    pub neutral: BTreeSet<FactionId>,
    pub default_reputation: f64,
    pub leaders: Vec<u64>,
}

impl FactionInfo {
    pub fn new(id: FactionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            allies: BTreeSet::new(),
            enemies: BTreeSet::new(),
            neutral: BTreeSet::new(),
            default_reputation: 0.0,
            leaders: Vec::new(),
        }
    }

    pub fn with_allies(mut self, allies: impl IntoIterator<Item = FactionId>) -> Self {
        self.allies.extend(allies);
        self
    }

    pub fn with_enemies(mut self, enemies: impl IntoIterator<Item = FactionId>) -> Self {
        self.enemies.extend(enemies);
        self
    }
}

/// Read-only faction diplomacy registry, constructed by the caller and
/// injected as a resource so tests can substitute fixtures. A faction is
/// considered allied with itself.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactionRegistry {
    factions: BTreeMap<FactionId, FactionInfo>,
}

impl FactionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a faction. Panics on a duplicate id; registration happens
    /// once at setup, so a collision is a programming bug.
    pub fn register(&mut self, info: FactionInfo) {
        let prev = self.factions.insert(info.id, info);
        assert!(prev.is_none(), "duplicate faction id registered");
    }

    pub fn get(&self, id: FactionId) -> Option<&FactionInfo> {
        self.factions.get(&id)
    }

    pub fn are_allied(&self, a: FactionId, b: FactionId) -> bool {
        if a == b {
            return true;
        }
        self.factions.get(&a).is_some_and(|f| f.allies.contains(&b))
            || self.factions.get(&b).is_some_and(|f| f.allies.contains(&a))
    }

    pub fn are_enemies(&self, a: FactionId, b: FactionId) -> bool {
        self.factions.get(&a).is_some_and(|f| f.enemies.contains(&b))
            || self.factions.get(&b).is_some_and(|f| f.enemies.contains(&a))
    }
}

/// Hostility check between two possibly-factioned actors.
///
/// Resolution order: either side unaffiliated → plain relation threshold;
/// enemy factions → always attack regardless of personal relation; allied
/// factions → only past the much stricter allied bar; otherwise the plain
/// threshold again.
pub fn should_attack_faction(
    registry: &FactionRegistry,
    attacker: Option<FactionId>,
    target: Option<FactionId>,
    relation_score: f64,
) -> bool {
    let (Some(attacker), Some(target)) = (attacker, target) else {
        return relation_score < UNAFFILIATED_ATTACK_THRESHOLD;
    };
    if registry.are_enemies(attacker, target) {
        return true;
    }
    if registry.are_allied(attacker, target) {
        return relation_score < ALLIED_ATTACK_THRESHOLD;
    }
    relation_score < UNAFFILIATED_ATTACK_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> FactionRegistry {
        let mut reg = FactionRegistry::new();
        reg.register(
            FactionInfo::new(FactionId(1), "Wardens").with_allies([FactionId(2)]).with_enemies([FactionId(3)]),
        );
        reg.register(FactionInfo::new(FactionId(2), "Circle"));
        reg.register(FactionInfo::new(FactionId(3), "Marauders"));
        reg
    }

    #[test]
    fn alliance_is_symmetric() {
        let reg = registry();
        assert!(reg.are_allied(FactionId(1), FactionId(2)));
        assert!(reg.are_allied(FactionId(2), FactionId(1)));
        assert!(!reg.are_allied(FactionId(2), FactionId(3)));
    }

    #[test]
    fn enemies_always_attack() {
        let reg = registry();
        assert!(should_attack_faction(
            &reg,
            Some(FactionId(1)),
            Some(FactionId(3)),
            100.0
        ));
    }

    #[test]
    fn allies_resist_slights_until_deep_hostility() {
        let reg = registry();
        assert!(!should_attack_faction(
            &reg,
            Some(FactionId(1)),
            Some(FactionId(2)),
            -30.0
        ));
        assert!(should_attack_faction(
            &reg,
            Some(FactionId(1)),
            Some(FactionId(2)),
            -60.0
        ));
    }

    #[test]
    fn unaffiliated_fall_back_to_relation_threshold() {
        let reg = registry();
        assert!(should_attack_faction(&reg, None, Some(FactionId(1)), -25.0));
        assert!(!should_attack_faction(&reg, None, None, -10.0));
    }
}
