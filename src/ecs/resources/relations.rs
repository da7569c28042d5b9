use std::collections::BTreeMap;

use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_SCORE: f64 = -100.0;
pub const DEFAULT_MAX_SCORE: f64 = 100.0;

/// Disposition score one actor holds toward another. `min_score <= score
/// <= max_score` holds after every mutation; `adjust` clamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelationData {
    pub score: f64,
    pub min_score: f64,
    pub max_score: f64,
}

impl RelationData {
    pub fn new(score: f64) -> Self {
        Self {
            score,
            min_score: DEFAULT_MIN_SCORE,
            max_score: DEFAULT_MAX_SCORE,
        }
    }
}

impl Default for RelationData {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Pairwise relation scores, keyed by ordered (holder, target) pairs —
/// relations are directed; A's view of B is independent of B's view of A.
/// BTreeMap for deterministic iteration.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationMap {
    #[serde(with = "entry_rows")]
    entries: BTreeMap<(Entity, Entity), RelationData>,
}

/// JSON maps only carry string keys, so the tuple-keyed entries serialize
/// as a sequence of (holder, target, data) rows.
mod entry_rows {
    use std::collections::BTreeMap;

    use bevy_ecs::entity::Entity;
    use serde::Deserialize;
    use serde::de::Deserializer;
    use serde::ser::Serializer;

    use super::RelationData;

    pub fn serialize<S: Serializer>(
        entries: &BTreeMap<(Entity, Entity), RelationData>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(entries.iter().map(|((holder, target), data)| (holder, target, data)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<(Entity, Entity), RelationData>, D::Error> {
        let rows = Vec::<(Entity, Entity, RelationData)>::deserialize(deserializer)?;
        Ok(rows
            .into_iter()
            .map(|(holder, target, data)| ((holder, target), data))
            .collect())
    }
}

impl RelationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the pair's entry if absent. Existing entries keep their score
    /// and bounds.
    pub fn init(&mut self, holder: Entity, target: Entity, data: RelationData) {
        self.entries.entry((holder, target)).or_insert(data);
    }

    pub fn get(&self, holder: Entity, target: Entity) -> Option<&RelationData> {
        self.entries.get(&(holder, target))
    }

    /// The holder's score toward target, or 0 when the pair is untracked.
    pub fn score_or_default(&self, holder: Entity, target: Entity) -> f64 {
        self.get(holder, target).map_or(0.0, |r| r.score)
    }

    /// Apply `delta` to the pair's score, clamped into `[min, max]`.
    /// An untracked pair is a silent no-op — relations must be explicitly
    /// initialized before they can be modified.
    pub fn adjust(&mut self, holder: Entity, target: Entity, delta: f64) {
        if let Some(rel) = self.entries.get_mut(&(holder, target)) {
            rel.score = (rel.score + delta).clamp(rel.min_score, rel.max_score);
        }
    }

    /// Initialize (at defaults) then adjust, for mutations that should land
    /// even on a first encounter.
    pub fn init_and_adjust(&mut self, holder: Entity, target: Entity, delta: f64) {
        self.init(holder, target, RelationData::default());
        self.adjust(holder, target, delta);
    }

    /// Drop every entry naming `entity` on either side. Called when the
    /// entity is removed so no relation outlives its actor.
    pub fn sweep(&mut self, entity: Entity) {
        self.entries.retain(|(a, b), _| *a != entity && *b != entity);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
