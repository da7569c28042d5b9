pub mod ai;
pub mod elemental;
pub mod relations;
pub mod stats;
pub mod status;

pub use ai::{AiPlugin, should_attack};
pub use elemental::{
    ElementalDamageResult, apply_all_elemental_damages, calculate_elemental_damage,
    roll_status_proc, total_damage,
};
pub use relations::{RelationsPlugin, apply_faction_wide_relation};
pub use stats::{StatsPlugin, derive_stats, effective_stat, effective_stat_of, modified_base};
pub use status::{StatusPlugin, should_skip_turn};
