use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, ScheduleLabel, SystemSet};

use super::clock::advance_clock;

/// Schedule label for the main simulation turn.
/// Run manually each turn via `app.world_mut().run_schedule(SimTick)`.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimTick;

/// Ordered phases within each turn.
///
/// Systems are assigned to phases via `.in_set(SimPhase::Update)` etc.
/// Phases run in declaration order: PreUpdate < Update < PostUpdate <
/// Reactions < Last. Decision systems live in Update; the command
/// applicator (movement + combat resolution) in PostUpdate; relation
/// fallout from combat in Reactions.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimPhase {
    PreUpdate,
    Update,
    PostUpdate,
    Reactions,
    Last,
}

/// Per-domain system sets within `SimPhase::Update`.
///
/// Cross-domain ordering: `Stats → StatusEffects → Ai`. Status effects
/// convert to impacts after the stat phase, and AI reads post-status
/// health and skip state. Combat runs after all three, in the PostUpdate
/// applicator; relation updates follow in Reactions; durations age in
/// Last. The whole per-turn order required by the simulation contract is
/// enforced here, not by caller convention.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DomainSet {
    Stats,
    StatusEffects,
    Ai,
}

fn configure_domain_ordering(schedule: &mut Schedule) {
    schedule.configure_sets(DomainSet::Stats.in_set(SimPhase::Update));
    schedule.configure_sets(DomainSet::StatusEffects.in_set(SimPhase::Update));
    schedule.configure_sets(DomainSet::Ai.in_set(SimPhase::Update));

    schedule.configure_sets(DomainSet::StatusEffects.after(DomainSet::Stats));
    schedule.configure_sets(DomainSet::Ai.after(DomainSet::StatusEffects));
}

/// Build a configured `SimTick` schedule with phase ordering.
pub fn configure_sim_schedule(executor: ExecutorKind) -> Schedule {
    let mut schedule = Schedule::new(SimTick);
    schedule.set_executor_kind(executor);
    schedule.configure_sets(
        (
            SimPhase::PreUpdate,
            SimPhase::Update,
            SimPhase::PostUpdate,
            SimPhase::Reactions,
            SimPhase::Last,
        )
            .chain(),
    );
    configure_domain_ordering(&mut schedule);
    schedule.add_systems(advance_clock.in_set(SimPhase::Last));
    schedule
}
