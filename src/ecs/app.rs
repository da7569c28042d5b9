use bevy_app::App;
use bevy_ecs::message::MessageRegistry;
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::clock::TurnClock;
use super::commands::{SimCommand, apply_sim_commands};
use super::events::SimReactiveEvent;
use super::plugin::SimPlugin;
use super::resources::{
    AiRng, CombatRng, EcsIdGenerator, EventLog, FactionRegistry, RelationMap, SimEntityMap,
    SimRng, StatusRng, TerrainOracle, distribute_rng,
};
use super::schedule::{SimPhase, configure_sim_schedule};

/// Build a headless simulation app with the turn clock, core resources,
/// message types, the command applicator, and all domain plugins.
///
/// The game loop steps it manually:
/// ```no_run
/// # use rogue_core::ecs::{build_sim_app, SimTick};
/// let mut app = build_sim_app(42);
/// for _ in 0..100 {
///     app.world_mut().run_schedule(SimTick);
/// }
/// ```
///
/// The executor is single-threaded: the simulation is defined as a
/// turn-stepped, single-threaded computation, and RNG consumption order
/// must be identical across runs with the same seed.
pub fn build_sim_app(seed: u64) -> App {
    build_sim_app_with_executor(seed, ExecutorKind::SingleThreaded)
}

/// Build a headless simulation app with a specific executor kind.
pub fn build_sim_app_with_executor(seed: u64, executor: ExecutorKind) -> App {
    let mut app = App::empty();

    // Core resources
    app.insert_resource(TurnClock::new());
    app.insert_resource(EventLog::new());
    app.insert_resource(EcsIdGenerator::default());
    app.insert_resource(SimEntityMap::new());
    app.insert_resource(RelationMap::new());
    app.insert_resource(FactionRegistry::new());
    app.insert_resource(TerrainOracle::default());
    app.insert_resource(SimRng {
        rng: SmallRng::seed_from_u64(seed),
        seed,
    });

    // Per-domain RNG resources (reseeded each turn by distribute_rng)
    app.init_resource::<StatusRng>();
    app.init_resource::<AiRng>();
    app.init_resource::<CombatRng>();

    // Register message types
    MessageRegistry::register_message::<SimCommand>(app.world_mut());
    MessageRegistry::register_message::<SimReactiveEvent>(app.world_mut());

    // Build schedule with message rotation + RNG distribution + applicator
    let mut schedule = configure_sim_schedule(executor);
    schedule.add_systems(bevy_ecs::message::message_update_system.in_set(SimPhase::PreUpdate));
    schedule.add_systems(distribute_rng.in_set(SimPhase::PreUpdate));
    schedule.add_systems(apply_sim_commands.in_set(SimPhase::PostUpdate));
    app.add_schedule(schedule);

    app.add_plugins(SimPlugin);
    app
}
