use bevy_app::App;
use bevy_ecs::entity::Entity;
use rogue_core::ecs::resources::EventKind;
use rogue_core::ecs::spawn;
use rogue_core::ecs::{EventLog, Health, Position, Stats, build_sim_app};

pub fn sim_app() -> App {
    build_sim_app(42)
}

pub fn spawn_fighter(
    app: &mut App,
    id: u64,
    name: &str,
    x: i32,
    y: i32,
    stats: Stats,
    max_health: f64,
) -> Entity {
    spawn::spawn_actor(
        app.world_mut(),
        id,
        name.to_string(),
        Position::new(x, y),
        stats,
        Health::new(max_health),
    )
}

pub fn attack_event_count(app: &App) -> usize {
    app.world()
        .resource::<EventLog>()
        .events
        .iter()
        .filter(|e| matches!(e.kind, EventKind::Attack { .. }))
        .count()
}
