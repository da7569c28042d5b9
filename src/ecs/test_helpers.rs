use bevy_app::App;

use crate::ecs::clock::TurnClock;
use crate::ecs::schedule::SimTick;

/// Run `n` full simulation turns.
pub fn tick_turns(app: &mut App, n: u32) {
    for _ in 0..n {
        app.world_mut().run_schedule(SimTick);
    }
}

/// Current turn number from the clock resource.
pub fn current_turn(app: &App) -> u64 {
    app.world().resource::<TurnClock>().turn
}
