use bevy_ecs::resource::Resource;
use bevy_ecs::system::ResMut;

/// Simulation clock counting whole turns.
///
/// `advance_clock` moves it forward at the end of each tick (in
/// `SimPhase::Last`), so every system sees the current turn number before
/// it advances.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct TurnClock {
    pub turn: u64,
}

impl TurnClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self) {
        self.turn += 1;
    }
}

/// Bevy system that advances the turn counter. Registered in
/// `SimPhase::Last`.
pub fn advance_clock(mut clock: ResMut<TurnClock>) {
    clock.advance();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_and_counts_up() {
        let mut clock = TurnClock::new();
        assert_eq!(clock.turn, 0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.turn, 2);
    }
}
