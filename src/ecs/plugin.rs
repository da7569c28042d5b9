use bevy_app::{App, Plugin};

use super::systems::ai::AiPlugin;
use super::systems::relations::RelationsPlugin;
use super::systems::stats::StatsPlugin;
use super::systems::status::StatusPlugin;

/// Aggregate plugin that installs the four simulation domain plugins in
/// their contract order: stat derivation, status effects, AI decisions,
/// then (after the PostUpdate combat applicator) relation updates.
pub struct SimPlugin;

impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((StatsPlugin, StatusPlugin, AiPlugin, RelationsPlugin));
    }
}
