use bevy_ecs::component::Component;
use serde::{Deserialize, Serialize};

use crate::ecs::resources::factions::FactionId;

/// Attaches an actor to a registered faction.
///
/// `reputation` is the actor's personal standing inside its own faction;
/// faction-wide relation broadcasts nudge it when the actor is a co-member
/// of the affected faction.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct FactionMember {
    pub faction_id: FactionId,
    pub reputation: f64,
    pub rank: u32,
}

impl FactionMember {
    pub fn new(faction_id: FactionId) -> Self {
        Self {
            faction_id,
            reputation: 0.0,
            rank: 0,
        }
    }
}
