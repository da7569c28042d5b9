use std::hash::{DefaultHasher, Hash, Hasher};

use bevy_ecs::resource::Resource;
use bevy_ecs::world::World;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::IdGenerator;

/// Deterministic root RNG for the simulation.
#[derive(Resource)]
pub struct SimRng {
    pub rng: SmallRng,
    pub seed: u64,
}

// ---------------------------------------------------------------------------
// Per-domain RNG resources
// ---------------------------------------------------------------------------

macro_rules! domain_rng {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Resource)]
        pub struct $name(pub SmallRng);

        impl Default for $name {
            fn default() -> Self {
                Self(SmallRng::seed_from_u64(0))
            }
        }
    };
}

domain_rng!(StatusRng, "RNG for status-effect rolls (shock turn-skip).");
domain_rng!(AiRng, "RNG for AI patrol and wander steps.");
domain_rng!(CombatRng, "RNG for status-effect proc rolls during damage resolution. The only randomness in the combat path.");

/// Derive a deterministic per-domain seed from the global seed, domain
/// name, and turn count.
fn derive_domain_seed(seed: u64, domain: &str, turn: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    domain.hash(&mut hasher);
    turn.hash(&mut hasher);
    hasher.finish()
}

/// Exclusive system that re-seeds all per-domain RNGs each turn.
/// Runs in `SimPhase::PreUpdate` before any domain systems.
pub fn distribute_rng(world: &mut World) {
    let seed = world.resource::<SimRng>().seed;
    let turn = world.resource::<crate::ecs::clock::TurnClock>().turn;

    macro_rules! reseed {
        ($res:ty, $label:expr) => {
            world.resource_mut::<$res>().0 =
                SmallRng::seed_from_u64(derive_domain_seed(seed, $label, turn));
        };
    }

    reseed!(StatusRng, "status");
    reseed!(AiRng, "ai");
    reseed!(CombatRng, "combat");
}

/// Global id generator for simulation actors.
#[derive(Resource, Default)]
pub struct EcsIdGenerator(pub IdGenerator);
