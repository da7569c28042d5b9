pub mod ecs;
pub mod id;

pub use id::IdGenerator;
