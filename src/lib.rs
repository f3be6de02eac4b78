pub mod ecs;
pub mod flush;
pub mod math;

pub use ecs::{StationSimPlugin, build_sim_app};
pub use math::Direction;
