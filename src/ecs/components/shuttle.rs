use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;

use crate::ecs::time::SimTime;

/// A grid that can fly.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Shuttle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FtlState {
    /// Drive spooling up; the shuttle is still on its origin map.
    Starting,
    /// In hyperspace.
    Travelling,
}

/// Present while a shuttle is in an FTL jump.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ftl {
    /// Grid the shuttle is jumping to; it arrives on that grid's map.
    pub target: Entity,
    pub state: FtlState,
    /// Time left in the current state.
    pub timer: SimTime,
    /// Map the shuttle left, set once it is in hyperspace.
    pub origin: Option<Entity>,
}

/// Marks a map as a valid FTL destination on shuttle consoles.
#[derive(Component, Debug, Clone, Copy)]
pub struct FtlDestination {
    pub enabled: bool,
}

impl Default for FtlDestination {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Blocks pilots from starting FTL jumps from this shuttle.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PreventPilot;
