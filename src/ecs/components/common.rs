use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Host-assigned identifier of a map (a self-contained coordinate space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MapId(pub u32);

/// Marks the root entity of a map.
#[derive(Component, Debug, Clone, Copy)]
pub struct MapComponent {
    pub map_id: MapId,
}

/// Spatial placement. `map_uid` is the map root the entity lives on, `grid`
/// the grid (ship or station) it is standing on, if any.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Transform {
    pub map_uid: Option<Entity>,
    pub grid: Option<Entity>,
    pub position: Vec2,
}

impl Transform {
    pub fn on_map(map_uid: Entity, position: Vec2) -> Self {
        Self {
            map_uid: Some(map_uid),
            grid: None,
            position,
        }
    }

    pub fn on_grid(map_uid: Entity, grid: Entity, position: Vec2) -> Self {
        Self {
            map_uid: Some(map_uid),
            grid: Some(grid),
            position,
        }
    }
}

/// A connected player. Receives chat broadcast to the map they stand on.
#[derive(Component, Debug, Clone, Default)]
pub struct Actor {
    pub name: String,
}

/// A station and the grids that make it up.
#[derive(Component, Debug, Clone, Default)]
pub struct StationData {
    pub grids: Vec<Entity>,
}
