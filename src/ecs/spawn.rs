use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;
use glam::Vec2;

use crate::ecs::components::*;
use crate::ecs::resources::MapIndex;
use crate::ecs::time::SimTime;

fn register(world: &mut World, entity: Entity) -> MapId {
    let mut index = world.get_resource_or_init::<MapIndex>();
    let map_id = index.allocate();
    index.insert(map_id, entity);
    map_id
}

/// Spawn an empty map root and register it in `MapIndex`.
pub fn spawn_map(world: &mut World) -> Entity {
    let entity = world.spawn_empty().id();
    let map_id = register(world, entity);
    world.entity_mut(entity).insert(MapComponent { map_id });
    entity
}

/// Spawn a one-grid station on `map`. Returns `(station, grid)`.
pub fn spawn_station(world: &mut World, map: Entity) -> (Entity, Entity) {
    let grid = world.spawn(Transform::on_map(map, Vec2::ZERO)).id();
    let station = world
        .spawn((
            StationData { grids: vec![grid] },
            SalvageExpeditionData::default(),
        ))
        .id();
    (station, grid)
}

pub fn spawn_shuttle(world: &mut World, map: Entity) -> Entity {
    world
        .spawn((Shuttle, Transform::on_map(map, Vec2::ZERO)))
        .id()
}

/// Spawn a player standing on `grid` (or loose on the map).
pub fn spawn_actor(world: &mut World, name: &str, map: Entity, grid: Option<Entity>) -> Entity {
    world
        .spawn((
            Actor {
                name: name.to_string(),
            },
            Transform {
                map_uid: Some(map),
                grid,
                position: Vec2::ZERO,
            },
        ))
        .id()
}

/// Spawn a fresh mission map for `station`, ending at `end_time`, and record
/// it as the station's active mission.
pub fn spawn_expedition(world: &mut World, station: Entity, end_time: SimTime) -> Entity {
    let map = spawn_map(world);
    world.entity_mut(map).insert((
        SalvageExpedition::new(Some(station), end_time),
        FtlDestination::default(),
    ));
    if let Some(mut data) = world.get_mut::<SalvageExpeditionData>(station) {
        data.active_mission = Some(map);
    }
    tracing::info!("expedition {map:?} added for station {station:?}, ends at {end_time}");
    map
}

/// Spawn a handheld light with an empty cell slot.
pub fn spawn_handheld_light(world: &mut World, light: HandheldLight) -> Entity {
    world
        .spawn((
            light,
            PointLight::default(),
            Appearance::default(),
            PowerCellSlot::default(),
        ))
        .id()
}

pub fn spawn_power_cell(world: &mut World, max_charge: f32) -> Entity {
    world.spawn(Battery::new(max_charge)).id()
}
