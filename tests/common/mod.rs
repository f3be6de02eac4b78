#![allow(dead_code)]

use bevy_app::App;
use bevy_ecs::entity::Entity;
use station_sim::ecs::SimClock;
use station_sim::ecs::resources::SimConfig;
use station_sim::ecs::spawn::{
    spawn_actor, spawn_expedition, spawn_map, spawn_shuttle, spawn_station,
};
use station_sim::ecs::time::SimTime;
use station_sim::ecs::{HostLog, StationSimPlugin, build_sim_app};

/// Full app ticking once per second with fast FTL travel.
pub fn build_test_app() -> App {
    let mut app = build_sim_app(SimConfig {
        tick_rate: 1,
        ftl_startup_time: 5.5,
        ftl_travel_time: 2.0,
        ..SimConfig::default()
    });
    app.add_plugins(StationSimPlugin);
    app
}

pub struct ExpeditionSetup {
    pub station_map: Entity,
    pub station: Entity,
    pub home_grid: Entity,
    pub expedition: Entity,
    pub shuttle: Entity,
    pub crew: Entity,
}

/// A station with a docked shuttle (one crew member aboard) and an
/// expedition ending `ends_in` from now.
pub fn setup_expedition(app: &mut App, ends_in: SimTime) -> ExpeditionSetup {
    let now = app.world().resource::<SimClock>().cur_time;
    let world = app.world_mut();
    let station_map = spawn_map(world);
    let (station, home_grid) = spawn_station(world, station_map);
    let expedition = spawn_expedition(world, station, now + ends_in);
    let shuttle = spawn_shuttle(world, station_map);
    let crew = spawn_actor(world, "Salvager", station_map, Some(shuttle));
    ExpeditionSetup {
        station_map,
        station,
        home_grid,
        expedition,
        shuttle,
        crew,
    }
}

pub fn chat(app: &App) -> Vec<String> {
    app.world()
        .resource::<HostLog>()
        .chat_texts()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}
