//! Shuttle FTL travel.
//!
//! A jump goes through two timed states on the `Ftl` component:
//! `Starting` (spool-up on the origin map) then `Travelling` (hyperspace).
//! Lifecycle events are queued for delivery in `SimPhase::Reactions`:
//! - `FtlRequest` when the jump is ordered
//! - `FtlStarted` when the spool finishes and the shuttle leaves
//! - `FtlCompleted` when it arrives on the target map

use bevy_app::{App, Plugin};
use bevy_ecs::entity::Entity;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::world::World;

use crate::ecs::bus::queue_event;
use crate::ecs::clock::SimClock;
use crate::ecs::conditions::any_ftl_in_progress;
use crate::ecs::components::{
    Ftl, FtlDestination, FtlState, MapComponent, PreventPilot, Shuttle, Transform,
};
use crate::ecs::events::{FtlCompleted, FtlRequest, FtlStarted};
use crate::ecs::resources::SimConfig;
use crate::ecs::schedule::{DomainSet, SimTick};
use crate::ecs::time::SimTime;

pub struct ShuttlePlugin;

impl Plugin for ShuttlePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            SimTick,
            progress_ftl
                .run_if(any_ftl_in_progress)
                .in_set(DomainSet::Shuttles),
        );
    }
}

/// Map an entity lives on; a map root is its own map.
pub fn map_of(world: &World, entity: Entity) -> Option<Entity> {
    if world.get::<MapComponent>(entity).is_some() {
        return Some(entity);
    }
    world.get::<Transform>(entity).and_then(|xform| xform.map_uid)
}

/// Start an FTL jump of `shuttle` toward `target`'s map after `spool`.
///
/// Returns false if `shuttle` is not a shuttle, is already jumping, or
/// `target` is not on any map.
pub fn request_ftl(world: &mut World, shuttle: Entity, target: Entity, spool: SimTime) -> bool {
    if world.get::<Shuttle>(shuttle).is_none() {
        tracing::warn!("FTL requested for {shuttle:?}, which is not a shuttle");
        return false;
    }
    if world.get::<Ftl>(shuttle).is_some() {
        tracing::debug!("{shuttle:?} is already in FTL");
        return false;
    }
    let Some(map_uid) = map_of(world, target) else {
        tracing::warn!("FTL target {target:?} is not on a map");
        return false;
    };

    let spool = if spool.is_negative() {
        SimTime::ZERO
    } else {
        spool
    };
    world.entity_mut(shuttle).insert(Ftl {
        target,
        state: FtlState::Starting,
        timer: spool,
        origin: None,
    });
    tracing::debug!("{shuttle:?} spooling for {spool} toward {map_uid:?}");
    queue_event(world, FtlRequest {
        entity: shuttle,
        map_uid,
    });
    true
}

/// A pilot at the console orders a jump with the default spool time.
/// Refused while the shuttle is pinned or the destination map is disabled.
pub fn pilot_ftl(world: &mut World, shuttle: Entity, target: Entity) -> bool {
    if world.get::<PreventPilot>(shuttle).is_some() {
        tracing::debug!("{shuttle:?} cannot be piloted");
        return false;
    }
    let destination_enabled = map_of(world, target)
        .and_then(|map_uid| world.get::<FtlDestination>(map_uid))
        .is_none_or(|dest| dest.enabled);
    if !destination_enabled {
        tracing::debug!("FTL destination of {target:?} is disabled");
        return false;
    }

    let startup = world
        .get_resource::<SimConfig>()
        .map(|config| config.ftl_startup_time)
        .unwrap_or_default();
    request_ftl(world, shuttle, target, SimTime::from_secs_f32(startup))
}

/// Exclusive system advancing every jump by one frame.
pub fn progress_ftl(world: &mut World) {
    let frame = world
        .get_resource::<SimClock>()
        .map(|clock| clock.frame_time)
        .unwrap_or_default();

    let mut jumping = world.query::<(Entity, &Ftl)>();
    let jumps: Vec<(Entity, Ftl)> = jumping.iter(world).map(|(e, ftl)| (e, *ftl)).collect();

    for (shuttle, mut ftl) in jumps {
        ftl.timer = ftl.timer - frame;
        if ftl.timer > SimTime::ZERO {
            world.entity_mut(shuttle).insert(ftl);
            continue;
        }

        let Some(target_map) = map_of(world, ftl.target) else {
            abort(world, shuttle, ftl);
            continue;
        };

        match ftl.state {
            FtlState::Starting => depart(world, shuttle, ftl, target_map),
            FtlState::Travelling => arrive(world, shuttle, target_map),
        }
    }
}

/// Everything standing on the shuttle's grid.
fn aboard(world: &mut World, shuttle: Entity) -> Vec<Entity> {
    let mut placed = world.query::<(Entity, &Transform)>();
    placed
        .iter(world)
        .filter(|(_, xform)| xform.grid == Some(shuttle))
        .map(|(e, _)| e)
        .collect()
}

/// Spool finished: the shuttle and its cargo leave the map for hyperspace.
fn depart(world: &mut World, shuttle: Entity, mut ftl: Ftl, target_map: Entity) {
    let from_map_uid = world.get::<Transform>(shuttle).and_then(|x| x.map_uid);
    for entity in aboard(world, shuttle).into_iter().chain([shuttle]) {
        if let Some(mut xform) = world.get_mut::<Transform>(entity) {
            xform.map_uid = None;
        }
    }

    let travel = world
        .get_resource::<SimConfig>()
        .map(|config| config.ftl_travel_time)
        .unwrap_or_default();

    ftl.state = FtlState::Travelling;
    ftl.timer = SimTime::from_secs_f32(travel);
    ftl.origin = from_map_uid;
    world.entity_mut(shuttle).insert(ftl);

    tracing::debug!("{shuttle:?} left {from_map_uid:?}");
    queue_event(world, FtlStarted {
        entity: shuttle,
        from_map_uid,
        target_map_uid: target_map,
    });
}

/// The target is gone. A spooling shuttle simply stays put; one already in
/// hyperspace drops back out on the map it left.
fn abort(world: &mut World, shuttle: Entity, ftl: Ftl) {
    let origin = ftl
        .origin
        .filter(|map| world.get::<MapComponent>(*map).is_some());
    match (ftl.state, origin) {
        (FtlState::Travelling, Some(origin)) => {
            tracing::warn!("FTL target of {shuttle:?} vanished; returning to {origin:?}");
            arrive(world, shuttle, origin);
        }
        (FtlState::Travelling, None) => {
            tracing::warn!("FTL target and origin of {shuttle:?} vanished; stranded in hyperspace");
            world.entity_mut(shuttle).remove::<Ftl>();
        }
        (FtlState::Starting, _) => {
            tracing::warn!("FTL target of {shuttle:?} vanished; aborting jump");
            world.entity_mut(shuttle).remove::<Ftl>();
        }
    }
}

fn arrive(world: &mut World, shuttle: Entity, target_map: Entity) {
    for entity in aboard(world, shuttle).into_iter().chain([shuttle]) {
        if let Some(mut xform) = world.get_mut::<Transform>(entity) {
            xform.map_uid = Some(target_map);
        } else if entity == shuttle {
            world
                .entity_mut(entity)
                .insert(Transform::on_map(target_map, glam::Vec2::ZERO));
        }
    }

    world.entity_mut(shuttle).remove::<Ftl>();
    tracing::debug!("{shuttle:?} arrived on {target_map:?}");
    queue_event(world, FtlCompleted {
        entity: shuttle,
        map_uid: target_map,
    });
}
