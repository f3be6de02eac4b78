use bevy_ecs::entity::Entity;
use bevy_ecs::query::{With, Without};
use bevy_ecs::world::World;

use crate::ecs::commands::{HostCommand, SoundSource, write_command};
use crate::ecs::components::{
    ExpeditionStage, Ftl, FtlDestination, PreventPilot, SalvageExpedition,
    SalvageExpeditionData, SalvageStructureExpedition, Shuttle, StationData, Transform,
};
use crate::ecs::events::{EntityTerminating, FtlCompleted, FtlRequest, FtlStarted};
use crate::ecs::resources::{AudioStreams, SimConfig};
use crate::ecs::systems::helpers::{announce, loc, now};
use crate::ecs::time::SimTime;
use crate::math::Direction;

use super::mining;

pub const FINAL_COUNTDOWN: SimTime = SimTime::from_secs(30);
pub const MUSIC_COUNTDOWN: SimTime = SimTime::from_minutes(2);
pub const COUNTDOWN: SimTime = SimTime::from_minutes(5);
/// Slack added to the FTL startup time when deciding to recall shuttles.
pub const FTL_MARGIN: SimTime = SimTime::from_millis(500);

// ---------------------------------------------------------------------------
// FTL listeners
// ---------------------------------------------------------------------------

pub(super) fn on_ftl_request(world: &mut World, ev: &mut FtlRequest) {
    if world.get::<SalvageExpedition>(ev.map_uid).is_none() {
        return;
    }
    let Some(mut dest) = world.get_mut::<FtlDestination>(ev.map_uid) else {
        return;
    };

    // Only one shuttle can occupy an expedition.
    dest.enabled = false;
    write_command(world, HostCommand::RefreshShuttleConsoles);
}

pub(super) fn on_ftl_completed(world: &mut World, ev: &mut FtlCompleted) {
    let Some(expedition) = world.get::<SalvageExpedition>(ev.map_uid) else {
        return;
    };
    if expedition.stage != ExpeditionStage::Added {
        return;
    }
    let minutes = (expedition.end_time - now(world)).whole_minutes();
    let dungeon = expedition.dungeon_location;

    let text = loc(
        world,
        "salvage-expedition-announcement-countdown-minutes",
        &[("duration", &minutes)],
    );
    announce(world, ev.map_uid, text);

    if let Some(direction) = Direction::from_vector(dungeon) {
        let text = loc(
            world,
            "salvage-expedition-announcement-dungeon",
            &[("direction", &direction)],
        );
        announce(world, ev.map_uid, text);
    }

    if let Some(mut expedition) = world.get_mut::<SalvageExpedition>(ev.map_uid) {
        expedition.advance_to(ExpeditionStage::Running);
    }
    // Pinned until the mission is over.
    if let Ok(mut shuttle) = world.get_entity_mut(ev.entity) {
        shuttle.insert(PreventPilot);
    }
    tracing::info!("expedition {:?} running, {minutes} minutes left", ev.map_uid);
}

pub(super) fn on_ftl_started(world: &mut World, ev: &mut FtlStarted) {
    mining::snapshot_exemptions(world, ev.target_map_uid, ev.entity);

    let Some(from) = ev.from_map_uid else {
        return;
    };
    let Some(station) = world.get::<SalvageExpedition>(from).and_then(|e| e.station) else {
        return;
    };
    if world.get::<SalvageExpeditionData>(station).is_none() {
        return;
    }

    // Pilotable again once back home.
    if let Ok(mut shuttle) = world.get_entity_mut(ev.entity) {
        shuttle.remove::<PreventPilot>();
    }

    let mut shuttles = world.query_filtered::<&Transform, With<Shuttle>>();
    if shuttles.iter(world).any(|xform| xform.map_uid == Some(from)) {
        return;
    }

    // Last shuttle has left.
    if let Some(mut expedition) = world.get_mut::<SalvageExpedition>(from) {
        expedition.mark_completed();
    }
    tracing::info!("last shuttle left expedition {from:?}; deleting the map");
    write_command(world, HostCommand::Delete { entity: from });
}

pub(super) fn on_expedition_terminating(world: &mut World, ev: &mut EntityTerminating) {
    let Some(expedition) = world.get::<SalvageExpedition>(ev.entity) else {
        return;
    };
    let stream = expedition.stream;
    let station = expedition.station;
    let completed = expedition.completed;

    if let Some(stream) = stream {
        write_command(world, HostCommand::StopSound { stream });
    }

    let Some(mut data) = station.and_then(|s| world.get_mut::<SalvageExpeditionData>(s)) else {
        return;
    };
    if data.active_mission == Some(ev.entity) {
        data.active_mission = None;
    }
    if completed {
        data.missions_finished += 1;
    }
    tracing::info!("expedition {:?} shut down (completed: {completed})", ev.entity);
}

// ---------------------------------------------------------------------------
// Per-tick runner
// ---------------------------------------------------------------------------

/// Spool time for shuttles recalled with `remaining` left on the clock.
///
/// Normally the full remaining time. Once that drops under the startup time,
/// half a second is shaved off so the jump starts before the deadline. Never
/// longer than the startup time, never negative.
pub fn recall_spool_secs(remaining: SimTime, startup_secs: f32) -> f32 {
    let remaining_secs = remaining.as_secs_f32();
    let mut spool = remaining_secs;
    if remaining < SimTime::from_secs_f32(startup_secs) {
        spool = (remaining_secs - FTL_MARGIN.as_secs_f32()).max(0.0);
    }
    spool.min(startup_secs)
}

/// Exclusive system running countdowns for every open expedition.
pub fn update_runner(world: &mut World) {
    let now = now(world);
    let startup_secs = world
        .get_resource::<SimConfig>()
        .map(|config| config.ftl_startup_time)
        .unwrap_or_default();

    let mut expeditions = world.query::<(Entity, &SalvageExpedition)>();
    let open: Vec<Entity> = expeditions
        .iter(world)
        .filter(|(_, exp)| !exp.completed)
        .map(|(uid, _)| uid)
        .collect();

    for uid in open {
        run_expedition(world, uid, now, startup_secs);
    }
}

fn run_expedition(world: &mut World, uid: Entity, now: SimTime, startup_secs: f32) {
    let Some(expedition) = world.get::<SalvageExpedition>(uid) else {
        return;
    };
    let remaining = expedition.end_time - now;
    let stage = expedition.stage;

    // Highest threshold crossed wins; at most one step per tick.
    if stage < ExpeditionStage::FinalCountdown && remaining < FINAL_COUNTDOWN {
        set_stage(world, uid, ExpeditionStage::FinalCountdown);
        announce_countdown(
            world,
            uid,
            "salvage-expedition-announcement-countdown-seconds",
            FINAL_COUNTDOWN.whole_seconds(),
        );
    } else if stage < ExpeditionStage::MusicCountdown && remaining < MUSIC_COUNTDOWN {
        start_music(world, uid);
        set_stage(world, uid, ExpeditionStage::MusicCountdown);
        announce_countdown(
            world,
            uid,
            "salvage-expedition-announcement-countdown-minutes",
            MUSIC_COUNTDOWN.whole_minutes(),
        );
    } else if stage < ExpeditionStage::Countdown && remaining < COUNTDOWN {
        set_stage(world, uid, ExpeditionStage::Countdown);
        announce_countdown(
            world,
            uid,
            "salvage-expedition-announcement-countdown-minutes",
            COUNTDOWN.whole_minutes(),
        );
    } else if remaining < SimTime::from_secs_f32(startup_secs) + FTL_MARGIN {
        let spool = recall_spool_secs(remaining, startup_secs);
        recall_shuttles(world, uid, spool);
    }
}

fn set_stage(world: &mut World, uid: Entity, stage: ExpeditionStage) {
    if let Some(mut expedition) = world.get_mut::<SalvageExpedition>(uid) {
        if expedition.advance_to(stage) {
            tracing::debug!("expedition {uid:?} entered {stage:?}");
        }
    }
}

fn announce_countdown(world: &mut World, uid: Entity, key: &str, duration: i64) {
    let text = loc(world, key, &[("duration", &duration)]);
    announce(world, uid, text);
}

/// Start the countdown music for everyone on the map. Only ever once per
/// expedition.
fn start_music(world: &mut World, uid: Entity) {
    let Some(expedition) = world.get::<SalvageExpedition>(uid) else {
        return;
    };
    if expedition.stream.is_some() {
        return;
    }
    let sound = expedition.sound.clone();

    let stream = world.get_resource_or_init::<AudioStreams>().allocate();
    if let Some(mut expedition) = world.get_mut::<SalvageExpedition>(uid) {
        expedition.stream = Some(stream);
    }
    write_command(
        world,
        HostCommand::PlaySound {
            sound,
            source: SoundSource::Map(uid),
            stream: Some(stream),
        },
    );
}

/// Send every shuttle still on the mission map, and not already jumping, to
/// the station's first grid.
fn recall_shuttles(world: &mut World, uid: Entity, spool_secs: f32) {
    let Some(station) = world.get::<SalvageExpedition>(uid).and_then(|e| e.station) else {
        return;
    };
    let Some(home) = world
        .get::<StationData>(station)
        .and_then(|data| data.grids.first().copied())
    else {
        return;
    };

    let mut shuttles =
        world.query_filtered::<(Entity, &Transform), (With<Shuttle>, Without<Ftl>)>();
    let stranded: Vec<Entity> = shuttles
        .iter(world)
        .filter(|(_, xform)| xform.map_uid == Some(uid))
        .map(|(e, _)| e)
        .collect();

    for shuttle in stranded {
        tracing::debug!("recalling {shuttle:?} from {uid:?} with {spool_secs}s spool");
        write_command(
            world,
            HostCommand::FtlTravel {
                shuttle,
                target: home,
                spool_secs,
            },
        );
    }
}

/// Exclusive system checking structure objectives. Destroyed structures are
/// dropped; an empty list completes the mission.
pub fn update_structures(world: &mut World) {
    let mut runs = world.query::<(Entity, &SalvageStructureExpedition, &SalvageExpedition)>();
    let open: Vec<(Entity, Vec<Entity>)> = runs
        .iter(world)
        .filter(|(_, _, exp)| !exp.completed)
        .map(|(uid, structure, _)| (uid, structure.structures.clone()))
        .collect();

    for (uid, structures) in open {
        let before = structures.len();
        let alive: Vec<Entity> = structures
            .into_iter()
            .filter(|e| world.get_entity(*e).is_ok())
            .collect();
        let count = alive.len();

        if let Some(mut structure) = world.get_mut::<SalvageStructureExpedition>(uid) {
            structure.structures = alive;
        }

        if count != before {
            let text = loc(
                world,
                "salvage-expedition-structure-remaining",
                &[("count", &count)],
            );
            announce(world, uid, text);
        }

        if count == 0 {
            if let Some(mut expedition) = world.get_mut::<SalvageExpedition>(uid) {
                expedition.mark_completed();
            }
            let text = loc(world, "salvage-expedition-completed", &[]);
            announce(world, uid, text);
            tracing::info!("expedition {uid:?} objectives complete");
        }
    }
}
