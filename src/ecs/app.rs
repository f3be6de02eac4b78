use bevy_app::App;
use bevy_ecs::message::MessageRegistry;
use bevy_ecs::schedule::IntoScheduleConfigs;

use super::bus::{dispatch_queued, register_event};
use super::clock::SimClock;
use super::commands::{HostCommand, apply_host_commands};
use super::events::{
    ActivateInWorld, EntityTerminating, Examined, FtlCompleted, FtlRequest, FtlStarted, GetVerbs,
    ToggleAction, UseInHand,
};
use super::resources::{AudioStreams, HostLog, Localization, MapIndex, Replication, SimConfig};
use super::schedule::{SimPhase, configure_sim_schedule};
use super::systems::helpers::flush_replication;

/// Build a headless Bevy app with simulation clock, core resources,
/// event registration, event dispatch and the host command applicator.
///
/// Gameplay systems come from plugins (see `StationSimPlugin`).
///
/// Manual tick control:
/// ```no_run
/// # use station_sim::ecs::{build_sim_app, SimTick, StationSimPlugin};
/// # use station_sim::ecs::resources::SimConfig;
/// let mut app = build_sim_app(SimConfig::default());
/// app.add_plugins(StationSimPlugin);
/// for _ in 0..30 {  // one second at the default tick rate
///     app.world_mut().run_schedule(SimTick);
/// }
/// ```
pub fn build_sim_app(config: SimConfig) -> App {
    let mut app = App::empty();

    // Core resources
    app.insert_resource(SimClock::new(config.tick_rate));
    app.insert_resource(config);
    app.insert_resource(HostLog::new());
    app.insert_resource(MapIndex::new());
    app.insert_resource(Localization::new());
    app.init_resource::<AudioStreams>();
    app.init_resource::<Replication>();

    // Register message types
    let world = app.world_mut();
    MessageRegistry::register_message::<HostCommand>(world);
    register_event::<ActivateInWorld>(world);
    register_event::<ToggleAction>(world);
    register_event::<UseInHand>(world);
    register_event::<Examined>(world);
    register_event::<GetVerbs>(world);
    register_event::<EntityTerminating>(world);
    register_event::<FtlRequest>(world);
    register_event::<FtlStarted>(world);
    register_event::<FtlCompleted>(world);

    // Build schedule with message rotation + dispatch + applicator
    let mut schedule = configure_sim_schedule();
    schedule.add_systems(bevy_ecs::message::message_update_system.in_set(SimPhase::PreUpdate));
    schedule.add_systems(
        (
            dispatch_queued::<ActivateInWorld>,
            dispatch_queued::<ToggleAction>,
            dispatch_queued::<UseInHand>,
        )
            .chain()
            .in_set(SimPhase::Input),
    );
    schedule.add_systems(
        (
            dispatch_queued::<FtlRequest>,
            dispatch_queued::<FtlStarted>,
            dispatch_queued::<FtlCompleted>,
        )
            .chain()
            .in_set(SimPhase::Reactions),
    );
    schedule.add_systems(apply_host_commands.in_set(SimPhase::PostUpdate));
    schedule.add_systems(flush_replication.in_set(SimPhase::Last));
    app.add_schedule(schedule);
    app
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use bevy_ecs::system::Res;

    use super::*;
    use crate::ecs::bus::queue_event;
    use crate::ecs::conditions::any_active_lights;
    use crate::ecs::schedule::SimTick;
    use crate::ecs::time::SimTime;

    #[test]
    fn app_builds_without_panic() {
        let _app = build_sim_app(SimConfig::default());
    }

    #[test]
    fn clock_starts_at_zero_with_configured_rate() {
        let app = build_sim_app(SimConfig {
            tick_rate: 10,
            ..SimConfig::default()
        });
        let clock = app.world().resource::<SimClock>();
        assert_eq!(clock.cur_time, SimTime::ZERO);
        assert_eq!(clock.frame_time, SimTime::from_millis(100));
    }

    #[test]
    fn ten_ticks_at_ten_hertz_advance_one_second() {
        let mut app = build_sim_app(SimConfig {
            tick_rate: 10,
            ..SimConfig::default()
        });
        for _ in 0..10 {
            app.world_mut().run_schedule(SimTick);
        }
        let clock = app.world().resource::<SimClock>();
        assert_eq!(clock.tick_count, 10);
        assert_eq!(clock.cur_time, SimTime::from_secs(1));
    }

    #[test]
    fn queued_events_are_drained_each_tick() {
        let mut app = build_sim_app(SimConfig::default());
        let a = app.world_mut().spawn_empty().id();
        queue_event(app.world_mut(), UseInHand::new(a, a));
        app.world_mut().run_schedule(SimTick);

        let pending = app.world().resource::<bevy_ecs::message::Messages<UseInHand>>();
        assert!(pending.is_empty());
    }

    #[test]
    fn conditioned_system_skips_without_lights() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let mut app = build_sim_app(SimConfig::default());
        app.add_systems(
            SimTick,
            (move |_clock: Res<SimClock>| {
                counter_clone.fetch_add(1, Ordering::Relaxed);
            })
            .run_if(any_active_lights)
            .in_set(SimPhase::Update),
        );

        app.world_mut().run_schedule(SimTick);
        assert_eq!(counter.load(Ordering::Relaxed), 0);

        app.world_mut().spawn(crate::ecs::components::ActiveLight);
        app.world_mut().run_schedule(SimTick);
        assert_eq!(counter.load(Ordering::Relaxed), 1);
    }
}
