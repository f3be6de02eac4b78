use bevy_app::App;

use crate::ecs::clock::SimClock;
use crate::ecs::schedule::SimTick;
use crate::ecs::time::SimTime;

/// Run `n` simulation ticks.
pub fn tick(app: &mut App, n: u32) {
    for _ in 0..n {
        app.world_mut().run_schedule(SimTick);
    }
}

/// Run as many ticks as it takes for `secs` of round time to pass.
pub fn tick_seconds(app: &mut App, secs: u32) {
    let target = current_time(app) + SimTime::from_secs(secs as i64);
    while current_time(app) < target {
        app.world_mut().run_schedule(SimTick);
    }
}

/// Return the current round time from the clock resource.
pub fn current_time(app: &App) -> SimTime {
    app.world().resource::<SimClock>().cur_time
}
