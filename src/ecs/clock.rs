use bevy_ecs::resource::Resource;
use bevy_ecs::system::ResMut;

use super::time::SimTime;

/// Simulation clock resource tracking the current time and tick count.
///
/// Advances by one fixed frame per tick. The `advance_clock` system moves the
/// clock forward at the end of each tick (in `SimPhase::Last`), so systems see
/// the current time before it advances.
#[derive(Resource, Debug, Clone)]
pub struct SimClock {
    pub cur_time: SimTime,
    pub frame_time: SimTime,
    pub tick_count: u64,
}

impl SimClock {
    /// Clock starting at round time zero, ticking `tick_rate` times per second.
    pub fn new(tick_rate: u32) -> Self {
        let tick_rate = tick_rate.max(1);
        Self {
            cur_time: SimTime::ZERO,
            frame_time: SimTime::from_secs_f64(1.0 / tick_rate as f64),
            tick_count: 0,
        }
    }

    /// Frame length in seconds, as handed to per-tick updates.
    pub fn frame_secs(&self) -> f32 {
        self.frame_time.as_secs_f32()
    }

    /// Advance the clock by one frame.
    pub fn advance(&mut self) {
        self.cur_time += self.frame_time;
        self.tick_count += 1;
    }
}

/// Bevy system that advances the simulation clock by one frame.
/// Registered in `SimPhase::Last` so all other systems see the current
/// time before it advances.
pub fn advance_clock(mut clock: ResMut<SimClock>) {
    clock.advance();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clock_starts_at_zero() {
        let clock = SimClock::new(30);
        assert_eq!(clock.cur_time, SimTime::ZERO);
        assert_eq!(clock.tick_count, 0);
    }

    #[test]
    fn one_tick_per_second() {
        let mut clock = SimClock::new(1);
        assert_eq!(clock.frame_time, SimTime::from_secs(1));
        for _ in 0..60 {
            clock.advance();
        }
        assert_eq!(clock.cur_time, SimTime::from_minutes(1));
        assert_eq!(clock.tick_count, 60);
    }

    #[test]
    fn thirty_ticks_are_about_a_second() {
        let mut clock = SimClock::new(30);
        for _ in 0..30 {
            clock.advance();
        }
        let drift = (clock.cur_time - SimTime::from_secs(1)).as_micros().abs();
        assert!(drift < 100, "drift {drift}us");
    }

    #[test]
    fn zero_tick_rate_is_clamped() {
        let clock = SimClock::new(0);
        assert_eq!(clock.frame_time, SimTime::from_secs(1));
    }
}
