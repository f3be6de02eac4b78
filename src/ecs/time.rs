use std::fmt;
use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

pub const MICROS_PER_MILLI: i64 = 1_000;
pub const MICROS_PER_SECOND: i64 = 1_000_000;
pub const SECONDS_PER_MINUTE: i64 = 60;
pub const MICROS_PER_MINUTE: i64 = MICROS_PER_SECOND * SECONDS_PER_MINUTE;

/// Simulation time as a signed microsecond count.
///
/// Used both as an instant (time since round start) and as a span, the same
/// way the game treats deadlines: `end_time - now` is a `SimTime` that goes
/// negative once the deadline has passed. Natural `i64` ordering equals
/// chronological ordering.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SimTime(i64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    pub const fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis * MICROS_PER_MILLI)
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self(secs * MICROS_PER_SECOND)
    }

    pub const fn from_minutes(minutes: i64) -> Self {
        Self(minutes * MICROS_PER_MINUTE)
    }

    /// Rounds to the nearest microsecond.
    pub fn from_secs_f32(secs: f32) -> Self {
        Self::from_secs_f64(secs as f64)
    }

    pub fn from_secs_f64(secs: f64) -> Self {
        Self((secs * MICROS_PER_SECOND as f64).round() as i64)
    }

    pub fn as_micros(self) -> i64 {
        self.0
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / MICROS_PER_SECOND as f64
    }

    pub fn as_secs_f32(self) -> f32 {
        self.as_secs_f64() as f32
    }

    /// Whole minutes, truncated toward zero.
    pub fn whole_minutes(self) -> i64 {
        self.0 / MICROS_PER_MINUTE
    }

    /// Whole seconds, truncated toward zero.
    pub fn whole_seconds(self) -> i64 {
        self.0 / MICROS_PER_SECOND
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for SimTime {
    type Output = SimTime;

    fn add(self, rhs: SimTime) -> SimTime {
        SimTime(self.0 + rhs.0)
    }
}

impl AddAssign for SimTime {
    fn add_assign(&mut self, rhs: SimTime) {
        self.0 += rhs.0;
    }
}

impl Sub for SimTime {
    type Output = SimTime;

    fn sub(self, rhs: SimTime) -> SimTime {
        SimTime(self.0 - rhs.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let total_secs = abs / MICROS_PER_SECOND as u64;
        let millis = (abs % MICROS_PER_SECOND as u64) / MICROS_PER_MILLI as u64;
        write!(
            f,
            "{sign}{:02}:{:02}.{:03}",
            total_secs / 60,
            total_secs % 60,
            millis
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_agree() {
        assert_eq!(SimTime::from_minutes(2), SimTime::from_secs(120));
        assert_eq!(SimTime::from_secs(1), SimTime::from_millis(1_000));
        assert_eq!(SimTime::from_secs_f32(0.5), SimTime::from_millis(500));
    }

    #[test]
    fn spans_can_go_negative() {
        let deadline = SimTime::from_secs(10);
        let now = SimTime::from_secs(12);
        let remaining = deadline - now;
        assert!(remaining.is_negative());
        assert_eq!(remaining.whole_seconds(), -2);
        assert!(remaining < SimTime::from_secs(30));
    }

    #[test]
    fn whole_minutes_truncates() {
        assert_eq!(SimTime::from_secs(299).whole_minutes(), 4);
        assert_eq!(SimTime::from_secs(300).whole_minutes(), 5);
        assert_eq!(SimTime::from_secs(59).whole_minutes(), 0);
    }

    #[test]
    fn display_format() {
        assert_eq!(SimTime::from_millis(125_250).to_string(), "02:05.250");
        assert_eq!(SimTime::from_secs(-3).to_string(), "-00:03.000");
    }
}
