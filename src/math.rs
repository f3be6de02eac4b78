//! Small numeric helpers shared by the gameplay systems.

use std::f32::consts::PI;
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

const CLOSE_TO_PERCENT_TOLERANCE: f64 = 0.00001;

/// Relative float comparison: `a` and `b` are within `tolerance` of the
/// larger magnitude. The allowed difference never drops below `tolerance`
/// itself, so values within `tolerance` of zero count as zero.
pub fn close_to_percent(a: f64, b: f64, tolerance: f64) -> bool {
    let a_abs = a.abs();
    let b_abs = b.abs();
    let epsilon = (tolerance * a_abs.max(b_abs)).max(tolerance);
    (a - b).abs() <= epsilon
}

/// `close_to_percent` with the default 0.001% tolerance.
pub fn close_to(a: f64, b: f64) -> bool {
    close_to_percent(a, b, CLOSE_TO_PERCENT_TOLERANCE)
}

/// Map `actual` in `[0, max]` onto the nearest of `levels` evenly spaced steps
/// (`0..levels`). Values at or beyond the ends clamp. Ties resolve to the
/// lower level.
pub fn round_to_nearest_levels(actual: f64, max: f64, levels: u8) -> u8 {
    debug_assert!(levels > 1, "need at least two levels");
    if levels <= 1 || actual <= 0.0 || max <= 0.0 {
        return 0;
    }
    if actual >= max {
        return levels - 1;
    }

    let step = max / (levels - 1) as f64;
    let mut nearest = 0u8;
    let mut nearest_diff = actual;
    for i in 1..levels {
        let diff = (actual - i as f64 * step).abs();
        if diff < nearest_diff {
            nearest_diff = diff;
            nearest = i;
        }
    }
    nearest
}

/// Eight-way compass direction. `+x` is east, `+y` is north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    const ORDER: [Direction; 8] = [
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// Snap a vector to the nearest of the eight compass directions.
    /// Returns `None` for the zero vector.
    pub fn from_vector(v: Vec2) -> Option<Direction> {
        if v == Vec2::ZERO {
            return None;
        }
        let mut angle = v.y.atan2(v.x);
        if angle < 0.0 {
            angle += 2.0 * PI;
        }
        let sector = ((angle + PI / 8.0) / (PI / 4.0)).floor() as usize % 8;
        Some(Self::ORDER[sector])
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::East => "east",
            Direction::NorthEast => "north-east",
            Direction::North => "north",
            Direction::NorthWest => "north-west",
            Direction::West => "west",
            Direction::SouthWest => "south-west",
            Direction::South => "south",
            Direction::SouthEast => "south-east",
        };
        f.write_str(name)
    }
}
