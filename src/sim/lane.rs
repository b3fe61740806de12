//! The four cardinal lanes around the tunnel wall
//!
//! Lanes are indexed clockwise as seen by the player: North, East, South,
//! West. Angles follow the unit circle, so North points +Y and East +X.

use std::f32::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::consts::LANE_COUNT;

/// A cardinal lane on the tunnel wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    North,
    East,
    South,
    West,
}

impl Lane {
    /// All lanes in index order
    pub const ALL: [Lane; LANE_COUNT] = [Lane::North, Lane::East, Lane::South, Lane::West];

    /// Lane for any index, wrapped into 0..4 (negative indices included)
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(LANE_COUNT as i32) as usize]
    }

    pub fn index(self) -> usize {
        match self {
            Lane::North => 0,
            Lane::East => 1,
            Lane::South => 2,
            Lane::West => 3,
        }
    }

    /// Fixed wall angle (radians)
    pub fn angle(self) -> f32 {
        match self {
            Lane::North => FRAC_PI_2,
            Lane::East => 0.0,
            Lane::South => 3.0 * FRAC_PI_2,
            Lane::West => PI,
        }
    }

    /// Clockwise step count from `self` to `other`, in 0..4
    ///
    /// 1 = clockwise neighbour, 3 = counter-clockwise neighbour, 2 = opposite.
    pub fn offset_to(self, other: Lane) -> usize {
        (other.index() + LANE_COUNT - self.index()) % LANE_COUNT
    }

    pub fn opposite(self) -> Lane {
        Lane::from_index(self.index() as i32 + 2)
    }

    pub fn name(self) -> &'static str {
        match self {
            Lane::North => "North",
            Lane::East => "East",
            Lane::South => "South",
            Lane::West => "West",
        }
    }
}
