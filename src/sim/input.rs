//! Per-tick control state consumed by the simulation
//!
//! Input is level-triggered: the simulation polls "is this held right now"
//! once per tick and tracks its own edges where it needs them.

use super::lane::Lane;

/// Held-state queries the simulation makes each tick
pub trait ControlState {
    /// Is the direction that steers toward `lane` held?
    fn is_direction_held(&self, lane: Lane) -> bool;
    /// Is the fire control held?
    fn is_fire_held(&self) -> bool;

    /// First held direction in lane order (North, East, South, West)
    fn requested_lane(&self) -> Option<Lane> {
        Lane::ALL.into_iter().find(|&lane| self.is_direction_held(lane))
    }
}

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held directions, indexed by `Lane::index`
    pub held: [bool; 4],
    /// Fire held
    pub fire: bool,
}

impl TickInput {
    /// Hold a single direction
    pub fn steer(lane: Lane) -> Self {
        let mut input = Self::default();
        input.held[lane.index()] = true;
        input
    }

    /// Same input with fire held
    pub fn firing(mut self) -> Self {
        self.fire = true;
        self
    }
}

impl ControlState for TickInput {
    fn is_direction_held(&self, lane: Lane) -> bool {
        self.held[lane.index()]
    }

    fn is_fire_held(&self) -> bool {
        self.fire
    }
}
