//! Cardinal motion controller for the player ship
//!
//! The ship rides the inside of the tunnel at one of four lanes and flies
//! forward (numerically decreasing axial coordinate) at constant speed.
//! A lane change can only start once the ship has settled in its lane; the
//! rendered angle eases between lanes along the shortest arc.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::input::ControlState;
use super::lane::Lane;
use super::projectile::ProjectileSet;
use crate::tuning::{MotionTuning, ProjectileTuning};
use crate::{lerp_angle, smoothstep};

/// Lane the ship starts every round in
pub const START_LANE: Lane = Lane::South;

/// The player ship's motion state and its shots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardinalShip {
    tuning: MotionTuning,
    lane: Lane,
    target_lane: Lane,
    /// 1.0 = settled in `lane`
    progress: f32,
    /// Rendered angle (radians, may leave [0, 2π) mid-transition)
    angle: f32,
    /// Axial coordinate
    axial: f32,
    /// Visual roll in degrees
    tilt: f32,
    fire_cooldown: f32,
    /// Cosmetic clock for ship model animation
    animation_time: f32,
    projectiles: ProjectileSet,
}

impl CardinalShip {
    pub fn new(tuning: MotionTuning, projectile_tuning: ProjectileTuning) -> Self {
        Self {
            tuning,
            lane: START_LANE,
            target_lane: START_LANE,
            progress: 1.0,
            angle: START_LANE.angle(),
            axial: 0.0,
            tilt: 0.0,
            fire_cooldown: 0.0,
            animation_time: 0.0,
            projectiles: ProjectileSet::new(projectile_tuning),
        }
    }

    /// Lane the ship currently counts as being in (changes when a transition lands)
    pub fn lane(&self) -> Lane {
        self.lane
    }

    pub fn target_lane(&self) -> Lane {
        self.target_lane
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_settled(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn axial(&self) -> f32 {
        self.axial
    }

    pub fn forward_speed(&self) -> f32 {
        self.tuning.forward_speed
    }

    pub fn tilt(&self) -> f32 {
        self.tilt
    }

    pub fn animation_time(&self) -> f32 {
        self.animation_time
    }

    pub fn fire_cooldown(&self) -> f32 {
        self.fire_cooldown
    }

    pub fn projectiles(&self) -> &ProjectileSet {
        &self.projectiles
    }

    pub(crate) fn projectiles_mut(&mut self) -> &mut ProjectileSet {
        &mut self.projectiles
    }

    /// Convert the cylindrical position to world coordinates
    pub fn world_position(&self) -> Vec3 {
        let r = self.tuning.cylinder_radius;
        Vec3::new(r * self.angle.cos(), r * self.angle.sin(), self.axial)
    }

    /// Advance one tick: lane request, easing, forward travel, firing, shots
    pub fn update(&mut self, dt: f32, controls: &dyn ControlState) {
        self.animation_time += dt;
        let requested = controls.requested_lane();

        if self.is_settled() {
            if let Some(lane) = requested.filter(|&l| l != self.lane) {
                self.begin_transition(lane);
            }
        }

        if self.progress < 1.0 {
            self.progress = (self.progress + self.tuning.transition_speed * dt).min(1.0);
            let eased = smoothstep(self.progress);
            self.angle = lerp_angle(self.lane.angle(), self.target_lane.angle(), eased);
            self.tilt = self.transition_tilt(eased);

            if self.progress >= 1.0 {
                self.settle();
                // Chain straight into the next lane if it is still requested
                if let Some(lane) = requested.filter(|&l| l != self.lane) {
                    self.begin_transition(lane);
                }
            }
        } else {
            self.tilt *= self.tuning.tilt_decay;
        }

        // Constant forward travel
        self.axial -= self.tuning.forward_speed * dt;

        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        if controls.is_fire_held() {
            self.try_fire();
        }

        self.projectiles.update(dt);
    }

    /// Fire if the cooldown allows it. Returns whether a shot was spawned.
    pub fn try_fire(&mut self) -> bool {
        if self.fire_cooldown > 0.0 {
            return false;
        }
        let origin = self.world_position();
        self.projectiles.fire(self.lane, origin);
        self.fire_cooldown = self.tuning.fire_delay;
        true
    }

    fn begin_transition(&mut self, target: Lane) {
        self.target_lane = target;
        self.progress = 0.0;
        log::debug!("Ship leaving {} for {}", self.lane.name(), target.name());
    }

    fn settle(&mut self) {
        self.lane = self.target_lane;
        self.angle = self.lane.angle();
        self.progress = 1.0;
    }

    /// Roll toward the sweep direction, fading out as the move eases in.
    /// Clockwise neighbours roll negative; counter-clockwise neighbours and
    /// half-turns (which always sweep +π) roll positive.
    fn transition_tilt(&self, eased: f32) -> f32 {
        let remaining = 1.0 - eased;
        match self.lane.offset_to(self.target_lane) {
            1 => -self.tuning.max_tilt_deg * remaining,
            2 | 3 => self.tuning.max_tilt_deg * remaining,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::input::TickInput;
    use proptest::prelude::*;

    fn ship() -> CardinalShip {
        CardinalShip::new(MotionTuning::default(), ProjectileTuning::default())
    }

    fn run(ship: &mut CardinalShip, input: &TickInput, ticks: usize) {
        for _ in 0..ticks {
            ship.update(SIM_DT, input);
        }
    }

    #[test]
    fn test_starts_settled_in_south() {
        let ship = ship();
        assert_eq!(ship.lane(), Lane::South);
        assert!(ship.is_settled());
        let pos = ship.world_position();
        assert!(pos.x.abs() < 1e-5);
        assert!((pos.y + 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_lane_change_takes_transition_time() {
        let mut ship = ship();
        let west = TickInput::steer(Lane::West);
        ship.update(SIM_DT, &west);
        assert_eq!(ship.target_lane(), Lane::West);
        assert!(!ship.is_settled());
        assert_eq!(ship.lane(), Lane::South);

        // 0.2 s at 120 Hz is 24 ticks
        assert!(ship.progress() < 0.1);
        run(&mut ship, &west, 26);
        assert!(ship.is_settled());
        assert_eq!(ship.lane(), Lane::West);
        assert!((ship.angle() - Lane::West.angle()).abs() < 1e-5);
    }

    #[test]
    fn test_releasing_mid_transition_still_lands() {
        let mut ship = ship();
        ship.update(SIM_DT, &TickInput::steer(Lane::East));
        run(&mut ship, &TickInput::default(), 40);
        assert_eq!(ship.lane(), Lane::East);
        assert!(ship.is_settled());
    }

    #[test]
    fn test_no_retarget_while_transitioning() {
        let mut ship = ship();
        ship.update(SIM_DT, &TickInput::steer(Lane::East));
        ship.update(SIM_DT, &TickInput::steer(Lane::West));
        assert_eq!(ship.target_lane(), Lane::East);
    }

    #[test]
    fn test_chained_transition_has_no_idle_tick() {
        let mut ship = ship();
        ship.update(0.1, &TickInput::steer(Lane::East));
        assert_eq!(ship.target_lane(), Lane::East);

        // North is ignored mid-move, then picked up on the landing tick itself
        ship.update(0.2, &TickInput::steer(Lane::North));
        assert_eq!(ship.lane(), Lane::East);
        assert_eq!(ship.target_lane(), Lane::North);
        assert_eq!(ship.progress(), 0.0);
    }

    #[test]
    fn test_half_turn_sweeps_positive() {
        let mut ship = ship();
        let north = TickInput::steer(Lane::North);
        // South (270°) -> North (90°) via +π passes East (360°)
        run(&mut ship, &north, 12);
        let deg = ship.angle().to_degrees();
        assert!(deg > 270.0 && deg < 450.0, "angle was {deg}");
        assert!(ship.tilt() > 0.0);
        run(&mut ship, &north, 14);
        assert_eq!(ship.lane(), Lane::North);
    }

    #[test]
    fn test_tilt_direction() {
        let mut cw = ship();
        cw.update(SIM_DT, &TickInput::steer(Lane::West)); // South -> West is clockwise
        assert!(cw.tilt() < 0.0);

        let mut ccw = ship();
        ccw.update(SIM_DT, &TickInput::steer(Lane::East)); // South -> East is counter-clockwise
        assert!(ccw.tilt() > 0.0);
    }

    #[test]
    fn test_fire_cooldown() {
        let mut ship = ship();
        assert!(ship.try_fire());
        assert!(!ship.try_fire());
        assert_eq!(ship.projectiles().len(), 1);

        // Holding fire for 0.1 s (less than the 0.2 s delay) adds nothing
        run(&mut ship, &TickInput::default().firing(), 12);
        assert_eq!(ship.projectiles().len(), 1);

        // Past the delay a second shot goes out
        run(&mut ship, &TickInput::default().firing(), 13);
        assert_eq!(ship.projectiles().len(), 2);
    }

    #[test]
    fn test_shots_carry_firing_lane() {
        let mut ship = ship();
        run(&mut ship, &TickInput::steer(Lane::West), 30);
        ship.try_fire();
        assert_eq!(ship.projectiles().as_slice()[0].lane, Lane::West);
    }

    fn lane_strategy() -> impl Strategy<Value = TickInput> {
        (any::<[bool; 4]>(), any::<bool>()).prop_map(|(held, fire)| TickInput { held, fire })
    }

    proptest! {
        #[test]
        fn prop_transition_never_targets_current_lane(
            inputs in proptest::collection::vec(lane_strategy(), 1..300),
            dt in 0.001f32..0.05,
        ) {
            let mut ship = ship();
            for input in &inputs {
                ship.update(dt, input);
                prop_assert!(ship.lane().index() < 4);
                if ship.progress() < 1.0 {
                    prop_assert_ne!(ship.target_lane(), ship.lane());
                }
            }
        }

        #[test]
        fn prop_forward_travel_is_exact(
            inputs in proptest::collection::vec(lane_strategy(), 1..200),
            dt in 0.0f32..0.05,
        ) {
            let mut ship = ship();
            for input in &inputs {
                let before = ship.axial();
                ship.update(dt, input);
                prop_assert!(ship.axial() <= before);
                prop_assert!((before - ship.axial() - 12.0 * dt).abs() < 1e-3);
            }
        }
    }
}
