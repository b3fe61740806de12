//! Answer markers: the lane-locked asteroids carrying quiz options
//!
//! A correct marker breaks open when shot; a wrong one only flashes and
//! stays in its lane as an obstacle. Markers are never removed from the
//! round once spawned, only flagged destroyed.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::burst::{BurstCounts, Particle, spawn_burst, update_particles};
use super::lane::Lane;
use super::projectile::Projectile;
use crate::tuning::MarkerTuning;

/// Result of a shot landing on a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Correct answer, marker destroyed
    Correct,
    /// Wrong answer, marker flashes and stays
    Incorrect,
    /// Marker was already destroyed; nothing happens
    Ignored,
}

/// A quiz answer placed in a lane at a fixed axial position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerMarker {
    /// Question this marker belongs to
    pub question_index: usize,
    pub lane: Lane,
    /// Fixed axial coordinate (shared by every marker of the question)
    pub axial: f32,
    pub text: String,
    pub correct: bool,
    pub destroyed: bool,
    /// Wrong-answer flash (1.0 on hit, decays to 0)
    pub hit_flash: f32,
    /// Seconds since destruction
    pub destruction_time: f32,
    /// Burst particles, only populated after destruction
    pub particles: Vec<Particle>,
    /// Tumble angle in degrees
    pub rotation: f32,
    pub rotation_speed: f32,
    tuning: MarkerTuning,
    burst: BurstCounts,
}

impl AnswerMarker {
    #[allow(clippy::too_many_arguments)]
    pub fn new<R: Rng + ?Sized>(
        question_index: usize,
        lane: Lane,
        axial: f32,
        text: impl Into<String>,
        correct: bool,
        tuning: MarkerTuning,
        burst: BurstCounts,
        rng: &mut R,
    ) -> Self {
        Self {
            question_index,
            lane,
            axial,
            text: text.into(),
            correct,
            destroyed: false,
            hit_flash: 0.0,
            destruction_time: 0.0,
            particles: Vec::new(),
            rotation: rng.random_range(0.0..360.0),
            rotation_speed: rng.random_range(15.0..30.0),
            tuning,
            burst,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.destroyed
    }

    /// Visual radius
    pub fn radius(&self) -> f32 {
        self.tuning.radius
    }

    pub fn hitbox_radius(&self) -> f32 {
        self.tuning.hitbox_radius()
    }

    /// Position on the tunnel, slightly in from the wall
    pub fn world_position(&self) -> Vec3 {
        let r = self.tuning.tunnel_radius * self.tuning.wall_factor;
        let theta = self.lane.angle();
        Vec3::new(r * theta.cos(), r * theta.sin(), self.axial)
    }

    /// Whether the explosion should still be drawn
    pub fn burst_visible(&self) -> bool {
        self.destroyed && self.destruction_time <= self.tuning.burst_duration
    }

    pub fn update(&mut self, dt: f32) {
        self.rotation = (self.rotation + self.rotation_speed * dt) % 360.0;
        self.hit_flash = (self.hit_flash - dt * self.tuning.flash_decay).max(0.0);

        if self.destroyed {
            self.destruction_time += dt;
            update_particles(&mut self.particles, dt);
        }
    }

    /// Does a shot overlap this marker?
    ///
    /// Lateral (cross-section) and axial distance are tested separately; the
    /// lane constraint already limits lateral freedom.
    pub fn hit_test(&self, projectile: &Projectile) -> bool {
        if self.destroyed {
            return false;
        }
        let pos = self.world_position();
        let lateral = projectile.pos.truncate().distance(pos.truncate());
        let axial = (projectile.pos.z - pos.z).abs();
        let hitbox = self.hitbox_radius();

        lateral < hitbox * self.tuning.lateral_hit_factor && axial < hitbox * self.tuning.axial_hit_factor
    }

    /// React to a shot that passed `hit_test`
    pub fn on_hit<R: Rng + ?Sized>(&mut self, rng: &mut R) -> HitOutcome {
        if self.destroyed {
            return HitOutcome::Ignored;
        }
        if self.correct {
            self.destroy(rng);
            HitOutcome::Correct
        } else {
            self.hit_flash = 1.0;
            HitOutcome::Incorrect
        }
    }

    /// Is the ship touching this marker?
    pub fn check_ship_collision(&self, ship_pos: Vec3, ship_lane: Lane) -> bool {
        if self.destroyed || ship_lane != self.lane {
            return false;
        }
        (ship_pos.z - self.axial).abs() < self.hitbox_radius() + self.tuning.ship_radius
    }

    /// Break the marker open with a particle burst. No-op if already destroyed.
    pub fn destroy<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.destruction_time = 0.0;
        self.particles = spawn_burst(self.world_position(), self.burst, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::projectile::ProjectileSet;
    use crate::tuning::ProjectileTuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn marker(lane: Lane, correct: bool) -> (AnswerMarker, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(11);
        let m = AnswerMarker::new(
            0,
            lane,
            -60.0,
            "Jupiter",
            correct,
            MarkerTuning::default(),
            BurstCounts::default(),
            &mut rng,
        );
        (m, rng)
    }

    /// A shot fired from a ship settled in `lane` at the given axial position
    fn shot(lane: Lane, z: f32) -> Projectile {
        let mut set = ProjectileSet::new(ProjectileTuning {
            spawn_lead: 0.0,
            ..Default::default()
        });
        let theta = lane.angle();
        set.fire(lane, Vec3::new(4.0 * theta.cos(), 4.0 * theta.sin(), z));
        set.as_slice()[0].clone()
    }

    #[test]
    fn test_world_position_inside_wall() {
        let (m, _) = marker(Lane::East, true);
        let pos = m.world_position();
        assert!((pos.x - 3.025).abs() < 1e-4);
        assert!(pos.y.abs() < 1e-4);
        assert_eq!(pos.z, -60.0);
    }

    #[test]
    fn test_hit_test_same_lane_only() {
        let (m, _) = marker(Lane::North, true);
        assert!(m.hit_test(&shot(Lane::North, -60.0)));
        assert!(m.hit_test(&shot(Lane::North, -57.0)));
        // Axial threshold is 1.8 * 2 = 3.6
        assert!(!m.hit_test(&shot(Lane::North, -55.0)));
        // Neighbouring lanes are far outside the lateral threshold
        assert!(!m.hit_test(&shot(Lane::East, -60.0)));
        assert!(!m.hit_test(&shot(Lane::West, -60.0)));
        assert!(!m.hit_test(&shot(Lane::South, -60.0)));
    }

    #[test]
    fn test_correct_hit_destroys_with_burst() {
        let (mut m, mut rng) = marker(Lane::North, true);
        assert_eq!(m.on_hit(&mut rng), HitOutcome::Correct);
        assert!(m.destroyed);
        assert_eq!(m.particles.len(), 95);
        assert!(!m.hit_test(&shot(Lane::North, -60.0)));
    }

    #[test]
    fn test_wrong_hit_only_flashes() {
        let (mut m, mut rng) = marker(Lane::North, false);
        assert_eq!(m.on_hit(&mut rng), HitOutcome::Incorrect);
        assert!(!m.destroyed);
        assert!(m.particles.is_empty());
        assert_eq!(m.hit_flash, 1.0);

        m.update(0.2);
        assert!((m.hit_flash - 0.4).abs() < 1e-5);
        m.update(1.0);
        assert_eq!(m.hit_flash, 0.0);
    }

    #[test]
    fn test_hit_is_idempotent() {
        let (mut m, mut rng) = marker(Lane::North, true);
        m.on_hit(&mut rng);
        m.update(0.5);
        let count = m.particles.len();
        let first_vel = m.particles[0].vel;

        assert_eq!(m.on_hit(&mut rng), HitOutcome::Ignored);
        m.destroy(&mut rng);
        assert_eq!(m.particles.len(), count);
        assert_eq!(m.particles[0].vel, first_vel);
        assert!((m.destruction_time - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ship_collision() {
        let (mut m, mut rng) = marker(Lane::South, false);
        let at = |z: f32| Vec3::new(0.0, -4.0, z);
        // Contact range is hitbox 1.8 + ship 1.0
        assert!(m.check_ship_collision(at(-58.0), Lane::South));
        assert!(!m.check_ship_collision(at(-57.0), Lane::South));
        assert!(!m.check_ship_collision(at(-60.0), Lane::East));

        m.destroy(&mut rng);
        assert!(!m.check_ship_collision(at(-60.0), Lane::South));
    }

    #[test]
    fn test_burst_stops_rendering() {
        let (mut m, mut rng) = marker(Lane::West, true);
        m.destroy(&mut rng);
        assert!(m.burst_visible());
        for _ in 0..50 {
            m.update(0.1);
        }
        assert!(!m.burst_visible());
        assert!(m.particles.is_empty());
    }
}
