//! Forward-travelling shots fired by the ship

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::lane::Lane;
use crate::tuning::ProjectileTuning;

/// A single shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Lane the ship was in when it fired
    pub lane: Lane,
    pub pos: Vec3,
    /// Axial velocity (negative = forward)
    pub axial_vel: f32,
    /// Seconds left to live
    pub life: f32,
    /// Axial coordinate at spawn, for the range bound
    pub origin_z: f32,
}

impl Projectile {
    /// Axial distance covered since spawn
    pub fn travelled(&self) -> f32 {
        (self.pos.z - self.origin_z).abs()
    }
}

/// All live shots. Projectiles never interact with each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileSet {
    tuning: ProjectileTuning,
    projectiles: Vec<Projectile>,
}

impl ProjectileSet {
    pub fn new(tuning: ProjectileTuning) -> Self {
        Self {
            tuning,
            projectiles: Vec::new(),
        }
    }

    /// Raise the range bound so shots reach the farthest marker group
    pub fn set_max_range(&mut self, range: f32) {
        self.tuning.max_range = self.tuning.max_range.max(range);
    }

    pub fn max_range(&self) -> f32 {
        self.tuning.max_range
    }

    /// Spawn a shot from a ship at `origin` (ship world position)
    pub fn fire(&mut self, lane: Lane, origin: Vec3) {
        let z = origin.z - self.tuning.spawn_lead;
        self.projectiles.push(Projectile {
            lane,
            // Start slightly inside the cylinder, in front of the ship
            pos: Vec3::new(
                origin.x * self.tuning.spawn_inset,
                origin.y * self.tuning.spawn_inset,
                z,
            ),
            axial_vel: self.tuning.axial_velocity,
            life: self.tuning.lifetime,
            origin_z: z,
        });
    }

    /// Advance all shots and drop expired or out-of-range ones
    pub fn update(&mut self, dt: f32) {
        let max_range = self.tuning.max_range;
        for shot in &mut self.projectiles {
            shot.pos.z += shot.axial_vel * dt;
            shot.life -= dt;
        }
        self.projectiles
            .retain(|shot| shot.life > 0.0 && shot.travelled() <= max_range);
    }

    /// Remove the shots at `indices` (each index refers to the current order)
    pub fn consume(&mut self, indices: &[usize]) {
        if indices.is_empty() {
            return;
        }
        let mut idx = 0;
        self.projectiles.retain(|_| {
            let keep = !indices.contains(&idx);
            idx += 1;
            keep
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn as_slice(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> ProjectileSet {
        ProjectileSet::new(ProjectileTuning::default())
    }

    #[test]
    fn test_fire_spawns_inset_and_ahead() {
        let mut shots = set();
        shots.fire(Lane::East, Vec3::new(4.0, 0.0, -10.0));
        let shot = &shots.as_slice()[0];
        assert!((shot.pos.x - 3.0).abs() < 1e-6);
        assert!((shot.pos.z + 11.5).abs() < 1e-6);
        assert_eq!(shot.lane, Lane::East);
        assert_eq!(shot.axial_vel, -100.0);
    }

    #[test]
    fn test_update_moves_forward_and_expires() {
        let mut shots = set();
        shots.fire(Lane::North, Vec3::new(0.0, 4.0, 0.0));
        shots.update(0.5);
        assert_eq!(shots.len(), 1);
        assert!((shots.as_slice()[0].pos.z + 51.5).abs() < 1e-4);

        // Lifetime is 2 s
        shots.update(1.6);
        assert!(shots.is_empty());
    }

    #[test]
    fn test_range_bound_prunes() {
        let mut shots = ProjectileSet::new(ProjectileTuning {
            max_range: 50.0,
            ..Default::default()
        });
        shots.fire(Lane::North, Vec3::ZERO);
        shots.update(0.4);
        assert_eq!(shots.len(), 1);
        shots.update(0.2);
        assert!(shots.is_empty());
    }

    #[test]
    fn test_set_max_range_only_raises() {
        let mut shots = set();
        shots.set_max_range(100.0);
        assert_eq!(shots.max_range(), 800.0);
        shots.set_max_range(1200.0);
        assert_eq!(shots.max_range(), 1200.0);
    }

    #[test]
    fn test_consume_removes_exactly_the_given_shots() {
        let mut shots = set();
        for i in 0..5 {
            shots.fire(Lane::North, Vec3::new(0.0, 4.0, -(i as f32)));
        }
        shots.consume(&[1, 3]);
        let zs: Vec<f32> = shots.iter().map(|s| s.origin_z).collect();
        assert_eq!(zs, vec![-1.5, -3.5, -5.5]);
    }
}
