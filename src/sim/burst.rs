//! Destruction particle bursts
//!
//! Visual only: nothing in the round logic reads particle state.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, TAU};

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Downward pull on burst particles (units/s²)
pub const PARTICLE_GRAVITY: f32 = 2.0;

/// Fire palette: orange, yellow, red, deep orange, gray, dark gray
const FIRE_PALETTE: [[f32; 3]; 6] = [
    [1.0, 0.5, 0.0],
    [1.0, 0.8, 0.0],
    [1.0, 0.2, 0.0],
    [1.0, 0.3, 0.1],
    [0.6, 0.6, 0.6],
    [0.4, 0.4, 0.4],
];

const DEBRIS_COLOR: [f32; 3] = [0.3, 0.3, 0.35];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Fire,
    Debris,
}

/// A burst particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec3,
    pub vel: Vec3,
    /// Seconds left; also used as fade alpha once below 1
    pub life: f32,
    pub size: f32,
    pub color: [f32; 3],
}

impl Particle {
    /// Render alpha
    pub fn alpha(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }
}

/// How many particles of each population a burst spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurstCounts {
    pub fire: usize,
    pub debris: usize,
}

impl Default for BurstCounts {
    fn default() -> Self {
        Self { fire: 80, debris: 15 }
    }
}

impl BurstCounts {
    /// Scale both populations, never dropping below one particle each
    pub fn scaled(self, factor: f32) -> Self {
        let scale = |n: usize| ((n as f32 * factor).round() as usize).max(1);
        Self {
            fire: scale(self.fire),
            debris: scale(self.debris),
        }
    }

    pub fn total(&self) -> usize {
        self.fire + self.debris
    }
}

/// Direction from azimuth around the Y axis and elevation above the XZ plane
fn cone_dir(azimuth: f32, elevation: f32) -> Vec3 {
    Vec3::new(
        azimuth.cos() * elevation.cos(),
        elevation.sin(),
        azimuth.sin() * elevation.cos(),
    )
}

/// Spawn a fire + debris explosion at `origin`
pub fn spawn_burst<R: Rng + ?Sized>(origin: Vec3, counts: BurstCounts, rng: &mut R) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(counts.total());

    for _ in 0..counts.fire {
        let speed = rng.random_range(2.5..12.5);
        let dir = cone_dir(rng.random_range(0.0..TAU), rng.random_range(-FRAC_PI_2..FRAC_PI_2));
        particles.push(Particle {
            kind: ParticleKind::Fire,
            pos: origin,
            vel: dir * speed,
            life: rng.random_range(1.5..3.0),
            size: rng.random_range(0.15..0.6),
            color: FIRE_PALETTE[rng.random_range(0..FIRE_PALETTE.len())],
        });
    }

    // Heavier chunks: narrower cone with an upward kick
    for _ in 0..counts.debris {
        let speed = rng.random_range(4.0..9.0);
        let dir = cone_dir(rng.random_range(0.0..TAU), rng.random_range(-FRAC_PI_3..FRAC_PI_3));
        let mut vel = dir * speed;
        vel.y += rng.random_range(1.0..2.5);
        particles.push(Particle {
            kind: ParticleKind::Debris,
            pos: origin,
            vel,
            life: rng.random_range(2.0..4.0),
            size: rng.random_range(0.4..0.75),
            color: DEBRIS_COLOR,
        });
    }

    particles
}

/// Integrate particles and drop dead ones
pub fn update_particles(particles: &mut Vec<Particle>, dt: f32) {
    for p in particles.iter_mut() {
        p.pos += p.vel * dt;
        p.vel.y -= PARTICLE_GRAVITY * dt;
        p.life -= dt;
    }
    particles.retain(|p| p.life > 0.0);
}
