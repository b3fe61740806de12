//! Hyperspace warp tunnel backdrop
//!
//! Stars, speed lines and boundary rings scroll toward the camera with the
//! ship's forward speed. All positions are relative to the ship's axial
//! coordinate (the renderer translates the tunnel along with the ship).

use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::lane::Lane;
use crate::consts::STARFIELD_SEED;

pub const STAR_COUNT: usize = 1500;
pub const SPEED_LINE_COUNT: usize = 200;
pub const RING_SPACING: f32 = 25.0;
pub const RING_COUNT: usize = 20;
pub const GUIDE_DOTS_PER_LANE: usize = 15;

const STAR_RANGE: f32 = 500.0;
const SPEED_LINE_RANGE: f32 = 250.0;
const SPEED_LINE_MULTIPLIER: f32 = 12.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub angle: f32,
    pub r: f32,
    pub z_offset: f32,
    /// Parallax factor (distant stars barely move)
    pub speed_mult: f32,
    pub brightness: f32,
    pub size: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedLine {
    pub angle: f32,
    pub r: f32,
    pub z_offset: f32,
    pub length: f32,
    pub brightness: f32,
}

/// A star ready to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleStar {
    pub pos: Vec3,
    pub brightness: f32,
    pub size: f32,
}

/// A speed streak ready to draw, head nearest the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleStreak {
    pub head: Vec3,
    pub tail: Vec3,
    pub brightness: f32,
}

/// Wrap a phase into [0, 1)
fn wrap_unit(x: f32) -> f32 {
    let p = x.rem_euclid(1.0);
    if p >= 1.0 { 0.0 } else { p }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarpTunnel {
    pub radius: f32,
    scroll_offset: f32,
    stars: Vec<Star>,
    speed_lines: Vec<SpeedLine>,
}

impl WarpTunnel {
    /// Build the tunnel with a fixed-seed star field; `density` scales both populations
    pub fn new(radius: f32, density: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(STARFIELD_SEED);
        let star_count = (STAR_COUNT as f32 * density).round() as usize;
        let line_count = (SPEED_LINE_COUNT as f32 * density).round() as usize;

        let stars = (0..star_count)
            .map(|_| Star {
                angle: rng.random_range(0.0..TAU),
                r: rng.random_range(15.0..50.0) * radius,
                z_offset: rng.random_range(0.0..STAR_RANGE),
                speed_mult: rng.random_range(0.05..0.15),
                brightness: rng.random_range(0.3..0.7),
                size: rng.random_range(0.5..1.2),
            })
            .collect();

        let speed_lines = (0..line_count)
            .map(|_| SpeedLine {
                angle: rng.random_range(0.0..TAU),
                r: rng.random_range(1.8..3.5) * radius,
                z_offset: rng.random_range(0.0..STAR_RANGE),
                length: rng.random_range(20.0..60.0),
                brightness: rng.random_range(0.3..0.6),
            })
            .collect();

        Self {
            radius,
            scroll_offset: 0.0,
            stars,
            speed_lines,
        }
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    pub fn speed_line_count(&self) -> usize {
        self.speed_lines.len()
    }

    pub fn update(&mut self, dt: f32, forward_speed: f32) {
        self.scroll_offset += forward_speed * dt;
    }

    /// Stars inside the visible depth band
    pub fn visible_stars(&self) -> impl Iterator<Item = VisibleStar> + '_ {
        self.stars.iter().filter_map(move |star| {
            let phase = star.z_offset / STAR_RANGE;
            let progress = wrap_unit(phase + self.scroll_offset * star.speed_mult / STAR_RANGE);
            // 0 = far end, 1 = at the camera
            let z = -STAR_RANGE * (1.0 - progress);
            if !(-490.0..=5.0).contains(&z) {
                return None;
            }
            Some(VisibleStar {
                pos: Vec3::new(star.r * star.angle.cos(), star.r * star.angle.sin(), z),
                brightness: star.brightness,
                size: star.size,
            })
        })
    }

    /// Speed streaks inside the visible depth band
    pub fn visible_streaks(&self) -> impl Iterator<Item = VisibleStreak> + '_ {
        self.speed_lines.iter().filter_map(move |line| {
            let phase = line.z_offset / SPEED_LINE_RANGE;
            let progress =
                wrap_unit(phase + self.scroll_offset * SPEED_LINE_MULTIPLIER / SPEED_LINE_RANGE);
            let z = -SPEED_LINE_RANGE * (1.0 - progress);
            if !(-240.0..=10.0).contains(&z) {
                return None;
            }
            let (x, y) = (line.r * line.angle.cos(), line.r * line.angle.sin());
            Some(VisibleStreak {
                head: Vec3::new(x, y, z),
                tail: Vec3::new(x, y, z - line.length),
                brightness: line.brightness,
            })
        })
    }

    /// Axial offsets of the boundary rings
    pub fn ring_offsets(&self) -> impl Iterator<Item = f32> + '_ {
        let ring_offset = self.scroll_offset.rem_euclid(RING_SPACING);
        (0..RING_COUNT)
            .map(move |ring| -(ring as f32) * RING_SPACING + ring_offset)
            .filter(|z| (-480.0..=10.0).contains(z))
    }

    /// Guide dots running down each lane
    pub fn lane_guides(&self) -> impl Iterator<Item = (Lane, Vec3)> + '_ {
        let ring_offset = self.scroll_offset.rem_euclid(RING_SPACING);
        let r = self.radius * 0.95;
        Lane::ALL.into_iter().flat_map(move |lane| {
            let theta = lane.angle();
            (0..GUIDE_DOTS_PER_LANE).filter_map(move |ring| {
                let z = -(ring as f32) * RING_SPACING + ring_offset;
                (-350.0..=10.0)
                    .contains(&z)
                    .then(|| (lane, Vec3::new(r * theta.cos(), r * theta.sin(), z)))
            })
        })
    }
}
