//! Tunnel Quiz - the warp-tunnel quiz minigame of a solar system arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, projectiles, answer markers, round state machine)
//! - `renderer`: Draw-call surface and HUD model consumed by a rendering backend
//! - `platform`: Host-side input tracking
//! - `questions`: Question bank loading and per-round selection
//! - `results`: In-session record of finished rounds
//! - `tuning`: Data-driven gameplay constants
//! - `settings`: Presentation preferences

pub mod error;
pub mod platform;
pub mod questions;
pub mod renderer;
pub mod results;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::QuizError;
pub use questions::{Question, QuestionBank};
pub use results::SessionResults;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the host is allowed to feed into the clock
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Questions drawn from the bank for one round
    pub const QUESTIONS_PER_ROUND: usize = 10;
    /// Lanes around the tunnel wall
    pub const LANE_COUNT: usize = 4;
    /// Most options a question can carry (one per lane)
    pub const MAX_OPTIONS: usize = LANE_COUNT;
    /// Fewest options a playable question can carry
    pub const MIN_OPTIONS: usize = 2;

    /// Seed for the tunnel star field so it looks identical every run
    pub const STARFIELD_SEED: u64 = 42;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Cubic ease `t²(3 − 2t)` over [0, 1]
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Signed shortest angular delta from `from` to `to`.
///
/// Exactly opposite angles resolve to `+π`, so a half-turn always sweeps in
/// the positive direction.
#[inline]
pub fn shortest_arc(from: f32, to: f32) -> f32 {
    use std::f32::consts::PI;
    let delta = normalize_angle(to - from);
    // normalize_angle yields [-π, π); fold the -π edge (and float noise near it) onto +π
    if delta <= -PI + 1e-4 { PI } else { delta }
}

/// Blend between two angles along the shortest arc
#[inline]
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    from + shortest_arc(from, to) * t
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
        assert_eq!(smoothstep(2.0), 1.0);
    }

    #[test]
    fn test_shortest_arc_wraps() {
        // 350° -> 10° is +20°, not -340°
        let d = shortest_arc(350.0_f32.to_radians(), 10.0_f32.to_radians());
        assert!((d - 20.0_f32.to_radians()).abs() < 1e-4);
    }

    #[test]
    fn test_shortest_arc_half_turn_is_positive() {
        assert!((shortest_arc(FRAC_PI_2, 3.0 * FRAC_PI_2) - PI).abs() < 1e-4);
        assert!((shortest_arc(3.0 * FRAC_PI_2, FRAC_PI_2) - PI).abs() < 1e-4);
        assert!((shortest_arc(0.0, PI) - PI).abs() < 1e-4);
        assert!((shortest_arc(PI, 0.0) - PI).abs() < 1e-4);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(2.0, FRAC_PI_2);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 2.0).abs() < 1e-6);
    }
}
