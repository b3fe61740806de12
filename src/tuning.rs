//! Data-driven gameplay constants
//!
//! Every number the simulation depends on lives here so a round can be
//! rebalanced from JSON without touching code. Defaults match the shipped game.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Ship movement and firing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    /// Radius of the circle the ship rides on
    pub cylinder_radius: f32,
    /// Lane transition progress per second (5.0 = 0.2 s per lane change)
    pub transition_speed: f32,
    /// Constant forward speed (axial units per second)
    pub forward_speed: f32,
    /// Seconds between shots
    pub fire_delay: f32,
    /// Peak roll angle in degrees while changing lanes
    pub max_tilt_deg: f32,
    /// Per-tick multiplier applied to tilt once settled
    pub tilt_decay: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            cylinder_radius: 4.0,
            transition_speed: 5.0,
            forward_speed: 12.0,
            fire_delay: 0.2,
            max_tilt_deg: 25.0,
            tilt_decay: 0.9,
        }
    }
}

/// Shots fired by the ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Axial velocity (negative = forward)
    pub axial_velocity: f32,
    /// Seconds a shot lives
    pub lifetime: f32,
    /// Spawn point as a fraction of the ship's distance from the axis
    pub spawn_inset: f32,
    /// Spawn distance in front of the ship
    pub spawn_lead: f32,
    /// Minimum axial travel before a shot is dropped
    pub max_range: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            axial_velocity: -100.0,
            lifetime: 2.0,
            spawn_inset: 0.75,
            spawn_lead: 1.5,
            max_range: 800.0,
        }
    }
}

/// Answer markers and their hit volumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerTuning {
    /// Tunnel wall radius
    pub tunnel_radius: f32,
    /// Markers sit at this fraction of the tunnel radius
    pub wall_factor: f32,
    /// Visual radius
    pub radius: f32,
    /// Hitbox radius as a multiple of the visual radius
    pub hitbox_scale: f32,
    /// Lateral hit threshold as a multiple of the hitbox radius
    pub lateral_hit_factor: f32,
    /// Axial hit threshold as a multiple of the hitbox radius
    pub axial_hit_factor: f32,
    /// Ship half-length used for ship/marker contact
    pub ship_radius: f32,
    /// Hit flash decay per second
    pub flash_decay: f32,
    /// Seconds the destruction burst stays visible
    pub burst_duration: f32,
}

impl Default for MarkerTuning {
    fn default() -> Self {
        Self {
            tunnel_radius: 5.5,
            wall_factor: 0.55,
            radius: 1.2,
            hitbox_scale: 1.5,
            lateral_hit_factor: 1.5,
            axial_hit_factor: 2.0,
            ship_radius: 1.0,
            flash_decay: 3.0,
            burst_duration: 4.0,
        }
    }
}

impl MarkerTuning {
    /// Hitbox radius derived from the visual radius
    pub fn hitbox_radius(&self) -> f32 {
        self.radius * self.hitbox_scale
    }
}

/// Round flow and timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundTuning {
    /// Strikes that end the round
    pub max_strikes: u32,
    /// Intro overlay duration (seconds)
    pub intro_duration: f32,
    /// Pause between questions (seconds)
    pub transition_duration: f32,
    /// Delay before the completion callback fires (seconds)
    pub complete_delay: f32,
    /// Delay before the failure callback fires (seconds)
    pub fail_delay: f32,
    /// Axial distance between consecutive question groups
    pub question_spacing: f32,
    /// Axial distance from the ship to the first group
    pub first_question_distance: f32,
    /// How far past an opened marker the ship must fly to score
    pub pass_margin: f32,
    /// How far behind the ship a marker must be to count as passed
    pub behind_margin: f32,
    /// Strike banner duration (seconds)
    pub strike_message_duration: f32,
    /// Screen shake applied on a strike
    pub strike_shake: f32,
    /// Screen shake decay per second
    pub shake_decay: f32,
}

impl Default for RoundTuning {
    fn default() -> Self {
        Self {
            max_strikes: 3,
            intro_duration: 2.0,
            transition_duration: 0.5,
            complete_delay: 3.0,
            fail_delay: 3.0,
            question_spacing: 80.0,
            first_question_distance: 60.0,
            pass_margin: 2.0,
            behind_margin: 8.0,
            strike_message_duration: 2.0,
            strike_shake: 1.5,
            shake_decay: 3.0,
        }
    }
}

/// All gameplay tuning
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub motion: MotionTuning,
    pub projectile: ProjectileTuning,
    pub marker: MarkerTuning,
    pub round: RoundTuning,
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, QuizError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuizError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json_str(&text)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Projectile range needed to reach the farthest group of `question_count`
    pub fn required_projectile_range(&self, question_count: usize) -> f32 {
        let farthest = self.round.first_question_distance
            + question_count as f32 * self.round.question_spacing;
        farthest.max(self.projectile.max_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json_str(r#"{"round": {"max_strikes": 5}}"#).unwrap();
        assert_eq!(tuning.round.max_strikes, 5);
        assert_eq!(tuning.round.question_spacing, 80.0);
        assert_eq!(tuning.motion, MotionTuning::default());
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Tuning::from_json_str("{ not json"),
            Err(QuizError::Json(_))
        ));
    }

    #[test]
    fn test_projectile_range_covers_farthest_group() {
        let tuning = Tuning::default();
        assert_eq!(tuning.required_projectile_range(2), 800.0);
        // 60 + 20 * 80 = 1660
        assert_eq!(tuning.required_projectile_range(20), 1660.0);
    }

    #[test]
    fn test_hitbox_radius() {
        let marker = MarkerTuning::default();
        assert!((marker.hitbox_radius() - 1.8).abs() < 1e-6);
    }
}
