//! Presentation settings and preferences
//!
//! Stored as JSON next to the game; none of these change round rules.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::platform::input::KeyBindings;
use crate::renderer::ship_model::ShipModel;
use crate::sim::burst::BurstCounts;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Burst particle multiplier (1.0 = full)
    pub fn particle_scale(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.25,
            QualityPreset::Medium => 0.6,
            QualityPreset::High => 1.0,
        }
    }

    /// Star field density multiplier
    pub fn star_density(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.3,
            QualityPreset::Medium => 0.7,
            QualityPreset::High => 1.0,
        }
    }

    /// Whether to draw the speed streaks
    pub fn speed_lines_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Presentation settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Camera shake on strikes
    pub screen_shake: bool,
    /// Destruction bursts
    pub particles: bool,

    // === HUD ===
    /// Floating text labels over answer markers
    pub answer_labels: bool,
    /// Selected ship
    pub ship_model: ShipModel,
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,

    // === Controls ===
    pub key_bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            screen_shake: true,
            particles: true,
            answer_labels: true,
            ship_model: ShipModel::Saucer,
            show_fps: false,
            reduced_motion: false,
            key_bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Burst sizes for answer markers under these settings
    pub fn burst_counts(&self) -> BurstCounts {
        let scale = if self.particles {
            self.quality.particle_scale()
        } else {
            0.0
        };
        BurstCounts::default().scaled(scale)
    }

    pub fn from_json_str(json: &str) -> Result<Self, QuizError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path)
            .map_err(QuizError::from)
            .and_then(|json| Self::from_json_str(&json))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::info!("Using default settings ({err})");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), QuizError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
