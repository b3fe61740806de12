//! Selectable ship models
//!
//! Each model carries its own scale and idle animation; the backend owns
//! the meshes.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::sim::ship::CardinalShip;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShipModel {
    /// Flying saucer, modelled facing backwards
    #[default]
    #[serde(rename = "shipM")]
    Saucer,
    /// Hovering walker with swaying legs
    #[serde(rename = "shipS")]
    Walker,
    #[serde(rename = "shipZ")]
    Dart,
    /// Simple arrowhead used when nothing is selected
    #[serde(rename = "placeholder")]
    Placeholder,
}

/// Everything the backend needs to place a ship model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipPose {
    pub position: Vec3,
    pub scale: f32,
    /// Rotation about the vertical axis, degrees
    pub yaw_deg: f32,
    /// Lane-change roll, degrees
    pub roll_deg: f32,
    pub hover_y: f32,
    /// Walker leg swing, degrees
    pub leg_sway_deg: f32,
}

impl ShipModel {
    /// Resolve a ship selection id; unknown ids fall back to the placeholder
    pub fn from_id(id: &str) -> Self {
        match id {
            "shipM" => ShipModel::Saucer,
            "shipS" => ShipModel::Walker,
            "shipZ" => ShipModel::Dart,
            _ => ShipModel::Placeholder,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            ShipModel::Saucer => "shipM",
            ShipModel::Walker => "shipS",
            ShipModel::Dart => "shipZ",
            ShipModel::Placeholder => "placeholder",
        }
    }

    pub fn scale(&self) -> f32 {
        match self {
            ShipModel::Saucer => 0.3,
            ShipModel::Walker => 0.6,
            ShipModel::Dart => 0.4,
            ShipModel::Placeholder => 1.0,
        }
    }

    pub fn yaw_deg(&self) -> f32 {
        match self {
            ShipModel::Saucer => 180.0,
            _ => 0.0,
        }
    }

    pub fn pose(&self, ship: &CardinalShip) -> ShipPose {
        let t = ship.animation_time();
        let (hover_y, leg_sway_deg) = match self {
            ShipModel::Walker => ((t * 2.0).sin() * 0.05, (t * 4.0).sin() * 3.0),
            _ => (0.0, 0.0),
        };
        ShipPose {
            position: ship.world_position(),
            scale: self.scale(),
            yaw_deg: self.yaw_deg(),
            roll_deg: ship.tilt(),
            hover_y,
            leg_sway_deg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::TickInput;
    use crate::tuning::{MotionTuning, ProjectileTuning};

    #[test]
    fn test_ids_round_trip() {
        for model in [ShipModel::Saucer, ShipModel::Walker, ShipModel::Dart, ShipModel::Placeholder] {
            assert_eq!(ShipModel::from_id(model.id()), model);
        }
        assert_eq!(ShipModel::from_id("shipQ"), ShipModel::Placeholder);
    }

    #[test]
    fn test_walker_animates_others_do_not() {
        let mut ship = CardinalShip::new(MotionTuning::default(), ProjectileTuning::default());
        ship.update(0.3, &TickInput::default());

        let walker = ShipModel::Walker.pose(&ship);
        assert!(walker.hover_y != 0.0);
        assert!(walker.leg_sway_deg != 0.0);
        assert_eq!(walker.scale, 0.6);

        let saucer = ShipModel::Saucer.pose(&ship);
        assert_eq!(saucer.hover_y, 0.0);
        assert_eq!(saucer.yaw_deg, 180.0);
        assert_eq!(saucer.position, ship.world_position());
    }

    #[test]
    fn test_serde_uses_selection_ids() {
        assert_eq!(serde_json::to_string(&ShipModel::Dart).unwrap(), "\"shipZ\"");
        let model: ShipModel = serde_json::from_str("\"shipS\"").unwrap();
        assert_eq!(model, ShipModel::Walker);
    }
}
