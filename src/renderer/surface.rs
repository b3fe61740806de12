//! Draw-call surface
//!
//! The simulation never talks to a graphics API. A frame is a flat sequence
//! of [`DrawCommand`]s handed to a [`RenderSurface`]; a backend turns them
//! into real draw calls, tests record them into a [`DrawList`].

use glam::Vec3;

use super::hud::HudView;
use super::ship_model::{ShipModel, ShipPose};

pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0.0, 0.0, 0.02, 1.0];
    pub const HUD: Color = [0.0, 0.8, 1.0, 0.5];
    pub const SHIELD_LIT: Color = [0.0, 0.8, 1.0, 0.8];
    pub const SHIELD_SPENT: Color = [0.2, 0.1, 0.1, 0.3];
    pub const PROJECTILE: Color = [0.0, 1.0, 0.5, 1.0];
    pub const MARKER_ROCK: Color = [0.38, 0.36, 0.40, 1.0];
    pub const MARKER_FLASH: Color = [1.0, 0.3, 0.3, 1.0];
    pub const LANE_GUIDE: Color = [0.0, 0.6, 0.9, 0.6];
    pub const MESSAGE_SUCCESS: Color = [0.0, 1.0, 0.5, 1.0];
    pub const MESSAGE_STRIKE: Color = [1.0, 0.3, 0.3, 1.0];
    pub const INTRO: Color = [0.0, 1.0, 1.0, 1.0];
}

/// Chase camera for the frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

/// One draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginFrame {
        camera: Camera,
        clear: Color,
    },
    Star {
        pos: Vec3,
        size: f32,
        brightness: f32,
    },
    Streak {
        head: Vec3,
        tail: Vec3,
        brightness: f32,
    },
    /// Tunnel boundary ring centred on the axis
    Ring {
        z: f32,
        radius: f32,
        alpha: f32,
    },
    LaneGuide {
        pos: Vec3,
        color: Color,
    },
    Marker {
        pos: Vec3,
        radius: f32,
        /// Tumble angle in degrees
        rotation: f32,
        color: Color,
    },
    Particle {
        pos: Vec3,
        size: f32,
        color: Color,
    },
    Projectile {
        pos: Vec3,
        /// Beam trail end
        tail: Vec3,
        color: Color,
    },
    Ship {
        model: ShipModel,
        pose: ShipPose,
    },
    Hud(HudView),
    EndFrame,
}

/// Anything that can receive a frame of draw calls
pub trait RenderSurface {
    fn submit(&mut self, command: DrawCommand);
}

/// Records draw calls in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Count commands matching a predicate
    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    /// The frame's HUD, if one was submitted
    pub fn hud(&self) -> Option<&HudView> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Hud(hud) => Some(hud),
            _ => None,
        })
    }
}

impl RenderSurface for DrawList {
    fn submit(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}
