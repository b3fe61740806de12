//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (markers by question, then option)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod burst;
pub mod clock;
pub mod input;
pub mod lane;
pub mod marker;
pub mod projectile;
pub mod round;
pub mod ship;
pub mod tunnel;

pub use autopilot::Autopilot;
pub use burst::{BurstCounts, Particle, ParticleKind};
pub use clock::FixedStep;
pub use input::{ControlState, TickInput};
pub use lane::Lane;
pub use marker::{AnswerMarker, HitOutcome};
pub use projectile::{Projectile, ProjectileSet};
pub use round::{
    Message, MessageKind, PendingPass, QuizRound, RoundOutcome, RoundPhase, RoundSetup, StrikeReason,
};
pub use ship::CardinalShip;
pub use tunnel::WarpTunnel;
