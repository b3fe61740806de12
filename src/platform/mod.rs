//! Platform abstraction layer
//!
//! Host-side state that feeds the simulation:
//! - Input events (held keys, bindings)

pub mod input;

pub use input::{HeldKeys, KeyBindings};
