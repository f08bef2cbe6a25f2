//! Collision resolution for kinematic actors.
//!
//! - [`CollisionResolver`] clamps a displacement and classifies contacts
//! - [`KinematicController`] applies the clamped displacement to a body

pub mod config;
pub mod contact;
pub mod kinematic;
pub mod resolver;

pub use config::{ControllerConfig, DEFAULT_SKIN_WIDTH};
pub use contact::ContactState;
pub use kinematic::KinematicController;
pub use resolver::{CollisionResolver, Resolution};
