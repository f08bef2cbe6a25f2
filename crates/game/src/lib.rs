//! Strider Game Logic
//!
//! Fixed-step simulation of input-driven actors in a 2D level:
//!
//! - Actor input sampling and identifiers
//! - Level construction (ground, blocks, slopes, moving platforms)
//! - The tick loop wiring platforms, integrators and controllers together
//!
//! # Architecture
//!
//! The simulation is deterministic. State advances only through
//! [`Simulation::fixed_step`], and input sampled between two steps is
//! latched until the next one.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                    Fixed step                          │
//! │  ┌──────────┐    ┌────────────┐    ┌───────────────┐   │
//! │  │Platforms │───►│ Integrator │───►│ Controller    │   │
//! │  │(carry    │    │ (velocity, │    │ (clamp, then  │   │
//! │  │ riders)  │    │  jumps)    │    │  contacts)    │   │
//! │  └──────────┘    └────────────┘    └───────────────┘   │
//! └────────────────────────────────────────────────────────┘
//! ```

pub mod actor;
pub mod error;
pub mod input;
pub mod level;
pub mod simulation;

// Re-export main types
pub use actor::{Actor, ActorId};
pub use error::SimulationError;
pub use input::ActorInput;
pub use level::{Level, PlatformRoute, PlatformSpec};
pub use simulation::{Simulation, SimulationConfig};

// Re-export physics types for convenience
pub use strider_physics::{
    CollisionWorld, ContactState, ControllerConfig, MotionConfig, PlatformConfig, WaypointConfig,
};
