//! Actor motion: turning input into a per-tick displacement.
//!
//! - [`MotionIntegrator`]: gravity, jumps, horizontal smoothing, walls
//! - [`InputSampler`]: latches jump edges between fixed steps

pub mod config;
pub mod input;
pub mod integrator;
pub mod smoothing;
pub mod state;

pub use config::{MotionConfig, WallConfig};
pub use input::{ActorCommand, InputSampler};
pub use integrator::{JumpKind, MotionIntegrator, WallJump};
pub use smoothing::smooth_damp;
pub use state::MotionState;
