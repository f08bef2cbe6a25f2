//! Strider Physics
//!
//! Raycast-based kinematic controller for 2D actors: walls, floors,
//! ceilings, climbable and descendable slopes, moving platforms that carry
//! their riders, and a jump-arc velocity integrator.
//!
//! # Architecture
//!
//! - **Collision**: layer-filtered raycasts against a 2D world
//! - **Controller**: sweeps an actor's bounds with ray fans and clamps its
//!   displacement so it never penetrates an obstacle
//! - **Platform**: moves platform bodies and carries passengers through
//!   their own controllers
//! - **Movement**: integrates gravity, jumps and input into the displacement
//!   fed to the controller
//!
//! Controllers only see the world through the [`RaycastQuery`] and
//! [`BodyQuery`] capabilities; [`CollisionWorld`] is one implementation.
//!
//! # Tick order
//!
//! Platforms step first, then each actor integrates, moves, and cancels
//! velocity into whatever it touched.

pub mod collision;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod movement;
pub mod platform;

// Re-export commonly used types
pub use collision::{BodyId, BodyQuery, CollisionLayers, CollisionWorld, RaycastHit, RaycastQuery};
pub use controller::{CollisionResolver, ContactState, ControllerConfig, KinematicController};
pub use error::{ConfigError, PhysicsError};
pub use geometry::{Bounds, RaySweepGeometry};
pub use movement::{ActorCommand, InputSampler, MotionConfig, MotionIntegrator, WallConfig};
pub use platform::{MovingPlatform, PassengerRegistry, PlatformConfig, WaypointConfig};
