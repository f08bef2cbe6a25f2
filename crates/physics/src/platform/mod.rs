//! Moving platforms and passenger transport.
//!
//! A [`MovingPlatform`] moves one body along a constant velocity or a
//! waypoint path. Bodies it touches are moved through their own
//! [`KinematicController`](crate::controller::KinematicController), looked
//! up in a [`PassengerRegistry`].

pub mod config;
pub mod moving;
pub mod registry;
pub mod transporter;
pub mod waypoint;

pub use config::{PlatformConfig, WaypointConfig};
pub use moving::{MovingPlatform, PlatformMotion};
pub use registry::PassengerRegistry;
pub use transporter::{CarryPhase, PassengerRecord, PlatformTransporter};
pub use waypoint::{ease, WaypointPath};
