//! Error types for the physics crate.
//!
//! The simulation core itself is total over its numeric inputs. Errors only
//! arise from invalid configuration (rejected at construction time) or from
//! wiring mistakes between the orchestrator and the collision world.

use thiserror::Error;

use crate::collision::BodyId;

/// A configuration value that would make the simulation degenerate.
///
/// Produced by the `validate()` methods of the configuration structs and by
/// every constructor that accepts a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{axis} ray count must be at least 2, got {count}")]
    RayCount { axis: &'static str, count: usize },

    #[error("skin width must be positive, got {0}")]
    SkinWidth(f32),

    #[error("{name} must be within [0, 90) degrees, got {value}")]
    Angle { name: &'static str, value: f32 },

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },

    #[error("waypoint path needs at least 2 waypoints, got {0}")]
    TooFewWaypoints(usize),

    #[error("waypoints {0} and {1} coincide")]
    DegenerateSegment(usize, usize),

    #[error("collision mask must not be empty")]
    EmptyMask,
}

/// Errors surfaced by controllers, platforms and the passenger registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("body {0} does not exist in the collision world")]
    UnknownBody(BodyId),

    #[error("passenger {0} has no registered controller")]
    UnregisteredPassenger(BodyId),
}

/// Validation helpers shared by the configuration structs.
pub(crate) fn require_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

pub(crate) fn require_non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    require_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

pub(crate) fn require_finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

pub(crate) fn require_angle(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..90.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Angle { name, value })
    }
}

pub(crate) fn require_ray_count(axis: &'static str, count: usize) -> Result<(), ConfigError> {
    if count >= 2 {
        Ok(())
    } else {
        Err(ConfigError::RayCount { axis, count })
    }
}
