//! Moving platform configuration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::CollisionLayers;
use crate::controller::DEFAULT_SKIN_WIDTH;
use crate::error::{require_finite, require_non_negative, require_positive, require_ray_count, ConfigError};
use crate::geometry::Bounds;

/// Ray fan settings a platform uses to find its passengers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub horizontal_ray_count: usize,
    pub vertical_ray_count: usize,
    pub skin_width: f32,

    /// Layers that ride on or get pushed by the platform.
    pub passenger_mask: CollisionLayers,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            horizontal_ray_count: 4,
            vertical_ray_count: 4,
            skin_width: DEFAULT_SKIN_WIDTH,
            passenger_mask: CollisionLayers::MASK_PASSENGER,
        }
    }
}

impl PlatformConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_ray_count("horizontal", self.horizontal_ray_count)?;
        require_ray_count("vertical", self.vertical_ray_count)?;
        require_finite("skin_width", self.skin_width)?;
        if self.skin_width <= 0.0 {
            return Err(ConfigError::SkinWidth(self.skin_width));
        }
        if self.passenger_mask.is_empty() {
            return Err(ConfigError::EmptyMask);
        }
        Ok(())
    }

    /// Raise the ray counts for a platform at `bounds` until neighbouring
    /// rays are closer together than `passenger_size`.
    ///
    /// A passenger narrower than the ray spacing can sit between two rays and
    /// be missed, so it would only be carried on some ticks.
    pub fn fitted_to(&self, bounds: Bounds, passenger_size: Vec2) -> Result<Self, ConfigError> {
        require_positive("passenger width", passenger_size.x)?;
        require_positive("passenger height", passenger_size.y)?;

        let inner = bounds.shrink(self.skin_width).size();
        Ok(Self {
            horizontal_ray_count: self
                .horizontal_ray_count
                .max(rays_closer_than(inner.y, passenger_size.y)),
            vertical_ray_count: self
                .vertical_ray_count
                .max(rays_closer_than(inner.x, passenger_size.x)),
            ..self.clone()
        })
    }
}

/// Smallest ray count spreading rays over `length` at a spacing below `gap`.
fn rays_closer_than(length: f32, gap: f32) -> usize {
    (length.max(0.0) / gap).floor() as usize + 2
}

/// A path of waypoints the platform travels along.
///
/// Waypoints are offsets from the platform's position when it is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointConfig {
    pub local_waypoints: Vec<Vec2>,

    /// Travel speed in units per second.
    pub speed: f32,

    /// Loop from the last waypoint back to the first instead of reversing.
    pub cyclic: bool,

    /// Pause at each waypoint, in seconds.
    pub wait_time: f32,

    /// Easing strength. `0` is linear; larger values ease in and out harder.
    pub ease_amount: f32,
}

impl Default for WaypointConfig {
    fn default() -> Self {
        Self {
            local_waypoints: vec![Vec2::ZERO, Vec2::new(4.0, 0.0)],
            speed: 2.0,
            cyclic: false,
            wait_time: 0.5,
            ease_amount: 1.0,
        }
    }
}

impl WaypointConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let count = self.local_waypoints.len();
        if count < 2 {
            return Err(ConfigError::TooFewWaypoints(count));
        }
        for (i, point) in self.local_waypoints.iter().enumerate() {
            require_finite("waypoint.x", point.x)?;
            require_finite("waypoint.y", point.y)?;
            // Segments wrap around for cyclic paths only
            let next = i + 1;
            if next == count && !self.cyclic {
                break;
            }
            let next = next % count;
            if point.distance(self.local_waypoints[next]) <= f32::EPSILON {
                return Err(ConfigError::DegenerateSegment(i, next));
            }
        }
        require_positive("speed", self.speed)?;
        require_non_negative("wait_time", self.wait_time)?;
        require_non_negative("ease_amount", self.ease_amount)?;
        Ok(())
    }
}
