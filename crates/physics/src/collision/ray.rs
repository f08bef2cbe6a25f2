//! Raycast results and the query capabilities the controllers depend on.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::flags::CollisionLayers;
use crate::error::PhysicsError;
use crate::geometry::Bounds;

/// Stable identity of a body in the collision world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// Nearest hit reported by a raycast.
///
/// A miss is represented by `None` at the query site, never by a sentinel
/// distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaycastHit {
    /// Distance from the ray origin to the hit point.
    ///
    /// `0.0` means the ray started inside the body it hit.
    pub distance: f32,

    /// Surface normal at the hit point, pointing away from the surface.
    pub normal: Vec2,

    /// The body that was hit.
    pub target: BodyId,
}

impl RaycastHit {
    /// Angle between the hit normal and world up, in degrees.
    ///
    /// Flat ground is `0`, a vertical wall is `90`, a ceiling is `180`.
    pub fn slope_angle(&self) -> f32 {
        slope_angle(self.normal)
    }
}

/// Angle between `normal` and world up, in degrees within `[0, 180]`.
pub fn slope_angle(normal: Vec2) -> f32 {
    let normal = normal.normalize_or_zero();
    if normal == Vec2::ZERO {
        return 0.0;
    }
    normal.dot(Vec2::Y).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Capability: cast a ray into the world.
///
/// Implementations must be free of side effects; the resolver may call this
/// any number of times per tick. A query that cannot be answered (zero
/// direction, empty mask, non-finite input) reports no hit.
pub trait RaycastQuery {
    /// Cast a ray from `origin` along `direction` up to `max_distance`,
    /// reporting the nearest body whose layers intersect `mask`.
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: CollisionLayers,
    ) -> Option<RaycastHit>;
}

/// Capability: read and move a body's axis-aligned bounds.
pub trait BodyQuery {
    /// Current world-space bounds of a body.
    fn bounds(&self, body: BodyId) -> Result<Bounds, PhysicsError>;

    /// Move a body by `delta`.
    fn translate(&mut self, body: BodyId, delta: Vec2) -> Result<(), PhysicsError>;
}
