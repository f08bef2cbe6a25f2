//! Collision world containing static level geometry and moving bodies.
//!
//! The world stores every collidable body and answers the raycast and bounds
//! queries the controllers depend on. Shapes and ray casts are delegated to
//! `parry2d`.

use glam::Vec2;
use parry2d::math::{Isometry, Point, Real, Vector};
use parry2d::query::{Ray, RayCast};
use parry2d::shape::SharedShape;

use super::flags::CollisionLayers;
use super::ray::{BodyId, BodyQuery, RaycastHit, RaycastQuery};
use crate::error::PhysicsError;
use crate::geometry::Bounds;

/// Longest ray the world will trace. Unbounded requests are clamped to this.
const MAX_RAY_DISTANCE: f32 = 1.0e6;

/// A collidable body in the world.
#[derive(Debug, Clone)]
pub struct CollisionBody {
    /// Unique identifier for this body.
    pub id: BodyId,
    /// The collision shape, in body-local coordinates.
    pub shape: SharedShape,
    /// Position in world space. Bodies never rotate.
    pub transform: Isometry<Real>,
    /// Layers this body belongs to.
    pub layers: CollisionLayers,
}

impl CollisionBody {
    fn bounds(&self) -> Bounds {
        let aabb = self.shape.compute_aabb(&self.transform);
        Bounds::new(
            Vec2::new(aabb.mins.x, aabb.mins.y),
            Vec2::new(aabb.maxs.x, aabb.maxs.y),
        )
    }
}

/// The collision world containing all bodies.
///
/// Supports:
/// - Axis-aligned boxes (ground, walls, platforms, actors)
/// - Triangles (slopes)
/// - Convex hulls
///
/// Queries take `&self` and never mutate the world, so a tick may cast as
/// many rays as it needs.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    bodies: Vec<CollisionBody>,
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an axis-aligned box to the world.
    ///
    /// # Arguments
    ///
    /// * `center` - Center position of the box in world space
    /// * `half_extents` - Half-size in each axis
    /// * `layers` - Layers the box belongs to
    pub fn add_box(&mut self, center: Vec2, half_extents: Vec2, layers: CollisionLayers) -> BodyId {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y);
        self.insert(shape, Isometry::translation(center.x, center.y), layers)
    }

    /// Add a triangle given in world-space coordinates.
    ///
    /// This is the usual way to build a slope: two corners on the ground and
    /// one raised above either of them.
    pub fn add_triangle(&mut self, corners: [Vec2; 3], layers: CollisionLayers) -> BodyId {
        let [a, b, c] = corners.map(to_point);
        self.insert(SharedShape::triangle(a, b, c), Isometry::identity(), layers)
    }

    /// Add a right-triangle ramp standing on `base_y`.
    ///
    /// The ramp spans `[x_min, x_min + width]` horizontally. When
    /// `rising_right` is true its high side is on the right.
    pub fn add_ramp(
        &mut self,
        x_min: f32,
        base_y: f32,
        width: f32,
        height: f32,
        rising_right: bool,
        layers: CollisionLayers,
    ) -> BodyId {
        let x_max = x_min + width;
        let apex_x = if rising_right { x_max } else { x_min };
        self.add_triangle(
            [
                Vec2::new(x_min, base_y),
                Vec2::new(x_max, base_y),
                Vec2::new(apex_x, base_y + height),
            ],
            layers,
        )
    }

    /// Add a convex hull given in world-space coordinates.
    ///
    /// # Returns
    ///
    /// The body ID, or `None` if the hull couldn't be computed.
    pub fn add_convex_hull(&mut self, points: &[Vec2], layers: CollisionLayers) -> Option<BodyId> {
        let points: Vec<Point<Real>> = points.iter().copied().map(to_point).collect();
        let shape = SharedShape::convex_hull(&points)?;
        Some(self.insert(shape, Isometry::identity(), layers))
    }

    /// Remove all bodies.
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    /// Get the number of bodies.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Look up a body by ID.
    pub fn body(&self, id: BodyId) -> Option<&CollisionBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// World-space translation of a body.
    ///
    /// Boxes report their center. Triangles and hulls are defined in world
    /// coordinates, so they report the offset accumulated by `translate`.
    pub fn position(&self, id: BodyId) -> Result<Vec2, PhysicsError> {
        let body = self.body(id).ok_or(PhysicsError::UnknownBody(id))?;
        let t = body.transform.translation.vector;
        Ok(Vec2::new(t.x, t.y))
    }

    /// Teleport a body so that its translation equals `position`.
    pub fn set_position(&mut self, id: BodyId, position: Vec2) -> Result<(), PhysicsError> {
        let body = self.body_mut(id)?;
        body.transform.translation.vector = Vector::new(position.x, position.y);
        Ok(())
    }

    fn body_mut(&mut self, id: BodyId) -> Result<&mut CollisionBody, PhysicsError> {
        self.bodies
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(PhysicsError::UnknownBody(id))
    }

    fn insert(&mut self, shape: SharedShape, transform: Isometry<Real>, layers: CollisionLayers) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;

        self.bodies.push(CollisionBody {
            id,
            shape,
            transform,
            layers,
        });

        id
    }
}

impl RaycastQuery for CollisionWorld {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: CollisionLayers,
    ) -> Option<RaycastHit> {
        // Unanswerable queries degrade to "no hit".
        if mask.is_empty() || !origin.is_finite() || !(max_distance > 0.0) {
            return None;
        }
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO {
            return None;
        }
        let max_distance = max_distance.min(MAX_RAY_DISTANCE);

        let ray = Ray::new(to_point(origin), Vector::new(dir.x, dir.y));

        let mut closest: Option<RaycastHit> = None;

        for body in &self.bodies {
            if !mask.intersects(body.layers) {
                continue;
            }

            let Some(intersection) =
                body.shape
                    .cast_ray_and_get_normal(&body.transform, &ray, max_distance, true)
            else {
                continue;
            };

            let distance = intersection.time_of_impact;
            if closest.map_or(true, |c| distance < c.distance) {
                closest = Some(RaycastHit {
                    distance,
                    normal: Vec2::new(intersection.normal.x, intersection.normal.y),
                    target: body.id,
                });
            }
        }

        closest
    }
}

impl BodyQuery for CollisionWorld {
    fn bounds(&self, body: BodyId) -> Result<Bounds, PhysicsError> {
        self.body(body)
            .map(CollisionBody::bounds)
            .ok_or(PhysicsError::UnknownBody(body))
    }

    fn translate(&mut self, body: BodyId, delta: Vec2) -> Result<(), PhysicsError> {
        let body = self.body_mut(body)?;
        body.transform.translation.vector += Vector::new(delta.x, delta.y);
        Ok(())
    }
}

fn to_point(v: Vec2) -> Point<Real> {
    Point::new(v.x, v.y)
}

// ============================================================================
// Tests
// ============================================================================
