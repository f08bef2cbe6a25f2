//! Collision queries for raycast-driven movement.
//!
//! The controllers never talk to a concrete physics engine. They depend on two
//! capabilities:
//!
//! - [`RaycastQuery`]: nearest hit along a ray, filtered by [`CollisionLayers`]
//! - [`BodyQuery`]: a body's bounds and translating it
//!
//! [`CollisionWorld`] implements both on top of `parry2d`.

mod flags;
mod ray;
mod world;

pub use flags::CollisionLayers;
pub use ray::{slope_angle, BodyId, BodyQuery, RaycastHit, RaycastQuery};
pub use world::{CollisionBody, CollisionWorld};
