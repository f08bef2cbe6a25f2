//! Kinematic actor controller: resolve, then translate.

use glam::Vec2;

use crate::collision::{BodyId, BodyQuery, RaycastQuery};
use crate::error::PhysicsError;
use crate::geometry::RaySweepGeometry;

use super::config::ControllerConfig;
use super::contact::ContactState;
use super::resolver::CollisionResolver;

/// Moves one body through the world without ever penetrating an obstacle.
///
/// The controller owns the body's contact state. Each [`move_by`] rebuilds it
/// from scratch, so callers read [`contacts`] after moving.
///
/// [`move_by`]: KinematicController::move_by
/// [`contacts`]: KinematicController::contacts
#[derive(Debug, Clone)]
pub struct KinematicController {
    body: BodyId,
    resolver: CollisionResolver,
    geometry: RaySweepGeometry,
    contacts: ContactState,
}

impl KinematicController {
    /// Create a controller for `body`, sizing its ray fans from the body's
    /// current bounds.
    pub fn new<W: BodyQuery + ?Sized>(
        body: BodyId,
        config: ControllerConfig,
        world: &W,
    ) -> Result<Self, PhysicsError> {
        let resolver = CollisionResolver::new(config)?;
        let bounds = world.bounds(body)?;
        let config = resolver.config();
        let geometry = RaySweepGeometry::new(
            bounds,
            config.skin_width,
            config.horizontal_ray_count,
            config.vertical_ray_count,
        );

        Ok(Self {
            body,
            resolver,
            geometry,
            contacts: ContactState::default(),
        })
    }

    /// Move by `displacement`, clamped against obstacles.
    ///
    /// Set `standing_on_platform` when a platform is carrying the body; it is
    /// then reported as grounded.
    ///
    /// # Returns
    ///
    /// The displacement actually applied.
    pub fn move_by<W: RaycastQuery + BodyQuery + ?Sized>(
        &mut self,
        world: &mut W,
        displacement: Vec2,
        standing_on_platform: bool,
    ) -> Result<Vec2, PhysicsError> {
        let bounds = world.bounds(self.body)?;
        self.geometry.refresh(bounds);

        let resolution = self.resolver.resolve(
            &*world,
            &self.geometry,
            bounds,
            displacement,
            &self.contacts,
            standing_on_platform,
        );

        world.translate(self.body, resolution.displacement)?;
        self.contacts = resolution.contacts;

        log::trace!(
            "{} move requested={:?} applied={:?} below={} above={} left={} right={}",
            self.body,
            displacement,
            resolution.displacement,
            self.contacts.below,
            self.contacts.above,
            self.contacts.left,
            self.contacts.right,
        );

        Ok(resolution.displacement)
    }

    #[inline]
    pub fn body(&self) -> BodyId {
        self.body
    }

    /// Contact state from the last move.
    #[inline]
    pub fn contacts(&self) -> &ContactState {
        &self.contacts
    }

    pub fn config(&self) -> &ControllerConfig {
        self.resolver.config()
    }
}
