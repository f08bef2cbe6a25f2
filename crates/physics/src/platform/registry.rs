//! Body id to controller lookup for platform passengers.

use std::collections::HashMap;

use crate::collision::BodyId;
use crate::controller::KinematicController;
use crate::error::PhysicsError;

/// Controllers of every body a platform may carry, keyed by body.
///
/// Populated by whoever creates the actors. Platforms only ever look
/// controllers up; they never create them.
#[derive(Debug, Default)]
pub struct PassengerRegistry {
    controllers: HashMap<BodyId, KinematicController>,
}

impl PassengerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller under its body. Returns the controller it
    /// replaced, if any.
    pub fn register(&mut self, controller: KinematicController) -> Option<KinematicController> {
        self.controllers.insert(controller.body(), controller)
    }

    pub fn remove(&mut self, body: BodyId) -> Option<KinematicController> {
        self.controllers.remove(&body)
    }

    pub fn contains(&self, body: BodyId) -> bool {
        self.controllers.contains_key(&body)
    }

    pub fn get(&self, body: BodyId) -> Result<&KinematicController, PhysicsError> {
        self.controllers
            .get(&body)
            .ok_or(PhysicsError::UnregisteredPassenger(body))
    }

    pub fn get_mut(&mut self, body: BodyId) -> Result<&mut KinematicController, PhysicsError> {
        self.controllers
            .get_mut(&body)
            .ok_or(PhysicsError::UnregisteredPassenger(body))
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{CollisionLayers, CollisionWorld};
    use crate::controller::ControllerConfig;
    use glam::Vec2;

    #[test]
    fn test_register_and_lookup() {
        let mut world = CollisionWorld::new();
        let body = world.add_box(Vec2::ZERO, Vec2::splat(0.5), CollisionLayers::ACTOR);
        let controller = KinematicController::new(body, ControllerConfig::default(), &world).unwrap();

        let mut registry = PassengerRegistry::new();
        assert!(registry.register(controller).is_none());

        assert!(registry.contains(body));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(body).unwrap().body(), body);

        assert!(registry.remove(body).is_some());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_missing_passenger_is_an_error() {
        let mut registry = PassengerRegistry::new();
        let err = registry.get_mut(BodyId(3)).unwrap_err();
        assert_eq!(err, PhysicsError::UnregisteredPassenger(BodyId(3)));
    }
}
