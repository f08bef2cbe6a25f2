//! Simulation errors.

use strider_physics::{ConfigError, PhysicsError};
use thiserror::Error;

use crate::actor::ActorId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("actor {0} does not exist")]
    UnknownActor(ActorId),

    #[error(transparent)]
    Physics(#[from] PhysicsError),
}

impl From<ConfigError> for SimulationError {
    fn from(err: ConfigError) -> Self {
        SimulationError::Physics(PhysicsError::Config(err))
    }
}
