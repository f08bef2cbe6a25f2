//! Actor entity and state.

use std::fmt;

use serde::{Deserialize, Serialize};
use strider_physics::movement::JumpKind;
use strider_physics::{BodyId, InputSampler, MotionIntegrator};

/// Unique identifier for actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

/// An input-driven character.
///
/// The actor's collision controller lives in the simulation's passenger
/// registry under [`body`](Actor::body), so platforms can move it too.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: ActorId,

    pub name: String,

    /// Collision body in the world.
    pub body: BodyId,

    /// Velocity integration.
    pub motion: MotionIntegrator,

    /// Input latched between fixed steps.
    pub input: InputSampler,

    /// Most recent jump, ground or wall.
    pub last_jump: Option<JumpKind>,
}

impl Actor {
    pub fn new(id: ActorId, name: String, body: BodyId, motion: MotionIntegrator) -> Self {
        Self {
            id,
            name,
            body,
            motion,
            input: InputSampler::new(),
            last_jump: None,
        }
    }

    /// Check if the actor is still rising from a jump.
    #[inline]
    pub fn is_ascending(&self) -> bool {
        self.motion.state().ascending()
    }
}
