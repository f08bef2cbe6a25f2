//! Actor input handling.
//!
//! Converts raw key state into the axis and jump button the physics input
//! sampler expects.

use serde::{Deserialize, Serialize};

/// Raw key state of one actor for a single sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl ActorInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn moving(axis: f32) -> Self {
        Self {
            left: axis < 0.0,
            right: axis > 0.0,
            jump: false,
        }
    }

    pub fn with_jump(mut self, jump: bool) -> Self {
        self.jump = jump;
        self
    }

    /// Horizontal axis: `-1`, `0` or `1`. Opposite keys cancel out.
    pub fn axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.right {
            axis += 1.0;
        }
        if self.left {
            axis -= 1.0;
        }
        axis
    }

    /// Check if any movement key is held.
    pub fn has_movement(&self) -> bool {
        self.left || self.right
    }
}
