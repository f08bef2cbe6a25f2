//! Input latching between variable-rate sampling and fixed-rate steps.
//!
//! Input may be sampled many times between two fixed steps, or not at all.
//! Jump presses and releases are edges: an edge seen by any sample must
//! reach the next step exactly once, even if the button was already back
//! in its old state by then.

use serde::{Deserialize, Serialize};

/// Input consumed by one fixed step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorCommand {
    /// Horizontal input, `-1.0..=1.0`.
    pub axis: f32,

    /// Jump went down since the last step.
    pub jump_pressed: bool,

    /// Jump went up since the last step.
    pub jump_released: bool,
}

/// Accumulates samples until the next fixed step takes them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSampler {
    axis: f32,
    jump_held: bool,
    jump_pressed: bool,
    jump_released: bool,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current input state.
    pub fn sample(&mut self, axis: f32, jump_held: bool) {
        // Detect key edges
        if jump_held && !self.jump_held {
            self.jump_pressed = true;
        }
        if !jump_held && self.jump_held {
            self.jump_released = true;
        }

        self.jump_held = jump_held;
        self.axis = if axis.is_finite() { axis.clamp(-1.0, 1.0) } else { 0.0 };
    }

    /// Hand the latched input to a fixed step and clear the edges.
    ///
    /// The axis is level-triggered and persists.
    pub fn take(&mut self) -> ActorCommand {
        let command = ActorCommand {
            axis: self.axis,
            jump_pressed: self.jump_pressed,
            jump_released: self.jump_released,
        };
        self.jump_pressed = false;
        self.jump_released = false;
        command
    }

    #[inline]
    pub fn jump_held(&self) -> bool {
        self.jump_held
    }
}
