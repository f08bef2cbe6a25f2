//! Per-actor motion state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Everything the integrator remembers between ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    /// Velocity in units/second.
    pub velocity: Vec2,

    /// Velocity at the start of the last integration step.
    pub prev_velocity: Vec2,

    /// Rate-of-change accumulator for horizontal smoothing.
    pub velocity_x_smoothing: f32,

    /// Horizontal velocity the actor is accelerating towards.
    pub target_velocity_x: f32,

    /// Raw horizontal input, `-1.0..=1.0`.
    pub input_axis: f32,

    /// Gravity currently applied (negative).
    pub gravity: f32,

    // ========================================================================
    // Apex tracking
    // ========================================================================
    /// `true` until a jump is started and again once it tops out.
    pub reached_apex: bool,

    /// Highest point seen since the last jump.
    pub max_height_reached: f32,

    /// Height the last jump started from.
    pub start_height: f32,

    /// Airborne time of the current jump, up to the apex.
    pub jump_timer: f32,

    // ========================================================================
    // Walls
    // ========================================================================
    /// Sliding down a wall this tick.
    pub wall_sliding: bool,

    /// Direction of the wall being slid on: `-1.0` left, `1.0` right.
    pub wall_direction: f32,

    /// Time left before input away from the wall lets go of it.
    pub time_to_wall_unstick: f32,
}

impl MotionState {
    pub fn new(gravity: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            prev_velocity: Vec2::ZERO,
            velocity_x_smoothing: 0.0,
            target_velocity_x: 0.0,
            input_axis: 0.0,
            gravity,
            reached_apex: true,
            max_height_reached: f32::NEG_INFINITY,
            start_height: f32::NEG_INFINITY,
            jump_timer: 0.0,
            wall_sliding: false,
            wall_direction: 1.0,
            time_to_wall_unstick: 0.0,
        }
    }

    /// Rising through the air after a jump.
    #[inline]
    pub fn ascending(&self) -> bool {
        !self.reached_apex && self.velocity.y > 0.0
    }

    #[inline]
    pub fn falling(&self) -> bool {
        self.velocity.y < 0.0
    }
}
