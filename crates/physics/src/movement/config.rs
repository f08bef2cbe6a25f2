//! Motion tuning.
//!
//! Gravity and jump velocity are not configured directly. They follow from
//! how high a jump goes and how long it takes to get there.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, require_positive, ConfigError};

/// Configuration for velocity integration.
///
/// Distances in world units, times in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Horizontal speed at full input (units/second).
    pub move_speed: f32,

    /// Height of a full jump.
    pub max_jump_height: f32,

    /// Time from take-off to the top of a full jump.
    pub time_to_jump_apex: f32,

    /// Horizontal smoothing time while grounded.
    pub acceleration_time_grounded: f32,

    /// Horizontal smoothing time while airborne.
    pub acceleration_time_airborne: f32,

    /// Double gravity after the apex or when jump is released early.
    pub faster_falling: bool,

    /// Wall slide and wall jump. Disabled when `None`.
    pub wall: Option<WallConfig>,
}

/// Wall slide and wall jump tuning.
///
/// Jump impulses are `(x, y)` pairs; `x` is applied away from the wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallConfig {
    /// Fastest fall speed while sliding down a wall.
    pub wall_slide_speed_max: f32,

    /// How long input away from the wall is ignored before letting go.
    pub wall_stick_time: f32,

    /// Jump with input towards the wall.
    pub wall_jump_climb: Vec2,

    /// Jump with no horizontal input.
    pub wall_jump_off: Vec2,

    /// Jump with input away from the wall.
    pub wall_leap: Vec2,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            max_jump_height: 4.0,
            time_to_jump_apex: 0.4,
            acceleration_time_grounded: 0.1,
            acceleration_time_airborne: 0.2,
            faster_falling: false,
            wall: None,
        }
    }
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            wall_slide_speed_max: 3.0,
            wall_stick_time: 0.25,
            wall_jump_climb: Vec2::new(7.5, 16.0),
            wall_jump_off: Vec2::new(8.5, 7.0),
            wall_leap: Vec2::new(18.0, 17.0),
        }
    }
}

impl MotionConfig {
    /// Snappy platformer feel: short jumps, faster falling, wall jumps.
    pub fn arcade() -> Self {
        Self {
            move_speed: 8.0,
            max_jump_height: 3.0,
            time_to_jump_apex: 0.35,
            acceleration_time_grounded: 0.05,
            acceleration_time_airborne: 0.15,
            faster_falling: true,
            wall: Some(WallConfig::default()),
        }
    }

    /// Slow, floaty jumps with sluggish air control.
    pub fn floaty() -> Self {
        Self {
            move_speed: 5.0,
            max_jump_height: 5.0,
            time_to_jump_apex: 0.7,
            acceleration_time_airborne: 0.4,
            ..Default::default()
        }
    }

    /// Gravity during the rise of a jump (negative).
    #[inline]
    pub fn gravity(&self) -> f32 {
        -2.0 * self.max_jump_height / (self.time_to_jump_apex * self.time_to_jump_apex)
    }

    /// Gravity after the apex when faster falling is enabled.
    #[inline]
    pub fn gravity_down(&self) -> f32 {
        self.gravity() * 2.0
    }

    /// Initial upward velocity of a full jump.
    #[inline]
    pub fn jump_velocity(&self) -> f32 {
        2.0 * self.max_jump_height / self.time_to_jump_apex
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("move_speed", self.move_speed)?;
        require_positive("max_jump_height", self.max_jump_height)?;
        require_positive("time_to_jump_apex", self.time_to_jump_apex)?;
        require_non_negative("acceleration_time_grounded", self.acceleration_time_grounded)?;
        require_non_negative("acceleration_time_airborne", self.acceleration_time_airborne)?;
        if let Some(wall) = &self.wall {
            wall.validate()?;
        }
        Ok(())
    }
}

impl WallConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("wall_slide_speed_max", self.wall_slide_speed_max)?;
        require_non_negative("wall_stick_time", self.wall_stick_time)?;
        for (name, impulse) in [
            ("wall_jump_climb", self.wall_jump_climb),
            ("wall_jump_off", self.wall_jump_off),
            ("wall_leap", self.wall_leap),
        ] {
            require_non_negative(name, impulse.x)?;
            require_non_negative(name, impulse.y)?;
        }
        Ok(())
    }
}
