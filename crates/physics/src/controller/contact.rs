//! Per-tick contact state of an actor.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which sides of an actor touched an obstacle during its last move, plus
/// slope and facing metadata.
///
/// Rebuilt from scratch on every move. Only `slope_angle_old`,
/// `move_distance_old` and `face_dir` carry information across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactState {
    pub above: bool,
    pub below: bool,
    pub left: bool,
    pub right: bool,

    pub climbing_slope: bool,
    pub descending_slope: bool,

    /// Angle of the slope under the actor this tick, in degrees.
    pub slope_angle: f32,

    /// Angle of the slope under the actor last tick. Distinguishes walking onto
    /// a new slope from continuing up the same one.
    pub slope_angle_old: f32,

    /// The displacement requested for the current move, before any clamping.
    pub move_distance_old: Vec2,

    /// Last horizontal direction of travel: `-1.0` or `1.0`.
    pub face_dir: f32,
}

impl Default for ContactState {
    fn default() -> Self {
        Self {
            above: false,
            below: false,
            left: false,
            right: false,
            climbing_slope: false,
            descending_slope: false,
            slope_angle: 0.0,
            slope_angle_old: 0.0,
            move_distance_old: Vec2::ZERO,
            face_dir: 1.0,
        }
    }
}

impl ContactState {
    /// Clear the per-tick flags and roll the slope angle into
    /// `slope_angle_old`.
    pub fn reset(&mut self) {
        self.above = false;
        self.below = false;
        self.left = false;
        self.right = false;
        self.climbing_slope = false;
        self.descending_slope = false;
        self.slope_angle_old = self.slope_angle;
        self.slope_angle = 0.0;
    }

    /// Touching something above or below.
    #[inline]
    pub fn vertical_contact(&self) -> bool {
        self.above || self.below
    }

    /// Touching a wall on either side.
    #[inline]
    pub fn horizontal_contact(&self) -> bool {
        self.left || self.right
    }

    /// Direction of the touched wall: `-1.0` for left, `1.0` for right.
    pub fn wall_direction(&self) -> Option<f32> {
        if self.left {
            Some(-1.0)
        } else if self.right {
            Some(1.0)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_faces_right() {
        let contacts = ContactState::default();
        assert_eq!(contacts.face_dir, 1.0);
        assert!(!contacts.vertical_contact());
        assert_eq!(contacts.wall_direction(), None);
    }

    #[test]
    fn test_reset_rolls_slope_angle() {
        let mut contacts = ContactState {
            above: true,
            below: true,
            left: true,
            right: true,
            climbing_slope: true,
            descending_slope: true,
            slope_angle: 30.0,
            slope_angle_old: 10.0,
            move_distance_old: Vec2::new(1.0, 2.0),
            face_dir: -1.0,
        };

        contacts.reset();

        assert!(!contacts.vertical_contact());
        assert!(!contacts.horizontal_contact());
        assert!(!contacts.climbing_slope);
        assert!(!contacts.descending_slope);
        assert_eq!(contacts.slope_angle, 0.0);
        assert_eq!(contacts.slope_angle_old, 30.0);
        // Facing and the previous displacement survive a reset
        assert_eq!(contacts.face_dir, -1.0);
        assert_eq!(contacts.move_distance_old, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_wall_direction() {
        let contacts = ContactState {
            left: true,
            ..Default::default()
        };
        assert_eq!(contacts.wall_direction(), Some(-1.0));

        let contacts = ContactState {
            right: true,
            ..Default::default()
        };
        assert_eq!(contacts.wall_direction(), Some(1.0));
    }
}
