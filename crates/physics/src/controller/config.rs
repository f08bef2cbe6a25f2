//! Collision controller configuration.

use serde::{Deserialize, Serialize};

use crate::collision::CollisionLayers;
use crate::error::{require_angle, require_finite, require_ray_count, ConfigError};

/// Default skin width. Small enough to be invisible, large enough that rays
/// never start on a touching surface.
pub const DEFAULT_SKIN_WIDTH: f32 = 0.015;

/// Configuration for an actor's collision sweep.
///
/// Angles are in degrees, distances in world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Rays in each horizontal fan (along the actor's side). At least 2.
    pub horizontal_ray_count: usize,

    /// Rays in each vertical fan (along the actor's top or bottom). At least 2.
    pub vertical_ray_count: usize,

    /// Steepest slope the actor walks up, in `[0, 90)`.
    pub max_climb_angle: f32,

    /// Steepest slope the actor stays glued to while walking down, in `[0, 90)`.
    pub max_descend_angle: f32,

    /// Inward margin of the ray origins. Must be positive.
    pub skin_width: f32,

    /// Layers that block the actor.
    pub obstacle_mask: CollisionLayers,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            horizontal_ray_count: 4,
            vertical_ray_count: 4,
            max_climb_angle: 80.0,
            max_descend_angle: 75.0,
            skin_width: DEFAULT_SKIN_WIDTH,
            obstacle_mask: CollisionLayers::MASK_OBSTACLE,
        }
    }
}

impl ControllerConfig {
    /// Reject values that would produce degenerate sweeps.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_ray_count("horizontal", self.horizontal_ray_count)?;
        require_ray_count("vertical", self.vertical_ray_count)?;
        require_angle("max_climb_angle", self.max_climb_angle)?;
        require_angle("max_descend_angle", self.max_descend_angle)?;
        require_finite("skin_width", self.skin_width)?;
        if self.skin_width <= 0.0 {
            return Err(ConfigError::SkinWidth(self.skin_width));
        }
        if self.obstacle_mask.is_empty() {
            return Err(ConfigError::EmptyMask);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(ControllerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_single_ray() {
        let config = ControllerConfig {
            vertical_ray_count: 1,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::RayCount { axis: "vertical", count: 1 })
        );
    }

    #[test]
    fn test_rejects_non_positive_skin() {
        for skin_width in [0.0, -0.01] {
            let config = ControllerConfig {
                skin_width,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::SkinWidth(skin_width)));
        }
    }

    #[test]
    fn test_rejects_vertical_climb_angle() {
        let config = ControllerConfig {
            max_climb_angle: 90.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Angle { .. })));
    }

    #[test]
    fn test_rejects_empty_mask() {
        let config = ControllerConfig {
            obstacle_mask: CollisionLayers::EMPTY,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyMask));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "horizontal_ray_count": 6,
            "vertical_ray_count": 3,
            "max_climb_angle": 60.0,
            "max_descend_angle": 50.0,
            "skin_width": 0.02,
            "obstacle_mask": 1
        }"#;
        let config: ControllerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.horizontal_ray_count, 6);
        assert_eq!(config.obstacle_mask, CollisionLayers::SOLID);
        assert!(config.validate().is_ok());
    }
}
