//! Level construction.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use strider_physics::platform::WaypointConfig;
use strider_physics::{CollisionLayers, CollisionWorld};

/// A level: static collision geometry, moving platforms and spawn points.
#[derive(Debug)]
pub struct Level {
    /// Level identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Static geometry. Platforms are added by the simulation.
    pub collision: CollisionWorld,

    /// Actor spawn positions (body centers).
    pub spawn_points: Vec<Vec2>,

    /// Moving platforms to create when the level is loaded.
    pub platforms: Vec<PlatformSpec>,
}

/// Description of a moving platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub center: Vec2,
    pub half_extents: Vec2,
    pub route: PlatformRoute,
}

/// How a platform moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlatformRoute {
    /// Constant velocity, units/second.
    Velocity(Vec2),
    /// Waypoints relative to the platform's center.
    Waypoints(WaypointConfig),
}

impl Level {
    /// Create an empty level.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            collision: CollisionWorld::new(),
            spawn_points: Vec::new(),
            platforms: Vec::new(),
        }
    }

    /// Flat ground spanning `[x_min, x_max]` with its top at `top`.
    pub fn add_ground(&mut self, x_min: f32, x_max: f32, top: f32) {
        let half = Vec2::new((x_max - x_min) / 2.0, 0.5);
        let center = Vec2::new((x_min + x_max) / 2.0, top - 0.5);
        self.collision.add_box(center, half, CollisionLayers::SOLID);
    }

    /// Solid block given by its corners.
    pub fn add_block(&mut self, min: Vec2, max: Vec2) {
        let center = (min + max) / 2.0;
        let half = (max - min) / 2.0;
        self.collision.add_box(center, half, CollisionLayers::SOLID);
    }

    /// Slope from `(x_from, base_y)` rising to `(x_to, base_y + height)`.
    ///
    /// `x_to` may be left of `x_from` for a slope that rises to the left.
    pub fn add_slope(&mut self, x_from: f32, x_to: f32, base_y: f32, height: f32) {
        let x_min = x_from.min(x_to);
        let width = (x_to - x_from).abs();
        let rising_right = x_to > x_from;
        self.collision
            .add_ramp(x_min, base_y, width, height, rising_right, CollisionLayers::SOLID);
    }

    pub fn add_platform(&mut self, spec: PlatformSpec) {
        self.platforms.push(spec);
    }

    pub fn add_spawn_point(&mut self, position: Vec2) {
        self.spawn_points.push(position);
    }

    /// Test level with everything the controller handles:
    ///
    /// ```text
    ///   plateau        ceiling         platform
    ///  ________                        =====>
    ///          \        ____
    ///           \slope          spawn          block
    ///            \_____________________________|#|______
    /// x: -30  -18  -12    -6  -2     0              7.5   12
    /// ```
    pub fn test_arena() -> Self {
        let mut level = Self::new("test_arena", "Test Arena");

        // Flat ground
        level.add_ground(-12.0, 12.0, 0.0);

        // Slope rising to the left onto a plateau
        level.add_slope(-12.0, -18.0, 0.0, 3.0);
        level.add_block(Vec2::new(-30.0, 0.0), Vec2::new(-18.0, 3.0));

        // Block on the right
        level.add_block(Vec2::new(7.5, 0.0), Vec2::new(8.5, 2.0));

        // Low ceiling
        level.add_block(Vec2::new(-6.0, 3.25), Vec2::new(-2.0, 3.75));

        // Platform shuttling above the ground
        level.add_platform(PlatformSpec {
            center: Vec2::new(3.0, 3.0),
            half_extents: Vec2::new(1.5, 0.25),
            route: PlatformRoute::Waypoints(WaypointConfig {
                local_waypoints: vec![Vec2::ZERO, Vec2::new(2.0, 0.0)],
                speed: 1.5,
                cyclic: false,
                wait_time: 0.5,
                ease_amount: 1.0,
            }),
        });

        // Actor centers, feet on the ground
        level.add_spawn_point(Vec2::new(0.0, 0.5));
        level.add_spawn_point(Vec2::new(-8.0, 0.5));

        level
    }
}
