//! Deterministic waypoint motion for moving platforms.

use glam::Vec2;

use super::config::WaypointConfig;
use crate::error::ConfigError;

/// Ease in/out: `t^a / (t^a + (1 - t)^a)` with `a = ease_amount + 1`.
///
/// `ease_amount == 0` is linear. `t` is clamped to `[0, 1]`.
pub fn ease(t: f32, ease_amount: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let a = ease_amount + 1.0;
    let head = t.powf(a);
    head / (head + (1.0 - t).powf(a))
}

/// Walks a platform along its waypoints.
///
/// Keeps its own clock, advanced by the tick duration passed to
/// [`advance`](WaypointPath::advance), so it never reads wall time.
#[derive(Debug, Clone)]
pub struct WaypointPath {
    config: WaypointConfig,
    /// Waypoints in world space, reversed in place at the ends of a
    /// non-cyclic path.
    global_waypoints: Vec<Vec2>,
    from_index: usize,
    percent_between: f32,
    elapsed: f32,
    next_move_time: f32,
}

impl WaypointPath {
    /// Anchor the configured path at `origin`.
    pub fn new(config: WaypointConfig, origin: Vec2) -> Result<Self, ConfigError> {
        config.validate()?;
        let global_waypoints = config.local_waypoints.iter().map(|p| *p + origin).collect();

        Ok(Self {
            config,
            global_waypoints,
            from_index: 0,
            percent_between: 0.0,
            elapsed: 0.0,
            next_move_time: 0.0,
        })
    }

    /// Advance the clock by `dt` and return how far a platform currently at
    /// `position` has to move.
    pub fn advance(&mut self, position: Vec2, dt: f32) -> Vec2 {
        self.elapsed += dt;
        if self.elapsed < self.next_move_time {
            return Vec2::ZERO;
        }

        let count = self.global_waypoints.len();
        self.from_index %= count;
        let to_index = (self.from_index + 1) % count;
        let from = self.global_waypoints[self.from_index];
        let to = self.global_waypoints[to_index];

        let segment_length = from.distance(to);
        self.percent_between = (self.percent_between + dt * self.config.speed / segment_length).clamp(0.0, 1.0);
        let eased = ease(self.percent_between, self.config.ease_amount);
        let target = from.lerp(to, eased);

        if self.percent_between >= 1.0 {
            self.percent_between = 0.0;
            self.from_index += 1;

            if !self.config.cyclic && self.from_index >= count - 1 {
                self.from_index = 0;
                self.global_waypoints.reverse();
            }

            self.next_move_time = self.elapsed + self.config.wait_time;
            log::debug!("platform reached waypoint {:?}, waiting {}s", to, self.config.wait_time);
        }

        target - position
    }

    /// Waypoint the platform is currently travelling towards.
    pub fn target(&self) -> Vec2 {
        let count = self.global_waypoints.len();
        self.global_waypoints[(self.from_index % count + 1) % count]
    }

    pub fn config(&self) -> &WaypointConfig {
        &self.config
    }
}
