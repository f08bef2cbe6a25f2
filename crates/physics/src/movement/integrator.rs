//! Velocity integration: gravity, jumps, horizontal smoothing and walls.
//!
//! The integrator turns input and the previous tick's contacts into the
//! displacement handed to a [`KinematicController`]. It never touches the
//! world itself.
//!
//! [`KinematicController`]: crate::controller::KinematicController

use glam::Vec2;

use super::config::MotionConfig;
use super::smoothing::smooth_damp;
use super::state::MotionState;
use crate::controller::ContactState;
use crate::error::ConfigError;

/// Wall jump variant, chosen by input relative to the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallJump {
    /// Input towards the wall: steep jump back up the wall.
    Climb,
    /// No horizontal input: push off the wall.
    Off,
    /// Input away from the wall: long, flat leap.
    Leap,
}

/// What a jump press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Wall(WallJump),
}

/// Integrates one actor's velocity.
#[derive(Debug, Clone)]
pub struct MotionIntegrator {
    config: MotionConfig,
    state: MotionState,
}

impl MotionIntegrator {
    pub fn new(config: MotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = MotionState::new(config.gravity());
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.state.velocity
    }

    /// Set horizontal input; the actor accelerates towards
    /// `axis * move_speed`.
    pub fn set_horizontal_target(&mut self, axis: f32) {
        self.state.input_axis = axis;
        self.state.target_velocity_x = axis * self.config.move_speed;
    }

    /// Feed the actor's current height to apex tracking.
    ///
    /// The apex is the first height lower than the highest one seen since the
    /// jump. With faster falling, gravity doubles from there on.
    pub fn track_height(&mut self, height: f32) {
        let state = &mut self.state;
        if !state.reached_apex && state.max_height_reached > height {
            let delta = state.max_height_reached - state.start_height;
            let error = self.config.max_jump_height - delta;
            log::debug!(
                "jump result: start_height={:.4} max_height_reached={:.4} delta={:.4} error={:.4} jump_timer={:.4} gravity={} jump_velocity={}",
                state.start_height,
                state.max_height_reached,
                delta,
                error,
                state.jump_timer,
                state.gravity,
                self.config.jump_velocity(),
            );

            state.reached_apex = true;
            if self.config.faster_falling {
                state.gravity = self.config.gravity_down();
            }
        }
        state.max_height_reached = state.max_height_reached.max(height);
    }

    /// Start a full jump from `current_height`.
    pub fn jump(&mut self, current_height: f32) {
        self.state.velocity.y = self.config.jump_velocity();
        self.start_jump_tracking(current_height);
    }

    /// Jump input released. Cuts the jump short when faster falling is on.
    pub fn release_jump(&mut self) {
        if self.config.faster_falling {
            self.state.gravity = self.config.gravity_down();
        }
    }

    /// Jump off the wall on side `wall_direction` with horizontal input `axis`.
    ///
    /// Returns `None` when wall jumps are not configured.
    pub fn wall_jump(&mut self, wall_direction: f32, axis: f32, current_height: f32) -> Option<WallJump> {
        let wall = self.config.wall.as_ref()?;

        let (kind, impulse) = if axis * wall_direction > 0.0 {
            (WallJump::Climb, wall.wall_jump_climb)
        } else if axis == 0.0 {
            (WallJump::Off, wall.wall_jump_off)
        } else {
            (WallJump::Leap, wall.wall_leap)
        };

        self.state.velocity = Vec2::new(-wall_direction * impulse.x, impulse.y);
        self.state.wall_sliding = false;
        self.state.time_to_wall_unstick = 0.0;
        self.start_jump_tracking(current_height);

        log::debug!("wall jump {:?} off wall at {}: velocity={:?}", kind, wall_direction, self.state.velocity);
        Some(kind)
    }

    /// React to a jump press: wall jump while sliding, ground jump while
    /// grounded, otherwise nothing.
    pub fn handle_jump_press(&mut self, current_height: f32, contacts: &ContactState) -> Option<JumpKind> {
        if self.state.wall_sliding {
            let wall_direction = self.state.wall_direction;
            let axis = self.state.input_axis;
            if let Some(kind) = self.wall_jump(wall_direction, axis, current_height) {
                return Some(JumpKind::Wall(kind));
            }
        }
        if contacts.below {
            self.jump(current_height);
            return Some(JumpKind::Ground);
        }
        None
    }

    /// Advance velocity by `dt` and return the displacement for this tick.
    ///
    /// `contacts` are the ones from the actor's previous move.
    pub fn integrate(&mut self, dt: f32, contacts: &ContactState) -> Vec2 {
        if !contacts.below && !self.state.reached_apex {
            self.state.jump_timer += dt;
        }

        let state = &mut self.state;
        state.prev_velocity = state.velocity;

        let smooth_time = if contacts.below {
            self.config.acceleration_time_grounded
        } else {
            self.config.acceleration_time_airborne
        };
        state.velocity.x = smooth_damp(
            state.velocity.x,
            state.target_velocity_x,
            &mut state.velocity_x_smoothing,
            smooth_time,
            dt,
        );
        state.velocity.y += state.gravity * dt;

        self.update_wall_slide(dt, contacts);

        // Trapezoidal step
        (self.state.prev_velocity + self.state.velocity) * 0.5 * dt
    }

    /// Zero vertical velocity after touching a floor or ceiling.
    pub fn on_ground_or_ceiling_contact(&mut self) {
        self.state.velocity.y = 0.0;
    }

    /// Cancel velocity into whatever the last move ran into.
    pub fn apply_contacts(&mut self, contacts: &ContactState) {
        if contacts.vertical_contact() {
            self.on_ground_or_ceiling_contact();
        }
        if contacts.horizontal_contact() {
            self.state.velocity.x = 0.0;
        }
    }

    fn start_jump_tracking(&mut self, current_height: f32) {
        let state = &mut self.state;
        state.jump_timer = 0.0;
        state.gravity = self.config.gravity();
        state.reached_apex = false;
        state.max_height_reached = f32::NEG_INFINITY;
        state.start_height = current_height;
    }

    fn update_wall_slide(&mut self, dt: f32, contacts: &ContactState) {
        let state = &mut self.state;
        state.wall_sliding = false;

        let Some(wall) = self.config.wall.as_ref() else {
            return;
        };
        let Some(wall_direction) = contacts.wall_direction() else {
            return;
        };
        if contacts.below || state.velocity.y >= 0.0 {
            return;
        }

        state.wall_sliding = true;
        state.wall_direction = wall_direction;
        state.velocity.y = state.velocity.y.max(-wall.wall_slide_speed_max);

        if state.time_to_wall_unstick > 0.0 {
            state.velocity_x_smoothing = 0.0;
            state.velocity.x = 0.0;

            let pulling_away = state.input_axis != 0.0 && state.input_axis * wall_direction < 0.0;
            if pulling_away {
                state.time_to_wall_unstick -= dt;
            } else {
                state.time_to_wall_unstick = wall.wall_stick_time;
            }
        } else {
            state.time_to_wall_unstick = wall.wall_stick_time;
        }
    }
}
