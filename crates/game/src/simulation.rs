//! Game simulation - the fixed-step loop.
//!
//! Input is sampled at any rate with [`Simulation::sample_input`]; the world
//! advances in fixed ticks with [`Simulation::fixed_step`]. Within a tick
//! platforms move first, carrying their passengers, then every actor
//! integrates its velocity and moves.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use strider_physics::movement::JumpKind;
use strider_physics::{
    BodyId, BodyQuery, CollisionLayers, CollisionWorld, ConfigError, ContactState, ControllerConfig,
    KinematicController, MotionConfig, MotionIntegrator, MovingPlatform, PassengerRegistry, PlatformConfig,
};

use crate::actor::{Actor, ActorId};
use crate::error::SimulationError;
use crate::input::ActorInput;
use crate::level::{Level, PlatformRoute, PlatformSpec};

/// Game simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    /// Half size of every actor's collision box.
    pub actor_half_extents: Vec2,

    /// Collision sweep settings for actors.
    pub controller: ControllerConfig,

    /// Velocity integration settings for actors.
    pub motion: MotionConfig,

    /// Passenger detection settings for platforms.
    pub platform: PlatformConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 50,
            actor_half_extents: Vec2::splat(0.5),
            controller: ControllerConfig::default(),
            motion: MotionConfig::default(),
            platform: PlatformConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Get the time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::NotPositive {
                name: "tick_rate",
                value: 0.0,
            });
        }
        if !(self.actor_half_extents.cmpgt(Vec2::ZERO).all() && self.actor_half_extents.is_finite()) {
            return Err(ConfigError::NotPositive {
                name: "actor_half_extents",
                value: self.actor_half_extents.min_element(),
            });
        }
        self.controller.validate()?;
        self.motion.validate()?;
        self.platform.validate()?;
        Ok(())
    }
}

/// The main game simulation.
#[derive(Debug)]
pub struct Simulation {
    /// Current frame/tick number.
    pub frame: u64,

    config: SimulationConfig,

    world: CollisionWorld,

    /// Controllers of every actor, keyed by body.
    registry: PassengerRegistry,

    actors: Vec<Actor>,

    platforms: Vec<MovingPlatform>,

    spawn_points: Vec<Vec2>,

    /// Next actor ID to assign.
    next_actor_id: u32,
}

impl Simulation {
    /// Create a new simulation with the given configuration and level.
    pub fn new(config: SimulationConfig, level: Level) -> Result<Self, SimulationError> {
        if let Err(err) = config.validate() {
            log::warn!("rejected simulation config: {}", err);
            return Err(err.into());
        }

        let Level {
            id,
            collision,
            spawn_points,
            platforms,
            ..
        } = level;

        let mut simulation = Self {
            frame: 0,
            config,
            world: collision,
            registry: PassengerRegistry::new(),
            actors: Vec::new(),
            platforms: Vec::new(),
            spawn_points,
            next_actor_id: 1,
        };

        for spec in &platforms {
            simulation.add_platform(spec)?;
        }

        log::info!(
            "loaded level {} with {} bodies and {} platforms",
            id,
            simulation.world.body_count(),
            simulation.platforms.len()
        );
        Ok(simulation)
    }

    /// Create a simulation with default configuration and the test arena.
    pub fn test_arena() -> Result<Self, SimulationError> {
        Self::new(SimulationConfig::default(), Level::test_arena())
    }

    /// Add an actor whose collision box is centered on `position`.
    pub fn add_actor(&mut self, name: &str, position: Vec2) -> Result<ActorId, SimulationError> {
        let body = self
            .world
            .add_box(position, self.config.actor_half_extents, CollisionLayers::ACTOR);
        let controller = KinematicController::new(body, self.config.controller.clone(), &self.world)?;
        let motion = MotionIntegrator::new(self.config.motion.clone())?;

        let id = ActorId(self.next_actor_id);
        self.next_actor_id += 1;

        self.registry.register(controller);
        self.actors.push(Actor::new(id, name.to_string(), body, motion));
        log::debug!("added {} ({}) at {:?}", id, name, position);
        Ok(id)
    }

    /// Add an actor at the level's next spawn point, or the origin.
    pub fn spawn_actor(&mut self, name: &str) -> Result<ActorId, SimulationError> {
        let position = if self.spawn_points.is_empty() {
            Vec2::ZERO
        } else {
            self.spawn_points[self.actors.len() % self.spawn_points.len()]
        };
        self.add_actor(name, position)
    }

    /// Add a moving platform.
    pub fn add_platform(&mut self, spec: &PlatformSpec) -> Result<BodyId, SimulationError> {
        let body = self
            .world
            .add_box(spec.center, spec.half_extents, CollisionLayers::PLATFORM);
        // Every ray gap must be narrower than an actor, or riders get missed
        let bounds = self.world.bounds(body)?;
        let config = self
            .config
            .platform
            .fitted_to(bounds, self.config.actor_half_extents * 2.0)?;
        if config.vertical_ray_count != self.config.platform.vertical_ray_count
            || config.horizontal_ray_count != self.config.platform.horizontal_ray_count
        {
            log::debug!(
                "platform {} uses {}x{} rays to fit actors",
                body,
                config.horizontal_ray_count,
                config.vertical_ray_count
            );
        }

        let platform = match &spec.route {
            PlatformRoute::Velocity(velocity) => MovingPlatform::with_velocity(body, config, *velocity, &self.world)?,
            PlatformRoute::Waypoints(waypoints) => {
                MovingPlatform::with_waypoints(body, config, waypoints.clone(), &self.world)?
            }
        };

        self.platforms.push(platform);
        Ok(body)
    }

    /// Record an input sample for an actor. May be called any number of
    /// times between fixed steps.
    pub fn sample_input(&mut self, actor: ActorId, input: ActorInput) -> Result<(), SimulationError> {
        let actor = self.actor_mut(actor)?;
        actor.input.sample(input.axis(), input.jump);
        Ok(())
    }

    /// Advance the simulation by one tick.
    pub fn fixed_step(&mut self) -> Result<(), SimulationError> {
        let dt = self.config.delta_time();

        for platform in &mut self.platforms {
            platform.step(&mut self.world, &mut self.registry, dt)?;
        }

        for actor in &mut self.actors {
            let command = actor.input.take();
            let contacts = *self.registry.get(actor.body)?.contacts();
            let height = self.world.bounds(actor.body)?.center().y;

            actor.motion.set_horizontal_target(command.axis);
            actor.motion.track_height(height);

            if command.jump_pressed {
                if let Some(kind) = actor.motion.handle_jump_press(height, &contacts) {
                    log::debug!("{} jumped: {:?}", actor.id, kind);
                    actor.last_jump = Some(kind);
                }
            }
            if command.jump_released {
                actor.motion.release_jump();
            }

            let displacement = actor.motion.integrate(dt, &contacts);

            let controller = self.registry.get_mut(actor.body)?;
            controller.move_by(&mut self.world, displacement, false)?;
            actor.motion.apply_contacts(controller.contacts());
        }

        self.frame += 1;
        Ok(())
    }

    /// Sample `input` for `actor` and run one tick.
    pub fn step_with(&mut self, actor: ActorId, input: ActorInput) -> Result<(), SimulationError> {
        self.sample_input(actor, input)?;
        self.fixed_step()
    }

    /// Center of an actor's collision box.
    pub fn actor_position(&self, actor: ActorId) -> Result<Vec2, SimulationError> {
        let body = self.actor(actor)?.body;
        Ok(self.world.bounds(body)?.center())
    }

    /// Contacts from an actor's last move.
    pub fn contacts(&self, actor: ActorId) -> Result<ContactState, SimulationError> {
        let body = self.actor(actor)?.body;
        Ok(*self.registry.get(body)?.contacts())
    }

    pub fn velocity(&self, actor: ActorId) -> Result<Vec2, SimulationError> {
        Ok(self.actor(actor)?.motion.velocity())
    }

    pub fn last_jump(&self, actor: ActorId) -> Result<Option<JumpKind>, SimulationError> {
        Ok(self.actor(actor)?.last_jump)
    }

    pub fn actor(&self, actor: ActorId) -> Result<&Actor, SimulationError> {
        self.actors
            .iter()
            .find(|a| a.id == actor)
            .ok_or(SimulationError::UnknownActor(actor))
    }

    fn actor_mut(&mut self, actor: ActorId) -> Result<&mut Actor, SimulationError> {
        self.actors
            .iter_mut()
            .find(|a| a.id == actor)
            .ok_or(SimulationError::UnknownActor(actor))
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Centers of all platforms.
    pub fn platform_positions(&self) -> Result<Vec<Vec2>, SimulationError> {
        self.platforms
            .iter()
            .map(|p| {
                self.world
                    .bounds(p.body())
                    .map(|bounds| bounds.center())
                    .map_err(SimulationError::from)
            })
            .collect()
    }

    pub fn platforms(&self) -> &[MovingPlatform] {
        &self.platforms
    }

    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Get the delta time for this simulation.
    pub fn delta_time(&self) -> f32 {
        self.config.delta_time()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use strider_physics::geometry::compute_spacing;
    use strider_physics::PhysicsError;

    fn flat_level() -> Level {
        let mut level = Level::new("flat", "Flat");
        level.add_ground(-50.0, 50.0, 0.0);
        level
    }

    fn run(sim: &mut Simulation, actor: ActorId, input: ActorInput, ticks: usize) {
        for _ in 0..ticks {
            sim.step_with(actor, input).unwrap();
        }
    }

    #[test]
    fn test_simulation_creation() {
        let sim = Simulation::test_arena().unwrap();
        assert_eq!(sim.frame, 0);
        assert!(sim.actors().is_empty());
        assert_eq!(sim.platform_positions().unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = SimulationConfig {
            tick_rate: 0,
            ..Default::default()
        };
        let result = Simulation::new(config, flat_level());
        assert!(matches!(
            result,
            Err(SimulationError::Physics(PhysicsError::Config(ConfigError::NotPositive { .. })))
        ));

        let config = SimulationConfig {
            controller: ControllerConfig {
                skin_width: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(Simulation::new(config, flat_level()).is_err());
    }

    #[test]
    fn test_spawn_uses_level_spawn_points() {
        let mut sim = Simulation::test_arena().unwrap();
        let first = sim.spawn_actor("A").unwrap();
        let second = sim.spawn_actor("B").unwrap();

        assert_ne!(first, second);
        assert!((sim.actor_position(first).unwrap() - Vec2::new(0.0, 0.5)).length() < 1e-5);
        assert!((sim.actor_position(second).unwrap() - Vec2::new(-8.0, 0.5)).length() < 1e-5);
    }

    #[test]
    fn test_tick_advances_frame() {
        let mut sim = Simulation::new(SimulationConfig::default(), flat_level()).unwrap();
        sim.add_actor("Test", Vec2::new(0.0, 0.5)).unwrap();

        sim.fixed_step().unwrap();
        assert_eq!(sim.frame, 1);
        sim.fixed_step().unwrap();
        assert_eq!(sim.frame, 2);
    }

    #[test]
    fn test_unknown_actor() {
        let mut sim = Simulation::new(SimulationConfig::default(), flat_level()).unwrap();
        let result = sim.sample_input(ActorId(42), ActorInput::idle());
        assert_eq!(result, Err(SimulationError::UnknownActor(ActorId(42))));
        assert!(sim.actor_position(ActorId(42)).is_err());
    }

    #[test]
    fn test_moves_right_with_input() {
        let mut sim = Simulation::new(SimulationConfig::default(), flat_level()).unwrap();
        let id = sim.add_actor("Test", Vec2::new(0.0, 0.5)).unwrap();

        run(&mut sim, id, ActorInput::moving(1.0), 50);

        let position = sim.actor_position(id).unwrap();
        // Most of one second at 6 units/second
        assert!(position.x > 5.0, "x={}", position.x);
        assert!((position.y - 0.5).abs() < 1e-3);
        assert!(sim.contacts(id).unwrap().below);
    }

    #[test]
    fn test_moves_left_with_input() {
        let mut sim = Simulation::new(SimulationConfig::default(), flat_level()).unwrap();
        let id = sim.add_actor("Test", Vec2::new(0.0, 0.5)).unwrap();

        run(&mut sim, id, ActorInput::moving(-1.0), 10);

        assert!(sim.actor_position(id).unwrap().x < 0.0);
        assert_eq!(sim.contacts(id).unwrap().face_dir, -1.0);
    }

    #[test]
    fn test_falls_and_lands() {
        let mut sim = Simulation::new(SimulationConfig::default(), flat_level()).unwrap();
        // Feet half a unit above the ground
        let id = sim.add_actor("Test", Vec2::new(0.0, 1.0)).unwrap();

        let mut landed_on = None;
        for tick in 0..50 {
            sim.fixed_step().unwrap();
            if sim.contacts(id).unwrap().below {
                landed_on = Some(tick);
                break;
            }
            assert!(sim.velocity(id).unwrap().y < 0.0);
        }

        assert!(landed_on.is_some(), "never landed");
        // Vertical velocity is cancelled on the landing tick itself
        assert_eq!(sim.velocity(id).unwrap().y, 0.0);
        assert!((sim.actor_position(id).unwrap().y - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_jump_reaches_configured_height() {
        let mut sim = Simulation::new(SimulationConfig::default(), flat_level()).unwrap();
        let id = sim.add_actor("Test", Vec2::new(0.0, 0.5)).unwrap();
        let max_jump_height = sim.config().motion.max_jump_height;

        // Settle onto the ground
        sim.fixed_step().unwrap();
        assert!(sim.contacts(id).unwrap().below);
        let start = sim.actor_position(id).unwrap().y;

        sim.step_with(id, ActorInput::idle().with_jump(true)).unwrap();
        assert_eq!(sim.last_jump(id).unwrap(), Some(JumpKind::Ground));

        let mut peak = start;
        for _ in 0..60 {
            sim.fixed_step().unwrap();
            peak = peak.max(sim.actor_position(id).unwrap().y);
        }

        assert!(
            (peak - start - max_jump_height).abs() < 0.01,
            "jumped {} instead of {}",
            peak - start,
            max_jump_height
        );
        assert!(sim.actor(id).unwrap().motion.state().reached_apex);
        assert!(sim.contacts(id).unwrap().below, "landed again");
    }

    #[test]
    fn test_jump_tap_between_steps() {
        let mut sim = Simulation::new(SimulationConfig::default(), flat_level()).unwrap();
        let id = sim.add_actor("Test", Vec2::new(0.0, 0.5)).unwrap();
        sim.fixed_step().unwrap();

        // Pressed and released before the next step
        sim.sample_input(id, ActorInput::idle().with_jump(true)).unwrap();
        sim.sample_input(id, ActorInput::idle()).unwrap();
        sim.fixed_step().unwrap();

        assert!(sim.velocity(id).unwrap().y > 0.0);
    }

    #[test]
    fn test_no_jump_in_the_air() {
        let mut sim = Simulation::new(SimulationConfig::default(), flat_level()).unwrap();
        let id = sim.add_actor("Test", Vec2::new(0.0, 5.0)).unwrap();
        sim.fixed_step().unwrap();

        sim.step_with(id, ActorInput::idle().with_jump(true)).unwrap();

        assert_eq!(sim.last_jump(id).unwrap(), None);
        assert!(sim.velocity(id).unwrap().y < 0.0);
    }

    #[test]
    fn test_ceiling_stops_jump() {
        let mut level = flat_level();
        // Underside two units above the actor's head
        level.add_block(Vec2::new(-2.0, 3.0), Vec2::new(2.0, 4.0));
        let mut sim = Simulation::new(SimulationConfig::default(), level).unwrap();
        let id = sim.add_actor("Test", Vec2::new(0.0, 0.5)).unwrap();
        sim.fixed_step().unwrap();

        sim.step_with(id, ActorInput::idle().with_jump(true)).unwrap();
        let mut bumped = false;
        for _ in 0..20 {
            sim.fixed_step().unwrap();
            if sim.contacts(id).unwrap().above {
                bumped = true;
                assert_eq!(sim.velocity(id).unwrap().y, 0.0);
                break;
            }
        }

        assert!(bumped);
        assert!((sim.actor_position(id).unwrap().y - 2.5).abs() < 1e-3);
    }

    #[test]
    fn test_wall_stops_actor() {
        let mut level = flat_level();
        level.add_block(Vec2::new(3.0, 0.0), Vec2::new(4.0, 3.0));
        let mut sim = Simulation::new(SimulationConfig::default(), level).unwrap();
        let id = sim.add_actor("Test", Vec2::new(0.0, 0.5)).unwrap();

        run(&mut sim, id, ActorInput::moving(1.0), 50);

        let contacts = sim.contacts(id).unwrap();
        assert!(contacts.right);
        assert!((sim.actor_position(id).unwrap().x - 2.5).abs() < 1e-3);
        assert_eq!(sim.velocity(id).unwrap().x, 0.0);
    }

    #[test]
    fn test_climbs_slope_onto_plateau() {
        let mut sim = Simulation::test_arena().unwrap();
        // Just right of the slope's foot at x=-12
        let id = sim.add_actor("Climber", Vec2::new(-10.5, 0.5)).unwrap();

        let mut climbed = false;
        for tick in 0..120 {
            sim.step_with(id, ActorInput::moving(-1.0)).unwrap();
            let contacts = sim.contacts(id).unwrap();
            assert!(!contacts.left, "tick {}: slope blocked like a wall", tick);
            if contacts.climbing_slope {
                climbed = true;
                assert!(contacts.below, "tick {}: climbing must allow jumping", tick);
            }
        }

        assert!(climbed);
        let position = sim.actor_position(id).unwrap();
        assert!(position.x < -19.0, "x={}", position.x);
        assert!((position.y - 3.5).abs() < 0.05, "y={}", position.y);
    }

    #[test]
    fn test_slope_keeps_walking_speed() {
        let mut level = flat_level();
        level.add_slope(5.0, 25.0, 0.0, 10.0);
        let mut sim = Simulation::new(SimulationConfig::default(), level).unwrap();
        let flat = sim.add_actor("Flat", Vec2::new(-20.0, 0.5)).unwrap();
        let sloped = sim.add_actor("Sloped", Vec2::new(4.0, 0.5)).unwrap();

        // Reach full speed, the second actor well onto the slope
        for _ in 0..50 {
            sim.sample_input(flat, ActorInput::moving(1.0)).unwrap();
            sim.step_with(sloped, ActorInput::moving(1.0)).unwrap();
        }
        assert!(sim.contacts(sloped).unwrap().climbing_slope);

        let flat_start = sim.actor_position(flat).unwrap();
        let sloped_start = sim.actor_position(sloped).unwrap();
        for _ in 0..10 {
            sim.sample_input(flat, ActorInput::moving(1.0)).unwrap();
            sim.step_with(sloped, ActorInput::moving(1.0)).unwrap();
        }
        let flat_distance = (sim.actor_position(flat).unwrap() - flat_start).length();
        let sloped_distance = (sim.actor_position(sloped).unwrap() - sloped_start).length();

        assert!(
            (flat_distance - sloped_distance).abs() < 0.05,
            "flat {} vs slope {}",
            flat_distance,
            sloped_distance
        );
    }

    #[test]
    fn test_rides_moving_platform() {
        let speed = 2.0;
        // 0 and -1.3 fall between the rays of an unfitted four-ray fan
        for offset in [0.0, -1.3, 1.0] {
            let mut level = flat_level();
            level.add_platform(PlatformSpec {
                center: Vec2::new(0.0, 2.0),
                half_extents: Vec2::new(2.0, 0.25),
                route: PlatformRoute::Velocity(Vec2::new(speed, 0.0)),
            });
            let mut sim = Simulation::new(SimulationConfig::default(), level).unwrap();
            // Standing on the platform's top at y=2.25
            let id = sim.add_actor("Rider", Vec2::new(offset, 2.75)).unwrap();
            let dt = sim.delta_time();

            sim.fixed_step().unwrap();
            let mut previous = sim.actor_position(id).unwrap();
            for tick in 0..40 {
                sim.fixed_step().unwrap();
                let position = sim.actor_position(id).unwrap();
                assert!(
                    (position.x - previous.x - speed * dt).abs() < 1e-4,
                    "offset {} tick {}: moved {}",
                    offset,
                    tick,
                    position.x - previous.x
                );
                assert!((position.y - 2.75).abs() < 1e-4);
                assert!(sim.contacts(id).unwrap().below);
                previous = position;
            }
        }
    }

    #[test]
    fn test_platform_rays_fit_actor_width() {
        let mut level = flat_level();
        level.add_platform(PlatformSpec {
            center: Vec2::new(0.0, 2.0),
            half_extents: Vec2::new(2.0, 0.25),
            route: PlatformRoute::Velocity(Vec2::X),
        });
        let config = SimulationConfig::default();
        let actor_width = config.actor_half_extents.x * 2.0;
        let sim = Simulation::new(config, level).unwrap();

        let platform = &sim.platforms()[0];
        let fitted = platform.config();
        let bounds = sim.world().bounds(platform.body()).unwrap();
        let spacing = compute_spacing(
            bounds,
            fitted.skin_width,
            fitted.horizontal_ray_count,
            fitted.vertical_ray_count,
        );

        assert!(fitted.vertical_ray_count > sim.config().platform.vertical_ray_count);
        assert!(spacing.vertical < actor_width, "spacing {}", spacing.vertical);
    }

    #[test]
    fn test_determinism() {
        let inputs: Vec<ActorInput> = (0..200)
            .map(|i| ActorInput {
                left: i % 7 == 0,
                right: i % 2 == 0,
                jump: i % 25 < 10,
            })
            .collect();

        let run_arena = || {
            let mut sim = Simulation::test_arena().unwrap();
            let id = sim.spawn_actor("Test").unwrap();
            for input in &inputs {
                sim.step_with(id, *input).unwrap();
            }
            sim.actor_position(id).unwrap()
        };

        assert_eq!(run_arena(), run_arena());
    }
}
