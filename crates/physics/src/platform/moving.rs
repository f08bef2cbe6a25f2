//! A platform body that moves itself and carries its passengers.

use glam::Vec2;

use crate::collision::{BodyId, BodyQuery, RaycastQuery};
use crate::error::PhysicsError;

use super::config::{PlatformConfig, WaypointConfig};
use super::registry::PassengerRegistry;
use super::transporter::{CarryPhase, PlatformTransporter};
use super::waypoint::WaypointPath;

/// How a platform decides where to go each tick.
#[derive(Debug, Clone)]
pub enum PlatformMotion {
    /// Fixed velocity in units per second.
    Constant(Vec2),
    /// Follow a waypoint path.
    Waypoints(WaypointPath),
}

impl PlatformMotion {
    fn displacement(&mut self, position: Vec2, dt: f32) -> Vec2 {
        match self {
            PlatformMotion::Constant(velocity) => *velocity * dt,
            PlatformMotion::Waypoints(path) => path.advance(position, dt),
        }
    }
}

/// Moving platform: computes its displacement, finds passengers, moves
/// those that go first, moves itself, then moves the rest.
#[derive(Debug, Clone)]
pub struct MovingPlatform {
    body: BodyId,
    transporter: PlatformTransporter,
    motion: PlatformMotion,
}

impl MovingPlatform {
    pub fn new<W: BodyQuery + ?Sized>(
        body: BodyId,
        config: PlatformConfig,
        motion: PlatformMotion,
        world: &W,
    ) -> Result<Self, PhysicsError> {
        let bounds = world.bounds(body)?;
        let transporter = PlatformTransporter::new(config, bounds)?;
        Ok(Self {
            body,
            transporter,
            motion,
        })
    }

    /// Platform moving at a constant `velocity`.
    pub fn with_velocity<W: BodyQuery + ?Sized>(
        body: BodyId,
        config: PlatformConfig,
        velocity: Vec2,
        world: &W,
    ) -> Result<Self, PhysicsError> {
        Self::new(body, config, PlatformMotion::Constant(velocity), world)
    }

    /// Platform following waypoints relative to its current center.
    pub fn with_waypoints<W: BodyQuery + ?Sized>(
        body: BodyId,
        config: PlatformConfig,
        waypoints: WaypointConfig,
        world: &W,
    ) -> Result<Self, PhysicsError> {
        let origin = world.bounds(body)?.center();
        let path = WaypointPath::new(waypoints, origin)?;
        Self::new(body, config, PlatformMotion::Waypoints(path), world)
    }

    /// Advance the platform by one tick of `dt` seconds.
    ///
    /// Every passenger must have a controller in `registry`; this is checked
    /// before anything moves.
    ///
    /// # Returns
    ///
    /// The platform's own displacement.
    pub fn step<W: RaycastQuery + BodyQuery + ?Sized>(
        &mut self,
        world: &mut W,
        registry: &mut PassengerRegistry,
        dt: f32,
    ) -> Result<Vec2, PhysicsError> {
        let bounds = world.bounds(self.body)?;
        let displacement = self.motion.displacement(bounds.center(), dt);

        let records = self.transporter.compute_passengers(&*world, bounds, displacement);
        if let Some(missing) = records.iter().find(|r| !registry.contains(r.target)) {
            return Err(PhysicsError::UnregisteredPassenger(missing.target));
        }

        self.transporter
            .carry(world, registry, &records, CarryPhase::BeforePlatform)?;
        world.translate(self.body, displacement)?;
        self.transporter
            .carry(world, registry, &records, CarryPhase::AfterPlatform)?;

        Ok(displacement)
    }

    #[inline]
    pub fn body(&self) -> BodyId {
        self.body
    }

    pub fn motion(&self) -> &PlatformMotion {
        &self.motion
    }

    pub fn config(&self) -> &PlatformConfig {
        self.transporter.config()
    }
}
