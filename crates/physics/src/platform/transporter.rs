//! Passenger detection and transport for moving platforms.
//!
//! Before a platform moves, three ray fans look for bodies it is about to
//! affect:
//!
//! 1. Along its vertical motion: bodies it lifts or pushes down
//! 2. Along its horizontal motion: bodies it shoves sideways
//! 3. A short upward fan when moving down or sideways: riders resting on top
//!
//! Each passenger is recorded once, by the first fan that finds it.

use std::collections::HashSet;

use glam::Vec2;

use crate::collision::{BodyId, BodyQuery, RaycastQuery};
use crate::error::{ConfigError, PhysicsError};
use crate::geometry::{direction, Bounds, RaySweepGeometry};

use super::config::PlatformConfig;
use super::registry::PassengerRegistry;

/// Forced displacement of one passenger for one platform tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassengerRecord {
    pub target: BodyId,
    pub displacement: Vec2,
    /// The passenger is riding the platform and counts as grounded.
    pub standing_on_platform: bool,
    /// Move the passenger before the platform translates.
    pub move_before_platform: bool,
}

/// Which passengers to move relative to the platform's own translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarryPhase {
    BeforePlatform,
    AfterPlatform,
}

impl CarryPhase {
    #[inline]
    fn includes(self, record: &PassengerRecord) -> bool {
        record.move_before_platform == (self == CarryPhase::BeforePlatform)
    }
}

/// Finds and moves the passengers of one platform.
#[derive(Debug, Clone)]
pub struct PlatformTransporter {
    config: PlatformConfig,
    geometry: RaySweepGeometry,
}

impl PlatformTransporter {
    pub fn new(config: PlatformConfig, bounds: Bounds) -> Result<Self, ConfigError> {
        config.validate()?;
        let geometry = RaySweepGeometry::new(
            bounds,
            config.skin_width,
            config.horizontal_ray_count,
            config.vertical_ray_count,
        );
        Ok(Self { config, geometry })
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// Work out who a platform at `bounds` moving by `displacement` carries,
    /// and by how much.
    pub fn compute_passengers<W: RaycastQuery + ?Sized>(
        &mut self,
        world: &W,
        bounds: Bounds,
        displacement: Vec2,
    ) -> Vec<PassengerRecord> {
        self.geometry.refresh(bounds);
        let origins = self.geometry.origins(bounds);
        let skin = self.geometry.skin_width();
        let mask = self.config.passenger_mask;

        let mut moved: HashSet<BodyId> = HashSet::new();
        let mut records = Vec::new();

        let direction_x = direction(displacement.x);
        let direction_y = direction(displacement.y);

        // Vertically moving platform
        if displacement.y != 0.0 {
            let ray_length = displacement.y.abs() + skin;

            for origin in self.geometry.vertical_fan(&origins, direction_y, 0.0) {
                let Some(hit) = world.raycast(origin, Vec2::Y * direction_y, ray_length, mask) else {
                    continue;
                };
                if !moved.insert(hit.target) {
                    continue;
                }

                let moving_up = direction_y > 0.0;
                // Close the gap, then carry the rest of the way
                let push_x = if moving_up { displacement.x } else { 0.0 };
                let push_y = displacement.y - (hit.distance - skin) * direction_y;

                records.push(PassengerRecord {
                    target: hit.target,
                    displacement: Vec2::new(push_x, push_y),
                    standing_on_platform: moving_up,
                    move_before_platform: true,
                });
            }
        }

        // Horizontally moving platform
        if displacement.x != 0.0 {
            let ray_length = displacement.x.abs() + skin;

            for origin in self.geometry.horizontal_fan(&origins, direction_x) {
                let Some(hit) = world.raycast(origin, Vec2::X * direction_x, ray_length, mask) else {
                    continue;
                };
                if !moved.insert(hit.target) {
                    continue;
                }

                let push_x = displacement.x - (hit.distance - skin) * direction_x;
                // Nudge down so the pushed body still sees the ground
                let push_y = -skin;

                records.push(PassengerRecord {
                    target: hit.target,
                    displacement: Vec2::new(push_x, push_y),
                    standing_on_platform: false,
                    move_before_platform: true,
                });
            }
        }

        // Riders on top of a platform moving down or sideways
        if direction_y < 0.0 || (displacement.y == 0.0 && displacement.x != 0.0) {
            let ray_length = 2.0 * skin;

            for origin in self.geometry.vertical_fan(&origins, 1.0, 0.0) {
                let Some(hit) = world.raycast(origin, Vec2::Y, ray_length, mask) else {
                    continue;
                };
                if !moved.insert(hit.target) {
                    continue;
                }

                records.push(PassengerRecord {
                    target: hit.target,
                    displacement,
                    standing_on_platform: true,
                    move_before_platform: false,
                });
            }
        }

        for record in &records {
            log::trace!(
                "passenger {} push={:?} standing={} before={}",
                record.target,
                record.displacement,
                record.standing_on_platform,
                record.move_before_platform
            );
        }

        records
    }

    /// Move the passengers of `phase` through their own controllers.
    ///
    /// Fails on the first passenger without a registered controller.
    pub fn carry<W: RaycastQuery + BodyQuery + ?Sized>(
        &self,
        world: &mut W,
        registry: &mut PassengerRegistry,
        records: &[PassengerRecord],
        phase: CarryPhase,
    ) -> Result<(), PhysicsError> {
        for record in records.iter().filter(|r| phase.includes(r)) {
            let controller = registry.get_mut(record.target)?;
            controller.move_by(world, record.displacement, record.standing_on_platform)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{CollisionLayers, CollisionWorld};

    const SKIN: f32 = 0.015;
    const EPSILON: f32 = 1e-4;

    /// Platform 2 wide and 0.5 tall with its top at y=0.25.
    fn create_test_world() -> (CollisionWorld, BodyId) {
        let mut world = CollisionWorld::new();
        let platform = world.add_box(Vec2::ZERO, Vec2::new(1.0, 0.25), CollisionLayers::PLATFORM);
        (world, platform)
    }

    fn transporter(world: &CollisionWorld, platform: BodyId) -> PlatformTransporter {
        PlatformTransporter::new(PlatformConfig::default(), world.bounds(platform).unwrap()).unwrap()
    }

    fn add_rider(world: &mut CollisionWorld, x: f32, gap: f32) -> BodyId {
        world.add_box(Vec2::new(x, 0.75 + gap), Vec2::splat(0.5), CollisionLayers::ACTOR)
    }

    #[test]
    fn test_rider_recorded_once() {
        let (mut world, platform) = create_test_world();
        // Wide enough for several rays of each fan
        let rider = world.add_box(Vec2::new(0.0, 1.25), Vec2::new(1.0, 1.0), CollisionLayers::ACTOR);
        let mut transporter = transporter(&world, platform);
        let bounds = world.bounds(platform).unwrap();

        for displacement in [Vec2::new(0.0, 0.1), Vec2::new(0.0, -0.1), Vec2::new(0.2, 0.0), Vec2::new(0.2, 0.1)] {
            let records = transporter.compute_passengers(&world, bounds, displacement);
            assert_eq!(records.len(), 1, "displacement {:?}: {:?}", displacement, records);
            assert_eq!(records[0].target, rider);
        }
    }

    #[test]
    fn test_lifting_platform_closes_gap_first() {
        let (mut world, platform) = create_test_world();
        add_rider(&mut world, 0.0, 0.2);
        let mut transporter = transporter(&world, platform);
        let bounds = world.bounds(platform).unwrap();

        let records = transporter.compute_passengers(&world, bounds, Vec2::new(0.1, 0.5));

        assert_eq!(records.len(), 1);
        let record = records[0];
        assert!((record.displacement - Vec2::new(0.1, 0.3)).length() < EPSILON, "{:?}", record);
        assert!(record.standing_on_platform);
        assert!(record.move_before_platform);
    }

    #[test]
    fn test_descending_platform_carries_rider_after() {
        let (mut world, platform) = create_test_world();
        add_rider(&mut world, 0.0, 0.0);
        let mut transporter = transporter(&world, platform);
        let bounds = world.bounds(platform).unwrap();

        let displacement = Vec2::new(0.0, -0.3);
        let records = transporter.compute_passengers(&world, bounds, displacement);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].displacement, displacement);
        assert!(records[0].standing_on_platform);
        assert!(!records[0].move_before_platform);
    }

    #[test]
    fn test_pushed_sideways() {
        let (mut world, platform) = create_test_world();
        // Beside the platform, 0.05 past its right edge
        let pushed = world.add_box(Vec2::new(1.55, 0.0), Vec2::splat(0.5), CollisionLayers::ACTOR);
        let mut transporter = transporter(&world, platform);
        let bounds = world.bounds(platform).unwrap();

        let records = transporter.compute_passengers(&world, bounds, Vec2::new(0.2, 0.0));

        assert_eq!(records.len(), 1);
        let record = records[0];
        assert_eq!(record.target, pushed);
        assert!((record.displacement.x - 0.15).abs() < EPSILON);
        assert_eq!(record.displacement.y, -SKIN);
        assert!(!record.standing_on_platform);
        assert!(record.move_before_platform);
    }

    #[test]
    fn test_static_scenery_is_not_a_passenger() {
        let (mut world, platform) = create_test_world();
        world.add_box(Vec2::new(0.0, 0.75), Vec2::splat(0.5), CollisionLayers::SOLID);
        let mut transporter = transporter(&world, platform);
        let bounds = world.bounds(platform).unwrap();

        let records = transporter.compute_passengers(&world, bounds, Vec2::new(0.2, 0.0));
        assert!(records.is_empty());
    }

    #[test]
    fn test_carry_respects_phase() {
        let (mut world, platform) = create_test_world();
        let rider = add_rider(&mut world, 0.0, 0.0);
        let mut registry = PassengerRegistry::new();
        registry.register(
            crate::controller::KinematicController::new(rider, Default::default(), &world).unwrap(),
        );
        let mut transporter = transporter(&world, platform);
        let bounds = world.bounds(platform).unwrap();

        let records = transporter.compute_passengers(&world, bounds, Vec2::new(0.2, 0.0));
        let start = world.position(rider).unwrap();

        transporter
            .carry(&mut world, &mut registry, &records, CarryPhase::BeforePlatform)
            .unwrap();
        assert_eq!(world.position(rider).unwrap(), start);

        transporter
            .carry(&mut world, &mut registry, &records, CarryPhase::AfterPlatform)
            .unwrap();
        assert!((world.position(rider).unwrap() - start - Vec2::new(0.2, 0.0)).length() < EPSILON);
        assert!(registry.get(rider).unwrap().contacts().below);
    }

    #[test]
    fn test_carry_unregistered_passenger_fails() {
        let (mut world, platform) = create_test_world();
        let rider = add_rider(&mut world, 0.0, 0.0);
        let mut registry = PassengerRegistry::new();
        let mut transporter = transporter(&world, platform);
        let bounds = world.bounds(platform).unwrap();

        let records = transporter.compute_passengers(&world, bounds, Vec2::new(0.2, 0.0));
        let result = transporter.carry(&mut world, &mut registry, &records, CarryPhase::AfterPlatform);

        assert_eq!(result, Err(PhysicsError::UnregisteredPassenger(rider)));
    }
}
