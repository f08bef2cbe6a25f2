//! Raycast sweep-and-clamp collision resolution.
//!
//! A requested displacement is resolved in four phases, always in this
//! order:
//!
//! 1. **Descend**: glue the actor to a slope it is walking down
//! 2. **Horizontal**: clamp x against walls, start or continue climbing slopes
//! 3. **Vertical**: clamp y against floors and ceilings
//! 4. **Slope corner**: re-check x when a climbed slope changes angle
//!
//! Each phase consumes a [`Sweep`] and returns the next one. Nothing outside
//! the sweep is mutated, so resolving the same input twice gives the same
//! result.

use glam::Vec2;

use crate::collision::{CollisionLayers, RaycastHit, RaycastQuery};
use crate::error::ConfigError;
use crate::geometry::{direction, Bounds, RayOrigins, RaySweepGeometry};

use super::config::ControllerConfig;
use super::contact::ContactState;

/// Slope angles closer than this (degrees) are the same slope.
const ANGLE_TOLERANCE: f32 = 1.0e-3;

/// Output of one resolve call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Displacement that can be applied without penetrating anything.
    pub displacement: Vec2,
    /// Contact state after applying it.
    pub contacts: ContactState,
}

/// Working state threaded through the resolve phases.
#[derive(Debug, Clone, Copy)]
struct Sweep {
    displacement: Vec2,
    contacts: ContactState,
}

impl Sweep {
    fn begin(displacement: Vec2, previous: &ContactState) -> Self {
        let mut contacts = *previous;
        contacts.reset();
        contacts.move_distance_old = displacement;
        if displacement.x != 0.0 {
            contacts.face_dir = direction(displacement.x);
        }
        Self {
            displacement,
            contacts,
        }
    }

    fn finish(self, standing_on_platform: bool) -> Resolution {
        let mut contacts = self.contacts;
        if standing_on_platform {
            contacts.below = true;
        }
        Resolution {
            displacement: self.displacement,
            contacts,
        }
    }
}

/// Resolves requested displacements against the obstacle layers.
#[derive(Debug, Clone)]
pub struct CollisionResolver {
    config: ControllerConfig,
}

impl CollisionResolver {
    /// Create a resolver, rejecting invalid configuration.
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Clamp `displacement` so that an actor occupying `bounds` does not
    /// penetrate any obstacle, and classify its contacts.
    ///
    /// `previous` is the contact state from the actor's last move. When
    /// `standing_on_platform` is set the actor is reported as grounded
    /// whatever the sweep found.
    pub fn resolve<W: RaycastQuery + ?Sized>(
        &self,
        world: &W,
        geometry: &RaySweepGeometry,
        bounds: Bounds,
        displacement: Vec2,
        previous: &ContactState,
        standing_on_platform: bool,
    ) -> Resolution {
        let pass = SweepPass {
            world,
            geometry,
            origins: geometry.origins(bounds),
            config: &self.config,
        };

        let sweep = Sweep::begin(displacement, previous);
        let sweep = pass.descend_slope(sweep);
        let sweep = pass.horizontal(sweep);
        let sweep = pass.vertical(sweep);
        let sweep = pass.slope_corner(sweep);
        sweep.finish(standing_on_platform)
    }
}

/// Everything the phases read but never change.
struct SweepPass<'a, W: ?Sized> {
    world: &'a W,
    geometry: &'a RaySweepGeometry,
    origins: RayOrigins,
    config: &'a ControllerConfig,
}

impl<W: RaycastQuery + ?Sized> SweepPass<'_, W> {
    #[inline]
    fn skin(&self) -> f32 {
        self.geometry.skin_width()
    }

    #[inline]
    fn mask(&self) -> CollisionLayers {
        self.config.obstacle_mask
    }

    fn cast(&self, origin: Vec2, direction: Vec2, length: f32) -> Option<RaycastHit> {
        self.world.raycast(origin, direction, length, self.mask())
    }

    // ========================================================================
    // Descend
    // ========================================================================

    fn descend_slope(&self, sweep: Sweep) -> Sweep {
        let Sweep {
            mut displacement,
            mut contacts,
        } = sweep;

        if displacement.y >= 0.0 {
            return sweep;
        }

        // The corner still touching a slope we walk down is the trailing one.
        let direction_x = direction(displacement.x);
        let origin = if direction_x < 0.0 {
            self.origins.bottom_right
        } else {
            self.origins.bottom_left
        };

        let Some(hit) = self.cast(origin, -Vec2::Y, f32::INFINITY) else {
            return sweep;
        };

        let slope_angle = hit.slope_angle();
        if slope_angle <= ANGLE_TOLERANCE || slope_angle > self.config.max_descend_angle {
            return sweep;
        }
        // The slope must fall away in the direction of travel.
        if direction(hit.normal.x) != direction_x {
            return sweep;
        }

        let move_distance = displacement.x.abs();
        let (sin, cos) = slope_angle.to_radians().sin_cos();
        let tan = slope_angle.to_radians().tan();
        if hit.distance - self.skin() > tan * move_distance {
            return sweep;
        }

        displacement.x = cos * move_distance * direction_x;
        displacement.y -= sin * move_distance;

        contacts.slope_angle = slope_angle;
        contacts.descending_slope = true;
        contacts.below = true;

        Sweep {
            displacement,
            contacts,
        }
    }

    // ========================================================================
    // Horizontal
    // ========================================================================

    fn horizontal(&self, sweep: Sweep) -> Sweep {
        let Sweep {
            mut displacement,
            mut contacts,
        } = sweep;

        // Face direction, not the sign of x: a wall slide with x == 0 still
        // has to find the wall it is pressed against.
        let direction_x = contacts.face_dir;
        let skin = self.skin();
        let mut ray_length = displacement.x.abs() + skin;
        if displacement.x.abs() < skin {
            ray_length = 2.0 * skin;
        }

        for (i, origin) in self
            .geometry
            .horizontal_fan(&self.origins, direction_x)
            .enumerate()
        {
            let Some(hit) = self.cast(origin, Vec2::X * direction_x, ray_length) else {
                continue;
            };

            // Started inside a platform that moved into us this tick.
            if hit.distance == 0.0 {
                continue;
            }

            let slope_angle = hit.slope_angle();

            if i == 0 && slope_angle <= self.config.max_climb_angle {
                if contacts.descending_slope {
                    // Reversing at the bottom of a V: drop the descent.
                    contacts.descending_slope = false;
                    displacement = contacts.move_distance_old;
                }

                let mut distance_to_slope_start = 0.0;
                if !same_angle(slope_angle, contacts.slope_angle_old) {
                    distance_to_slope_start = hit.distance - skin;
                    displacement.x -= distance_to_slope_start * direction_x;
                }

                (displacement, contacts) = climb_slope(displacement, contacts, slope_angle);
                displacement.x += distance_to_slope_start * direction_x;
            }

            if !contacts.climbing_slope || slope_angle > self.config.max_climb_angle {
                displacement.x = (hit.distance - skin) * direction_x;
                ray_length = hit.distance;

                if contacts.climbing_slope {
                    displacement.y = contacts.slope_angle.to_radians().tan() * displacement.x.abs();
                }

                contacts.left = direction_x < 0.0;
                contacts.right = direction_x > 0.0;
            }
        }

        Sweep {
            displacement,
            contacts,
        }
    }

    // ========================================================================
    // Vertical
    // ========================================================================

    fn vertical(&self, sweep: Sweep) -> Sweep {
        let Sweep {
            mut displacement,
            mut contacts,
        } = sweep;

        if displacement.y == 0.0 {
            return sweep;
        }

        let direction_y = direction(displacement.y);
        let skin = self.skin();
        let mut ray_length = displacement.y.abs() + skin;
        let base = self.origins.left(direction_y);
        let spacing = self.geometry.spacing().vertical;

        for i in 0..self.geometry.vertical_ray_count() {
            // Cast from where the horizontal phase will leave us.
            let origin = base + Vec2::X * (spacing * i as f32 + displacement.x);
            let Some(hit) = self.cast(origin, Vec2::Y * direction_y, ray_length) else {
                continue;
            };

            displacement.y = (hit.distance - skin) * direction_y;
            ray_length = hit.distance;

            if contacts.climbing_slope {
                displacement.x = displacement.y / contacts.slope_angle.to_radians().tan()
                    * direction(displacement.x);
            }

            contacts.below = direction_y < 0.0;
            contacts.above = direction_y > 0.0;
        }

        Sweep {
            displacement,
            contacts,
        }
    }

    // ========================================================================
    // Slope corner
    // ========================================================================

    fn slope_corner(&self, sweep: Sweep) -> Sweep {
        let Sweep {
            mut displacement,
            mut contacts,
        } = sweep;

        if !contacts.climbing_slope {
            return sweep;
        }

        let direction_x = direction(displacement.x);
        let skin = self.skin();
        let ray_length = displacement.x.abs() + skin;
        let origin = self.origins.bottom(direction_x) + Vec2::Y * displacement.y;

        let Some(hit) = self.cast(origin, Vec2::X * direction_x, ray_length) else {
            return sweep;
        };

        let slope_angle = hit.slope_angle();
        if !same_angle(slope_angle, contacts.slope_angle) {
            displacement.x = (hit.distance - skin) * direction_x;
            contacts.slope_angle = slope_angle;
        }

        Sweep {
            displacement,
            contacts,
        }
    }
}

/// Turn the horizontal part of `displacement` into travel along a slope.
///
/// Skipped when the actor is already rising faster than the slope would lift
/// it, e.g. during a jump.
fn climb_slope(
    mut displacement: Vec2,
    mut contacts: ContactState,
    slope_angle: f32,
) -> (Vec2, ContactState) {
    let move_distance = displacement.x.abs();
    let (sin, cos) = slope_angle.to_radians().sin_cos();
    let climb_y = sin * move_distance;

    if displacement.y <= climb_y {
        displacement.y = climb_y;
        displacement.x = cos * move_distance * direction(displacement.x);
        contacts.climbing_slope = true;
        contacts.slope_angle = slope_angle;
        // Standing on a slope must allow jumping.
        contacts.below = true;
    }

    (displacement, contacts)
}

#[inline]
fn same_angle(a: f32, b: f32) -> bool {
    (a - b).abs() <= ANGLE_TOLERANCE
}

// ============================================================================
// Tests
// ============================================================================
