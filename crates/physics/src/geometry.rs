//! Ray fan geometry derived from an axis-aligned bounding box.
//!
//! Every sweep casts fans of parallel rays from the corners of the body's
//! bounds, shrunk inward by the skin width so that no ray starts exactly on a
//! touching surface.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Move every side inward by `margin`.
    pub fn shrink(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            max: self.max - Vec2::splat(margin),
        }
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

/// Corner points the ray fans start from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RayOrigins {
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
    pub top_left: Vec2,
    pub top_right: Vec2,
}

impl RayOrigins {
    /// Bottom corner on the side a horizontal fan travels towards.
    #[inline]
    pub fn bottom(&self, direction_x: f32) -> Vec2 {
        if direction_x < 0.0 {
            self.bottom_left
        } else {
            self.bottom_right
        }
    }

    /// Left corner on the side a vertical fan travels towards.
    #[inline]
    pub fn left(&self, direction_y: f32) -> Vec2 {
        if direction_y < 0.0 {
            self.bottom_left
        } else {
            self.top_left
        }
    }
}

/// Distance between neighbouring rays of each fan.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RaySpacing {
    /// Spacing of the horizontal fan, measured along the y axis.
    pub horizontal: f32,
    /// Spacing of the vertical fan, measured along the x axis.
    pub vertical: f32,
}

/// Corner ray origins of `bounds` after shrinking by the skin width.
pub fn compute_ray_origins(bounds: Bounds, skin_width: f32) -> RayOrigins {
    let inner = bounds.shrink(skin_width);
    RayOrigins {
        bottom_left: Vec2::new(inner.min.x, inner.min.y),
        bottom_right: Vec2::new(inner.max.x, inner.min.y),
        top_left: Vec2::new(inner.min.x, inner.max.y),
        top_right: Vec2::new(inner.max.x, inner.max.y),
    }
}

/// Even spacing for fans of the given ray counts. Counts below 2 are clamped.
pub fn compute_spacing(
    bounds: Bounds,
    skin_width: f32,
    horizontal_ray_count: usize,
    vertical_ray_count: usize,
) -> RaySpacing {
    let size = bounds.shrink(skin_width).size();
    let horizontal_ray_count = horizontal_ray_count.max(2);
    let vertical_ray_count = vertical_ray_count.max(2);

    RaySpacing {
        horizontal: size.y / (horizontal_ray_count - 1) as f32,
        vertical: size.x / (vertical_ray_count - 1) as f32,
    }
}

/// Sign of `value` with zero counted as positive.
#[inline]
pub(crate) fn direction(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Ray fan layout for one body.
///
/// Spacing depends only on the body's size, so it is computed once and only
/// refreshed if the size changes. Origins depend on position and are rebuilt
/// before every sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaySweepGeometry {
    skin_width: f32,
    horizontal_ray_count: usize,
    vertical_ray_count: usize,
    spacing: RaySpacing,
    size: Vec2,
}

impl RaySweepGeometry {
    pub fn new(
        bounds: Bounds,
        skin_width: f32,
        horizontal_ray_count: usize,
        vertical_ray_count: usize,
    ) -> Self {
        let horizontal_ray_count = horizontal_ray_count.max(2);
        let vertical_ray_count = vertical_ray_count.max(2);
        Self {
            skin_width,
            horizontal_ray_count,
            vertical_ray_count,
            spacing: compute_spacing(bounds, skin_width, horizontal_ray_count, vertical_ray_count),
            size: bounds.size(),
        }
    }

    /// Recompute spacing if `bounds` has a different size than last time.
    pub fn refresh(&mut self, bounds: Bounds) {
        if bounds.size() != self.size {
            self.spacing = compute_spacing(
                bounds,
                self.skin_width,
                self.horizontal_ray_count,
                self.vertical_ray_count,
            );
            self.size = bounds.size();
        }
    }

    pub fn origins(&self, bounds: Bounds) -> RayOrigins {
        compute_ray_origins(bounds, self.skin_width)
    }

    #[inline]
    pub fn skin_width(&self) -> f32 {
        self.skin_width
    }

    #[inline]
    pub fn spacing(&self) -> RaySpacing {
        self.spacing
    }

    #[inline]
    pub fn horizontal_ray_count(&self) -> usize {
        self.horizontal_ray_count
    }

    #[inline]
    pub fn vertical_ray_count(&self) -> usize {
        self.vertical_ray_count
    }

    /// Origins of the horizontal fan travelling in `direction_x`, bottom up.
    pub fn horizontal_fan(&self, origins: &RayOrigins, direction_x: f32) -> impl Iterator<Item = Vec2> {
        let base = origins.bottom(direction_x);
        let spacing = self.spacing.horizontal;
        (0..self.horizontal_ray_count).map(move |i| base + Vec2::Y * (spacing * i as f32))
    }

    /// Origins of the vertical fan travelling in `direction_y`, left to right,
    /// shifted by `offset_x`.
    pub fn vertical_fan(
        &self,
        origins: &RayOrigins,
        direction_y: f32,
        offset_x: f32,
    ) -> impl Iterator<Item = Vec2> {
        let base = origins.left(direction_y);
        let spacing = self.spacing.vertical;
        (0..self.vertical_ray_count).map(move |i| base + Vec2::X * (spacing * i as f32 + offset_x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKIN: f32 = 0.015;

    fn unit_box() -> Bounds {
        Bounds::from_center(Vec2::new(0.0, 0.5), Vec2::new(0.5, 0.5))
    }

    #[test]
    fn test_ray_origins_shrunk_by_skin() {
        let origins = compute_ray_origins(unit_box(), SKIN);

        assert!((origins.bottom_left - Vec2::new(-0.485, 0.015)).length() < 1e-6);
        assert!((origins.bottom_right - Vec2::new(0.485, 0.015)).length() < 1e-6);
        assert!((origins.top_left - Vec2::new(-0.485, 0.985)).length() < 1e-6);
        assert!((origins.top_right - Vec2::new(0.485, 0.985)).length() < 1e-6);
    }

    #[test]
    fn test_spacing() {
        let spacing = compute_spacing(unit_box(), SKIN, 4, 3);
        let inner = 1.0 - 2.0 * SKIN;

        assert!((spacing.horizontal - inner / 3.0).abs() < 1e-6);
        assert!((spacing.vertical - inner / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_spacing_clamps_ray_count() {
        let spacing = compute_spacing(unit_box(), SKIN, 0, 1);
        let inner = 1.0 - 2.0 * SKIN;

        assert!((spacing.horizontal - inner).abs() < 1e-6);
        assert!((spacing.vertical - inner).abs() < 1e-6);
    }

    #[test]
    fn test_fans_span_the_whole_face() {
        let geometry = RaySweepGeometry::new(unit_box(), SKIN, 4, 4);
        let origins = geometry.origins(unit_box());

        let right: Vec<Vec2> = geometry.horizontal_fan(&origins, 1.0).collect();
        assert_eq!(right.len(), 4);
        assert_eq!(right[0], origins.bottom_right);
        assert!((right[3] - origins.top_right).length() < 1e-5);

        let down: Vec<Vec2> = geometry.vertical_fan(&origins, -1.0, 0.25).collect();
        assert_eq!(down.len(), 4);
        assert!((down[0] - (origins.bottom_left + Vec2::new(0.25, 0.0))).length() < 1e-6);
        assert!((down[3] - (origins.bottom_right + Vec2::new(0.25, 0.0))).length() < 1e-5);
    }

    #[test]
    fn test_refresh_only_on_resize() {
        let mut geometry = RaySweepGeometry::new(unit_box(), SKIN, 2, 2);
        let spacing = geometry.spacing();

        geometry.refresh(unit_box().translated(Vec2::new(3.0, 7.0)));
        assert_eq!(geometry.spacing(), spacing);

        geometry.refresh(Bounds::from_center(Vec2::ZERO, Vec2::new(1.0, 1.0)));
        assert!(geometry.spacing().horizontal > spacing.horizontal);
    }

    #[test]
    fn test_direction_counts_zero_as_positive() {
        assert_eq!(direction(0.0), 1.0);
        assert_eq!(direction(-0.0), 1.0);
        assert_eq!(direction(-2.0), -1.0);
        assert_eq!(direction(3.0), 1.0);
    }
}
