//! Collision layers for raycast filtering.
//!
//! Every body in the collision world belongs to one or more layers. Raycasts
//! carry a mask and only report bodies whose layers intersect it, which is
//! how actors ignore each other and how platforms find their passengers.

use serde::{Deserialize, Serialize};

/// Layer membership of a body, or a mask of layers a raycast may hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CollisionLayers(pub u32);

impl CollisionLayers {
    /// No layers.
    pub const EMPTY: Self = Self(0);

    /// Static level geometry - ground, walls, slopes, ceilings.
    pub const SOLID: Self = Self(1 << 0);

    /// Moving platforms. Block actors like solid geometry.
    pub const PLATFORM: Self = Self(1 << 1);

    /// Controlled actors. Carried by platforms, never blocked by each other.
    pub const ACTOR: Self = Self(1 << 2);

    /// Trigger volumes. Never block movement.
    pub const TRIGGER: Self = Self(1 << 3);

    /// What an actor's movement rays collide with.
    pub const MASK_OBSTACLE: Self = Self(Self::SOLID.0 | Self::PLATFORM.0);

    /// What a platform's passenger rays collide with.
    pub const MASK_PASSENGER: Self = Self(Self::ACTOR.0);

    /// Check if these layers contain every layer in `other`.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any of the given layers are set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Check if no layer is set.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for CollisionLayers {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for CollisionLayers {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}
