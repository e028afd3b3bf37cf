use crate::vec2::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box stored as a mins/maxs corner pair.
/// Touching edges count as overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub mins: Vec2,
    pub maxs: Vec2,
}

impl Bounds {
    pub fn new(mins: Vec2, maxs: Vec2) -> Self {
        Bounds { mins, maxs }
    }

    pub fn from_coords(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Bounds {
            mins: Vec2::new(min_x, min_y),
            maxs: Vec2::new(max_x, max_y),
        }
    }

    /// Sentinel meaning "no bounds": mins = (1,1), maxs = (-1,-1)
    pub fn empty() -> Self {
        Bounds {
            mins: Vec2::new(1.0, 1.0),
            maxs: Vec2::new(-1.0, -1.0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mins.x > self.maxs.x || self.mins.y > self.maxs.y
    }

    /// Square bounds of the given half-size centered on the local origin
    pub fn centered(half_size: f32) -> Self {
        Bounds {
            mins: Vec2::new(-half_size, -half_size),
            maxs: Vec2::new(half_size, half_size),
        }
    }

    pub fn width(&self) -> f32 {
        self.maxs.x - self.mins.x
    }

    pub fn height(&self) -> f32 {
        self.maxs.y - self.mins.y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.mins.x + self.maxs.x) * 0.5,
            (self.mins.y + self.maxs.y) * 0.5,
        )
    }

    pub fn translated(&self, offset: Vec2) -> Bounds {
        Bounds {
            mins: self.mins + offset,
            maxs: self.maxs + offset,
        }
    }

    /// Smallest bounds enclosing both self and other
    pub fn union(&self, other: Bounds) -> Bounds {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return *self;
        }
        Bounds {
            mins: Vec2::new(self.mins.x.min(other.mins.x), self.mins.y.min(other.mins.y)),
            maxs: Vec2::new(self.maxs.x.max(other.maxs.x), self.maxs.y.max(other.maxs.y)),
        }
    }

    /// Touching-inclusive overlap test
    pub fn overlaps(&self, other: &Bounds) -> bool {
        if self.maxs.x < other.mins.x || self.mins.x > other.maxs.x {
            return false;
        }
        if self.maxs.y < other.mins.y || self.mins.y > other.maxs.y {
            return false;
        }
        true
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.mins.x
            && point.x <= self.maxs.x
            && point.y >= self.mins.y
            && point.y <= self.maxs.y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::empty()
    }
}
