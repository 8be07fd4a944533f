//! Collision detection in play-area space
//!
//! Object and catcher positions live in percent coordinates. A `Layout`
//! carries the measured play-area and catcher dimensions needed to turn
//! them into absolute boxes for the overlap test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::OBJECT_SIZE;

/// Axis-aligned box in absolute units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Strict intersection: boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }
}

/// Measured geometry of the play area and catcher
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Play-area width and height
    pub area: Vec2,
    /// Catcher width and height
    pub catcher: Vec2,
    /// Catcher bottom edge, measured from the top of the play area
    pub catcher_bottom: f32,
}

impl Layout {
    /// Catcher resting on the floor of the play area
    pub fn new(area: Vec2, catcher: Vec2) -> Self {
        Self {
            area,
            catcher,
            catcher_bottom: area.y,
        }
    }

    /// Returns `None` when any dimension is unusable (zero, negative, NaN)
    pub fn validated(self) -> Option<Self> {
        let dims = [
            self.area.x,
            self.area.y,
            self.catcher.x,
            self.catcher.y,
        ];
        if dims.iter().all(|d| d.is_finite() && *d > 0.0) && self.catcher_bottom.is_finite() {
            Some(self)
        } else {
            None
        }
    }

    /// Convert a percent position to absolute play-area units
    #[inline]
    pub fn to_absolute(&self, left_pct: f32, top_pct: f32) -> Vec2 {
        Vec2::new(self.area.x * left_pct / 100.0, self.area.y * top_pct / 100.0)
    }

    /// Collision box of a falling object whose top-left sits at the given percent position
    pub fn object_box(&self, left_pct: f32, top_pct: f32) -> Aabb {
        Aabb::from_origin_size(
            self.to_absolute(left_pct, top_pct),
            Vec2::splat(OBJECT_SIZE),
        )
    }

    /// Catcher box, horizontally centred on `catcher_pct`
    pub fn catcher_box(&self, catcher_pct: f32) -> Aabb {
        let center_x = self.area.x * catcher_pct / 100.0;
        let half_w = self.catcher.x / 2.0;
        Aabb::new(
            Vec2::new(center_x - half_w, self.catcher_bottom - self.catcher.y),
            Vec2::new(center_x + half_w, self.catcher_bottom),
        )
    }

    /// Whether an object at the given percent position touches the catcher
    pub fn is_catch(&self, left_pct: f32, top_pct: f32, catcher_pct: f32) -> bool {
        self.object_box(left_pct, top_pct)
            .overlaps(&self.catcher_box(catcher_pct))
    }
}
