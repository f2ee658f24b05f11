//! Blade hit polygon
//!
//! The saber's collision surface is a rectangle in blade space (pivot at the
//! hilt, tip pointing up) that is rotated by the saber tilt and moved to the
//! saber position each tick. Tests are done against the rotated shape, never
//! an axis-aligned box, so a tilted blade deflects exactly where it is drawn.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::rotate_point;

/// Rotated quadrilateral covering the active blade for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitPolygon {
    /// Corners in order: hilt-left, hilt-right, tip-right, tip-left
    pub corners: [Vec2; 4],
}

impl HitPolygon {
    /// Build the blade polygon for a pose
    ///
    /// `half_width` should already include the playability margin.
    pub fn blade(pivot: Vec2, tilt_radians: f32, length: f32, half_width: f32) -> Self {
        let local = [
            Vec2::new(-half_width, 0.0),
            Vec2::new(half_width, 0.0),
            Vec2::new(half_width, -length),
            Vec2::new(-half_width, -length),
        ];
        Self {
            corners: local.map(|c| pivot + rotate_point(c, tilt_radians)),
        }
    }

    /// Even-odd crossing test
    ///
    /// Counts edges whose y-span strictly straddles the point and whose
    /// crossing lies to the right of it. Points on an edge resolve the same
    /// way every time for a given polygon.
    pub fn contains(&self, point: Vec2) -> bool {
        let mut inside = false;
        let n = self.corners.len();
        let mut j = n - 1;
        for i in 0..n {
            let a = self.corners[i];
            let b = self.corners[j];
            if (a.y > point.y) != (b.y > point.y) {
                let cross_x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if point.x < cross_x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    pub fn centroid(&self) -> Vec2 {
        self.corners.iter().copied().sum::<Vec2>() / self.corners.len() as f32
    }

    /// Axis-aligned bounds (min, max)
    pub fn bounding_box(&self) -> (Vec2, Vec2) {
        let min = self.corners.iter().copied().fold(Vec2::splat(f32::INFINITY), Vec2::min);
        let max = self
            .corners
            .iter()
            .copied()
            .fold(Vec2::splat(f32::NEG_INFINITY), Vec2::max);
        (min, max)
    }
}
