//! Collision detection for rotated rectangles
//!
//! Every sprite is hit-tested as an oriented rectangle. Two rectangles overlap
//! when a vertex of one of their triangles lies inside a triangle of the other.
//! Overlaps where only edges cross (no vertex contained) are not reported;
//! hit balance is tuned around that.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The four corners of a rotated rectangle, in winding order
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrientedRect {
    pub corners: [Vec2; 4],
}

impl OrientedRect {
    /// Build the corners of a rectangle centred on `center`, rotated by
    /// `rotation` radians.
    pub fn from_pose(center: Vec2, half_extents: Vec2, rotation: f32) -> Self {
        let local = [
            Vec2::new(-half_extents.x, -half_extents.y),
            Vec2::new(half_extents.x, -half_extents.y),
            Vec2::new(half_extents.x, half_extents.y),
            Vec2::new(-half_extents.x, half_extents.y),
        ];
        let rot = Vec2::from_angle(rotation);
        Self {
            corners: local.map(|corner| center + rot.rotate(corner)),
        }
    }

    /// The two triangles sharing the 0-2 diagonal
    #[inline]
    pub fn triangles(&self) -> [[Vec2; 3]; 2] {
        let c = self.corners;
        [[c[0], c[1], c[2]], [c[0], c[2], c[3]]]
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let mut min = self.corners[0];
        let mut max = self.corners[0];
        for corner in &self.corners[1..] {
            min = min.min(*corner);
            max = max.max(*corner);
        }
        (min, max)
    }

    /// Centre point (mean of the corners)
    pub fn center(&self) -> Vec2 {
        self.corners.iter().copied().sum::<Vec2>() / 4.0
    }
}

/// Check if point `p` lies inside or on the edge of triangle `abc`
///
/// Works for either winding; the signed area decides which comparison applies.
/// Coordinates are taken relative to `a`, so a point equal to one of the
/// triangle's corners always tests as inside.
pub fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let (p, b, c) = (p - a, b - a, c - a);

    let s = c.y * p.x - c.x * p.y;
    let t = b.x * p.y - b.y * p.x;

    if (s < 0.0) != (t < 0.0) {
        return false;
    }

    let area = b.x * c.y - b.y * c.x;
    if area < 0.0 {
        s <= 0.0 && s + t >= area
    } else {
        s >= 0.0 && s + t <= area
    }
}

/// Check whether two oriented rectangles overlap
pub fn rects_overlap(a: &OrientedRect, b: &OrientedRect) -> bool {
    let tris_a = a.triangles();
    let tris_b = b.triangles();

    for t1 in &tris_a {
        for t2 in &tris_b {
            if t1.iter().any(|&v| point_in_triangle(v, t2[0], t2[1], t2[2])) {
                return true;
            }
            if t2.iter().any(|&v| point_in_triangle(v, t1[0], t1[1], t1[2])) {
                return true;
            }
        }
    }

    false
}
