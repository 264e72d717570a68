//! Play area geometry
//!
//! The movable region is an ellipse sitting in the lower part of the
//! viewport, cut off from above by a horizontal line. Every entity is kept
//! inside it with its own radius (plus padding) subtracted from the ellipse.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{BULLET_BOUNDS_MARGIN, SPAWN_EDGE_PUSH, SPAWN_SAMPLE_ATTEMPTS};
use crate::length_or_unit;

/// Elliptical movable region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    /// Ellipse center
    pub center: Vec2,
    /// Horizontal radius
    pub rx: f32,
    /// Vertical radius
    pub ry: f32,
    /// Nothing may be above this line (smaller y is "up")
    pub y_min: f32,
    /// Extra inset applied when clamping
    pub pad: f32,
    /// Viewport the area was derived from (bullet culling bounds)
    pub viewport: Vec2,
}

impl PlayArea {
    /// Derive the area from a viewport size
    pub fn from_viewport(width: f32, height: f32) -> Self {
        Self {
            center: Vec2::new(width * 0.52, height * 0.74),
            rx: width * 0.44,
            ry: height * 0.28,
            y_min: height * 0.42,
            pad: 10.0,
            viewport: Vec2::new(width, height),
        }
    }

    /// Padded radii usable by an entity of radius `r`
    #[inline]
    pub fn usable_radii(&self, r: f32) -> Vec2 {
        Vec2::new(
            (self.rx - r - self.pad).max(f32::EPSILON),
            (self.ry - r - self.pad).max(f32::EPSILON),
        )
    }

    /// Squared normalized distance from the center inside the usable ellipse.
    /// `<= 1.0` means inside.
    pub fn normalized_distance_sq(&self, pos: Vec2, r: f32) -> f32 {
        let n = (pos - self.center) / self.usable_radii(r);
        n.length_squared()
    }

    /// Project a position back into the area for an entity of radius `r`
    pub fn clamp(&self, pos: Vec2, r: f32) -> Vec2 {
        let floor = self.y_min + r;
        let mut p = Vec2::new(pos.x, pos.y.max(floor));

        let q = self.normalized_distance_sq(p, r);
        if q > 1.0 {
            let k = 1.0 / q.sqrt();
            p = self.center + (p - self.center) * k;
            p.y = p.y.max(floor);
        }
        p
    }

    /// Whether the position satisfies the clamp invariants (with tolerance)
    pub fn contains(&self, pos: Vec2, r: f32) -> bool {
        const EPS: f32 = 1e-3;
        pos.y >= self.y_min + r - EPS && self.normalized_distance_sq(pos, r) <= 1.0 + EPS
    }

    /// Uniform random point inside the (unpadded) ellipse for radius `r`.
    ///
    /// Rejection sampling over the bounding box; falls back to the center
    /// when every attempt misses.
    pub fn random_point<R: Rng + ?Sized>(&self, r: f32, rng: &mut R) -> Vec2 {
        let rx = self.rx - r;
        let ry = self.ry - r;
        if rx <= 0.0 || ry <= 0.0 {
            return self.center;
        }

        let (x_lo, x_hi) = (self.center.x - rx, self.center.x + rx);
        let (y_lo, y_hi) = (self.y_min + r, self.center.y + ry);
        if y_lo >= y_hi {
            return self.center;
        }

        for _ in 0..SPAWN_SAMPLE_ATTEMPTS {
            let p = Vec2::new(rng.random_range(x_lo..x_hi), rng.random_range(y_lo..y_hi));
            let n = (p - self.center) / Vec2::new(rx, ry);
            if n.length_squared() <= 1.0 {
                return p;
            }
        }
        self.center
    }

    /// Push a sampled point outward so it sits near the rim of the area
    pub fn push_to_edge(&self, p: Vec2) -> Vec2 {
        let delta = p - self.center;
        let dir = delta / length_or_unit(delta);
        self.center + dir * Vec2::new(self.rx, self.ry) * SPAWN_EDGE_PUSH
    }

    /// Whether a bullet at `pos` has left the viewport (with margin)
    pub fn out_of_bounds(&self, pos: Vec2) -> bool {
        pos.x < -BULLET_BOUNDS_MARGIN
            || pos.y < -BULLET_BOUNDS_MARGIN
            || pos.x > self.viewport.x + BULLET_BOUNDS_MARGIN
            || pos.y > self.viewport.y + BULLET_BOUNDS_MARGIN
    }
}

/// Circle overlap test (inclusive) using squared distances
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let rr = ra + rb;
    a.distance_squared(b) <= rr * rr
}
