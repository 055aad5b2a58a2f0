//! Stroked-line approximation.
//!
//! A stroked polyline is approximated by a pile of independent convex
//! sub-polygons: a circle at every vertex (round caps and joins) and a quad
//! along every segment. The sub-polygons overlap and are not merged into a
//! single outline; callers must paint all of them identically, which is only
//! visually seamless for opaque fills.

use crate::geom::utils::tangent;
use crate::math::{normalized, vector, Point};
use crate::polygon::Polygon;

/// Generates the filled sub-polygons approximating a stroked polyline.
///
/// `width` is the offset radius: caps are circles of radius `width` and
/// segment quads extend `width` to each side, for a total stroke breadth of
/// twice the width.
#[derive(Clone, Debug)]
pub struct StrokeGenerator {
    width: f64,
    cap_steps: usize,
}

impl StrokeGenerator {
    pub fn new(width: f64) -> Self {
        StrokeGenerator {
            width,
            // Wider strokes get smoother caps; thin ones keep enough
            // samples to still look round.
            cap_steps: (width.ceil() as usize).max(20),
        }
    }

    /// Emits the sub-polygons for one polyline. A polyline of fewer than 2
    /// points yields nothing; `closed` adds the wraparound segment.
    pub fn generate(&self, points: &[Point], closed: bool) -> Vec<Polygon> {
        if points.len() < 2 {
            return Vec::new();
        }

        let mut shapes = Vec::new();

        for p in points {
            shapes.push(self.cap(*p));
        }

        let segments = if closed {
            points.len()
        } else {
            points.len() - 1
        };
        for i in 0..segments {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            if let Some(quad) = self.segment_quad(a, b) {
                shapes.push(quad);
            }
        }

        shapes
    }

    /// A regular polygon approximating the circle of radius `width` around
    /// `center`.
    fn cap(&self, center: Point) -> Polygon {
        let mut vertices = Vec::with_capacity(self.cap_steps);
        let step = 2.0 * std::f64::consts::PI / self.cap_steps as f64;
        for i in 0..self.cap_steps {
            let angle = i as f64 * step;
            vertices.push(center + vector(angle.cos(), angle.sin()) * self.width);
        }

        Polygon::new(vec![vertices.into()])
    }

    /// The quad offset perpendicular to the segment by `width` on both
    /// sides. Zero-length segments produce nothing (their caps already
    /// cover them).
    fn segment_quad(&self, a: Point, b: Point) -> Option<Polygon> {
        let direction = match normalized(b - a) {
            Ok(direction) => direction,
            Err(_) => return None,
        };
        let normal = tangent(direction) * self.width;

        Some(Polygon::new(vec![vec![
            a + normal,
            a - normal,
            b - normal,
            b + normal,
        ]
        .into()]))
    }
}
