//! Various math tools that are usually not needed by applications.

use crate::math::{vector, Vector};

/// Rotates `v` by 90 degrees.
#[inline]
pub fn tangent(v: Vector) -> Vector {
    vector(-v.y, v.x)
}

/// Angle between vectors `a` and `b` (oriented clockwise with y pointing downward).
///
/// The result is a number between 0 and 2*PI.
#[inline]
pub fn directed_angle(a: Vector, b: Vector) -> f64 {
    let angle = b.y.atan2(b.x) - a.y.atan2(a.x);
    if angle < 0.0 {
        angle + 2.0 * std::f64::consts::PI
    } else {
        angle
    }
}

/// Number of line segments used to approximate a curve whose endpoints are
/// `chord_length` apart.
///
/// This is a chord-length heuristic, not a curvature-aware one: one segment
/// per unit of chord length, clamped so that degenerate curves still produce
/// a point and long curves stay bounded.
#[inline]
pub fn flattening_steps(chord_length: f64) -> usize {
    (chord_length.ceil() as usize).max(1).min(20)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directed_angles() {
        use std::f64::consts::PI;

        let right = vector(1.0, 0.0);
        let down = vector(0.0, 1.0);
        let left = vector(-1.0, 0.0);

        assert!((directed_angle(right, down) - 0.5 * PI).abs() < 1e-12);
        assert!((directed_angle(right, left) - PI).abs() < 1e-12);
        assert!((directed_angle(down, right) - 1.5 * PI).abs() < 1e-12);
    }

    #[test]
    fn step_clamping() {
        assert_eq!(flattening_steps(0.0), 1);
        assert_eq!(flattening_steps(0.3), 1);
        assert_eq!(flattening_steps(7.2), 8);
        assert_eq!(flattening_steps(1000.0), 20);
    }
}
