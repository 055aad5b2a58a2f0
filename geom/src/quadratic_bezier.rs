use crate::math::Point;
use crate::utils::flattening_steps;

/// A 2d curve segment defined by three points: the beginning of the segment,
/// a control point and the end of the segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezierSegment {
    pub from: Point,
    pub ctrl: Point,
    pub to: Point,
}

impl QuadraticBezierSegment {
    /// Sample the curve at t (expecting t between 0 and 1), by repeated
    /// linear interpolation (de Casteljau).
    pub fn sample(&self, t: f64) -> Point {
        let a = self.from.lerp(self.ctrl, t);
        let b = self.ctrl.lerp(self.to, t);

        a.lerp(b, t)
    }

    /// The number of segments the default flattening uses, derived from the
    /// chord length between the endpoints.
    pub fn flattening_steps(&self) -> usize {
        flattening_steps((self.to - self.from).length())
    }

    /// Approximates the curve with a sequence of points, invoking the
    /// callback for each of them in order.
    ///
    /// An explicit `steps` count is honored as-is; otherwise the chord-length
    /// heuristic decides. The starting point (t = 0) is not emitted since the
    /// caller already has it; the exact endpoint (t = 1) always is, so that
    /// stepping by 1/n cannot drift past it.
    pub fn for_each_flattened<F: FnMut(Point)>(&self, steps: Option<usize>, callback: &mut F) {
        let n = steps.unwrap_or_else(|| self.flattening_steps()).max(1);
        for i in 1..n {
            callback(self.sample(i as f64 / n as f64));
        }
        callback(self.to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{point, points_approx_eq};

    #[test]
    fn sample_endpoints() {
        let curve = QuadraticBezierSegment {
            from: point(0.0, 0.0),
            ctrl: point(5.0, 10.0),
            to: point(10.0, 0.0),
        };
        assert!(points_approx_eq(curve.sample(0.0), curve.from));
        assert!(points_approx_eq(curve.sample(1.0), curve.to));
        assert!(points_approx_eq(curve.sample(0.5), point(5.0, 5.0)));
    }

    #[test]
    fn flattened_ends_at_endpoint() {
        let curve = QuadraticBezierSegment {
            from: point(0.0, 0.0),
            ctrl: point(3.0, 4.0),
            to: point(6.0, 0.0),
        };
        let mut pts = Vec::new();
        curve.for_each_flattened(None, &mut |p| pts.push(p));
        assert_eq!(*pts.last().unwrap(), curve.to);
        assert_eq!(pts.len(), curve.flattening_steps());
    }

    #[test]
    fn coincident_control_points_collapse() {
        let p = point(2.0, 3.0);
        let curve = QuadraticBezierSegment {
            from: p,
            ctrl: p,
            to: p,
        };
        let mut pts = Vec::new();
        curve.for_each_flattened(None, &mut |q| pts.push(q));
        assert_eq!(pts, vec![p]);
    }

    #[test]
    fn explicit_rate_is_honored() {
        let curve = QuadraticBezierSegment {
            from: point(0.0, 0.0),
            ctrl: point(50.0, 50.0),
            to: point(100.0, 0.0),
        };
        let mut count = 0;
        curve.for_each_flattened(Some(4), &mut |_| count += 1);
        assert_eq!(count, 4);
    }
}
