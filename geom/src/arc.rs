//! Elliptic arc related maths and tools.

use crate::math::{point, vector, Angle, Point, Rotation, Vector};
use crate::utils::{directed_angle, flattening_steps};

/// Flag parameters for arcs as described by the SVG specification.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ArcFlags {
    /// Of the four candidate arc sweeps, choose the larger one.
    pub large_arc: bool,
    /// Of the two candidate directions, sweep in the positive-angle one.
    pub sweep: bool,
}

/// An elliptic arc in endpoint parameterization, as it appears in path data.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SvgArc {
    pub from: Point,
    pub to: Point,
    pub radii: Vector,
    pub x_rotation: Angle,
    pub flags: ArcFlags,
}

/// An elliptic arc in center parameterization.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Arc {
    pub center: Point,
    pub radii: Vector,
    pub start_angle: Angle,
    pub sweep_angle: Angle,
    pub x_rotation: Angle,
}

impl SvgArc {
    /// Per the SVG spec, an arc with a zero radius or coincident endpoints
    /// is rendered as a straight line.
    pub fn is_straight_line(&self) -> bool {
        self.radii.x.abs() == 0.0 || self.radii.y.abs() == 0.0 || self.from == self.to
    }

    /// Converts to the center parameterization.
    ///
    /// This is the endpoint-to-center conversion of the SVG spec (F.6.5):
    /// rotate the endpoints into the ellipse's frame, solve the center via
    /// the discriminant formula, then derive the start angle and the sweep
    /// with the sweep-flag sign correction.
    ///
    /// Callers are expected to have checked `is_straight_line` first.
    pub fn to_arc(&self) -> Arc {
        debug_assert!(!self.is_straight_line());

        let rx = self.radii.x.abs();
        let ry = self.radii.y.abs();

        let xr = self.x_rotation.get() % (2.0 * std::f64::consts::PI);
        let cos_phi = xr.cos();
        let sin_phi = xr.sin();
        let hd_x = (self.from.x - self.to.x) / 2.0;
        let hd_y = (self.from.y - self.to.y) / 2.0;
        let hs_x = (self.from.x + self.to.x) / 2.0;
        let hs_y = (self.from.y + self.to.y) / 2.0;

        // F6.5.1
        let p = point(
            cos_phi * hd_x + sin_phi * hd_y,
            -sin_phi * hd_x + cos_phi * hd_y,
        );

        let rxry = rx * ry;
        let rxpy = rx * p.y;
        let rypx = ry * p.x;
        let sum_of_sq = rxpy * rxpy + rypx * rypx;

        // F6.5.2, with the radicand clamped at zero so that slightly
        // undersized radii collapse to a half-ellipse instead of a NaN.
        let sign_coe = if self.flags.large_arc == self.flags.sweep {
            -1.0
        } else {
            1.0
        };
        let coe = sign_coe * ((rxry * rxry - sum_of_sq) / sum_of_sq).max(0.0).sqrt();

        let transformed_cx = coe * rxpy / ry;
        let transformed_cy = -coe * rypx / rx;

        // F6.5.3
        let center = point(
            cos_phi * transformed_cx - sin_phi * transformed_cy + hs_x,
            sin_phi * transformed_cx + cos_phi * transformed_cy + hs_y,
        );

        // Unit-frame directions from the center toward the two endpoints.
        let a = vector(
            (p.x - transformed_cx) / rx,
            (p.y - transformed_cy) / ry,
        );
        let b = vector(
            (-p.x - transformed_cx) / rx,
            (-p.y - transformed_cy) / ry,
        );

        // F6.5.5
        let start_angle = Angle::radians(directed_angle(vector(1.0, 0.0), a));

        // F6.5.6: directed_angle is in [0, 2*PI); a false sweep flag walks
        // the other way around.
        let delta = directed_angle(a, b);
        let sweep_angle = if self.flags.sweep {
            Angle::radians(delta)
        } else {
            Angle::radians(delta - 2.0 * std::f64::consts::PI)
        };

        Arc {
            center,
            radii: vector(rx, ry),
            start_angle,
            sweep_angle,
            x_rotation: self.x_rotation,
        }
    }
}

impl Arc {
    /// Sample the curve's angle at t (expecting t between 0 and 1).
    #[inline]
    pub fn angle_at(&self, t: f64) -> Angle {
        self.start_angle + Angle::radians(self.sweep_angle.get() * t)
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: f64) -> Point {
        self.center + sample_ellipse(self.radii, self.x_rotation, self.angle_at(t)).to_vector()
    }

    #[inline]
    pub fn from(&self) -> Point {
        self.sample(0.0)
    }

    #[inline]
    pub fn to(&self) -> Point {
        self.sample(1.0)
    }

    /// The number of segments the default flattening uses, derived from an
    /// estimate of the arc length.
    pub fn flattening_steps(&self) -> usize {
        let longest_radius = self.radii.x.abs().max(self.radii.y.abs());
        flattening_steps(self.sweep_angle.get().abs() * longest_radius)
    }

    /// Approximates the arc with a sequence of points at fixed angular
    /// increments, invoking the callback for each of them in order.
    ///
    /// The starting point (t = 0) is not emitted since the caller already
    /// has it; the endpoint (t = 1) always is.
    pub fn for_each_flattened<F: FnMut(Point)>(&self, steps: Option<usize>, callback: &mut F) {
        let n = steps.unwrap_or_else(|| self.flattening_steps()).max(1);
        for i in 1..n {
            callback(self.sample(i as f64 / n as f64));
        }
        callback(self.to());
    }
}

#[inline]
fn sample_ellipse(radii: Vector, x_rotation: Angle, angle: Angle) -> Point {
    Rotation::new(x_rotation)
        .transform_point(point(radii.x * angle.get().cos(), radii.y * angle.get().sin()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::points_approx_eq;

    fn svg_arc(from: Point, to: Point, rx: f64, ry: f64, large_arc: bool, sweep: bool) -> SvgArc {
        SvgArc {
            from,
            to,
            radii: vector(rx, ry),
            x_rotation: Angle::radians(0.0),
            flags: ArcFlags { large_arc, sweep },
        }
    }

    #[test]
    fn half_circle_center() {
        let arc = svg_arc(point(0.0, 0.0), point(10.0, 0.0), 5.0, 5.0, false, true).to_arc();

        assert!(points_approx_eq(arc.center, point(5.0, 0.0)));
        assert!(((arc.center - point(0.0, 0.0)).length() - 5.0).abs() < 1e-9);
        assert!(((arc.center - point(10.0, 0.0)).length() - 5.0).abs() < 1e-9);
        assert!(points_approx_eq(arc.from(), point(0.0, 0.0)));
        assert!(points_approx_eq(arc.to(), point(10.0, 0.0)));
    }

    #[test]
    fn sweep_flag_changes_direction() {
        let negative = svg_arc(point(0.0, 0.0), point(10.0, 0.0), 5.0, 5.0, false, false).to_arc();
        let positive = svg_arc(point(0.0, 0.0), point(10.0, 0.0), 5.0, 5.0, false, true).to_arc();

        assert!(negative.sweep_angle.get() < 0.0);
        assert!(positive.sweep_angle.get() > 0.0);

        // Both still land on the endpoints.
        assert!(points_approx_eq(negative.from(), point(0.0, 0.0)));
        assert!(points_approx_eq(negative.to(), point(10.0, 0.0)));
        // The midpoints are on opposite sides of the chord.
        assert!(negative.sample(0.5).y * positive.sample(0.5).y < 0.0);
    }

    #[test]
    fn quarter_arc_endpoints() {
        let arc = svg_arc(point(5.0, 0.0), point(0.0, 5.0), 5.0, 5.0, false, true).to_arc();

        assert!(points_approx_eq(arc.center, point(0.0, 0.0)));
        assert!(points_approx_eq(arc.from(), point(5.0, 0.0)));
        assert!(points_approx_eq(arc.to(), point(0.0, 5.0)));

        // The small arc in the other direction is centered on the far side
        // of the chord.
        let other = svg_arc(point(5.0, 0.0), point(0.0, 5.0), 5.0, 5.0, false, false).to_arc();
        assert!(points_approx_eq(other.center, point(5.0, 5.0)));
    }

    #[test]
    fn straight_line_detection() {
        assert!(svg_arc(point(0.0, 0.0), point(1.0, 1.0), 0.0, 5.0, false, false).is_straight_line());
        assert!(svg_arc(point(2.0, 2.0), point(2.0, 2.0), 5.0, 5.0, false, false).is_straight_line());
        assert!(!svg_arc(point(0.0, 0.0), point(1.0, 1.0), 5.0, 5.0, false, false).is_straight_line());
    }

    #[test]
    fn flattening_ends_at_endpoint() {
        let arc = svg_arc(point(0.0, 0.0), point(10.0, 0.0), 5.0, 5.0, false, true).to_arc();
        let mut pts = Vec::new();
        arc.for_each_flattened(None, &mut |p| pts.push(p));
        assert!(points_approx_eq(*pts.last().unwrap(), point(10.0, 0.0)));
        // An estimated arc length of PI * 5 clamps well below 20.
        assert_eq!(pts.len(), arc.flattening_steps());
    }
}
