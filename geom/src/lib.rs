#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::many_single_char_names)]

//! Simple 2D geometric primitives on top of euclid.
//!
//! This crate is reexported in [arris](https://docs.rs/arris/).
//!
//! # Overview
//!
//! This crate implements some of the maths to work with:
//!
//! - quadratic and cubic bézier curves,
//! - elliptic arcs,
//! - triangles,
//! - directed edges normalized for scanline processing.
//!
//! # Flattening
//!
//! Flattening is the action of approximating a curve with a succession of
//! line segments. The flattening here is non-adaptive: the number of
//! segments is derived from the chord length (or supplied by the caller),
//! not from the local curvature.

// Reexport dependencies.
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod arc;
pub mod cubic_bezier;
mod edge;
pub mod quadratic_bezier;
mod triangle;
pub mod utils;

#[doc(inline)]
pub use crate::arc::{Arc, ArcFlags, SvgArc};
#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::edge::Edge;
#[doc(inline)]
pub use crate::quadratic_bezier::QuadraticBezierSegment;
#[doc(inline)]
pub use crate::triangle::Triangle;

use std::fmt;

/// An error produced while constructing or operating on geometric values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GeometryError {
    /// A coordinate was NaN or infinite.
    InvalidGeometry { x: f64, y: f64 },
    /// An operation would have divided by zero (e.g. normalizing the zero
    /// vector).
    DivideByZero,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidGeometry { x, y } => {
                write!(f, "Non-finite coordinates ({}, {})", x, y)
            }
            GeometryError::DivideByZero => {
                write!(f, "Cannot normalize a zero-length vector")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

pub mod math {
    //! f64 aliases of the euclid types used everywhere. The other arris
    //! crates reexport them.

    use crate::euclid;
    use crate::GeometryError;

    /// Alias for `euclid::default::Point2D<f64>`.
    pub type Point = euclid::default::Point2D<f64>;

    /// Alias for `euclid::default::Vector2D<f64>`.
    pub type Vector = euclid::default::Vector2D<f64>;

    /// Alias for `euclid::default::Box2D<f64>`.
    pub type Box2D = euclid::default::Box2D<f64>;

    /// Alias for `euclid::default::Rotation2D<f64>`.
    pub type Rotation = euclid::default::Rotation2D<f64>;

    /// An angle in radians (f64).
    pub type Angle = euclid::Angle<f64>;

    /// Tolerance for vertex equality, used to deduplicate consecutive
    /// outline vertices.
    pub const EPSILON: f64 = 1e-9;

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    /// Builds a point, failing on non-finite coordinates.
    ///
    /// All externally supplied coordinates (in particular everything coming
    /// out of the path parser) go through this check so that NaNs from
    /// malformed input cannot propagate into triangulation.
    #[inline]
    pub fn try_point(x: f64, y: f64) -> Result<Point, GeometryError> {
        if x.is_finite() && y.is_finite() {
            Ok(Point::new(x, y))
        } else {
            Err(GeometryError::InvalidGeometry { x, y })
        }
    }

    /// Returns the unit vector with the same direction as `v`.
    ///
    /// Fails on the zero vector instead of producing NaNs.
    #[inline]
    pub fn normalized(v: Vector) -> Result<Vector, GeometryError> {
        let square_length = v.square_length();
        if square_length == 0.0 {
            return Err(GeometryError::DivideByZero);
        }

        Ok(v / square_length.sqrt())
    }

    /// Epsilon comparison of two coordinates.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= EPSILON
    }

    /// Epsilon comparison of two points, used to deduplicate consecutive
    /// path vertices. This is not a general tolerance framework.
    #[inline]
    pub fn points_approx_eq(a: Point, b: Point) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
    }
}

#[cfg(test)]
mod tests {
    use crate::math::*;
    use crate::GeometryError;

    #[test]
    fn checked_point_construction() {
        assert_eq!(try_point(1.0, 2.0), Ok(point(1.0, 2.0)));
        assert!(matches!(
            try_point(f64::NAN, 0.0),
            Err(GeometryError::InvalidGeometry { .. })
        ));
        assert!(try_point(f64::INFINITY, 0.0).is_err());
        assert!(try_point(0.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn normalize() {
        let v = normalized(vector(3.0, 4.0)).unwrap();
        assert!(approx_eq(v.length(), 1.0));
        assert!(approx_eq(v.x, 0.6));
        assert!(approx_eq(v.y, 0.8));

        assert_eq!(normalized(vector(0.0, 0.0)), Err(GeometryError::DivideByZero));
    }

    #[test]
    fn vertex_equality() {
        assert!(points_approx_eq(point(1.0, 1.0), point(1.0 + 1e-10, 1.0)));
        assert!(!points_approx_eq(point(1.0, 1.0), point(1.0 + 1e-6, 1.0)));
    }
}
