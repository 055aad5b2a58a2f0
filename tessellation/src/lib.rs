#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Renderable forms of closed polygon loops.
//!
//! The [`Polygon`] type aggregates the closed vertex loops built by
//! [`arris_path`](https://docs.rs/arris_path/) and exposes the three surfaces
//! a renderer consumes:
//!
//! - [`Polygon::mesh`] - a triangle mesh (hole bridging + ear clipping) for
//!   hardware triangle renderers,
//! - [`Polygon::traverse`] - a nonzero-winding scanline fill invoking a
//!   callback per covered pixel, for CPU pixel buffers,
//! - [`Polygon::contains`] - point containment for pointer-event hit testing.
//!
//! Stroked outlines are approximated by [`StrokeGenerator`], which emits
//! overlapping convex sub-polygons rather than a merged outline.
//!
//! This crate is reexported in [arris](https://docs.rs/arris/).

pub use arris_path as path;
pub use path::geom;
pub use path::math;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod error;
pub mod fill;
pub mod polygon;
pub mod raster;
pub mod stroke;


#[doc(inline)]
pub use crate::error::{TraversalError, TraversalResult};
#[doc(inline)]
pub use crate::fill::{Mesh, Triangulator};
#[doc(inline)]
pub use crate::polygon::Polygon;
#[doc(inline)]
pub use crate::raster::Rasterizer;
#[doc(inline)]
pub use crate::stroke::StrokeGenerator;

pub use path::FillRule;
