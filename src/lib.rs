#![deny(bare_trait_objects)]

//! 2D polygon geometry engine.
//!
//! Turns path-description strings into closed vertex loops and produces the
//! renderable forms a 2D engine needs: a triangulated mesh for hardware
//! renderers, a pixel-accurate scanline fill for CPU pixel buffers, and
//! stroked-outline sub-shapes.
//!
//! # Crates
//!
//! This meta-crate (`arris`) reexports the following sub-crates for convenience:
//!
//! * **arris_tessellation** - Polygons, triangulation, scanline rasterization
//!   and stroke generation.
//! * **arris_path** - The cyclic vertex container, the path command stream and
//!   the path-data parser.
//! * **arris_geom** - 2d utilities for bézier curves, elliptic arcs, triangles
//!   and directed edges.
//!
//! Each `arris_<name>` crate is reexported as a `<name>` module in `arris`:
//!
//! ```ignore
//! use arris::tessellation::Polygon;
//! use arris::math::point;
//! ```
//!
//! # Feature flags
//!
//! Serialization using serde can be enabled with the `serialization` feature
//! flag (disabled by default).
//!
//! # Examples
//!
//! ## From path data to a mesh
//!
//! ```
//! use arris::tessellation::Polygon;
//!
//! let polygon = Polygon::parse("M 0 0 L 10 0 L 10 10 L 0 10 Z").unwrap();
//! let mesh = polygon.mesh();
//! assert_eq!(mesh.triangle_count(), 2);
//! ```
//!
//! ## Scanline fill
//!
//! ```
//! use arris::tessellation::Polygon;
//!
//! let polygon = Polygon::parse("M 0 0 L 4 0 L 4 4 L 0 4 Z").unwrap();
//! let mut pixels = 0;
//! polygon.traverse(&mut |_x, _y| { pixels += 1; }).unwrap();
//! assert_eq!(pixels, 16);
//! ```

pub use arris_tessellation as tessellation;
pub use tessellation::path;
pub use path::geom;

pub use path::math;
