//! The canonical renderable shape.

use std::cell::OnceCell;

use crate::error::TraversalError;
use crate::fill::{Mesh, Triangulator};
use crate::geom::Edge;
use crate::math::{point, Angle, Box2D, Point, Rotation, Vector};
use crate::path::outline::{build_loops, dedupe_loop};
use crate::path::parser::{ParseError, PathParser};
use crate::path::{CyclicList, FillRule, PathCommand};
use crate::raster::Rasterizer;

/// One or more closed vertex loops plus the lazily computed data derived
/// from them.
///
/// A polygon is immutable once built: the bounding box, the scanline edge
/// list and the triangle mesh are each computed on first use and memoized in
/// a compute-once cell, and the geometric transforms return new instances
/// instead of invalidating anything.
#[derive(Clone, Debug)]
pub struct Polygon {
    paths: Vec<CyclicList<Point>>,
    bounding_box: OnceCell<Box2D>,
    edges: OnceCell<Vec<Edge>>,
    mesh: OnceCell<Mesh>,
}

impl Polygon {
    /// Builds a polygon from closed loops, deduplicating consecutive
    /// epsilon-equal vertices in each of them.
    pub fn new(paths: Vec<CyclicList<Point>>) -> Self {
        let paths = paths
            .into_iter()
            .map(dedupe_loop)
            .filter(|p| !p.is_empty())
            .collect();

        Polygon {
            paths,
            bounding_box: OnceCell::new(),
            edges: OnceCell::new(),
            mesh: OnceCell::new(),
        }
    }

    /// Builds a polygon from a command stream, one loop per subpath.
    pub fn from_commands(commands: &[PathCommand]) -> Self {
        Polygon::new(build_loops(commands, None))
    }

    /// Parses path data and builds a polygon from it.
    pub fn parse(src: &str) -> Result<Self, ParseError> {
        let commands = PathParser::new().parse(src)?;
        Ok(Polygon::from_commands(&commands))
    }

    /// The closed loops this polygon is made of.
    #[inline]
    pub fn paths(&self) -> &[CyclicList<Point>] {
        &self.paths
    }

    /// The axis-aligned bounds over all vertices in all loops.
    pub fn bounding_box(&self) -> Box2D {
        *self.bounding_box.get_or_init(|| {
            let mut min = point(f64::MAX, f64::MAX);
            let mut max = point(f64::MIN, f64::MIN);
            for path in &self.paths {
                for p in path {
                    min = min.min(*p);
                    max = max.max(*p);
                }
            }

            // An empty polygon gets an empty box.
            if min == point(f64::MAX, f64::MAX) {
                return Box2D::zero();
            }

            Box2D { min, max }
        })
    }

    /// Whether the point is inside the shape, under the nonzero winding
    /// rule.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.contains_with_rule(p, FillRule::NonZero)
    }

    /// Whether the point is inside the shape under the given fill rule.
    ///
    /// A bounding-box early reject, then a crossing test counting the edges
    /// a rightward ray from `p` passes through, accumulating their signed
    /// winding.
    pub fn contains_with_rule(&self, p: Point, fill_rule: FillRule) -> bool {
        let bbox = self.bounding_box();
        if p.x < bbox.min.x || p.x > bbox.max.x || p.y < bbox.min.y || p.y > bbox.max.y {
            return false;
        }

        let mut winding = 0;
        for path in &self.paths {
            let n = path.len() as isize;
            for i in 0..n {
                let edge = Edge::new(*path.get(i), *path.get(i + 1));
                if edge.is_horizontal() || !edge.crosses_scanline(p.y) {
                    continue;
                }
                if edge.x_at(p.y) > p.x {
                    winding += edge.winding();
                }
            }
        }

        fill_rule.is_in(winding)
    }

    /// All loop edges normalized top-to-bottom, minus the ones no integer
    /// scanline ever crosses, sorted by `(top.y, top.x)`. This is the
    /// rasterizer's input and is memoized.
    pub(crate) fn visible_edges(&self) -> &[Edge] {
        self.edges.get_or_init(|| {
            let mut edges = Vec::new();
            for path in &self.paths {
                let n = path.len() as isize;
                for i in 0..n {
                    let edge = Edge::new(*path.get(i), *path.get(i + 1));
                    if edge.crosses_any_scanline() {
                        edges.push(edge);
                    }
                }
            }
            edges.sort_by(|a, b| {
                a.top
                    .y
                    .total_cmp(&b.top.y)
                    .then(a.top.x.total_cmp(&b.top.x))
            });

            edges
        })
    }

    /// Scanline-fills the shape, invoking `callback(x, y)` once per covered
    /// integer pixel, top to bottom and left to right.
    ///
    /// Fails with [`TraversalError::UnclosedPath`] if the active edge table
    /// ever holds an odd number of edges, which cannot happen for edge lists
    /// built from closed loops.
    pub fn traverse<F: FnMut(i32, i32)>(&self, callback: &mut F) -> Result<(), TraversalError> {
        Rasterizer::new(self.visible_edges()).run(callback)
    }

    /// The triangle mesh of this shape, triangulated on first access and
    /// memoized.
    pub fn mesh(&self) -> &Mesh {
        self.mesh
            .get_or_init(|| Triangulator::new().tessellate(&self.paths))
    }

    /// Returns this polygon translated by `v`.
    pub fn translate(&self, v: Vector) -> Polygon {
        self.map_points(|p| p + v)
    }

    /// Returns this polygon rotated around the origin by `angle` radians.
    pub fn rotate(&self, angle: Angle) -> Polygon {
        let rotation = Rotation::new(angle);
        self.map_points(|p| rotation.transform_point(p))
    }

    /// Returns this polygon scaled around the origin.
    pub fn scale(&self, factor: f64) -> Polygon {
        self.map_points(|p| p * factor)
    }

    fn map_points<F: Fn(Point) -> Point>(&self, f: F) -> Polygon {
        Polygon::new(
            self.paths
                .iter()
                .map(|path| path.iter().map(|p| f(*p)).collect())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vector;

    fn unit_square() -> Polygon {
        Polygon::parse("M0,0 L10,0 L10,10 L0,10 Z").unwrap()
    }

    #[test]
    fn bounding_box() {
        let polygon = unit_square();
        let bbox = polygon.bounding_box();
        assert_eq!(bbox.min, point(0.0, 0.0));
        assert_eq!(bbox.max, point(10.0, 10.0));

        assert_eq!(Polygon::new(Vec::new()).bounding_box(), Box2D::zero());
    }

    #[test]
    fn contains() {
        let polygon = unit_square();

        assert!(polygon.contains(point(5.0, 5.0)));
        assert!(!polygon.contains(point(15.0, 15.0)));
        assert!(!polygon.contains(point(-1.0, 5.0)));

        // Repeated boundary queries give a consistent answer.
        let on_boundary = point(0.0, 5.0);
        let first = polygon.contains(on_boundary);
        for _ in 0..10 {
            assert_eq!(polygon.contains(on_boundary), first);
        }
    }

    #[test]
    fn contains_in_a_hole() {
        let polygon =
            Polygon::parse("M 0 0 L 10 0 L 10 10 L 0 10 Z M 2 2 L 2 8 L 8 8 L 8 2 Z").unwrap();

        assert!(polygon.contains(point(1.0, 1.0)));
        assert!(!polygon.contains(point(5.0, 5.0)));
        assert!(!polygon.contains(point(11.0, 5.0)));
    }

    #[test]
    fn doubly_wound_square_follows_the_fill_rule() {
        // The same clockwise square twice: winding number 2 inside.
        let polygon = Polygon::parse(
            "M 0 0 L 10 0 L 10 10 L 0 10 Z M 0 0 L 10 0 L 10 10 L 0 10 Z",
        )
        .unwrap();

        assert!(polygon.contains(point(5.0, 5.0)));
        assert!(!polygon.contains_with_rule(point(5.0, 5.0), FillRule::EvenOdd));
    }

    #[test]
    fn traverse_covers_the_rectangle() {
        let polygon = unit_square();
        let mut count = 0;
        polygon.traverse(&mut |_, _| count += 1).unwrap();
        assert_eq!(count, 100);
    }

    #[test]
    fn transforms_are_pure() {
        let polygon = unit_square();
        let moved = polygon.translate(vector(5.0, 5.0));

        assert_eq!(polygon.bounding_box().min, point(0.0, 0.0));
        assert_eq!(moved.bounding_box().min, point(5.0, 5.0));
        assert_eq!(moved.bounding_box().max, point(15.0, 15.0));

        let scaled = polygon.scale(2.0);
        assert_eq!(scaled.bounding_box().max, point(20.0, 20.0));

        let rotated = polygon.rotate(Angle::radians(std::f64::consts::PI));
        let bbox = rotated.bounding_box();
        assert!((bbox.min.x + 10.0).abs() < 1e-9);
        assert!((bbox.min.y + 10.0).abs() < 1e-9);
        assert!(bbox.max.x.abs() < 1e-9);
        assert!(bbox.max.y.abs() < 1e-9);
    }

    #[test]
    fn adjacent_duplicate_vertices_are_removed() {
        let square: CyclicList<Point> = vec![
            point(0.0, 0.0),
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(10.0, 10.0),
            point(0.0, 10.0),
            point(0.0, 10.0),
        ]
        .into();
        let polygon = Polygon::new(vec![square]);
        assert_eq!(polygon.paths()[0].len(), 4);
    }
}
