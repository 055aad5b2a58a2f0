//! Active-edge-table scanline fill.
//!
//! The rasterizer is driven one scanline at a time so that presentation code
//! can interleave its own work (progressive rendering yields between
//! scanlines); [`Polygon::traverse`](crate::Polygon::traverse) simply loops
//! it to completion. The fill rule is nonzero winding.

use crate::error::TraversalError;
use crate::geom::Edge;

/// An edge currently straddling the scanline: its x intersection is updated
/// incrementally instead of re-solved per row.
#[derive(Copy, Clone, Debug)]
struct ActiveEdge {
    x: f64,
    inverse_slope: f64,
    bottom_y: f64,
    winding: i32,
}

/// Steps a sorted edge list down the image one scanline at a time.
///
/// `edges` must be normalized top-to-bottom, contain only edges crossed by
/// at least one integer scanline, and be sorted by `(top.y, top.x)` - which
/// is exactly what `Polygon::visible_edges` produces.
pub struct Rasterizer<'l> {
    edges: &'l [Edge],
    next: usize,
    active: Vec<ActiveEdge>,
    y: f64,
}

impl<'l> Rasterizer<'l> {
    pub fn new(edges: &'l [Edge]) -> Self {
        let y = edges.first().map(Edge::first_scanline).unwrap_or(0.0);
        Rasterizer {
            edges,
            next: 0,
            active: Vec::new(),
            y,
        }
    }

    /// The scanline the next call will process.
    #[inline]
    pub fn scanline(&self) -> i32 {
        self.y as i32
    }

    /// Processes one scanline, invoking `callback(x, y)` for every integer x
    /// inside the shape on that row.
    ///
    /// Returns `Ok(false)` once no edges are active and none remain pending.
    pub fn next_scanline<F: FnMut(i32, i32)>(
        &mut self,
        callback: &mut F,
    ) -> Result<bool, TraversalError> {
        let y = self.y;

        // Drop edges whose span has ended, admit newly started ones.
        self.active.retain(|e| e.bottom_y > y);
        while self.next < self.edges.len() && self.edges[self.next].top.y <= y {
            let edge = &self.edges[self.next];
            self.next += 1;
            if edge.crosses_scanline(y) {
                self.active.push(ActiveEdge {
                    x: edge.x_at(y),
                    inverse_slope: edge.inverse_slope(),
                    bottom_y: edge.bottom.y,
                    winding: edge.winding(),
                });
            }
        }

        if self.active.is_empty() {
            if self.next < self.edges.len() {
                // Jump across the empty gap to the next pending edge.
                self.y = self.edges[self.next].first_scanline();
                return Ok(true);
            }
            return Ok(false);
        }

        if self.active.len() % 2 != 0 {
            return Err(TraversalError::UnclosedPath { y: y as i32 });
        }

        self.active.sort_by(|a, b| a.x.total_cmp(&b.x));

        let row = y as i32;
        let mut winding = 0;
        let mut span_start = 0.0;
        for edge in &self.active {
            let was = winding;
            winding += edge.winding;
            if was == 0 && winding != 0 {
                span_start = edge.x;
            } else if was != 0 && winding == 0 {
                // Integer pixels in the half-open interval [span_start, edge.x).
                let x0 = span_start.ceil() as i32;
                let x1 = edge.x.ceil() as i32;
                for x in x0..x1 {
                    callback(x, row);
                }
            }
        }

        // Step down to the next scanline.
        self.y += 1.0;
        for edge in &mut self.active {
            edge.x += edge.inverse_slope;
        }

        Ok(true)
    }

    /// Runs the fill to completion.
    pub fn run<F: FnMut(i32, i32)>(&mut self, callback: &mut F) -> Result<(), TraversalError> {
        while self.next_scanline(callback)? {}
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;

    fn rect_edges(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Edge> {
        // Only the two vertical edges cross scanlines; the horizontal ones
        // are what visible_edges would have dropped.
        vec![
            Edge::new(point(x0, y0), point(x0, y1)),
            Edge::new(point(x1, y1), point(x1, y0)),
        ]
    }

    #[test]
    fn rectangle_pixel_count() {
        let edges = rect_edges(0.0, 0.0, 7.0, 5.0);
        let mut pixels = Vec::new();
        Rasterizer::new(&edges)
            .run(&mut |x, y| pixels.push((x, y)))
            .unwrap();

        assert_eq!(pixels.len(), 7 * 5);
        assert!(pixels.contains(&(0, 0)));
        assert!(pixels.contains(&(6, 4)));
        assert!(!pixels.contains(&(7, 0)));
        assert!(!pixels.contains(&(0, 5)));
    }

    #[test]
    fn missing_edge_is_an_unclosed_path() {
        let mut edges = rect_edges(0.0, 0.0, 7.0, 5.0);
        edges.pop();

        let result = Rasterizer::new(&edges).run(&mut |_, _| {});
        assert_eq!(result, Err(TraversalError::UnclosedPath { y: 0 }));
    }

    #[test]
    fn empty_edge_list_terminates() {
        let edges: Vec<Edge> = Vec::new();
        let mut count = 0;
        Rasterizer::new(&edges).run(&mut |_, _| count += 1).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn winding_cancels_between_opposite_edges() {
        // Two coincident rectangles wound in opposite directions: the
        // windings cancel and nothing is filled.
        let edges = vec![
            Edge::new(point(0.0, 0.0), point(0.0, 4.0)),
            Edge::new(point(0.0, 4.0), point(0.0, 0.0)),
            Edge::new(point(4.0, 4.0), point(4.0, 0.0)),
            Edge::new(point(4.0, 0.0), point(4.0, 4.0)),
        ];
        let mut count = 0;
        Rasterizer::new(&edges).run(&mut |_, _| count += 1).unwrap();
        assert_eq!(count, 0);
    }
}
