//! Turning command streams into closed vertex loops.
//!
//! Curves and arcs are flattened into line segments here; the output is one
//! [`CyclicList`] of vertices per subpath, deduplicated so that no two
//! consecutive vertices are equal.

use crate::commands::PathCommand;
use crate::cyclic::CyclicList;
use crate::geom::{CubicBezierSegment, QuadraticBezierSegment};
use crate::math::{point, points_approx_eq, Point};

/// The orientation of a closed loop, in y-down coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Classifies a loop's orientation with the extreme-vertex turn test: at the
/// rightmost (then bottommost) vertex the boundary is locally convex, so the
/// sign of the turn there decides the winding of the whole loop.
///
/// Loops with fewer than 3 vertices have no meaningful orientation and are
/// reported as clockwise.
pub fn loop_winding(vertices: &CyclicList<Point>) -> Winding {
    if vertices.len() < 3 {
        return Winding::Clockwise;
    }

    let extreme = extreme_vertex(vertices);
    let prev = *vertices.get(extreme - 1);
    let v = *vertices.get(extreme);
    let next = *vertices.get(extreme + 1);

    let turn = (v - prev).cross(next - v);
    if turn >= 0.0 {
        Winding::Clockwise
    } else {
        Winding::CounterClockwise
    }
}

/// The index of the rightmost vertex, ties broken by bottommost.
pub fn extreme_vertex(vertices: &CyclicList<Point>) -> isize {
    let mut extreme = 0;
    for i in 1..vertices.len() as isize {
        let candidate = vertices.get(i);
        let best = vertices.get(extreme);
        if (candidate.x, candidate.y) > (best.x, best.y) {
            extreme = i;
        }
    }

    extreme
}

/// The signed shoelace area of a loop: positive for clockwise loops (y-down),
/// negative for counter-clockwise ones.
pub fn signed_area(vertices: &CyclicList<Point>) -> f64 {
    let n = vertices.len() as isize;
    let mut sum = 0.0;
    for i in 0..n {
        let a = vertices.get(i);
        let b = vertices.get(i + 1);
        sum += a.x * b.y - b.x * a.y;
    }

    sum * 0.5
}

/// Removes consecutive epsilon-equal vertices, including the pair formed by
/// the last and first vertex going around.
pub fn dedupe_loop(vertices: CyclicList<Point>) -> CyclicList<Point> {
    let mut items: Vec<Point> = vertices.into_iter().collect();
    items.dedup_by(|a, b| points_approx_eq(*a, *b));
    while items.len() > 1 && points_approx_eq(items[0], *items.last().unwrap()) {
        items.pop();
    }

    items.into()
}

/// Walks a command stream and collects one vertex loop per subpath,
/// flattening curves and arcs along the way.
///
/// `rate` overrides the flattening step count; `None` uses the per-segment
/// chord-length heuristic. Each loop keeps the winding its commands describe,
/// which is what makes holes expressible; every subpath is treated as closed
/// whether or not it ends in an explicit close command.
pub fn build_loops(commands: &[PathCommand], rate: Option<usize>) -> Vec<CyclicList<Point>> {
    let mut loops = Vec::new();
    let mut vertices: Vec<Point> = Vec::new();
    let mut current = point(0.0, 0.0);

    for command in commands {
        match *command {
            PathCommand::MoveTo { to } => {
                flush(&mut loops, &mut vertices);
                vertices.push(to);
                current = to;
            }
            PathCommand::LineTo { to } => {
                vertices.push(to);
                current = to;
            }
            PathCommand::QuadraticTo { ctrl, to } => {
                let curve = QuadraticBezierSegment {
                    from: current,
                    ctrl,
                    to,
                };
                curve.for_each_flattened(rate, &mut |p| vertices.push(p));
                current = to;
            }
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                let curve = CubicBezierSegment {
                    from: current,
                    ctrl1,
                    ctrl2,
                    to,
                };
                curve.for_each_flattened(rate, &mut |p| vertices.push(p));
                current = to;
            }
            PathCommand::Arc(arc) => {
                arc.for_each_flattened(rate, &mut |p| vertices.push(p));
                current = arc.to();
            }
            PathCommand::Close => {
                flush(&mut loops, &mut vertices);
            }
        }
    }
    flush(&mut loops, &mut vertices);

    loops
}

/// Walks a command stream into a single outline loop, canonically wound
/// clockwise. Additional subpaths beyond the first are ignored; use
/// [`build_loops`] to keep them.
pub fn build_outline(commands: &[PathCommand], rate: Option<usize>) -> CyclicList<Point> {
    let mut loops = build_loops(commands, rate);
    if loops.is_empty() {
        return CyclicList::new();
    }

    let mut outline = loops.swap_remove(0);
    if loop_winding(&outline) == Winding::CounterClockwise {
        outline.reverse();
    }

    outline
}

fn flush(loops: &mut Vec<CyclicList<Point>>, vertices: &mut Vec<Point>) {
    if vertices.is_empty() {
        return;
    }

    let deduped = dedupe_loop(std::mem::take(vertices).into());
    if !deduped.is_empty() {
        loops.push(deduped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::PathParser;

    fn loops_of(src: &str) -> Vec<CyclicList<Point>> {
        build_loops(&PathParser::new().parse(src).unwrap(), None)
    }

    #[test]
    fn triangle_outline() {
        let commands = PathParser::new().parse("M 0 0 L 10 0 L 10 10 Z").unwrap();
        let outline = build_outline(&commands, None);

        // The loop implicitly closes back to the first vertex.
        assert_eq!(
            outline.as_slice(),
            &[point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)]
        );
    }

    #[test]
    fn canonical_winding_is_clockwise() {
        // Authored counter-clockwise (y-down): right, up, left, down.
        let commands = PathParser::new()
            .parse("M 0 10 L 10 10 L 10 0 L 0 0 Z")
            .unwrap();
        let outline = build_outline(&commands, None);

        assert_eq!(loop_winding(&outline), Winding::Clockwise);
        assert!(signed_area(&outline) > 0.0);
    }

    #[test]
    fn winding_flips_with_reversal() {
        let mut square: CyclicList<Point> = vec![
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(10.0, 10.0),
            point(0.0, 10.0),
        ]
        .into();

        assert_eq!(loop_winding(&square), Winding::Clockwise);
        assert_eq!(signed_area(&square), 100.0);
        square.reverse();
        assert_eq!(loop_winding(&square), Winding::CounterClockwise);
        assert_eq!(signed_area(&square), -100.0);
    }

    #[test]
    fn consecutive_duplicates_are_removed() {
        let commands = PathParser::new()
            .parse("M 0 0 L 0 0 L 10 0 L 10 10 L 0 0 Z")
            .unwrap();
        let outline = build_outline(&commands, None);

        // Both the repeated start and the last vertex (equal to the first
        // going around) are dropped.
        assert_eq!(
            outline.as_slice(),
            &[point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)]
        );
    }

    #[test]
    fn multiple_subpaths_keep_their_winding() {
        let loops = loops_of("M 0 0 L 10 0 L 10 10 L 0 10 Z M 2 2 L 2 8 L 8 8 L 8 2 Z");
        assert_eq!(loops.len(), 2);
        assert_eq!(loop_winding(&loops[0]), Winding::Clockwise);
        assert_eq!(loop_winding(&loops[1]), Winding::CounterClockwise);
    }

    #[test]
    fn curves_are_flattened() {
        let loops = loops_of("M 0 0 Q 5 5 10 0 Z");
        assert_eq!(loops.len(), 1);
        // 1 move-to vertex plus `flattening_steps` curve samples.
        assert!(loops[0].len() > 3);
        // The curve's exact endpoint is among the vertices.
        assert!(loops[0].iter().any(|p| *p == point(10.0, 0.0)));
    }

    #[test]
    fn arcs_are_flattened() {
        let loops = loops_of("M 0 0 A 5 5 0 0 1 10 0 Z");
        assert_eq!(loops.len(), 1);
        assert!(loops[0].len() > 3);
    }

    #[test]
    fn empty_input_builds_nothing() {
        assert!(loops_of("").is_empty());
        assert!(build_outline(&[], None).is_empty());
    }
}
