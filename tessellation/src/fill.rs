//! Triangulation of closed loops: hole bridging followed by ear clipping.

use log::warn;

use crate::geom::Triangle;
use crate::math::{point, Point};
use crate::path::outline::{extreme_vertex, loop_winding, Winding};
use crate::path::CyclicList;

/// A triangle mesh: a flat vertex array plus triangle index triples (each
/// consecutive group of three indices is one triangle), with the source
/// loops kept alongside for consumers that need to map triangles back to
/// the shape they came from.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Mesh {
    pub vertices: Vec<Point>,
    pub indices: Vec<u32>,
    pub paths: Vec<CyclicList<Point>>,
}

impl Mesh {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// The i-th triangle of the mesh.
    pub fn triangle(&self, i: usize) -> Triangle {
        Triangle {
            a: self.vertices[self.indices[i * 3] as usize],
            b: self.vertices[self.indices[i * 3 + 1] as usize],
            c: self.vertices[self.indices[i * 3 + 2] as usize],
        }
    }

    /// The summed unsigned area of all triangles.
    pub fn area(&self) -> f64 {
        (0..self.triangle_count()).map(|i| self.triangle(i).area()).sum()
    }
}

/// Converts closed loops (outer boundaries and holes) into a triangle mesh.
///
/// Loops wound clockwise are outer boundaries, counter-clockwise ones are
/// holes. Each hole is first merged into its enclosing outer loop through a
/// zero-area seam (bridging), then every resulting simple loop is ear-clipped.
/// Ears are always clipped in first-available order, so the output is
/// deterministic.
#[derive(Debug, Default)]
pub struct Triangulator;

impl Triangulator {
    pub fn new() -> Self {
        Triangulator
    }

    pub fn tessellate(&mut self, paths: &[CyclicList<Point>]) -> Mesh {
        let mut outers = Vec::new();
        let mut holes = Vec::new();

        for path in paths {
            // Loops that cannot enclose any area are skipped.
            if path.len() < 3 {
                continue;
            }
            match loop_winding(path) {
                Winding::Clockwise => outers.push(path.clone()),
                Winding::CounterClockwise => {
                    let mut hole = path.clone();
                    // Canonicalize: the hole starts at its extreme
                    // (rightmost, then bottommost) vertex, which is where
                    // the bridge is cast from.
                    hole.rotate(extreme_vertex(&hole));
                    holes.push(hole);
                }
            }
        }

        // Bridging right-to-left keeps the seams from cutting through holes
        // that have not been merged yet.
        holes.sort_by(|a, b| b.get(0).x.total_cmp(&a.get(0).x));

        for hole in &holes {
            if !bridge_hole(&mut outers, hole) {
                warn!(
                    "dropping a {}-vertex hole with no enclosing outer loop (extreme vertex {:?})",
                    hole.len(),
                    hole.get(0)
                );
            }
        }

        let mut mesh = Mesh {
            vertices: Vec::new(),
            indices: Vec::new(),
            paths: paths.to_vec(),
        };
        for simple in &outers {
            clip_ears(simple, &mut mesh);
        }

        mesh
    }
}

/// Merges `hole` (rotated to start at its extreme vertex) into the outer
/// loop its rightward ray hits first. Returns false when no outer edge
/// crosses the ray, i.e. the hole is degenerate.
fn bridge_hole(outers: &mut Vec<CyclicList<Point>>, hole: &CyclicList<Point>) -> bool {
    let m = *hole.get(0);

    // Nearest crossing of the rightward ray from m over all outer edges.
    struct Crossing {
        outer: usize,
        x: f64,
        far: Point,
        far_index: isize,
    }
    let mut nearest: Option<Crossing> = None;

    for (oi, outer) in outers.iter().enumerate() {
        let n = outer.len() as isize;
        for i in 0..n {
            let a = *outer.get(i);
            let b = *outer.get(i + 1);
            let (top_y, bottom_y) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };
            if top_y > m.y || m.y >= bottom_y {
                continue;
            }

            let t = (m.y - a.y) / (b.y - a.y);
            let x = a.x + (b.x - a.x) * t;
            if x < m.x {
                continue;
            }
            if nearest.as_ref().map_or(true, |c| x < c.x) {
                let (far, far_index) = if a.x > b.x { (a, i) } else { (b, i + 1) };
                nearest = Some(Crossing {
                    outer: oi,
                    x,
                    far,
                    far_index,
                });
            }
        }
    }

    let crossing = match nearest {
        Some(c) => c,
        None => return false,
    };

    let outer = &mut outers[crossing.outer];

    // The bridge vertex defaults to the crossed edge's far endpoint; any
    // outer vertex strictly inside the triangle (m, crossing, far) would
    // block that seam, so among those the one closest to the ray direction
    // (maximum normalized x) wins instead.
    let tri = Triangle {
        a: m,
        b: point(crossing.x, m.y),
        c: crossing.far,
    };
    let mut bridge_index = crossing.far_index;
    let mut best_metric = f64::MIN;
    for j in 0..outer.len() as isize {
        let v = *outer.get(j);
        if !tri.contains_point(v) {
            continue;
        }
        let d = v - m;
        let metric = d.x / d.length();
        if metric > best_metric {
            best_metric = metric;
            bridge_index = j;
        }
    }

    // Splice the hole's full vertex sequence plus the repeated bridge pair
    // in after the bridge vertex, merging the hole into the outer loop.
    let bridge_vertex = *outer.get(bridge_index);
    let mut seam: Vec<Point> = hole.iter().copied().collect();
    seam.push(m);
    seam.push(bridge_vertex);
    outer.insert(bridge_index + 1, seam);

    true
}

/// Ear-clips one hole-free loop, appending its vertices and triangles to the
/// mesh.
fn clip_ears(vertices: &CyclicList<Point>, mesh: &mut Mesh) {
    let n = vertices.len();
    if n < 3 {
        return;
    }

    let base = mesh.vertices.len() as u32;
    mesh.vertices.extend(vertices.iter().copied());

    let mut indices: CyclicList<u32> = (base..base + n as u32).collect();
    let mut is_ear: Vec<bool> = (0..n)
        .map(|i| is_ear_at(&indices, &mesh.vertices, i as isize))
        .collect();

    while indices.len() > 3 {
        let pos = match is_ear.iter().position(|e| *e) {
            Some(pos) => pos as isize,
            None => {
                // Removing a vertex can turn a non-neighbor into an ear (it
                // may have been the only blocker); rescan everything before
                // giving up on the loop.
                for i in 0..indices.len() {
                    is_ear[i] = is_ear_at(&indices, &mesh.vertices, i as isize);
                }
                match is_ear.iter().position(|e| *e) {
                    Some(pos) => pos as isize,
                    None => {
                        // A degenerate or self-intersecting remainder;
                        // nothing more can be clipped out of it.
                        warn!("no ear left in a {}-vertex loop", indices.len());
                        return;
                    }
                }
            }
        };

        mesh.indices.push(*indices.get(pos - 1));
        mesh.indices.push(*indices.get(pos));
        mesh.indices.push(*indices.get(pos + 1));

        indices.remove(pos);
        is_ear.remove(pos as usize);

        // Only the clipped ear's two former neighbors can have changed.
        let len = indices.len() as isize;
        let prev = (pos - 1).rem_euclid(len);
        let next = pos.rem_euclid(len);
        is_ear[prev as usize] = is_ear_at(&indices, &mesh.vertices, prev);
        is_ear[next as usize] = is_ear_at(&indices, &mesh.vertices, next);
    }

    mesh.indices.push(*indices.get(0));
    mesh.indices.push(*indices.get(1));
    mesh.indices.push(*indices.get(2));
}

/// A vertex is an ear when its removal triangle turns clockwise and strictly
/// contains no other vertex of the loop.
fn is_ear_at(indices: &CyclicList<u32>, vertices: &[Point], pos: isize) -> bool {
    let len = indices.len() as isize;
    let prev = (pos - 1).rem_euclid(len);
    let here = pos.rem_euclid(len);
    let next = (pos + 1).rem_euclid(len);

    let tri = Triangle {
        a: vertices[*indices.get(prev) as usize],
        b: vertices[*indices.get(here) as usize],
        c: vertices[*indices.get(next) as usize],
    };

    if (tri.b - tri.a).cross(tri.c - tri.b) <= 0.0 {
        return false;
    }

    for j in 0..len {
        if j == prev || j == here || j == next {
            continue;
        }
        if tri.contains_point(vertices[*indices.get(j) as usize]) {
            return false;
        }
    }

    true
}
