// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use ahash::{AHashMap, AHashSet};
use num_traits::Float;
use smallvec::SmallVec;
use tracing::debug;

use crate::geometry::{
    Point2,
    util::{incircle, orient2d, point_in_polygon},
};

pub const SQRT_3: f64 = 1.7320508075688772;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Edge(usize, usize);

impl Edge {
    #[inline]
    fn new(a: usize, b: usize) -> Self {
        if a < b { Edge(a, b) } else { Edge(b, a) }
    }
}

/// Counter-clockwise triangle over point indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle(pub usize, pub usize, pub usize);

impl Triangle {
    #[inline]
    pub fn as_array(&self) -> [usize; 3] {
        [self.0, self.1, self.2]
    }
}

/// Delaunay triangulation of a 2D point set, optionally with constraint
/// edges forced into it.
#[derive(Clone, Debug)]
pub struct Delaunay<T> {
    pub points: Vec<Point2<T>>,
    pub triangles: Vec<Triangle>,
}

impl<T: Float> Delaunay<T> {
    /// Bowyer-Watson over `pts`. Three frame corners enclosing every input
    /// point seed the triangulation and are dropped again at the end, along
    /// with every triangle touching them.
    pub fn build(pts: &[Point2<T>]) -> Self {
        let mut points = pts.to_vec();
        if points.len() < 3 {
            return Self {
                points,
                triangles: Vec::new(),
            };
        }

        // --- frame triangle containing all points ---
        let (mut minx, mut miny) = (points[0][0], points[0][1]);
        let (mut maxx, mut maxy) = (minx, miny);
        for p in &points {
            minx = minx.min(p[0]);
            miny = miny.min(p[1]);
            maxx = maxx.max(p[0]);
            maxy = maxy.max(p[1]);
        }
        let two = T::one() + T::one();
        let delta = (maxx - minx).max(maxy - miny);
        let cx = (minx + maxx) / two;
        let cy = (miny + maxy) / two;
        let r = T::from(64.0).unwrap_or_else(T::one) * delta + T::one();
        let sqrt_3 = T::from(SQRT_3).unwrap_or_else(T::one);

        let s0 = points.len();
        points.push(Point2::new(cx, cy + two * r));
        points.push(Point2::new(cx - sqrt_3 * r, cy - r));
        points.push(Point2::new(cx + sqrt_3 * r, cy - r));

        let mut triangles = vec![Triangle(s0, s0 + 1, s0 + 2)];
        for pid in 0..s0 {
            Self::insert_point(pid, &points, &mut triangles);
        }

        triangles.retain(|t| t.0 < s0 && t.1 < s0 && t.2 < s0);
        points.truncate(s0);
        Self { points, triangles }
    }

    fn insert_point(pid: usize, points: &[Point2<T>], triangles: &mut Vec<Triangle>) {
        let p = &points[pid];

        let mut bad: Vec<usize> = triangles
            .iter()
            .enumerate()
            .filter(|(_, t)| incircle(&points[t.0], &points[t.1], &points[t.2], p) > T::zero())
            .map(|(i, _)| i)
            .collect();
        if bad.is_empty() {
            return;
        }

        // cavity boundary: edges used by exactly one bad triangle, kept directed
        let mut edge_count: AHashMap<Edge, (usize, (usize, usize))> = AHashMap::default();
        for &i in &bad {
            let t = triangles[i];
            for (u, v) in tri_edges(t) {
                edge_count.entry(Edge::new(u, v)).or_insert((0, (u, v))).0 += 1;
            }
        }
        let mut boundary: Vec<(usize, usize)> = edge_count
            .into_values()
            .filter(|(count, _)| *count == 1)
            .map(|(_, e)| e)
            .collect();
        boundary.sort_unstable();

        bad.sort_unstable();
        for &i in bad.iter().rev() {
            triangles.swap_remove(i);
        }
        for (u, v) in boundary {
            if orient2d(&points[u], &points[v], p) > T::zero() {
                triangles.push(Triangle(u, v, pid));
            } else {
                triangles.push(Triangle(u, pid, v));
            }
        }
    }

    /// Delaunay triangulation of `pts` that contains every edge of
    /// `constraints` (index pairs). Missing constraints are recovered by
    /// flipping the edges that cross them; unrecoverable ones are logged and
    /// skipped.
    pub fn build_constrained(pts: &[Point2<T>], constraints: &[[usize; 2]]) -> Self {
        let mut dt = Self::build(pts);
        let constrained: AHashSet<Edge> = constraints
            .iter()
            .filter(|[a, b]| a != b)
            .map(|&[a, b]| Edge::new(a, b))
            .collect();

        for &[a, b] in constraints {
            if a != b && !dt.recover_edge(a, b, &constrained) {
                debug!(a, b, "constraint edge not recovered");
            }
        }
        dt.legalize(&constrained);
        dt
    }

    /// Triangles of the simple polygon `polygon` (indices into it). Every
    /// polygon side is a constraint and only triangles inside the polygon are
    /// kept.
    pub fn triangulate_polygon(polygon: &[Point2<T>]) -> Vec<[usize; 3]> {
        let n = polygon.len();
        if n < 3 {
            return Vec::new();
        }
        let constraints: Vec<[usize; 2]> = (0..n).map(|i| [i, (i + 1) % n]).collect();
        let dt = Self::build_constrained(polygon, &constraints);

        let three = T::one() + T::one() + T::one();
        dt.triangles
            .iter()
            .filter(|t| {
                let (a, b, c) = (&dt.points[t.0], &dt.points[t.1], &dt.points[t.2]);
                let centroid =
                    Point2::new((a[0] + b[0] + c[0]) / three, (a[1] + b[1] + c[1]) / three);
                point_in_polygon(&centroid, polygon)
            })
            .map(Triangle::as_array)
            .collect()
    }

    fn edge_map(&self) -> AHashMap<Edge, SmallVec<[usize; 2]>> {
        let mut map: AHashMap<Edge, SmallVec<[usize; 2]>> =
            AHashMap::with_capacity(self.triangles.len() * 3);
        for (ti, t) in self.triangles.iter().enumerate() {
            for (u, v) in tri_edges(*t) {
                map.entry(Edge::new(u, v)).or_default().push(ti);
            }
        }
        map
    }

    fn recover_edge(&mut self, a: usize, b: usize, constrained: &AHashSet<Edge>) -> bool {
        let target = Edge::new(a, b);
        let max_flips = 4 * self.triangles.len() + 16;
        for _ in 0..max_flips {
            let map = self.edge_map();
            if map.contains_key(&target) {
                return true;
            }
            let mut flipped = false;
            for ti in 0..self.triangles.len() {
                for (u, v) in tri_edges(self.triangles[ti]) {
                    let e = Edge::new(u, v);
                    if constrained.contains(&e) || !self.segments_cross(a, b, u, v) {
                        continue;
                    }
                    let Some(tris) = map.get(&e) else { continue };
                    if tris.len() == 2 && self.flip(e, tris[0], tris[1]) {
                        flipped = true;
                        break;
                    }
                }
                if flipped {
                    break;
                }
            }
            if !flipped {
                return false;
            }
        }
        self.edge_map().contains_key(&target)
    }

    /// Proper crossing of segments `ab` and `cd` (shared endpoints excluded).
    fn segments_cross(&self, a: usize, b: usize, c: usize, d: usize) -> bool {
        if a == c || a == d || b == c || b == d {
            return false;
        }
        let p = &self.points;
        let o1 = orient2d(&p[a], &p[b], &p[c]);
        let o2 = orient2d(&p[a], &p[b], &p[d]);
        let o3 = orient2d(&p[c], &p[d], &p[a]);
        let o4 = orient2d(&p[c], &p[d], &p[b]);
        o1 * o2 < T::zero() && o3 * o4 < T::zero()
    }

    /// Replaces the shared edge `e` of triangles `t0`, `t1` by the other
    /// diagonal of their quad. Refused when the quad is not strictly convex.
    fn flip(&mut self, e: Edge, t0: usize, t1: usize) -> bool {
        let (u, v) = (e.0, e.1);
        let (Some(x), Some(y)) = (
            third_vertex(self.triangles[t0], u, v),
            third_vertex(self.triangles[t1], u, v),
        ) else {
            return false;
        };
        if x == y || !self.segments_cross(u, v, x, y) {
            return false;
        }
        self.triangles[t0] = self.ccw(x, y, u);
        self.triangles[t1] = self.ccw(x, y, v);
        true
    }

    fn ccw(&self, a: usize, b: usize, c: usize) -> Triangle {
        if orient2d(&self.points[a], &self.points[b], &self.points[c]) >= T::zero() {
            Triangle(a, b, c)
        } else {
            Triangle(a, c, b)
        }
    }

    /// Flips non-constraint edges that fail the empty-circle test until none
    /// is left or the pass budget runs out.
    fn legalize(&mut self, constrained: &AHashSet<Edge>) {
        for _ in 0..8 {
            let map = self.edge_map();
            let mut changed = false;
            let mut edges: Vec<(Edge, usize, usize)> = map
                .iter()
                .filter(|(e, tris)| tris.len() == 2 && !constrained.contains(e))
                .map(|(e, tris)| (*e, tris[0], tris[1]))
                .collect();
            edges.sort_unstable_by_key(|(e, _, _)| (e.0, e.1));

            let mut touched = AHashSet::new();
            for (e, t0, t1) in edges {
                if touched.contains(&t0) || touched.contains(&t1) {
                    continue;
                }
                let t = self.triangles[t0];
                let Some(opposite) = third_vertex(self.triangles[t1], e.0, e.1) else {
                    continue;
                };
                let p = &self.points;
                if incircle(&p[t.0], &p[t.1], &p[t.2], &p[opposite]) > T::zero()
                    && self.flip(e, t0, t1)
                {
                    touched.insert(t0);
                    touched.insert(t1);
                    changed = true;
                }
            }
            if !changed {
                return;
            }
        }
    }
}

#[inline]
fn third_vertex(t: Triangle, u: usize, v: usize) -> Option<usize> {
    let vs = t.as_array();
    if !(vs.contains(&u) && vs.contains(&v)) {
        return None;
    }
    vs.into_iter().find(|&w| w != u && w != v)
}

#[inline]
fn tri_edges(t: Triangle) -> [(usize, usize); 3] {
    [(t.0, t.1), (t.1, t.2), (t.2, t.0)]
}
