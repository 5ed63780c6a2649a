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

use ahash::AHashSet;
use num_traits::Zero;
use smallvec::SmallVec;

use crate::{
    geometry::{Aabb, Point3, Vector3, util::newell_normal},
    mesh::{
        basic_types::*,
        keys::{EdgeId, FaceId, HalfEdgeId, VertexId},
    },
};

impl Mesh {
    // ----- half-edge navigation --------------------------------------------

    /// Step limit for any loop walk. A closed loop never holds more
    /// half-edges than the mesh does, so longer walks are corrupt cycles.
    #[inline]
    pub(crate) fn loop_bound(&self) -> usize {
        self.half_edges.len()
    }

    #[inline]
    pub fn origin(&self, he: HalfEdgeId) -> VertexId {
        self.half_edges[he].vertex
    }

    #[inline]
    pub fn next(&self, he: HalfEdgeId) -> Option<HalfEdgeId> {
        self.half_edges[he].next
    }

    #[inline]
    pub fn pair(&self, he: HalfEdgeId) -> Option<HalfEdgeId> {
        self.half_edges[he].pair
    }

    /// End vertex of `he`, read from `next` or, failing that, from `pair`.
    pub fn target(&self, he: HalfEdgeId) -> Option<VertexId> {
        let h = &self.half_edges[he];
        h.next
            .map(|n| self.half_edges[n].vertex)
            .or_else(|| h.pair.map(|p| self.half_edges[p].vertex))
    }

    /// The half-edge whose `next` is `he`, found by walking the loop. `None`
    /// when the loop is open.
    pub fn prev(&self, he: HalfEdgeId) -> Option<HalfEdgeId> {
        let mut cur = he;
        for _ in 0..self.loop_bound() {
            let n = self.half_edges[cur].next?;
            if n == he {
                return Some(cur);
            }
            cur = n;
        }
        None
    }

    /// Every half-edge of the loop through `he`, starting at `he`. `None` when
    /// the loop does not close.
    pub fn loop_half_edges(&self, he: HalfEdgeId) -> Option<SmallVec<[HalfEdgeId; 8]>> {
        let mut out = SmallVec::new();
        let mut cur = he;
        for _ in 0..self.loop_bound() {
            out.push(cur);
            let n = self.half_edges.get(cur)?.next?;
            if n == he {
                return Some(out);
            }
            cur = n;
        }
        None
    }

    // ----- faces -----------------------------------------------------------

    pub fn face_half_edges(&self, f: FaceId) -> SmallVec<[HalfEdgeId; 8]> {
        self.faces
            .get(f)
            .and_then(|face| self.loop_half_edges(face.half_edge))
            .unwrap_or_default()
    }

    pub fn face_vertices(&self, f: FaceId) -> SmallVec<[VertexId; 8]> {
        self.face_half_edges(f)
            .iter()
            .map(|&h| self.half_edges[h].vertex)
            .collect()
    }

    pub fn face_positions(&self, f: FaceId) -> Vec<Point3> {
        self.face_vertices(f)
            .iter()
            .map(|&v| self.vertices[v].position)
            .collect()
    }

    /// Number of half-edges bounding `f`.
    pub fn face_order(&self, f: FaceId) -> usize {
        self.face_half_edges(f).len()
    }

    /// Unit normal of `f`, or the zero vector for a degenerate face.
    pub fn face_normal(&self, f: FaceId) -> Vector3 {
        let n = newell_normal(&self.face_positions(f));
        n.try_normalized(f64::EPSILON).unwrap_or_else(Vector3::zero)
    }

    pub fn face_area(&self, f: FaceId) -> f64 {
        newell_normal(&self.face_positions(f)).norm() * 0.5
    }

    pub fn face_center(&self, f: FaceId) -> Point3 {
        let ps = self.face_positions(f);
        Point3::centroid(&ps).unwrap_or_else(Point3::origin)
    }

    pub fn face_aabb(&self, f: FaceId) -> Option<Aabb<f64, 3>> {
        Aabb::enclosing(&self.face_positions(f))
    }

    /// Faces across each edge of `f` (`None` across holes and unpaired edges).
    pub fn face_neighbors(&self, f: FaceId) -> SmallVec<[Option<FaceId>; 8]> {
        self.face_half_edges(f)
            .iter()
            .map(|&h| self.half_edges[h].pair.and_then(|p| self.half_edges[p].face))
            .collect()
    }

    /// The half-edge of `f` leaving `v`.
    pub fn face_half_edge_from(&self, f: FaceId, v: VertexId) -> Option<HalfEdgeId> {
        self.face_half_edges(f)
            .into_iter()
            .find(|&h| self.half_edges[h].vertex == v)
    }

    // ----- vertices --------------------------------------------------------

    /// Outgoing half-edges of `v`. Walks `he -> he.pair.next`; when the star
    /// is open (unpaired or unlinked half-edges) falls back to a full scan.
    pub fn vertex_star(&self, v: VertexId) -> SmallVec<[HalfEdgeId; 8]> {
        if let Some(star) = self.walk_vertex_star(v) {
            return star;
        }
        self.half_edges
            .iter()
            .filter(|(_, h)| h.vertex == v)
            .map(|(k, _)| k)
            .collect()
    }

    /// Closed vertex star, `None` if the walk does not return to its start.
    pub(crate) fn walk_vertex_star(&self, v: VertexId) -> Option<SmallVec<[HalfEdgeId; 8]>> {
        let start = self.vertices.get(v)?.half_edge?;
        if self.half_edges.get(start)?.vertex != v {
            return None;
        }
        let mut out = SmallVec::new();
        let mut cur = start;
        for _ in 0..self.loop_bound() {
            out.push(cur);
            let p = self.half_edges.get(cur)?.pair?;
            cur = self.half_edges.get(p)?.next?;
            if cur == start {
                return Some(out);
            }
        }
        None
    }

    pub fn vertex_neighbors(&self, v: VertexId) -> SmallVec<[VertexId; 8]> {
        self.vertex_star(v)
            .iter()
            .filter_map(|&h| self.target(h))
            .collect()
    }

    pub fn vertex_faces(&self, v: VertexId) -> SmallVec<[FaceId; 8]> {
        let mut out: SmallVec<[FaceId; 8]> = SmallVec::new();
        for h in self.vertex_star(v) {
            if let Some(f) = self.half_edges[h].face {
                if !out.contains(&f) {
                    out.push(f);
                }
            }
        }
        out
    }

    pub fn vertex_degree(&self, v: VertexId) -> usize {
        self.vertex_star(v).len()
    }

    pub fn is_boundary_half_edge(&self, he: HalfEdgeId) -> bool {
        let h = &self.half_edges[he];
        match h.pair {
            None => true,
            Some(p) => h.face.is_none() || self.half_edges[p].face.is_none(),
        }
    }

    pub fn is_boundary_vertex(&self, v: VertexId) -> bool {
        let star = self.vertex_star(v);
        star.is_empty() || star.iter().any(|&h| self.is_boundary_half_edge(h))
    }

    pub fn is_boundary_edge(&self, e: EdgeId) -> bool {
        self.is_boundary_half_edge(self.edges[e].half_edge)
    }

    /// The half-edge running from `u` to `w`, if there is one.
    pub fn half_edge_between(&self, u: VertexId, w: VertexId) -> Option<HalfEdgeId> {
        self.vertex_star(u)
            .into_iter()
            .find(|&h| self.target(h) == Some(w))
    }

    pub fn are_vertices_connected(&self, u: VertexId, w: VertexId) -> bool {
        self.half_edge_between(u, w).is_some() || self.half_edge_between(w, u).is_some()
    }

    // ----- edges -----------------------------------------------------------

    pub fn edge_half_edges(&self, e: EdgeId) -> (HalfEdgeId, Option<HalfEdgeId>) {
        let he = self.edges[e].half_edge;
        (he, self.half_edges[he].pair)
    }

    pub fn edge_vertices(&self, e: EdgeId) -> Option<(VertexId, VertexId)> {
        let he = self.edges[e].half_edge;
        Some((self.origin(he), self.target(he)?))
    }

    pub fn edge_length(&self, e: EdgeId) -> f64 {
        match self.edge_vertices(e) {
            Some((a, b)) => self.position(a).distance_to(&self.position(b)),
            None => 0.0,
        }
    }

    pub fn edge_midpoint(&self, e: EdgeId) -> Option<Point3> {
        let (a, b) = self.edge_vertices(e)?;
        Some(self.position(a).midpoint(&self.position(b)))
    }

    // ----- whole-mesh queries ----------------------------------------------

    pub fn unpaired_half_edges(&self) -> Vec<HalfEdgeId> {
        self.half_edges
            .iter()
            .filter(|(_, h)| h.pair.is_none())
            .map(|(k, _)| k)
            .collect()
    }

    /// Half-edges bounding a hole (`face == None`).
    pub fn boundary_half_edges(&self) -> Vec<HalfEdgeId> {
        self.half_edges
            .iter()
            .filter(|(_, h)| h.face.is_none())
            .map(|(k, _)| k)
            .collect()
    }

    /// Closed loops of hole half-edges, each starting at its first-seen member.
    pub fn hole_loops(&self) -> Vec<SmallVec<[HalfEdgeId; 8]>> {
        let mut seen = AHashSet::new();
        let mut loops = Vec::new();
        for he in self.boundary_half_edges() {
            if seen.contains(&he) {
                continue;
            }
            if let Some(lp) = self.loop_half_edges(he) {
                seen.extend(lp.iter().copied());
                if lp.iter().all(|&h| self.half_edges[h].face.is_none()) {
                    loops.push(lp);
                }
            } else {
                seen.insert(he);
            }
        }
        loops
    }

    pub fn is_triangulated(&self) -> bool {
        self.faces.keys().all(|f| self.face_order(f) == 3)
    }

    pub fn is_closed(&self) -> bool {
        self.half_edges
            .values()
            .all(|h| h.face.is_some() && h.pair.is_some())
    }
}
