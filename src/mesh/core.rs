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

use crate::{
    geometry::{Aabb, Point3},
    mesh::{
        basic_types::*,
        edge::Edge,
        face::Face,
        half_edge::HalfEdge,
        keys::{EdgeId, FaceId, HalfEdgeId, VertexId},
        vertex::Vertex,
    },
};

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    // ----- store: creation -------------------------------------------------

    /// Registers a new, unconnected vertex.
    pub fn add_vertex(&mut self, position: Point3) -> VertexId {
        self.invalidate_cache();
        self.vertices.insert(Vertex::new(position))
    }

    /// Registers a new half-edge leaving `origin`. Nothing else is linked;
    /// the caller wires `next`, `pair`, `edge` and `face`.
    pub fn add_half_edge(&mut self, origin: VertexId) -> HalfEdgeId {
        let he = self.half_edges.insert(HalfEdge::new(origin));
        if let Some(v) = self.vertices.get_mut(origin) {
            v.half_edge.get_or_insert(he);
        }
        he
    }

    /// Registers a new edge represented by `he` and points `he` (and its pair,
    /// if any) at it.
    pub fn add_edge(&mut self, he: HalfEdgeId) -> EdgeId {
        let e = self.edges.insert(Edge::new(he));
        self.half_edges[he].edge = Some(e);
        if let Some(p) = self.half_edges[he].pair {
            self.half_edges[p].edge = Some(e);
        }
        e
    }

    /// Registers a new face whose loop starts at `he` and claims every
    /// half-edge of that loop.
    pub fn add_face(&mut self, he: HalfEdgeId) -> FaceId {
        let f = self.faces.insert(Face::new(he));
        self.assign_face_loop(he, Some(f));
        f
    }

    /// Sets `face` on every half-edge of the loop starting at `he`.
    pub(crate) fn assign_face_loop(&mut self, he: HalfEdgeId, face: Option<FaceId>) {
        let mut cur = he;
        for _ in 0..self.loop_bound() {
            self.half_edges[cur].face = face;
            match self.half_edges[cur].next {
                Some(n) if n != he => cur = n,
                _ => break,
            }
        }
    }

    /// Pairs `a` and `b` with each other.
    pub(crate) fn set_pair(&mut self, a: HalfEdgeId, b: HalfEdgeId) {
        self.half_edges[a].pair = Some(b);
        self.half_edges[b].pair = Some(a);
    }

    // ----- store: removal --------------------------------------------------

    pub fn remove_vertex(&mut self, v: VertexId) -> Option<Vertex> {
        self.invalidate_cache();
        self.vertices.remove(v)
    }

    pub fn remove_half_edge(&mut self, he: HalfEdgeId) -> Option<HalfEdge> {
        self.half_edges.remove(he)
    }

    pub fn remove_edge(&mut self, e: EdgeId) -> Option<Edge> {
        self.edges.remove(e)
    }

    pub fn remove_face(&mut self, f: FaceId) -> Option<Face> {
        self.faces.remove(f)
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.half_edges.clear();
        self.edges.clear();
        self.faces.clear();
        self.invalidate_cache();
    }

    // ----- store: lookup ---------------------------------------------------

    pub fn vertex(&self, v: VertexId) -> Option<&Vertex> {
        self.vertices.get(v)
    }

    pub fn vertex_mut(&mut self, v: VertexId) -> Option<&mut Vertex> {
        self.invalidate_cache();
        self.vertices.get_mut(v)
    }

    pub fn half_edge(&self, he: HalfEdgeId) -> Option<&HalfEdge> {
        self.half_edges.get(he)
    }

    pub fn edge(&self, e: EdgeId) -> Option<&Edge> {
        self.edges.get(e)
    }

    pub fn face(&self, f: FaceId) -> Option<&Face> {
        self.faces.get(f)
    }

    pub fn face_mut(&mut self, f: FaceId) -> Option<&mut Face> {
        self.faces.get_mut(f)
    }

    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.vertices.contains_key(v)
    }

    pub fn contains_edge(&self, e: EdgeId) -> bool {
        self.edges.contains_key(e)
    }

    pub fn contains_face(&self, f: FaceId) -> bool {
        self.faces.contains_key(f)
    }

    #[inline]
    pub fn position(&self, v: VertexId) -> Point3 {
        self.vertices[v].position
    }

    pub fn set_position(&mut self, v: VertexId, position: Point3) {
        self.invalidate_cache();
        self.vertices[v].position = position;
    }

    // ----- store: iteration ------------------------------------------------

    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices.iter()
    }

    pub fn half_edges(&self) -> impl Iterator<Item = (HalfEdgeId, &HalfEdge)> {
        self.half_edges.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter()
    }

    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &Face)> {
        self.faces.iter()
    }

    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.vertices.keys().collect()
    }

    pub fn half_edge_ids(&self) -> Vec<HalfEdgeId> {
        self.half_edges.keys().collect()
    }

    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges.keys().collect()
    }

    pub fn face_ids(&self) -> Vec<FaceId> {
        self.faces.keys().collect()
    }

    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn number_of_half_edges(&self) -> usize {
        self.half_edges.len()
    }

    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn number_of_faces(&self) -> usize {
        self.faces.len()
    }

    /// `V - E + F`.
    pub fn euler_characteristic(&self) -> i64 {
        self.number_of_vertices() as i64 - self.number_of_edges() as i64
            + self.number_of_faces() as i64
    }

    // ----- derived ---------------------------------------------------------

    /// Mean vertex position, cached until the next mutation.
    pub fn centroid(&self) -> Option<Point3> {
        if let Some(c) = self.centroid_cache.get() {
            return Some(c);
        }
        let c = Point3::centroid(self.vertices.values().map(|v| &v.position))?;
        self.centroid_cache.set(Some(c));
        Some(c)
    }

    pub fn bounding_box(&self) -> Option<Aabb<f64, 3>> {
        Aabb::enclosing(self.vertices.values().map(|v| &v.position))
    }

    #[inline]
    pub(crate) fn invalidate_cache(&self) {
        self.centroid_cache.set(None);
    }
}
