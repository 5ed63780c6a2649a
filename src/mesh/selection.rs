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

use crate::mesh::{
    basic_types::Mesh,
    keys::{EdgeId, FaceId, VertexId},
};

/// A named subset of one mesh's entities.
///
/// Holds keys only; every query takes the mesh explicitly. After a
/// structural edit that may remove entities, call [`Selection::retain_live`]
/// before using the selection again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub vertices: AHashSet<VertexId>,
    pub edges: AHashSet<EdgeId>,
    pub faces: AHashSet<FaceId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every vertex, edge and face of `mesh`.
    pub fn all(mesh: &Mesh) -> Self {
        Self {
            vertices: mesh.vertices.keys().collect(),
            edges: mesh.edges.keys().collect(),
            faces: mesh.faces.keys().collect(),
        }
    }

    pub fn from_faces<I: IntoIterator<Item = FaceId>>(faces: I) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn from_vertices<I: IntoIterator<Item = VertexId>>(vertices: I) -> Self {
        Self {
            vertices: vertices.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty() && self.faces.is_empty()
    }

    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }

    pub fn contains_edge(&self, e: EdgeId) -> bool {
        self.edges.contains(&e)
    }

    pub fn contains_face(&self, f: FaceId) -> bool {
        self.faces.contains(&f)
    }

    /// Drops keys whose entity no longer exists in `mesh`.
    pub fn retain_live(&mut self, mesh: &Mesh) {
        self.vertices.retain(|&v| mesh.vertices.contains_key(v));
        self.edges.retain(|&e| mesh.edges.contains_key(e));
        self.faces.retain(|&f| mesh.faces.contains_key(f));
    }

    /// Selected faces that still exist, in store order.
    pub fn selected_faces(&self, mesh: &Mesh) -> Vec<FaceId> {
        mesh.faces.keys().filter(|f| self.faces.contains(f)).collect()
    }

    /// Selected vertices plus every corner of a selected face.
    pub fn covered_vertices(&self, mesh: &Mesh) -> AHashSet<VertexId> {
        let mut out: AHashSet<VertexId> = self
            .vertices
            .iter()
            .copied()
            .filter(|&v| mesh.vertices.contains_key(v))
            .collect();
        for f in self.selected_faces(mesh) {
            out.extend(mesh.face_vertices(f));
        }
        out
    }
}
