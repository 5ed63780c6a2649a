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

use std::fmt;

use slotmap::new_key_type;

new_key_type! {
    /// Stable handle of a [`Vertex`](crate::mesh::vertex::Vertex) inside its mesh.
    pub struct VertexId;
    /// Stable handle of a [`HalfEdge`](crate::mesh::half_edge::HalfEdge) inside its mesh.
    pub struct HalfEdgeId;
    /// Stable handle of an [`Edge`](crate::mesh::edge::Edge) inside its mesh.
    pub struct EdgeId;
    /// Stable handle of a [`Face`](crate::mesh::face::Face) inside its mesh.
    pub struct FaceId;
}

/// Key of any of the four entity kinds, used when reporting on entities of
/// mixed kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Vertex(VertexId),
    HalfEdge(HalfEdgeId),
    Edge(EdgeId),
    Face(FaceId),
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKey::Vertex(k) => write!(f, "vertex {k:?}"),
            EntityKey::HalfEdge(k) => write!(f, "half-edge {k:?}"),
            EntityKey::Edge(k) => write!(f, "edge {k:?}"),
            EntityKey::Face(k) => write!(f, "face {k:?}"),
        }
    }
}

impl From<VertexId> for EntityKey {
    fn from(k: VertexId) -> Self {
        EntityKey::Vertex(k)
    }
}

impl From<HalfEdgeId> for EntityKey {
    fn from(k: HalfEdgeId) -> Self {
        EntityKey::HalfEdge(k)
    }
}

impl From<EdgeId> for EntityKey {
    fn from(k: EdgeId) -> Self {
        EntityKey::Edge(k)
    }
}

impl From<FaceId> for EntityKey {
    fn from(k: FaceId) -> Self {
        EntityKey::Face(k)
    }
}
