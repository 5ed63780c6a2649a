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

use std::cell::Cell;

use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::{
    geometry::Point3,
    mesh::{
        edge::Edge,
        face::Face,
        half_edge::HalfEdge,
        keys::{EdgeId, FaceId, HalfEdgeId, VertexId},
        vertex::Vertex,
    },
};

/// Owner of every vertex, half-edge, edge and face of one polygon mesh.
///
/// All links between entities are keys into these stores. Removing an entity
/// never cascades: the operators in [`crate::mesh::euler`] and
/// [`crate::mesh::pairing`] repoint every reference before they remove
/// anything.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: SlotMap<VertexId, Vertex>,
    pub half_edges: SlotMap<HalfEdgeId, HalfEdge>,
    pub edges: SlotMap<EdgeId, Edge>,
    pub faces: SlotMap<FaceId, Face>,

    pub(crate) centroid_cache: Cell<Option<Point3>>,
}

/// Result of [`Mesh::split_edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitEdgeResult {
    pub vertex: VertexId,
    /// The edge created between the new vertex and the original end vertex.
    pub edge: EdgeId,
}

/// Result of [`Mesh::split_face`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitFaceResult {
    pub face: FaceId,
    pub edge: EdgeId,
}

/// Result of [`Mesh::tri_split_face`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriSplitResult {
    pub vertex: VertexId,
    /// Every triangle of the fan; the first one reuses the split face's key.
    pub faces: SmallVec<[FaceId; 8]>,
}

/// Per-operator counts of a [`Mesh::quad_split_faces`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuadSplitResult {
    pub split_edges: usize,
    pub center_vertices: Vec<VertexId>,
    pub new_faces: Vec<FaceId>,
}
