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

use crate::mesh::keys::{EdgeId, FaceId, HalfEdgeId, VertexId};

#[derive(Clone, Debug)]
pub struct HalfEdge {
    /// Origin.
    pub vertex: VertexId,
    /// `None`: unpaired.
    pub pair: Option<HalfEdgeId>,
    /// Following half-edge of the same loop.
    pub next: Option<HalfEdgeId>,
    pub edge: Option<EdgeId>,
    /// `None`: bounds a hole.
    pub face: Option<FaceId>,
    pub label: Option<String>,
}

impl HalfEdge {
    pub fn new(vertex: VertexId) -> Self {
        Self {
            vertex,
            pair: None,
            next: None,
            edge: None,
            face: None,
            label: None,
        }
    }

    #[inline]
    pub fn is_paired(&self) -> bool {
        self.pair.is_some()
    }

    #[inline]
    pub fn is_hole(&self) -> bool {
        self.face.is_none()
    }
}
