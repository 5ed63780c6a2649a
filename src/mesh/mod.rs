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

//! Half-edge entity store and the topology operators over it.

pub mod basic_types;
pub mod construction;
pub mod core;
pub mod edge;
pub mod euler;
pub mod face;
pub mod half_edge;
pub mod keys;
pub mod pairing;
pub mod selection;
mod spatial_hash;
pub mod topology;
pub mod validate;
pub mod vertex;

pub use basic_types::{Mesh, QuadSplitResult, SplitEdgeResult, SplitFaceResult, TriSplitResult};
pub use construction::{FaceList, FaceListOptions};
pub use edge::Edge;
pub use face::Face;
pub use half_edge::HalfEdge;
pub use keys::{EdgeId, EntityKey, FaceId, HalfEdgeId, VertexId};
pub use selection::Selection;
pub use validate::{
    Invariant, StructuralViolation, ValidateOptions, ValidationReport, is_valid_mesh,
    is_valid_surface, validate,
};
pub use vertex::Vertex;
