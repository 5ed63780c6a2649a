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

//! Half-edge boundary-representation kernel for polygon meshes.
//!
//! [`Mesh`] stores vertices, half-edges, edges and faces in typed arenas and
//! offers Euler operators that keep the half-edge invariants intact. On top
//! of it sit face-list construction with pairing and hole capping, a
//! structural validator, a planar slicer and a greedy simplifier.

pub mod error;
pub mod geometry;
pub mod mesh;
pub mod operations;

pub use error::{KernelError, KernelResult};
pub use geometry::{Plane, PlaneSide, Point3, Vector3};
pub use mesh::{
    EdgeId, FaceId, FaceListOptions, HalfEdgeId, Mesh, Selection, ValidateOptions, VertexId,
    is_valid_mesh, is_valid_surface, validate,
};
pub use operations::{
    CapMode, MeshOperator, MultiSlicer, QuadSplit, SimplifyOptions, Simplifier, SliceOptions,
    Slicer,
};
