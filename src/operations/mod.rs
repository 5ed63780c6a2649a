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

//! Mesh modifiers built on the Euler operators.

pub mod simplify;
pub mod slice;
pub mod triangulation;

pub use simplify::{Simplifier, SimplifyOptions, SimplifyReport};
pub use slice::{CapMode, MultiSlicer, SliceOptions, SliceReport, Slicer};

use crate::{
    error::KernelResult,
    mesh::{Mesh, QuadSplitResult, Selection},
};

/// A modifier that edits a mesh in place, either whole or restricted to a
/// selection.
pub trait MeshOperator {
    type Output;

    fn apply(&self, mesh: &mut Mesh) -> KernelResult<Self::Output>;

    fn apply_selection(&self, mesh: &mut Mesh, selection: &Selection) -> KernelResult<Self::Output>;
}

/// Quad subdivision as a [`MeshOperator`]. With `hybrid` set, triangles are
/// fanned into triangles instead of quads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadSplit {
    pub hybrid: bool,
}

impl MeshOperator for QuadSplit {
    type Output = QuadSplitResult;

    fn apply(&self, mesh: &mut Mesh) -> KernelResult<QuadSplitResult> {
        Ok(if self.hybrid {
            mesh.hybrid_split_faces()
        } else {
            mesh.quad_split_faces()
        })
    }

    fn apply_selection(
        &self,
        mesh: &mut Mesh,
        selection: &Selection,
    ) -> KernelResult<QuadSplitResult> {
        Ok(if self.hybrid {
            mesh.hybrid_split_selected(selection)
        } else {
            mesh.quad_split_selected(selection)
        })
    }
}
