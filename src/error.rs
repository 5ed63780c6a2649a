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

use thiserror::Error;

use crate::mesh::VertexId;

/// Errors that abort a whole top-level operation. Failed preconditions of
/// single Euler operators are not errors; those operators return `None`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    #[error("face {face} references vertex index {index}, but only {count} positions were given")]
    InvalidFaceIndex {
        face: usize,
        index: usize,
        count: usize,
    },

    #[error("mesh has no faces")]
    EmptyMesh,

    #[error("plane normal has zero length")]
    DegeneratePlane,

    #[error("mesh has {count} vertices, at least 4 are required")]
    TooFewVertices { count: usize },

    #[error("vertex goal {goal} is below 4 (mesh has {count} vertices)")]
    InvalidGoal { goal: usize, count: usize },

    #[error("faces around vertex {vertex:?} have zero total area")]
    UnresolvableTopology { vertex: VertexId },
}

pub type KernelResult<T> = Result<T, KernelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KernelError::InvalidFaceIndex {
            face: 2,
            index: 9,
            count: 8,
        };
        assert_eq!(
            err.to_string(),
            "face 2 references vertex index 9, but only 8 positions were given"
        );

        let err = KernelError::TooFewVertices { count: 3 };
        assert!(err.to_string().contains("at least 4"));

        let err = KernelError::InvalidGoal { goal: 2, count: 42 };
        assert_eq!(err.to_string(), "vertex goal 2 is below 4 (mesh has 42 vertices)");
    }
}
