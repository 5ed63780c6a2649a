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

use smallvec::SmallVec;
use tracing::{debug, info};

use crate::{
    error::{KernelError, KernelResult},
    geometry::{Point3, Vector3, util::EPS},
    mesh::{
        basic_types::Mesh,
        keys::{FaceId, VertexId},
        spatial_hash::VertexHash,
    },
};

/// Options of [`Mesh::from_face_list`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceListOptions {
    /// Merge input positions closer than `epsilon` on every axis.
    pub deduplicate: bool,
    pub epsilon: f64,
}

impl Default for FaceListOptions {
    fn default() -> Self {
        Self {
            deduplicate: true,
            epsilon: EPS,
        }
    }
}

impl FaceListOptions {
    /// Keep every input position as its own vertex.
    pub fn exact() -> Self {
        Self {
            deduplicate: false,
            ..Self::default()
        }
    }
}

/// Indexed polygon soup, the export form of a [`Mesh`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceList {
    pub positions: Vec<Point3>,
    pub faces: Vec<Vec<usize>>,
}

impl Mesh {
    /// Builds a mesh from positions and faces given as index lists.
    ///
    /// Consecutive repeated vertices (after deduplication) are dropped and
    /// faces left with fewer than three vertices are skipped. Adjacent faces
    /// are paired and every remaining open edge gets a hole twin, so the
    /// result always has `pair` set on every half-edge.
    pub fn from_face_list<F>(
        positions: &[Point3],
        faces: &[F],
        options: &FaceListOptions,
    ) -> KernelResult<Mesh>
    where
        F: AsRef<[usize]>,
    {
        let mut mesh = Mesh::new();

        // --- vertices ---
        let mut ids: Vec<VertexId> = Vec::with_capacity(positions.len());
        let mut hash = VertexHash::new(options.epsilon);
        for &p in positions {
            let id = if options.deduplicate {
                match hash.find(&p) {
                    Some(v) => v,
                    None => {
                        let v = mesh.add_vertex(p);
                        hash.insert(v, p);
                        v
                    }
                }
            } else {
                mesh.add_vertex(p)
            };
            ids.push(id);
        }

        // --- faces ---
        let mut skipped = 0usize;
        for (fi, face) in faces.iter().enumerate() {
            let indices = face.as_ref();
            if let Some(&index) = indices.iter().find(|&&i| i >= positions.len()) {
                return Err(KernelError::InvalidFaceIndex {
                    face: fi,
                    index,
                    count: positions.len(),
                });
            }
            let mut loop_vs: SmallVec<[VertexId; 8]> = indices.iter().map(|&i| ids[i]).collect();
            loop_vs.dedup_by(|a, b| {
                *a == *b || mesh.position(*a).approx_eq(&mesh.position(*b), options.epsilon)
            });
            while loop_vs.len() > 1 && loop_vs.first() == loop_vs.last() {
                loop_vs.pop();
            }
            if mesh.add_polygon(&loop_vs).is_none() {
                skipped += 1;
            }
        }

        // positions no face uses
        let unused: Vec<VertexId> = mesh
            .vertices
            .iter()
            .filter(|(_, v)| v.half_edge.is_none())
            .map(|(k, _)| k)
            .collect();
        for v in &unused {
            mesh.vertices.remove(*v);
        }

        let paired = mesh.pair_half_edges();
        let twins = mesh.cap_half_edges();

        if skipped > 0 {
            debug!(skipped, "degenerate input faces skipped");
        }
        info!(
            vertices = mesh.number_of_vertices(),
            faces = mesh.number_of_faces(),
            paired,
            twins,
            unused = unused.len(),
            "built mesh from face list"
        );
        Ok(mesh)
    }

    /// Adds one face bounded by a fresh loop of half-edges through
    /// `vertices`. The half-edges are left unpaired and without edges until
    /// [`Mesh::pair_half_edges`] runs. `None` for fewer than three vertices.
    pub fn add_polygon(&mut self, vertices: &[VertexId]) -> Option<FaceId> {
        if vertices.len() < 3 || vertices.iter().any(|&v| !self.vertices.contains_key(v)) {
            return None;
        }
        let hes: SmallVec<[_; 8]> = vertices.iter().map(|&v| self.add_half_edge(v)).collect();
        for (i, &h) in hes.iter().enumerate() {
            self.half_edges[h].next = Some(hes[(i + 1) % hes.len()]);
        }
        Some(self.add_face(hes[0]))
    }

    // ----- read-only export ------------------------------------------------

    /// Positions and face index lists, in store iteration order.
    pub fn to_face_list(&self) -> FaceList {
        let mut index = ahash::AHashMap::with_capacity(self.vertices.len());
        let mut positions = Vec::with_capacity(self.vertices.len());
        for (k, v) in self.vertices.iter() {
            index.insert(k, positions.len());
            positions.push(v.position);
        }
        let faces = self
            .faces
            .keys()
            .map(|f| {
                self.face_vertices(f)
                    .iter()
                    .filter_map(|v| index.get(v).copied())
                    .collect()
            })
            .collect();
        FaceList { positions, faces }
    }

    /// Fan triangulation of [`Mesh::to_face_list`], indexing its positions.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        let list = self.to_face_list();
        let mut out = Vec::with_capacity(list.faces.len() * 2);
        for face in &list.faces {
            for i in 1..face.len().saturating_sub(1) {
                out.push([face[0], face[i], face[i + 1]]);
            }
        }
        out
    }

    /// Area-weighted vertex normals, zero for vertices without faces.
    pub fn vertex_normals(&self) -> Vec<(VertexId, Vector3)> {
        self.vertices
            .keys()
            .map(|v| {
                let sum = self.vertex_faces(v).iter().fold(Vector3::new(0.0, 0.0, 0.0), |acc, &f| {
                    acc + self.face_normal(f) * self.face_area(f)
                });
                (v, sum.try_normalized(f64::EPSILON).unwrap_or(sum))
            })
            .collect()
    }
}
