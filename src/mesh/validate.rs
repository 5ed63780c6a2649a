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

use ahash::AHashMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::mesh::{
    basic_types::Mesh,
    keys::{EntityKey, HalfEdgeId, VertexId},
};

/// The structural rule a [`StructuralViolation`] breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Invariant {
    /// A link points at an entity that is not in the store.
    DanglingReference,
    /// `he.next` must have exactly one predecessor.
    NextPrev,
    /// `he.pair.pair == he`, pairs run in opposite directions and share an edge.
    PairSymmetry,
    /// A face loop closes, has at least three half-edges and each names the face.
    FaceLoop,
    /// The star `he -> he.pair.next` of a vertex returns to its start.
    VertexStar,
    /// A hole half-edge satisfies `he.pair.vertex == he.next.vertex`.
    HoleClosure,
    /// An edge and its representative half-edge point at each other.
    EdgeLink,
    /// A vertex has no outgoing half-edge.
    IsolatedVertex,
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Invariant::DanglingReference => "dangling reference",
            Invariant::NextPrev => "next/prev reciprocity",
            Invariant::PairSymmetry => "pair symmetry",
            Invariant::FaceLoop => "face loop",
            Invariant::VertexStar => "vertex star",
            Invariant::HoleClosure => "hole closure",
            Invariant::EdgeLink => "edge link",
            Invariant::IsolatedVertex => "isolated vertex",
        };
        f.write_str(s)
    }
}

/// One broken invariant, found by [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity}: {invariant} violated: {detail}")]
pub struct StructuralViolation {
    pub entity: EntityKey,
    pub invariant: Invariant,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Log every violation at `warn` level.
    pub verbose: bool,
    /// Collect every violation instead of stopping at the first.
    pub force: bool,
    /// Accept open meshes: unpaired half-edges and unclosed hole chains.
    pub allow_surface: bool,
}

impl ValidateOptions {
    /// Closed-mesh check, exhaustive.
    pub fn mesh() -> Self {
        Self {
            verbose: false,
            force: true,
            allow_surface: false,
        }
    }

    /// Open-surface check, exhaustive.
    pub fn surface() -> Self {
        Self {
            allow_surface: true,
            ..Self::mesh()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub violations: Vec<StructuralViolation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// The first violation as an error, for `?` propagation.
    pub fn into_result(self) -> Result<(), StructuralViolation> {
        match self.violations.into_iter().next() {
            Some(v) => Err(v),
            None => Ok(()),
        }
    }
}

/// Stops the scan in fail-fast mode.
struct Stop;

struct Checker<'m> {
    mesh: &'m Mesh,
    options: ValidateOptions,
    report: ValidationReport,
}

impl Checker<'_> {
    fn flag(
        &mut self,
        entity: impl Into<EntityKey>,
        invariant: Invariant,
        detail: impl Into<String>,
    ) -> Result<(), Stop> {
        let violation = StructuralViolation {
            entity: entity.into(),
            invariant,
            detail: detail.into(),
        };
        if self.options.verbose {
            warn!(
                entity = %violation.entity,
                %invariant,
                detail = %violation.detail,
                "structural violation"
            );
        }
        self.report.violations.push(violation);
        if self.options.force {
            Ok(())
        } else {
            Err(Stop)
        }
    }

    fn run(&mut self) -> Result<(), Stop> {
        self.check_half_edges()?;
        self.check_edges()?;
        self.check_faces()?;
        self.check_vertices()?;
        Ok(())
    }

    fn check_half_edges(&mut self) -> Result<(), Stop> {
        let mesh = self.mesh;
        let surface = self.options.allow_surface;
        let mut predecessors: AHashMap<HalfEdgeId, usize> = AHashMap::default();

        for (h, he) in mesh.half_edges.iter() {
            if !mesh.vertices.contains_key(he.vertex) {
                self.flag(h, Invariant::DanglingReference, "origin vertex missing")?;
            }
            if let Some(e) = he.edge {
                if !mesh.edges.contains_key(e) {
                    self.flag(h, Invariant::DanglingReference, "edge missing")?;
                }
            }
            if let Some(f) = he.face {
                if !mesh.faces.contains_key(f) {
                    self.flag(h, Invariant::DanglingReference, "face missing")?;
                }
            }

            // --- next ---
            match he.next {
                Some(n) if !mesh.half_edges.contains_key(n) => {
                    self.flag(h, Invariant::DanglingReference, "next missing")?;
                }
                Some(n) => *predecessors.entry(n).or_default() += 1,
                None if he.face.is_some() => {
                    self.flag(h, Invariant::FaceLoop, "face half-edge without next")?;
                }
                None if !surface => {
                    self.flag(h, Invariant::HoleClosure, "hole half-edge without next")?;
                }
                None => {}
            }

            // --- pair ---
            match he.pair {
                None if !surface => {
                    self.flag(h, Invariant::PairSymmetry, "unpaired")?;
                }
                None => {}
                Some(p) => match mesh.half_edges.get(p) {
                    None => self.flag(h, Invariant::DanglingReference, "pair missing")?,
                    Some(ph) => {
                        if ph.pair != Some(h) {
                            self.flag(h, Invariant::PairSymmetry, "pair does not point back")?;
                        }
                        if ph.edge != he.edge {
                            self.flag(h, Invariant::PairSymmetry, "pair has a different edge")?;
                        }
                        if he.face.is_some() && mesh.target(h).is_some_and(|t| t != ph.vertex) {
                            self.flag(h, Invariant::PairSymmetry, "pair is not reversed")?;
                        }
                        if he.face.is_none() {
                            let next_origin = he
                                .next
                                .and_then(|n| mesh.half_edges.get(n))
                                .map(|n| n.vertex);
                            if next_origin.is_some_and(|v| v != ph.vertex) {
                                self.flag(h, Invariant::HoleClosure, "pair.vertex != next.vertex")?;
                            }
                        }
                    }
                },
            }
            if he.pair.is_some() && he.edge.is_none() {
                self.flag(h, Invariant::EdgeLink, "paired half-edge without edge")?;
            }
        }

        for (h, he) in mesh.half_edges.iter() {
            let count = predecessors.get(&h).copied().unwrap_or(0);
            let open_hole = surface && he.face.is_none();
            if count > 1 || (count == 0 && !open_hole) {
                self.flag(h, Invariant::NextPrev, format!("{count} predecessors"))?;
            }
        }
        Ok(())
    }

    fn check_edges(&mut self) -> Result<(), Stop> {
        let mesh = self.mesh;
        for (e, edge) in mesh.edges.iter() {
            match mesh.half_edges.get(edge.half_edge) {
                None => self.flag(e, Invariant::DanglingReference, "half-edge missing")?,
                Some(he) if he.edge != Some(e) => {
                    self.flag(e, Invariant::EdgeLink, "half-edge names another edge")?;
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn check_faces(&mut self) -> Result<(), Stop> {
        let mesh = self.mesh;
        for (f, face) in mesh.faces.iter() {
            if !mesh.half_edges.contains_key(face.half_edge) {
                self.flag(f, Invariant::DanglingReference, "half-edge missing")?;
                continue;
            }
            let Some(lp) = mesh.loop_half_edges(face.half_edge) else {
                self.flag(f, Invariant::FaceLoop, "loop does not close")?;
                continue;
            };
            if lp.len() < 3 {
                self.flag(f, Invariant::FaceLoop, format!("order {}", lp.len()))?;
            }
            if let Some(h) = lp.iter().find(|&&h| mesh.half_edges[h].face != Some(f)) {
                self.flag(f, Invariant::FaceLoop, format!("loop member {h:?} names another face"))?;
            }
        }
        Ok(())
    }

    fn check_vertices(&mut self) -> Result<(), Stop> {
        let mesh = self.mesh;
        for (v, vx) in mesh.vertices.iter() {
            let Some(h) = vx.half_edge else {
                if !self.options.allow_surface {
                    self.flag(v, Invariant::IsolatedVertex, "no outgoing half-edge")?;
                }
                continue;
            };
            match mesh.half_edges.get(h) {
                None => self.flag(v, Invariant::DanglingReference, "half-edge missing")?,
                Some(he) if he.vertex != v => {
                    self.flag(v, Invariant::VertexStar, "half-edge does not leave the vertex")?;
                }
                Some(_) => {
                    if let Err(detail) = self.star_closes(v, h) {
                        self.flag(v, Invariant::VertexStar, detail)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn star_closes(&self, v: VertexId, start: HalfEdgeId) -> Result<(), &'static str> {
        let mesh = self.mesh;
        let mut cur = start;
        for _ in 0..mesh.loop_bound() {
            let Some(p) = mesh.half_edges.get(cur).and_then(|h| h.pair) else {
                return if self.options.allow_surface {
                    Ok(())
                } else {
                    Err("star hits an unpaired half-edge")
                };
            };
            let Some(n) = mesh.half_edges.get(p).and_then(|ph| ph.next) else {
                return if self.options.allow_surface {
                    Ok(())
                } else {
                    Err("star hits a half-edge without next")
                };
            };
            if mesh.half_edges.get(n).is_none_or(|nh| nh.vertex != v) {
                return Err("star leaves the vertex");
            }
            if n == start {
                return Ok(());
            }
            cur = n;
        }
        Err("star does not return to its start")
    }
}

/// Checks every entity against the half-edge invariants.
pub fn validate(mesh: &Mesh, options: &ValidateOptions) -> ValidationReport {
    let mut checker = Checker {
        mesh,
        options: *options,
        report: ValidationReport::default(),
    };
    let _ = checker.run();
    debug!(
        violations = checker.report.violations.len(),
        surface = options.allow_surface,
        "validated mesh"
    );
    checker.report
}

/// True for a closed, fully paired mesh.
pub fn is_valid_mesh(mesh: &Mesh) -> bool {
    validate(mesh, &ValidateOptions { force: false, ..ValidateOptions::mesh() }).is_valid()
}

/// True for a mesh that may have open boundaries.
pub fn is_valid_surface(mesh: &Mesh) -> bool {
    validate(mesh, &ValidateOptions { force: false, ..ValidateOptions::surface() }).is_valid()
}
