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

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::{AHashMap, AHashSet};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::{
    error::{KernelError, KernelResult},
    geometry::{
        Vector3,
        util::{EPS, triangle_area, triangle_normal},
    },
    mesh::{HalfEdgeId, Mesh, Selection, VertexId},
    operations::MeshOperator,
};

/// Parameters of [`Simplifier`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplifyOptions {
    /// Target vertex count. If `None`, `ratio` of the current count is used.
    pub goal: Option<usize>,
    /// Fraction of vertices to keep when no explicit goal is set. Default: 0.9
    pub ratio: f64,
    /// Weight of the boundary bending term. Default: 1.0
    pub boundary_weight: f64,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            goal: None,
            ratio: 0.9,
            boundary_weight: 1.0,
        }
    }
}

impl SimplifyOptions {
    #[must_use]
    pub fn with_goal(goal: usize) -> Self {
        Self {
            goal: Some(goal),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_ratio(ratio: f64) -> Self {
        Self {
            ratio: ratio.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    fn resolve_goal(&self, count: usize) -> usize {
        self.goal
            .unwrap_or_else(|| ((count as f64) * self.ratio).floor() as usize)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimplifyReport {
    pub vertices_before: usize,
    pub vertices_after: usize,
    pub collapses: usize,
    /// Popped candidates whose collapse turned out invalid or outdated.
    pub rejected: usize,
}

/// Greedy decimation: repeatedly merges the vertex with the lowest
/// `cost * importance` into the neighbour its cheapest outgoing half-edge
/// points to.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Simplifier {
    pub options: SimplifyOptions,
}

/// A collapse candidate in the priority queue.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    priority: f64,
    cost: f64,
    vertex: VertexId,
    half_edge: HalfEdgeId,
    version: u64,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed: the cheapest candidate sits on top of the max-heap
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.cost.total_cmp(&self.cost))
    }
}

/// Lazily invalidated queue: an entry is live only while its version matches
/// the vertex's current version.
struct CollapseQueue {
    heap: BinaryHeap<Candidate>,
    versions: AHashMap<VertexId, u64>,
    stale: usize,
}

impl CollapseQueue {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            versions: AHashMap::default(),
            stale: 0,
        }
    }

    fn is_live(&self, c: &Candidate) -> bool {
        self.versions.get(&c.vertex) == Some(&c.version)
    }

    fn push(&mut self, v: VertexId, best: Option<(f64, f64, HalfEdgeId)>) {
        let version = self.invalidate(v);
        if let Some((priority, cost, half_edge)) = best {
            self.heap.push(Candidate {
                priority,
                cost,
                vertex: v,
                half_edge,
                version,
            });
        }
    }

    /// Retires every queued entry of `v`; returns its new version.
    fn invalidate(&mut self, v: VertexId) -> u64 {
        let version = self.versions.entry(v).or_insert(0);
        if *version > 0 {
            self.stale += 1;
        }
        *version += 1;
        *version
    }

    fn pop(&mut self) -> Option<Candidate> {
        if self.stale > self.heap.len() / 2 {
            let versions = &self.versions;
            self.heap
                .retain(|c| versions.get(&c.vertex) == Some(&c.version));
            self.stale = 0;
        }
        while let Some(c) = self.heap.pop() {
            if self.is_live(&c) {
                return Some(c);
            }
            self.stale = self.stale.saturating_sub(1);
        }
        None
    }
}

impl Simplifier {
    pub fn new(options: SimplifyOptions) -> Self {
        Self { options }
    }

    pub fn simplify(&self, mesh: &mut Mesh) -> KernelResult<SimplifyReport> {
        self.run(mesh, None)
    }

    /// Like [`Simplifier::simplify`], but only selected vertices (and corners
    /// of selected faces) may be merged away.
    pub fn simplify_selected(
        &self,
        mesh: &mut Mesh,
        selection: &Selection,
    ) -> KernelResult<SimplifyReport> {
        self.run(mesh, Some(selection))
    }

    fn run(&self, mesh: &mut Mesh, selection: Option<&Selection>) -> KernelResult<SimplifyReport> {
        if mesh.number_of_faces() == 0 {
            return Err(KernelError::EmptyMesh);
        }
        mesh.triangulate_faces();

        let count = mesh.number_of_vertices();
        if count < 4 {
            return Err(KernelError::TooFewVertices { count });
        }
        let goal = self.options.resolve_goal(count);
        if goal < 4 {
            return Err(KernelError::InvalidGoal { goal, count });
        }
        let mut report = SimplifyReport {
            vertices_before: count,
            vertices_after: count,
            ..Default::default()
        };
        if goal >= count {
            return Ok(report);
        }

        let allowed: Option<AHashSet<VertexId>> = selection.map(|s| s.covered_vertices(mesh));
        let may_remove = |v: VertexId| allowed.as_ref().is_none_or(|a| a.contains(&v));

        info!(vertices = count, goal, "starting simplification");

        // --- seed ---
        let mut queue = CollapseQueue::new();
        for v in mesh.vertex_ids() {
            if may_remove(v) {
                let best = self.best_collapse(mesh, v)?;
                queue.push(v, best);
            }
        }

        // --- greedy loop ---
        while mesh.number_of_vertices() > goal {
            let Some(c) = queue.pop() else { break };
            if c.priority.is_infinite() {
                debug!("only invalid collapses left");
                break;
            }

            // re-verify against the current mesh
            let current = self.best_collapse(mesh, c.vertex)?;
            match current {
                Some((p, _, h))
                    if h == c.half_edge && (p - c.priority).abs() <= f64::EPSILON => {}
                other => {
                    report.rejected += 1;
                    queue.push(c.vertex, other);
                    continue;
                }
            }

            let mut affected: SmallVec<[VertexId; 16]> =
                mesh.vertex_neighbors(c.vertex).into_iter().collect();
            let Some(survivor) = mesh.collapse_half_edge(c.half_edge) else {
                report.rejected += 1;
                queue.invalidate(c.vertex);
                continue;
            };
            report.collapses += 1;
            queue.invalidate(c.vertex);

            affected.extend(mesh.vertex_neighbors(survivor));
            affected.push(survivor);
            affected.sort();
            affected.dedup();
            for w in affected {
                if mesh.contains_vertex(w) && may_remove(w) {
                    let best = self.best_collapse(mesh, w)?;
                    queue.push(w, best);
                }
            }
        }

        report.vertices_after = mesh.number_of_vertices();
        info!(
            before = report.vertices_before,
            after = report.vertices_after,
            collapses = report.collapses,
            rejected = report.rejected,
            "simplification finished"
        );
        Ok(report)
    }

    /// `(priority, cost, half_edge)` of the cheapest outgoing collapse of
    /// `v`; `None` for a vertex without outgoing half-edges.
    fn best_collapse(
        &self,
        mesh: &Mesh,
        v: VertexId,
    ) -> KernelResult<Option<(f64, f64, HalfEdgeId)>> {
        let star = mesh.vertex_star(v);
        if star.is_empty() {
            return Ok(None);
        }
        let importance = visual_importance(mesh, v)?;
        let best = star
            .iter()
            .map(|&h| (collapse_cost(mesh, h, self.options.boundary_weight), h))
            .min_by(|a, b| a.0.total_cmp(&b.0));
        Ok(best.map(|(cost, h)| {
            let priority = if cost.is_infinite() {
                f64::INFINITY
            } else {
                cost * importance
            };
            (priority, cost, h)
        }))
    }
}

impl MeshOperator for Simplifier {
    type Output = SimplifyReport;

    fn apply(&self, mesh: &mut Mesh) -> KernelResult<SimplifyReport> {
        self.simplify(mesh)
    }

    fn apply_selection(
        &self,
        mesh: &mut Mesh,
        selection: &Selection,
    ) -> KernelResult<SimplifyReport> {
        self.simplify_selected(mesh, selection)
    }
}

/// `1 - |area-weighted mean normal|` of the faces around `v`: 0 on flat
/// regions, growing towards 1 at sharp features.
pub fn visual_importance(mesh: &Mesh, v: VertexId) -> KernelResult<f64> {
    let mut sum = Vector3::new(0.0, 0.0, 0.0);
    let mut area = 0.0;
    for f in mesh.vertex_faces(v) {
        let a = mesh.face_area(f);
        sum = sum + mesh.face_normal(f) * a;
        area += a;
    }
    if area <= f64::MIN_POSITIVE {
        return Err(KernelError::UnresolvableTopology { vertex: v });
    }
    Ok((1.0 - sum.norm() / area).clamp(0.0, 1.0))
}

/// Surface deviation caused by merging the origin of `he` into its target.
/// Infinite for collapses that would break the mesh: non-manifold results,
/// flipped or degenerate triangles, or boundary vertices pulled inward.
pub fn collapse_cost(mesh: &Mesh, he: HalfEdgeId, boundary_weight: f64) -> f64 {
    let Some(h) = mesh.half_edge(he) else {
        return f64::INFINITY;
    };
    let u = h.vertex;
    let (Some(v), Some(p)) = (mesh.target(he), h.pair) else {
        return f64::INFINITY;
    };
    let f1 = h.face;
    let f2 = mesh.half_edge(p).and_then(|ph| ph.face);
    if f1.is_none() && f2.is_none() {
        return f64::INFINITY;
    }
    let on_boundary_edge = f1.is_none() || f2.is_none();
    if !on_boundary_edge && mesh.is_boundary_vertex(u) {
        return f64::INFINITY;
    }

    // --- link condition ---
    let apexes: SmallVec<[VertexId; 2]> = [f1, f2]
        .into_iter()
        .flatten()
        .filter_map(|f| {
            mesh.face_vertices(f)
                .into_iter()
                .find(|&w| w != u && w != v)
        })
        .collect();
    let nu = mesh.vertex_neighbors(u);
    let nv = mesh.vertex_neighbors(v);
    let common = nu.iter().filter(|&w| nv.contains(w)).count();
    if common != apexes.len() {
        return f64::INFINITY;
    }
    if !on_boundary_edge && apexes.iter().any(|&w| mesh.vertex_degree(w) <= 3) {
        return f64::INFINITY;
    }

    // --- surface deviation of the faces that move ---
    let pv = mesh.position(v);
    let mut cost = 0.0;
    for f in mesh.vertex_faces(u) {
        if Some(f) == f1 || Some(f) == f2 {
            continue;
        }
        let vs = mesh.face_vertices(f);
        if vs.len() != 3 {
            continue;
        }
        let before: SmallVec<[_; 3]> = vs.iter().map(|&w| mesh.position(w)).collect();
        let after: SmallVec<[_; 3]> = vs
            .iter()
            .map(|&w| if w == u { pv } else { mesh.position(w) })
            .collect();
        let a0 = triangle_area(&before[0], &before[1], &before[2]);
        let a1 = triangle_area(&after[0], &after[1], &after[2]);
        if a1 < EPS * EPS {
            return f64::INFINITY;
        }
        let n0 = triangle_normal(&before[0], &before[1], &before[2]).normalized();
        let n1 = triangle_normal(&after[0], &after[1], &after[2]).normalized();
        let dot = n0.dot(&n1);
        if dot <= 0.0 {
            return f64::INFINITY;
        }
        cost += 0.5 * (a0 + a1) * (1.0 - dot);
    }

    if on_boundary_edge {
        match boundary_bend(mesh, u, v) {
            Some(bend) => cost += mesh.position(u).distance_to(&pv) * bend * boundary_weight,
            None => return f64::INFINITY,
        }
    }
    cost
}

/// `1 - alignment` of the two boundary edges through `u` when collapsing
/// along `u -> v`. `None` unless `u` has exactly two boundary edges.
fn boundary_bend(mesh: &Mesh, u: VertexId, v: VertexId) -> Option<f64> {
    let others: SmallVec<[VertexId; 2]> = mesh
        .vertex_star(u)
        .into_iter()
        .filter(|&h| mesh.is_boundary_half_edge(h))
        .filter_map(|h| mesh.target(h))
        .collect();
    if others.len() != 2 || !others.contains(&v) {
        return None;
    }
    let w = if others[0] == v { others[1] } else { others[0] };
    let pu = mesh.position(u);
    let incoming = (pu - mesh.position(w)).try_normalized(f64::EPSILON)?;
    let outgoing = (mesh.position(v) - pu).try_normalized(f64::EPSILON)?;
    Some(1.0 - incoming.dot(&outgoing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_heap_pops_cheapest_first() {
        let mut vs: SlotMap<VertexId, ()> = SlotMap::with_key();
        let mut hs: SlotMap<HalfEdgeId, ()> = SlotMap::with_key();
        let mut queue = CollapseQueue::new();
        let (a, b, c) = (vs.insert(()), vs.insert(()), vs.insert(()));
        let h = hs.insert(());

        queue.push(a, Some((3.0, 3.0, h)));
        queue.push(b, Some((1.0, 5.0, h)));
        queue.push(c, Some((1.0, 2.0, h)));
        // re-queue a cheaper entry for `a`; the old one must never surface
        queue.push(a, Some((0.5, 0.5, h)));

        let order: Vec<VertexId> = std::iter::from_fn(|| queue.pop()).map(|c| c.vertex).collect();
        assert_eq!(order, vec![a, c, b]);
    }

    #[test]
    fn test_infinite_sorts_last() {
        let mut vs: SlotMap<VertexId, ()> = SlotMap::with_key();
        let mut hs: SlotMap<HalfEdgeId, ()> = SlotMap::with_key();
        let h = hs.insert(());
        let mut queue = CollapseQueue::new();
        let (a, b) = (vs.insert(()), vs.insert(()));
        queue.push(a, Some((f64::INFINITY, f64::INFINITY, h)));
        queue.push(b, Some((7.0, 1.0, h)));
        assert_eq!(queue.pop().map(|c| c.vertex), Some(b));
        assert_eq!(queue.pop().map(|c| c.vertex), Some(a));
    }
}
