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

use ahash::{AHashMap, AHashSet};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::{
    error::{KernelError, KernelResult},
    geometry::{AabbTree, Plane, PlaneSide, Point3, Vector3, util::EPS},
    mesh::{EdgeId, FaceId, HalfEdgeId, Mesh, Selection, VertexId},
    operations::{MeshOperator, triangulation::Delaunay},
};

/// How the opening left by a cut is closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CapMode {
    /// Leave the cut open.
    None,
    /// One polygon per cut loop.
    #[default]
    Simple,
    /// Constrained Delaunay triangles of each cut loop, in the plane.
    Constrained,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceOptions {
    pub cap: CapMode,
    /// Label cap faces `cap:<plane index>`.
    pub label_caps: bool,
}

impl Default for SliceOptions {
    fn default() -> Self {
        Self {
            cap: CapMode::Simple,
            label_caps: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SliceReport {
    pub planes_applied: usize,
    pub split_edges: usize,
    pub split_faces: usize,
    pub removed_faces: usize,
    pub cap_faces: Vec<FaceId>,
}

impl SliceReport {
    fn absorb(&mut self, other: SliceReport) {
        self.planes_applied += other.planes_applied;
        self.split_edges += other.split_edges;
        self.split_faces += other.split_faces;
        self.removed_faces += other.removed_faces;
        self.cap_faces.extend(other.cap_faces);
    }
}

/// Cuts a mesh with one plane and removes everything in front of it (on the
/// side its normal points to).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slicer {
    pub plane: Plane,
    pub options: SliceOptions,
}

impl Slicer {
    pub fn new(plane: Plane) -> Self {
        Self {
            plane,
            options: SliceOptions::default(),
        }
    }

    /// Slicer for the plane through `origin` with normal `normal`.
    pub fn from_origin_normal(origin: Point3, normal: Vector3) -> KernelResult<Self> {
        let plane = Plane::new(&origin, &normal).ok_or(KernelError::DegeneratePlane)?;
        Ok(Self::new(plane))
    }

    pub fn with_options(mut self, options: SliceOptions) -> Self {
        self.options = options;
        self
    }

    pub fn slice(&self, mesh: &mut Mesh) -> SliceReport {
        slice_with_plane(mesh, &self.plane, &self.options, 0, None)
    }

    /// Like [`Slicer::slice`], but only selected faces are cut or removed.
    pub fn slice_selected(&self, mesh: &mut Mesh, selection: &Selection) -> SliceReport {
        slice_with_plane(mesh, &self.plane, &self.options, 0, Some(selection))
    }

    /// Both halves of `mesh`: `(back, front)`. Each is sliced from its own
    /// copy, so with capping enabled both come out closed.
    pub fn split(&self, mesh: &Mesh) -> (Mesh, Mesh) {
        let mut back = mesh.clone();
        let mut front = mesh.clone();
        slice_with_plane(&mut back, &self.plane, &self.options, 0, None);
        slice_with_plane(&mut front, &self.plane.flipped(), &self.options, 0, None);
        (back, front)
    }
}

impl MeshOperator for Slicer {
    type Output = SliceReport;

    fn apply(&self, mesh: &mut Mesh) -> KernelResult<SliceReport> {
        Ok(self.slice(mesh))
    }

    fn apply_selection(&self, mesh: &mut Mesh, selection: &Selection) -> KernelResult<SliceReport> {
        Ok(self.slice_selected(mesh, selection))
    }
}

/// Applies several planes one after the other, nearest to `center` first.
/// Planes that repeat an already applied one are skipped. Cap faces are
/// labelled with the index of their plane in `planes`.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSlicer {
    pub planes: Vec<Plane>,
    pub center: Point3,
    pub options: SliceOptions,
}

impl MultiSlicer {
    pub fn new(planes: Vec<Plane>, center: Point3) -> Self {
        Self {
            planes,
            center,
            options: SliceOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SliceOptions) -> Self {
        self.options = options;
        self
    }

    /// Plane indices in application order, duplicates removed.
    pub fn order(&self) -> Vec<usize> {
        let mut idx: Vec<usize> = (0..self.planes.len()).collect();
        idx.sort_by(|&a, &b| {
            let da = self.planes[a].signed_distance(&self.center).abs();
            let db = self.planes[b].signed_distance(&self.center).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut kept: Vec<usize> = Vec::with_capacity(idx.len());
        for i in idx {
            if kept.iter().any(|&k| self.planes[k].approx_eq(&self.planes[i], EPS)) {
                debug!(plane = i, "skipping duplicate plane");
                continue;
            }
            kept.push(i);
        }
        kept
    }

    fn run(&self, mesh: &mut Mesh, selection: Option<&Selection>) -> SliceReport {
        let mut report = SliceReport::default();
        let mut live = selection.cloned();
        for i in self.order() {
            if let Some(sel) = live.as_mut() {
                sel.retain_live(mesh);
            }
            let step = slice_with_plane(mesh, &self.planes[i], &self.options, i, live.as_ref());
            if let Some(sel) = live.as_mut() {
                sel.faces.extend(step.cap_faces.iter().copied());
            }
            report.absorb(step);
        }
        report
    }

    pub fn slice(&self, mesh: &mut Mesh) -> SliceReport {
        self.run(mesh, None)
    }
}

impl MeshOperator for MultiSlicer {
    type Output = SliceReport;

    fn apply(&self, mesh: &mut Mesh) -> KernelResult<SliceReport> {
        Ok(self.run(mesh, None))
    }

    fn apply_selection(&self, mesh: &mut Mesh, selection: &Selection) -> KernelResult<SliceReport> {
        Ok(self.run(mesh, Some(selection)))
    }
}

/// Label given to cap faces produced by plane `index`.
pub fn cap_label(index: usize) -> String {
    format!("cap:{index}")
}

fn slice_with_plane(
    mesh: &mut Mesh,
    plane: &Plane,
    options: &SliceOptions,
    plane_index: usize,
    restrict: Option<&Selection>,
) -> SliceReport {
    let mut report = SliceReport::default();

    let Some(bounds) = mesh.bounding_box() else {
        return report;
    };
    if !plane.intersects_aabb(&bounds, EPS) {
        debug!(plane_index, "plane misses the mesh");
        return report;
    }
    report.planes_applied = 1;

    // faces this cut may touch, grown with the halves split_face creates
    let mut scope: AHashSet<FaceId> = match restrict {
        Some(sel) => sel.selected_faces(mesh).into_iter().collect(),
        None => mesh.faces.keys().collect(),
    };

    // --- 1) broad phase ---
    let items = mesh
        .faces
        .keys()
        .filter(|f| scope.contains(f))
        .filter_map(|f| mesh.face_aabb(f).map(|b| (b, f)))
        .collect();
    let mut candidates: Vec<FaceId> = Vec::new();
    if let Some(tree) = AabbTree::build(items) {
        let mut hits = Vec::new();
        tree.query_with(&|b| plane.intersects_aabb(b, EPS), &mut hits);
        candidates.extend(hits.into_iter().copied());
    }
    candidates.sort();

    // --- 2) classification ---
    let mut sides: AHashMap<VertexId, PlaneSide> = mesh
        .vertices
        .iter()
        .map(|(v, vx)| (v, plane.classify(&vx.position, EPS)))
        .collect();

    // --- 3) split straddling edges ---
    let mut crossing: Vec<EdgeId> = Vec::new();
    let mut seen = AHashSet::new();
    for &f in &candidates {
        for h in mesh.face_half_edges(f) {
            let Some(e) = mesh.half_edges[h].edge else {
                continue;
            };
            if !seen.insert(e) {
                continue;
            }
            let Some((a, b)) = mesh.edge_vertices(e) else {
                continue;
            };
            if matches!(
                (side_of(&sides, a), side_of(&sides, b)),
                (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front)
            ) {
                crossing.push(e);
            }
        }
    }
    for e in crossing {
        let Some((a, b)) = mesh.edge_vertices(e) else {
            continue;
        };
        let (pa, pb) = (mesh.position(a), mesh.position(b));
        let Some(t) = plane.segment_parameter(&pa, &pb) else {
            continue;
        };
        if let Some(r) = mesh.split_edge(e, pa.lerp(&pb, t)) {
            sides.insert(r.vertex, PlaneSide::On);
            report.split_edges += 1;
        }
    }

    // --- 4) split faces with exactly two cut points ---
    for &f in &candidates {
        let vs = mesh.face_vertices(f);
        let on: SmallVec<[VertexId; 4]> = vs
            .iter()
            .copied()
            .filter(|v| side_of(&sides, *v) == PlaneSide::On)
            .collect();
        let has_front = vs.iter().any(|v| side_of(&sides, *v) == PlaneSide::Front);
        let has_back = vs.iter().any(|v| side_of(&sides, *v) == PlaneSide::Back);
        if on.len() != 2 || !has_front || !has_back {
            continue;
        }
        if let Some(r) = mesh.split_face(f, on[0], on[1]) {
            scope.insert(r.face);
            report.split_faces += 1;
        }
    }

    // --- 5) remove front material ---
    let doomed: Vec<FaceId> = mesh
        .faces
        .keys()
        .filter(|f| scope.contains(f))
        .filter(|&f| {
            let vs = mesh.face_vertices(f);
            vs.iter().any(|v| side_of(&sides, *v) == PlaneSide::Front)
                && !vs.iter().any(|v| side_of(&sides, *v) == PlaneSide::Back)
        })
        .collect();
    for f in doomed {
        if mesh.delete_face(f) {
            report.removed_faces += 1;
        }
    }
    mesh.clean_unused();
    let collapsed = mesh.remove_degenerate_edges(EPS);

    // --- 6) close the cut ---
    let on_plane = |m: &Mesh, lp: &[HalfEdgeId]| {
        lp.iter()
            .all(|&h| plane.classify(&m.position(m.origin(h)), EPS) == PlaneSide::On)
    };
    let caps = match options.cap {
        CapMode::None => Vec::new(),
        CapMode::Simple => mesh.cap_holes_where(on_plane),
        CapMode::Constrained => {
            let polygons = mesh.cap_holes_where(on_plane);
            let mut tris = Vec::with_capacity(polygons.len());
            for f in polygons {
                tris.extend(triangulate_cap(mesh, plane, f));
            }
            tris
        }
    };
    if options.label_caps {
        for &f in &caps {
            if let Some(face) = mesh.face_mut(f) {
                face.label = Some(cap_label(plane_index));
            }
        }
    }
    report.cap_faces = caps;

    info!(
        plane_index,
        split_edges = report.split_edges,
        split_faces = report.split_faces,
        removed_faces = report.removed_faces,
        collapsed,
        caps = report.cap_faces.len(),
        "sliced mesh"
    );
    report
}

fn side_of(sides: &AHashMap<VertexId, PlaneSide>, v: VertexId) -> PlaneSide {
    sides.get(&v).copied().unwrap_or(PlaneSide::On)
}

/// Splits the planar cap polygon `f` into the triangles of a constrained
/// Delaunay triangulation of its outline, projected into the plane. The
/// polygon is left whole when its outline repeats a vertex or does not
/// triangulate cleanly.
fn triangulate_cap(mesh: &mut Mesh, plane: &Plane, f: FaceId) -> Vec<FaceId> {
    let vs = mesh.face_vertices(f);
    let n = vs.len();
    let distinct: AHashSet<VertexId> = vs.iter().copied().collect();
    if n <= 3 || distinct.len() != n {
        return vec![f];
    }

    let basis = plane.basis();
    let mut outline: Vec<_> = vs
        .iter()
        .map(|&v| plane.to_local_2d(&mesh.position(v), &basis))
        .collect();
    // the triangulator wants a counter-clockwise outline
    let reversed = crate::geometry::util::polygon_area2(&outline) < 0.0;
    if reversed {
        outline.reverse();
    }
    let tris = Delaunay::triangulate_polygon(&outline);
    if tris.len() != n - 2 {
        debug!(corners = n, triangles = tris.len(), "cap kept as polygon");
        return vec![f];
    }

    let corner = |i: usize| if reversed { vs[n - 1 - i] } else { vs[i] };
    let mut diagonals: Vec<(VertexId, VertexId)> = Vec::new();
    let mut seen = AHashSet::new();
    for t in &tris {
        for k in 0..3 {
            let (i, j) = (t[k], t[(k + 1) % 3]);
            let outline_side = (i + 1) % n == j || (j + 1) % n == i;
            if !outline_side && seen.insert((i.min(j), i.max(j))) {
                diagonals.push((corner(i), corner(j)));
            }
        }
    }

    let mut pieces = vec![f];
    for (a, b) in diagonals {
        let host = pieces.iter().copied().find(|&p| {
            let pv = mesh.face_vertices(p);
            pv.contains(&a) && pv.contains(&b)
        });
        if let Some(r) = host.and_then(|p| mesh.split_face(p, a, b)) {
            pieces.push(r.face);
        }
    }
    pieces
}
