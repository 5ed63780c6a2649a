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
use num_traits::Zero;
use smallvec::SmallVec;

use crate::{
    geometry::{Point3, Vector3, util::EPS},
    mesh::{
        basic_types::*,
        edge::Edge,
        face::Face,
        keys::{EdgeId, FaceId, HalfEdgeId, VertexId},
        selection::Selection,
    },
};

impl Mesh {
    // ----- edge split ------------------------------------------------------

    /// Inserts a vertex at `point` in the middle of `e`.
    ///
    /// With `e = (h: u -> v, p: v -> u)` this leaves `h: u -> w` and
    /// `p: v -> w` in place, adds `w -> v` after `h` and `w -> u` after `p`,
    /// and re-pairs the four so that `e` spans `u-w` and the new edge spans
    /// `w-v`. Both sides keep their faces (or holes).
    pub fn split_edge(&mut self, e: EdgeId, point: Point3) -> Option<SplitEdgeResult> {
        let h = self.edges.get(e)?.half_edge;
        let p = self.half_edges.get(h)?.pair;

        let w = self.add_vertex(point);

        let h2 = self.add_half_edge(w);
        self.half_edges[h2].next = self.half_edges[h].next;
        self.half_edges[h2].face = self.half_edges[h].face;
        self.half_edges[h].next = Some(h2);

        let e2 = self.edges.insert(Edge {
            half_edge: h2,
            label: self.edges[e].label.clone(),
        });
        self.half_edges[h2].edge = Some(e2);

        if let Some(p) = p {
            let p2 = self.add_half_edge(w);
            self.half_edges[p2].next = self.half_edges[p].next;
            self.half_edges[p2].face = self.half_edges[p].face;
            self.half_edges[p].next = Some(p2);

            self.set_pair(h, p2);
            self.set_pair(h2, p);
            self.half_edges[p2].edge = Some(e);
            self.half_edges[p].edge = Some(e2);
        }

        self.vertices[w].half_edge = Some(h2);
        for f in [self.half_edges[h].face, p.and_then(|p| self.half_edges[p].face)]
            .into_iter()
            .flatten()
        {
            self.faces[f].sorted = false;
        }

        Some(SplitEdgeResult {
            vertex: w,
            edge: e2,
        })
    }

    /// Splits `e` at parameter `t` measured from its representative
    /// half-edge's origin.
    pub fn split_edge_at(&mut self, e: EdgeId, t: f64) -> Option<SplitEdgeResult> {
        let (a, b) = self.edge_vertices(e)?;
        let point = self.position(a).lerp(&self.position(b), t);
        self.split_edge(e, point)
    }

    /// Splits every edge of the mesh at its midpoint. Returns the new vertices.
    pub fn split_edges_midpoint(&mut self) -> Vec<VertexId> {
        let mut out = Vec::with_capacity(self.number_of_edges());
        for e in self.edge_ids() {
            if let Some(r) = self.split_edge_at(e, 0.5) {
                out.push(r.vertex);
            }
        }
        out
    }

    // ----- face split ------------------------------------------------------

    /// Cuts `f` along a new edge between `va` and `vb`.
    ///
    /// `f` keeps the part running from `va` to `vb`; the part from `vb` back
    /// to `va` becomes the returned face. `None` (mesh untouched) when either
    /// vertex is not on `f` or the two are adjacent along its boundary.
    pub fn split_face(&mut self, f: FaceId, va: VertexId, vb: VertexId) -> Option<SplitFaceResult> {
        if va == vb {
            return None;
        }
        let lp = self.loop_half_edges(self.faces.get(f)?.half_edge)?;
        let n = lp.len();
        let ia = lp.iter().position(|&h| self.half_edges[h].vertex == va)?;
        let ib = lp.iter().position(|&h| self.half_edges[h].vertex == vb)?;
        if (ia + 1) % n == ib || (ib + 1) % n == ia {
            return None;
        }

        let he_a = lp[ia];
        let he_b = lp[ib];
        let prev_a = lp[(ia + n - 1) % n];
        let prev_b = lp[(ib + n - 1) % n];

        let h_ab = self.add_half_edge(va);
        let h_ba = self.add_half_edge(vb);
        self.set_pair(h_ab, h_ba);

        self.half_edges[prev_a].next = Some(h_ab);
        self.half_edges[h_ab].next = Some(he_b);
        self.half_edges[prev_b].next = Some(h_ba);
        self.half_edges[h_ba].next = Some(he_a);

        self.half_edges[h_ba].face = Some(f);
        self.faces[f].half_edge = he_a;
        self.faces[f].sorted = false;

        let new_face = self.faces.insert(Face {
            half_edge: h_ab,
            sorted: false,
            label: self.faces[f].label.clone(),
        });
        self.assign_face_loop(h_ab, Some(new_face));
        let edge = self.add_edge(h_ab);

        Some(SplitFaceResult {
            face: new_face,
            edge,
        })
    }

    // ----- fans ------------------------------------------------------------

    /// Inserts a vertex at `point` and fans one triangle per boundary edge of
    /// `f` to it.
    ///
    /// `None` when `f` is degenerate or `point` lies on a hinge plane (the
    /// plane through a boundary edge containing the face normal), which would
    /// produce a flat fan triangle.
    pub fn tri_split_face(&mut self, f: FaceId, point: Point3) -> Option<TriSplitResult> {
        let lp = self.loop_half_edges(self.faces.get(f)?.half_edge)?;
        if lp.len() < 3 {
            return None;
        }
        let normal = self.face_normal(f);
        if normal.is_zero() {
            return None;
        }
        for &h in &lp {
            let a = self.position(self.origin(h));
            let b = self.position(self.target(h)?);
            let hinge = (b - a).cross(&normal).try_normalized(EPS)?;
            if hinge.dot(&(point - a)).abs() < EPS {
                return None;
            }
        }

        let c = self.add_vertex(point);
        let (faces, spokes) = self.fan_loop(f, &lp, c, 1);
        let k = spokes.len();
        for j in 0..k {
            let (spoke_in, _) = spokes[j];
            let (_, spoke_out_next) = spokes[(j + 1) % k];
            self.set_pair(spoke_in, spoke_out_next);
            self.add_edge(spoke_in);
        }

        Some(TriSplitResult { vertex: c, faces })
    }

    /// Rebuilds face `f`, whose loop is `lp`, as a fan around `center`: every
    /// run of `group` consecutive loop half-edges gets a face closed by two
    /// new spokes. The spokes are left unpaired and edgeless. Returns the fan
    /// faces (the first reuses `f`) and the `(into center, out of center)`
    /// spokes per run.
    fn fan_loop(
        &mut self,
        f: FaceId,
        lp: &[HalfEdgeId],
        center: VertexId,
        group: usize,
    ) -> (SmallVec<[FaceId; 8]>, SmallVec<[(HalfEdgeId, HalfEdgeId); 8]>) {
        let runs = lp.len() / group;
        let label = self.faces[f].label.clone();
        let mut faces = SmallVec::new();
        let mut spokes = SmallVec::new();

        for j in 0..runs {
            let first = lp[j * group];
            let last = lp[j * group + group - 1];
            let start = self.half_edges[first].vertex;
            let end = self.half_edges[lp[((j + 1) * group) % lp.len()]].vertex;

            let spoke_in = self.add_half_edge(end);
            let spoke_out = self.add_half_edge(center);
            self.half_edges[last].next = Some(spoke_in);
            self.half_edges[spoke_in].next = Some(spoke_out);
            self.half_edges[spoke_out].next = Some(first);
            debug_assert_eq!(start, self.half_edges[first].vertex);

            let face = if j == 0 {
                self.faces[f].half_edge = first;
                self.faces[f].sorted = false;
                f
            } else {
                self.faces.insert(Face {
                    half_edge: first,
                    sorted: false,
                    label: label.clone(),
                })
            };
            self.assign_face_loop(first, Some(face));
            faces.push(face);
            spokes.push((spoke_in, spoke_out));
        }
        (faces, spokes)
    }

    /// Quad-splits every face. See [`Mesh::quad_split_selected`].
    pub fn quad_split_faces(&mut self) -> QuadSplitResult {
        let targets = self.face_ids();
        self.quad_split(targets, false)
    }

    /// Splits every boundary edge of the selected faces at its midpoint, then
    /// replaces each face of order `n` by `n` quads around a new vertex at
    /// the face center. Edges shared by two selected faces are split once.
    pub fn quad_split_selected(&mut self, selection: &Selection) -> QuadSplitResult {
        let targets = selection.selected_faces(self);
        self.quad_split(targets, false)
    }

    /// Like [`Mesh::quad_split_faces`], but triangles are fanned into six
    /// triangles around their center instead of three quads.
    pub fn hybrid_split_faces(&mut self) -> QuadSplitResult {
        let targets = self.face_ids();
        self.quad_split(targets, true)
    }

    pub fn hybrid_split_selected(&mut self, selection: &Selection) -> QuadSplitResult {
        let targets = selection.selected_faces(self);
        self.quad_split(targets, true)
    }

    fn quad_split(&mut self, targets: Vec<FaceId>, hybrid: bool) -> QuadSplitResult {
        let mut result = QuadSplitResult::default();

        // --- 1) snapshot corners and centers before any edge is split ---
        let mut plan: Vec<(FaceId, AHashSet<VertexId>, Point3)> = Vec::with_capacity(targets.len());
        let mut edges: Vec<EdgeId> = Vec::new();
        let mut seen_edges = AHashSet::new();
        for f in targets {
            if !self.faces.contains_key(f) {
                continue;
            }
            let hes = self.face_half_edges(f);
            if hes.len() < 3 {
                continue;
            }
            for &h in &hes {
                let e = match self.half_edges[h].edge {
                    Some(e) => e,
                    None => self.add_edge(h),
                };
                if seen_edges.insert(e) {
                    edges.push(e);
                }
            }
            let corners = hes.iter().map(|&h| self.half_edges[h].vertex).collect();
            plan.push((f, corners, self.face_center(f)));
        }

        // --- 2) mid-split every involved edge once ---
        for e in edges {
            if self.split_edge_at(e, 0.5).is_some() {
                result.split_edges += 1;
            }
        }

        // --- 3) fan each face from its center ---
        for (f, corners, center) in plan {
            let mut lp = self.face_half_edges(f);
            if lp.len() != 2 * corners.len() {
                continue;
            }
            // start the loop at a midpoint so every run is (mid -> corner -> mid)
            let Some(shift) = lp
                .iter()
                .position(|&h| !corners.contains(&self.half_edges[h].vertex))
            else {
                continue;
            };
            lp.rotate_left(shift);

            let c = self.add_vertex(center);
            let group = if hybrid && corners.len() == 3 { 1 } else { 2 };
            let (faces, _) = self.fan_loop(f, &lp, c, group);
            result.center_vertices.push(c);
            result.new_faces.extend(faces.into_iter().skip(1));
        }

        // --- 4) reconnect the spokes ---
        self.pair_half_edges();
        result
    }

    // ----- collapse --------------------------------------------------------

    /// Merges the two end vertices of `e` into their midpoint. Returns the
    /// surviving vertex.
    pub fn collapse_edge(&mut self, e: EdgeId) -> Option<VertexId> {
        let h = self.edges.get(e)?.half_edge;
        let (a, b) = self.edge_vertices(e)?;
        let mid = self.position(a).midpoint(&self.position(b));
        self.collapse_half_edge_to(h, mid)
    }

    /// Merges the origin of `he` into its target, which keeps its position.
    pub fn collapse_half_edge(&mut self, he: HalfEdgeId) -> Option<VertexId> {
        let t = self.target(he)?;
        let p = self.position(t);
        self.collapse_half_edge_to(he, p)
    }

    /// Removes the origin `u` of `he: u -> v`, moves `v` to `position` and
    /// repoints every half-edge that left `u`. Loops that shrink to two
    /// half-edges are fused away.
    pub fn collapse_half_edge_to(&mut self, he: HalfEdgeId, position: Point3) -> Option<VertexId> {
        let h = he;
        let u = self.half_edges.get(h)?.vertex;
        let v = self.target(h)?;
        if u == v {
            return None;
        }
        let p = self.half_edges[h].pair;

        // --- 1) gather everything before mutating ---
        let star_u = self.vertex_star(u);
        let next_h = self.half_edges[h].next;
        let prev_h = self.prev(h);
        if next_h.is_some() && prev_h.is_none() {
            return None;
        }
        let next_p = p.and_then(|p| self.half_edges[p].next);
        let prev_p = p.and_then(|p| self.prev(p));
        if next_p.is_some() && prev_p.is_none() {
            return None;
        }
        let e = self.half_edges[h].edge;

        // --- 2) repoint everything that left u ---
        for &s in &star_u {
            if s != h {
                self.half_edges[s].vertex = v;
            }
        }

        // --- 3) unlink h and p from their loops ---
        if let (Some(ph), Some(nh)) = (prev_h, next_h) {
            self.half_edges[ph].next = Some(nh);
        }
        if let (Some(pp), Some(np)) = (prev_p, next_p) {
            self.half_edges[pp].next = Some(np);
        }
        for (x, nx) in [(Some(h), next_h), (p, next_p)] {
            let Some(x) = x else { continue };
            if let Some(f) = self.half_edges[x].face {
                if self.faces[f].half_edge == x {
                    if let Some(nx) = nx {
                        self.faces[f].half_edge = nx;
                    }
                }
                self.faces[f].sorted = false;
            }
        }

        // --- 4) remove the collapsed edge and vertex ---
        self.half_edges.remove(h);
        if let Some(p) = p {
            self.half_edges.remove(p);
        }
        if let Some(e) = e {
            self.edges.remove(e);
        }
        self.vertices.remove(u);
        self.invalidate_cache();
        self.vertices[v].position = position;
        let hint = next_h.or_else(|| star_u.iter().copied().find(|&s| s != h));
        self.reseat_vertex(v, hint);

        // --- 5) fuse the two-sided loops left behind ---
        for start in [next_h, next_p].into_iter().flatten() {
            if self.half_edges.contains_key(start) {
                if let Some(lp) = self.loop_half_edges(start) {
                    if lp.len() == 2 {
                        self.fuse_two_gon(lp[0], lp[1]);
                    }
                }
            }
        }

        if self.vertices.contains_key(v) {
            Some(v)
        } else {
            None
        }
    }

    /// Removes the two-sided loop `a: x -> y`, `b: y -> x` (and its face),
    /// pairing the half-edges across from `a` and `b` with each other.
    fn fuse_two_gon(&mut self, a: HalfEdgeId, b: HalfEdgeId) {
        let x = self.half_edges[a].vertex;
        let y = self.half_edges[b].vertex;
        let face = self.half_edges[a].face;
        let (ap, bp) = (self.half_edges[a].pair, self.half_edges[b].pair);
        // ap ends at x and bp ends at y, so their successors leave them
        let after_ap = ap.and_then(|h| self.half_edges[h].next);
        let after_bp = bp.and_then(|h| self.half_edges[h].next);
        let (ea, eb) = (self.half_edges[a].edge, self.half_edges[b].edge);

        match (ap, bp) {
            (Some(ap), Some(bp)) if ap != b => {
                self.set_pair(ap, bp);
                self.half_edges[bp].edge = ea;
                if let Some(ea) = ea {
                    let rep = if self.half_edges[ap].face.is_some() { ap } else {
                        bp
                    };
                    self.edges[ea].half_edge = rep;
                }
                if eb != ea {
                    if let Some(eb) = eb {
                        self.edges.remove(eb);
                    }
                }
            }
            (Some(ap), None) => {
                self.half_edges[ap].pair = None;
                if let Some(ea) = ea {
                    self.edges[ea].half_edge = ap;
                }
                if let Some(eb) = eb.filter(|&eb| Some(eb) != ea) {
                    self.edges.remove(eb);
                }
            }
            (None, Some(bp)) => {
                self.half_edges[bp].pair = None;
                if let Some(eb) = eb {
                    self.edges[eb].half_edge = bp;
                }
                if let Some(ea) = ea.filter(|&ea| Some(ea) != eb) {
                    self.edges.remove(ea);
                }
            }
            _ => {
                for e in [ea, eb].into_iter().flatten() {
                    self.edges.remove(e);
                }
            }
        }

        self.half_edges.remove(a);
        self.half_edges.remove(b);
        if let Some(f) = face {
            self.faces.remove(f);
        }
        self.reseat_vertex(x, bp.or(after_ap));
        self.reseat_vertex(y, ap.or(after_bp));
    }

    /// Makes sure `v.half_edge` is a live half-edge leaving `v`, trying
    /// `hint` first and then the neighbourhood of `hint`. A vertex with no
    /// outgoing half-edge found there is removed.
    pub(crate) fn reseat_vertex(&mut self, v: VertexId, hint: Option<HalfEdgeId>) {
        let Some(vx) = self.vertices.get(v) else {
            return;
        };
        let leaves_v = |h: HalfEdgeId| self.half_edges.get(h).is_some_and(|he| he.vertex == v);
        if vx.half_edge.is_some_and(leaves_v) {
            return;
        }
        let found = hint
            .filter(|&h| leaves_v(h))
            .or_else(|| hint.and_then(|h| self.nearby_half_edge_from(h, v)));
        match found {
            Some(h) => self.vertices[v].half_edge = Some(h),
            None => {
                self.vertices.remove(v);
                self.invalidate_cache();
            }
        }
    }

    /// A half-edge leaving `v` on the loop of `h`, or the twin of a spoke of
    /// the star around `h`'s origin.
    fn nearby_half_edge_from(&self, h: HalfEdgeId, v: VertexId) -> Option<HalfEdgeId> {
        let w = self.half_edges.get(h)?.vertex;
        let on_loop = self
            .loop_half_edges(h)
            .and_then(|lp| lp.into_iter().find(|&x| self.half_edges[x].vertex == v));
        if on_loop.is_some() {
            return on_loop;
        }
        self.walk_vertex_star(w)?.into_iter().find_map(|s| {
            let p = self.half_edges[s].pair?;
            (self.half_edges.get(p)?.vertex == v).then_some(p)
        })
    }

    // ----- deletion --------------------------------------------------------

    /// Turns the loop of `f` into a hole and removes `f`. Every edge and
    /// vertex stays; [`Mesh::clean_unused`] merges holes that now share an
    /// edge.
    pub fn delete_face(&mut self, f: FaceId) -> bool {
        if !self.faces.contains_key(f) {
            return false;
        }
        let lp = self.face_half_edges(f);
        for &h in &lp {
            self.half_edges[h].face = None;
        }
        self.faces.remove(f);
        true
    }

    /// Removes an edge whose two half-edges both bound holes, splicing the
    /// hole loops together.
    pub(crate) fn remove_hole_edge(&mut self, h: HalfEdgeId, p: HalfEdgeId) {
        let (a, b) = (self.prev(h), self.half_edges[h].next);
        let (c, d) = (self.prev(p), self.half_edges[p].next);
        let u = self.half_edges[h].vertex;
        let v = self.half_edges[p].vertex;

        let spike_at_v = b == Some(p);
        let spike_at_u = d == Some(h);
        match (spike_at_v, spike_at_u) {
            (true, true) => {}
            (true, false) => {
                if let (Some(a), Some(d)) = (a, d) {
                    self.half_edges[a].next = Some(d);
                }
            }
            (false, true) => {
                if let (Some(c), Some(b)) = (c, b) {
                    self.half_edges[c].next = Some(b);
                }
            }
            (false, false) => {
                if let (Some(a), Some(d)) = (a, d) {
                    self.half_edges[a].next = Some(d);
                }
                if let (Some(c), Some(b)) = (c, b) {
                    self.half_edges[c].next = Some(b);
                }
            }
        }

        let eh = self.half_edges[h].edge;
        let ep = self.half_edges[p].edge;
        for e in [eh, ep.filter(|&ep| Some(ep) != eh)].into_iter().flatten() {
            self.edges.remove(e);
        }
        self.half_edges.remove(h);
        self.half_edges.remove(p);
        self.reseat_vertex(u, d.filter(|_| !spike_at_u));
        self.reseat_vertex(v, b.filter(|_| !spike_at_v));
    }

    /// Removes the interior edge `e` and fuses its two faces into one, which
    /// is returned. `None` for boundary edges and for edges with the same face
    /// on both sides.
    pub fn delete_edge(&mut self, e: EdgeId) -> Option<FaceId> {
        let h = self.edges.get(e)?.half_edge;
        let p = self.half_edges[h].pair?;
        let f1 = self.half_edges[h].face?;
        let f2 = self.half_edges[p].face?;
        if f1 == f2 {
            return None;
        }
        let (ph, nh) = (self.prev(h)?, self.half_edges[h].next?);
        let (pp, np) = (self.prev(p)?, self.half_edges[p].next?);
        let u = self.half_edges[h].vertex;
        let v = self.half_edges[p].vertex;

        self.assign_face_loop(p, Some(f1));
        self.half_edges[ph].next = Some(np);
        self.half_edges[pp].next = Some(nh);
        self.faces[f1].half_edge = nh;
        self.faces[f1].sorted = false;

        self.faces.remove(f2);
        self.half_edges.remove(h);
        self.half_edges.remove(p);
        self.edges.remove(e);
        self.reseat_vertex(u, Some(np));
        self.reseat_vertex(v, Some(nh));
        Some(f1)
    }

    // ----- triangulation ---------------------------------------------------

    /// Splits `f` into triangles by ear clipping in the plane of its normal;
    /// falls back to a fan from the first vertex when no ear is found.
    /// Returns every resulting triangle.
    pub fn triangulate_face(&mut self, f: FaceId) -> SmallVec<[FaceId; 8]> {
        let mut out = SmallVec::new();
        if !self.faces.contains_key(f) {
            return out;
        }
        let normal = self.face_normal(f);
        let mut cur = f;
        loop {
            let vs = self.face_vertices(cur);
            if vs.len() <= 3 {
                out.push(cur);
                return out;
            }
            let ear = self.find_ear(&vs, &normal).unwrap_or(1);
            let n = vs.len();
            let (prev, next) = (vs[(ear + n - 1) % n], vs[(ear + 1) % n]);
            match self.split_face(cur, prev, next) {
                Some(r) => {
                    // `cur` keeps prev -> ear -> next, the remainder moved to r.face
                    out.push(cur);
                    cur = r.face;
                }
                None => {
                    out.push(cur);
                    return out;
                }
            }
        }
    }

    fn find_ear(&self, vs: &[VertexId], normal: &Vector3) -> Option<usize> {
        let n = vs.len();
        let ps: SmallVec<[Point3; 8]> = vs.iter().map(|&v| self.position(v)).collect();
        'candidates: for i in 0..n {
            let (a, b, c) = (ps[(i + n - 1) % n], ps[i], ps[(i + 1) % n]);
            let turn = (b - a).cross(&(c - b)).dot(normal);
            if turn <= EPS * EPS {
                continue;
            }
            for (j, q) in ps.iter().enumerate() {
                if j == i || j == (i + 1) % n || j == (i + n - 1) % n {
                    continue;
                }
                let inside = [(a, b), (b, c), (c, a)]
                    .iter()
                    .all(|(s, t)| (*t - *s).cross(&(*q - *s)).dot(normal) >= -EPS * EPS);
                if inside {
                    continue 'candidates;
                }
            }
            return Some(i);
        }
        None
    }

    /// Triangulates every face of order > 3. Returns the number of faces split.
    pub fn triangulate_faces(&mut self) -> usize {
        let mut count = 0;
        for f in self.face_ids() {
            if self.face_order(f) > 3 {
                self.triangulate_face(f);
                count += 1;
            }
        }
        count
    }

    // ----- cleanup ---------------------------------------------------------

    /// Collapses every edge shorter than `eps`. Returns the number collapsed.
    pub fn remove_degenerate_edges(&mut self, eps: f64) -> usize {
        let mut count = 0;
        for e in self.edge_ids() {
            if self.edges.contains_key(e)
                && self.edge_length(e) < eps
                && self.collapse_edge(e).is_some()
            {
                count += 1;
            }
        }
        count
    }

    /// Removes orphan edges, edges with a hole on both sides and vertices
    /// without outgoing half-edges. Returns the number of entities removed.
    pub fn clean_unused(&mut self) -> usize {
        let mut removed = 0;

        let orphan_edges: Vec<EdgeId> = self
            .edges
            .iter()
            .filter(|(k, e)| {
                self.half_edges
                    .get(e.half_edge)
                    .is_none_or(|h| h.edge != Some(*k))
            })
            .map(|(k, _)| k)
            .collect();
        for e in orphan_edges {
            self.edges.remove(e);
            removed += 1;
        }

        for h in self.half_edge_ids() {
            let Some(he) = self.half_edges.get(h) else {
                continue;
            };
            if he.face.is_some() {
                continue;
            }
            if let Some(p) = he.pair {
                if self.half_edges.get(p).is_some_and(|ph| ph.face.is_none()) {
                    self.remove_hole_edge(h, p);
                    removed += 2;
                }
            }
        }

        let mut referenced: AHashMap<VertexId, HalfEdgeId> = AHashMap::default();
        for (k, he) in self.half_edges.iter() {
            referenced.entry(he.vertex).or_insert(k);
        }
        for v in self.vertex_ids() {
            match referenced.get(&v) {
                None => {
                    self.vertices.remove(v);
                    removed += 1;
                }
                Some(&h) => self.reseat_vertex(v, Some(h)),
            }
        }
        if removed > 0 {
            self.invalidate_cache();
        }
        removed
    }

    /// Rotates `f`'s boundary half-edge to the one leaving its lexicographically
    /// smallest vertex position and marks the face sorted.
    pub fn sort_face(&mut self, f: FaceId) {
        if !self.faces.contains_key(f) {
            return;
        }
        let hes = self.face_half_edges(f);
        let key = |h: &HalfEdgeId| self.position(self.half_edges[*h].vertex).coords;
        let best = hes.iter().min_by(|a, b| {
            key(a)
                .partial_cmp(&key(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        if let Some(&h) = best {
            self.faces[f].half_edge = h;
            self.faces[f].sorted = true;
        }
    }
}
