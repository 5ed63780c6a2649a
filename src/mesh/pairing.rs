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

use ahash::AHashMap;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::mesh::{
    basic_types::Mesh,
    face::Face,
    keys::{FaceId, HalfEdgeId, VertexId},
};

impl Mesh {
    /// Pairs every unpaired half-edge `u -> w` with the first unpaired
    /// half-edge `w -> u` found, sharing (or creating) one edge between them.
    ///
    /// Half-edges whose `next` is unset have no known destination and are
    /// skipped. Running it twice pairs nothing the second time. Returns the
    /// number of pairs formed.
    pub fn pair_half_edges(&mut self) -> usize {
        let unpaired = self.unpaired_half_edges();

        // --- bucket candidates by the vertex they point into ---
        let mut incoming: AHashMap<VertexId, SmallVec<[HalfEdgeId; 4]>> = AHashMap::default();
        for &h in &unpaired {
            if let Some(dest) = self.target(h) {
                incoming.entry(dest).or_default().push(h);
            }
        }

        let mut formed = 0;
        for &h in &unpaired {
            if self.half_edges[h].pair.is_some() {
                continue;
            }
            let Some(w) = self.target(h) else { continue };
            let u = self.half_edges[h].vertex;
            let Some(bucket) = incoming.get_mut(&u) else {
                continue;
            };
            let found = bucket.iter().position(|&c| {
                c != h && self.half_edges[c].pair.is_none() && self.half_edges[c].vertex == w
            });
            if let Some(i) = found {
                let twin = bucket.remove(i);
                self.set_pair(h, twin);
                self.join_edges(h, twin);
                formed += 1;
            }
        }

        debug!(formed, remaining = unpaired.len() - 2 * formed, "paired half-edges");
        formed
    }

    /// Makes freshly paired `a` and `b` share one edge. A duplicate edge is
    /// removed; the representative prefers the side carrying a face.
    fn join_edges(&mut self, a: HalfEdgeId, b: HalfEdgeId) {
        let e = match (self.half_edges[a].edge, self.half_edges[b].edge) {
            (Some(ea), Some(eb)) => {
                if ea != eb {
                    self.edges.remove(eb);
                }
                self.half_edges[b].edge = Some(ea);
                ea
            }
            (Some(ea), None) => {
                self.half_edges[b].edge = Some(ea);
                ea
            }
            (None, Some(eb)) => {
                self.half_edges[a].edge = Some(eb);
                eb
            }
            (None, None) => self.add_edge(a),
        };
        let rep = if self.half_edges[a].face.is_some() || self.half_edges[b].face.is_none() {
            a
        } else {
            b
        };
        self.edges[e].half_edge = rep;
    }

    /// Gives every unpaired half-edge a face-less twin and links the twins
    /// into hole loops by matching each twin's destination with the origin
    /// of another twin. Returns the number of twins created.
    pub fn cap_half_edges(&mut self) -> usize {
        let unpaired = self.unpaired_half_edges();
        let mut twins = Vec::with_capacity(unpaired.len());

        for h in unpaired {
            let Some(dest) = self.target(h) else {
                warn!(half_edge = ?h, "unpaired half-edge without successor left open");
                continue;
            };
            let twin = self.add_half_edge(dest);
            self.set_pair(h, twin);
            match self.half_edges[h].edge {
                Some(e) => self.half_edges[twin].edge = Some(e),
                None => {
                    self.add_edge(h);
                }
            }
            twins.push(twin);
        }

        // twin a -> b continues with the twin leaving b
        let mut leaving: AHashMap<VertexId, SmallVec<[HalfEdgeId; 2]>> = AHashMap::default();
        for &t in &twins {
            leaving.entry(self.half_edges[t].vertex).or_default().push(t);
        }
        let mut open = 0;
        for &t in &twins {
            let dest = self.half_edges[t]
                .pair
                .map(|h| self.half_edges[h].vertex);
            let next = dest
                .and_then(|b| leaving.get_mut(&b))
                .and_then(|bucket| (!bucket.is_empty()).then(|| bucket.remove(0)));
            match next {
                Some(n) => self.half_edges[t].next = Some(n),
                None => open += 1,
            }
        }

        if open > 0 {
            warn!(open, "hole chains left unclosed");
        }
        debug!(twins = twins.len(), "capped half-edges");
        twins.len()
    }

    /// Closes every hole with a new face. Returns the new faces.
    pub fn cap_holes(&mut self) -> Vec<FaceId> {
        self.cap_holes_where(|_, _| true)
    }

    /// Like [`Mesh::cap_holes`], but only fills the hole loops for which
    /// `keep` returns true. Loops of fewer than three half-edges stay open.
    pub fn cap_holes_where<F>(&mut self, keep: F) -> Vec<FaceId>
    where
        F: Fn(&Mesh, &[HalfEdgeId]) -> bool,
    {
        self.cap_half_edges();

        let mut caps = Vec::new();
        for lp in self.hole_loops() {
            if lp.len() < 3 {
                debug!(len = lp.len(), "skipping degenerate hole loop");
                continue;
            }
            if !keep(self, &lp) {
                continue;
            }
            let f = self.faces.insert(Face::new(lp[0]));
            self.assign_face_loop(lp[0], Some(f));
            caps.push(f);
        }

        info!(caps = caps.len(), "capped holes");
        caps
    }
}
