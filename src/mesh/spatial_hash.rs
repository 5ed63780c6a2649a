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

use crate::{geometry::Point3, mesh::keys::VertexId};

/// Uniform grid over vertex positions used to merge coincident input
/// vertices. Cells are `cell` wide; a lookup probes the 27 cells around the
/// query so that any match within `cell` per axis is found.
#[derive(Debug, Clone)]
pub(crate) struct VertexHash {
    cell: f64,
    hash_inv: f64,
    buckets: AHashMap<(i64, i64, i64), SmallVec<[(VertexId, Point3); 2]>>,
}

impl VertexHash {
    pub(crate) fn new(epsilon: f64) -> Self {
        let mut cell = epsilon.max(1e-12);
        if !cell.is_finite() {
            cell = 1e-5;
        }
        Self {
            cell,
            hash_inv: 1.0 / cell,
            buckets: AHashMap::default(),
        }
    }

    #[inline(always)]
    fn floor_sat_i64(x: f64) -> i64 {
        if !x.is_finite() {
            return if x.is_sign_positive() {
                i64::MAX
            } else {
                i64::MIN
            };
        }
        x.floor() as i64
    }

    #[inline(always)]
    fn key(&self, p: &Point3) -> (i64, i64, i64) {
        (
            Self::floor_sat_i64(p.x() * self.hash_inv),
            Self::floor_sat_i64(p.y() * self.hash_inv),
            Self::floor_sat_i64(p.z() * self.hash_inv),
        )
    }

    /// A previously inserted vertex within `cell` of `p` on every axis.
    pub(crate) fn find(&self, p: &Point3) -> Option<VertexId> {
        let (kx, ky, kz) = self.key(p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let k = (
                        kx.saturating_add(dx),
                        ky.saturating_add(dy),
                        kz.saturating_add(dz),
                    );
                    if let Some(bucket) = self.buckets.get(&k) {
                        if let Some((v, _)) =
                            bucket.iter().find(|(_, q)| q.approx_eq(p, self.cell))
                        {
                            return Some(*v);
                        }
                    }
                }
            }
        }
        None
    }

    pub(crate) fn insert(&mut self, v: VertexId, p: Point3) {
        let k = self.key(&p);
        self.buckets.entry(k).or_default().push((v, p));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_find_across_cell_border() {
        let mut ids: SlotMap<VertexId, ()> = SlotMap::with_key();
        let a = ids.insert(());
        let mut hash = VertexHash::new(1e-3);
        hash.insert(a, Point3::new(0.0, 0.0, 0.0));

        assert_eq!(hash.find(&Point3::new(-5e-4, 5e-4, 0.0)), Some(a));
        assert_eq!(hash.find(&Point3::new(2e-3, 0.0, 0.0)), None);
    }
}
