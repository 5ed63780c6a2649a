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

use num_traits::Float;

use crate::geometry::aabb::Aabb;

/// A static AABB-tree over generic data `D`, built by median split along the
/// longest axis of each node.
#[derive(Debug, Clone)]
pub enum AabbTree<T, const N: usize, D> {
    Leaf {
        aabb: Aabb<T, N>,
        data: D,
    },
    Node {
        aabb: Aabb<T, N>,
        left: Box<AabbTree<T, N, D>>,
        right: Box<AabbTree<T, N, D>>,
        size: usize,
    },
}

impl<T: Float, const N: usize, D> AabbTree<T, N, D> {
    /// Build an AABB-tree over `(aabb, data)` pairs. `None` for no items.
    pub fn build(items: Vec<(Aabb<T, N>, D)>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self::build_binary_tree(items))
    }

    fn build_binary_tree(mut items: Vec<(Aabb<T, N>, D)>) -> Self {
        if items.len() == 1 {
            if let Some((aabb, data)) = items.pop() {
                return AabbTree::Leaf { aabb, data };
            }
        }

        let bounds = items
            .iter()
            .skip(1)
            .fold(items[0].0, |acc, (aabb, _)| acc.union(aabb));
        let axis = bounds.longest_axis();
        items.sort_by(|(a, _), (b, _)| {
            a.center(axis)
                .partial_cmp(&b.center(axis))
                .unwrap_or(Ordering::Equal)
        });

        let mid = items.len() / 2;
        let right_items = items.split_off(mid);

        let left = Box::new(Self::build_binary_tree(items));
        let right = Box::new(Self::build_binary_tree(right_items));
        let size = left.size() + right.size();

        AabbTree::Node {
            aabb: bounds,
            left,
            right,
            size,
        }
    }

    /// Get AABB of this node/leaf
    pub fn aabb(&self) -> &Aabb<T, N> {
        match self {
            AabbTree::Leaf { aabb, .. } => aabb,
            AabbTree::Node { aabb, .. } => aabb,
        }
    }

    pub fn size(&self) -> usize {
        match self {
            AabbTree::Leaf { .. } => 1,
            AabbTree::Node { size, .. } => *size,
        }
    }

    /// Collect all `&D` whose AABB intersects `query`.
    pub fn query<'a>(&'a self, query: &Aabb<T, N>, out: &mut Vec<&'a D>) {
        self.query_with(&|aabb| aabb.intersects(query), out);
    }

    /// Collect all `&D` whose AABB passes `accept`. Subtrees whose bounds are
    /// rejected are skipped, so `accept` must hold for a node's box whenever it
    /// holds for one of the boxes it contains.
    pub fn query_with<'a, F>(&'a self, accept: &F, out: &mut Vec<&'a D>)
    where
        F: Fn(&Aabb<T, N>) -> bool,
    {
        match self {
            AabbTree::Leaf { aabb, data } => {
                if accept(aabb) {
                    out.push(data);
                }
            }
            AabbTree::Node {
                aabb, left, right, ..
            } => {
                if accept(aabb) {
                    left.query_with(accept, out);
                    right.query_with(accept, out);
                }
            }
        }
    }
}
