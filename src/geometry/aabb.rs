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

use num_traits::Float;

use crate::geometry::point::Point;

/// An axis-aligned bounding box in N dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb<T, const N: usize> {
    pub min: Point<T, N>,
    pub max: Point<T, N>,
}

impl<T: Float, const N: usize> Aabb<T, N> {
    pub fn new(min: Point<T, N>, max: Point<T, N>) -> Self {
        Aabb { min, max }
    }

    /// Build the smallest AABB containing two points.
    pub fn from_points(a: &Point<T, N>, b: &Point<T, N>) -> Self {
        let mins = std::array::from_fn(|i| a[i].min(b[i]));
        let maxs = std::array::from_fn(|i| a[i].max(b[i]));
        Aabb::new(Point::from_vals(mins), Point::from_vals(maxs))
    }

    /// Smallest AABB containing every point, `None` if there are none.
    pub fn enclosing<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point<T, N>>,
        T: 'a,
    {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut aabb = Aabb::new(*first, *first);
        for p in it {
            aabb.expand(p);
        }
        Some(aabb)
    }

    pub fn expand(&mut self, p: &Point<T, N>) {
        for i in 0..N {
            self.min[i] = self.min[i].min(p[i]);
            self.max[i] = self.max[i].max(p[i]);
        }
    }

    pub fn union(&self, other: &Aabb<T, N>) -> Aabb<T, N> {
        let mins = std::array::from_fn(|i| self.min[i].min(other.min[i]));
        let maxs = std::array::from_fn(|i| self.max[i].max(other.max[i]));
        Aabb::new(Point::from_vals(mins), Point::from_vals(maxs))
    }

    /// Does this AABB intersect `other`?
    pub fn intersects(&self, other: &Aabb<T, N>) -> bool {
        (0..N).all(|i| self.max[i] >= other.min[i] && other.max[i] >= self.min[i])
    }

    pub fn contains(&self, p: &Point<T, N>) -> bool {
        (0..N).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }

    /// Center coordinate along axis `i`.
    pub fn center(&self, i: usize) -> T {
        (self.min[i] + self.max[i]) / (T::one() + T::one())
    }

    /// Length along axis `i`.
    pub fn extent(&self, i: usize) -> T {
        (self.max[i] - self.min[i]).abs()
    }

    /// Return the axis index with largest extent.
    pub fn longest_axis(&self) -> usize {
        let mut best_i = 0usize;
        let mut best = self.extent(0);
        for i in 1..N {
            let e = self.extent(i);
            if e > best {
                best_i = i;
                best = e;
            }
        }
        best_i
    }
}
