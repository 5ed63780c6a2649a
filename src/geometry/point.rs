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

use std::ops::{Add, Index, IndexMut, Sub};

use num_traits::Float;

use crate::geometry::vector::Vector;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<T, const N: usize> {
    pub coords: [T; N],
}

pub type Point2<T = f64> = Point<T, 2>;
pub type Point3<T = f64> = Point<T, 3>;

impl<T: Float, const N: usize> Point<T, N> {
    pub fn from_vals(coords: [T; N]) -> Self {
        Self { coords }
    }

    pub fn origin() -> Self {
        Self {
            coords: [T::zero(); N],
        }
    }

    pub fn as_vector(&self) -> Vector<T, N> {
        Vector::from_vals(self.coords)
    }

    pub fn distance_squared_to(&self, other: &Self) -> T {
        (*other - *self).norm_squared()
    }

    pub fn distance_to(&self, other: &Self) -> T {
        self.distance_squared_to(other).sqrt()
    }

    /// Point at parameter `t` on the segment `self -> other`.
    pub fn lerp(&self, other: &Self, t: T) -> Self {
        let mut coords = self.coords;
        for i in 0..N {
            coords[i] = self.coords[i] + (other.coords[i] - self.coords[i]) * t;
        }
        Self { coords }
    }

    pub fn midpoint(&self, other: &Self) -> Self {
        self.lerp(other, T::one() / (T::one() + T::one()))
    }

    /// Component-wise comparison with tolerance `eps`.
    pub fn approx_eq(&self, other: &Self, eps: T) -> bool {
        self.coords
            .iter()
            .zip(other.coords.iter())
            .all(|(a, b)| (*a - *b).abs() < eps)
    }

    /// Arithmetic mean of `points`; `None` for an empty input.
    pub fn centroid<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Self>,
        T: 'a,
    {
        let mut sum = [T::zero(); N];
        let mut count = 0usize;
        for p in points {
            for i in 0..N {
                sum[i] = sum[i] + p.coords[i];
            }
            count += 1;
        }
        if count == 0 {
            return None;
        }
        let n = T::from(count)?;
        for c in sum.iter_mut() {
            *c = *c / n;
        }
        Some(Self { coords: sum })
    }
}

impl<T: Float> Point<T, 3> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { coords: [x, y, z] }
    }

    pub fn x(&self) -> T {
        self.coords[0]
    }

    pub fn y(&self) -> T {
        self.coords[1]
    }

    pub fn z(&self) -> T {
        self.coords[2]
    }
}

impl<T: Float> Point<T, 2> {
    pub fn new(x: T, y: T) -> Self {
        Self { coords: [x, y] }
    }
}

impl<T, const N: usize> Index<usize> for Point<T, N> {
    type Output = T;
    fn index(&self, i: usize) -> &T {
        &self.coords[i]
    }
}

impl<T, const N: usize> IndexMut<usize> for Point<T, N> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.coords[i]
    }
}

impl<T: Float, const N: usize> Sub for Point<T, N> {
    type Output = Vector<T, N>;
    fn sub(self, rhs: Self) -> Vector<T, N> {
        let mut coords = self.coords;
        for i in 0..N {
            coords[i] = self.coords[i] - rhs.coords[i];
        }
        Vector::from_vals(coords)
    }
}

impl<T: Float, const N: usize> Add<Vector<T, N>> for Point<T, N> {
    type Output = Point<T, N>;
    fn add(self, rhs: Vector<T, N>) -> Self {
        let mut coords = self.coords;
        for i in 0..N {
            coords[i] = self.coords[i] + rhs.coords[i];
        }
        Self { coords }
    }
}

impl<T: Float, const N: usize> Sub<Vector<T, N>> for Point<T, N> {
    type Output = Point<T, N>;
    fn sub(self, rhs: Vector<T, N>) -> Self {
        let mut coords = self.coords;
        for i in 0..N {
            coords[i] = self.coords[i] - rhs.coords[i];
        }
        Self { coords }
    }
}
