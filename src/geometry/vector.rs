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

use std::ops::{Add, Index, Mul, Neg, Sub};

use num_traits::{Float, Zero};

use crate::geometry::point::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector<T, const N: usize> {
    pub coords: [T; N],
}

pub type Vector2<T = f64> = Vector<T, 2>;
pub type Vector3<T = f64> = Vector<T, 3>;

impl<T: Float, const N: usize> Vector<T, N> {
    pub fn from_vals(coords: [T; N]) -> Self {
        Self { coords }
    }

    pub fn dot(&self, other: &Self) -> T {
        self.coords
            .iter()
            .zip(other.coords.iter())
            .fold(T::zero(), |acc, (a, b)| acc + *a * *b)
    }

    pub fn norm_squared(&self) -> T {
        self.dot(self)
    }

    pub fn norm(&self) -> T {
        self.norm_squared().sqrt()
    }

    pub fn scale(&self, s: T) -> Self {
        let mut coords = self.coords;
        for c in coords.iter_mut() {
            *c = *c * s;
        }
        Self { coords }
    }

    /// Unit vector in the same direction. A zero vector yields NaNs; use
    /// [`Vector::try_normalized`] when the input may be degenerate.
    pub fn normalized(&self) -> Self {
        self.scale(T::one() / self.norm())
    }

    pub fn try_normalized(&self, eps: T) -> Option<Self> {
        let n = self.norm();
        if n <= eps || !n.is_finite() {
            None
        } else {
            Some(self.scale(T::one() / n))
        }
    }

    pub fn as_point(&self) -> Point<T, N> {
        Point::from_vals(self.coords)
    }
}

impl<T: Float> Vector<T, 3> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { coords: [x, y, z] }
    }

    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.coords;
        let [bx, by, bz] = other.coords;
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    /// Some vector orthogonal to `self`, built from the axis least aligned with it.
    pub fn any_perpendicular(&self) -> Self {
        let [x, y, z] = self.coords.map(|c| c.abs());
        let axis = if x <= y && x <= z {
            Self::new(T::one(), T::zero(), T::zero())
        } else if y <= z {
            Self::new(T::zero(), T::one(), T::zero())
        } else {
            Self::new(T::zero(), T::zero(), T::one())
        };
        self.cross(&axis)
    }
}

impl<T: Float> Vector<T, 2> {
    pub fn new(x: T, y: T) -> Self {
        Self { coords: [x, y] }
    }

    /// z-component of the 3D cross product.
    pub fn perp_dot(&self, other: &Self) -> T {
        self.coords[0] * other.coords[1] - self.coords[1] * other.coords[0]
    }
}

impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;
    fn index(&self, i: usize) -> &T {
        &self.coords[i]
    }
}

impl<T: Float, const N: usize> Add for Vector<T, N> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let mut coords = self.coords;
        for i in 0..N {
            coords[i] = self.coords[i] + rhs.coords[i];
        }
        Self { coords }
    }
}

impl<T: Float, const N: usize> Sub for Vector<T, N> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        let mut coords = self.coords;
        for i in 0..N {
            coords[i] = self.coords[i] - rhs.coords[i];
        }
        Self { coords }
    }
}

impl<T: Float, const N: usize> Neg for Vector<T, N> {
    type Output = Self;
    fn neg(self) -> Self {
        self.scale(-T::one())
    }
}

impl<T: Float, const N: usize> Mul<T> for Vector<T, N> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self {
        self.scale(rhs)
    }
}

impl<T: Float, const N: usize> Zero for Vector<T, N> {
    fn zero() -> Self {
        Self {
            coords: [T::zero(); N],
        }
    }

    fn is_zero(&self) -> bool {
        self.coords.iter().all(|c| c.is_zero())
    }
}
