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

use crate::geometry::{
    point::{Point2, Point3},
    vector::Vector3,
};

/// Tolerance shared by every point, plane and edge comparison of the kernel.
pub const EPS: f64 = 1e-6;

/// Twice the signed area of the 2D triangle `(a, b, c)`; positive when CCW.
#[inline]
pub fn orient2d<T: Float>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> T {
    (*b - *a).perp_dot(&(*c - *a))
}

/// Positive when `d` lies strictly inside the circumcircle of the CCW
/// triangle `(a, b, c)`.
pub fn incircle<T: Float>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>, d: &Point2<T>) -> T {
    let adx = a[0] - d[0];
    let ady = a[1] - d[1];
    let bdx = b[0] - d[0];
    let bdy = b[1] - d[1];
    let cdx = c[0] - d[0];
    let cdy = c[1] - d[1];

    let alift = adx * adx + ady * ady;
    let blift = bdx * bdx + bdy * bdy;
    let clift = cdx * cdx + cdy * cdy;

    alift * (bdx * cdy - cdx * bdy) + blift * (cdx * ady - adx * cdy)
        + clift * (adx * bdy - bdx * ady)
}

/// Even-odd point-in-polygon test for a simple polygon.
pub fn point_in_polygon<T: Float>(p: &Point2<T>, polygon: &[Point2<T>]) -> bool {
    let mut inside = false;
    let n = polygon.len();
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (pi, pj) = (&polygon[i], &polygon[j]);
        if (pi[1] > p[1]) != (pj[1] > p[1]) {
            let x = (pj[0] - pi[0]) * (p[1] - pi[1]) / (pj[1] - pi[1]) + pi[0];
            if p[0] < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Twice the signed area of a 2D polygon; positive when CCW.
pub fn polygon_area2<T: Float>(polygon: &[Point2<T>]) -> T {
    let n = polygon.len();
    (0..n).fold(T::zero(), |acc, i| {
        let a = &polygon[i];
        let b = &polygon[(i + 1) % n];
        acc + (a[0] * b[1] - b[0] * a[1])
    })
}

/// Unnormalized triangle normal; its length is twice the triangle area.
#[inline]
pub fn triangle_normal<T: Float>(a: &Point3<T>, b: &Point3<T>, c: &Point3<T>) -> Vector3<T> {
    (*b - *a).cross(&(*c - *a))
}

#[inline]
pub fn triangle_area<T: Float>(a: &Point3<T>, b: &Point3<T>, c: &Point3<T>) -> T {
    triangle_normal(a, b, c).norm() / (T::one() + T::one())
}

/// Newell's method: robust (unnormalized) normal of a planar or near-planar
/// polygon; its length is twice the polygon area.
pub fn newell_normal<T: Float>(points: &[Point3<T>]) -> Vector3<T> {
    let n = points.len();
    let mut normal = [T::zero(); 3];
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        normal[0] = normal[0] + (a[1] - b[1]) * (a[2] + b[2]);
        normal[1] = normal[1] + (a[2] - b[2]) * (a[0] + b[0]);
        normal[2] = normal[2] + (a[0] - b[0]) * (a[1] + b[1]);
    }
    Vector3::from_vals(normal)
}
