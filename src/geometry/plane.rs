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
    aabb::Aabb,
    point::{Point2, Point3},
    vector::Vector3,
};

/// Position of a point relative to a plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaneSide {
    /// Positive signed distance (the side the normal points to).
    Front,
    Back,
    On,
}

/// Oriented plane `normal · x + d = 0` with a unit normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane<T = f64> {
    pub normal: Vector3<T>,
    pub d: T,
}

impl<T: Float> Plane<T> {
    /// Plane through `origin` with direction `normal`. The normal is
    /// normalized; `None` if it has (near) zero length.
    pub fn new(origin: &Point3<T>, normal: &Vector3<T>) -> Option<Self> {
        let n = normal.try_normalized(T::epsilon())?;
        let d = -n.dot(&origin.as_vector());
        Some(Plane { normal: n, d })
    }

    pub fn from_points(p1: &Point3<T>, p2: &Point3<T>, p3: &Point3<T>) -> Option<Self> {
        let v1 = *p2 - *p1;
        let v2 = *p3 - *p1;
        Self::new(p1, &v1.cross(&v2))
    }

    /// The point of the plane closest to the coordinate origin.
    pub fn origin(&self) -> Point3<T> {
        self.normal.scale(-self.d).as_point()
    }

    pub fn signed_distance(&self, p: &Point3<T>) -> T {
        self.normal.dot(&p.as_vector()) + self.d
    }

    pub fn classify(&self, p: &Point3<T>, eps: T) -> PlaneSide {
        let dist = self.signed_distance(p);
        if dist > eps {
            PlaneSide::Front
        } else if dist < -eps {
            PlaneSide::Back
        } else {
            PlaneSide::On
        }
    }

    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            d: -self.d,
        }
    }

    /// Orthonormal in-plane frame `(u, v)` with `u × v == normal`.
    pub fn basis(&self) -> (Vector3<T>, Vector3<T>) {
        let u = self.normal.any_perpendicular().normalized();
        let v = self.normal.cross(&u);
        (u, v)
    }

    /// Coordinates of `p` in the frame returned by [`Plane::basis`].
    pub fn to_local_2d(&self, p: &Point3<T>, basis: &(Vector3<T>, Vector3<T>)) -> Point2<T> {
        let rel = *p - self.origin();
        Point2::new(basis.0.dot(&rel), basis.1.dot(&rel))
    }

    /// Intersection parameter along `a -> b`, or `None` when the segment
    /// lies parallel to the plane.
    pub fn segment_parameter(&self, a: &Point3<T>, b: &Point3<T>) -> Option<T> {
        let da = self.signed_distance(a);
        let db = self.signed_distance(b);
        let denom = da - db;
        if denom.abs() <= T::epsilon() {
            return None;
        }
        Some(da / denom)
    }

    /// Both planes have the same orientation and offset within `eps`.
    pub fn approx_eq(&self, other: &Self, eps: T) -> bool {
        (self.normal - other.normal).norm() < eps && (self.d - other.d).abs() < eps
    }

    /// Whether the box reaches within `eps` of the plane.
    pub fn intersects_aabb(&self, aabb: &Aabb<T, 3>, eps: T) -> bool {
        let half = T::one() / (T::one() + T::one());
        let mut radius = T::zero();
        let mut center = [T::zero(); 3];
        for i in 0..3 {
            center[i] = aabb.center(i);
            radius = radius + (aabb.max[i] - aabb.min[i]) * half * self.normal[i].abs();
        }
        self.signed_distance(&Point3::from_vals(center)).abs() <= radius + eps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_sides() {
        let plane = Plane::new(&Point3::new(0.0, 0.0, 1.0), &Vector3::new(0.0, 0.0, 2.0)).unwrap();
        assert_eq!(plane.classify(&Point3::new(3.0, 1.0, 2.0), 1e-9), PlaneSide::Front);
        assert_eq!(plane.classify(&Point3::new(3.0, 1.0, 0.0), 1e-9), PlaneSide::Back);
        assert_eq!(plane.classify(&Point3::new(-5.0, 4.0, 1.0), 1e-9), PlaneSide::On);
        assert!((plane.origin().z() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_normal_rejected() {
        assert!(Plane::new(&Point3::new(0.0, 0.0, 0.0), &Vector3::new(0.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let plane = Plane::new(&Point3::new(1.0, 2.0, 3.0), &Vector3::new(1.0, 1.0, 0.0)).unwrap();
        let (u, v) = plane.basis();
        assert!(u.dot(&v).abs() < 1e-12);
        assert!(u.dot(&plane.normal).abs() < 1e-12);
        assert!((u.cross(&v) - plane.normal).norm() < 1e-12);
    }
}
