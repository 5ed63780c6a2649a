// tests/common/mod.rs
#![allow(dead_code)]

use ahash::AHashMap;
use hemesh::{FaceListOptions, Mesh, Point3};

pub fn p(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

pub fn build(positions: &[Point3], faces: &[Vec<usize>]) -> Mesh {
    Mesh::from_face_list(positions, faces, &FaceListOptions::default()).expect("valid face list")
}

/// Axis-aligned cube on [-0.5, 0.5]^3, six outward quads.
pub fn cube_positions() -> (Vec<Point3>, Vec<Vec<usize>>) {
    let positions = vec![
        p(-0.5, -0.5, -0.5),
        p(0.5, -0.5, -0.5),
        p(0.5, 0.5, -0.5),
        p(-0.5, 0.5, -0.5),
        p(-0.5, -0.5, 0.5),
        p(0.5, -0.5, 0.5),
        p(0.5, 0.5, 0.5),
        p(-0.5, 0.5, 0.5),
    ];
    let faces = vec![
        vec![0, 3, 2, 1],
        vec![4, 5, 6, 7],
        vec![0, 1, 5, 4],
        vec![2, 3, 7, 6],
        vec![0, 4, 7, 3],
        vec![1, 2, 6, 5],
    ];
    (positions, faces)
}

pub fn cube() -> Mesh {
    let (positions, faces) = cube_positions();
    build(&positions, &faces)
}

pub fn tetrahedron() -> Mesh {
    let positions = vec![
        p(0.0, 0.0, 0.0),
        p(1.0, 0.0, 0.0),
        p(0.0, 1.0, 0.0),
        p(0.0, 0.0, 1.0),
    ];
    let faces = vec![vec![0, 2, 1], vec![0, 1, 3], vec![1, 2, 3], vec![0, 3, 2]];
    build(&positions, &faces)
}

/// Open `nx` by `ny` grid of unit quads in the z = 0 plane, facing +z.
pub fn grid(nx: usize, ny: usize) -> Mesh {
    let (positions, faces) = grid_positions(nx, ny);
    build(&positions, &faces)
}

pub fn grid_positions(nx: usize, ny: usize) -> (Vec<Point3>, Vec<Vec<usize>>) {
    let mut positions = Vec::new();
    for j in 0..=ny {
        for i in 0..=nx {
            positions.push(p(i as f64, j as f64, 0.0));
        }
    }
    let idx = |i: usize, j: usize| j * (nx + 1) + i;
    let mut faces = Vec::new();
    for j in 0..ny {
        for i in 0..nx {
            faces.push(vec![idx(i, j), idx(i + 1, j), idx(i + 1, j + 1), idx(i, j + 1)]);
        }
    }
    (positions, faces)
}

/// Unit icosphere: icosahedron subdivided once, 42 vertices and 80 triangles.
pub fn icosphere() -> Mesh {
    let t = (1.0 + 5.0f64.sqrt()) / 2.0;
    let mut positions = vec![
        p(-1.0, t, 0.0),
        p(1.0, t, 0.0),
        p(-1.0, -t, 0.0),
        p(1.0, -t, 0.0),
        p(0.0, -1.0, t),
        p(0.0, 1.0, t),
        p(0.0, -1.0, -t),
        p(0.0, 1.0, -t),
        p(t, 0.0, -1.0),
        p(t, 0.0, 1.0),
        p(-t, 0.0, -1.0),
        p(-t, 0.0, 1.0),
    ];
    let base: [[usize; 3]; 20] = [
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    let mut midpoints: AHashMap<(usize, usize), usize> = AHashMap::new();
    let mut mid = |a: usize, b: usize, positions: &mut Vec<Point3>| -> usize {
        let key = (a.min(b), a.max(b));
        *midpoints.entry(key).or_insert_with(|| {
            positions.push(positions[a].midpoint(&positions[b]));
            positions.len() - 1
        })
    };

    let mut faces = Vec::new();
    for [a, b, c] in base {
        let ab = mid(a, b, &mut positions);
        let bc = mid(b, c, &mut positions);
        let ca = mid(c, a, &mut positions);
        faces.push(vec![a, ab, ca]);
        faces.push(vec![b, bc, ab]);
        faces.push(vec![c, ca, bc]);
        faces.push(vec![ab, bc, ca]);
    }

    let positions: Vec<Point3> = positions
        .iter()
        .map(|q| q.as_vector().normalized().as_point())
        .collect();
    build(&positions, &faces)
}
