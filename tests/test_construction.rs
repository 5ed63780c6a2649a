// tests/test_construction.rs
mod common;

use common::{build, cube, cube_positions, p};
use hemesh::{FaceListOptions, KernelError, Mesh, is_valid_mesh, is_valid_surface};

#[test]
fn test_cube_from_face_list_is_valid() {
    let mesh = cube();
    assert!(is_valid_mesh(&mesh));
    assert!(mesh.half_edges().all(|(_, h)| h.pair.is_some() && h.edge.is_some()));
}

#[test]
fn test_out_of_range_index_is_rejected() {
    let positions = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)];
    let faces = vec![vec![0, 1, 2], vec![0, 2, 7]];
    let err = Mesh::from_face_list(&positions, &faces, &FaceListOptions::default()).unwrap_err();
    assert_eq!(
        err,
        KernelError::InvalidFaceIndex {
            face: 1,
            index: 7,
            count: 3
        }
    );
}

#[test]
fn test_duplicate_positions_are_merged() {
    // two triangles sharing an edge, given with separate copies of the shared corners
    let positions = vec![
        p(0.0, 0.0, 0.0),
        p(1.0, 0.0, 0.0),
        p(0.0, 1.0, 0.0),
        p(1.0, 0.0, 0.0),
        p(1.0, 1.0, 0.0),
        p(0.0, 1.0 + 1e-9, 0.0),
    ];
    let faces = vec![vec![0, 1, 2], vec![3, 4, 5]];

    let merged = build(&positions, &faces);
    assert_eq!(merged.number_of_vertices(), 4);
    assert_eq!(merged.number_of_edges(), 5);
    assert!(is_valid_mesh(&merged));

    let exact = Mesh::from_face_list(&positions, &faces, &FaceListOptions::exact()).unwrap();
    assert_eq!(exact.number_of_vertices(), 6);
    assert_eq!(exact.number_of_edges(), 6);
    assert_eq!(exact.hole_loops().len(), 2);
}

#[test]
fn test_degenerate_faces_are_skipped() {
    let positions = vec![
        p(0.0, 0.0, 0.0),
        p(1.0, 0.0, 0.0),
        p(0.0, 1.0, 0.0),
        p(1.0, 1.0, 0.0),
    ];
    // repeated corner, closing duplicate, and a two-vertex face
    let faces = vec![vec![0, 1, 1, 2, 0], vec![1, 3], vec![1, 3, 2]];
    let mesh = build(&positions, &faces);
    assert_eq!(mesh.number_of_faces(), 2);
    assert!(mesh.face_ids().iter().all(|&f| mesh.face_order(f) == 3));
    assert!(is_valid_mesh(&mesh));
}

#[test]
fn test_unused_positions_are_dropped() {
    let positions = vec![
        p(0.0, 0.0, 0.0),
        p(1.0, 0.0, 0.0),
        p(5.0, 5.0, 5.0),
        p(0.0, 1.0, 0.0),
    ];
    let mesh = build(&positions, &[vec![0, 1, 3]]);
    assert_eq!(mesh.number_of_vertices(), 3);
    assert!(mesh.vertices().all(|(_, v)| v.half_edge.is_some()));
}

#[test]
fn test_single_triangle_has_hole_twins() {
    let positions = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)];
    let mesh = build(&positions, &[vec![0, 1, 2]]);
    assert_eq!(mesh.number_of_half_edges(), 6);
    assert_eq!(mesh.boundary_half_edges().len(), 3);
    let holes = mesh.hole_loops();
    assert_eq!(holes.len(), 1);
    assert_eq!(holes[0].len(), 3);
    assert!(is_valid_mesh(&mesh));
}

#[test]
fn test_add_polygon_leaves_half_edges_unpaired() {
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex(p(0.0, 0.0, 0.0));
    let b = mesh.add_vertex(p(1.0, 0.0, 0.0));
    let c = mesh.add_vertex(p(0.0, 1.0, 0.0));
    assert!(mesh.add_polygon(&[a, b]).is_none());

    let f = mesh.add_polygon(&[a, b, c]).expect("triangle");
    assert_eq!(mesh.face_vertices(f).as_slice(), &[a, b, c]);
    assert_eq!(mesh.unpaired_half_edges().len(), 3);
    assert_eq!(mesh.number_of_edges(), 0);
    assert!(is_valid_surface(&mesh));
}

#[test]
fn test_face_list_export() {
    let (positions, faces) = cube_positions();
    let mesh = build(&positions, &faces);
    let list = mesh.to_face_list();
    assert_eq!(list.positions.len(), 8);
    assert_eq!(list.faces.len(), 6);
    assert!(list.faces.iter().all(|f| f.len() == 4));

    // re-import gives the same structure
    let again = build(&list.positions, &list.faces);
    assert_eq!(again.number_of_edges(), 12);
    assert!(is_valid_mesh(&again));

    let tris = mesh.triangles();
    assert_eq!(tris.len(), 12);
    assert!(tris.iter().flatten().all(|&i| i < 8));
}

#[test]
fn test_vertex_normals_point_outward() {
    let mesh = cube();
    for (v, n) in mesh.vertex_normals() {
        assert!((n.norm() - 1.0).abs() < 1e-9);
        let q = mesh.position(v).as_vector().normalized();
        assert!((n.dot(&q) - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_long_polygon_loop_is_walked_to_the_end() {
    let n = 10_000;
    let positions: Vec<_> = (0..n)
        .map(|i| {
            let a = i as f64 / n as f64 * std::f64::consts::TAU;
            p(a.cos(), a.sin(), 0.0)
        })
        .collect();
    let faces = vec![(0..n).collect::<Vec<usize>>()];
    let mut mesh = Mesh::from_face_list(&positions, &faces, &FaceListOptions::exact()).unwrap();

    let f = mesh.face_ids()[0];
    assert_eq!(mesh.face_order(f), n);
    assert_eq!(mesh.hole_loops().len(), 1);
    assert_eq!(mesh.hole_loops()[0].len(), n);
    assert!(is_valid_mesh(&mesh));

    assert!(mesh.delete_face(f));
    assert!(mesh.half_edges().all(|(_, h)| h.face.is_none()));
    let caps = mesh.cap_holes();
    assert_eq!(caps.len(), 2);
    assert!(caps.iter().all(|&c| mesh.face_order(c) == n));
    assert!(is_valid_mesh(&mesh));
}
