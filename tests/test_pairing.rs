// tests/test_pairing.rs
mod common;

use common::{cube_positions, grid, p};
use hemesh::{Mesh, is_valid_mesh, is_valid_surface};

/// Cube assembled face by face through `add_polygon`, not yet paired.
fn loose_cube() -> Mesh {
    let (positions, faces) = cube_positions();
    let mut mesh = Mesh::new();
    let ids: Vec<_> = positions.iter().map(|&q| mesh.add_vertex(q)).collect();
    for face in &faces {
        let vs: Vec<_> = face.iter().map(|&i| ids[i]).collect();
        mesh.add_polygon(&vs).unwrap();
    }
    mesh
}

#[test]
fn test_pairing_closes_cube() {
    let mut mesh = loose_cube();
    assert_eq!(mesh.unpaired_half_edges().len(), 24);
    assert!(!is_valid_mesh(&mesh));

    assert_eq!(mesh.pair_half_edges(), 12);
    assert_eq!(mesh.number_of_edges(), 12);
    assert!(mesh.unpaired_half_edges().is_empty());
    assert!(is_valid_mesh(&mesh));
}

#[test]
fn test_pairing_is_idempotent() {
    let mut mesh = loose_cube();
    mesh.pair_half_edges();
    let edges = mesh.number_of_edges();
    assert_eq!(mesh.pair_half_edges(), 0);
    assert_eq!(mesh.number_of_edges(), edges);
    assert!(is_valid_mesh(&mesh));
}

#[test]
fn test_pairing_shares_one_edge() {
    let mut mesh = loose_cube();
    mesh.pair_half_edges();
    for (h, he) in mesh.half_edges() {
        let pair = he.pair.unwrap();
        assert_eq!(mesh.half_edge(pair).unwrap().edge, he.edge);
        assert_eq!(mesh.target(pair), Some(mesh.origin(h)));
    }
}

#[test]
fn test_same_direction_half_edges_stay_unpaired() {
    // two triangles traversing the shared edge the same way
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex(p(0.0, 0.0, 0.0));
    let b = mesh.add_vertex(p(1.0, 0.0, 0.0));
    let c = mesh.add_vertex(p(0.0, 1.0, 0.0));
    let d = mesh.add_vertex(p(1.0, -1.0, 0.0));
    mesh.add_polygon(&[a, b, c]).unwrap();
    mesh.add_polygon(&[a, b, d]).unwrap();

    assert_eq!(mesh.pair_half_edges(), 0);
    assert_eq!(mesh.unpaired_half_edges().len(), 6);
}

#[test]
fn test_cap_half_edges_builds_hole_loops() {
    let mut mesh = Mesh::new();
    let vs: Vec<_> = [
        p(0.0, 0.0, 0.0),
        p(1.0, 0.0, 0.0),
        p(1.0, 1.0, 0.0),
        p(0.0, 1.0, 0.0),
    ]
    .iter()
    .map(|&q| mesh.add_vertex(q))
    .collect();
    mesh.add_polygon(&vs).unwrap();
    assert!(is_valid_surface(&mesh));

    assert_eq!(mesh.pair_half_edges(), 0);
    assert_eq!(mesh.cap_half_edges(), 4);
    assert_eq!(mesh.number_of_edges(), 4);
    let holes = mesh.hole_loops();
    assert_eq!(holes.len(), 1);
    assert_eq!(holes[0].len(), 4);
    assert!(is_valid_mesh(&mesh));
    assert_eq!(mesh.cap_half_edges(), 0);
}

#[test]
fn test_cap_holes_closes_open_box() {
    let (positions, mut faces) = cube_positions();
    faces.truncate(5);
    let mut mesh = Mesh::from_face_list(&positions, &faces, &Default::default()).unwrap();
    assert_eq!(mesh.number_of_faces(), 5);

    let caps = mesh.cap_holes();
    assert_eq!(caps.len(), 1);
    assert_eq!(mesh.face_order(caps[0]), 4);
    assert!(mesh.is_closed());
    assert!(is_valid_mesh(&mesh));

    // the cap faces outward like the face it replaces
    let n = mesh.face_normal(caps[0]);
    assert!(n.dot(&mesh.face_center(caps[0]).as_vector()) > 0.0);
}

#[test]
fn test_cap_holes_where_filters_loops() {
    let mut mesh = grid(3, 3);
    let before = mesh.number_of_faces();
    let caps = mesh.cap_holes_where(|_, lp| lp.len() > 100);
    assert!(caps.is_empty());
    assert_eq!(mesh.number_of_faces(), before);
    assert_eq!(mesh.hole_loops().len(), 1);

    let caps = mesh.cap_holes_where(|m, lp| lp.iter().all(|&h| m.position(m.origin(h)).z() == 0.0));
    assert_eq!(caps.len(), 1);
    assert_eq!(mesh.face_order(caps[0]), 12);
    assert!(mesh.hole_loops().is_empty());
    assert!(is_valid_mesh(&mesh));
}
