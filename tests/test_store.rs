// tests/test_store.rs
mod common;

use common::{cube, grid, p, tetrahedron};
use hemesh::Mesh;

#[test]
fn test_cube_counts() {
    let mesh = cube();
    assert_eq!(mesh.number_of_vertices(), 8);
    assert_eq!(mesh.number_of_edges(), 12);
    assert_eq!(mesh.number_of_half_edges(), 24);
    assert_eq!(mesh.number_of_faces(), 6);
    assert_eq!(mesh.euler_characteristic(), 2);
    assert!(mesh.is_closed());
    assert!(!mesh.is_triangulated());
}

#[test]
fn test_empty_mesh() {
    let mesh = Mesh::new();
    assert_eq!(mesh.number_of_vertices(), 0);
    assert_eq!(mesh.euler_characteristic(), 0);
    assert!(mesh.centroid().is_none());
    assert!(mesh.bounding_box().is_none());
}

#[test]
fn test_removed_key_is_not_found() {
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex(p(0.0, 0.0, 0.0));
    let b = mesh.add_vertex(p(1.0, 0.0, 0.0));
    assert!(mesh.remove_vertex(a).is_some());
    assert!(mesh.vertex(a).is_none());
    assert!(!mesh.contains_vertex(a));

    // a fresh vertex never resurrects the removed key
    let c = mesh.add_vertex(p(2.0, 0.0, 0.0));
    assert_ne!(a, c);
    assert!(mesh.vertex(a).is_none());
    assert!(mesh.contains_vertex(b));
}

#[test]
fn test_prev_next_round_trip() {
    let mesh = cube();
    for (h, _) in mesh.half_edges() {
        let prev = mesh.prev(h).expect("closed loop");
        assert_eq!(mesh.next(prev), Some(h));
        let pair = mesh.pair(h).expect("closed mesh");
        assert_eq!(mesh.pair(pair), Some(h));
        assert_eq!(mesh.target(h), Some(mesh.origin(pair)));
    }
}

#[test]
fn test_face_queries() {
    let mesh = cube();
    for f in mesh.face_ids() {
        assert_eq!(mesh.face_order(f), 4);
        assert!((mesh.face_area(f) - 1.0).abs() < 1e-12);

        // outward normals: the normal points away from the mesh center
        let n = mesh.face_normal(f);
        let c = mesh.face_center(f);
        assert!((n.norm() - 1.0).abs() < 1e-12);
        assert!(n.dot(&c.as_vector()) > 0.0);

        let neighbors = mesh.face_neighbors(f);
        assert_eq!(neighbors.len(), 4);
        assert!(neighbors.iter().all(|n| n.is_some_and(|g| g != f)));
    }
}

#[test]
fn test_vertex_star_and_neighbors() {
    let mesh = cube();
    for v in mesh.vertex_ids() {
        assert_eq!(mesh.vertex_degree(v), 3);
        assert_eq!(mesh.vertex_faces(v).len(), 3);
        assert!(!mesh.is_boundary_vertex(v));
        for w in mesh.vertex_neighbors(v) {
            assert!(mesh.are_vertices_connected(v, w));
            let h = mesh.half_edge_between(v, w).expect("neighbor edge");
            assert_eq!(mesh.origin(h), v);
        }
    }
}

#[test]
fn test_edge_queries() {
    let mesh = tetrahedron();
    let mut total = 0.0;
    for e in mesh.edge_ids() {
        let (a, b) = mesh.edge_vertices(e).expect("edge has ends");
        assert_ne!(a, b);
        let (h, pair) = mesh.edge_half_edges(e);
        assert!(pair.is_some());
        assert_eq!(mesh.half_edge(h).and_then(|he| he.edge), Some(e));
        assert!(!mesh.is_boundary_edge(e));
        total += mesh.edge_length(e);
    }
    // three unit edges and three diagonals of length sqrt(2)
    assert!((total - (3.0 + 3.0 * 2.0f64.sqrt())).abs() < 1e-12);
}

#[test]
fn test_open_grid_boundary() {
    let mesh = grid(2, 2);
    assert_eq!(mesh.number_of_vertices(), 9);
    assert_eq!(mesh.number_of_faces(), 4);
    assert_eq!(mesh.number_of_edges(), 12);
    assert_eq!(mesh.boundary_half_edges().len(), 8);
    assert_eq!(mesh.hole_loops().len(), 1);
    assert!(!mesh.is_closed());

    let boundary = mesh
        .vertex_ids()
        .into_iter()
        .filter(|&v| mesh.is_boundary_vertex(v))
        .count();
    assert_eq!(boundary, 8);
}

#[test]
fn test_centroid_follows_moves() {
    let mut mesh = cube();
    let c = mesh.centroid().expect("non-empty");
    assert!(c.approx_eq(&p(0.0, 0.0, 0.0), 1e-12));

    for v in mesh.vertex_ids() {
        let q = mesh.position(v);
        mesh.set_position(v, p(q.x() + 1.0, q.y(), q.z()));
    }
    let c = mesh.centroid().expect("non-empty");
    assert!(c.approx_eq(&p(1.0, 0.0, 0.0), 1e-12));

    let bb = mesh.bounding_box().expect("non-empty");
    assert!(bb.min.approx_eq(&p(0.5, -0.5, -0.5), 1e-12));
    assert!(bb.max.approx_eq(&p(1.5, 0.5, 0.5), 1e-12));
}

#[test]
fn test_sort_face_starts_at_smallest_vertex() {
    let mut mesh = cube();
    for f in mesh.face_ids() {
        mesh.sort_face(f);
        let face = mesh.face(f).expect("live face");
        assert!(face.sorted);
        let first = mesh.position(mesh.origin(face.half_edge));
        for q in mesh.face_positions(f) {
            assert!(first.coords <= q.coords);
        }
    }
}
