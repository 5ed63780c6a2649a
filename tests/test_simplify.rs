// tests/test_simplify.rs
mod common;

use common::{build, cube, grid, icosphere, p, tetrahedron};
use hemesh::{
    FaceListOptions, KernelError, Mesh, MeshOperator, Selection, Simplifier, SimplifyOptions,
    is_valid_mesh,
    operations::simplify::{collapse_cost, visual_importance},
};

#[test]
fn test_icosphere_reaches_goal() {
    let mut mesh = icosphere();
    let report = Simplifier::new(SimplifyOptions::with_goal(21))
        .simplify(&mut mesh)
        .unwrap();

    assert_eq!(report.vertices_before, 42);
    assert!(report.vertices_after <= 21);
    assert_eq!(report.vertices_after, mesh.number_of_vertices());
    assert_eq!(report.collapses, 42 - report.vertices_after);
    assert!(mesh.is_triangulated());
    assert!(mesh.is_closed());
    assert_eq!(mesh.euler_characteristic(), 2);
    assert!(is_valid_mesh(&mesh));
}

#[test]
fn test_default_ratio() {
    let mut mesh = icosphere();
    let report = Simplifier::default().apply(&mut mesh).unwrap();
    // 90% of 42, rounded down
    assert!(report.vertices_after <= 37);
    assert!(is_valid_mesh(&mesh));
}

#[test]
fn test_flat_grid_keeps_its_outline() {
    let mut mesh = grid(5, 5);
    let bb = mesh.bounding_box().unwrap();
    let report = Simplifier::new(SimplifyOptions::with_goal(30))
        .simplify(&mut mesh)
        .unwrap();

    assert!(report.vertices_after <= 30);
    assert!(is_valid_mesh(&mesh));
    assert!(mesh.vertices().all(|(_, v)| v.position.z() == 0.0));

    let after = mesh.bounding_box().unwrap();
    assert!(after.min.approx_eq(&bb.min, 1e-12));
    assert!(after.max.approx_eq(&bb.max, 1e-12));
    for f in mesh.face_ids() {
        assert!(mesh.face_normal(f)[2] > 0.99);
    }
}

#[test]
fn test_goal_above_count_is_a_no_op() {
    let mut mesh = icosphere();
    let report = Simplifier::new(SimplifyOptions::with_goal(100))
        .simplify(&mut mesh)
        .unwrap();
    assert_eq!(report.collapses, 0);
    assert_eq!(mesh.number_of_vertices(), 42);
}

#[test]
fn test_refusals() {
    let mut tet = tetrahedron();
    let err = Simplifier::default().simplify(&mut tet).unwrap_err();
    assert_eq!(err, KernelError::InvalidGoal { goal: 3, count: 4 });
    assert_eq!(tet.number_of_vertices(), 4);

    let mut tri = build(
        &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)],
        &[vec![0, 1, 2]],
    );
    let err = Simplifier::default().simplify(&mut tri).unwrap_err();
    assert_eq!(err, KernelError::TooFewVertices { count: 3 });

    let err = Simplifier::default().simplify(&mut Mesh::new()).unwrap_err();
    assert_eq!(err, KernelError::EmptyMesh);

    let mut ico = icosphere();
    let err = Simplifier::new(SimplifyOptions::with_goal(2))
        .simplify(&mut ico)
        .unwrap_err();
    assert_eq!(err, KernelError::InvalidGoal { goal: 2, count: 42 });
}

#[test]
fn test_quads_are_triangulated_first() {
    let mut mesh = cube();
    let report = Simplifier::new(SimplifyOptions::with_goal(8))
        .simplify(&mut mesh)
        .unwrap();
    assert_eq!(report.collapses, 0);
    assert!(mesh.is_triangulated());
    assert_eq!(mesh.number_of_faces(), 12);
}

#[test]
fn test_selection_limits_removed_vertices() {
    let mut mesh = icosphere();
    let upper: Vec<_> = mesh
        .vertices()
        .filter(|(_, v)| v.position.z() > 0.3)
        .map(|(k, _)| k)
        .collect();
    let lower: Vec<_> = mesh
        .vertex_ids()
        .into_iter()
        .filter(|v| !upper.contains(v))
        .collect();

    let report = Simplifier::new(SimplifyOptions::with_goal(30))
        .apply_selection(&mut mesh, &Selection::from_vertices(upper.iter().copied()))
        .unwrap();
    assert!(report.collapses > 0);
    assert!(lower.iter().all(|&v| mesh.contains_vertex(v)));
    assert!(is_valid_mesh(&mesh));
}

#[test]
fn test_visual_importance_and_cost() {
    let mesh = grid(2, 2);
    let mut flat = mesh.clone();
    flat.triangulate_faces();
    let center = flat
        .vertex_ids()
        .into_iter()
        .find(|&v| !flat.is_boundary_vertex(v))
        .unwrap();
    assert!(visual_importance(&flat, center).unwrap().abs() < 1e-12);

    let sphere = icosphere();
    let v = sphere.vertex_ids()[0];
    let importance = visual_importance(&sphere, v).unwrap();
    assert!(importance > 0.0 && importance < 1.0);

    // interior collapses on a flat patch cost nothing
    for h in flat.vertex_star(center) {
        let cost = collapse_cost(&flat, h, 1.0);
        assert!(cost.is_infinite() || cost.abs() < 1e-12);
    }
}

#[test]
fn test_boundary_vertex_is_not_pulled_inward() {
    let mut mesh = grid(2, 2);
    mesh.triangulate_faces();
    let interior = mesh
        .vertex_ids()
        .into_iter()
        .find(|&v| !mesh.is_boundary_vertex(v))
        .unwrap();
    for w in mesh.vertex_neighbors(interior) {
        let h = mesh.half_edge_between(w, interior).unwrap();
        assert!(collapse_cost(&mesh, h, 1.0).is_infinite());
    }
}

#[test]
fn test_zero_area_fan_is_unresolvable() {
    // a fan of collinear triangles: every vertex sees only zero-area faces
    let positions: Vec<_> = (0..5).map(|i| p(i as f64, 0.0, 0.0)).collect();
    let faces = vec![vec![0, 1, 2], vec![0, 2, 3], vec![0, 3, 4]];
    let mut mesh = Mesh::from_face_list(&positions, &faces, &FaceListOptions::exact()).unwrap();
    assert_eq!(mesh.number_of_vertices(), 5);

    for v in mesh.vertex_ids() {
        assert_eq!(
            visual_importance(&mesh, v),
            Err(KernelError::UnresolvableTopology { vertex: v })
        );
    }

    let first = mesh.vertex_ids()[0];
    let err = Simplifier::new(SimplifyOptions::with_goal(4))
        .simplify(&mut mesh)
        .unwrap_err();
    assert_eq!(err, KernelError::UnresolvableTopology { vertex: first });
}
