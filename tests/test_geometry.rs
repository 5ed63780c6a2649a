// tests/test_geometry.rs
use hemesh::geometry::{
    Aabb, AabbTree, Plane, PlaneSide, Point2, Point3, Vector3,
    util::{incircle, newell_normal, orient2d, point_in_polygon, polygon_area2},
};

#[test]
fn test_point_vector_arithmetic() {
    let a = Point3::new(1.0, 2.0, 3.0);
    let b = Point3::new(4.0, 6.0, 3.0);
    let d = b - a;
    assert_eq!(d, Vector3::new(3.0, 4.0, 0.0));
    assert_eq!(d.norm(), 5.0);
    assert_eq!(a + d, b);
    assert_eq!(a.midpoint(&b), Point3::new(2.5, 4.0, 3.0));
    assert_eq!(a.lerp(&b, 0.0), a);
    assert!(a.approx_eq(&Point3::new(1.0 + 1e-9, 2.0, 3.0), 1e-6));
}

#[test]
fn test_cross_and_perpendicular() {
    let x = Vector3::new(1.0, 0.0, 0.0);
    let y = Vector3::new(0.0, 1.0, 0.0);
    assert_eq!(x.cross(&y), Vector3::new(0.0, 0.0, 1.0));

    let n: Vector3 = Vector3::new(0.3, -2.0, 0.7);
    assert!(n.any_perpendicular().dot(&n).abs() < 1e-12);
    assert!(Vector3::new(0.0, 0.0, 0.0).try_normalized(1e-12).is_none());
}

#[test]
fn test_centroid() {
    let pts = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(2.0, 2.0, 0.0),
        Point3::new(0.0, 2.0, 0.0),
    ];
    assert_eq!(Point3::centroid(&pts), Some(Point3::new(1.0, 1.0, 0.0)));
    assert_eq!(Point3::<f64>::centroid(&[]), None);
}

#[test]
fn test_plane_segment_parameter() {
    let plane = Plane::new(&Point3::new(0.0, 0.0, 0.0), &Vector3::new(1.0, 0.0, 0.0)).unwrap();
    let t: f64 = plane
        .segment_parameter(&Point3::new(-1.0, 0.0, 0.0), &Point3::new(3.0, 0.0, 0.0))
        .unwrap();
    assert!((t - 0.25).abs() < 1e-12);
    assert!(
        plane
            .segment_parameter(&Point3::new(1.0, 0.0, 0.0), &Point3::new(1.0, 5.0, 0.0))
            .is_none()
    );
}

#[test]
fn test_plane_flipped_swaps_sides() {
    let plane = Plane::new(&Point3::new(0.0, 0.0, 0.0), &Vector3::new(0.0, 1.0, 0.0)).unwrap();
    let q = Point3::new(0.0, 2.0, 0.0);
    assert_eq!(plane.classify(&q, 1e-6), PlaneSide::Front);
    assert_eq!(plane.flipped().classify(&q, 1e-6), PlaneSide::Back);
}

#[test]
fn test_plane_aabb_overlap() {
    let plane = Plane::new(&Point3::new(0.0, 0.0, 0.0), &Vector3::new(1.0, 1.0, 0.0)).unwrap();
    let hit = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
    let miss = Aabb::new(Point3::new(2.0, 2.0, 0.0), Point3::new(3.0, 3.0, 1.0));
    assert!(plane.intersects_aabb(&hit, 1e-6));
    assert!(!plane.intersects_aabb(&miss, 1e-6));
}

#[test]
fn test_aabb_tree_query() {
    let items: Vec<(Aabb<f64, 3>, usize)> = (0..10)
        .map(|i| {
            let x = i as f64;
            (
                Aabb::new(Point3::new(x, 0.0, 0.0), Point3::new(x + 0.5, 1.0, 1.0)),
                i,
            )
        })
        .collect();
    let tree = AabbTree::build(items).unwrap();
    assert_eq!(tree.size(), 10);

    let query = Aabb::new(Point3::new(2.2, 0.0, 0.0), Point3::new(4.1, 1.0, 1.0));
    let mut out = Vec::new();
    tree.query(&query, &mut out);
    let mut hits: Vec<usize> = out.into_iter().copied().collect();
    hits.sort();
    assert_eq!(hits, vec![2, 3, 4]);

    let plane = Plane::new(&Point3::new(7.25, 0.0, 0.0), &Vector3::new(1.0, 0.0, 0.0)).unwrap();
    let mut out = Vec::new();
    tree.query_with(&|b| plane.intersects_aabb(b, 1e-9), &mut out);
    assert_eq!(out, vec![&7]);
}

#[test]
fn test_predicates_2d() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(1.0, 0.0);
    let c = Point2::new(0.0, 1.0);
    assert!(orient2d(&a, &b, &c) > 0.0);
    assert!(orient2d(&a, &c, &b) < 0.0);
    assert!(incircle(&a, &b, &c, &Point2::new(0.4, 0.4)) > 0.0);
    assert!(incircle(&a, &b, &c, &Point2::new(2.0, 2.0)) < 0.0);

    let square: [Point2; 4] = [a, b, Point2::new(1.0, 1.0), c];
    assert!(point_in_polygon(&Point2::new(0.5, 0.5), &square));
    assert!(!point_in_polygon(&Point2::new(1.5, 0.5), &square));
    assert!((polygon_area2(&square) - 2.0).abs() < 1e-12);
}

#[test]
fn test_newell_normal_of_quad() {
    let quad = [
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(2.0, 0.0, 1.0),
        Point3::new(2.0, 2.0, 1.0),
        Point3::new(0.0, 2.0, 1.0),
    ];
    let n = newell_normal(&quad);
    assert!((n - Vector3::new(0.0, 0.0, 8.0)).norm() < 1e-12);
}
