// tests/proptest_mesh.rs
//! Property tests: random face lists and random edit sequences must keep the
//! half-edge structure valid.
mod common;

use common::{build, cube, cube_positions, grid_positions, p};
use hemesh::{FaceListOptions, Mesh, Selection, is_valid_mesh};
use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Random subset of the faces of a 4 x 4 quad grid.
fn arb_grid_patch() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(any::<bool>(), 16).prop_map(|mask| {
        let (_, faces) = grid_positions(4, 4);
        faces
            .into_iter()
            .zip(mask)
            .filter_map(|(f, keep)| keep.then_some(f))
            .collect()
    })
}

/// One random topological edit. Every edit keeps the mesh closed and
/// manifold, so the Euler characteristic must not move.
fn random_edit(mesh: &mut Mesh, rng: &mut StdRng) {
    let faces = mesh.face_ids();
    let edges = mesh.edge_ids();
    match rng.random_range(0..4) {
        0 => {
            let e = edges[rng.random_range(0..edges.len())];
            let t = rng.random_range(0.1..0.9);
            mesh.split_edge_at(e, t);
        }
        1 => {
            let f = faces[rng.random_range(0..faces.len())];
            let vs = mesh.face_vertices(f);
            if vs.len() > 3 {
                let k = rng.random_range(2..vs.len() - 1);
                mesh.split_face(f, vs[0], vs[k]).expect("non-adjacent corners");
            }
        }
        2 => {
            let f = faces[rng.random_range(0..faces.len())];
            let c = mesh.face_center(f);
            mesh.tri_split_face(f, c);
        }
        _ => {
            let e = edges[rng.random_range(0..edges.len())];
            if let Some(r) = mesh.split_edge_at(e, 0.5) {
                mesh.collapse_edge(r.edge).expect("freshly split edge");
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_grid_patch_is_valid(faces in arb_grid_patch()) {
        prop_assume!(!faces.is_empty());
        let (positions, _) = grid_positions(4, 4);
        let mut mesh = build(&positions, &faces);

        prop_assert_eq!(mesh.number_of_faces(), faces.len());
        prop_assert!(is_valid_mesh(&mesh));
        prop_assert_eq!(mesh.number_of_half_edges(), 2 * mesh.number_of_edges());

        // nothing left to pair or cap
        prop_assert_eq!(mesh.pair_half_edges(), 0);
        prop_assert_eq!(mesh.cap_half_edges(), 0);
        prop_assert!(is_valid_mesh(&mesh));
    }

    #[test]
    fn prop_quad_split_patch_is_valid(faces in arb_grid_patch(), pick in 0usize..16) {
        prop_assume!(!faces.is_empty());
        let (positions, _) = grid_positions(4, 4);
        let mut mesh = build(&positions, &faces);
        let f = mesh.face_ids()[pick % faces.len()];

        let r = mesh.quad_split_selected(&Selection::from_faces([f]));
        prop_assert_eq!(r.center_vertices.len(), 1);
        prop_assert_eq!(r.new_faces.len(), 3);
        prop_assert!(is_valid_mesh(&mesh));
    }

    #[test]
    fn prop_near_duplicates_are_merged(jitter in prop::collection::vec(-1e-8..1e-8f64, 24)) {
        let (positions, faces) = cube_positions();
        // every corner twice, the second copy slightly off
        let mut doubled = positions.clone();
        for (i, q) in positions.iter().enumerate() {
            doubled.push(p(
                q.x() + jitter[3 * i],
                q.y() + jitter[3 * i + 1],
                q.z() + jitter[3 * i + 2],
            ));
        }
        let shifted: Vec<Vec<usize>> = faces
            .iter()
            .enumerate()
            .map(|(k, f)| f.iter().map(|&i| if k % 2 == 0 { i } else { i + 8 }).collect())
            .collect();

        let mesh = Mesh::from_face_list(&doubled, &shifted, &FaceListOptions::default()).unwrap();
        prop_assert_eq!(mesh.number_of_vertices(), 8);
        prop_assert_eq!(mesh.number_of_edges(), 12);
        prop_assert!(mesh.is_closed());
        prop_assert!(is_valid_mesh(&mesh));
    }

    #[test]
    fn prop_random_edits_keep_cube_valid(seed in any::<u64>(), steps in 1usize..40) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut mesh = cube();
        for _ in 0..steps {
            random_edit(&mut mesh, &mut rng);
            prop_assert!(is_valid_mesh(&mesh));
        }
        prop_assert_eq!(mesh.euler_characteristic(), 2);
        prop_assert!(mesh.is_closed());
    }
}
