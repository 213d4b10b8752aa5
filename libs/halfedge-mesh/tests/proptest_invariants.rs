//! Property-based tests for mesh editing and simplification.
//!
//! Random height fields and edit sequences, checked against the structural
//! invariants of the half-edge representation.
//!
//! Run with: cargo test -p halfedge-mesh -- proptest

#![allow(clippy::unwrap_used)]

use glam::DVec3;
use halfedge_mesh::{simplify, utils, Mesh, VertexId};
use proptest::prelude::*;

// =============================================================================
// Mesh builders
// =============================================================================

fn vertex_at(mesh: &mut Mesh, name: String, p: DVec3) -> VertexId {
    let v = mesh.add_vertex(name);
    mesh.vertex_mut(v).unwrap().set_position(p);
    v
}

/// Grid of `nx` × `ny` cells whose vertex heights come from `heights`,
/// cycled as needed.
fn height_field(nx: usize, ny: usize, heights: &[f64]) -> (Mesh, Vec<VertexId>) {
    let mut mesh = Mesh::new("field");
    let mut ids = Vec::new();
    for j in 0..=ny {
        for i in 0..=nx {
            let z = heights[ids.len() % heights.len()];
            let p = DVec3::new(i as f64, j as f64, z);
            ids.push(vertex_at(&mut mesh, format!("v{i}_{j}"), p));
        }
    }
    let at = |i: usize, j: usize| ids[j * (nx + 1) + i];
    for j in 0..ny {
        for i in 0..nx {
            mesh.add_quad(at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1))
                .unwrap();
        }
    }
    (mesh, ids)
}

/// Octahedron with each vertex pushed out by its own radius.
fn lumpy_octahedron(radii: &[f64; 6]) -> Mesh {
    let mut mesh = Mesh::new("octahedron");
    let axes = [
        DVec3::X,
        -DVec3::X,
        DVec3::Y,
        -DVec3::Y,
        DVec3::Z,
        -DVec3::Z,
    ];
    let v: Vec<VertexId> = axes
        .iter()
        .zip(radii)
        .enumerate()
        .map(|(i, (&axis, &r))| vertex_at(&mut mesh, format!("a{i}"), axis * r))
        .collect();
    let [px, nx, py, ny, pz, nz] = [v[0], v[1], v[2], v[3], v[4], v[5]];
    for (a, b, c) in [
        (px, py, pz),
        (py, nx, pz),
        (nx, ny, pz),
        (ny, px, pz),
        (py, px, nz),
        (nx, py, nz),
        (ny, nx, nz),
        (px, ny, nz),
    ] {
        mesh.add_triangle(a, b, c).unwrap();
    }
    mesh
}

// =============================================================================
// Invariants
// =============================================================================

/// Checks what the consistency checker checks, plus the edge count law.
fn assert_topology(mesh: &mut Mesh) -> Result<(), TestCaseError> {
    let report = utils::check_mesh(mesh, false);
    prop_assert!(report.is_valid(), "issues: {:?}", report.issues);

    let mut paired = 0;
    let mut unpaired = 0;
    for h in mesh.halfedge_list() {
        let half = *mesh.halfedge(h).unwrap();
        let n1 = mesh.halfedge(half.next()).unwrap().next();
        let n2 = mesh.halfedge(n1).unwrap().next();
        prop_assert_eq!(n2, h);

        match half.opposite() {
            Some(o) => {
                prop_assert_eq!(mesh.halfedge(o).unwrap().opposite(), Some(h));
                paired += 1;
            }
            None => unpaired += 1,
        }
    }
    prop_assert_eq!(mesh.edge_count(), paired / 2 + unpaired);
    prop_assert_eq!(mesh.halfedge_count(), 3 * mesh.triangle_count());
    Ok(())
}

// =============================================================================
// Property Tests: Simplification
// =============================================================================

proptest! {
    /// Reduction by count keeps the mesh consistent and follows the count law.
    #[test]
    fn proptest_redux_count_keeps_topology(
        nx in 1usize..6,
        ny in 1usize..6,
        heights in prop::collection::vec(-0.5..0.5f64, 1..12),
        count in 0usize..20,
    ) {
        let (mut mesh, _) = height_field(nx, ny, &heights);
        let vertices = mesh.vertex_count();
        let triangles = mesh.triangle_count();

        let report = simplify::redux_count(&mut mesh, count).unwrap();
        prop_assert!(report.collapses_performed <= count);
        prop_assert_eq!(mesh.vertex_count(), vertices - report.collapses_performed);
        prop_assert_eq!(triangles - mesh.triangle_count(), report.triangles_removed());
        assert_topology(&mut mesh)?;
    }

    /// Every performed collapse was strictly cheaper than the limit.
    #[test]
    fn proptest_redux_cost_respects_limit(
        nx in 1usize..6,
        ny in 1usize..6,
        heights in prop::collection::vec(-0.5..0.5f64, 1..12),
        max_cost in 0.0..2.0f64,
    ) {
        let (mut mesh, _) = height_field(nx, ny, &heights);
        let report = simplify::redux_cost(&mut mesh, max_cost).unwrap();

        prop_assert!(report.costs.iter().all(|&c| c < max_cost));
        if let Some(next) = report.remaining_min_cost {
            prop_assert!(next >= max_cost);
        }
        assert_topology(&mut mesh)?;
    }

    /// Collapses on a closed surface keep it closed with Euler characteristic 2
    /// and never go below a tetrahedron.
    #[test]
    fn proptest_closed_surface_stays_closed(
        radii in prop::array::uniform6(0.5..2.0f64),
        count in 0usize..8,
    ) {
        let mut mesh = lumpy_octahedron(&radii);
        let report = simplify::redux_count(&mut mesh, count).unwrap();
        prop_assert_eq!(report.collapses_performed, count.min(2));
        prop_assert!(mesh.triangle_count() >= 4);

        for h in mesh.halfedge_list() {
            prop_assert!(mesh.halfedge(h).unwrap().opposite().is_some());
        }
        let euler = mesh.vertex_count() as i64 - mesh.edge_count() as i64
            + mesh.triangle_count() as i64;
        prop_assert_eq!(euler, 2);
        assert_topology(&mut mesh)?;
    }
}

// =============================================================================
// Property Tests: Editing
// =============================================================================

proptest! {
    /// Each guarded collapse removes one vertex, and two triangles on an
    /// interior edge or one on a border edge.
    #[test]
    fn proptest_collapse_count_law(
        nx in 1usize..5,
        ny in 1usize..5,
        heights in prop::collection::vec(-0.5..0.5f64, 1..8),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..12),
    ) {
        let (mut mesh, _) = height_field(nx, ny, &heights);
        for pick in picks {
            let halves = mesh.halfedge_list();
            if halves.is_empty() {
                break;
            }
            let h = halves[pick.index(halves.len())];
            if !mesh.can_collapse(h).unwrap() {
                continue;
            }
            let interior = mesh.halfedge(h).unwrap().opposite().is_some();
            let vertices = mesh.vertex_count();
            let triangles = mesh.triangle_count();

            mesh.collapse_guarded(h).unwrap();
            prop_assert_eq!(mesh.vertex_count(), vertices - 1);
            let expected = if interior { 2 } else { 1 };
            prop_assert_eq!(triangles - mesh.triangle_count(), expected);
        }
        assert_topology(&mut mesh)?;
    }

    /// Deleting arbitrary triangles leaves a consistent mesh.
    #[test]
    fn proptest_delete_triangles_keeps_topology(
        nx in 1usize..5,
        ny in 1usize..5,
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..10),
    ) {
        let (mut mesh, _) = height_field(nx, ny, &[0.0]);
        for pick in picks {
            let triangles = mesh.triangle_list();
            if triangles.is_empty() {
                break;
            }
            mesh.del_triangle(triangles[pick.index(triangles.len())]).unwrap();
        }
        assert_topology(&mut mesh)?;
    }

    /// Deleting a vertex removes exactly the triangles around it.
    #[test]
    fn proptest_delete_vertex_cascades(
        nx in 1usize..5,
        ny in 1usize..5,
        pick in any::<prop::sample::Index>(),
    ) {
        let (mut mesh, ids) = height_field(nx, ny, &[0.0]);
        let v = ids[pick.index(ids.len())];
        let around = mesh.triangles_around(v).len();
        let triangles = mesh.triangle_count();

        mesh.del_vertex(v).unwrap();
        prop_assert!(!mesh.contains_vertex_id(v));
        prop_assert_eq!(mesh.triangle_count(), triangles - around);
        assert_topology(&mut mesh)?;
    }

    /// Flips either succeed or leave the mesh untouched.
    #[test]
    fn proptest_flips_keep_topology(
        nx in 1usize..5,
        ny in 1usize..5,
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let (mut mesh, _) = height_field(nx, ny, &[0.0]);
        let triangles = mesh.triangle_count();
        let edges = mesh.edge_count();
        for pick in picks {
            let halves = mesh.halfedge_list();
            let h = halves[pick.index(halves.len())];
            let _ = mesh.flip(h);
            prop_assert_eq!(mesh.triangle_count(), triangles);
            prop_assert_eq!(mesh.edge_count(), edges);
        }
        assert_topology(&mut mesh)?;
    }
}
