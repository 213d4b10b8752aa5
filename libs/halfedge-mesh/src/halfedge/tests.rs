//! # Half-Edge Topology Tests
//!
//! Creation, pairing, collapse and flip.

#![allow(clippy::unwrap_used)]

use glam::DVec3;

use super::*;
use crate::fixtures::{fan, grid, octahedron, tetrahedron, vertex_at};
use crate::utils::check_mesh;

fn single_triangle() -> (Mesh, [VertexId; 3]) {
    let mut mesh = Mesh::new("single");
    let a = vertex_at(&mut mesh, "A", DVec3::ZERO);
    let b = vertex_at(&mut mesh, "B", DVec3::X);
    let c = vertex_at(&mut mesh, "C", DVec3::Y);
    mesh.add_triangle(a, b, c).unwrap();
    (mesh, [a, b, c])
}

#[test]
fn test_triangle_half_edges_form_cycle() {
    let (mesh, [a, b, c]) = single_triangle();
    assert_eq!(mesh.halfedge_count(), 3);
    assert_eq!(mesh.edge_count(), 3);

    let ab = mesh.half_edge_to(a, b).unwrap();
    let bc = mesh.half_edge_to(b, c).unwrap();
    let ca = mesh.half_edge_to(c, a).unwrap();
    assert_eq!(mesh.halfedge(ab).unwrap().next(), bc);
    assert_eq!(mesh.halfedge(bc).unwrap().next(), ca);
    assert_eq!(mesh.halfedge(ca).unwrap().next(), ab);

    for h in [ab, bc, ca] {
        let half = mesh.halfedge(h).unwrap();
        assert!(half.is_border());
        let next = mesh.halfedge(half.next()).unwrap();
        assert_eq!(half.target(), next.origin());
    }
    assert!(mesh.half_edge_to(b, a).is_none());
}

#[test]
fn test_shared_edge_pairs_opposites() {
    let (mut mesh, [a, b, _]) = single_triangle();
    let d = vertex_at(&mut mesh, "D", DVec3::new(1.0, -1.0, 0.0));
    mesh.add_triangle(b, a, d).unwrap();

    let ab = mesh.half_edge_to(a, b).unwrap();
    let ba = mesh.half_edge_to(b, a).unwrap();
    assert_eq!(mesh.halfedge(ab).unwrap().opposite(), Some(ba));
    assert_eq!(mesh.halfedge(ba).unwrap().opposite(), Some(ab));
    assert_eq!(mesh.halfedge(ab).unwrap().edge(), mesh.halfedge(ba).unwrap().edge());
    assert_eq!(mesh.edge_count(), 5);
}

#[test]
fn test_duplicate_half_edge_is_rejected() {
    let (mut mesh, [a, b, _]) = single_triangle();
    let d = vertex_at(&mut mesh, "D", DVec3::new(1.0, 1.0, 0.0));

    let err = mesh.add_triangle(a, b, d).unwrap_err();
    assert_eq!(err, MeshError::DuplicateHalfEdge { from: a, to: b });
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.halfedge_count(), 3);
    assert_eq!(mesh.edge_count(), 3);
}

#[test]
fn test_third_triangle_on_edge_is_non_manifold() {
    let (mut mesh, [a, b, _]) = single_triangle();
    let d = vertex_at(&mut mesh, "D", DVec3::new(1.0, -1.0, 0.0));
    let e = vertex_at(&mut mesh, "E", DVec3::new(0.5, 0.5, 1.0));
    mesh.add_triangle(b, a, d).unwrap();

    let err = mesh.add_triangle(a, b, e).unwrap_err();
    assert_eq!(err, MeshError::NonManifoldEdge { from: a, to: b });
    assert_eq!(mesh.triangle_count(), 2);
    assert!(check_mesh(&mut mesh, false).is_valid());
}

#[test]
fn test_outgoing_matches_triangles_around() {
    let (mesh, center, ring) = fan(6);
    assert_eq!(mesh.outgoing(center).count(), 6);
    for &v in &ring {
        assert_eq!(mesh.outgoing(v).count(), mesh.triangles_around(v).len());
        assert_eq!(mesh.triangles_around(v).len(), 2);
    }
}

#[test]
fn test_collapse_interior_edge() {
    let (mut mesh, [px, _, py, ..]) = octahedron();
    let h = mesh.half_edge_to(px, py).unwrap();

    let kept = mesh.collapse(h).unwrap();
    assert_eq!(kept, py);
    assert!(!mesh.contains_vertex_id(px));
    assert_eq!(mesh.vertex_count(), 5);
    assert_eq!(mesh.triangle_count(), 6);
    assert_eq!(mesh.edge_count(), 9);
    assert!(!mesh.contains_halfedge_id(h));

    // Still closed: every half-edge is paired
    for h in mesh.halfedge_list() {
        assert!(mesh.halfedge(h).unwrap().opposite().is_some());
    }
    assert!(check_mesh(&mut mesh, false).is_valid());
}

#[test]
fn test_collapse_border_edge() {
    let (mut mesh, ids) = grid(1, 1);
    let h = mesh.half_edge_to(ids[0], ids[1]).unwrap();

    let kept = mesh.collapse(h).unwrap();
    assert_eq!(kept, ids[1]);
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.edge_count(), 3);
    assert!(check_mesh(&mut mesh, false).is_valid());
}

#[test]
fn test_collapse_rewires_incoming_border_half_edges() {
    let (mut mesh, ids) = grid(2, 2);
    // Interior vertex (1, 1) merges onto (2, 1)
    let center = ids[4];
    let right = ids[5];
    let h = mesh.half_edge_to(center, right).unwrap();

    mesh.collapse(h).unwrap();
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 6);
    for h in mesh.halfedge_list() {
        let half = mesh.halfedge(h).unwrap();
        assert_ne!(half.origin(), center);
        assert_ne!(half.target(), center);
    }
    assert!(check_mesh(&mut mesh, false).is_valid());
}

#[test]
fn test_can_collapse_rejects_shared_outside_neighbor() {
    let mut mesh = Mesh::new("pinch");
    let a = vertex_at(&mut mesh, "a", DVec3::ZERO);
    let b = vertex_at(&mut mesh, "b", DVec3::X);
    let c = vertex_at(&mut mesh, "c", DVec3::new(0.5, 1.0, 0.0));
    let x = vertex_at(&mut mesh, "x", DVec3::new(0.5, -2.0, 0.0));
    let p = vertex_at(&mut mesh, "p", DVec3::new(-1.0, -1.0, 0.0));
    let q = vertex_at(&mut mesh, "q", DVec3::new(2.0, -1.0, 0.0));
    mesh.add_triangle(a, b, c).unwrap();
    mesh.add_triangle(a, p, x).unwrap();
    mesh.add_triangle(x, q, b).unwrap();

    let h = mesh.half_edge_to(a, b).unwrap();
    assert!(!mesh.can_collapse(h).unwrap());
    assert_eq!(
        mesh.collapse_guarded(h).unwrap_err(),
        MeshError::NonManifoldCollapse(h)
    );
    assert_eq!(mesh.vertex_count(), 6);
    assert_eq!(mesh.triangle_count(), 3);
}

#[test]
fn test_can_collapse_rejects_interior_edge_between_borders() {
    let (mesh, ids) = grid(1, 1);
    let side = mesh.half_edge_to(ids[0], ids[1]).unwrap();
    let diagonal = mesh.half_edge_to(ids[1], ids[2]).unwrap();
    assert!(mesh.can_collapse(side).unwrap());
    assert!(!mesh.can_collapse(diagonal).unwrap());
}

#[test]
fn test_collapse_guarded_allows_legal_collapse() {
    let (mut mesh, center, ring) = fan(6);
    let h = mesh.half_edge_to(center, ring[0]).unwrap();
    assert_eq!(mesh.collapse_guarded(h).unwrap(), ring[0]);
    assert_eq!(mesh.triangle_count(), 4);
    assert!(check_mesh(&mut mesh, false).is_valid());
}

#[test]
fn test_can_collapse_rejects_tetrahedron_edges() {
    let (mesh, _) = tetrahedron();
    for h in mesh.halfedge_list() {
        assert!(!mesh.can_collapse(h).unwrap(), "{h} collapsed");
    }
}

#[test]
fn test_can_collapse_rejects_two_sided_triangle() {
    let (mut mesh, [a, b, c]) = single_triangle();
    mesh.add_triangle(b, a, c).unwrap();
    assert_eq!(mesh.edge_count(), 3);
    for h in mesh.halfedge_list() {
        assert!(!mesh.can_collapse(h).unwrap(), "{h} collapsed");
    }
}

#[test]
fn test_guarded_collapses_stop_at_tetrahedron() {
    let (mut mesh, [px, _, py, _, pz, _]) = octahedron();

    let h = mesh.half_edge_to(px, py).unwrap();
    mesh.collapse_guarded(h).unwrap();
    let h = mesh.half_edge_to(pz, py).unwrap();
    mesh.collapse_guarded(h).unwrap();

    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangle_count(), 4);
    assert_eq!(mesh.edge_count(), 6);
    for h in mesh.halfedge_list() {
        assert!(!mesh.can_collapse(h).unwrap());
    }
    assert!(check_mesh(&mut mesh, false).is_valid());
}

#[test]
fn test_flip_swaps_diagonal() {
    let (mut mesh, ids) = grid(1, 1);
    // Diagonal runs from (1, 0) to (0, 1)
    let h = mesh.half_edge_to(ids[1], ids[2]).unwrap();
    let t = mesh.halfedge(h).unwrap().triangle();

    mesh.flip(h).unwrap();
    assert!(mesh.half_edge_to(ids[1], ids[2]).is_none());
    assert!(mesh.half_edge_to(ids[2], ids[1]).is_none());
    assert_eq!(mesh.half_edge_to(ids[3], ids[0]), Some(h));
    assert!(mesh.half_edge_to(ids[0], ids[3]).is_some());
    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.edge_count(), 5);
    assert!(mesh.contains_triangle_id(t));

    // Both triangles still face +Z
    mesh.compute_normals();
    for (_, triangle) in mesh.triangles() {
        assert!(triangle.normal().z > 0.99);
    }
    assert!(check_mesh(&mut mesh, false).is_valid());
}

#[test]
fn test_flip_border_half_edge_fails() {
    let (mut mesh, ids) = grid(1, 1);
    let h = mesh.half_edge_to(ids[0], ids[1]).unwrap();
    assert_eq!(
        mesh.flip(h).unwrap_err(),
        MeshError::NoSuchEdge {
            from: ids[1],
            to: ids[0]
        }
    );
}

#[test]
fn test_flip_onto_existing_edge_fails() {
    let (mut mesh, [a, b, ..]) = tetrahedron();
    let h = mesh.half_edge_to(a, b).unwrap();
    assert!(matches!(
        mesh.flip(h),
        Err(MeshError::NonManifoldEdge { .. })
    ));
    assert!(check_mesh(&mut mesh, false).is_valid());
}

#[test]
fn test_destroyed_half_edge_frees_unshared_edge() {
    let (mut mesh, [a, b, c]) = single_triangle();
    let d = vertex_at(&mut mesh, "D", DVec3::new(1.0, -1.0, 0.0));
    let t2 = mesh.add_triangle(b, a, d).unwrap();
    assert_eq!(mesh.edge_count(), 5);

    mesh.del_triangle(t2).unwrap();
    assert_eq!(mesh.edge_count(), 3);
    let ab = mesh.half_edge_to(a, b).unwrap();
    assert!(mesh.halfedge(ab).unwrap().is_border());
    assert_eq!(mesh.outgoing(a).count(), 1);
    assert!(mesh.half_edge_to(b, c).is_some());
}
