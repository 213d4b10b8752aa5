//! # Simplification Tests

#![allow(clippy::unwrap_used)]

use glam::DVec3;

use super::*;
use crate::fixtures::{fan, grid, octahedron};
use crate::utils::check_mesh;

#[test]
fn test_empty_mesh_is_rejected() {
    let mut mesh = Mesh::new("empty");
    assert_eq!(redux_count(&mut mesh, 3).unwrap_err(), MeshError::EmptyMesh);
    assert_eq!(redux_cost(&mut mesh, 1.0).unwrap_err(), MeshError::EmptyMesh);

    mesh.add_vertex("lonely");
    assert_eq!(redux_count(&mut mesh, 1).unwrap_err(), MeshError::EmptyMesh);
}

#[test]
fn test_interior_collapse_removes_two_triangles() {
    let (mut mesh, center, _) = fan(6);
    let report = redux_count(&mut mesh, 1).unwrap();

    assert_eq!(report.collapses_performed, 1);
    assert_eq!(report.original_triangles, 6);
    assert_eq!(report.final_triangles, 4);
    assert_eq!(report.final_vertices, 6);
    assert_eq!(report.border_collapses, 0);
    assert!(!mesh.contains_vertex_id(center));
    assert!(check_mesh(&mut mesh, false).is_valid());
}

#[test]
fn test_planar_quad_loses_one_triangle() {
    let (mut mesh, _) = grid(1, 1);
    let report = redux_count(&mut mesh, 1).unwrap();

    assert_eq!(report.collapses_performed, 1);
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(report.border_collapses, 1);
    assert_eq!(report.costs.len(), 1);
    assert!(report.costs[0].abs() < 1e-12);
    assert!(check_mesh(&mut mesh, false).is_valid());
}

#[test]
fn test_count_zero_changes_nothing() {
    let (mut mesh, _) = grid(2, 2);
    let report = redux_count(&mut mesh, 0).unwrap();
    assert!(!report.was_reduced());
    assert_eq!(mesh.vertex_count(), 9);
    assert_eq!(mesh.triangle_count(), 8);
}

#[test]
fn test_count_removes_requested_vertices() {
    let (mut mesh, _) = grid(4, 4);
    let report = redux_count(&mut mesh, 5).unwrap();

    assert_eq!(report.collapses_performed, 5);
    assert_eq!(report.costs.len(), 5);
    assert_eq!(mesh.vertex_count(), 25 - 5);
    assert_eq!(report.final_triangles, mesh.triangle_count());
    assert_eq!(
        report.original_triangles - report.final_triangles,
        report.triangles_removed()
    );
    assert!(check_mesh(&mut mesh, false).is_valid());
}

#[test]
fn test_single_steps_follow_edge_kind() {
    let (mut mesh, _) = grid(4, 4);
    for _ in 0..12 {
        let before = mesh.triangle_count();
        let report = redux_count(&mut mesh, 1).unwrap();
        if !report.was_reduced() {
            break;
        }
        let expected = if report.border_collapses == 1 { 1 } else { 2 };
        assert_eq!(before - mesh.triangle_count(), expected);
        assert!(check_mesh(&mut mesh, false).is_valid());
    }
}

#[test]
fn test_closed_surface_stops_at_tetrahedron() {
    let (mut mesh, _) = octahedron();
    let report = redux_count(&mut mesh, 100).unwrap();

    assert_eq!(report.collapses_performed, 2);
    assert_eq!(report.border_collapses, 0);
    assert_eq!(report.remaining_min_cost, None);
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangle_count(), 4);
    assert_eq!(mesh.edge_count(), 6);
    assert!(check_mesh(&mut mesh, false).is_valid());
}

#[test]
fn test_zero_cost_limit_removes_nothing() {
    let (mut mesh, _) = grid(3, 3);
    let report = redux_cost(&mut mesh, 0.0).unwrap();
    assert_eq!(report.collapses_performed, 0);
    assert_eq!(mesh.triangle_count(), 18);
}

#[test]
fn test_flat_grid_collapses_below_threshold() {
    let (mut mesh, _) = grid(3, 3);
    let report = redux_cost(&mut mesh, 1e-9).unwrap();

    assert!(report.was_reduced());
    assert!(report.costs.iter().all(|&c| c < 1e-9));
    if let Some(next) = report.remaining_min_cost {
        assert!(next >= 1e-9);
    }

    // Survivors keep their positions
    for (_, vertex) in mesh.vertices() {
        assert!(vertex.position().z.abs() < 1e-12);
    }
    assert!(report.final_vertices < 16);
    assert!(check_mesh(&mut mesh, false).is_valid());
}

#[test]
fn test_spike_survives_cheap_reduction() {
    let (mut mesh, ids) = grid(4, 4);
    let spike = ids[12];
    mesh.vertex_mut(spike)
        .unwrap()
        .set_position(DVec3::new(2.0, 2.0, 1.0));

    let report = redux_cost(&mut mesh, 1e-6).unwrap();
    assert!(report.was_reduced());
    assert!(mesh.contains_vertex_id(spike));
    assert!(report.max_cost() < 1e-6);
    assert!(check_mesh(&mut mesh, false).is_valid());
}

#[test]
fn test_curved_surface_has_positive_costs() {
    let (mut mesh, _) = octahedron();
    let report = redux_cost(&mut mesh, 1e-6).unwrap();
    assert_eq!(report.collapses_performed, 0);
    assert!(report.remaining_min_cost.unwrap() >= 1e-6);
    assert_eq!(mesh.triangle_count(), 8);
}

#[test]
fn test_unguarded_config_still_reduces() {
    let (mut mesh, _) = grid(3, 3);
    let config = SimplifyConfig::new(1e-12, false).unwrap();
    let report = Simplifier::with_config(&mut mesh, config)
        .redux_count(3)
        .unwrap();
    assert_eq!(report.collapses_performed, 3);
    assert_eq!(mesh.vertex_count(), 13);
}

#[test]
fn test_report_display() {
    let (mut mesh, _, _) = fan(6);
    let report = redux_count(&mut mesh, 1).unwrap();
    let text = report.to_string();
    assert!(text.contains("7 → 6 vertices"));
    assert!(text.contains("6 → 4 triangles"));
}
