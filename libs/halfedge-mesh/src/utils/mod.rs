//! # Mesh Utilities
//!
//! Queries and helpers built on top of the mesh API: border resolution,
//! border-bounded triangle selection, averaged directions, bounding boxes and
//! the consistency checker.

mod check;


pub use check::{check_mesh, CheckIssue, CheckReport};

use std::collections::{BTreeSet, HashSet};
use std::fmt::Write as _;

use config::constants::MIN_POLYGON_VERTICES;
use glam::DVec3;

use crate::error::{MeshError, MeshResult};
use crate::handles::{HalfEdgeId, TriangleId, VertexId};
use crate::mesh::Mesh;

/// Half-edges joining consecutive vertices of a closed polyline, the last
/// vertex being joined back to the first.
///
/// Fails with [`MeshError::NoSuchEdge`] on the first pair that has no
/// half-edge in that direction.
pub fn half_edges_along_border(mesh: &Mesh, border: &[VertexId]) -> MeshResult<Vec<HalfEdgeId>> {
    let n = border.len();
    (0..n)
        .map(|i| mesh.try_half_edge_to(border[i], border[(i + 1) % n]))
        .collect()
}

/// Triangles enclosed by a border, i.e. reachable from the triangles on the
/// left of the border half-edges without crossing one of them.
///
/// A border shorter than 3 half-edges selects nothing. A border that is not
/// closed and does not run between two mesh borders lets the fill escape.
pub fn triangles_inside_border(mesh: &Mesh, border: &[HalfEdgeId]) -> Vec<TriangleId> {
    if border.len() < MIN_POLYGON_VERTICES {
        return Vec::new();
    }
    let walls: HashSet<HalfEdgeId> = border.iter().copied().collect();

    let mut selected = Vec::new();
    let mut seen = HashSet::new();
    let mut stack: Vec<HalfEdgeId> = border.iter().rev().copied().collect();

    while let Some(h) = stack.pop() {
        let Ok(half) = mesh.halfedge(h) else {
            continue;
        };
        if !seen.insert(half.triangle()) {
            continue;
        }
        selected.push(half.triangle());

        let Ok(sides) = mesh.triangle_halfedges(half.triangle()) else {
            continue;
        };
        for side in sides.into_iter().rev() {
            if walls.contains(&side) {
                continue;
            }
            if let Some(o) = mesh.halfedge(side).ok().and_then(|s| s.opposite()) {
                stack.push(o);
            }
        }
    }
    selected
}

/// Area-weighted average of the normals of `triangles`, normalized. Zero
/// when the triangles cancel out or none is live.
///
/// Uses the stored triangle planes, so they must be current.
pub fn average_normals(mesh: &Mesh, triangles: &[TriangleId]) -> DVec3 {
    triangles
        .iter()
        .filter_map(|&t| mesh.triangle(t).ok())
        .map(|triangle| triangle.normal() * triangle.area())
        .sum::<DVec3>()
        .normalize_or_zero()
}

/// Area-weighted average of the tangents of `triangles`, normalized.
pub fn average_tangents(mesh: &Mesh, triangles: &[TriangleId]) -> DVec3 {
    triangles
        .iter()
        .filter_map(|&t| mesh.triangle(t).ok())
        .map(|triangle| triangle.tangent() * triangle.area())
        .sum::<DVec3>()
        .normalize_or_zero()
}

/// Distinct corners of `triangles`.
pub fn vertices_from_triangles(
    mesh: &Mesh,
    triangles: &[TriangleId],
) -> MeshResult<BTreeSet<VertexId>> {
    let mut vertices = BTreeSet::new();
    for &t in triangles {
        vertices.extend(mesh.triangle_vertices(t)?);
    }
    Ok(vertices)
}

/// Name of the vertex splitting the edge between `a` and `b`: `m` followed
/// by both names in lexicographic order, so either direction gives the same
/// name.
pub fn mid_name(mesh: &Mesh, a: VertexId, b: VertexId) -> MeshResult<String> {
    let a = mesh.vertex(a)?.name();
    let b = mesh.vertex(b)?.name();
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    Ok(format!("m{low}{high}"))
}

/// Axis-aligned bounding box `(min, max)` of the live vertices.
pub fn bounding_box(mesh: &Mesh) -> MeshResult<(DVec3, DVec3)> {
    let mut positions = mesh.vertices().map(|(_, vertex)| vertex.position());
    let first = positions.next().ok_or(MeshError::EmptyMesh)?;
    Ok(positions.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
}

/// Builds a new closed box mesh matching the bounding box of `mesh`, with
/// normals computed.
pub fn create_aabb(mesh: &Mesh) -> MeshResult<Mesh> {
    let (min, max) = bounding_box(mesh)?;
    let mut aabb = Mesh::new("AABB");

    // Corner cXYZ takes the max bound on every axis whose digit is 1. Names
    // use an upper-case letter for the max bound.
    let mut corner = |name: &str, x: f64, y: f64, z: f64| -> MeshResult<VertexId> {
        let v = aabb.add_vertex(name);
        aabb.vertex_mut(v)?.set_position(DVec3::new(x, y, z));
        Ok(v)
    };
    let c000 = corner("xyz", min.x, min.y, min.z)?;
    let c100 = corner("Xyz", max.x, min.y, min.z)?;
    let c010 = corner("xYz", min.x, max.y, min.z)?;
    let c110 = corner("XYz", max.x, max.y, min.z)?;
    let c001 = corner("xyZ", min.x, min.y, max.z)?;
    let c101 = corner("XyZ", max.x, min.y, max.z)?;
    let c011 = corner("xYZ", min.x, max.y, max.z)?;
    let c111 = corner("XYZ", max.x, max.y, max.z)?;

    aabb.add_quad(c101, c100, c110, c111)?;
    aabb.add_quad(c100, c000, c010, c110)?;
    aabb.add_quad(c000, c001, c011, c010)?;
    aabb.add_quad(c001, c101, c111, c011)?;
    aabb.add_quad(c111, c110, c010, c011)?;
    aabb.add_quad(c100, c101, c001, c000)?;

    aabb.compute_normals();
    Ok(aabb)
}

/// Multi-line description of every vertex and triangle, for debugging.
pub fn dump(mesh: &Mesh) -> String {
    let mut out = format!("{mesh}\n");
    for (v, vertex) in mesh.vertices() {
        let p = vertex.position();
        let _ = writeln!(
            out,
            "  {v} '{}' #{} ({:.4}, {:.4}, {:.4})",
            vertex.name(),
            vertex.number(),
            p.x,
            p.y,
            p.z
        );
    }
    for (t, _) in mesh.triangles() {
        if let Ok(corners) = mesh.triangle_vertices(t) {
            let names: Vec<&str> = corners
                .iter()
                .filter_map(|&v| mesh.vertex(v).ok().map(|vertex| vertex.name()))
                .collect();
            let _ = writeln!(out, "  {t} ({})", names.join(", "));
        }
    }
    out
}
