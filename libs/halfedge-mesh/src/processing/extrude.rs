//! # Extrusion and Bevelling
//!
//! ## Extrusion
//!
//! ```text
//!   A1 ---- B1
//!   |  top  |          the region moves to A1 B1 ...
//!   A ----- B          quads (A, B, B1, A1) wall the gap
//! ```
//!
//! The region keeps its triangle handles; its border vertices are replaced
//! by copies, so the rest of the mesh stays attached to the originals.

use std::collections::BTreeMap;

use config::constants::EPSILON;
use glam::DVec3;
use tracing::debug;

use super::{detach, refresh_planes_around};
use crate::error::{MeshError, MeshResult};
use crate::handles::{TriangleId, VertexId};
use crate::mesh::Mesh;
use crate::utils::{
    average_normals, half_edges_along_border, mid_name, triangles_inside_border,
    vertices_from_triangles,
};

/// Moves the region inside `border` by `distance` along its area-weighted
/// normal and connects it back to the border with a strip of quads.
///
/// Returns the new border of the moved region, matching `border` vertex by
/// vertex. Returns nothing when the border encloses no triangle.
pub fn extrude_polygon(
    mesh: &mut Mesh,
    border: &[VertexId],
    distance: f64,
) -> MeshResult<Vec<VertexId>> {
    let halves = half_edges_along_border(mesh, border)?;
    let inside = triangles_inside_border(mesh, &halves);
    if inside.is_empty() {
        return Ok(Vec::new());
    }
    for &t in &inside {
        mesh.update_triangle_plane(t);
    }
    let offset = average_normals(mesh, &inside) * distance;

    let tops = detach(mesh, border, &inside)?;
    let moved = vertices_from_triangles(mesh, &inside)?;
    for &v in &moved {
        let p = mesh.vertices[v].position();
        mesh.vertices[v].set_position(p + offset);
    }
    wall(mesh, border, &tops)?;
    refresh_planes_around(mesh, &moved.into_iter().collect::<Vec<_>>());

    debug!(
        mesh = mesh.name(),
        border = border.len(),
        triangles = inside.len(),
        distance,
        "Extruded polygon"
    );
    Ok(tops)
}

/// Moves `t` by `distance` along its normal and walls it in with three
/// quads. The triangle keeps its handle.
pub fn extrude_triangle(mesh: &mut Mesh, t: TriangleId, distance: f64) -> MeshResult<TriangleId> {
    let corners = mesh.triangle_vertices(t)?;
    mesh.update_triangle_plane(t);
    let offset = mesh.triangles[t].normal() * distance;

    let tops = detach(mesh, &corners, &[t])?;
    for &v in &tops {
        let p = mesh.vertices[v].position();
        mesh.vertices[v].set_position(p + offset);
    }
    wall(mesh, &corners, &tops)?;
    refresh_planes_around(mesh, &tops);
    Ok(t)
}

/// Quads joining each side of `bottom` to the matching side of `top`.
fn wall(mesh: &mut Mesh, bottom: &[VertexId], top: &[VertexId]) -> MeshResult<()> {
    let n = bottom.len();
    for i in 0..n {
        let j = (i + 1) % n;
        mesh.add_quad(bottom[i], bottom[j], top[j], top[i])?;
    }
    Ok(())
}

/// Cuts the corner `v` off with the plane at `distance` below it along
/// `direction`, capping the hole with a polygon facing `direction`.
///
/// Every neighbor of `v` must lie further than `distance` below it, so that
/// the plane crosses each edge around `v`. Returns the cap outline in CCW
/// order around `direction`. Normals are recomputed.
pub fn bevel_vertex(
    mesh: &mut Mesh,
    v: VertexId,
    distance: f64,
    direction: DVec3,
) -> MeshResult<Vec<VertexId>> {
    let origin = mesh.vertex(v)?.position();
    let direction = direction.normalize_or_zero();
    if direction == DVec3::ZERO {
        return Err(MeshError::invalid("bevel direction is zero"));
    }
    if distance <= EPSILON {
        return Err(MeshError::invalid(format!(
            "bevel distance must be positive, got {distance}"
        )));
    }
    let fan = mesh.triangles_ordered_around(v);
    if fan.is_empty() {
        return Err(MeshError::invalid(format!("{v} has no triangle to bevel")));
    }

    // Fraction of each edge from v where the plane crosses it
    let mut cuts = BTreeMap::new();
    for s in mesh.neighbor_vertices(v) {
        let depth = direction.dot(origin - mesh.vertex(s)?.position());
        if depth <= distance {
            return Err(MeshError::invalid(format!(
                "bevel plane misses the edge from {v} to {s}"
            )));
        }
        cuts.insert(s, distance / depth);
    }

    let mut ring = Vec::with_capacity(cuts.len());
    let mut points: BTreeMap<VertexId, VertexId> = BTreeMap::new();
    for t in fan {
        let [_, s1, s2] = corners_from(mesh, t, v)?;
        let mut sides = [s1, s2];
        for side in &mut sides {
            let s = *side;
            *side = match points.get(&s) {
                Some(&m) => m,
                None => {
                    let k = cuts.get(&s).copied().unwrap_or(0.0);
                    let name = mid_name(mesh, v, s)?;
                    let m = mesh.lerp_vertex(v, s, k, name)?;
                    points.insert(s, m);
                    ring.push(m);
                    m
                }
            };
        }
        let [m1, m2] = sides;
        mesh.del_triangle(t)?;
        mesh.add_quad(s1, s2, m2, m1)?;
    }
    mesh.del_vertex(v)?;
    mesh.add_polygon(&ring, direction)?;
    mesh.compute_normals();

    debug!(mesh = mesh.name(), vertex = %v, cut = ring.len(), "Bevelled vertex");
    Ok(ring)
}

/// Corners of `t` starting at `v`.
fn corners_from(mesh: &Mesh, t: TriangleId, v: VertexId) -> MeshResult<[VertexId; 3]> {
    let mut corners = mesh.triangle_vertices(t)?;
    let at = corners.iter().position(|&c| c == v).unwrap_or(0);
    corners.rotate_left(at);
    Ok(corners)
}
