//! # Mesh Processing
//!
//! Higher-level edits composed from the topology primitives:
//!
//! - **extrude_polygon** / **extrude_triangle**: lift a region and wall it in
//! - **bevel_vertex**: cut a corner off with a plane
//! - **subdivide** / **subdivide_all**: split triangles 1-to-4, optionally
//!   bending new vertices along Hermite curves
//! - **split_border**: detach the region inside a border loop
//! - **homothety** / **transform**: move vertices
//!
//! Parameters are validated before the first change. A topology error in a
//! later step leaves the earlier steps applied.

mod extrude;
mod subdivide;


pub use extrude::{bevel_vertex, extrude_polygon, extrude_triangle};
pub use subdivide::{subdivide, subdivide_all};

use std::collections::BTreeMap;

use glam::DMat4;
use tracing::debug;

use crate::error::MeshResult;
use crate::handles::{TriangleId, VertexId};
use crate::mesh::Mesh;
use crate::utils::{half_edges_along_border, triangles_inside_border};

/// Suffix appended to the name of a vertex copied by a processing step.
pub const CLONE_SUFFIX: &str = "clone";

/// Scales the corners of `t` by `scale` about the triangle center.
///
/// Corners are shared, so the triangles around them deform too. Their planes
/// are refreshed; vertex normals are not.
pub fn homothety(mesh: &mut Mesh, t: TriangleId, scale: f64) -> MeshResult<()> {
    let corners = mesh.triangle_vertices(t)?;
    mesh.update_triangle_plane(t);
    let center = mesh.triangles[t].center();
    for v in corners {
        let p = mesh.vertices[v].position();
        mesh.vertices[v].set_position(center + (p - center) * scale);
    }
    refresh_planes_around(mesh, &corners);
    Ok(())
}

/// Applies `matrix` to every vertex position and recomputes normals.
pub fn transform(mesh: &mut Mesh, matrix: DMat4) {
    for v in mesh.vertex_list() {
        let p = mesh.vertices[v].position();
        mesh.vertices[v].set_position(matrix.transform_point3(p));
    }
    mesh.compute_normals();
}

/// Detaches the region inside `border` from the rest of the mesh. Every
/// border vertex gets a copy that replaces it in the inside triangles.
///
/// Returns the copies in border order, or nothing when the border is shorter
/// than two vertices or encloses no triangle.
pub fn split_border(mesh: &mut Mesh, border: &[VertexId]) -> MeshResult<Vec<VertexId>> {
    if border.len() < 2 {
        return Ok(Vec::new());
    }
    let halves = half_edges_along_border(mesh, border)?;
    let inside = triangles_inside_border(mesh, &halves);
    if inside.is_empty() {
        return Ok(Vec::new());
    }

    let copies = detach(mesh, border, &inside)?;
    debug!(
        mesh = mesh.name(),
        border = border.len(),
        triangles = inside.len(),
        "Split border"
    );
    Ok(copies)
}

/// Copies every vertex of `border` and swaps the copies into `triangles`.
/// Returns the copies in border order.
fn detach(
    mesh: &mut Mesh,
    border: &[VertexId],
    triangles: &[TriangleId],
) -> MeshResult<Vec<VertexId>> {
    let mut copies = BTreeMap::new();
    for &v in border {
        if !copies.contains_key(&v) {
            copies.insert(v, mesh.clone_vertex(v, CLONE_SUFFIX)?);
        }
    }
    for &t in triangles {
        for v in mesh.triangle_vertices(t)? {
            if let Some(&copy) = copies.get(&v) {
                mesh.replace_triangle_vertex(t, v, copy)?;
            }
        }
    }
    Ok(border.iter().filter_map(|v| copies.get(v).copied()).collect())
}

/// Refreshes the planes of every triangle touching one of `vertices`.
fn refresh_planes_around(mesh: &mut Mesh, vertices: &[VertexId]) {
    for &v in vertices {
        for t in mesh.triangles_around(v) {
            mesh.update_triangle_plane(t);
        }
    }
}
