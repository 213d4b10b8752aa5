//! # Subdivision
//!
//! ```text
//!          C                    C
//!         / \                  / \
//!        /   \               m2---m1
//!       /     \      =>      / \ / \
//!      A ----- B            A---m0--B
//! ```
//!
//! Midpoints are named with [`mid_name`], and an existing vertex of that name
//! is reused. Neighboring triangles therefore share their midpoints and the
//! result has no T-junctions, as long as vertex names are unique.

use glam::DVec3;

use crate::error::MeshResult;
use crate::handles::{TriangleId, VertexId};
use crate::mesh::Mesh;
use crate::utils::mid_name;

/// Splits `t` into four triangles, `steps` times over.
///
/// With `smooth` above 0, midpoints follow Hermite curves whose end tangents
/// lie in the tangent planes given by the vertex normals, scaled by `smooth`
/// times the edge length. Otherwise they are plain midpoints. Vertex normals
/// should be current when smoothing.
pub fn subdivide(
    mesh: &mut Mesh,
    t: TriangleId,
    steps: u32,
    smooth: f64,
) -> MeshResult<Vec<TriangleId>> {
    let corners = mesh.triangle_vertices(t)?;
    if steps == 0 {
        return Ok(vec![t]);
    }

    let mut mids = corners;
    for (i, mid) in mids.iter_mut().enumerate() {
        *mid = midpoint(mesh, corners[i], corners[(i + 1) % 3], smooth)?;
    }
    mesh.del_triangle(t)?;

    let mut parts = Vec::new();
    for i in 0..3 {
        let corner = mesh.add_triangle(corners[i], mids[i], mids[(i + 2) % 3])?;
        mesh.update_triangle_plane(corner);
        parts.extend(subdivide(mesh, corner, steps - 1, smooth)?);
    }
    let center = mesh.add_triangle(mids[0], mids[1], mids[2])?;
    mesh.update_triangle_plane(center);
    parts.extend(subdivide(mesh, center, steps - 1, smooth)?);
    Ok(parts)
}

/// Subdivides every triangle of `triangles`. Returns the resulting
/// triangles, or `triangles` itself when `steps` is 0.
pub fn subdivide_all(
    mesh: &mut Mesh,
    triangles: &[TriangleId],
    steps: u32,
    smooth: f64,
) -> MeshResult<Vec<TriangleId>> {
    if steps == 0 {
        return Ok(triangles.to_vec());
    }
    let mut parts = Vec::with_capacity(triangles.len() * 4);
    for &t in triangles {
        parts.extend(subdivide(mesh, t, steps, smooth)?);
    }
    Ok(parts)
}

/// Existing or new vertex halfway between `s0` and `s1`.
fn midpoint(mesh: &mut Mesh, s0: VertexId, s1: VertexId, smooth: f64) -> MeshResult<VertexId> {
    let name = mid_name(mesh, s0, s1)?;
    if let Some(m) = mesh.vertex_by_name(&name) {
        return Ok(m);
    }
    if smooth <= 0.0 {
        return mesh.lerp_vertex(s0, s1, 0.5, name);
    }

    let (a, b) = (mesh.vertex(s0)?, mesh.vertex(s1)?);
    let chord = (b.position() - a.position()) * smooth;
    let t0 = tangent_along(chord, a.normal());
    let t1 = tangent_along(chord, b.normal());
    mesh.hermite_vertex(s0, t0, s1, t1, 0.5, name)
}

/// Projection of `chord` onto the plane of `normal`, up to its length.
fn tangent_along(chord: DVec3, normal: DVec3) -> DVec3 {
    normal.cross(chord.cross(normal))
}
