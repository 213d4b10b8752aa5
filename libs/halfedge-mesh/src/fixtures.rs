//! Small meshes shared by the unit tests.

use glam::DVec3;

use crate::handles::VertexId;
use crate::mesh::Mesh;

pub(crate) fn vertex_at(mesh: &mut Mesh, name: &str, p: DVec3) -> VertexId {
    let v = mesh.add_vertex(name);
    mesh.vertex_mut(v).unwrap().set_position(p);
    v
}

/// Flat `nx` × `ny` grid of unit quads in the XY plane, each split along the
/// diagonal from (i+1, j) to (i, j+1). Vertices are row-major.
pub(crate) fn grid(nx: usize, ny: usize) -> (Mesh, Vec<VertexId>) {
    let mut mesh = Mesh::new("grid");
    let mut ids = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        for i in 0..=nx {
            ids.push(vertex_at(
                &mut mesh,
                &format!("g{i}_{j}"),
                DVec3::new(i as f64, j as f64, 0.0),
            ));
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

/// Closed tetrahedron with outward CCW faces.
pub(crate) fn tetrahedron() -> (Mesh, [VertexId; 4]) {
    let mut mesh = Mesh::new("tetrahedron");
    let a = vertex_at(&mut mesh, "A", DVec3::ZERO);
    let b = vertex_at(&mut mesh, "B", DVec3::X);
    let c = vertex_at(&mut mesh, "C", DVec3::Y);
    let d = vertex_at(&mut mesh, "D", DVec3::Z);
    mesh.add_triangle(a, c, b).unwrap();
    mesh.add_triangle(a, b, d).unwrap();
    mesh.add_triangle(a, d, c).unwrap();
    mesh.add_triangle(b, c, d).unwrap();
    (mesh, [a, b, c, d])
}

/// Closed octahedron with vertices on the axes, in the order
/// +X, -X, +Y, -Y, +Z, -Z.
pub(crate) fn octahedron() -> (Mesh, [VertexId; 6]) {
    let mut mesh = Mesh::new("octahedron");
    let px = vertex_at(&mut mesh, "+X", DVec3::X);
    let nx = vertex_at(&mut mesh, "-X", -DVec3::X);
    let py = vertex_at(&mut mesh, "+Y", DVec3::Y);
    let ny = vertex_at(&mut mesh, "-Y", -DVec3::Y);
    let pz = vertex_at(&mut mesh, "+Z", DVec3::Z);
    let nz = vertex_at(&mut mesh, "-Z", -DVec3::Z);
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
    (mesh, [px, nx, py, ny, pz, nz])
}

/// Flat fan of `k` triangles around a center vertex; the ring is CCW.
pub(crate) fn fan(k: usize) -> (Mesh, VertexId, Vec<VertexId>) {
    let mut mesh = Mesh::new("fan");
    let center = vertex_at(&mut mesh, "C", DVec3::ZERO);
    let ring: Vec<VertexId> = (0..k)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / k as f64;
            vertex_at(
                &mut mesh,
                &format!("R{i}"),
                DVec3::new(angle.cos(), angle.sin(), 0.0),
            )
        })
        .collect();
    for i in 0..k {
        mesh.add_triangle(center, ring[i], ring[(i + 1) % k]).unwrap();
    }
    (mesh, center, ring)
}
