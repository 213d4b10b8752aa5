//! Derived geometry and the flattened buffers handed to a renderer.
//!
//! All geometry is computed in f64. Export to f32 only happens in the
//! `*_f32` helpers.

use glam::DVec3;

use crate::handles::{Handle, TriangleId, VertexId};
use crate::mesh::Mesh;

impl Mesh {
    /// Recomputes triangle planes and vertex normals, and renumbers live
    /// vertices densely in list order.
    ///
    /// A vertex normal is the normalized, unweighted sum of the normals of
    /// the triangles around it. Calling this twice without editing the mesh
    /// gives the same result.
    pub fn compute_normals(&mut self) {
        let ids = self.triangle_list();
        for &t in &ids {
            self.update_triangle_plane(t);
        }

        let mut sums = vec![DVec3::ZERO; self.vertices.slot_count()];
        for &t in &ids {
            let normal = self.triangles[t].normal();
            for h in self.triangle_halfedges_of(self.triangles[t].halfedge) {
                sums[self.halfedges[h].origin.index()] += normal;
            }
        }

        let vertices = self.vertex_list();
        for (number, v) in vertices.into_iter().enumerate() {
            let vertex = &mut self.vertices[v];
            vertex.set_normal(sums[v.index()].normalize_or_zero());
            vertex.set_number(number as u32);
        }
    }

    /// Recomputes triangle and vertex tangents from the second texture
    /// coordinate.
    pub fn compute_tangents(&mut self) {
        let ids = self.triangle_list();
        let mut sums = vec![DVec3::ZERO; self.vertices.slot_count()];
        for t in ids {
            let corners = self
                .triangle_halfedges_of(self.triangles[t].halfedge)
                .map(|h| self.halfedges[h].origin);
            let [a, b, c] = corners.map(|v| &self.vertices[v]);

            let ab = b.position() - a.position();
            let ac = c.position() - a.position();
            let dt_ab = b.tex_coord().y - a.tex_coord().y;
            let dt_ac = c.tex_coord().y - a.tex_coord().y;
            let tangent = (ab * dt_ac - ac * dt_ab).normalize_or_zero();

            self.triangles[t].set_tangent(tangent);
            for v in corners {
                sums[v.index()] += tangent;
            }
        }

        for v in self.vertex_list() {
            self.vertices[v].set_tangent(sums[v.index()].normalize_or_zero());
        }
    }

    /// Recomputes normal, area, center and plane constant of `t`.
    pub(crate) fn update_triangle_plane(&mut self, t: TriangleId) {
        let [a, b, c] = self
            .triangle_halfedges_of(self.triangles[t].halfedge)
            .map(|h| self.vertices[self.halfedges[h].origin].position());
        self.triangles[t].update_plane(a, b, c);
    }

    /// Recomputes the normal of `v` from the current normals of the
    /// triangles around it.
    pub(crate) fn update_vertex_normal(&mut self, v: VertexId) {
        let sum: DVec3 = self
            .triangles_around(v)
            .into_iter()
            .map(|t| self.triangles[t].normal())
            .sum();
        self.vertices[v].set_normal(sum.normalize_or_zero());
    }

    /// Exports positions as a flattened `[x, y, z, ...]` array in vertex
    /// list order.
    pub fn positions_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.vertex_count() * 3);
        for (_, vertex) in self.vertices.iter() {
            let p = vertex.position();
            result.extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
        }
        result
    }

    /// Exports vertex normals as a flattened array in vertex list order.
    pub fn normals_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.vertex_count() * 3);
        for (_, vertex) in self.vertices.iter() {
            let n = vertex.normal();
            result.extend_from_slice(&[n.x as f32, n.y as f32, n.z as f32]);
        }
        result
    }

    /// Exports triangle corners as indices into the arrays of
    /// [`Mesh::positions_f32`] and [`Mesh::normals_f32`].
    pub fn indices_u32(&self) -> Vec<u32> {
        let mut rank = vec![0u32; self.vertices.slot_count()];
        for (number, v) in self.vertices.ids().enumerate() {
            rank[v.index()] = number as u32;
        }

        let mut result = Vec::with_capacity(self.triangle_count() * 3);
        for (_, triangle) in self.triangles.iter() {
            for h in self.triangle_halfedges_of(triangle.halfedge) {
                result.push(rank[self.halfedges[h].origin.index()]);
            }
        }
        result
    }
}
