//! # Half-Edge Mesh
//!
//! The mesh owns every vertex, edge, half-edge and triangle in tombstoned
//! arenas and is the only place structural edits happen.
//!
//! ## Structure
//!
//! - **Vertex**: attributes plus the head of its outgoing sibling list
//! - **Edge**: undirected vertex pair, created with the first half-edge
//!   joining the pair and freed with the last one
//! - **HalfEdge**: directed side of exactly one triangle
//! - **Triangle**: three half-edges in a CCW `next` cycle
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use halfedge_mesh::Mesh;
//!
//! let mut mesh = Mesh::new("triangle");
//! let a = mesh.add_vertex("A");
//! let b = mesh.add_vertex("B");
//! let c = mesh.add_vertex("C");
//! mesh.vertex_mut(b).unwrap().set_position(DVec3::X);
//! mesh.vertex_mut(c).unwrap().set_position(DVec3::Y);
//!
//! let t = mesh.add_triangle(a, b, c).unwrap();
//! assert_eq!(mesh.triangle_vertices(t).unwrap(), [a, b, c]);
//! assert_eq!(mesh.edge_count(), 3);
//! ```

mod geometry;
mod polygon;
mod queries;


use std::fmt;

use glam::DVec3;

use crate::arena::Arena;
use crate::edge::Edge;
use crate::error::{MeshError, MeshResult};
use crate::halfedge::HalfEdge;
use crate::handles::{EdgeId, HalfEdgeId, TriangleId, VertexId};
use crate::triangle::Triangle;
use crate::vertex::Vertex;

/// Triangulated surface in half-edge form.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    name: String,
    pub(crate) vertices: Arena<VertexId, Vertex>,
    pub(crate) edges: Arena<EdgeId, Edge>,
    pub(crate) halfedges: Arena<HalfEdgeId, HalfEdge>,
    pub(crate) triangles: Arena<TriangleId, Triangle>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Display name, used in logs and `Display`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the mesh.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // =========================================================================
    // COUNTS AND LISTS
    // =========================================================================

    /// Number of live vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of live triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of live undirected edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of live half-edges, three per triangle.
    #[inline]
    pub fn halfedge_count(&self) -> usize {
        self.halfedges.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.len() == 0
    }

    /// Live vertices in insertion order.
    pub fn vertex_list(&self) -> Vec<VertexId> {
        self.vertices.ids().collect()
    }

    /// Live triangles in insertion order.
    pub fn triangle_list(&self) -> Vec<TriangleId> {
        self.triangles.ids().collect()
    }

    /// Live edges in insertion order.
    pub fn edge_list(&self) -> Vec<EdgeId> {
        self.edges.ids().collect()
    }

    /// Live half-edges in insertion order.
    pub fn halfedge_list(&self) -> Vec<HalfEdgeId> {
        self.halfedges.ids().collect()
    }

    /// Live vertices with their data, in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices.iter()
    }

    /// Live triangles with their data, in insertion order.
    pub fn triangles(&self) -> impl Iterator<Item = (TriangleId, &Triangle)> + '_ {
        self.triangles.iter()
    }

    // =========================================================================
    // ELEMENT ACCESS
    // =========================================================================

    /// Vertex data, or [`MeshError::DanglingReference`] for a removed handle.
    pub fn vertex(&self, v: VertexId) -> MeshResult<&Vertex> {
        self.vertices.try_get(v)
    }

    /// Mutable vertex data for setting attributes.
    pub fn vertex_mut(&mut self, v: VertexId) -> MeshResult<&mut Vertex> {
        self.vertices.try_get_mut(v)
    }

    /// Edge data, or an error for a removed handle.
    pub fn edge(&self, e: EdgeId) -> MeshResult<&Edge> {
        self.edges.try_get(e)
    }

    /// Half-edge data, or an error for a removed handle.
    pub fn halfedge(&self, h: HalfEdgeId) -> MeshResult<&HalfEdge> {
        self.halfedges.try_get(h)
    }

    /// Triangle data, or an error for a removed handle.
    pub fn triangle(&self, t: TriangleId) -> MeshResult<&Triangle> {
        self.triangles.try_get(t)
    }

    /// Whether `v` is a live vertex of this mesh.
    #[inline]
    pub fn contains_vertex_id(&self, v: VertexId) -> bool {
        self.vertices.contains(v)
    }

    /// Whether `t` is a live triangle of this mesh.
    #[inline]
    pub fn contains_triangle_id(&self, t: TriangleId) -> bool {
        self.triangles.contains(t)
    }

    /// Whether `h` is a live half-edge of this mesh.
    #[inline]
    pub fn contains_halfedge_id(&self, h: HalfEdgeId) -> bool {
        self.halfedges.contains(h)
    }

    // =========================================================================
    // VERTICES
    // =========================================================================

    /// Adds an isolated vertex at the origin.
    pub fn add_vertex(&mut self, name: impl Into<String>) -> VertexId {
        let number = self.vertices.slot_count() as u32;
        self.vertices.insert(Vertex::new(name, number))
    }

    /// Adds a copy of `v` named after it with `suffix` appended. The copy is
    /// isolated.
    pub fn clone_vertex(&mut self, v: VertexId, suffix: &str) -> MeshResult<VertexId> {
        let source = self.vertices.try_get(v)?.clone();
        let id = self.add_vertex(format!("{}{}", source.name(), suffix));
        self.vertices[id].copy_attributes(&source);
        Ok(id)
    }

    /// Adds a vertex whose attributes interpolate linearly from `v0`
    /// (`k = 0`) to `v1` (`k = 1`).
    pub fn lerp_vertex(
        &mut self,
        v0: VertexId,
        v1: VertexId,
        k: f64,
        name: impl Into<String>,
    ) -> MeshResult<VertexId> {
        let a = self.vertices.try_get(v0)?.clone();
        let b = self.vertices.try_get(v1)?.clone();
        let id = self.add_vertex(name);
        self.vertices[id].lerp_attributes(&a, &b, k);
        Ok(id)
    }

    /// Adds a vertex on the Hermite curve from `v0` to `v1` with end tangents
    /// `t0` and `t1`. Attributes other than the position interpolate
    /// linearly.
    pub fn hermite_vertex(
        &mut self,
        v0: VertexId,
        t0: DVec3,
        v1: VertexId,
        t1: DVec3,
        k: f64,
        name: impl Into<String>,
    ) -> MeshResult<VertexId> {
        let a = self.vertices.try_get(v0)?.clone();
        let b = self.vertices.try_get(v1)?.clone();
        let id = self.add_vertex(name);
        self.vertices[id].hermite_attributes(&a, t0, &b, t1, k);
        Ok(id)
    }

    /// Deletes `v` and every triangle containing it.
    pub fn del_vertex(&mut self, v: VertexId) -> MeshResult<()> {
        self.vertices.try_get(v)?;
        for t in self.triangles_around(v) {
            self.remove_triangle(t);
        }
        self.vertices.remove(v);
        Ok(())
    }

    // =========================================================================
    // TRIANGLES
    // =========================================================================

    /// Adds the triangle `(v1, v2, v3)` in CCW order.
    ///
    /// The mesh is unchanged when an error is returned.
    pub fn add_triangle(
        &mut self,
        v1: VertexId,
        v2: VertexId,
        v3: VertexId,
    ) -> MeshResult<TriangleId> {
        if v1 == v2 || v2 == v3 || v1 == v3 {
            return Err(MeshError::DegenerateFace(v1, v2, v3));
        }
        for v in [v1, v2, v3] {
            self.vertices.try_get(v)?;
        }
        self.check_new_half_edge(v1, v2)?;
        self.check_new_half_edge(v2, v3)?;
        self.check_new_half_edge(v3, v1)?;

        let t = self.triangles.next_id();
        let h1 = self.halfedges.next_id();
        let h2 = HalfEdgeId(h1.0 + 1);
        let h3 = HalfEdgeId(h1.0 + 2);

        self.triangles.insert(Triangle::new(h1));
        self.create_half_edge(v1, v2, t, h2);
        self.create_half_edge(v2, v3, t, h3);
        self.create_half_edge(v3, v1, t, h1);
        Ok(t)
    }

    /// Adds the quad `(v1, v2, v3, v4)` as triangles `(v1, v2, v4)` and
    /// `(v4, v2, v3)`.
    pub fn add_quad(
        &mut self,
        v1: VertexId,
        v2: VertexId,
        v3: VertexId,
        v4: VertexId,
    ) -> MeshResult<[TriangleId; 2]> {
        let first = self.add_triangle(v1, v2, v4)?;
        match self.add_triangle(v4, v2, v3) {
            Ok(second) => Ok([first, second]),
            Err(err) => {
                self.remove_triangle(first);
                Err(err)
            }
        }
    }

    /// Deletes `t` and its half-edges. Edges left without a half-edge are
    /// freed; vertices stay.
    pub fn del_triangle(&mut self, t: TriangleId) -> MeshResult<()> {
        self.triangles.try_get(t)?;
        self.remove_triangle(t);
        Ok(())
    }

    /// Swaps the corner `old` of `t` for `new`. The triangle keeps its handle
    /// and the half-edge leaving its third corner; the two half-edges
    /// touching `old` are rebuilt around `new`.
    ///
    /// Returns false when `old` is not a corner of `t`. The mesh is unchanged
    /// when an error is returned.
    pub fn replace_triangle_vertex(
        &mut self,
        t: TriangleId,
        old: VertexId,
        new: VertexId,
    ) -> MeshResult<bool> {
        let first = self.triangles.try_get(t)?.halfedge;
        self.vertices.try_get(new)?;
        let Some(ab) = self
            .triangle_halfedges_of(first)
            .into_iter()
            .find(|&h| self.halfedges[h].origin == old)
        else {
            return Ok(false);
        };
        if new == old {
            return Ok(true);
        }

        let bc = self.halfedges[ab].next;
        let ca = self.halfedges[bc].next;
        let (b, c) = (self.halfedges[bc].origin, self.halfedges[ca].origin);
        if new == b || new == c {
            return Err(MeshError::DegenerateFace(new, b, c));
        }
        self.check_new_half_edge(new, b)?;
        self.check_new_half_edge(c, new)?;

        self.destroy_half_edge(ab);
        self.destroy_half_edge(ca);
        let nb = self.halfedges.next_id();
        let cn = HalfEdgeId(nb.0 + 1);
        self.create_half_edge(new, b, t, bc);
        self.create_half_edge(c, new, t, nb);
        self.halfedges[bc].next = cn;
        self.triangles[t].halfedge = nb;
        self.update_triangle_plane(t);
        Ok(true)
    }

    /// Infallible removal of a live triangle.
    pub(crate) fn remove_triangle(&mut self, t: TriangleId) {
        let Some(first) = self.triangles.get(t).map(Triangle::halfedge) else {
            return;
        };
        let second = self.halfedges[first].next;
        let third = self.halfedges[second].next;
        for h in [first, second, third] {
            self.destroy_half_edge(h);
        }
        self.triangles.remove(t);
    }

    /// Corners of `t`, starting at the origin of its first half-edge.
    pub fn triangle_vertices(&self, t: TriangleId) -> MeshResult<[VertexId; 3]> {
        let first = self.triangles.try_get(t)?.halfedge;
        let [a, b, c] = self.triangle_halfedges_of(first);
        Ok([
            self.halfedges[a].origin,
            self.halfedges[b].origin,
            self.halfedges[c].origin,
        ])
    }

    /// Half-edges of `t` in `next` order.
    pub fn triangle_halfedges(&self, t: TriangleId) -> MeshResult<[HalfEdgeId; 3]> {
        let first = self.triangles.try_get(t)?.halfedge;
        Ok(self.triangle_halfedges_of(first))
    }

    pub(crate) fn triangle_halfedges_of(&self, first: HalfEdgeId) -> [HalfEdgeId; 3] {
        let second = self.halfedges[first].next;
        let third = self.halfedges[second].next;
        [first, second, third]
    }

    /// Returns true if `v` is a corner of `t`.
    pub fn contains_vertex(&self, t: TriangleId, v: VertexId) -> bool {
        self.triangle_vertices(t)
            .map(|corners| corners.contains(&v))
            .unwrap_or(false)
    }

    /// Returns true if `e` is one of the sides of `t`.
    pub fn contains_edge(&self, t: TriangleId, e: EdgeId) -> bool {
        self.triangle_halfedges(t)
            .map(|sides| sides.iter().any(|&h| self.halfedges[h].edge == e))
            .unwrap_or(false)
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mesh '{}': {} vertices, {} triangles, {} edges, {} half-edges",
            self.name,
            self.vertex_count(),
            self.triangle_count(),
            self.edge_count(),
            self.halfedge_count()
        )
    }
}
