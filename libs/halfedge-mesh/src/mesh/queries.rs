//! Adjacency queries around vertices and edges.

use std::collections::BTreeSet;

use crate::handles::{HalfEdgeId, TriangleId, VertexId};
use crate::mesh::Mesh;

impl Mesh {
    /// Triangles having `v` as a corner, in sibling-list order.
    pub fn triangles_around(&self, v: VertexId) -> Vec<TriangleId> {
        self.outgoing(v)
            .map(|h| self.halfedges[h].triangle)
            .collect()
    }

    /// Triangles of the fan around `v` in CCW order.
    ///
    /// On a border vertex the walk starts at the border so that the result
    /// is a contiguous strip. Around a non-manifold vertex only the fan that
    /// contains the first outgoing half-edge is returned.
    pub fn triangles_ordered_around(&self, v: VertexId) -> Vec<TriangleId> {
        let Some(start) = self.vertices.get(v).and_then(|vertex| vertex.halfedge) else {
            return Vec::new();
        };
        let limit = self.outgoing(v).count();

        // Rewind clockwise to the border, if there is one.
        let mut first = start;
        for _ in 0..limit {
            match self.rotate_cw(first) {
                Some(h) if h != start => first = h,
                _ => break,
            }
        }

        let mut fan = Vec::with_capacity(limit);
        let mut current = first;
        for _ in 0..limit {
            fan.push(self.halfedges[current].triangle);
            match self.rotate_ccw(current) {
                Some(h) if h != first => current = h,
                _ => break,
            }
        }
        fan
    }

    /// Next outgoing half-edge of the same origin in CCW order.
    fn rotate_ccw(&self, h: HalfEdgeId) -> Option<HalfEdgeId> {
        self.halfedges[self.prev(h)].opposite
    }

    /// Next outgoing half-edge of the same origin in CW order.
    fn rotate_cw(&self, h: HalfEdgeId) -> Option<HalfEdgeId> {
        self.halfedges[h].opposite.map(|o| self.halfedges[o].next)
    }

    /// Vertices joined to `v` by an edge, in either direction.
    pub fn neighbor_vertices(&self, v: VertexId) -> BTreeSet<VertexId> {
        let mut neighbors = BTreeSet::new();
        for h in self.outgoing(v) {
            neighbors.insert(self.halfedges[h].target);
            neighbors.insert(self.halfedges[self.prev(h)].origin);
        }
        neighbors
    }

    /// Returns true if `v` lies on a border: one of its incident half-edges
    /// has no opposite.
    pub fn is_border_vertex(&self, v: VertexId) -> bool {
        self.outgoing(v).any(|h| {
            self.halfedges[h].opposite.is_none()
                || self.halfedges[self.prev(h)].opposite.is_none()
        })
    }

    /// Triangle on the left of the directed edge `a → b`.
    pub fn triangle_left_to(&self, a: VertexId, b: VertexId) -> Option<TriangleId> {
        self.half_edge_to(a, b).map(|h| self.halfedges[h].triangle)
    }

    /// Triangle on the right of the directed edge `a → b`.
    pub fn triangle_right_to(&self, a: VertexId, b: VertexId) -> Option<TriangleId> {
        self.half_edge_to(b, a).map(|h| self.halfedges[h].triangle)
    }

    /// First live vertex named `name`.
    pub fn vertex_by_name(&self, name: &str) -> Option<VertexId> {
        self.vertices
            .iter()
            .find(|(_, vertex)| vertex.name() == name)
            .map(|(id, _)| id)
    }
}
