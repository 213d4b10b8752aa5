//! # Half-Edge Topology
//!
//! Directed edges bound to exactly one triangle, and the primitives that keep
//! them consistent.
//!
//! ## Links
//!
//! - **next**: following half-edge of the same triangle (CCW 3-cycle)
//! - **opposite**: reversed half-edge in the neighboring triangle, `None` on
//!   the border
//! - **sibling**: following outgoing half-edge of the same origin. The
//!   siblings of a vertex form a `None`-terminated list headed by
//!   `Vertex::halfedge`
//!
//! Every half-edge also stores its `target` and the undirected [`Edge`] it
//! shares with its opposite.
//!
//! [`Edge`]: crate::edge::Edge

mod collapse;

#[cfg(test)]
mod tests;

use crate::edge::Edge;
use crate::error::{MeshError, MeshResult};
use crate::handles::{EdgeId, HalfEdgeId, TriangleId, VertexId};
use crate::mesh::Mesh;

/// Directed edge of a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    pub(crate) origin: VertexId,
    pub(crate) target: VertexId,
    pub(crate) triangle: TriangleId,
    pub(crate) edge: EdgeId,
    pub(crate) next: HalfEdgeId,
    pub(crate) sibling: Option<HalfEdgeId>,
    pub(crate) opposite: Option<HalfEdgeId>,
}

impl HalfEdge {
    /// Vertex this half-edge starts from.
    #[inline]
    pub fn origin(&self) -> VertexId {
        self.origin
    }

    /// Vertex this half-edge points to. Always equal to the origin of `next`.
    #[inline]
    pub fn target(&self) -> VertexId {
        self.target
    }

    /// Triangle this half-edge bounds.
    #[inline]
    pub fn triangle(&self) -> TriangleId {
        self.triangle
    }

    /// Undirected edge shared with the opposite half-edge, if any.
    #[inline]
    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    /// Next half-edge of the same triangle, counter-clockwise.
    #[inline]
    pub fn next(&self) -> HalfEdgeId {
        self.next
    }

    /// Next half-edge leaving the same origin, `None` at the end of the list.
    #[inline]
    pub fn sibling(&self) -> Option<HalfEdgeId> {
        self.sibling
    }

    /// Half-edge running the other way along the same edge, `None` on a border.
    #[inline]
    pub fn opposite(&self) -> Option<HalfEdgeId> {
        self.opposite
    }

    /// Whether no triangle lies on the other side.
    #[inline]
    pub fn is_border(&self) -> bool {
        self.opposite.is_none()
    }
}

/// Iterator over the outgoing half-edges of a vertex, following the sibling
/// list.
#[derive(Debug, Clone)]
pub struct Outgoing<'m> {
    mesh: &'m Mesh,
    current: Option<HalfEdgeId>,
}

impl Iterator for Outgoing<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<HalfEdgeId> {
        let id = self.current?;
        self.current = self.mesh.halfedges.get(id).and_then(|h| h.sibling);
        Some(id)
    }
}

impl Mesh {
    // =========================================================================
    // NAVIGATION
    // =========================================================================

    /// Outgoing half-edges of `v`, most recently created first. Empty for a
    /// dead or isolated vertex.
    pub fn outgoing(&self, v: VertexId) -> Outgoing<'_> {
        Outgoing {
            mesh: self,
            current: self.vertices.get(v).and_then(|vertex| vertex.halfedge),
        }
    }

    /// Half-edge from `a` to `b`, if the two vertices are joined in that
    /// direction.
    pub fn half_edge_to(&self, a: VertexId, b: VertexId) -> Option<HalfEdgeId> {
        self.outgoing(a).find(|&h| self.halfedges[h].target == b)
    }

    /// Like [`Mesh::half_edge_to`] but reports a missing half-edge as
    /// [`MeshError::NoSuchEdge`].
    pub fn try_half_edge_to(&self, a: VertexId, b: VertexId) -> MeshResult<HalfEdgeId> {
        self.half_edge_to(a, b)
            .ok_or(MeshError::NoSuchEdge { from: a, to: b })
    }

    /// Half-edge preceding `h` in its triangle, the one ending at
    /// `origin(h)`.
    #[inline]
    pub(crate) fn prev(&self, h: HalfEdgeId) -> HalfEdgeId {
        let next = self.halfedges[h].next;
        self.halfedges[next].next
    }

    // =========================================================================
    // CREATION / DESTRUCTION
    // =========================================================================

    /// Rejects a half-edge from `origin` to `target` that would duplicate an
    /// existing one or make the shared edge non-manifold.
    pub(crate) fn check_new_half_edge(&self, origin: VertexId, target: VertexId) -> MeshResult<()> {
        if let Some(reverse) = self.half_edge_to(target, origin) {
            if self.halfedges[reverse].opposite.is_some() {
                return Err(MeshError::NonManifoldEdge {
                    from: origin,
                    to: target,
                });
            }
        }
        if self.half_edge_to(origin, target).is_some() {
            return Err(MeshError::DuplicateHalfEdge {
                from: origin,
                to: target,
            });
        }
        Ok(())
    }

    /// Allocates a half-edge and wires it into the sibling list of `origin`,
    /// the shared edge and the reversed half-edge, if any.
    ///
    /// Callers validate with [`Mesh::check_new_half_edge`] first; `next` may
    /// name a half-edge that is allocated right after this one.
    pub(crate) fn create_half_edge(
        &mut self,
        origin: VertexId,
        target: VertexId,
        triangle: TriangleId,
        next: HalfEdgeId,
    ) -> HalfEdgeId {
        let opposite = self.half_edge_to(target, origin);
        let edge = match opposite {
            Some(o) => self.halfedges[o].edge,
            None => self.edges.insert(Edge::new(origin, target)),
        };

        let id = self.halfedges.insert(HalfEdge {
            origin,
            target,
            triangle,
            edge,
            next,
            sibling: None,
            opposite,
        });
        self.link_sibling(origin, id);
        if let Some(o) = opposite {
            self.halfedges[o].opposite = Some(id);
        }
        id
    }

    /// Frees a half-edge. Its edge is freed too unless the opposite still
    /// references it.
    pub(crate) fn destroy_half_edge(&mut self, h: HalfEdgeId) {
        let Some(&half) = self.halfedges.get(h) else {
            return;
        };
        self.unlink_sibling(half.origin, h);
        match half.opposite {
            Some(o) => self.halfedges[o].opposite = None,
            None => {
                self.edges.remove(half.edge);
            }
        }
        self.halfedges.remove(h);
    }

    /// Pushes `h` at the head of the sibling list of `v`.
    pub(crate) fn link_sibling(&mut self, v: VertexId, h: HalfEdgeId) {
        let head = self.vertices[v].halfedge;
        self.halfedges[h].sibling = head;
        self.vertices[v].halfedge = Some(h);
    }

    /// Removes `h` from the sibling list of `v`. No-op when `h` is not in it.
    pub(crate) fn unlink_sibling(&mut self, v: VertexId, h: HalfEdgeId) {
        let after = self.halfedges[h].sibling;
        if self.vertices[v].halfedge == Some(h) {
            self.vertices[v].halfedge = after;
        } else {
            let before = self
                .outgoing(v)
                .find(|&s| self.halfedges[s].sibling == Some(h));
            if let Some(before) = before {
                self.halfedges[before].sibling = after;
            }
        }
        self.halfedges[h].sibling = None;
    }

    /// Moves the whole sibling list of `from` to the end of the list of `to`.
    pub(crate) fn append_siblings(&mut self, from: VertexId, to: VertexId) {
        let Some(head) = self.vertices[from].halfedge.take() else {
            return;
        };
        let tail = self.outgoing(to).last();
        match tail {
            Some(tail) => self.halfedges[tail].sibling = Some(head),
            None => self.vertices[to].halfedge = Some(head),
        }
    }
}
