//! # Mesh Edge
//!
//! Undirected pairing of two vertices, shared by the one or two half-edges
//! joining them.

use crate::handles::VertexId;

/// Undirected edge. The two endpoints are kept sorted by handle so that an
/// edge compares equal regardless of the direction it was created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    vertex1: VertexId,
    vertex2: VertexId,
}

impl Edge {
    pub(crate) fn new(a: VertexId, b: VertexId) -> Self {
        if a < b {
            Self {
                vertex1: a,
                vertex2: b,
            }
        } else {
            Self {
                vertex1: b,
                vertex2: a,
            }
        }
    }

    /// Endpoint with the smaller handle.
    #[inline]
    pub fn vertex1(&self) -> VertexId {
        self.vertex1
    }

    /// Endpoint with the larger handle.
    #[inline]
    pub fn vertex2(&self) -> VertexId {
        self.vertex2
    }

    #[inline]
    pub fn connects(&self, a: VertexId, b: VertexId) -> bool {
        *self == Edge::new(a, b)
    }

    /// Replaces endpoint `old` by `new`, keeping endpoints sorted. Returns
    /// false when `old` is not an endpoint.
    pub(crate) fn replace_vertex(&mut self, old: VertexId, new: VertexId) -> bool {
        let other = if self.vertex1 == old {
            self.vertex2
        } else if self.vertex2 == old {
            self.vertex1
        } else {
            return false;
        };
        *self = Edge::new(other, new);
        true
    }
}
