//! # Mesh Errors
//!
//! Error types for structural mesh operations.
//!
//! ## Error Policy
//!
//! - Invalid requests are rejected before any mutation happens
//! - Stale handles surface as [`MeshError::DanglingReference`], never as a panic
//! - Cascading deletions always succeed and have no error path

use thiserror::Error;

use crate::handles::{HalfEdgeId, VertexId};

/// Errors that can occur while editing or querying a mesh.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// A triangle was requested with a repeated corner.
    #[error("Degenerate face: vertices {0}, {1}, {2} are not pairwise distinct")]
    DegenerateFace(VertexId, VertexId, VertexId),

    /// A handle refers to an element that was deleted or never existed.
    #[error("Dangling reference: {kind} #{index} is not part of the mesh")]
    DanglingReference { kind: &'static str, index: u32 },

    /// Two vertices expected to be joined by a half-edge are not.
    #[error("No half-edge joins {from} and {to}")]
    NoSuchEdge { from: VertexId, to: VertexId },

    /// The operation needs at least one vertex or triangle.
    #[error("Mesh is empty")]
    EmptyMesh,

    /// The directed half-edge already belongs to another triangle.
    #[error("A half-edge from {from} to {to} already exists")]
    DuplicateHalfEdge { from: VertexId, to: VertexId },

    /// The reversed half-edge is already paired, a third triangle would make
    /// the edge non-manifold.
    #[error("Edge between {from} and {to} already has two triangles")]
    NonManifoldEdge { from: VertexId, to: VertexId },

    /// Collapsing the half-edge would merge two triangle fans.
    #[error("Collapsing half-edge {0} would create a non-manifold vertex")]
    NonManifoldCollapse(HalfEdgeId),

    /// A polygon could not be split into triangles.
    #[error("Polygon triangulation failed: {message}")]
    PolygonTriangulation { message: String },

    /// A generator or processing step got parameters it cannot work with.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },
}

impl MeshError {
    /// Creates a dangling reference error for the given element kind.
    pub fn dangling(kind: &'static str, index: u32) -> Self {
        Self::DanglingReference { kind, index }
    }

    /// Creates a polygon triangulation error.
    pub fn triangulation(message: impl Into<String>) -> Self {
        Self::PolygonTriangulation {
            message: message.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }
}

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
