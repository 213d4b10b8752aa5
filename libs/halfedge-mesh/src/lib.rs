//! # Half-Edge Mesh
//!
//! Editable triangle meshes in half-edge form, plus a quadric error metric
//! simplifier that removes vertices by edge collapse.
//!
//! ## Architecture
//!
//! ```text
//! producer (loader, surfaces) → Mesh → processing / simplify → renderer buffers
//! ```
//!
//! Every element lives in an arena owned by [`Mesh`] and is addressed by a
//! typed `u32` handle ([`VertexId`], [`EdgeId`], [`HalfEdgeId`],
//! [`TriangleId`]). Deleted slots are never reused, so a handle can not
//! alias a newer element and iteration follows insertion order.
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use halfedge_mesh::{simplify, utils, Mesh};
//!
//! let mut mesh = Mesh::new("quad");
//! let corners = [
//!     DVec3::new(0.0, 0.0, 0.0),
//!     DVec3::new(1.0, 0.0, 0.0),
//!     DVec3::new(1.0, 1.0, 0.0),
//!     DVec3::new(0.0, 1.0, 0.0),
//! ];
//! let ids: Vec<_> = corners
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &p)| {
//!         let v = mesh.add_vertex(format!("P{i}"));
//!         mesh.vertex_mut(v).unwrap().set_position(p);
//!         v
//!     })
//!     .collect();
//! mesh.add_quad(ids[0], ids[1], ids[2], ids[3]).unwrap();
//!
//! let report = simplify::redux_count(&mut mesh, 1).unwrap();
//! assert_eq!(report.collapses_performed, 1);
//! assert_eq!(mesh.triangle_count(), 1);
//! assert!(utils::check_mesh(&mut mesh, false).is_valid());
//! ```

mod arena;
#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod fixtures;

pub mod edge;
pub mod error;
pub mod halfedge;
pub mod handles;
pub mod mesh;
pub mod processing;
pub mod quadric;
pub mod simplify;
pub mod surfaces;
pub mod triangle;
pub mod utils;
pub mod vertex;

pub use edge::Edge;
pub use error::{MeshError, MeshResult};
pub use halfedge::{HalfEdge, Outgoing};
pub use handles::{EdgeId, HalfEdgeId, Handle, TriangleId, VertexId};
pub use mesh::Mesh;
pub use quadric::Quadric;
pub use simplify::{ReductionReport, Simplifier};
pub use triangle::Triangle;
pub use vertex::Vertex;
