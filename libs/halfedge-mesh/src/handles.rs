//! # Element Handles
//!
//! Typed indices into the mesh arenas. Handles are plain `Copy` values; a
//! handle stays unique for the lifetime of its mesh because arena slots are
//! never reused.

use std::fmt;

/// Conversion between a typed handle and its arena slot.
pub trait Handle: Copy + Eq + Ord + fmt::Debug {
    /// Human readable element kind, used in error messages.
    const KIND: &'static str;

    /// Builds the handle for a slot index.
    fn from_index(index: usize) -> Self;

    /// Returns the slot index of this handle.
    fn index(self) -> usize;

    /// Returns the raw handle value.
    fn raw(self) -> u32;
}

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident, $kind:literal, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl Handle for $name {
            const KIND: &'static str = $kind;

            #[inline]
            fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            #[inline]
            fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_handle!(
    /// Unique identifier for vertices.
    VertexId,
    "vertex",
    "V"
);

define_handle!(
    /// Unique identifier for undirected edges.
    EdgeId,
    "edge",
    "E"
);

define_handle!(
    /// Unique identifier for half-edges.
    HalfEdgeId,
    "half-edge",
    "H"
);

define_handle!(
    /// Unique identifier for triangles.
    TriangleId,
    "triangle",
    "T"
);
