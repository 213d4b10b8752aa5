//! # Mesh Triangle
//!
//! A face of the mesh. Its three half-edges form a `next` 3-cycle starting at
//! [`Triangle::halfedge`]; the geometric fields are derived by
//! `Mesh::compute_normals` and `Mesh::compute_tangents`.

use glam::DVec3;

use crate::handles::HalfEdgeId;

/// Triangle with its cached plane data.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    /// First half-edge, the one from the first corner to the second
    pub(crate) halfedge: HalfEdgeId,
    normal: DVec3,
    tangent: DVec3,
    center: DVec3,
    area: f64,
    /// Plane constant, `normal · p + w = 0` for every point on the plane
    w: f64,
}

impl Triangle {
    pub(crate) fn new(halfedge: HalfEdgeId) -> Self {
        Self {
            halfedge,
            normal: DVec3::ZERO,
            tangent: DVec3::ZERO,
            center: DVec3::ZERO,
            area: 0.0,
            w: 0.0,
        }
    }

    /// Recomputes normal, area, center and plane constant from the corner
    /// positions (CCW order).
    pub(crate) fn update_plane(&mut self, a: DVec3, b: DVec3, c: DVec3) {
        let cross = (b - a).cross(c - a);
        self.area = 0.5 * cross.length();
        self.normal = cross.normalize_or_zero();
        self.center = (a + b + c) / 3.0;
        self.w = -self.normal.dot(a);
    }

    pub(crate) fn set_tangent(&mut self, tangent: DVec3) {
        self.tangent = tangent;
    }

    #[inline]
    pub fn halfedge(&self) -> HalfEdgeId {
        self.halfedge
    }

    /// Unit normal, zero for a degenerate triangle.
    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    #[inline]
    pub fn tangent(&self) -> DVec3 {
        self.tangent
    }

    /// Centroid of the three corners.
    #[inline]
    pub fn center(&self) -> DVec3 {
        self.center
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }

    #[inline]
    pub fn w(&self) -> f64 {
        self.w
    }

    /// Signed distance of `p` to the triangle plane.
    #[inline]
    pub fn distance_to(&self, p: DVec3) -> f64 {
        self.normal.dot(p) + self.w
    }
}
