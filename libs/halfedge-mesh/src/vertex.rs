//! # Mesh Vertex
//!
//! Per-vertex attribute data plus the head of the vertex's sibling ring.

use glam::{DVec2, DVec3, DVec4};

use crate::handles::HalfEdgeId;

/// A mesh vertex.
///
/// Attribute setters return `&mut Self` so a geometry producer can chain
/// them:
///
/// ```rust
/// use glam::{DVec2, DVec3};
/// use halfedge_mesh::Mesh;
///
/// let mut mesh = Mesh::new("demo");
/// let v = mesh.add_vertex("A");
/// mesh.vertex_mut(v)
///     .unwrap()
///     .set_position(DVec3::new(1.0, 2.0, 3.0))
///     .set_tex_coord(DVec2::new(0.5, 0.5));
/// assert_eq!(mesh.vertex(v).unwrap().position(), DVec3::new(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    name: String,
    /// Dense rank among live vertices, refreshed by `compute_normals`
    number: u32,
    position: DVec3,
    color: DVec4,
    normal: DVec3,
    tangent: DVec3,
    tex_coord: DVec2,
    /// First outgoing half-edge, head of the sibling ring
    pub(crate) halfedge: Option<HalfEdgeId>,
}

impl Vertex {
    pub(crate) fn new(name: impl Into<String>, number: u32) -> Self {
        Self {
            name: name.into(),
            number,
            position: DVec3::ZERO,
            color: DVec4::ZERO,
            normal: DVec3::ZERO,
            tangent: DVec3::ZERO,
            tex_coord: DVec2::ZERO,
            halfedge: None,
        }
    }

    /// Copies every attribute of `other` except name, number and topology.
    pub(crate) fn copy_attributes(&mut self, other: &Vertex) {
        self.position = other.position;
        self.color = other.color;
        self.normal = other.normal;
        self.tangent = other.tangent;
        self.tex_coord = other.tex_coord;
    }

    /// Linear interpolation of all attributes between `v0` (k = 0) and `v1`
    /// (k = 1). Normal and tangent are renormalized.
    pub(crate) fn lerp_attributes(&mut self, v0: &Vertex, v1: &Vertex, k: f64) {
        self.position = v0.position.lerp(v1.position, k);
        self.color = v0.color.lerp(v1.color, k);
        self.normal = v0.normal.lerp(v1.normal, k).normalize_or_zero();
        self.tangent = v0.tangent.lerp(v1.tangent, k).normalize_or_zero();
        self.tex_coord = v0.tex_coord.lerp(v1.tex_coord, k);
    }

    /// Cubic Hermite position between `v0` and `v1` with end tangents `t0`
    /// and `t1`. The other attributes interpolate linearly.
    pub(crate) fn hermite_attributes(
        &mut self,
        v0: &Vertex,
        t0: DVec3,
        v1: &Vertex,
        t1: DVec3,
        k: f64,
    ) {
        self.lerp_attributes(v0, v1, k);
        let k2 = k * k;
        let k3 = k2 * k;
        let h00 = 2.0 * k3 - 3.0 * k2 + 1.0;
        let h10 = k3 - 2.0 * k2 + k;
        let h01 = -2.0 * k3 + 3.0 * k2;
        let h11 = k3 - k2;
        self.position = v0.position * h00 + t0 * h10 + v1.position * h01 + t1 * h11;
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rank of this vertex in the vertex list as of the last
    /// `compute_normals` call.
    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    pub(crate) fn set_number(&mut self, number: u32) {
        self.number = number;
    }

    /// First outgoing half-edge, `None` for an isolated vertex.
    #[inline]
    pub fn halfedge(&self) -> Option<HalfEdgeId> {
        self.halfedge
    }

    #[inline]
    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn set_position(&mut self, position: DVec3) -> &mut Self {
        self.position = position;
        self
    }

    /// RGBA color.
    #[inline]
    pub fn color(&self) -> DVec4 {
        self.color
    }

    pub fn set_color(&mut self, rgba: DVec4) -> &mut Self {
        self.color = rgba;
        self
    }

    /// Sets an opaque RGB color.
    pub fn set_color_rgb(&mut self, rgb: DVec3) -> &mut Self {
        self.color = rgb.extend(1.0);
        self
    }

    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    pub fn set_normal(&mut self, normal: DVec3) -> &mut Self {
        self.normal = normal;
        self
    }

    #[inline]
    pub fn tangent(&self) -> DVec3 {
        self.tangent
    }

    pub(crate) fn set_tangent(&mut self, tangent: DVec3) {
        self.tangent = tangent;
    }

    #[inline]
    pub fn tex_coord(&self) -> DVec2 {
        self.tex_coord
    }

    pub fn set_tex_coord(&mut self, uv: DVec2) -> &mut Self {
        self.tex_coord = uv;
        self
    }
}
