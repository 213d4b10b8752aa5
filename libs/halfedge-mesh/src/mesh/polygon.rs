//! # Polygon Triangulation
//!
//! Adds polygons as triangle sets. Convex polygons are split as a fan,
//! general simple polygons by ear clipping against an approximate normal.
//!
//! Either way the mesh is left unchanged when triangulation fails.

use config::constants::{EPSILON, MIN_POLYGON_VERTICES};
use glam::DVec3;

use crate::error::{MeshError, MeshResult};
use crate::handles::{TriangleId, VertexId};
use crate::mesh::Mesh;

impl Mesh {
    /// Adds a convex polygon as a fan around its first vertex.
    pub fn add_polygon_convex(&mut self, vertices: &[VertexId]) -> MeshResult<Vec<TriangleId>> {
        if vertices.len() < MIN_POLYGON_VERTICES {
            return Err(MeshError::triangulation(format!(
                "polygon needs at least {} vertices, got {}",
                MIN_POLYGON_VERTICES,
                vertices.len()
            )));
        }

        let mut added = Vec::with_capacity(vertices.len() - 2);
        for pair in vertices[1..].windows(2) {
            match self.add_triangle(vertices[0], pair[0], pair[1]) {
                Ok(t) => added.push(t),
                Err(err) => {
                    self.rollback(&added);
                    return Err(err);
                }
            }
        }
        Ok(added)
    }

    /// Adds a simple polygon by ear clipping.
    ///
    /// `normal` only needs to point to the side the polygon faces; the
    /// vertices are expected in CCW order around it.
    pub fn add_polygon(
        &mut self,
        vertices: &[VertexId],
        normal: DVec3,
    ) -> MeshResult<Vec<TriangleId>> {
        if vertices.len() < MIN_POLYGON_VERTICES {
            return Err(MeshError::triangulation(format!(
                "polygon needs at least {} vertices, got {}",
                MIN_POLYGON_VERTICES,
                vertices.len()
            )));
        }
        let positions = vertices
            .iter()
            .map(|&v| self.vertex(v).map(|vertex| vertex.position()))
            .collect::<MeshResult<Vec<DVec3>>>()?;

        let mut remaining: Vec<usize> = (0..vertices.len()).collect();
        let mut added = Vec::with_capacity(vertices.len() - 2);

        while remaining.len() > 3 {
            let Some(ear) = find_ear(&positions, &remaining, normal) else {
                self.rollback(&added);
                return Err(MeshError::triangulation(format!(
                    "no ear left among {} remaining vertices",
                    remaining.len()
                )));
            };

            let n = remaining.len();
            let (a, b, c) = (
                remaining[(ear + n - 1) % n],
                remaining[ear],
                remaining[(ear + 1) % n],
            );
            match self.add_triangle(vertices[a], vertices[b], vertices[c]) {
                Ok(t) => added.push(t),
                Err(err) => {
                    self.rollback(&added);
                    return Err(err);
                }
            }
            remaining.remove(ear);
        }

        match self.add_triangle(
            vertices[remaining[0]],
            vertices[remaining[1]],
            vertices[remaining[2]],
        ) {
            Ok(t) => added.push(t),
            Err(err) => {
                self.rollback(&added);
                return Err(err);
            }
        }
        Ok(added)
    }

    fn rollback(&mut self, added: &[TriangleId]) {
        for &t in added.iter().rev() {
            self.remove_triangle(t);
        }
    }
}

/// Position in `remaining` of a vertex whose corner is convex and contains no
/// other remaining vertex.
fn find_ear(positions: &[DVec3], remaining: &[usize], normal: DVec3) -> Option<usize> {
    let n = remaining.len();
    (0..n).find(|&i| {
        let ia = remaining[(i + n - 1) % n];
        let ib = remaining[i];
        let ic = remaining[(i + 1) % n];
        let (a, b, c) = (positions[ia], positions[ib], positions[ic]);

        if (b - a).cross(c - b).dot(normal) <= EPSILON {
            return false;
        }
        !remaining
            .iter()
            .filter(|&&j| j != ia && j != ib && j != ic)
            .any(|&j| inside_triangle(positions[j], a, b, c, normal))
    })
}

/// Point-in-triangle test in the plane seen along `normal`. Points on a side
/// count as inside.
fn inside_triangle(p: DVec3, a: DVec3, b: DVec3, c: DVec3, normal: DVec3) -> bool {
    [(a, b), (b, c), (c, a)]
        .iter()
        .all(|&(from, to)| (p - from).dot(normal.cross(to - from)) >= 0.0)
}
