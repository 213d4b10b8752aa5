//! # Surface Generators
//!
//! Flat sheets of triangles in the XZ plane, added to an existing mesh:
//!
//! - **rectangular**: unit grid, two triangles per cell
//! - **hexagonal**: equilateral triangles, odd rows shifted by half a step
//! - **revolution**: a disk of rings around a center vertex
//!
//! Grids can be folded onto themselves along X and Z, giving a cylinder or a
//! torus. Positions are only a starting layout; callers usually move the
//! vertices afterwards.

use glam::DVec3;
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::handles::VertexId;
use crate::mesh::Mesh;

/// Grid size and folding for the rectangular and hexagonal generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridParams {
    /// Vertices along X
    pub columns: usize,
    /// Vertices along Z
    pub rows: usize,
    /// Join the last column to the first
    pub fold_x: bool,
    /// Join the last row to the first
    pub fold_z: bool,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            columns: 2,
            rows: 2,
            fold_x: false,
            fold_z: false,
        }
    }
}

impl GridParams {
    /// Open grid of `columns` by `rows` vertices.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            ..Self::default()
        }
    }

    /// Same grid, folded as requested.
    pub fn folded(self, fold_x: bool, fold_z: bool) -> Self {
        Self {
            fold_x,
            fold_z,
            ..self
        }
    }

    fn validate(&self) -> MeshResult<()> {
        if self.columns < 2 || self.rows < 2 {
            return Err(MeshError::invalid(format!(
                "grid needs 2 columns and 2 rows, got {}x{}",
                self.columns, self.rows
            )));
        }
        if (self.fold_x && self.columns < 3) || (self.fold_z && self.rows < 3) {
            return Err(MeshError::invalid("a folded grid needs 3 vertices across"));
        }
        Ok(())
    }

    /// Cells along one axis: one fewer than the vertices unless folded.
    fn cells(count: usize, folded: bool) -> usize {
        if folded {
            count
        } else {
            count - 1
        }
    }
}

/// Adds a grid of `columns` x `rows` vertices at `(ix, 0, iz)` and two
/// triangles per cell, facing +Y.
///
/// Vertex `(ix, iz)` is named `{prefix}-{ix}-{iz}` and sits at index
/// `iz * columns + ix` of the returned list.
pub fn add_rectangular_surface(
    mesh: &mut Mesh,
    params: &GridParams,
    prefix: &str,
) -> MeshResult<Vec<VertexId>> {
    params.validate()?;
    let ids = add_grid_vertices(mesh, params, prefix, |ix, iz| {
        DVec3::new(ix as f64, 0.0, iz as f64)
    });

    let at = |ix: usize, iz: usize| grid_at(&ids, params, ix, iz);
    for iz in 0..GridParams::cells(params.rows, params.fold_z) {
        for ix in 0..GridParams::cells(params.columns, params.fold_x) {
            let (v00, v01) = (at(ix, iz), at(ix, iz + 1));
            let (v10, v11) = (at(ix + 1, iz), at(ix + 1, iz + 1));
            mesh.add_quad(v00, v01, v11, v10)?;
        }
    }
    mesh.compute_normals();

    debug!(mesh = mesh.name(), ?params, "Added rectangular surface");
    Ok(ids)
}

/// Adds a grid of equilateral triangles with unit sides, facing +Y. Odd rows
/// are shifted by half a step towards -X.
///
/// Vertices are named and indexed as in [`add_rectangular_surface`]. Folding
/// along Z needs an even number of rows so that the shifts line up.
pub fn add_hexagonal_surface(
    mesh: &mut Mesh,
    params: &GridParams,
    prefix: &str,
) -> MeshResult<Vec<VertexId>> {
    params.validate()?;
    if params.fold_z && params.rows % 2 != 0 {
        return Err(MeshError::invalid(format!(
            "a hexagonal grid folded along Z needs an even row count, got {}",
            params.rows
        )));
    }
    let height = 3f64.sqrt() / 2.0;
    let ids = add_grid_vertices(mesh, params, prefix, |ix, iz| {
        DVec3::new(ix as f64 - 0.5 * (iz % 2) as f64, 0.0, iz as f64 * height)
    });

    let at = |ix: usize, iz: usize| grid_at(&ids, params, ix, iz);
    for iz in 0..GridParams::cells(params.rows, params.fold_z) {
        for ix in 0..GridParams::cells(params.columns, params.fold_x) {
            let (v00, v01) = (at(ix, iz), at(ix, iz + 1));
            let (v10, v11) = (at(ix + 1, iz), at(ix + 1, iz + 1));
            if iz % 2 == 0 {
                mesh.add_triangle(v00, v01, v11)?;
                mesh.add_triangle(v00, v11, v10)?;
            } else {
                mesh.add_triangle(v00, v01, v10)?;
                mesh.add_triangle(v10, v01, v11)?;
            }
        }
    }
    mesh.compute_normals();

    debug!(mesh = mesh.name(), ?params, "Added hexagonal surface");
    Ok(ids)
}

/// Adds a disk of `spokes` rays with `segments` vertices each around a
/// center at the origin, facing -Y.
///
/// The center is named `{prefix}-C`. Vertex `(ir, is)` lies at distance
/// `is + 1` on ray `ir`, is named `{prefix}-{ir}-{is}` and sits at index
/// `ir * segments + is` of the returned list. With no segment only the
/// center is added.
pub fn add_revolution_surface(
    mesh: &mut Mesh,
    spokes: usize,
    segments: usize,
    prefix: &str,
) -> MeshResult<(VertexId, Vec<VertexId>)> {
    if spokes < 3 {
        return Err(MeshError::invalid(format!(
            "a revolution surface needs 3 spokes, got {spokes}"
        )));
    }
    let center = mesh.add_vertex(format!("{prefix}-C"));
    mesh.vertices[center].set_position(DVec3::ZERO);

    let mut ids = Vec::with_capacity(spokes * segments);
    for ir in 0..spokes {
        let angle = ir as f64 / spokes as f64 * std::f64::consts::TAU;
        let (sin, cos) = angle.sin_cos();
        for is in 0..segments {
            let v = mesh.add_vertex(format!("{prefix}-{ir}-{is}"));
            let radius = (is + 1) as f64;
            mesh.vertices[v].set_position(DVec3::new(radius * cos, 0.0, radius * sin));
            ids.push(v);
        }
    }

    if segments > 0 {
        let at = |ir: usize, is: usize| ids[(ir % spokes) * segments + is];
        for ir in 0..spokes {
            mesh.add_triangle(center, at(ir, 0), at(ir + 1, 0))?;
            for is in 0..segments - 1 {
                let (v00, v01) = (at(ir, is), at(ir, is + 1));
                let (v10, v11) = (at(ir + 1, is), at(ir + 1, is + 1));
                mesh.add_quad(v00, v01, v11, v10)?;
            }
        }
        mesh.compute_normals();
    }

    debug!(mesh = mesh.name(), spokes, segments, "Added revolution surface");
    Ok((center, ids))
}

/// Vertex `(ix, iz)` of a grid, wrapping around both axes.
fn grid_at(ids: &[VertexId], params: &GridParams, ix: usize, iz: usize) -> VertexId {
    ids[(iz % params.rows) * params.columns + ix % params.columns]
}

fn add_grid_vertices(
    mesh: &mut Mesh,
    params: &GridParams,
    prefix: &str,
    position: impl Fn(usize, usize) -> DVec3,
) -> Vec<VertexId> {
    let mut ids = Vec::with_capacity(params.columns * params.rows);
    for iz in 0..params.rows {
        for ix in 0..params.columns {
            let v = mesh.add_vertex(format!("{prefix}-{ix}-{iz}"));
            mesh.vertices[v].set_position(position(ix, iz));
            ids.push(v);
        }
    }
    ids
}
