//! # Quadric Simplification
//!
//! Greedy vertex removal by edge collapse, driven by quadric error metrics
//! (Garland & Heckbert 1997).
//!
//! ## Algorithm Overview
//!
//! 1. Compute triangle and vertex normals
//! 2. Give every vertex the quadric of the planes of its triangles, each
//!    normal scaled by `1 / sqrt(area)` so small triangles weigh more
//! 3. For every vertex U, pick the neighbor N minimizing the cost of
//!    `Q_U + Q_N` at the position of N
//! 4. Repeatedly collapse the globally cheapest vertex onto its neighbor and
//!    refresh normals, quadrics and costs around the survivor
//!
//! The surviving vertex keeps its position; no optimal placement is solved
//! for.
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use halfedge_mesh::{simplify, Mesh};
//!
//! let mut mesh = Mesh::new("fan");
//! let center = mesh.add_vertex("C");
//! let ring: Vec<_> = (0..6)
//!     .map(|i| {
//!         let angle = i as f64 * std::f64::consts::TAU / 6.0;
//!         let v = mesh.add_vertex(format!("R{i}"));
//!         mesh.vertex_mut(v)
//!             .unwrap()
//!             .set_position(DVec3::new(angle.cos(), angle.sin(), 0.0));
//!         v
//!     })
//!     .collect();
//! for i in 0..6 {
//!     mesh.add_triangle(center, ring[i], ring[(i + 1) % 6]).unwrap();
//! }
//!
//! // The fan is flat, so the first collapse is free
//! let report = simplify::redux_count(&mut mesh, 1).unwrap();
//! assert_eq!(report.collapses_performed, 1);
//! assert_eq!(mesh.vertex_count(), 6);
//! ```

mod report;

#[cfg(test)]
mod tests;

pub use report::ReductionReport;

use config::constants::{SimplifyConfig, NO_COLLAPSE_COST, UNBOUNDED_COLLAPSE_COST};
use tracing::{debug, info};

use crate::error::{MeshError, MeshResult};
use crate::handles::{Handle, HalfEdgeId, VertexId};
use crate::mesh::Mesh;
use crate::quadric::Quadric;

/// Best recorded move of a vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    target: Option<VertexId>,
    cost: f64,
}

impl Candidate {
    const NONE: Candidate = Candidate {
        target: None,
        cost: NO_COLLAPSE_COST,
    };
}

/// State of one reduction pass over a mesh.
///
/// Quadrics and candidates are indexed by vertex slot and dropped with the
/// simplifier.
pub struct Simplifier<'m> {
    mesh: &'m mut Mesh,
    config: SimplifyConfig,
    quadrics: Vec<Quadric>,
    candidates: Vec<Candidate>,
    report: ReductionReport,
}

impl<'m> Simplifier<'m> {
    /// Creates a simplifier with the default configuration.
    pub fn new(mesh: &'m mut Mesh) -> Self {
        Self::with_config(mesh, SimplifyConfig::default())
    }

    /// Creates a simplifier with an explicit tolerance and guard setting.
    pub fn with_config(mesh: &'m mut Mesh, config: SimplifyConfig) -> Self {
        let report = ReductionReport::start(mesh.vertex_count(), mesh.triangle_count());
        Self {
            mesh,
            config,
            quadrics: Vec::new(),
            candidates: Vec::new(),
            report,
        }
    }

    /// Removes up to `count` vertices, cheapest first.
    ///
    /// Stops early when no vertex has a legal move left.
    pub fn redux_count(mut self, count: usize) -> MeshResult<ReductionReport> {
        self.prepare()?;
        info!(
            mesh = self.mesh.name(),
            triangles = self.report.original_triangles,
            count,
            "Starting reduction by count"
        );
        while self.report.collapses_performed < count {
            if !self.collapse_minimum(UNBOUNDED_COLLAPSE_COST)? {
                break;
            }
        }
        Ok(self.finish())
    }

    /// Removes vertices while the cheapest collapse costs less than
    /// `max_cost`. A `max_cost` of 0 removes nothing; a tiny positive value
    /// only flattens coplanar regions.
    pub fn redux_cost(mut self, max_cost: f64) -> MeshResult<ReductionReport> {
        self.prepare()?;
        info!(
            mesh = self.mesh.name(),
            triangles = self.report.original_triangles,
            max_cost,
            "Starting reduction by cost"
        );
        while self.collapse_minimum(max_cost)? {}
        Ok(self.finish())
    }

    // =========================================================================
    // PASS SETUP
    // =========================================================================

    fn prepare(&mut self) -> MeshResult<()> {
        if self.mesh.triangle_count() == 0 {
            return Err(MeshError::EmptyMesh);
        }
        self.mesh.compute_normals();

        let slots = self.mesh.vertices.slot_count();
        self.quadrics = vec![Quadric::default(); slots];
        self.candidates = vec![Candidate::NONE; slots];

        let vertices = self.mesh.vertex_list();
        for &v in &vertices {
            self.compute_quadric(v);
        }
        for &v in &vertices {
            self.compute_candidate(v);
        }
        Ok(())
    }

    fn finish(mut self) -> ReductionReport {
        self.report.final_vertices = self.mesh.vertex_count();
        self.report.final_triangles = self.mesh.triangle_count();
        self.report.remaining_min_cost = self
            .find_minimum(UNBOUNDED_COLLAPSE_COST)
            .map(|(_, candidate)| candidate.cost);
        info!(
            final_vertices = self.report.final_vertices,
            final_triangles = self.report.final_triangles,
            collapses = self.report.collapses_performed,
            rejected = self.report.collapses_rejected,
            "Reduction complete"
        );
        self.report
    }

    // =========================================================================
    // QUADRICS AND COSTS
    // =========================================================================

    /// Quadric of the planes of the triangles around `v`, through `v`.
    fn compute_quadric(&mut self, v: VertexId) {
        let position = self.mesh.vertices[v].position();
        let mut quadric = Quadric::default();
        for t in self.mesh.triangles_around(v) {
            let triangle = &self.mesh.triangles[t];
            if triangle.area() <= self.config.tolerance {
                continue;
            }
            let weight = 1.0 / triangle.area().sqrt();
            quadric.add_plane(triangle.normal() * weight, position);
        }
        self.quadrics[v.index()] = quadric;
    }

    /// Records the cheapest legal neighbor of `u` to collapse onto.
    fn compute_candidate(&mut self, u: VertexId) {
        let mut best = Candidate::NONE;
        for n in self.mesh.neighbor_vertices(u) {
            if self.config.guard_non_manifold && !self.is_legal(u, n) {
                continue;
            }
            let merged = self.quadrics[u.index()] + self.quadrics[n.index()];
            let cost = merged.cost(self.mesh.vertices[n].position());
            if cost < best.cost {
                best = Candidate {
                    target: Some(n),
                    cost,
                };
                if cost <= 0.0 {
                    break;
                }
            }
        }
        self.candidates[u.index()] = best;
    }

    /// Half-edge joining `u` and `n`, in either direction.
    fn joining_half_edge(&self, u: VertexId, n: VertexId) -> Option<HalfEdgeId> {
        self.mesh
            .half_edge_to(u, n)
            .or_else(|| self.mesh.half_edge_to(n, u))
    }

    fn is_legal(&self, u: VertexId, n: VertexId) -> bool {
        self.joining_half_edge(u, n)
            .map(|h| self.mesh.can_collapse(h).unwrap_or(false))
            .unwrap_or(false)
    }

    // =========================================================================
    // GREEDY LOOP
    // =========================================================================

    /// Live vertex with the lowest recorded cost strictly below `limit`.
    fn find_minimum(&self, limit: f64) -> Option<(VertexId, Candidate)> {
        let mut best: Option<(VertexId, Candidate)> = None;
        let mut min_cost = limit;
        for v in self.mesh.vertices.ids() {
            let candidate = self.candidates[v.index()];
            if candidate.target.is_some() && candidate.cost < min_cost {
                min_cost = candidate.cost;
                best = Some((v, candidate));
            }
        }
        best
    }

    /// Performs or rejects the cheapest collapse below `limit`. Returns false
    /// when there is none.
    fn collapse_minimum(&mut self, limit: f64) -> MeshResult<bool> {
        let Some((u, candidate)) = self.find_minimum(limit) else {
            return Ok(false);
        };
        let Some(target) = candidate.target else {
            return Ok(false);
        };

        let half = self.joining_half_edge(u, target);
        let legal = match half {
            Some(h) => !self.config.guard_non_manifold || self.mesh.can_collapse(h)?,
            None => false,
        };
        let Some(h) = half.filter(|_| legal) else {
            self.reject(u, candidate);
            return Ok(true);
        };

        let on_border = self.mesh.halfedges[h].opposite.is_none();
        let kept = self.mesh.collapse_into(h, u, target)?;
        self.candidates[u.index()] = Candidate::NONE;
        self.report.collapses_performed += 1;
        if on_border {
            self.report.border_collapses += 1;
        }
        self.report.costs.push(candidate.cost);
        debug!(
            removed = %u,
            kept = %kept,
            cost = candidate.cost,
            on_border,
            "Collapsed vertex"
        );

        self.refresh_around(kept);
        Ok(true)
    }

    /// Records a refused move and looks for a new one. A vertex that picks
    /// the same refused move again is left without a move until a
    /// neighboring collapse refreshes it.
    fn reject(&mut self, u: VertexId, refused: Candidate) {
        self.report.collapses_rejected += 1;
        debug!(vertex = %u, target = ?refused.target, "Rejected collapse");

        self.compute_candidate(u);
        if self.candidates[u.index()].target == refused.target {
            self.candidates[u.index()] = Candidate::NONE;
        }
    }

    /// Refreshes geometry, quadrics and candidates of `kept` and its
    /// neighbors after a collapse.
    fn refresh_around(&mut self, kept: VertexId) {
        for t in self.mesh.triangles_around(kept) {
            self.mesh.update_triangle_plane(t);
        }

        let neighbors = self.mesh.neighbor_vertices(kept);
        self.mesh.update_vertex_normal(kept);
        for &n in &neighbors {
            self.mesh.update_vertex_normal(n);
        }

        self.compute_quadric(kept);
        for &n in &neighbors {
            self.compute_quadric(n);
        }

        self.compute_candidate(kept);
        for &n in &neighbors {
            self.compute_candidate(n);
        }
    }
}

/// Removes up to `count` vertices from `mesh` with the default configuration.
pub fn redux_count(mesh: &mut Mesh, count: usize) -> MeshResult<ReductionReport> {
    Simplifier::new(mesh).redux_count(count)
}

/// Removes vertices from `mesh` while the cheapest collapse costs less than
/// `max_cost`, with the default configuration.
pub fn redux_cost(mesh: &mut Mesh, max_cost: f64) -> MeshResult<ReductionReport> {
    Simplifier::new(mesh).redux_cost(max_cost)
}
