//! Outcome of a reduction pass.

// Element counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use std::fmt;

/// Statistics collected by one reduction pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ReductionReport {
    /// Vertex count before the pass.
    pub original_vertices: usize,
    /// Vertex count after the pass.
    pub final_vertices: usize,
    /// Triangle count before the pass.
    pub original_triangles: usize,
    /// Triangle count after the pass.
    pub final_triangles: usize,

    /// Number of collapses performed.
    pub collapses_performed: usize,

    /// Performed collapses whose edge lay on the border. Each removes one
    /// triangle; every other collapse removes two.
    pub border_collapses: usize,

    /// Number of selected collapses that were refused, e.g. because the
    /// recorded target was no longer adjacent or the collapse would create a
    /// non-manifold vertex.
    pub collapses_rejected: usize,

    /// Cost of every performed collapse, in the order they happened.
    pub costs: Vec<f64>,

    /// Cheapest collapse still available when the pass stopped, `None` when
    /// no vertex had a legal move left.
    pub remaining_min_cost: Option<f64>,
}

impl ReductionReport {
    pub(crate) fn start(vertices: usize, triangles: usize) -> Self {
        Self {
            original_vertices: vertices,
            final_vertices: vertices,
            original_triangles: triangles,
            final_triangles: triangles,
            collapses_performed: 0,
            border_collapses: 0,
            collapses_rejected: 0,
            costs: Vec::new(),
            remaining_min_cost: None,
        }
    }

    /// Ratio of final to original triangle count.
    #[must_use]
    pub fn reduction_ratio(&self) -> f64 {
        if self.original_triangles == 0 {
            1.0
        } else {
            self.final_triangles as f64 / self.original_triangles as f64
        }
    }

    /// Percentage of triangles removed.
    #[must_use]
    pub fn reduction_percent(&self) -> f64 {
        (1.0 - self.reduction_ratio()) * 100.0
    }

    /// Triangles removed by the performed collapses.
    #[must_use]
    pub const fn triangles_removed(&self) -> usize {
        2 * self.collapses_performed - self.border_collapses
    }

    /// Whether at least one collapse happened.
    #[must_use]
    pub const fn was_reduced(&self) -> bool {
        self.collapses_performed > 0
    }

    /// Highest cost paid by a single collapse, 0 when nothing collapsed.
    #[must_use]
    pub fn max_cost(&self) -> f64 {
        self.costs.iter().copied().fold(0.0, f64::max)
    }
}

impl fmt::Display for ReductionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reduction: {} → {} vertices, {} → {} triangles ({:.1}% reduction, {} collapses, {} rejected)",
            self.original_vertices,
            self.final_vertices,
            self.original_triangles,
            self.final_triangles,
            self.reduction_percent(),
            self.collapses_performed,
            self.collapses_rejected
        )
    }
}
