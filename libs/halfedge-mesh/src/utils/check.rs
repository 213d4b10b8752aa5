//! # Consistency Check
//!
//! Walks every element and verifies the half-edge invariants. Only reads
//! through checked accessors so that a corrupted mesh is reported, never
//! panicked on.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{info, warn};

use crate::handles::{EdgeId, HalfEdgeId, TriangleId, VertexId};
use crate::mesh::Mesh;

/// A single violated invariant.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CheckIssue {
    #[error("Triangle {0}: half-edges do not form a 3-cycle owned by it")]
    BrokenCycle(TriangleId),

    #[error("Triangle {0}: corners are not pairwise distinct")]
    RepeatedCorner(TriangleId),

    #[error("Half-edge {halfedge}: {link} link is dangling")]
    DanglingLink {
        halfedge: HalfEdgeId,
        link: &'static str,
    },

    #[error("Half-edge {0}: stored target differs from the origin of next")]
    TargetMismatch(HalfEdgeId),

    #[error("Half-edge {0}: opposite does not point back")]
    OppositeNotReciprocal(HalfEdgeId),

    #[error("Half-edge {0}: opposite does not join the same vertices reversed")]
    OppositeEndpoints(HalfEdgeId),

    #[error("Half-edge {0}: edge does not join its endpoints or differs from the opposite's")]
    EdgeMismatch(HalfEdgeId),

    #[error("Half-edge {0}: missing from the sibling list of its origin")]
    NotInSiblingList(HalfEdgeId),

    #[error("Vertex {vertex}: sibling list holds {halfedge} whose origin is another vertex")]
    ForeignSibling {
        vertex: VertexId,
        halfedge: HalfEdgeId,
    },

    #[error("Vertex {0}: sibling list is cyclic")]
    SiblingCycle(VertexId),

    #[error("Edge {edge}: referenced by {count} half-edges")]
    EdgeRefCount { edge: EdgeId, count: usize },

    #[error("Vertex {0}: not part of any triangle")]
    OrphanVertex(VertexId),
}

impl CheckIssue {
    /// Orphan vertices are reported but leave the mesh usable.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CheckIssue::OrphanVertex(_))
    }
}

/// Outcome of [`check_mesh`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    pub issues: Vec<CheckIssue>,
    /// Orphan vertices deleted by a repairing check.
    pub orphans_removed: usize,
}

impl CheckReport {
    /// True when no fatal issue was found.
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(CheckIssue::is_fatal)
    }
}

/// Verifies the structural invariants of `mesh`.
///
/// With `repair`, vertices belonging to no triangle are deleted instead of
/// reported. Every issue is also logged as a warning.
pub fn check_mesh(mesh: &mut Mesh, repair: bool) -> CheckReport {
    let mut report = CheckReport::default();
    check_triangles(mesh, &mut report.issues);
    check_halfedges(mesh, &mut report.issues);
    check_siblings(mesh, &mut report.issues);
    check_edges(mesh, &mut report.issues);

    let orphans: Vec<VertexId> = mesh
        .vertices()
        .filter(|(_, vertex)| vertex.halfedge().is_none())
        .map(|(id, _)| id)
        .collect();
    if repair {
        for &v in &orphans {
            mesh.vertices.remove(v);
        }
        report.orphans_removed = orphans.len();
    } else {
        report
            .issues
            .extend(orphans.into_iter().map(CheckIssue::OrphanVertex));
    }

    for issue in &report.issues {
        warn!(mesh = mesh.name(), %issue, "Mesh check issue");
    }
    info!(
        mesh = mesh.name(),
        issues = report.issues.len(),
        orphans_removed = report.orphans_removed,
        valid = report.is_valid(),
        "Mesh check complete"
    );
    report
}

fn check_triangles(mesh: &Mesh, issues: &mut Vec<CheckIssue>) {
    for (t, triangle) in mesh.triangles() {
        let mut corners = Vec::with_capacity(3);
        let mut visited = Vec::with_capacity(3);
        let mut h = triangle.halfedge();
        let mut closed = false;
        for step in 0..3 {
            let Ok(half) = mesh.halfedge(h) else {
                break;
            };
            if half.triangle() != t || visited.contains(&h) {
                break;
            }
            visited.push(h);
            corners.push(half.origin());
            h = half.next();
            if step == 2 {
                closed = h == triangle.halfedge();
            }
        }
        if !closed {
            issues.push(CheckIssue::BrokenCycle(t));
            continue;
        }
        if corners[0] == corners[1] || corners[1] == corners[2] || corners[0] == corners[2] {
            issues.push(CheckIssue::RepeatedCorner(t));
        }
    }
}

fn check_halfedges(mesh: &Mesh, issues: &mut Vec<CheckIssue>) {
    for h in mesh.halfedge_list() {
        let Ok(&half) = mesh.halfedge(h) else {
            continue;
        };
        let dangling = |link| CheckIssue::DanglingLink { halfedge: h, link };

        if !mesh.contains_vertex_id(half.origin()) {
            issues.push(dangling("origin"));
        }
        if !mesh.contains_vertex_id(half.target()) {
            issues.push(dangling("target"));
        }
        if !mesh.contains_triangle_id(half.triangle()) {
            issues.push(dangling("triangle"));
        }
        match mesh.halfedge(half.next()) {
            Ok(next) if next.origin() != half.target() => {
                issues.push(CheckIssue::TargetMismatch(h));
            }
            Ok(_) => {}
            Err(_) => issues.push(dangling("next")),
        }
        match mesh.edge(half.edge()) {
            Ok(edge) if !edge.connects(half.origin(), half.target()) => {
                issues.push(CheckIssue::EdgeMismatch(h))
            }
            Ok(_) => {}
            Err(_) => issues.push(dangling("edge")),
        }
        if let Some(o) = half.opposite() {
            match mesh.halfedge(o) {
                Ok(opp) => {
                    if opp.opposite() != Some(h) {
                        issues.push(CheckIssue::OppositeNotReciprocal(h));
                    }
                    if opp.origin() != half.target() || opp.target() != half.origin() {
                        issues.push(CheckIssue::OppositeEndpoints(h));
                    } else if opp.edge() != half.edge() {
                        issues.push(CheckIssue::EdgeMismatch(h));
                    }
                }
                Err(_) => issues.push(dangling("opposite")),
            }
        }
        if let Some(s) = half.sibling() {
            if !mesh.contains_halfedge_id(s) {
                issues.push(dangling("sibling"));
            }
        }
    }
}

fn check_siblings(mesh: &Mesh, issues: &mut Vec<CheckIssue>) {
    let limit = mesh.halfedge_count();
    let mut listed: HashMap<HalfEdgeId, usize> = HashMap::new();

    for (v, vertex) in mesh.vertices() {
        let mut current = vertex.halfedge();
        let mut steps = 0;
        while let Some(h) = current {
            if steps > limit {
                issues.push(CheckIssue::SiblingCycle(v));
                break;
            }
            let Ok(half) = mesh.halfedge(h) else {
                break;
            };
            if half.origin() != v {
                issues.push(CheckIssue::ForeignSibling {
                    vertex: v,
                    halfedge: h,
                });
            }
            *listed.entry(h).or_default() += 1;
            current = half.sibling();
            steps += 1;
        }
    }

    for h in mesh.halfedge_list() {
        if listed.get(&h).copied().unwrap_or(0) == 0 {
            issues.push(CheckIssue::NotInSiblingList(h));
        }
    }
}

fn check_edges(mesh: &Mesh, issues: &mut Vec<CheckIssue>) {
    let mut counts: HashMap<EdgeId, usize> = mesh.edge_list().into_iter().map(|e| (e, 0)).collect();
    for h in mesh.halfedge_list() {
        if let Ok(half) = mesh.halfedge(h) {
            if let Some(count) = counts.get_mut(&half.edge()) {
                *count += 1;
            }
        }
    }

    let mut edges: Vec<(EdgeId, usize)> = counts.into_iter().collect();
    edges.sort_unstable();
    for (edge, count) in edges {
        if count == 0 || count > 2 {
            issues.push(CheckIssue::EdgeRefCount { edge, count });
        }
    }
}
