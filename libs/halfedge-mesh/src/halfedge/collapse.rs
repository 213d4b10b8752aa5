//! # Edge Collapse and Flip
//!
//! Local topology rewrites used by the simplifier.
//!
//! ## Collapse
//!
//! ```text
//!        Z                    Z
//!      /   \                  |
//!    R ----- K      =>        K
//!      \   /                  |
//!        Z'                   Z'
//! ```
//!
//! Both triangles on `RK` are removed, every half-edge touching `R` is
//! rewired to `K`, and the two outer half-edges of each removed triangle are
//! stitched together as opposites sharing one edge.

use std::collections::BTreeSet;

use crate::edge::Edge;
use crate::error::{MeshError, MeshResult};
use crate::handles::{HalfEdgeId, VertexId};
use crate::mesh::Mesh;

/// Outer half-edges of a removed triangle: the opposites of its second and
/// third half-edge.
type Seam = (Option<HalfEdgeId>, Option<HalfEdgeId>);

impl Mesh {
    /// Merges `origin(h)` into `target(h)` and returns the surviving vertex.
    ///
    /// This does not check the link condition: collapsing an edge whose
    /// endpoints share a neighbor outside the two triangles on the edge
    /// leaves a non-manifold vertex. Use [`Mesh::collapse_guarded`] to refuse
    /// such collapses.
    pub fn collapse(&mut self, h: HalfEdgeId) -> MeshResult<VertexId> {
        let half = *self.halfedges.try_get(h)?;
        self.collapse_into(h, half.origin, half.target)
    }

    /// Like [`Mesh::collapse`] but fails with
    /// [`MeshError::NonManifoldCollapse`] when [`Mesh::can_collapse`] is
    /// false. The mesh is left unchanged on failure.
    pub fn collapse_guarded(&mut self, h: HalfEdgeId) -> MeshResult<VertexId> {
        if !self.can_collapse(h)? {
            return Err(MeshError::NonManifoldCollapse(h));
        }
        self.collapse(h)
    }

    /// Link condition for collapsing the edge of `h`.
    ///
    /// The vertices adjacent to both endpoints must be exactly the apexes of
    /// the triangles on the edge, and an interior edge must not join two
    /// border vertices.
    ///
    /// An interior edge is also refused when both endpoints see the same link
    /// edge between the two apexes. That is the case for every edge of a
    /// tetrahedron, so a closed component never shrinks below four triangles.
    pub fn can_collapse(&self, h: HalfEdgeId) -> MeshResult<bool> {
        let half = *self.halfedges.try_get(h)?;

        let apex = self.halfedges[half.next].target;
        let mut apexes = BTreeSet::new();
        apexes.insert(apex);
        if let Some(o) = half.opposite {
            let other = self.halfedges[self.halfedges[o].next].target;
            if other == apex {
                return Ok(false);
            }
            if self.has_triangle(half.origin, apex, other)
                && self.has_triangle(half.target, apex, other)
            {
                return Ok(false);
            }
            apexes.insert(other);
            if self.is_border_vertex(half.origin) && self.is_border_vertex(half.target) {
                return Ok(false);
            }
        }

        let around_origin = self.neighbor_vertices(half.origin);
        let around_target = self.neighbor_vertices(half.target);
        let shared: BTreeSet<VertexId> = around_origin
            .intersection(&around_target)
            .copied()
            .collect();
        Ok(shared == apexes)
    }

    /// Whether a triangle has corners `a`, `b` and `c`, in either winding.
    fn has_triangle(&self, a: VertexId, b: VertexId, c: VertexId) -> bool {
        [self.half_edge_to(b, c), self.half_edge_to(c, b)]
            .into_iter()
            .flatten()
            .any(|h| {
                let next = self.halfedges[h].next;
                self.halfedges[next].target == a
            })
    }

    /// Collapses the edge of `h`, merging `removed` into `kept`. The two
    /// vertices must be the endpoints of `h`, in either direction.
    pub(crate) fn collapse_into(
        &mut self,
        h: HalfEdgeId,
        removed: VertexId,
        kept: VertexId,
    ) -> MeshResult<VertexId> {
        let half = *self.halfedges.try_get(h)?;
        let joins = (half.origin == removed && half.target == kept)
            || (half.origin == kept && half.target == removed);
        if !joins {
            return Err(MeshError::NoSuchEdge {
                from: removed,
                to: kept,
            });
        }

        let mut seams = Vec::with_capacity(2);
        seams.push(self.collapse_triangle(h));
        if let Some(o) = half.opposite {
            seams.push(self.collapse_triangle(o));
        }

        self.rewire_vertex(removed, kept);
        for seam in seams {
            self.stitch(seam);
        }
        self.vertices.remove(removed);
        Ok(kept)
    }

    /// Removes the triangle owning `h` and returns its outer half-edges.
    fn collapse_triangle(&mut self, h: HalfEdgeId) -> Seam {
        let half = self.halfedges[h];
        let n = half.next;
        let nn = self.halfedges[n].next;
        let seam = (self.halfedges[n].opposite, self.halfedges[nn].opposite);
        self.remove_triangle(half.triangle);
        seam
    }

    /// Moves every half-edge and edge touching `from` over to `to`.
    fn rewire_vertex(&mut self, from: VertexId, to: VertexId) {
        let outgoing: Vec<HalfEdgeId> = self.outgoing(from).collect();
        for h in outgoing {
            self.halfedges[h].origin = to;
            let edge = self.halfedges[h].edge;
            self.edges[edge].replace_vertex(from, to);

            let incoming = self.prev(h);
            self.halfedges[incoming].target = to;
            let edge = self.halfedges[incoming].edge;
            self.edges[edge].replace_vertex(from, to);
        }
        self.append_siblings(from, to);
    }

    /// Pairs the two outer half-edges of a removed triangle, dropping the
    /// edge of the second one.
    fn stitch(&mut self, (a, b): Seam) {
        let a = a.filter(|&a| self.halfedges.contains(a));
        let b = b.filter(|&b| self.halfedges.contains(b));
        let (Some(a), Some(b)) = (a, b) else {
            return;
        };

        let (ha, hb) = (self.halfedges[a], self.halfedges[b]);
        if ha.origin != hb.target || ha.target != hb.origin {
            return;
        }
        if hb.edge != ha.edge {
            self.edges.remove(hb.edge);
            self.halfedges[b].edge = ha.edge;
        }
        self.halfedges[a].opposite = Some(b);
        self.halfedges[b].opposite = Some(a);
    }

    /// Swaps the diagonal shared by the triangles of `h` and its opposite.
    ///
    /// With `h = C→A` in `(A, B, C)` and its opposite in `(C, D, A)`, the
    /// result is `(C, D, B)` and `(A, B, D)`, and `h` becomes `D→B`. Both
    /// triangles keep their handles and get their plane data refreshed.
    pub fn flip(&mut self, h: HalfEdgeId) -> MeshResult<()> {
        let half = *self.halfedges.try_get(h)?;
        let o = half.opposite.ok_or(MeshError::NoSuchEdge {
            from: half.target,
            to: half.origin,
        })?;
        let opp = self.halfedges[o];

        let (x, y) = (half.origin, half.target);
        let h1 = half.next;
        let h2 = self.halfedges[h1].next;
        let p = self.halfedges[h1].target;
        let o1 = opp.next;
        let o2 = self.halfedges[o1].next;
        let q = self.halfedges[o1].target;

        if p == q || self.half_edge_to(p, q).is_some() || self.half_edge_to(q, p).is_some() {
            return Err(MeshError::NonManifoldEdge { from: q, to: p });
        }
        let (t1, t2) = (half.triangle, opp.triangle);

        self.unlink_sibling(x, h);
        self.unlink_sibling(y, o);
        {
            let he = &mut self.halfedges[h];
            he.origin = q;
            he.target = p;
            he.next = h2;
        }
        {
            let he = &mut self.halfedges[o];
            he.origin = p;
            he.target = q;
            he.next = o2;
        }
        self.link_sibling(q, h);
        self.link_sibling(p, o);
        self.edges[half.edge] = Edge::new(p, q);

        // (x, q, p): o1 -> h -> h2
        self.halfedges[o1].next = h;
        self.halfedges[o1].triangle = t1;
        self.halfedges[h2].next = o1;
        self.triangles[t1].halfedge = o1;

        // (y, p, q): h1 -> o -> o2
        self.halfedges[h1].next = o;
        self.halfedges[h1].triangle = t2;
        self.halfedges[o2].next = h1;
        self.triangles[t2].halfedge = h1;

        self.update_triangle_plane(t1);
        self.update_triangle_plane(t2);
        Ok(())
    }
}
