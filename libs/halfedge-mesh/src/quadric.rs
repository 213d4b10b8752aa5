//! # Quadric Error Metric
//!
//! A quadric accumulates squared distances to a set of planes:
//!
//! ```text
//! cost(P) = Pᵗ A P + 2 Bᵗ P + C
//! ```
//!
//! where each plane `(N, d)` with `d = -N·V` for a point `V` on it adds
//! `A += N Nᵗ`, `B += d N` and `C += d²`. When `N` is a unit vector, the
//! cost of a point is the sum of its squared distances to the planes.

use std::ops::{Add, AddAssign};

use glam::{DMat3, DVec3};

/// Symmetric plane-distance accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadric {
    a: DMat3,
    b: DVec3,
    c: f64,
}

impl Default for Quadric {
    fn default() -> Self {
        Self {
            a: DMat3::ZERO,
            b: DVec3::ZERO,
            c: 0.0,
        }
    }
}

impl Quadric {
    /// Quadric of a single plane through `point` with normal `normal`.
    #[must_use]
    pub fn from_plane(normal: DVec3, point: DVec3) -> Self {
        let mut q = Self::default();
        q.add_plane(normal, point);
        q
    }

    /// Resets to the null quadric.
    pub fn zero(&mut self) {
        *self = Self::default();
    }

    /// Adds the plane with normal `normal` through `point`.
    pub fn add_plane(&mut self, normal: DVec3, point: DVec3) {
        let d = -normal.dot(point);
        self.a += DMat3::from_cols(normal * normal.x, normal * normal.y, normal * normal.z);
        self.b += normal * d;
        self.c += d * d;
    }

    pub fn add_quadric(&mut self, other: &Quadric) {
        self.a += other.a;
        self.b += other.b;
        self.c += other.c;
    }

    /// Evaluates the accumulated error at `p`.
    #[must_use]
    pub fn cost(&self, p: DVec3) -> f64 {
        p.dot(self.a * p) + 2.0 * self.b.dot(p) + self.c
    }
}

impl Add for Quadric {
    type Output = Quadric;

    fn add(mut self, rhs: Quadric) -> Quadric {
        self.add_quadric(&rhs);
        self
    }
}

impl AddAssign for Quadric {
    fn add_assign(&mut self, rhs: Quadric) {
        self.add_quadric(&rhs);
    }
}
