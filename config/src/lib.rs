//! # Config Crate
//!
//! Centralized configuration constants for the half-edge mesh workspace.
//! Numerical tolerances and decimation cost sentinels are defined here so the
//! topology and simplification code never scatters literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, NO_COLLAPSE_COST, UNBOUNDED_COLLAPSE_COST};
//!
//! // Use EPSILON to detect degenerate (zero-area) triangles
//! let area: f64 = 1e-14;
//! assert!(area < EPSILON);
//!
//! // A vertex without any legal move never passes the count-mode limit
//! assert!(NO_COLLAPSE_COST < UNBOUNDED_COLLAPSE_COST);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No dependencies**: Plain values and a small validated config struct

pub mod constants;

#[cfg(test)]
mod tests;
