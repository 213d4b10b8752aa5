//! Centralized configuration values shared across the mesh workspace.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Numerical tolerance used by the topology and decimation kernels.
///
/// Triangles whose area falls below this value are treated as degenerate and
/// contribute nothing to vertex quadrics.
///
/// # Examples
/// ```
/// use config::constants::EPSILON;
/// assert!(EPSILON < 1.0e-6);
/// ```
pub const EPSILON: f64 = 1.0e-10;

// =============================================================================
// DECIMATION CONSTANTS
// =============================================================================

/// Collapse cost recorded for a vertex that has no legal collapse target.
///
/// # Examples
/// ```
/// use config::constants::NO_COLLAPSE_COST;
/// assert!(NO_COLLAPSE_COST > 1.0e30);
/// ```
pub const NO_COLLAPSE_COST: f64 = 1.0e38;

/// Cost limit used when reducing by count: every vertex with a recorded target
/// stays below it, vertices without one never do.
///
/// # Examples
/// ```
/// use config::constants::{NO_COLLAPSE_COST, UNBOUNDED_COLLAPSE_COST};
/// assert!(UNBOUNDED_COLLAPSE_COST > NO_COLLAPSE_COST);
/// ```
pub const UNBOUNDED_COLLAPSE_COST: f64 = 1.0e40;

// =============================================================================
// TOPOLOGY CONSTANTS
// =============================================================================

/// Minimum number of corners needed to build a polygon or a closed border.
///
/// # Examples
/// ```
/// use config::constants::MIN_POLYGON_VERTICES;
/// assert_eq!(MIN_POLYGON_VERTICES, 3);
/// ```
pub const MIN_POLYGON_VERTICES: usize = 3;

// =============================================================================
// SIMPLIFY CONFIG
// =============================================================================

/// Settings consumed by the quadric simplifier for one reduction pass.
///
/// # Examples
/// ```
/// use config::constants::SimplifyConfig;
/// let config = SimplifyConfig::default();
/// assert!(config.tolerance > 0.0);
/// assert!(config.guard_non_manifold);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplifyConfig {
    /// Area below which a triangle is ignored when accumulating quadrics.
    pub tolerance: f64,
    /// Skip collapse candidates that would merge two triangle fans into a
    /// non-manifold vertex or edge.
    pub guard_non_manifold: bool,
}

impl SimplifyConfig {
    /// Builds a configuration, rejecting a non-positive or non-finite
    /// tolerance.
    ///
    /// # Examples
    /// ```
    /// use config::constants::SimplifyConfig;
    /// let cfg = SimplifyConfig::new(1.0e-8, false).expect("valid config");
    /// assert!(!cfg.guard_non_manifold);
    /// ```
    pub fn new(tolerance: f64, guard_non_manifold: bool) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        Ok(Self {
            tolerance,
            guard_non_manifold,
        })
    }
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON,
            guard_non_manifold: true,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or not finite.
    InvalidTolerance(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive and finite: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
