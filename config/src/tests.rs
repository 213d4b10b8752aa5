//! # Tests for Config Constants
//!
//! Unit tests verifying the relationships between configuration constants.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_epsilon_is_small() {
    assert!(EPSILON < 1e-6, "EPSILON should be small for precision");
}

// =============================================================================
// DECIMATION TESTS
// =============================================================================

#[test]
fn test_unbounded_limit_exceeds_no_move_cost() {
    // Count-driven reduction must never select a vertex without a target
    assert!(
        NO_COLLAPSE_COST < UNBOUNDED_COLLAPSE_COST,
        "NO_COLLAPSE_COST must stay below UNBOUNDED_COLLAPSE_COST"
    );
}

#[test]
fn test_sentinels_are_finite() {
    assert!(NO_COLLAPSE_COST.is_finite());
    assert!(UNBOUNDED_COLLAPSE_COST.is_finite());
}

// =============================================================================
// TOPOLOGY TESTS
// =============================================================================

#[test]
fn test_min_polygon_vertices_is_triangle() {
    assert_eq!(MIN_POLYGON_VERTICES, 3);
}
