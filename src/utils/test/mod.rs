//! Test utilities
//!
//! Catalog fixtures and helpers shared by unit and integration tests.

pub mod helpers;

// Re-export commonly used functions for convenience
pub use fixtures::{balanced_catalog, reference_catalog, write_source_csv};
pub use helpers::{assert_discovery_order, seeded_rng};
