//! Arrow utilities
//!
//! Column lookup with type coercion, and typed extraction of whole columns
//! from record batches.

pub mod array_utils;
pub mod extractors;

pub use array_utils::{downcast_array, get_column};
pub use extractors::{extract_f64_column, extract_string_column};
