//! Utility functions for logging, Arrow column access, dataset output and tests

pub mod arrow;
pub mod io;
pub mod logging;
pub mod test;

pub use logging::{log_operation_complete, log_operation_start, log_warning};
