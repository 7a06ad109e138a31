//! Log lines and progress bars for loading and cohort generation

pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use log::{log_operation_complete, log_operation_start, log_row_warning, log_warning};
pub use progress::{create_main_progress_bar, create_spinner, finish_progress_bar};
