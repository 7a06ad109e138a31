//! Utilities for working with Arrow arrays.
//!
//! This module provides utility functions for safely extracting columns from
//! record batches, coercing them to the type the caller expects.

use arrow::array::{Array, ArrayRef};
use arrow::compute::kernels::cast::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::{PhenoError, Result};

/// Get a column from a record batch, cast to the expected type
///
/// # Arguments
///
/// * `batch` - The record batch containing the column
/// * `column_name` - The name of the column to extract
/// * `expected_type` - The data type the caller will downcast to
/// * `required` - Whether a missing column is an error or simply `None`
///
/// # Returns
///
/// * `Ok(Some(ArrayRef))` - The column array (converted if necessary) if found
/// * `Ok(None)` - If the column is not found and `required` is false
/// * `Err(PhenoError)` - If a required column is missing or the cast fails
pub fn get_column(
    batch: &RecordBatch,
    column_name: &str,
    expected_type: &DataType,
    required: bool,
) -> Result<Option<ArrayRef>> {
    let Ok(idx) = batch.schema().index_of(column_name) else {
        if required {
            return Err(PhenoError::MissingColumn {
                column: column_name.to_string(),
            });
        }
        log::warn!("Optional column '{column_name}' not found; treating it as empty");
        return Ok(None);
    };

    let column = batch.column(idx);
    if column.data_type() == expected_type {
        return Ok(Some(column.clone()));
    }

    log::debug!(
        "Converting column '{column_name}' from {:?} to {expected_type:?}",
        column.data_type()
    );
    Ok(Some(cast(column, expected_type)?))
}

/// Downcast a column to a specific array type with a clear error message
///
/// # Type Parameters
///
/// * `T` - The concrete Arrow array type
pub fn downcast_array<'a, T: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    type_name: &str,
) -> Result<&'a T> {
    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        PhenoError::Arrow(arrow::error::ArrowError::CastError(format!(
            "Column '{column_name}' could not be read as {type_name}"
        )))
    })
}
