//! Field extraction utilities for Arrow record batches
//!
//! Whole-column extraction into Rust values, used by the catalog loader.

use arrow::array::{Array, Float64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::utils::arrow::array_utils::{downcast_array, get_column};

/// Extract a string column; empty and null cells become `None`
///
/// A missing optional column yields a column of `None` values.
pub fn extract_string_column(
    batch: &RecordBatch,
    column_name: &str,
    required: bool,
) -> Result<Vec<Option<String>>> {
    let Some(array) = get_column(batch, column_name, &DataType::Utf8, required)? else {
        return Ok(vec![None; batch.num_rows()]);
    };
    let strings = downcast_array::<StringArray>(&array, column_name, "String")?;

    Ok((0..strings.len())
        .map(|row| {
            if strings.is_null(row) {
                return None;
            }
            let value = strings.value(row).trim();
            (!value.is_empty()).then(|| value.to_string())
        })
        .collect())
}

/// Extract a floating point column; unparseable cells become `None`
pub fn extract_f64_column(
    batch: &RecordBatch,
    column_name: &str,
    required: bool,
) -> Result<Vec<Option<f64>>> {
    let Some(array) = get_column(batch, column_name, &DataType::Float64, required)? else {
        return Ok(vec![None; batch.num_rows()]);
    };
    let floats = downcast_array::<Float64Array>(&array, column_name, "Float64")?;

    Ok((0..floats.len())
        .map(|row| (!floats.is_null(row)).then(|| floats.value(row)))
        .collect())
}
