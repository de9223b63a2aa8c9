//! Row-to-entity parsing helpers.
//!
//! Every repo needs to convert `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the nullable-column and JSON-column handling.

use serde::de::DeserializeOwned;

use crate::error::DatabaseError;

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Deserialize a JSON TEXT column. NULL and empty strings read as `T::default()`.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the column holds invalid JSON.
pub fn get_json<T: DeserializeOwned + Default>(
    row: &libsql::Row,
    idx: i32,
    column: &str,
) -> Result<T, DatabaseError> {
    match get_opt_string(row, idx)? {
        Some(raw) => serde_json::from_str(&raw).map_err(|e| {
            DatabaseError::InvalidState(format!("column '{column}' holds invalid JSON: {e}"))
        }),
        None => Ok(T::default()),
    }
}

/// Serialize a value for a JSON TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, DatabaseError> {
    serde_json::to_string(value).map_err(|e| DatabaseError::Other(e.into()))
}

/// Trim a free-text field; blank values become `None` (stored as SQL NULL).
#[must_use]
pub fn blank_to_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
