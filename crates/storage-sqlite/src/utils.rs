//! Small helpers shared by the repositories.

use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;

/// Keys per `IN (...)` query, well under SQLite's parameter limit.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Splits `items` into slices small enough for one `IN (...)` query.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

/// Splits rows for a multi-row `INSERT` so each statement binds at most
/// [`SQLITE_MAX_PARAMS_CHUNK`] parameters.
pub fn chunk_rows_for_insert<T>(rows: &[T], columns_per_row: usize) -> impl Iterator<Item = &[T]> {
    let per_chunk = (SQLITE_MAX_PARAMS_CHUNK / columns_per_row.max(1)).max(1);
    rows.chunks(per_chunk)
}

/// Fresh primary key for a new row.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current UTC time, stored without an offset.
pub fn now_utc() -> NaiveDateTime {
    Utc::now().naive_utc()
}
