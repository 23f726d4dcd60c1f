// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use diesel::prelude::*;
use roomboard_domain::Timestamp;

use crate::data_models::{CompletionKey, TaskCompletionRecord, TaskCompletionRow};
use crate::diesel_schema::task_completions;
use crate::error::PersistenceError;

fn into_records(rows: Vec<TaskCompletionRow>) -> Result<Vec<TaskCompletionRecord>, PersistenceError> {
    rows.into_iter().map(TaskCompletionRow::into_record).collect()
}

backend_fn! {
/// Looks up the completion recorded under `key`, without locking.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
pub fn find_completion(
    conn: &mut _,
    key: &CompletionKey,
) -> Result<Option<TaskCompletionRecord>, PersistenceError> {
    let row: Option<TaskCompletionRow> = task_completions::table
        .filter(task_completions::location_id.eq(&key.location_id))
        .filter(task_completions::room_id.eq(&key.room_id))
        .filter(task_completions::task_key.eq(&key.task_key))
        .filter(task_completions::service_date.eq(&key.service_date))
        .select(TaskCompletionRow::as_select())
        .first(conn)
        .optional()?;
    row.map(TaskCompletionRow::into_record).transpose()
}
}

backend_fn! {
/// Lists completions of a location and service date recorded strictly
/// after `checkpoint`, oldest first.
///
/// Ties on the timestamp are broken by completion ID.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn completions_since(
    conn: &mut _,
    location_id: &str,
    service_date: &str,
    checkpoint: Timestamp,
) -> Result<Vec<TaskCompletionRecord>, PersistenceError> {
    let rows: Vec<TaskCompletionRow> = task_completions::table
        .filter(task_completions::location_id.eq(location_id))
        .filter(task_completions::service_date.eq(service_date))
        .filter(task_completions::completed_at.gt(checkpoint.to_storage_string()))
        .order((
            task_completions::completed_at.asc(),
            task_completions::completion_id.asc(),
        ))
        .select(TaskCompletionRow::as_select())
        .load(conn)?;
    into_records(rows)
}
}

backend_fn! {
/// Lists every completion of a location and service date, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn completions_for_date(
    conn: &mut _,
    location_id: &str,
    service_date: &str,
) -> Result<Vec<TaskCompletionRecord>, PersistenceError> {
    let rows: Vec<TaskCompletionRow> = task_completions::table
        .filter(task_completions::location_id.eq(location_id))
        .filter(task_completions::service_date.eq(service_date))
        .order((
            task_completions::completed_at.asc(),
            task_completions::completion_id.asc(),
        ))
        .select(TaskCompletionRow::as_select())
        .load(conn)?;
    into_records(rows)
}
}

backend_fn! {
/// Lists the completions recorded by one staff member, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn completions_by_completer(
    conn: &mut _,
    completed_by_id: &str,
) -> Result<Vec<TaskCompletionRecord>, PersistenceError> {
    let rows: Vec<TaskCompletionRow> = task_completions::table
        .filter(task_completions::completed_by_id.eq(completed_by_id))
        .order((
            task_completions::completed_at.desc(),
            task_completions::completion_id.desc(),
        ))
        .select(TaskCompletionRow::as_select())
        .load(conn)?;
    into_records(rows)
}
}
