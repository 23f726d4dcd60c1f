// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use diesel::prelude::*;
use roomboard_audit::ActivityEntry;
use roomboard_domain::{Timestamp, format_date};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::activity_log;
use crate::error::PersistenceError;

backend_fn! {
/// Appends an entry to the activity log.
///
/// # Returns
///
/// The activity ID assigned by the database.
///
/// # Errors
///
/// Returns an error if the payload cannot be encoded or the insert fails.
pub fn insert_activity(
    conn: &mut _,
    entry: &ActivityEntry,
) -> Result<i64, PersistenceError> {
    let (event_type, payload): (String, String) = entry
        .event
        .to_parts()
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

    diesel::insert_into(activity_log::table)
        .values((
            activity_log::location_id.eq(&entry.location_id),
            activity_log::room_id.eq(entry.room_id.as_str()),
            activity_log::event_type.eq(&event_type),
            activity_log::payload.eq(&payload),
            activity_log::actor_id.eq(&entry.actor.id),
            activity_log::actor_name.eq(&entry.actor.display_name),
            activity_log::recorded_at.eq(entry.recorded_at.to_storage_string()),
            activity_log::service_date.eq(format_date(entry.service_date)),
            activity_log::booking_ref.eq(entry.booking_ref.as_deref()),
        ))
        .execute(conn)?;

    let activity_id: i64 = conn.get_last_insert_rowid()?;
    debug!(
        activity_id,
        location = %entry.location_id,
        room_id = %entry.room_id,
        event_type = %event_type,
        "Recorded activity"
    );
    Ok(activity_id)
}
}

backend_fn! {
/// Deletes activity log entries recorded before `cutoff`.
///
/// # Returns
///
/// The number of entries deleted.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn purge_activity_before(
    conn: &mut _,
    cutoff: Timestamp,
) -> Result<usize, PersistenceError> {
    let deleted: usize = diesel::delete(
        activity_log::table.filter(activity_log::recorded_at.lt(cutoff.to_storage_string())),
    )
    .execute(conn)?;

    info!(deleted, cutoff = %cutoff, "Purged expired activity log entries");
    Ok(deleted)
}
}
