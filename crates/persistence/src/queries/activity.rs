// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{ActivityLogRecord, ActivityLogRow};
use crate::diesel_schema::activity_log;
use crate::error::PersistenceError;

backend_fn! {
/// Lists the activity of a location and service date in recording order.
///
/// # Errors
///
/// Returns an error if the query fails or an entry cannot be decoded.
pub fn activity_for_date(
    conn: &mut _,
    location_id: &str,
    service_date: &str,
) -> Result<Vec<ActivityLogRecord>, PersistenceError> {
    let rows: Vec<ActivityLogRow> = activity_log::table
        .filter(activity_log::location_id.eq(location_id))
        .filter(activity_log::service_date.eq(service_date))
        .order((activity_log::recorded_at.asc(), activity_log::activity_id.asc()))
        .select(ActivityLogRow::as_select())
        .load(conn)?;
    rows.into_iter().map(ActivityLogRow::into_record).collect()
}
}
