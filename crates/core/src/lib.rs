// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod completion;
mod detail;
mod error;
mod feed;
mod ingest;
mod sync;
mod view;

#[cfg(test)]
mod tests;

use roomboard_domain::{LocationSettings, service_date_in_zone};
use time::{Date, OffsetDateTime};

// Re-export public types and functions
pub use completion::{
    CompletionRequest, CompletionStage, CompletionSummary, NewTaskCompletion, task_key,
};
pub use detail::{RoomDetail, TaskView, build_room_detail};
pub use error::CoreError;
pub use feed::{FeedClient, FeedError, FeedId, FeedRoom, FeedStay, FeedTask, StaticFeed};
pub use ingest::{
    MalformedRecord, ingest_rooms, ingest_stays, ingest_tasks, normalize_room, normalize_stay,
    normalize_task,
};
pub use sync::{SyncBatch, next_checkpoint};
pub use view::{FeedSnapshot, RoomDayView, build_room_day_view, fetch_room_day_view};

/// Resolves the service date of a request.
///
/// An explicit date wins. Otherwise the current date in the location's
/// timezone is used.
///
/// # Arguments
///
/// * `settings` - The location settings
/// * `requested` - The date given by the caller, if any
/// * `now` - The current instant
///
/// # Errors
///
/// Returns an error if the location's timezone is unknown.
pub fn resolve_service_date(
    settings: &LocationSettings,
    requested: Option<Date>,
    now: OffsetDateTime,
) -> Result<Date, CoreError> {
    match requested {
        Some(date) => Ok(date),
        None => Ok(service_date_in_zone(now, &settings.timezone)?),
    }
}
