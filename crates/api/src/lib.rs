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
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;
mod settings;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_audit_error, translate_completion_error, translate_core_error,
    translate_domain_error, translate_feed_error, translate_persistence_error,
};
pub use handlers::Housekeeping;
pub use request_response::{
    ActivityListResponse, ActivityRecordedResponse, CompleteTaskRequest, CompleteTaskResponse,
    CompletionListResponse, FilterCountsResponse, LinenSubmissionRequest, PollUpdatesRequest,
    PollUpdatesResponse, PurgeActivityResponse, RoomDayViewRequest, RoomDayViewResponse,
    RoomDetailResponse,
};
pub use settings::{SettingsError, SettingsRegistry};
