// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use roomboard::{CompletionSummary, RoomDetail};
use roomboard_domain::{FilterCategory, FilterMode, RoomDayRecord, RoomId, Timestamp};
use roomboard_persistence::{ActivityLogRecord, TaskCompletionRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;

/// API request for the room-day view of a location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDayViewRequest {
    /// The service date. Defaults to today in the location's timezone.
    #[serde(default)]
    pub date: Option<Date>,
    /// The filter button that is active, if any.
    #[serde(default)]
    pub filter: Option<FilterCategory>,
    /// The mode of the active filter button.
    #[serde(default)]
    pub mode: FilterMode,
}

/// Counts shown on the filter buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCountsResponse {
    /// Rooms matching each category.
    pub inclusive: BTreeMap<FilterCategory, usize>,
    /// Rooms not matching each category.
    pub exclusive: BTreeMap<FilterCategory, usize>,
    /// Rooms taking part in filtering.
    pub filterable_total: usize,
}

/// API response carrying the room-day view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDayViewResponse {
    /// The location identifier.
    pub location_id: String,
    /// The service date the view was built for.
    pub service_date: Date,
    /// Every room of the location, in display order.
    pub rooms: Vec<RoomDayRecord>,
    /// Rooms visible under the requested filter, in display order.
    pub visible_room_ids: Vec<RoomId>,
    /// Filter button counts.
    pub counts: FilterCountsResponse,
}

/// API response carrying a room's detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetailResponse {
    /// The location identifier.
    pub location_id: String,
    /// The service date the detail was built for.
    pub service_date: Date,
    /// The room, its stay and its tasks.
    #[serde(flatten)]
    pub detail: RoomDetail,
}

/// API request to complete a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteTaskRequest {
    /// The room the task belongs to.
    pub room_id: String,
    /// The upstream task identifier, for tasks from the feed.
    #[serde(default)]
    pub task_id: Option<String>,
    /// The task type identifier.
    #[serde(default)]
    pub task_type: Option<String>,
    /// The task description.
    pub description: String,
    /// The booking in the room, if any.
    #[serde(default)]
    pub booking_ref: Option<String>,
    /// The service date. Defaults to today in the location's timezone.
    #[serde(default)]
    pub service_date: Option<Date>,
    /// The staff member completing the task.
    pub completed_by_id: String,
    /// The staff member's display name.
    pub completed_by_name: String,
}

/// API response for a successful task completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteTaskResponse {
    /// The ledger identifier of the completion.
    pub completion_id: i64,
    /// The room the task belongs to.
    pub room_id: RoomId,
    /// The idempotency key of the task.
    pub task_key: String,
    /// The service date the completion counts for.
    pub service_date: Date,
    /// Display name of the completer.
    pub completed_by: String,
    /// When the completion was recorded.
    pub completed_at: Timestamp,
    /// Whether the completion was pushed upstream.
    pub synced_upstream: bool,
    /// A success message.
    pub message: String,
}

/// API request to poll for completions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollUpdatesRequest {
    /// The service date. Defaults to today in the location's timezone.
    #[serde(default)]
    pub service_date: Option<Date>,
    /// The checkpoint returned by the previous poll.
    pub checkpoint: Timestamp,
}

/// API response to a poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollUpdatesResponse {
    /// The polled service date.
    pub service_date: Date,
    /// New completions, oldest first.
    pub completions: Vec<CompletionSummary>,
    /// The checkpoint to send with the next poll.
    pub next_checkpoint: Timestamp,
}

/// API request to record a linen submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinenSubmissionRequest {
    /// The room the linen was delivered to or collected from.
    pub room_id: String,
    /// Item counts, keyed by item name.
    pub items: BTreeMap<String, u32>,
    /// The booking in the room, if any.
    #[serde(default)]
    pub booking_ref: Option<String>,
    /// The service date. Defaults to today in the location's timezone.
    #[serde(default)]
    pub service_date: Option<Date>,
    /// The staff member submitting.
    pub submitted_by_id: String,
    /// The staff member's display name.
    pub submitted_by_name: String,
}

/// API response for a recorded activity entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecordedResponse {
    /// The identifier of the new entry.
    pub activity_id: i64,
    /// A success message.
    pub message: String,
}

/// API response listing activity entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityListResponse {
    /// The location identifier.
    pub location_id: String,
    /// The service date listed.
    pub service_date: Date,
    /// Entries in recording order.
    pub entries: Vec<ActivityLogRecord>,
}

/// API response listing ledger rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionListResponse {
    /// The completions.
    pub completions: Vec<TaskCompletionRecord>,
}

/// API response for an activity log purge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeActivityResponse {
    /// Entries deleted.
    pub deleted: usize,
    /// Entries recorded before this instant were deleted.
    pub cutoff: Timestamp,
}
