// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Single-room detail: the stay and the room's housekeeping tasks.

use crate::completion::{CompletionSummary, task_key};
use crate::error::CoreError;
use crate::view::{FeedSnapshot, RoomDayView, build_room_day_view};
use roomboard_domain::{
    CategoryLookup, LocationSettings, RoomDayRecord, RoomTask, Stay, TaskDates, task_covers,
};
use serde::{Deserialize, Serialize};
use time::Date;
use tracing::warn;

/// A task for the room, annotated with its local completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    pub task_id: String,
    pub type_id: Option<String>,
    /// Display name of the task type; the raw identifier when unmapped.
    pub type_name: Option<String>,
    pub description: String,
    pub dates: TaskDates,
    pub occupancy_blocking: bool,
    /// The idempotency key a completion of this task would use.
    pub task_key: String,
    /// Date the upstream system recorded the task as done.
    pub upstream_completed_on: Option<Date>,
    /// The local completion for the service date, if any.
    pub completion: Option<CompletionSummary>,
}

/// Everything shown when a room is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetail {
    pub record: RoomDayRecord,
    /// Today's stay, or the departing stay when nobody stays tonight.
    pub stay: Option<Stay>,
    pub tasks: Vec<TaskView>,
}

fn task_view(
    task: &RoomTask,
    settings: &LocationSettings,
    completions: &[CompletionSummary],
) -> Option<TaskView> {
    let key: String = match task_key(task.type_id.as_deref(), &task.description) {
        Ok(key) => key,
        Err(err) => {
            warn!(task_id = %task.id, %err, "Task has no usable key");
            return None;
        }
    };
    let completion: Option<CompletionSummary> = completions
        .iter()
        .find(|c| c.room_id == task.room_id && c.task_key == key)
        .cloned();

    Some(TaskView {
        task_id: task.id.clone(),
        type_id: task.type_id.clone(),
        type_name: task.type_id.as_deref().map(|t| settings.task_type_name(t)),
        description: task.description.clone(),
        dates: task.dates,
        occupancy_blocking: task.occupancy_blocking,
        task_key: key,
        upstream_completed_on: task.completed_on,
        completion,
    })
}

/// Builds the detail of one room.
///
/// # Arguments
///
/// * `settings` - The location settings
/// * `lookup` - The category lookups derived from the settings
/// * `snapshot` - The normalized feeds for the window
/// * `room_id` - The room to describe
/// * `date` - The service date
/// * `completions` - Local completions for the location and date
///
/// # Errors
///
/// Returns `CoreError::RoomNotFound` if the room is absent or excluded.
pub fn build_room_detail(
    settings: &LocationSettings,
    lookup: &CategoryLookup,
    snapshot: &FeedSnapshot,
    room_id: &str,
    date: Date,
    completions: &[CompletionSummary],
) -> Result<RoomDetail, CoreError> {
    let view: RoomDayView = build_room_day_view(settings, lookup, snapshot, date)?;
    let record: RoomDayRecord =
        view.room(room_id)
            .cloned()
            .ok_or_else(|| CoreError::RoomNotFound {
                room_id: room_id.trim().to_string(),
            })?;

    let mut tasks: Vec<TaskView> = Vec::new();
    for task in snapshot
        .tasks
        .iter()
        .filter(|t| t.room_id == record.days.room.id)
    {
        if !task_covers(&task.dates, date)? || !settings.matches_task_filters(&task.description) {
            continue;
        }
        if let Some(entry) = task_view(task, settings, completions) {
            tasks.push(entry);
        }
    }

    let stay: Option<Stay> = record
        .days
        .today
        .stay()
        .cloned()
        .or_else(|| record.days.departing.clone());

    Ok(RoomDetail {
        record,
        stay,
        tasks,
    })
}
