// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use roomboard::{CompletionSummary, NewTaskCompletion};
use roomboard_audit::{ActivityEntry, ActivityEvent, Actor};
use roomboard_domain::{RoomId, Timestamp, format_date, parse_date};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::diesel_schema::{activity_log, task_completions};
use crate::error::PersistenceError;

/// Identifies the single completion allowed per task, room and service date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionKey {
    pub location_id: String,
    pub room_id: String,
    pub task_key: String,
    pub service_date: String,
}

impl CompletionKey {
    /// Returns the key a completion is recorded under.
    #[must_use]
    pub fn for_completion(completion: &NewTaskCompletion) -> Self {
        Self {
            location_id: completion.location_id.clone(),
            room_id: completion.room_id.as_str().to_string(),
            task_key: completion.task_key.clone(),
            service_date: format_date(completion.service_date),
        }
    }
}

/// A committed completion as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionOutcome {
    pub completion_id: i64,
    pub completed_by: String,
    pub completed_at: Timestamp,
}

/// A full ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCompletionRecord {
    pub completion_id: i64,
    pub location_id: String,
    pub room_id: RoomId,
    pub task_id: Option<String>,
    pub task_type: Option<String>,
    pub task_key: String,
    pub description: String,
    pub completed_by: Actor,
    pub completed_at: Timestamp,
    pub booking_ref: Option<String>,
    pub service_date: Date,
}

impl TaskCompletionRecord {
    /// Returns the staff-facing summary of the completion.
    #[must_use]
    pub fn summary(&self) -> CompletionSummary {
        CompletionSummary {
            completion_id: self.completion_id,
            room_id: self.room_id.clone(),
            task_key: self.task_key.clone(),
            task_id: self.task_id.clone(),
            description: self.description.clone(),
            completed_by: self.completed_by.clone(),
            completed_at: self.completed_at,
        }
    }
}

/// A stored activity log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogRecord {
    pub activity_id: i64,
    #[serde(flatten)]
    pub entry: ActivityEntry,
}

fn decode_timestamp(value: &str) -> Result<Timestamp, PersistenceError> {
    Timestamp::parse(value).map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

fn decode_date(value: &str) -> Result<Date, PersistenceError> {
    parse_date(value).map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

fn decode_room(value: &str) -> Result<RoomId, PersistenceError> {
    RoomId::new(value).map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Diesel Queryable struct for ledger rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = task_completions)]
pub(crate) struct TaskCompletionRow {
    pub completion_id: i64,
    pub location_id: String,
    pub room_id: String,
    pub task_id: Option<String>,
    pub task_type: Option<String>,
    pub task_key: String,
    pub description: String,
    pub completed_by_id: String,
    pub completed_by_name: String,
    pub completed_at: String,
    pub booking_ref: Option<String>,
    pub service_date: String,
}

impl TaskCompletionRow {
    pub(crate) fn into_record(self) -> Result<TaskCompletionRecord, PersistenceError> {
        Ok(TaskCompletionRecord {
            completion_id: self.completion_id,
            room_id: decode_room(&self.room_id)?,
            completed_at: decode_timestamp(&self.completed_at)?,
            service_date: decode_date(&self.service_date)?,
            location_id: self.location_id,
            task_id: self.task_id,
            task_type: self.task_type,
            task_key: self.task_key,
            description: self.description,
            completed_by: Actor::new(self.completed_by_id, self.completed_by_name),
            booking_ref: self.booking_ref,
        })
    }
}

/// Diesel Queryable struct for activity log rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = activity_log)]
pub(crate) struct ActivityLogRow {
    pub activity_id: i64,
    pub location_id: String,
    pub room_id: String,
    pub event_type: String,
    pub payload: String,
    pub actor_id: String,
    pub actor_name: String,
    pub recorded_at: String,
    pub service_date: String,
    pub booking_ref: Option<String>,
}

impl ActivityLogRow {
    pub(crate) fn into_record(self) -> Result<ActivityLogRecord, PersistenceError> {
        let event: ActivityEvent = ActivityEvent::from_parts(&self.event_type, &self.payload)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        Ok(ActivityLogRecord {
            activity_id: self.activity_id,
            entry: ActivityEntry {
                room_id: decode_room(&self.room_id)?,
                recorded_at: decode_timestamp(&self.recorded_at)?,
                service_date: decode_date(&self.service_date)?,
                location_id: self.location_id,
                event,
                actor: Actor::new(self.actor_id, self.actor_name),
                booking_ref: self.booking_ref,
            },
        })
    }
}
