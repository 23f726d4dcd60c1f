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
    clippy::all
)]

use roomboard_domain::{RoomId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;

#[cfg(test)]
mod tests;

/// Number of days activity log entries are kept before the sweep purges them.
pub const ACTIVITY_RETENTION_DAYS: i64 = 5;

/// Returns the instant before which activity entries are purged.
#[must_use]
pub fn retention_cutoff(now: Timestamp) -> Timestamp {
    now.days_before(ACTIVITY_RETENTION_DAYS)
}

/// Errors raised while building or decoding activity events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditError {
    /// A linen submission carried no items with a positive count.
    EmptyLinenSubmission,
    /// An item name in a linen submission was blank.
    BlankLinenItem,
    /// A stored event could not be decoded.
    InvalidPayload {
        /// The stored event type.
        event_type: String,
        /// The decoding error message.
        error: String,
    },
}

impl std::fmt::Display for AuditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLinenSubmission => {
                write!(f, "A linen submission must contain at least one item")
            }
            Self::BlankLinenItem => write!(f, "Linen item names cannot be blank"),
            Self::InvalidPayload { event_type, error } => {
                write!(f, "Invalid payload for event '{event_type}': {error}")
            }
        }
    }
}

impl std::error::Error for AuditError {}

/// The staff member an action is attributed to.
///
/// Authentication happens upstream of this system; the actor is whatever
/// identity the caller presents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The user identifier.
    pub id: String,
    /// The name shown to other staff.
    pub display_name: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The user identifier
    /// * `display_name` - The name shown to other staff
    #[must_use]
    pub const fn new(id: String, display_name: String) -> Self {
        Self { id, display_name }
    }
}

/// Something that happened in a room, as recorded in the activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", content = "payload", rename_all = "snake_case")]
pub enum ActivityEvent {
    /// Used linen was collected from the room.
    LinenSubmitted {
        /// Item counts keyed by item name.
        items: BTreeMap<String, u32>,
    },
    /// A housekeeping task was completed.
    TaskCompleted {
        /// The ledger row of the completion.
        completion_id: i64,
        /// The task description at completion time.
        description: String,
    },
}

impl ActivityEvent {
    /// Builds a linen submission, dropping items with a zero count.
    ///
    /// # Errors
    ///
    /// Returns an error if an item name is blank or nothing remains.
    pub fn linen(items: BTreeMap<String, u32>) -> Result<Self, AuditError> {
        let mut kept: BTreeMap<String, u32> = BTreeMap::new();
        for (name, count) in items {
            let name: String = name.trim().to_string();
            if name.is_empty() {
                return Err(AuditError::BlankLinenItem);
            }
            if count > 0 {
                *kept.entry(name).or_insert(0) += count;
            }
        }
        if kept.is_empty() {
            return Err(AuditError::EmptyLinenSubmission);
        }
        Ok(Self::LinenSubmitted { items: kept })
    }

    /// Returns the stored event type label.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::LinenSubmitted { .. } => "linen_submitted",
            Self::TaskCompleted { .. } => "task_completed",
        }
    }

    /// Splits the event into its stored type label and JSON payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized.
    pub fn to_parts(&self) -> Result<(String, String), AuditError> {
        let value: serde_json::Value =
            serde_json::to_value(self).map_err(|e| AuditError::InvalidPayload {
                event_type: self.event_type().to_string(),
                error: e.to_string(),
            })?;
        let payload: String = value
            .get("payload")
            .map_or_else(|| String::from("{}"), ToString::to_string);
        Ok((self.event_type().to_string(), payload))
    }

    /// Rebuilds an event from its stored type label and JSON payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the type is unknown or the payload is malformed.
    pub fn from_parts(event_type: &str, payload: &str) -> Result<Self, AuditError> {
        let invalid = |error: String| AuditError::InvalidPayload {
            event_type: event_type.to_string(),
            error,
        };
        let payload: serde_json::Value =
            serde_json::from_str(payload).map_err(|e| invalid(e.to_string()))?;
        let tagged: serde_json::Value = serde_json::json!({
            "event_type": event_type,
            "payload": payload,
        });
        serde_json::from_value(tagged).map_err(|e| invalid(e.to_string()))
    }
}

/// An immutable activity log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// The location the event happened at.
    pub location_id: String,
    /// The room the event concerns.
    pub room_id: RoomId,
    /// What happened.
    pub event: ActivityEvent,
    /// Who did it.
    pub actor: Actor,
    /// When it was recorded.
    pub recorded_at: Timestamp,
    /// The service date the event belongs to.
    pub service_date: Date,
    /// The booking in the room at the time, if any.
    pub booking_ref: Option<String>,
}

impl ActivityEntry {
    /// Creates a new `ActivityEntry` stamped with the current time.
    ///
    /// # Arguments
    ///
    /// * `location_id` - The location identifier
    /// * `room_id` - The room
    /// * `event` - What happened
    /// * `actor` - Who did it
    /// * `service_date` - The service date
    /// * `booking_ref` - The booking in the room, if any
    #[must_use]
    pub fn new(
        location_id: String,
        room_id: RoomId,
        event: ActivityEvent,
        actor: Actor,
        service_date: Date,
        booking_ref: Option<String>,
    ) -> Self {
        Self {
            location_id,
            room_id,
            event,
            actor,
            recorded_at: Timestamp::now(),
            service_date,
            booking_ref,
        }
    }

    /// Returns true if the entry is older than the retention window at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.recorded_at < retention_cutoff(now)
    }
}
