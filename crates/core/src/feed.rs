// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The upstream feed contract.
//!
//! The property-management system is an external collaborator. This
//! module describes the records it returns and the calls this system
//! makes against it. Records are kept loose (`Option` everywhere,
//! identifiers as string or integer) and normalized by [`crate::ingest`].

use roomboard_domain::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;
use thiserror::Error;
use time::Date;
use tracing::debug;

/// Failures reported by a feed client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The upstream system could not be reached or answered with an error.
    #[error("feed unavailable: {0}")]
    Unavailable(String),
    /// The upstream system did not answer in time.
    #[error("feed request timed out after {seconds}s")]
    Timeout {
        /// The timeout that elapsed.
        seconds: u64,
    },
    /// The upstream answer could not be decoded.
    #[error("malformed feed response: {0}")]
    Malformed(String),
}

/// An upstream identifier, which may arrive as a string or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedId {
    /// A textual identifier.
    Text(String),
    /// A numeric identifier.
    Number(i64),
}

impl FeedId {
    /// Returns the canonical string form.
    #[must_use]
    pub fn to_id_string(&self) -> String {
        match self {
            Self::Text(text) => text.trim().to_string(),
            Self::Number(number) => number.to_string(),
        }
    }
}

impl From<&str> for FeedId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for FeedId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// A room as listed by the inventory feed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeedRoom {
    pub room_id: Option<FeedId>,
    pub display_name: Option<String>,
    pub status: Option<String>,
}

/// A stay as listed by the reservations feed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeedStay {
    pub booking_ref: Option<FeedId>,
    pub room_id: Option<FeedId>,
    pub arrival: Option<String>,
    pub departure: Option<String>,
    pub guest_name: Option<String>,
    pub adults: Option<u32>,
    pub children: Option<u32>,
    pub rate_name: Option<String>,
    pub room_type: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub custom_fields: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub bed_options: Vec<String>,
    pub status: Option<String>,
    pub locked: Option<bool>,
}

/// A task as listed by the task feed.
///
/// `period_to` is exclusive, as stored upstream.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeedTask {
    pub task_id: Option<FeedId>,
    pub room_id: Option<FeedId>,
    pub description: Option<String>,
    pub type_id: Option<FeedId>,
    pub when_date: Option<String>,
    pub period_from: Option<String>,
    pub period_to: Option<String>,
    pub occupancy_blocking: Option<bool>,
    pub completed_on: Option<String>,
}

/// The calls made against the upstream property-management system.
///
/// Implementations own their transport, including timeouts. A timed-out
/// call must come back as `FeedError::Timeout` rather than hang.
pub trait FeedClient: Send + Sync {
    /// Lists the room inventory.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed is unavailable.
    fn list_rooms(&self) -> Result<Vec<FeedRoom>, FeedError>;

    /// Lists stays overlapping `[window_start, window_end]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed is unavailable.
    fn list_stays(&self, window_start: Date, window_end: Date)
    -> Result<Vec<FeedStay>, FeedError>;

    /// Lists tasks overlapping `[window_start, window_end]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed is unavailable.
    fn list_tasks(&self, window_start: Date, window_end: Date)
    -> Result<Vec<FeedTask>, FeedError>;

    /// Marks an upstream task as done.
    ///
    /// Returns `Ok(false)` if the upstream system refused the update.
    ///
    /// # Errors
    ///
    /// Returns an error if the call failed or timed out.
    fn push_task_completion(
        &self,
        task_id: &str,
        completed_at: Timestamp,
    ) -> Result<bool, FeedError>;
}

/// Whether the stay's dates could touch the window. Unparseable records
/// are kept so that ingestion reports them.
fn stay_in_window(stay: &FeedStay, start: Date, end: Date) -> bool {
    let arrival: Option<Date> = stay
        .arrival
        .as_deref()
        .and_then(|d| roomboard_domain::parse_date(d).ok());
    let departure: Option<Date> = stay
        .departure
        .as_deref()
        .and_then(|d| roomboard_domain::parse_date(d).ok());
    match (arrival, departure) {
        (Some(arrival), Some(departure)) => arrival <= end && departure >= start,
        _ => true,
    }
}

fn task_in_window(task: &FeedTask, start: Date, end: Date) -> bool {
    let parse = |value: &Option<String>| -> Option<Date> {
        value
            .as_deref()
            .and_then(|d| roomboard_domain::parse_date(d).ok())
    };
    if let Some(when) = parse(&task.when_date) {
        return start <= when && when <= end;
    }
    match (parse(&task.period_from), parse(&task.period_to)) {
        (Some(from), Some(to)) => from <= end && to >= start,
        (Some(from), None) => start <= from && from <= end,
        _ => true,
    }
}

/// An in-memory feed snapshot.
///
/// Serves a fixed inventory, filtering stays and tasks to the requested
/// window the way the upstream system does. Pushed completions are
/// remembered so they can be inspected.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StaticFeed {
    #[serde(default)]
    pub rooms: Vec<FeedRoom>,
    #[serde(default)]
    pub stays: Vec<FeedStay>,
    #[serde(default)]
    pub tasks: Vec<FeedTask>,
    /// Result returned by `push_task_completion`.
    #[serde(default = "accept_pushes")]
    pub accept_pushes: bool,
    /// When set, every call fails as unavailable.
    #[serde(default)]
    pub offline: bool,
    #[serde(skip)]
    pushed: Mutex<Vec<(String, Timestamp)>>,
}

const fn accept_pushes() -> bool {
    true
}

impl StaticFeed {
    /// Creates a snapshot that accepts pushes.
    #[must_use]
    pub fn new(rooms: Vec<FeedRoom>, stays: Vec<FeedStay>, tasks: Vec<FeedTask>) -> Self {
        Self {
            rooms,
            stays,
            tasks,
            accept_pushes: true,
            offline: false,
            pushed: Mutex::new(Vec::new()),
        }
    }

    /// Parses a snapshot from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::Malformed` if the JSON does not match.
    pub fn from_json(json: &str) -> Result<Self, FeedError> {
        serde_json::from_str(json).map_err(|e| FeedError::Malformed(e.to_string()))
    }

    /// Returns the completions pushed so far.
    #[must_use]
    pub fn pushed(&self) -> Vec<(String, Timestamp)> {
        self.pushed
            .lock()
            .map(|pushed| pushed.clone())
            .unwrap_or_default()
    }

    fn ensure_online(&self) -> Result<(), FeedError> {
        if self.offline {
            return Err(FeedError::Unavailable(String::from(
                "static feed is offline",
            )));
        }
        Ok(())
    }
}

impl FeedClient for StaticFeed {
    fn list_rooms(&self) -> Result<Vec<FeedRoom>, FeedError> {
        self.ensure_online()?;
        Ok(self.rooms.clone())
    }

    fn list_stays(
        &self,
        window_start: Date,
        window_end: Date,
    ) -> Result<Vec<FeedStay>, FeedError> {
        self.ensure_online()?;
        Ok(self
            .stays
            .iter()
            .filter(|s| stay_in_window(s, window_start, window_end))
            .cloned()
            .collect())
    }

    fn list_tasks(
        &self,
        window_start: Date,
        window_end: Date,
    ) -> Result<Vec<FeedTask>, FeedError> {
        self.ensure_online()?;
        Ok(self
            .tasks
            .iter()
            .filter(|t| task_in_window(t, window_start, window_end))
            .cloned()
            .collect())
    }

    fn push_task_completion(
        &self,
        task_id: &str,
        completed_at: Timestamp,
    ) -> Result<bool, FeedError> {
        self.ensure_online()?;
        debug!(task_id, accepted = self.accept_pushes, "Static feed received completion");
        if self.accept_pushes {
            let mut pushed = self
                .pushed
                .lock()
                .map_err(|_| FeedError::Unavailable(String::from("push log poisoned")))?;
            pushed.push((task_id.to_string(), completed_at));
        }
        Ok(self.accept_pushes)
    }
}
