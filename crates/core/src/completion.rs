// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use roomboard_audit::Actor;
use roomboard_domain::{DomainError, RoomId, Timestamp};
use serde::{Deserialize, Serialize};
use time::Date;

/// Stages of a task completion.
///
/// `Start → UniquenessCheck → Persist → RemoteSync → Commit`, with
/// `RemoteSync` skipped for tasks that are not pushed upstream. `Abort`
/// is reachable from every non-terminal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStage {
    Start,
    UniquenessCheck,
    Persist,
    RemoteSync,
    Commit,
    Abort,
}

impl CompletionStage {
    /// Returns the stage that follows a successful step.
    ///
    /// Terminal stages have no successor.
    #[must_use]
    pub const fn next(self, remote_sync: bool) -> Option<Self> {
        match self {
            Self::Start => Some(Self::UniquenessCheck),
            Self::UniquenessCheck => Some(Self::Persist),
            Self::Persist if remote_sync => Some(Self::RemoteSync),
            Self::Persist | Self::RemoteSync => Some(Self::Commit),
            Self::Commit | Self::Abort => None,
        }
    }

    /// Returns true for `Commit` and `Abort`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Commit | Self::Abort)
    }

    /// Returns the label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::UniquenessCheck => "uniqueness_check",
            Self::Persist => "persist",
            Self::RemoteSync => "remote_sync",
            Self::Commit => "commit",
            Self::Abort => "abort",
        }
    }
}

impl std::fmt::Display for CompletionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives the idempotency key of a task.
///
/// The task type identifies the task when present. Otherwise the
/// description is used, lowercased with whitespace collapsed, so that
/// cosmetic differences do not produce a second completion.
///
/// # Errors
///
/// Returns `DomainError::MissingTaskKey` if both are blank.
pub fn task_key(task_type: Option<&str>, description: &str) -> Result<String, DomainError> {
    if let Some(task_type) = task_type.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(format!("type:{task_type}"));
    }
    let normalized: String = description
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase();
    if normalized.is_empty() {
        return Err(DomainError::MissingTaskKey);
    }
    Ok(format!("desc:{normalized}"))
}

/// A request to complete a task, as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub location_id: String,
    pub room_id: String,
    /// The upstream task identifier. Absent for locally defined tasks.
    pub task_id: Option<String>,
    pub task_type: Option<String>,
    pub description: String,
    pub booking_ref: Option<String>,
    pub service_date: Date,
    pub actor: Actor,
}

impl CompletionRequest {
    /// Validates the request into a ledger-ready completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the room, actor or task key is missing.
    pub fn validate(self) -> Result<NewTaskCompletion, CoreError> {
        let room_id: RoomId = RoomId::new(&self.room_id)?;
        if self.actor.id.trim().is_empty() {
            return Err(CoreError::InvalidRequest(String::from(
                "Completing user cannot be empty",
            )));
        }
        let key: String = task_key(self.task_type.as_deref(), &self.description)?;
        let trimmed = |value: Option<String>| -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(NewTaskCompletion {
            location_id: self.location_id.trim().to_string(),
            room_id,
            task_id: trimmed(self.task_id),
            task_type: trimmed(self.task_type),
            task_key: key,
            description: self.description.trim().to_string(),
            booking_ref: trimmed(self.booking_ref),
            service_date: self.service_date,
            completed_by: self.actor,
        })
    }
}

/// A validated completion, ready to be written to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTaskCompletion {
    pub location_id: String,
    pub room_id: RoomId,
    pub task_id: Option<String>,
    pub task_type: Option<String>,
    pub task_key: String,
    pub description: String,
    pub booking_ref: Option<String>,
    pub service_date: Date,
    pub completed_by: Actor,
}

impl NewTaskCompletion {
    /// Returns the upstream task to push to, if the completion must be
    /// propagated.
    #[must_use]
    pub fn remote_task_id(&self, push_upstream: bool) -> Option<&str> {
        if push_upstream {
            self.task_id.as_deref()
        } else {
            None
        }
    }
}

/// A recorded completion as shown to staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSummary {
    pub completion_id: i64,
    pub room_id: RoomId,
    pub task_key: String,
    pub task_id: Option<String>,
    pub description: String,
    pub completed_by: Actor,
    pub completed_at: Timestamp,
}
