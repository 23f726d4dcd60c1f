// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use roomboard::{CoreError, FeedError};
use roomboard_audit::AuditError;
use roomboard_domain::{DomainError, Timestamp};
use roomboard_persistence::{CompletionError, PersistenceError};

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The task was already completed for this room and service date.
    AlreadyCompleted {
        /// The existing completion.
        completion_id: i64,
        /// Display name of whoever completed it.
        completed_by: String,
        /// When it was completed.
        completed_at: Timestamp,
    },
    /// The upstream system did not accept a completion.
    RemoteSyncFailed {
        /// A human-readable description of the failure.
        message: String,
    },
    /// The upstream feed could not be read.
    FeedUnavailable {
        /// A human-readable description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::AlreadyCompleted {
                completed_by,
                completed_at,
                ..
            } => {
                write!(f, "Already completed by {completed_by} at {completed_at}")
            }
            Self::RemoteSyncFailed { message } | Self::FeedUnavailable { message } => {
                write!(f, "{message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidRoomId(msg) => ApiError::InvalidInput {
            field: String::from("room_id"),
            message: msg,
        },
        DomainError::MissingTaskKey => ApiError::InvalidInput {
            field: String::from("description"),
            message: String::from("A task needs a task type or a description"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::TimestampParseError { timestamp, error } => ApiError::InvalidInput {
            field: String::from("checkpoint"),
            message: format!("Failed to parse timestamp '{timestamp}': {error}"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
        DomainError::InvalidTimezone(timezone) => ApiError::Internal {
            message: format!("Location is configured with unknown timezone '{timezone}'"),
        },
        err @ (DomainError::InvalidStayDates { .. } | DomainError::MissingBlockingDates { .. }) => {
            ApiError::Internal {
                message: err.to_string(),
            }
        }
    }
}

/// Translates a feed error raised while reading the inventory.
///
/// An unreachable feed means there is nothing to show for the date.
#[must_use]
pub fn translate_feed_error(err: &FeedError) -> ApiError {
    ApiError::FeedUnavailable {
        message: format!("No rooms for this date: {err}"),
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Feed(feed_err) => translate_feed_error(&feed_err),
        CoreError::RoomNotFound { room_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Room"),
            message: format!("Room '{room_id}' is not in the inventory"),
        },
        CoreError::InvalidRequest(msg) => ApiError::InvalidInput {
            field: String::from("request"),
            message: msg,
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: &PersistenceError) -> ApiError {
    ApiError::Internal {
        message: format!("Ledger error: {err}"),
    }
}

/// Translates a failed completion into an API error.
#[must_use]
pub fn translate_completion_error(err: CompletionError) -> ApiError {
    match err {
        CompletionError::AlreadyCompleted {
            completion_id,
            completed_by,
            completed_at,
        } => ApiError::AlreadyCompleted {
            completion_id,
            completed_by,
            completed_at,
        },
        CompletionError::RemoteSyncFailed { reason } => ApiError::RemoteSyncFailed {
            message: format!(
                "Failed to update external system; the task was NOT recorded ({reason})"
            ),
        },
        CompletionError::Persistence(err) => translate_persistence_error(&err),
    }
}

/// Translates an activity log error into an API error.
#[must_use]
pub fn translate_audit_error(err: AuditError) -> ApiError {
    match err {
        AuditError::EmptyLinenSubmission | AuditError::BlankLinenItem => ApiError::InvalidInput {
            field: String::from("items"),
            message: err.to_string(),
        },
        AuditError::InvalidPayload { .. } => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
