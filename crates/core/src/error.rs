// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::feed::FeedError;
use roomboard_domain::DomainError;

/// Errors that can occur while assembling views or validating requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The upstream feed could not serve the request.
    Feed(FeedError),
    /// The requested room is not part of the visible inventory.
    RoomNotFound {
        /// The room identifier that was requested.
        room_id: String,
    },
    /// A request field failed validation.
    InvalidRequest(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Feed(err) => write!(f, "Feed error: {err}"),
            Self::RoomNotFound { room_id } => write!(f, "Room '{room_id}' not found"),
            Self::InvalidRequest(msg) => write!(f, "Invalid request: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<FeedError> for CoreError {
    fn from(err: FeedError) -> Self {
        Self::Feed(err)
    }
}
