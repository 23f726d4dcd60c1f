// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while building or validating domain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A room identifier is empty.
    InvalidRoomId(String),
    /// A stay's departure does not come after its arrival.
    InvalidStayDates {
        /// The booking reference of the offending stay.
        booking_ref: String,
        /// The arrival date.
        arrival: time::Date,
        /// The departure date.
        departure: time::Date,
    },
    /// A blocking task carries neither a single date nor a range start.
    MissingBlockingDates {
        /// The task identifier.
        task_id: String,
    },
    /// Date arithmetic overflowed the supported calendar range.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Failed to parse a date from its string form.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to parse a timestamp from its string form.
    TimestampParseError {
        /// The invalid timestamp string.
        timestamp: String,
        /// The parsing error message.
        error: String,
    },
    /// The configured timezone is not a known IANA zone.
    InvalidTimezone(String),
    /// A task completion is missing both a task type and a description.
    MissingTaskKey,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRoomId(msg) => write!(f, "Invalid room id: {msg}"),
            Self::InvalidStayDates {
                booking_ref,
                arrival,
                departure,
            } => {
                write!(
                    f,
                    "Stay '{booking_ref}' departs on {departure}, which is not after its arrival on {arrival}"
                )
            }
            Self::MissingBlockingDates { task_id } => {
                write!(f, "Blocking task '{task_id}' has no dates")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::TimestampParseError { timestamp, error } => {
                write!(f, "Failed to parse timestamp '{timestamp}': {error}")
            }
            Self::InvalidTimezone(tz) => write!(f, "Unknown timezone '{tz}'"),
            Self::MissingTaskKey => {
                write!(f, "A task needs a task type or a description")
            }
        }
    }
}

impl std::error::Error for DomainError {}
