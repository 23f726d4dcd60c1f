// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar dates and ledger timestamps.
//!
//! Timestamps are stored as fixed-width UTC strings with microsecond
//! precision so that lexical order in the database equals chronological
//! order. Checkpoint comparisons in the sync channel rely on this.

use crate::error::DomainError;
use chrono::{Datelike, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Duration, Month, OffsetDateTime, UtcOffset};

const DATE_FORMAT: &[time::format_description::FormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

const STORAGE_FORMAT: &[time::format_description::FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"
);

/// Parses a `YYYY-MM-DD` date.
///
/// Longer inputs such as `2024-01-10T14:00:00Z` are accepted; only the
/// leading date portion is read.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the input is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    let trimmed: &str = value.trim();
    let date_part: &str = trimmed.get(..10).unwrap_or(trimmed);
    Date::parse(date_part, DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Adds a (possibly negative) number of days to a date.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` at the edge of the calendar.
pub fn shift_days(date: Date, days: i64) -> Result<Date, DomainError> {
    date.checked_add(Duration::days(days))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("shifting {date} by {days} day(s)"),
        })
}

/// Derives the local calendar date at `now` in the given IANA timezone.
///
/// # Errors
///
/// Returns an error if the timezone name is unknown.
pub fn service_date_in_zone(now: OffsetDateTime, timezone: &str) -> Result<Date, DomainError> {
    let tz: Tz = timezone
        .parse::<Tz>()
        .map_err(|_| DomainError::InvalidTimezone(timezone.to_string()))?;

    let local = tz
        .timestamp_opt(now.unix_timestamp(), now.nanosecond())
        .single()
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("converting {now} into {timezone}"),
        })?;

    let naive = local.date_naive();
    let month: Month = u8::try_from(naive.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("reading month of {naive}"),
        })?;
    let day: u8 = u8::try_from(naive.day()).map_err(|_| DomainError::DateArithmeticOverflow {
        operation: format!("reading day of {naive}"),
    })?;

    Date::from_calendar_date(naive.year(), month, day).map_err(|e| DomainError::DateParseError {
        date_string: naive.to_string(),
        error: e.to_string(),
    })
}

/// A UTC instant with microsecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    /// Returns the current instant, truncated to microseconds.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(OffsetDateTime::now_utc())
    }

    /// Wraps a datetime, normalizing to UTC and truncating to microseconds.
    #[must_use]
    pub fn from_datetime(value: OffsetDateTime) -> Self {
        let utc: OffsetDateTime = value.to_offset(UtcOffset::UTC);
        let micros: u32 = utc.nanosecond() / 1_000;
        Self(utc.replace_nanosecond(micros * 1_000).unwrap_or(utc))
    }

    /// Parses either the storage form or any RFC 3339 timestamp.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TimestampParseError` if neither form matches.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        if let Ok(primitive) = time::PrimitiveDateTime::parse(value, STORAGE_FORMAT) {
            return Ok(Self(primitive.assume_utc()));
        }
        OffsetDateTime::parse(value, &Rfc3339)
            .map(Self::from_datetime)
            .map_err(|e| DomainError::TimestampParseError {
                timestamp: value.to_string(),
                error: e.to_string(),
            })
    }

    /// Returns the fixed-width storage representation.
    #[must_use]
    pub fn to_storage_string(&self) -> String {
        self.0
            .format(STORAGE_FORMAT)
            .unwrap_or_else(|_| self.0.to_string())
    }

    /// Returns the wrapped datetime.
    #[must_use]
    pub const fn as_datetime(&self) -> OffsetDateTime {
        self.0
    }

    /// Returns the instant `days` days earlier.
    #[must_use]
    pub fn days_before(&self, days: i64) -> Self {
        Self(self.0.saturating_sub(Duration::days(days)))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_storage_string())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_storage_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
