// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Normalization of feed records into domain values.
//!
//! A record that cannot be normalized is skipped and logged; the rest of
//! the batch is still used.

use crate::feed::{FeedId, FeedRoom, FeedStay, FeedTask};
use roomboard_domain::{
    CategoryLookup, DomainError, GuestDetails, Room, RoomId, RoomTask, Stay, TaskDates,
    parse_date, shift_days,
};
use std::collections::BTreeMap;
use time::Date;
use tracing::warn;

/// Why a feed record was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedRecord {
    /// A required field was absent or blank.
    MissingField(&'static str),
    /// A field held an invalid value.
    Invalid(DomainError),
}

impl std::fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing field '{field}'"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl From<DomainError> for MalformedRecord {
    fn from(err: DomainError) -> Self {
        Self::Invalid(err)
    }
}

fn required_id(value: Option<&FeedId>, field: &'static str) -> Result<String, MalformedRecord> {
    value
        .map(FeedId::to_id_string)
        .filter(|id| !id.is_empty())
        .ok_or(MalformedRecord::MissingField(field))
}

fn required_room_id(value: Option<&FeedId>) -> Result<RoomId, MalformedRecord> {
    let raw: String = required_id(value, "room_id")?;
    Ok(RoomId::new(&raw)?)
}

fn required_date(value: Option<&str>, field: &'static str) -> Result<Date, MalformedRecord> {
    let raw: &str = value
        .filter(|v| !v.trim().is_empty())
        .ok_or(MalformedRecord::MissingField(field))?;
    Ok(parse_date(raw)?)
}

fn optional_date(value: Option<&str>) -> Result<Option<Date>, MalformedRecord> {
    match value.map(str::trim) {
        Some(raw) if !raw.is_empty() => Ok(Some(parse_date(raw)?)),
        _ => Ok(None),
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Normalizes one inventory record, enriching it from the category lookups.
///
/// The display number falls back to the identifier.
///
/// # Errors
///
/// Returns an error if the record has no usable room identifier.
pub fn normalize_room(record: &FeedRoom, lookup: &CategoryLookup) -> Result<Room, MalformedRecord> {
    let id: RoomId = required_room_id(record.room_id.as_ref())?;
    let number: String =
        non_blank(record.display_name.as_ref()).unwrap_or_else(|| id.as_str().to_string());
    Ok(Room {
        category: lookup.category_of(&id).cloned(),
        sort_key: lookup.sort_key(&id),
        excluded: lookup.is_excluded(&id),
        status: non_blank(record.status.as_ref()).unwrap_or_default(),
        number,
        id,
    })
}

/// Normalizes one stay record.
///
/// # Errors
///
/// Returns an error if identifiers or dates are missing or invalid.
pub fn normalize_stay(record: &FeedStay) -> Result<Stay, MalformedRecord> {
    let custom_fields: BTreeMap<String, String> = record
        .custom_fields
        .iter()
        .filter_map(|(key, value)| {
            let text: String = match value {
                serde_json::Value::Null => return None,
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((key.clone(), text))
        })
        .collect();

    let stay: Stay = Stay {
        booking_ref: required_id(record.booking_ref.as_ref(), "booking_ref")?,
        room_id: required_room_id(record.room_id.as_ref())?,
        arrival: required_date(record.arrival.as_deref(), "arrival")?,
        departure: required_date(record.departure.as_deref(), "departure")?,
        guest: GuestDetails {
            name: non_blank(record.guest_name.as_ref()),
            adults: record.adults.unwrap_or(0),
            children: record.children.unwrap_or(0),
        },
        rate_name: non_blank(record.rate_name.as_ref()),
        room_type: non_blank(record.room_type.as_ref()),
        notes: non_blank(record.notes.as_ref()),
        custom_fields,
        bed_options: record
            .bed_options
            .iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect(),
        status: non_blank(record.status.as_ref()),
        locked: record.locked.unwrap_or(false),
    };
    stay.validate()?;
    Ok(stay)
}

/// Normalizes one task record.
///
/// A task needs either `when_date` or `period_from`. A period without an
/// end covers its start date only.
///
/// # Errors
///
/// Returns an error if identifiers or dates are missing or invalid.
pub fn normalize_task(record: &FeedTask) -> Result<RoomTask, MalformedRecord> {
    let id: String = required_id(record.task_id.as_ref(), "task_id")?;
    let room_id: RoomId = required_room_id(record.room_id.as_ref())?;

    let dates: TaskDates = if let Some(date) = optional_date(record.when_date.as_deref())? {
        TaskDates::Single { date }
    } else if let Some(from) = optional_date(record.period_from.as_deref())? {
        let to_exclusive: Date = match optional_date(record.period_to.as_deref())? {
            Some(to) => to,
            None => shift_days(from, 1)?,
        };
        TaskDates::Period { from, to_exclusive }
    } else {
        return Err(DomainError::MissingBlockingDates { task_id: id }.into());
    };

    Ok(RoomTask {
        id,
        room_id,
        description: non_blank(record.description.as_ref()).unwrap_or_default(),
        type_id: record
            .type_id
            .as_ref()
            .map(FeedId::to_id_string)
            .filter(|t| !t.is_empty()),
        dates,
        occupancy_blocking: record.occupancy_blocking.unwrap_or(false),
        completed_on: optional_date(record.completed_on.as_deref())?,
    })
}

/// Normalizes the inventory, skipping malformed records.
#[must_use]
pub fn ingest_rooms(records: &[FeedRoom], lookup: &CategoryLookup) -> Vec<Room> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match normalize_room(record, lookup) {
            Ok(room) => Some(room),
            Err(reason) => {
                warn!(index, %reason, "Skipping malformed room record");
                None
            }
        })
        .collect()
}

/// Normalizes stays, skipping malformed records.
#[must_use]
pub fn ingest_stays(records: &[FeedStay]) -> Vec<Stay> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match normalize_stay(record) {
            Ok(stay) => Some(stay),
            Err(reason) => {
                warn!(index, %reason, "Skipping malformed stay record");
                None
            }
        })
        .collect()
}

/// Normalizes tasks, skipping malformed records.
#[must_use]
pub fn ingest_tasks(records: &[FeedTask]) -> Vec<RoomTask> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match normalize_task(record) {
            Ok(task) => Some(task),
            Err(reason) => {
                warn!(index, %reason, "Skipping malformed task record");
                None
            }
        })
        .collect()
}
