// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;

/// Canonical room identifier.
///
/// Upstream systems identify rooms with either strings or integers; both
/// are normalized to this string form when records are ingested so that
/// every lookup uses a single key type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Creates a room identifier, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRoomId` if the identifier is empty.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidRoomId(String::from(
                "Room id cannot be empty",
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position of a room in the configured display order.
///
/// Ordering is lexicographic on `(category_order, room_order)`, which is
/// the source position of the category and of the room within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SortKey {
    /// Index of the category in the configuration.
    pub category_order: u32,
    /// Index of the room within its category.
    pub room_order: u32,
}

impl SortKey {
    /// Order key for rooms absent from the category configuration.
    ///
    /// It is larger than any key the mapper can assign, so such rooms
    /// sort after every configured room.
    pub const UNCONFIGURED: Self = Self {
        category_order: u32::MAX,
        room_order: u32::MAX,
    };

    /// Creates a sort key.
    #[must_use]
    pub const fn new(category_order: u32, room_order: u32) -> Self {
        Self {
            category_order,
            room_order,
        }
    }
}

/// The category a room is displayed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMeta {
    /// The configured category identifier.
    pub id: String,
    /// The display name of the category.
    pub name: String,
}

/// A room from the inventory feed, enriched with configuration data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// The canonical identifier.
    pub id: RoomId,
    /// The displayed room number. Falls back to the identifier.
    pub number: String,
    /// The configured category, if any.
    pub category: Option<CategoryMeta>,
    /// The display order key.
    pub sort_key: SortKey,
    /// The operational status label reported by the feed (e.g. "dirty").
    pub status: String,
    /// Whether the room is excluded from the housekeeping view.
    pub excluded: bool,
}

/// Guest-facing fields of a stay.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GuestDetails {
    /// Display name of the lead guest.
    pub name: Option<String>,
    /// Number of adults.
    pub adults: u32,
    /// Number of children.
    pub children: u32,
}

impl GuestDetails {
    /// Returns the total occupancy of the stay.
    #[must_use]
    pub const fn occupancy(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }
}

/// A guest's booked occupancy of a room.
///
/// The stay occupies every day in the half-open interval
/// `[arrival, departure)`. The departure day itself is not occupied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stay {
    /// The booking reference.
    pub booking_ref: String,
    /// The room this stay is assigned to.
    pub room_id: RoomId,
    /// The arrival date.
    pub arrival: Date,
    /// The departure date.
    pub departure: Date,
    /// Guest display fields.
    pub guest: GuestDetails,
    /// The rate plan name.
    pub rate_name: Option<String>,
    /// The booked room type.
    pub room_type: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Custom field values keyed by field name.
    pub custom_fields: BTreeMap<String, String>,
    /// Bed configuration and extras requested for the stay.
    pub bed_options: Vec<String>,
    /// The explicit booking status from the feed, if any.
    pub status: Option<String>,
    /// Whether the booking is locked (treated as confirmed).
    pub locked: bool,
}

impl Stay {
    /// Validates the stay's date range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStayDates` if departure is not after arrival.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.departure <= self.arrival {
            return Err(DomainError::InvalidStayDates {
                booking_ref: self.booking_ref.clone(),
                arrival: self.arrival,
                departure: self.departure,
            });
        }
        Ok(())
    }

    /// Returns true if the stay occupies the room on `day`.
    #[must_use]
    pub fn occupies(&self, day: Date) -> bool {
        self.arrival <= day && day < self.departure
    }
}

/// Dates a task applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskDates {
    /// A single explicit date.
    Single {
        /// The task date.
        date: Date,
    },
    /// A range whose `to` bound is exclusive, as stored upstream.
    Period {
        /// First covered date.
        from: Date,
        /// Day after the last covered date.
        to_exclusive: Date,
    },
}

/// An operational task from the task feed.
///
/// Tasks flagged `occupancy_blocking` remove the room from availability
/// on their dates; the rest are informational housekeeping work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTask {
    /// The upstream task identifier.
    pub id: String,
    /// The room this task applies to.
    pub room_id: RoomId,
    /// Free-text description shown to staff.
    pub description: String,
    /// The upstream task-type identifier.
    pub type_id: Option<String>,
    /// The dates covered by the task.
    pub dates: TaskDates,
    /// Whether the task takes the room out of availability.
    pub occupancy_blocking: bool,
    /// The date the upstream system recorded the task as done.
    pub completed_on: Option<Date>,
}
