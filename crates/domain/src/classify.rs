// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking-lifecycle classification of merged room days.
//!
//! Every field produced here is a pure function of a room's day slots and
//! its departing stay. Nothing is looked up again.

use crate::merge::{DaySlot, RoomDays};
use crate::types::Stay;
use serde::{Deserialize, Serialize};
use time::Date;

/// Status label of a blocked day.
pub const BLOCKED_STATUS: &str = "blocked";

/// Status of a stay with no explicit status that is locked.
pub const CONFIRMED_STATUS: &str = "confirmed";

/// Status of a stay with no explicit status that is not locked.
pub const UNCONFIRMED_STATUS: &str = "unconfirmed";

/// Normalized statuses meaning the guest is physically in the room.
pub const IN_HOUSE_STATUSES: [&str; 3] = ["arrived", "checked_in", "in_house"];

/// Derived labels for one room on the service date.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Classification {
    /// A stay arrives on the service date.
    pub is_arriving: bool,
    /// A stay departs on the service date.
    pub is_departing: bool,
    /// A stay continues through the service date.
    pub is_stopover: bool,
    /// Today's stay asks for a twin or sofa-bed setup.
    pub has_twin: bool,
    /// Normalized booking status for the service date.
    pub booking_status: String,
    /// The day before is occupied or blocked.
    pub spans_previous: bool,
    /// The day after is occupied or blocked.
    pub spans_next: bool,
    /// Status label of the day before.
    pub previous_status: String,
    /// Status label of the day after.
    pub next_status: String,
}

/// Returns the normalized lowercase status of a stay.
///
/// The explicit status wins; otherwise a locked stay is confirmed and an
/// unlocked one unconfirmed.
#[must_use]
pub fn stay_status(stay: &Stay) -> String {
    match stay.status.as_deref().map(str::trim) {
        Some(status) if !status.is_empty() => status.to_lowercase().replace([' ', '-'], "_"),
        _ if stay.locked => String::from(CONFIRMED_STATUS),
        _ => String::from(UNCONFIRMED_STATUS),
    }
}

/// Returns the status label of a day slot.
#[must_use]
pub fn slot_status(slot: &DaySlot) -> String {
    match slot {
        DaySlot::Stay(stay) => stay_status(stay),
        DaySlot::Blocked { .. } => String::from(BLOCKED_STATUS),
        DaySlot::Vacant => String::new(),
    }
}

/// Returns true if a normalized status means the guest is in the room.
#[must_use]
pub fn is_in_house(status: &str) -> bool {
    IN_HOUSE_STATUSES.contains(&status)
}

/// Returns true if a stay's fields mention any of the keywords.
///
/// Custom field values, notes and the bed options list are searched with a
/// case-insensitive substring match.
#[must_use]
pub fn detect_twin(stay: &Stay, keywords: &[String]) -> bool {
    let needles: Vec<String> = keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    if needles.is_empty() {
        return false;
    }

    let mentions = |text: &str| -> bool {
        let haystack: String = text.to_lowercase();
        needles.iter().any(|needle| haystack.contains(needle.as_str()))
    };

    stay.custom_fields.values().any(|v| mentions(v))
        || stay.notes.as_deref().is_some_and(mentions)
        || stay.bed_options.iter().any(|option| mentions(option))
}

/// Classifies a room's merged day slots for the service date.
#[must_use]
pub fn classify(days: &RoomDays, date: Date, twin_keywords: &[String]) -> Classification {
    let today_stay: Option<&Stay> = days.today.stay();

    let is_arriving: bool = today_stay.is_some_and(|stay| stay.arrival == date);
    let is_departing: bool = days
        .departing
        .as_ref()
        .is_some_and(|stay| stay.departure == date);
    let is_stopover: bool = today_stay.is_some() && !is_arriving && !is_departing;

    let booking_status: String = match (&days.today, &days.departing) {
        (DaySlot::Vacant, Some(departing)) => stay_status(departing),
        (slot, _) => slot_status(slot),
    };

    let has_twin: bool = today_stay.is_some_and(|stay| detect_twin(stay, twin_keywords));

    Classification {
        is_arriving,
        is_departing,
        is_stopover,
        has_twin,
        booking_status,
        spans_previous: days.yesterday.is_occupied(),
        spans_next: days.tomorrow.is_occupied(),
        previous_status: slot_status(&days.yesterday),
        next_status: slot_status(&days.tomorrow),
    }
}

/// A merged and classified room, the unit of the room-day view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDayRecord {
    /// The merged day slots.
    #[serde(flatten)]
    pub days: RoomDays,
    /// The derived labels.
    #[serde(flatten)]
    pub classification: Classification,
}

impl RoomDayRecord {
    /// Classifies merged days into a record.
    #[must_use]
    pub fn from_days(days: RoomDays, date: Date, twin_keywords: &[String]) -> Self {
        let classification: Classification = classify(&days, date, twin_keywords);
        Self {
            days,
            classification,
        }
    }

    /// Returns the departing stay's status, if a stay departs today.
    #[must_use]
    pub fn departing_status(&self) -> Option<String> {
        self.days.departing.as_ref().map(stay_status)
    }

    /// Returns true if today's slot holds a stay.
    #[must_use]
    pub const fn has_booking_today(&self) -> bool {
        self.days.today.stay().is_some()
    }
}
