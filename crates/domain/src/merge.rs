// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room-day merging.
//!
//! Combines the room inventory, stays and tasks into one record per
//! visible room, covering the service date and the days either side of it.
//!
//! ## Invariants
//!
//! - Each day slot holds exactly one of a stay, a blocked marker, or nothing
//! - A stay fills a slot iff `arrival <= day < departure`
//! - Blocked markers only fill vacant slots
//! - Excluded rooms never produce a record, and their tasks are ignored

use crate::categories::CategoryLookup;
use crate::error::DomainError;
use crate::timestamp::shift_days;
use crate::types::{Room, RoomId, RoomTask, Stay, TaskDates};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use time::Date;
use tracing::debug;

/// The three consecutive dates around a service date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// The day before the service date.
    pub yesterday: Date,
    /// The service date.
    pub today: Date,
    /// The day after the service date.
    pub tomorrow: Date,
}

impl Window {
    /// Builds the window centred on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the window would leave the supported calendar.
    pub fn around(date: Date) -> Result<Self, DomainError> {
        Ok(Self {
            yesterday: shift_days(date, -1)?,
            today: date,
            tomorrow: shift_days(date, 1)?,
        })
    }

    /// Returns the window's days in order.
    #[must_use]
    pub const fn days(&self) -> [Date; 3] {
        [self.yesterday, self.today, self.tomorrow]
    }
}

/// What occupies a room on a single day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DaySlot {
    /// A stay occupies the room.
    Stay(Stay),
    /// A blocking task removes the room from availability.
    Blocked {
        /// The task responsible for the block.
        task_id: String,
    },
    /// Nothing occupies the room.
    #[default]
    Vacant,
}

impl DaySlot {
    /// Returns the stay in this slot, if any.
    #[must_use]
    pub const fn stay(&self) -> Option<&Stay> {
        match self {
            Self::Stay(stay) => Some(stay),
            Self::Blocked { .. } | Self::Vacant => None,
        }
    }

    /// Returns true if the slot is the blocked marker.
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }

    /// Returns true if the slot holds a stay or a blocked marker.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        !matches!(self, Self::Vacant)
    }
}

/// The merged day slots of one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDays {
    /// The room.
    pub room: Room,
    /// The slot for the day before the service date.
    pub yesterday: DaySlot,
    /// The slot for the service date.
    pub today: DaySlot,
    /// The slot for the day after the service date.
    pub tomorrow: DaySlot,
    /// The stay whose departure is the service date.
    ///
    /// It does not occupy today's slot; it is kept so the classifier can
    /// report the departure.
    pub departing: Option<Stay>,
    /// Whether the room is hidden whenever a specific filter is active.
    pub filter_excluded: bool,
}

impl RoomDays {
    fn vacant(room: Room, filter_excluded: bool) -> Self {
        Self {
            room,
            yesterday: DaySlot::Vacant,
            today: DaySlot::Vacant,
            tomorrow: DaySlot::Vacant,
            departing: None,
            filter_excluded,
        }
    }

    fn slot_mut(&mut self, index: usize) -> Option<&mut DaySlot> {
        match index {
            0 => Some(&mut self.yesterday),
            1 => Some(&mut self.today),
            2 => Some(&mut self.tomorrow),
            _ => None,
        }
    }
}

/// Expands a task's dates into the individual days it covers.
///
/// The upstream `to` bound of a period is exclusive, so the last covered
/// day is one before it. A period whose adjusted end precedes its start
/// covers only its start date.
///
/// # Errors
///
/// Returns an error if date arithmetic overflows.
pub fn task_days(dates: &TaskDates) -> Result<Vec<Date>, DomainError> {
    match *dates {
        TaskDates::Single { date } => Ok(vec![date]),
        TaskDates::Period { from, to_exclusive } => {
            let last: Date = shift_days(to_exclusive, -1)?;
            if last < from {
                return Ok(vec![from]);
            }
            let mut days: Vec<Date> = Vec::new();
            let mut day: Date = from;
            while day <= last {
                days.push(day);
                day = shift_days(day, 1)?;
            }
            Ok(days)
        }
    }
}

/// Returns true if the task covers `day`.
///
/// # Errors
///
/// Returns an error if date arithmetic overflows.
pub fn task_covers(dates: &TaskDates, day: Date) -> Result<bool, DomainError> {
    match *dates {
        TaskDates::Single { date } => Ok(date == day),
        TaskDates::Period { from, to_exclusive } => {
            let last: Date = shift_days(to_exclusive, -1)?.max(from);
            Ok(from <= day && day <= last)
        }
    }
}

/// Merges inventory, stays and tasks into per-room day slots.
///
/// # Arguments
///
/// * `rooms` - The room inventory, already enriched by the mapper
/// * `stays` - Stays covering (at least) the window
/// * `tasks` - Tasks covering (at least) the window
/// * `lookup` - The category lookups
/// * `filter_excluded` - Rooms hidden under specific filters
/// * `window` - The three-day window
///
/// # Returns
///
/// One `RoomDays` per non-excluded room, sorted by the configured order.
/// Unconfigured rooms sort last, by room number and then identifier.
///
/// # Errors
///
/// Returns an error only if date arithmetic overflows.
pub fn merge_room_days(
    rooms: &[Room],
    stays: &[Stay],
    tasks: &[RoomTask],
    lookup: &CategoryLookup,
    filter_excluded: &BTreeSet<RoomId>,
    window: &Window,
) -> Result<Vec<RoomDays>, DomainError> {
    let mut merged: Vec<RoomDays> = Vec::with_capacity(rooms.len());
    let mut index_by_room: HashMap<RoomId, usize> = HashMap::new();

    for room in rooms {
        if room.excluded || lookup.is_excluded(&room.id) {
            debug!(room_id = %room.id, "Room excluded from view");
            continue;
        }
        if index_by_room.contains_key(&room.id) {
            debug!(room_id = %room.id, "Duplicate room in inventory ignored");
            continue;
        }
        index_by_room.insert(room.id.clone(), merged.len());
        merged.push(RoomDays::vacant(
            room.clone(),
            filter_excluded.contains(&room.id),
        ));
    }

    let days: [Date; 3] = window.days();

    for stay in stays {
        let Some(&index) = index_by_room.get(&stay.room_id) else {
            continue;
        };
        let Some(record) = merged.get_mut(index) else {
            continue;
        };

        if stay.departure == window.today && record.departing.is_none() {
            record.departing = Some(stay.clone());
        }

        for (slot_index, day) in days.iter().enumerate() {
            if !stay.occupies(*day) {
                continue;
            }
            if let Some(slot) = record.slot_mut(slot_index) {
                if slot.stay().is_some() {
                    debug!(
                        room_id = %stay.room_id,
                        booking_ref = %stay.booking_ref,
                        day = %day,
                        "Overlapping stay ignored for day"
                    );
                    continue;
                }
                *slot = DaySlot::Stay(stay.clone());
            }
        }
    }

    for task in tasks.iter().filter(|t| t.occupancy_blocking) {
        let Some(&index) = index_by_room.get(&task.room_id) else {
            continue;
        };
        let Some(record) = merged.get_mut(index) else {
            continue;
        };

        for blocked_day in task_days(&task.dates)? {
            let Some(slot_index) = days.iter().position(|d| *d == blocked_day) else {
                continue;
            };
            if let Some(slot) = record.slot_mut(slot_index)
                && matches!(slot, DaySlot::Vacant)
            {
                *slot = DaySlot::Blocked {
                    task_id: task.id.clone(),
                };
            }
        }
    }

    merged.sort_by(|a, b| {
        a.room
            .sort_key
            .cmp(&b.room.sort_key)
            .then_with(|| a.room.number.cmp(&b.room.number))
            .then_with(|| a.room.id.cmp(&b.room.id))
    });

    Ok(merged)
}
