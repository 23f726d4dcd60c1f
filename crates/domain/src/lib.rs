// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod categories;
mod classify;
mod error;
mod filter;
mod merge;
mod settings;
mod timestamp;
mod types;

#[cfg(test)]
mod tests;

pub use categories::{CategoryConfig, CategoryLookup, CategoryRoomConfig, map_categories};
pub use classify::{
    BLOCKED_STATUS, CONFIRMED_STATUS, Classification, IN_HOUSE_STATUSES, RoomDayRecord,
    UNCONFIRMED_STATUS, classify, detect_twin, is_in_house, slot_status, stay_status,
};
pub use error::DomainError;
pub use filter::{FilterCategory, FilterCounts, FilterMode, FilterState, is_occupied};
pub use merge::{DaySlot, RoomDays, Window, merge_room_days, task_covers, task_days};
pub use settings::{DEFAULT_TWIN_KEYWORDS, LocationSettings};
pub use timestamp::{Timestamp, format_date, parse_date, service_date_in_zone, shift_days};
pub use types::{
    CategoryMeta, GuestDetails, Room, RoomId, RoomTask, SortKey, Stay, TaskDates,
};
