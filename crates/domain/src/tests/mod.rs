// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod categories;
mod filter;

use std::collections::{BTreeMap, BTreeSet};
use time::Date;

use crate::{
    CategoryLookup, GuestDetails, Room, RoomDayRecord, RoomDays, RoomId, SortKey, Stay,
    Window, merge_room_days,
};

pub fn date(value: &str) -> Date {
    crate::parse_date(value).unwrap()
}

pub fn room_id(value: &str) -> RoomId {
    RoomId::new(value).unwrap()
}

pub fn create_test_room(id: &str) -> Room {
    Room {
        id: room_id(id),
        number: id.to_string(),
        category: None,
        sort_key: SortKey::UNCONFIGURED,
        status: String::from("dirty"),
        excluded: false,
    }
}

pub fn create_test_stay(booking_ref: &str, room: &str, arrival: &str, departure: &str) -> Stay {
    Stay {
        booking_ref: booking_ref.to_string(),
        room_id: room_id(room),
        arrival: date(arrival),
        departure: date(departure),
        guest: GuestDetails {
            name: Some(String::from("Test Guest")),
            adults: 2,
            children: 0,
        },
        rate_name: None,
        room_type: None,
        notes: None,
        custom_fields: BTreeMap::new(),
        bed_options: Vec::new(),
        status: None,
        locked: false,
    }
}

pub fn default_keywords() -> Vec<String> {
    crate::DEFAULT_TWIN_KEYWORDS
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Merges a single room with the given stays and classifies it for `on`.
pub fn classify_single(room: &str, stays: &[Stay], on: &str) -> RoomDayRecord {
    let window: Window = Window::around(date(on)).unwrap();
    let merged: Vec<RoomDays> = merge_room_days(
        &[create_test_room(room)],
        stays,
        &[],
        &CategoryLookup::default(),
        &BTreeSet::new(),
        &window,
    )
    .unwrap();
    let days: RoomDays = merged.into_iter().next().unwrap();
    RoomDayRecord::from_days(days, date(on), &default_keywords())
}
