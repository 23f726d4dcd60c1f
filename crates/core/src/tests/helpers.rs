// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{FeedId, FeedRoom, FeedStay, FeedTask, StaticFeed};
use roomboard_audit::Actor;
use roomboard_domain::{CategoryConfig, CategoryRoomConfig, LocationSettings, parse_date};
use time::Date;

pub fn date(value: &str) -> Date {
    parse_date(value).unwrap()
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("u-17"), String::from("Maria"))
}

pub fn feed_room(id: i64) -> FeedRoom {
    FeedRoom {
        room_id: Some(FeedId::Number(id)),
        display_name: Some(format!("Room {id}")),
        status: Some(String::from("dirty")),
    }
}

pub fn feed_stay(booking: &str, room: i64, arrival: &str, departure: &str) -> FeedStay {
    FeedStay {
        booking_ref: Some(FeedId::from(booking)),
        room_id: Some(FeedId::Number(room)),
        arrival: Some(arrival.to_string()),
        departure: Some(departure.to_string()),
        guest_name: Some(String::from("Test Guest")),
        adults: Some(2),
        ..FeedStay::default()
    }
}

pub fn feed_task(id: &str, room: i64, description: &str, when: &str) -> FeedTask {
    FeedTask {
        task_id: Some(FeedId::from(id)),
        room_id: Some(FeedId::Number(room)),
        description: Some(description.to_string()),
        when_date: Some(when.to_string()),
        ..FeedTask::default()
    }
}

/// Two floors of rooms 10-15 plus an excluded staff room.
pub fn create_test_settings() -> LocationSettings {
    let room = |id: &str, excluded: bool| CategoryRoomConfig {
        room_id: id.to_string(),
        excluded,
    };
    let mut settings: LocationSettings = LocationSettings::new("harbour", "Harbour Hotel");
    settings.categories = vec![
        CategoryConfig {
            id: String::from("ground"),
            name: String::from("Ground floor"),
            excluded: false,
            rooms: vec![room("12", false), room("10", false), room("11", false)],
        },
        CategoryConfig {
            id: String::from("first"),
            name: String::from("First floor"),
            excluded: false,
            rooms: vec![room("13", false), room("14", false), room("99", true)],
        },
    ];
    settings
}

/// The January week used across the view tests.
pub fn create_test_feed() -> StaticFeed {
    let mut blocking: FeedTask = feed_task("T-14", 14, "Out of order: carpet", "");
    blocking.when_date = None;
    blocking.period_from = Some(String::from("2024-01-10"));
    blocking.period_to = Some(String::from("2024-01-12"));
    blocking.occupancy_blocking = Some(true);

    StaticFeed::new(
        vec![
            feed_room(10),
            feed_room(11),
            feed_room(12),
            feed_room(13),
            feed_room(14),
            feed_room(15),
            feed_room(99),
        ],
        vec![
            feed_stay("B-12", 12, "2024-01-10", "2024-01-13"),
            feed_stay("B-10", 10, "2024-01-11", "2024-01-14"),
            feed_stay("B-11", 11, "2024-01-08", "2024-01-11"),
            feed_stay("B-far", 13, "2024-02-01", "2024-02-03"),
        ],
        vec![
            blocking,
            feed_task("T-12a", 12, "Change Linen", "2024-01-11"),
            feed_task("T-12b", 12, "Restock minibar", "2024-01-11"),
        ],
    )
}
