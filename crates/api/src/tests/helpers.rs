// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use roomboard::{FeedClient, StaticFeed};
use roomboard_domain::parse_date;
use roomboard_persistence::Persistence;
use std::sync::Arc;
use time::Date;

use crate::{CompleteTaskRequest, Housekeeping, SettingsRegistry};

pub const SETTINGS_JSON: &str = r#"{
    "locations": [
        {
            "id": "harbour",
            "name": "Harbour Hotel",
            "timezone": "Pacific/Auckland",
            "categories": [
                {
                    "id": "ground",
                    "name": "Ground floor",
                    "rooms": [{"room_id": "12"}, {"room_id": "10"}, {"room_id": "11"}]
                },
                {
                    "id": "first",
                    "name": "First floor",
                    "rooms": [{"room_id": "13"}, {"room_id": "14"}, {"room_id": "99", "excluded": true}]
                }
            ],
            "filter_excluded_rooms": ["15"],
            "task_description_filters": ["linen", "carpet"],
            "task_type_names": {"7": "Linen change"}
        },
        {
            "id": "lakeside",
            "name": "Lakeside Lodge",
            "push_completions_upstream": false
        }
    ]
}"#;

/// The January week, as served by the upstream system.
pub const FEED_JSON: &str = r#"{
    "rooms": [
        {"room_id": 10, "display_name": "Room 10"},
        {"room_id": 11, "display_name": "Room 11"},
        {"room_id": 12, "display_name": "Room 12"},
        {"room_id": 13, "display_name": "Room 13"},
        {"room_id": 14, "display_name": "Room 14"},
        {"room_id": 15, "display_name": "Room 15"},
        {"room_id": 99, "display_name": "Staff"}
    ],
    "stays": [
        {"booking_ref": "B-12", "room_id": 12, "arrival": "2024-01-10", "departure": "2024-01-13", "guest_name": "Ada"},
        {"booking_ref": "B-10", "room_id": 10, "arrival": "2024-01-11", "departure": "2024-01-14", "notes": "twin beds please"},
        {"booking_ref": "B-11", "room_id": 11, "arrival": "2024-01-08", "departure": "2024-01-11", "status": "in_house"}
    ],
    "tasks": [
        {"task_id": "T-14", "room_id": 14, "description": "Out of order: carpet", "period_from": "2024-01-10", "period_to": "2024-01-12", "occupancy_blocking": true},
        {"task_id": "T-12a", "room_id": 12, "description": "Change Linen", "type_id": 7, "when_date": "2024-01-11"},
        {"task_id": "T-12b", "room_id": 12, "description": "Restock minibar", "when_date": "2024-01-11"}
    ]
}"#;

pub fn date(value: &str) -> Date {
    parse_date(value).unwrap()
}

pub fn create_test_feed() -> Arc<StaticFeed> {
    Arc::new(StaticFeed::from_json(FEED_JSON).unwrap())
}

pub fn create_test_service(feed: &Arc<StaticFeed>) -> Housekeeping {
    let settings: SettingsRegistry = SettingsRegistry::from_json(SETTINGS_JSON).unwrap();
    let client: Arc<dyn FeedClient> = Arc::clone(feed) as Arc<dyn FeedClient>;
    Housekeeping::new(client, settings)
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Room 12's linen change on 2024-01-11, by Maria.
pub fn create_linen_change_request() -> CompleteTaskRequest {
    CompleteTaskRequest {
        room_id: String::from("12"),
        task_id: Some(String::from("T-12a")),
        task_type: Some(String::from("7")),
        description: String::from("Change Linen"),
        booking_ref: Some(String::from("B-12")),
        service_date: Some(date("2024-01-11")),
        completed_by_id: String::from("u-17"),
        completed_by_name: String::from("Maria"),
    }
}
