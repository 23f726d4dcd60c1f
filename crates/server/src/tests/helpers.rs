// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use roomboard::{FeedClient, StaticFeed};
use roomboard_api::{Housekeeping, SettingsRegistry};
use roomboard_persistence::Persistence;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::AppState;
use crate::live::LiveEventBroadcaster;

pub const SETTINGS_JSON: &str = r#"{
    "locations": [
        {
            "id": "harbour",
            "name": "Harbour Hotel",
            "categories": [
                {"id": "ground", "name": "Ground floor", "rooms": [{"room_id": "12"}, {"room_id": "14"}]}
            ],
            "task_type_names": {"7": "Linen change"}
        }
    ]
}"#;

pub const FEED_JSON: &str = r#"{
    "rooms": [
        {"room_id": 12, "display_name": "Room 12"},
        {"room_id": 14, "display_name": "Room 14"}
    ],
    "stays": [
        {"booking_ref": "B-12", "room_id": 12, "arrival": "2024-01-10", "departure": "2024-01-13", "guest_name": "Ada"}
    ],
    "tasks": [
        {"task_id": "T-12a", "room_id": 12, "description": "Change Linen", "type_id": 7, "when_date": "2024-01-11"}
    ]
}"#;

/// A request body completing room 12's linen change on 2024-01-11.
pub const COMPLETION_JSON: &str = r#"{
    "room_id": "12",
    "task_id": "T-12a",
    "task_type": "7",
    "description": "Change Linen",
    "booking_ref": "B-12",
    "service_date": "2024-01-11",
    "completed_by_id": "u-17",
    "completed_by_name": "Maria"
}"#;

pub fn create_test_app_state_with_feed(feed: StaticFeed) -> AppState {
    let settings: SettingsRegistry = SettingsRegistry::from_json(SETTINGS_JSON).unwrap();
    let feed: Arc<dyn FeedClient> = Arc::new(feed);
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        service: Arc::new(Housekeeping::new(feed, settings)),
        live: Arc::new(LiveEventBroadcaster::new()),
    }
}

pub fn create_test_app_state() -> AppState {
    create_test_app_state_with_feed(StaticFeed::from_json(FEED_JSON).unwrap())
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: String) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}
