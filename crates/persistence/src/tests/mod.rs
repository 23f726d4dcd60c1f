// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod completion_tests;

use crate::Persistence;
use roomboard::{CompletionRequest, NewTaskCompletion};
use roomboard_audit::Actor;
use roomboard_domain::parse_date;
use time::Date;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn date(value: &str) -> Date {
    parse_date(value).unwrap()
}

pub fn create_test_actor(id: &str, name: &str) -> Actor {
    Actor::new(id.to_string(), name.to_string())
}

/// A "Change Linen" completion for room 5 on 2024-02-01.
pub fn create_test_completion(actor: &Actor) -> NewTaskCompletion {
    CompletionRequest {
        location_id: String::from("harbour"),
        room_id: String::from("5"),
        task_id: Some(String::from("T-5")),
        task_type: None,
        description: String::from("Change Linen"),
        booking_ref: Some(String::from("B-5")),
        service_date: date("2024-02-01"),
        actor: actor.clone(),
    }
    .validate()
    .unwrap()
}

pub fn create_completion_for(room: &str, description: &str, on: &str) -> NewTaskCompletion {
    CompletionRequest {
        location_id: String::from("harbour"),
        room_id: room.to_string(),
        task_id: None,
        task_type: None,
        description: description.to_string(),
        booking_ref: None,
        service_date: date(on),
        actor: create_test_actor("anna", "Anna"),
    }
    .validate()
    .unwrap()
}
