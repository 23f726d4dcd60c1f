// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::live::{LiveEvent, LiveEventBroadcaster};
use roomboard_domain::{RoomId, Timestamp, parse_date};
use tokio::sync::broadcast;

fn completed(completion_id: i64) -> LiveEvent {
    LiveEvent::TaskCompleted {
        location_id: String::from("harbour"),
        room_id: RoomId::new("12").unwrap(),
        service_date: parse_date("2024-01-11").unwrap(),
        completion_id,
        completed_at: Timestamp::now(),
    }
}

#[test]
fn test_broadcast_without_receivers_is_dropped() {
    let broadcaster: LiveEventBroadcaster = LiveEventBroadcaster::new();
    broadcaster.broadcast(&completed(1));
}

#[test]
fn test_every_subscriber_receives_the_event() {
    let broadcaster: LiveEventBroadcaster = LiveEventBroadcaster::new();
    let mut rx1: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();
    let mut rx2: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    let event: LiveEvent = completed(7);
    broadcaster.broadcast(&event);

    assert_eq!(rx1.try_recv().unwrap(), event);
    assert_eq!(rx2.try_recv().unwrap(), event);
}

#[test]
fn test_late_subscriber_misses_earlier_events() {
    let broadcaster: LiveEventBroadcaster = LiveEventBroadcaster::new();
    broadcaster.broadcast(&completed(1));

    let mut rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    assert!(rx.try_recv().is_err());
}

#[test]
fn test_task_completed_wire_format() {
    let json: serde_json::Value = serde_json::to_value(completed(3)).unwrap();

    assert_eq!(json["type"], "task_completed");
    assert_eq!(json["location_id"], "harbour");
    assert_eq!(json["room_id"], "12");
    assert_eq!(json["service_date"], "2024-01-11");
    assert_eq!(json["completion_id"], 3);
}
