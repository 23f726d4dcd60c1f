// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_feed, create_test_settings, date};
use crate::{
    CoreError, FeedClient, FeedError, FeedId, FeedStay, RoomDayView, StaticFeed,
    fetch_room_day_view,
};
use roomboard_domain::{FilterCategory, LocationSettings, RoomDayRecord, RoomId};

fn build() -> RoomDayView {
    fetch_room_day_view(&create_test_feed(), &create_test_settings(), date("2024-01-11")).unwrap()
}

fn record<'a>(view: &'a RoomDayView, room: &str) -> &'a RoomDayRecord {
    view.room(room).unwrap()
}

#[test]
fn test_rooms_follow_configured_order_with_unconfigured_last() {
    let view: RoomDayView = build();
    let order: Vec<&str> = view.rooms.iter().map(|r| r.days.room.id.as_str()).collect();

    assert_eq!(order, vec!["12", "10", "11", "13", "14", "15"]);
    assert!(view.room("99").is_none());
}

#[test]
fn test_rooms_are_enriched_from_configuration() {
    let view: RoomDayView = build();
    let room12: &RoomDayRecord = record(&view, "12");

    assert_eq!(room12.days.room.number, "Room 12");
    assert_eq!(
        room12.days.room.category.as_ref().map(|c| c.name.as_str()),
        Some("Ground floor")
    );
    assert!(record(&view, "15").days.room.category.is_none());
}

#[test]
fn test_room_12_is_a_stopover() {
    let view: RoomDayView = build();
    let room12: &RoomDayRecord = record(&view, "12");

    assert!(room12.classification.is_stopover);
    assert!(!room12.classification.is_arriving);
    assert!(!room12.classification.is_departing);
    assert!(room12.classification.spans_previous);
    assert!(room12.classification.spans_next);
}

#[test]
fn test_room_14_is_blocked_on_the_tenth_and_eleventh_only() {
    let view: RoomDayView = build();
    let room14: &RoomDayRecord = record(&view, "14");
    assert!(room14.days.yesterday.is_blocked());
    assert!(room14.days.today.is_blocked());
    assert!(!room14.days.tomorrow.is_occupied());
    assert_eq!(room14.classification.booking_status, "blocked");

    let next_day: RoomDayView =
        fetch_room_day_view(&create_test_feed(), &create_test_settings(), date("2024-01-12"))
            .unwrap();
    assert!(!record(&next_day, "14").days.today.is_occupied());
}

#[test]
fn test_departing_room_is_not_occupied_today() {
    let view: RoomDayView = build();
    let room11: &RoomDayRecord = record(&view, "11");

    assert!(room11.classification.is_departing);
    assert!(!room11.has_booking_today());
    assert_eq!(room11.classification.booking_status, "unconfirmed");
}

#[test]
fn test_filter_counts_are_computed_over_the_view() {
    let view: RoomDayView = build();

    assert_eq!(view.counts.filterable_total, 6);
    assert_eq!(view.counts.inclusive_count(FilterCategory::Arrivals), 1);
    assert_eq!(view.counts.inclusive_count(FilterCategory::Departures), 1);
    assert_eq!(view.counts.inclusive_count(FilterCategory::Stopovers), 1);
    assert_eq!(view.counts.inclusive_count(FilterCategory::Blocked), 1);
    assert_eq!(view.counts.inclusive_count(FilterCategory::NoBooking), 4);
    assert_eq!(view.counts.inclusive_count(FilterCategory::Unoccupied), 5);
}

#[test]
fn test_filter_excluded_rooms_are_flagged() {
    let mut settings: LocationSettings = create_test_settings();
    settings
        .filter_excluded_rooms
        .insert(RoomId::new("15").unwrap());
    let view: RoomDayView =
        fetch_room_day_view(&create_test_feed(), &settings, date("2024-01-11")).unwrap();

    assert!(record(&view, "15").days.filter_excluded);
    assert_eq!(view.counts.filterable_total, 5);
}

#[test]
fn test_twin_keyword_setting_is_applied() {
    let mut feed: StaticFeed = create_test_feed();
    let stay: &mut FeedStay = feed
        .stays
        .iter_mut()
        .find(|s| s.room_id == Some(FeedId::Number(12)))
        .unwrap();
    stay.notes = Some(String::from("Needs the rollaway"));
    let mut settings: LocationSettings = create_test_settings();

    let view: RoomDayView = fetch_room_day_view(&feed, &settings, date("2024-01-11")).unwrap();
    assert!(!record(&view, "12").classification.has_twin);

    settings.twin_keywords.push(String::from("rollaway"));
    let view: RoomDayView = fetch_room_day_view(&feed, &settings, date("2024-01-11")).unwrap();
    assert!(record(&view, "12").classification.has_twin);
}

#[test]
fn test_static_feed_filters_stays_to_the_window() {
    let feed: StaticFeed = create_test_feed();
    let stays: Vec<FeedStay> = feed
        .list_stays(date("2024-01-10"), date("2024-01-12"))
        .unwrap();

    assert_eq!(stays.len(), 3);
}

#[test]
fn test_unavailable_feed_is_reported() {
    let mut feed: StaticFeed = create_test_feed();
    feed.offline = true;
    let result: Result<RoomDayView, CoreError> =
        fetch_room_day_view(&feed, &create_test_settings(), date("2024-01-11"));

    assert!(matches!(
        result,
        Err(CoreError::Feed(FeedError::Unavailable(_)))
    ));
}
