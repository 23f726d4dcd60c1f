// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{classify_single, create_test_stay};
use crate::{
    FilterCategory, FilterCounts, FilterMode, FilterState, RoomDayRecord, Stay, is_occupied,
};

fn stay_with_status(room: &str, arrival: &str, departure: &str, status: Option<&str>) -> Stay {
    let mut stay: Stay = create_test_stay(&format!("B-{room}"), room, arrival, departure);
    stay.status = status.map(ToString::to_string);
    stay
}

/// A small floor covering every filter category on 2024-01-11.
fn sample_records() -> Vec<RoomDayRecord> {
    let mut twin: Stay = stay_with_status("4", "2024-01-10", "2024-01-13", None);
    twin.notes = Some(String::from("twin setup"));

    let mut hidden: RoomDayRecord = classify_single(
        "9",
        &[stay_with_status("9", "2024-01-11", "2024-01-12", None)],
        "2024-01-11",
    );
    hidden.days.filter_excluded = true;

    vec![
        // arrival, not yet in house
        classify_single(
            "1",
            &[stay_with_status("1", "2024-01-11", "2024-01-13", None)],
            "2024-01-11",
        ),
        // arrival, already checked in
        classify_single(
            "2",
            &[stay_with_status("2", "2024-01-11", "2024-01-13", Some("arrived"))],
            "2024-01-11",
        ),
        // departure, guest still in house
        classify_single(
            "3",
            &[stay_with_status("3", "2024-01-09", "2024-01-11", Some("in_house"))],
            "2024-01-11",
        ),
        classify_single("4", &[twin], "2024-01-11"),
        // vacant
        classify_single("5", &[], "2024-01-11"),
        // departure, already checked out
        classify_single(
            "6",
            &[stay_with_status("6", "2024-01-09", "2024-01-11", Some("checked_out"))],
            "2024-01-11",
        ),
        hidden,
    ]
}

fn visible_ids(state: &FilterState, records: &[RoomDayRecord]) -> Vec<String> {
    state
        .visible(records)
        .iter()
        .map(|r| r.days.room.id.to_string())
        .collect()
}

#[test]
fn test_click_cycles_through_modes() {
    let mut state: FilterState = FilterState::new();
    assert_eq!(state.active_category(), FilterCategory::All);

    state.click(FilterCategory::Arrivals);
    assert_eq!(state.mode_of(FilterCategory::Arrivals), FilterMode::Inclusive);

    state.click(FilterCategory::Arrivals);
    assert_eq!(state.mode_of(FilterCategory::Arrivals), FilterMode::Exclusive);

    state.click(FilterCategory::Arrivals);
    assert_eq!(state.mode_of(FilterCategory::Arrivals), FilterMode::Off);
    assert_eq!(state, FilterState::new());
}

#[test]
fn test_click_on_other_category_resets_the_first() {
    let mut state: FilterState = FilterState::new();
    state.click(FilterCategory::Arrivals);
    state.click(FilterCategory::Arrivals);

    state.click(FilterCategory::Twin);

    assert_eq!(state.mode_of(FilterCategory::Arrivals), FilterMode::Off);
    assert_eq!(state.mode_of(FilterCategory::Twin), FilterMode::Inclusive);
    assert_eq!(state.active_category(), FilterCategory::Twin);
}

#[test]
fn test_click_all_resets_everything() {
    let mut state: FilterState = FilterState::new();
    state.click(FilterCategory::Blocked);

    state.click(FilterCategory::All);

    assert_eq!(state, FilterState::new());
    assert_eq!(state.mode_of(FilterCategory::Blocked), FilterMode::Off);
}

#[test]
fn test_state_built_directly_matches_clicking() {
    let mut clicked: FilterState = FilterState::new();
    clicked.click(FilterCategory::Blocked);
    clicked.click(FilterCategory::Blocked);

    assert_eq!(
        FilterState::with(FilterCategory::Blocked, FilterMode::Exclusive),
        clicked
    );
    assert_eq!(
        FilterState::with(FilterCategory::All, FilterMode::Inclusive),
        FilterState::new()
    );
    assert_eq!(
        FilterState::with(FilterCategory::Twin, FilterMode::Off),
        FilterState::new()
    );
}

#[test]
fn test_all_shows_filter_excluded_rooms() {
    let records: Vec<RoomDayRecord> = sample_records();
    let state: FilterState = FilterState::new();

    assert_eq!(state.visible(&records).len(), records.len());
}

#[test]
fn test_inclusive_and_exclusive_partition_filterable_rooms() {
    let records: Vec<RoomDayRecord> = sample_records();
    let filterable: usize = records.iter().filter(|r| !r.days.filter_excluded).count();

    for category in FilterCategory::SELECTABLE {
        let mut state: FilterState = FilterState::new();
        state.click(category);
        let inclusive: Vec<String> = visible_ids(&state, &records);
        state.click(category);
        let exclusive: Vec<String> = visible_ids(&state, &records);

        assert!(
            inclusive.iter().all(|id| !exclusive.contains(id)),
            "{} sets overlap",
            category.as_str()
        );
        assert_eq!(inclusive.len() + exclusive.len(), filterable);
        assert!(!inclusive.contains(&String::from("9")));
        assert!(!exclusive.contains(&String::from("9")));
    }
}

#[test]
fn test_category_membership() {
    let records: Vec<RoomDayRecord> = sample_records();
    let members = |category: FilterCategory| -> Vec<String> {
        let mut state: FilterState = FilterState::new();
        state.click(category);
        visible_ids(&state, &records)
    };

    assert_eq!(members(FilterCategory::Arrivals), vec!["1", "2"]);
    assert_eq!(members(FilterCategory::Departures), vec!["3", "6"]);
    assert_eq!(members(FilterCategory::Stopovers), vec!["4"]);
    assert_eq!(members(FilterCategory::Twin), vec!["4"]);
    assert!(members(FilterCategory::Blocked).is_empty());
    assert_eq!(members(FilterCategory::NoBooking), vec!["3", "5", "6"]);
    assert_eq!(members(FilterCategory::Unoccupied), vec!["1", "5", "6"]);
}

#[test]
fn test_occupancy_rules() {
    let records: Vec<RoomDayRecord> = sample_records();
    let occupied: Vec<bool> = records.iter().map(is_occupied).collect();

    assert_eq!(occupied, vec![false, true, true, true, false, false, false]);
}

#[test]
fn test_counts_exclude_filter_excluded_rooms() {
    let records: Vec<RoomDayRecord> = sample_records();
    let counts: FilterCounts = FilterCounts::compute(&records);

    assert_eq!(counts.filterable_total, 6);
    assert_eq!(counts.inclusive_count(FilterCategory::All), 6);
    assert_eq!(counts.inclusive_count(FilterCategory::Arrivals), 2);
    assert_eq!(counts.inclusive_count(FilterCategory::NoBooking), 3);
    assert_eq!(counts.inclusive_count(FilterCategory::Blocked), 0);
    assert_eq!(counts.exclusive_count(FilterCategory::Arrivals, 6), 4);
    assert_eq!(counts.exclusive_count(FilterCategory::Unoccupied, 6), 3);
}

#[test]
fn test_exclusive_count_never_underflows() {
    let counts: FilterCounts = FilterCounts::compute(&sample_records());

    assert_eq!(counts.exclusive_count(FilterCategory::NoBooking, 1), 0);
}

#[test]
fn test_category_strings() {
    let names: Vec<&str> = FilterCategory::SELECTABLE
        .iter()
        .map(FilterCategory::as_str)
        .collect();

    assert_eq!(
        names,
        vec![
            "arrivals",
            "departures",
            "stopovers",
            "blocked",
            "twin",
            "no_booking",
            "unoccupied"
        ]
    );
    assert_eq!(
        serde_json::to_string(&FilterCategory::NoBooking).unwrap(),
        "\"no_booking\""
    );
}
