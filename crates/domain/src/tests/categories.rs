// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::room_id;
use crate::{CategoryConfig, CategoryLookup, CategoryRoomConfig, SortKey, map_categories};

fn category(id: &str, excluded: bool, rooms: &[(&str, bool)]) -> CategoryConfig {
    CategoryConfig {
        id: id.to_string(),
        name: format!("Category {id}"),
        excluded,
        rooms: rooms
            .iter()
            .map(|(room, excluded)| CategoryRoomConfig {
                room_id: (*room).to_string(),
                excluded: *excluded,
            })
            .collect(),
    }
}

fn sample_config() -> Vec<CategoryConfig> {
    vec![
        category("first-floor", false, &[("103", false), ("101", false), ("102", true)]),
        category("second-floor", false, &[("201", false), ("202", false)]),
        category("annex", true, &[("A1", false), ("A2", false)]),
    ]
}

#[test]
fn test_sort_keys_follow_source_positions() {
    let lookup: CategoryLookup = map_categories(&sample_config());

    assert_eq!(lookup.sort_key(&room_id("103")), SortKey::new(0, 0));
    assert_eq!(lookup.sort_key(&room_id("101")), SortKey::new(0, 1));
    assert_eq!(lookup.sort_key(&room_id("201")), SortKey::new(1, 0));
    assert_eq!(lookup.sort_key(&room_id("A2")), SortKey::new(2, 1));
}

#[test]
fn test_ordering_is_strict_total_order_over_configured_rooms() {
    let lookup: CategoryLookup = map_categories(&sample_config());
    let ordered: Vec<&str> = vec!["103", "101", "102", "201", "202", "A1", "A2"];

    let keys: Vec<SortKey> = ordered.iter().map(|r| lookup.sort_key(&room_id(r))).collect();
    for pair in keys.windows(2) {
        assert!(pair[0] < pair[1], "{:?} should sort before {:?}", pair[0], pair[1]);
    }
}

#[test]
fn test_mapping_is_stable_across_runs() {
    let first: CategoryLookup = map_categories(&sample_config());
    for _ in 0..10 {
        assert_eq!(map_categories(&sample_config()), first);
    }
}

#[test]
fn test_unconfigured_room_gets_sentinel_after_everything() {
    let lookup: CategoryLookup = map_categories(&sample_config());
    let sentinel: SortKey = lookup.sort_key(&room_id("999"));

    assert_eq!(sentinel, SortKey::UNCONFIGURED);
    assert!(lookup.sort_key(&room_id("A2")) < sentinel);
    assert!(lookup.category_of(&room_id("999")).is_none());
}

#[test]
fn test_room_level_exclusion() {
    let lookup: CategoryLookup = map_categories(&sample_config());

    assert!(lookup.is_excluded(&room_id("102")));
    assert!(!lookup.is_excluded(&room_id("101")));
}

#[test]
fn test_category_exclusion_is_transitive() {
    let lookup: CategoryLookup = map_categories(&sample_config());

    assert!(lookup.is_excluded(&room_id("A1")));
    assert!(lookup.is_excluded(&room_id("A2")));
    assert_eq!(lookup.excluded().len(), 3);
}

#[test]
fn test_duplicate_room_keeps_first_category() {
    let config: Vec<CategoryConfig> = vec![
        category("north", false, &[("7", false)]),
        category("south", false, &[("8", false), ("7", false)]),
    ];
    let lookup: CategoryLookup = map_categories(&config);

    assert_eq!(lookup.sort_key(&room_id("7")), SortKey::new(0, 0));
    assert_eq!(
        lookup.category_of(&room_id("7")).map(|c| c.id.as_str()),
        Some("north")
    );
    assert_eq!(lookup.configured_room_count(), 2);
}

#[test]
fn test_blank_room_entries_are_ignored() {
    let config: Vec<CategoryConfig> = vec![category("north", false, &[("  ", false), ("7", false)])];
    let lookup: CategoryLookup = map_categories(&config);

    assert_eq!(lookup.configured_room_count(), 1);
    assert_eq!(lookup.sort_key(&room_id("7")), SortKey::new(0, 1));
}
