// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Category and exclusion mapping.
//!
//! A hotel groups its rooms into ordered categories (floors, wings,
//! room types). This module turns that configuration into the lookups the
//! merger needs: which category a room belongs to, which rooms are
//! excluded, and where each room sorts.
//!
//! ## Invariants
//!
//! - The sort order is the total order `(category index, room index)`
//! - A room listed in several categories keeps its first occurrence
//! - Excluding a category excludes every room in it, including rooms
//!   mapped earlier by another category

use crate::types::{CategoryMeta, RoomId, SortKey};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A room entry within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRoomConfig {
    /// The room identifier as configured.
    pub room_id: String,
    /// Whether this room is individually excluded.
    #[serde(default)]
    pub excluded: bool,
}

/// A configured room category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// The category identifier.
    pub id: String,
    /// The display name.
    pub name: String,
    /// Whether the whole category is excluded.
    #[serde(default)]
    pub excluded: bool,
    /// The rooms in display order.
    #[serde(default)]
    pub rooms: Vec<CategoryRoomConfig>,
}

/// Lookups derived from a category configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryLookup {
    categories: HashMap<RoomId, CategoryMeta>,
    excluded: HashSet<RoomId>,
    order: HashMap<RoomId, SortKey>,
}

impl CategoryLookup {
    /// Returns the category a room is configured under.
    #[must_use]
    pub fn category_of(&self, room_id: &RoomId) -> Option<&CategoryMeta> {
        self.categories.get(room_id)
    }

    /// Returns true if the room is excluded directly or via its category.
    #[must_use]
    pub fn is_excluded(&self, room_id: &RoomId) -> bool {
        self.excluded.contains(room_id)
    }

    /// Returns the sort key for a room, or the unconfigured sentinel.
    #[must_use]
    pub fn sort_key(&self, room_id: &RoomId) -> SortKey {
        self.order
            .get(room_id)
            .copied()
            .unwrap_or(SortKey::UNCONFIGURED)
    }

    /// Returns the set of excluded rooms.
    #[must_use]
    pub const fn excluded(&self) -> &HashSet<RoomId> {
        &self.excluded
    }

    /// Returns the number of configured rooms.
    #[must_use]
    pub fn configured_room_count(&self) -> usize {
        self.order.len()
    }
}

/// Builds the category lookups from a configuration list.
///
/// Room entries with blank identifiers are ignored.
#[must_use]
pub fn map_categories(config: &[CategoryConfig]) -> CategoryLookup {
    let mut lookup: CategoryLookup = CategoryLookup::default();

    for (category_index, category) in config.iter().enumerate() {
        let meta: CategoryMeta = CategoryMeta {
            id: category.id.clone(),
            name: category.name.clone(),
        };
        let category_order: u32 = u32::try_from(category_index).unwrap_or(u32::MAX - 1);

        for (room_index, entry) in category.rooms.iter().enumerate() {
            let Ok(room_id) = RoomId::new(&entry.room_id) else {
                debug!(category = %category.id, "Skipping blank room entry");
                continue;
            };

            if category.excluded || entry.excluded {
                lookup.excluded.insert(room_id.clone());
            }

            if lookup.order.contains_key(&room_id) {
                debug!(
                    room_id = %room_id,
                    category = %category.id,
                    "Room already mapped by an earlier category"
                );
                continue;
            }

            let room_order: u32 = u32::try_from(room_index).unwrap_or(u32::MAX - 1);
            lookup
                .order
                .insert(room_id.clone(), SortKey::new(category_order, room_order));
            lookup.categories.insert(room_id, meta.clone());
        }
    }

    lookup
}
