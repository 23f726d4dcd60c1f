// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-location settings as read from configuration storage.
//!
//! Storage and editing of settings happen elsewhere; this is only the
//! shape the reconciliation core consumes.

use crate::categories::CategoryConfig;
use crate::types::RoomId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Keywords that mark a stay as needing a twin or sofa-bed setup.
pub const DEFAULT_TWIN_KEYWORDS: [&str; 4] = ["twin", "sofabed", "sofa bed", "sofa-bed"];

fn default_timezone() -> String {
    String::from("UTC")
}

fn default_twin_keywords() -> Vec<String> {
    DEFAULT_TWIN_KEYWORDS.iter().map(ToString::to_string).collect()
}

const fn default_true() -> bool {
    true
}

/// Settings for one hotel location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSettings {
    /// The location identifier.
    pub id: String,
    /// The display name.
    pub name: String,
    /// IANA timezone used to derive the current service date.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Room categories in display order.
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
    /// Rooms hidden whenever a filter other than "all" is active.
    #[serde(default)]
    pub filter_excluded_rooms: BTreeSet<RoomId>,
    /// Substrings selecting which tasks appear in room detail.
    ///
    /// An empty list shows every task for the room.
    #[serde(default)]
    pub task_description_filters: Vec<String>,
    /// Display names for upstream task types, keyed by type identifier.
    #[serde(default)]
    pub task_type_names: BTreeMap<String, String>,
    /// Keywords for twin / sofa-bed detection.
    #[serde(default = "default_twin_keywords")]
    pub twin_keywords: Vec<String>,
    /// Whether completions of upstream tasks are pushed to the upstream system.
    #[serde(default = "default_true")]
    pub push_completions_upstream: bool,
}

impl LocationSettings {
    /// Creates settings with defaults for everything but the identity.
    #[must_use]
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            timezone: default_timezone(),
            categories: Vec::new(),
            filter_excluded_rooms: BTreeSet::new(),
            task_description_filters: Vec::new(),
            task_type_names: BTreeMap::new(),
            twin_keywords: default_twin_keywords(),
            push_completions_upstream: true,
        }
    }

    /// Returns the display name of a task type.
    ///
    /// Unknown types fall back to the raw identifier.
    #[must_use]
    pub fn task_type_name(&self, type_id: &str) -> String {
        self.task_type_names
            .get(type_id)
            .cloned()
            .unwrap_or_else(|| type_id.to_string())
    }

    /// Returns true if a task description passes the configured filters.
    #[must_use]
    pub fn matches_task_filters(&self, description: &str) -> bool {
        if self.task_description_filters.is_empty() {
            return true;
        }
        let haystack: String = description.to_lowercase();
        self.task_description_filters
            .iter()
            .any(|needle| haystack.contains(&needle.to_lowercase()))
    }
}
