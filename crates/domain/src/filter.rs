// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Three-state filter algebra over the room-day view.
//!
//! Each filter button cycles `off → inclusive → exclusive → off`. At most
//! one category is active at a time; the reserved "all" category resets
//! every other one. Visibility is decided per record from the record and
//! the filter state alone, so a client holding the view can re-filter
//! without asking the server again.
//!
//! ## Invariants
//!
//! - For a given category, the inclusive and exclusive visible sets are
//!   disjoint and together cover every record that is not filter-excluded
//! - Filter-excluded records are hidden unless "all" is active

use crate::classify::{BLOCKED_STATUS, RoomDayRecord, is_in_house, stay_status};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A filter button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCategory {
    /// The reserved "show everything" button.
    All,
    /// Rooms with an arrival today.
    Arrivals,
    /// Rooms with a departure today.
    Departures,
    /// Rooms whose stay continues through today.
    Stopovers,
    /// Rooms blocked today.
    Blocked,
    /// Rooms needing a twin or sofa-bed setup.
    Twin,
    /// Rooms with no stay occupying today.
    NoBooking,
    /// Rooms with no guest physically present.
    Unoccupied,
}

impl FilterCategory {
    /// Every category except "all", in button order.
    pub const SELECTABLE: [Self; 7] = [
        Self::Arrivals,
        Self::Departures,
        Self::Stopovers,
        Self::Blocked,
        Self::Twin,
        Self::NoBooking,
        Self::Unoccupied,
    ];

    /// Returns the string form used by clients.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Arrivals => "arrivals",
            Self::Departures => "departures",
            Self::Stopovers => "stopovers",
            Self::Blocked => "blocked",
            Self::Twin => "twin",
            Self::NoBooking => "no_booking",
            Self::Unoccupied => "unoccupied",
        }
    }

    /// Tests a record against this category.
    ///
    /// "all" matches everything.
    #[must_use]
    pub fn matches(&self, record: &RoomDayRecord) -> bool {
        let c = &record.classification;
        match self {
            Self::All => true,
            Self::Arrivals => c.is_arriving,
            Self::Departures => c.is_departing,
            Self::Stopovers => c.is_stopover,
            Self::Blocked => c.booking_status == BLOCKED_STATUS,
            Self::Twin => c.has_twin,
            Self::NoBooking => !record.has_booking_today(),
            Self::Unoccupied => !is_occupied(record),
        }
    }
}

/// Returns true if a guest is physically in the room today.
///
/// A stopover is occupied. An arrival is occupied once its stay is in
/// house. A departure is occupied while the departing stay is still in
/// house.
#[must_use]
pub fn is_occupied(record: &RoomDayRecord) -> bool {
    let c = &record.classification;
    if c.is_stopover {
        return true;
    }
    let arrived: bool = c.is_arriving
        && record
            .days
            .today
            .stay()
            .is_some_and(|stay| is_in_house(&stay_status(stay)));
    let departing_in_house: bool =
        c.is_departing && record.departing_status().is_some_and(|s| is_in_house(&s));
    arrived || departing_in_house
}

/// Mode of a single filter button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Not filtering.
    #[default]
    Off,
    /// Show only matching rooms.
    Inclusive,
    /// Show only non-matching rooms.
    Exclusive,
}

impl FilterMode {
    /// Returns the next mode in the click cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Off => Self::Inclusive,
            Self::Inclusive => Self::Exclusive,
            Self::Exclusive => Self::Off,
        }
    }
}

/// The client-held filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    active: Option<(FilterCategory, FilterMode)>,
}

impl FilterState {
    /// Creates the "show all" state.
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Creates a state with a single button set to `mode`.
    ///
    /// "All" and `Off` both mean no filtering.
    #[must_use]
    pub const fn with(category: FilterCategory, mode: FilterMode) -> Self {
        match (category, mode) {
            (FilterCategory::All, _) | (_, FilterMode::Off) => Self::new(),
            _ => Self {
                active: Some((category, mode)),
            },
        }
    }

    /// Returns the active category, or "all" when nothing is filtering.
    #[must_use]
    pub fn active_category(&self) -> FilterCategory {
        self.active.map_or(FilterCategory::All, |(category, _)| category)
    }

    /// Returns the mode of a category's button.
    #[must_use]
    pub fn mode_of(&self, category: FilterCategory) -> FilterMode {
        match self.active {
            Some((active, mode)) if active == category => mode,
            _ => FilterMode::Off,
        }
    }

    /// Applies a click on a filter button.
    ///
    /// Clicking "all" resets every button. Clicking another button
    /// advances its mode and turns every other button off.
    pub fn click(&mut self, category: FilterCategory) {
        if category == FilterCategory::All {
            self.active = None;
            return;
        }
        let next: FilterMode = self.mode_of(category).next();
        self.active = match next {
            FilterMode::Off => None,
            FilterMode::Inclusive | FilterMode::Exclusive => Some((category, next)),
        };
    }

    /// Decides whether a record is visible under this state.
    #[must_use]
    pub fn is_visible(&self, record: &RoomDayRecord) -> bool {
        let Some((category, mode)) = self.active else {
            return true;
        };
        if record.days.filter_excluded {
            return false;
        }
        let matches: bool = category.matches(record);
        match mode {
            FilterMode::Off => true,
            FilterMode::Inclusive => matches,
            FilterMode::Exclusive => !matches,
        }
    }

    /// Returns the records visible under this state, in order.
    #[must_use]
    pub fn visible<'a>(&self, records: &'a [RoomDayRecord]) -> Vec<&'a RoomDayRecord> {
        records.iter().filter(|r| self.is_visible(r)).collect()
    }
}

/// Per-category counts shown on the filter buttons.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCounts {
    /// Inclusive counts per category over records that are not filter-excluded.
    pub inclusive: BTreeMap<FilterCategory, usize>,
    /// Number of records that are not filter-excluded.
    pub filterable_total: usize,
}

impl FilterCounts {
    /// Computes inclusive counts from the reconciled view.
    #[must_use]
    pub fn compute(records: &[RoomDayRecord]) -> Self {
        let filterable: Vec<&RoomDayRecord> =
            records.iter().filter(|r| !r.days.filter_excluded).collect();
        let inclusive: BTreeMap<FilterCategory, usize> = FilterCategory::SELECTABLE
            .iter()
            .map(|category| {
                let count: usize = filterable.iter().filter(|r| category.matches(r)).count();
                (*category, count)
            })
            .collect();
        Self {
            inclusive,
            filterable_total: filterable.len(),
        }
    }

    /// Returns the inclusive count of a category.
    #[must_use]
    pub fn inclusive_count(&self, category: FilterCategory) -> usize {
        match category {
            FilterCategory::All => self.filterable_total,
            _ => self.inclusive.get(&category).copied().unwrap_or(0),
        }
    }

    /// Returns the exclusive count given the currently visible total.
    ///
    /// The total must not include filter-excluded rooms. It is taken
    /// from the caller every time rather than cached.
    #[must_use]
    pub fn exclusive_count(&self, category: FilterCategory, visible_total: usize) -> usize {
        visible_total.saturating_sub(self.inclusive_count(category))
    }
}
