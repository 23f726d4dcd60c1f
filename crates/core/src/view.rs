// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assembly of the per-room day view.
//!
//! Mapper, merger and classifier run in that order over one snapshot of
//! the feeds. Nothing is cached between requests.

use crate::error::CoreError;
use crate::feed::{FeedClient, FeedRoom, FeedStay, FeedTask};
use crate::ingest::{ingest_rooms, ingest_stays, ingest_tasks};
use roomboard_domain::{
    CategoryLookup, FilterCounts, LocationSettings, Room, RoomDayRecord, RoomDays, RoomTask,
    Stay, Window, map_categories, merge_room_days,
};
use serde::{Deserialize, Serialize};
use time::Date;
use tracing::{debug, info};

/// The reconciled state of every visible room on a service date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDayView {
    /// The location the view belongs to.
    pub location_id: String,
    /// The window around the service date.
    pub window: Window,
    /// One record per visible room, in display order.
    pub rooms: Vec<RoomDayRecord>,
    /// Inclusive filter counts over the records.
    pub counts: FilterCounts,
}

impl RoomDayView {
    /// Returns the service date.
    #[must_use]
    pub const fn service_date(&self) -> Date {
        self.window.today
    }

    /// Returns the record for a room, if it is visible.
    #[must_use]
    pub fn room(&self, room_id: &str) -> Option<&RoomDayRecord> {
        self.rooms
            .iter()
            .find(|r| r.days.room.id.as_str() == room_id.trim())
    }
}

/// A normalized snapshot of the three feeds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedSnapshot {
    pub rooms: Vec<Room>,
    pub stays: Vec<Stay>,
    pub tasks: Vec<RoomTask>,
}

impl FeedSnapshot {
    /// Normalizes raw feed records against the category lookups.
    #[must_use]
    pub fn from_records(
        rooms: &[FeedRoom],
        stays: &[FeedStay],
        tasks: &[FeedTask],
        lookup: &CategoryLookup,
    ) -> Self {
        Self {
            rooms: ingest_rooms(rooms, lookup),
            stays: ingest_stays(stays),
            tasks: ingest_tasks(tasks),
        }
    }

    /// Fetches and normalizes the feeds for the window around `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if any feed call fails.
    pub fn fetch(
        feed: &dyn FeedClient,
        window: &Window,
        lookup: &CategoryLookup,
    ) -> Result<Self, CoreError> {
        let rooms: Vec<FeedRoom> = feed.list_rooms()?;
        let stays: Vec<FeedStay> = feed.list_stays(window.yesterday, window.tomorrow)?;
        let tasks: Vec<FeedTask> = feed.list_tasks(window.yesterday, window.tomorrow)?;
        debug!(
            rooms = rooms.len(),
            stays = stays.len(),
            tasks = tasks.len(),
            "Fetched feed snapshot"
        );
        Ok(Self::from_records(&rooms, &stays, &tasks, lookup))
    }
}

/// Builds the room-day view from an already normalized snapshot.
///
/// # Errors
///
/// Returns an error only if date arithmetic overflows.
pub fn build_room_day_view(
    settings: &LocationSettings,
    lookup: &CategoryLookup,
    snapshot: &FeedSnapshot,
    date: Date,
) -> Result<RoomDayView, CoreError> {
    let window: Window = Window::around(date)?;
    let merged: Vec<RoomDays> = merge_room_days(
        &snapshot.rooms,
        &snapshot.stays,
        &snapshot.tasks,
        lookup,
        &settings.filter_excluded_rooms,
        &window,
    )?;
    let rooms: Vec<RoomDayRecord> = merged
        .into_iter()
        .map(|days| RoomDayRecord::from_days(days, date, &settings.twin_keywords))
        .collect();
    let counts: FilterCounts = FilterCounts::compute(&rooms);

    Ok(RoomDayView {
        location_id: settings.id.clone(),
        window,
        rooms,
        counts,
    })
}

/// Fetches the feeds and builds the room-day view for a location and date.
///
/// # Errors
///
/// Returns an error if the feed is unavailable.
pub fn fetch_room_day_view(
    feed: &dyn FeedClient,
    settings: &LocationSettings,
    date: Date,
) -> Result<RoomDayView, CoreError> {
    let lookup: CategoryLookup = map_categories(&settings.categories);
    let window: Window = Window::around(date)?;
    let snapshot: FeedSnapshot = FeedSnapshot::fetch(feed, &window, &lookup)?;
    let view: RoomDayView = build_room_day_view(settings, &lookup, &snapshot, date)?;
    info!(
        location = %settings.id,
        service_date = %date,
        rooms = view.rooms.len(),
        "Built room-day view"
    );
    Ok(view)
}
