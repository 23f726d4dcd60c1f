// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The operations exposed to clients.
//!
//! Every operation names its location explicitly. Reads of the upstream
//! feed go through the injected [`FeedClient`]; the local ledger is passed
//! in by the caller, which owns its locking.

use roomboard::{
    CompletionRequest, CompletionSummary, FeedClient, FeedSnapshot, NewTaskCompletion,
    RoomDayView, RoomDetail, SyncBatch, build_room_detail, fetch_room_day_view,
    resolve_service_date,
};
use roomboard_audit::{ActivityEntry, ActivityEvent, Actor, retention_cutoff};
use roomboard_domain::{
    CategoryLookup, FilterCategory, FilterCounts, FilterState, LocationSettings, RoomId,
    Timestamp, Window, map_categories,
};
use roomboard_persistence::{
    ActivityLogRecord, CompletionOutcome, Persistence, RemoteSync, TaskCompletionRecord,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::{
    ApiError, translate_audit_error, translate_completion_error, translate_core_error,
    translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    ActivityListResponse, ActivityRecordedResponse, CompleteTaskRequest, CompleteTaskResponse,
    CompletionListResponse, FilterCountsResponse, LinenSubmissionRequest, PollUpdatesRequest,
    PollUpdatesResponse, PurgeActivityResponse, RoomDayViewRequest, RoomDayViewResponse,
    RoomDetailResponse,
};
use crate::settings::SettingsRegistry;

fn summaries(records: &[TaskCompletionRecord]) -> Vec<CompletionSummary> {
    records.iter().map(TaskCompletionRecord::summary).collect()
}

fn counts_response(counts: &FilterCounts) -> FilterCountsResponse {
    let exclusive: BTreeMap<FilterCategory, usize> = FilterCategory::SELECTABLE
        .iter()
        .map(|category| {
            (
                *category,
                counts.exclusive_count(*category, counts.filterable_total),
            )
        })
        .collect();
    FilterCountsResponse {
        inclusive: counts.inclusive.clone(),
        exclusive,
        filterable_total: counts.filterable_total,
    }
}

/// The housekeeping service.
///
/// Holds the feed client and the location settings. Construct one per
/// process and share it.
pub struct Housekeeping {
    feed: Arc<dyn FeedClient>,
    settings: SettingsRegistry,
}

impl Housekeeping {
    /// Creates the service.
    ///
    /// # Arguments
    ///
    /// * `feed` - The upstream property-management system
    /// * `settings` - Settings of every served location
    #[must_use]
    pub fn new(feed: Arc<dyn FeedClient>, settings: SettingsRegistry) -> Self {
        Self { feed, settings }
    }

    /// Returns the configured locations.
    #[must_use]
    pub const fn settings(&self) -> &SettingsRegistry {
        &self.settings
    }

    fn location(&self, location_id: &str) -> Result<&LocationSettings, ApiError> {
        self.settings
            .get(location_id)
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("Location"),
                message: format!("Location '{location_id}' is not configured"),
            })
    }

    fn service_date(
        settings: &LocationSettings,
        requested: Option<Date>,
    ) -> Result<Date, ApiError> {
        resolve_service_date(settings, requested, OffsetDateTime::now_utc())
            .map_err(translate_core_error)
    }

    /// Builds the room-day view of a location.
    ///
    /// # Errors
    ///
    /// Returns an error if the location is unknown or the feed is
    /// unavailable.
    pub fn get_room_day_view(
        &self,
        location_id: &str,
        request: &RoomDayViewRequest,
    ) -> Result<RoomDayViewResponse, ApiError> {
        let settings: &LocationSettings = self.location(location_id)?;
        let service_date: Date = Self::service_date(settings, request.date)?;
        let view: RoomDayView = fetch_room_day_view(self.feed.as_ref(), settings, service_date)
            .map_err(translate_core_error)?;

        let state: FilterState = request
            .filter
            .map_or_else(FilterState::new, |category| {
                FilterState::with(category, request.mode)
            });
        let visible_room_ids: Vec<RoomId> = state
            .visible(&view.rooms)
            .iter()
            .map(|record| record.days.room.id.clone())
            .collect();

        Ok(RoomDayViewResponse {
            location_id: view.location_id.clone(),
            service_date,
            counts: counts_response(&view.counts),
            visible_room_ids,
            rooms: view.rooms,
        })
    }

    /// Describes one room: its day slots, its stay and its tasks.
    ///
    /// Each task carries its local completion, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the location or room is unknown. An unavailable
    /// feed is reported as the room not being found.
    pub fn get_room_detail(
        &self,
        persistence: &mut Persistence,
        location_id: &str,
        room_id: &str,
        date: Option<Date>,
    ) -> Result<RoomDetailResponse, ApiError> {
        let settings: &LocationSettings = self.location(location_id)?;
        let service_date: Date = Self::service_date(settings, date)?;
        let lookup: CategoryLookup = map_categories(&settings.categories);
        let window: Window = Window::around(service_date).map_err(translate_domain_error)?;

        let snapshot: FeedSnapshot = FeedSnapshot::fetch(self.feed.as_ref(), &window, &lookup)
            .map_err(|err| {
                warn!(
                    location = %location_id,
                    room_id = %room_id,
                    error = %err,
                    "Feed unavailable for room detail"
                );
                ApiError::ResourceNotFound {
                    resource_type: String::from("Room"),
                    message: format!("Room '{room_id}' could not be loaded: {err}"),
                }
            })?;

        let completions: Vec<TaskCompletionRecord> = persistence
            .completions_for_date(&settings.id, service_date)
            .map_err(|e| translate_persistence_error(&e))?;
        let detail: RoomDetail = build_room_detail(
            settings,
            &lookup,
            &snapshot,
            room_id,
            service_date,
            &summaries(&completions),
        )
        .map_err(translate_core_error)?;

        Ok(RoomDetailResponse {
            location_id: settings.id.clone(),
            service_date,
            detail,
        })
    }

    /// Completes a task at most once per room and service date.
    ///
    /// Tasks from the feed are pushed upstream when the location has
    /// upstream push enabled. If the push fails nothing is recorded.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AlreadyCompleted` for a repeat,
    /// `ApiError::RemoteSyncFailed` if the push failed, or a validation
    /// error.
    pub fn complete_task(
        &self,
        persistence: &mut Persistence,
        location_id: &str,
        request: CompleteTaskRequest,
    ) -> Result<CompleteTaskResponse, ApiError> {
        let settings: &LocationSettings = self.location(location_id)?;
        let service_date: Date = Self::service_date(settings, request.service_date)?;

        let completion: NewTaskCompletion = CompletionRequest {
            location_id: settings.id.clone(),
            room_id: request.room_id,
            task_id: request.task_id,
            task_type: request.task_type,
            description: request.description,
            booking_ref: request.booking_ref,
            service_date,
            actor: Actor::new(request.completed_by_id, request.completed_by_name),
        }
        .validate()
        .map_err(translate_core_error)?;

        let upstream_task: Option<&str> =
            completion.remote_task_id(settings.push_completions_upstream);
        let synced_upstream: bool = upstream_task.is_some();
        let feed: &dyn FeedClient = self.feed.as_ref();
        let remote = upstream_task.map(|task_id| {
            move |completed_at: Timestamp| -> Result<bool, String> {
                debug!(task_id = %task_id, "Pushing completion upstream");
                feed.push_task_completion(task_id, completed_at)
                    .map_err(|e| e.to_string())
            }
        });
        let remote_ref: Option<&RemoteSync<'_>> = remote.as_ref().map(|f| f as &RemoteSync<'_>);

        let outcome: CompletionOutcome = persistence
            .complete_task(&completion, remote_ref)
            .map_err(translate_completion_error)?;

        info!(
            location = %settings.id,
            room_id = %completion.room_id,
            completion_id = outcome.completion_id,
            synced_upstream,
            "Completed task"
        );

        let message: String = format!(
            "'{}' completed in room {} by {}",
            completion.description, completion.room_id, outcome.completed_by
        );
        Ok(CompleteTaskResponse {
            completion_id: outcome.completion_id,
            room_id: completion.room_id,
            task_key: completion.task_key,
            service_date,
            completed_by: outcome.completed_by,
            completed_at: outcome.completed_at,
            synced_upstream,
            message,
        })
    }

    /// Returns completions recorded since the client's checkpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the location is unknown or the ledger cannot be
    /// read.
    pub fn poll_updates(
        &self,
        persistence: &mut Persistence,
        location_id: &str,
        request: &PollUpdatesRequest,
    ) -> Result<PollUpdatesResponse, ApiError> {
        let settings: &LocationSettings = self.location(location_id)?;
        let service_date: Date = Self::service_date(settings, request.service_date)?;
        let records: Vec<TaskCompletionRecord> = persistence
            .completions_since(&settings.id, service_date, request.checkpoint)
            .map_err(|e| translate_persistence_error(&e))?;

        let batch: SyncBatch =
            SyncBatch::new(summaries(&records), request.checkpoint, Timestamp::now());
        debug!(
            location = %settings.id,
            service_date = %service_date,
            completions = batch.completions.len(),
            next_checkpoint = %batch.next_checkpoint,
            "Polled completions"
        );

        Ok(PollUpdatesResponse {
            service_date,
            completions: batch.completions,
            next_checkpoint: batch.next_checkpoint,
        })
    }

    /// Records a linen delivery or collection in the activity log.
    ///
    /// # Errors
    ///
    /// Returns an error if the submission has no positive item counts or
    /// the room is invalid.
    pub fn record_linen_submission(
        &self,
        persistence: &mut Persistence,
        location_id: &str,
        request: LinenSubmissionRequest,
    ) -> Result<ActivityRecordedResponse, ApiError> {
        let settings: &LocationSettings = self.location(location_id)?;
        let service_date: Date = Self::service_date(settings, request.service_date)?;
        let room_id: RoomId = RoomId::new(&request.room_id).map_err(translate_domain_error)?;
        if request.submitted_by_id.trim().is_empty() {
            return Err(ApiError::InvalidInput {
                field: String::from("submitted_by_id"),
                message: String::from("Submitting user cannot be empty"),
            });
        }
        let event: ActivityEvent =
            ActivityEvent::linen(request.items).map_err(translate_audit_error)?;

        let entry: ActivityEntry = ActivityEntry::new(
            settings.id.clone(),
            room_id,
            event,
            Actor::new(request.submitted_by_id, request.submitted_by_name),
            service_date,
            request.booking_ref,
        );
        let activity_id: i64 = persistence
            .record_activity(&entry)
            .map_err(|e| translate_persistence_error(&e))?;

        info!(
            location = %settings.id,
            room_id = %entry.room_id,
            activity_id,
            "Recorded linen submission"
        );
        Ok(ActivityRecordedResponse {
            activity_id,
            message: format!("Linen submission recorded for room {}", entry.room_id),
        })
    }

    /// Lists the activity log of a location and service date.
    ///
    /// # Errors
    ///
    /// Returns an error if the location is unknown or the log cannot be read.
    pub fn list_activity(
        &self,
        persistence: &mut Persistence,
        location_id: &str,
        date: Option<Date>,
    ) -> Result<ActivityListResponse, ApiError> {
        let settings: &LocationSettings = self.location(location_id)?;
        let service_date: Date = Self::service_date(settings, date)?;
        let entries: Vec<ActivityLogRecord> = persistence
            .activity_for_date(&settings.id, service_date)
            .map_err(|e| translate_persistence_error(&e))?;

        Ok(ActivityListResponse {
            location_id: settings.id.clone(),
            service_date,
            entries,
        })
    }

    /// Lists every completion of a location and service date.
    ///
    /// # Errors
    ///
    /// Returns an error if the location is unknown or the ledger cannot be
    /// read.
    pub fn list_completions(
        &self,
        persistence: &mut Persistence,
        location_id: &str,
        date: Option<Date>,
    ) -> Result<CompletionListResponse, ApiError> {
        let settings: &LocationSettings = self.location(location_id)?;
        let service_date: Date = Self::service_date(settings, date)?;
        let completions: Vec<TaskCompletionRecord> = persistence
            .completions_for_date(&settings.id, service_date)
            .map_err(|e| translate_persistence_error(&e))?;
        Ok(CompletionListResponse { completions })
    }

    /// Lists the completions recorded by one staff member, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the staff identifier is blank or the ledger
    /// cannot be read.
    pub fn list_completions_by_completer(
        &self,
        persistence: &mut Persistence,
        completed_by_id: &str,
    ) -> Result<CompletionListResponse, ApiError> {
        let completed_by_id: &str = completed_by_id.trim();
        if completed_by_id.is_empty() {
            return Err(ApiError::InvalidInput {
                field: String::from("completed_by_id"),
                message: String::from("Completing user cannot be empty"),
            });
        }
        let completions: Vec<TaskCompletionRecord> = persistence
            .completions_by_completer(completed_by_id)
            .map_err(|e| translate_persistence_error(&e))?;
        Ok(CompletionListResponse { completions })
    }

    /// Deletes activity log entries older than the retention window.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be written.
    pub fn purge_activity_log(
        &self,
        persistence: &mut Persistence,
        now: Timestamp,
    ) -> Result<PurgeActivityResponse, ApiError> {
        let cutoff: Timestamp = retention_cutoff(now);
        let deleted: usize = persistence
            .purge_activity_before(cutoff)
            .map_err(|e| translate_persistence_error(&e))?;
        Ok(PurgeActivityResponse { deleted, cutoff })
    }
}
