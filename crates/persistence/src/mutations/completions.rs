// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The transactional task completion.
//!
//! A completion walks `Start → UniquenessCheck → Persist → RemoteSync →
//! Commit` inside one locked transaction. Any failure rolls the whole
//! transaction back, so a task is never recorded locally while the
//! upstream system disagrees.

#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use diesel::prelude::*;
use roomboard::{CompletionStage, NewTaskCompletion};
use roomboard_audit::ActivityEvent;
use roomboard_domain::Timestamp;
use tracing::{debug, error, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{CompletionKey, CompletionOutcome, TaskCompletionRow};
use crate::diesel_schema::{activity_log, task_completions};
use crate::error::{CompletionError, PersistenceError};

/// Pushes a completion upstream.
///
/// Called with the completion timestamp while the local transaction is
/// still open. `Ok(false)` means the upstream system refused the update.
pub type RemoteSync<'a> = dyn Fn(Timestamp) -> Result<bool, String> + 'a;

const fn advance(stage: CompletionStage, remote_sync: bool) -> CompletionStage {
    match stage.next(remote_sync) {
        Some(next) => next,
        None => CompletionStage::Abort,
    }
}

fn already_completed(existing: TaskCompletionRow) -> Result<CompletionError, PersistenceError> {
    let completed_at: Timestamp = Timestamp::parse(&existing.completed_at)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
    Ok(CompletionError::AlreadyCompleted {
        completion_id: existing.completion_id,
        completed_by: existing.completed_by_name,
        completed_at,
    })
}

backend_fn! {
/// Records a task completion at most once per task, room and service date.
///
/// The existing-completion check and the insert share one locked
/// transaction. When `remote` is given it runs after the insert; an
/// error or a `false` result rolls the insert back.
///
/// A writer that slips past the check is stopped by the unique index,
/// and reported the same way as a hit on the check.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `completion` - The validated completion
/// * `remote` - The upstream push, for tasks that must be propagated
///
/// # Errors
///
/// Returns `CompletionError::AlreadyCompleted` if the task is already
/// done, `CompletionError::RemoteSyncFailed` if the upstream push failed,
/// or a persistence error.
pub fn complete_task(
    conn: &mut _,
    completion: &NewTaskCompletion,
    remote: Option<&RemoteSync<'_>>,
) -> Result<CompletionOutcome, CompletionError> {
    let key: CompletionKey = CompletionKey::for_completion(completion);
    let completed_at: Timestamp = Timestamp::now();
    let remote_sync: bool = remote.is_some();
    let mut stage: CompletionStage = CompletionStage::Start;

    debug!(
        location = %key.location_id,
        room_id = %key.room_id,
        task_key = %key.task_key,
        service_date = %key.service_date,
        stage = %stage,
        "Completing task"
    );

    let result: Result<i64, CompletionError> = conn.locked_transaction(|conn| {
        stage = advance(stage, remote_sync);
        if let Some(existing) = conn.find_completion_for_update(&key)? {
            return Err(already_completed(existing)?);
        }

        stage = advance(stage, remote_sync);
        diesel::insert_into(task_completions::table)
            .values((
                task_completions::location_id.eq(&key.location_id),
                task_completions::room_id.eq(&key.room_id),
                task_completions::task_id.eq(completion.task_id.as_deref()),
                task_completions::task_type.eq(completion.task_type.as_deref()),
                task_completions::task_key.eq(&key.task_key),
                task_completions::description.eq(&completion.description),
                task_completions::completed_by_id.eq(&completion.completed_by.id),
                task_completions::completed_by_name.eq(&completion.completed_by.display_name),
                task_completions::completed_at.eq(completed_at.to_storage_string()),
                task_completions::booking_ref.eq(completion.booking_ref.as_deref()),
                task_completions::service_date.eq(&key.service_date),
            ))
            .execute(conn)?;
        let completion_id: i64 = conn.get_last_insert_rowid()?;

        let event: ActivityEvent = ActivityEvent::TaskCompleted {
            completion_id,
            description: completion.description.clone(),
        };
        let (event_type, payload): (String, String) = event
            .to_parts()
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        diesel::insert_into(activity_log::table)
            .values((
                activity_log::location_id.eq(&key.location_id),
                activity_log::room_id.eq(&key.room_id),
                activity_log::event_type.eq(&event_type),
                activity_log::payload.eq(&payload),
                activity_log::actor_id.eq(&completion.completed_by.id),
                activity_log::actor_name.eq(&completion.completed_by.display_name),
                activity_log::recorded_at.eq(completed_at.to_storage_string()),
                activity_log::service_date.eq(&key.service_date),
                activity_log::booking_ref.eq(completion.booking_ref.as_deref()),
            ))
            .execute(conn)?;

        if let Some(remote) = remote {
            stage = advance(stage, remote_sync);
            match remote(completed_at) {
                Ok(true) => {}
                Ok(false) => {
                    return Err(CompletionError::RemoteSyncFailed {
                        reason: String::from("the upstream system refused the update"),
                    });
                }
                Err(reason) => return Err(CompletionError::RemoteSyncFailed { reason }),
            }
        }

        Ok(completion_id)
    });

    match result {
        Ok(completion_id) => {
            stage = advance(stage, remote_sync);
            info!(
                completion_id,
                location = %key.location_id,
                room_id = %key.room_id,
                task_key = %key.task_key,
                service_date = %key.service_date,
                stage = %stage,
                "Task completed"
            );
            Ok(CompletionOutcome {
                completion_id,
                completed_by: completion.completed_by.display_name.clone(),
                completed_at,
            })
        }
        Err(CompletionError::Persistence(PersistenceError::UniqueViolation(_))) => {
            // A concurrent writer committed the same key first
            let existing: Option<TaskCompletionRow> = conn.find_completion_for_update(&key)?;
            let winner: TaskCompletionRow = existing.ok_or_else(|| {
                PersistenceError::NotFound(format!(
                    "Completion for '{}' in room {} vanished after a unique violation",
                    key.task_key, key.room_id
                ))
            })?;
            info!(
                completion_id = winner.completion_id,
                room_id = %key.room_id,
                task_key = %key.task_key,
                "Task was completed concurrently"
            );
            Err(already_completed(winner)?)
        }
        Err(err @ CompletionError::AlreadyCompleted { .. }) => {
            info!(
                room_id = %key.room_id,
                task_key = %key.task_key,
                service_date = %key.service_date,
                "Task already completed"
            );
            Err(err)
        }
        Err(err) => {
            error!(
                location = %key.location_id,
                room_id = %key.room_id,
                task_key = %key.task_key,
                stage = %stage,
                error = %err,
                "Task completion aborted"
            );
            Err(err)
        }
    }
}
}
