// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    create_completion_for, create_test_actor, create_test_completion, create_test_persistence,
    date,
};
use crate::{
    ActivityLogRecord, CompletionError, CompletionKey, CompletionOutcome, Persistence,
    TaskCompletionRecord,
};
use roomboard::NewTaskCompletion;
use roomboard_audit::{ActivityEvent, Actor};
use roomboard_domain::Timestamp;
use std::cell::Cell;

#[test]
fn test_first_completion_is_recorded() {
    let mut persistence: Persistence = create_test_persistence();
    let anna: Actor = create_test_actor("anna", "Anna");
    let completion: NewTaskCompletion = create_test_completion(&anna);

    let outcome: CompletionOutcome = persistence.complete_task(&completion, None).unwrap();
    assert_eq!(outcome.completed_by, "Anna");

    let stored: TaskCompletionRecord = persistence
        .find_completion(&CompletionKey::for_completion(&completion))
        .unwrap()
        .unwrap();
    assert_eq!(stored.completion_id, outcome.completion_id);
    assert_eq!(stored.completed_at, outcome.completed_at);
    assert_eq!(stored.task_key, "desc:change linen");
    assert_eq!(stored.booking_ref.as_deref(), Some("B-5"));
    assert_eq!(stored.completed_by, anna);
}

#[test]
fn test_second_completion_reports_the_first_completer() {
    let mut persistence: Persistence = create_test_persistence();
    let anna: Actor = create_test_actor("anna", "Anna");
    let ben: Actor = create_test_actor("ben", "Ben");

    let first: CompletionOutcome = persistence
        .complete_task(&create_test_completion(&anna), None)
        .unwrap();
    let second: Result<CompletionOutcome, CompletionError> =
        persistence.complete_task(&create_test_completion(&ben), None);

    assert_eq!(
        second,
        Err(CompletionError::AlreadyCompleted {
            completion_id: first.completion_id,
            completed_by: String::from("Anna"),
            completed_at: first.completed_at,
        })
    );
    assert_eq!(
        persistence
            .completions_for_date("harbour", date("2024-02-01"))
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_cosmetic_description_changes_do_not_bypass_uniqueness() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .complete_task(&create_completion_for("5", "Change Linen", "2024-02-01"), None)
        .unwrap();

    let again: Result<CompletionOutcome, CompletionError> = persistence.complete_task(
        &create_completion_for("5", "  change   LINEN ", "2024-02-01"),
        None,
    );
    assert!(matches!(again, Err(CompletionError::AlreadyCompleted { .. })));
}

#[test]
fn test_same_task_on_another_date_or_room_is_independent() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .complete_task(&create_completion_for("5", "Change Linen", "2024-02-01"), None)
        .unwrap();

    assert!(persistence
        .complete_task(&create_completion_for("5", "Change Linen", "2024-02-02"), None)
        .is_ok());
    assert!(persistence
        .complete_task(&create_completion_for("6", "Change Linen", "2024-02-01"), None)
        .is_ok());
}

#[test]
fn test_remote_failure_rolls_back_everything() {
    let mut persistence: Persistence = create_test_persistence();
    let completion: NewTaskCompletion = create_test_completion(&create_test_actor("anna", "Anna"));
    let failing = |_: Timestamp| -> Result<bool, String> { Err(String::from("timed out")) };

    let result: Result<CompletionOutcome, CompletionError> =
        persistence.complete_task(&completion, Some(&failing));

    assert_eq!(
        result,
        Err(CompletionError::RemoteSyncFailed {
            reason: String::from("timed out")
        })
    );
    assert!(persistence
        .find_completion(&CompletionKey::for_completion(&completion))
        .unwrap()
        .is_none());
    let activity: Vec<ActivityLogRecord> = persistence
        .activity_for_date("harbour", date("2024-02-01"))
        .unwrap();
    assert!(activity.is_empty());
}

#[test]
fn test_remote_refusal_rolls_back_and_allows_retry() {
    let mut persistence: Persistence = create_test_persistence();
    let completion: NewTaskCompletion = create_test_completion(&create_test_actor("anna", "Anna"));
    let refusing = |_: Timestamp| -> Result<bool, String> { Ok(false) };
    let accepting = |_: Timestamp| -> Result<bool, String> { Ok(true) };

    let refused: Result<CompletionOutcome, CompletionError> =
        persistence.complete_task(&completion, Some(&refusing));
    assert!(matches!(refused, Err(CompletionError::RemoteSyncFailed { .. })));

    let retried: Result<CompletionOutcome, CompletionError> =
        persistence.complete_task(&completion, Some(&accepting));
    assert!(retried.is_ok());
}

#[test]
fn test_remote_push_receives_the_recorded_timestamp() {
    let mut persistence: Persistence = create_test_persistence();
    let completion: NewTaskCompletion = create_test_completion(&create_test_actor("anna", "Anna"));
    let pushed_at: Cell<Option<Timestamp>> = Cell::new(None);
    let recording = |at: Timestamp| -> Result<bool, String> {
        pushed_at.set(Some(at));
        Ok(true)
    };

    let outcome: CompletionOutcome = persistence
        .complete_task(&completion, Some(&recording))
        .unwrap();

    assert_eq!(pushed_at.get(), Some(outcome.completed_at));
}

#[test]
fn test_duplicate_is_detected_before_the_remote_push() {
    let mut persistence: Persistence = create_test_persistence();
    let completion: NewTaskCompletion = create_test_completion(&create_test_actor("anna", "Anna"));
    persistence.complete_task(&completion, None).unwrap();

    let pushes: Cell<u32> = Cell::new(0);
    let counting = |_: Timestamp| -> Result<bool, String> {
        pushes.set(pushes.get() + 1);
        Ok(true)
    };
    let again: Result<CompletionOutcome, CompletionError> =
        persistence.complete_task(&completion, Some(&counting));

    assert!(matches!(again, Err(CompletionError::AlreadyCompleted { .. })));
    assert_eq!(pushes.get(), 0);
}

#[test]
fn test_completion_writes_an_activity_entry() {
    let mut persistence: Persistence = create_test_persistence();
    let anna: Actor = create_test_actor("anna", "Anna");
    let outcome: CompletionOutcome = persistence
        .complete_task(&create_test_completion(&anna), None)
        .unwrap();

    let activity: Vec<ActivityLogRecord> = persistence
        .activity_for_date("harbour", date("2024-02-01"))
        .unwrap();
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0].entry.actor, anna);
    assert_eq!(activity[0].entry.recorded_at, outcome.completed_at);
    assert_eq!(
        activity[0].entry.event,
        ActivityEvent::TaskCompleted {
            completion_id: outcome.completion_id,
            description: String::from("Change Linen"),
        }
    );
}

#[test]
fn test_completions_by_completer_are_newest_first() {
    let mut persistence: Persistence = create_test_persistence();
    let first: CompletionOutcome = persistence
        .complete_task(&create_completion_for("1", "Vacuum", "2024-02-01"), None)
        .unwrap();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let second: CompletionOutcome = persistence
        .complete_task(&create_completion_for("2", "Vacuum", "2024-02-01"), None)
        .unwrap();

    let records: Vec<TaskCompletionRecord> = persistence.completions_by_completer("anna").unwrap();
    let ids: Vec<i64> = records.iter().map(|r| r.completion_id).collect();
    assert_eq!(ids, vec![second.completion_id, first.completion_id]);
    assert!(persistence.completions_by_completer("ben").unwrap().is_empty());
}
