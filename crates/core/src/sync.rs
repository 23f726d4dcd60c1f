// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::completion::CompletionSummary;
use roomboard_domain::Timestamp;
use serde::{Deserialize, Serialize};

/// Completions recorded since a client's checkpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncBatch {
    /// New completions, oldest first.
    pub completions: Vec<CompletionSummary>,
    /// The checkpoint to send with the next poll.
    pub next_checkpoint: Timestamp,
}

impl SyncBatch {
    /// Packages polled completions with the advanced checkpoint.
    #[must_use]
    pub fn new(completions: Vec<CompletionSummary>, checkpoint: Timestamp, now: Timestamp) -> Self {
        let newest: Option<Timestamp> = completions.iter().map(|c| c.completed_at).max();
        Self {
            next_checkpoint: next_checkpoint(checkpoint, now, newest),
            completions,
        }
    }
}

/// Advances a checkpoint. It never moves backward.
#[must_use]
pub fn next_checkpoint(
    checkpoint: Timestamp,
    now: Timestamp,
    newest: Option<Timestamp>,
) -> Timestamp {
    let floor: Timestamp = checkpoint.max(now);
    newest.map_or(floor, |newest| floor.max(newest))
}
