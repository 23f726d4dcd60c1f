// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! ## Module Organization
//!
//! - `completions`: The transactional task completion
//! - `activity`: Activity log inserts and the retention purge
//!
//! Backend-specific helpers (`get_last_insert_rowid()`, the locked
//! transaction and the locked completion lookup) come from the `backend`
//! module through the `PersistenceBackend` trait.

pub mod activity;
pub mod completions;

#[cfg(feature = "mysql")]
pub use activity::{insert_activity_mysql, purge_activity_before_mysql};
pub use activity::{insert_activity_sqlite, purge_activity_before_sqlite};
#[cfg(feature = "mysql")]
pub use completions::complete_task_mysql;
pub use completions::{RemoteSync, complete_task_sqlite};
