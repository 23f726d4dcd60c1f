// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic query modules.
//!
//! ## Module Organization
//!
//! - `completions`: Ledger lookups, the sync poll and reporting reads
//! - `activity`: Activity log reads

pub mod activity;
pub mod completions;

#[cfg(feature = "mysql")]
pub use activity::activity_for_date_mysql;
pub use activity::activity_for_date_sqlite;
#[cfg(feature = "mysql")]
pub use completions::{
    completions_by_completer_mysql, completions_for_date_mysql, completions_since_mysql,
    find_completion_mysql,
};
pub use completions::{
    completions_by_completer_sqlite, completions_for_date_sqlite, completions_since_sqlite,
    find_completion_sqlite,
};
