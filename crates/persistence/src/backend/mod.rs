// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! This module isolates backend-specific initialization, migration,
//! locking and helper functions that cannot be expressed in
//! backend-agnostic Diesel DSL.
//!
//! ## Backend Support
//!
//! - `sqlite`: `SQLite` backend (default)
//! - `mysql`: MySQL/MariaDB backend, behind the `mysql` cargo feature
//!
//! ## Locking
//!
//! A task completion checks for an existing row and inserts its own in
//! one transaction that must exclude concurrent completions of the same
//! task. The backends get there differently:
//!
//! - `SQLite` opens the transaction with `BEGIN IMMEDIATE`, taking the
//!   database write lock before the check
//! - `MySQL` reads the key with `SELECT ... FOR UPDATE`, which also
//!   gap-locks an absent key under `InnoDB`
//!
//! In both cases the unique index on the completion key is the final
//! arbiter.

#[cfg(feature = "mysql")]
pub mod mysql;
pub mod sqlite;

#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::{Connection, SqliteConnection};

use crate::data_models::{CompletionKey, TaskCompletionRow};
use crate::error::PersistenceError;

/// Trait for backend-specific operations.
///
/// This trait is implemented for both `SqliteConnection` and `MysqlConnection`,
/// allowing query and mutation functions to share a single body while the
/// backend-specific parts live here.
pub trait PersistenceBackend: Connection {
    /// Retrieves the last inserted row ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;

    /// Runs `f` inside a transaction that excludes concurrent writers of
    /// the rows it reads through [`Self::find_completion_for_update`].
    ///
    /// The transaction commits if `f` returns `Ok` and rolls back otherwise.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`, or a database error.
    fn locked_transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<diesel::result::Error>;

    /// Looks up a completion by key, locking it for the rest of the
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_completion_for_update(
        &mut self,
        key: &CompletionKey,
    ) -> Result<Option<TaskCompletionRow>, PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }

    fn locked_transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<diesel::result::Error>,
    {
        self.immediate_transaction(f)
    }

    fn find_completion_for_update(
        &mut self,
        key: &CompletionKey,
    ) -> Result<Option<TaskCompletionRow>, PersistenceError> {
        sqlite::find_completion_for_update(self, key)
    }
}

#[cfg(feature = "mysql")]
impl PersistenceBackend for MysqlConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        mysql::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        mysql::verify_foreign_key_enforcement(self)
    }

    fn locked_transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<diesel::result::Error>,
    {
        self.transaction(f)
    }

    fn find_completion_for_update(
        &mut self,
        key: &CompletionKey,
    ) -> Result<Option<TaskCompletionRow>, PersistenceError> {
        mysql::find_completion_for_update(self, key)
    }
}
