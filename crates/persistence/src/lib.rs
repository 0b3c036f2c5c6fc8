// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Causalex assignment engine.
//!
//! This crate stores the lawyer directory, the specialty catalog, cases,
//! invitations, and the per-pool rotation cursors. It is built on Diesel
//! and supports multiple database backends.
//!
//! ## Database Backend Support
//!
//! - **`SQLite`** (default) — Used for development, unit tests, and
//!   integration tests. Always available, requires no infrastructure.
//! - **`MariaDB`/`MySQL`** — Compiled by default, validated via explicit
//!   opt-in tests marked `#[ignore]`. See the `backend::mysql` module.
//!
//! Due to `SQL` syntax differences between backends, we maintain separate
//! migration directories (`migrations/` for `SQLite`, `migrations_mysql/`
//! for `MySQL`). Both produce identical schema semantics.
//!
//! ## Transaction Discipline
//!
//! The two engine operations, case creation and invitation response, run
//! entirely inside one database transaction each: candidate pools, the
//! rotation cursor, and the invitation set are read on the transaction
//! connection, the pure planning code in the `causalex` crate computes the
//! write set, and the writes land on the same connection. An error at any
//! point (including an exhausted replacement pool) rolls everything back.
//!
//! ## Testing Philosophy
//!
//! - Standard tests (`cargo test`) run against `SQLite` only
//! - Backend validation tests are explicitly marked `#[ignore]`
//! - External database tests never run automatically

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use causalex::CreateCaseCommand;
use causalex_domain::{Case, Decision, Invitation, Lawyer, UserId};
use diesel::{MysqlConnection, SqliteConnection};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Macro to generate monomorphic backend-specific query/mutation functions.
///
/// This macro generates two separate functions from a single function body:
/// - One suffixed with `_sqlite` taking `&mut SqliteConnection`
/// - One suffixed with `_mysql` taking `&mut MysqlConnection`
///
/// This approach is required because Diesel's type system requires concrete
/// backend types at compile time and cannot handle generic backend
/// functions.
///
/// # Constraints
///
/// - The macro ONLY duplicates function bodies and substitutes connection
///   types
/// - No logic, branching, or dispatch occurs within the macro
/// - Backend dispatch happens exclusively in the Persistence adapter
/// - The generated functions are completely monomorphic
macro_rules! backend_fn {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident (
            $conn:ident : &mut _
            $(, $param:ident : $param_ty:ty)* $(,)?
        ) -> $ret:ty
        $body:block
    ) => {
        pastey::paste! {
            // Generate SQLite version
            $(#[$meta])*
            $vis fn [<$name _sqlite>] (
                $conn: &mut SqliteConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body

            // Generate MySQL version
            $(#[$meta])*
            $vis fn [<$name _mysql>] (
                $conn: &mut MysqlConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body
        }
    };
}

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{CreatedCase, InviteResponse, LawyerCredentials, SpecialtyData};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Internal enum for backend-specific database connections.
///
/// This enum allows the persistence adapter to work with either `SQLite`
/// or `MySQL` backends while maintaining a single public API.
pub enum BackendConnection {
    Sqlite(SqliteConnection),
    Mysql(MysqlConnection),
}

/// Persistence adapter for the assignment engine.
///
/// This adapter is backend-agnostic and works with both `SQLite` and
/// `MySQL`/`MariaDB`. Backend selection happens once at construction time
/// and is transparent to callers.
pub struct Persistence {
    pub(crate) conn: BackendConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based
    /// collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests
        // are isolated. Use atomic counter instead of timestamp to
        // eliminate race conditions.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // WAL mode for better read concurrency on file databases.
        backend::sqlite::enable_wal_mode(&mut conn)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Creates a new persistence adapter with a `MySQL`/`MariaDB`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_mysql(database_url: &str) -> Result<Self, PersistenceError> {
        let mut conn: MysqlConnection = backend::mysql::initialize_database(database_url)?;

        backend::mysql::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Mysql(conn),
        })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => conn.verify_foreign_key_enforcement(),
            BackendConnection::Mysql(conn) => conn.verify_foreign_key_enforcement(),
        }
    }

    // ========================================================================
    // Engine Operations
    // ========================================================================

    /// Creates a case with its initial invitations, atomically.
    ///
    /// In auto mode the invitees come from the specialty rotation pool and
    /// the pool cursor advances in the same transaction. In direct mode
    /// the named assignees are invited with email snapshots read in the
    /// same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is invalid, the specialty is
    /// unknown, a named assignee is missing, the rotation pool cannot
    /// staff the case, or a write fails.
    pub fn create_case(
        &mut self,
        command: &CreateCaseCommand,
    ) -> Result<CreatedCase, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::assignment::create_case_sqlite(conn, command),
            BackendConnection::Mysql(conn) => mutations::assignment::create_case_mysql(conn, command),
        }
    }

    /// Applies a lawyer's answer to a pending invitation, atomically.
    ///
    /// An acceptance confirms the responder and may close the case; a
    /// rejection with open capacity issues exactly one replacement
    /// invitation from the matching rotation pool. An exhausted
    /// replacement pool aborts the whole transaction, leaving the
    /// invitation pending.
    ///
    /// # Errors
    ///
    /// Returns an error if the case or invitation is missing, the caller
    /// is not the invitee, the invitation already settled, the
    /// replacement pool is exhausted, or a write fails.
    pub fn respond_to_invite(
        &mut self,
        case_id: i64,
        invite_id: i64,
        responder: &UserId,
        decision: Decision,
    ) -> Result<InviteResponse, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::assignment::respond_to_invite_sqlite(
                conn, case_id, invite_id, responder, decision,
            ),
            BackendConnection::Mysql(conn) => mutations::assignment::respond_to_invite_mysql(
                conn, case_id, invite_id, responder, decision,
            ),
        }
    }

    // ========================================================================
    // Case & Invitation Queries
    // ========================================================================

    /// Retrieves a case with its confirmed assignee set.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::CaseNotFound` if the case does not
    /// exist.
    pub fn get_case(&mut self, case_id: i64) -> Result<Case, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::cases::get_case_sqlite(conn, case_id),
            BackendConnection::Mysql(conn) => queries::cases::get_case_mysql(conn, case_id),
        }
    }

    /// Every invitation ever written for a case, in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_invites_for_case(
        &mut self,
        case_id: i64,
    ) -> Result<Vec<Invitation>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::cases::list_invites_for_case_sqlite(conn, case_id)
            }
            BackendConnection::Mysql(conn) => {
                queries::cases::list_invites_for_case_mysql(conn, case_id)
            }
        }
    }

    /// Cases a lawyer created or is confirmed on, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_cases_for_lawyer(&mut self, uid: &str) -> Result<Vec<Case>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::cases::list_cases_for_lawyer_sqlite(conn, uid)
            }
            BackendConnection::Mysql(conn) => queries::cases::list_cases_for_lawyer_mysql(conn, uid),
        }
    }

    /// Pending invitations addressed to a lawyer, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_pending_invites(&mut self, uid: &str) -> Result<Vec<Invitation>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::cases::list_pending_invites_sqlite(conn, uid)
            }
            BackendConnection::Mysql(conn) => queries::cases::list_pending_invites_mysql(conn, uid),
        }
    }

    /// The stored rotation cursor for a pool (zero when never advanced).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn rotation_cursor(&mut self, pool_key: &str) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::rotation::get_cursor_sqlite(conn, pool_key),
            BackendConnection::Mysql(conn) => queries::rotation::get_cursor_mysql(conn, pool_key),
        }
    }

    // ========================================================================
    // Directory
    // ========================================================================

    /// Creates a new lawyer account with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns an error if the uid is taken or the account cannot be
    /// created.
    pub fn create_lawyer(
        &mut self,
        uid: &str,
        email: &str,
        role: &str,
        is_practicing: bool,
        password: &str,
        specialties: &[String],
    ) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::lawyers::create_lawyer_sqlite(
                conn,
                uid,
                email,
                role,
                is_practicing,
                password,
                specialties,
            ),
            BackendConnection::Mysql(conn) => mutations::lawyers::create_lawyer_mysql(
                conn,
                uid,
                email,
                role,
                is_practicing,
                password,
                specialties,
            ),
        }
    }

    /// Updates a lawyer's profile. Only the supplied fields change;
    /// passing specialties replaces the full specialty set.
    ///
    /// # Errors
    ///
    /// Returns an error if the lawyer does not exist or the update fails.
    pub fn update_lawyer_profile(
        &mut self,
        uid: &str,
        email: Option<&str>,
        is_practicing: Option<bool>,
        specialties: Option<&[String]>,
    ) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::lawyers::update_lawyer_profile_sqlite(
                conn,
                uid,
                email,
                is_practicing,
                specialties,
            ),
            BackendConnection::Mysql(conn) => mutations::lawyers::update_lawyer_profile_mysql(
                conn,
                uid,
                email,
                is_practicing,
                specialties,
            ),
        }
    }

    /// Updates a lawyer's password.
    ///
    /// # Errors
    ///
    /// Returns an error if the lawyer does not exist or the update fails.
    pub fn set_lawyer_password(
        &mut self,
        uid: &str,
        new_password: &str,
    ) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::lawyers::set_lawyer_password_sqlite(conn, uid, new_password)
            }
            BackendConnection::Mysql(conn) => {
                mutations::lawyers::set_lawyer_password_mysql(conn, uid, new_password)
            }
        }
    }

    /// Retrieves a lawyer profile by uid.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_lawyer(&mut self, uid: &str) -> Result<Option<Lawyer>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::lawyers::get_lawyer_sqlite(conn, uid),
            BackendConnection::Mysql(conn) => queries::lawyers::get_lawyer_mysql(conn, uid),
        }
    }

    /// Lists every lawyer in the directory, ordered by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_lawyers(&mut self) -> Result<Vec<Lawyer>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::lawyers::list_lawyers_sqlite(conn),
            BackendConnection::Mysql(conn) => queries::lawyers::list_lawyers_mysql(conn),
        }
    }

    /// Lists practicing lawyers, ordered by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_practicing_lawyers(&mut self) -> Result<Vec<Lawyer>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::lawyers::list_practicing_lawyers_sqlite(conn)
            }
            BackendConnection::Mysql(conn) => queries::lawyers::list_practicing_lawyers_mysql(conn),
        }
    }

    /// Retrieves stored credentials for a lawyer account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_credentials(
        &mut self,
        uid: &str,
    ) -> Result<Option<LawyerCredentials>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::lawyers::get_credentials_sqlite(conn, uid),
            BackendConnection::Mysql(conn) => queries::lawyers::get_credentials_mysql(conn, uid),
        }
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if password verification fails.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::lawyers::verify_password(password, password_hash)
    }

    // ========================================================================
    // Specialties
    // ========================================================================

    /// Creates a new specialty.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is taken or the insert fails.
    pub fn create_specialty(
        &mut self,
        specialty_id: &str,
        name: &str,
    ) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::specialties::create_specialty_sqlite(conn, specialty_id, name)
            }
            BackendConnection::Mysql(conn) => {
                mutations::specialties::create_specialty_mysql(conn, specialty_id, name)
            }
        }
    }

    /// Lists every specialty in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_specialties(&mut self) -> Result<Vec<SpecialtyData>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::specialties::list_specialties_sqlite(conn),
            BackendConnection::Mysql(conn) => queries::specialties::list_specialties_mysql(conn),
        }
    }
}
