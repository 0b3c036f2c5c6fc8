// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use causalex::CoreError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested lawyer was not found.
    LawyerNotFound(String),
    /// A lawyer with this uid already exists.
    LawyerAlreadyExists(String),
    /// The requested specialty was not found.
    SpecialtyNotFound(String),
    /// A specialty with this id already exists.
    SpecialtyAlreadyExists(String),
    /// The requested case was not found.
    CaseNotFound(i64),
    /// The requested invitation was not found on the case.
    InviteNotFound { case_id: i64, invite_id: i64 },
    /// The assignment engine refused the operation. The enclosing
    /// transaction has been rolled back.
    Engine(CoreError),
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::LawyerNotFound(uid) => write!(f, "Lawyer not found: {uid}"),
            Self::LawyerAlreadyExists(uid) => write!(f, "Lawyer already exists: {uid}"),
            Self::SpecialtyNotFound(id) => write!(f, "Specialty not found: {id}"),
            Self::SpecialtyAlreadyExists(id) => write!(f, "Specialty already exists: {id}"),
            Self::CaseNotFound(id) => write!(f, "Case not found: {id}"),
            Self::InviteNotFound { case_id, invite_id } => {
                write!(f, "Invite {invite_id} not found on case {case_id}")
            }
            Self::Engine(err) => write!(f, "{err}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<CoreError> for PersistenceError {
    fn from(err: CoreError) -> Self {
        Self::Engine(err)
    }
}
