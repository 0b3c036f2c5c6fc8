// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Every error a handler can return is one of the six `ApiError`
//! categories. Domain, engine, and persistence errors are translated
//! explicitly so that internal error shapes never leak across the
//! boundary.

use causalex::CoreError;
use causalex_domain::DomainError;
use causalex_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core/persistence errors and represent
/// the API contract. The server layer maps each category onto an HTTP
/// status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller could not be identified.
    Unauthenticated {
        /// The reason identification failed.
        reason: String,
    },
    /// The caller is identified but not allowed to perform the action.
    PermissionDenied {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidArgument {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The referenced resource does not exist.
    NotFound {
        /// The kind of resource that was looked up.
        resource: String,
        /// A human-readable description of the lookup.
        message: String,
    },
    /// The request was well-formed but the system state forbids it.
    FailedPrecondition {
        /// A human-readable description of the violated precondition.
        message: String,
    },
    /// An unexpected internal failure.
    Internal {
        /// A human-readable description of the failure.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated { reason } => {
                write!(f, "Unauthenticated: {reason}")
            }
            Self::PermissionDenied {
                action,
                required_role,
            } => {
                write!(
                    f,
                    "Permission denied: '{action}' requires {required_role} role"
                )
            }
            Self::InvalidArgument { field, message } => {
                write!(f, "Invalid argument for field '{field}': {message}")
            }
            Self::NotFound { resource, message } => {
                write!(f, "{resource} not found: {message}")
            }
            Self::FailedPrecondition { message } => {
                write!(f, "Failed precondition: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// Every domain error describes invalid input, so the whole enum maps to
/// `InvalidArgument` with the offending field named.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let field: &str = match &err {
        DomainError::MissingField(field) => field,
        DomainError::InvalidEmail(_) => "email",
        DomainError::InvalidRole(_) => "role",
        DomainError::InvalidJurisdiction(_) => "jurisdiccion",
        DomainError::InvalidAssignmentMode(_) => "assignment_mode",
        DomainError::InvalidCaseStatus(_) => "status",
        DomainError::InvalidInviteStatus(_) => "status",
        DomainError::InvalidDecision(_) => "decision",
        DomainError::WrongDirectAssigneeCount { .. } | DomainError::SelfInvite => {
            "direct_assignees_uids"
        }
        DomainError::JustificationTooShort { .. } => "direct_justification",
    };
    ApiError::InvalidArgument {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates an engine error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::InsufficientCandidates { .. } => ApiError::FailedPrecondition {
            message: err.to_string(),
        },
        CoreError::NotInvitee { .. } => ApiError::PermissionDenied {
            action: String::from("respond_to_invite"),
            required_role: String::from("invitee"),
        },
        CoreError::AlreadyResponded => ApiError::FailedPrecondition {
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::Engine(core_err) => translate_core_error(core_err),
        PersistenceError::CaseNotFound(case_id) => ApiError::NotFound {
            resource: String::from("Case"),
            message: format!("Case {case_id} does not exist"),
        },
        PersistenceError::InviteNotFound { case_id, invite_id } => ApiError::NotFound {
            resource: String::from("Invitation"),
            message: format!("Invitation {invite_id} does not exist on case {case_id}"),
        },
        PersistenceError::LawyerNotFound(uid) => ApiError::NotFound {
            resource: String::from("Lawyer"),
            message: format!("Lawyer '{uid}' does not exist"),
        },
        // A case naming an unknown specialty is a state conflict, not a
        // failed lookup: the resource being addressed is the case.
        PersistenceError::SpecialtyNotFound(specialty_id) => ApiError::FailedPrecondition {
            message: format!("Specialty '{specialty_id}' does not exist"),
        },
        PersistenceError::LawyerAlreadyExists(uid) => ApiError::FailedPrecondition {
            message: format!("Lawyer '{uid}' already exists"),
        },
        PersistenceError::SpecialtyAlreadyExists(specialty_id) => ApiError::FailedPrecondition {
            message: format!("Specialty '{specialty_id}' already exists"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
