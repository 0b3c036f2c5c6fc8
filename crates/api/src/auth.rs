// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller resolution and role-based authorization.
//!
//! The transport is trusted to deliver a truthful `caller_uid`; resolving
//! it against the directory yields the caller's role. Authentication
//! mechanics (tokens, sessions) live outside this system.

use causalex_domain::{Role, UserId};
use causalex_persistence::Persistence;

use crate::error::{ApiError, translate_persistence_error};

/// A resolved caller with their directory role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedCaller {
    /// The caller's directory identifier.
    pub uid: UserId,
    /// The caller's role.
    pub role: Role,
}

impl AuthenticatedCaller {
    /// Creates a resolved caller.
    #[must_use]
    pub const fn new(uid: UserId, role: Role) -> Self {
        Self { uid, role }
    }
}

/// Resolves a trusted caller uid against the lawyer directory.
///
/// # Errors
///
/// Returns `ApiError::Unauthenticated` if the uid is empty, and
/// `ApiError::FailedPrecondition` if the uid is present but has no
/// directory profile. The latter is an identified caller whose account
/// is missing, which is a state conflict rather than a credential
/// failure.
pub fn resolve_caller(
    persistence: &mut Persistence,
    caller_uid: &str,
) -> Result<AuthenticatedCaller, ApiError> {
    if caller_uid.trim().is_empty() {
        return Err(ApiError::Unauthenticated {
            reason: String::from("caller_uid cannot be empty"),
        });
    }

    let lawyer = persistence
        .get_lawyer(caller_uid)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::FailedPrecondition {
            message: format!("No directory profile for caller '{caller_uid}'"),
        })?;

    Ok(AuthenticatedCaller::new(lawyer.uid, lawyer.role))
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that a caller may manage the lawyer directory and the
    /// specialty catalog.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::PermissionDenied` if the caller is not an
    /// admin.
    pub fn authorize_directory_admin(
        caller: &AuthenticatedCaller,
        action: &str,
    ) -> Result<(), ApiError> {
        match caller.role {
            Role::Admin => Ok(()),
            Role::Lawyer => Err(ApiError::PermissionDenied {
                action: action.to_string(),
                required_role: String::from("admin"),
            }),
        }
    }
}
