// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rule validation for case creation and assignment.

use crate::error::DomainError;
use crate::types::{CaseStatus, SpecialtyId, UserId};

/// Every case is staffed by exactly this many lawyers.
pub const REQUIRED_ASSIGNEES_COUNT: usize = 2;

/// Minimum length of a direct-assignment justification.
pub const MIN_JUSTIFICATION_LEN: usize = 10;

/// Returns how many direct assignees the creator must name.
///
/// A participating creator takes one of the two seats, leaving one to fill.
#[must_use]
pub const fn required_direct_count(creator_participates: bool) -> usize {
    if creator_participates {
        REQUIRED_ASSIGNEES_COUNT - 1
    } else {
        REQUIRED_ASSIGNEES_COUNT
    }
}

/// Resolves the case status the invariant demands for a confirmed count.
#[must_use]
pub const fn resolve_case_status(confirmed_count: usize, required_count: usize) -> CaseStatus {
    if confirmed_count >= required_count {
        CaseStatus::Assigned
    } else {
        CaseStatus::Draft
    }
}

/// Validates the always-required case fields.
///
/// # Errors
///
/// Returns `DomainError::MissingField` naming the first empty field.
pub fn validate_case_fields(
    caratula_tentativa: &str,
    specialty_id: &SpecialtyId,
    objeto: &str,
    resumen: &str,
) -> Result<(), DomainError> {
    if caratula_tentativa.trim().is_empty() {
        return Err(DomainError::MissingField("caratula_tentativa"));
    }
    if specialty_id.is_empty() {
        return Err(DomainError::MissingField("specialty_id"));
    }
    if objeto.trim().is_empty() {
        return Err(DomainError::MissingField("objeto"));
    }
    if resumen.trim().is_empty() {
        return Err(DomainError::MissingField("resumen"));
    }
    Ok(())
}

/// Validates a direct-assignment justification.
///
/// # Errors
///
/// Returns `DomainError::JustificationTooShort` if under the minimum length.
pub fn validate_justification(justification: &str) -> Result<(), DomainError> {
    let supplied = justification.trim().chars().count();
    if supplied < MIN_JUSTIFICATION_LEN {
        return Err(DomainError::JustificationTooShort {
            minimum: MIN_JUSTIFICATION_LEN,
            supplied,
        });
    }
    Ok(())
}

/// Validates a direct assignment request.
///
/// The assignee list must already be deduplicated by the caller; the count
/// rule is checked against the deduplicated list.
///
/// # Errors
///
/// Returns an error if:
/// - The assignee count differs from what the participation flag requires
/// - The justification is shorter than `MIN_JUSTIFICATION_LEN`
/// - The creator appears in the assignee list
pub fn validate_direct_assignment(
    creator_uid: &UserId,
    creator_participates: bool,
    assignees: &[UserId],
    justification: &str,
) -> Result<(), DomainError> {
    let required = required_direct_count(creator_participates);
    if assignees.len() != required {
        return Err(DomainError::WrongDirectAssigneeCount {
            required,
            supplied: assignees.len(),
        });
    }
    validate_justification(justification)?;
    if assignees.contains(creator_uid) {
        return Err(DomainError::SelfInvite);
    }
    Ok(())
}
