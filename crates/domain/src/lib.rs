// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use types::{
    AssignmentMode, Case, CaseId, CaseStatus, Decision, Email, InviteId, InviteStatus, Invitation,
    Jurisdiction, Lawyer, PoolId, Role, SpecialtyId, UserId,
};
pub use validation::{
    MIN_JUSTIFICATION_LEN, REQUIRED_ASSIGNEES_COUNT, required_direct_count, resolve_case_status,
    validate_case_fields, validate_direct_assignment, validate_justification,
};
