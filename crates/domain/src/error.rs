// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised by domain rule validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required case field was empty or missing.
    MissingField(&'static str),
    /// The email address is not plausible.
    InvalidEmail(String),
    /// The role string is not recognized.
    InvalidRole(String),
    /// The jurisdiction string is not recognized.
    InvalidJurisdiction(String),
    /// The assignment mode string is not recognized.
    InvalidAssignmentMode(String),
    /// The case status string is not recognized.
    InvalidCaseStatus(String),
    /// The invitation status string is not recognized.
    InvalidInviteStatus(String),
    /// The decision string is not recognized.
    InvalidDecision(String),
    /// Direct assignment named the wrong number of assignees.
    WrongDirectAssigneeCount {
        /// How many assignees the case requires.
        required: usize,
        /// How many were supplied.
        supplied: usize,
    },
    /// The direct-assignment justification is too short.
    JustificationTooShort {
        /// Minimum accepted length.
        minimum: usize,
        /// Supplied length.
        supplied: usize,
    },
    /// The creator listed themselves as a direct assignee.
    SelfInvite,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Missing or empty field: {field}"),
            Self::InvalidEmail(value) => write!(f, "Invalid email address: {value}"),
            Self::InvalidRole(value) => write!(f, "Invalid role: {value}"),
            Self::InvalidJurisdiction(value) => write!(f, "Invalid jurisdiction: {value}"),
            Self::InvalidAssignmentMode(value) => write!(f, "Invalid assignment mode: {value}"),
            Self::InvalidCaseStatus(value) => write!(f, "Invalid case status: {value}"),
            Self::InvalidInviteStatus(value) => write!(f, "Invalid invitation status: {value}"),
            Self::InvalidDecision(value) => write!(f, "Invalid decision: {value}"),
            Self::WrongDirectAssigneeCount { required, supplied } => write!(
                f,
                "Direct assignment requires exactly {required} assignee(s), got {supplied}"
            ),
            Self::JustificationTooShort { minimum, supplied } => write!(
                f,
                "Justification must be at least {minimum} characters, got {supplied}"
            ),
            Self::SelfInvite => write!(f, "The case creator cannot invite themselves"),
        }
    }
}

impl std::error::Error for DomainError {}
