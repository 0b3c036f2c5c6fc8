// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Opaque identifier for a lawyer, issued by the external identity provider.
///
/// The core never mints these; they arrive on the trusted RPC boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new `UserId`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Returns whether the identifier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A lawyer's email address.
///
/// Emails are normalized to lowercase so that the rotation sort order is a
/// deterministic, case-insensitive total order. Emails are unique across the
/// directory, so ties are impossible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a new `Email`, normalizing to lowercase.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_lowercase())
    }

    /// Returns the email value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Validates that the address is plausible (non-empty, contains `@`).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmail` if the address fails the check.
    pub fn validated(value: &str) -> Result<Self, DomainError> {
        let email = Self::new(value);
        if email.0.is_empty() || !email.0.contains('@') {
            return Err(DomainError::InvalidEmail(value.to_string()));
        }
        Ok(email)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a legal specialty (e.g. family, labor).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecialtyId(String);

impl SpecialtyId {
    /// Creates a new `SpecialtyId`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Returns whether the identifier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for SpecialtyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a rotation pool.
///
/// Automatic assignment rotates within a per-specialty pool. Replacement
/// after a direct-mode rejection rotates within one shared global pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolId {
    /// The rotation pool for one specialty.
    Specialty(SpecialtyId),
    /// The single shared pool used to replace rejected direct-mode invitees.
    Direct,
}

impl PoolId {
    /// Storage key for the shared direct pool.
    pub const DIRECT_KEY: &'static str = "direct";

    /// Returns the storage key for this pool.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Specialty(specialty) => specialty.value(),
            Self::Direct => Self::DIRECT_KEY,
        }
    }
}

/// Canonical numeric identifier for a case, assigned by the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(i64);

impl CaseId {
    /// Creates a `CaseId` from its persisted value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical numeric identifier for an invitation, assigned by the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InviteId(i64);

impl InviteId {
    /// Creates an `InviteId` from its persisted value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for InviteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a directory member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Role {
    /// Regular lawyer: may create cases and answer invitations.
    #[default]
    Lawyer,
    /// Administrator: additionally manages the directory and specialties.
    Admin,
}

impl Role {
    /// Returns the string representation of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lawyer => "lawyer",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lawyer" => Ok(Self::Lawyer),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Jurisdiction of a case. Fixed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jurisdiction {
    /// National courts.
    Nacional,
    /// Federal courts.
    Federal,
    /// City of Buenos Aires courts.
    Caba,
    /// Province of Buenos Aires courts.
    ProvinciaBsAs,
}

impl Jurisdiction {
    /// Returns the string representation of this jurisdiction.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nacional => "nacional",
            Self::Federal => "federal",
            Self::Caba => "caba",
            Self::ProvinciaBsAs => "provincia_bs_as",
        }
    }
}

impl FromStr for Jurisdiction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nacional" => Ok(Self::Nacional),
            "federal" => Ok(Self::Federal),
            "caba" => Ok(Self::Caba),
            "provincia_bs_as" => Ok(Self::ProvinciaBsAs),
            _ => Err(DomainError::InvalidJurisdiction(s.to_string())),
        }
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the invitees for a case are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentMode {
    /// Strict round-robin rotation over the eligible specialty pool.
    #[default]
    Auto,
    /// Manual assignment of named lawyers, requiring a written justification.
    Direct,
}

impl AssignmentMode {
    /// Returns the string representation of this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Direct => "direct",
        }
    }
}

impl FromStr for AssignmentMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "direct" => Ok(Self::Direct),
            _ => Err(DomainError::InvalidAssignmentMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for AssignmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a case.
///
/// `Assigned` holds exactly when the confirmed count has reached the
/// required count; a late rejection on an over-invited case re-opens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Awaiting confirmations.
    #[default]
    Draft,
    /// Fully staffed.
    Assigned,
}

impl CaseStatus {
    /// Returns the string representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Assigned => "assigned",
        }
    }
}

impl FromStr for CaseStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "assigned" => Ok(Self::Assigned),
            _ => Err(DomainError::InvalidCaseStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State of an invitation. Terminal once non-pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InviteStatus {
    /// Awaiting the invitee's answer.
    #[default]
    Pending,
    /// Accepted by the invitee. Terminal.
    Accepted,
    /// Rejected by the invitee. Terminal.
    Rejected,
}

impl InviteStatus {
    /// Returns the string representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Returns whether this status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

impl FromStr for InviteStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidInviteStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An invitee's answer to an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The invitee joins the case.
    Accepted,
    /// The invitee declines the case.
    Rejected,
}

impl Decision {
    /// Returns the string representation of this decision.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Returns the invitation status this decision settles into.
    #[must_use]
    pub const fn as_invite_status(&self) -> InviteStatus {
        match self {
            Self::Accepted => InviteStatus::Accepted,
            Self::Rejected => InviteStatus::Rejected,
        }
    }
}

impl FromStr for Decision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidDecision(s.to_string())),
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A lawyer profile from the user directory.
///
/// The core reads these; only admin-management operations mutate them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lawyer {
    /// The lawyer's opaque identifier.
    pub uid: UserId,
    /// Unique lowercase email, used as the rotation tie-break sort key.
    pub email: Email,
    /// Directory role.
    pub role: Role,
    /// Eligibility gate for new case assignments.
    pub is_practicing: bool,
    /// Specialty ids this lawyer covers.
    pub specialties: Vec<SpecialtyId>,
}

impl Lawyer {
    /// Returns whether this lawyer covers the given specialty.
    #[must_use]
    pub fn has_specialty(&self, specialty: &SpecialtyId) -> bool {
        self.specialties.contains(specialty)
    }
}

/// A legal case ("causa") requiring exactly two assigned lawyers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    /// Canonical identifier. `None` before first persistence.
    pub case_id: Option<CaseId>,
    /// Tentative title ("carátula tentativa").
    pub caratula_tentativa: String,
    /// The specialty this case falls under.
    pub specialty_id: SpecialtyId,
    /// The object of the claim.
    pub objeto: String,
    /// Free-text summary.
    pub resumen: String,
    /// Jurisdiction of the case.
    pub jurisdiccion: Jurisdiction,
    /// Who created the case.
    pub brought_by_uid: UserId,
    /// Whether the creator takes one of the two seats.
    pub brought_by_participates: bool,
    /// How invitees are selected.
    pub assignment_mode: AssignmentMode,
    /// Named assignees, populated only in direct mode.
    pub direct_assignees_uids: Vec<UserId>,
    /// Written justification, populated only in direct mode.
    pub direct_justification: String,
    /// Always 2.
    pub required_assignees_count: usize,
    /// Lawyers confirmed on the case (participating creator plus acceptors).
    pub confirmed_assignees_uids: Vec<UserId>,
    /// Lifecycle status.
    pub status: CaseStatus,
    /// Creation timestamp.
    pub created_at: OffsetDateTime,
}

impl Case {
    /// Returns how many seats remain open.
    #[must_use]
    pub fn remaining_needed(&self) -> usize {
        self.required_assignees_count
            .saturating_sub(self.confirmed_assignees_uids.len())
    }

    /// Checks the status invariant: `assigned` iff confirmed >= required.
    #[must_use]
    pub fn status_invariant_holds(&self) -> bool {
        (self.status == CaseStatus::Assigned)
            == (self.confirmed_assignees_uids.len() >= self.required_assignees_count)
    }
}

/// An offer for a specific lawyer to join a specific case.
///
/// Owned by exactly one case. Mutated at most once: pending to accepted or
/// pending to rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    /// Canonical identifier. `None` before first persistence.
    pub invite_id: Option<InviteId>,
    /// The case this invitation belongs to.
    pub case_id: CaseId,
    /// The invited lawyer.
    pub invited_uid: UserId,
    /// Snapshot of the invitee's email taken inside the inviting transaction.
    pub invited_email: Email,
    /// Invitation state.
    pub status: InviteStatus,
    /// Assignment mode copied from the case.
    pub mode: AssignmentMode,
    /// Justification copied from the case when the mode is direct.
    pub direct_justification: String,
    /// When the invitation was written.
    pub invited_at: OffsetDateTime,
    /// When the invitee answered. `None` while pending.
    pub responded_at: Option<OffsetDateTime>,
    /// The original case creator, even for replacement invitations.
    pub created_by_uid: UserId,
}
