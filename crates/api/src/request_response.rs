// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! These DTOs are distinct from domain types and represent the API
//! contract. Enumerated fields travel as their wire strings
//! (`"auto"`/`"direct"`, `"accepted"`/`"rejected"`, and so on) and are
//! parsed at the boundary.

use serde::{Deserialize, Serialize};

/// Case data as exposed over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseInfo {
    /// The canonical case identifier.
    pub case_id: i64,
    /// Tentative title.
    pub caratula_tentativa: String,
    /// The specialty the case falls under.
    pub specialty_id: String,
    /// The object of the claim.
    pub objeto: String,
    /// Free-text summary.
    pub resumen: String,
    /// Jurisdiction of the case.
    pub jurisdiccion: String,
    /// The creator's uid.
    pub brought_by_uid: String,
    /// Whether the creator takes one of the seats.
    pub brought_by_participates: bool,
    /// How invitees are selected (`auto` or `direct`).
    pub assignment_mode: String,
    /// Named assignees for direct mode.
    pub direct_assignees_uids: Vec<String>,
    /// Written justification for direct mode.
    pub direct_justification: String,
    /// How many confirmed assignees close the case.
    pub required_assignees_count: usize,
    /// Confirmed assignees, in acceptance order.
    pub confirmed_assignees_uids: Vec<String>,
    /// Case status (`draft` or `assigned`).
    pub status: String,
    /// Creation timestamp, ISO 8601.
    pub created_at: String,
}

/// Invitation data as exposed over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteInfo {
    /// The canonical invitation identifier.
    pub invite_id: i64,
    /// The case this invitation belongs to.
    pub case_id: i64,
    /// The invited lawyer's uid.
    pub invited_uid: String,
    /// The invited lawyer's email at invitation time.
    pub invited_email: String,
    /// Invitation status (`pending`, `accepted`, or `rejected`).
    pub status: String,
    /// The assignment mode the invitation was issued under.
    pub mode: String,
    /// The direct-assignment justification, empty for auto mode.
    pub direct_justification: String,
    /// Issue timestamp, ISO 8601.
    pub invited_at: String,
    /// Response timestamp, ISO 8601, absent while pending.
    pub responded_at: Option<String>,
    /// The uid of the lawyer who triggered the invitation.
    pub created_by_uid: String,
}

/// Lawyer directory data as exposed over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawyerInfo {
    /// The lawyer's uid.
    pub uid: String,
    /// The lawyer's email.
    pub email: String,
    /// The lawyer's role (`lawyer` or `admin`).
    pub role: String,
    /// Whether the lawyer currently takes cases.
    pub is_practicing: bool,
    /// The specialties the lawyer covers.
    pub specialties: Vec<String>,
}

/// Specialty catalog data as exposed over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialtyInfo {
    /// The specialty identifier.
    pub specialty_id: String,
    /// The display name.
    pub name: String,
}

/// API request to create a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCaseRequest {
    /// Tentative title.
    pub caratula_tentativa: String,
    /// The specialty the case falls under.
    pub specialty_id: String,
    /// The object of the claim.
    pub objeto: String,
    /// Free-text summary.
    pub resumen: String,
    /// Jurisdiction of the case.
    pub jurisdiccion: String,
    /// Whether the creator takes one of the seats.
    pub brought_by_participates: bool,
    /// How invitees are selected (`auto` or `direct`).
    pub assignment_mode: String,
    /// Named assignees; consulted only in direct mode.
    #[serde(default)]
    pub direct_assignees_uids: Vec<String>,
    /// Written justification; consulted only in direct mode.
    #[serde(default)]
    pub direct_justification: String,
}

/// API response for a successful case creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCaseResponse {
    /// The canonical case identifier.
    pub case_id: i64,
    /// The created case.
    pub case: CaseInfo,
    /// The invitations issued with the case.
    pub invitations: Vec<InviteInfo>,
    /// A success message.
    pub message: String,
}

/// API request to answer an invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondToInviteRequest {
    /// The decision (`accepted` or `rejected`).
    pub decision: String,
}

/// API response for a successful invitation answer.
///
/// The email fields describe the post-commit notification attempt; a
/// failed send never fails the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondToInviteResponse {
    /// Always true on success.
    pub ok: bool,
    /// Whether the decision notification was dispatched.
    pub email_sent: bool,
    /// The dispatch error, when the notification failed.
    pub email_error: Option<String>,
    /// The case after the response.
    pub case: CaseInfo,
    /// The settled invitation.
    pub invitation: InviteInfo,
    /// The replacement invitation, when a rejection issued one.
    pub replacement: Option<InviteInfo>,
}

/// API request to create a lawyer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLawyerRequest {
    /// The lawyer's uid.
    pub uid: String,
    /// The lawyer's email.
    pub email: String,
    /// The initial password.
    pub password: String,
    /// The lawyer's role (`lawyer` or `admin`).
    #[serde(default = "default_role")]
    pub role: String,
    /// Whether the lawyer currently takes cases.
    #[serde(default = "default_true")]
    pub is_practicing: bool,
    /// The specialties the lawyer covers.
    #[serde(default)]
    pub specialties: Vec<String>,
}

fn default_role() -> String {
    String::from("lawyer")
}

const fn default_true() -> bool {
    true
}

/// API response for a successful lawyer creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLawyerResponse {
    /// The created lawyer's uid.
    pub uid: String,
    /// The created lawyer's email.
    pub email: String,
    /// A success message.
    pub message: String,
}

/// API request to update a lawyer's profile.
///
/// Only the supplied fields change; supplying specialties replaces the
/// full specialty set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLawyerRequest {
    /// The new email, if changing.
    #[serde(default)]
    pub email: Option<String>,
    /// The new practicing flag, if changing.
    #[serde(default)]
    pub is_practicing: Option<bool>,
    /// The new specialty set, if changing.
    #[serde(default)]
    pub specialties: Option<Vec<String>>,
}

/// API response for a successful profile update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLawyerResponse {
    /// The updated lawyer's uid.
    pub uid: String,
    /// A success message.
    pub message: String,
}

/// API request to set a lawyer's password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPasswordRequest {
    /// The new password.
    pub password: String,
}

/// API response for a successful password update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPasswordResponse {
    /// The updated lawyer's uid.
    pub uid: String,
    /// A success message.
    pub message: String,
}

/// API request to verify a lawyer's credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The lawyer's uid.
    pub uid: String,
    /// The password to verify.
    pub password: String,
}

/// API response for a successful credential check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The authenticated lawyer.
    pub lawyer: LawyerInfo,
    /// A success message.
    pub message: String,
}

/// API request to create a specialty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSpecialtyRequest {
    /// The specialty identifier.
    pub specialty_id: String,
    /// The display name.
    pub name: String,
}

/// API response for a successful specialty creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSpecialtyResponse {
    /// The created specialty identifier.
    pub specialty_id: String,
    /// A success message.
    pub message: String,
}

/// API response for listing lawyers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLawyersResponse {
    /// The lawyers, sorted by email.
    pub lawyers: Vec<LawyerInfo>,
}

/// API response for listing specialties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSpecialtiesResponse {
    /// The specialties, sorted by identifier.
    pub specialties: Vec<SpecialtyInfo>,
}

/// API response for retrieving a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetCaseResponse {
    /// The case with its confirmed set.
    pub case: CaseInfo,
    /// Every invitation issued for the case, in creation order.
    pub invitations: Vec<InviteInfo>,
}

/// API response for listing the caller's cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCasesResponse {
    /// Cases the caller created or is confirmed on, newest first.
    pub cases: Vec<CaseInfo>,
}

/// API response for listing the caller's pending invitations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPendingInvitesResponse {
    /// Pending invitations addressed to the caller, newest first.
    pub invitations: Vec<InviteInfo>,
}
