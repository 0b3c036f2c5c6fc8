// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers validate input, enforce authorization, call the persistence
//! layer, and translate results into DTOs. The caller has already been
//! resolved by `auth::resolve_caller`.

use causalex::CreateCaseCommand;
use causalex_domain::{
    AssignmentMode, Case, Decision, Email, Invitation, Jurisdiction, Lawyer, Role, SpecialtyId,
    UserId,
};
use causalex_persistence::Persistence;
use time::format_description::well_known::Rfc3339;
use tracing::info;

use crate::auth::{AuthenticatedCaller, AuthorizationService};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    CaseInfo, CreateCaseRequest, CreateCaseResponse, CreateLawyerRequest, CreateLawyerResponse,
    CreateSpecialtyRequest, CreateSpecialtyResponse, GetCaseResponse, InviteInfo, LawyerInfo,
    ListCasesResponse, ListLawyersResponse, ListPendingInvitesResponse, ListSpecialtiesResponse,
    LoginRequest, LoginResponse, RespondToInviteRequest, RespondToInviteResponse,
    SetPasswordRequest, SetPasswordResponse, SpecialtyInfo, UpdateLawyerRequest,
    UpdateLawyerResponse,
};

/// Minimum accepted password length for directory accounts.
const MIN_PASSWORD_LEN: usize = 6;

/// The decision notification addressed to a case creator.
///
/// Built inside the handler so the server can dispatch it after the
/// transaction commits. A failed dispatch is reported as response data,
/// never as a call failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionNotification {
    /// The creator's email address.
    pub recipient_email: String,
    /// The message subject.
    pub subject: String,
    /// The message body.
    pub body: String,
}

/// The result of answering an invitation: the response plus the
/// notification to dispatch post-commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespondOutcome {
    /// The API response, with the email fields still unset.
    pub response: RespondToInviteResponse,
    /// The notification for the case creator, when their address is
    /// known.
    pub notification: Option<DecisionNotification>,
}

fn format_timestamp(timestamp: time::OffsetDateTime) -> Result<String, ApiError> {
    timestamp.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

fn persisted_case_id(case: &Case) -> Result<i64, ApiError> {
    case.case_id
        .map(|id| id.value())
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Persisted case is missing its identifier"),
        })
}

/// Converts a domain case into its API shape.
///
/// # Errors
///
/// Returns an error if the case lacks a persisted identifier.
pub fn case_info(case: &Case) -> Result<CaseInfo, ApiError> {
    Ok(CaseInfo {
        case_id: persisted_case_id(case)?,
        caratula_tentativa: case.caratula_tentativa.clone(),
        specialty_id: case.specialty_id.value().to_string(),
        objeto: case.objeto.clone(),
        resumen: case.resumen.clone(),
        jurisdiccion: case.jurisdiccion.as_str().to_string(),
        brought_by_uid: case.brought_by_uid.value().to_string(),
        brought_by_participates: case.brought_by_participates,
        assignment_mode: case.assignment_mode.as_str().to_string(),
        direct_assignees_uids: case
            .direct_assignees_uids
            .iter()
            .map(|uid| uid.value().to_string())
            .collect(),
        direct_justification: case.direct_justification.clone(),
        required_assignees_count: case.required_assignees_count,
        confirmed_assignees_uids: case
            .confirmed_assignees_uids
            .iter()
            .map(|uid| uid.value().to_string())
            .collect(),
        status: case.status.as_str().to_string(),
        created_at: format_timestamp(case.created_at)?,
    })
}

/// Converts a domain invitation into its API shape.
///
/// # Errors
///
/// Returns an error if the invitation lacks a persisted identifier.
pub fn invite_info(invitation: &Invitation) -> Result<InviteInfo, ApiError> {
    let invite_id = invitation
        .invite_id
        .map(|id| id.value())
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Persisted invitation is missing its identifier"),
        })?;
    let responded_at = match invitation.responded_at {
        Some(timestamp) => Some(format_timestamp(timestamp)?),
        None => None,
    };
    Ok(InviteInfo {
        invite_id,
        case_id: invitation.case_id.value(),
        invited_uid: invitation.invited_uid.value().to_string(),
        invited_email: invitation.invited_email.value().to_string(),
        status: invitation.status.as_str().to_string(),
        mode: invitation.mode.as_str().to_string(),
        direct_justification: invitation.direct_justification.clone(),
        invited_at: format_timestamp(invitation.invited_at)?,
        responded_at,
        created_by_uid: invitation.created_by_uid.value().to_string(),
    })
}

fn lawyer_info(lawyer: &Lawyer) -> LawyerInfo {
    LawyerInfo {
        uid: lawyer.uid.value().to_string(),
        email: lawyer.email.value().to_string(),
        role: lawyer.role.as_str().to_string(),
        is_practicing: lawyer.is_practicing,
        specialties: lawyer
            .specialties
            .iter()
            .map(|s| s.value().to_string())
            .collect(),
    }
}

fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::InvalidArgument {
            field: String::from("password"),
            message: format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        });
    }
    Ok(())
}

/// Creates a case with its initial invitations.
///
/// # Errors
///
/// Returns an error if the request is invalid, a referenced lawyer or
/// specialty is missing, or the rotation pool cannot staff the case.
pub fn create_case(
    persistence: &mut Persistence,
    request: CreateCaseRequest,
    caller: &AuthenticatedCaller,
) -> Result<CreateCaseResponse, ApiError> {
    let jurisdiccion: Jurisdiction = request.jurisdiccion.parse().map_err(translate_domain_error)?;
    let assignment_mode: AssignmentMode = request
        .assignment_mode
        .parse()
        .map_err(translate_domain_error)?;

    let command = CreateCaseCommand {
        creator_uid: caller.uid.clone(),
        caratula_tentativa: request.caratula_tentativa,
        specialty_id: SpecialtyId::new(request.specialty_id),
        objeto: request.objeto,
        resumen: request.resumen,
        jurisdiccion,
        brought_by_participates: request.brought_by_participates,
        assignment_mode,
        direct_assignees_uids: request.direct_assignees_uids.into_iter().map(UserId::new).collect(),
        direct_justification: request.direct_justification,
    };

    let created = persistence
        .create_case(&command)
        .map_err(translate_persistence_error)?;

    let case = case_info(&created.case)?;
    let invitations = created
        .invitations
        .iter()
        .map(invite_info)
        .collect::<Result<Vec<InviteInfo>, ApiError>>()?;

    info!(
        case_id = case.case_id,
        mode = %case.assignment_mode,
        "Case created via API"
    );

    Ok(CreateCaseResponse {
        case_id: case.case_id,
        message: format!("Case {} created with {} invitation(s)", case.case_id, invitations.len()),
        case,
        invitations,
    })
}

/// Applies the caller's answer to a pending invitation.
///
/// # Errors
///
/// Returns an error if the case or invitation is missing, the caller is
/// not the invitee, the invitation already settled, or a rejection finds
/// the replacement pool exhausted.
pub fn respond_to_invite(
    persistence: &mut Persistence,
    case_id: i64,
    invite_id: i64,
    request: &RespondToInviteRequest,
    caller: &AuthenticatedCaller,
) -> Result<RespondOutcome, ApiError> {
    let decision: Decision = request.decision.parse().map_err(translate_domain_error)?;

    let applied = persistence
        .respond_to_invite(case_id, invite_id, &caller.uid, decision)
        .map_err(translate_persistence_error)?;

    let creator_uid = applied.case.brought_by_uid.clone();
    let case = case_info(&applied.case)?;
    let invitation = invite_info(&applied.invitation)?;
    let replacement = match &applied.replacement {
        Some(replacement) => Some(invite_info(replacement)?),
        None => None,
    };

    let notification = persistence
        .get_lawyer(creator_uid.value())
        .map_err(translate_persistence_error)?
        .map(|creator| DecisionNotification {
            recipient_email: creator.email.value().to_string(),
            subject: format!(
                "Respuesta a la invitación del caso '{}'",
                case.caratula_tentativa
            ),
            body: format!(
                "{} ({}) ha {} la invitación al caso '{}' (caso {}).",
                invitation.invited_uid,
                invitation.invited_email,
                match decision {
                    Decision::Accepted => "aceptado",
                    Decision::Rejected => "rechazado",
                },
                case.caratula_tentativa,
                case.case_id
            ),
        });

    info!(
        case_id,
        invite_id,
        decision = %decision.as_invite_status().as_str(),
        "Invitation answered via API"
    );

    Ok(RespondOutcome {
        response: RespondToInviteResponse {
            ok: true,
            email_sent: false,
            email_error: None,
            case,
            invitation,
            replacement,
        },
        notification,
    })
}

/// Retrieves a case with its confirmed set and invitations.
///
/// # Errors
///
/// Returns an error if the case does not exist.
pub fn get_case(persistence: &mut Persistence, case_id: i64) -> Result<GetCaseResponse, ApiError> {
    let case = persistence
        .get_case(case_id)
        .map_err(translate_persistence_error)?;
    let invitations = persistence
        .list_invites_for_case(case_id)
        .map_err(translate_persistence_error)?
        .iter()
        .map(invite_info)
        .collect::<Result<Vec<InviteInfo>, ApiError>>()?;

    Ok(GetCaseResponse {
        case: case_info(&case)?,
        invitations,
    })
}

/// Lists cases the caller created or is confirmed on, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_my_cases(
    persistence: &mut Persistence,
    caller: &AuthenticatedCaller,
) -> Result<ListCasesResponse, ApiError> {
    let cases = persistence
        .list_cases_for_lawyer(caller.uid.value())
        .map_err(translate_persistence_error)?
        .iter()
        .map(case_info)
        .collect::<Result<Vec<CaseInfo>, ApiError>>()?;

    Ok(ListCasesResponse { cases })
}

/// Lists pending invitations addressed to the caller, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_pending_invites(
    persistence: &mut Persistence,
    caller: &AuthenticatedCaller,
) -> Result<ListPendingInvitesResponse, ApiError> {
    let invitations = persistence
        .list_pending_invites(caller.uid.value())
        .map_err(translate_persistence_error)?
        .iter()
        .map(invite_info)
        .collect::<Result<Vec<InviteInfo>, ApiError>>()?;

    Ok(ListPendingInvitesResponse { invitations })
}

/// Creates a lawyer account. Admin only.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the input is invalid,
/// or the uid is already taken.
pub fn create_lawyer(
    persistence: &mut Persistence,
    request: CreateLawyerRequest,
    caller: &AuthenticatedCaller,
) -> Result<CreateLawyerResponse, ApiError> {
    AuthorizationService::authorize_directory_admin(caller, "create_lawyer")?;

    let email = Email::validated(&request.email).map_err(translate_domain_error)?;
    validate_password(&request.password)?;
    let role: Role = request.role.parse().map_err(translate_domain_error)?;
    if request.uid.trim().is_empty() {
        return Err(ApiError::InvalidArgument {
            field: String::from("uid"),
            message: String::from("uid cannot be empty"),
        });
    }

    persistence
        .create_lawyer(
            &request.uid,
            email.value(),
            role.as_str(),
            request.is_practicing,
            &request.password,
            &request.specialties,
        )
        .map_err(translate_persistence_error)?;

    info!(uid = %request.uid, role = %role.as_str(), "Lawyer created via API");

    Ok(CreateLawyerResponse {
        uid: request.uid.clone(),
        email: email.value().to_string(),
        message: format!("Lawyer '{}' created", request.uid),
    })
}

/// Updates a lawyer's profile. Admin only.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the email is invalid,
/// or the lawyer does not exist.
pub fn update_lawyer(
    persistence: &mut Persistence,
    uid: &str,
    request: UpdateLawyerRequest,
    caller: &AuthenticatedCaller,
) -> Result<UpdateLawyerResponse, ApiError> {
    AuthorizationService::authorize_directory_admin(caller, "update_lawyer")?;

    let email = match &request.email {
        Some(raw) => Some(Email::validated(raw).map_err(translate_domain_error)?),
        None => None,
    };

    persistence
        .update_lawyer_profile(
            uid,
            email.as_ref().map(Email::value),
            request.is_practicing,
            request.specialties.as_deref(),
        )
        .map_err(translate_persistence_error)?;

    Ok(UpdateLawyerResponse {
        uid: uid.to_string(),
        message: format!("Lawyer '{uid}' updated"),
    })
}

/// Sets a lawyer's password. Admin only.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the password is too
/// short, or the lawyer does not exist.
pub fn set_lawyer_password(
    persistence: &mut Persistence,
    uid: &str,
    request: &SetPasswordRequest,
    caller: &AuthenticatedCaller,
) -> Result<SetPasswordResponse, ApiError> {
    AuthorizationService::authorize_directory_admin(caller, "set_lawyer_password")?;
    validate_password(&request.password)?;

    persistence
        .set_lawyer_password(uid, &request.password)
        .map_err(translate_persistence_error)?;

    Ok(SetPasswordResponse {
        uid: uid.to_string(),
        message: format!("Password updated for '{uid}'"),
    })
}

/// Verifies a lawyer's credentials and returns their profile.
///
/// # Errors
///
/// Returns `ApiError::Unauthenticated` if the uid is unknown or the
/// password does not match.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let credentials = persistence
        .get_credentials(&request.uid)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::Unauthenticated {
            reason: String::from("Unknown uid or wrong password"),
        })?;

    let verified = persistence
        .verify_password(&request.password, &credentials.password_hash)
        .map_err(translate_persistence_error)?;
    if !verified {
        return Err(ApiError::Unauthenticated {
            reason: String::from("Unknown uid or wrong password"),
        });
    }

    let lawyer = persistence
        .get_lawyer(&request.uid)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::Unauthenticated {
            reason: String::from("Unknown uid or wrong password"),
        })?;

    Ok(LoginResponse {
        lawyer: lawyer_info(&lawyer),
        message: format!("Authenticated '{}'", request.uid),
    })
}

/// Lists every lawyer in the directory, sorted by email. Admin only.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or the query fails.
pub fn list_lawyers(
    persistence: &mut Persistence,
    caller: &AuthenticatedCaller,
) -> Result<ListLawyersResponse, ApiError> {
    AuthorizationService::authorize_directory_admin(caller, "list_lawyers")?;

    let lawyers = persistence
        .list_lawyers()
        .map_err(translate_persistence_error)?
        .iter()
        .map(lawyer_info)
        .collect();

    Ok(ListLawyersResponse { lawyers })
}

/// Lists practicing lawyers, sorted by email.
///
/// Feeds the direct-assignment picker, so it is open to every caller.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_practicing_lawyers(
    persistence: &mut Persistence,
) -> Result<ListLawyersResponse, ApiError> {
    let lawyers = persistence
        .list_practicing_lawyers()
        .map_err(translate_persistence_error)?
        .iter()
        .map(lawyer_info)
        .collect();

    Ok(ListLawyersResponse { lawyers })
}

/// Creates a specialty. Admin only.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the input is empty,
/// or the id is already taken.
pub fn create_specialty(
    persistence: &mut Persistence,
    request: &CreateSpecialtyRequest,
    caller: &AuthenticatedCaller,
) -> Result<CreateSpecialtyResponse, ApiError> {
    AuthorizationService::authorize_directory_admin(caller, "create_specialty")?;

    if request.specialty_id.trim().is_empty() {
        return Err(ApiError::InvalidArgument {
            field: String::from("specialty_id"),
            message: String::from("specialty_id cannot be empty"),
        });
    }
    if request.name.trim().is_empty() {
        return Err(ApiError::InvalidArgument {
            field: String::from("name"),
            message: String::from("name cannot be empty"),
        });
    }

    persistence
        .create_specialty(&request.specialty_id, &request.name)
        .map_err(translate_persistence_error)?;

    Ok(CreateSpecialtyResponse {
        specialty_id: request.specialty_id.clone(),
        message: format!("Specialty '{}' created", request.specialty_id),
    })
}

/// Lists the specialty catalog.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_specialties(persistence: &mut Persistence) -> Result<ListSpecialtiesResponse, ApiError> {
    let specialties = persistence
        .list_specialties()
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(|data| SpecialtyInfo {
            specialty_id: data.specialty_id,
            name: data.name,
        })
        .collect();

    Ok(ListSpecialtiesResponse { specialties })
}
