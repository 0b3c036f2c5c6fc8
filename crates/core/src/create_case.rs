// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Planning for the `CreateCase` operation.

use crate::error::CoreError;
use crate::selection::{Candidate, CursorUpdate};
use causalex_domain::{
    AssignmentMode, Case, CaseStatus, Invitation, InviteStatus, Jurisdiction, REQUIRED_ASSIGNEES_COUNT,
    SpecialtyId, UserId, validate_case_fields, validate_direct_assignment,
};
use time::OffsetDateTime;

/// Validated intent to create a case. Data only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCaseCommand {
    /// The creator (trusted caller identity).
    pub creator_uid: UserId,
    /// Tentative title.
    pub caratula_tentativa: String,
    /// The specialty the case falls under.
    pub specialty_id: SpecialtyId,
    /// The object of the claim.
    pub objeto: String,
    /// Free-text summary.
    pub resumen: String,
    /// Jurisdiction of the case.
    pub jurisdiccion: Jurisdiction,
    /// Whether the creator takes one of the two seats.
    pub brought_by_participates: bool,
    /// How invitees are selected.
    pub assignment_mode: AssignmentMode,
    /// Named assignees; consulted only in direct mode.
    pub direct_assignees_uids: Vec<UserId>,
    /// Written justification; consulted only in direct mode.
    pub direct_justification: String,
}

impl CreateCaseCommand {
    /// Returns the direct assignee list with duplicates removed, preserving
    /// first-occurrence order.
    #[must_use]
    pub fn deduplicated_direct_assignees(&self) -> Vec<UserId> {
        let mut seen: Vec<UserId> = Vec::with_capacity(self.direct_assignees_uids.len());
        for uid in &self.direct_assignees_uids {
            if !seen.contains(uid) {
                seen.push(uid.clone());
            }
        }
        seen
    }

    /// Validates the command against the domain rules of case creation.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DomainViolation` if a required field is empty or
    /// the direct-assignment rules are broken.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_case_fields(
            &self.caratula_tentativa,
            &self.specialty_id,
            &self.objeto,
            &self.resumen,
        )?;
        if self.assignment_mode == AssignmentMode::Direct {
            validate_direct_assignment(
                &self.creator_uid,
                self.brought_by_participates,
                &self.deduplicated_direct_assignees(),
                &self.direct_justification,
            )?;
        }
        Ok(())
    }

    /// The confirmed set the case starts with.
    #[must_use]
    pub fn initial_confirmed(&self) -> Vec<UserId> {
        if self.brought_by_participates {
            vec![self.creator_uid.clone()]
        } else {
            Vec::new()
        }
    }
}

/// How many invitations an auto-mode case needs at creation.
#[must_use]
pub const fn auto_invites_needed(brought_by_participates: bool) -> usize {
    if brought_by_participates {
        REQUIRED_ASSIGNEES_COUNT - 1
    } else {
        REQUIRED_ASSIGNEES_COUNT
    }
}

/// The write set produced by planning a case creation.
///
/// The persistence layer executes every write in the same transaction that
/// captured the reads behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CasePlan {
    /// The case record to insert, status `draft`.
    pub case: Case,
    /// One pending invitation per selected invitee.
    pub invitations: Vec<Invitation>,
    /// The cursor advance, present only for auto-mode selections.
    pub cursor_update: Option<CursorUpdate>,
}

/// Assembles the case and invitation writes for a validated command.
///
/// `invitees` carries the uid and email snapshot of every lawyer to invite:
/// the rotation picks in auto mode, or the named assignees (with emails read
/// inside the same transaction) in direct mode. Invitation ids and the case
/// id on each invitation are populated by the persistence layer at insert
/// time.
#[must_use]
pub fn plan_case(
    command: &CreateCaseCommand,
    invitees: Vec<Candidate>,
    cursor_update: Option<CursorUpdate>,
    now: OffsetDateTime,
) -> CasePlan {
    let is_direct = command.assignment_mode == AssignmentMode::Direct;
    let direct_justification = if is_direct {
        command.direct_justification.trim().to_string()
    } else {
        String::new()
    };
    let direct_assignees_uids: Vec<UserId> = if is_direct {
        invitees.iter().map(|c| c.uid.clone()).collect()
    } else {
        Vec::new()
    };

    let case = Case {
        case_id: None,
        caratula_tentativa: command.caratula_tentativa.trim().to_string(),
        specialty_id: command.specialty_id.clone(),
        objeto: command.objeto.trim().to_string(),
        resumen: command.resumen.trim().to_string(),
        jurisdiccion: command.jurisdiccion,
        brought_by_uid: command.creator_uid.clone(),
        brought_by_participates: command.brought_by_participates,
        assignment_mode: command.assignment_mode,
        direct_assignees_uids,
        direct_justification: direct_justification.clone(),
        required_assignees_count: REQUIRED_ASSIGNEES_COUNT,
        confirmed_assignees_uids: command.initial_confirmed(),
        status: CaseStatus::Draft,
        created_at: now,
    };

    let invitations: Vec<Invitation> = invitees
        .into_iter()
        .map(|candidate| Invitation {
            invite_id: None,
            // Populated at insert time once the case row exists.
            case_id: causalex_domain::CaseId::new(0),
            invited_uid: candidate.uid,
            invited_email: candidate.email,
            status: InviteStatus::Pending,
            mode: command.assignment_mode,
            direct_justification: direct_justification.clone(),
            invited_at: now,
            responded_at: None,
            created_by_uid: command.creator_uid.clone(),
        })
        .collect();

    CasePlan {
        case,
        invitations,
        cursor_update,
    }
}
