// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test fixtures shared by the engine tests.

use crate::selection::Candidate;
use crate::{CreateCaseCommand, ResponseContext};
use causalex_domain::{
    AssignmentMode, Case, CaseId, CaseStatus, Email, Invitation, InviteId, InviteStatus,
    Jurisdiction, REQUIRED_ASSIGNEES_COUNT, SpecialtyId, UserId,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-01 12:00:00 UTC)
}

pub fn candidate(uid: &str, email: &str) -> Candidate {
    Candidate {
        uid: UserId::new(uid),
        email: Email::new(email),
    }
}

/// Three practicing family lawyers, A < B < C by email.
pub fn family_pool() -> Vec<Candidate> {
    vec![
        candidate("uid-c", "c@firm.com"),
        candidate("uid-a", "a@firm.com"),
        candidate("uid-b", "b@firm.com"),
    ]
}

pub fn auto_command(creator: &str, participates: bool) -> CreateCaseCommand {
    CreateCaseCommand {
        creator_uid: UserId::new(creator),
        caratula_tentativa: String::from("Pérez c/ García s/ daños"),
        specialty_id: SpecialtyId::new("familia"),
        objeto: String::from("Daños y perjuicios"),
        resumen: String::from("Reclamo por incumplimiento contractual"),
        jurisdiccion: Jurisdiction::Nacional,
        brought_by_participates: participates,
        assignment_mode: AssignmentMode::Auto,
        direct_assignees_uids: Vec::new(),
        direct_justification: String::new(),
    }
}

pub fn direct_command(creator: &str, participates: bool, assignees: &[&str]) -> CreateCaseCommand {
    CreateCaseCommand {
        creator_uid: UserId::new(creator),
        caratula_tentativa: String::from("Pérez c/ García s/ daños"),
        specialty_id: SpecialtyId::new("familia"),
        objeto: String::from("Daños y perjuicios"),
        resumen: String::from("Reclamo por incumplimiento contractual"),
        jurisdiccion: Jurisdiction::Caba,
        brought_by_participates: participates,
        assignment_mode: AssignmentMode::Direct,
        direct_assignees_uids: assignees.iter().map(|uid| UserId::new(*uid)).collect(),
        direct_justification: String::from("test justification 123"),
    }
}

pub fn test_case(mode: AssignmentMode, confirmed: &[&str], status: CaseStatus) -> Case {
    Case {
        case_id: Some(CaseId::new(1)),
        caratula_tentativa: String::from("Pérez c/ García s/ daños"),
        specialty_id: SpecialtyId::new("familia"),
        objeto: String::from("Daños y perjuicios"),
        resumen: String::from("Reclamo por incumplimiento contractual"),
        jurisdiccion: Jurisdiction::Nacional,
        brought_by_uid: UserId::new("creator"),
        brought_by_participates: true,
        assignment_mode: mode,
        direct_assignees_uids: Vec::new(),
        direct_justification: if mode == AssignmentMode::Direct {
            String::from("test justification 123")
        } else {
            String::new()
        },
        required_assignees_count: REQUIRED_ASSIGNEES_COUNT,
        confirmed_assignees_uids: confirmed.iter().map(|uid| UserId::new(*uid)).collect(),
        status,
        created_at: test_now(),
    }
}

pub fn pending_invite(invite_id: i64, invited_uid: &str, mode: AssignmentMode) -> Invitation {
    Invitation {
        invite_id: Some(InviteId::new(invite_id)),
        case_id: CaseId::new(1),
        invited_uid: UserId::new(invited_uid),
        invited_email: Email::new(&format!("{invited_uid}@firm.com")),
        status: InviteStatus::Pending,
        mode,
        direct_justification: String::new(),
        invited_at: test_now(),
        responded_at: None,
        created_by_uid: UserId::new("creator"),
    }
}

pub fn response_context(
    case: Case,
    invitation: Invitation,
    already_invited: &[&str],
) -> ResponseContext {
    ResponseContext {
        case,
        invitation,
        already_invited: already_invited.iter().map(|uid| UserId::new(*uid)).collect(),
    }
}
