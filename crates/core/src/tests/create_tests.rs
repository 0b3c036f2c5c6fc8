// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for `CreateCase` validation and planning.

use super::helpers::{auto_command, candidate, direct_command, test_now};
use crate::{CoreError, CursorUpdate, auto_invites_needed, plan_case};
use causalex_domain::{
    AssignmentMode, CaseStatus, DomainError, InviteStatus, PoolId, SpecialtyId, UserId,
};

#[test]
fn auto_invites_needed_accounts_for_participating_creator() {
    assert_eq!(auto_invites_needed(true), 1);
    assert_eq!(auto_invites_needed(false), 2);
}

#[test]
fn validate_rejects_empty_title() {
    let mut command = auto_command("creator", true);
    command.caratula_tentativa = String::from("   ");

    assert!(matches!(
        command.validate(),
        Err(CoreError::DomainViolation(DomainError::MissingField(
            "caratula_tentativa"
        )))
    ));
}

#[test]
fn validate_rejects_direct_with_wrong_count() {
    // Creator does not participate: two assignees required, one supplied.
    let command = direct_command("creator", false, &["uid-a"]);

    assert!(matches!(
        command.validate(),
        Err(CoreError::DomainViolation(
            DomainError::WrongDirectAssigneeCount {
                required: 2,
                supplied: 1,
            }
        ))
    ));
}

#[test]
fn validate_rejects_direct_self_invite() {
    let command = direct_command("creator", true, &["creator"]);

    assert!(matches!(
        command.validate(),
        Err(CoreError::DomainViolation(DomainError::SelfInvite))
    ));
}

#[test]
fn validate_deduplicates_direct_assignees_before_counting() {
    // Two entries, one distinct uid: fails the two-assignee rule.
    let command = direct_command("creator", false, &["uid-a", "uid-a"]);

    assert!(matches!(
        command.validate(),
        Err(CoreError::DomainViolation(
            DomainError::WrongDirectAssigneeCount {
                required: 2,
                supplied: 1,
            }
        ))
    ));
}

#[test]
fn validate_accepts_direct_scenario() {
    let command = direct_command("creator", false, &["uid-a", "uid-b"]);
    assert!(command.validate().is_ok());
}

#[test]
fn plan_starts_confirmed_with_participating_creator() {
    let command = auto_command("creator", true);
    let plan = plan_case(
        &command,
        vec![candidate("uid-a", "a@firm.com")],
        Some(CursorUpdate {
            pool: PoolId::Specialty(SpecialtyId::new("familia")),
            next_cursor: 1,
        }),
        test_now(),
    );

    assert_eq!(plan.case.status, CaseStatus::Draft);
    assert_eq!(
        plan.case.confirmed_assignees_uids,
        vec![UserId::new("creator")]
    );
    assert_eq!(plan.case.required_assignees_count, 2);
    assert!(plan.case.status_invariant_holds());
}

#[test]
fn plan_starts_with_empty_confirmed_when_creator_abstains() {
    let command = auto_command("creator", false);
    let plan = plan_case(
        &command,
        vec![
            candidate("uid-a", "a@firm.com"),
            candidate("uid-b", "b@firm.com"),
        ],
        None,
        test_now(),
    );

    assert!(plan.case.confirmed_assignees_uids.is_empty());
    assert_eq!(plan.invitations.len(), 2);
}

#[test]
fn plan_invitations_are_pending_with_email_snapshots() {
    let command = auto_command("creator", true);
    let plan = plan_case(
        &command,
        vec![candidate("uid-a", "a@firm.com")],
        None,
        test_now(),
    );

    let invite = &plan.invitations[0];
    assert_eq!(invite.status, InviteStatus::Pending);
    assert_eq!(invite.invited_uid, UserId::new("uid-a"));
    assert_eq!(invite.invited_email.value(), "a@firm.com");
    assert_eq!(invite.mode, AssignmentMode::Auto);
    assert!(invite.direct_justification.is_empty());
    assert_eq!(invite.created_by_uid, UserId::new("creator"));
    assert!(invite.responded_at.is_none());
}

#[test]
fn plan_copies_justification_onto_direct_invitations() {
    let command = direct_command("creator", false, &["uid-a", "uid-b"]);
    let plan = plan_case(
        &command,
        vec![
            candidate("uid-a", "a@firm.com"),
            candidate("uid-b", "b@firm.com"),
        ],
        None,
        test_now(),
    );

    assert_eq!(plan.case.assignment_mode, AssignmentMode::Direct);
    assert_eq!(
        plan.case.direct_assignees_uids,
        vec![UserId::new("uid-a"), UserId::new("uid-b")]
    );
    for invite in &plan.invitations {
        assert_eq!(invite.mode, AssignmentMode::Direct);
        assert_eq!(invite.direct_justification, "test justification 123");
    }
    assert!(plan.cursor_update.is_none());
}

#[test]
fn plan_carries_cursor_update_for_auto_mode() {
    let command = auto_command("creator", true);
    let plan = plan_case(
        &command,
        vec![candidate("uid-a", "a@firm.com")],
        Some(CursorUpdate {
            pool: PoolId::Specialty(SpecialtyId::new("familia")),
            next_cursor: 1,
        }),
        test_now(),
    );

    let cursor = plan.cursor_update.expect("cursor update present");
    assert_eq!(cursor.next_cursor, 1);
    assert_eq!(cursor.pool.key(), "familia");
}
