// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Invitation response handler tests.

use crate::error::ApiError;
use crate::handlers::{create_case, respond_to_invite};
use crate::request_response::{CreateCaseResponse, RespondToInviteRequest};
use crate::tests::{caller, case_request, seed_directory, test_db};
use causalex_persistence::Persistence;

fn accept() -> RespondToInviteRequest {
    RespondToInviteRequest {
        decision: String::from("accepted"),
    }
}

fn reject() -> RespondToInviteRequest {
    RespondToInviteRequest {
        decision: String::from("rejected"),
    }
}

fn participating_case(db: &mut Persistence) -> CreateCaseResponse {
    let creator = caller(db, "creator");
    create_case(db, case_request("civil", "auto", true), &creator).expect("Case created")
}

#[test]
fn acceptance_closes_the_case_and_builds_a_notification() {
    let mut db = test_db();
    seed_directory(&mut db);
    let created = participating_case(&mut db);
    let invitee = caller(&mut db, &created.invitations[0].invited_uid);

    let outcome = respond_to_invite(
        &mut db,
        created.case_id,
        created.invitations[0].invite_id,
        &accept(),
        &invitee,
    )
    .expect("Response applied");

    assert!(outcome.response.ok);
    assert!(!outcome.response.email_sent);
    assert!(outcome.response.email_error.is_none());
    assert_eq!(outcome.response.case.status, "assigned");
    assert_eq!(outcome.response.invitation.status, "accepted");
    assert!(outcome.response.replacement.is_none());

    let notification = outcome.notification.expect("Notification built");
    assert_eq!(notification.recipient_email, "z@example.com");
    assert!(notification.body.contains("aceptado"));
    assert!(notification.subject.contains("Perez c/ Gomez"));
}

#[test]
fn rejection_issues_a_replacement_and_notifies() {
    let mut db = test_db();
    seed_directory(&mut db);
    let created = participating_case(&mut db);
    // Pool is a, b, c plus the blocked creator; the first invite went to a.
    assert_eq!(created.invitations[0].invited_uid, "uid-a");
    let invitee = caller(&mut db, "uid-a");

    let outcome = respond_to_invite(
        &mut db,
        created.case_id,
        created.invitations[0].invite_id,
        &reject(),
        &invitee,
    )
    .expect("Response applied");

    assert_eq!(outcome.response.case.status, "draft");
    assert_eq!(outcome.response.invitation.status, "rejected");
    // Creation advanced the cursor past a; with a and the creator blocked
    // the walk lands on c.
    let replacement = outcome.response.replacement.expect("Replacement issued");
    assert_eq!(replacement.status, "pending");
    assert_eq!(replacement.invited_uid, "uid-c");

    let notification = outcome.notification.expect("Notification built");
    assert!(notification.body.contains("rechazado"));
}

#[test]
fn invalid_decision_is_rejected() {
    let mut db = test_db();
    seed_directory(&mut db);
    let created = participating_case(&mut db);
    let invitee = caller(&mut db, &created.invitations[0].invited_uid);

    let request = RespondToInviteRequest {
        decision: String::from("maybe"),
    };
    let result = respond_to_invite(
        &mut db,
        created.case_id,
        created.invitations[0].invite_id,
        &request,
        &invitee,
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidArgument { ref field, .. }) if field == "decision"
    ));
}

#[test]
fn non_invitee_is_denied() {
    let mut db = test_db();
    seed_directory(&mut db);
    let created = participating_case(&mut db);
    let bystander = caller(&mut db, "uid-c");

    let result = respond_to_invite(
        &mut db,
        created.case_id,
        created.invitations[0].invite_id,
        &accept(),
        &bystander,
    );
    assert!(matches!(result, Err(ApiError::PermissionDenied { .. })));
}

#[test]
fn settled_invitation_maps_to_failed_precondition() {
    let mut db = test_db();
    seed_directory(&mut db);
    let created = participating_case(&mut db);
    let invitee = caller(&mut db, &created.invitations[0].invited_uid);

    respond_to_invite(
        &mut db,
        created.case_id,
        created.invitations[0].invite_id,
        &accept(),
        &invitee,
    )
    .expect("First response");

    let result = respond_to_invite(
        &mut db,
        created.case_id,
        created.invitations[0].invite_id,
        &accept(),
        &invitee,
    );
    assert!(matches!(result, Err(ApiError::FailedPrecondition { .. })));
}

#[test]
fn missing_case_maps_to_not_found() {
    let mut db = test_db();
    seed_directory(&mut db);
    let invitee = caller(&mut db, "uid-a");

    let result = respond_to_invite(&mut db, 999, 1, &accept(), &invitee);
    assert!(matches!(
        result,
        Err(ApiError::NotFound { ref resource, .. }) if resource == "Case"
    ));
}

#[test]
fn missing_invite_maps_to_not_found() {
    let mut db = test_db();
    seed_directory(&mut db);
    let created = participating_case(&mut db);
    let invitee = caller(&mut db, "uid-a");

    let result = respond_to_invite(&mut db, created.case_id, 999, &accept(), &invitee);
    assert!(matches!(
        result,
        Err(ApiError::NotFound { ref resource, .. }) if resource == "Invitation"
    ));
}
