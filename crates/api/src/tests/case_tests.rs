// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Case creation and case read-path handler tests.

use crate::error::ApiError;
use crate::handlers::{create_case, get_case, list_my_cases, list_pending_invites};
use crate::tests::{caller, case_request, seed_directory, test_db};

#[test]
fn auto_case_creation_returns_case_and_invitations() {
    let mut db = test_db();
    seed_directory(&mut db);
    let creator = caller(&mut db, "creator");

    let response = create_case(&mut db, case_request("civil", "auto", false), &creator)
        .expect("Case created");

    assert_eq!(response.case.status, "draft");
    assert_eq!(response.case.assignment_mode, "auto");
    assert_eq!(response.invitations.len(), 2);
    assert_eq!(response.invitations[0].invited_uid, "uid-a");
    assert_eq!(response.invitations[1].invited_uid, "uid-b");
    assert!(response.message.contains("2 invitation(s)"));
}

#[test]
fn invalid_jurisdiction_is_rejected() {
    let mut db = test_db();
    seed_directory(&mut db);
    let creator = caller(&mut db, "creator");

    let mut request = case_request("civil", "auto", false);
    request.jurisdiccion = String::from("marte");

    let result = create_case(&mut db, request, &creator);
    assert!(matches!(
        result,
        Err(ApiError::InvalidArgument { ref field, .. }) if field == "jurisdiccion"
    ));
}

#[test]
fn invalid_assignment_mode_is_rejected() {
    let mut db = test_db();
    seed_directory(&mut db);
    let creator = caller(&mut db, "creator");

    let mut request = case_request("civil", "auto", false);
    request.assignment_mode = String::from("lottery");

    let result = create_case(&mut db, request, &creator);
    assert!(matches!(
        result,
        Err(ApiError::InvalidArgument { ref field, .. }) if field == "assignment_mode"
    ));
}

#[test]
fn empty_title_is_rejected() {
    let mut db = test_db();
    seed_directory(&mut db);
    let creator = caller(&mut db, "creator");

    let mut request = case_request("civil", "auto", false);
    request.caratula_tentativa = String::from("   ");

    let result = create_case(&mut db, request, &creator);
    assert!(matches!(
        result,
        Err(ApiError::InvalidArgument { ref field, .. }) if field == "caratula_tentativa"
    ));
}

#[test]
fn direct_mode_enforces_assignee_count() {
    let mut db = test_db();
    seed_directory(&mut db);
    let creator = caller(&mut db, "creator");

    let mut request = case_request("civil", "direct", false);
    request.direct_assignees_uids = vec![String::from("uid-a")];
    request.direct_justification = String::from("Handled the prior proceedings");

    let result = create_case(&mut db, request, &creator);
    assert!(matches!(
        result,
        Err(ApiError::InvalidArgument { ref field, .. }) if field == "direct_assignees_uids"
    ));
}

#[test]
fn direct_mode_enforces_justification_length() {
    let mut db = test_db();
    seed_directory(&mut db);
    let creator = caller(&mut db, "creator");

    let mut request = case_request("civil", "direct", false);
    request.direct_assignees_uids = vec![String::from("uid-a"), String::from("uid-b")];
    request.direct_justification = String::from("short");

    let result = create_case(&mut db, request, &creator);
    assert!(matches!(
        result,
        Err(ApiError::InvalidArgument { ref field, .. }) if field == "direct_justification"
    ));
}

#[test]
fn direct_case_creation_succeeds() {
    let mut db = test_db();
    seed_directory(&mut db);
    let creator = caller(&mut db, "creator");

    let mut request = case_request("civil", "direct", false);
    request.direct_assignees_uids = vec![String::from("uid-b"), String::from("uid-c")];
    request.direct_justification = String::from("Both handled the prior proceedings");

    let response = create_case(&mut db, request, &creator).expect("Case created");
    assert_eq!(response.case.assignment_mode, "direct");
    assert_eq!(response.invitations.len(), 2);
    assert_eq!(response.invitations[0].invited_uid, "uid-b");
    assert_eq!(
        response.invitations[0].direct_justification,
        "Both handled the prior proceedings"
    );
}

#[test]
fn unknown_specialty_maps_to_failed_precondition() {
    let mut db = test_db();
    seed_directory(&mut db);
    let creator = caller(&mut db, "creator");

    // The case is the addressed resource; a missing specialty is a
    // conflict with catalog state.
    let result = create_case(&mut db, case_request("comercial", "auto", false), &creator);
    assert!(matches!(
        result,
        Err(ApiError::FailedPrecondition { ref message }) if message.contains("comercial")
    ));
}

#[test]
fn exhausted_pool_maps_to_failed_precondition() {
    let mut db = test_db();
    seed_directory(&mut db);
    db.create_specialty("penal", "Derecho Penal")
        .expect("Specialty created");
    db.update_lawyer_profile(
        "uid-a",
        None,
        None,
        Some(&[String::from("civil"), String::from("penal")]),
    )
    .expect("Profile updated");
    let creator = caller(&mut db, "creator");

    let result = create_case(&mut db, case_request("penal", "auto", false), &creator);
    assert!(matches!(result, Err(ApiError::FailedPrecondition { .. })));
}

#[test]
fn get_case_returns_case_with_invitations() {
    let mut db = test_db();
    seed_directory(&mut db);
    let creator = caller(&mut db, "creator");

    let created = create_case(&mut db, case_request("civil", "auto", false), &creator)
        .expect("Case created");

    let fetched = get_case(&mut db, created.case_id).expect("Case fetched");
    assert_eq!(fetched.case.case_id, created.case_id);
    assert_eq!(fetched.invitations.len(), 2);
}

#[test]
fn missing_case_maps_to_not_found() {
    let mut db = test_db();
    seed_directory(&mut db);

    let result = get_case(&mut db, 999);
    assert!(matches!(
        result,
        Err(ApiError::NotFound { ref resource, .. }) if resource == "Case"
    ));
}

#[test]
fn my_cases_and_pending_invites_follow_the_caller() {
    let mut db = test_db();
    seed_directory(&mut db);
    let creator = caller(&mut db, "creator");

    create_case(&mut db, case_request("civil", "auto", false), &creator).expect("Case created");

    let mine = list_my_cases(&mut db, &creator).expect("Case list");
    assert_eq!(mine.cases.len(), 1);

    let invitee = caller(&mut db, "uid-a");
    let pending = list_pending_invites(&mut db, &invitee).expect("Pending invites");
    assert_eq!(pending.invitations.len(), 1);

    let bystander = caller(&mut db, "uid-c");
    let none = list_pending_invites(&mut db, &bystander).expect("Pending invites");
    assert!(none.invitations.is_empty());
}
