// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Directory and specialty catalog handler tests.

use crate::error::ApiError;
use crate::handlers::{
    create_lawyer, create_specialty, list_lawyers, list_practicing_lawyers, list_specialties,
    login, set_lawyer_password, update_lawyer,
};
use crate::request_response::{
    CreateLawyerRequest, CreateSpecialtyRequest, LoginRequest, SetPasswordRequest,
    UpdateLawyerRequest,
};
use crate::tests::{caller, seed_directory, test_db};

fn lawyer_request(uid: &str, email: &str) -> CreateLawyerRequest {
    CreateLawyerRequest {
        uid: uid.to_string(),
        email: email.to_string(),
        password: String::from("hunter2-long"),
        role: String::from("lawyer"),
        is_practicing: true,
        specialties: vec![String::from("civil")],
    }
}

#[test]
fn admin_creates_lawyer_and_login_verifies() {
    let mut db = test_db();
    seed_directory(&mut db);
    let admin = caller(&mut db, "admin-1");

    let response = create_lawyer(&mut db, lawyer_request("uid-d", "D@Example.COM"), &admin)
        .expect("Lawyer created");
    // Email is normalized at the boundary.
    assert_eq!(response.email, "d@example.com");

    let session = login(
        &mut db,
        &LoginRequest {
            uid: String::from("uid-d"),
            password: String::from("hunter2-long"),
        },
    )
    .expect("Login verified");
    assert_eq!(session.lawyer.uid, "uid-d");
    assert_eq!(session.lawyer.specialties, vec![String::from("civil")]);
}

#[test]
fn weak_password_is_rejected() {
    let mut db = test_db();
    seed_directory(&mut db);
    let admin = caller(&mut db, "admin-1");

    let mut request = lawyer_request("uid-d", "d@example.com");
    request.password = String::from("short");

    let result = create_lawyer(&mut db, request, &admin);
    assert!(matches!(
        result,
        Err(ApiError::InvalidArgument { ref field, .. }) if field == "password"
    ));
}

#[test]
fn implausible_email_is_rejected() {
    let mut db = test_db();
    seed_directory(&mut db);
    let admin = caller(&mut db, "admin-1");

    let mut request = lawyer_request("uid-d", "not-an-email");
    request.email = String::from("not-an-email");

    let result = create_lawyer(&mut db, request, &admin);
    assert!(matches!(
        result,
        Err(ApiError::InvalidArgument { ref field, .. }) if field == "email"
    ));
}

#[test]
fn duplicate_uid_maps_to_failed_precondition() {
    let mut db = test_db();
    seed_directory(&mut db);
    let admin = caller(&mut db, "admin-1");

    let result = create_lawyer(&mut db, lawyer_request("uid-a", "fresh@example.com"), &admin);
    assert!(matches!(result, Err(ApiError::FailedPrecondition { .. })));
}

#[test]
fn profile_update_and_password_reset_round_trip() {
    let mut db = test_db();
    seed_directory(&mut db);
    let admin = caller(&mut db, "admin-1");

    update_lawyer(
        &mut db,
        "uid-a",
        UpdateLawyerRequest {
            email: None,
            is_practicing: Some(false),
            specialties: None,
        },
        &admin,
    )
    .expect("Profile updated");

    let practicing = list_practicing_lawyers(&mut db).expect("Practicing listing");
    assert!(practicing.lawyers.iter().all(|l| l.uid != "uid-a"));

    set_lawyer_password(
        &mut db,
        "uid-a",
        &SetPasswordRequest {
            password: String::from("new-password"),
        },
        &admin,
    )
    .expect("Password set");

    login(
        &mut db,
        &LoginRequest {
            uid: String::from("uid-a"),
            password: String::from("new-password"),
        },
    )
    .expect("Login with new password");
}

#[test]
fn update_for_unknown_lawyer_maps_to_not_found() {
    let mut db = test_db();
    seed_directory(&mut db);
    let admin = caller(&mut db, "admin-1");

    let result = update_lawyer(
        &mut db,
        "uid-ghost",
        UpdateLawyerRequest {
            email: None,
            is_practicing: Some(true),
            specialties: None,
        },
        &admin,
    );
    assert!(matches!(
        result,
        Err(ApiError::NotFound { ref resource, .. }) if resource == "Lawyer"
    ));
}

#[test]
fn login_with_wrong_password_is_unauthenticated() {
    let mut db = test_db();
    seed_directory(&mut db);

    let result = login(
        &mut db,
        &LoginRequest {
            uid: String::from("uid-a"),
            password: String::from("wrong-password"),
        },
    );
    assert!(matches!(result, Err(ApiError::Unauthenticated { .. })));

    let result = login(
        &mut db,
        &LoginRequest {
            uid: String::from("uid-ghost"),
            password: String::from("whatever-long"),
        },
    );
    assert!(matches!(result, Err(ApiError::Unauthenticated { .. })));
}

#[test]
fn admin_listing_includes_every_account() {
    let mut db = test_db();
    seed_directory(&mut db);
    let admin = caller(&mut db, "admin-1");

    let listing = list_lawyers(&mut db, &admin).expect("Listing");
    // admin + a + b + c + creator
    assert_eq!(listing.lawyers.len(), 5);
    // Sorted by email: a@example.com sorts ahead of admin@example.com.
    assert_eq!(listing.lawyers[0].uid, "uid-a");
    assert_eq!(listing.lawyers[1].uid, "admin-1");
}

#[test]
fn specialty_catalog_create_and_list() {
    let mut db = test_db();
    seed_directory(&mut db);
    let admin = caller(&mut db, "admin-1");

    create_specialty(
        &mut db,
        &CreateSpecialtyRequest {
            specialty_id: String::from("laboral"),
            name: String::from("Derecho Laboral"),
        },
        &admin,
    )
    .expect("Specialty created");

    let listing = list_specialties(&mut db).expect("Listing");
    assert_eq!(listing.specialties.len(), 2);
    assert_eq!(listing.specialties[0].specialty_id, "civil");
    assert_eq!(listing.specialties[1].name, "Derecho Laboral");
}

#[test]
fn empty_specialty_fields_are_rejected() {
    let mut db = test_db();
    seed_directory(&mut db);
    let admin = caller(&mut db, "admin-1");

    let result = create_specialty(
        &mut db,
        &CreateSpecialtyRequest {
            specialty_id: String::from("  "),
            name: String::from("Derecho Laboral"),
        },
        &admin,
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidArgument { ref field, .. }) if field == "specialty_id"
    ));
}
