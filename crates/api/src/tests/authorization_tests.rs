// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller resolution and role enforcement tests.

use crate::auth::resolve_caller;
use crate::error::ApiError;
use crate::handlers::{
    create_lawyer, create_specialty, list_lawyers, list_practicing_lawyers, set_lawyer_password,
    update_lawyer,
};
use crate::request_response::{
    CreateLawyerRequest, CreateSpecialtyRequest, SetPasswordRequest, UpdateLawyerRequest,
};
use crate::tests::{caller, seed_directory, test_db};
use causalex_domain::Role;

#[test]
fn resolve_caller_yields_directory_role() {
    let mut db = test_db();
    seed_directory(&mut db);

    let admin = resolve_caller(&mut db, "admin-1").expect("Admin resolved");
    assert_eq!(admin.role, Role::Admin);

    let lawyer = resolve_caller(&mut db, "uid-a").expect("Lawyer resolved");
    assert_eq!(lawyer.role, Role::Lawyer);
}

#[test]
fn empty_caller_is_unauthenticated() {
    let mut db = test_db();
    seed_directory(&mut db);

    let result = resolve_caller(&mut db, "  ");
    assert!(matches!(result, Err(ApiError::Unauthenticated { .. })));
}

#[test]
fn caller_without_a_profile_is_a_precondition_failure() {
    let mut db = test_db();
    seed_directory(&mut db);

    // The uid arrived over a trusted transport, so the missing profile
    // is a state conflict, not a credential failure.
    let result = resolve_caller(&mut db, "uid-ghost");
    assert!(matches!(
        result,
        Err(ApiError::FailedPrecondition { ref message }) if message.contains("uid-ghost")
    ));
}

#[test]
fn directory_mutations_require_admin() {
    let mut db = test_db();
    seed_directory(&mut db);
    let lawyer = caller(&mut db, "uid-a");

    let create = create_lawyer(
        &mut db,
        CreateLawyerRequest {
            uid: String::from("uid-d"),
            email: String::from("d@example.com"),
            password: String::from("hunter2-long"),
            role: String::from("lawyer"),
            is_practicing: true,
            specialties: Vec::new(),
        },
        &lawyer,
    );
    assert!(matches!(create, Err(ApiError::PermissionDenied { .. })));

    let update = update_lawyer(
        &mut db,
        "uid-b",
        UpdateLawyerRequest {
            email: None,
            is_practicing: Some(false),
            specialties: None,
        },
        &lawyer,
    );
    assert!(matches!(update, Err(ApiError::PermissionDenied { .. })));

    let password = set_lawyer_password(
        &mut db,
        "uid-b",
        &SetPasswordRequest {
            password: String::from("new-password"),
        },
        &lawyer,
    );
    assert!(matches!(password, Err(ApiError::PermissionDenied { .. })));

    let specialty = create_specialty(
        &mut db,
        &CreateSpecialtyRequest {
            specialty_id: String::from("laboral"),
            name: String::from("Derecho Laboral"),
        },
        &lawyer,
    );
    assert!(matches!(specialty, Err(ApiError::PermissionDenied { .. })));

    let listing = list_lawyers(&mut db, &lawyer);
    assert!(matches!(listing, Err(ApiError::PermissionDenied { .. })));
}

#[test]
fn denied_mutations_leave_the_directory_unchanged() {
    let mut db = test_db();
    seed_directory(&mut db);
    let lawyer = caller(&mut db, "uid-a");

    let _ = create_lawyer(
        &mut db,
        CreateLawyerRequest {
            uid: String::from("uid-d"),
            email: String::from("d@example.com"),
            password: String::from("hunter2-long"),
            role: String::from("lawyer"),
            is_practicing: true,
            specialties: Vec::new(),
        },
        &lawyer,
    );

    assert!(
        db.get_lawyer("uid-d")
            .expect("Lookup")
            .is_none()
    );
}

#[test]
fn practicing_listing_is_open_to_lawyers() {
    let mut db = test_db();
    seed_directory(&mut db);

    let listing = list_practicing_lawyers(&mut db).expect("Listing");
    // Practicing is the only gate, so the practicing admin is listed too.
    assert_eq!(listing.lawyers.len(), 5);
    assert!(listing.lawyers.iter().any(|lawyer| lawyer.uid == "admin-1"));
    // Ordered by email; a@example.com sorts ahead of admin@example.com.
    assert_eq!(listing.lawyers[0].uid, "uid-a");
}
