// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod authorization_tests;
mod case_tests;
mod directory_tests;
mod respond_tests;

use crate::auth::{AuthenticatedCaller, resolve_caller};
use crate::request_response::CreateCaseRequest;
use causalex_persistence::Persistence;

pub fn test_db() -> Persistence {
    Persistence::new_in_memory().expect("In-memory database")
}

/// Seeds a directory with one admin, one civil specialty covered by
/// three practicing lawyers (emails sorting `a < b < c < z`), and a
/// practicing creator.
pub fn seed_directory(db: &mut Persistence) {
    db.create_specialty("civil", "Derecho Civil")
        .expect("Specialty created");
    db.create_lawyer(
        "admin-1",
        "admin@example.com",
        "admin",
        true,
        "admin-password",
        &[],
    )
    .expect("Admin created");
    for (uid, email) in [
        ("uid-a", "a@example.com"),
        ("uid-b", "b@example.com"),
        ("uid-c", "c@example.com"),
        ("creator", "z@example.com"),
    ] {
        db.create_lawyer(
            uid,
            email,
            "lawyer",
            true,
            "secret-password",
            &[String::from("civil")],
        )
        .expect("Lawyer created");
    }
}

pub fn caller(db: &mut Persistence, uid: &str) -> AuthenticatedCaller {
    resolve_caller(db, uid).expect("Caller resolved")
}

pub fn case_request(specialty_id: &str, mode: &str, participates: bool) -> CreateCaseRequest {
    CreateCaseRequest {
        caratula_tentativa: String::from("Perez c/ Gomez s/ danos"),
        specialty_id: specialty_id.to_string(),
        objeto: String::from("Danos y perjuicios"),
        resumen: String::from("Accidente de transito"),
        jurisdiccion: String::from("caba"),
        brought_by_participates: participates,
        assignment_mode: mode.to_string(),
        direct_assignees_uids: Vec::new(),
        direct_justification: String::new(),
    }
}
