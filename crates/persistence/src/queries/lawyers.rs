// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Directory queries.
//!
//! This module contains backend-agnostic queries for the lawyer directory
//! and for rotation pool membership. Pool membership reads must happen
//! inside the same transaction as the cursor read and the invitation
//! writes; the assignment mutations call these functions on their own
//! transaction connection.

use causalex::Candidate;
use causalex_domain::{Email, Lawyer, Role, SpecialtyId, UserId};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use std::collections::HashMap;
use tracing::debug;

use crate::data_models::LawyerCredentials;
use crate::diesel_schema::{lawyer_specialties, lawyers};
use crate::error::PersistenceError;

/// Diesel Queryable struct for lawyer directory rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = lawyers)]
struct LawyerRow {
    uid: String,
    email: String,
    role: String,
    is_practicing: i32,
}

fn lawyer_from_row(row: LawyerRow, specialties: Vec<String>) -> Result<Lawyer, PersistenceError> {
    let role: Role = row
        .role
        .parse()
        .map_err(|e| PersistenceError::SerializationError(format!("{e}")))?;
    Ok(Lawyer {
        uid: UserId::new(row.uid),
        email: Email::new(&row.email),
        role,
        is_practicing: row.is_practicing != 0,
        specialties: specialties.into_iter().map(SpecialtyId::new).collect(),
    })
}

backend_fn! {
/// Retrieves a lawyer profile by uid, including their specialties.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the lawyer is not found.
pub fn get_lawyer(conn: &mut _, uid: &str) -> Result<Option<Lawyer>, PersistenceError> {
    debug!("Looking up lawyer by uid: {}", uid);

    let result: Result<LawyerRow, diesel::result::Error> = lawyers::table
        .filter(lawyers::uid.eq(uid))
        .select(LawyerRow::as_select())
        .first(conn);

    match result {
        Ok(row) => {
            let specialties: Vec<String> = lawyer_specialties::table
                .filter(lawyer_specialties::uid.eq(uid))
                .order(lawyer_specialties::specialty_id.asc())
                .select(lawyer_specialties::specialty_id)
                .load(conn)?;
            Ok(Some(lawyer_from_row(row, specialties)?))
        }
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists every lawyer in the directory, ordered by email.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_lawyers(conn: &mut _) -> Result<Vec<Lawyer>, PersistenceError> {
    let rows: Vec<LawyerRow> = lawyers::table
        .order(lawyers::email.asc())
        .select(LawyerRow::as_select())
        .load(conn)?;

    let pairs: Vec<(String, String)> = lawyer_specialties::table
        .order(lawyer_specialties::specialty_id.asc())
        .select((lawyer_specialties::uid, lawyer_specialties::specialty_id))
        .load(conn)?;

    let mut by_uid: HashMap<String, Vec<String>> = HashMap::new();
    for (uid, specialty_id) in pairs {
        by_uid.entry(uid).or_default().push(specialty_id);
    }

    rows.into_iter()
        .map(|row| {
            let specialties = by_uid.remove(&row.uid).unwrap_or_default();
            lawyer_from_row(row, specialties)
        })
        .collect()
}
}

backend_fn! {
/// Lists practicing lawyers, ordered by email.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_practicing_lawyers(conn: &mut _) -> Result<Vec<Lawyer>, PersistenceError> {
    let rows: Vec<LawyerRow> = lawyers::table
        .filter(lawyers::is_practicing.eq(1))
        .order(lawyers::email.asc())
        .select(LawyerRow::as_select())
        .load(conn)?;

    let pairs: Vec<(String, String)> = lawyer_specialties::table
        .order(lawyer_specialties::specialty_id.asc())
        .select((lawyer_specialties::uid, lawyer_specialties::specialty_id))
        .load(conn)?;

    let mut by_uid: HashMap<String, Vec<String>> = HashMap::new();
    for (uid, specialty_id) in pairs {
        by_uid.entry(uid).or_default().push(specialty_id);
    }

    rows.into_iter()
        .map(|row| {
            let specialties = by_uid.remove(&row.uid).unwrap_or_default();
            lawyer_from_row(row, specialties)
        })
        .collect()
}
}

backend_fn! {
/// Pool membership for a specialty rotation pool: practicing accounts
/// covering the specialty. Role is not part of the pool predicate, so a
/// practicing admin rotates like any other lawyer.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn specialty_candidates(
    conn: &mut _,
    specialty_id: &str,
) -> Result<Vec<Candidate>, PersistenceError> {
    let rows: Vec<(String, String)> = lawyer_specialties::table
        .inner_join(lawyers::table)
        .filter(lawyer_specialties::specialty_id.eq(specialty_id))
        .filter(lawyers::is_practicing.eq(1))
        .select((lawyers::uid, lawyers::email))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(uid, email)| Candidate {
            uid: UserId::new(uid),
            email: Email::new(&email),
        })
        .collect())
}
}

backend_fn! {
/// Pool membership for the shared direct pool: every practicing account,
/// regardless of role.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn direct_candidates(conn: &mut _) -> Result<Vec<Candidate>, PersistenceError> {
    let rows: Vec<(String, String)> = lawyers::table
        .filter(lawyers::is_practicing.eq(1))
        .select((lawyers::uid, lawyers::email))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(uid, email)| Candidate {
            uid: UserId::new(uid),
            email: Email::new(&email),
        })
        .collect())
}
}

backend_fn! {
/// Retrieves stored credentials for a lawyer account.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the lawyer is not found.
pub fn get_credentials(
    conn: &mut _,
    uid: &str,
) -> Result<Option<LawyerCredentials>, PersistenceError> {
    let result: Result<(String, String), diesel::result::Error> = lawyers::table
        .filter(lawyers::uid.eq(uid))
        .select((lawyers::uid, lawyers::password_hash))
        .first(conn);

    match result {
        Ok((uid, password_hash)) => Ok(Some(LawyerCredentials { uid, password_hash })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

/// Verifies a password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if password verification fails.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))
}
