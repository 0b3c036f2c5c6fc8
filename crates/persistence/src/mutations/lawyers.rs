// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lawyer account mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use crate::diesel_schema::{lawyer_specialties, lawyers};
use crate::error::PersistenceError;

backend_fn! {
/// Creates a new lawyer account.
///
/// The password is hashed with bcrypt before storage. Specialty links are
/// written in the same call.
///
/// # Errors
///
/// Returns `PersistenceError::LawyerAlreadyExists` if the uid is taken,
/// or an error if the account cannot be created.
pub fn create_lawyer(
    conn: &mut _,
    uid: &str,
    email: &str,
    role: &str,
    is_practicing: bool,
    password: &str,
    specialties: &[String],
) -> Result<(), PersistenceError> {
    info!("Creating lawyer with uid: {}, role: {}", uid, role);

    let existing: i64 = lawyers::table
        .filter(lawyers::uid.eq(uid))
        .count()
        .get_result(conn)?;
    if existing > 0 {
        return Err(PersistenceError::LawyerAlreadyExists(uid.to_string()));
    }

    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    diesel::insert_into(lawyers::table)
        .values((
            lawyers::uid.eq(uid),
            lawyers::email.eq(email),
            lawyers::role.eq(role),
            lawyers::is_practicing.eq(i32::from(is_practicing)),
            lawyers::password_hash.eq(&password_hash),
        ))
        .execute(conn)?;

    for specialty_id in specialties {
        diesel::insert_into(lawyer_specialties::table)
            .values((
                lawyer_specialties::uid.eq(uid),
                lawyer_specialties::specialty_id.eq(specialty_id),
            ))
            .execute(conn)?;
    }

    info!("Created lawyer: {}", uid);
    Ok(())
}
}

backend_fn! {
/// Updates a lawyer's profile.
///
/// Only the supplied fields change. Passing specialties replaces the full
/// specialty set.
///
/// # Errors
///
/// Returns `PersistenceError::LawyerNotFound` if the uid is unknown, or
/// an error if the update fails.
pub fn update_lawyer_profile(
    conn: &mut _,
    uid: &str,
    email: Option<&str>,
    is_practicing: Option<bool>,
    specialties: Option<&[String]>,
) -> Result<(), PersistenceError> {
    info!("Updating profile for lawyer: {}", uid);

    let existing: i64 = lawyers::table
        .filter(lawyers::uid.eq(uid))
        .count()
        .get_result(conn)?;
    if existing == 0 {
        return Err(PersistenceError::LawyerNotFound(uid.to_string()));
    }

    if let Some(email) = email {
        diesel::update(lawyers::table)
            .filter(lawyers::uid.eq(uid))
            .set(lawyers::email.eq(email))
            .execute(conn)?;
    }
    if let Some(is_practicing) = is_practicing {
        diesel::update(lawyers::table)
            .filter(lawyers::uid.eq(uid))
            .set(lawyers::is_practicing.eq(i32::from(is_practicing)))
            .execute(conn)?;
    }
    if let Some(specialties) = specialties {
        diesel::delete(lawyer_specialties::table)
            .filter(lawyer_specialties::uid.eq(uid))
            .execute(conn)?;
        for specialty_id in specialties {
            diesel::insert_into(lawyer_specialties::table)
                .values((
                    lawyer_specialties::uid.eq(uid),
                    lawyer_specialties::specialty_id.eq(specialty_id),
                ))
                .execute(conn)?;
        }
    }

    diesel::update(lawyers::table)
        .filter(lawyers::uid.eq(uid))
        .set(lawyers::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
            "CURRENT_TIMESTAMP",
        )))
        .execute(conn)?;

    Ok(())
}
}

backend_fn! {
/// Updates a lawyer's password.
///
/// # Errors
///
/// Returns `PersistenceError::LawyerNotFound` if the uid is unknown, or
/// an error if the password cannot be hashed or the update fails.
pub fn set_lawyer_password(
    conn: &mut _,
    uid: &str,
    new_password: &str,
) -> Result<(), PersistenceError> {
    info!("Updating password for lawyer: {}", uid);

    let password_hash: String = bcrypt::hash(new_password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    let rows_affected: usize = diesel::update(lawyers::table)
        .filter(lawyers::uid.eq(uid))
        .set(lawyers::password_hash.eq(&password_hash))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::LawyerNotFound(uid.to_string()));
    }

    Ok(())
}
}
