// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Specialty catalog mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use crate::diesel_schema::specialties;
use crate::error::PersistenceError;

backend_fn! {
/// Creates a new specialty.
///
/// # Errors
///
/// Returns `PersistenceError::SpecialtyAlreadyExists` if the id is taken,
/// or an error if the insert fails.
pub fn create_specialty(
    conn: &mut _,
    specialty_id: &str,
    name: &str,
) -> Result<(), PersistenceError> {
    info!("Creating specialty: {}", specialty_id);

    let existing: i64 = specialties::table
        .filter(specialties::specialty_id.eq(specialty_id))
        .count()
        .get_result(conn)?;
    if existing > 0 {
        return Err(PersistenceError::SpecialtyAlreadyExists(
            specialty_id.to_string(),
        ));
    }

    diesel::insert_into(specialties::table)
        .values((
            specialties::specialty_id.eq(specialty_id),
            specialties::name.eq(name),
        ))
        .execute(conn)?;

    Ok(())
}
}
