// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Specialty catalog queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::SpecialtyData;
use crate::diesel_schema::specialties;
use crate::error::PersistenceError;

backend_fn! {
/// Lists every specialty in the catalog, ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_specialties(conn: &mut _) -> Result<Vec<SpecialtyData>, PersistenceError> {
    let rows: Vec<(String, String)> = specialties::table
        .order(specialties::specialty_id.asc())
        .select((specialties::specialty_id, specialties::name))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(specialty_id, name)| SpecialtyData { specialty_id, name })
        .collect())
}
}

backend_fn! {
/// Whether a specialty exists in the catalog.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn specialty_exists(conn: &mut _, specialty_id: &str) -> Result<bool, PersistenceError> {
    let count: i64 = specialties::table
        .filter(specialties::specialty_id.eq(specialty_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}
}
