// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rotation cursor reads.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::diesel_schema::rotation_state;
use crate::error::PersistenceError;

backend_fn! {
/// The stored cursor for a rotation pool.
///
/// A pool with no stored row has an implicit cursor of zero; the row is
/// created on first advance.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_cursor(conn: &mut _, pool_key: &str) -> Result<i64, PersistenceError> {
    let result: Result<i64, diesel::result::Error> = rotation_state::table
        .filter(rotation_state::pool_id.eq(pool_key))
        .select(rotation_state::cursor)
        .first(conn);

    match result {
        Ok(cursor) => Ok(cursor),
        Err(diesel::result::Error::NotFound) => Ok(0),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}
