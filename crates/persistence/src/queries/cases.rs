// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Case and invitation queries.

use causalex_domain::{
    Case, CaseId, Email, Invitation, InviteId, SpecialtyId, UserId,
};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::data_models::parse_timestamp;
use crate::diesel_schema::{case_assignees, cases, invites};
use crate::error::PersistenceError;

/// Diesel Queryable struct for case rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = cases)]
pub(crate) struct CaseRow {
    case_id: i64,
    caratula_tentativa: String,
    specialty_id: String,
    objeto: String,
    resumen: String,
    jurisdiccion: String,
    brought_by_uid: String,
    brought_by_participates: i32,
    assignment_mode: String,
    direct_assignees_json: String,
    direct_justification: String,
    required_assignees_count: i32,
    status: String,
    created_at: String,
}

/// Diesel Queryable struct for invitation rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = invites)]
pub(crate) struct InviteRow {
    invite_id: i64,
    case_id: i64,
    invited_uid: String,
    invited_email: String,
    status: String,
    mode: String,
    direct_justification: String,
    invited_at: String,
    responded_at: Option<String>,
    created_by_uid: String,
}

pub(crate) fn case_from_row(
    row: CaseRow,
    confirmed_uids: Vec<String>,
) -> Result<Case, PersistenceError> {
    let direct_assignees: Vec<String> = serde_json::from_str(&row.direct_assignees_json)?;
    Ok(Case {
        case_id: Some(CaseId::new(row.case_id)),
        caratula_tentativa: row.caratula_tentativa,
        specialty_id: SpecialtyId::new(row.specialty_id),
        objeto: row.objeto,
        resumen: row.resumen,
        jurisdiccion: row
            .jurisdiccion
            .parse()
            .map_err(|e| PersistenceError::SerializationError(format!("{e}")))?,
        brought_by_uid: UserId::new(row.brought_by_uid),
        brought_by_participates: row.brought_by_participates != 0,
        assignment_mode: row
            .assignment_mode
            .parse()
            .map_err(|e| PersistenceError::SerializationError(format!("{e}")))?,
        direct_assignees_uids: direct_assignees.into_iter().map(UserId::new).collect(),
        direct_justification: row.direct_justification,
        required_assignees_count: usize::try_from(row.required_assignees_count)
            .map_err(|e| PersistenceError::SerializationError(format!("{e}")))?,
        confirmed_assignees_uids: confirmed_uids.into_iter().map(UserId::new).collect(),
        status: row
            .status
            .parse()
            .map_err(|e| PersistenceError::SerializationError(format!("{e}")))?,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

pub(crate) fn invitation_from_row(row: InviteRow) -> Result<Invitation, PersistenceError> {
    Ok(Invitation {
        invite_id: Some(InviteId::new(row.invite_id)),
        case_id: CaseId::new(row.case_id),
        invited_uid: UserId::new(row.invited_uid),
        invited_email: Email::new(&row.invited_email),
        status: row
            .status
            .parse()
            .map_err(|e| PersistenceError::SerializationError(format!("{e}")))?,
        mode: row
            .mode
            .parse()
            .map_err(|e| PersistenceError::SerializationError(format!("{e}")))?,
        direct_justification: row.direct_justification,
        invited_at: parse_timestamp(&row.invited_at)?,
        responded_at: row
            .responded_at
            .as_deref()
            .map(parse_timestamp)
            .transpose()?,
        created_by_uid: UserId::new(row.created_by_uid),
    })
}

backend_fn! {
/// Confirmed assignee uids for a case, in acceptance order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn confirmed_assignees(conn: &mut _, case_id: i64) -> Result<Vec<String>, PersistenceError> {
    Ok(case_assignees::table
        .filter(case_assignees::case_id.eq(case_id))
        .order(case_assignees::id.asc())
        .select(case_assignees::uid)
        .load(conn)?)
}
}

backend_fn! {
/// Retrieves a case with its confirmed assignee set.
///
/// # Errors
///
/// Returns `PersistenceError::CaseNotFound` if the case does not exist.
pub fn get_case(conn: &mut _, case_id: i64) -> Result<Case, PersistenceError> {
    debug!("Loading case: {}", case_id);

    let result: Result<CaseRow, diesel::result::Error> = cases::table
        .filter(cases::case_id.eq(case_id))
        .select(CaseRow::as_select())
        .first(conn);

    match result {
        Ok(row) => {
            let confirmed: Vec<String> = case_assignees::table
                .filter(case_assignees::case_id.eq(case_id))
                .order(case_assignees::id.asc())
                .select(case_assignees::uid)
                .load(conn)?;
            case_from_row(row, confirmed)
        }
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::CaseNotFound(case_id)),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Every invitation ever written for a case, in creation order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_invites_for_case(
    conn: &mut _,
    case_id: i64,
) -> Result<Vec<Invitation>, PersistenceError> {
    let rows: Vec<InviteRow> = invites::table
        .filter(invites::case_id.eq(case_id))
        .order(invites::invite_id.asc())
        .select(InviteRow::as_select())
        .load(conn)?;

    rows.into_iter().map(invitation_from_row).collect()
}
}

backend_fn! {
/// Retrieves one invitation, verifying it belongs to the case.
///
/// # Errors
///
/// Returns `PersistenceError::InviteNotFound` if no such invitation exists
/// on the case.
pub fn get_invite(
    conn: &mut _,
    case_id: i64,
    invite_id: i64,
) -> Result<Invitation, PersistenceError> {
    let result: Result<InviteRow, diesel::result::Error> = invites::table
        .filter(invites::invite_id.eq(invite_id))
        .filter(invites::case_id.eq(case_id))
        .select(InviteRow::as_select())
        .first(conn);

    match result {
        Ok(row) => invitation_from_row(row),
        Err(diesel::result::Error::NotFound) => {
            Err(PersistenceError::InviteNotFound { case_id, invite_id })
        }
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Cases a lawyer is involved in: created by them or carrying them as a
/// confirmed assignee. Ordered by newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_cases_for_lawyer(conn: &mut _, uid: &str) -> Result<Vec<Case>, PersistenceError> {
    let created: Vec<i64> = cases::table
        .filter(cases::brought_by_uid.eq(uid))
        .select(cases::case_id)
        .load(conn)?;
    let assigned: Vec<i64> = case_assignees::table
        .filter(case_assignees::uid.eq(uid))
        .select(case_assignees::case_id)
        .load(conn)?;

    let ids: BTreeSet<i64> = created.into_iter().chain(assigned).collect();
    let ids: Vec<i64> = ids.into_iter().collect();

    let rows: Vec<CaseRow> = cases::table
        .filter(cases::case_id.eq_any(&ids))
        .select(CaseRow::as_select())
        .load(conn)?;
    let assignee_rows: Vec<(i64, String)> = case_assignees::table
        .filter(case_assignees::case_id.eq_any(&ids))
        .order(case_assignees::id.asc())
        .select((case_assignees::case_id, case_assignees::uid))
        .load(conn)?;

    let mut confirmed_by_case: HashMap<i64, Vec<String>> = HashMap::new();
    for (case_id, assignee_uid) in assignee_rows {
        confirmed_by_case.entry(case_id).or_default().push(assignee_uid);
    }

    let mut result: Vec<Case> = rows
        .into_iter()
        .map(|row| {
            let confirmed = confirmed_by_case.remove(&row.case_id).unwrap_or_default();
            case_from_row(row, confirmed)
        })
        .collect::<Result<_, _>>()?;
    result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(result)
}
}

backend_fn! {
/// Pending invitations addressed to a lawyer, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_pending_invites(conn: &mut _, uid: &str) -> Result<Vec<Invitation>, PersistenceError> {
    let rows: Vec<InviteRow> = invites::table
        .filter(invites::invited_uid.eq(uid))
        .filter(invites::status.eq("pending"))
        .order(invites::invite_id.desc())
        .select(InviteRow::as_select())
        .load(conn)?;

    rows.into_iter().map(invitation_from_row).collect()
}
}
