// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The two transactional engine operations.
//!
//! Case creation and invitation response each run as a single database
//! transaction: every read that influences a decision (pool membership,
//! rotation cursor, invitation set, case fields) is captured on the
//! transaction connection, the pure planning functions compute the write
//! set, and the writes are applied on the same connection. Any error rolls
//! the whole transaction back, including an exhausted replacement pool on
//! a rejection.
//!
//! The orchestrators are written out per backend (like the other composed
//! mutations in this crate) because they call monomorphic query functions;
//! the individual write helpers are generated by `backend_fn!`.

use causalex::{
    Candidate, CreateCaseCommand, ResponseContext, auto_invites_needed, authorize_response,
    blocked_uids, needs_replacement, plan_case, plan_response, replacement_pool, select_invitees,
};
use causalex_domain::{
    AssignmentMode, Case, CaseId, Decision, Invitation, InviteId, PoolId, UserId,
};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use std::collections::HashSet;
use time::OffsetDateTime;
use tracing::info;

use crate::data_models::{CreatedCase, InviteResponse, format_timestamp};
use crate::diesel_schema::{case_assignees, cases, invites, rotation_state};
use crate::error::PersistenceError;
use crate::queries;

backend_fn! {
/// Inserts a case row and returns its assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_case(conn: &mut _, case: &Case) -> Result<i64, PersistenceError> {
    use crate::backend::PersistenceBackend;

    let direct_assignees_json = serde_json::to_string(
        &case
            .direct_assignees_uids
            .iter()
            .map(UserId::value)
            .collect::<Vec<_>>(),
    )?;
    let required = i32::try_from(case.required_assignees_count)
        .map_err(|e| PersistenceError::SerializationError(format!("{e}")))?;

    diesel::insert_into(cases::table)
        .values((
            cases::caratula_tentativa.eq(&case.caratula_tentativa),
            cases::specialty_id.eq(case.specialty_id.value()),
            cases::objeto.eq(&case.objeto),
            cases::resumen.eq(&case.resumen),
            cases::jurisdiccion.eq(case.jurisdiccion.as_str()),
            cases::brought_by_uid.eq(case.brought_by_uid.value()),
            cases::brought_by_participates.eq(i32::from(case.brought_by_participates)),
            cases::assignment_mode.eq(case.assignment_mode.as_str()),
            cases::direct_assignees_json.eq(&direct_assignees_json),
            cases::direct_justification.eq(&case.direct_justification),
            cases::required_assignees_count.eq(required),
            cases::status.eq(case.status.as_str()),
            cases::created_at.eq(&format_timestamp(case.created_at)?),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Inserts one confirmed assignee row.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_assignee(conn: &mut _, case_id: i64, uid: &str) -> Result<(), PersistenceError> {
    diesel::insert_into(case_assignees::table)
        .values((
            case_assignees::case_id.eq(case_id),
            case_assignees::uid.eq(uid),
        ))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Inserts an invitation row for a case and returns its assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_invite(
    conn: &mut _,
    case_id: i64,
    invitation: &Invitation,
) -> Result<i64, PersistenceError> {
    use crate::backend::PersistenceBackend;

    diesel::insert_into(invites::table)
        .values((
            invites::case_id.eq(case_id),
            invites::invited_uid.eq(invitation.invited_uid.value()),
            invites::invited_email.eq(invitation.invited_email.value()),
            invites::status.eq(invitation.status.as_str()),
            invites::mode.eq(invitation.mode.as_str()),
            invites::direct_justification.eq(&invitation.direct_justification),
            invites::invited_at.eq(&format_timestamp(invitation.invited_at)?),
            invites::created_by_uid.eq(invitation.created_by_uid.value()),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Settles an answered invitation: terminal status plus response timestamp.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn settle_invite(
    conn: &mut _,
    invite_id: i64,
    status: &str,
    responded_at: &str,
) -> Result<(), PersistenceError> {
    diesel::update(invites::table)
        .filter(invites::invite_id.eq(invite_id))
        .set((
            invites::status.eq(status),
            invites::responded_at.eq(responded_at),
        ))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Rewrites a case's status.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_case_status(
    conn: &mut _,
    case_id: i64,
    status: &str,
) -> Result<(), PersistenceError> {
    diesel::update(cases::table)
        .filter(cases::case_id.eq(case_id))
        .set(cases::status.eq(status))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Replaces a case's confirmed assignee set.
///
/// # Errors
///
/// Returns an error if the rewrite fails.
pub fn replace_assignees(
    conn: &mut _,
    case_id: i64,
    uids: &[String],
) -> Result<(), PersistenceError> {
    diesel::delete(case_assignees::table)
        .filter(case_assignees::case_id.eq(case_id))
        .execute(conn)?;
    for uid in uids {
        diesel::insert_into(case_assignees::table)
            .values((
                case_assignees::case_id.eq(case_id),
                case_assignees::uid.eq(uid),
            ))
            .execute(conn)?;
    }
    Ok(())
}
}

backend_fn! {
/// Writes the advanced cursor for a rotation pool, creating the row on
/// first use.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn advance_cursor(
    conn: &mut _,
    pool_key: &str,
    next_cursor: i64,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(rotation_state::table)
        .filter(rotation_state::pool_id.eq(pool_key))
        .set(rotation_state::cursor.eq(next_cursor))
        .execute(conn)?;

    if rows_affected == 0 {
        diesel::insert_into(rotation_state::table)
            .values((
                rotation_state::pool_id.eq(pool_key),
                rotation_state::cursor.eq(next_cursor),
            ))
            .execute(conn)?;
    }
    Ok(())
}
}

/// Creates a case with its initial invitations (`SQLite` version).
///
/// # Errors
///
/// Returns an error if the command is invalid, the specialty is unknown,
/// the rotation pool cannot staff the case, or a write fails. Any error
/// rolls back every write.
pub fn create_case_sqlite(
    conn: &mut SqliteConnection,
    command: &CreateCaseCommand,
) -> Result<CreatedCase, PersistenceError> {
    command.validate()?;
    conn.transaction::<CreatedCase, PersistenceError, _>(|conn| {
        let now = OffsetDateTime::now_utc();

        if !queries::specialties::specialty_exists_sqlite(conn, command.specialty_id.value())? {
            return Err(PersistenceError::SpecialtyNotFound(
                command.specialty_id.value().to_string(),
            ));
        }

        let (invitees, cursor_update) = match command.assignment_mode {
            AssignmentMode::Auto => {
                let pool = PoolId::Specialty(command.specialty_id.clone());
                let candidates =
                    queries::lawyers::specialty_candidates_sqlite(conn, command.specialty_id.value())?;
                let mut blocked: HashSet<UserId> = HashSet::new();
                if command.brought_by_participates {
                    blocked.insert(command.creator_uid.clone());
                }
                let cursor = queries::rotation::get_cursor_sqlite(conn, pool.key())?;
                let needed = auto_invites_needed(command.brought_by_participates);
                let selection = select_invitees(pool, candidates, &blocked, cursor, needed)?;
                (selection.picked, Some(selection.cursor_update))
            }
            AssignmentMode::Direct => {
                let mut invitees: Vec<Candidate> = Vec::new();
                for uid in command.deduplicated_direct_assignees() {
                    let lawyer = queries::lawyers::get_lawyer_sqlite(conn, uid.value())?
                        .ok_or_else(|| PersistenceError::LawyerNotFound(uid.value().to_string()))?;
                    invitees.push(Candidate {
                        uid: lawyer.uid,
                        email: lawyer.email,
                    });
                }
                (invitees, None)
            }
        };

        let plan = plan_case(command, invitees, cursor_update, now);

        let case_id = insert_case_sqlite(conn, &plan.case)?;
        for uid in &plan.case.confirmed_assignees_uids {
            insert_assignee_sqlite(conn, case_id, uid.value())?;
        }

        let mut invitations: Vec<Invitation> = Vec::with_capacity(plan.invitations.len());
        for invitation in plan.invitations {
            let invite_id = insert_invite_sqlite(conn, case_id, &invitation)?;
            invitations.push(Invitation {
                invite_id: Some(InviteId::new(invite_id)),
                case_id: CaseId::new(case_id),
                ..invitation
            });
        }

        if let Some(update) = plan.cursor_update {
            advance_cursor_sqlite(conn, update.pool.key(), update.next_cursor)?;
        }

        info!(case_id, invites = invitations.len(), "Case created");

        let case = Case {
            case_id: Some(CaseId::new(case_id)),
            ..plan.case
        };
        Ok(CreatedCase { case, invitations })
    })
}

/// Creates a case with its initial invitations (`MySQL` version).
///
/// # Errors
///
/// Returns an error if the command is invalid, the specialty is unknown,
/// the rotation pool cannot staff the case, or a write fails. Any error
/// rolls back every write.
pub fn create_case_mysql(
    conn: &mut MysqlConnection,
    command: &CreateCaseCommand,
) -> Result<CreatedCase, PersistenceError> {
    command.validate()?;
    conn.transaction::<CreatedCase, PersistenceError, _>(|conn| {
        let now = OffsetDateTime::now_utc();

        if !queries::specialties::specialty_exists_mysql(conn, command.specialty_id.value())? {
            return Err(PersistenceError::SpecialtyNotFound(
                command.specialty_id.value().to_string(),
            ));
        }

        let (invitees, cursor_update) = match command.assignment_mode {
            AssignmentMode::Auto => {
                let pool = PoolId::Specialty(command.specialty_id.clone());
                let candidates =
                    queries::lawyers::specialty_candidates_mysql(conn, command.specialty_id.value())?;
                let mut blocked: HashSet<UserId> = HashSet::new();
                if command.brought_by_participates {
                    blocked.insert(command.creator_uid.clone());
                }
                let cursor = queries::rotation::get_cursor_mysql(conn, pool.key())?;
                let needed = auto_invites_needed(command.brought_by_participates);
                let selection = select_invitees(pool, candidates, &blocked, cursor, needed)?;
                (selection.picked, Some(selection.cursor_update))
            }
            AssignmentMode::Direct => {
                let mut invitees: Vec<Candidate> = Vec::new();
                for uid in command.deduplicated_direct_assignees() {
                    let lawyer = queries::lawyers::get_lawyer_mysql(conn, uid.value())?
                        .ok_or_else(|| PersistenceError::LawyerNotFound(uid.value().to_string()))?;
                    invitees.push(Candidate {
                        uid: lawyer.uid,
                        email: lawyer.email,
                    });
                }
                (invitees, None)
            }
        };

        let plan = plan_case(command, invitees, cursor_update, now);

        let case_id = insert_case_mysql(conn, &plan.case)?;
        for uid in &plan.case.confirmed_assignees_uids {
            insert_assignee_mysql(conn, case_id, uid.value())?;
        }

        let mut invitations: Vec<Invitation> = Vec::with_capacity(plan.invitations.len());
        for invitation in plan.invitations {
            let invite_id = insert_invite_mysql(conn, case_id, &invitation)?;
            invitations.push(Invitation {
                invite_id: Some(InviteId::new(invite_id)),
                case_id: CaseId::new(case_id),
                ..invitation
            });
        }

        if let Some(update) = plan.cursor_update {
            advance_cursor_mysql(conn, update.pool.key(), update.next_cursor)?;
        }

        info!(case_id, invites = invitations.len(), "Case created");

        let case = Case {
            case_id: Some(CaseId::new(case_id)),
            ..plan.case
        };
        Ok(CreatedCase { case, invitations })
    })
}

/// Applies a lawyer's answer to a pending invitation (`SQLite` version).
///
/// # Errors
///
/// Returns an error if the case or invitation is missing, the caller is
/// not the invitee, the invitation already settled, or a rejection needs
/// a replacement and the pool is exhausted. Any error rolls back every
/// write, leaving the invitation pending.
pub fn respond_to_invite_sqlite(
    conn: &mut SqliteConnection,
    case_id: i64,
    invite_id: i64,
    responder: &UserId,
    decision: Decision,
) -> Result<InviteResponse, PersistenceError> {
    conn.transaction::<InviteResponse, PersistenceError, _>(|conn| {
        let now = OffsetDateTime::now_utc();

        let case = queries::cases::get_case_sqlite(conn, case_id)?;
        let invitation = queries::cases::get_invite_sqlite(conn, case_id, invite_id)?;
        let already_invited: Vec<UserId> = queries::cases::list_invites_for_case_sqlite(conn, case_id)?
            .into_iter()
            .map(|invite| invite.invited_uid)
            .collect();
        let context = ResponseContext {
            case,
            invitation,
            already_invited,
        };

        authorize_response(&context, responder)?;

        let replacement_pick = if needs_replacement(&context, decision) {
            let pool = replacement_pool(&context);
            let candidates = match &pool {
                PoolId::Specialty(specialty) => {
                    queries::lawyers::specialty_candidates_sqlite(conn, specialty.value())?
                }
                PoolId::Direct => queries::lawyers::direct_candidates_sqlite(conn)?,
            };
            let blocked = blocked_uids(&context);
            let cursor = queries::rotation::get_cursor_sqlite(conn, pool.key())?;
            let mut selection = select_invitees(pool, candidates, &blocked, cursor, 1)?;
            let candidate = selection.picked.remove(0);
            Some((candidate, selection.cursor_update))
        } else {
            None
        };

        let plan = plan_response(&context, responder, decision, replacement_pick, now);

        settle_invite_sqlite(
            conn,
            invite_id,
            plan.invite_status.as_str(),
            &format_timestamp(plan.responded_at)?,
        )?;

        let mut case = context.case.clone();
        if let Some(update) = plan.case_update {
            let uids: Vec<String> = update
                .confirmed_assignees_uids
                .iter()
                .map(|uid| uid.value().to_string())
                .collect();
            replace_assignees_sqlite(conn, case_id, &uids)?;
            update_case_status_sqlite(conn, case_id, update.status.as_str())?;
            case.confirmed_assignees_uids = update.confirmed_assignees_uids;
            case.status = update.status;
        }

        let replacement = match plan.replacement {
            Some(replacement_plan) => {
                let new_invite_id = insert_invite_sqlite(conn, case_id, &replacement_plan.invitation)?;
                advance_cursor_sqlite(
                    conn,
                    replacement_plan.cursor_update.pool.key(),
                    replacement_plan.cursor_update.next_cursor,
                )?;
                Some(Invitation {
                    invite_id: Some(InviteId::new(new_invite_id)),
                    case_id: CaseId::new(case_id),
                    ..replacement_plan.invitation
                })
            }
            None => None,
        };

        info!(
            case_id,
            invite_id,
            decision = decision.as_str(),
            replaced = replacement.is_some(),
            "Invitation answered"
        );

        let invitation = Invitation {
            status: plan.invite_status,
            responded_at: Some(plan.responded_at),
            ..context.invitation
        };
        Ok(InviteResponse {
            case,
            invitation,
            replacement,
        })
    })
}

/// Applies a lawyer's answer to a pending invitation (`MySQL` version).
///
/// # Errors
///
/// Returns an error if the case or invitation is missing, the caller is
/// not the invitee, the invitation already settled, or a rejection needs
/// a replacement and the pool is exhausted. Any error rolls back every
/// write, leaving the invitation pending.
pub fn respond_to_invite_mysql(
    conn: &mut MysqlConnection,
    case_id: i64,
    invite_id: i64,
    responder: &UserId,
    decision: Decision,
) -> Result<InviteResponse, PersistenceError> {
    conn.transaction::<InviteResponse, PersistenceError, _>(|conn| {
        let now = OffsetDateTime::now_utc();

        let case = queries::cases::get_case_mysql(conn, case_id)?;
        let invitation = queries::cases::get_invite_mysql(conn, case_id, invite_id)?;
        let already_invited: Vec<UserId> = queries::cases::list_invites_for_case_mysql(conn, case_id)?
            .into_iter()
            .map(|invite| invite.invited_uid)
            .collect();
        let context = ResponseContext {
            case,
            invitation,
            already_invited,
        };

        authorize_response(&context, responder)?;

        let replacement_pick = if needs_replacement(&context, decision) {
            let pool = replacement_pool(&context);
            let candidates = match &pool {
                PoolId::Specialty(specialty) => {
                    queries::lawyers::specialty_candidates_mysql(conn, specialty.value())?
                }
                PoolId::Direct => queries::lawyers::direct_candidates_mysql(conn)?,
            };
            let blocked = blocked_uids(&context);
            let cursor = queries::rotation::get_cursor_mysql(conn, pool.key())?;
            let mut selection = select_invitees(pool, candidates, &blocked, cursor, 1)?;
            let candidate = selection.picked.remove(0);
            Some((candidate, selection.cursor_update))
        } else {
            None
        };

        let plan = plan_response(&context, responder, decision, replacement_pick, now);

        settle_invite_mysql(
            conn,
            invite_id,
            plan.invite_status.as_str(),
            &format_timestamp(plan.responded_at)?,
        )?;

        let mut case = context.case.clone();
        if let Some(update) = plan.case_update {
            let uids: Vec<String> = update
                .confirmed_assignees_uids
                .iter()
                .map(|uid| uid.value().to_string())
                .collect();
            replace_assignees_mysql(conn, case_id, &uids)?;
            update_case_status_mysql(conn, case_id, update.status.as_str())?;
            case.confirmed_assignees_uids = update.confirmed_assignees_uids;
            case.status = update.status;
        }

        let replacement = match plan.replacement {
            Some(replacement_plan) => {
                let new_invite_id = insert_invite_mysql(conn, case_id, &replacement_plan.invitation)?;
                advance_cursor_mysql(
                    conn,
                    replacement_plan.cursor_update.pool.key(),
                    replacement_plan.cursor_update.next_cursor,
                )?;
                Some(Invitation {
                    invite_id: Some(InviteId::new(new_invite_id)),
                    case_id: CaseId::new(case_id),
                    ..replacement_plan.invitation
                })
            }
            None => None,
        };

        info!(
            case_id,
            invite_id,
            decision = decision.as_str(),
            replaced = replacement.is_some(),
            "Invitation answered"
        );

        let invitation = Invitation {
            status: plan.invite_status,
            responded_at: Some(plan.responded_at),
            ..context.invitation
        };
        Ok(InviteResponse {
            case,
            invitation,
            replacement,
        })
    })
}
