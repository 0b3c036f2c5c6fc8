// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Planning for the `RespondToInvite` operation.
//!
//! A response either confirms the invitee on the case or, on rejection while
//! capacity remains open, triggers exactly one replacement invitation chosen
//! from the matching rotation pool. Both outcomes are assembled here as pure
//! write plans; the persistence layer executes them in the transaction that
//! captured the reads.

use crate::error::CoreError;
use crate::selection::{Candidate, CursorUpdate};
use causalex_domain::{
    AssignmentMode, Case, CaseStatus, Decision, Invitation, InviteStatus, PoolId, UserId,
    resolve_case_status,
};
use std::collections::HashSet;
use time::OffsetDateTime;

/// The reads captured for one invitation response, all taken inside the
/// same transaction that will apply the resulting writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseContext {
    /// The case the invitation belongs to.
    pub case: Case,
    /// The invitation being answered.
    pub invitation: Invitation,
    /// Every uid ever invited to this case, across all invitation states.
    pub already_invited: Vec<UserId>,
}

/// Validates that the caller may answer this invitation.
///
/// # Errors
///
/// Returns `CoreError::NotInvitee` if the caller is not the invited lawyer,
/// or `CoreError::AlreadyResponded` if the invitation left `pending`.
pub fn authorize_response(context: &ResponseContext, responder: &UserId) -> Result<(), CoreError> {
    if &context.invitation.invited_uid != responder {
        return Err(CoreError::NotInvitee {
            invited_uid: context.invitation.invited_uid.clone(),
        });
    }
    if context.invitation.status != InviteStatus::Pending {
        return Err(CoreError::AlreadyResponded);
    }
    Ok(())
}

/// Uids that must never receive the replacement invitation: everyone already
/// confirmed, everyone ever invited, and the creator when they participate.
#[must_use]
pub fn blocked_uids(context: &ResponseContext) -> HashSet<UserId> {
    let mut blocked: HashSet<UserId> = context
        .case
        .confirmed_assignees_uids
        .iter()
        .cloned()
        .collect();
    blocked.extend(context.already_invited.iter().cloned());
    if context.case.brought_by_participates {
        blocked.insert(context.case.brought_by_uid.clone());
    }
    blocked
}

/// Whether a rejection must trigger a replacement invitation.
///
/// True only while the case is not yet fully staffed.
#[must_use]
pub fn needs_replacement(context: &ResponseContext, decision: Decision) -> bool {
    decision == Decision::Rejected
        && context.case.status != CaseStatus::Assigned
        && context.case.remaining_needed() > 0
}

/// The rotation pool a replacement for this case draws from.
///
/// Auto-mode cases rotate within their specialty pool; direct-mode cases
/// share one global pool of practicing lawyers.
#[must_use]
pub fn replacement_pool(context: &ResponseContext) -> PoolId {
    match context.case.assignment_mode {
        AssignmentMode::Auto => PoolId::Specialty(context.case.specialty_id.clone()),
        AssignmentMode::Direct => PoolId::Direct,
    }
}

/// Case fields rewritten by a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseUpdate {
    /// The new confirmed set, deduplicated.
    pub confirmed_assignees_uids: Vec<UserId>,
    /// The status the invariant demands after this response.
    pub status: CaseStatus,
}

/// The single replacement invitation written after a rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementPlan {
    /// The new pending invitation.
    pub invitation: Invitation,
    /// The cursor advance for the consulted pool.
    pub cursor_update: CursorUpdate,
}

/// The write set produced by planning an invitation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePlan {
    /// The terminal status the answered invitation settles into.
    pub invite_status: InviteStatus,
    /// Response timestamp, written to the invitation.
    pub responded_at: OffsetDateTime,
    /// Case mutation, absent when a rejection changes nothing.
    pub case_update: Option<CaseUpdate>,
    /// Replacement invitation, present only on a rejection with open
    /// capacity and a non-exhausted pool.
    pub replacement: Option<ReplacementPlan>,
}

/// Assembles the writes for an authorized response.
///
/// `replacement_pick` must be `Some` exactly when [`needs_replacement`]
/// returned true and the pool selection succeeded; an exhausted pool aborts
/// the whole transaction before this point, so the rejection itself is
/// never recorded (observed source behavior, preserved).
#[must_use]
pub fn plan_response(
    context: &ResponseContext,
    responder: &UserId,
    decision: Decision,
    replacement_pick: Option<(Candidate, CursorUpdate)>,
    now: OffsetDateTime,
) -> ResponsePlan {
    match decision {
        Decision::Accepted => {
            let mut confirmed = context.case.confirmed_assignees_uids.clone();
            if !confirmed.contains(responder) {
                confirmed.push(responder.clone());
            }
            let status =
                resolve_case_status(confirmed.len(), context.case.required_assignees_count);
            ResponsePlan {
                invite_status: InviteStatus::Accepted,
                responded_at: now,
                case_update: Some(CaseUpdate {
                    confirmed_assignees_uids: confirmed,
                    status,
                }),
                replacement: None,
            }
        }
        Decision::Rejected => {
            let replacement = replacement_pick.map(|(candidate, cursor_update)| ReplacementPlan {
                invitation: Invitation {
                    invite_id: None,
                    case_id: context.invitation.case_id,
                    invited_uid: candidate.uid,
                    invited_email: candidate.email,
                    status: InviteStatus::Pending,
                    mode: context.case.assignment_mode,
                    direct_justification: if context.case.assignment_mode
                        == AssignmentMode::Direct
                    {
                        context.case.direct_justification.clone()
                    } else {
                        String::new()
                    },
                    invited_at: now,
                    responded_at: None,
                    created_by_uid: context.case.brought_by_uid.clone(),
                },
                cursor_update,
            });

            // A replacement forces the case back to draft, covering the
            // mixed-order sequence where an accept already closed the case
            // before a late rejection re-opened a seat.
            let case_update = replacement.as_ref().map(|_| CaseUpdate {
                confirmed_assignees_uids: context.case.confirmed_assignees_uids.clone(),
                status: CaseStatus::Draft,
            });

            ResponsePlan {
                invite_status: InviteStatus::Rejected,
                responded_at: now,
                case_update,
                replacement,
            }
        }
    }
}
