// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Round-robin candidate selection over a rotation pool.
//!
//! The rotation cursor is a persisted index into the candidate list sorted
//! by email. The cursor read, the candidate fetch, and the cursor write-back
//! must all happen inside one transaction: the wrapped cursor is only
//! meaningful against the list length observed at selection time.

use crate::error::CoreError;
use causalex_domain::{Email, PoolId, UserId};
use std::collections::HashSet;

/// A lawyer eligible for selection, with the email snapshot that orders the
/// rotation and is denormalized onto the invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The lawyer's identifier.
    pub uid: UserId,
    /// The lawyer's email at read time.
    pub email: Email,
}

/// A cursor write destined for the rotation state store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorUpdate {
    /// The pool whose cursor advances.
    pub pool: PoolId,
    /// The new cursor value, already wrapped modulo the candidate count.
    pub next_cursor: i64,
}

/// The outcome of one rotation selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationSelection {
    /// The selected invitees, in pick order.
    pub picked: Vec<Candidate>,
    /// The cursor to write back for this pool.
    pub cursor_update: CursorUpdate,
}

/// Selects `needed` invitees from a rotation pool.
///
/// Blocked candidates are removed, the remainder is sorted by email
/// ascending (emails are unique, so the order is total), and the sorted list
/// is walked from `cursor mod len`, wrapping, collecting distinct uids until
/// `needed` picks are made. The returned cursor is the final walk index
/// wrapped modulo the list length.
///
/// # Errors
///
/// Returns `CoreError::InsufficientCandidates` if fewer than `needed`
/// unblocked candidates remain.
pub fn select_invitees(
    pool: PoolId,
    candidates: Vec<Candidate>,
    blocked: &HashSet<UserId>,
    cursor: i64,
    needed: usize,
) -> Result<RotationSelection, CoreError> {
    let mut eligible: Vec<Candidate> = candidates
        .into_iter()
        .filter(|candidate| !blocked.contains(&candidate.uid))
        .collect();
    eligible.sort_by(|a, b| a.email.cmp(&b.email));

    if eligible.len() < needed {
        return Err(CoreError::InsufficientCandidates {
            pool,
            needed,
            available: eligible.len(),
        });
    }

    let len = eligible.len();
    let mut picked: Vec<Candidate> = Vec::with_capacity(needed);
    // A negative cursor never occurs in practice; treat it as the pool start.
    let mut idx = usize::try_from(cursor).unwrap_or(0) % len;
    let mut steps = 0usize;

    while picked.len() < needed {
        let candidate = &eligible[idx % len];
        // Safety net for the increment walk; the sorted list itself holds no
        // duplicate uids.
        if !picked.iter().any(|p| p.uid == candidate.uid) {
            picked.push(candidate.clone());
        }
        idx += 1;
        steps += 1;
        if steps > len * 2 {
            // Unreachable given the length check above.
            return Err(CoreError::InsufficientCandidates {
                pool,
                needed,
                available: picked.len(),
            });
        }
    }

    let next_cursor = i64::try_from(idx % len).unwrap_or(0);

    Ok(RotationSelection {
        picked,
        cursor_update: CursorUpdate { pool, next_cursor },
    })
}
