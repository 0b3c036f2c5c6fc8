// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rotation selection tests, including the fairness property.

use super::helpers::{candidate, family_pool};
use crate::{CoreError, select_invitees};
use causalex_domain::{PoolId, SpecialtyId, UserId};
use std::collections::HashSet;

fn family_pool_id() -> PoolId {
    PoolId::Specialty(SpecialtyId::new("familia"))
}

#[test]
fn selection_sorts_by_email_ascending() {
    let selection = select_invitees(family_pool_id(), family_pool(), &HashSet::new(), 0, 2)
        .expect("selection succeeds");

    assert_eq!(selection.picked.len(), 2);
    assert_eq!(selection.picked[0].uid, UserId::new("uid-a"));
    assert_eq!(selection.picked[1].uid, UserId::new("uid-b"));
    assert_eq!(selection.cursor_update.next_cursor, 2);
}

#[test]
fn selection_starts_at_cursor_and_wraps() {
    let selection = select_invitees(family_pool_id(), family_pool(), &HashSet::new(), 2, 2)
        .expect("selection succeeds");

    assert_eq!(selection.picked[0].uid, UserId::new("uid-c"));
    assert_eq!(selection.picked[1].uid, UserId::new("uid-a"));
    assert_eq!(selection.cursor_update.next_cursor, 1);
}

#[test]
fn selection_treats_cursor_modulo_pool_length() {
    let selection = select_invitees(family_pool_id(), family_pool(), &HashSet::new(), 7, 1)
        .expect("selection succeeds");

    // 7 mod 3 = 1 -> picks B, cursor advances to 2.
    assert_eq!(selection.picked[0].uid, UserId::new("uid-b"));
    assert_eq!(selection.cursor_update.next_cursor, 2);
}

#[test]
fn selection_excludes_blocked_uids() {
    let blocked: HashSet<UserId> = [UserId::new("uid-a")].into_iter().collect();
    let selection = select_invitees(family_pool_id(), family_pool(), &blocked, 0, 2)
        .expect("selection succeeds");

    assert_eq!(selection.picked[0].uid, UserId::new("uid-b"));
    assert_eq!(selection.picked[1].uid, UserId::new("uid-c"));
    // Pool length shrank to 2, so the final index wraps to 0.
    assert_eq!(selection.cursor_update.next_cursor, 0);
}

#[test]
fn selection_fails_when_pool_too_small() {
    let blocked: HashSet<UserId> = [UserId::new("uid-a"), UserId::new("uid-b")]
        .into_iter()
        .collect();
    let result = select_invitees(family_pool_id(), family_pool(), &blocked, 0, 2);

    assert!(matches!(
        result,
        Err(CoreError::InsufficientCandidates {
            needed: 2,
            available: 1,
            ..
        })
    ));
}

#[test]
fn selection_fails_on_empty_pool() {
    let result = select_invitees(family_pool_id(), Vec::new(), &HashSet::new(), 0, 1);

    assert!(matches!(
        result,
        Err(CoreError::InsufficientCandidates {
            needed: 1,
            available: 0,
            ..
        })
    ));
}

#[test]
fn selection_picks_are_distinct() {
    let selection = select_invitees(family_pool_id(), family_pool(), &HashSet::new(), 1, 3)
        .expect("selection succeeds");

    let uids: HashSet<&UserId> = selection.picked.iter().map(|c| &c.uid).collect();
    assert_eq!(uids.len(), 3);
}

/// Rotation fairness: over M single-pick selections against N candidates,
/// every candidate is picked exactly once per cycle of N, in sorted-email
/// order, for all M up to 10 * N.
#[test]
fn rotation_is_fair_over_many_selections() {
    let pool: Vec<_> = (0..5)
        .map(|i| candidate(&format!("uid-{i}"), &format!("lawyer{i}@firm.com")))
        .collect();
    let n = pool.len();
    let mut cursor = 0i64;
    let mut pick_counts: Vec<usize> = vec![0; n];

    for round in 0..(10 * n) {
        let selection = select_invitees(family_pool_id(), pool.clone(), &HashSet::new(), cursor, 1)
            .expect("selection succeeds");
        let picked = &selection.picked[0];

        // Sorted-email order cycles deterministically.
        let expected = &pool[round % n];
        assert_eq!(picked.uid, expected.uid, "round {round} broke rotation");

        let slot = round % n;
        pick_counts[slot] += 1;
        cursor = selection.cursor_update.next_cursor;
    }

    // No candidate skipped or repeated within a cycle.
    assert!(pick_counts.iter().all(|&count| count == 10));
}
