// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use causalex_domain::{DomainError, PoolId, UserId};

/// Errors raised by the assignment engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The eligible pool cannot cover the requested number of invitees.
    InsufficientCandidates {
        /// The rotation pool that was consulted.
        pool: PoolId,
        /// How many invitees were needed.
        needed: usize,
        /// How many unblocked candidates remained.
        available: usize,
    },
    /// The responder is not the invitee on this invitation.
    NotInvitee {
        /// The lawyer the invitation addresses.
        invited_uid: UserId,
    },
    /// The invitation was already answered; terminal states never transition.
    AlreadyResponded,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::InsufficientCandidates {
                pool,
                needed,
                available,
            } => write!(
                f,
                "Pool '{}' has {available} eligible candidate(s), {needed} needed",
                pool.key()
            ),
            Self::NotInvitee { invited_uid } => {
                write!(f, "Invitation addresses {invited_uid}, not the caller")
            }
            Self::AlreadyResponded => write!(f, "Invitation was already answered"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
