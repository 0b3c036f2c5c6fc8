// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The Causalex assignment engine.
//!
//! This crate holds the pure transactional logic behind the two engine
//! operations, `CreateCase` and `RespondToInvite`. Each operation is modeled
//! as `{reads -> pure computation -> writes}`: the persistence layer captures
//! every read that influences a decision (candidate pool membership, rotation
//! cursor, invitation set, case fields) inside one database transaction,
//! hands the snapshots to this crate, and executes the returned write plan
//! inside the same transaction. Nothing here performs I/O.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod create_case;
mod error;
mod respond;
mod selection;

#[cfg(test)]
mod tests;

pub use create_case::{CasePlan, CreateCaseCommand, auto_invites_needed, plan_case};
pub use error::CoreError;
pub use respond::{
    CaseUpdate, ReplacementPlan, ResponseContext, ResponsePlan, authorize_response, blocked_uids,
    needs_replacement, plan_response, replacement_pool,
};
pub use selection::{Candidate, CursorUpdate, RotationSelection, select_invitees};
