// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use causalex_domain::{Case, Invitation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::PersistenceError;

/// The persisted outcome of a case creation: the stored case plus every
/// invitation written alongside it, with their assigned ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCase {
    pub case: Case,
    pub invitations: Vec<Invitation>,
}

/// The persisted outcome of an invitation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteResponse {
    /// The case after the response was applied.
    pub case: Case,
    /// The answered invitation in its settled state.
    pub invitation: Invitation,
    /// The replacement invitation issued for a rejection, if any.
    pub replacement: Option<Invitation>,
}

/// A lawyer directory entry, one specialty id per row element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialtyData {
    pub specialty_id: String,
    pub name: String,
}

/// Stored credentials for a lawyer account.
#[derive(Debug, Clone)]
pub struct LawyerCredentials {
    pub uid: String,
    pub password_hash: String,
}

/// Formats a timestamp for Text column storage (RFC 3339).
pub(crate) fn format_timestamp(ts: OffsetDateTime) -> Result<String, PersistenceError> {
    ts.format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(format!("Invalid timestamp: {e}")))
}

/// Parses a stored Text timestamp back into an `OffsetDateTime`.
pub(crate) fn parse_timestamp(raw: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(raw, &Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(format!("Invalid timestamp {raw}: {e}")))
}
