// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! This module contains all state-changing operations for the persistence
//! layer. Most mutations use Diesel DSL and are backend-agnostic, with
//! minimal use of backend-specific helpers (e.g., `last_insert_rowid()`
//! for `SQLite`).
//!
//! ## Module Organization
//!
//! - `assignment` — The two transactional engine operations (case
//!   creation and invitation response) plus their write helpers
//! - `lawyers` — Lawyer account mutations
//! - `specialties` — Specialty catalog mutations

pub mod assignment;
pub mod lawyers;
pub mod specialties;
