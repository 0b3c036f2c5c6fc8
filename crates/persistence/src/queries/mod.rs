// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic query modules.
//!
//! All queries use Diesel DSL and work across all supported database
//! backends. Monomorphic `_sqlite`/`_mysql` variants are generated by the
//! `backend_fn!` macro in the crate root.
//!
//! ## Module Organization
//!
//! - `cases` — Case, assignee, and invitation reads
//! - `lawyers` — Directory reads and rotation pool membership
//! - `rotation` — Per-pool rotation cursor reads
//! - `specialties` — Specialty catalog reads

pub mod cases;
pub mod lawyers;
pub mod rotation;
pub mod specialties;
