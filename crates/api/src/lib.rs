// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Causalex assignment engine.
//!
//! This crate sits between the HTTP server and the persistence layer. It
//! owns the API contract: request/response DTOs, caller resolution and
//! role-based authorization, input validation, and the explicit
//! translation of domain/engine/persistence errors into the six API
//! error categories. Handlers are synchronous and transport-agnostic;
//! the server crate wraps them in routes.

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
#![allow(clippy::multiple_crate_versions)]

pub mod auth;
pub mod error;
pub mod handlers;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedCaller, AuthorizationService, resolve_caller};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    DecisionNotification, RespondOutcome, create_case, create_lawyer, create_specialty, get_case,
    list_lawyers, list_my_cases, list_pending_invites, list_practicing_lawyers, list_specialties,
    login, respond_to_invite, set_lawyer_password, update_lawyer,
};
pub use request_response::{
    CaseInfo, CreateCaseRequest, CreateCaseResponse, CreateLawyerRequest, CreateLawyerResponse,
    CreateSpecialtyRequest, CreateSpecialtyResponse, GetCaseResponse, InviteInfo, LawyerInfo,
    ListCasesResponse, ListLawyersResponse, ListPendingInvitesResponse, ListSpecialtiesResponse,
    LoginRequest, LoginResponse, RespondToInviteRequest, RespondToInviteResponse,
    SetPasswordRequest, SetPasswordResponse, SpecialtyInfo, UpdateLawyerRequest,
    UpdateLawyerResponse,
};
