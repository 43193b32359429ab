// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the volunteer scheduling system.
//!
//! This crate sits between the HTTP server and the engine: it owns the
//! request/response DTOs, the API error contract, the admin gate, and
//! the password policy. Handlers translate wire strings into domain
//! types, run the operation against persistence, and map every
//! lower-layer error through explicit translation functions. Nothing in
//! this crate touches the network.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
pub mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::AuthorizationService;
pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AssignRotationRequest, AssignRotationResponse, CancelSignupResponse, ChangePasswordRequest,
    ChangePasswordResponse, CreateEventRequest, CreateEventResponse, CreateShiftRequest,
    CreateShiftResponse, DeleteEventResponse, DeleteShiftResponse, EventInfo, EventSignupResponse,
    EventStatusResponse, HistoryEntryInfo, HistoryResponse, ListEventsResponse,
    ListShiftsResponse, ListStudentStatsResponse, LoginRequest, LoginResponse,
    LookupRotationResponse, OccurrenceStatusResponse, RegisterStudentRequest,
    RegisterStudentResponse, RotationInfo, ShiftInfo, ShiftSignupResponse, StudentInfo,
    StudentStatsInfo, TotalHoursResponse, UpdateEventResponse, UpdateProfileRequest,
    UpdateProfileResponse,
};
