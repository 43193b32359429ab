// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The allocation and eligibility engine.
//!
//! Everything in this crate is a pure function over a snapshot of the
//! record store plus an injected "now". Status is never stored; it is
//! recomputed from timestamps and occupancy at every read. The admission
//! pipelines preserve a strict, documented rule order: reordering them
//! changes observable precedence and is a behavioral regression, not a
//! refactor.

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

mod admission;
mod credit;
mod error;
mod rotation;
mod status;

#[cfg(test)]
mod tests;

pub use admission::{
    EventAdmission, ShiftAdmission, WEEKLY_SHIFT_QUOTA, evaluate_event_signup,
    evaluate_shift_signup,
};
pub use credit::{
    AssignmentKind, EventAssignment, HistoryEntry, ShiftAssignment, history, total_hours,
};
pub use error::CoreError;
pub use rotation::{ensure_monday, rotation_week_for};
pub use status::{resolve_event_status, resolve_occurrence_status};
