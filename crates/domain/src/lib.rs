// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod types;
mod validation;
mod week;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use types::{
    Event, EventSignup, EventStatus, GradeLimit, OccurrenceStatus, RecurringShift, ShiftSignup,
    SignupStatus, Student, WeeklyRotation,
};
pub use validation::{validate_event_fields, validate_shift_fields, validate_student_fields};
pub use week::{
    friday_of_week, monday_of_week, parse_date, weekday_from_index, weekday_index, weekday_name,
};
