// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime, Time, Weekday};

/// The computed lifecycle state of an event.
///
/// Status is never persisted. It is derived from the current instant and
/// the event's stored timestamps and occupancy, in a strict precedence
/// order (see `volsched::resolve_event_status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    /// The event's end time has passed.
    Ended,
    /// The event has started but not yet ended.
    InProgress,
    /// All volunteer seats are taken.
    Full,
    /// The registration deadline has passed.
    Closed,
    /// Open for signup.
    Open,
}

impl EventStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ended => "Ended",
            Self::InProgress => "InProgress",
            Self::Full => "Full",
            Self::Closed => "Closed",
            Self::Open => "Open",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The computed state of a shift occurrence (a shift template on a
/// concrete date).
///
/// Derived from date comparison against "today" only; time of day and
/// occupancy do not participate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OccurrenceStatus {
    /// The occurrence date is in the past.
    Completed,
    /// The occurrence date is today or in the future.
    Pending,
}

impl OccurrenceStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Pending => "Pending",
        }
    }
}

impl std::fmt::Display for OccurrenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The stored status of a shift signup.
///
/// Unlike event status, this is persisted state: cancellation must be
/// recorded so a cancelled signup stops consuming capacity and quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SignupStatus {
    /// Signed up; the occurrence has not yet passed.
    #[default]
    Pending,
    /// The occurrence date has passed and the signup counted for credit.
    Completed,
    /// Withdrawn. Consumes neither capacity nor quota.
    Cancelled,
}

impl FromStr for SignupStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidSignupStatus(s.to_string())),
        }
    }
}

impl SignupStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for SignupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The grade restriction on an event.
///
/// Either the sentinel `All` (no restriction) or a set of enrollment
/// years that are allowed to sign up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeLimit {
    /// Every grade may sign up.
    All,
    /// Only students whose enrollment year is in this set may sign up.
    Years(Vec<u16>),
}

impl GradeLimit {
    /// The wire sentinel for an unrestricted event.
    pub const ALL_SENTINEL: &'static str = "ALL";

    /// Checks whether a student with the given enrollment year is allowed.
    #[must_use]
    pub fn allows(&self, enrollment_year: u16) -> bool {
        match self {
            Self::All => true,
            Self::Years(years) => years.contains(&enrollment_year),
        }
    }

    /// Parses a grade limit from its string representation.
    ///
    /// Accepts the `ALL` sentinel or a comma-separated list of enrollment
    /// years, e.g. `2023,2024`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty or any element is not a
    /// valid year.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s == Self::ALL_SENTINEL {
            return Ok(Self::All);
        }
        if s.trim().is_empty() {
            return Err(DomainError::InvalidGradeLimit(s.to_string()));
        }
        let years: Result<Vec<u16>, DomainError> = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<u16>()
                    .map_err(|_| DomainError::InvalidGradeLimit(s.to_string()))
            })
            .collect();
        Ok(Self::Years(years?))
    }
}

impl std::fmt::Display for GradeLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "{}", Self::ALL_SENTINEL),
            Self::Years(years) => {
                let parts: Vec<String> = years.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(","))
            }
        }
    }
}

/// A registered student.
///
/// The phone number is the unique login identity. `student_id` is the
/// canonical internal identifier, assigned by the persistence layer.
/// Students are never hard-deleted; historical signups must stay
/// resolvable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Canonical internal identifier. `None` before first persistence.
    pub student_id: Option<i64>,
    /// Phone number, unique across all students.
    pub phone: String,
    /// The student's name (informational, not unique).
    pub name: String,
    /// Enrollment year, e.g. 2024.
    pub enrollment_year: u16,
    /// Class number within the enrollment year, e.g. 3.
    pub class_number: u8,
    /// Optional WeChat contact handle.
    pub wechat: Option<String>,
    /// Optional QQ contact handle.
    pub qq: Option<String>,
    /// Whether this student may perform admin-gated operations.
    pub is_admin: bool,
}

impl Student {
    /// Creates a new `Student` without a persisted `student_id`.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        phone: String,
        name: String,
        enrollment_year: u16,
        class_number: u8,
        wechat: Option<String>,
        qq: Option<String>,
        is_admin: bool,
    ) -> Self {
        Self {
            student_id: None,
            phone,
            name,
            enrollment_year,
            class_number,
            wechat,
            qq,
            is_admin,
        }
    }

    /// Creates a `Student` with an existing `student_id` (from persistence).
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        student_id: i64,
        phone: String,
        name: String,
        enrollment_year: u16,
        class_number: u8,
        wechat: Option<String>,
        qq: Option<String>,
        is_admin: bool,
    ) -> Self {
        Self {
            student_id: Some(student_id),
            phone,
            name,
            enrollment_year,
            class_number,
            wechat,
            qq,
            is_admin,
        }
    }

    /// The derived full class name, e.g. `2024-3`.
    ///
    /// This is the string the rotation gate compares against.
    #[must_use]
    pub fn full_class_name(&self) -> String {
        format!("{}-{}", self.enrollment_year, self.class_number)
    }
}

/// A one-off volunteer event with fixed capacity.
///
/// All instants are UTC. Status is computed at read time, never stored.
///
/// Invariant: `start_time < end_time` (validated on create/update).
/// `registration_deadline <= start_time` is expected but deliberately not
/// enforced; a deadline after the start simply never gates anything
/// because the `InProgress` check outranks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Canonical internal identifier. `None` before first persistence.
    pub event_id: Option<i64>,
    /// The event title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// When the event starts.
    pub start_time: OffsetDateTime,
    /// When the event ends.
    pub end_time: OffsetDateTime,
    /// Signups are rejected after this instant (unless already full,
    /// started, or ended, which all take precedence).
    pub registration_deadline: OffsetDateTime,
    /// Where the event takes place.
    pub location: String,
    /// The number of volunteer seats.
    pub required_volunteers: u32,
    /// Which enrollment years may sign up.
    pub grade_limit: GradeLimit,
    /// Hour credit granted once the event has ended.
    pub hours_value: f64,
}

impl Event {
    /// Creates a new `Event` without a persisted `event_id`.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        title: String,
        description: Option<String>,
        start_time: OffsetDateTime,
        end_time: OffsetDateTime,
        registration_deadline: OffsetDateTime,
        location: String,
        required_volunteers: u32,
        grade_limit: GradeLimit,
        hours_value: f64,
    ) -> Self {
        Self {
            event_id: None,
            title,
            description,
            start_time,
            end_time,
            registration_deadline,
            location,
            required_volunteers,
            grade_limit,
            hours_value,
        }
    }
}

/// A student's signup for an event.
///
/// Unique per `(event_id, student_id)`. Cancellation deletes the row, the
/// exact inverse of the admission commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSignup {
    /// Canonical internal identifier. `None` before first persistence.
    pub signup_id: Option<i64>,
    /// The event signed up for.
    pub event_id: i64,
    /// The student who signed up.
    pub student_id: i64,
    /// When the signup was committed.
    pub created_at: OffsetDateTime,
}

/// A weekly-recurring shift template.
///
/// A shift is a template; concrete occurrences are implied by calendar
/// dates whose weekday matches `day_of_week`. Shifts run on school days
/// only (Monday through Friday).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringShift {
    /// Canonical internal identifier. `None` before first persistence.
    pub shift_id: Option<i64>,
    /// The shift name, e.g. "Cafeteria duty".
    pub name: String,
    /// The weekday this shift runs on (Monday..Friday).
    pub day_of_week: Weekday,
    /// Time of day the shift starts.
    pub start_time: Time,
    /// Time of day the shift ends.
    pub end_time: Time,
    /// Seats per dated occurrence.
    pub capacity: u32,
    /// Hour credit granted once the occurrence date has passed.
    pub hours_value: f64,
}

impl RecurringShift {
    /// Creates a new `RecurringShift` without a persisted `shift_id`.
    #[must_use]
    pub const fn new(
        name: String,
        day_of_week: Weekday,
        start_time: Time,
        end_time: Time,
        capacity: u32,
        hours_value: f64,
    ) -> Self {
        Self {
            shift_id: None,
            name,
            day_of_week,
            start_time,
            end_time,
            capacity,
            hours_value,
        }
    }
}

/// A student's signup for a shift occurrence.
///
/// Unique per `(shift_id, date, student_id)`. The unique tuple is
/// preserved across cancellation; a later re-signup reactivates the
/// cancelled row instead of inserting a second one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSignup {
    /// Canonical internal identifier. `None` before first persistence.
    pub signup_id: Option<i64>,
    /// The shift template.
    pub shift_id: i64,
    /// The student who signed up.
    pub student_id: i64,
    /// The concrete occurrence date.
    pub date: Date,
    /// The stored signup status.
    pub status: SignupStatus,
    /// When the signup was committed.
    pub created_at: OffsetDateTime,
}

/// A week-to-class rotation assignment.
///
/// Identified by the Monday of the week it governs (unique). Only
/// students of `assigned_class` may book shift occurrences falling in
/// that week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyRotation {
    /// Canonical internal identifier. `None` before first persistence.
    pub rotation_id: Option<i64>,
    /// The Monday of the governed week. Must be a Monday.
    pub week_monday: Date,
    /// The authorized full class name, e.g. `2024-3`.
    pub assigned_class: String,
}

impl WeeklyRotation {
    /// Creates a new `WeeklyRotation` without a persisted `rotation_id`.
    #[must_use]
    pub const fn new(week_monday: Date, assigned_class: String) -> Self {
        Self {
            rotation_id: None,
            week_monday,
            assigned_class,
        }
    }
}
