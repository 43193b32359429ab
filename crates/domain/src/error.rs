// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::EventStatus;
use time::{Date, Weekday};

/// Errors that can occur during domain validation and admission checks.
///
/// Every rejection the eligibility pipelines can produce is a distinct
/// variant so callers can report the specific reason; nothing is folded
/// into a generic failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Referenced student does not exist.
    StudentNotFound(i64),
    /// Referenced event does not exist.
    EventNotFound(i64),
    /// Referenced shift template does not exist.
    ShiftNotFound(i64),
    /// Referenced signup does not exist.
    SignupNotFound(i64),
    /// A student with this phone number already exists.
    DuplicatePhone(String),
    /// Phone number is empty or malformed.
    InvalidPhone(String),
    /// Student or event name is empty.
    InvalidName(String),
    /// Event title is empty.
    InvalidTitle(String),
    /// Capacity must be positive.
    InvalidCapacity {
        /// The invalid capacity value.
        count: u32,
    },
    /// Hour value must be positive.
    InvalidHoursValue(&'static str),
    /// Event start time must precede its end time.
    InvalidEventTimes {
        /// Description of the violation.
        reason: String,
    },
    /// Shift day-of-week index must be 1 (Monday) through 5 (Friday).
    InvalidDayOfWeek {
        /// The invalid index.
        index: u8,
    },
    /// Grade limit string is not the `ALL` sentinel or a year list.
    InvalidGradeLimit(String),
    /// Signup status string is not a known variant.
    InvalidSignupStatus(String),
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// The requested occurrence date is in the past.
    DateInPast {
        /// The rejected date.
        date: Date,
    },
    /// The requested date's weekday does not match the shift's weekday.
    WeekdayMismatch {
        /// The weekday the shift runs on.
        expected: Weekday,
        /// The weekday of the requested date.
        actual: Weekday,
        /// The requested date.
        date: Date,
    },
    /// The event is not open for signup.
    EventNotOpen {
        /// The computed status that blocked admission.
        status: EventStatus,
    },
    /// The student's enrollment year is outside the event's grade limit.
    GradeNotEligible {
        /// The student's enrollment year.
        enrollment_year: u16,
        /// The event's grade limit, rendered.
        grade_limit: String,
    },
    /// The student already has a signup for this event.
    DuplicateEventSignup {
        /// The event.
        event_id: i64,
        /// The student.
        student_id: i64,
    },
    /// The student already has a non-cancelled signup for this occurrence.
    DuplicateShiftSignup {
        /// The shift template.
        shift_id: i64,
        /// The occurrence date.
        date: Date,
        /// The student.
        student_id: i64,
    },
    /// All seats for the target are taken.
    CapacityExceeded {
        /// The configured capacity.
        capacity: u32,
    },
    /// The student already holds the weekly shift-signup quota.
    WeeklyQuotaExceeded {
        /// The Monday of the saturated week.
        week_monday: Date,
        /// The student's current non-cancelled signup count in that week.
        count: u32,
        /// The quota limit.
        limit: u32,
    },
    /// No rotation has been configured for the requested week.
    ///
    /// This is a distinct outcome, never silently permissive: a missing
    /// rotation blocks all shift signups for that week.
    RotationNotConfigured {
        /// The Monday of the unconfigured week.
        week_monday: Date,
    },
    /// The week's rotation authorizes a different class.
    ClassNotAuthorized {
        /// The Monday of the governed week.
        week_monday: Date,
        /// The class the rotation authorizes.
        assigned_class: String,
        /// The student's full class name.
        student_class: String,
    },
    /// Rotation week-start date must be a Monday.
    NotMonday {
        /// The rejected date.
        date: Date,
        /// The actual weekday.
        weekday: Weekday,
    },
}

impl std::fmt::Display for DomainError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StudentNotFound(id) => write!(f, "Student {id} not found"),
            Self::EventNotFound(id) => write!(f, "Event {id} not found"),
            Self::ShiftNotFound(id) => write!(f, "Shift {id} not found"),
            Self::SignupNotFound(id) => write!(f, "Signup {id} not found"),
            Self::DuplicatePhone(phone) => {
                write!(f, "A student with phone '{phone}' already exists")
            }
            Self::InvalidPhone(msg) => write!(f, "Invalid phone: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidCapacity { count } => {
                write!(f, "Invalid capacity: {count}. Must be greater than 0")
            }
            Self::InvalidHoursValue(msg) => write!(f, "Invalid hours value: {msg}"),
            Self::InvalidEventTimes { reason } => write!(f, "Invalid event times: {reason}"),
            Self::InvalidDayOfWeek { index } => {
                write!(
                    f,
                    "Invalid day of week: {index}. Must be 1 (Monday) through 5 (Friday)"
                )
            }
            Self::InvalidGradeLimit(s) => {
                write!(
                    f,
                    "Invalid grade limit '{s}'. Must be 'ALL' or a comma-separated year list"
                )
            }
            Self::InvalidSignupStatus(s) => write!(f, "Invalid signup status: {s}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateInPast { date } => {
                write!(f, "Date {date} is in the past and cannot be signed up for")
            }
            Self::WeekdayMismatch {
                expected,
                actual,
                date,
            } => {
                write!(
                    f,
                    "Shift runs on {expected}, but {date} is a {actual}"
                )
            }
            Self::EventNotOpen { status } => {
                write!(f, "Event is not open for signup (status: {status})")
            }
            Self::GradeNotEligible {
                enrollment_year,
                grade_limit,
            } => {
                write!(
                    f,
                    "Enrollment year {enrollment_year} is not eligible (allowed: {grade_limit})"
                )
            }
            Self::DuplicateEventSignup {
                event_id,
                student_id,
            } => {
                write!(
                    f,
                    "Student {student_id} is already signed up for event {event_id}"
                )
            }
            Self::DuplicateShiftSignup {
                shift_id,
                date,
                student_id,
            } => {
                write!(
                    f,
                    "Student {student_id} is already signed up for shift {shift_id} on {date}"
                )
            }
            Self::CapacityExceeded { capacity } => {
                write!(f, "All {capacity} seats are taken")
            }
            Self::WeeklyQuotaExceeded {
                week_monday,
                count,
                limit,
            } => {
                write!(
                    f,
                    "Weekly quota reached for week of {week_monday}: {count} of {limit} shift signups used"
                )
            }
            Self::RotationNotConfigured { week_monday } => {
                write!(f, "No rotation configured for the week of {week_monday}")
            }
            Self::ClassNotAuthorized {
                week_monday,
                assigned_class,
                student_class,
            } => {
                write!(
                    f,
                    "Week of {week_monday} is assigned to class {assigned_class}, not {student_class}"
                )
            }
            Self::NotMonday { date, weekday } => {
                write!(
                    f,
                    "Rotation week start must be a Monday, but {date} is a {weekday}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
