// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API error types and the explicit translation functions that map
//! lower-layer errors into them.

use crate::password_policy::PasswordPolicyError;
use volsched_domain::DomainError;
use volsched_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core/persistence errors and represent
/// the API contract. Every lower-layer error reaches a caller only
/// through one of the explicit translation functions below; nothing is
/// leaked or silently downgraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A referenced resource does not exist.
    ResourceNotFound {
        /// The kind of resource, e.g. `event`.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request duplicates existing state.
    Conflict {
        /// The kind of resource, e.g. `event_signup`.
        resource_type: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// All seats for the target are taken.
    CapacityExceeded {
        /// The configured capacity.
        capacity: u32,
    },
    /// The weekly shift-signup quota is already used up.
    QuotaExceeded {
        /// Non-cancelled signups the student already holds this week.
        used: u32,
        /// The quota limit.
        limit: u32,
    },
    /// Required configuration is missing.
    NotConfigured {
        /// The kind of configuration, e.g. `rotation`.
        what: String,
        /// A human-readable description of what is missing.
        message: String,
    },
    /// The password does not meet policy requirements.
    PasswordPolicyViolation {
        /// A human-readable description of the violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A human-readable description of the error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "Resource not found ({resource_type}): {message}")
            }
            Self::Conflict {
                resource_type,
                message,
            } => {
                write!(f, "Conflict ({resource_type}): {message}")
            }
            Self::CapacityExceeded { capacity } => {
                write!(f, "Capacity exceeded: all {capacity} seats are taken")
            }
            Self::QuotaExceeded { used, limit } => {
                write!(
                    f,
                    "Weekly quota exceeded: {used} of {limit} shift signups used"
                )
            }
            Self::NotConfigured { what, message } => {
                write!(f, "Not configured ({what}): {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly. The match is exhaustive so a new domain rejection cannot be
/// added without deciding its API shape.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::StudentNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("student"),
            message: format!("Student {id} not found"),
        },
        DomainError::EventNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("event"),
            message: format!("Event {id} not found"),
        },
        DomainError::ShiftNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("shift"),
            message: format!("Shift {id} not found"),
        },
        DomainError::SignupNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("signup"),
            message: format!("Signup {id} not found"),
        },
        DomainError::DuplicatePhone(phone) => ApiError::Conflict {
            resource_type: String::from("student"),
            message: format!("A student with phone '{phone}' already exists"),
        },
        DomainError::InvalidPhone(msg) => ApiError::InvalidInput {
            field: String::from("phone"),
            message: msg,
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidTitle(msg) => ApiError::InvalidInput {
            field: String::from("title"),
            message: msg,
        },
        DomainError::InvalidCapacity { count } => ApiError::InvalidInput {
            field: String::from("capacity"),
            message: format!("Invalid capacity: {count}. Must be greater than 0"),
        },
        DomainError::InvalidHoursValue(msg) => ApiError::InvalidInput {
            field: String::from("hours_value"),
            message: msg.to_string(),
        },
        DomainError::InvalidEventTimes { reason } => ApiError::InvalidInput {
            field: String::from("times"),
            message: reason,
        },
        DomainError::InvalidDayOfWeek { index } => ApiError::InvalidInput {
            field: String::from("day_of_week"),
            message: format!("Invalid day of week: {index}. Must be 1 (Monday) through 5 (Friday)"),
        },
        DomainError::InvalidGradeLimit(s) => ApiError::InvalidInput {
            field: String::from("grade_limit"),
            message: format!("Invalid grade limit '{s}'. Must be 'ALL' or a comma-separated year list"),
        },
        DomainError::InvalidSignupStatus(s) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid signup status: {s}"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::DateInPast { date } => ApiError::DomainRuleViolation {
            rule: String::from("date_not_past"),
            message: format!("Date {date} is in the past and cannot be signed up for"),
        },
        DomainError::WeekdayMismatch {
            expected,
            actual,
            date,
        } => ApiError::DomainRuleViolation {
            rule: String::from("weekday_match"),
            message: format!("Shift runs on {expected}, but {date} is a {actual}"),
        },
        DomainError::EventNotOpen { status } => ApiError::DomainRuleViolation {
            rule: String::from("event_open"),
            message: format!("Event is not open for signup (status: {status})"),
        },
        DomainError::GradeNotEligible {
            enrollment_year,
            grade_limit,
        } => ApiError::DomainRuleViolation {
            rule: String::from("grade_limit"),
            message: format!(
                "Enrollment year {enrollment_year} is not eligible (allowed: {grade_limit})"
            ),
        },
        DomainError::DuplicateEventSignup {
            event_id,
            student_id,
        } => ApiError::Conflict {
            resource_type: String::from("event_signup"),
            message: format!("Student {student_id} is already signed up for event {event_id}"),
        },
        DomainError::DuplicateShiftSignup {
            shift_id,
            date,
            student_id,
        } => ApiError::Conflict {
            resource_type: String::from("shift_signup"),
            message: format!(
                "Student {student_id} is already signed up for shift {shift_id} on {date}"
            ),
        },
        DomainError::CapacityExceeded { capacity } => ApiError::CapacityExceeded { capacity },
        DomainError::WeeklyQuotaExceeded {
            week_monday: _,
            count,
            limit,
        } => ApiError::QuotaExceeded { used: count, limit },
        DomainError::RotationNotConfigured { week_monday } => ApiError::NotConfigured {
            what: String::from("rotation"),
            message: format!("No rotation configured for the week of {week_monday}"),
        },
        DomainError::ClassNotAuthorized {
            week_monday,
            assigned_class,
            student_class,
        } => ApiError::DomainRuleViolation {
            rule: String::from("rotation_class"),
            message: format!(
                "Week of {week_monday} is assigned to class {assigned_class}, not {student_class}"
            ),
        },
        DomainError::NotMonday { date, weekday } => ApiError::InvalidInput {
            field: String::from("week_monday"),
            message: format!("Rotation week start must be a Monday, but {date} is a {weekday}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Domain rejections surfaced by the transactional commits keep their
/// specific API shape; infrastructure failures collapse to `Internal`.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::DomainRejected(domain_err) => translate_domain_error(domain_err),
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("record"),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
