// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The admission pipelines.
//!
//! Each pipeline is an ordered sequence of rules that short-circuits on
//! the first failure. The order is part of the observable contract: a
//! full event past its deadline reports `Full`, not `Closed`, because
//! the capacity rule runs first.
//!
//! Existence of the target and the student (the first pipeline steps) is
//! established by the caller's store lookups, performed in that order,
//! before these functions run; everything here operates on a consistent
//! snapshot read inside the admission transaction.

use crate::error::CoreError;
use crate::rotation::rotation_week_for;
use crate::status::resolve_event_status;
use time::{Date, OffsetDateTime};
use volsched_domain::{DomainError, Event, EventStatus, RecurringShift, Student, WeeklyRotation};

/// Maximum non-cancelled shift signups per student per school week,
/// counted across all shift templates (Monday..Friday inclusive).
pub const WEEKLY_SHIFT_QUOTA: u32 = 2;

/// Snapshot of everything the event pipeline needs, read inside the
/// admission transaction.
#[derive(Debug, Clone)]
pub struct EventAdmission<'a> {
    /// The target event.
    pub event: &'a Event,
    /// The requesting student.
    pub student: &'a Student,
    /// Current signup count for the event.
    pub occupancy: u32,
    /// Whether the student already has a signup for this event.
    pub already_signed_up: bool,
}

/// Snapshot of everything the shift pipeline needs, read inside the
/// admission transaction.
#[derive(Debug, Clone)]
pub struct ShiftAdmission<'a> {
    /// The target shift template.
    pub shift: &'a RecurringShift,
    /// The requesting student.
    pub student: &'a Student,
    /// The requested occurrence date.
    pub date: Date,
    /// Whether the student already has a non-cancelled signup for
    /// `(shift, date)`.
    pub already_signed_up: bool,
    /// Non-cancelled signup count for `(shift, date)`.
    pub occupancy: u32,
    /// The rotation governing the week of `date`, if configured.
    pub rotation: Option<&'a WeeklyRotation>,
    /// The student's non-cancelled shift signups within the school week
    /// of `date`, across all shift templates.
    pub weekly_signups: u32,
}

/// Evaluates an event signup request.
///
/// Rules, in order, short-circuiting on the first failure:
///
/// 1. Status must be `Open` (the status resolution re-checks `Full`
///    against the occupancy snapshot, so a capacity race surfaces here
///    as `EventNotOpen(Full)` even before the ledger commit)
/// 2. The student's enrollment year must satisfy the grade limit
/// 3. The student must not already be signed up
///
/// # Errors
///
/// Returns the specific [`DomainError`] of the first failing rule,
/// wrapped in [`CoreError::DomainViolation`].
pub fn evaluate_event_signup(
    now: OffsetDateTime,
    admission: &EventAdmission<'_>,
) -> Result<(), CoreError> {
    let status: EventStatus = resolve_event_status(now, admission.event, admission.occupancy);
    if status != EventStatus::Open {
        return Err(CoreError::DomainViolation(DomainError::EventNotOpen {
            status,
        }));
    }

    if !admission
        .event
        .grade_limit
        .allows(admission.student.enrollment_year)
    {
        return Err(CoreError::DomainViolation(DomainError::GradeNotEligible {
            enrollment_year: admission.student.enrollment_year,
            grade_limit: admission.event.grade_limit.to_string(),
        }));
    }

    if admission.already_signed_up {
        return Err(CoreError::DomainViolation(
            DomainError::DuplicateEventSignup {
                event_id: admission.event.event_id.unwrap_or_default(),
                student_id: admission.student.student_id.unwrap_or_default(),
            },
        ));
    }

    Ok(())
}

/// Evaluates a shift signup request.
///
/// Rules, in order, short-circuiting on the first failure:
///
/// 1. The date must not be in the past (`date >= today`)
/// 2. The date's weekday must equal the shift's configured weekday; the
///    rejection names both
/// 3. The student must not already hold a non-cancelled signup for the
///    occurrence
/// 4. Non-cancelled occupancy must be below the shift capacity
/// 5. A rotation must be configured for the week and must authorize the
///    student's class (a missing rotation is `RotationNotConfigured`,
///    never silently permissive)
/// 6. The student's weekly signup count must be below
///    [`WEEKLY_SHIFT_QUOTA`]
///
/// # Errors
///
/// Returns the specific [`DomainError`] of the first failing rule,
/// wrapped in [`CoreError::DomainViolation`].
pub fn evaluate_shift_signup(
    today: Date,
    admission: &ShiftAdmission<'_>,
) -> Result<(), CoreError> {
    if admission.date < today {
        return Err(CoreError::DomainViolation(DomainError::DateInPast {
            date: admission.date,
        }));
    }

    if admission.date.weekday() != admission.shift.day_of_week {
        return Err(CoreError::DomainViolation(DomainError::WeekdayMismatch {
            expected: admission.shift.day_of_week,
            actual: admission.date.weekday(),
            date: admission.date,
        }));
    }

    if admission.already_signed_up {
        return Err(CoreError::DomainViolation(
            DomainError::DuplicateShiftSignup {
                shift_id: admission.shift.shift_id.unwrap_or_default(),
                date: admission.date,
                student_id: admission.student.student_id.unwrap_or_default(),
            },
        ));
    }

    if admission.occupancy >= admission.shift.capacity {
        return Err(CoreError::DomainViolation(DomainError::CapacityExceeded {
            capacity: admission.shift.capacity,
        }));
    }

    let week_monday: Date = rotation_week_for(admission.date);
    match admission.rotation {
        None => {
            return Err(CoreError::DomainViolation(
                DomainError::RotationNotConfigured { week_monday },
            ));
        }
        Some(rotation) => {
            let student_class: String = admission.student.full_class_name();
            if rotation.assigned_class != student_class {
                return Err(CoreError::DomainViolation(DomainError::ClassNotAuthorized {
                    week_monday,
                    assigned_class: rotation.assigned_class.clone(),
                    student_class,
                }));
            }
        }
    }

    if admission.weekly_signups >= WEEKLY_SHIFT_QUOTA {
        return Err(CoreError::DomainViolation(
            DomainError::WeeklyQuotaExceeded {
                week_monday,
                count: admission.weekly_signups,
                limit: WEEKLY_SHIFT_QUOTA,
            },
        ));
    }

    Ok(())
}
