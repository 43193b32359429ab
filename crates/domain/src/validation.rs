// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Event, RecurringShift, Student};
use time::Weekday;

/// Validates student field constraints.
///
/// # Errors
///
/// Returns an error if:
/// - The phone number is empty or contains non-digit characters
/// - The name is empty
pub fn validate_student_fields(student: &Student) -> Result<(), DomainError> {
    if student.phone.is_empty() {
        return Err(DomainError::InvalidPhone(String::from(
            "Phone cannot be empty",
        )));
    }
    if !student.phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::InvalidPhone(String::from(
            "Phone must contain digits only",
        )));
    }
    if student.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates event field constraints.
///
/// `registration_deadline <= start_time` is expected but deliberately not
/// enforced here: the source data model accepts a deadline after the
/// start, and the status precedence makes such a deadline inert.
///
/// # Errors
///
/// Returns an error if:
/// - The title is empty
/// - `start_time` is not strictly before `end_time`
/// - The capacity is zero
/// - The hour value is not positive
pub fn validate_event_fields(event: &Event) -> Result<(), DomainError> {
    if event.title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }
    if event.start_time >= event.end_time {
        return Err(DomainError::InvalidEventTimes {
            reason: format!(
                "start time {} must be before end time {}",
                event.start_time, event.end_time
            ),
        });
    }
    if event.required_volunteers == 0 {
        return Err(DomainError::InvalidCapacity { count: 0 });
    }
    if event.hours_value <= 0.0 {
        return Err(DomainError::InvalidHoursValue(
            "Hours value must be greater than 0",
        ));
    }
    Ok(())
}

/// Validates shift template field constraints.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The weekday is Saturday or Sunday
/// - `start_time` is not strictly before `end_time`
/// - The capacity is zero
/// - The hour value is not positive
pub fn validate_shift_fields(shift: &RecurringShift) -> Result<(), DomainError> {
    if shift.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Shift name cannot be empty",
        )));
    }
    if matches!(shift.day_of_week, Weekday::Saturday | Weekday::Sunday) {
        return Err(DomainError::InvalidDayOfWeek {
            index: shift.day_of_week.number_from_monday(),
        });
    }
    if shift.start_time >= shift.end_time {
        return Err(DomainError::InvalidEventTimes {
            reason: format!(
                "shift start {} must be before end {}",
                shift.start_time, shift.end_time
            ),
        });
    }
    if shift.capacity == 0 {
        return Err(DomainError::InvalidCapacity { count: 0 });
    }
    if shift.hours_value <= 0.0 {
        return Err(DomainError::InvalidHoursValue(
            "Hours value must be greater than 0",
        ));
    }
    Ok(())
}
