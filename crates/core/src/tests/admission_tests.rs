// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_monday_shift, create_open_event, create_rotation, create_test_student,
};
use crate::{
    CoreError, EventAdmission, ShiftAdmission, WEEKLY_SHIFT_QUOTA, evaluate_event_signup,
    evaluate_shift_signup,
};
use time::macros::{date, datetime};
use volsched_domain::{
    DomainError, Event, EventStatus, GradeLimit, RecurringShift, Student, WeeklyRotation,
};
use time::Weekday;

const NOW: time::OffsetDateTime = datetime!(2026-04-01 12:00 UTC);
const TODAY: time::Date = date!(2026 - 03 - 02); // a Monday

#[test]
fn test_event_signup_admitted() {
    let event: Event = create_open_event();
    let student: Student = create_test_student(7, 2024, 3);
    let admission = EventAdmission {
        event: &event,
        student: &student,
        occupancy: 0,
        already_signed_up: false,
    };

    assert!(evaluate_event_signup(NOW, &admission).is_ok());
}

#[test]
fn test_event_signup_rejects_non_open_status() {
    let event: Event = create_open_event();
    let student: Student = create_test_student(7, 2024, 3);
    let admission = EventAdmission {
        event: &event,
        student: &student,
        occupancy: 0,
        already_signed_up: false,
    };

    // After the end time the pipeline reports Ended, not anything else.
    let result = evaluate_event_signup(datetime!(2026-04-03 15:00 UTC), &admission);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::EventNotOpen {
            status: EventStatus::Ended
        }))
    );
}

#[test]
fn test_event_signup_rejects_full_before_grade_check() {
    // A full event rejects even a grade-ineligible student with the
    // status reason: status outranks the grade rule.
    let mut event: Event = create_open_event();
    event.grade_limit = GradeLimit::Years(vec![2023]);
    let student: Student = create_test_student(7, 2024, 3);
    let admission = EventAdmission {
        event: &event,
        student: &student,
        occupancy: 2,
        already_signed_up: false,
    };

    let result = evaluate_event_signup(NOW, &admission);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::EventNotOpen {
            status: EventStatus::Full
        }))
    );
}

#[test]
fn test_event_signup_rejects_grade_mismatch() {
    let mut event: Event = create_open_event();
    event.grade_limit = GradeLimit::Years(vec![2023, 2025]);
    let student: Student = create_test_student(7, 2024, 3);
    let admission = EventAdmission {
        event: &event,
        student: &student,
        occupancy: 0,
        already_signed_up: false,
    };

    let result = evaluate_event_signup(NOW, &admission);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::GradeNotEligible {
                enrollment_year: 2024,
                ..
            }
        ))
    ));
}

#[test]
fn test_event_signup_rejects_duplicate() {
    let event: Event = create_open_event();
    let student: Student = create_test_student(7, 2024, 3);
    let admission = EventAdmission {
        event: &event,
        student: &student,
        occupancy: 1,
        already_signed_up: true,
    };

    let result = evaluate_event_signup(NOW, &admission);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::DuplicateEventSignup { .. }
        ))
    ));
}

fn shift_admission<'a>(
    shift: &'a RecurringShift,
    student: &'a Student,
    rotation: Option<&'a WeeklyRotation>,
) -> ShiftAdmission<'a> {
    ShiftAdmission {
        shift,
        student,
        date: date!(2026 - 03 - 09), // the following Monday
        already_signed_up: false,
        occupancy: 0,
        rotation,
        weekly_signups: 0,
    }
}

#[test]
fn test_shift_signup_admitted() {
    let shift: RecurringShift = create_monday_shift();
    let student: Student = create_test_student(7, 2024, 3);
    let rotation: WeeklyRotation = create_rotation(date!(2026 - 03 - 09), "2024-3");
    let admission = shift_admission(&shift, &student, Some(&rotation));

    assert!(evaluate_shift_signup(TODAY, &admission).is_ok());
}

#[test]
fn test_shift_signup_rejects_past_date() {
    let shift: RecurringShift = create_monday_shift();
    let student: Student = create_test_student(7, 2024, 3);
    let rotation: WeeklyRotation = create_rotation(date!(2026 - 02 - 23), "2024-3");
    let mut admission = shift_admission(&shift, &student, Some(&rotation));
    admission.date = date!(2026 - 02 - 23);

    let result = evaluate_shift_signup(TODAY, &admission);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::DateInPast { .. }))
    ));
}

#[test]
fn test_shift_signup_rejects_weekday_mismatch_naming_both() {
    // Tuesday-configured shift, Wednesday date.
    let mut shift: RecurringShift = create_monday_shift();
    shift.day_of_week = Weekday::Tuesday;
    let student: Student = create_test_student(7, 2024, 3);
    let rotation: WeeklyRotation = create_rotation(date!(2026 - 03 - 09), "2024-3");
    let mut admission = shift_admission(&shift, &student, Some(&rotation));
    admission.date = date!(2026 - 03 - 11); // a Wednesday

    let result = evaluate_shift_signup(TODAY, &admission);
    let Err(CoreError::DomainViolation(err)) = result else {
        panic!("expected weekday mismatch, got {result:?}");
    };
    assert_eq!(
        err,
        DomainError::WeekdayMismatch {
            expected: Weekday::Tuesday,
            actual: Weekday::Wednesday,
            date: date!(2026 - 03 - 11),
        }
    );
    let message: String = err.to_string();
    assert!(message.contains("Tuesday"));
    assert!(message.contains("Wednesday"));
}

#[test]
fn test_shift_signup_rejects_duplicate_before_capacity() {
    let shift: RecurringShift = create_monday_shift();
    let student: Student = create_test_student(7, 2024, 3);
    let rotation: WeeklyRotation = create_rotation(date!(2026 - 03 - 09), "2024-3");
    let mut admission = shift_admission(&shift, &student, Some(&rotation));
    admission.already_signed_up = true;
    admission.occupancy = 2; // also full; duplicate must win

    let result = evaluate_shift_signup(TODAY, &admission);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::DuplicateShiftSignup { .. }
        ))
    ));
}

#[test]
fn test_shift_signup_rejects_capacity_exceeded() {
    let shift: RecurringShift = create_monday_shift();
    let student: Student = create_test_student(7, 2024, 3);
    let rotation: WeeklyRotation = create_rotation(date!(2026 - 03 - 09), "2024-3");
    let mut admission = shift_admission(&shift, &student, Some(&rotation));
    admission.occupancy = 2;

    let result = evaluate_shift_signup(TODAY, &admission);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::CapacityExceeded {
            capacity: 2
        }))
    );
}

#[test]
fn test_shift_signup_rejects_missing_rotation_distinctly() {
    let shift: RecurringShift = create_monday_shift();
    let student: Student = create_test_student(7, 2024, 3);
    let admission = shift_admission(&shift, &student, None);

    let result = evaluate_shift_signup(TODAY, &admission);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::RotationNotConfigured {
                week_monday: date!(2026 - 03 - 09)
            }
        ))
    );
}

#[test]
fn test_shift_signup_rejects_other_class() {
    // Rotation assigns 2024-3; a 2024-5 student is Forbidden.
    let shift: RecurringShift = create_monday_shift();
    let student: Student = create_test_student(7, 2024, 5);
    let rotation: WeeklyRotation = create_rotation(date!(2026 - 03 - 09), "2024-3");
    let admission = shift_admission(&shift, &student, Some(&rotation));

    let result = evaluate_shift_signup(TODAY, &admission);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::ClassNotAuthorized {
            week_monday: date!(2026 - 03 - 09),
            assigned_class: String::from("2024-3"),
            student_class: String::from("2024-5"),
        }))
    );
}

#[test]
fn test_shift_signup_rejects_weekly_quota() {
    let shift: RecurringShift = create_monday_shift();
    let student: Student = create_test_student(7, 2024, 3);
    let rotation: WeeklyRotation = create_rotation(date!(2026 - 03 - 09), "2024-3");
    let mut admission = shift_admission(&shift, &student, Some(&rotation));
    admission.weekly_signups = WEEKLY_SHIFT_QUOTA;

    let result = evaluate_shift_signup(TODAY, &admission);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::WeeklyQuotaExceeded { count: 2, limit: 2, .. }
        ))
    ));
}

#[test]
fn test_shift_signup_quota_below_limit_is_admitted() {
    let shift: RecurringShift = create_monday_shift();
    let student: Student = create_test_student(7, 2024, 3);
    let rotation: WeeklyRotation = create_rotation(date!(2026 - 03 - 09), "2024-3");
    let mut admission = shift_admission(&shift, &student, Some(&rotation));
    admission.weekly_signups = WEEKLY_SHIFT_QUOTA - 1;

    assert!(evaluate_shift_signup(TODAY, &admission).is_ok());
}
