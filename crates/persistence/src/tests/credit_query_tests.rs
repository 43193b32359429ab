// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the credit source-record joins, fed through the
//! aggregator end to end.

use super::NOW;
use crate::Persistence;
use time::Weekday;
use time::macros::{date, datetime};
use volsched::total_hours;
use volsched_domain::SignupStatus;

#[test]
fn test_event_assignments_join_title_and_hours() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let event_id = super::create_test_event(&mut persistence, 2);
    let student_id = super::register_test_student(&mut persistence, "13800000001", 2024, 3);

    persistence
        .signup_for_event(NOW, event_id, student_id)
        .unwrap();

    let assignments = persistence.event_assignments(student_id).unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].event_id, event_id);
    assert_eq!(assignments[0].title, "Library reshelving");
    assert!((assignments[0].hours_value - 2.0).abs() < f64::EPSILON);
}

#[test]
fn test_shift_assignments_include_cancelled_rows() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let shift_id = super::create_test_shift(&mut persistence, Weekday::Monday, 2);
    let student_id = super::register_test_student(&mut persistence, "13800000001", 2024, 3);
    persistence
        .assign_rotation(date!(2026 - 03 - 02), "2024-3")
        .unwrap();

    persistence
        .signup_for_shift(NOW, shift_id, student_id, "2026-03-02")
        .unwrap();
    persistence
        .cancel_shift_signup(shift_id, student_id, "2026-03-02")
        .unwrap();

    // The row survives as Cancelled; the aggregator skips it.
    let assignments = persistence.shift_assignments(student_id).unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].status, SignupStatus::Cancelled);

    let total = total_hours(NOW, NOW.date(), &[], &assignments);
    assert!(total.abs() < f64::EPSILON);
}

#[test]
fn test_total_hours_accrue_once_assignments_pass() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let event_id = super::create_test_event(&mut persistence, 2);
    let shift_id = super::create_test_shift(&mut persistence, Weekday::Monday, 2);
    let student_id = super::register_test_student(&mut persistence, "13800000001", 2024, 3);
    persistence
        .assign_rotation(date!(2026 - 03 - 02), "2024-3")
        .unwrap();

    persistence
        .signup_for_event(NOW, event_id, student_id)
        .unwrap();
    persistence
        .signup_for_shift(NOW, shift_id, student_id, "2026-03-02")
        .unwrap();

    let events = persistence.event_assignments(student_id).unwrap();
    let shifts = persistence.shift_assignments(student_id).unwrap();

    // Nothing has completed at signup time.
    let before = total_hours(NOW, NOW.date(), &events, &shifts);
    assert!(before.abs() < f64::EPSILON);

    // A week later both the event (2.0) and the shift (0.5) are behind us.
    let later = datetime!(2026-03-12 08:00 UTC);
    let after = total_hours(later, later.date(), &events, &shifts);
    assert!((after - 2.5).abs() < f64::EPSILON);
}
