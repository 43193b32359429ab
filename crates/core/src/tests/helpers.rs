// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::{datetime, time};
use time::Weekday;
use volsched_domain::{Event, GradeLimit, RecurringShift, Student, WeeklyRotation};

/// An event that is open at `datetime!(2026-04-01 12:00 UTC)`:
/// deadline +1d, start +2d, end +2d2h, 2 seats.
pub fn create_open_event() -> Event {
    let mut event: Event = Event::new(
        String::from("Sports day marshals"),
        None,
        datetime!(2026-04-03 12:00 UTC),
        datetime!(2026-04-03 14:00 UTC),
        datetime!(2026-04-02 12:00 UTC),
        String::from("Sports field"),
        2,
        GradeLimit::All,
        2.0,
    );
    event.event_id = Some(1);
    event
}

pub fn create_test_student(student_id: i64, enrollment_year: u16, class_number: u8) -> Student {
    let mut student: Student = Student::new(
        format!("1380000{student_id:04}"),
        String::from("Test Student"),
        enrollment_year,
        class_number,
        None,
        None,
        false,
    );
    student.student_id = Some(student_id);
    student
}

/// Monday 07:35-07:55, capacity 2, half an hour of credit.
pub fn create_monday_shift() -> RecurringShift {
    let mut shift: RecurringShift = RecurringShift::new(
        String::from("Morning etiquette post"),
        Weekday::Monday,
        time!(07:35),
        time!(07:55),
        2,
        0.5,
    );
    shift.shift_id = Some(1);
    shift
}

pub fn create_rotation(week_monday: time::Date, assigned_class: &str) -> WeeklyRotation {
    let mut rotation: WeeklyRotation =
        WeeklyRotation::new(week_monday, assigned_class.to_string());
    rotation.rotation_id = Some(1);
    rotation
}
