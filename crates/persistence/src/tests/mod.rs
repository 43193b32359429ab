// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod credit_query_tests;
mod rotation_tests;

use crate::Persistence;
use time::Weekday;
use time::macros::{datetime, time};
use volsched_domain::{Event, GradeLimit, RecurringShift, Student};

/// The reference instant for admission tests: a Monday morning.
pub const NOW: time::OffsetDateTime = datetime!(2026-03-02 08:00 UTC);

pub fn register_test_student(
    persistence: &mut Persistence,
    phone: &str,
    enrollment_year: u16,
    class_number: u8,
) -> i64 {
    let student = Student::new(
        phone.to_string(),
        String::from("Test Student"),
        enrollment_year,
        class_number,
        None,
        None,
        false,
    );
    persistence.register_student(&student, "secret-pw").unwrap()
}

/// Creates an event that is open at [`NOW`]: deadline 2026-03-10,
/// running 2026-03-11 12:00-14:00, worth 2 hours.
pub fn create_test_event(persistence: &mut Persistence, seats: u32) -> i64 {
    let event = Event::new(
        String::from("Library reshelving"),
        None,
        datetime!(2026-03-11 12:00 UTC),
        datetime!(2026-03-11 14:00 UTC),
        datetime!(2026-03-10 12:00 UTC),
        String::from("Library"),
        seats,
        GradeLimit::All,
        2.0,
    );
    persistence.create_event(&event).unwrap()
}

pub fn create_test_shift(persistence: &mut Persistence, day: Weekday, capacity: u32) -> i64 {
    let shift = RecurringShift::new(
        String::from("Morning etiquette post"),
        day,
        time!(07:35),
        time!(07:55),
        capacity,
        0.5,
    );
    persistence.create_shift(&shift).unwrap()
}
