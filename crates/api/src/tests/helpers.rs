// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.
//!
//! [`NOW`] falls on Monday 2026-03-02 so shift fixtures for that date
//! are bookable same-day.

use time::OffsetDateTime;
use time::macros::datetime;
use volsched_domain::Student;
use volsched_persistence::Persistence;

use crate::request_response::{CreateEventRequest, CreateShiftRequest, RegisterStudentRequest};

pub const NOW: OffsetDateTime = datetime!(2026-03-02 08:00 UTC);

pub fn test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

/// Registers an admin account directly against persistence; the
/// registration handler never grants the admin flag.
pub fn register_admin(persistence: &mut Persistence) -> i64 {
    let admin: Student = Student::new(
        String::from("19900000000"),
        String::from("Admin Zhang"),
        2023,
        1,
        None,
        None,
        true,
    );
    persistence.register_student(&admin, "Admin-Pass-1").unwrap()
}

pub fn register_test_student(
    persistence: &mut Persistence,
    phone: &str,
    enrollment_year: u16,
    class_number: u8,
) -> i64 {
    let student: Student = Student::new(
        phone.to_string(),
        String::from("Li Wei"),
        enrollment_year,
        class_number,
        None,
        None,
        false,
    );
    persistence.register_student(&student, "sunnyday42").unwrap()
}

pub fn valid_registration(phone: &str) -> RegisterStudentRequest {
    RegisterStudentRequest {
        phone: phone.to_string(),
        name: String::from("Li Wei"),
        enrollment_year: 2024,
        class_number: 3,
        wechat: None,
        qq: None,
        password: String::from("sunnyday42"),
        password_confirmation: String::from("sunnyday42"),
    }
}

/// A two-seat event that runs 2026-03-11 12:00-14:00 with a deadline the
/// day before, worth 2.0 hours.
pub fn library_event_request() -> CreateEventRequest {
    CreateEventRequest {
        title: String::from("Library reshelving"),
        description: Some(String::from("Return the carts to the stacks")),
        start_time: String::from("2026-03-11T12:00:00Z"),
        end_time: String::from("2026-03-11T14:00:00Z"),
        registration_deadline: String::from("2026-03-10T12:00:00Z"),
        location: String::from("Library"),
        required_volunteers: 2,
        grade_limit: String::from("ALL"),
        hours_value: 2.0,
    }
}

pub fn morning_shift_request(day_of_week: u8, capacity: u32) -> CreateShiftRequest {
    CreateShiftRequest {
        name: String::from("Morning etiquette post"),
        day_of_week,
        start_time: String::from("07:35:00"),
        end_time: String::from("07:55:00"),
        capacity,
        hours_value: 0.5,
    }
}
