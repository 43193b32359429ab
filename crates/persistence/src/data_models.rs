// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and text codecs between stored columns and domain types.
//!
//! Instants are stored as ISO 8601 TEXT (RFC 3339 for timestamps,
//! `YYYY-MM-DD` for dates, `HH:MM:SS` for times of day). Dates stored
//! this way compare correctly as text, which the occupancy and quota
//! range queries rely on.

use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time, Weekday};
use volsched_domain::{
    Event, EventSignup, GradeLimit, RecurringShift, ShiftSignup, SignupStatus, Student,
    WeeklyRotation, weekday_from_index, weekday_index,
};

use crate::error::PersistenceError;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]:[second]");

/// Encodes a UTC instant as RFC 3339 text.
pub fn encode_datetime(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Decodes an RFC 3339 timestamp column.
pub fn decode_datetime(text: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(text, &Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(format!("bad timestamp {text:?}: {e}")))
}

/// Encodes a calendar date as `YYYY-MM-DD` text.
pub fn encode_date(value: Date) -> Result<String, PersistenceError> {
    value
        .format(DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Decodes a `YYYY-MM-DD` date column.
pub fn decode_date(text: &str) -> Result<Date, PersistenceError> {
    Date::parse(text, DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("bad date {text:?}: {e}")))
}

/// Encodes a time of day as `HH:MM:SS` text.
pub fn encode_time(value: Time) -> Result<String, PersistenceError> {
    value
        .format(TIME_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Decodes an `HH:MM:SS` time-of-day column.
pub fn decode_time(text: &str) -> Result<Time, PersistenceError> {
    Time::parse(text, TIME_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("bad time {text:?}: {e}")))
}

fn decode_u16(value: i32, what: &str) -> Result<u16, PersistenceError> {
    u16::try_from(value)
        .map_err(|_| PersistenceError::SerializationError(format!("bad {what}: {value}")))
}

fn decode_u8(value: i32, what: &str) -> Result<u8, PersistenceError> {
    u8::try_from(value)
        .map_err(|_| PersistenceError::SerializationError(format!("bad {what}: {value}")))
}

fn decode_u32(value: i32, what: &str) -> Result<u32, PersistenceError> {
    u32::try_from(value)
        .map_err(|_| PersistenceError::SerializationError(format!("bad {what}: {value}")))
}

fn decode_weekday(value: i32) -> Result<Weekday, PersistenceError> {
    let index: u8 = decode_u8(value, "day_of_week")?;
    weekday_from_index(index).map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Encodes a weekday as its Monday-based index (1..=5).
#[must_use]
pub fn encode_weekday(value: Weekday) -> i32 {
    i32::from(weekday_index(value))
}

/// A `students` row.
#[derive(Debug, Clone, diesel::Queryable)]
pub struct StudentRow {
    pub student_id: i64,
    pub phone: String,
    pub name: String,
    pub enrollment_year: i32,
    pub class_number: i32,
    pub wechat: Option<String>,
    pub qq: Option<String>,
    pub is_admin: i32,
    pub password_hash: String,
}

impl StudentRow {
    /// Converts the row into a domain `Student` and its stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored column cannot be decoded.
    pub fn into_parts(self) -> Result<(Student, String), PersistenceError> {
        let student = Student::with_id(
            self.student_id,
            self.phone,
            self.name,
            decode_u16(self.enrollment_year, "enrollment_year")?,
            decode_u8(self.class_number, "class_number")?,
            self.wechat,
            self.qq,
            self.is_admin != 0,
        );
        Ok((student, self.password_hash))
    }

    /// Converts the row into a domain `Student`, dropping the hash.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored column cannot be decoded.
    pub fn into_student(self) -> Result<Student, PersistenceError> {
        Ok(self.into_parts()?.0)
    }
}

/// An `events` row.
#[derive(Debug, Clone, diesel::Queryable)]
pub struct EventRow {
    pub event_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub registration_deadline: String,
    pub location: String,
    pub required_volunteers: i32,
    pub grade_limit: String,
    pub hours_value: f64,
}

impl EventRow {
    /// Converts the row into a domain `Event`.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored column cannot be decoded.
    pub fn into_event(self) -> Result<Event, PersistenceError> {
        let mut event = Event::new(
            self.title,
            self.description,
            decode_datetime(&self.start_time)?,
            decode_datetime(&self.end_time)?,
            decode_datetime(&self.registration_deadline)?,
            self.location,
            decode_u32(self.required_volunteers, "required_volunteers")?,
            GradeLimit::parse(&self.grade_limit)
                .map_err(|e| PersistenceError::SerializationError(e.to_string()))?,
            self.hours_value,
        );
        event.event_id = Some(self.event_id);
        Ok(event)
    }
}

/// An `event_signups` row.
#[derive(Debug, Clone, diesel::Queryable)]
pub struct EventSignupRow {
    pub signup_id: i64,
    pub event_id: i64,
    pub student_id: i64,
    pub created_at: String,
}

impl EventSignupRow {
    /// Converts the row into a domain `EventSignup`.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored column cannot be decoded.
    pub fn into_signup(self) -> Result<EventSignup, PersistenceError> {
        Ok(EventSignup {
            signup_id: Some(self.signup_id),
            event_id: self.event_id,
            student_id: self.student_id,
            created_at: decode_datetime(&self.created_at)?,
        })
    }
}

/// A `recurring_shifts` row.
#[derive(Debug, Clone, diesel::Queryable)]
pub struct ShiftRow {
    pub shift_id: i64,
    pub name: String,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub capacity: i32,
    pub hours_value: f64,
}

impl ShiftRow {
    /// Converts the row into a domain `RecurringShift`.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored column cannot be decoded.
    pub fn into_shift(self) -> Result<RecurringShift, PersistenceError> {
        let mut shift = RecurringShift::new(
            self.name,
            decode_weekday(self.day_of_week)?,
            decode_time(&self.start_time)?,
            decode_time(&self.end_time)?,
            decode_u32(self.capacity, "capacity")?,
            self.hours_value,
        );
        shift.shift_id = Some(self.shift_id);
        Ok(shift)
    }
}

/// A `shift_signups` row.
#[derive(Debug, Clone, diesel::Queryable)]
pub struct ShiftSignupRow {
    pub signup_id: i64,
    pub shift_id: i64,
    pub student_id: i64,
    pub date: String,
    pub status: String,
    pub created_at: String,
}

impl ShiftSignupRow {
    /// Converts the row into a domain `ShiftSignup`.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored column cannot be decoded.
    pub fn into_signup(self) -> Result<ShiftSignup, PersistenceError> {
        Ok(ShiftSignup {
            signup_id: Some(self.signup_id),
            shift_id: self.shift_id,
            student_id: self.student_id,
            date: decode_date(&self.date)?,
            status: SignupStatus::from_str(&self.status)
                .map_err(|e| PersistenceError::SerializationError(e.to_string()))?,
            created_at: decode_datetime(&self.created_at)?,
        })
    }
}

/// A `weekly_rotations` row.
#[derive(Debug, Clone, diesel::Queryable)]
pub struct RotationRow {
    pub rotation_id: i64,
    pub week_monday: String,
    pub assigned_class: String,
}

impl RotationRow {
    /// Converts the row into a domain `WeeklyRotation`.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored column cannot be decoded.
    pub fn into_rotation(self) -> Result<WeeklyRotation, PersistenceError> {
        let mut rotation = WeeklyRotation::new(decode_date(&self.week_monday)?, self.assigned_class);
        rotation.rotation_id = Some(self.rotation_id);
        Ok(rotation)
    }
}
