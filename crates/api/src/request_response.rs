// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! These are distinct from domain types and represent the API contract.
//! All instants are RFC 3339 strings, calendar dates are `YYYY-MM-DD`,
//! and times of day are `HH:MM:SS`; the handlers parse and format at
//! this boundary so the wire shape never depends on internal
//! representations.

use serde::{Deserialize, Serialize};

/// API request to register a new student account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterStudentRequest {
    /// Phone number, the unique login identity (digits only).
    pub phone: String,
    /// The student's name.
    pub name: String,
    /// Enrollment year, e.g. 2024.
    pub enrollment_year: u16,
    /// Class number within the enrollment year, e.g. 3.
    pub class_number: u8,
    /// Optional WeChat contact handle.
    pub wechat: Option<String>,
    /// Optional QQ contact handle.
    pub qq: Option<String>,
    /// The password.
    pub password: String,
    /// The password confirmation.
    pub password_confirmation: String,
}

/// API response for a successful student registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterStudentResponse {
    /// The canonical identifier assigned to the student.
    pub student_id: i64,
    /// The registered phone number.
    pub phone: String,
    /// The student's name.
    pub name: String,
    /// A success message.
    pub message: String,
}

/// API request to log in with phone and password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The phone number.
    pub phone: String,
    /// The password.
    pub password: String,
}

/// A student profile as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInfo {
    /// The canonical identifier.
    pub student_id: i64,
    /// The phone number.
    pub phone: String,
    /// The student's name.
    pub name: String,
    /// Enrollment year.
    pub enrollment_year: u16,
    /// Class number.
    pub class_number: u8,
    /// The derived full class name, e.g. `2024-3`.
    pub class_name: String,
    /// Optional WeChat contact handle.
    pub wechat: Option<String>,
    /// Optional QQ contact handle.
    pub qq: Option<String>,
    /// Whether the student may perform admin-gated operations.
    pub is_admin: bool,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The authenticated student's profile.
    pub student: StudentInfo,
    /// A success message.
    pub message: String,
}

/// API request to update the acting student's profile fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// The new name.
    pub name: String,
    /// The new WeChat handle, if any.
    pub wechat: Option<String>,
    /// The new QQ handle, if any.
    pub qq: Option<String>,
}

/// API response for a successful profile update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfileResponse {
    /// A success message.
    pub message: String,
}

/// API request to change the acting student's password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    /// The new password.
    pub password: String,
    /// The new password confirmation.
    pub password_confirmation: String,
}

/// API response for a successful password change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordResponse {
    /// A success message.
    pub message: String,
}

/// API request to create a one-off event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    /// The event title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// When the event starts (RFC 3339).
    pub start_time: String,
    /// When the event ends (RFC 3339).
    pub end_time: String,
    /// The registration deadline (RFC 3339).
    pub registration_deadline: String,
    /// Where the event takes place.
    pub location: String,
    /// The number of volunteer seats.
    pub required_volunteers: u32,
    /// `ALL` or a comma-separated list of enrollment years.
    pub grade_limit: String,
    /// Hour credit granted once the event has ended.
    pub hours_value: f64,
}

/// API response for a successful event creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEventResponse {
    /// The canonical identifier assigned to the event.
    pub event_id: i64,
    /// The event title.
    pub title: String,
    /// A success message.
    pub message: String,
}

/// API response for a successful event update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEventResponse {
    /// A success message.
    pub message: String,
}

/// API response for a successful event deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEventResponse {
    /// A success message.
    pub message: String,
}

/// An event as exposed by the API, with its computed status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInfo {
    /// The canonical identifier.
    pub event_id: i64,
    /// The event title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// When the event starts (RFC 3339).
    pub start_time: String,
    /// When the event ends (RFC 3339).
    pub end_time: String,
    /// The registration deadline (RFC 3339).
    pub registration_deadline: String,
    /// Where the event takes place.
    pub location: String,
    /// The number of volunteer seats.
    pub required_volunteers: u32,
    /// `ALL` or a comma-separated list of enrollment years.
    pub grade_limit: String,
    /// Hour credit granted once the event has ended.
    pub hours_value: f64,
    /// The computed lifecycle status at request time.
    pub status: String,
    /// Current signup count.
    pub occupancy: u32,
}

/// API response listing all events with computed status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEventsResponse {
    /// The events, ordered by start time.
    pub events: Vec<EventInfo>,
}

/// API response for an event status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStatusResponse {
    /// The queried event.
    pub event_id: i64,
    /// The computed lifecycle status.
    pub status: String,
    /// Current signup count.
    pub occupancy: u32,
    /// The number of volunteer seats.
    pub capacity: u32,
}

/// API response for a successful event signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSignupResponse {
    /// The canonical identifier of the committed signup.
    pub signup_id: i64,
    /// The event signed up for.
    pub event_id: i64,
    /// The student who signed up.
    pub student_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to create a weekly-recurring shift template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateShiftRequest {
    /// The shift name.
    pub name: String,
    /// The weekday index, 1 (Monday) through 5 (Friday).
    pub day_of_week: u8,
    /// Time of day the shift starts (`HH:MM:SS`).
    pub start_time: String,
    /// Time of day the shift ends (`HH:MM:SS`).
    pub end_time: String,
    /// Seats per dated occurrence.
    pub capacity: u32,
    /// Hour credit granted once the occurrence date has passed.
    pub hours_value: f64,
}

/// API response for a successful shift template creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateShiftResponse {
    /// The canonical identifier assigned to the template.
    pub shift_id: i64,
    /// The shift name.
    pub name: String,
    /// A success message.
    pub message: String,
}

/// API response for a successful shift template deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteShiftResponse {
    /// A success message.
    pub message: String,
}

/// A shift template as exposed by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftInfo {
    /// The canonical identifier.
    pub shift_id: i64,
    /// The shift name.
    pub name: String,
    /// The weekday index, 1 (Monday) through 5 (Friday).
    pub day_of_week: u8,
    /// The weekday name, e.g. `Monday`.
    pub day_name: String,
    /// Time of day the shift starts (`HH:MM:SS`).
    pub start_time: String,
    /// Time of day the shift ends (`HH:MM:SS`).
    pub end_time: String,
    /// Seats per dated occurrence.
    pub capacity: u32,
    /// Hour credit granted once the occurrence date has passed.
    pub hours_value: f64,
}

/// API response listing all shift templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListShiftsResponse {
    /// The shift templates.
    pub shifts: Vec<ShiftInfo>,
}

/// API response for a shift occurrence status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceStatusResponse {
    /// The queried shift template.
    pub shift_id: i64,
    /// The occurrence date (`YYYY-MM-DD`).
    pub date: String,
    /// `Completed` if the date is behind today, `Pending` otherwise.
    pub status: String,
    /// Non-cancelled signup count for the occurrence.
    pub occupancy: u32,
    /// Seats per occurrence.
    pub capacity: u32,
}

/// API response for a successful shift signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSignupResponse {
    /// The canonical identifier of the committed (or reactivated) signup.
    pub signup_id: i64,
    /// The shift template signed up for.
    pub shift_id: i64,
    /// The student who signed up.
    pub student_id: i64,
    /// The occurrence date (`YYYY-MM-DD`).
    pub date: String,
    /// A success message.
    pub message: String,
}

/// API response for a successful signup cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelSignupResponse {
    /// A success message.
    pub message: String,
}

/// API request to assign a class to a rotation week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignRotationRequest {
    /// The Monday of the governed week (`YYYY-MM-DD`).
    pub week_monday: String,
    /// The authorized full class name, e.g. `2024-3`.
    pub assigned_class: String,
}

/// API response for a successful rotation assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignRotationResponse {
    /// The canonical identifier of the rotation row.
    pub rotation_id: i64,
    /// The Monday of the governed week (`YYYY-MM-DD`).
    pub week_monday: String,
    /// The authorized class.
    pub assigned_class: String,
    /// A success message.
    pub message: String,
}

/// A rotation assignment as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationInfo {
    /// The canonical identifier.
    pub rotation_id: i64,
    /// The Monday of the governed week (`YYYY-MM-DD`).
    pub week_monday: String,
    /// The authorized class.
    pub assigned_class: String,
}

/// API response for a rotation lookup.
///
/// An unconfigured week yields `None`, not an error: lookup is a read,
/// and only the signup path treats the gap as a rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRotationResponse {
    /// The rotation governing the queried week, if configured.
    pub rotation: Option<RotationInfo>,
}

/// API response for a total-hours query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalHoursResponse {
    /// The queried student.
    pub student_id: i64,
    /// Summed hour credit of all completed assignments.
    pub total_hours: f64,
}

/// One record in a student's assignment history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntryInfo {
    /// The record source, `event` or `shift`.
    pub kind: String,
    /// The event or shift identifier.
    pub id: i64,
    /// The event title or shift name.
    pub title: String,
    /// Hour credit of the assignment.
    pub hours: f64,
    /// The assignment date (`YYYY-MM-DD`).
    pub date: String,
    /// `Completed` if the assignment is in the past, `Pending` otherwise.
    pub status: String,
}

/// API response for an assignment history query, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// The queried student.
    pub student_id: i64,
    /// The merged history records.
    pub entries: Vec<HistoryEntryInfo>,
}

/// Per-student totals row for the admin stats listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentStatsInfo {
    /// The student's canonical identifier.
    pub student_id: i64,
    /// The student's name.
    pub name: String,
    /// The derived full class name.
    pub class_name: String,
    /// Summed hour credit of all completed assignments.
    pub total_hours: f64,
}

/// API response listing per-student totals (admin only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListStudentStatsResponse {
    /// One row per registered student.
    pub students: Vec<StudentStatsInfo>,
}
