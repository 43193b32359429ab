// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler takes the persistence adapter plus the request data,
//! translates wire strings into domain types at the boundary, and maps
//! every lower-layer error through the explicit translation functions
//! in [`crate::error`]. "Now" is always injected by the caller so the
//! handlers stay deterministic under test.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};
use tracing::info;
use volsched::{resolve_event_status, resolve_occurrence_status};
use volsched_domain::{
    Event, GradeLimit, RecurringShift, Student, parse_date, validate_event_fields,
    validate_shift_fields, validate_student_fields, weekday_from_index, weekday_index,
    weekday_name,
};
use volsched_persistence::Persistence;

use crate::auth::AuthorizationService;
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    AssignRotationRequest, AssignRotationResponse, CancelSignupResponse, ChangePasswordRequest,
    ChangePasswordResponse, CreateEventRequest, CreateEventResponse, CreateShiftRequest,
    CreateShiftResponse, DeleteEventResponse, DeleteShiftResponse, EventInfo, EventSignupResponse,
    EventStatusResponse, HistoryEntryInfo, HistoryResponse, ListEventsResponse,
    ListShiftsResponse, ListStudentStatsResponse, LoginRequest, LoginResponse,
    LookupRotationResponse, OccurrenceStatusResponse, RegisterStudentRequest,
    RegisterStudentResponse, RotationInfo, ShiftInfo, ShiftSignupResponse, StudentInfo,
    StudentStatsInfo, TotalHoursResponse, UpdateEventResponse, UpdateProfileRequest,
    UpdateProfileResponse,
};

/// Parses an RFC 3339 instant from a request field.
fn parse_datetime(field: &str, value: &str) -> Result<OffsetDateTime, ApiError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("Failed to parse timestamp '{value}': {e}"),
    })
}

/// Formats an instant as RFC 3339 for a response field.
fn format_datetime(value: OffsetDateTime) -> Result<String, ApiError> {
    value.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

/// Formats a calendar date as `YYYY-MM-DD` for a response field.
fn format_date(value: Date) -> Result<String, ApiError> {
    let format = format_description!("[year]-[month]-[day]");
    value.format(&format).map_err(|e| ApiError::Internal {
        message: format!("Failed to format date: {e}"),
    })
}

/// Parses a `HH:MM:SS` time of day from a request field.
fn parse_time_of_day(field: &str, value: &str) -> Result<Time, ApiError> {
    let format = format_description!("[hour]:[minute]:[second]");
    Time::parse(value, &format).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("Failed to parse time '{value}': {e}"),
    })
}

/// Formats a time of day as `HH:MM:SS` for a response field.
fn format_time(value: Time) -> Result<String, ApiError> {
    let format = format_description!("[hour]:[minute]:[second]");
    value.format(&format).map_err(|e| ApiError::Internal {
        message: format!("Failed to format time: {e}"),
    })
}

/// Extracts a canonical ID that persistence is guaranteed to have set.
fn require_id(id: Option<i64>) -> Result<i64, ApiError> {
    id.ok_or_else(|| ApiError::Internal {
        message: String::from("Persisted record is missing its canonical ID"),
    })
}

/// Loads the acting student behind a request.
///
/// An unknown acting ID is an authentication failure, not a missing
/// resource: the caller claimed an identity that does not exist.
fn load_acting_student(
    persistence: &mut Persistence,
    acting_student_id: i64,
) -> Result<Student, ApiError> {
    persistence
        .get_student(acting_student_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::AuthenticationFailed {
            reason: format!("Unknown student {acting_student_id}"),
        })
}

/// Loads a student referenced as a query target.
fn load_student(persistence: &mut Persistence, student_id: i64) -> Result<Student, ApiError> {
    persistence
        .get_student(student_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("student"),
            message: format!("Student {student_id} not found"),
        })
}

/// Loads an event referenced as a query target.
fn load_event(persistence: &mut Persistence, event_id: i64) -> Result<Event, ApiError> {
    persistence
        .get_event(event_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("event"),
            message: format!("Event {event_id} not found"),
        })
}

/// Loads a shift template referenced as a query target.
fn load_shift(persistence: &mut Persistence, shift_id: i64) -> Result<RecurringShift, ApiError> {
    persistence
        .get_shift(shift_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("shift"),
            message: format!("Shift {shift_id} not found"),
        })
}

/// Builds the API profile view of a student.
fn student_info(student: &Student) -> Result<StudentInfo, ApiError> {
    Ok(StudentInfo {
        student_id: require_id(student.student_id)?,
        phone: student.phone.clone(),
        name: student.name.clone(),
        enrollment_year: student.enrollment_year,
        class_number: student.class_number,
        class_name: student.full_class_name(),
        wechat: student.wechat.clone(),
        qq: student.qq.clone(),
        is_admin: student.is_admin,
    })
}

/// Builds the API view of an event with its computed status.
fn event_info(now: OffsetDateTime, event: &Event, occupancy: u32) -> Result<EventInfo, ApiError> {
    Ok(EventInfo {
        event_id: require_id(event.event_id)?,
        title: event.title.clone(),
        description: event.description.clone(),
        start_time: format_datetime(event.start_time)?,
        end_time: format_datetime(event.end_time)?,
        registration_deadline: format_datetime(event.registration_deadline)?,
        location: event.location.clone(),
        required_volunteers: event.required_volunteers,
        grade_limit: event.grade_limit.to_string(),
        hours_value: event.hours_value,
        status: resolve_event_status(now, event, occupancy).to_string(),
        occupancy,
    })
}

/// Builds an event from a create/update request after parsing its wire
/// fields.
fn event_from_request(request: &CreateEventRequest) -> Result<Event, ApiError> {
    let grade_limit: GradeLimit =
        GradeLimit::parse(&request.grade_limit).map_err(translate_domain_error)?;
    let event: Event = Event::new(
        request.title.clone(),
        request.description.clone(),
        parse_datetime("start_time", &request.start_time)?,
        parse_datetime("end_time", &request.end_time)?,
        parse_datetime("registration_deadline", &request.registration_deadline)?,
        request.location.clone(),
        request.required_volunteers,
        grade_limit,
        request.hours_value,
    );
    validate_event_fields(&event).map_err(translate_domain_error)?;
    Ok(event)
}

// ============================================================================
// Accounts
// ============================================================================

/// Registers a new student account.
///
/// The password must pass the policy check before anything is persisted;
/// the phone number must be unique.
///
/// # Errors
///
/// Returns an error if field validation fails, the password violates
/// policy, or the phone number is already registered.
pub fn register_student(
    persistence: &mut Persistence,
    request: RegisterStudentRequest,
) -> Result<RegisterStudentResponse, ApiError> {
    let student: Student = Student::new(
        request.phone.clone(),
        request.name.clone(),
        request.enrollment_year,
        request.class_number,
        request.wechat,
        request.qq,
        false,
    );
    validate_student_fields(&student).map_err(translate_domain_error)?;

    let policy: PasswordPolicy = PasswordPolicy::default();
    policy.validate(
        &request.password,
        &request.password_confirmation,
        &request.phone,
        &request.name,
    )?;

    let student_id: i64 = persistence
        .register_student(&student, &request.password)
        .map_err(translate_persistence_error)?;

    info!(student_id, "registered student");

    Ok(RegisterStudentResponse {
        student_id,
        phone: request.phone,
        name: request.name.clone(),
        message: format!("Successfully registered student '{}'", request.name),
    })
}

/// Checks a student's credentials and returns their profile.
///
/// Unknown phone and wrong password produce the same rejection so the
/// response does not reveal which part was wrong.
///
/// # Errors
///
/// Returns `AuthenticationFailed` if the credentials do not match.
pub fn login(
    persistence: &mut Persistence,
    request: LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let failed = || ApiError::AuthenticationFailed {
        reason: String::from("Invalid phone or password"),
    };

    let (student, password_hash): (Student, String) = persistence
        .get_student_by_phone(&request.phone)
        .map_err(translate_persistence_error)?
        .ok_or_else(failed)?;

    let verified: bool = persistence
        .verify_password(&request.password, &password_hash)
        .map_err(translate_persistence_error)?;
    if !verified {
        return Err(failed());
    }

    let student: StudentInfo = student_info(&student)?;
    info!(student_id = student.student_id, "student logged in");

    Ok(LoginResponse {
        student,
        message: String::from("Login successful"),
    })
}

/// Retrieves a student's profile.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no such student exists.
pub fn student_profile(
    persistence: &mut Persistence,
    student_id: i64,
) -> Result<StudentInfo, ApiError> {
    let student: Student = load_student(persistence, student_id)?;
    student_info(&student)
}

/// Updates the acting student's editable profile fields.
///
/// # Errors
///
/// Returns an error if the acting student is unknown or the new name is
/// empty.
pub fn update_profile(
    persistence: &mut Persistence,
    acting_student_id: i64,
    request: UpdateProfileRequest,
) -> Result<UpdateProfileResponse, ApiError> {
    load_acting_student(persistence, acting_student_id)?;

    if request.name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("Name cannot be empty"),
        });
    }

    persistence
        .update_student_profile(
            acting_student_id,
            &request.name,
            request.wechat.as_deref(),
            request.qq.as_deref(),
        )
        .map_err(translate_persistence_error)?;

    Ok(UpdateProfileResponse {
        message: String::from("Profile updated"),
    })
}

/// Changes the acting student's password.
///
/// # Errors
///
/// Returns an error if the acting student is unknown or the new password
/// violates policy.
pub fn change_password(
    persistence: &mut Persistence,
    acting_student_id: i64,
    request: ChangePasswordRequest,
) -> Result<ChangePasswordResponse, ApiError> {
    let actor: Student = load_acting_student(persistence, acting_student_id)?;

    let policy: PasswordPolicy = PasswordPolicy::default();
    policy.validate(
        &request.password,
        &request.password_confirmation,
        &actor.phone,
        &actor.name,
    )?;

    persistence
        .update_student_password(acting_student_id, &request.password)
        .map_err(translate_persistence_error)?;

    Ok(ChangePasswordResponse {
        message: String::from("Password changed"),
    })
}

// ============================================================================
// Events
// ============================================================================

/// Creates a one-off event (admin only).
///
/// # Errors
///
/// Returns an error if the actor is not an admin or field validation
/// fails.
pub fn create_event(
    persistence: &mut Persistence,
    acting_student_id: i64,
    request: CreateEventRequest,
) -> Result<CreateEventResponse, ApiError> {
    let actor: Student = load_acting_student(persistence, acting_student_id)?;
    AuthorizationService::authorize_admin(&actor, "create_event")?;

    let event: Event = event_from_request(&request)?;
    let event_id: i64 = persistence
        .create_event(&event)
        .map_err(translate_persistence_error)?;

    info!(event_id, title = %event.title, "created event");

    Ok(CreateEventResponse {
        event_id,
        title: event.title.clone(),
        message: format!("Successfully created event '{}'", event.title),
    })
}

/// Replaces an event's stored fields (admin only).
///
/// # Errors
///
/// Returns an error if the actor is not an admin, field validation
/// fails, or the event does not exist.
pub fn update_event(
    persistence: &mut Persistence,
    acting_student_id: i64,
    event_id: i64,
    request: CreateEventRequest,
) -> Result<UpdateEventResponse, ApiError> {
    let actor: Student = load_acting_student(persistence, acting_student_id)?;
    AuthorizationService::authorize_admin(&actor, "update_event")?;

    let event: Event = event_from_request(&request)?;
    persistence
        .update_event(event_id, &event)
        .map_err(translate_persistence_error)?;

    Ok(UpdateEventResponse {
        message: format!("Successfully updated event {event_id}"),
    })
}

/// Deletes an event and its signups (admin only).
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the event does not
/// exist.
pub fn delete_event(
    persistence: &mut Persistence,
    acting_student_id: i64,
    event_id: i64,
) -> Result<DeleteEventResponse, ApiError> {
    let actor: Student = load_acting_student(persistence, acting_student_id)?;
    AuthorizationService::authorize_admin(&actor, "delete_event")?;

    persistence
        .delete_event(event_id)
        .map_err(translate_persistence_error)?;

    Ok(DeleteEventResponse {
        message: format!("Successfully deleted event {event_id}"),
    })
}

/// Retrieves an event with its computed status and occupancy.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no such event exists.
pub fn get_event(
    persistence: &mut Persistence,
    now: OffsetDateTime,
    event_id: i64,
) -> Result<EventInfo, ApiError> {
    let event: Event = load_event(persistence, event_id)?;
    let occupancy: u32 = persistence
        .count_event_signups(event_id)
        .map_err(translate_persistence_error)?;
    event_info(now, &event, occupancy)
}

/// Lists all events with computed status, ordered by start time.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_events(
    persistence: &mut Persistence,
    now: OffsetDateTime,
) -> Result<ListEventsResponse, ApiError> {
    let events: Vec<Event> = persistence
        .list_events()
        .map_err(translate_persistence_error)?;

    let mut infos: Vec<EventInfo> = Vec::with_capacity(events.len());
    for event in &events {
        let event_id: i64 = require_id(event.event_id)?;
        let occupancy: u32 = persistence
            .count_event_signups(event_id)
            .map_err(translate_persistence_error)?;
        infos.push(event_info(now, event, occupancy)?);
    }

    Ok(ListEventsResponse { events: infos })
}

/// Derives an event's lifecycle status at the given instant.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no such event exists.
pub fn event_status(
    persistence: &mut Persistence,
    now: OffsetDateTime,
    event_id: i64,
) -> Result<EventStatusResponse, ApiError> {
    let event: Event = load_event(persistence, event_id)?;
    let occupancy: u32 = persistence
        .count_event_signups(event_id)
        .map_err(translate_persistence_error)?;

    Ok(EventStatusResponse {
        event_id,
        status: resolve_event_status(now, &event, occupancy).to_string(),
        occupancy,
        capacity: event.required_volunteers,
    })
}

/// Signs the acting student up for an event.
///
/// The full admission pipeline, occupancy check included, runs inside
/// one IMMEDIATE transaction in the persistence layer.
///
/// # Errors
///
/// Returns the specific rejection of the first failing admission rule.
pub fn signup_for_event(
    persistence: &mut Persistence,
    now: OffsetDateTime,
    acting_student_id: i64,
    event_id: i64,
) -> Result<EventSignupResponse, ApiError> {
    let signup_id: i64 = persistence
        .signup_for_event(now, event_id, acting_student_id)
        .map_err(translate_persistence_error)?;

    info!(signup_id, event_id, student_id = acting_student_id, "event signup admitted");

    Ok(EventSignupResponse {
        signup_id,
        event_id,
        student_id: acting_student_id,
        message: format!("Successfully signed up for event {event_id}"),
    })
}

/// Cancels the acting student's event signup.
///
/// Allowed only while the event has not started; the seat is released.
///
/// # Errors
///
/// Returns an error if the event or signup does not exist, or the event
/// has already started.
pub fn cancel_event_signup(
    persistence: &mut Persistence,
    now: OffsetDateTime,
    acting_student_id: i64,
    event_id: i64,
) -> Result<CancelSignupResponse, ApiError> {
    persistence
        .cancel_event_signup(now, event_id, acting_student_id)
        .map_err(translate_persistence_error)?;

    Ok(CancelSignupResponse {
        message: format!("Cancelled signup for event {event_id}"),
    })
}

// ============================================================================
// Shifts
// ============================================================================

/// Creates a weekly-recurring shift template (admin only).
///
/// # Errors
///
/// Returns an error if the actor is not an admin or field validation
/// fails.
pub fn create_shift(
    persistence: &mut Persistence,
    acting_student_id: i64,
    request: CreateShiftRequest,
) -> Result<CreateShiftResponse, ApiError> {
    let actor: Student = load_acting_student(persistence, acting_student_id)?;
    AuthorizationService::authorize_admin(&actor, "create_shift")?;

    let day_of_week = weekday_from_index(request.day_of_week).map_err(translate_domain_error)?;
    let shift: RecurringShift = RecurringShift::new(
        request.name.clone(),
        day_of_week,
        parse_time_of_day("start_time", &request.start_time)?,
        parse_time_of_day("end_time", &request.end_time)?,
        request.capacity,
        request.hours_value,
    );
    validate_shift_fields(&shift).map_err(translate_domain_error)?;

    let shift_id: i64 = persistence
        .create_shift(&shift)
        .map_err(translate_persistence_error)?;

    info!(shift_id, name = %shift.name, "created shift template");

    Ok(CreateShiftResponse {
        shift_id,
        name: shift.name.clone(),
        message: format!("Successfully created shift '{}'", shift.name),
    })
}

/// Deletes a shift template and its signups (admin only).
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the template does
/// not exist.
pub fn delete_shift(
    persistence: &mut Persistence,
    acting_student_id: i64,
    shift_id: i64,
) -> Result<DeleteShiftResponse, ApiError> {
    let actor: Student = load_acting_student(persistence, acting_student_id)?;
    AuthorizationService::authorize_admin(&actor, "delete_shift")?;

    persistence
        .delete_shift(shift_id)
        .map_err(translate_persistence_error)?;

    Ok(DeleteShiftResponse {
        message: format!("Successfully deleted shift {shift_id}"),
    })
}

/// Lists all shift templates.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_shifts(persistence: &mut Persistence) -> Result<ListShiftsResponse, ApiError> {
    let shifts: Vec<RecurringShift> = persistence
        .list_shifts()
        .map_err(translate_persistence_error)?;

    let mut infos: Vec<ShiftInfo> = Vec::with_capacity(shifts.len());
    for shift in &shifts {
        infos.push(ShiftInfo {
            shift_id: require_id(shift.shift_id)?,
            name: shift.name.clone(),
            day_of_week: weekday_index(shift.day_of_week),
            day_name: weekday_name(shift.day_of_week).to_string(),
            start_time: format_time(shift.start_time)?,
            end_time: format_time(shift.end_time)?,
            capacity: shift.capacity,
            hours_value: shift.hours_value,
        });
    }

    Ok(ListShiftsResponse { shifts: infos })
}

/// Derives the status and occupancy of one dated shift occurrence.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no such template exists, or
/// `InvalidInput` if the date is malformed.
pub fn shift_occurrence_status(
    persistence: &mut Persistence,
    now: OffsetDateTime,
    shift_id: i64,
    date_text: &str,
) -> Result<OccurrenceStatusResponse, ApiError> {
    let shift: RecurringShift = load_shift(persistence, shift_id)?;
    let date: Date = parse_date(date_text).map_err(translate_domain_error)?;
    let occupancy: u32 = persistence
        .count_occurrence_signups(shift_id, date)
        .map_err(translate_persistence_error)?;

    Ok(OccurrenceStatusResponse {
        shift_id,
        date: format_date(date)?,
        status: resolve_occurrence_status(now.date(), date).to_string(),
        occupancy,
        capacity: shift.capacity,
    })
}

/// Signs the acting student up for a shift occurrence.
///
/// The full admission pipeline (date, weekday, duplicate, capacity,
/// rotation, weekly quota) runs inside one IMMEDIATE transaction in the
/// persistence layer. A cancelled signup for the same occurrence is
/// reactivated rather than duplicated.
///
/// # Errors
///
/// Returns the specific rejection of the first failing admission rule.
pub fn signup_for_shift(
    persistence: &mut Persistence,
    now: OffsetDateTime,
    acting_student_id: i64,
    shift_id: i64,
    date_text: &str,
) -> Result<ShiftSignupResponse, ApiError> {
    let signup_id: i64 = persistence
        .signup_for_shift(now, shift_id, acting_student_id, date_text)
        .map_err(translate_persistence_error)?;

    info!(signup_id, shift_id, student_id = acting_student_id, date = date_text, "shift signup admitted");

    Ok(ShiftSignupResponse {
        signup_id,
        shift_id,
        student_id: acting_student_id,
        date: date_text.to_string(),
        message: format!("Successfully signed up for shift {shift_id} on {date_text}"),
    })
}

/// Cancels the acting student's shift signup.
///
/// The row is marked `Cancelled`; capacity and weekly quota are
/// released.
///
/// # Errors
///
/// Returns an error if the shift does not exist or the student holds no
/// active signup for the occurrence.
pub fn cancel_shift_signup(
    persistence: &mut Persistence,
    acting_student_id: i64,
    shift_id: i64,
    date_text: &str,
) -> Result<CancelSignupResponse, ApiError> {
    persistence
        .cancel_shift_signup(shift_id, acting_student_id, date_text)
        .map_err(translate_persistence_error)?;

    Ok(CancelSignupResponse {
        message: format!("Cancelled signup for shift {shift_id} on {date_text}"),
    })
}

// ============================================================================
// Rotations
// ============================================================================

/// Assigns a class to a rotation week (admin only).
///
/// Reassigning an already-configured week replaces the class; the week's
/// Monday stays unique.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the date is not a
/// Monday, or the upsert fails.
pub fn assign_rotation(
    persistence: &mut Persistence,
    acting_student_id: i64,
    request: AssignRotationRequest,
) -> Result<AssignRotationResponse, ApiError> {
    let actor: Student = load_acting_student(persistence, acting_student_id)?;
    AuthorizationService::authorize_admin(&actor, "assign_rotation")?;

    let week_monday: Date = parse_date(&request.week_monday).map_err(translate_domain_error)?;
    let rotation_id: i64 = persistence
        .assign_rotation(week_monday, &request.assigned_class)
        .map_err(translate_persistence_error)?;

    info!(rotation_id, week_monday = %request.week_monday, class = %request.assigned_class, "rotation assigned");

    Ok(AssignRotationResponse {
        rotation_id,
        week_monday: request.week_monday,
        assigned_class: request.assigned_class,
        message: String::from("Rotation assigned"),
    })
}

/// Retrieves the rotation governing the week containing the given date.
///
/// # Errors
///
/// Returns `InvalidInput` if the date is malformed, or an error if the
/// query fails.
pub fn lookup_rotation(
    persistence: &mut Persistence,
    date_text: &str,
) -> Result<LookupRotationResponse, ApiError> {
    let date: Date = parse_date(date_text).map_err(translate_domain_error)?;
    let rotation = persistence
        .lookup_rotation(date)
        .map_err(translate_persistence_error)?;

    let rotation: Option<RotationInfo> = match rotation {
        Some(r) => Some(RotationInfo {
            rotation_id: require_id(r.rotation_id)?,
            week_monday: format_date(r.week_monday)?,
            assigned_class: r.assigned_class,
        }),
        None => None,
    };

    Ok(LookupRotationResponse { rotation })
}

// ============================================================================
// Credit
// ============================================================================

/// Sums a student's completed hour credit.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no such student exists.
pub fn total_hours(
    persistence: &mut Persistence,
    now: OffsetDateTime,
    student_id: i64,
) -> Result<TotalHoursResponse, ApiError> {
    load_student(persistence, student_id)?;

    let events = persistence
        .event_assignments(student_id)
        .map_err(translate_persistence_error)?;
    let shifts = persistence
        .shift_assignments(student_id)
        .map_err(translate_persistence_error)?;

    Ok(TotalHoursResponse {
        student_id,
        total_hours: volsched::total_hours(now, now.date(), &events, &shifts),
    })
}

/// Retrieves a student's merged assignment history, newest first.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no such student exists.
pub fn history(
    persistence: &mut Persistence,
    now: OffsetDateTime,
    student_id: i64,
) -> Result<HistoryResponse, ApiError> {
    load_student(persistence, student_id)?;

    let events = persistence
        .event_assignments(student_id)
        .map_err(translate_persistence_error)?;
    let shifts = persistence
        .shift_assignments(student_id)
        .map_err(translate_persistence_error)?;

    let mut entries: Vec<HistoryEntryInfo> = Vec::new();
    for entry in volsched::history(now, now.date(), &events, &shifts) {
        entries.push(HistoryEntryInfo {
            kind: match entry.kind {
                volsched::AssignmentKind::Event => String::from("event"),
                volsched::AssignmentKind::Shift => String::from("shift"),
            },
            id: entry.id,
            title: entry.title,
            hours: entry.hours,
            date: format_date(entry.date)?,
            status: entry.status.to_string(),
        });
    }

    Ok(HistoryResponse {
        student_id,
        entries,
    })
}

/// Lists per-student completed-hour totals (admin only).
///
/// # Errors
///
/// Returns an error if the actor is not an admin or a query fails.
pub fn list_student_stats(
    persistence: &mut Persistence,
    now: OffsetDateTime,
    acting_student_id: i64,
) -> Result<ListStudentStatsResponse, ApiError> {
    let actor: Student = load_acting_student(persistence, acting_student_id)?;
    AuthorizationService::authorize_admin(&actor, "list_student_stats")?;

    let students: Vec<Student> = persistence
        .list_students()
        .map_err(translate_persistence_error)?;

    let mut rows: Vec<StudentStatsInfo> = Vec::with_capacity(students.len());
    for student in &students {
        let student_id: i64 = require_id(student.student_id)?;
        let events = persistence
            .event_assignments(student_id)
            .map_err(translate_persistence_error)?;
        let shifts = persistence
            .shift_assignments(student_id)
            .map_err(translate_persistence_error)?;
        rows.push(StudentStatsInfo {
            student_id,
            name: student.name.clone(),
            class_name: student.full_class_name(),
            total_hours: volsched::total_hours(now, now.date(), &events, &shifts),
        });
    }

    Ok(ListStudentStatsResponse { students: rows })
}
