// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The admission commits and their inverses.
//!
//! Each commit runs inside one IMMEDIATE transaction spanning exactly
//! check + insert: the store lookups, the rule pipeline over that
//! snapshot, and the write. The unique indexes on `(event, student)`
//! and `(shift, date, student)` back the duplicate guard, so even a
//! race that slips past the count check cannot double-book.
//!
//! Lookup order matters: the target and the student are resolved before
//! the occurrence date is parsed, so a bad date on a missing shift
//! reports the missing shift.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::OffsetDateTime;
use tracing::info;
use volsched::{
    EventAdmission, ShiftAdmission, evaluate_event_signup, evaluate_shift_signup,
    resolve_event_status,
};
use volsched_domain::{
    DomainError, Event, EventStatus, RecurringShift, ShiftSignup, SignupStatus, Student,
    friday_of_week, monday_of_week, parse_date,
};

use crate::data_models::{encode_date, encode_datetime};
use crate::diesel_schema::{event_signups, shift_signups};
use crate::error::PersistenceError;
use crate::queries;
use crate::sqlite::get_last_insert_rowid;

/// Admits a student to an event and commits the signup.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `now` - The current instant (the status resolution input)
/// * `event_id` - The target event
/// * `student_id` - The requesting student
///
/// # Returns
///
/// The signup ID of the committed row.
///
/// # Errors
///
/// Returns the specific rejection of the first failing admission rule,
/// or an error if the commit fails. A rejection rolls the transaction
/// back.
pub fn signup_for_event(
    conn: &mut SqliteConnection,
    now: OffsetDateTime,
    event_id: i64,
    student_id: i64,
) -> Result<i64, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let event: Event = queries::events::get_event(conn, event_id)?
            .ok_or(PersistenceError::DomainRejected(DomainError::EventNotFound(event_id)))?;
        let student: Student = queries::students::get_student(conn, student_id)?.ok_or(
            PersistenceError::DomainRejected(DomainError::StudentNotFound(student_id)),
        )?;

        let occupancy: u32 = queries::events::count_event_signups(conn, event_id)?;
        let already_signed_up: bool =
            queries::events::get_event_signup(conn, event_id, student_id)?.is_some();

        let admission = EventAdmission {
            event: &event,
            student: &student,
            occupancy,
            already_signed_up,
        };
        evaluate_event_signup(now, &admission)?;

        diesel::insert_into(event_signups::table)
            .values((
                event_signups::event_id.eq(event_id),
                event_signups::student_id.eq(student_id),
                event_signups::created_at.eq(encode_datetime(now)?),
            ))
            .execute(conn)?;

        let signup_id: i64 = get_last_insert_rowid(conn)?;
        info!(event_id, student_id, signup_id, "Event signup committed");

        Ok(signup_id)
    })
}

/// Cancels an event signup by deleting the row, the exact inverse of
/// the admission commit.
///
/// Cancellation is only allowed before the event starts.
///
/// # Errors
///
/// Returns `EventNotFound` if the event does not exist, `NotFound` if
/// no signup exists, or `EventNotOpen` if the event has already
/// started.
pub fn cancel_event_signup(
    conn: &mut SqliteConnection,
    now: OffsetDateTime,
    event_id: i64,
    student_id: i64,
) -> Result<(), PersistenceError> {
    conn.immediate_transaction(|conn| {
        let event: Event = queries::events::get_event(conn, event_id)?
            .ok_or(PersistenceError::DomainRejected(DomainError::EventNotFound(event_id)))?;

        if queries::events::get_event_signup(conn, event_id, student_id)?.is_none() {
            return Err(PersistenceError::NotFound(format!(
                "No signup for event {event_id} by student {student_id}"
            )));
        }

        if now >= event.start_time {
            let occupancy: u32 = queries::events::count_event_signups(conn, event_id)?;
            let status: EventStatus = resolve_event_status(now, &event, occupancy);
            return Err(PersistenceError::DomainRejected(DomainError::EventNotOpen {
                status,
            }));
        }

        diesel::delete(event_signups::table)
            .filter(event_signups::event_id.eq(event_id))
            .filter(event_signups::student_id.eq(student_id))
            .execute(conn)?;

        info!(event_id, student_id, "Event signup cancelled");
        Ok(())
    })
}

/// Admits a student to a shift occurrence and commits the signup.
///
/// If the student holds a cancelled row for the same `(shift, date)`,
/// admission reactivates that row instead of inserting a second one,
/// keeping the unique tuple intact.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `now` - The current instant; its date is "today" for the pipeline
/// * `shift_id` - The target shift template
/// * `student_id` - The requesting student
/// * `date_text` - The requested occurrence date, `YYYY-MM-DD`
///
/// # Returns
///
/// The signup ID of the committed (or reactivated) row.
///
/// # Errors
///
/// Returns the specific rejection of the first failing admission rule,
/// or an error if the commit fails. A rejection rolls the transaction
/// back.
pub fn signup_for_shift(
    conn: &mut SqliteConnection,
    now: OffsetDateTime,
    shift_id: i64,
    student_id: i64,
    date_text: &str,
) -> Result<i64, PersistenceError> {
    let today: time::Date = now.date();

    conn.immediate_transaction(|conn| {
        let shift: RecurringShift = queries::shifts::get_shift(conn, shift_id)?
            .ok_or(PersistenceError::DomainRejected(DomainError::ShiftNotFound(shift_id)))?;
        let student: Student = queries::students::get_student(conn, student_id)?.ok_or(
            PersistenceError::DomainRejected(DomainError::StudentNotFound(student_id)),
        )?;

        // Parsed only after the lookups so a bad date on a missing
        // shift reports the missing shift.
        let date: time::Date = parse_date(date_text)?;

        let existing: Option<ShiftSignup> =
            queries::shifts::get_shift_signup(conn, shift_id, date, student_id)?;
        let already_signed_up: bool = existing
            .as_ref()
            .is_some_and(|s| s.status != SignupStatus::Cancelled);

        let occupancy: u32 = queries::shifts::count_occurrence_signups(conn, shift_id, date)?;
        let week_monday: time::Date = monday_of_week(date);
        let week_friday: time::Date = friday_of_week(date);
        let rotation = queries::rotations::get_rotation_for_week(conn, week_monday)?;
        let weekly_signups: u32 =
            queries::shifts::count_weekly_signups(conn, student_id, week_monday, week_friday)?;

        let admission = ShiftAdmission {
            shift: &shift,
            student: &student,
            date,
            already_signed_up,
            occupancy,
            rotation: rotation.as_ref(),
            weekly_signups,
        };
        evaluate_shift_signup(today, &admission)?;

        // The pipeline admitted; any surviving row must be cancelled.
        if let Some(cancelled) = existing {
            let signup_id: i64 = cancelled.signup_id.unwrap_or_default();
            diesel::update(shift_signups::table)
                .filter(shift_signups::signup_id.eq(signup_id))
                .set((
                    shift_signups::status.eq(SignupStatus::Pending.as_str()),
                    shift_signups::created_at.eq(encode_datetime(now)?),
                ))
                .execute(conn)?;

            info!(shift_id, student_id, signup_id, "Shift signup reactivated");
            return Ok(signup_id);
        }

        diesel::insert_into(shift_signups::table)
            .values((
                shift_signups::shift_id.eq(shift_id),
                shift_signups::student_id.eq(student_id),
                shift_signups::date.eq(encode_date(date)?),
                shift_signups::status.eq(SignupStatus::Pending.as_str()),
                shift_signups::created_at.eq(encode_datetime(now)?),
            ))
            .execute(conn)?;

        let signup_id: i64 = get_last_insert_rowid(conn)?;
        info!(shift_id, student_id, signup_id, "Shift signup committed");

        Ok(signup_id)
    })
}

/// Cancels a shift signup by marking the row `Cancelled`.
///
/// The row is kept so a later re-signup can reactivate it; from this
/// point on it consumes neither capacity nor quota.
///
/// # Errors
///
/// Returns `ShiftNotFound` if the template does not exist, or
/// `NotFound` if the student holds no active signup for the occurrence.
pub fn cancel_shift_signup(
    conn: &mut SqliteConnection,
    shift_id: i64,
    student_id: i64,
    date_text: &str,
) -> Result<(), PersistenceError> {
    conn.immediate_transaction(|conn| {
        if queries::shifts::get_shift(conn, shift_id)?.is_none() {
            return Err(PersistenceError::DomainRejected(DomainError::ShiftNotFound(
                shift_id,
            )));
        }

        let date: time::Date = parse_date(date_text)?;

        let existing: Option<ShiftSignup> =
            queries::shifts::get_shift_signup(conn, shift_id, date, student_id)?;
        let Some(signup) = existing.filter(|s| s.status != SignupStatus::Cancelled) else {
            return Err(PersistenceError::NotFound(format!(
                "No active signup for shift {shift_id} on {date_text} by student {student_id}"
            )));
        };

        diesel::update(shift_signups::table)
            .filter(shift_signups::signup_id.eq(signup.signup_id.unwrap_or_default()))
            .set(shift_signups::status.eq(SignupStatus::Cancelled.as_str()))
            .execute(conn)?;

        info!(shift_id, student_id, "Shift signup cancelled");
        Ok(())
    })
}
