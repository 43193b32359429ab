// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift-template and shift-signup lookups.
//!
//! Occupancy and quota counts exclude cancelled rows: a cancelled signup
//! consumes neither capacity nor quota.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::Date;
use volsched_domain::{RecurringShift, ShiftSignup, SignupStatus};

use crate::data_models::{ShiftRow, ShiftSignupRow, encode_date};
use crate::diesel_schema::{recurring_shifts, shift_signups};
use crate::error::PersistenceError;

fn decode_count(count: i64) -> Result<u32, PersistenceError> {
    u32::try_from(count).map_err(|_| PersistenceError::Other(format!("bad signup count: {count}")))
}

/// Retrieves a shift template by canonical ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the row cannot be
/// decoded.
pub fn get_shift(
    conn: &mut SqliteConnection,
    shift_id: i64,
) -> Result<Option<RecurringShift>, PersistenceError> {
    let row: Option<ShiftRow> = recurring_shifts::table
        .filter(recurring_shifts::shift_id.eq(shift_id))
        .first::<ShiftRow>(conn)
        .optional()?;

    row.map(ShiftRow::into_shift).transpose()
}

/// Lists all shift templates, ordered by weekday then start time.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be
/// decoded.
pub fn list_shifts(conn: &mut SqliteConnection) -> Result<Vec<RecurringShift>, PersistenceError> {
    let rows: Vec<ShiftRow> = recurring_shifts::table
        .order((
            recurring_shifts::day_of_week.asc(),
            recurring_shifts::start_time.asc(),
        ))
        .load::<ShiftRow>(conn)?;

    rows.into_iter().map(ShiftRow::into_shift).collect()
}

/// Counts non-cancelled signups for one dated occurrence.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_occurrence_signups(
    conn: &mut SqliteConnection,
    shift_id: i64,
    date: Date,
) -> Result<u32, PersistenceError> {
    let date_text: String = encode_date(date)?;
    let count: i64 = shift_signups::table
        .filter(shift_signups::shift_id.eq(shift_id))
        .filter(shift_signups::date.eq(&date_text))
        .filter(shift_signups::status.ne(SignupStatus::Cancelled.as_str()))
        .count()
        .get_result(conn)?;

    decode_count(count)
}

/// Retrieves the student's signup row for `(shift, date)`, any status.
///
/// The cancelled row is needed too: a re-signup after cancellation
/// reactivates it instead of inserting a second row.
///
/// # Errors
///
/// Returns an error if the database query fails or the row cannot be
/// decoded.
pub fn get_shift_signup(
    conn: &mut SqliteConnection,
    shift_id: i64,
    date: Date,
    student_id: i64,
) -> Result<Option<ShiftSignup>, PersistenceError> {
    let date_text: String = encode_date(date)?;
    let row: Option<ShiftSignupRow> = shift_signups::table
        .filter(shift_signups::shift_id.eq(shift_id))
        .filter(shift_signups::date.eq(&date_text))
        .filter(shift_signups::student_id.eq(student_id))
        .first::<ShiftSignupRow>(conn)
        .optional()?;

    row.map(ShiftSignupRow::into_signup).transpose()
}

/// Counts the student's non-cancelled shift signups within one school
/// week (Monday..Friday inclusive), across all shift templates.
///
/// The ISO date text compares correctly as text, so a plain BETWEEN on
/// the column works.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_weekly_signups(
    conn: &mut SqliteConnection,
    student_id: i64,
    week_monday: Date,
    week_friday: Date,
) -> Result<u32, PersistenceError> {
    let monday_text: String = encode_date(week_monday)?;
    let friday_text: String = encode_date(week_friday)?;
    let count: i64 = shift_signups::table
        .filter(shift_signups::student_id.eq(student_id))
        .filter(shift_signups::date.between(&monday_text, &friday_text))
        .filter(shift_signups::status.ne(SignupStatus::Cancelled.as_str()))
        .count()
        .get_result(conn)?;

    decode_count(count)
}
