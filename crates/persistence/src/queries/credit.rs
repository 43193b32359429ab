// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Source records for the credit aggregator.
//!
//! These joins feed `volsched::total_hours` and `volsched::history`.
//! Nothing is cached; totals are recomputed from these rows on every
//! call.

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::str::FromStr;
use volsched::{EventAssignment, ShiftAssignment};
use volsched_domain::SignupStatus;

use crate::data_models::{decode_date, decode_datetime};
use crate::diesel_schema::{event_signups, events, recurring_shifts, shift_signups};
use crate::error::PersistenceError;

/// Loads every event the student holds a signup for.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be
/// decoded.
pub fn event_assignments(
    conn: &mut SqliteConnection,
    student_id: i64,
) -> Result<Vec<EventAssignment>, PersistenceError> {
    let rows: Vec<(i64, String, f64, String, String)> = event_signups::table
        .inner_join(events::table)
        .filter(event_signups::student_id.eq(student_id))
        .select((
            events::event_id,
            events::title,
            events::hours_value,
            events::start_time,
            events::end_time,
        ))
        .order(event_signups::signup_id.asc())
        .load(conn)?;

    rows.into_iter()
        .map(|(event_id, title, hours_value, start_time, end_time)| {
            Ok(EventAssignment {
                event_id,
                title,
                hours_value,
                start_time: decode_datetime(&start_time)?,
                end_time: decode_datetime(&end_time)?,
            })
        })
        .collect()
}

/// Loads every shift occurrence the student holds a signup for.
///
/// Cancelled rows are included here; the aggregator skips them. Keeping
/// the filter in one place (the core crate) keeps both callers honest.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be
/// decoded.
pub fn shift_assignments(
    conn: &mut SqliteConnection,
    student_id: i64,
) -> Result<Vec<ShiftAssignment>, PersistenceError> {
    let rows: Vec<(i64, String, f64, String, String)> = shift_signups::table
        .inner_join(recurring_shifts::table)
        .filter(shift_signups::student_id.eq(student_id))
        .select((
            recurring_shifts::shift_id,
            recurring_shifts::name,
            recurring_shifts::hours_value,
            shift_signups::date,
            shift_signups::status,
        ))
        .order(shift_signups::signup_id.asc())
        .load(conn)?;

    rows.into_iter()
        .map(|(shift_id, name, hours_value, date, status)| {
            Ok(ShiftAssignment {
                shift_id,
                name,
                hours_value,
                date: decode_date(&date)?,
                status: SignupStatus::from_str(&status)
                    .map_err(|e| PersistenceError::SerializationError(e.to_string()))?,
            })
        })
        .collect()
}
