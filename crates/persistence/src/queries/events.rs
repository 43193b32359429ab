// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event and event-signup lookups.

use diesel::prelude::*;
use diesel::SqliteConnection;
use volsched_domain::{Event, EventSignup};

use crate::data_models::{EventRow, EventSignupRow};
use crate::diesel_schema::{event_signups, events};
use crate::error::PersistenceError;

/// Retrieves an event by canonical ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the row cannot be
/// decoded.
pub fn get_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Option<Event>, PersistenceError> {
    let row: Option<EventRow> = events::table
        .filter(events::event_id.eq(event_id))
        .first::<EventRow>(conn)
        .optional()?;

    row.map(EventRow::into_event).transpose()
}

/// Lists all events, ordered by start time.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be
/// decoded.
pub fn list_events(conn: &mut SqliteConnection) -> Result<Vec<Event>, PersistenceError> {
    let rows: Vec<EventRow> = events::table
        .order(events::start_time.asc())
        .load::<EventRow>(conn)?;

    rows.into_iter().map(EventRow::into_event).collect()
}

/// Counts the signups consuming the event's capacity.
///
/// Event signups have no status column; every row counts (cancellation
/// deletes the row).
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_event_signups(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<u32, PersistenceError> {
    let count: i64 = event_signups::table
        .filter(event_signups::event_id.eq(event_id))
        .count()
        .get_result(conn)?;

    u32::try_from(count).map_err(|_| PersistenceError::Other(format!("bad signup count: {count}")))
}

/// Retrieves the student's signup for an event, if one exists.
///
/// # Errors
///
/// Returns an error if the database query fails or the row cannot be
/// decoded.
pub fn get_event_signup(
    conn: &mut SqliteConnection,
    event_id: i64,
    student_id: i64,
) -> Result<Option<EventSignup>, PersistenceError> {
    let row: Option<EventSignupRow> = event_signups::table
        .filter(event_signups::event_id.eq(event_id))
        .filter(event_signups::student_id.eq(student_id))
        .first::<EventSignupRow>(conn)
        .optional()?;

    row.map(EventSignupRow::into_signup).transpose()
}
