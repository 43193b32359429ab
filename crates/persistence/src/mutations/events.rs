// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event template mutations (admin surface).

use diesel::prelude::*;
use diesel::{Connection, SqliteConnection};
use tracing::info;
use volsched_domain::{DomainError, Event};

use crate::data_models::encode_datetime;
use crate::diesel_schema::{event_signups, events};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

fn encode_capacity(value: u32) -> Result<i32, PersistenceError> {
    i32::try_from(value).map_err(|_| PersistenceError::SerializationError(format!(
        "capacity out of range: {value}"
    )))
}

/// Creates a new event.
///
/// # Errors
///
/// Returns an error if the insert fails or a field cannot be encoded.
pub fn create_event(conn: &mut SqliteConnection, event: &Event) -> Result<i64, PersistenceError> {
    info!("Creating event: {}", event.title);

    diesel::insert_into(events::table)
        .values((
            events::title.eq(&event.title),
            events::description.eq(event.description.as_deref()),
            events::start_time.eq(encode_datetime(event.start_time)?),
            events::end_time.eq(encode_datetime(event.end_time)?),
            events::registration_deadline.eq(encode_datetime(event.registration_deadline)?),
            events::location.eq(&event.location),
            events::required_volunteers.eq(encode_capacity(event.required_volunteers)?),
            events::grade_limit.eq(event.grade_limit.to_string()),
            events::hours_value.eq(event.hours_value),
        ))
        .execute(conn)?;

    let event_id: i64 = get_last_insert_rowid(conn)?;
    info!(event_id, "Event created");

    Ok(event_id)
}

/// Replaces an event's stored fields.
///
/// # Errors
///
/// Returns `EventNotFound` if no such event exists, or an error if the
/// update fails.
pub fn update_event(
    conn: &mut SqliteConnection,
    event_id: i64,
    event: &Event,
) -> Result<(), PersistenceError> {
    info!("Updating event ID: {}", event_id);

    let rows_affected: usize = diesel::update(events::table)
        .filter(events::event_id.eq(event_id))
        .set((
            events::title.eq(&event.title),
            events::description.eq(event.description.as_deref()),
            events::start_time.eq(encode_datetime(event.start_time)?),
            events::end_time.eq(encode_datetime(event.end_time)?),
            events::registration_deadline.eq(encode_datetime(event.registration_deadline)?),
            events::location.eq(&event.location),
            events::required_volunteers.eq(encode_capacity(event.required_volunteers)?),
            events::grade_limit.eq(event.grade_limit.to_string()),
            events::hours_value.eq(event.hours_value),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::DomainRejected(DomainError::EventNotFound(
            event_id,
        )));
    }

    Ok(())
}

/// Deletes an event and its signups.
///
/// The two deletes run in one transaction so a failure leaves the store
/// untouched.
///
/// # Errors
///
/// Returns `EventNotFound` if no such event exists, or an error if a
/// delete fails.
pub fn delete_event(conn: &mut SqliteConnection, event_id: i64) -> Result<(), PersistenceError> {
    info!("Deleting event ID: {}", event_id);

    conn.transaction(|conn| {
        diesel::delete(event_signups::table)
            .filter(event_signups::event_id.eq(event_id))
            .execute(conn)?;

        let rows_affected: usize = diesel::delete(events::table)
            .filter(events::event_id.eq(event_id))
            .execute(conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::DomainRejected(DomainError::EventNotFound(
                event_id,
            )));
        }

        Ok(())
    })
}
