// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift template mutations (admin surface).

use diesel::prelude::*;
use diesel::{Connection, SqliteConnection};
use tracing::info;
use volsched_domain::{DomainError, RecurringShift};

use crate::data_models::{encode_time, encode_weekday};
use crate::diesel_schema::{recurring_shifts, shift_signups};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Creates a new shift template.
///
/// # Errors
///
/// Returns an error if the insert fails or a field cannot be encoded.
pub fn create_shift(
    conn: &mut SqliteConnection,
    shift: &RecurringShift,
) -> Result<i64, PersistenceError> {
    info!("Creating shift template: {}", shift.name);

    let capacity: i32 = i32::try_from(shift.capacity).map_err(|_| {
        PersistenceError::SerializationError(format!("capacity out of range: {}", shift.capacity))
    })?;

    diesel::insert_into(recurring_shifts::table)
        .values((
            recurring_shifts::name.eq(&shift.name),
            recurring_shifts::day_of_week.eq(encode_weekday(shift.day_of_week)),
            recurring_shifts::start_time.eq(encode_time(shift.start_time)?),
            recurring_shifts::end_time.eq(encode_time(shift.end_time)?),
            recurring_shifts::capacity.eq(capacity),
            recurring_shifts::hours_value.eq(shift.hours_value),
        ))
        .execute(conn)?;

    let shift_id: i64 = get_last_insert_rowid(conn)?;
    info!(shift_id, "Shift template created");

    Ok(shift_id)
}

/// Deletes a shift template and its signups.
///
/// # Errors
///
/// Returns `ShiftNotFound` if no such template exists, or an error if a
/// delete fails.
pub fn delete_shift(conn: &mut SqliteConnection, shift_id: i64) -> Result<(), PersistenceError> {
    info!("Deleting shift template ID: {}", shift_id);

    conn.transaction(|conn| {
        diesel::delete(shift_signups::table)
            .filter(shift_signups::shift_id.eq(shift_id))
            .execute(conn)?;

        let rows_affected: usize = diesel::delete(recurring_shifts::table)
            .filter(recurring_shifts::shift_id.eq(shift_id))
            .execute(conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::DomainRejected(DomainError::ShiftNotFound(
                shift_id,
            )));
        }

        Ok(())
    })
}
