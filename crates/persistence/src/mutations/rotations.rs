// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly-rotation mutations (admin surface).

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::Date;
use tracing::info;
use volsched::ensure_monday;

use crate::data_models::encode_date;
use crate::diesel_schema::weekly_rotations;
use crate::error::PersistenceError;

/// Assigns a class to a week, upserting on the week's Monday.
///
/// Re-assigning an already-configured week replaces the class; the week
/// key stays unique.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `week_monday` - The Monday of the governed week
/// * `assigned_class` - The authorized full class name, e.g. `2024-3`
///
/// # Returns
///
/// The rotation ID of the stored row.
///
/// # Errors
///
/// Returns `NotMonday` if the date is not a Monday, or an error if the
/// upsert fails.
pub fn assign_rotation(
    conn: &mut SqliteConnection,
    week_monday: Date,
    assigned_class: &str,
) -> Result<i64, PersistenceError> {
    ensure_monday(week_monday)?;

    let monday_text: String = encode_date(week_monday)?;
    info!(
        "Assigning class {} to week of {}",
        assigned_class, monday_text
    );

    diesel::insert_into(weekly_rotations::table)
        .values((
            weekly_rotations::week_monday.eq(&monday_text),
            weekly_rotations::assigned_class.eq(assigned_class),
        ))
        .on_conflict(weekly_rotations::week_monday)
        .do_update()
        .set(weekly_rotations::assigned_class.eq(assigned_class))
        .execute(conn)?;

    // The update arm of the upsert does not touch last_insert_rowid,
    // so read the key back by week.
    let rotation_id: i64 = weekly_rotations::table
        .filter(weekly_rotations::week_monday.eq(&monday_text))
        .select(weekly_rotations::rotation_id)
        .first(conn)?;

    Ok(rotation_id)
}
