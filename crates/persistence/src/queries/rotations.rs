// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly-rotation lookups.

use diesel::prelude::*;
use diesel::SqliteConnection;
use volsched_domain::WeeklyRotation;

use crate::data_models::{RotationRow, encode_date};
use crate::diesel_schema::weekly_rotations;
use crate::error::PersistenceError;

/// Retrieves the rotation governing the week of the given Monday.
///
/// An absent rotation is `None`, not an error; the admission pipeline
/// turns it into its own distinct rejection.
///
/// # Errors
///
/// Returns an error if the database query fails or the row cannot be
/// decoded.
pub fn get_rotation_for_week(
    conn: &mut SqliteConnection,
    week_monday: time::Date,
) -> Result<Option<WeeklyRotation>, PersistenceError> {
    let monday_text: String = encode_date(week_monday)?;
    let row: Option<RotationRow> = weekly_rotations::table
        .filter(weekly_rotations::week_monday.eq(&monday_text))
        .first::<RotationRow>(conn)
        .optional()?;

    row.map(RotationRow::into_rotation).transpose()
}
