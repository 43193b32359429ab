// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Seed data for the standard school shifts.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::macros::time;
use time::{Time, Weekday};
use tracing::info;
use volsched_domain::RecurringShift;

use crate::error::PersistenceError;
use crate::mutations::shifts::create_shift;

const SCHOOL_DAYS: [Weekday; 5] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
];

struct ShiftTemplate {
    name: &'static str,
    start: Time,
    end: Time,
    capacity: u32,
}

const STANDARD_SHIFTS: [ShiftTemplate; 3] = [
    ShiftTemplate {
        name: "Morning etiquette post",
        start: time!(07:35),
        end: time!(07:55),
        capacity: 4,
    },
    ShiftTemplate {
        name: "Cafeteria lunch duty",
        start: time!(11:40),
        end: time!(12:10),
        capacity: 2,
    },
    ShiftTemplate {
        name: "Cafeteria dinner duty",
        start: time!(17:30),
        end: time!(18:00),
        capacity: 2,
    },
];

/// Seeds the standard school shifts, one template per school day:
/// the morning etiquette post and the two cafeteria duties, each worth
/// half an hour of credit.
///
/// Idempotent: does nothing if any shift template already exists.
///
/// # Errors
///
/// Returns an error if the inserts fail.
pub fn seed_standard_shifts(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    use crate::diesel_schema::recurring_shifts;

    let existing: i64 = recurring_shifts::table.count().get_result(conn)?;
    if existing > 0 {
        return Ok(());
    }

    info!("Seeding standard school shifts");

    for template in &STANDARD_SHIFTS {
        for day in SCHOOL_DAYS {
            let shift = RecurringShift::new(
                template.name.to_string(),
                day,
                template.start,
                template.end,
                template.capacity,
                0.5,
            );
            create_shift(conn, &shift)?;
        }
    }

    Ok(())
}
