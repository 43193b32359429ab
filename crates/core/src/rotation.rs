// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Week-to-class rotation helpers.
//!
//! A rotation record maps a week (identified by its Monday) to the one
//! class authorized to book shift occurrences in that week.

use time::{Date, Weekday};
use volsched_domain::{DomainError, monday_of_week};

/// Validates that a rotation week-start date is a Monday.
///
/// Rotation upserts identify weeks by their Monday; any other weekday is
/// a caller error, not something to round silently.
///
/// # Errors
///
/// Returns `DomainError::NotMonday` for any other weekday.
pub fn ensure_monday(date: Date) -> Result<(), DomainError> {
    if date.weekday() == Weekday::Monday {
        Ok(())
    } else {
        Err(DomainError::NotMonday {
            date,
            weekday: date.weekday(),
        })
    }
}

/// Returns the Monday identifying the rotation week that governs `date`.
///
/// Used both by the admission gate and by the public "current rotation"
/// query, which accepts any date and resolves it to its week.
#[must_use]
pub fn rotation_week_for(date: Date) -> Date {
    monday_of_week(date)
}
