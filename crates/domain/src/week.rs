// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar-week arithmetic.
//!
//! Rotation weeks are identified by their Monday. The school week runs
//! Monday through Friday inclusive; the weekly signup quota and the
//! rotation gate both operate on that range.

use crate::error::DomainError;
use time::macros::format_description;
use time::{Date, Duration, Weekday};

/// Returns the Monday of the week containing `date`.
#[must_use]
pub fn monday_of_week(date: Date) -> Date {
    let days_from_monday = i64::from(date.weekday().number_days_from_monday());
    date.saturating_sub(Duration::days(days_from_monday))
}

/// Returns the Friday of the week containing `date`.
///
/// Together with [`monday_of_week`] this bounds the Monday..Friday
/// inclusive range the weekly quota counts over.
#[must_use]
pub fn friday_of_week(date: Date) -> Date {
    monday_of_week(date).saturating_add(Duration::days(4))
}

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is malformed.
pub fn parse_date(s: &str) -> Result<Date, DomainError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(s, &format).map_err(|e| DomainError::DateParseError {
        date_string: s.to_string(),
        error: e.to_string(),
    })
}

/// Converts a stored day-of-week index (1 = Monday .. 5 = Friday) to a
/// weekday.
///
/// # Errors
///
/// Returns `DomainError::InvalidDayOfWeek` for indexes outside 1..=5.
/// Weekend indexes are invalid: shifts run on school days only.
pub const fn weekday_from_index(index: u8) -> Result<Weekday, DomainError> {
    match index {
        1 => Ok(Weekday::Monday),
        2 => Ok(Weekday::Tuesday),
        3 => Ok(Weekday::Wednesday),
        4 => Ok(Weekday::Thursday),
        5 => Ok(Weekday::Friday),
        _ => Err(DomainError::InvalidDayOfWeek { index }),
    }
}

/// Converts a weekday to its stored index (Monday = 1 .. Sunday = 7).
#[must_use]
pub const fn weekday_index(weekday: Weekday) -> u8 {
    weekday.number_from_monday()
}

/// The English name of a weekday, as used in rejection messages.
#[must_use]
pub const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Monday",
        Weekday::Tuesday => "Tuesday",
        Weekday::Wednesday => "Wednesday",
        Weekday::Thursday => "Thursday",
        Weekday::Friday => "Friday",
        Weekday::Saturday => "Saturday",
        Weekday::Sunday => "Sunday",
    }
}
