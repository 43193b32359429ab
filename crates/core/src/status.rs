// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status resolution for events and shift occurrences.
//!
//! Status is a pure function over `(now, entity, occupancy)`, never a
//! stored field, so it can never go stale.

use time::{Date, OffsetDateTime};
use volsched_domain::{Event, EventStatus, OccurrenceStatus};

/// Derives the lifecycle state of an event.
///
/// The checks run in a strict precedence order; the first match wins:
///
/// 1. `now > end_time` → `Ended`
/// 2. `now > start_time` → `InProgress`
/// 3. `active_signup_count >= required_volunteers` → `Full`
/// 4. `now > registration_deadline` → `Closed`
/// 5. otherwise → `Open`
///
/// The ordering is deliberate: temporal finality outranks capacity and
/// deadline, and fullness outranks the deadline. An event whose end time
/// has passed is `Ended` no matter how many seats were left.
#[must_use]
pub fn resolve_event_status(
    now: OffsetDateTime,
    event: &Event,
    active_signup_count: u32,
) -> EventStatus {
    if now > event.end_time {
        return EventStatus::Ended;
    }
    if now > event.start_time {
        return EventStatus::InProgress;
    }
    if active_signup_count >= event.required_volunteers {
        return EventStatus::Full;
    }
    if now > event.registration_deadline {
        return EventStatus::Closed;
    }
    EventStatus::Open
}

/// Derives the state of a shift occurrence from date comparison alone.
///
/// Time of day and occupancy do not participate: an occurrence is
/// `Completed` as soon as its calendar date is behind "today".
#[must_use]
pub fn resolve_occurrence_status(today: Date, date: Date) -> OccurrenceStatus {
    if date < today {
        OccurrenceStatus::Completed
    } else {
        OccurrenceStatus::Pending
    }
}
