// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::create_open_event;
use crate::{resolve_event_status, resolve_occurrence_status};
use time::macros::{date, datetime};
use volsched_domain::{Event, EventStatus, OccurrenceStatus};

#[test]
fn test_open_event_resolves_open() {
    let event: Event = create_open_event();
    let status: EventStatus = resolve_event_status(datetime!(2026-04-01 12:00 UTC), &event, 0);
    assert_eq!(status, EventStatus::Open);
}

#[test]
fn test_ended_outranks_everything() {
    // Past the end time: Ended regardless of capacity or deadline.
    let event: Event = create_open_event();
    let now = datetime!(2026-04-03 15:00 UTC);
    assert_eq!(resolve_event_status(now, &event, 0), EventStatus::Ended);
    assert_eq!(resolve_event_status(now, &event, 99), EventStatus::Ended);
}

#[test]
fn test_in_progress_outranks_full_and_closed() {
    let event: Event = create_open_event();
    // Between start and end, with the event both full and past deadline.
    let now = datetime!(2026-04-03 13:00 UTC);
    assert_eq!(
        resolve_event_status(now, &event, 2),
        EventStatus::InProgress
    );
}

#[test]
fn test_full_outranks_closed() {
    let event: Event = create_open_event();
    // Past the deadline AND at capacity: fullness wins.
    let now = datetime!(2026-04-02 18:00 UTC);
    assert_eq!(resolve_event_status(now, &event, 2), EventStatus::Full);
}

#[test]
fn test_full_before_deadline() {
    let event: Event = create_open_event();
    let now = datetime!(2026-04-01 12:00 UTC);
    assert_eq!(resolve_event_status(now, &event, 2), EventStatus::Full);
}

#[test]
fn test_closed_after_deadline_with_seats_left() {
    let event: Event = create_open_event();
    let now = datetime!(2026-04-02 18:00 UTC);
    assert_eq!(resolve_event_status(now, &event, 1), EventStatus::Closed);
}

#[test]
fn test_occurrence_status_by_date_only() {
    let today = date!(2026 - 03 - 04);
    assert_eq!(
        resolve_occurrence_status(today, date!(2026 - 03 - 03)),
        OccurrenceStatus::Completed
    );
    assert_eq!(
        resolve_occurrence_status(today, date!(2026 - 03 - 04)),
        OccurrenceStatus::Pending
    );
    assert_eq!(
        resolve_occurrence_status(today, date!(2026 - 03 - 09)),
        OccurrenceStatus::Pending
    );
}
