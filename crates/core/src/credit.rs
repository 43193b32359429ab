// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hour-credit aggregation.
//!
//! A read-side projection over a student's assignments. Totals are
//! recomputed from the source records on every call; nothing here caches.
//! Only completed (past) assignments count: an event credits once its end
//! time has passed, a shift occurrence once its date is behind today.

use time::{Date, OffsetDateTime};
use volsched_domain::SignupStatus;

/// One event the student holds a signup for, as read from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct EventAssignment {
    /// The event's canonical identifier.
    pub event_id: i64,
    /// The event title.
    pub title: String,
    /// Hour credit granted on completion.
    pub hours_value: f64,
    /// When the event starts (the history record's date).
    pub start_time: OffsetDateTime,
    /// When the event ends (completion boundary).
    pub end_time: OffsetDateTime,
}

/// One shift occurrence the student holds a non-cancelled signup for.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftAssignment {
    /// The shift template's canonical identifier.
    pub shift_id: i64,
    /// The shift name.
    pub name: String,
    /// Hour credit granted on completion.
    pub hours_value: f64,
    /// The occurrence date.
    pub date: Date,
    /// The stored signup status.
    pub status: SignupStatus,
}

/// Which source a history record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentKind {
    /// A one-off event signup.
    Event,
    /// A recurring-shift occurrence signup.
    Shift,
}

/// One record in a student's chronological history.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// The record source.
    pub kind: AssignmentKind,
    /// The event or shift identifier.
    pub id: i64,
    /// The event title or shift name.
    pub title: String,
    /// Hour credit of the assignment.
    pub hours: f64,
    /// The assignment date.
    pub date: Date,
    /// Completed if the assignment is in the past, Pending otherwise.
    pub status: SignupStatus,
}

/// Sums the hour credit of all completed assignments.
///
/// Events count once `end_time < now`; shift occurrences once
/// `date < today`. Future or in-progress assignments contribute nothing.
/// Cancelled shift signups never count.
#[must_use]
pub fn total_hours(
    now: OffsetDateTime,
    today: Date,
    events: &[EventAssignment],
    shifts: &[ShiftAssignment],
) -> f64 {
    let event_hours: f64 = events
        .iter()
        .filter(|a| a.end_time < now)
        .map(|a| a.hours_value)
        .sum();
    let shift_hours: f64 = shifts
        .iter()
        .filter(|a| a.status != SignupStatus::Cancelled && a.date < today)
        .map(|a| a.hours_value)
        .sum();
    event_hours + shift_hours
}

/// Produces the student's merged assignment history, newest first.
///
/// Records from both sources are merged and sorted by date descending.
/// The sort is stable, so same-date records keep their insertion order
/// (events before shifts, each in store order).
#[must_use]
pub fn history(
    now: OffsetDateTime,
    today: Date,
    events: &[EventAssignment],
    shifts: &[ShiftAssignment],
) -> Vec<HistoryEntry> {
    let mut entries: Vec<HistoryEntry> = Vec::with_capacity(events.len() + shifts.len());

    for assignment in events {
        let status: SignupStatus = if assignment.end_time < now {
            SignupStatus::Completed
        } else {
            SignupStatus::Pending
        };
        entries.push(HistoryEntry {
            kind: AssignmentKind::Event,
            id: assignment.event_id,
            title: assignment.title.clone(),
            hours: assignment.hours_value,
            date: assignment.start_time.date(),
            status,
        });
    }

    for assignment in shifts {
        if assignment.status == SignupStatus::Cancelled {
            continue;
        }
        let status: SignupStatus = if assignment.date < today {
            SignupStatus::Completed
        } else {
            SignupStatus::Pending
        };
        entries.push(HistoryEntry {
            kind: AssignmentKind::Shift,
            id: assignment.shift_id,
            title: assignment.name.clone(),
            hours: assignment.hours_value,
            date: assignment.date,
            status,
        });
    }

    // Stable sort: ties keep insertion order.
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}
