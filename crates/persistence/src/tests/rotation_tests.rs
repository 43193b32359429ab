// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for weekly-rotation assignment and lookup.

use crate::{Persistence, PersistenceError};
use time::Weekday;
use time::macros::date;
use volsched_domain::DomainError;

#[test]
fn test_assign_and_lookup_by_any_weekday() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    persistence
        .assign_rotation(date!(2026 - 03 - 02), "2024-3")
        .unwrap();

    // A mid-week date resolves to the same rotation.
    let rotation = persistence
        .lookup_rotation(date!(2026 - 03 - 05))
        .unwrap()
        .unwrap();
    assert_eq!(rotation.week_monday, date!(2026 - 03 - 02));
    assert_eq!(rotation.assigned_class, "2024-3");
}

#[test]
fn test_lookup_unconfigured_week_is_none() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(
        persistence
            .lookup_rotation(date!(2026 - 03 - 05))
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_reassign_replaces_class_and_keeps_the_week_unique() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let first = persistence
        .assign_rotation(date!(2026 - 03 - 02), "2024-3")
        .unwrap();
    let second = persistence
        .assign_rotation(date!(2026 - 03 - 02), "2025-1")
        .unwrap();

    assert_eq!(first, second);
    let rotation = persistence
        .lookup_rotation(date!(2026 - 03 - 02))
        .unwrap()
        .unwrap();
    assert_eq!(rotation.assigned_class, "2025-1");
}

#[test]
fn test_non_monday_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let result = persistence.assign_rotation(date!(2026 - 03 - 04), "2024-3");
    assert_eq!(
        result,
        Err(PersistenceError::DomainRejected(DomainError::NotMonday {
            date: date!(2026 - 03 - 04),
            weekday: Weekday::Wednesday,
        }))
    );
}
