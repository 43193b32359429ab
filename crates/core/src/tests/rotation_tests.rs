// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ensure_monday, rotation_week_for};
use time::Weekday;
use time::macros::date;
use volsched_domain::DomainError;

#[test]
fn test_ensure_monday_accepts_monday() {
    assert!(ensure_monday(date!(2026 - 03 - 02)).is_ok());
}

#[test]
fn test_ensure_monday_rejects_other_weekdays() {
    let result = ensure_monday(date!(2026 - 03 - 04));
    assert_eq!(
        result,
        Err(DomainError::NotMonday {
            date: date!(2026 - 03 - 04),
            weekday: Weekday::Wednesday,
        })
    );
}

#[test]
fn test_rotation_week_maps_any_day_to_its_monday() {
    let monday = date!(2026 - 03 - 02);
    assert_eq!(rotation_week_for(monday), monday);
    assert_eq!(rotation_week_for(date!(2026 - 03 - 04)), monday);
    assert_eq!(rotation_week_for(date!(2026 - 03 - 08)), monday);
    assert_eq!(rotation_week_for(date!(2026 - 03 - 09)), date!(2026 - 03 - 09));
}
