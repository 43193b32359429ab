// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for rotation assignment and lookup.

use super::helpers;
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::AssignRotationRequest;

#[test]
fn test_assign_and_lookup_by_mid_week_date() {
    let mut persistence = helpers::test_persistence();
    let admin_id = helpers::register_admin(&mut persistence);

    let assigned = handlers::assign_rotation(
        &mut persistence,
        admin_id,
        AssignRotationRequest {
            week_monday: String::from("2026-03-02"),
            assigned_class: String::from("2024-3"),
        },
    )
    .unwrap();

    let response = handlers::lookup_rotation(&mut persistence, "2026-03-05").unwrap();
    let rotation = response.rotation.unwrap();
    assert_eq!(rotation.rotation_id, assigned.rotation_id);
    assert_eq!(rotation.week_monday, "2026-03-02");
    assert_eq!(rotation.assigned_class, "2024-3");
}

#[test]
fn test_lookup_unconfigured_week_is_none() {
    let mut persistence = helpers::test_persistence();

    let response = handlers::lookup_rotation(&mut persistence, "2026-03-05").unwrap();
    assert!(response.rotation.is_none());
}

#[test]
fn test_reassign_replaces_the_class() {
    let mut persistence = helpers::test_persistence();
    let admin_id = helpers::register_admin(&mut persistence);

    let first = handlers::assign_rotation(
        &mut persistence,
        admin_id,
        AssignRotationRequest {
            week_monday: String::from("2026-03-02"),
            assigned_class: String::from("2024-3"),
        },
    )
    .unwrap();
    let second = handlers::assign_rotation(
        &mut persistence,
        admin_id,
        AssignRotationRequest {
            week_monday: String::from("2026-03-02"),
            assigned_class: String::from("2025-1"),
        },
    )
    .unwrap();

    assert_eq!(first.rotation_id, second.rotation_id);

    let response = handlers::lookup_rotation(&mut persistence, "2026-03-02").unwrap();
    assert_eq!(response.rotation.unwrap().assigned_class, "2025-1");
}

#[test]
fn test_non_monday_rejected_as_invalid_input() {
    let mut persistence = helpers::test_persistence();
    let admin_id = helpers::register_admin(&mut persistence);

    let result = handlers::assign_rotation(
        &mut persistence,
        admin_id,
        AssignRotationRequest {
            week_monday: String::from("2026-03-04"),
            assigned_class: String::from("2024-3"),
        },
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "week_monday"
    ));
}

#[test]
fn test_unparseable_date_rejected() {
    let mut persistence = helpers::test_persistence();

    let result = handlers::lookup_rotation(&mut persistence, "next monday");
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "date"
    ));
}
