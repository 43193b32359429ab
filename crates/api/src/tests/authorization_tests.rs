// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the admin gate on management operations.

use super::helpers;
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::AssignRotationRequest;

#[test]
fn test_non_admin_cannot_create_event() {
    let mut persistence = helpers::test_persistence();
    let student_id = helpers::register_test_student(&mut persistence, "13800000001", 2024, 3);

    let result = handlers::create_event(
        &mut persistence,
        student_id,
        helpers::library_event_request(),
    );
    assert_eq!(
        result,
        Err(ApiError::Unauthorized {
            action: String::from("create_event"),
            required_role: String::from("Admin"),
        })
    );
}

#[test]
fn test_non_admin_cannot_assign_rotation() {
    let mut persistence = helpers::test_persistence();
    let student_id = helpers::register_test_student(&mut persistence, "13800000001", 2024, 3);

    let result = handlers::assign_rotation(
        &mut persistence,
        student_id,
        AssignRotationRequest {
            week_monday: String::from("2026-03-02"),
            assigned_class: String::from("2024-3"),
        },
    );
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_non_admin_cannot_list_student_stats() {
    let mut persistence = helpers::test_persistence();
    let student_id = helpers::register_test_student(&mut persistence, "13800000001", 2024, 3);

    let result = handlers::list_student_stats(&mut persistence, helpers::NOW, student_id);
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_non_admin_cannot_delete_shift() {
    let mut persistence = helpers::test_persistence();
    let admin_id = helpers::register_admin(&mut persistence);
    let student_id = helpers::register_test_student(&mut persistence, "13800000001", 2024, 3);
    let shift_id = handlers::create_shift(
        &mut persistence,
        admin_id,
        helpers::morning_shift_request(1, 2),
    )
    .unwrap()
    .shift_id;

    let result = handlers::delete_shift(&mut persistence, student_id, shift_id);
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_admin_passes_the_gate() {
    let mut persistence = helpers::test_persistence();
    let admin_id = helpers::register_admin(&mut persistence);

    let result = handlers::create_event(
        &mut persistence,
        admin_id,
        helpers::library_event_request(),
    );
    assert!(result.is_ok());
}

#[test]
fn test_unknown_actor_fails_authentication_not_authorization() {
    let mut persistence = helpers::test_persistence();

    let result = handlers::create_event(
        &mut persistence,
        999,
        helpers::library_event_request(),
    );
    assert!(matches!(
        result,
        Err(ApiError::AuthenticationFailed { .. })
    ));
}
