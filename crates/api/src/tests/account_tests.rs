// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for registration, login, and profile operations.

use super::helpers;
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{
    ChangePasswordRequest, LoginRequest, RegisterStudentRequest, UpdateProfileRequest,
};

#[test]
fn test_register_student() {
    let mut persistence = helpers::test_persistence();

    let response = handlers::register_student(
        &mut persistence,
        helpers::valid_registration("13800000001"),
    )
    .unwrap();

    assert!(response.student_id > 0);
    assert_eq!(response.phone, "13800000001");
    assert_eq!(response.name, "Li Wei");
    assert!(response.message.contains("Li Wei"));
}

#[test]
fn test_register_rejects_non_digit_phone() {
    let mut persistence = helpers::test_persistence();

    let mut request: RegisterStudentRequest = helpers::valid_registration("13800000001");
    request.phone = String::from("138-0000");

    let result = handlers::register_student(&mut persistence, request);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "phone"
    ));
}

#[test]
fn test_register_rejects_weak_password() {
    let mut persistence = helpers::test_persistence();

    let mut request: RegisterStudentRequest = helpers::valid_registration("13800000001");
    request.password = String::from("short1");
    request.password_confirmation = String::from("short1");

    let result = handlers::register_student(&mut persistence, request);
    assert!(matches!(
        result,
        Err(ApiError::PasswordPolicyViolation { .. })
    ));
}

#[test]
fn test_register_rejects_confirmation_mismatch() {
    let mut persistence = helpers::test_persistence();

    let mut request: RegisterStudentRequest = helpers::valid_registration("13800000001");
    request.password_confirmation = String::from("sunnyday43");

    let result = handlers::register_student(&mut persistence, request);
    assert_eq!(
        result,
        Err(ApiError::PasswordPolicyViolation {
            message: String::from("Password and confirmation do not match"),
        })
    );
}

#[test]
fn test_register_duplicate_phone_is_a_conflict() {
    let mut persistence = helpers::test_persistence();

    handlers::register_student(
        &mut persistence,
        helpers::valid_registration("13800000001"),
    )
    .unwrap();

    let result = handlers::register_student(
        &mut persistence,
        helpers::valid_registration("13800000001"),
    );
    assert!(matches!(
        result,
        Err(ApiError::Conflict { resource_type, .. }) if resource_type == "student"
    ));
}

#[test]
fn test_login_returns_profile() {
    let mut persistence = helpers::test_persistence();
    handlers::register_student(
        &mut persistence,
        helpers::valid_registration("13800000001"),
    )
    .unwrap();

    let response = handlers::login(
        &mut persistence,
        LoginRequest {
            phone: String::from("13800000001"),
            password: String::from("sunnyday42"),
        },
    )
    .unwrap();

    assert_eq!(response.student.phone, "13800000001");
    assert_eq!(response.student.class_name, "2024-3");
    assert!(!response.student.is_admin);
}

#[test]
fn test_login_failures_are_indistinguishable() {
    let mut persistence = helpers::test_persistence();
    handlers::register_student(
        &mut persistence,
        helpers::valid_registration("13800000001"),
    )
    .unwrap();

    let wrong_password = handlers::login(
        &mut persistence,
        LoginRequest {
            phone: String::from("13800000001"),
            password: String::from("not-the-password"),
        },
    );
    let unknown_phone = handlers::login(
        &mut persistence,
        LoginRequest {
            phone: String::from("19999999999"),
            password: String::from("sunnyday42"),
        },
    );

    // Same rejection either way; the response must not reveal which
    // part failed.
    assert_eq!(wrong_password, unknown_phone);
    assert!(matches!(
        wrong_password,
        Err(ApiError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_update_profile() {
    let mut persistence = helpers::test_persistence();
    let student_id = handlers::register_student(
        &mut persistence,
        helpers::valid_registration("13800000001"),
    )
    .unwrap()
    .student_id;

    handlers::update_profile(
        &mut persistence,
        student_id,
        UpdateProfileRequest {
            name: String::from("Li Weiming"),
            wechat: Some(String::from("wechat-handle")),
            qq: None,
        },
    )
    .unwrap();

    let profile = handlers::student_profile(&mut persistence, student_id).unwrap();
    assert_eq!(profile.name, "Li Weiming");
    assert_eq!(profile.wechat.as_deref(), Some("wechat-handle"));
    assert!(profile.qq.is_none());
}

#[test]
fn test_update_profile_unknown_actor_rejected() {
    let mut persistence = helpers::test_persistence();

    let result = handlers::update_profile(
        &mut persistence,
        999,
        UpdateProfileRequest {
            name: String::from("Ghost"),
            wechat: None,
            qq: None,
        },
    );
    assert!(matches!(
        result,
        Err(ApiError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_change_password_rotates_the_credential() {
    let mut persistence = helpers::test_persistence();
    let student_id = handlers::register_student(
        &mut persistence,
        helpers::valid_registration("13800000001"),
    )
    .unwrap()
    .student_id;

    handlers::change_password(
        &mut persistence,
        student_id,
        ChangePasswordRequest {
            password: String::from("rainyday77"),
            password_confirmation: String::from("rainyday77"),
        },
    )
    .unwrap();

    let with_new = handlers::login(
        &mut persistence,
        LoginRequest {
            phone: String::from("13800000001"),
            password: String::from("rainyday77"),
        },
    );
    assert!(with_new.is_ok());

    let with_old = handlers::login(
        &mut persistence,
        LoginRequest {
            phone: String::from("13800000001"),
            password: String::from("sunnyday42"),
        },
    );
    assert!(matches!(
        with_old,
        Err(ApiError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_student_profile_missing_student() {
    let mut persistence = helpers::test_persistence();

    let result = handlers::student_profile(&mut persistence, 999);
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "student"
    ));
}
