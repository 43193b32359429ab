// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Student registration and profile mutations.

use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::SqliteConnection;
use tracing::{debug, info};
use volsched_domain::{DomainError, Student};

use crate::diesel_schema::students;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Registers a new student.
///
/// The password is bcrypt-hashed before it touches the store. A phone
/// number collision surfaces as `DuplicatePhone`, backed by the unique
/// index on the column.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `student` - The student to register (without a `student_id`)
/// * `password` - The plain-text password (will be hashed)
///
/// # Errors
///
/// Returns an error if the phone is already registered or the insert
/// fails.
pub fn register_student(
    conn: &mut SqliteConnection,
    student: &Student,
    password: &str,
) -> Result<i64, PersistenceError> {
    info!(
        "Registering student with phone: {}, class: {}",
        student.phone,
        student.full_class_name()
    );

    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    let result = diesel::insert_into(students::table)
        .values((
            students::phone.eq(&student.phone),
            students::name.eq(&student.name),
            students::enrollment_year.eq(i32::from(student.enrollment_year)),
            students::class_number.eq(i32::from(student.class_number)),
            students::wechat.eq(student.wechat.as_deref()),
            students::qq.eq(student.qq.as_deref()),
            students::is_admin.eq(i32::from(student.is_admin)),
            students::password_hash.eq(&password_hash),
        ))
        .execute(conn);

    match result {
        Ok(_) => {}
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            return Err(PersistenceError::DomainRejected(DomainError::DuplicatePhone(
                student.phone.clone(),
            )));
        }
        Err(e) => return Err(e.into()),
    }

    let student_id: i64 = get_last_insert_rowid(conn)?;
    info!(student_id, "Student registered");

    Ok(student_id)
}

/// Updates a student's editable profile fields.
///
/// # Errors
///
/// Returns `StudentNotFound` if no such student exists, or an error if
/// the update fails.
pub fn update_student_profile(
    conn: &mut SqliteConnection,
    student_id: i64,
    name: &str,
    wechat: Option<&str>,
    qq: Option<&str>,
) -> Result<(), PersistenceError> {
    debug!("Updating profile for student ID: {}", student_id);

    let rows_affected: usize = diesel::update(students::table)
        .filter(students::student_id.eq(student_id))
        .set((
            students::name.eq(name),
            students::wechat.eq(wechat),
            students::qq.eq(qq),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::DomainRejected(DomainError::StudentNotFound(
            student_id,
        )));
    }

    Ok(())
}

/// Updates a student's password.
///
/// # Errors
///
/// Returns `StudentNotFound` if no such student exists, or an error if
/// hashing or the update fails.
pub fn update_student_password(
    conn: &mut SqliteConnection,
    student_id: i64,
    new_password: &str,
) -> Result<(), PersistenceError> {
    info!("Updating password for student ID: {}", student_id);

    let password_hash: String = bcrypt::hash(new_password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    let rows_affected: usize = diesel::update(students::table)
        .filter(students::student_id.eq(student_id))
        .set(students::password_hash.eq(&password_hash))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::DomainRejected(DomainError::StudentNotFound(
            student_id,
        )));
    }

    Ok(())
}
