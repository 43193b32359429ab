// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Student lookups.

use diesel::prelude::*;
use diesel::SqliteConnection;
use volsched_domain::Student;

use crate::data_models::StudentRow;
use crate::diesel_schema::students;
use crate::error::PersistenceError;

/// Retrieves a student by canonical ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the row cannot be
/// decoded.
pub fn get_student(
    conn: &mut SqliteConnection,
    student_id: i64,
) -> Result<Option<Student>, PersistenceError> {
    let row: Option<StudentRow> = students::table
        .filter(students::student_id.eq(student_id))
        .first::<StudentRow>(conn)
        .optional()?;

    row.map(StudentRow::into_student).transpose()
}

/// Retrieves a student by phone number, along with the stored password
/// hash for the credential check.
///
/// # Errors
///
/// Returns an error if the database query fails or the row cannot be
/// decoded.
pub fn get_student_by_phone(
    conn: &mut SqliteConnection,
    phone: &str,
) -> Result<Option<(Student, String)>, PersistenceError> {
    let row: Option<StudentRow> = students::table
        .filter(students::phone.eq(phone))
        .first::<StudentRow>(conn)
        .optional()?;

    row.map(StudentRow::into_parts).transpose()
}

/// Lists all registered students, ordered by canonical ID.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be
/// decoded.
pub fn list_students(conn: &mut SqliteConnection) -> Result<Vec<Student>, PersistenceError> {
    let rows: Vec<StudentRow> = students::table
        .order(students::student_id.asc())
        .load::<StudentRow>(conn)?;

    rows.into_iter().map(StudentRow::into_student).collect()
}

/// Verifies a password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if the hash is malformed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))
}
