// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the volunteer scheduling system.
//!
//! This crate provides the Diesel/SQLite record store: students,
//! events, shift templates, signups, and weekly rotations, plus the
//! transactional admission commits that consult the decision engine
//! inside an IMMEDIATE transaction.
//!
//! `SQLite` is the only backend:
//! - In-memory databases for unit and integration tests (unique shared
//!   database per test via an atomic counter)
//! - File databases with WAL mode for deployment
//!
//! Foreign key enforcement is verified at connection time; a store that
//! cannot enforce the signup foreign keys refuses to start.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::{Date, OffsetDateTime};
use volsched::{EventAssignment, ShiftAssignment};
use volsched_domain::{
    Event, EventSignup, RecurringShift, ShiftSignup, Student, WeeklyRotation,
};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Persistence adapter over a single `SQLite` connection.
///
/// The server serializes all access through one adapter behind a mutex;
/// combined with the IMMEDIATE transactions in the admission commits,
/// concurrent admissions at a capacity boundary admit exactly the
/// remaining seats and no more.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests are isolated.
        // Use atomic counter instead of timestamp to eliminate race conditions.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;

        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;

        // WAL mode for better read concurrency on file databases
        sqlite::enable_wal_mode(&mut conn)?;

        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// This is a startup-time check required to ensure
    /// referential integrity constraints are enforced.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Students
    // ========================================================================

    /// Registers a new student with a bcrypt-hashed password.
    ///
    /// # Returns
    ///
    /// The canonical ID assigned to the student.
    ///
    /// # Errors
    ///
    /// Returns `DuplicatePhone` if the phone number is already
    /// registered, or an error if the insert fails.
    pub fn register_student(
        &mut self,
        student: &Student,
        password: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::students::register_student(&mut self.conn, student, password)
    }

    /// Retrieves a student by canonical ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_student(&mut self, student_id: i64) -> Result<Option<Student>, PersistenceError> {
        queries::students::get_student(&mut self.conn, student_id)
    }

    /// Retrieves a student by phone number, along with the stored
    /// password hash for the credential check.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_student_by_phone(
        &mut self,
        phone: &str,
    ) -> Result<Option<(Student, String)>, PersistenceError> {
        queries::students::get_student_by_phone(&mut self.conn, phone)
    }

    /// Lists all registered students.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_students(&mut self) -> Result<Vec<Student>, PersistenceError> {
        queries::students::list_students(&mut self.conn)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Arguments
    ///
    /// * `password` - The plain text password to verify
    /// * `password_hash` - The stored bcrypt hash
    ///
    /// # Errors
    ///
    /// Returns an error if password verification fails.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::students::verify_password(password, password_hash)
    }

    /// Updates a student's editable profile fields.
    ///
    /// # Errors
    ///
    /// Returns `StudentNotFound` if no such student exists, or an error
    /// if the update fails.
    pub fn update_student_profile(
        &mut self,
        student_id: i64,
        name: &str,
        wechat: Option<&str>,
        qq: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::students::update_student_profile(&mut self.conn, student_id, name, wechat, qq)
    }

    /// Updates a student's password.
    ///
    /// # Errors
    ///
    /// Returns `StudentNotFound` if no such student exists, or an error
    /// if the update fails.
    pub fn update_student_password(
        &mut self,
        student_id: i64,
        new_password: &str,
    ) -> Result<(), PersistenceError> {
        mutations::students::update_student_password(&mut self.conn, student_id, new_password)
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Creates a new event.
    ///
    /// # Returns
    ///
    /// The canonical ID assigned to the event.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_event(&mut self, event: &Event) -> Result<i64, PersistenceError> {
        mutations::events::create_event(&mut self.conn, event)
    }

    /// Replaces an event's stored fields.
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` if no such event exists, or an error if
    /// the update fails.
    pub fn update_event(&mut self, event_id: i64, event: &Event) -> Result<(), PersistenceError> {
        mutations::events::update_event(&mut self.conn, event_id, event)
    }

    /// Deletes an event and its signups.
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` if no such event exists, or an error if
    /// the delete fails.
    pub fn delete_event(&mut self, event_id: i64) -> Result<(), PersistenceError> {
        mutations::events::delete_event(&mut self.conn, event_id)
    }

    /// Retrieves an event by canonical ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_event(&mut self, event_id: i64) -> Result<Option<Event>, PersistenceError> {
        queries::events::get_event(&mut self.conn, event_id)
    }

    /// Lists all events, ordered by start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_events(&mut self) -> Result<Vec<Event>, PersistenceError> {
        queries::events::list_events(&mut self.conn)
    }

    /// Counts the signups consuming an event's capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_event_signups(&mut self, event_id: i64) -> Result<u32, PersistenceError> {
        queries::events::count_event_signups(&mut self.conn, event_id)
    }

    /// Retrieves the student's signup for an event, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_event_signup(
        &mut self,
        event_id: i64,
        student_id: i64,
    ) -> Result<Option<EventSignup>, PersistenceError> {
        queries::events::get_event_signup(&mut self.conn, event_id, student_id)
    }

    /// Admits a student to an event and commits the signup.
    ///
    /// # Arguments
    ///
    /// * `now` - The current instant
    /// * `event_id` - The target event
    /// * `student_id` - The requesting student
    ///
    /// # Returns
    ///
    /// The signup ID of the committed row.
    ///
    /// # Errors
    ///
    /// Returns the specific rejection of the first failing admission
    /// rule, or an error if the commit fails.
    pub fn signup_for_event(
        &mut self,
        now: OffsetDateTime,
        event_id: i64,
        student_id: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::signups::signup_for_event(&mut self.conn, now, event_id, student_id)
    }

    /// Cancels an event signup (before the event starts).
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound`, `NotFound` (no signup), or
    /// `EventNotOpen` if the event has started.
    pub fn cancel_event_signup(
        &mut self,
        now: OffsetDateTime,
        event_id: i64,
        student_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::signups::cancel_event_signup(&mut self.conn, now, event_id, student_id)
    }

    // ========================================================================
    // Shifts
    // ========================================================================

    /// Creates a new shift template.
    ///
    /// # Returns
    ///
    /// The canonical ID assigned to the template.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_shift(&mut self, shift: &RecurringShift) -> Result<i64, PersistenceError> {
        mutations::shifts::create_shift(&mut self.conn, shift)
    }

    /// Deletes a shift template and its signups.
    ///
    /// # Errors
    ///
    /// Returns `ShiftNotFound` if no such template exists, or an error
    /// if the delete fails.
    pub fn delete_shift(&mut self, shift_id: i64) -> Result<(), PersistenceError> {
        mutations::shifts::delete_shift(&mut self.conn, shift_id)
    }

    /// Retrieves a shift template by canonical ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_shift(&mut self, shift_id: i64) -> Result<Option<RecurringShift>, PersistenceError> {
        queries::shifts::get_shift(&mut self.conn, shift_id)
    }

    /// Lists all shift templates.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_shifts(&mut self) -> Result<Vec<RecurringShift>, PersistenceError> {
        queries::shifts::list_shifts(&mut self.conn)
    }

    /// Counts non-cancelled signups for one dated occurrence.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_occurrence_signups(
        &mut self,
        shift_id: i64,
        date: Date,
    ) -> Result<u32, PersistenceError> {
        queries::shifts::count_occurrence_signups(&mut self.conn, shift_id, date)
    }

    /// Retrieves the student's signup row for `(shift, date)`, any
    /// status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_shift_signup(
        &mut self,
        shift_id: i64,
        date: Date,
        student_id: i64,
    ) -> Result<Option<ShiftSignup>, PersistenceError> {
        queries::shifts::get_shift_signup(&mut self.conn, shift_id, date, student_id)
    }

    /// Admits a student to a shift occurrence and commits the signup.
    ///
    /// # Arguments
    ///
    /// * `now` - The current instant; its date is "today"
    /// * `shift_id` - The target shift template
    /// * `student_id` - The requesting student
    /// * `date_text` - The requested occurrence date, `YYYY-MM-DD`
    ///
    /// # Returns
    ///
    /// The signup ID of the committed (or reactivated) row.
    ///
    /// # Errors
    ///
    /// Returns the specific rejection of the first failing admission
    /// rule, or an error if the commit fails.
    pub fn signup_for_shift(
        &mut self,
        now: OffsetDateTime,
        shift_id: i64,
        student_id: i64,
        date_text: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::signups::signup_for_shift(&mut self.conn, now, shift_id, student_id, date_text)
    }

    /// Cancels a shift signup by marking the row `Cancelled`.
    ///
    /// # Errors
    ///
    /// Returns `ShiftNotFound` or `NotFound` (no active signup).
    pub fn cancel_shift_signup(
        &mut self,
        shift_id: i64,
        student_id: i64,
        date_text: &str,
    ) -> Result<(), PersistenceError> {
        mutations::signups::cancel_shift_signup(&mut self.conn, shift_id, student_id, date_text)
    }

    // ========================================================================
    // Rotations
    // ========================================================================

    /// Assigns a class to a week, upserting on the week's Monday.
    ///
    /// # Errors
    ///
    /// Returns `NotMonday` if the date is not a Monday, or an error if
    /// the upsert fails.
    pub fn assign_rotation(
        &mut self,
        week_monday: Date,
        assigned_class: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::rotations::assign_rotation(&mut self.conn, week_monday, assigned_class)
    }

    /// Retrieves the rotation governing the week containing `date`.
    ///
    /// An unconfigured week is `None`, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn lookup_rotation(
        &mut self,
        date: Date,
    ) -> Result<Option<WeeklyRotation>, PersistenceError> {
        let week_monday: Date = volsched::rotation_week_for(date);
        queries::rotations::get_rotation_for_week(&mut self.conn, week_monday)
    }

    // ========================================================================
    // Credit
    // ========================================================================

    /// Loads every event the student holds a signup for, as aggregator
    /// input.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn event_assignments(
        &mut self,
        student_id: i64,
    ) -> Result<Vec<EventAssignment>, PersistenceError> {
        queries::credit::event_assignments(&mut self.conn, student_id)
    }

    /// Loads every shift occurrence the student holds a signup for, as
    /// aggregator input (cancelled rows included; the aggregator skips
    /// them).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn shift_assignments(
        &mut self,
        student_id: i64,
    ) -> Result<Vec<ShiftAssignment>, PersistenceError> {
        queries::credit::shift_assignments(&mut self.conn, student_id)
    }

    // ========================================================================
    // Seed data
    // ========================================================================

    /// Seeds the standard school shifts (idempotent).
    ///
    /// # Errors
    ///
    /// Returns an error if the inserts fail.
    pub fn seed_standard_shifts(&mut self) -> Result<(), PersistenceError> {
        mutations::seed::seed_standard_shifts(&mut self.conn)
    }
}
