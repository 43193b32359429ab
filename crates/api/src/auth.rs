// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authorization checks for admin-gated operations.
//!
//! Identity is the acting student's canonical ID; requests carry it and
//! the handlers load the student record. Authorization is a single flag
//! on that record: `is_admin` students may manage events, shift
//! templates, rotations, and global stats. There is no finer-grained
//! role model.

use crate::error::ApiError;
use volsched_domain::Student;

/// Authorization service for enforcing the admin gate.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the acting student may perform an admin-gated action.
    ///
    /// # Arguments
    ///
    /// * `actor` - The loaded acting student
    /// * `action` - The action name, used in the rejection
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the student is not an admin.
    pub fn authorize_admin(actor: &Student, action: &str) -> Result<(), ApiError> {
        if actor.is_admin {
            Ok(())
        } else {
            Err(ApiError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            })
        }
    }
}
