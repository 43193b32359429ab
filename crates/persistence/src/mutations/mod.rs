// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side store access.
//!
//! Admission commits (`signups`) run their rule checks and the insert
//! inside one IMMEDIATE transaction; a failed rule rolls the whole
//! operation back, never leaving a partial commit behind.

pub mod events;
pub mod rotations;
pub mod seed;
pub mod shifts;
pub mod signups;
pub mod students;
