// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side store access.
//!
//! Every function here is a pure lookup; nothing mutates. The admission
//! mutations reuse these lookups inside their transactions so that the
//! rule pipelines always evaluate a consistent snapshot.

pub mod credit;
pub mod events;
pub mod rotations;
pub mod shifts;
pub mod students;
