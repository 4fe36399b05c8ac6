// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `audit`: Audit event persistence
//! - `projects`: Project and signup inserts
//! - `transition`: Committing attendance transitions
//! - `publication`: The `SQLite` publication store and the publication commit

pub mod audit;
pub mod projects;
pub mod publication;
pub mod transition;

pub use projects::{insert_project, insert_signup};
pub use publication::{SqlitePublicationStore, publish_session};
pub use transition::persist_transition;
