// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `projects`: Project rows and the publication latch
//! - `signups`: Signup rows and project state assembly
//! - `certificates`: Issued certificates
//! - `audit`: Audit events and timelines
//!
//! Instants are stored as `YYYY-MM-DDTHH:MM:SS` text and parsed back
//! with the domain parser.

pub mod audit;
pub mod certificates;
pub mod projects;
pub mod signups;

use chrono::NaiveDateTime;
use vol_hours_domain::parse_instant;

use crate::error::PersistenceError;

/// Parses a stored instant column.
pub(crate) fn parse_stored_instant(
    column: &str,
    value: &str,
) -> Result<NaiveDateTime, PersistenceError> {
    parse_instant(value).map_err(|e| {
        PersistenceError::ReconstructionError(format!("Invalid {column} '{value}': {e}"))
    })
}

/// Parses an optional stored instant column.
pub(crate) fn parse_optional_instant(
    column: &str,
    value: Option<&str>,
) -> Result<Option<NaiveDateTime>, PersistenceError> {
    value
        .map(|value| parse_stored_instant(column, value))
        .transpose()
}
