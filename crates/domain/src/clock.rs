// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wall-clock input and text parsing for dates, times, and instants.
//!
//! All instants are wall-clock values in a single local timezone. No
//! timezone normalization is performed: an RFC 3339 value keeps its
//! local wall-clock reading and the offset is discarded.
//!
//! Phase decisions never capture "now" themselves. Callers obtain it from a
//! `Clock` on every evaluation and pass it down explicitly.

use crate::error::DomainError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Canonical text format for instants emitted by this crate.
pub const INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Canonical text format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Canonical text format for wall-clock times.
pub const TIME_FORMAT: &str = "%H:%M";

/// A source of the current wall-clock instant.
pub trait Clock {
    /// Returns the current wall-clock instant.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| DomainError::InvalidDate {
        value: value.to_string(),
        error: e.to_string(),
    })
}

/// Parses an `HH:MM` or `HH:MM:SS` wall-clock time.
///
/// # Errors
///
/// Returns `DomainError::InvalidTime` if the string matches neither form.
pub fn parse_time(value: &str) -> Result<NaiveTime, DomainError> {
    let trimmed: &str = value.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|e| DomainError::InvalidTime {
            value: value.to_string(),
            error: e.to_string(),
        })
}

/// Parses a check-in or check-out instant.
///
/// Accepts RFC 3339 (`2025-06-01T09:00:00Z`, `2025-06-01T09:00:00-04:00`),
/// or a bare local date-time with or without seconds.
///
/// # Errors
///
/// Returns `DomainError::InvalidInstant` if no accepted form matches.
pub fn parse_instant(value: &str) -> Result<NaiveDateTime, DomainError> {
    let trimmed: &str = value.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.naive_local());
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }

    Err(DomainError::InvalidInstant {
        value: value.to_string(),
        error: String::from("expected RFC 3339 or YYYY-MM-DDTHH:MM[:SS]"),
    })
}

/// Formats an instant in the canonical `YYYY-MM-DDTHH:MM:SS` form.
#[must_use]
pub fn format_instant(instant: &NaiveDateTime) -> String {
    instant.format(INSTANT_FORMAT).to_string()
}
