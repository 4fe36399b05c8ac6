// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session window calculation.
//!
//! This module derives the boundary instants that gate every phase
//! transition of a session:
//!
//! - Signup cutoff (general: 1 hour before start)
//! - Attendance-management signup cutoff (2 hours before start)
//! - Check-in open (general: 1 hour before start)
//! - Attendance check-in open (QR / attendance tools: 2 hours before start)
//! - Active start / active end (the session's own start and end)
//! - Editing deadline (48 hours after end)
//! - Addressable until (2 hours after end)
//!
//! ## Invariants
//!
//! - Boundaries are a pure function of the session's start and end
//! - No clock is read here; "now" is always an explicit argument
//! - The 1-hour and 2-hour offsets are distinct named boundaries and are
//!   never unified
//!
//! ## Usage
//!
//! This logic is used by:
//! - Phase classification (`phase::classify`)
//! - QR / deep-link availability (`is_addressable`)
//! - Signup and attendance-management gating in the API layer

use crate::schedule::Session;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Minutes before start at which general signup closes and check-in opens.
pub const GENERAL_LEAD_MINUTES: i64 = 60;

/// Minutes before start at which attendance management and QR check-in open.
pub const ATTENDANCE_LEAD_MINUTES: i64 = 120;

/// Hours after end during which attendance may still be edited.
pub const EDITING_GRACE_HOURS: i64 = 48;

/// Minutes after end during which a session's QR link stays scannable.
pub const ADDRESSABLE_TAIL_MINUTES: i64 = 120;

/// The boundary instants of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindows {
    /// General signups close at this instant.
    pub signup_cutoff: NaiveDateTime,
    /// Signups close at this instant for attendance-management purposes.
    pub attendance_signup_cutoff: NaiveDateTime,
    /// General check-in opens at this instant.
    pub check_in_open: NaiveDateTime,
    /// QR and attendance-management check-in opens at this instant.
    pub attendance_check_in_open: NaiveDateTime,
    pub active_start: NaiveDateTime,
    pub active_end: NaiveDateTime,
    /// Attendance edits are accepted until this instant.
    pub editing_deadline: NaiveDateTime,
    /// The session's QR link stops resolving at this instant.
    pub addressable_until: NaiveDateTime,
}

impl SessionWindows {
    /// Returns true while general signups are accepted.
    #[must_use]
    pub fn can_sign_up(&self, now: NaiveDateTime) -> bool {
        now < self.signup_cutoff
    }

    /// Returns true once attendance management is available.
    #[must_use]
    pub fn attendance_management_open(&self, now: NaiveDateTime) -> bool {
        now >= self.attendance_check_in_open
    }

    /// Returns true while recorded attendance may be edited after the session.
    #[must_use]
    pub fn is_editable(&self, now: NaiveDateTime) -> bool {
        now >= self.active_end && now < self.editing_deadline
    }

    /// Returns true while a QR / deep link for the session may be scanned.
    #[must_use]
    pub fn is_addressable(&self, now: NaiveDateTime) -> bool {
        now >= self.attendance_check_in_open && now < self.addressable_until
    }
}

/// Calculates the boundary instants of a session.
///
/// # Example
///
/// ```text
/// session 2025-06-01 09:00-12:00
///
/// attendance_check_in_open = 2025-06-01T07:00
/// check_in_open            = 2025-06-01T08:00
/// active_start             = 2025-06-01T09:00
/// active_end               = 2025-06-01T12:00
/// addressable_until        = 2025-06-01T14:00
/// editing_deadline         = 2025-06-03T12:00
/// ```
///
/// Boundaries of a session at the edge of the representable range
/// saturate at `NaiveDateTime::MIN` / `NaiveDateTime::MAX`. Schedules
/// resolved through `Schedule::resolve` never produce such sessions.
#[must_use]
pub fn calculate_windows(session: &Session) -> SessionWindows {
    let before_start = |minutes: i64| {
        session
            .start
            .checked_sub_signed(Duration::minutes(minutes))
            .unwrap_or(NaiveDateTime::MIN)
    };
    let after_end = |offset: Duration| {
        session
            .end
            .checked_add_signed(offset)
            .unwrap_or(NaiveDateTime::MAX)
    };

    SessionWindows {
        signup_cutoff: before_start(GENERAL_LEAD_MINUTES),
        attendance_signup_cutoff: before_start(ATTENDANCE_LEAD_MINUTES),
        check_in_open: before_start(GENERAL_LEAD_MINUTES),
        attendance_check_in_open: before_start(ATTENDANCE_LEAD_MINUTES),
        active_start: session.start,
        active_end: session.end,
        editing_deadline: after_end(Duration::hours(EDITING_GRACE_HOURS)),
        addressable_until: after_end(Duration::minutes(ADDRESSABLE_TAIL_MINUTES)),
    }
}

/// Returns true if every window boundary of a session running from
/// `start` to `end` is a representable instant.
#[must_use]
pub fn windows_representable(start: NaiveDateTime, end: NaiveDateTime) -> bool {
    let earliest_lead: i64 = GENERAL_LEAD_MINUTES.max(ATTENDANCE_LEAD_MINUTES);
    let latest_tail: Duration =
        Duration::hours(EDITING_GRACE_HOURS).max(Duration::minutes(ADDRESSABLE_TAIL_MINUTES));

    start
        .checked_sub_signed(Duration::minutes(earliest_lead))
        .is_some()
        && end.checked_add_signed(latest_tail).is_some()
}

/// Returns true while a session's QR / deep link may be scanned.
#[must_use]
pub fn is_addressable(session: &Session, now: NaiveDateTime) -> bool {
    calculate_windows(session).is_addressable(now)
}
