// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDateTime;

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request attendance changes. Publication is
/// not a command; it goes through the publication gate instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Record a volunteer's arrival.
    RecordCheckIn {
        /// The signup checking in.
        signup_id: String,
        /// The wall-clock instant of the check-in.
        at: NaiveDateTime,
    },
    /// Record a volunteer's departure. Requires a prior check-in.
    RecordCheckOut {
        /// The signup checking out.
        signup_id: String,
        /// The wall-clock instant of the check-out.
        at: NaiveDateTime,
    },
    /// Correct a signup's recorded attendance.
    EditAttendance {
        /// The signup being corrected.
        signup_id: String,
        /// The corrected check-in, or `None` to clear it.
        check_in: Option<NaiveDateTime>,
        /// The corrected check-out, or `None` to clear it.
        check_out: Option<NaiveDateTime>,
    },
    /// Shift every check-out in one session by a signed number of minutes.
    AdjustCheckOuts {
        /// The session id, in canonical or alias form.
        session_id: String,
        /// Minutes to add to each check-out; negative values move it earlier.
        offset_minutes: i64,
    },
}

impl Command {
    /// Returns the action name recorded in the audit trail.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RecordCheckIn { .. } => "RecordCheckIn",
            Self::RecordCheckOut { .. } => "RecordCheckOut",
            Self::EditAttendance { .. } => "EditAttendance",
            Self::AdjustCheckOuts { .. } => "AdjustCheckOuts",
        }
    }
}
