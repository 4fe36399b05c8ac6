// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance duration reconciliation.
//!
//! Rules, applied in order:
//!
//! 1. Either instant missing: not computable (`minutes = 0`, invalid)
//! 2. Check-out before check-in: invalid
//! 3. Elapsed time above 24 hours: invalid (treated as a data-entry error)
//! 4. Otherwise valid, rounded half-up to the nearest whole minute
//!
//! Invalid durations are flagged, never clamped.

use crate::types::Signup;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Longest duration, in minutes, accepted as a single attendance record.
pub const MAX_SESSION_MINUTES: i64 = 1440;

const MILLIS_PER_MINUTE: i64 = 60_000;
const MAX_SESSION_MILLIS: i64 = MAX_SESSION_MINUTES * MILLIS_PER_MINUTE;

/// Why a recorded duration cannot be certified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidDurationReason {
    /// Check-in or check-out was never recorded.
    MissingTimestamp,
    CheckOutPrecedesCheckIn,
    ExcessiveDuration,
}

impl InvalidDurationReason {
    /// Returns the human-readable reason reported to organizers.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingTimestamp => "missing check-in or check-out",
            Self::CheckOutPrecedesCheckIn => "check-out precedes check-in",
            Self::ExcessiveDuration => "excessive duration",
        }
    }
}

impl std::fmt::Display for InvalidDurationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The reconciled duration of one attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceDuration {
    /// Whole minutes attended. Zero whenever the record is invalid.
    pub minutes: i64,
    pub is_valid: bool,
    pub reason: Option<InvalidDurationReason>,
}

impl AttendanceDuration {
    const fn valid(minutes: i64) -> Self {
        Self {
            minutes,
            is_valid: true,
            reason: None,
        }
    }

    const fn invalid(reason: InvalidDurationReason) -> Self {
        Self {
            minutes: 0,
            is_valid: false,
            reason: Some(reason),
        }
    }
}

/// Reconciles a check-in/check-out pair into a duration.
///
/// # Arguments
///
/// * `check_in` - The recorded check-in instant, if any
/// * `check_out` - The recorded check-out instant, if any
///
/// # Returns
///
/// The duration in whole minutes with its validity. Exactly 24 hours is
/// still valid; anything longer is not.
#[must_use]
pub fn reconcile(
    check_in: Option<NaiveDateTime>,
    check_out: Option<NaiveDateTime>,
) -> AttendanceDuration {
    let (Some(check_in), Some(check_out)) = (check_in, check_out) else {
        return AttendanceDuration::invalid(InvalidDurationReason::MissingTimestamp);
    };

    if check_out < check_in {
        return AttendanceDuration::invalid(InvalidDurationReason::CheckOutPrecedesCheckIn);
    }

    let elapsed_millis: i64 = (check_out - check_in).num_milliseconds();
    if elapsed_millis > MAX_SESSION_MILLIS {
        return AttendanceDuration::invalid(InvalidDurationReason::ExcessiveDuration);
    }

    AttendanceDuration::valid((elapsed_millis + MILLIS_PER_MINUTE / 2) / MILLIS_PER_MINUTE)
}

/// Reconciles the attendance recorded on a signup.
#[must_use]
pub fn reconcile_signup(signup: &Signup) -> AttendanceDuration {
    reconcile(signup.check_in_time, signup.check_out_time)
}

/// Outcome of shifting one signup's check-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutAdjustment {
    pub signup_id: String,
    /// False when there was no check-out to shift or the shift overflowed.
    pub applied: bool,
    pub previous_check_out: Option<NaiveDateTime>,
    pub adjusted_check_out: Option<NaiveDateTime>,
    /// The duration after the shift (or the unchanged duration if not applied).
    pub duration: AttendanceDuration,
}

/// Shifts a check-out by a signed number of minutes.
///
/// Returns `None` if the offset is out of range for an instant.
#[must_use]
pub fn shift_check_out(check_out: NaiveDateTime, offset_minutes: i64) -> Option<NaiveDateTime> {
    let offset: Duration = Duration::try_minutes(offset_minutes)?;
    check_out.checked_add_signed(offset)
}

/// Shifts every signup's check-out by `offset_minutes` and re-validates each.
///
/// Each signup is handled independently. A shift that makes a duration
/// invalid is still applied and reported as such; nothing is reverted.
/// Signups without a check-out are reported as not applied.
#[must_use]
pub fn adjust_check_outs<'a, I>(signups: I, offset_minutes: i64) -> Vec<CheckOutAdjustment>
where
    I: IntoIterator<Item = &'a Signup>,
{
    signups
        .into_iter()
        .map(|signup| {
            let adjusted: Option<NaiveDateTime> = signup
                .check_out_time
                .and_then(|check_out| shift_check_out(check_out, offset_minutes));

            match adjusted {
                Some(adjusted_check_out) => CheckOutAdjustment {
                    signup_id: signup.signup_id.clone(),
                    applied: true,
                    previous_check_out: signup.check_out_time,
                    adjusted_check_out: Some(adjusted_check_out),
                    duration: reconcile(signup.check_in_time, Some(adjusted_check_out)),
                },
                None => CheckOutAdjustment {
                    signup_id: signup.signup_id.clone(),
                    applied: false,
                    previous_check_out: signup.check_out_time,
                    adjusted_check_out: signup.check_out_time,
                    duration: reconcile_signup(signup),
                },
            }
        })
        .collect()
}
