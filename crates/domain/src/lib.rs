// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod clock;
mod duration;
mod error;
mod phase;
mod schedule;
mod session_id;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use clock::{
    Clock, DATE_FORMAT, FixedClock, INSTANT_FORMAT, SystemClock, TIME_FORMAT, format_instant,
    parse_date, parse_instant, parse_time,
};
pub use duration::{
    AttendanceDuration, CheckOutAdjustment, InvalidDurationReason, MAX_SESSION_MINUTES,
    adjust_check_outs, reconcile, reconcile_signup, shift_check_out,
};
pub use error::DomainError;
pub use phase::{
    ProjectPhaseSummary, SessionPhase, SessionPhaseEntry, aggregate_phase, classify,
    classify_session, summarize_project,
};
pub use schedule::{
    DayDocument, MultiAreaDocument, MultiAreaSchedule, OneTimeSchedule, Role, RoleDocument,
    Schedule, ScheduleDay, ScheduleDocument, Session, SlotDocument, TimeSlot, enumerate_sessions,
};
pub use session_id::{
    ONE_TIME_SESSION_KEY, ResolvedSession, SessionAddress, SessionIdForm, SessionKey,
    canonicalize_latch, decode, encode, parse_multi_day_key, resolve_session_id,
    signup_session_key,
};
pub use types::{
    Certificate, EventType, OrganizationSnapshot, Project, ProjectSnapshot, ProjectStatus,
    PublicationLatch, Signup, SignupStatus, VerificationMethod, VolunteerIdentity,
    VolunteerSnapshot,
};
pub use window::{
    ADDRESSABLE_TAIL_MINUTES, ATTENDANCE_LEAD_MINUTES, EDITING_GRACE_HOURS, GENERAL_LEAD_MINUTES,
    SessionWindows, calculate_windows, is_addressable, windows_representable,
};
