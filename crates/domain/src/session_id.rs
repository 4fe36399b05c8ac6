// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session identifier codec.
//!
//! Every session is addressed by one canonical string key, used for storage,
//! URLs, cookies, and the publication latch:
//!
//! | Shape | Canonical key |
//! |---|---|
//! | One-time | `oneTime` |
//! | Multi-day | `{YYYY-MM-DD}-{slotIndex}` (zero-based slot index) |
//! | Same-day multi-area | the role name, verbatim |
//!
//! Multi-day keys are decoded by splitting on the **last** `-`, since the
//! date itself contains hyphens.
//!
//! ## Historical aliases
//!
//! Older records address multi-day sessions with `day-{dayIndex}-slot-{slotIndex}`
//! or `{dayIndex}-{slotIndex}`. `resolve_session_id` accepts those forms and
//! maps them to the canonical key so persisted data stays addressable.
//! New ids are only ever issued in canonical form.

use crate::clock::DATE_FORMAT;
use crate::error::DomainError;
use crate::schedule::{Schedule, Session};
use crate::types::{PublicationLatch, Signup};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical key of the single session of a one-time project.
pub const ONE_TIME_SESSION_KEY: &str = "oneTime";

/// A canonical session key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);

impl SessionKey {
    /// Wraps a key that is already in canonical form (e.g., read back from storage).
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Schedule-relative coordinates of a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "shape")]
pub enum SessionAddress {
    /// The single session of a one-time project.
    OneTime,
    /// One slot of one day of a multi-day project.
    #[serde(rename_all = "camelCase")]
    MultiDaySlot { date: NaiveDate, slot_index: usize },
    /// One role of a same-day multi-area project.
    Role { name: String },
}

/// Which encoding an incoming session id used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionIdForm {
    /// The canonical key.
    Canonical,
    /// `day-{dayIndex}-slot-{slotIndex}`.
    DaySlotLabel,
    /// `{dayIndex}-{slotIndex}`.
    DayIndexPair,
}

impl SessionIdForm {
    /// Returns the string representation of the form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Canonical => "canonical",
            Self::DaySlotLabel => "day_slot_label",
            Self::DayIndexPair => "day_index_pair",
        }
    }
}

/// A session id resolved to its session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSession {
    pub session: Session,
    pub form: SessionIdForm,
}

/// Encodes session coordinates into the canonical key.
#[must_use]
pub fn encode(address: &SessionAddress) -> SessionKey {
    match address {
        SessionAddress::OneTime => SessionKey::new(ONE_TIME_SESSION_KEY),
        SessionAddress::MultiDaySlot { date, slot_index } => {
            SessionKey(format!("{}-{slot_index}", date.format(DATE_FORMAT)))
        }
        SessionAddress::Role { name } => SessionKey(name.clone()),
    }
}

/// Splits a multi-day key into its date and slot index.
///
/// Splits on the last `-`. Returns `None` if either part does not parse, or
/// if the key is not spelled exactly as `encode` would spell it (padded
/// indices, unpadded dates, surrounding whitespace).
///
/// # Example
///
/// ```text
/// "2025-07-10-1" -> (2025-07-10, 1)
/// ```
#[must_use]
pub fn parse_multi_day_key(id: &str) -> Option<(NaiveDate, usize)> {
    let (date_part, index_part) = id.rsplit_once('-')?;
    let slot_index: usize = parse_index(index_part)?;
    let date: NaiveDate = NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()?;
    let canonical: String = format!("{}-{slot_index}", date.format(DATE_FORMAT));
    (canonical == id).then_some((date, slot_index))
}

/// Decodes a canonical key against a schedule.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the key does not name a session
/// of this schedule. This is expected when a schedule is edited after ids
/// were issued, and callers should treat it as "session unavailable".
pub fn decode(schedule: &Schedule, id: &str) -> Result<SessionAddress, DomainError> {
    let mut candidates: Vec<SessionAddress> = Vec::with_capacity(3);
    if id == ONE_TIME_SESSION_KEY {
        candidates.push(SessionAddress::OneTime);
    }
    if let Some((date, slot_index)) = parse_multi_day_key(id) {
        candidates.push(SessionAddress::MultiDaySlot { date, slot_index });
    }
    candidates.push(SessionAddress::Role {
        name: id.to_string(),
    });

    candidates
        .into_iter()
        .find(|address| schedule.session_at(address).is_some())
        .ok_or_else(|| DomainError::SessionNotFound {
            session_id: id.to_string(),
        })
}

/// Resolves any known form of session id to its session.
///
/// The canonical form is tried first, then the historical multi-day aliases.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if no form matches a session.
pub fn resolve_session_id(schedule: &Schedule, id: &str) -> Result<ResolvedSession, DomainError> {
    let canonical: Option<Session> = decode(schedule, id)
        .ok()
        .and_then(|address| schedule.session_at(&address));
    if let Some(session) = canonical {
        return Ok(ResolvedSession {
            session,
            form: SessionIdForm::Canonical,
        });
    }

    let alias: Option<(SessionIdForm, usize, usize)> = parse_day_slot_label(id)
        .map(|(day, slot)| (SessionIdForm::DaySlotLabel, day, slot))
        .or_else(|| {
            parse_day_index_pair(id).map(|(day, slot)| (SessionIdForm::DayIndexPair, day, slot))
        });

    alias
        .and_then(|(form, day_index, slot_index)| {
            schedule
                .multi_day_session_by_index(day_index, slot_index)
                .map(|session| ResolvedSession { session, form })
        })
        .ok_or_else(|| DomainError::SessionNotFound {
            session_id: id.to_string(),
        })
}

/// Resolves a signup's stored session id to the canonical key.
///
/// Returns `None` when the id no longer names a session of the schedule.
#[must_use]
pub fn signup_session_key(schedule: &Schedule, signup: &Signup) -> Option<SessionKey> {
    resolve_session_id(schedule, &signup.schedule_id)
        .ok()
        .map(|resolved| resolved.session.key)
}

/// Rewrites a latch so every entry uses the canonical key.
///
/// Entries written under an alias are mapped through the resolver; entries
/// that no longer resolve are dropped.
#[must_use]
pub fn canonicalize_latch(schedule: &Schedule, latch: &PublicationLatch) -> PublicationLatch {
    latch
        .published_keys()
        .filter_map(|key| resolve_session_id(schedule, key).ok())
        .map(|resolved| resolved.session.key)
        .collect()
}

fn parse_index(value: &str) -> Option<usize> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

fn parse_day_slot_label(id: &str) -> Option<(usize, usize)> {
    let rest: &str = id.strip_prefix("day-")?;
    let (day, slot) = rest.split_once("-slot-")?;
    Some((parse_index(day)?, parse_index(slot)?))
}

fn parse_day_index_pair(id: &str) -> Option<(usize, usize)> {
    let (day, slot) = id.split_once('-')?;
    Some((parse_index(day)?, parse_index(slot)?))
}
