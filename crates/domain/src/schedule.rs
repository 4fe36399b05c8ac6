// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule model.
//!
//! A project's schedule takes exactly one of three closed shapes:
//!
//! - **One-time**: a single session on one date
//! - **Multi-day**: an ordered sequence of days, each with ordered slots;
//!   every `(day, slot)` pair is a session
//! - **Same-day multi-area**: one date split into uniquely named roles;
//!   every role is a session
//!
//! ## Invariants
//!
//! - The stored `ScheduleDocument` has exactly one populated shape and it
//!   matches the project's `EventType`
//! - Session ordering is the schedule order: day order then slot order, or
//!   role order as declared
//! - Every session ends strictly after it starts (same calendar date)
//! - Session keys never collide within one schedule
//!
//! This is the only place that branches on schedule shape. Everything else
//! consumes the flat `Session` sequence produced by `enumerate_sessions`.

use crate::clock::{parse_date, parse_time};
use crate::error::DomainError;
use crate::session_id::{SessionAddress, SessionKey, encode};
use crate::types::{EventType, Project};
use crate::window::windows_representable;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Stored form of a schedule, as persisted alongside the project.
///
/// Fields are optional because documents written by earlier editors may be
/// partial. `Schedule::resolve` turns this into the typed model.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_time: Option<SlotDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_day: Option<Vec<DayDocument>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_day_multi_area: Option<MultiAreaDocument>,
}

/// Stored form of a dated slot (one-time) or an undated slot (multi-day).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub volunteer_capacity: Option<u32>,
}

/// Stored form of one multi-day entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayDocument {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub slots: Option<Vec<SlotDocument>>,
}

/// Stored form of a same-day multi-area schedule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiAreaDocument {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub roles: Option<Vec<RoleDocument>>,
}

/// Stored form of one named role.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub volunteer_capacity: Option<u32>,
}

impl ScheduleDocument {
    /// Returns the shapes that carry a value, in declaration order.
    #[must_use]
    pub fn populated_shapes(&self) -> Vec<EventType> {
        let mut shapes: Vec<EventType> = Vec::new();
        if self.one_time.is_some() {
            shapes.push(EventType::OneTime);
        }
        if self.multi_day.is_some() {
            shapes.push(EventType::MultiDay);
        }
        if self.same_day_multi_area.is_some() {
            shapes.push(EventType::SameDayMultiArea);
        }
        shapes
    }
}

/// A validated start/end pair with its volunteer capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub volunteer_capacity: u32,
}

/// A one-time schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneTimeSchedule {
    pub date: NaiveDate,
    pub slot: TimeSlot,
}

/// One day of a multi-day schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

/// One named role of a same-day multi-area schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub name: String,
    pub slot: TimeSlot,
}

/// A same-day multi-area schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiAreaSchedule {
    pub date: NaiveDate,
    pub roles: Vec<Role>,
}

/// A validated schedule in one of its three shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    OneTime(OneTimeSchedule),
    MultiDay(Vec<ScheduleDay>),
    SameDayMultiArea(MultiAreaSchedule),
}

/// One addressable, time-bounded unit of volunteering.
///
/// Derived from a schedule on demand and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Canonical session key.
    pub key: SessionKey,
    /// Schedule-relative coordinates of the session.
    pub address: SessionAddress,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub volunteer_capacity: u32,
}

impl Session {
    fn new(address: SessionAddress, date: NaiveDate, slot: &TimeSlot) -> Self {
        Self {
            key: encode(&address),
            address,
            start: date.and_time(slot.start_time),
            end: date.and_time(slot.end_time),
            volunteer_capacity: slot.volunteer_capacity,
        }
    }
}

impl Schedule {
    /// Resolves a stored schedule document into the typed model.
    ///
    /// # Arguments
    ///
    /// * `event_type` - The project's declared event type
    /// * `document` - The stored schedule document
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The populated shape does not match `event_type`, or more than one
    ///   shape is populated
    /// - A required field is missing or unparseable
    /// - A slot does not end after it starts
    /// - Two sessions would share a key (repeated date or role name)
    pub fn resolve(
        event_type: EventType,
        document: &ScheduleDocument,
    ) -> Result<Self, DomainError> {
        let populated: Vec<EventType> = document.populated_shapes();
        if populated != [event_type] {
            return Err(DomainError::ScheduleMismatch {
                event_type: event_type.to_string(),
                populated: populated
                    .iter()
                    .map(EventType::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        match (
            &document.one_time,
            &document.multi_day,
            &document.same_day_multi_area,
        ) {
            (Some(one_time), None, None) => resolve_one_time(one_time),
            (None, Some(days), None) => resolve_multi_day(days),
            (None, None, Some(multi_area)) => resolve_multi_area(multi_area),
            _ => Err(DomainError::MalformedSchedule {
                reason: String::from("exactly one schedule shape must be populated"),
            }),
        }
    }

    /// Returns the event type this schedule shape corresponds to.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::OneTime(_) => EventType::OneTime,
            Self::MultiDay(_) => EventType::MultiDay,
            Self::SameDayMultiArea(_) => EventType::SameDayMultiArea,
        }
    }

    /// Flattens the schedule into sessions, in schedule order.
    #[must_use]
    pub fn sessions(&self) -> Vec<Session> {
        match self {
            Self::OneTime(one_time) => vec![Session::new(
                SessionAddress::OneTime,
                one_time.date,
                &one_time.slot,
            )],
            Self::MultiDay(days) => days
                .iter()
                .flat_map(|day| {
                    day.slots.iter().enumerate().map(|(slot_index, slot)| {
                        Session::new(
                            SessionAddress::MultiDaySlot {
                                date: day.date,
                                slot_index,
                            },
                            day.date,
                            slot,
                        )
                    })
                })
                .collect(),
            Self::SameDayMultiArea(multi_area) => multi_area
                .roles
                .iter()
                .map(|role| {
                    Session::new(
                        SessionAddress::Role {
                            name: role.name.clone(),
                        },
                        multi_area.date,
                        &role.slot,
                    )
                })
                .collect(),
        }
    }

    /// Looks up the session at the given address.
    #[must_use]
    pub fn session_at(&self, address: &SessionAddress) -> Option<Session> {
        match (self, address) {
            (Self::OneTime(one_time), SessionAddress::OneTime) => Some(Session::new(
                SessionAddress::OneTime,
                one_time.date,
                &one_time.slot,
            )),
            (Self::MultiDay(days), SessionAddress::MultiDaySlot { date, slot_index }) => days
                .iter()
                .find(|day| day.date == *date)
                .and_then(|day| day.slots.get(*slot_index))
                .map(|slot| Session::new(address.clone(), *date, slot)),
            (Self::SameDayMultiArea(multi_area), SessionAddress::Role { name }) => multi_area
                .roles
                .iter()
                .find(|role| role.name == *name)
                .map(|role| Session::new(address.clone(), multi_area.date, &role.slot)),
            _ => None,
        }
    }

    /// Looks up a multi-day session by day and slot position.
    ///
    /// Returns `None` for other shapes or out-of-range indices.
    #[must_use]
    pub fn multi_day_session_by_index(
        &self,
        day_index: usize,
        slot_index: usize,
    ) -> Option<Session> {
        match self {
            Self::MultiDay(days) => {
                let day: &ScheduleDay = days.get(day_index)?;
                let slot: &TimeSlot = day.slots.get(slot_index)?;
                Some(Session::new(
                    SessionAddress::MultiDaySlot {
                        date: day.date,
                        slot_index,
                    },
                    day.date,
                    slot,
                ))
            }
            Self::OneTime(_) | Self::SameDayMultiArea(_) => None,
        }
    }
}

/// Flattens a project's schedule into its sessions, in schedule order.
///
/// Never fails: a malformed or partial schedule yields an empty sequence,
/// which callers must treat as a valid, displayable state.
#[must_use]
pub fn enumerate_sessions(project: &Project) -> Vec<Session> {
    Schedule::resolve(project.event_type, &project.schedule)
        .map(|schedule| schedule.sessions())
        .unwrap_or_default()
}

fn required<'a>(value: Option<&'a String>, field: &str) -> Result<&'a str, DomainError> {
    value
        .map(String::as_str)
        .ok_or_else(|| DomainError::MalformedSchedule {
            reason: format!("missing {field}"),
        })
}

fn resolve_slot(
    date: NaiveDate,
    start_time: Option<&String>,
    end_time: Option<&String>,
    volunteer_capacity: Option<u32>,
    context: &str,
) -> Result<TimeSlot, DomainError> {
    let start_time: NaiveTime =
        parse_time(required(start_time, &format!("{context} start time"))?)?;
    let end_time: NaiveTime = parse_time(required(end_time, &format!("{context} end time"))?)?;
    let volunteer_capacity: u32 =
        volunteer_capacity.ok_or_else(|| DomainError::MalformedSchedule {
            reason: format!("missing {context} volunteer capacity"),
        })?;

    if end_time <= start_time {
        return Err(DomainError::MalformedSchedule {
            reason: format!(
                "{context} ends at {end_time} which is not after its start {start_time}"
            ),
        });
    }

    if !windows_representable(date.and_time(start_time), date.and_time(end_time)) {
        return Err(DomainError::MalformedSchedule {
            reason: format!("{context} on {date} is outside the supported date range"),
        });
    }

    Ok(TimeSlot {
        start_time,
        end_time,
        volunteer_capacity,
    })
}

fn resolve_one_time(document: &SlotDocument) -> Result<Schedule, DomainError> {
    let date: NaiveDate = parse_date(required(document.date.as_ref(), "one-time date")?)?;
    let slot: TimeSlot = resolve_slot(
        date,
        document.start_time.as_ref(),
        document.end_time.as_ref(),
        document.volunteer_capacity,
        "one-time",
    )?;
    Ok(Schedule::OneTime(OneTimeSchedule { date, slot }))
}

fn resolve_multi_day(days: &[DayDocument]) -> Result<Schedule, DomainError> {
    let mut seen_dates: HashSet<NaiveDate> = HashSet::new();
    let mut resolved: Vec<ScheduleDay> = Vec::with_capacity(days.len());

    for (day_index, day) in days.iter().enumerate() {
        let date: NaiveDate =
            parse_date(required(day.date.as_ref(), &format!("day {day_index} date"))?)?;
        if !seen_dates.insert(date) {
            return Err(DomainError::DuplicateSessionKey(date.to_string()));
        }

        let slot_documents: &[SlotDocument] =
            day.slots.as_deref().ok_or_else(|| DomainError::MalformedSchedule {
                reason: format!("missing slots for {date}"),
            })?;

        let slots: Vec<TimeSlot> = slot_documents
            .iter()
            .enumerate()
            .map(|(slot_index, slot)| {
                resolve_slot(
                    date,
                    slot.start_time.as_ref(),
                    slot.end_time.as_ref(),
                    slot.volunteer_capacity,
                    &format!("{date} slot {slot_index}"),
                )
            })
            .collect::<Result<_, _>>()?;

        resolved.push(ScheduleDay { date, slots });
    }

    Ok(Schedule::MultiDay(resolved))
}

fn resolve_multi_area(document: &MultiAreaDocument) -> Result<Schedule, DomainError> {
    let date: NaiveDate = parse_date(required(document.date.as_ref(), "multi-area date")?)?;
    let role_documents: &[RoleDocument] =
        document.roles.as_deref().ok_or_else(|| DomainError::MalformedSchedule {
            reason: String::from("missing roles"),
        })?;

    let mut seen_names: HashSet<&str> = HashSet::new();
    let mut roles: Vec<Role> = Vec::with_capacity(role_documents.len());

    for role in role_documents {
        let name: &str = required(role.name.as_ref(), "role name")?;
        if name.trim().is_empty() {
            return Err(DomainError::MalformedSchedule {
                reason: String::from("role name must not be empty"),
            });
        }
        if !seen_names.insert(name) {
            return Err(DomainError::DuplicateSessionKey(name.to_string()));
        }

        let slot: TimeSlot = resolve_slot(
            date,
            role.start_time.as_ref(),
            role.end_time.as_ref(),
            role.volunteer_capacity,
            &format!("role '{name}'"),
        )?;
        roles.push(Role {
            name: name.to_string(),
            slot,
        });
    }

    Ok(Schedule::SameDayMultiArea(MultiAreaSchedule { date, roles }))
}
