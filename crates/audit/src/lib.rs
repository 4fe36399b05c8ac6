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
    clippy::all
)]

use serde::{Deserialize, Serialize};
use vol_hours_domain::SessionKey;

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change:
/// an organizer correcting attendance, a volunteer checking in, or the
/// scheduled publisher that runs after the editing deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "organizer", "volunteer", "scheduler").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID, job run ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g., "`RecordCheckIn`", "`PublishHours`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of the affected records at a point in time.
///
/// `data` holds a compact, human-readable rendering of the records the
/// action touched (e.g., a signup's check-in and check-out).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change produces exactly one audit event.
/// Audit events are immutable once created and capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The state before and after the transition
/// - The project, and the session when the action is session-scoped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The storage id, assigned once the event is persisted.
    pub event_id: Option<i64>,
    pub project_id: String,
    /// Canonical key of the affected session, if the action is session-scoped.
    pub session_key: Option<SessionKey>,
    pub actor: Actor,
    pub cause: Cause,
    pub action: Action,
    pub before: StateSnapshot,
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new, not yet persisted `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `project_id` - The project the change belongs to
    /// * `session_key` - The affected session, if any
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    #[must_use]
    pub const fn new(
        project_id: String,
        session_key: Option<SessionKey>,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            project_id,
            session_key,
            actor,
            cause,
            action,
            before,
            after,
        }
    }

    /// Returns a copy of this event carrying its storage id.
    #[must_use]
    pub const fn with_event_id(mut self, event_id: i64) -> Self {
        self.event_id = Some(event_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_event() -> AuditEvent {
        AuditEvent::new(
            String::from("project-1"),
            Some(SessionKey::new("2025-07-10-1")),
            Actor::new(String::from("organizer-7"), String::from("organizer")),
            Cause::new(String::from("req-456"), String::from("Corrected late check-out")),
            Action::new(String::from("EditAttendance"), None),
            StateSnapshot::new(String::from("check_out=none")),
            StateSnapshot::new(String::from("check_out=2025-07-10T15:05:00")),
        )
    }

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("scheduler"), String::from("scheduler"));

        assert_eq!(actor.id, "scheduler");
        assert_eq!(actor.actor_type, "scheduler");
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("PublishHours"),
            Some(String::from("3 certificates, 1 excluded")),
        );

        assert_eq!(action.name, "PublishHours");
        assert_eq!(action.details, Some(String::from("3 certificates, 1 excluded")));
    }

    #[test]
    fn test_new_event_is_not_persisted() {
        let event: AuditEvent = create_test_event();

        assert_eq!(event.event_id, None);
        assert_eq!(event.project_id, "project-1");
        assert_eq!(event.session_key, Some(SessionKey::new("2025-07-10-1")));
    }

    #[test]
    fn test_with_event_id_keeps_content() {
        let event: AuditEvent = create_test_event();
        let stored: AuditEvent = event.clone().with_event_id(42);

        assert_eq!(stored.event_id, Some(42));
        assert_eq!(stored.action, event.action);
        assert_eq!(stored.before, event.before);
        assert_eq!(stored.after, event.after);
    }

    #[test]
    fn test_audit_event_serialization_round_trip() {
        let event: AuditEvent = create_test_event();

        let json: String = serde_json::to_string(&event).unwrap_or_default();
        let restored: Result<AuditEvent, _> = serde_json::from_str(&json);

        assert!(matches!(restored, Ok(ref e) if *e == event));
    }

    #[test]
    fn test_audit_event_equality() {
        let event1: AuditEvent = create_test_event();
        let mut event2: AuditEvent = create_test_event();
        assert_eq!(event1, event2);

        event2.session_key = None;
        assert_ne!(event1, event2);
    }
}
