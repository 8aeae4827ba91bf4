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

use seatwise_domain::ReservationStatus;
use time::OffsetDateTime;

/// Represents the entity performing a status change.
///
/// An actor is any identifiable entity that initiates a state change.
/// System-initiated changes carry no actor at all (`Option<Actor>` is
/// `None`) rather than a sentinel value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "user", "admin").
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

/// A single entry in a reservation's status history.
///
/// Every status change produces exactly one entry. Entries are immutable
/// once appended and capture:
/// - The status the reservation moved to
/// - Why it moved (reason, where one was given)
/// - When the change happened
/// - Who initiated it (absent for system-initiated changes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    /// The status the reservation entered.
    pub status: ReservationStatus,
    /// The reason supplied with the change, if any.
    pub reason: Option<String>,
    /// When the change occurred.
    pub changed_at: OffsetDateTime,
    /// The actor who initiated the change, if any.
    pub changed_by: Option<Actor>,
}

impl StatusChange {
    /// Creates a new `StatusChange`.
    ///
    /// Once created, a status change is immutable.
    ///
    /// # Arguments
    ///
    /// * `status` - The status the reservation entered
    /// * `reason` - The reason supplied with the change
    /// * `changed_at` - When the change occurred
    /// * `changed_by` - The actor who initiated the change
    #[must_use]
    pub const fn new(
        status: ReservationStatus,
        reason: Option<String>,
        changed_at: OffsetDateTime,
        changed_by: Option<Actor>,
    ) -> Self {
        Self {
            status,
            reason,
            changed_at,
            changed_by,
        }
    }
}

/// An append-only sequence of status changes.
///
/// The history grows monotonically: entries can be appended but never
/// edited or removed, and interior entries are never exposed mutably.
/// The last entry's status always equals the reservation's current status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusHistory {
    entries: Vec<StatusChange>,
}

impl StatusHistory {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Rebuilds a history from previously persisted entries.
    ///
    /// The entries must already be in append order.
    #[must_use]
    pub const fn from_entries(entries: Vec<StatusChange>) -> Self {
        Self { entries }
    }

    /// Appends a status change to the history.
    ///
    /// This is the only mutating operation; nothing is ever removed.
    pub fn append(&mut self, change: StatusChange) {
        self.entries.push(change);
    }

    /// Returns the most recent status change, if any.
    #[must_use]
    pub fn last(&self) -> Option<&StatusChange> {
        self.entries.last()
    }

    /// Returns the entries in append order.
    #[must_use]
    pub fn entries(&self) -> &[StatusChange] {
        &self.entries
    }

    /// Returns the number of recorded changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no changes have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample_change(status: ReservationStatus) -> StatusChange {
        StatusChange::new(
            status,
            None,
            datetime!(2026-03-10 12:00 UTC),
            Some(Actor::new(String::from("7"), String::from("user"))),
        )
    }

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("42"), String::from("admin"));

        assert_eq!(actor.id, "42");
        assert_eq!(actor.actor_type, "admin");
    }

    #[test]
    fn test_status_change_captures_reason_and_actor() {
        let change: StatusChange = StatusChange::new(
            ReservationStatus::Cancelled,
            Some(String::from("Guest called to cancel")),
            datetime!(2026-03-10 12:00 UTC),
            Some(Actor::new(String::from("7"), String::from("user"))),
        );

        assert_eq!(change.status, ReservationStatus::Cancelled);
        assert_eq!(change.reason.as_deref(), Some("Guest called to cancel"));
        assert!(change.changed_by.is_some());
    }

    #[test]
    fn test_system_initiated_change_has_no_actor() {
        let change: StatusChange = StatusChange::new(
            ReservationStatus::Approved,
            None,
            datetime!(2026-03-10 12:00 UTC),
            None,
        );

        assert_eq!(change.changed_by, None);
    }

    #[test]
    fn test_history_starts_empty() {
        let history: StatusHistory = StatusHistory::new();

        assert!(history.is_empty());
        assert_eq!(history.last(), None);
    }

    #[test]
    fn test_append_grows_history_in_order() {
        let mut history: StatusHistory = StatusHistory::new();
        history.append(sample_change(ReservationStatus::Requested));
        history.append(sample_change(ReservationStatus::Approved));

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.entries()[0].status,
            ReservationStatus::Requested
        );
        assert_eq!(
            history.last().map(|change| change.status),
            Some(ReservationStatus::Approved)
        );
    }

    #[test]
    fn test_from_entries_preserves_order() {
        let entries = vec![
            sample_change(ReservationStatus::Requested),
            sample_change(ReservationStatus::Approved),
            sample_change(ReservationStatus::Completed),
        ];

        let history: StatusHistory = StatusHistory::from_entries(entries.clone());

        assert_eq!(history.entries(), entries.as_slice());
    }
}
