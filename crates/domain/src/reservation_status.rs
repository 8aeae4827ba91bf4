// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reservation status tracking and transition logic.
//!
//! This module defines reservation status states and valid transitions.
//! Status transitions are actor-initiated only; the system never advances
//! status based on time alone.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Reservation status states tracking a reservation through its lifecycle.
///
/// Every reservation starts in `Requested`. `Cancelled` and `Completed`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReservationStatus {
    /// Guest has requested the slot; awaiting staff review
    #[default]
    Requested,
    /// Staff approved the reservation
    Approved,
    /// Reservation was cancelled by the guest or by staff
    Cancelled,
    /// Guest arrived and the reservation was honored
    Completed,
}

impl ReservationStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "Requested",
            Self::Approved => "Approved",
            Self::Cancelled => "Cancelled",
            Self::Completed => "Completed",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "Requested" => Ok(Self::Requested),
            "Approved" => Ok(Self::Approved),
            "Cancelled" => Ok(Self::Cancelled),
            "Completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Returns true if the reservation still occupies a time slot.
    ///
    /// Active reservations participate in conflict detection.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Requested | Self::Approved)
    }

    /// Returns true if a reservation in this status may have its details edited.
    ///
    /// This is a derived projection of status, never stored separately.
    #[must_use]
    pub const fn allows_editing(&self) -> bool {
        self.is_active()
    }

    /// Returns true if a reservation in this status may be cancelled.
    #[must_use]
    pub const fn allows_cancellation(&self) -> bool {
        self.is_active()
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Requested → Approved
    /// - Requested → Cancelled
    /// - Approved → Completed
    /// - Approved → Cancelled
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Requested, Self::Approved)
                | (Self::Requested | Self::Approved, Self::Cancelled)
                | (Self::Approved, Self::Completed)
        )
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` naming the current and
    /// requested status if the transition is not allowed.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
            })
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
