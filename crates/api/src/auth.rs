// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor identity and authorization checks.
//!
//! Authentication itself happens outside this crate; every operation
//! receives an already-authenticated actor. This module decides what that
//! actor may do.

use seatwise::Reservation;
use seatwise_audit::Actor;
use std::str::FromStr;

/// Actor roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A guest making and managing their own reservations.
    User,
    /// Restaurant staff with authority over every reservation: listing all
    /// of them and driving status transitions.
    Admin,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(AuthError::UnknownRole {
                role: s.to_string(),
            }),
        }
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The actor's user id.
    pub id: i64,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The actor's user id
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    /// Returns true if this actor holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording status changes to attribute them to the
    /// initiating actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.to_string(), self.role.as_str().to_string())
    }
}

/// Authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The actor's role does not permit the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The actor does not own the reservation the action targets.
    NotOwner {
        /// The action that was attempted, as a verb phrase.
        action: String,
    },
    /// The role string is not a known role.
    UnknownRole {
        /// The unrecognized role string.
        role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::NotOwner { action } => {
                write!(f, "You can only {action} your own reservations")
            }
            Self::UnknownRole { role } => {
                write!(f, "Invalid role: '{role}'. Must be 'user' or 'admin'")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Authorization checks for reservation operations.
///
/// Ownership rules are strict: even admins route status changes through
/// the dedicated status operation rather than the owner-only edit and
/// cancel paths.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may list every reservation.
    ///
    /// Only Admin actors may list all reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_list_all(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::User => Err(AuthError::Unauthorized {
                action: String::from("list_all_reservations"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an actor may drive a status transition.
    ///
    /// Only Admin actors may change reservation status directly; guests
    /// cancel through the owner-only cancellation path.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_update_status(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::User => Err(AuthError::Unauthorized {
                action: String::from("update_reservation_status"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an actor may view a reservation.
    ///
    /// Admins may view any reservation; users only their own.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-admin actor targets another user's
    /// reservation.
    pub fn authorize_view(
        actor: &AuthenticatedActor,
        reservation: &Reservation,
    ) -> Result<(), AuthError> {
        if actor.is_admin() || actor.id == reservation.user_id() {
            Ok(())
        } else {
            Err(AuthError::NotOwner {
                action: String::from("view"),
            })
        }
    }

    /// Checks if an actor may edit a reservation's details.
    ///
    /// Only the owning user may edit.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not own the reservation.
    pub fn authorize_edit(
        actor: &AuthenticatedActor,
        reservation: &Reservation,
    ) -> Result<(), AuthError> {
        if actor.id == reservation.user_id() {
            Ok(())
        } else {
            Err(AuthError::NotOwner {
                action: String::from("modify"),
            })
        }
    }

    /// Checks if an actor may cancel a reservation.
    ///
    /// Only the owning user may cancel through this path.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not own the reservation.
    pub fn authorize_cancel(
        actor: &AuthenticatedActor,
        reservation: &Reservation,
    ) -> Result<(), AuthError> {
        if actor.id == reservation.user_id() {
            Ok(())
        } else {
            Err(AuthError::NotOwner {
                action: String::from("cancel"),
            })
        }
    }
}
