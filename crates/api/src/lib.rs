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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod pagination;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthError, AuthenticatedActor, AuthorizationService, Role};
pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    cancel_reservation, create_reservation, get_reservation, list_all_reservations,
    list_reservations_between, list_today_reservations, list_user_reservations,
    update_reservation, update_reservation_status,
};
pub use pagination::{
    DEFAULT_ADMIN_PAGE_LIMIT, DEFAULT_USER_PAGE_LIMIT, MAX_PAGE_LIMIT, Page, PageRequest,
    QueryPolicyError,
};
pub use request_response::{
    AllReservationsRequest, CancelReservationRequest, CreateReservationRequest, ListOptions,
    ReservationInfo, StatusChangeInfo, UpdateReservationRequest, UpdateStatusRequest,
};
