// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The reservation lifecycle service.
//!
//! These functions are the only entry point surrounding code (REST
//! controllers, other transport adapters) may call. Each one validates
//! business rules, consults the conflict detector when scheduling fields
//! change, applies the status state machine, and issues a single atomic
//! store write.

use time::{Duration, OffsetDateTime, Time};

use seatwise::{
    Command, CoreError, NewReservation, Reservation, ReservationUpdate, TransitionOutcome, apply,
    find_conflicting, transition,
};
use seatwise_domain::ReservationStatus;
use seatwise_persistence::{
    PersistenceError, ReservationFilter, ReservationStore, SortField, SortOrder,
};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::pagination::{DEFAULT_ADMIN_PAGE_LIMIT, DEFAULT_USER_PAGE_LIMIT, Page, PageRequest};
use crate::request_response::{
    AllReservationsRequest, CancelReservationRequest, CreateReservationRequest, ListOptions,
    ReservationInfo, UpdateReservationRequest, UpdateStatusRequest, reservation_to_info,
};

/// Parses an optional status filter for a list query.
fn parse_status_filter(status: Option<&str>) -> Result<Option<ReservationStatus>, ApiError> {
    status
        .map(|s| {
            s.parse().map_err(|_| ApiError::InvalidQuery {
                field: String::from("status"),
                message: format!("Invalid reservation status: '{s}'"),
            })
        })
        .transpose()
}

/// Parses the sort options for a list query.
fn parse_sort(
    sort_by: Option<&str>,
    sort_order: Option<&str>,
) -> Result<(SortField, SortOrder), ApiError> {
    let field: SortField = match sort_by {
        None | Some("arrival_time") => SortField::ArrivalTime,
        Some("created_at") => SortField::CreatedAt,
        Some(other) => {
            return Err(ApiError::InvalidQuery {
                field: String::from("sort_by"),
                message: format!(
                    "Unknown sort column '{other}'. Must be 'arrival_time' or 'created_at'"
                ),
            });
        }
    };

    let order: SortOrder = match sort_order {
        None | Some("desc") => SortOrder::Descending,
        Some("asc") => SortOrder::Ascending,
        Some(other) => {
            return Err(ApiError::InvalidQuery {
                field: String::from("sort_order"),
                message: format!("Unknown sort order '{other}'. Must be 'asc' or 'desc'"),
            });
        }
    };

    Ok((field, order))
}

/// Raises a `SchedulingConflict` if the candidate arrival time overlaps an
/// active reservation owned by the actor.
fn check_conflict(
    store: &ReservationStore,
    user_id: i64,
    candidate_arrival: OffsetDateTime,
    exclude: Option<i64>,
) -> Result<(), ApiError> {
    let candidates: Vec<Reservation> = store
        .find_active_for_user(user_id, exclude)
        .map_err(translate_persistence_error)?;

    if let Some(conflicting) = find_conflicting(candidate_arrival, &candidates, exclude) {
        tracing::warn!(
            user_id,
            conflicting_reservation_id = conflicting.reservation_id(),
            "Rejected overlapping reservation"
        );
        return Err(translate_core_error(CoreError::SchedulingConflict {
            arrival_time: candidate_arrival,
            conflicting_reservation_id: conflicting.reservation_id(),
        }));
    }

    Ok(())
}

/// Persists a transition, turning a lost conditional-write race into an
/// `InvalidStateTransition` against the fresh status.
fn persist_transition(
    store: &mut ReservationStore,
    outcome: &TransitionOutcome,
    expected: ReservationStatus,
    target: ReservationStatus,
) -> Result<(), ApiError> {
    match store.apply_transition(&outcome.reservation, &outcome.change, expected) {
        Ok(()) => Ok(()),
        Err(PersistenceError::StatusConflict { reservation_id, .. }) => {
            let from: String = store.find_by_id(reservation_id).map_or_else(
                |_| expected.as_str().to_string(),
                |fresh| fresh.status().as_str().to_string(),
            );
            Err(ApiError::InvalidStateTransition {
                from,
                to: target.as_str().to_string(),
            })
        }
        Err(other) => Err(translate_persistence_error(other)),
    }
}

/// Creates a reservation for the acting user.
///
/// The reservation starts in `Requested` status with a single implicit
/// history entry. The creator's other active reservations are checked for
/// a time-slot conflict before anything is written.
///
/// # Errors
///
/// Returns an error if:
/// - Any field violates its domain rule
/// - The arrival time overlaps an active reservation of the same user
/// - The store write fails
pub fn create_reservation(
    store: &mut ReservationStore,
    actor: &AuthenticatedActor,
    request: CreateReservationRequest,
    now: OffsetDateTime,
) -> Result<ReservationInfo, ApiError> {
    let new: NewReservation = NewReservation {
        user_id: actor.id,
        guest_name: request.guest_name,
        phone_number: request.phone_number,
        email: request.email,
        arrival_time: request.arrival_time,
        table_size: request.table_size,
        special_requests: request.special_requests,
    };

    let reservation: Reservation =
        Reservation::create(new, Some(actor.to_audit_actor()), now).map_err(translate_core_error)?;

    check_conflict(store, actor.id, reservation.arrival_time(), None)?;

    let reservation_id: i64 = store
        .insert_reservation(&reservation)
        .map_err(translate_persistence_error)?;

    Ok(reservation_to_info(&reservation.with_id(reservation_id)))
}

/// Retrieves a reservation by id.
///
/// Admins may fetch any reservation; users only their own.
///
/// # Errors
///
/// Returns an error if the reservation does not exist, the actor may not
/// view it, or the store read fails.
pub fn get_reservation(
    store: &ReservationStore,
    actor: &AuthenticatedActor,
    reservation_id: i64,
) -> Result<ReservationInfo, ApiError> {
    let reservation: Reservation = store
        .find_by_id(reservation_id)
        .map_err(translate_persistence_error)?;

    AuthorizationService::authorize_view(actor, &reservation)?;

    Ok(reservation_to_info(&reservation))
}

/// Lists the acting user's own reservations, paginated.
///
/// # Errors
///
/// Returns an error if the pagination or sort options are invalid, or the
/// store read fails.
pub fn list_user_reservations(
    store: &ReservationStore,
    actor: &AuthenticatedActor,
    options: ListOptions,
) -> Result<Page<ReservationInfo>, ApiError> {
    let ListOptions {
        page,
        limit,
        status,
        sort_by,
        sort_order,
    } = options;

    let page_request: PageRequest = PageRequest::resolve(page, limit, DEFAULT_USER_PAGE_LIMIT)?;
    let (sort_field, sort_order) = parse_sort(sort_by.as_deref(), sort_order.as_deref())?;

    let filter: ReservationFilter = ReservationFilter {
        user_id: Some(actor.id),
        status: parse_status_filter(status.as_deref())?,
        ..ReservationFilter::default()
    };

    let (reservations, total) = store
        .find_page(
            &filter,
            sort_field,
            sort_order,
            page_request.page,
            page_request.limit,
        )
        .map_err(translate_persistence_error)?;

    let items: Vec<ReservationInfo> = reservations.iter().map(reservation_to_info).collect();
    Ok(Page::assemble(items, page_request, total))
}

/// Lists all reservations with admin filters, paginated.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the options are invalid,
/// or the store read fails.
pub fn list_all_reservations(
    store: &ReservationStore,
    actor: &AuthenticatedActor,
    request: AllReservationsRequest,
) -> Result<Page<ReservationInfo>, ApiError> {
    AuthorizationService::authorize_list_all(actor)?;

    let AllReservationsRequest {
        options,
        user_id,
        search,
        start_date,
        end_date,
    } = request;

    let page_request: PageRequest =
        PageRequest::resolve(options.page, options.limit, DEFAULT_ADMIN_PAGE_LIMIT)?;
    let (sort_field, sort_order) =
        parse_sort(options.sort_by.as_deref(), options.sort_order.as_deref())?;

    let filter: ReservationFilter = ReservationFilter {
        user_id,
        status: parse_status_filter(options.status.as_deref())?,
        search,
        arrival_from: start_date,
        arrival_to: end_date,
    };

    let (reservations, total) = store
        .find_page(
            &filter,
            sort_field,
            sort_order,
            page_request.page,
            page_request.limit,
        )
        .map_err(translate_persistence_error)?;

    let items: Vec<ReservationInfo> = reservations.iter().map(reservation_to_info).collect();
    Ok(Page::assemble(items, page_request, total))
}

/// Lists reservations arriving today, sorted by arrival time ascending.
///
/// "Today" is the calendar day of `now` in the wall clock of its offset.
///
/// # Errors
///
/// Returns an error if the status filter is invalid or the store read
/// fails.
pub fn list_today_reservations(
    store: &ReservationStore,
    status: Option<&str>,
    now: OffsetDateTime,
) -> Result<Vec<ReservationInfo>, ApiError> {
    let status: Option<ReservationStatus> = parse_status_filter(status)?;

    let start_of_day: OffsetDateTime = now.replace_time(Time::MIDNIGHT);
    let end_of_day: OffsetDateTime = start_of_day + Duration::days(1);

    let reservations: Vec<Reservation> = store
        .find_between(start_of_day, end_of_day, status)
        .map_err(translate_persistence_error)?;

    Ok(reservations.iter().map(reservation_to_info).collect())
}

/// Lists reservations arriving within `[from, to)`, sorted by arrival time
/// ascending.
///
/// # Errors
///
/// Returns an error if the bounds are inverted, the status filter is
/// invalid, or the store read fails.
pub fn list_reservations_between(
    store: &ReservationStore,
    from: OffsetDateTime,
    to: OffsetDateTime,
    status: Option<&str>,
) -> Result<Vec<ReservationInfo>, ApiError> {
    if from >= to {
        return Err(ApiError::InvalidQuery {
            field: String::from("end_date"),
            message: String::from("End of range must be after its start"),
        });
    }
    let status: Option<ReservationStatus> = parse_status_filter(status)?;

    let reservations: Vec<Reservation> = store
        .find_between(from, to, status)
        .map_err(translate_persistence_error)?;

    Ok(reservations.iter().map(reservation_to_info).collect())
}

/// Edits a reservation's details within the fixed field allowlist.
///
/// Only the owning user may edit, and only while the reservation is in an
/// editable state. An arrival-time change re-validates the scheduling
/// rules and re-runs conflict detection, excluding the reservation's own
/// id. No history entry is appended.
///
/// # Errors
///
/// Returns an error if:
/// - The reservation does not exist
/// - The actor does not own it, or its state does not allow editing
/// - Any changed field violates its domain rule
/// - A changed arrival time overlaps another active reservation
/// - The store write fails
pub fn update_reservation(
    store: &mut ReservationStore,
    actor: &AuthenticatedActor,
    reservation_id: i64,
    request: UpdateReservationRequest,
    now: OffsetDateTime,
) -> Result<ReservationInfo, ApiError> {
    let reservation: Reservation = store
        .find_by_id(reservation_id)
        .map_err(translate_persistence_error)?;

    AuthorizationService::authorize_edit(actor, &reservation)?;

    let new_arrival: Option<OffsetDateTime> = request.arrival_time;
    let updates: ReservationUpdate = ReservationUpdate {
        guest_name: request.guest_name,
        phone_number: request.phone_number,
        email: request.email,
        arrival_time: request.arrival_time,
        table_size: request.table_size,
        special_requests: request.special_requests,
    };

    let outcome = apply(
        &reservation,
        Command::UpdateDetails { updates },
        Some(actor.to_audit_actor()),
        now,
    )
    .map_err(translate_core_error)?;

    if let Some(arrival) = new_arrival {
        check_conflict(store, actor.id, arrival, Some(reservation_id))?;
    }

    store
        .update_details(&outcome.reservation)
        .map_err(translate_persistence_error)?;

    Ok(reservation_to_info(&outcome.reservation))
}

/// Moves a reservation to a new status (staff operation).
///
/// Delegates entirely to the status state machine; the result is persisted
/// with an atomic conditional write keyed on the status this call observed.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The status string is invalid or `Requested`
/// - The transition violates the state machine or its reason rules
/// - A concurrent transition won the race
/// - The store write fails
pub fn update_reservation_status(
    store: &mut ReservationStore,
    actor: &AuthenticatedActor,
    reservation_id: i64,
    request: UpdateStatusRequest,
    now: OffsetDateTime,
) -> Result<ReservationInfo, ApiError> {
    AuthorizationService::authorize_update_status(actor)?;

    let UpdateStatusRequest { status, reason } = request;

    let target: ReservationStatus = status.parse().map_err(translate_domain_error)?;
    if target == ReservationStatus::Requested {
        return Err(ApiError::InvalidInput {
            field: String::from("status"),
            message: String::from("Status must be Approved, Cancelled, or Completed"),
        });
    }

    let reservation: Reservation = store
        .find_by_id(reservation_id)
        .map_err(translate_persistence_error)?;
    let expected: ReservationStatus = reservation.status();

    let outcome: TransitionOutcome = transition(
        &reservation,
        target,
        reason.as_deref(),
        Some(actor.to_audit_actor()),
        now,
    )
    .map_err(translate_core_error)?;

    persist_transition(store, &outcome, expected, target)?;

    Ok(reservation_to_info(&outcome.reservation))
}

/// Cancels a reservation (owner operation).
///
/// Routes through the same transition path as the staff status operation,
/// with the owner recorded as the initiating actor.
///
/// # Errors
///
/// Returns an error if:
/// - The reservation does not exist
/// - The actor does not own it, or its state does not allow cancelling
/// - The reason is empty after trimming
/// - The store write fails
pub fn cancel_reservation(
    store: &mut ReservationStore,
    actor: &AuthenticatedActor,
    reservation_id: i64,
    request: CancelReservationRequest,
    now: OffsetDateTime,
) -> Result<ReservationInfo, ApiError> {
    let reservation: Reservation = store
        .find_by_id(reservation_id)
        .map_err(translate_persistence_error)?;

    AuthorizationService::authorize_cancel(actor, &reservation)?;

    if !reservation.can_cancel() {
        return Err(ApiError::Forbidden {
            message: String::from("Reservation state does not allow cancelling"),
        });
    }

    let CancelReservationRequest { reason } = request;

    let expected: ReservationStatus = reservation.status();
    let outcome: TransitionOutcome = transition(
        &reservation,
        ReservationStatus::Cancelled,
        Some(reason.as_str()),
        Some(actor.to_audit_actor()),
        now,
    )
    .map_err(translate_core_error)?;

    persist_transition(store, &outcome, expected, ReservationStatus::Cancelled)?;

    Ok(reservation_to_info(&outcome.reservation))
}
