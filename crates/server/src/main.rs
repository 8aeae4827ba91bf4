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

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::Mutex;
use tracing::{error, info};

use seatwise_api::{
    AllReservationsRequest, ApiError, AuthenticatedActor, CancelReservationRequest,
    CreateReservationRequest, ListOptions, Page, ReservationInfo, Role, UpdateReservationRequest,
    UpdateStatusRequest, cancel_reservation, create_reservation, get_reservation,
    list_all_reservations, list_reservations_between, list_today_reservations,
    list_user_reservations, update_reservation, update_reservation_status,
};
use seatwise_persistence::ReservationStore;

/// Upper bound on any single store call; an elapsed timeout surfaces as a
/// 503 instead of a hung request.
const STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Seatwise Server - HTTP server for the Seatwise Reservation System
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the reservation store wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The store holding reservations and their status history.
    store: Arc<Mutex<ReservationStore>>,
}

/// API request for creating a reservation.
///
/// This includes actor identity in addition to the reservation data.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateReservationApiRequest {
    /// The id of the actor performing this action.
    actor_id: i64,
    /// The role of the actor.
    actor_role: String,
    /// Name of the arriving guest.
    guest_name: String,
    /// Contact phone number.
    phone_number: String,
    /// Contact email address.
    email: String,
    /// Requested arrival time (RFC 3339).
    arrival_time: String,
    /// Number of people at the table.
    table_size: u8,
    /// Optional free-text requests.
    special_requests: Option<String>,
}

/// API request for editing a reservation's details.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateReservationApiRequest {
    /// The id of the actor performing this action.
    actor_id: i64,
    /// The role of the actor.
    actor_role: String,
    /// New guest name, if changing.
    guest_name: Option<String>,
    /// New phone number, if changing.
    phone_number: Option<String>,
    /// New email address, if changing.
    email: Option<String>,
    /// New arrival time (RFC 3339), if changing.
    arrival_time: Option<String>,
    /// New table size, if changing.
    table_size: Option<u8>,
    /// New special requests text; an empty string clears the field.
    special_requests: Option<String>,
}

/// API request for a staff status change.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateStatusApiRequest {
    /// The id of the actor performing this action.
    actor_id: i64,
    /// The role of the actor.
    actor_role: String,
    /// The target status: `Approved`, `Cancelled`, or `Completed`.
    status: String,
    /// The reason for the change; required when cancelling.
    reason: Option<String>,
}

/// API request for an owner cancellation.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CancelReservationApiRequest {
    /// The id of the actor performing this action.
    actor_id: i64,
    /// The role of the actor.
    actor_role: String,
    /// The cancellation reason.
    reason: String,
}

/// Query parameters identifying the acting user on read endpoints.
#[derive(Debug, Deserialize)]
struct ActorQuery {
    /// The id of the actor performing this action.
    actor_id: i64,
    /// The role of the actor.
    actor_role: String,
}

/// Query parameters for listing the acting user's reservations.
#[derive(Debug, Deserialize)]
struct ListQuery {
    /// The id of the actor performing this action.
    actor_id: i64,
    /// The role of the actor.
    actor_role: String,
    /// 1-based page number.
    page: Option<u32>,
    /// Page size.
    limit: Option<u32>,
    /// Restrict to a status.
    status: Option<String>,
    /// Sort column: `arrival_time` or `created_at`.
    sort_by: Option<String>,
    /// Sort direction: `asc` or `desc`.
    sort_order: Option<String>,
}

/// Query parameters for the admin listing of all reservations.
#[derive(Debug, Deserialize)]
struct AllReservationsQuery {
    /// The id of the actor performing this action.
    actor_id: i64,
    /// The role of the actor.
    actor_role: String,
    /// 1-based page number.
    page: Option<u32>,
    /// Page size.
    limit: Option<u32>,
    /// Restrict to a status.
    status: Option<String>,
    /// Restrict to reservations owned by this user.
    user_id: Option<i64>,
    /// Case-insensitive substring match over guest name and email.
    search: Option<String>,
    /// Keep reservations arriving at or after this instant (RFC 3339).
    start_date: Option<String>,
    /// Keep reservations arriving strictly before this instant (RFC 3339).
    end_date: Option<String>,
    /// Sort column: `arrival_time` or `created_at`.
    sort_by: Option<String>,
    /// Sort direction: `asc` or `desc`.
    sort_order: Option<String>,
}

/// Query parameters for the today listing.
#[derive(Debug, Deserialize)]
struct TodayQuery {
    /// Restrict to a status.
    status: Option<String>,
}

/// Query parameters for the date-range listing.
#[derive(Debug, Deserialize)]
struct RangeQuery {
    /// Start of the range (RFC 3339, inclusive).
    start_date: String,
    /// End of the range (RFC 3339, exclusive).
    end_date: String,
    /// Restrict to a status.
    status: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput { .. } | ApiError::InvalidQuery { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::SchedulingConflict { .. } => StatusCode::CONFLICT,
            ApiError::InvalidStateTransition { .. } | ApiError::MissingReason => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Parses an actor id and role string into an authenticated actor.
fn parse_actor(actor_id: i64, role_str: &str) -> Result<AuthenticatedActor, HttpError> {
    let role: Role = Role::from_str(role_str).map_err(|e| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: e.to_string(),
    })?;
    Ok(AuthenticatedActor::new(actor_id, role))
}

/// Parses an RFC 3339 datetime string.
fn parse_datetime(value: &str, field: &str) -> Result<OffsetDateTime, HttpError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: format!("Invalid RFC 3339 datetime for '{field}': {e}"),
    })
}

/// Runs a store operation under the store mutex, bounded by
/// [`STORE_TIMEOUT`]. An elapsed timeout becomes a 503, never a hung
/// request.
async fn with_store<T, F>(state: &AppState, operation: F) -> Result<T, HttpError>
where
    F: FnOnce(&mut ReservationStore) -> Result<T, ApiError>,
{
    let outcome = tokio::time::timeout(STORE_TIMEOUT, async {
        let mut store = state.store.lock().await;
        operation(&mut store)
    })
    .await;

    match outcome {
        Ok(result) => result.map_err(HttpError::from),
        Err(_) => {
            error!("Store call exceeded {STORE_TIMEOUT:?}");
            Err(HttpError::from(ApiError::StoreUnavailable {
                message: format!("Store call timed out after {STORE_TIMEOUT:?}"),
            }))
        }
    }
}

/// Handler for POST `/reservations`.
///
/// Creates a reservation for the acting user.
async fn handle_create_reservation(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateReservationApiRequest>,
) -> Result<(StatusCode, Json<ReservationInfo>), HttpError> {
    info!(
        actor_id = req.actor_id,
        role = %req.actor_role,
        "Handling create_reservation request"
    );

    let actor: AuthenticatedActor = parse_actor(req.actor_id, &req.actor_role)?;
    let arrival_time: OffsetDateTime = parse_datetime(&req.arrival_time, "arrival_time")?;

    let request: CreateReservationRequest = CreateReservationRequest {
        guest_name: req.guest_name,
        phone_number: req.phone_number,
        email: req.email,
        arrival_time,
        table_size: req.table_size,
        special_requests: req.special_requests,
    };

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let info: ReservationInfo =
        with_store(&app_state, move |store| {
            create_reservation(store, &actor, request, now)
        })
        .await?;

    info!(
        reservation_id = info.reservation_id,
        "Successfully created reservation"
    );

    Ok((StatusCode::CREATED, Json(info)))
}

/// Handler for GET `/reservations/{id}`.
async fn handle_get_reservation(
    AxumState(app_state): AxumState<AppState>,
    Path(reservation_id): Path<i64>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<ReservationInfo>, HttpError> {
    let actor: AuthenticatedActor = parse_actor(query.actor_id, &query.actor_role)?;

    let info: ReservationInfo = with_store(&app_state, move |store| {
        get_reservation(store, &actor, reservation_id)
    })
    .await?;

    Ok(Json(info))
}

/// Handler for GET `/reservations/mine`.
///
/// Lists the acting user's reservations, paginated.
async fn handle_list_user_reservations(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<ReservationInfo>>, HttpError> {
    let actor: AuthenticatedActor = parse_actor(query.actor_id, &query.actor_role)?;
    let options: ListOptions = ListOptions {
        page: query.page,
        limit: query.limit,
        status: query.status,
        sort_by: query.sort_by,
        sort_order: query.sort_order,
    };

    let page: Page<ReservationInfo> = with_store(&app_state, move |store| {
        list_user_reservations(store, &actor, options)
    })
    .await?;

    Ok(Json(page))
}

/// Handler for GET `/reservations`.
///
/// Lists all reservations with admin filters, paginated.
async fn handle_list_all_reservations(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<AllReservationsQuery>,
) -> Result<Json<Page<ReservationInfo>>, HttpError> {
    let actor: AuthenticatedActor = parse_actor(query.actor_id, &query.actor_role)?;

    let start_date: Option<OffsetDateTime> = query
        .start_date
        .as_deref()
        .map(|value| parse_datetime(value, "start_date"))
        .transpose()?;
    let end_date: Option<OffsetDateTime> = query
        .end_date
        .as_deref()
        .map(|value| parse_datetime(value, "end_date"))
        .transpose()?;

    let request: AllReservationsRequest = AllReservationsRequest {
        options: ListOptions {
            page: query.page,
            limit: query.limit,
            status: query.status,
            sort_by: query.sort_by,
            sort_order: query.sort_order,
        },
        user_id: query.user_id,
        search: query.search,
        start_date,
        end_date,
    };

    let page: Page<ReservationInfo> = with_store(&app_state, move |store| {
        list_all_reservations(store, &actor, request)
    })
    .await?;

    Ok(Json(page))
}

/// Handler for GET `/reservations/today`.
async fn handle_list_today_reservations(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<TodayQuery>,
) -> Result<Json<Vec<ReservationInfo>>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();

    let items: Vec<ReservationInfo> = with_store(&app_state, move |store| {
        list_today_reservations(store, query.status.as_deref(), now)
    })
    .await?;

    Ok(Json(items))
}

/// Handler for GET `/reservations/range`.
///
/// Lists reservations arriving within a date range.
async fn handle_list_reservations_range(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<ReservationInfo>>, HttpError> {
    let from: OffsetDateTime = parse_datetime(&query.start_date, "start_date")?;
    let to: OffsetDateTime = parse_datetime(&query.end_date, "end_date")?;

    let items: Vec<ReservationInfo> = with_store(&app_state, move |store| {
        list_reservations_between(store, from, to, query.status.as_deref())
    })
    .await?;

    Ok(Json(items))
}

/// Handler for PATCH `/reservations/{id}`.
///
/// Edits a reservation's details (owner only).
async fn handle_update_reservation(
    AxumState(app_state): AxumState<AppState>,
    Path(reservation_id): Path<i64>,
    Json(req): Json<UpdateReservationApiRequest>,
) -> Result<Json<ReservationInfo>, HttpError> {
    info!(
        actor_id = req.actor_id,
        reservation_id, "Handling update_reservation request"
    );

    let actor: AuthenticatedActor = parse_actor(req.actor_id, &req.actor_role)?;
    let arrival_time: Option<OffsetDateTime> = req
        .arrival_time
        .as_deref()
        .map(|value| parse_datetime(value, "arrival_time"))
        .transpose()?;

    let request: UpdateReservationRequest = UpdateReservationRequest {
        guest_name: req.guest_name,
        phone_number: req.phone_number,
        email: req.email,
        arrival_time,
        table_size: req.table_size,
        special_requests: req.special_requests,
    };

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let info: ReservationInfo = with_store(&app_state, move |store| {
        update_reservation(store, &actor, reservation_id, request, now)
    })
    .await?;

    Ok(Json(info))
}

/// Handler for POST `/reservations/{id}/status`.
///
/// Moves a reservation to a new status (staff operation).
async fn handle_update_reservation_status(
    AxumState(app_state): AxumState<AppState>,
    Path(reservation_id): Path<i64>,
    Json(req): Json<UpdateStatusApiRequest>,
) -> Result<Json<ReservationInfo>, HttpError> {
    info!(
        actor_id = req.actor_id,
        reservation_id,
        status = %req.status,
        "Handling update_reservation_status request"
    );

    let actor: AuthenticatedActor = parse_actor(req.actor_id, &req.actor_role)?;
    let request: UpdateStatusRequest = UpdateStatusRequest {
        status: req.status,
        reason: req.reason,
    };

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let info: ReservationInfo = with_store(&app_state, move |store| {
        update_reservation_status(store, &actor, reservation_id, request, now)
    })
    .await?;

    Ok(Json(info))
}

/// Handler for POST `/reservations/{id}/cancel`.
///
/// Cancels a reservation (owner operation).
async fn handle_cancel_reservation(
    AxumState(app_state): AxumState<AppState>,
    Path(reservation_id): Path<i64>,
    Json(req): Json<CancelReservationApiRequest>,
) -> Result<Json<ReservationInfo>, HttpError> {
    info!(
        actor_id = req.actor_id,
        reservation_id, "Handling cancel_reservation request"
    );

    let actor: AuthenticatedActor = parse_actor(req.actor_id, &req.actor_role)?;
    let request: CancelReservationRequest = CancelReservationRequest { reason: req.reason };

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let info: ReservationInfo = with_store(&app_state, move |store| {
        cancel_reservation(store, &actor, reservation_id, request, now)
    })
    .await?;

    Ok(Json(info))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/reservations", post(handle_create_reservation))
        .route("/reservations", get(handle_list_all_reservations))
        .route("/reservations/mine", get(handle_list_user_reservations))
        .route("/reservations/today", get(handle_list_today_reservations))
        .route("/reservations/range", get(handle_list_reservations_range))
        .route("/reservations/{id}", get(handle_get_reservation))
        .route("/reservations/{id}", patch(handle_update_reservation))
        .route(
            "/reservations/{id}/status",
            post(handle_update_reservation_status),
        )
        .route(
            "/reservations/{id}/cancel",
            post(handle_cancel_reservation),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Seatwise Server");

    // Initialize the store (in-memory or file-based based on CLI argument)
    let store: ReservationStore = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        ReservationStore::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        ReservationStore::new_in_memory()?
    };

    let app_state: AppState = AppState {
        store: Arc::new(Mutex::new(store)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
