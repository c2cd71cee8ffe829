use crate::availability::{apply_blackouts, generate_availability, generate_time_slots, RandomCapacity};
use crate::backend::AppointmentBackend;
use crate::configuration::Configuration;
use crate::draft::{CustomerDetails, PickupDraft};
use crate::locations;
use crate::queue::{time_status, todays_queue, StatusFilter, TimeStatus};
use crate::types::{Appointment, AppointmentStatus};
use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_valid::Valid;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use validator::Validate;

#[derive(Clone)]
pub struct AppState<T: AppointmentBackend, C: Configuration> {
    pub backend: T,
    pub configuration: C,
}

#[derive(Debug, Clone, Deserialize)]
struct AvailabilityParams {
    start: Option<NaiveDate>,
    days: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
struct SlotsParams {
    date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
struct QueueParams {
    search: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
struct BookingRequest {
    #[validate(length(min = 1, message = "Please enter your pickup number"))]
    pickup_reference: String,
    #[validate(length(min = 1, message = "Please choose a pickup location"))]
    location_id: String,
    date: NaiveDate,
    slot_id: String,
    #[serde(flatten)]
    #[validate(nested)]
    details: CustomerDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StatusUpdateRequest {
    id: String,
    status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StaffNotesRequest {
    id: String,
    notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct QueueEntry {
    appointment: Appointment,
    time_status: TimeStatus,
}

pub fn create_app<T: AppointmentBackend, C: Configuration>(backend: T, configuration: C) -> Router {
    let state = AppState {
        backend,
        configuration,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/locations", get(get_locations))
        .route("/availability", get(get_availability::<T, C>))
        .route("/slots", get(get_slots))
        .route("/book", post(book_pickup::<T, C>));

    let staff = Router::new()
        .route("/appointments", get(get_appointments::<T, C>))
        .route("/queue", get(get_queue::<T, C>))
        .route("/status", post(update_status::<T, C>))
        .route("/staff_notes", post(update_staff_notes::<T, C>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            staff_auth::<T, C>,
        ));

    Router::new()
        .merge(public)
        .merge(staff)
        .with_state(state)
        .layer(cors)
}

async fn staff_auth<T: AppointmentBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    if let Some(auth_header) = request.headers().get("x-staff-password") {
        if auth_header.to_str().unwrap_or("") != state.configuration.staff_password() {
            return Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()));
        }
    } else {
        return Err((StatusCode::UNAUTHORIZED, "Missing credentials".to_string()));
    }
    Ok(next.run(request).await)
}

async fn get_locations() -> impl IntoResponse {
    Json(locations::seed_locations())
}

/// One generation per query: the calendar's day-level selectability and the
/// slot list a day shows both come from this single payload, so a response
/// never disagrees with itself.
async fn get_availability<T: AppointmentBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Query(params): Query<AvailabilityParams>,
) -> impl IntoResponse {
    let start = params.start.unwrap_or_else(|| Local::now().date_naive());
    let days = params
        .days
        .unwrap_or_else(|| state.configuration.booking_window_days());

    let mut availability = generate_availability(start, days, &RandomCapacity);
    apply_blackouts(&mut availability, &state.configuration.blackout_dates());
    Json(availability)
}

async fn get_slots(Query(params): Query<SlotsParams>) -> impl IntoResponse {
    Json(generate_time_slots(params.date, &RandomCapacity))
}

async fn book_pickup<T: AppointmentBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Valid(Json(request)): Valid<Json<BookingRequest>>,
) -> Result<Json<Appointment>, (StatusCode, String)> {
    if locations::find(&request.location_id).is_none() {
        return Err((StatusCode::BAD_REQUEST, "Unknown pickup location".to_string()));
    }

    let slot = generate_time_slots(request.date, &RandomCapacity)
        .into_iter()
        .find(|slot| slot.id == request.slot_id)
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                "No such time slot on the chosen date".to_string(),
            )
        })?;

    let mut draft = PickupDraft::default();
    draft.set_reference(request.pickup_reference, request.location_id);
    draft.set_date(request.date);
    draft.set_slot(slot);
    draft
        .set_details(request.details)
        .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?;

    let appointment = draft
        .commit(Local::now().naive_local())
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    info!(
        id = %appointment.id,
        reference = %appointment.pickup_reference,
        "pickup scheduled"
    );
    state.backend.add_appointment(appointment.clone());
    Ok(Json(appointment))
}

async fn get_appointments<T: AppointmentBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
) -> impl IntoResponse {
    Json(state.backend.appointments())
}

async fn get_queue<T: AppointmentBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Query(params): Query<QueueParams>,
) -> Result<Json<Vec<QueueEntry>>, (StatusCode, String)> {
    let status_filter = match params.status.as_deref() {
        None => StatusFilter::All,
        Some(value) => value
            .parse()
            .map_err(|err: String| (StatusCode::BAD_REQUEST, err))?,
    };
    let search = params.search.unwrap_or_default();

    let now = Local::now().naive_local();
    let entries = todays_queue(&state.backend.appointments(), &search, status_filter, now)
        .into_iter()
        .map(|appointment| QueueEntry {
            time_status: time_status(appointment.start_at, now),
            appointment,
        })
        .collect();
    Ok(Json(entries))
}

/// Transition legality is a property of the actions staff are offered, so it
/// is checked here; the store itself stays permissive.
async fn update_status<T: AppointmentBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Json(request): Json<StatusUpdateRequest>,
) -> impl IntoResponse {
    let current = state
        .backend
        .appointments()
        .into_iter()
        .find(|appointment| appointment.id == request.id);
    if let Some(current) = current {
        if !current.status.can_transition_to(request.status) {
            return (
                StatusCode::BAD_REQUEST,
                format!(
                    "Cannot move appointment from {:?} to {:?}",
                    current.status, request.status
                ),
            );
        }
    }

    state.backend.update_status(&request.id, request.status);
    (StatusCode::OK, "Appointment status updated".to_string())
}

async fn update_staff_notes<T: AppointmentBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Json(request): Json<StaffNotesRequest>,
) -> impl IntoResponse {
    state.backend.update_staff_notes(&request.id, request.notes);
    (StatusCode::OK, "Staff notes updated".to_string())
}
