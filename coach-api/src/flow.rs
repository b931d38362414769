use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use coach_session::{
    CheckoutError, Confirmation, PassengerDraft, PassengerEntry, Review, ReviewSummary, SeatMapView, SeatSelectionScreen,
};
use coach_shared::{ContactInfo, Passenger, Trip};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChosenTrip {
    pub trip_id: String,
    /// Seats, passengers and contact of a previous trip were dropped
    pub cleared: bool,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub seat: u32,
}

#[derive(Debug, Deserialize)]
pub struct PassengerForm {
    pub passengers: Vec<Passenger>,
    pub contact: ContactInfo,
}

// ============================================================================
// Session
// ============================================================================

pub async fn choose_trip(State(state): State<AppState>, Json(trip): Json<Trip>) -> Json<ChosenTrip> {
    let mut flow = state.flow.lock().await;
    let trip_id = trip.id.clone();

    let cleared = flow.session.choose_trip(trip);
    if flow.seat_screen.as_ref().is_some_and(|s| s.trip_id() != trip_id) || cleared {
        flow.leave_seat_selection();
    }

    Json(ChosenTrip { trip_id, cleared })
}

pub async fn reset_session(State(state): State<AppState>) -> StatusCode {
    let mut flow = state.flow.lock().await;
    flow.session.reset();
    flow.checkout.abandon();
    flow.leave_seat_selection();
    StatusCode::NO_CONTENT
}

// ============================================================================
// Seat selection
// ============================================================================

/// Enter seat selection. The seat map is fetched on first entry for a trip
/// and reused afterwards.
pub async fn enter_seats(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<SeatMapView>, AppError> {
    let key = {
        let mut guard = state.flow.lock().await;
        let flow = &mut *guard;
        SeatSelectionScreen::enter(&flow.session, &trip_id)?;

        if let Some(screen) = flow.seat_screen.as_ref().filter(|s| s.trip_id() == trip_id) {
            return Ok(Json(screen.view(&flow.session, flow.checkout.pricing())));
        }
        flow.seat_request.begin(trip_id)
    };

    // Lock released while the gateway answers
    let loaded = SeatSelectionScreen::load(state.gateway.as_ref(), &key).await;

    let mut guard = state.flow.lock().await;
    let flow = &mut *guard;
    let Some(loaded) = flow.seat_request.resolve(&key, loaded) else {
        return Err(AppError::ConflictError(format!("Seat map for {} is no longer wanted", key)));
    };
    let schema = loaded?;
    SeatSelectionScreen::enter(&flow.session, &key)?;

    let screen = SeatSelectionScreen::new(schema, state.business_rules.max_seats_per_booking);
    let view = screen.view(&flow.session, flow.checkout.pricing());
    flow.seat_screen = Some(screen);
    Ok(Json(view))
}

pub async fn toggle_seat(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<SeatMapView>, AppError> {
    let mut guard = state.flow.lock().await;
    let flow = &mut *guard;
    SeatSelectionScreen::enter(&flow.session, &trip_id)?;

    let Some(screen) = flow.seat_screen.as_ref().filter(|s| s.trip_id() == trip_id) else {
        return Err(AppError::ConflictError(format!("Seat map for {} is not loaded", trip_id)));
    };

    let outcome = screen.toggle(&mut flow.session, request.seat)?;
    debug!("Seat toggle on {}: {:?}", trip_id, outcome);
    Ok(Json(screen.view(&flow.session, flow.checkout.pricing())))
}

// ============================================================================
// Passengers and review
// ============================================================================

pub async fn enter_passengers(State(state): State<AppState>) -> Result<Json<Vec<PassengerDraft>>, AppError> {
    let flow = state.flow.lock().await;
    Ok(Json(PassengerEntry::enter(&flow.session)?))
}

pub async fn submit_passengers(
    State(state): State<AppState>,
    Json(form): Json<PassengerForm>,
) -> Result<StatusCode, AppError> {
    let mut flow = state.flow.lock().await;
    PassengerEntry::submit(&mut flow.session, form.passengers, form.contact)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn review(State(state): State<AppState>) -> Result<Json<ReviewSummary>, AppError> {
    let flow = state.flow.lock().await;
    Ok(Json(Review::enter(&flow.session, flow.checkout.pricing())?))
}

/// Submit the booking. A second confirm while the first is in flight is
/// rejected with 409.
///
/// The submission runs on its own task so it settles even when the client
/// hangs up mid-request.
pub async fn confirm(State(state): State<AppState>) -> Result<(StatusCode, Json<Confirmation>), AppError> {
    let pending = {
        let mut guard = state.flow.lock().await;
        let flow = &mut *guard;
        flow.checkout.begin(&flow.session)?
    };

    let submission = tokio::spawn(async move {
        let outcome = state.gateway.submit_booking(&pending.request).await;

        let mut guard = state.flow.lock().await;
        let flow = &mut *guard;
        // Traveller may have reset or picked another trip meanwhile
        let current = pending.matches(&flow.session);
        let confirmation = flow.checkout.finish(&mut flow.session, pending, outcome)?;
        if current {
            flow.leave_seat_selection();
        }
        Ok::<_, CheckoutError>(confirmation)
    });

    let confirmation = submission
        .await
        .map_err(|e| AppError::InternalServerError(format!("Booking submission task failed: {}", e)))??;

    info!("Booking {} completed", confirmation.pnr);
    Ok((StatusCode::CREATED, Json(confirmation)))
}
