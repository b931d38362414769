use chrono::{DateTime, Utc};
use coach_core::{BookingGateway, GatewayError};
use coach_seating::{CheckoutPricing, PriceBreakdown};
use coach_shared::{BookingRequest, BookingResponse, SelectedSeat, Trip};
use serde::Serialize;
use tracing::{error, info, warn};
use crate::guard::{self, MissingPriorState, SessionField, Stage};
use crate::store::BookingSession;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Booking could not be sent: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Booking rejected: {message}")]
    Rejected { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    #[error(transparent)]
    MissingPriorState(#[from] MissingPriorState),

    #[error("A booking is already being submitted")]
    Pending,

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

/// Snapshot of the session taken when the traveller confirms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    /// Token handed out by `begin`; only the matching `finish` clears pending
    pub id: u64,
    pub request: BookingRequest,
    pub trip: Trip,
    pub seats: Vec<SelectedSeat>,
}

impl PendingSubmission {
    /// Whether the session still holds the trip and seats that were sent
    pub fn matches(&self, session: &BookingSession) -> bool {
        session.trip().is_some_and(|trip| trip.id == self.trip.id)
            && session.selected_seats().iter().map(SelectedSeat::number).eq(self.request.seats.iter().copied())
    }
}

/// What the success screen shows. The session is already empty by then.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub pnr: String,
    pub trip: Trip,
    pub seats: Vec<u32>,
    pub pricing: PriceBreakdown,
    pub confirmed_at: DateTime<Utc>,
}

/// Review-screen confirmation.
///
/// Submission is split into `begin` and `finish` so a caller can release the
/// session while the request is in flight. While pending, further `begin`
/// calls fail with `CheckoutError::Pending` until the submission is finished
/// or abandoned.
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    pending: Option<u64>,
    next_id: u64,
    pricing: CheckoutPricing,
}

impl Checkout {
    pub fn new(pricing: CheckoutPricing) -> Self {
        Self { pending: None, next_id: 0, pricing }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Stop waiting for the submission in flight. Its eventual `finish`
    /// no longer touches the pending flag.
    pub fn abandon(&mut self) {
        if let Some(id) = self.pending.take() {
            info!("Submission {} abandoned", id);
        }
    }

    pub fn pricing(&self) -> &CheckoutPricing {
        &self.pricing
    }

    pub fn begin(&mut self, session: &BookingSession) -> Result<PendingSubmission, CheckoutError> {
        if self.pending.is_some() {
            warn!("Confirm pressed while a booking is in flight");
            return Err(CheckoutError::Pending);
        }
        guard::require(Stage::Review, session)?;

        let (Some(trip), Some(contact)) = (session.trip(), session.contact()) else {
            return Err(MissingPriorState { stage: Stage::Review, missing: SessionField::Contact }.into());
        };

        let seats = session.selected_seats().to_vec();
        let request = BookingRequest {
            trip_id: trip.id.clone(),
            seats: seats.iter().map(SelectedSeat::number).collect(),
            contact: contact.clone(),
            passengers: session.passengers().to_vec(),
        };

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.pending = Some(id);
        info!("Submitting booking {} for trip {} ({} seats)", id, trip.id, seats.len());
        Ok(PendingSubmission { id, request, trip: trip.clone(), seats })
    }

    /// Settle a submission started by `begin`.
    ///
    /// Success resets the session, unless the traveller moved on to another
    /// trip or seat set meanwhile. Any failure leaves it exactly as it was so
    /// the traveller can retry.
    pub fn finish(
        &mut self,
        session: &mut BookingSession,
        pending: PendingSubmission,
        outcome: Result<BookingResponse, GatewayError>,
    ) -> Result<Confirmation, CheckoutError> {
        if self.pending == Some(pending.id) {
            self.pending = None;
        }

        let response = outcome.map_err(|e| {
            error!("Booking for trip {} failed: {}", pending.trip.id, e);
            SubmissionError::Gateway(e)
        })?;

        if !response.ok {
            warn!("Booking for trip {} rejected: {}", pending.trip.id, response.message);
            return Err(SubmissionError::Rejected { message: response.message }.into());
        }

        let current = pending.matches(session);
        let confirmation = Confirmation {
            pnr: response.pnr,
            pricing: self.pricing.breakdown(&pending.seats),
            seats: pending.request.seats,
            trip: pending.trip,
            confirmed_at: Utc::now(),
        };
        info!("Booking confirmed, PNR {}", confirmation.pnr);
        if current {
            session.reset();
        } else {
            info!("Session moved on during submission {}, keeping it", pending.id);
        }
        Ok(confirmation)
    }

    /// `begin`, submit and `finish` in one call
    pub async fn confirm(
        &mut self,
        session: &mut BookingSession,
        gateway: &dyn BookingGateway,
    ) -> Result<Confirmation, CheckoutError> {
        let pending = self.begin(session)?;
        let outcome = gateway.submit_booking(&pending.request).await;
        self.finish(session, pending, outcome)
    }
}
