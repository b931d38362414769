use coach_core::{BookingGateway, GatewayError};
use coach_seating::{
    suggest_companions, CheckoutPricing, PriceBreakdown, RenderCell, SchemaError, SeatSchema, SeatSelection,
    SelectionError, ToggleOutcome,
};
use coach_shared::{ContactInfo, Passenger, Trip};
use serde::Serialize;
use tracing::{info, warn};
use crate::guard::{self, MissingPriorState, SessionField, Stage};
use crate::store::BookingSession;

// ============================================================================
// Seat selection
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("Seat map could not be fetched: {0}")]
    Network(#[from] GatewayError),

    #[error("Seat map is malformed: {0}")]
    Malformed(#[from] SchemaError),

    #[error("Asked for the seat map of {requested}, received {received}")]
    TripMismatch {
        requested: String,
        received: String,
    },
}

/// What the seat selection screen shows after every change
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeatMapView {
    pub trip_id: String,
    pub cells: Vec<Vec<RenderCell>>,
    pub selected: Vec<u32>,
    pub suggestions: Vec<u32>,
    pub total: i32,
    pub currency: String,
    pub limit: usize,
    pub can_continue: bool,
}

/// Seat selection for one trip. Holds the schema fetched on entry; the
/// selection itself lives in the session.
#[derive(Debug, Clone)]
pub struct SeatSelectionScreen {
    schema: SeatSchema,
    limit: usize,
}

impl SeatSelectionScreen {
    /// Entry check: the session must hold the trip this screen is for
    pub fn enter(session: &BookingSession, trip_id: &str) -> Result<(), MissingPriorState> {
        guard::require(Stage::SeatSelection, session)?;
        let held = session.trip().map(|t| t.id.as_str());
        if held != Some(trip_id) {
            info!("Seat selection for {} entered while session holds {:?}", trip_id, held);
            return Err(MissingPriorState { stage: Stage::SeatSelection, missing: SessionField::Trip });
        }
        Ok(())
    }

    /// Fetch and validate the seat map. Nothing partial is ever returned.
    pub async fn load(gateway: &dyn BookingGateway, trip_id: &str) -> Result<SeatSchema, LoadError> {
        let payload = gateway.fetch_seat_schema(trip_id).await.map_err(|e| {
            warn!("Seat map fetch for {} failed: {}", trip_id, e);
            LoadError::Network(e)
        })?;

        if payload.trip_id != trip_id {
            warn!("Seat map for {} came back as {}", trip_id, payload.trip_id);
            return Err(LoadError::TripMismatch {
                requested: trip_id.to_string(),
                received: payload.trip_id,
            });
        }

        let schema = SeatSchema::from_payload(payload)?;
        info!(
            "Seat map for {} loaded: {} seats, {} free, unit price {}",
            trip_id,
            schema.seats.len(),
            schema.empty_seat_count(),
            schema.unit_price
        );
        Ok(schema)
    }

    pub fn new(schema: SeatSchema, limit: usize) -> Self {
        Self { schema, limit }
    }

    pub fn trip_id(&self) -> &str {
        &self.schema.trip_id
    }

    pub fn schema(&self) -> &SeatSchema {
        &self.schema
    }

    fn selection(&self, session: &BookingSession) -> SeatSelection {
        SeatSelection::with_seats(session.selected_seats().to_vec(), self.limit)
    }

    /// Toggle a seat and write the resulting selection back to the session.
    /// On error the session is untouched.
    pub fn toggle(&self, session: &mut BookingSession, number: u32) -> Result<ToggleOutcome, SelectionError> {
        let mut selection = self.selection(session);
        let outcome = selection.toggle(&self.schema, number)?;
        if !matches!(outcome, ToggleOutcome::Ignored(_)) {
            session.set_selected_seats(selection.into_seats());
        }
        Ok(outcome)
    }

    pub fn suggestions(&self, session: &BookingSession) -> Vec<u32> {
        suggest_companions(session.selected_seats(), &self.schema)
    }

    /// Next screen, or `None` while the continue action is disabled
    pub fn continue_action(&self, session: &BookingSession) -> Option<Stage> {
        self.selection(session).can_continue().then_some(Stage::PassengerEntry)
    }

    pub fn view(&self, session: &BookingSession, pricing: &CheckoutPricing) -> SeatMapView {
        let selection = self.selection(session);
        let selected = selection.numbers();
        let suggestions = self.suggestions(session);

        SeatMapView {
            trip_id: self.schema.trip_id.clone(),
            cells: self.schema.render(&selected, &suggestions),
            total: pricing.breakdown(selection.seats()).total,
            currency: pricing.currency().to_string(),
            limit: selection.limit(),
            can_continue: selection.can_continue(),
            selected,
            suggestions,
        }
    }
}

// ============================================================================
// Passenger entry
// ============================================================================

/// One empty passenger form, pre-bound to a seat
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PassengerDraft {
    pub seat: u32,
    pub unit_price: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PassengerError {
    #[error(transparent)]
    MissingPriorState(#[from] MissingPriorState),

    #[error("Expected {expected} passengers, got {actual}")]
    CountMismatch {
        expected: usize,
        actual: usize,
    },

    #[error("Passenger {position} is for seat {actual}, expected seat {expected}")]
    SeatMismatch {
        position: usize,
        expected: u32,
        actual: u32,
    },
}

pub struct PassengerEntry;

impl PassengerEntry {
    /// One draft per selected seat, in selection order
    pub fn enter(session: &BookingSession) -> Result<Vec<PassengerDraft>, MissingPriorState> {
        guard::require(Stage::PassengerEntry, session)?;
        Ok(session
            .selected_seats()
            .iter()
            .map(|s| PassengerDraft { seat: s.number(), unit_price: s.unit_price })
            .collect())
    }

    /// Store passengers and contact, but only if they pair one-to-one, in
    /// order, with the selected seats
    pub fn submit(
        session: &mut BookingSession,
        passengers: Vec<Passenger>,
        contact: ContactInfo,
    ) -> Result<(), PassengerError> {
        guard::require(Stage::PassengerEntry, session)?;

        let seats = session.selected_seats();
        if passengers.len() != seats.len() {
            return Err(PassengerError::CountMismatch { expected: seats.len(), actual: passengers.len() });
        }
        for (position, (passenger, seat)) in passengers.iter().zip(seats).enumerate() {
            if passenger.seat != seat.number() {
                return Err(PassengerError::SeatMismatch {
                    position: position + 1,
                    expected: seat.number(),
                    actual: passenger.seat,
                });
            }
        }

        info!("{} passengers recorded", passengers.len());
        session.set_passengers(passengers);
        session.set_contact(contact);
        Ok(())
    }
}

// ============================================================================
// Review
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLine {
    #[serde(flatten)]
    pub passenger: Passenger,
    /// Price of the passenger's seat; `None` if the seat is no longer selected
    pub unit_price: Option<i32>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub trip: Trip,
    pub passengers: Vec<ReviewLine>,
    pub contact: ContactInfo,
    pub pricing: PriceBreakdown,
}

pub struct Review;

impl Review {
    pub fn enter(session: &BookingSession, pricing: &CheckoutPricing) -> Result<ReviewSummary, MissingPriorState> {
        guard::require(Stage::Review, session)?;

        let (Some(trip), Some(contact)) = (session.trip(), session.contact()) else {
            // require() already checked both
            return Err(MissingPriorState { stage: Stage::Review, missing: SessionField::Trip });
        };

        let seats = session.selected_seats();
        let passengers = session
            .passengers()
            .iter()
            .map(|p| ReviewLine {
                passenger: p.clone(),
                unit_price: seats.iter().find(|s| s.number() == p.seat).map(|s| s.unit_price),
            })
            .collect();

        Ok(ReviewSummary {
            trip: trip.clone(),
            passengers,
            contact: contact.clone(),
            pricing: pricing.breakdown(seats),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, FakeGateway};
    use coach_seating::SeatDisplay;

    fn screen() -> SeatSelectionScreen {
        let schema = SeatSchema::from_payload(fixtures::schema_payload("TRIP-1001", vec![vec![0, 0, 2, 0, 0]])).unwrap();
        SeatSelectionScreen::new(schema, 4)
    }

    fn session_with_trip() -> BookingSession {
        let mut session = BookingSession::new();
        session.set_trip(fixtures::trip("TRIP-1001"));
        session
    }

    #[test]
    fn test_enter_requires_matching_trip() {
        assert!(SeatSelectionScreen::enter(&BookingSession::new(), "TRIP-1001").is_err());
        assert!(SeatSelectionScreen::enter(&session_with_trip(), "TRIP-1001").is_ok());
        assert_eq!(
            SeatSelectionScreen::enter(&session_with_trip(), "TRIP-2000"),
            Err(MissingPriorState { stage: Stage::SeatSelection, missing: SessionField::Trip })
        );
    }

    #[tokio::test]
    async fn test_load_rejects_bad_payloads() {
        let gateway = FakeGateway::default();
        gateway.put_schema(fixtures::schema_payload("TRIP-1001", vec![vec![0, 0], vec![0]]));
        let err = SeatSelectionScreen::load(&gateway, "TRIP-1001").await.unwrap_err();
        assert!(matches!(err, LoadError::Malformed(SchemaError::JaggedRow { .. })));

        gateway.put_schema(fixtures::schema_payload("TRIP-9999", vec![vec![0, 0]]));
        let err = SeatSelectionScreen::load(&gateway, "TRIP-1001").await.unwrap_err();
        assert!(matches!(err, LoadError::TripMismatch { .. }));

        gateway.fail_schema();
        let err = SeatSelectionScreen::load(&gateway, "TRIP-1001").await.unwrap_err();
        assert!(matches!(err, LoadError::Network(_)));
    }

    #[test]
    fn test_toggle_writes_into_session_and_suggests() {
        let screen = screen();
        let mut session = session_with_trip();
        assert_eq!(screen.continue_action(&session), None);

        screen.toggle(&mut session, 1).unwrap();
        assert_eq!(session.selected_seats().len(), 1);
        assert_eq!(screen.suggestions(&session), vec![2]);
        assert_eq!(screen.continue_action(&session), Some(Stage::PassengerEntry));

        let view = screen.view(&session, &CheckoutPricing::default());
        assert_eq!(view.selected, vec![1]);
        assert_eq!(view.total, 695);
        assert!(view.can_continue);
        assert_eq!(view.cells[0][1], RenderCell::Seat { number: 2, state: SeatDisplay::Suggested });

        screen.toggle(&mut session, 3).unwrap();
        assert!(screen.suggestions(&session).is_empty());
        assert_eq!(screen.view(&session, &CheckoutPricing::default()).total, 1390);
    }

    #[test]
    fn test_limit_leaves_session_unchanged() {
        let schema = SeatSchema::from_payload(fixtures::schema_payload("TRIP-1001", vec![vec![0, 0, 0, 0, 0]])).unwrap();
        let screen = SeatSelectionScreen::new(schema, 4);
        let mut session = session_with_trip();
        for n in 1..=4 {
            screen.toggle(&mut session, n).unwrap();
        }
        let before = session.clone();

        assert_eq!(screen.toggle(&mut session, 5), Err(SelectionError::LimitReached { limit: 4 }));
        assert_eq!(session, before);
    }

    #[test]
    fn test_passenger_entry_with_no_seats_redirects() {
        let session = session_with_trip();
        let err = PassengerEntry::enter(&session).unwrap_err();
        assert_eq!(err.missing, SessionField::SelectedSeats);
        assert_eq!(err.redirect_to(), "/");
    }

    #[test]
    fn test_passengers_must_follow_seat_order() {
        let mut session = session_with_trip();
        session.set_selected_seats(fixtures::selected(&[4, 1]));

        let drafts = PassengerEntry::enter(&session).unwrap();
        assert_eq!(drafts.iter().map(|d| d.seat).collect::<Vec<_>>(), vec![4, 1]);

        let err = PassengerEntry::submit(&mut session, fixtures::passengers(&[1, 4]), fixtures::contact()).unwrap_err();
        assert_eq!(err, PassengerError::SeatMismatch { position: 1, expected: 4, actual: 1 });

        let err = PassengerEntry::submit(&mut session, fixtures::passengers(&[4]), fixtures::contact()).unwrap_err();
        assert_eq!(err, PassengerError::CountMismatch { expected: 2, actual: 1 });
        assert!(session.passengers().is_empty());
        assert!(session.contact().is_none());

        PassengerEntry::submit(&mut session, fixtures::passengers(&[4, 1]), fixtures::contact()).unwrap();
        assert_eq!(session.passengers().len(), 2);
        assert!(session.contact().is_some());
    }

    #[test]
    fn test_review_lists_seat_prices() {
        let mut session = session_with_trip();
        session.set_selected_seats(fixtures::selected(&[3, 4]));
        assert!(Review::enter(&session, &CheckoutPricing::default()).is_err());

        PassengerEntry::submit(&mut session, fixtures::passengers(&[3, 4]), fixtures::contact()).unwrap();
        let summary = Review::enter(&session, &CheckoutPricing::default()).unwrap();

        assert_eq!(summary.trip.id, "TRIP-1001");
        assert_eq!(summary.passengers.len(), 2);
        assert!(summary.passengers.iter().all(|line| line.unit_price == Some(695)));
        assert_eq!(summary.pricing.total, 1390);
    }
}
