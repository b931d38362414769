use coach_shared::{ContactInfo, Passenger, SelectedSeat, Trip};
use serde::Serialize;
use tracing::{debug, info};

/// Booking state carried across the whole flow.
///
/// One instance per traveller session, owned by whoever drives the flow and
/// passed by reference to each screen. Setters do not cross-check fields;
/// screens enforce stage order through `guard::require`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSession {
    trip: Option<Trip>,
    selected_seats: Vec<SelectedSeat>,
    passengers: Vec<Passenger>,
    contact: Option<ContactInfo>,
}

impl BookingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trip(&self) -> Option<&Trip> {
        self.trip.as_ref()
    }

    /// Seats in the order they were picked
    pub fn selected_seats(&self) -> &[SelectedSeat] {
        &self.selected_seats
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn contact(&self) -> Option<&ContactInfo> {
        self.contact.as_ref()
    }

    pub fn set_trip(&mut self, trip: Trip) {
        debug!("Session trip set to {}", trip.id);
        self.trip = Some(trip);
    }

    pub fn set_selected_seats(&mut self, seats: Vec<SelectedSeat>) {
        self.selected_seats = seats;
    }

    pub fn set_passengers(&mut self, passengers: Vec<Passenger>) {
        self.passengers = passengers;
    }

    pub fn set_contact(&mut self, contact: ContactInfo) {
        self.contact = Some(contact);
    }

    /// Clear every stage at once
    pub fn reset(&mut self) {
        *self = Self::default();
        info!("Booking session reset");
    }

    /// Pick a trip from the schedule list.
    ///
    /// Switching to a different trip drops the seats, passengers and contact
    /// entered for the previous one. Returns true when that happened.
    pub fn choose_trip(&mut self, trip: Trip) -> bool {
        let switched = self.trip.as_ref().is_some_and(|current| current.id != trip.id);
        if switched {
            info!("Trip changed to {}, clearing earlier selections", trip.id);
            self.selected_seats.clear();
            self.passengers.clear();
            self.contact = None;
        }
        self.set_trip(trip);
        switched
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_stage_by_stage_then_reset() {
        let mut session = BookingSession::new();
        assert!(session.is_empty());

        session.set_trip(fixtures::trip("TRIP-1001"));
        session.set_selected_seats(fixtures::selected(&[3, 4]));
        session.set_passengers(fixtures::passengers(&[3, 4]));
        session.set_contact(fixtures::contact());

        assert_eq!(session.trip().map(|t| t.id.as_str()), Some("TRIP-1001"));
        assert_eq!(session.selected_seats().len(), 2);
        assert_eq!(session.passengers().len(), 2);
        assert!(session.contact().is_some());

        session.reset();
        assert!(session.is_empty());
        assert!(session.trip().is_none());
        assert!(session.selected_seats().is_empty());
        assert!(session.passengers().is_empty());
        assert!(session.contact().is_none());
    }

    #[test]
    fn test_setters_do_not_cross_check() {
        let mut session = BookingSession::new();
        // Passengers without seats or trip are accepted as written
        session.set_passengers(fixtures::passengers(&[1, 2, 3]));
        assert_eq!(session.passengers().len(), 3);
        assert!(session.selected_seats().is_empty());
    }

    #[test]
    fn test_choose_trip_clears_downstream_only_on_switch() {
        let mut session = BookingSession::new();
        assert!(!session.choose_trip(fixtures::trip("TRIP-1001")));
        session.set_selected_seats(fixtures::selected(&[1]));
        session.set_contact(fixtures::contact());

        // Same trip again keeps the seats
        assert!(!session.choose_trip(fixtures::trip("TRIP-1001")));
        assert_eq!(session.selected_seats().len(), 1);

        assert!(session.choose_trip(fixtures::trip("TRIP-1002")));
        assert!(session.selected_seats().is_empty());
        assert!(session.contact().is_none());
        assert_eq!(session.trip().map(|t| t.id.as_str()), Some("TRIP-1002"));
    }
}
