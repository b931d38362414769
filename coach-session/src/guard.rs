use serde::Serialize;
use std::fmt;
use tracing::info;
use crate::store::BookingSession;

/// Where a screen sends the traveller when its prerequisites are missing
pub const START_ROUTE: &str = "/";

/// Screens that depend on earlier stages of the flow
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    SeatSelection,
    PassengerEntry,
    Review,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionField {
    Trip,
    SelectedSeats,
    Contact,
}

impl Stage {
    /// Session fields that must be present before the screen may render
    pub fn requirements(self) -> &'static [SessionField] {
        match self {
            Stage::SeatSelection => &[SessionField::Trip],
            Stage::PassengerEntry => &[SessionField::Trip, SessionField::SelectedSeats],
            Stage::Review => &[SessionField::Trip, SessionField::SelectedSeats, SessionField::Contact],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::SeatSelection => "seat selection",
            Stage::PassengerEntry => "passenger entry",
            Stage::Review => "review",
        };
        f.write_str(name)
    }
}

impl fmt::Display for SessionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionField::Trip => "trip",
            SessionField::SelectedSeats => "selected seats",
            SessionField::Contact => "contact",
        };
        f.write_str(name)
    }
}

/// Not an error shown to the traveller: the screen redirects to `START_ROUTE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{stage} needs {missing}, redirecting to start")]
pub struct MissingPriorState {
    pub stage: Stage,
    pub missing: SessionField,
}

impl MissingPriorState {
    pub fn redirect_to(&self) -> &'static str {
        START_ROUTE
    }
}

fn is_present(session: &BookingSession, field: SessionField) -> bool {
    match field {
        SessionField::Trip => session.trip().is_some(),
        SessionField::SelectedSeats => !session.selected_seats().is_empty(),
        SessionField::Contact => session.contact().is_some(),
    }
}

/// Entry check for `stage`. Run it every time the screen is entered.
pub fn require(stage: Stage, session: &BookingSession) -> Result<(), MissingPriorState> {
    match stage.requirements().iter().find(|f| !is_present(session, **f)) {
        Some(&missing) => {
            info!("Entering {} without {}", stage, missing);
            Err(MissingPriorState { stage, missing })
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_empty_session_fails_every_stage_on_trip() {
        let session = BookingSession::new();
        for stage in [Stage::SeatSelection, Stage::PassengerEntry, Stage::Review] {
            let err = require(stage, &session).unwrap_err();
            assert_eq!(err.missing, SessionField::Trip);
            assert_eq!(err.redirect_to(), "/");
        }
    }

    #[test]
    fn test_passenger_entry_without_seats_redirects() {
        let mut session = BookingSession::new();
        session.set_trip(fixtures::trip("TRIP-1001"));

        assert!(require(Stage::SeatSelection, &session).is_ok());
        assert_eq!(
            require(Stage::PassengerEntry, &session),
            Err(MissingPriorState { stage: Stage::PassengerEntry, missing: SessionField::SelectedSeats })
        );
    }

    #[test]
    fn test_review_needs_contact() {
        let mut session = BookingSession::new();
        session.set_trip(fixtures::trip("TRIP-1001"));
        session.set_selected_seats(fixtures::selected(&[1]));

        assert!(require(Stage::PassengerEntry, &session).is_ok());
        let err = require(Stage::Review, &session).unwrap_err();
        assert_eq!(err.missing, SessionField::Contact);
        assert_eq!(err.to_string(), "review needs contact, redirecting to start");

        session.set_contact(fixtures::contact());
        assert!(require(Stage::Review, &session).is_ok());
    }
}
