use coach_shared::SelectedSeat;
use serde::Serialize;
use tracing::{debug, info};
use crate::layout::SeatSchema;

/// Seats one booking may hold unless configured otherwise
pub const DEFAULT_SEAT_LIMIT: usize = 4;

/// Where a seat stands for the current traveller
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatState {
    Unavailable,
    AvailableUnselected,
    AvailableSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Selected(u32),
    Deselected(u32),
    /// The seat is taken; nothing changed
    Ignored(u32),
}

/// Ordered seat selection (click order) capped at `limit` seats.
///
/// Every transition either applies fully or leaves the selection untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatSelection {
    seats: Vec<SelectedSeat>,
    limit: usize,
}

impl SeatSelection {
    pub fn new(limit: usize) -> Self {
        Self { seats: Vec::new(), limit }
    }

    /// Resume from seats already committed to the booking session
    pub fn with_seats(seats: Vec<SelectedSeat>, limit: usize) -> Self {
        Self { seats, limit }
    }

    pub fn state_of(&self, schema: &SeatSchema, number: u32) -> Option<SeatState> {
        // A seat the traveller holds stays theirs to release, whatever the map says
        if self.contains(number) {
            return Some(SeatState::AvailableSelected);
        }
        let seat = schema.seat(number)?;
        if seat.is_empty() {
            Some(SeatState::AvailableUnselected)
        } else {
            Some(SeatState::Unavailable)
        }
    }

    /// Apply a click on seat `number`.
    ///
    /// - taken seat: ignored
    /// - free seat: appended with the schema's unit price, unless the limit is reached
    /// - selected seat: removed, the others keep their order
    pub fn toggle(&mut self, schema: &SeatSchema, number: u32) -> Result<ToggleOutcome, SelectionError> {
        let state = self
            .state_of(schema, number)
            .ok_or(SelectionError::UnknownSeat(number))?;

        match state {
            SeatState::Unavailable => {
                debug!("Seat {} is taken, toggle ignored", number);
                Ok(ToggleOutcome::Ignored(number))
            }
            SeatState::AvailableSelected => {
                self.seats.retain(|s| s.number() != number);
                debug!("Seat {} released ({} selected)", number, self.seats.len());
                Ok(ToggleOutcome::Deselected(number))
            }
            SeatState::AvailableUnselected => {
                if self.seats.len() >= self.limit {
                    info!("Seat {} rejected, limit of {} seats reached", number, self.limit);
                    return Err(SelectionError::LimitReached { limit: self.limit });
                }
                let seat = schema
                    .seat(number)
                    .cloned()
                    .ok_or(SelectionError::UnknownSeat(number))?;
                self.seats.push(SelectedSeat::new(seat, schema.unit_price));
                debug!("Seat {} selected ({} selected)", number, self.seats.len());
                Ok(ToggleOutcome::Selected(number))
            }
        }
    }

    pub fn contains(&self, number: u32) -> bool {
        self.seats.iter().any(|s| s.number() == number)
    }

    pub fn seats(&self) -> &[SelectedSeat] {
        &self.seats
    }

    pub fn numbers(&self) -> Vec<u32> {
        self.seats.iter().map(SelectedSeat::number).collect()
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The continue action exists only while at least one seat is held
    pub fn can_continue(&self) -> bool {
        !self.seats.is_empty()
    }

    pub fn into_seats(self) -> Vec<SelectedSeat> {
        self.seats
    }
}

impl Default for SeatSelection {
    fn default() -> Self {
        Self::new(DEFAULT_SEAT_LIMIT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("At most {limit} seats can be selected")]
    LimitReached {
        limit: usize,
    },

    #[error("Seat {0} does not exist on this trip")]
    UnknownSeat(u32),
}
