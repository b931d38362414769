use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Empty,
    Taken,
}

/// A single seat of a trip. Identity is `number`; `row` and `column` are 1-based.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    #[serde(rename = "no")]
    pub number: u32,
    pub row: u32,
    #[serde(rename = "col")]
    pub column: u32,
    pub status: SeatStatus,
}

impl Seat {
    pub fn is_empty(&self) -> bool {
        self.status == SeatStatus::Empty
    }
}

/// A seat the traveller picked, with the price fixed at the moment of selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SelectedSeat {
    #[serde(flatten)]
    pub seat: Seat,
    pub unit_price: i32,
}

impl SelectedSeat {
    pub fn new(seat: Seat, unit_price: i32) -> Self {
        Self { seat, unit_price }
    }

    pub fn number(&self) -> u32 {
        self.seat.number
    }
}

// ============================================================================
// Wire payloads (as returned by the seat schema endpoint)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LayoutPayload {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Vec<i32>>,
}

/// Raw seat schema, not yet validated. The seating crate turns this into a `SeatSchema`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeatSchemaPayload {
    pub trip_id: String,
    pub layout: LayoutPayload,
    #[serde(default)]
    pub seats: Vec<Seat>,
    pub unit_price: i32,
}
