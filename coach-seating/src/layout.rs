use coach_shared::{Seat, SeatSchemaPayload, SeatStatus};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Cell codes used by the seat schema endpoint
pub const CODE_EMPTY_SEAT: i32 = 0;
pub const CODE_TAKEN_SEAT: i32 = 1;
pub const CODE_ROW_LABEL: i32 = 2;
pub const CODE_BLANK: i32 = 3;

/// Highest unit price a seat map may carry. Keeps any realistic seat total
/// well inside `i32`.
pub const MAX_UNIT_PRICE: i32 = 1_000_000;

/// What occupies a grid position
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CellKind {
    Seat { number: u32 },
    /// Aisle cell that shows the row number. Not selectable.
    RowLabel { row: u32 },
    Blank,
}

/// The seat map grid of one trip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub row_count: usize,
    pub column_count: usize,
    pub cells: Vec<Vec<CellKind>>,
}

impl Layout {
    /// Classify every cell and number the seats row-major, left to right,
    /// top to bottom, starting at 1.
    ///
    /// The whole grid is rejected on the first malformed row or unknown code.
    pub fn parse(rows: usize, cols: usize, grid: &[Vec<i32>]) -> Result<(Layout, Vec<Seat>), SchemaError> {
        if rows == 0 || cols == 0 {
            return Err(SchemaError::Empty);
        }
        if grid.len() != rows {
            return Err(SchemaError::RowCountMismatch { declared: rows, actual: grid.len() });
        }

        let mut cells = Vec::with_capacity(rows);
        let mut seats = Vec::new();
        let mut next_number: u32 = 1;

        for (r, codes) in grid.iter().enumerate() {
            let row = r as u32 + 1;
            if codes.len() != cols {
                return Err(SchemaError::JaggedRow { row, expected: cols, actual: codes.len() });
            }

            let mut row_cells = Vec::with_capacity(cols);
            for (c, &code) in codes.iter().enumerate() {
                let column = c as u32 + 1;
                let kind = match code {
                    CODE_EMPTY_SEAT | CODE_TAKEN_SEAT => {
                        let status = if code == CODE_TAKEN_SEAT { SeatStatus::Taken } else { SeatStatus::Empty };
                        let number = next_number;
                        next_number += 1;
                        seats.push(Seat { number, row, column, status });
                        CellKind::Seat { number }
                    }
                    CODE_ROW_LABEL => CellKind::RowLabel { row },
                    CODE_BLANK => CellKind::Blank,
                    other => return Err(SchemaError::UnknownCellCode { row, column, code: other }),
                };
                row_cells.push(kind);
            }
            cells.push(row_cells);
        }

        Ok((Layout { row_count: rows, column_count: cols, cells }, seats))
    }

    /// Cell at a 1-based position
    pub fn cell(&self, row: u32, column: u32) -> Option<CellKind> {
        let r = (row as usize).checked_sub(1)?;
        let c = (column as usize).checked_sub(1)?;
        self.cells.get(r)?.get(c).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("Seat map has no rows or no columns")]
    Empty,

    #[error("Seat map declares {declared} rows but has {actual}")]
    RowCountMismatch {
        declared: usize,
        actual: usize,
    },

    #[error("Row {row} has {actual} cells, expected {expected}")]
    JaggedRow {
        row: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown cell code {code} at row {row}, column {column}")]
    UnknownCellCode {
        row: u32,
        column: u32,
        code: i32,
    },

    #[error("Seat list does not match the grid at seat {number}")]
    SeatListMismatch {
        number: u32,
    },

    #[error("Seat list has {actual} seats, grid has {expected}")]
    SeatCountMismatch {
        expected: usize,
        actual: usize,
    },

    #[error("Unit price {0} is out of range")]
    InvalidUnitPrice(i32),
}

// ============================================================================
// Seat Schema
// ============================================================================

/// Validated seat map of a trip. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeatSchema {
    pub trip_id: String,
    pub layout: Layout,
    pub seats: Vec<Seat>,
    pub unit_price: i32,
}

impl SeatSchema {
    /// Build the schema from the raw payload.
    ///
    /// Seat numbers come from the grid. A seat list in the payload is only
    /// accepted when it agrees with the grid seat for seat.
    pub fn from_payload(payload: SeatSchemaPayload) -> Result<Self, SchemaError> {
        let trip_id = payload.trip_id;
        let result = Self::build(&trip_id, payload.layout.rows, payload.layout.cols, &payload.layout.cells, &payload.seats, payload.unit_price);
        if let Err(e) = &result {
            warn!("Rejected seat schema for trip {}: {}", trip_id, e);
        }
        result
    }

    fn build(
        trip_id: &str,
        rows: usize,
        cols: usize,
        grid: &[Vec<i32>],
        listed: &[Seat],
        unit_price: i32,
    ) -> Result<Self, SchemaError> {
        if !(1..=MAX_UNIT_PRICE).contains(&unit_price) {
            return Err(SchemaError::InvalidUnitPrice(unit_price));
        }

        let (layout, seats) = Layout::parse(rows, cols, grid)?;

        if !listed.is_empty() {
            if listed.len() != seats.len() {
                return Err(SchemaError::SeatCountMismatch { expected: seats.len(), actual: listed.len() });
            }
            // Order in the payload is irrelevant, identity is the number
            for seat in listed {
                let derived = seat
                    .number
                    .checked_sub(1)
                    .and_then(|i| seats.get(i as usize));
                if derived != Some(seat) {
                    return Err(SchemaError::SeatListMismatch { number: seat.number });
                }
            }
        }

        Ok(Self { trip_id: trip_id.to_string(), layout, seats, unit_price })
    }

    pub fn seat(&self, number: u32) -> Option<&Seat> {
        // Numbers are contiguous from 1
        let index = number.checked_sub(1)? as usize;
        self.seats.get(index)
    }

    /// Seat at an exact 1-based row/column position
    pub fn seat_at(&self, row: u32, column: u32) -> Option<&Seat> {
        match self.layout.cell(row, column)? {
            CellKind::Seat { number } => self.seat(number),
            _ => None,
        }
    }

    pub fn empty_seat_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_empty()).count()
    }

    /// Classify every cell for display given the current selection and suggestions
    pub fn render(&self, selected: &[u32], suggested: &[u32]) -> Vec<Vec<RenderCell>> {
        self.layout
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match *cell {
                        CellKind::Seat { number } => {
                            let occupied = self.seat(number).map_or(true, |s| !s.is_empty());
                            let state = if selected.contains(&number) {
                                SeatDisplay::Selected
                            } else if occupied {
                                SeatDisplay::Occupied
                            } else if suggested.contains(&number) {
                                SeatDisplay::Suggested
                            } else {
                                SeatDisplay::Available
                            };
                            RenderCell::Seat { number, state }
                        }
                        CellKind::RowLabel { row } => RenderCell::RowLabel { row },
                        CellKind::Blank => RenderCell::Blank,
                    })
                    .collect()
            })
            .collect()
    }
}

// ============================================================================
// Render view
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeatDisplay {
    Available,
    Selected,
    Suggested,
    Occupied,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderCell {
    Seat { number: u32, state: SeatDisplay },
    RowLabel { row: u32 },
    Blank,
}
