pub mod layout;
pub mod advisor;
pub mod selection;
pub mod pricing;

pub use layout::{CellKind, Layout, RenderCell, SchemaError, SeatDisplay, SeatSchema, MAX_UNIT_PRICE};
pub use advisor::suggest_companions;
pub use selection::{SeatSelection, SeatState, SelectionError, ToggleOutcome, DEFAULT_SEAT_LIMIT};
pub use pricing::{CheckoutPricing, PriceBreakdown};
