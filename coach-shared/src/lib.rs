pub mod models;
pub mod pii;

pub use models::booking::{BookingRequest, BookingResponse, ContactInfo, Gender, Passenger};
pub use models::seat::{LayoutPayload, Seat, SeatSchemaPayload, SeatStatus, SelectedSeat};
pub use models::trip::{Location, Trip};
pub use pii::Masked;
