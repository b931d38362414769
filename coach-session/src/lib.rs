pub mod store;
pub mod guard;
pub mod request;
pub mod screens;
pub mod checkout;

pub use store::BookingSession;
pub use guard::{MissingPriorState, SessionField, Stage, START_ROUTE};
pub use request::RequestGuard;
pub use screens::{LoadError, PassengerDraft, PassengerEntry, PassengerError, Review, ReviewLine, ReviewSummary, SeatMapView, SeatSelectionScreen};
pub use checkout::{Checkout, CheckoutError, Confirmation, PendingSubmission, SubmissionError};

#[cfg(test)]
pub(crate) mod fixtures;
