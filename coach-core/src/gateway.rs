use async_trait::async_trait;
use coach_shared::{BookingRequest, BookingResponse, Location, SeatSchemaPayload, Trip};
use crate::search::ScheduleQuery;

/// Network-layer collaborator of the booking flow.
///
/// Every method is a single request; none of them retry. Callers decide what a
/// failure means for the screen that issued it.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// List the terminals trips can depart from or arrive at
    async fn fetch_locations(&self) -> Result<Vec<Location>, GatewayError>;

    /// List the trips matching a validated schedule query
    async fn fetch_schedules(&self, query: &ScheduleQuery) -> Result<Vec<Trip>, GatewayError>;

    /// Fetch the raw seat map of a trip
    async fn fetch_seat_schema(&self, trip_id: &str) -> Result<SeatSchemaPayload, GatewayError>;

    /// Submit a booking. A response with `ok == false` is returned as-is; the
    /// checkout decides it is a failure.
    async fn submit_booking(&self, request: &BookingRequest) -> Result<BookingResponse, GatewayError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("Request to {endpoint} failed: {reason}")]
    Network {
        endpoint: String,
        reason: String,
    },

    #[error("{endpoint} answered with status {status}")]
    Status {
        endpoint: String,
        status: u16,
    },

    #[error("Could not decode response from {endpoint}: {reason}")]
    Decode {
        endpoint: String,
        reason: String,
    },
}

impl GatewayError {
    pub fn endpoint(&self) -> &str {
        match self {
            GatewayError::Network { endpoint, .. }
            | GatewayError::Status { endpoint, .. }
            | GatewayError::Decode { endpoint, .. } => endpoint,
        }
    }
}
