pub mod gateway;
pub mod search;

pub use gateway::{BookingGateway, GatewayError};
pub use search::{ScheduleQuery, ScheduleSort, SearchError};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Search rejected: {0}")]
    Search(#[from] SearchError),
    #[error("Gateway call failed: {0}")]
    Gateway(#[from] GatewayError),
}

pub type CoreResult<T> = Result<T, CoreError>;
