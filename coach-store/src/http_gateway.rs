use async_trait::async_trait;
use coach_core::{BookingGateway, GatewayError, ScheduleQuery};
use coach_shared::{BookingRequest, BookingResponse, Location, SeatSchemaPayload, Trip};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};
use crate::app_config::GatewayConfig;

pub const LOCATIONS_PATH: &str = "/reference/agencies";
pub const SCHEDULES_PATH: &str = "/schedules";
pub const SEAT_SCHEMA_PATH: &str = "/seatSchemas";
pub const SELL_PATH: &str = "/tickets/sell";

/// `BookingGateway` over the ticketing backend's JSON API
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self { client, base_url: base_url.trim_end_matches('/').to_string() }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send, check the status, decode. One attempt only.
    async fn call<T: DeserializeOwned>(&self, endpoint: &str, request: RequestBuilder) -> Result<T, GatewayError> {
        debug!("Calling {}", endpoint);
        let response = request.send().await.map_err(|e| {
            error!("Request to {} failed: {}", endpoint, e);
            GatewayError::Network { endpoint: endpoint.to_string(), reason: e.to_string() }
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("{} answered {}", endpoint, status);
            return Err(GatewayError::Status { endpoint: endpoint.to_string(), status: status.as_u16() });
        }

        response.json::<T>().await.map_err(|e| {
            error!("Bad payload from {}: {}", endpoint, e);
            GatewayError::Decode { endpoint: endpoint.to_string(), reason: e.to_string() }
        })
    }
}

#[async_trait]
impl BookingGateway for HttpGateway {
    async fn fetch_locations(&self) -> Result<Vec<Location>, GatewayError> {
        self.call(LOCATIONS_PATH, self.client.get(self.url(LOCATIONS_PATH))).await
    }

    async fn fetch_schedules(&self, query: &ScheduleQuery) -> Result<Vec<Trip>, GatewayError> {
        let date = query.date.format("%Y-%m-%d").to_string();
        let request = self
            .client
            .get(self.url(SCHEDULES_PATH))
            .query(&[("from", query.from.as_str()), ("to", query.to.as_str()), ("date", date.as_str())]);
        self.call(SCHEDULES_PATH, request).await
    }

    async fn fetch_seat_schema(&self, trip_id: &str) -> Result<SeatSchemaPayload, GatewayError> {
        let path = format!("{}/{}", SEAT_SCHEMA_PATH, trip_id);
        self.call(&path, self.client.get(self.url(&path))).await
    }

    async fn submit_booking(&self, request: &BookingRequest) -> Result<BookingResponse, GatewayError> {
        self.call(SELL_PATH, self.client.post(self.url(SELL_PATH)).json(request)).await
    }
}
