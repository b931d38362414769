use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A terminal or agency a trip can start or end at
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub id: String,
    pub name: String,
}

/// A scheduled bus departure as listed by the schedule search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub company: String,
    pub from: String,
    pub to: String,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    pub price: i32,
    pub available_seats: u32,
}
