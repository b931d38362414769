use chrono::NaiveDate;
use coach_shared::Trip;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::gateway::BookingGateway;
use crate::CoreResult;

/// Where and when the traveller wants to go
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleQuery {
    pub from: String,
    pub to: String,
    pub date: NaiveDate,
}

impl ScheduleQuery {
    /// Reject queries the schedule endpoint cannot answer meaningfully
    pub fn validate(&self, today: NaiveDate) -> Result<(), SearchError> {
        if self.from.trim().is_empty() {
            return Err(SearchError::MissingDeparture);
        }
        if self.to.trim().is_empty() {
            return Err(SearchError::MissingArrival);
        }
        if self.from == self.to {
            return Err(SearchError::SameLocation(self.from.clone()));
        }
        if self.date < today {
            return Err(SearchError::DateInPast { date: self.date, today });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("Departure location is required")]
    MissingDeparture,

    #[error("Arrival location is required")]
    MissingArrival,

    #[error("Departure and arrival are both {0}")]
    SameLocation(String),

    #[error("Travel date {date} is before {today}")]
    DateInPast {
        date: NaiveDate,
        today: NaiveDate,
    },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleSort {
    #[default]
    Time,
    Price,
}

/// Filter to one company (if given) and order the trips for display
pub fn arrange_schedules(trips: &[Trip], sort: ScheduleSort, company: Option<&str>) -> Vec<Trip> {
    let mut result: Vec<Trip> = trips
        .iter()
        .filter(|trip| company.map_or(true, |c| trip.company == c))
        .cloned()
        .collect();

    // Stable sort keeps the gateway order for ties
    match sort {
        ScheduleSort::Time => result.sort_by_key(|trip| trip.departure),
        ScheduleSort::Price => result.sort_by_key(|trip| trip.price),
    }

    result
}

/// Distinct companies in the order they first appear
pub fn companies(trips: &[Trip]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for trip in trips {
        if !seen.contains(&trip.company) {
            seen.push(trip.company.clone());
        }
    }
    seen
}

/// Validate the query, then ask the gateway for matching trips
pub async fn find_schedules(
    gateway: &dyn BookingGateway,
    query: &ScheduleQuery,
    today: NaiveDate,
) -> CoreResult<Vec<Trip>> {
    if let Err(e) = query.validate(today) {
        warn!("Schedule search rejected: {}", e);
        return Err(e.into());
    }

    let trips = gateway.fetch_schedules(query).await?;
    debug!("{} trips found for {} -> {} on {}", trips.len(), query.from, query.to, query.date);
    Ok(trips)
}
