use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use coach_core::search::{arrange_schedules, companies, find_schedules};
use coach_core::{ScheduleQuery, ScheduleSort};
use coach_shared::{Location, Trip};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ScheduleParams {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub sort: ScheduleSort,
    pub company: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub trips: Vec<Trip>,
    /// Every company in the unfiltered result, for the filter dropdown
    pub companies: Vec<String>,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_locations(State(state): State<AppState>) -> Result<Json<Vec<Location>>, AppError> {
    let locations = state.gateway.fetch_locations().await?;
    Ok(Json(locations))
}

pub async fn search_schedules(
    State(state): State<AppState>,
    Query(params): Query<ScheduleParams>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let query = ScheduleQuery { from: params.from, to: params.to, date: params.date };
    let today = Utc::now().date_naive();

    let all = find_schedules(state.gateway.as_ref(), &query, today).await?;
    let trips = arrange_schedules(&all, params.sort, params.company.as_deref());

    Ok(Json(ScheduleResponse { companies: companies(&all), trips }))
}
