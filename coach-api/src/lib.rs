use axum::{
    http::Method,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod catalog;
pub mod error;
pub mod flow;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/health", get(catalog::health))
        .route("/v1/locations", get(catalog::list_locations))
        .route("/v1/schedules", get(catalog::search_schedules))
        .route("/v1/session", axum::routing::delete(flow::reset_session))
        .route("/v1/session/trip", put(flow::choose_trip))
        .route("/v1/seats/{trip_id}", get(flow::enter_seats))
        .route("/v1/seats/{trip_id}/toggle", post(flow::toggle_seat))
        .route("/v1/passengers", get(flow::enter_passengers).put(flow::submit_passengers))
        .route("/v1/review", get(flow::review))
        .route("/v1/review/confirm", post(flow::confirm))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
