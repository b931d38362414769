use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use coach_core::{CoreError, GatewayError, SearchError};
use coach_seating::SelectionError;
use coach_session::{CheckoutError, LoadError, MissingPriorState, PassengerError};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    /// Earlier stage missing; send the traveller back to the start
    Redirect(MissingPriorState),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    UpstreamError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Redirect(missing) => {
                tracing::info!("{}", missing);
                return Redirect::to(missing.redirect_to()).into_response();
            }
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::UpstreamError(msg) => {
                tracing::error!("Upstream failure: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<MissingPriorState> for AppError {
    fn from(err: MissingPriorState) -> Self {
        AppError::Redirect(err)
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        AppError::UpstreamError(err.to_string())
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Search(e) => e.into(),
            CoreError::Gateway(e) => e.into(),
        }
    }
}

impl From<SelectionError> for AppError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::LimitReached { .. } => AppError::ConflictError(err.to_string()),
            SelectionError::UnknownSeat(_) => AppError::NotFoundError(err.to_string()),
        }
    }
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::UpstreamError(err.to_string())
    }
}

impl From<PassengerError> for AppError {
    fn from(err: PassengerError) -> Self {
        match err {
            PassengerError::MissingPriorState(missing) => missing.into(),
            other => AppError::ValidationError(other.to_string()),
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::MissingPriorState(missing) => missing.into(),
            CheckoutError::Pending => AppError::ConflictError(err.to_string()),
            CheckoutError::Submission(e) => AppError::UpstreamError(e.to_string()),
        }
    }
}
