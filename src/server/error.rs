use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::github::config::GithubError;

/// Upstream failures surface to clients as a 500 carrying the raw error text.
/// Rejected input is answered with a 400 before GitHub is contacted.
#[derive(Debug)]
pub enum ApiError {
    Upstream(GithubError),
    BadRequest(String),
}

impl From<GithubError> for ApiError {
    fn from(err: GithubError) -> Self {
        Self::Upstream(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Upstream(err) => {
                let message = err.to_string();
                match &err {
                    GithubError::Status { status, .. } => {
                        log::error!("[ApiError] GitHub answered {}, responding with 500", status);
                    }
                    _ => log::error!("[ApiError] Responding with 500: {}", &message),
                }
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            ApiError::BadRequest(message) => {
                log::warn!("[ApiError] Rejecting request: {}", &message);
                (StatusCode::BAD_REQUEST, message).into_response()
            }
        }
    }
}
