//! Unified server error type.
//!
//! Handlers return `Result<T, ServerError>`; every error becomes a JSON body
//! of the form `{"error": "..."}`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bugtrail_conversation::ServiceError;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The request was understood but cannot be served.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The body was not valid JSON for the endpoint.
    #[error("malformed body: {0}")]
    Rejected(#[from] JsonRejection),
}

impl From<ServiceError> for ServerError {
    fn from(e: ServiceError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            Self::Rejected(rejection) => {
                warn!(error = %rejection, "rejected request body");
                (rejection.status(), rejection.body_text())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_bad_request() {
        let response = ServerError::from(ServiceError::EmptyHistory).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
