use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::generate::GenerateError;

// Client-visible failure taxonomy. Response bodies stay fixed and opaque;
// diagnostic detail goes to the server logs instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request body was not parseable JSON")]
    InvalidRequest,

    #[error("message field missing or not a string")]
    InvalidMessage,

    #[error("message empty after trimming")]
    EmptyMessage,

    #[error("rate limit exceeded")]
    TooManyRequests,

    #[error(transparent)]
    Generation(#[from] GenerateError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest | ApiError::InvalidMessage | ApiError::EmptyMessage => {
                StatusCode::BAD_REQUEST
            }
            ApiError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest => "Invalid request",
            ApiError::InvalidMessage => "Invalid message",
            ApiError::EmptyMessage => "Empty message",
            ApiError::TooManyRequests => "Too many requests",
            ApiError::Generation(_) => "AI error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.client_message() });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn input_errors_map_to_400_with_fixed_bodies() {
        for (err, message) in [
            (ApiError::InvalidRequest, "Invalid request"),
            (ApiError::InvalidMessage, "Invalid message"),
            (ApiError::EmptyMessage, "Empty message"),
        ] {
            let (status, body) = body_of(err).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, serde_json::json!({ "error": message }));
        }
    }

    #[tokio::test]
    async fn throttling_maps_to_429() {
        let (status, body) = body_of(ApiError::TooManyRequests).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body, serde_json::json!({ "error": "Too many requests" }));
    }

    #[tokio::test]
    async fn generation_failure_maps_to_opaque_500() {
        let err = ApiError::from(GenerateError::Unavailable(
            "connection refused to upstream".to_string(),
        ));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        // internal detail never reaches the client
        assert_eq!(body, serde_json::json!({ "error": "AI error" }));
    }
}
