//! HTTP handlers

pub mod fortunes;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use fortune_core::FortuneError;
use serde::Serialize;
use tracing::error;

/// Failure outcomes a handler can answer with. Bodies are plain text.
#[derive(Debug)]
pub enum ApiError {
    RouteNotFound,
    FortuneNotFound,
    BadRequest,
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::RouteNotFound => (StatusCode::NOT_FOUND, "not found"),
            ApiError::FortuneNotFound => (StatusCode::NOT_FOUND, "fortune not found"),
            ApiError::BadRequest => (StatusCode::BAD_REQUEST, "bad request"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
        };
        (status, body).into_response()
    }
}

impl From<FortuneError> for ApiError {
    fn from(e: FortuneError) -> Self {
        match e {
            FortuneError::NotFound(_) => ApiError::FortuneNotFound,
            FortuneError::Decode(_) => ApiError::BadRequest,
            FortuneError::Serialization(_) | FortuneError::SecondaryStore(_) => {
                error!("Request failed: {}", e);
                ApiError::Internal
            }
        }
    }
}

/// 200 with `value` encoded as JSON
pub fn json_response<T: Serialize>(value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(value).map_err(FortuneError::from)?;
    Ok((StatusCode::OK, body).into_response())
}

/// Fallback for unmatched paths and methods
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Every response is labelled JSON, error bodies included
pub async fn json_content_type(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (FortuneError::NotFound("1".into()), StatusCode::NOT_FOUND),
            (FortuneError::Decode("eof".into()), StatusCode::BAD_REQUEST),
            (
                FortuneError::Serialization("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), status);
        }
    }

    #[tokio::test]
    async fn test_json_content_type_overrides() {
        let response = json_content_type(ApiError::RouteNotFound.into_response()).await;
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    }
}
