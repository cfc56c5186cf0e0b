//! Mapping from core errors to HTTP responses.

use api_shared::{ErrorBody, ValidationErrorBody};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rx_core::validation::FieldError;
use rx_core::RxError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody::new(detail))).into_response()
            }
            ApiError::NotFound(detail) => {
                (StatusCode::NOT_FOUND, Json(ErrorBody::new(detail))).into_response()
            }
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationErrorBody { errors }),
            )
                .into_response(),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::new("Internal error")),
                )
                    .into_response()
            }
        }
    }
}

impl From<RxError> for ApiError {
    fn from(err: RxError) -> Self {
        match err {
            RxError::Validation(errors) => ApiError::Validation(errors),
            RxError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            RxError::InvalidInput(_) | RxError::Uuid(_) | RxError::Text(_) => {
                ApiError::BadRequest(err.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_status_codes() {
        let cases = [
            (
                RxError::NotFound {
                    kind: "patient",
                    id: "abc".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                RxError::Validation(vec![FieldError::new("name", "Name is required")]),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                RxError::InvalidInput("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                RxError::FileRead(std::io::Error::other("disk gone")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
