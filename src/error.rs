use crate::services::{StoreError, UpstreamError};
use crate::utils::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Body every route emits on failure.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

/// Accepts an error or a plain message; both render as `{ "error": <message> }`.
pub fn create_error_response(error: impl Display, status: StatusCode) -> Response {
    let body = Json(ErrorBody {
        error: error.to_string(),
    });
    (status, body).into_response()
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(UpstreamError::Status { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Store(StoreError::DuplicateHash(_)) => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed ({}): {}", status, self);
        } else {
            warn!("Request rejected ({}): {}", status, self);
        }
        create_error_response(self, status)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> ErrorBody {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn message_and_error_share_shape() {
        let from_str = create_error_response("x", StatusCode::BAD_REQUEST);
        let from_err = create_error_response(
            ValidationError::MalformedBody("x".to_string()),
            StatusCode::BAD_REQUEST,
        );
        assert_eq!(from_str.status(), StatusCode::BAD_REQUEST);
        assert_eq!(from_err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(from_str).await, ErrorBody { error: "x".to_string() });
        assert_eq!(
            body_of(from_err).await,
            ErrorBody {
                error: "Malformed request body: x".to_string()
            }
        );
    }

    #[tokio::test]
    async fn plain_message_matches_error_with_same_message() {
        let from_str = create_error_response("x", StatusCode::BAD_REQUEST);
        let from_err = create_error_response(
            std::io::Error::new(std::io::ErrorKind::Other, "x"),
            StatusCode::BAD_REQUEST,
        );
        assert_eq!(from_str.status(), from_err.status());
        assert_eq!(body_of(from_str).await, body_of(from_err).await);
    }

    #[test]
    fn statuses_follow_error_kind() {
        let missing = ApiError::from(ValidationError::MissingField {
            field: "amount".to_string(),
        });
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let relayed = ApiError::from(UpstreamError::Status {
            status: 422,
            message: "bad pair".to_string(),
        });
        assert_eq!(relayed.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let decode = ApiError::from(UpstreamError::Decode("eof".to_string()));
        assert_eq!(decode.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let dup = ApiError::from(StoreError::DuplicateHash("0x01".to_string()));
        assert_eq!(dup.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn validation_message_is_not_prefixed() {
        let err = ApiError::from(ValidationError::MissingField {
            field: "amount".to_string(),
        });
        let body = body_of(err.into_response()).await;
        assert_eq!(body.error, "Missing required field: amount");
    }
}
