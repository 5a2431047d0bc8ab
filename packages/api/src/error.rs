//! # Error taxonomy for HTTP handlers
//!
//! Every handler returns `Result<_, ApiError>`. The four variants are the only
//! failure classes a client sees; each maps to one status code and renders as
//! `{"msg": "..."}`.
//!
//! | Variant | Status |
//! |---------|--------|
//! | [`ApiError::NotFound`] | 404 |
//! | [`ApiError::ValidationFailed`] | 400 |
//! | [`ApiError::Conflict`] | 409 |
//! | [`ApiError::Infrastructure`] | 500 |
//!
//! Infrastructure details are logged and replaced by a generic message in the
//! response body.

use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use store::StoreError;
use thiserror::Error;

use crate::auth::PasswordError;
use crate::models::Message;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ValidationFailed(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Infrastructure(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UserNotFound(_) => ApiError::NotFound("User not found".to_string()),
            StoreError::GoalNotFound(_) => ApiError::NotFound("Goal not found".to_string()),
            StoreError::Duplicate(_) => ApiError::Conflict(err.to_string()),
            StoreError::Backend(message) => ApiError::Infrastructure(message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::ValidationFailed(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::ValidationFailed(rejection.body_text())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Infrastructure(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match self {
            ApiError::Infrastructure(detail) => {
                tracing::error!("Request failed: {}", detail);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(Message::new(msg))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::GoalId;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::ValidationFailed("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::Infrastructure("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_store_error() {
        let err: ApiError = StoreError::UserNotFound("a@b.c".into()).into();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "User not found"));

        let err: ApiError = StoreError::GoalNotFound(GoalId::new()).into();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Goal not found"));

        let err: ApiError = StoreError::Duplicate("a@b.c".into()).into();
        assert!(matches!(err, ApiError::Conflict(_)));

        let err: ApiError = StoreError::Backend("connection reset".into()).into();
        assert!(matches!(err, ApiError::Infrastructure(_)));
    }

    #[tokio::test]
    async fn test_unreadable_password_hash_is_infrastructure() {
        let err: ApiError = crate::auth::verify_password("pw".into(), "garbage".into())
            .await
            .unwrap_err()
            .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_infrastructure_detail_is_not_exposed() {
        let response = ApiError::Infrastructure("password=hunter2".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(!body.contains("hunter2"));
        assert!(body.contains("Internal server error"));
    }
}
