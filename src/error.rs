// src/error.rs

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::pivot::PivotError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] sqlx::Error),
    #[error("query failed: {0}")]
    QueryFailure(#[source] sqlx::Error),
    #[error(transparent)]
    Pivot(#[from] PivotError),
    #[error("invalid form body: {0}")]
    InvalidForm(String),
    #[error("unsupported content type '{0}'")]
    UnsupportedMediaType(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::StorageUnavailable(_) => "storage_unavailable",
            AppError::QueryFailure(_) => "query_failure",
            AppError::Pivot(PivotError::UnknownAttribute(_)) => "unknown_attribute",
            AppError::InvalidForm(_) => "invalid_form",
            AppError::UnsupportedMediaType(_) => "unsupported_media_type",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::QueryFailure(_) | AppError::Pivot(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidForm(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(code = self.code(), status = status.as_u16(), error = %self, "request failed");
        let body = Json(json!({
            "error": { "code": self.code(), "message": self.to_string() }
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_attribute_maps_to_server_error() {
        let err = AppError::from(PivotError::UnknownAttribute("X".into()));
        assert_eq!(err.code(), "unknown_attribute");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn storage_unavailable_is_service_unavailable() {
        let err = AppError::StorageUnavailable(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.to_string().starts_with("storage unavailable"));
    }

    #[test]
    fn rejected_request_bodies_are_client_errors() {
        assert_eq!(AppError::InvalidForm("bad".into()).status(), StatusCode::BAD_REQUEST);
        let err = AppError::UnsupportedMediaType("application/json".into());
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(err.code(), "unsupported_media_type");
    }
}
