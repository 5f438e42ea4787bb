//! `AppError` and the API response envelope

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Result alias used throughout the server
pub type AppResult<T> = Result<T, AppError>;

/// Application error: an [`ErrorCode`] plus the message shown to the caller.
///
/// `details` carries optional structured context (offending field, resource
/// name) and is serialized into the response envelope when present.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach one structured detail entry
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// HTTP status this error maps to
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // Shorthand constructors for the codes raised all over the server.
    // Only the ones actually in use - this is not a combinator library.

    /// Business-rule violation; the message is surfaced verbatim
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    /// One message for unknown-user and bad-password alike, so login
    /// failures cannot be used to enumerate usernames.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }
}

/// Response envelope shared by every endpoint.
///
/// Success carries `data` and code 0; failure carries the error's code,
/// message and optional `details`. Absent fields are omitted from the JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(code = %self.code, message = %self.message, "System error");
        }

        let status = self.http_status();
        (status, Json(ApiResponse::<()>::error(&self))).into_response()
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = match self.code {
            None | Some(0) => StatusCode::OK,
            Some(c) => ErrorCode::try_from(c)
                .map(|c| c.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        };

        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_and_custom_messages() {
        let err = AppError::new(ErrorCode::ProductNotFound);
        assert_eq!(err.message, "Product not found");
        assert!(err.details.is_none());

        let err = AppError::validation("cannot withdraw more than available stock (7)");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "cannot withdraw more than available stock (7)");
        assert_eq!(format!("{err}"), err.message);
    }

    #[test]
    fn test_not_found_records_resource_detail() {
        let err = AppError::not_found("Brand 12");
        assert_eq!(err.message, "Brand 12 not found");
        let details = err.details.unwrap();
        assert_eq!(details.get("resource").unwrap(), "Brand 12");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::validation("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::unauthorized().http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::forbidden("x").http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::database("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_envelope() {
        let err = AppError::with_message(ErrorCode::MovementNotFound, "Movement 3 not found");
        let body = ApiResponse::<()>::error(&err);
        assert_eq!(body.code, Some(5001));
        assert_eq!(body.message, "Movement 3 not found");
        assert!(body.data.is_none());
    }

    #[test]
    fn test_success_envelope_omits_absent_fields() {
        let body = ApiResponse::success(7);
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"code":0,"message":"OK","data":7}"#);
    }
}
