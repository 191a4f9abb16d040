//! Error types for showcase-api
//!
//! Every engine operation returns [`ServiceError`]; the HTTP layer renders it
//! as the `{"success": false, "error": ...}` envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use thiserror::Error;

/// Required Work fields, in the order ingestion checks them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Image,
    Title,
    Description,
    Source,
    LiveSite,
}

impl RequiredField {
    /// Wire name used in `MissingField:<name>`
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::Image => "image",
            RequiredField::Title => "title",
            RequiredField::Description => "description",
            RequiredField::Source => "source",
            RequiredField::LiveSite => "liveSite",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            RequiredField::Image => "Image is required.",
            RequiredField::Title => "Title is required.",
            RequiredField::Description => "Description is required.",
            RequiredField::Source => "GitHub URL is required.",
            RequiredField::LiveSite => "Website URL is required.",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for showcase-api operations
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No caller identity where one is required
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Caller input failed a required-identifier check
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A required Work field is absent or empty
    #[error("MissingField:{0}")]
    MissingField(RequiredField),

    /// Referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Underlying persistence fault; retryable by the caller
    #[error("Store unavailable during {operation}: {source}")]
    StoreUnavailable {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

/// Convenience Result type using ServiceError
pub type Result<T> = std::result::Result<T, ServiceError>;

impl ServiceError {
    /// Wrap a store fault with the name of the operation that hit it
    pub fn store(operation: &'static str) -> impl FnOnce(sqlx::Error) -> ServiceError {
        move |source| ServiceError::StoreUnavailable { operation, source }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ServiceError::InvalidArgument(_) | ServiceError::MissingField(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::StoreUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ServiceError::MissingField(field) => json!({
                "success": false,
                "error": field.message(),
                "field": field.as_str(),
            }),
            // Store internals stay out of release responses
            ServiceError::StoreUnavailable { source, .. } if cfg!(debug_assertions) => json!({
                "success": false,
                "error": "Store unavailable",
                "detail": source.to_string(),
            }),
            ServiceError::StoreUnavailable { .. } => json!({
                "success": false,
                "error": "Store unavailable",
            }),
            other => json!({
                "success": false,
                "error": other.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
