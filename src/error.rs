// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Provider and application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Errors surfaced by the LinkedIn provider adapter.
///
/// Every variant is reported to the caller as-is; nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Your application key and secret are required in order to connect to LinkedIn.")]
    Configuration,

    #[error("Authentication failed! {0}")]
    Authentication(String),

    #[error(
        "Authentication failed! Your server time is not in sync with the LinkedIn servers. \
         Acceptable timestamps: {acceptable}"
    )]
    ClockSkew { acceptable: String },

    #[error("Authentication failed! LinkedIn returned an invalid oauth_token")]
    InvalidToken,

    #[error("User profile request failed! {0}")]
    ProfileFetch(String),

    #[error("Update user status update failed! {0}")]
    StatusUpdate(String),
}

impl ProviderError {
    /// Numeric error code, compatible with the codes used by other providers
    /// of the same authentication library.
    ///
    /// 4: missing application credentials, 5: authentication failed,
    /// 6: user profile request failed, 0: unspecified.
    pub fn code(&self) -> u8 {
        match self {
            ProviderError::Configuration => 4,
            ProviderError::Authentication(_)
            | ProviderError::ClockSkew { .. }
            | ProviderError::InvalidToken => 5,
            ProviderError::ProfileFetch(_) => 6,
            ProviderError::StatusUpdate(_) => 0,
        }
    }

    /// True for failures of the login handshake.
    pub fn is_authentication_error(&self) -> bool {
        self.code() == 5
    }
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<u8>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details, code) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None, None),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "bad_request",
                Some(msg.clone()),
                None,
            ),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_failed",
                Some(errors.to_string()),
                None,
            ),
            AppError::Provider(err) => {
                let (status, error) = match err {
                    ProviderError::Configuration => {
                        tracing::error!(error = %err, "LinkedIn provider misconfigured");
                        (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error")
                    }
                    ProviderError::Authentication(_)
                    | ProviderError::ClockSkew { .. }
                    | ProviderError::InvalidToken => {
                        (StatusCode::UNAUTHORIZED, "authentication_failed")
                    }
                    ProviderError::ProfileFetch(_) => (StatusCode::BAD_GATEWAY, "profile_error"),
                    ProviderError::StatusUpdate(_) => {
                        (StatusCode::BAD_GATEWAY, "status_update_error")
                    }
                };
                (status, error, Some(err.to_string()), Some(err.code()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    None,
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
            code,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
