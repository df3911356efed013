// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication error type.
///
/// Produced by the token codec and the bearer gate. The `Display` strings are
/// the messages returned to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No (or an empty) authorization header
    MissingAuthHeader,
    /// Header present but not of the form `Bearer <token>`
    InvalidAuthHeader,
    /// Token failed to parse or its signature did not verify
    MalformedToken,
    /// Token is older than the allowed lifetime
    TokenExpired,
    /// Token could not be signed
    SigningFailed(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::TokenExpired => "token_expired",
            AuthError::SigningFailed(_) => "signing_failed",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::MalformedToken
            | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::SigningFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "Authorization header required"),
            AuthError::InvalidAuthHeader => write!(f, "Invalid token format"),
            AuthError::MalformedToken => write!(f, "Invalid token"),
            AuthError::TokenExpired => write!(f, "Token expired"),
            // The signing detail is logged, not returned.
            AuthError::SigningFailed(_) => write!(f, "Internal server error"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
