// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer-token gate for Axum.
//!
//! Applied with `axum::middleware::from_fn_with_state` to the protected
//! router subtree. A valid token is the only authorization fact, so nothing
//! is added to the request on success.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{now_millis, AuthError, TokenCodec};
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The prefix must appear at the very start of the header value; everything
/// after it is the token, even if it contains `"Bearer "` again.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = match headers.get(AUTHORIZATION) {
        Some(header) if !header.is_empty() => header,
        _ => return Err(AuthError::MissingAuthHeader),
    };

    let value = header.to_str().map_err(|_| AuthError::InvalidAuthHeader)?;

    value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::InvalidAuthHeader)
}

/// Check the request headers against `codec` at `now_millis`.
pub fn authenticate(
    headers: &HeaderMap,
    codec: &TokenCodec,
    now_millis: i64,
) -> Result<(), AuthError> {
    let token = bearer_token(headers)?;
    codec.verify(token, now_millis)?;
    Ok(())
}

/// Authentication middleware function.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &state.codec, now_millis()) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            tracing::debug!(
                error_code = e.error_code(),
                path = %request.uri().path(),
                "request rejected"
            );
            e.into_response()
        }
    }
}
