// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use super::json::JsonBody;
use crate::{
    auth::now_millis, error::ApiError, state::AppState, toxiproxy::models::null_as_default,
};

/// Login credentials. Missing or `null` fields decode as empty strings.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token, valid for 24 hours.
    pub token: String,
}

/// Exchange the configured username/password for a bearer token.
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Body is not valid JSON", body = crate::error::ErrorBody),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorBody),
        (status = 500, description = "Token could not be signed", body = crate::error::ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if !state
        .credentials
        .matches(&request.username, &request.password)
    {
        warn!(username = %request.username, "Login rejected");
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = state.codec.issue(now_millis()).map_err(|e| {
        error!(error = ?e, "Failed to sign login token");
        ApiError::internal("Internal server error")
    })?;

    info!(username = %request.username, "Login succeeded");
    Ok(Json(LoginResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::TokenCodec, config::Credentials, toxiproxy::ToxiproxyClient};
    use axum::http::StatusCode;
    use url::Url;

    fn test_state() -> AppState {
        AppState::new(
            TokenCodec::new(b"secret"),
            Credentials::new("admin", "hunter2"),
            ToxiproxyClient::new(Url::parse("http://127.0.0.1:8474").unwrap()).unwrap(),
            ".",
        )
    }

    fn creds(username: &str, password: &str) -> JsonBody<LoginRequest> {
        JsonBody(LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    #[tokio::test]
    async fn correct_credentials_issue_verifiable_token() {
        let state = test_state();
        let Json(response) = login(State(state.clone()), creds("admin", "hunter2"))
            .await
            .expect("login succeeds");

        assert!(state.codec.verify(&response.token, now_millis()).is_ok());
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let err = login(State(test_state()), creds("admin", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Invalid credentials");
    }

    #[tokio::test]
    async fn wrong_username_is_unauthorized() {
        let err = login(State(test_state()), creds("root", "hunter2"))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn credentials_compare_exactly() {
        let err = login(State(test_state()), creds("admin", "hunter2 "))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn null_fields_decode_as_empty() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"username":null,"password":"hunter2"}"#).unwrap();
        assert_eq!(request.username, "");
        assert_eq!(request.password, "hunter2");
    }
}
