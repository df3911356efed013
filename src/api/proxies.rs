// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Toxiproxy pass-through endpoints.
//!
//! Each handler makes one Toxiproxy call. Upstream failures, including unknown
//! proxy or toxic names, come back as 500 with Toxiproxy's message.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::json::JsonBody;
use crate::{
    error::{ApiError, ErrorBody},
    state::AppState,
    toxiproxy::{Proxy, ProxyMap, Toxic},
};

#[utoipa::path(
    get,
    path = "/api/toxiproxy/proxies",
    tag = "Toxiproxy",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All proxies keyed by name", body = ProxyMap),
        (status = 401, description = "Missing, invalid, or expired token"),
        (status = 500, description = "Toxiproxy call failed", body = ErrorBody)
    )
)]
pub async fn list_proxies(State(state): State<AppState>) -> Result<Json<ProxyMap>, ApiError> {
    Ok(Json(state.toxiproxy.proxies().await?))
}

#[utoipa::path(
    get,
    path = "/api/toxiproxy/proxies/{proxy_name}",
    params(
        ("proxy_name" = String, Path, description = "Name of the proxy")
    ),
    tag = "Toxiproxy",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Proxy),
        (status = 401, description = "Missing, invalid, or expired token"),
        (status = 500, description = "Toxiproxy call failed", body = ErrorBody)
    )
)]
pub async fn get_proxy(
    Path(proxy_name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Proxy>, ApiError> {
    Ok(Json(state.toxiproxy.proxy(&proxy_name).await?))
}

#[utoipa::path(
    get,
    path = "/api/toxiproxy/proxies/{proxy_name}/toxics",
    params(
        ("proxy_name" = String, Path, description = "Name of the proxy")
    ),
    tag = "Toxiproxy",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [Toxic]),
        (status = 401, description = "Missing, invalid, or expired token"),
        (status = 500, description = "Toxiproxy call failed", body = ErrorBody)
    )
)]
pub async fn list_toxics(
    Path(proxy_name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Toxic>>, ApiError> {
    Ok(Json(state.toxiproxy.toxics(&proxy_name).await?))
}

#[utoipa::path(
    post,
    path = "/api/toxiproxy/proxies/{proxy_name}/toxics",
    params(
        ("proxy_name" = String, Path, description = "Name of the proxy")
    ),
    request_body = Toxic,
    tag = "Toxiproxy",
    security(("bearer" = [])),
    responses(
        (status = 201, body = Toxic),
        (status = 400, description = "Body is not valid JSON", body = ErrorBody),
        (status = 401, description = "Missing, invalid, or expired token"),
        (status = 500, description = "Toxiproxy call failed", body = ErrorBody)
    )
)]
pub async fn create_toxic(
    Path(proxy_name): Path<String>,
    State(state): State<AppState>,
    JsonBody(toxic): JsonBody<Toxic>,
) -> Result<(StatusCode, Json<Toxic>), ApiError> {
    let created = state.toxiproxy.add_toxic(&proxy_name, &toxic).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    delete,
    path = "/api/toxiproxy/proxies/{proxy_name}/toxics/{toxic_name}",
    params(
        ("proxy_name" = String, Path, description = "Name of the proxy"),
        ("toxic_name" = String, Path, description = "Name of the toxic to remove")
    ),
    tag = "Toxiproxy",
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 401, description = "Missing, invalid, or expired token"),
        (status = 500, description = "Toxiproxy call failed", body = ErrorBody)
    )
)]
pub async fn delete_toxic(
    Path((proxy_name, toxic_name)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state
        .toxiproxy
        .remove_toxic(&proxy_name, &toxic_name)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
