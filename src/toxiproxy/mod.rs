// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Client for the Toxiproxy management API.
//!
//! Each method is a single HTTP call. Non-2xx answers become
//! [`ToxiproxyError::Api`] carrying Toxiproxy's own error message; nothing is
//! retried.

pub mod error;
pub mod models;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, info};
use url::Url;

use crate::config::REQUEST_TIMEOUT;

pub use error::ToxiproxyError;
pub use models::{Proxy, ProxyMap, Toxic};

const LIST_PROXIES: &str = "list proxies";
const GET_PROXY: &str = "get proxy";
const LIST_TOXICS: &str = "list toxics";
const ADD_TOXIC: &str = "add toxic";
const REMOVE_TOXIC: &str = "remove toxic";

/// Error body Toxiproxy sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct ToxiproxyClient {
    base_url: Url,
    http: Client,
}

impl ToxiproxyClient {
    /// Build a client for the API rooted at `base_url`.
    pub fn new(base_url: Url) -> Result<Self, ToxiproxyError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| ToxiproxyError::Request {
                operation: "build client",
                source,
            })?;

        Ok(Self { base_url, http })
    }

    /// `GET /proxies`
    pub async fn proxies(&self) -> Result<ProxyMap, ToxiproxyError> {
        let url = self.endpoint(LIST_PROXIES, &["proxies"])?;
        let response = self.send(LIST_PROXIES, self.http.get(url)).await?;
        decode(LIST_PROXIES, response).await
    }

    /// `GET /proxies/{name}`
    pub async fn proxy(&self, name: &str) -> Result<Proxy, ToxiproxyError> {
        let url = self.endpoint(GET_PROXY, &["proxies", name])?;
        let response = self.send(GET_PROXY, self.http.get(url)).await?;
        decode(GET_PROXY, response).await
    }

    /// `GET /proxies/{proxy}/toxics`
    pub async fn toxics(&self, proxy: &str) -> Result<Vec<Toxic>, ToxiproxyError> {
        let url = self.endpoint(LIST_TOXICS, &["proxies", proxy, "toxics"])?;
        let response = self.send(LIST_TOXICS, self.http.get(url)).await?;
        decode(LIST_TOXICS, response).await
    }

    /// `POST /proxies/{proxy}/toxics`
    pub async fn add_toxic(&self, proxy: &str, toxic: &Toxic) -> Result<Toxic, ToxiproxyError> {
        let url = self.endpoint(ADD_TOXIC, &["proxies", proxy, "toxics"])?;
        let response = self.send(ADD_TOXIC, self.http.post(url).json(toxic)).await?;
        let created: Toxic = decode(ADD_TOXIC, response).await?;

        info!(
            proxy = %proxy,
            toxic = %created.name,
            kind = %created.kind,
            stream = %created.stream,
            "Toxic added"
        );
        Ok(created)
    }

    /// `DELETE /proxies/{proxy}/toxics/{toxic}`
    pub async fn remove_toxic(&self, proxy: &str, toxic: &str) -> Result<(), ToxiproxyError> {
        let url = self.endpoint(REMOVE_TOXIC, &["proxies", proxy, "toxics", toxic])?;
        self.send(REMOVE_TOXIC, self.http.delete(url)).await?;

        info!(proxy = %proxy, toxic = %toxic, "Toxic removed");
        Ok(())
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, operation: &'static str, segments: &[&str]) -> Result<Url, ToxiproxyError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ToxiproxyError::InvalidUrl {
                operation,
                reason: format!("{} cannot be a base URL", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, ToxiproxyError> {
        let response = request
            .send()
            .await
            .map_err(|source| ToxiproxyError::Request { operation, source })?;

        let status = response.status();
        debug!(operation, status = status.as_u16(), "Toxiproxy responded");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ToxiproxyError::Api {
            operation,
            status,
            message: error_message(status, &body),
        })
    }
}

async fn decode<T: DeserializeOwned>(
    operation: &'static str,
    response: Response,
) -> Result<T, ToxiproxyError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|source| ToxiproxyError::Request { operation, source })?;

    serde_json::from_slice(&bytes).map_err(|e| ToxiproxyError::Decode {
        operation,
        reason: e.to_string(),
    })
}

/// Prefer Toxiproxy's `{"error": ...}` message, then the raw body, then the
/// status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        return parsed.error;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_string()
    } else {
        trimmed.to_string()
    }
}
