// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JSON request bodies.
//!
//! Unlike `axum::Json`, this does not require a `Content-Type` header and maps
//! every decoding failure to `400 Invalid request`. Only the first JSON value
//! in the body is read; anything after it is ignored.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub const INVALID_REQUEST: &str = "Invalid request";

pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "failed to read request body");
            ApiError::bad_request(INVALID_REQUEST)
        })?;

        match serde_json::Deserializer::from_slice(&bytes)
            .into_iter::<T>()
            .next()
        {
            Some(Ok(value)) => Ok(JsonBody(value)),
            Some(Err(e)) => {
                tracing::debug!(error = %e, "request body is not valid JSON");
                Err(ApiError::bad_request(INVALID_REQUEST))
            }
            None => {
                tracing::debug!("request body is empty");
                Err(ApiError::bad_request(INVALID_REQUEST))
            }
        }
    }
}
