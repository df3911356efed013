// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Toxiproxy API payloads.
//!
//! These mirror what Toxiproxy returns and are forwarded to clients as-is.
//! Every field defaults, and an explicit `null` also decodes as the zero
//! value, so decoding only checks JSON structure.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Decode `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A fault ("toxic") attached to one direction of a proxy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(default)]
pub struct Toxic {
    /// Unique name within the proxy.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Toxic kind, e.g. `latency`, `timeout`, `bandwidth`.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// `upstream` or `downstream`.
    #[serde(deserialize_with = "null_as_default")]
    pub stream: String,
    /// Probability (0.0 to 1.0) that the toxic applies to a connection.
    #[serde(deserialize_with = "null_as_default")]
    pub toxicity: f32,
    /// Kind-specific settings, e.g. `{"latency": 1000}`.
    #[schema(value_type = Object)]
    #[serde(deserialize_with = "null_as_default")]
    pub attributes: Map<String, Value>,
}

/// A Toxiproxy proxy and its active toxics.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(default)]
pub struct Proxy {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Address Toxiproxy listens on.
    #[serde(deserialize_with = "null_as_default")]
    pub listen: String,
    /// Address traffic is forwarded to.
    #[serde(deserialize_with = "null_as_default")]
    pub upstream: String,
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,
    /// Active toxics.
    #[serde(deserialize_with = "null_as_default")]
    pub toxics: Vec<Toxic>,
}

/// All proxies, keyed by proxy name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(transparent)]
pub struct ProxyMap(pub BTreeMap<String, Proxy>);
