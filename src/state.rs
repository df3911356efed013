// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{path::PathBuf, sync::Arc};

use crate::{
    auth::TokenCodec,
    config::{Credentials, GatewayConfig},
    toxiproxy::{ToxiproxyClient, ToxiproxyError},
};

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<TokenCodec>,
    pub credentials: Arc<Credentials>,
    pub toxiproxy: ToxiproxyClient,
    pub dashboard_dir: PathBuf,
}

impl AppState {
    pub fn new(
        codec: TokenCodec,
        credentials: Credentials,
        toxiproxy: ToxiproxyClient,
        dashboard_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            codec: Arc::new(codec),
            credentials: Arc::new(credentials),
            toxiproxy,
            dashboard_dir: dashboard_dir.into(),
        }
    }

    /// Build the state from loaded configuration.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ToxiproxyError> {
        let toxiproxy = ToxiproxyClient::new(config.toxiproxy_url.clone())?;
        Ok(Self::new(
            TokenCodec::new(config.jwt_secret.as_bytes()),
            config.credentials.clone(),
            toxiproxy,
            config.dashboard_dir.clone(),
        ))
    }
}
