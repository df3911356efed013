// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::time::Duration;

use axum_server::{tls_rustls::RustlsConfig, Handle};
use toxiproxy_gateway::{
    api::router,
    config::{GatewayConfig, TlsPaths},
    state::AppState,
    telemetry,
};
use tracing::{info, warn};

/// How long in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = GatewayConfig::from_env()?;
    telemetry::init(config.log_format)?;

    let state = AppState::from_config(&config)?;
    let app = router(state);

    info!(
        toxiproxy = %config.toxiproxy_url,
        dashboard = %config.dashboard_dir.display(),
        "Configuration loaded"
    );

    let handle = Handle::new();
    let shutdown = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received, draining connections");
        shutdown.graceful_shutdown(Some(SHUTDOWN_GRACE));
    });

    match &config.tls {
        Some(tls) => {
            let tls_config = load_tls(tls).await?;
            info!("Toxiproxy gateway listening on https://{} (docs at /docs)", config.bind_addr);
            axum_server::bind_rustls(config.bind_addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            info!("Toxiproxy gateway listening on http://{} (docs at /docs)", config.bind_addr);
            axum_server::bind(config.bind_addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
    }

    info!("Server stopped");
    Ok(())
}

async fn load_tls(paths: &TlsPaths) -> Result<RustlsConfig, Box<dyn std::error::Error>> {
    // Install the ring crypto provider for rustls (must be done before any TLS operations)
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("rustls crypto provider was already installed");
    }

    let config = RustlsConfig::from_pem_file(&paths.cert, &paths.key).await?;
    info!(cert = %paths.cert.display(), "Loaded TLS certificate");
    Ok(config)
}

/// Resolve on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
