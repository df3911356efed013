// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup into an
//! immutable [`GatewayConfig`]. Nothing here changes for the lifetime of the
//! process.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | Secret used to sign and verify login tokens | Required |
//! | `TOXIPROXY_URL` | Base URL of the Toxiproxy management API | `http://localhost:8474` |
//! | `GATEWAY_USERNAME` | Login username | Required |
//! | `GATEWAY_PASSWORD` | Login password | Required |
//! | `DASHBOARD_DIR` | Directory served under `/dashboard` | `./dashboard` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8000` |
//! | `TLS_CERT_PATH` | PEM certificate chain (enables HTTPS with `TLS_KEY_PATH`) | Optional |
//! | `TLS_KEY_PATH` | PEM private key | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{
    collections::HashMap,
    net::SocketAddr,
    path::PathBuf,
    time::Duration,
};

use url::Url;

pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const TOXIPROXY_URL_ENV: &str = "TOXIPROXY_URL";
pub const USERNAME_ENV: &str = "GATEWAY_USERNAME";
pub const PASSWORD_ENV: &str = "GATEWAY_PASSWORD";
pub const DASHBOARD_DIR_ENV: &str = "DASHBOARD_DIR";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_TOXIPROXY_URL: &str = "http://localhost:8474";
pub const DEFAULT_DASHBOARD_DIR: &str = "./dashboard";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Default `RUST_LOG` filter when the variable is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Upper bound for a single inbound request and for each upstream call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {0} must not be empty")]
    Empty(&'static str),

    #[error("invalid Toxiproxy URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid bind address {0:?}")]
    InvalidBindAddress(String),

    #[error("dashboard directory does not exist: {}", .0.display())]
    DashboardMissing(PathBuf),

    #[error("{TLS_CERT_PATH_ENV} and {TLS_KEY_PATH_ENV} must be set together")]
    IncompleteTls,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Static login credentials.
///
/// Compared by exact equality, never hashed or versioned.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

// Keep the password out of logs and panics.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Immutable process configuration.
#[derive(Clone)]
pub struct GatewayConfig {
    pub jwt_secret: String,
    pub toxiproxy_url: Url,
    pub credentials: Credentials,
    pub dashboard_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub tls: Option<TlsPaths>,
    pub log_format: LogFormat,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("jwt_secret", &"<redacted>")
            .field("toxiproxy_url", &self.toxiproxy_url.as_str())
            .field("credentials", &self.credentials)
            .field("dashboard_dir", &self.dashboard_dir)
            .field("bind_addr", &self.bind_addr)
            .field("tls", &self.tls)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl GatewayConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_lookup(|name| vars.get(name).cloned())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Tests use this to avoid mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = required(&lookup, JWT_SECRET_ENV)?;
        let username = required(&lookup, USERNAME_ENV)?;
        let password = required(&lookup, PASSWORD_ENV)?;

        let toxiproxy_url = parse_toxiproxy_url(
            &lookup(TOXIPROXY_URL_ENV).unwrap_or_else(|| DEFAULT_TOXIPROXY_URL.to_string()),
        )?;

        let dashboard_dir = PathBuf::from(
            lookup(DASHBOARD_DIR_ENV).unwrap_or_else(|| DEFAULT_DASHBOARD_DIR.to_string()),
        );
        if !dashboard_dir.is_dir() {
            return Err(ConfigError::DashboardMissing(dashboard_dir));
        }

        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup(PORT_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidBindAddress(format!("{host}:{raw}")))?,
            None => DEFAULT_PORT,
        };
        let bind_addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(format!("{host}:{port}")))?;

        let tls = match (lookup(TLS_CERT_PATH_ENV), lookup(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: PathBuf::from(cert),
                key: PathBuf::from(key),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteTls),
        };

        let log_format = LogFormat::parse(lookup(LOG_FORMAT_ENV).as_deref());

        Ok(Self {
            jwt_secret,
            toxiproxy_url,
            credentials: Credentials::new(username, password),
            dashboard_dir,
            bind_addr,
            tls,
            log_format,
        })
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if value.is_empty() => Err(ConfigError::Empty(name)),
        Some(value) => Ok(value),
        None => Err(ConfigError::Missing(name)),
    }
}

/// Parse the Toxiproxy base URL, assuming `http://` when no scheme is given.
pub fn parse_toxiproxy_url(raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    let with_scheme = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };

    let url = Url::parse(&with_scheme).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }

    Ok(url)
}
