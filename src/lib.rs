// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Toxiproxy Gateway - Authenticated Toxiproxy Management API
//!
//! Exposes a subset of the Toxiproxy management API (proxies and toxics)
//! behind a username/password login with 24-hour bearer tokens, and serves
//! the static dashboard UI.
//!
//! ## Modules
//!
//! - `api` - HTTP routes and handlers (Axum)
//! - `auth` - Token codec and bearer gate
//! - `config` - Environment configuration
//! - `toxiproxy` - Toxiproxy management API client

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod state;
pub mod telemetry;
pub mod toxiproxy;
