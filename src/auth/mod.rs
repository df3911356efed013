// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Login tokens for the Toxiproxy gateway.
//!
//! ## Auth Flow
//!
//! 1. Dashboard posts the configured username/password to `/api/login`
//! 2. Gateway returns an HS256 token carrying the issuance `timestamp`
//! 3. Dashboard sends `Authorization: Bearer <token>` to `/api/toxiproxy/*`
//! 4. Gateway verifies the signature and rejects tokens older than 24 hours
//!
//! Tokens are stateless: they are never stored, revoked, or renewed.

pub mod error;
pub mod middleware;
pub mod token;

pub use error::AuthError;
pub use middleware::require_bearer;
pub use token::{now_millis, TokenCodec, TOKEN_LIFETIME_MILLIS};
