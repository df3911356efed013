// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ToxiproxyError {
    #[error("{operation}: invalid request URL: {reason}")]
    InvalidUrl {
        operation: &'static str,
        reason: String,
    },

    #[error("{operation}: request failed: {source}")]
    Request {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation}: HTTP {}: {message}", .status.as_u16())]
    Api {
        operation: &'static str,
        status: StatusCode,
        message: String,
    },

    #[error("{operation}: invalid response: {reason}")]
    Decode {
        operation: &'static str,
        reason: String,
    },
}
