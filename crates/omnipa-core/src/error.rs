// SPDX-FileCopyrightText: 2026 OmniPA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the OmniPA workspace.

use thiserror::Error;

use crate::validate::ValidationError;

/// The primary error type for operations around the router.
///
/// The router itself is total and never returns an error; these cover the
/// boundary where untyped requests and configuration enter the system.
#[derive(Debug, Error)]
pub enum OmnipaError {
    /// The request did not match the conversation shape.
    #[error("invalid router input: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration errors (invalid TOML, out-of-range tunables).
    #[error("configuration error: {0}")]
    Config(String),

    /// The request body was not valid JSON.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading the request or writing the decision failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
