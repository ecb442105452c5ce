// SPDX-FileCopyrightText: 2026 OmniPA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boundary validation of untyped chat requests.
//!
//! Requests arrive as arbitrary JSON and are deserialized through the same
//! serde impls as [`RouterInput`] itself, so every entry point accepts the
//! same shapes. Errors carry the JSON path of the offending value, e.g.
//! `messages[2].content[1]`.

use serde_json::Value;
use thiserror::Error;

use crate::error::OmnipaError;
use crate::types::RouterInput;

/// Path reported for errors at the document root.
const ROOT_PATH: &str = "$";

/// A request that does not match the conversation shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{path}`: {message}")]
pub struct ValidationError {
    /// JSON path of the offending value, `$` for the document root.
    pub path: String,
    pub message: String,
}

impl From<serde_path_to_error::Error<serde_json::Error>> for ValidationError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = match err.path().to_string() {
            p if p == "." => ROOT_PATH.to_string(),
            p => p,
        };
        Self {
            path,
            message: err.into_inner().to_string(),
        }
    }
}

/// Parse a request body string into a [`RouterInput`].
///
/// Malformed JSON is reported as [`OmnipaError::Json`]; well-formed JSON of
/// the wrong shape as [`OmnipaError::Validation`].
pub fn parse_router_input_str(body: &str) -> Result<RouterInput, OmnipaError> {
    let value: Value = serde_json::from_str(body)?;
    Ok(parse_router_input(&value)?)
}

/// Validate a JSON value and convert it into a [`RouterInput`].
///
/// Accepts either `{"messages": [...]}` or a bare message array.
pub fn parse_router_input(value: &Value) -> Result<RouterInput, ValidationError> {
    Ok(serde_path_to_error::deserialize(value)?)
}
