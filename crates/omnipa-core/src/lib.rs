// SPDX-FileCopyrightText: 2026 OmniPA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the OmniPA model router.
//!
//! This crate provides the conversation model consumed by the router, the
//! routing decision it produces, the workspace error type, and validation
//! of untyped request bodies at the system boundary.

pub mod error;
pub mod types;
pub mod validate;

// Re-export key items at crate root for ergonomic imports.
pub use error::OmnipaError;
pub use types::{
    ContentPart, GenerationConfig, ImageUrl, Intent, Message, MessageContent, ModelSelection,
    ModelTier, Role, RouterInput,
};
pub use validate::{parse_router_input, parse_router_input_str, ValidationError};
