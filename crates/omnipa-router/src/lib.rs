// SPDX-FileCopyrightText: 2026 OmniPA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classification and model routing for OmniPA chat requests.
//!
//! This crate provides:
//! - [`IntentClassifier`]: Keyword-table intent classification (zero-cost, zero-latency)
//! - [`ModelSelector`]: Tier selection with image, intent, and conversation-length rules
//!
//! The selector runs inline in the chat endpoint before the upstream
//! completion call, choosing the fast or capable model tier and the
//! generation parameters to relay. It performs no I/O and never fails.

pub mod intent;
pub mod selector;

pub use intent::{extract_text, IntentClassifier, KeywordTable};
pub use selector::{IntentClass, ModelSelector};
