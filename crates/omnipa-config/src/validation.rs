// SPDX-FileCopyrightText: 2026 OmniPA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as parameter ranges and keyword table consistency.

use std::collections::HashSet;

use omnipa_core::GenerationConfig;

use crate::diagnostic::ConfigError;
use crate::model::OmnipaConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &OmnipaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let routing = &config.routing;

    if !LOG_LEVELS.contains(&config.log.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.log.level
            ),
        });
    }

    if routing.fast_model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "routing.fast_model must not be empty".to_string(),
        });
    }

    if routing.capable_model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "routing.capable_model must not be empty".to_string(),
        });
    }

    if routing.long_conversation_threshold < 1 {
        errors.push(ConfigError::Validation {
            message: "routing.long_conversation_threshold must be at least 1, got 0".to_string(),
        });
    }

    let bundles = [
        ("fallback", &routing.fallback),
        ("vision", &routing.vision),
        ("complex", &routing.complex),
        ("long_context", &routing.long_context),
        ("simple", &routing.simple),
    ];
    for (name, bundle) in bundles {
        validate_bundle(name, bundle, &mut errors);
    }

    if routing.intents.is_empty() {
        errors.push(ConfigError::Validation {
            message: "routing.intents must not be empty".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (i, entry) in routing.intents.iter().enumerate() {
        if !seen.insert(entry.intent) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "duplicate intent `{}` in [[routing.intents]] (entry {i})",
                    entry.intent
                ),
            });
        }
        if entry.keywords.iter().any(|k| k.trim().is_empty()) {
            errors.push(ConfigError::Validation {
                message: format!("routing.intents[{i}] contains an empty keyword"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_bundle(name: &str, bundle: &GenerationConfig, errors: &mut Vec<ConfigError>) {
    if !(0.0..=2.0).contains(&bundle.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "routing.{name}.temperature must be between 0 and 2, got {}",
                bundle.temperature
            ),
        });
    }

    if bundle.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: format!("routing.{name}.max_tokens must be greater than 0"),
        });
    }

    if let Some(top_p) = bundle.top_p {
        if !(top_p > 0.0 && top_p <= 1.0) {
            errors.push(ConfigError::Validation {
                message: format!("routing.{name}.top_p must be in (0, 1], got {top_p}"),
            });
        }
    }
}
