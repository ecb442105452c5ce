// SPDX-FileCopyrightText: 2026 OmniPA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the OmniPA model router.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and Elm-style diagnostic
//! error rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use omnipa_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Fast tier model: {}", config.routing.fast_model);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::{Path, PathBuf};

use diagnostic::TomlSource;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{IntentKeywords, LogConfig, OmnipaConfig, RoutingConfig, DEFAULT_INTENT_KEYWORDS};

/// Load configuration from the XDG hierarchy and validate it.
///
/// Figment errors come back as miette diagnostics with typo suggestions;
/// validation errors are all collected rather than stopping at the first.
pub fn load_and_validate() -> Result<OmnipaConfig, Vec<ConfigError>> {
    checked(loader::load_config(), || {
        read_sources(&loader::config_file_paths())
    })
}

/// Load configuration from an explicit TOML file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<OmnipaConfig, Vec<ConfigError>> {
    if !path.exists() {
        return Err(vec![ConfigError::Other(format!(
            "config file `{}` does not exist",
            path.display()
        ))]);
    }
    checked(loader::load_config_from_path(path), || {
        read_sources(&[path.to_path_buf()])
    })
}

/// Validate a TOML string on its own, without files or env vars.
pub fn load_and_validate_str(toml_content: &str) -> Result<OmnipaConfig, Vec<ConfigError>> {
    checked(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Validate an extracted config, or convert the extraction error using the
/// TOML text from `sources` for span lookup.
fn checked(
    extracted: Result<OmnipaConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<TomlSource>,
) -> Result<OmnipaConfig, Vec<ConfigError>> {
    let config =
        extracted.map_err(|err| diagnostic::figment_to_config_errors(err, &sources()))?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Read whichever of `paths` exist, named the way figment reports file sources.
fn read_sources(paths: &[PathBuf]) -> Vec<TomlSource> {
    paths
        .iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(path).ok()?;
            let name = std::path::absolute(path).unwrap_or_else(|_| path.clone());
            Some((name.display().to_string(), content))
        })
        .collect()
}
