// SPDX-FileCopyrightText: 2026 OmniPA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./omnipa.toml` > `~/.config/omnipa/omnipa.toml` > `/etc/omnipa/omnipa.toml`
//! with environment variable overrides via `OMNIPA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::OmnipaConfig;

/// Config file name looked up in every hierarchy level.
pub const CONFIG_FILE_NAME: &str = "omnipa.toml";

/// Sections addressable from `OMNIPA_<SECTION>_<KEY>` environment variables.
const ENV_SECTIONS: &[&str] = &["routing", "log"];

/// System-wide config path.
pub fn system_config_path() -> PathBuf {
    Path::new("/etc/omnipa").join(CONFIG_FILE_NAME)
}

/// Per-user XDG config path, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("omnipa").join(CONFIG_FILE_NAME))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/omnipa/omnipa.toml` (system-wide)
/// 3. `~/.config/omnipa/omnipa.toml` (user XDG config)
/// 4. `./omnipa.toml` (local directory)
/// 5. `OMNIPA_*` environment variables
pub fn load_config() -> Result<OmnipaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<OmnipaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OmnipaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<OmnipaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OmnipaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Config files of the hierarchy in merge order, lowest precedence first.
pub fn config_file_paths() -> Vec<PathBuf> {
    let mut paths = vec![system_config_path()];
    paths.extend(user_config_path());
    paths.push(PathBuf::from(CONFIG_FILE_NAME));
    paths
}

/// The unextracted Figment for the full hierarchy.
pub fn build_figment() -> Figment {
    config_file_paths()
        .into_iter()
        .fold(
            Figment::new().merge(Serialized::defaults(OmnipaConfig::default())),
            |figment, path| figment.merge(Toml::file(path)),
        )
        .merge(env_provider())
}

/// Create the environment variable provider with explicit section mapping.
///
/// Only the leading section name is turned into a dot, so
/// `OMNIPA_ROUTING_LONG_CONVERSATION_THRESHOLD` maps to
/// `routing.long_conversation_threshold`, not `routing.long.conversation.threshold`.
/// Parameter bundles and the keyword table are TOML-only.
fn env_provider() -> Env {
    Env::prefixed("OMNIPA_").map(|key| {
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = ENV_SECTIONS
            .iter()
            .find_map(|&section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or(key_str);
        mapped.into()
    })
}
