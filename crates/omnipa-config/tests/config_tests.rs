// SPDX-FileCopyrightText: 2026 OmniPA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the OmniPA configuration system.

use std::path::Path;

use figment::Jail;
use omnipa_config::diagnostic::ConfigError;
use omnipa_config::model::OmnipaConfig;
use omnipa_config::{
    load_and_validate_path, load_and_validate_str, load_config, load_config_from_str,
};
use omnipa_core::{GenerationConfig, Intent};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_omnipa_config() {
    let toml = r#"
[log]
level = "debug"

[routing]
fast_model = "gpt-4.1-mini"
capable_model = "gpt-4.1"
long_conversation_threshold = 20

[routing.vision]
temperature = 0.3
max_tokens = 4096
top_p = 0.9

[[routing.intents]]
intent = "complex_reasoning"
keywords = ["why"]

[[routing.intents]]
intent = "general_chat"
keywords = ["hello"]
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.routing.fast_model, "gpt-4.1-mini");
    assert_eq!(config.routing.capable_model, "gpt-4.1");
    assert_eq!(config.routing.long_conversation_threshold, 20);
    assert_eq!(config.routing.vision.max_tokens, 4096);
    assert_eq!(config.routing.vision.top_p, Some(0.9));
    assert_eq!(config.routing.intents.len(), 2);
    assert_eq!(config.routing.intents[0].intent, Intent::ComplexReasoning);
}

/// Missing optional sections use the built-in routing policy.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.log.level, "info");
    assert_eq!(config.routing.fast_model, "gpt-4o-mini");
    assert_eq!(config.routing.capable_model, "gpt-4o");
    assert_eq!(config.routing.long_conversation_threshold, 10);
    assert_eq!(config.routing.simple, GenerationConfig::new(0.7, 1024));
    assert_eq!(config.routing.intents.len(), 8);
    assert_eq!(config.routing.intents[0].intent, Intent::MoodLogging);
}

/// A partial parameter bundle is merged over the compiled defaults.
#[test]
fn partial_bundle_keeps_default_fields() {
    let toml = r#"
[routing.complex]
temperature = 0.2
"#;

    let config = load_config_from_str(toml).expect("partial bundle should merge");
    assert_eq!(config.routing.complex.temperature, 0.2);
    assert_eq!(config.routing.complex.max_tokens, 2048);
}

/// Unknown field in [routing] produces an unknown-key diagnostic with a suggestion.
#[test]
fn unknown_routing_key_suggests_correction() {
    let toml = r#"
[routing]
fast_modle = "x"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { key, suggestion: Some(s), .. }
            if key == "fast_modle" && s == "fast_model"
    )));
}

/// Unknown intent label produces an unknown-value diagnostic with a suggestion.
#[test]
fn unknown_intent_label_suggests_correction() {
    let toml = r#"
[[routing.intents]]
intent = "shoping_list"
keywords = ["buy"]
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown intent");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownValue { value, suggestion: Some(s), .. }
            if value == "shoping_list" && s == "shopping_list"
    )));
}

/// Wrong value type is reported as an invalid-type diagnostic.
#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[routing]
long_conversation_threshold = "ten"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject string threshold");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidType { .. })));
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[logging]
level = "debug"
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("logging"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Semantic validation runs after a successful parse.
#[test]
fn validation_errors_are_collected() {
    let toml = r#"
[log]
level = "loud"

[routing]
fast_model = ""
long_conversation_threshold = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert_eq!(errors.len(), 3);
}

/// Serialized defaults validate cleanly.
#[test]
fn serialized_defaults_are_valid() {
    let config = OmnipaConfig::default();
    assert!(omnipa_config::validation::validate_config(&config).is_ok());
}

/// The local `omnipa.toml` and `OMNIPA_*` env vars are layered in order.
#[test]
fn local_file_and_env_vars_are_layered() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "omnipa.toml",
            r#"
[routing]
fast_model = "from-file"
capable_model = "capable-from-file"
"#,
        )?;
        jail.set_env("OMNIPA_ROUTING_FAST_MODEL", "from-env");
        jail.set_env("OMNIPA_ROUTING_LONG_CONVERSATION_THRESHOLD", "25");
        jail.set_env("OMNIPA_LOG_LEVEL", "warn");

        let config = load_config()?;
        assert_eq!(config.routing.fast_model, "from-env");
        assert_eq!(config.routing.capable_model, "capable-from-file");
        assert_eq!(config.routing.long_conversation_threshold, 25);
        assert_eq!(config.log.level, "warn");
        Ok(())
    });
}

/// An explicit config path is loaded and validated.
#[test]
fn explicit_path_is_loaded_and_validated() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            r#"
[routing]
long_conversation_threshold = 4
"#,
        )?;

        let config = load_and_validate_path(Path::new("custom.toml"))
            .expect("custom path should validate");
        assert_eq!(config.routing.long_conversation_threshold, 4);

        let errors = load_and_validate_path(Path::new("missing.toml"))
            .expect_err("missing explicit path is an error");
        assert!(matches!(&errors[0], ConfigError::Other(msg) if msg.contains("missing.toml")));
        Ok(())
    });
}

/// Missing hierarchy files are silently skipped.
#[test]
fn missing_config_files_silently_skipped() {
    Jail::expect_with(|_jail| {
        let config = load_config()?;
        assert_eq!(config.routing.fast_model, "gpt-4o-mini");
        Ok(())
    });
}
