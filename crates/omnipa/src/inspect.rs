// SPDX-FileCopyrightText: 2026 OmniPA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `omnipa classify`, `omnipa keywords` and `omnipa config` commands.
//!
//! Read-only views of the routing policy built from the loaded configuration.

use std::io::{IsTerminal, Write};

use omnipa_config::OmnipaConfig;
use omnipa_core::{Intent, OmnipaError};
use omnipa_router::{IntentClass, IntentClassifier, KeywordTable};

/// Print the intent label assigned to `text`.
pub fn run_classify(
    config: &OmnipaConfig,
    text: &str,
    out: &mut impl Write,
) -> Result<(), OmnipaError> {
    let classifier = IntentClassifier::new(KeywordTable::from_config(&config.routing.intents));
    writeln!(out, "{}", classifier.classify(text))?;
    Ok(())
}

/// Print the active keyword table in scan order.
///
/// With `--plain`, or when stdout is not a terminal, disables colored output.
pub fn run_keywords(
    config: &OmnipaConfig,
    plain: bool,
    out: &mut impl Write,
) -> Result<(), OmnipaError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let table = KeywordTable::from_config(&config.routing.intents);

    for (position, (intent, keywords)) in table.entries().iter().enumerate() {
        let class = class_label(*intent);
        let keywords = if keywords.is_empty() {
            "(none)".to_string()
        } else {
            keywords.join(", ")
        };

        if use_color {
            use colored::Colorize;
            let class = match IntentClass::of(*intent) {
                IntentClass::Complex => class.yellow(),
                IntentClass::Simple => class.green(),
                IntentClass::Unrouted => class.dimmed(),
            };
            writeln!(
                out,
                "{:>2}. {:<20} {:<8} {}",
                position + 1,
                intent.to_string().bold(),
                class,
                keywords
            )?;
        } else {
            writeln!(
                out,
                "{:>2}. {:<20} {:<8} {}",
                position + 1,
                intent,
                class,
                keywords
            )?;
        }
    }
    Ok(())
}

/// Print the effective configuration as TOML.
pub fn run_config(config: &OmnipaConfig, out: &mut impl Write) -> Result<(), OmnipaError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| OmnipaError::Config(format!("failed to render config: {e}")))?;
    out.write_all(rendered.as_bytes())?;
    Ok(())
}

fn class_label(intent: Intent) -> &'static str {
    match IntentClass::of(intent) {
        IntentClass::Complex => "complex",
        IntentClass::Simple => "simple",
        IntentClass::Unrouted => "unrouted",
    }
}
