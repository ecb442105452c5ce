// SPDX-FileCopyrightText: 2026 OmniPA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the OmniPA model router.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages. Every default
//! reproduces the router's built-in routing policy exactly.

use omnipa_core::{GenerationConfig, Intent};
use serde::{Deserialize, Serialize};

/// Built-in intent keyword table, in scan order.
///
/// The classifier returns the first intent with any matching keyword, so the
/// order of this table is the tie-break rule. `ImageAnalysis` has no keywords;
/// image routing is structural and handled by the selector.
pub const DEFAULT_INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::MoodLogging,
        &[
            "mood", "feel", "feeling", "felt", "sad", "happy", "anxious", "stressed",
            "log my mood",
        ],
    ),
    (
        Intent::GoalPlanning,
        &[
            "goal", "plan", "objective", "milestone", "achieve", "deadline", "progress",
            "set a goal",
        ],
    ),
    (
        Intent::TravelPlanning,
        &[
            "travel", "trip", "vacation", "itinerary", "booking", "fly", "hotel",
            "destination",
        ],
    ),
    (
        Intent::ShoppingList,
        &[
            "shopping", "groceries", "buy", "add to list", "purchase", "market", "store",
            "receipt",
        ],
    ),
    (Intent::ImageAnalysis, &[]),
    (
        Intent::SimpleQuestion,
        &["what is", "who is", "when is", "where is", "how to", "define"],
    ),
    (
        Intent::ComplexReasoning,
        &["why", "explain", "compare", "contrast", "analyze", "what if", "how does"],
    ),
    (
        Intent::GeneralChat,
        &["hello", "hi", "how are you", "thanks", "thank you"],
    ),
];

/// Top-level OmniPA router configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to the built-in policy.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OmnipaConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Model routing settings.
    #[serde(default)]
    pub routing: RoutingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Model routing configuration.
///
/// Changing any of these values changes routing behavior.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Upstream model identifier for the fast/cheap tier.
    #[serde(default = "default_fast_model")]
    pub fast_model: String,

    /// Upstream model identifier for the capable/expensive tier.
    #[serde(default = "default_capable_model")]
    pub capable_model: String,

    /// Conversations with strictly more messages than this are upgraded to
    /// the capable tier even for simple intents.
    #[serde(default = "default_long_conversation_threshold")]
    pub long_conversation_threshold: usize,

    /// Parameters when the conversation has no user message.
    #[serde(default = "default_fallback_params")]
    pub fallback: GenerationConfig,

    /// Parameters when the latest user message carries an image.
    #[serde(default = "default_vision_params")]
    pub vision: GenerationConfig,

    /// Parameters for intrinsically complex intents.
    #[serde(default = "default_complex_params")]
    pub complex: GenerationConfig,

    /// Parameters for simple intents in long conversations.
    #[serde(default = "default_long_context_params")]
    pub long_context: GenerationConfig,

    /// Parameters for simple intents in short conversations, and for the
    /// unknown-intent default.
    #[serde(default = "default_simple_params")]
    pub simple: GenerationConfig,

    /// Ordered intent keyword table. Replaces the built-in table entirely
    /// when set.
    #[serde(default = "default_intents")]
    pub intents: Vec<IntentKeywords>,
}

/// One entry of the ordered keyword table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IntentKeywords {
    pub intent: Intent,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            fast_model: default_fast_model(),
            capable_model: default_capable_model(),
            long_conversation_threshold: default_long_conversation_threshold(),
            fallback: default_fallback_params(),
            vision: default_vision_params(),
            complex: default_complex_params(),
            long_context: default_long_context_params(),
            simple: default_simple_params(),
            intents: default_intents(),
        }
    }
}

fn default_fast_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_capable_model() -> String {
    "gpt-4o".to_string()
}

fn default_long_conversation_threshold() -> usize {
    10
}

fn default_fallback_params() -> GenerationConfig {
    GenerationConfig::new(0.7, 1024)
}

fn default_vision_params() -> GenerationConfig {
    GenerationConfig::new(0.5, 2048)
}

fn default_complex_params() -> GenerationConfig {
    GenerationConfig::new(0.7, 2048)
}

fn default_long_context_params() -> GenerationConfig {
    GenerationConfig::new(0.7, 1500)
}

fn default_simple_params() -> GenerationConfig {
    GenerationConfig::new(0.7, 1024)
}

pub fn default_intents() -> Vec<IntentKeywords> {
    DEFAULT_INTENT_KEYWORDS
        .iter()
        .map(|(intent, keywords)| IntentKeywords {
            intent: *intent,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        })
        .collect()
}
