// SPDX-FileCopyrightText: 2026 OmniPA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model tier selection for a conversation.
//!
//! Evaluates a short decision table once per request, first applicable rule wins:
//! no user message > image present > intent class (with long-conversation upgrade).

use omnipa_config::RoutingConfig;
use omnipa_core::{GenerationConfig, Intent, ModelSelection, ModelTier, RouterInput};
use tracing::debug;

use crate::intent::{extract_text, IntentClassifier, KeywordTable};

const NO_USER_CONFIDENCE: f32 = 0.5;
const IMAGE_CONFIDENCE: f32 = 1.0;
const COMPLEX_CONFIDENCE: f32 = 0.9;
const LONG_CONTEXT_CONFIDENCE: f32 = 0.75;
const SIMPLE_CONFIDENCE: f32 = 0.85;
const UNKNOWN_CONFIDENCE: f32 = 0.6;

/// How an intent is treated by the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentClass {
    /// Always needs the capable tier.
    Complex,
    /// Fast tier unless the conversation is long.
    Simple,
    /// Not produced by the classifier today; routed to the fast tier.
    Unrouted,
}

impl IntentClass {
    pub fn of(intent: Intent) -> Self {
        match intent {
            Intent::GoalPlanning | Intent::TravelPlanning | Intent::ComplexReasoning => {
                IntentClass::Complex
            }
            Intent::MoodLogging
            | Intent::ShoppingList
            | Intent::SimpleQuestion
            | Intent::GeneralChat => IntentClass::Simple,
            Intent::ImageAnalysis | Intent::Unknown => IntentClass::Unrouted,
        }
    }
}

/// Picks a model tier and generation parameters for a conversation.
///
/// Stateless and immutable after construction; `select` is a pure function of
/// its input and may be called concurrently from any number of requests.
#[derive(Debug, Clone)]
pub struct ModelSelector {
    classifier: IntentClassifier,
    config: RoutingConfig,
}

impl ModelSelector {
    /// Create a selector whose keyword table comes from `config.intents`.
    pub fn new(config: RoutingConfig) -> Self {
        let classifier = IntentClassifier::new(KeywordTable::from_config(&config.intents));
        Self { classifier, config }
    }

    /// Create a selector with an explicit classifier. `config.intents` is ignored.
    pub fn with_classifier(classifier: IntentClassifier, config: RoutingConfig) -> Self {
        Self { classifier, config }
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Upstream model identifier configured for a tier.
    pub fn model_for_tier(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Fast => &self.config.fast_model,
            ModelTier::Capable => &self.config.capable_model,
        }
    }

    /// Route a conversation.
    ///
    /// Rule order:
    /// 1. No user message: fast tier fallback
    /// 2. Latest user message carries an image: capable tier, full confidence
    /// 3. Intent of the latest user message, with long conversations
    ///    upgrading simple intents to the capable tier
    pub fn select(&self, input: &RouterInput) -> ModelSelection {
        let selection = self.decide(input);
        debug!(
            tier = %selection.tier,
            model = selection.model.as_str(),
            confidence = selection.confidence,
            intent = ?selection.intent,
            messages = input.len(),
            reason = selection.reason.as_str(),
            "model selected"
        );
        selection
    }

    fn decide(&self, input: &RouterInput) -> ModelSelection {
        let Some(last_user) = input.last_user_message() else {
            return self.selection(
                ModelTier::Fast,
                self.config.fallback,
                NO_USER_CONFIDENCE,
                "No user message found, defaulting to cost-effective model.".to_string(),
                None,
            );
        };

        if last_user.content.has_image() {
            let reason = format!(
                "Image analysis requires {} vision capabilities.",
                self.config.capable_model
            );
            return self.selection(
                ModelTier::Capable,
                self.config.vision,
                IMAGE_CONFIDENCE,
                reason,
                None,
            );
        }

        let intent = self.classifier.classify(&extract_text(&last_user.content));
        let conversation_length = input.len();

        match IntentClass::of(intent) {
            IntentClass::Complex => {
                let reason = format!(
                    "Complex task detected (intent: {intent}), requires {}.",
                    self.config.capable_model
                );
                self.selection(
                    ModelTier::Capable,
                    self.config.complex,
                    COMPLEX_CONFIDENCE,
                    reason,
                    Some(intent),
                )
            }
            IntentClass::Simple if conversation_length > self.config.long_conversation_threshold => {
                let reason = format!(
                    "Long conversation history ({conversation_length} messages) warrants using {} for better context handling.",
                    self.config.capable_model
                );
                self.selection(
                    ModelTier::Capable,
                    self.config.long_context,
                    LONG_CONTEXT_CONFIDENCE,
                    reason,
                    Some(intent),
                )
            }
            IntentClass::Simple => {
                let reason = format!(
                    "Simple task detected (intent: {intent}), routed to {} for speed and cost-efficiency.",
                    self.config.fast_model
                );
                self.selection(
                    ModelTier::Fast,
                    self.config.simple,
                    SIMPLE_CONFIDENCE,
                    reason,
                    Some(intent),
                )
            }
            IntentClass::Unrouted => self.selection(
                ModelTier::Fast,
                self.config.simple,
                UNKNOWN_CONFIDENCE,
                "Unknown intent, defaulting to cost-effective model.".to_string(),
                Some(intent),
            ),
        }
    }

    fn selection(
        &self,
        tier: ModelTier,
        config: GenerationConfig,
        confidence: f32,
        reason: String,
        intent: Option<Intent>,
    ) -> ModelSelection {
        ModelSelection {
            tier,
            model: self.model_for_tier(tier).to_string(),
            config,
            confidence,
            reason,
            intent,
        }
    }
}

impl Default for ModelSelector {
    fn default() -> Self {
        Self::new(RoutingConfig::default())
    }
}
