// SPDX-FileCopyrightText: 2026 OmniPA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-based intent classification.
//!
//! Assigns one coarse [`Intent`] to the text of a single message using an
//! ordered keyword table. First match wins: the table is scanned in order and
//! the first intent with any keyword occurring as a substring of the
//! lower-cased text is returned. No LLM pre-call, no network, no latency.

use omnipa_config::{IntentKeywords, DEFAULT_INTENT_KEYWORDS};
use omnipa_core::{ContentPart, Intent, MessageContent};
use tracing::trace;

/// Intent returned when no keyword list matches.
pub const NO_MATCH_INTENT: Intent = Intent::GeneralChat;

/// Ordered intent -> keywords table. Order is the tie-break rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    entries: Vec<(Intent, Vec<String>)>,
}

impl KeywordTable {
    /// Build a table from ordered entries. Keywords are stored lower-cased.
    pub fn new<I, K, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Intent, K)>,
        K: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(intent, keywords)| {
                let keywords = keywords
                    .into_iter()
                    .map(|k| k.as_ref().to_lowercase())
                    .collect();
                (intent, keywords)
            })
            .collect();
        Self { entries }
    }

    /// Build a table from the `[[routing.intents]]` configuration entries.
    pub fn from_config(intents: &[IntentKeywords]) -> Self {
        Self::new(
            intents
                .iter()
                .map(|entry| (entry.intent, entry.keywords.iter())),
        )
    }

    /// Entries in scan order.
    pub fn entries(&self) -> &[(Intent, Vec<String>)] {
        &self.entries
    }

    /// First entry with a keyword contained in `lowered`, with that keyword.
    ///
    /// `lowered` must already be lower-cased.
    pub fn first_match(&self, lowered: &str) -> Option<(Intent, &str)> {
        self.entries.iter().find_map(|(intent, keywords)| {
            keywords
                .iter()
                .find(|k| lowered.contains(k.as_str()))
                .map(|k| (*intent, k.as_str()))
        })
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_INTENT_KEYWORDS
                .iter()
                .map(|(intent, keywords)| (*intent, keywords.iter())),
        )
    }
}

/// Concatenate the text of a message's content for classification.
///
/// Plain string content is returned as-is. For part lists, the text parts are
/// joined with a single space in their original order; image parts contribute
/// nothing.
pub fn extract_text(content: &MessageContent) -> String {
    match content {
        MessageContent::Text(text) => text.clone(),
        MessageContent::Parts(parts) => parts
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text { text } => Some(text.as_str()),
                ContentPart::ImageUrl { .. } => None,
            })
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Keyword intent classifier over an injected [`KeywordTable`].
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier {
    table: KeywordTable,
}

impl IntentClassifier {
    pub fn new(table: KeywordTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    /// Classify message text. Never returns [`Intent::Unknown`].
    pub fn classify(&self, text: &str) -> Intent {
        let lowered = text.to_lowercase();
        match self.table.first_match(&lowered) {
            Some((intent, keyword)) => {
                trace!(%intent, keyword, "intent keyword matched");
                intent
            }
            None => {
                trace!(intent = %NO_MATCH_INTENT, "no intent keyword matched");
                NO_MATCH_INTENT
            }
        }
    }

    /// Classify the text extracted from a message's content.
    pub fn classify_content(&self, content: &MessageContent) -> Intent {
        self.classify(&extract_text(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_mood_logging() {
        let c = IntentClassifier::default();
        assert_eq!(
            c.classify("I want to log my mood, I felt pretty happy this morning."),
            Intent::MoodLogging
        );
        assert_eq!(c.classify("feeling anxious today"), Intent::MoodLogging);
    }

    #[test]
    fn classify_goal_and_travel() {
        let c = IntentClassifier::default();
        assert_eq!(c.classify("Help me set a goal for Q3"), Intent::GoalPlanning);
        assert_eq!(c.classify("Book a hotel in Lisbon"), Intent::TravelPlanning);
    }

    #[test]
    fn classify_shopping_list() {
        let c = IntentClassifier::default();
        assert_eq!(
            c.classify("Add milk and bread to my shopping list."),
            Intent::ShoppingList
        );
    }

    #[test]
    fn classify_simple_question() {
        let c = IntentClassifier::default();
        assert_eq!(c.classify("What is the capital of Peru?"), Intent::SimpleQuestion);
    }

    #[test]
    fn classify_complex_reasoning() {
        let c = IntentClassifier::default();
        assert_eq!(
            c.classify(
                "Can you explain the pros and cons of functional programming vs object-oriented programming?"
            ),
            Intent::ComplexReasoning
        );
    }

    #[test]
    fn classify_greeting() {
        let c = IntentClassifier::default();
        assert_eq!(c.classify("Hello!"), Intent::GeneralChat);
    }

    #[test]
    fn earlier_table_entry_wins() {
        let c = IntentClassifier::default();
        // "goal" and "mood" both match; mood_logging is scanned first.
        assert_eq!(c.classify("set a goal to log my mood"), Intent::MoodLogging);
        // "trip" (travel) and "buy" (shopping): travel is scanned first.
        assert_eq!(c.classify("buy snacks for the trip"), Intent::TravelPlanning);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let c = IntentClassifier::default();
        assert_eq!(c.classify("MY MOODBOARD"), Intent::MoodLogging);
        // "hi" is a plain substring match, so it also fires inside words.
        assert_eq!(c.classify("this one"), Intent::GeneralChat);
    }

    #[test]
    fn no_match_is_general_chat_never_unknown() {
        let c = IntentClassifier::default();
        assert_eq!(c.classify("ok cool"), Intent::GeneralChat);
        assert_eq!(c.classify(""), Intent::GeneralChat);
    }

    #[test]
    fn injected_table_overrides_default_order() {
        let table = KeywordTable::new([
            (Intent::GoalPlanning, vec!["goal"]),
            (Intent::MoodLogging, vec!["mood"]),
        ]);
        let c = IntentClassifier::new(table);
        assert_eq!(c.classify("set a goal to log my mood"), Intent::GoalPlanning);
    }

    #[test]
    fn injected_table_without_catch_all_still_falls_back() {
        let table = KeywordTable::new([(Intent::ShoppingList, vec!["buy"])]);
        let c = IntentClassifier::new(table);
        assert_eq!(c.classify("hello"), Intent::GeneralChat);
    }

    #[test]
    fn injected_keywords_are_lowercased() {
        let table = KeywordTable::new([(Intent::TravelPlanning, vec!["Itinerary"])]);
        assert_eq!(table.entries()[0].1, vec!["itinerary".to_string()]);
        let c = IntentClassifier::new(table);
        assert_eq!(c.classify("share the ITINERARY"), Intent::TravelPlanning);
    }

    #[test]
    fn extract_text_joins_text_parts_with_space() {
        let content = MessageContent::Parts(vec![
            ContentPart::text("a"),
            ContentPart::image("data:image/png;base64,AAAA"),
            ContentPart::text("b"),
        ]);
        assert_eq!(extract_text(&content), "a b");
    }

    #[test]
    fn extract_text_plain_string_is_unchanged() {
        let content = MessageContent::from("  keep  spacing ");
        assert_eq!(extract_text(&content), "  keep  spacing ");
    }

    #[test]
    fn extract_text_image_only_is_empty() {
        let content = MessageContent::Parts(vec![ContentPart::image("https://x/y.png")]);
        assert_eq!(extract_text(&content), "");
    }

    #[test]
    fn classify_content_uses_extracted_text() {
        let c = IntentClassifier::default();
        let content = MessageContent::Parts(vec![
            ContentPart::text("what groceries"),
            ContentPart::text("do I need?"),
        ]);
        assert_eq!(c.classify_content(&content), Intent::ShoppingList);
    }

    #[test]
    fn default_table_matches_config_defaults() {
        let from_config = KeywordTable::from_config(&omnipa_config::model::default_intents());
        assert_eq!(from_config, KeywordTable::default());
    }
}
