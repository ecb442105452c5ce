// SPDX-FileCopyrightText: 2026 OmniPA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation and routing-decision types shared across the OmniPA workspace.

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Author of a conversation turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// Reference to an image attached to a message. Never fetched or decoded.
///
/// Deserializes from `{"url": "..."}` or a bare URL string; always serializes
/// as the object form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ImageUrlRepr")]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Deserialize)]
#[serde(untagged, expecting = "an object with a `url` string, or a URL string")]
enum ImageUrlRepr {
    Object { url: String },
    Url(String),
}

impl From<ImageUrlRepr> for ImageUrl {
    fn from(repr: ImageUrlRepr) -> Self {
        match repr {
            ImageUrlRepr::Object { url } | ImageUrlRepr::Url(url) => Self { url },
        }
    }
}

/// One unit of a multi-modal message.
///
/// Serializes in the chat-completions wire shape:
/// `{"type":"text","text":"..."}` and `{"type":"image_url","image_url":{"url":"..."}}`.
/// Image parts are also accepted as `{"type":"image_url","url":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text {
        text: String,
    },
    ImageUrl {
        #[serde(alias = "url")]
        image_url: ImageUrl,
    },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image(url: impl Into<String>) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, ContentPart::ImageUrl { .. })
    }
}

/// Message body: either a plain string or an ordered list of parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

// Hand-written so errors inside a part list keep their element index.
impl<'de> Deserialize<'de> for MessageContent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ContentVisitor;

        impl<'de> Visitor<'de> for ContentVisitor {
            type Value = MessageContent;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string or an array of content parts")
            }

            fn visit_str<E: de::Error>(self, text: &str) -> Result<Self::Value, E> {
                Ok(MessageContent::Text(text.to_string()))
            }

            fn visit_string<E: de::Error>(self, text: String) -> Result<Self::Value, E> {
                Ok(MessageContent::Text(text))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut parts = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(part) = seq.next_element()? {
                    parts.push(part);
                }
                Ok(MessageContent::Parts(parts))
            }
        }

        deserializer.deserialize_any(ContentVisitor)
    }
}

impl MessageContent {
    /// True when the content is a part list holding at least one image.
    ///
    /// A plain string never counts as carrying an image, even if it contains
    /// something that looks like a URL.
    pub fn has_image(&self) -> bool {
        match self {
            MessageContent::Text(_) => false,
            MessageContent::Parts(parts) => parts.iter().any(ContentPart::is_image),
        }
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        MessageContent::Text(text)
    }
}

impl From<Vec<ContentPart>> for MessageContent {
    fn from(parts: Vec<ContentPart>) -> Self {
        MessageContent::Parts(parts)
    }
}

/// One turn in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    pub fn new(role: Role, content: impl Into<MessageContent>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::System, content)
    }
}

/// The full conversation handed to the router, oldest message first.
///
/// Deserializes from a request body `{"messages": [...]}` (other top-level
/// fields are ignored) or from a bare message array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouterInput {
    pub messages: Vec<Message>,
}

impl<'de> Deserialize<'de> for RouterInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct InputVisitor;

        impl<'de> Visitor<'de> for InputVisitor {
            type Value = RouterInput;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object with a `messages` array, or an array of messages")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut messages = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(message) = seq.next_element()? {
                    messages.push(message);
                }
                Ok(RouterInput::new(messages))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut messages: Option<Vec<Message>> = None;
                while let Some(key) = map.next_key::<String>()? {
                    if key == "messages" {
                        if messages.is_some() {
                            return Err(de::Error::duplicate_field("messages"));
                        }
                        messages = Some(map.next_value()?);
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                let messages = messages.ok_or_else(|| de::Error::missing_field("messages"))?;
                Ok(RouterInput::new(messages))
            }
        }

        deserializer.deserialize_any(InputVisitor)
    }
}

impl RouterInput {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// The most recent message authored by the user, if any.
    pub fn last_user_message(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.role == Role::User)
    }

    /// Number of messages of every role.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl From<Vec<Message>> for RouterInput {
    fn from(messages: Vec<Message>) -> Self {
        Self::new(messages)
    }
}

/// Coarse category of what the user is asking for in their latest message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
    MoodLogging,
    GoalPlanning,
    TravelPlanning,
    ShoppingList,
    ImageAnalysis,
    SimpleQuestion,
    ComplexReasoning,
    GeneralChat,
    Unknown,
}

/// Cost/capability class of the upstream model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModelTier {
    /// Cheap, low-latency model.
    Fast,
    /// Expensive, high-quality model with vision support.
    Capable,
}

/// Generation parameters relayed verbatim to the upstream completion call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

impl GenerationConfig {
    pub const fn new(temperature: f64, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
            top_p: None,
        }
    }

    pub const fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }
}

/// A routing decision. Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSelection {
    /// Selected tier.
    pub tier: ModelTier,
    /// Configured upstream identifier for `tier`.
    pub model: String,
    /// Generation parameters attached by the rule that fired.
    pub config: GenerationConfig,
    /// Certainty of the rule that fired (0.0-1.0).
    pub confidence: f32,
    /// Which rule fired and why. For logs only; not machine-parsed.
    pub reason: String,
    /// Classified intent, present only when intent-based routing fired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
}

impl ModelSelection {
    /// Safe default for callers that could not obtain a routing decision,
    /// e.g. because the request failed boundary validation.
    pub fn caller_default(capable_model: &str) -> Self {
        Self {
            tier: ModelTier::Capable,
            model: capable_model.to_string(),
            config: GenerationConfig::new(0.7, 2048),
            confidence: 0.0,
            reason: "Routing unavailable, using caller default.".to_string(),
            intent: None,
        }
    }
}
