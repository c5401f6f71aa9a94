//! Wire types for the chat-completions gateway API.
//!
//! The gateway speaks the OpenAI-compatible chat format: a request carries
//! a model identifier and a list of role-tagged messages, where user
//! messages may be multi-part (text blocks interleaved with image
//! references). The reply text lives at `choices[0].message.content`.

use serde::{Deserialize, Serialize};

use formsight_core::prompt::{ANALYSIS_INSTRUCTION, SYSTEM_PROMPT};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    /// Vision-capable model identifier.
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: MessageContent,
}

/// Message content: plain text or an ordered list of parts.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// One part of a multi-part user message.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
pub struct ImageUrl {
    /// Data URI of one sampled frame.
    pub url: String,
}

/// Build the coaching analysis message pair for a list of frames.
///
/// One system message framing the coach persona, then one user message
/// whose parts are the fixed instruction block followed by one image
/// reference per frame, in the same order as supplied.
pub fn coaching_messages(frames: &[String]) -> Vec<ChatMessage> {
    let mut parts = Vec::with_capacity(frames.len() + 1);
    parts.push(ContentPart::Text {
        text: ANALYSIS_INSTRUCTION.to_string(),
    });
    for frame in frames {
        parts.push(ContentPart::ImageUrl {
            image_url: ImageUrl { url: frame.clone() },
        });
    }

    vec![
        ChatMessage {
            role: "system",
            content: MessageContent::Text(SYSTEM_PROMPT.to_string()),
        },
        ChatMessage {
            role: "user",
            content: MessageContent::Parts(parts),
        },
    ]
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Extract the reply text, if the gateway produced any.
    pub fn into_reply(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
