use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::chat::formatter::{format_reply, Block};
use crate::errors::ClientError;
use crate::models::chat::{ChatReply, ChatUsage};

pub const SEND_FAILED: &str = "Failed to send message";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip)]
    pub usage: Option<ChatUsage>,
    /// Formatted reply; empty for the viewer's own messages.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Block>,
}

/// Conversation shown in the chat panel.
#[derive(Debug, Default, Serialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    #[serde(skip)]
    error: Option<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Records the viewer's message. Blank input is ignored and returns `None`.
    pub fn push_user(&mut self, input: &str) -> Option<&ChatMessage> {
        if input.trim().is_empty() {
            return None;
        }
        self.error = None;
        self.messages.push(ChatMessage {
            speaker: Speaker::User,
            content: input.to_string(),
            timestamp: Utc::now(),
            model: None,
            usage: None,
            blocks: Vec::new(),
        });
        self.messages.last()
    }

    /// Appends the assistant's reply with its formatted blocks.
    pub fn push_reply(&mut self, reply: ChatReply) -> &ChatMessage {
        let blocks = format_reply(&reply.reply);
        self.messages.push(ChatMessage {
            speaker: Speaker::Assistant,
            content: reply.reply,
            timestamp: Utc::now(),
            model: reply.model,
            usage: reply.usage,
            blocks,
        });
        &self.messages[self.messages.len() - 1]
    }

    /// Keeps the failure for display; the transcript itself is unchanged.
    pub fn fail(&mut self, err: &ClientError) -> &str {
        self.error.insert(err.display_message(SEND_FAILED))
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.error = None;
    }
}
