//! Chat message format shared with OpenAI-compatible endpoints

use crate::error::ToolError;
use crate::types::tool::ToolCallRequest;
use serde::{Deserialize, Deserializer, Serialize};

/// Unified message structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    /// Text content. Empty when an assistant message only carries tool calls.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    /// Tool calls requested by the model (assistant messages only).
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tool_calls: Vec<ToolCallRequest>,
    /// Correlation id of the answered tool call (tool messages only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    fn text(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            content: text.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::text(MessageRole::System, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::text(MessageRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::text(MessageRole::Assistant, text)
    }

    pub fn assistant_with_tool_calls(
        text: impl Into<String>,
        tool_calls: Vec<ToolCallRequest>,
    ) -> Self {
        Self {
            tool_calls,
            ..Self::text(MessageRole::Assistant, text)
        }
    }

    /// Tool result message answering the call with the given correlation id.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.into()),
            ..Self::text(MessageRole::Tool, content)
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Tool,
}

/// Reads an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ordered, append-only message log owned by a single query.
///
/// Appending a `tool` message checks that its correlation id answers a call
/// made by the most recent assistant message, with only tool messages in between.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Start a conversation with the persona and the user's question.
    pub fn new(system_prompt: impl Into<String>, user_text: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt), Message::user(user_text)],
        }
    }

    pub fn push(&mut self, message: Message) -> Result<(), ToolError> {
        if message.role == MessageRole::Tool && !self.answers_pending_call(&message) {
            return Err(ToolError::UncorrelatedResult {
                tool_call_id: message.tool_call_id,
            });
        }
        self.messages.push(message);
        Ok(())
    }

    fn answers_pending_call(&self, message: &Message) -> bool {
        let Some(id) = message.tool_call_id.as_deref() else {
            return false;
        };
        self.messages
            .iter()
            .rev()
            .find(|m| m.role != MessageRole::Tool)
            .filter(|m| m.role == MessageRole::Assistant)
            .map_or(false, |assistant| {
                assistant.tool_calls.iter().any(|call| call.id == id)
            })
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}
