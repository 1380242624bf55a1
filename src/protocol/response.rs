//! Chat completion response envelope and validation

use crate::protocol::MalformedResponse;
use crate::types::message::{null_as_default, Message};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default, deserialize_with = "null_as_default")]
    pub index: u32,
    pub message: Message,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl ChatResponse {
    /// Message of the first choice.
    pub fn into_message(self) -> Option<Message> {
        self.choices.into_iter().next().map(|c| c.message)
    }
}

/// Validate and decode a response body.
///
/// Checks are applied in order so the reported reason names the outermost
/// problem: empty body, JSON syntax, top-level object, `choices` present and a
/// non-empty list, first choice carries `message`, then the message shape.
pub fn parse(body: &str) -> Result<ChatResponse, MalformedResponse> {
    let body = body.trim();
    if body.is_empty() {
        return Err(MalformedResponse::EmptyBody);
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| MalformedResponse::InvalidJson(e.to_string()))?;

    let obj = value.as_object().ok_or_else(|| MalformedResponse::NotAnObject {
        found: kind_of(&value).to_string(),
    })?;

    let choices = match obj.get("choices") {
        None | Some(Value::Null) => return Err(MalformedResponse::MissingChoices),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(MalformedResponse::ChoicesNotAList),
    };
    let first = choices.first().ok_or(MalformedResponse::EmptyChoices)?;
    match first.get("message") {
        None | Some(Value::Null) => return Err(MalformedResponse::MissingMessage),
        Some(_) => {}
    }

    serde_json::from_value(value).map_err(|e| MalformedResponse::InvalidMessage(e.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
