//! Sequential execution of requested tool calls.

use super::registry::ToolRegistry;
use crate::error::ToolError;
use crate::types::message::Message;
use crate::types::tool::ToolCallRequest;
use serde_json::Value;
use tracing::{info, warn};

/// Result of one requested call, kept alongside its `tool` message.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutcome {
    pub tool_call_id: String,
    pub tool_name: String,
    pub result: Result<Value, ToolError>,
}

impl ToolOutcome {
    pub fn is_error(&self) -> bool {
        self.result.is_err()
    }

    /// `tool` message carrying the JSON-encoded result or error payload.
    pub fn to_message(&self) -> Message {
        let content = match &self.result {
            Ok(value) => value.to_string(),
            Err(err) => err.to_content(),
        };
        Message::tool_result(self.tool_call_id.clone(), content)
    }
}

/// Run every call in emission order. Failures are recorded, never propagated.
pub fn dispatch_tool_calls(registry: &ToolRegistry, calls: &[ToolCallRequest]) -> Vec<ToolOutcome> {
    calls
        .iter()
        .map(|call| {
            let start = std::time::Instant::now();
            let result = registry.invoke(call);
            match &result {
                Ok(_) => info!(
                    tool = call.name(),
                    tool_call_id = %call.id,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "tool call completed"
                ),
                Err(err) => warn!(
                    tool = call.name(),
                    tool_call_id = %call.id,
                    error = %err,
                    "tool call failed; reporting error to the model"
                ),
            }
            ToolOutcome {
                tool_call_id: call.id.clone(),
                tool_name: call.name().to_string(),
                result,
            }
        })
        .collect()
}
