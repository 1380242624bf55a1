//! Chat completion request envelope

use crate::types::message::Message;
use crate::types::tool::ToolDefinition;
use serde::Serialize;

/// Borrowed request body for one round.
///
/// `tools` is omitted from the wire when `None`: round 2 and clients without
/// registered tools send no catalogue.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<&'a [ToolDefinition]>,
    pub stream: bool,
}

impl<'a> ChatRequest<'a> {
    pub fn new(model: &'a str, messages: &'a [Message]) -> Self {
        Self {
            model,
            messages,
            tools: None,
            stream: false,
        }
    }

    /// Attach the tool catalogue. An empty catalogue is treated as none.
    pub fn tools(mut self, tools: &'a [ToolDefinition]) -> Self {
        self.tools = (!tools.is_empty()).then_some(tools);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tool::{ParameterType, ToolSchema};
    use serde_json::json;

    #[test]
    fn round_one_request_carries_tools() {
        let messages = vec![Message::system("persona"), Message::user("weather?")];
        let tools = vec![ToolSchema::new("get_coordinates", "Geocode a city.")
            .param("city", ParameterType::String)
            .to_definition()];
        let value = serde_json::to_value(ChatRequest::new("local-model", &messages).tools(&tools))
            .unwrap();

        assert_eq!(value["model"], "local-model");
        assert_eq!(value["stream"], false);
        assert_eq!(value["messages"].as_array().unwrap().len(), 2);
        assert_eq!(value["tools"][0]["function"]["name"], "get_coordinates");
    }

    #[test]
    fn empty_catalogue_is_omitted() {
        let messages = vec![Message::user("hi")];
        let value = serde_json::to_value(ChatRequest::new("m", &messages).tools(&[])).unwrap();
        assert_eq!(
            value,
            json!({"model": "m", "messages": [{"role": "user", "content": "hi"}], "stream": false})
        );
    }
}
