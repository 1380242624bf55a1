//! Tool calling definitions (OpenAI-compatible function calling)

use crate::error::ToolError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};

/// Primitive JSON type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Number,
    Integer,
    Boolean,
}

impl ParameterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::String => "string",
            ParameterType::Number => "number",
            ParameterType::Integer => "integer",
            ParameterType::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub param_type: ParameterType,
    pub description: Option<String>,
    pub required: bool,
}

/// Declarative description of a local tool, defined once before any exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: Vec<Parameter>,
    /// Reject arguments that are not declared in `parameters`.
    pub strict: bool,
}

impl ToolSchema {
    /// New strict schema without parameters.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            strict: true,
        }
    }

    /// Add a required parameter.
    pub fn param(self, name: impl Into<String>, param_type: ParameterType) -> Self {
        self.push_param(name.into(), param_type, None, true)
    }

    /// Add a required parameter with a description for the model.
    pub fn param_described(
        self,
        name: impl Into<String>,
        param_type: ParameterType,
        description: impl Into<String>,
    ) -> Self {
        self.push_param(name.into(), param_type, Some(description.into()), true)
    }

    /// Add an optional parameter.
    pub fn optional_param(self, name: impl Into<String>, param_type: ParameterType) -> Self {
        self.push_param(name.into(), param_type, None, false)
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn push_param(
        mut self,
        name: String,
        param_type: ParameterType,
        description: Option<String>,
        required: bool,
    ) -> Self {
        // Redeclaring a parameter replaces the earlier declaration.
        self.parameters.retain(|p| p.name != name);
        self.parameters.push(Parameter {
            name,
            param_type,
            description,
            required,
        });
        self
    }

    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
    }

    /// JSON Schema object describing the argument mapping.
    pub fn parameters_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| {
                let mut prop = json!({ "type": p.param_type.as_str() });
                if let Some(desc) = &p.description {
                    prop["description"] = Value::String(desc.clone());
                }
                (p.name.clone(), prop)
            })
            .collect();
        let required: Vec<&str> = self.required().collect();

        let mut schema = json!({
            "type": "object",
            "properties": properties,
            "required": required,
        });
        if self.strict {
            schema["additionalProperties"] = Value::Bool(false);
        }
        schema
    }

    /// Wire representation sent in the `tools` catalogue.
    pub fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: self.name.clone(),
                description: Some(self.description.clone()),
                parameters: Some(self.parameters_schema()),
                strict: self.strict.then_some(true),
            },
        }
    }
}

/// Tool definition (for function calling)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String, // "function"
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>, // JSON Schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

/// Tool call (invocation requested by the model)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub id: String,
    #[serde(
        rename = "type",
        default = "function_type",
        deserialize_with = "null_as_function_type"
    )]
    pub call_type: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded argument object.
    #[serde(default, deserialize_with = "arguments_as_string")]
    pub arguments: String,
}

fn function_type() -> String {
    "function".to_string()
}

fn null_as_function_type<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(function_type))
}

// Some local inference servers send `arguments` as an object instead of a string.
fn arguments_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

impl ToolCallRequest {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: &Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            call_type: function_type(),
            function: FunctionCall {
                name: name.into(),
                arguments: Value::Object(arguments.clone()).to_string(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    /// Decode the argument string into a mapping.
    ///
    /// Blank arguments decode to an empty mapping; anything that is not a JSON
    /// object is rejected.
    pub fn decode_arguments(&self) -> Result<Map<String, Value>, ToolError> {
        let raw = self.function.arguments.trim();
        if raw.is_empty() {
            return Ok(Map::new());
        }
        let invalid = |reason: String| ToolError::InvalidArguments {
            name: self.function.name.clone(),
            reason,
        };
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(invalid(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
            Err(e) => Err(invalid(e.to_string())),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather_schema() -> ToolSchema {
        ToolSchema::new(
            "get_weather",
            "Get current weather data for provided coordinates.",
        )
        .param("latitude", ParameterType::Number)
        .param("longitude", ParameterType::Number)
    }

    #[test]
    fn definition_matches_wire_shape() {
        let def = serde_json::to_value(weather_schema().to_definition()).unwrap();
        assert_eq!(
            def,
            json!({
                "type": "function",
                "function": {
                    "name": "get_weather",
                    "description": "Get current weather data for provided coordinates.",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "latitude": {"type": "number"},
                            "longitude": {"type": "number"}
                        },
                        "required": ["latitude", "longitude"],
                        "additionalProperties": false
                    },
                    "strict": true
                }
            })
        );
    }

    #[test]
    fn lenient_schema_allows_extra_properties() {
        let def = weather_schema().strict(false).to_definition();
        let params = def.function.parameters.unwrap();
        assert!(params.get("additionalProperties").is_none());
        assert!(def.function.strict.is_none());
    }

    #[test]
    fn parameterless_schema_has_empty_required() {
        let schema = ToolSchema::new("get_current_date", "Get the current date in YYYY-MM-DD format.");
        let params = schema.parameters_schema();
        assert_eq!(params["properties"], json!({}));
        assert_eq!(params["required"], json!([]));
    }

    #[test]
    fn redeclared_parameter_replaces_previous() {
        let schema = ToolSchema::new("t", "d")
            .param("city", ParameterType::String)
            .optional_param("city", ParameterType::String);
        assert_eq!(schema.parameters.len(), 1);
        assert_eq!(schema.required().count(), 0);
    }

    #[test]
    fn arguments_round_trip() {
        let cases = [
            json!({}),
            json!({"city": "Tunis", "latitude": 36.8, "days": 3, "metric": true, "note": null}),
            json!({"ville": "Zürich", "都市": "東京", "emoji": "\u{1F326}", "quote": "say \"hi\"\n"}),
            json!({"big": u64::MAX, "small": i64::MIN, "neg": -273.15, "lat": -33.8688}),
            json!({"nested": {"list": [1, "two", [3.0], {"four": null}]}, "empty": [], "obj": {}}),
        ];
        for (i, case) in cases.iter().enumerate() {
            let args = case.as_object().cloned().unwrap();
            let call = ToolCallRequest::new(format!("call_{i}"), "get_weather", &args);
            assert_eq!(call.decode_arguments().unwrap(), args, "case {i}: {case}");
        }
    }

    #[test]
    fn null_type_defaults_to_function() {
        let call: ToolCallRequest = serde_json::from_value(json!({
            "id": "call_1",
            "type": null,
            "function": {"name": "get_current_date", "arguments": null}
        }))
        .unwrap();
        assert_eq!(call.call_type, "function");
        assert!(call.decode_arguments().unwrap().is_empty());
    }

    #[test]
    fn blank_arguments_decode_to_empty_map() {
        let mut call = ToolCallRequest::new("call_1", "get_current_date", &Map::new());
        call.function.arguments = "  ".into();
        assert!(call.decode_arguments().unwrap().is_empty());
    }

    #[test]
    fn non_object_arguments_are_rejected() {
        let mut call = ToolCallRequest::new("call_1", "get_weather", &Map::new());
        call.function.arguments = "[1, 2]".into();
        let err = call.decode_arguments().unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { ref reason, .. } if reason.contains("an array")));

        call.function.arguments = "{not json".into();
        assert!(matches!(
            call.decode_arguments(),
            Err(ToolError::InvalidArguments { .. })
        ));
    }

    #[test]
    fn object_arguments_are_accepted_on_the_wire() {
        let call: ToolCallRequest = serde_json::from_value(json!({
            "id": "call_9",
            "function": {"name": "get_coordinates", "arguments": {"city": "Prague"}}
        }))
        .unwrap();
        assert_eq!(call.call_type, "function");
        assert_eq!(call.decode_arguments().unwrap()["city"], "Prague");
    }
}
