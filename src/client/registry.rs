//! Tool registry: schemas, argument validators and local handlers.

use crate::error::ToolError;
use crate::types::tool::{ToolCallRequest, ToolDefinition, ToolSchema};
use crate::{Error, Result};
use jsonschema::{Draft, JSONSchema};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// Local implementation of a tool.
///
/// Handlers run synchronously on the querying thread. Any error they return is
/// reported to the model as the tool's result, never to the caller of `query`.
pub trait ToolHandler: Send + Sync {
    fn call(&self, args: &Map<String, Value>) -> anyhow::Result<Value>;
}

impl<F> ToolHandler for F
where
    F: Fn(&Map<String, Value>) -> anyhow::Result<Value> + Send + Sync,
{
    fn call(&self, args: &Map<String, Value>) -> anyhow::Result<Value> {
        self(args)
    }
}

struct RegisteredTool {
    schema: ToolSchema,
    validator: JSONSchema,
    handler: Box<dyn ToolHandler>,
}

/// Tools available to the model, in registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Names are unique; re-registering fails with
    /// [`Error::DuplicateTool`] and leaves the registry unchanged.
    pub fn register<H>(&mut self, schema: ToolSchema, handler: H) -> Result<()>
    where
        H: ToolHandler + 'static,
    {
        if self.index.contains_key(&schema.name) {
            return Err(Error::DuplicateTool { name: schema.name });
        }
        let validator = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema.parameters_schema())
            .map_err(|e| Error::InvalidSchema {
                name: schema.name.clone(),
                reason: e.to_string(),
            })?;

        self.index.insert(schema.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            schema,
            validator,
            handler: Box::new(handler),
        });
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.schema.name.as_str())
    }

    pub fn schema(&self, name: &str) -> Option<&ToolSchema> {
        self.get(name).map(|t| &t.schema)
    }

    /// Catalogue sent to the model in round 1.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.schema.to_definition()).collect()
    }

    fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Resolve, decode, validate and run one requested call.
    pub fn invoke(&self, call: &ToolCallRequest) -> std::result::Result<Value, ToolError> {
        let name = call.name();
        let tool = self.get(name).ok_or_else(|| ToolError::UnknownTool {
            name: name.to_string(),
        })?;

        let args = call.decode_arguments()?;
        let instance = Value::Object(args.clone());
        if let Err(errors) = tool.validator.validate(&instance) {
            let reasons: Vec<String> = errors.map(|e| e.to_string()).collect();
            return Err(ToolError::InvalidArguments {
                name: name.to_string(),
                reason: reasons.join("; "),
            });
        }

        tool.handler.call(&args).map_err(|e| ToolError::Execution {
            name: name.to_string(),
            message: format!("{e:#}"),
        })
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names().collect::<Vec<_>>())
            .finish()
    }
}
