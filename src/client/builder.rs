use crate::client::core::ToolCallingChatClient;
use crate::client::registry::{ToolHandler, ToolRegistry};
use crate::config::ClientConfig;
use crate::transport::HttpTransport;
use crate::types::tool::ToolSchema;
use crate::Result;
use std::time::Duration;

/// Builder for creating clients with custom configuration.
///
/// Keep this surface area small and predictable.
pub struct ClientBuilder {
    config: ClientConfig,
    registry: ToolRegistry,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            registry: ToolRegistry::new(),
        }
    }

    /// Start from environment configuration (see [`ClientConfig::from_env`]).
    pub fn from_env() -> Result<Self> {
        Ok(Self::new().config(ClientConfig::from_env()?))
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Base URL of the OpenAI-compatible API (e.g. `http://localhost:1234/v1`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Per-request timeout for the chat endpoint.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    /// Register a tool up front. Fails on duplicate names.
    pub fn tool<H>(mut self, schema: ToolSchema, handler: H) -> Result<Self>
    where
        H: ToolHandler + 'static,
    {
        self.registry.register(schema, handler)?;
        Ok(self)
    }

    /// Build the client.
    pub fn build(self) -> Result<ToolCallingChatClient> {
        self.config.validate()?;
        let transport = HttpTransport::new(&self.config)?;
        tracing::debug!(
            endpoint = transport.endpoint(),
            model = %self.config.model,
            tools = self.registry.len(),
            "built tool-calling client"
        );

        Ok(ToolCallingChatClient {
            config: self.config,
            transport,
            registry: self.registry,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
