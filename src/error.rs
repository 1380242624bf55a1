use crate::protocol::MalformedResponse;
use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for configuration and registration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Configuration key or field that caused the error (e.g., "base_url", "TOOLCALL_TIMEOUT_SECS")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the rejected value)
    pub details: Option<String>,
    /// Source of the error (e.g., "config_env", "client_builder")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that abort a query or a registration call.
///
/// Per-call tool failures are not represented here: they are recovered locally
/// as [`ToolError`] and reported to the model as tool results.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Malformed chat response: {0}")]
    MalformedResponse(#[from] MalformedResponse),

    #[error("Tool '{name}' is already registered")]
    DuplicateTool { name: String },

    #[error("Invalid parameter schema for tool '{name}': {reason}")]
    InvalidSchema { name: String, reason: String },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Short, stable name of the error kind (used in logs and query traces).
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Transport(_) => "transport",
            Error::MalformedResponse(_) => "malformed_response",
            Error::DuplicateTool { .. } => "duplicate_tool",
            Error::InvalidSchema { .. } => "invalid_schema",
            Error::Configuration { .. } => "configuration",
            Error::Serialization(_) => "serialization",
        }
    }
}

/// Failure of a single requested tool call.
///
/// These never abort a query. The dispatcher renders them as the content of the
/// corresponding `tool` message so the model can react in its final answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("unknown tool '{name}'")]
    UnknownTool { name: String },

    #[error("invalid arguments for tool '{name}': {reason}")]
    InvalidArguments { name: String, reason: String },

    #[error("tool '{name}' failed: {message}")]
    Execution { name: String, message: String },

    #[error(
        "tool result '{}' does not answer a call from the preceding assistant message",
        .tool_call_id.as_deref().unwrap_or("<none>")
    )]
    UncorrelatedResult { tool_call_id: Option<String> },
}

impl ToolError {
    /// JSON-encoded error payload used as the content of a `tool` message.
    pub fn to_content(&self) -> String {
        serde_json::json!({ "error": self.to_string() }).to_string()
    }
}
