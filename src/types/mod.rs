//! # Types Module
//!
//! Core data types shared by the protocol, transport and client layers.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Chat message with role, content and optional tool-call data |
//! | [`MessageRole`] | Message role (system, user, assistant, tool) |
//! | [`Conversation`] | Append-only message log for one query |
//! | [`ToolSchema`] | Declarative description of a local tool |
//! | [`ToolCallRequest`] | Tool invocation requested by the model |
//!
//! ## Example
//!
//! ```rust
//! use toolcall_agent::types::{Message, ParameterType, ToolSchema};
//!
//! let system = Message::system("You are a helpful weather assistant.");
//! let user = Message::user("What's the weather like in London today?");
//!
//! let tool = ToolSchema::new("get_weather", "Get current weather data for provided coordinates.")
//!     .param("latitude", ParameterType::Number)
//!     .param("longitude", ParameterType::Number);
//! assert_eq!(tool.required().count(), 2);
//! ```

pub mod message;
pub mod tool;

pub use message::{Conversation, Message, MessageRole};
pub use tool::{
    FunctionCall, FunctionDefinition, Parameter, ParameterType, ToolCallRequest, ToolDefinition,
    ToolSchema,
};
