//! # toolcall-agent
//!
//! Blocking tool-calling chat client for OpenAI-compatible chat completion
//! endpoints (hosted APIs or a local LM Studio server).
//!
//! ## Overview
//!
//! A query is answered with at most two round trips:
//!
//! 1. The system persona and the user text are sent together with the catalogue
//!    of registered tools.
//! 2. If the model asks for tools, each call runs locally in emission order and
//!    its JSON result (or error payload) is appended as a `tool` message.
//! 3. The whole conversation is sent once more, without tools, and the reply is
//!    the final answer.
//!
//! Tool failures never abort a query; the model sees them as tool results.
//! Only transport failures and malformed responses are returned to the caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serde_json::{json, Map, Value};
//! use toolcall_agent::{ParameterType, ToolCallingChatClient, ToolSchema};
//!
//! fn main() -> toolcall_agent::Result<()> {
//!     let mut client = ToolCallingChatClient::builder()
//!         .base_url("http://localhost:1234/v1")
//!         .model("mistral-nemo-instruct-2407")
//!         .build()?;
//!
//!     client.register_tool(
//!         ToolSchema::new("get_company_symbol", "Look up a stock ticker.")
//!             .param("company", ParameterType::String),
//!         |_: &Map<String, Value>| -> anyhow::Result<Value> { Ok(json!("AAPL")) },
//!     )?;
//!
//!     let answer = client.query("What is Apple's ticker?")?;
//!     println!("{}", answer.content);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Tool-calling client, registry and dispatch |
//! | [`config`] | Client configuration and environment loading |
//! | [`protocol`] | Chat completion request and response wire shapes |
//! | [`transport`] | Blocking HTTP transport |
//! | [`types`] | Messages, conversations and tool schemas |
//! | [`tools`] | Built-in weather and finance tools |

pub mod client;
pub mod config;
pub mod protocol;
pub mod tools;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientBuilder, FinalAnswer, QueryStats, ToolCallingChatClient, ToolHandler};
pub use config::ClientConfig;
pub use types::{
    message::{Conversation, Message, MessageRole},
    tool::{ParameterType, ToolCallRequest, ToolSchema},
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, ToolError};
