//! # Chat Completion Protocol
//!
//! Wire envelopes for OpenAI-compatible `/chat/completions` endpoints and the
//! single JSON boundary of the crate.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`request`] | Request envelope (`model`, `messages`, optional `tools`) |
//! | [`response`] | Response envelope and [`parse`] |
//! | [`error`] | [`MalformedResponse`] reasons |
//!
//! [`parse`] never touches the network, so every shape the endpoint may send
//! can be exercised from plain unit tests.
//!
//! ```rust
//! use toolcall_agent::protocol::{parse, MalformedResponse};
//!
//! let resp = parse(r#"{"choices":[{"message":{"role":"assistant","content":"Hi"}}]}"#).unwrap();
//! assert_eq!(resp.into_message().unwrap().content, "Hi");
//!
//! assert_eq!(parse(r#"{"object":"error"}"#).unwrap_err(), MalformedResponse::MissingChoices);
//! ```

pub mod error;
pub mod request;
pub mod response;

pub use error::MalformedResponse;
pub use request::ChatRequest;
pub use response::{parse, ChatResponse, Choice};
