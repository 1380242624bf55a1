//! Mock chat endpoint shared by integration tests.

#![allow(dead_code)]

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};
use std::time::Duration;
use toolcall_agent::ToolCallingChatClient;

pub const CHAT_PATH: &str = "/v1/chat/completions";

/// Test fixture that owns a mock server.
pub struct MockChatServer {
    pub server: ServerGuard,
}

impl MockChatServer {
    pub fn new() -> Self {
        Self {
            server: Server::new(),
        }
    }

    pub fn base_url(&self) -> String {
        format!("{}/v1", self.server.url())
    }

    /// Client pointed at the mock server, no tools registered.
    pub fn client(&self) -> ToolCallingChatClient {
        ToolCallingChatClient::builder()
            .base_url(self.base_url())
            .model("test-model")
            .timeout(Duration::from_secs(5))
            .system_prompt("You are a test assistant.")
            .build()
            .expect("client builds")
    }

    /// Mock a JSON reply for requests whose body matches `body`.
    pub fn reply(&mut self, body: Matcher, status: usize, reply: &str, hits: usize) -> Mock {
        self.server
            .mock("POST", CHAT_PATH)
            .match_header("content-type", "application/json")
            .match_body(body)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(reply)
            .expect(hits)
            .create()
    }
}

/// Matches round-1 requests (the tools catalogue is present).
pub fn round_one() -> Matcher {
    Matcher::Regex(r#""tools":\["#.to_string())
}

/// Matches round-2 requests (tool results are present).
pub fn round_two() -> Matcher {
    Matcher::Regex(r#""role":"tool""#.to_string())
}

/// Completion whose first choice is a plain answer.
pub fn answer(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

/// Completion requesting the given `(id, name, arguments)` calls in order.
pub fn tool_calls(calls: &[(&str, &str, Value)]) -> String {
    let calls: Vec<Value> = calls
        .iter()
        .map(|(id, name, args)| {
            json!({
                "id": id,
                "type": "function",
                "function": {"name": name, "arguments": args.to_string()}
            })
        })
        .collect();
    json!({
        "id": "chatcmpl-test",
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": null, "tool_calls": calls},
            "finish_reason": "tool_calls"
        }]
    })
    .to_string()
}
