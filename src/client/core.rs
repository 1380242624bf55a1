use crate::client::builder::ClientBuilder;
use crate::client::dispatch::{dispatch_tool_calls, ToolOutcome};
use crate::client::registry::{ToolHandler, ToolRegistry};
use crate::client::state::{QueryRun, QueryState, QueryStats};
use crate::config::ClientConfig;
use crate::protocol::{self, ChatRequest, MalformedResponse};
use crate::transport::HttpTransport;
use crate::types::message::{Conversation, Message};
use crate::types::tool::{ToolDefinition, ToolSchema};
use crate::{Error, Result};
use tracing::{debug, info, warn};

/// Client that answers one query with at most two rounds against a
/// tool-calling chat endpoint.
///
/// Round 1 sends the conversation with the tool catalogue. If the model asks for
/// tools, they run locally in emission order and round 2 sends the results back
/// for a final answer. Round 2 is never scanned for further tool calls.
pub struct ToolCallingChatClient {
    pub(crate) config: ClientConfig,
    pub(crate) transport: HttpTransport,
    pub(crate) registry: ToolRegistry,
}

/// Final natural-language answer of a query.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalAnswer {
    pub content: String,
    /// Tool calls executed between the rounds, in emission order.
    pub tool_outcomes: Vec<ToolOutcome>,
    pub stats: QueryStats,
}

impl ToolCallingChatClient {
    /// Create a client without tools.
    pub fn new(config: ClientConfig) -> Result<Self> {
        ClientBuilder::new().config(config).build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Make a tool available to the model.
    ///
    /// Takes `&mut self`, so registration always completes before the client can
    /// be shared between threads for concurrent queries.
    pub fn register_tool<H>(&mut self, schema: ToolSchema, handler: H) -> Result<()>
    where
        H: ToolHandler + 'static,
    {
        let name = schema.name.clone();
        self.registry.register(schema, handler)?;
        debug!(tool = %name, "registered tool");
        Ok(())
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run one query to completion.
    ///
    /// Only endpoint failures are returned as errors: [`Error::Transport`], or
    /// [`Error::MalformedResponse`] once round 1 has been retried (round 2 is not
    /// retried). Tool failures are reported to the model instead.
    pub fn query(&self, user_text: &str) -> Result<FinalAnswer> {
        let mut run = QueryRun::start();
        let mut conversation = Conversation::new(self.config.system_prompt.as_str(), user_text);
        let catalogue = self.registry.definitions();

        match self.run_rounds(&mut conversation, &catalogue, &mut run) {
            Ok((content, tool_outcomes)) => {
                run.advance(QueryState::Done);
                let stats = run.finish();
                info!(
                    requests = stats.requests_sent,
                    tool_calls = stats.tool_calls,
                    failed_tool_calls = stats.failed_tool_calls,
                    duration_ms = stats.duration_ms,
                    "query completed"
                );
                Ok(FinalAnswer {
                    content,
                    tool_outcomes,
                    stats,
                })
            }
            Err(err) => {
                run.advance(QueryState::Failed(err.kind()));
                warn!(state = ?run.state(), error = %err, "query failed");
                Err(err)
            }
        }
    }

    fn run_rounds(
        &self,
        conversation: &mut Conversation,
        catalogue: &[ToolDefinition],
        run: &mut QueryRun,
    ) -> Result<(String, Vec<ToolOutcome>)> {
        run.advance(QueryState::AwaitingRound1);
        let assistant = self.round_one(conversation, catalogue, run)?;
        if !assistant.has_tool_calls() {
            return Ok((assistant.content, Vec::new()));
        }

        run.advance(QueryState::DispatchingTools);
        let outcomes = dispatch_tool_calls(&self.registry, &assistant.tool_calls);
        run.stats.tool_calls = outcomes.len();
        run.stats.failed_tool_calls = outcomes.iter().filter(|o| o.is_error()).count();

        // The assistant message always goes in first; it cannot be rejected.
        let results = outcomes.iter().map(ToolOutcome::to_message);
        for message in std::iter::once(assistant).chain(results) {
            if let Err(err) = conversation.push(message) {
                run.stats.failed_tool_calls += 1;
                warn!(error = %err, "tool result rejected from conversation");
            }
        }

        run.advance(QueryState::AwaitingRound2);
        let answer = self.exchange(conversation.messages(), &[], run)?;
        if answer.has_tool_calls() {
            warn!(
                count = answer.tool_calls.len(),
                "ignoring tool calls requested in round 2"
            );
        }
        Ok((answer.content, outcomes))
    }

    /// Round 1 with a single retry when the body does not validate.
    fn round_one(
        &self,
        conversation: &Conversation,
        catalogue: &[ToolDefinition],
        run: &mut QueryRun,
    ) -> Result<Message> {
        match self.exchange(conversation.messages(), catalogue, run) {
            Err(Error::MalformedResponse(reason)) => {
                warn!(%reason, "round 1 response malformed; retrying once");
                run.stats.round1_retried = true;
                self.exchange(conversation.messages(), catalogue, run)
            }
            other => other,
        }
    }

    /// One request/response exchange returning the first choice's message.
    fn exchange(
        &self,
        messages: &[Message],
        catalogue: &[ToolDefinition],
        run: &mut QueryRun,
    ) -> Result<Message> {
        let request = ChatRequest::new(&self.config.model, messages).tools(catalogue);
        run.stats.requests_sent += 1;
        debug!(
            endpoint = self.transport.endpoint(),
            messages = messages.len(),
            tools = catalogue.len(),
            attempt = run.stats.requests_sent,
            "sending chat request"
        );

        let body = self.transport.post_chat(&request)?;
        let response = protocol::parse(&body)?;
        response
            .into_message()
            .ok_or(Error::MalformedResponse(MalformedResponse::EmptyChoices))
    }
}
