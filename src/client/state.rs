//! Per-query state machine and call statistics.

use std::time::Instant;
use tracing::debug;

/// Progress of a single `query` call.
///
/// ```text
/// Idle -> AwaitingRound1 -> DispatchingTools -> AwaitingRound2 -> Done
///                       \-> Done
/// any non-terminal state -> Failed(kind)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    Idle,
    AwaitingRound1,
    DispatchingTools,
    AwaitingRound2,
    Done,
    Failed(&'static str),
}

impl QueryState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, QueryState::Done | QueryState::Failed(_))
    }

    pub fn can_transition_to(&self, next: &QueryState) -> bool {
        use QueryState::*;
        match (self, next) {
            (_, Failed(_)) => !self.is_terminal(),
            (Idle, AwaitingRound1)
            | (AwaitingRound1, DispatchingTools)
            | (AwaitingRound1, Done)
            | (DispatchingTools, AwaitingRound2)
            | (AwaitingRound2, Done) => true,
            _ => false,
        }
    }
}

/// Statistics for one completed query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Requests sent to the chat endpoint, including the round-1 retry.
    pub requests_sent: u32,
    pub round1_retried: bool,
    pub tool_calls: usize,
    pub failed_tool_calls: usize,
    pub duration_ms: u64,
}

pub(crate) struct QueryRun {
    state: QueryState,
    pub(crate) stats: QueryStats,
    started: Instant,
}

impl QueryRun {
    pub(crate) fn start() -> Self {
        Self {
            state: QueryState::Idle,
            stats: QueryStats::default(),
            started: Instant::now(),
        }
    }

    pub(crate) fn state(&self) -> QueryState {
        self.state
    }

    pub(crate) fn advance(&mut self, next: QueryState) {
        debug_assert!(
            self.state.can_transition_to(&next),
            "invalid query transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!(from = ?self.state, to = ?next, "query state");
        self.state = next;
    }

    pub(crate) fn finish(mut self) -> QueryStats {
        self.stats.duration_ms = self.started.elapsed().as_millis() as u64;
        self.stats
    }
}
