//! Tool-calling chat client.
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | [`ToolCallingChatClient`] and the two-round `query` |
//! | `builder` | [`ClientBuilder`] |
//! | `registry` | [`ToolRegistry`] and the [`ToolHandler`] trait |
//! | `dispatch` | sequential execution of requested calls |
//! | `state` | per-query state machine and [`QueryStats`] |

mod builder;
mod core;
mod dispatch;
mod registry;
mod state;

pub use builder::ClientBuilder;
pub use self::core::{FinalAnswer, ToolCallingChatClient};
pub use dispatch::{dispatch_tool_calls, ToolOutcome};
pub use registry::{ToolHandler, ToolRegistry};
pub use state::{QueryState, QueryStats};
