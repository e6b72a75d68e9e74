//! Common imports.

pub use crate::action::{Action, ActionExample, ActionHandler, ActionResult, InputSchema};
pub use crate::agent::{Agent, AgentContext, Plugin};
pub use crate::chain::{
    Connection, EnsResolver, EvmWallet, EvmWalletBuilder, NameResolver, RpcConnection, Wallet,
};
pub use crate::config::{AgentConfig, PriorityLevel};
pub use crate::error::{Error, Result};
pub use crate::plugins::{agent_builder, default_plugins};
pub use crate::tool::{ToolDefinition, ToolSet};
