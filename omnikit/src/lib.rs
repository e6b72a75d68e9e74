//! Omnikit is a plugin-extensible EVM agent runtime.
//!
//! An [`Agent`] holds a chain context (connection, wallet, optional name
//! resolver, configuration) and is extended at runtime with [`Plugin`]s.
//! Each plugin contributes agent-bound methods and schema-validated
//! [`Action`]s. The action list is exposed to a tool-calling LLM through
//! [`tool::build_tools`], and the tool calls the model makes are dispatched
//! back through [`agent::executor`].
//!
//! ```rust,ignore
//! use omnikit::prelude::*;
//!
//! let wallet = EvmWallet::builder()
//!     .private_key(key)
//!     .rpc_url("https://eth.llamarpc.com")
//!     .build()
//!     .await?;
//! let connection: Arc<dyn Connection> = Arc::new(wallet.connection());
//! let context = AgentContext::new(connection.clone(), Arc::new(wallet), AgentConfig::from_env()?)
//!     .with_resolver(Arc::new(EnsResolver::new(connection)));
//!
//! let agent = agent_builder(context)?;
//! let tools = agent.tools().to_openai_tools();
//! let result = agent.execute("ERC20_TRANSFER", arguments).await;
//! ```

pub mod action;
pub mod agent;
pub mod chain;
pub mod config;
pub mod error;
pub mod plugins;
pub mod prelude;
pub mod tool;

pub use action::{Action, ActionExample, ActionResult, InputSchema};
pub use agent::{Agent, AgentContext, Plugin};
pub use config::{AgentConfig, PriorityLevel};
pub use error::{Error, FieldViolation, PluginError, Result};
pub use plugins::{agent_builder, default_plugins};
pub use tool::{MAX_TOOLS, ToolDefinition, ToolSet};
