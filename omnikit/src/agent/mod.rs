//! The plugin-extensible agent.
//!
//! An [`Agent`] starts with only its chain context. Plugins are installed at
//! runtime and contribute two things:
//!
//! - **methods**, bound to the agent's context and callable by name through
//!   [`Agent::call_method`];
//! - **actions**, appended to the agent's ordered action list and dispatched
//!   through [`executor`].
//!
//! ```rust,ignore
//! let mut agent = Agent::new(connection, wallet, AgentConfig::from_env()?);
//! agent.install(token::plugin())?.install(layerzero::plugin())?;
//!
//! let result = agent.execute("ERC20_TRANSFER", json!({
//!     "to": "vitalik.eth",
//!     "tokenAddress": "0x0000000000000000000000000000000000000000",
//!     "amount": "0.1",
//! })).await;
//! ```

pub mod executor;
mod plugin;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

pub use plugin::{BoundMethod, MethodFuture, Plugin, UnboundMethod};

use crate::action::{Action, ActionResult};
use crate::chain::{Connection, NameResolver, Wallet};
use crate::config::AgentConfig;
use crate::error::{Error, PluginError, Result};
use crate::tool::{ToolSet, build_tools};

/// Chain handles and configuration shared by every method and action.
#[derive(Clone)]
pub struct AgentContext {
    connection: Arc<dyn Connection>,
    wallet: Arc<dyn Wallet>,
    resolver: Option<Arc<dyn NameResolver>>,
    config: AgentConfig,
}

impl std::fmt::Debug for AgentContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentContext")
            .field("account", &self.wallet.account())
            .field("has_resolver", &self.resolver.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AgentContext {
    /// Create a context without a name resolver.
    #[must_use]
    pub fn new(
        connection: Arc<dyn Connection>,
        wallet: Arc<dyn Wallet>,
        config: AgentConfig,
    ) -> Self {
        Self {
            connection,
            wallet,
            resolver: None,
            config,
        }
    }

    /// Attach a name resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn NameResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Read-only chain handle.
    #[must_use]
    pub fn connection(&self) -> &dyn Connection {
        self.connection.as_ref()
    }

    /// Signing handle.
    #[must_use]
    pub fn wallet(&self) -> &dyn Wallet {
        self.wallet.as_ref()
    }

    /// Name resolver, if configured.
    #[must_use]
    pub fn resolver(&self) -> Option<&dyn NameResolver> {
        self.resolver.as_deref()
    }

    /// Configuration.
    #[must_use]
    pub const fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// An agent: chain context plus the capabilities of its installed plugins.
pub struct Agent {
    context: Arc<AgentContext>,
    plugins: Vec<Arc<Plugin>>,
    methods: BTreeMap<String, BoundMethod>,
    actions: Vec<Action>,
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("context", &self.context)
            .field("plugins", &self.plugins())
            .field("methods", &self.methods().collect::<Vec<_>>())
            .field("actions", &self.actions.len())
            .finish()
    }
}

impl Agent {
    /// Create an agent with no plugins installed.
    #[must_use]
    pub fn new(
        connection: Arc<dyn Connection>,
        wallet: Arc<dyn Wallet>,
        config: AgentConfig,
    ) -> Self {
        Self::from_context(AgentContext::new(connection, wallet, config))
    }

    /// Create an agent from a prepared context.
    #[must_use]
    pub fn from_context(context: AgentContext) -> Self {
        Self {
            context: Arc::new(context),
            plugins: Vec::new(),
            methods: BTreeMap::new(),
            actions: Vec::new(),
        }
    }

    /// The shared context.
    #[must_use]
    pub const fn context(&self) -> &Arc<AgentContext> {
        &self.context
    }

    /// Install a plugin.
    ///
    /// Re-installing a plugin name is a no-op. If any of the plugin's
    /// methods is already bound, nothing is registered and the agent is
    /// left unchanged. Otherwise the plugin's initialize hook runs, its
    /// methods are bound and its actions appended.
    pub fn install(&mut self, plugin: Arc<Plugin>) -> std::result::Result<&mut Self, PluginError> {
        if self.is_installed(plugin.name()) {
            debug!(plugin = plugin.name(), "plugin already installed");
            return Ok(self);
        }

        if let Some(method) = plugin.method_names().find(|m| self.methods.contains_key(*m)) {
            return Err(PluginError::MethodCollision {
                method: method.to_string(),
                plugin: plugin.name().to_string(),
            });
        }

        plugin.initialize(self);

        for (name, method) in plugin.methods() {
            self.methods
                .insert(name.clone(), plugin::bind(method, &self.context));
        }
        self.actions.extend(plugin.actions().iter().cloned());

        info!(
            plugin = plugin.name(),
            methods = plugin.methods().len(),
            actions = plugin.actions().len(),
            "plugin installed"
        );
        self.plugins.push(plugin);
        Ok(self)
    }

    /// Whether a plugin with this name is installed.
    #[must_use]
    pub fn is_installed(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name() == name)
    }

    /// Installed plugin names, in installation order.
    #[must_use]
    pub fn plugins(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Installed actions, in installation order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Look up an action by exact name. The first match wins.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name() == name)
    }

    /// Bound method names.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Whether a method is bound.
    #[must_use]
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Call a bound method.
    pub async fn call_method(&self, name: &str, args: Value) -> Result<Value> {
        let method = self
            .methods
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownMethod(name.to_string()))?;
        method(args).await
    }

    /// Tool definitions for the installed actions.
    #[must_use]
    pub fn tools(&self) -> ToolSet {
        build_tools(&self.actions)
    }

    /// Execute a tool call against the installed actions.
    pub async fn execute(&self, name: &str, input: Value) -> ActionResult {
        executor::execute_tool_call(self, name, input).await
    }
}
