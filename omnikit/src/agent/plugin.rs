//! Plugins: named bundles of methods and actions.

use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;
use tracing::warn;

use super::{Agent, AgentContext};
use crate::action::Action;
use crate::error::Result;

/// Future returned by agent methods.
pub type MethodFuture = BoxFuture<'static, Result<Value>>;

/// A method as declared by a plugin, before it is bound to an agent.
pub type UnboundMethod = Arc<dyn Fn(Arc<AgentContext>, Value) -> MethodFuture + Send + Sync>;

/// A method bound to one agent's context. Callers pass only arguments.
pub type BoundMethod = Arc<dyn Fn(Value) -> MethodFuture + Send + Sync>;

type InitializeHook = Arc<dyn Fn(&Agent) + Send + Sync>;

/// A named capability bundle.
///
/// Plugins are static values, shared between agents through `Arc`.
/// Installing one mutates the agent, never the plugin.
///
/// ```rust,ignore
/// let plugin = Plugin::new("token")
///     .method("transfer", transfer_method)
///     .action(transfer_action())
///     .on_initialize(|agent| tracing::debug!(plugins = ?agent.plugins(), "token ready"));
/// ```
#[derive(Clone)]
pub struct Plugin {
    name: String,
    methods: Vec<(String, UnboundMethod)>,
    actions: Vec<Action>,
    initialize: Option<InitializeHook>,
}

impl std::fmt::Debug for Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin")
            .field("name", &self.name)
            .field("methods", &self.method_names().collect::<Vec<_>>())
            .field("actions", &self.actions.len())
            .finish_non_exhaustive()
    }
}

impl Plugin {
    /// Create an empty plugin.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            actions: Vec::new(),
            initialize: None,
        }
    }

    /// Add a method. The first declaration of a name wins; later ones are
    /// ignored with a warning.
    #[must_use]
    pub fn method<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(Arc<AgentContext>, Value) -> MethodFuture + Send + Sync + 'static,
    {
        let name = name.into();
        if self.methods.iter().any(|(existing, _)| *existing == name) {
            warn!(plugin = %self.name, method = %name, "Ignoring duplicate method declaration");
            return self;
        }
        self.methods.push((name, Arc::new(method)));
        self
    }

    /// Append an action.
    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Set the hook run once per agent at install time.
    #[must_use]
    pub fn on_initialize<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Agent) + Send + Sync + 'static,
    {
        self.initialize = Some(Arc::new(hook));
        self
    }

    /// Installation key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Method names in declaration order.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(|(name, _)| name.as_str())
    }

    /// Declared methods in order.
    #[must_use]
    pub fn methods(&self) -> &[(String, UnboundMethod)] {
        &self.methods
    }

    /// Declared actions in order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub(super) fn initialize(&self, agent: &Agent) {
        if let Some(hook) = &self.initialize {
            hook(agent);
        }
    }
}

/// Bind `method` to `context`.
pub(super) fn bind(method: &UnboundMethod, context: &Arc<AgentContext>) -> BoundMethod {
    let method = Arc::clone(method);
    let context = Arc::clone(context);
    Arc::new(move |args| method(Arc::clone(&context), args))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::agent::tests::test_agent;

    fn constant(
        value: Value,
    ) -> impl Fn(Arc<AgentContext>, Value) -> MethodFuture + Send + Sync + 'static {
        move |_, _| {
            let value = value.clone();
            Box::pin(async move { Ok(value) })
        }
    }

    #[tokio::test]
    async fn test_duplicate_method_keeps_first_declaration() {
        let plugin = Plugin::new("p")
            .method("ping", constant(json!("first")))
            .method("ping", constant(json!("second")))
            .method("pong", constant(json!("pong")));

        assert_eq!(plugin.method_names().collect::<Vec<_>>(), vec!["ping", "pong"]);

        let mut agent = test_agent();
        agent.install(Arc::new(plugin)).unwrap();
        assert_eq!(agent.call_method("ping", Value::Null).await.unwrap(), json!("first"));
    }
}
