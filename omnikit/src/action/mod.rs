//! Actions: named, schema-validated units of agent capability.
//!
//! An [`Action`] pairs LLM-facing metadata (name, similes, description,
//! examples) with an input schema and an async handler. Actions are built
//! once, at plugin-definition time, and are cheap to clone.
//!
//! ```rust,ignore
//! #[derive(Deserialize, JsonSchema)]
//! struct Echo { text: String }
//!
//! fn echo(_agent: &Agent, input: Echo) -> BoxFuture<'_, Result<ActionResult>> {
//!     Box::pin(async move { Ok(ActionResult::success(input.text)) })
//! }
//!
//! let action = Action::builder("ECHO")
//!     .description("Echo the text back")
//!     .simile("repeat after me")
//!     .handler(echo);
//! ```

mod result;
mod schema;

use std::marker::PhantomData;
use std::sync::Arc;

use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use result::ActionResult;
pub use schema::InputSchema;

use crate::agent::Agent;
use crate::error::{Error, FieldViolation, Result};

/// A documented usage example. Never executed by the runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionExample {
    /// Example input payload.
    pub input: Value,
    /// Expected result shape.
    pub output: Value,
    /// What the example demonstrates.
    pub explanation: String,
}

impl ActionExample {
    /// Create an example.
    #[must_use]
    pub fn new(input: Value, output: Value, explanation: impl Into<String>) -> Self {
        Self {
            input,
            output,
            explanation: explanation.into(),
        }
    }
}

/// Type-erased action handler.
///
/// Receives input that already passed the action's [`InputSchema`].
pub trait ActionHandler: Send + Sync {
    /// Run the action against `agent`.
    fn call<'a>(&'a self, agent: &'a Agent, input: Value) -> BoxFuture<'a, Result<ActionResult>>;
}

/// Deserialize `input` into `I`, reporting the failing path as a violation.
fn decode<I: DeserializeOwned>(action: &str, input: Value) -> Result<I> {
    serde_path_to_error::deserialize(input).map_err(|e| {
        let field = e.path().to_string();
        Error::validation(action, vec![FieldViolation::new(field, e.into_inner().to_string())])
    })
}

/// Adapts a typed handler function to [`ActionHandler`].
struct TypedHandler<I, F> {
    action: String,
    handler: F,
    _input: PhantomData<fn() -> I>,
}

impl<I, F> ActionHandler for TypedHandler<I, F>
where
    I: DeserializeOwned + Send + 'static,
    F: for<'a> Fn(&'a Agent, I) -> BoxFuture<'a, Result<ActionResult>> + Send + Sync,
{
    fn call<'a>(&'a self, agent: &'a Agent, input: Value) -> BoxFuture<'a, Result<ActionResult>> {
        match decode::<I>(&self.action, input) {
            Ok(typed) => (self.handler)(agent, typed),
            Err(err) => Box::pin(async move { Err(err) }),
        }
    }
}

/// A named, independently invocable capability.
#[derive(Clone)]
pub struct Action {
    name: String,
    similes: Vec<String>,
    description: String,
    examples: Vec<Vec<ActionExample>>,
    schema: Option<InputSchema>,
    handler: Arc<dyn ActionHandler>,
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("similes", &self.similes)
            .field("has_schema", &self.schema.is_some())
            .finish_non_exhaustive()
    }
}

impl Action {
    /// Start building an action.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ActionBuilder {
        ActionBuilder {
            name: name.into(),
            similes: Vec::new(),
            description: String::new(),
            examples: Vec::new(),
        }
    }

    /// Unique name; doubles as the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternative phrasings for the LLM.
    #[must_use]
    pub fn similes(&self) -> &[String] {
        &self.similes
    }

    /// What the action does and which parameters it needs.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Grouped usage examples.
    #[must_use]
    pub fn examples(&self) -> &[Vec<ActionExample>] {
        &self.examples
    }

    /// The input schema, if the action declares one.
    #[must_use]
    pub const fn schema(&self) -> Option<&InputSchema> {
        self.schema.as_ref()
    }

    /// The handler.
    #[must_use]
    pub fn handler(&self) -> &dyn ActionHandler {
        self.handler.as_ref()
    }
}

/// Builder for [`Action`]. Finished by [`handler`](Self::handler) or
/// [`raw_handler`](Self::raw_handler).
#[derive(Debug)]
pub struct ActionBuilder {
    name: String,
    similes: Vec<String>,
    description: String,
    examples: Vec<Vec<ActionExample>>,
}

impl ActionBuilder {
    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add an alternative phrasing.
    #[must_use]
    pub fn simile(mut self, simile: impl Into<String>) -> Self {
        self.similes.push(simile.into());
        self
    }

    /// Add a group of related examples.
    #[must_use]
    pub fn examples(mut self, group: Vec<ActionExample>) -> Self {
        self.examples.push(group);
        self
    }

    /// Finish with a typed handler; the schema is generated from `I`.
    pub fn handler<I, F>(self, handler: F) -> Action
    where
        I: DeserializeOwned + JsonSchema + Send + 'static,
        F: for<'a> Fn(&'a Agent, I) -> BoxFuture<'a, Result<ActionResult>> + Send + Sync + 'static,
    {
        let typed = TypedHandler {
            action: self.name.clone(),
            handler,
            _input: PhantomData,
        };
        self.raw_handler(Some(InputSchema::of::<I>()), Arc::new(typed))
    }

    /// Finish with an untyped handler and an explicit (possibly absent) schema.
    pub fn raw_handler(
        self,
        schema: Option<InputSchema>,
        handler: Arc<dyn ActionHandler>,
    ) -> Action {
        Action {
            name: self.name,
            similes: self.similes,
            description: self.description,
            examples: self.examples,
            schema,
            handler,
        }
    }
}
