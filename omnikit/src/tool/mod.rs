//! Exposes an agent's actions to a tool-calling LLM runtime.
//!
//! Each [`Action`] becomes a [`ToolDefinition`]: its name, its description
//! and its input schema as the parameter schema. No executable is attached;
//! when the model picks a tool the call goes back through
//! [`executor::execute_tool_call`](crate::agent::executor::execute_tool_call).
//!
//! Tool-calling runtimes limit how many tools one request may carry, so at
//! most [`MAX_TOOLS`] actions are exposed. Actions beyond the cap are dropped
//! with a warning.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::action::Action;

/// Maximum number of tools exposed to the model.
pub const MAX_TOOLS: usize = 128;

/// A tool as presented to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name, equal to the action name.
    pub name: String,
    /// What the tool does.
    pub description: String,
    /// JSON Schema of the arguments.
    pub parameters: Value,
}

impl ToolDefinition {
    /// Render as an OpenAI-style function tool.
    #[must_use]
    pub fn to_openai(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters,
            }
        })
    }
}

/// The tools built from an action list.
#[derive(Debug, Clone, Default)]
pub struct ToolSet {
    tools: Vec<ToolDefinition>,
    dropped: usize,
    skipped: Vec<String>,
}

impl ToolSet {
    /// Tool definitions in action order.
    #[must_use]
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Look up a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Tool names in action order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }

    /// Number of tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether there are no tools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Actions cut off by [`MAX_TOOLS`].
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Names of actions within the cap that were not exposed (invalid or
    /// duplicate). Unnamed actions appear as an empty string.
    #[must_use]
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// All tools as an OpenAI-style `tools` array.
    #[must_use]
    pub fn to_openai_tools(&self) -> Value {
        Value::Array(self.tools.iter().map(ToolDefinition::to_openai).collect())
    }
}

/// Build tool definitions for `actions`.
///
/// Only the first [`MAX_TOOLS`] actions are considered. Among those, actions
/// without a name or a schema are skipped, as are later actions reusing an
/// earlier name.
#[must_use]
pub fn build_tools(actions: &[Action]) -> ToolSet {
    let dropped = actions.len().saturating_sub(MAX_TOOLS);
    if dropped > 0 {
        warn!(
            provided = actions.len(),
            dropped,
            max = MAX_TOOLS,
            "Too many actions provided, only the first {MAX_TOOLS} are exposed as tools"
        );
    }

    let mut set = ToolSet {
        dropped,
        ..ToolSet::default()
    };

    for action in actions.iter().take(MAX_TOOLS) {
        let name = action.name();
        let Some(schema) = action.schema().filter(|_| !name.is_empty()) else {
            warn!(action = name, "Skipping invalid action without name or schema");
            set.skipped.push(name.to_string());
            continue;
        };
        if set.get(name).is_some() {
            warn!(action = name, "Skipping action with duplicate tool name");
            set.skipped.push(name.to_string());
            continue;
        }

        set.tools.push(ToolDefinition {
            name: name.to_string(),
            description: action.description().to_string(),
            parameters: schema.as_value().clone(),
        });
        debug!(tool = name, "created tool");
    }

    set
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use futures::future::BoxFuture;
    use serde_json::json;
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::*;
    use crate::action::tests::echo_action;
    use crate::action::{ActionHandler, ActionResult, InputSchema};
    use crate::agent::Agent;
    use crate::error::Result;

    struct Noop;

    impl ActionHandler for Noop {
        fn call<'a>(&'a self, _: &'a Agent, _: Value) -> BoxFuture<'a, Result<ActionResult>> {
            Box::pin(async { Ok(ActionResult::success("noop")) })
        }
    }

    type Fields = BTreeMap<String, String>;

    #[derive(Clone, Default)]
    struct WarnCapture(Arc<Mutex<Vec<Fields>>>);

    struct FieldMap(Fields);

    impl Visit for FieldMap {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_string(), value.to_string());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_string(), format!("{value:?}"));
        }
    }

    impl<S: Subscriber> Layer<S> for WarnCapture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() != Level::WARN {
                return;
            }
            let mut fields = FieldMap(Fields::new());
            event.record(&mut fields);
            self.0.lock().unwrap().push(fields.0);
        }
    }

    fn warnings_of<T>(f: impl FnOnce() -> T) -> (T, Vec<Fields>) {
        let capture = WarnCapture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let out = tracing::subscriber::with_default(subscriber, f);
        let events = capture.0.lock().unwrap().clone();
        (out, events)
    }

    fn actions(n: usize) -> Vec<Action> {
        (0..n).map(|i| echo_action(&format!("ACTION_{i}"))).collect()
    }

    #[test]
    fn test_cap_drops_excess_actions() {
        let (set, warnings) = warnings_of(|| build_tools(&actions(130)));
        assert_eq!(set.len(), 128);
        assert_eq!(set.dropped(), 2);
        assert!(set.get("ACTION_127").is_some());
        assert!(set.get("ACTION_128").is_none());
        assert!(set.get("ACTION_129").is_none());

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0]["dropped"], "2");
        assert_eq!(warnings[0]["provided"], "130");
    }

    #[test]
    fn test_exactly_cap_keeps_all() {
        let (set, warnings) = warnings_of(|| build_tools(&actions(MAX_TOOLS)));
        assert_eq!(set.len(), MAX_TOOLS);
        assert_eq!(set.dropped(), 0);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_skips_unnamed_and_schemaless_actions() {
        let unnamed = echo_action("");
        let bare = Action::builder("BARE").raw_handler(None, Arc::new(Noop));
        let ok = echo_action("ECHO");

        let (set, warnings) = warnings_of(|| build_tools(&[unnamed, bare, ok]));
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["ECHO"]);
        assert_eq!(set.skipped(), ["".to_string(), "BARE".to_string()]);
        let skipped: Vec<&str> = warnings.iter().map(|w| w["action"].as_str()).collect();
        assert_eq!(skipped, vec!["", "BARE"]);
    }

    #[test]
    fn test_skips_duplicate_names() {
        let (set, warnings) =
            warnings_of(|| build_tools(&[echo_action("ECHO"), echo_action("ECHO")]));
        assert_eq!(set.len(), 1);
        assert_eq!(set.skipped(), ["ECHO".to_string()]);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0]["action"], "ECHO");
    }

    #[test]
    fn test_definition_carries_schema_and_description() {
        let schema = json!({
            "type": "object",
            "properties": { "to": { "type": "string" } },
            "required": ["to"]
        });
        let action = Action::builder("SEND")
            .description("Send things")
            .raw_handler(Some(InputSchema::from_value(schema.clone())), Arc::new(Noop));

        let set = build_tools(&[action]);
        let tool = set.get("SEND").unwrap();
        assert_eq!(tool.description, "Send things");
        assert_eq!(tool.parameters, schema);
        assert_eq!(
            set.to_openai_tools(),
            json!([{
                "type": "function",
                "function": {
                    "name": "SEND",
                    "description": "Send things",
                    "parameters": schema,
                }
            }])
        );
    }
}
