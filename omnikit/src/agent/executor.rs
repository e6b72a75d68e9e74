//! Action dispatch.
//!
//! Turns a tool call (name + raw JSON arguments) into a validated, executed
//! [`ActionResult`]. [`execute`] never fails: every error is logged and
//! folded into an error result for the chat loop.

use serde_json::Value;
use tracing::{debug, error, warn};

use super::Agent;
use crate::action::{Action, ActionResult};
use crate::error::{Error, Result};

/// Validate `input` against the action schema and run the handler.
///
/// Input is checked structurally first. Nothing is coerced, so a number
/// where a string is expected is a violation.
pub async fn try_execute(action: &Action, agent: &Agent, input: Value) -> Result<ActionResult> {
    let schema = action
        .schema()
        .ok_or_else(|| Error::MissingSchema(action.name().to_string()))?;
    schema
        .validate(&input)
        .map_err(|violations| Error::validation(action.name(), violations))?;

    debug!(action = action.name(), "executing action");
    action.handler().call(agent, input).await
}

/// Like [`try_execute`], with any failure converted into an error result.
pub async fn execute(action: &Action, agent: &Agent, input: Value) -> ActionResult {
    match try_execute(action, agent, input).await {
        Ok(result) => {
            if !result.is_success() {
                warn!(
                    action = action.name(),
                    reason = result.message(),
                    "action reported an error"
                );
            }
            result
        }
        Err(err) => {
            error!(action = action.name(), error = %err, "action failed");
            ActionResult::from_error(&err)
        }
    }
}

/// Resolve a tool call by exact action name and execute it.
pub async fn execute_tool_call(agent: &Agent, name: &str, input: Value) -> ActionResult {
    match agent.action(name) {
        Some(action) => execute(action, agent, input).await,
        None => {
            let err = Error::UnknownAction(name.to_string());
            warn!(tool = name, "tool call for unknown action");
            ActionResult::from_error(&err)
        }
    }
}
