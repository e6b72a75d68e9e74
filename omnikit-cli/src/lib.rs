//! Omnikit CLI library: rendering helpers for the `omnikit` binary.
//!
//! The binary stands in for a chat loop. It prints the tool definitions an
//! LLM would receive and executes single tool calls against a live wallet.

use std::fmt::Write as _;

use omnikit::{Action, ToolSet, default_plugins, tool::build_tools};

/// Actions of the default plugins, in installation order.
#[must_use]
pub fn default_actions() -> Vec<Action> {
    default_plugins()
        .iter()
        .flat_map(|plugin| plugin.actions().iter().cloned())
        .collect()
}

/// Tool set for `actions`.
#[must_use]
pub fn tools(actions: &[Action]) -> ToolSet {
    build_tools(actions)
}

/// Render `actions` as a human-readable listing.
#[must_use]
pub fn render_actions(actions: &[Action]) -> String {
    let mut out = String::new();
    for action in actions {
        let _ = writeln!(out, "{}", action.name());
        if !action.similes().is_empty() {
            let _ = writeln!(out, "  similes: {}", action.similes().join(", "));
        }
        let _ = writeln!(out, "  {}", action.description());
        if let Some(schema) = action.schema() {
            let _ = writeln!(out, "  params: {}", schema.properties().join(", "));
        }
        for example in action.examples().iter().flatten() {
            let _ = writeln!(out, "  e.g. {} -> {}", example.input, example.explanation);
        }
    }
    out
}
