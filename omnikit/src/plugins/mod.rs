//! Built-in plugins.
//!
//! - [`token`]: native and ERC-20 transfers (`ERC20_TRANSFER`)
//! - [`layerzero`]: cross-chain bridging through LayerZero OFTs (`LZ_TRANSFER`)

pub mod layerzero;
pub(crate) mod params;
pub mod token;

use std::sync::Arc;

use crate::agent::{Agent, AgentContext, Plugin};
use crate::error::PluginError;

/// The plugins installed by [`agent_builder`], in installation order.
#[must_use]
pub fn default_plugins() -> Vec<Arc<Plugin>> {
    vec![Arc::new(token::plugin()), Arc::new(layerzero::plugin())]
}

/// Build an agent for one request with the default plugins installed.
pub fn agent_builder(context: AgentContext) -> Result<Agent, PluginError> {
    let mut agent = Agent::from_context(context);
    for plugin in default_plugins() {
        agent.install(plugin)?;
    }
    Ok(agent)
}
