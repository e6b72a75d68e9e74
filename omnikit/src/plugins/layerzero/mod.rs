//! The `layerzero` plugin: cross-chain token bridging through LayerZero OFTs.
//!
//! Contributes the `bridge_with_oft` method and the `LZ_TRANSFER` action.
//! A bridge run reads decimals, balance and allowance, approves the OFT if
//! needed (waiting for the approval receipt), quotes the messaging fee and
//! finally calls `send` with the fee attached.

mod bridge;
mod metadata;
mod options;

use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::{Value, json};

pub use bridge::{BridgeRequest, LZ_RECEIVE_GAS, bridge_with_oft, endpoint_id};
pub use metadata::{DEFAULT_METADATA_URL, LayerZeroMetadata, OftDeployment, OftDirectory};
pub use options::Options;

use crate::action::{Action, ActionExample, ActionResult};
use crate::agent::{Agent, AgentContext, MethodFuture, Plugin};
use crate::error::Result;

/// Plugin name.
pub const PLUGIN_NAME: &str = "layerzero";

/// Action name.
pub const BRIDGE_ACTION: &str = "LZ_TRANSFER";

fn bridge_method(ctx: Arc<AgentContext>, args: Value) -> MethodFuture {
    Box::pin(async move {
        let request: BridgeRequest = serde_json::from_value(args)?;
        let hash = bridge_with_oft(&ctx, &request).await?;
        Ok(json!(hash))
    })
}

fn handle_bridge(agent: &Agent, input: BridgeRequest) -> BoxFuture<'_, Result<ActionResult>> {
    Box::pin(async move {
        let hash = bridge_with_oft(agent.context(), &input).await?;
        Ok(ActionResult::success("Token bridge completed successfully")
            .with_field("signature", hash.to_string())
            .with_field("to", input.to_chain)
            .with_field("tokenAddress", input.token_address)
            .with_field("amount", input.amount))
    })
}

/// The `LZ_TRANSFER` action.
#[must_use]
pub fn bridge_action() -> Action {
    Action::builder(BRIDGE_ACTION)
        .description(
            "Bridge tokens across different chains using LayerZero protocol. Specify the source \
             chain, destination chain, token address, amount to transfer, and optional gas \
             quantity to add. Supported destinations: ethereum, arbitrum, base, abstract, optimism.",
        )
        .simile("bridge token")
        .simile("cross-chain transfer")
        .simile("layerzero bridge")
        .simile("lz transfer")
        .examples(vec![ActionExample::new(
            json!({
                "fromChain": "ethereum",
                "toChain": "arbitrum",
                "tokenAddress": "0xdAC17F958D2ee523a2206206994597C13D831ec7",
                "amount": "100",
                "addGasQty": "0.01",
                "symbol": "USDT0",
            }),
            json!({
                "status": "success",
                "message": "Token bridge completed successfully",
                "signature": "0x1234567890abcdef...",
            }),
            "Bridge 100 tokens from Ethereum to Arbitrum with 0.01 additional gas",
        )])
        .handler(handle_bridge)
}

/// The `layerzero` plugin.
#[must_use]
pub fn plugin() -> Plugin {
    Plugin::new(PLUGIN_NAME)
        .method("bridge_with_oft", bridge_method)
        .action(bridge_action())
}
