//! The `token` plugin: native and ERC-20 transfers.
//!
//! Contributes the `transfer` method and the `ERC20_TRANSFER` action.

mod transfer;

use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::{Value, json};

pub use transfer::{TransferRequest, transfer};

use crate::action::{Action, ActionExample, ActionResult};
use crate::agent::{Agent, AgentContext, MethodFuture, Plugin};
use crate::error::Result;

/// Plugin name.
pub const PLUGIN_NAME: &str = "token";

/// Action name.
pub const TRANSFER_ACTION: &str = "ERC20_TRANSFER";

fn transfer_method(ctx: Arc<AgentContext>, args: Value) -> MethodFuture {
    Box::pin(async move {
        let request: TransferRequest = serde_json::from_value(args)?;
        let hash = transfer(&ctx, &request).await?;
        Ok(json!(hash))
    })
}

fn handle_transfer(agent: &Agent, input: TransferRequest) -> BoxFuture<'_, Result<ActionResult>> {
    Box::pin(async move {
        let hash = transfer(agent.context(), &input).await?;
        Ok(ActionResult::success("ERC20 transfer completed successfully")
            .with_field("signature", hash.to_string())
            .with_field("to", input.to)
            .with_field("tokenAddress", input.token_address)
            .with_field("amount", input.amount))
    })
}

/// The `ERC20_TRANSFER` action.
#[must_use]
pub fn transfer_action() -> Action {
    Action::builder(TRANSFER_ACTION)
        .description(
            "Transfer ERC20 tokens to a recipient address, if users wants to transfer native \
             token, use the token address 0x0000000000000000000000000000000000000000.",
        )
        .simile("transfer token")
        .simile("send token")
        .simile("transfer erc20")
        .examples(vec![ActionExample::new(
            json!({
                "to": "0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6",
                "tokenAddress": "0xdAC17F958D2ee523a2206206994597C13D831ec7",
                "amount": "100",
            }),
            json!({
                "status": "success",
                "message": "ERC20 transfer completed successfully",
                "signature": "0x1234567890abcdef...",
            }),
            "Transfer 100 tokens to the specified address",
        )])
        .examples(vec![ActionExample::new(
            json!({
                "to": "vitalik.eth",
                "tokenAddress": "0x0000000000000000000000000000000000000000",
                "amount": "0.05",
            }),
            json!({
                "status": "success",
                "message": "ERC20 transfer completed successfully",
                "signature": "0xabcdef1234567890...",
            }),
            "Send 0.05 of the native token to an ENS name",
        )])
        .handler(handle_transfer)
}

/// The `token` plugin.
#[must_use]
pub fn plugin() -> Plugin {
    Plugin::new(PLUGIN_NAME)
        .method("transfer", transfer_method)
        .action(transfer_action())
}
