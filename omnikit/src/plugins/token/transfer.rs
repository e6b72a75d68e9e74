use alloy::primitives::{Address, TxHash};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::agent::AgentContext;
use crate::chain::abi::IERC20;
use crate::chain::{ContractCall, ValueTransfer, read_contract};
use crate::error::Result;
use crate::plugins::params::{
    NATIVE_DECIMALS, parse_address, require_account, resolve_recipient, to_base_units,
};

/// Input of the `ERC20_TRANSFER` action and the `transfer` method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Recipient wallet address or ENS name
    pub to: String,
    /// ERC20 token contract address (zero address for the native token)
    pub token_address: String,
    /// Amount of tokens to transfer (in token units)
    pub amount: String,
}

/// Transfer native currency or an ERC-20 token and return the transaction hash.
///
/// The zero token address selects a native transfer. Otherwise the token's
/// `decimals()` scales the amount and the `transfer` call is simulated before
/// it is submitted.
pub async fn transfer(ctx: &AgentContext, request: &TransferRequest) -> Result<TxHash> {
    let to = resolve_recipient(ctx, &request.to).await?;
    let token = parse_address("token", &request.token_address)?;
    let account = require_account(ctx)?;

    if token == Address::ZERO {
        let value = to_base_units(&request.amount, NATIVE_DECIMALS)?;
        let hash = ctx
            .wallet()
            .send_transaction(ValueTransfer {
                from: account,
                to,
                value,
            })
            .await?;
        info!(%to, %value, tx = %hash, "native transfer submitted");
        return Ok(hash);
    }

    let decimals =
        read_contract(ctx.connection(), Some(account), token, &IERC20::decimalsCall {}).await?;
    let value = to_base_units(&request.amount, decimals)?;

    let call = ContractCall::new(token, &IERC20::transferCall { to, value }).with_from(account);
    let simulated = ctx.connection().simulate(call).await?;
    let hash = ctx.wallet().write_contract(simulated).await?;

    info!(%token, %to, %value, tx = %hash, "ERC20 transfer submitted");
    Ok(hash)
}
