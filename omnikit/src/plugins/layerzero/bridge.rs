use alloy::primitives::{Address, Bytes, TxHash};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::metadata::{DEFAULT_METADATA_URL, LayerZeroMetadata, OftDirectory};
use super::options::Options;
use crate::agent::AgentContext;
use crate::chain::abi::{IERC20, IOFT, SendParam};
use crate::chain::{ContractCall, read_contract};
use crate::config::AgentConfig;
use crate::error::{Error, Result};
use crate::plugins::params::{NATIVE_DECIMALS, parse_address, require_account, to_base_units};

/// Gas requested for `lzReceive` when extra native gas is airdropped.
pub const LZ_RECEIVE_GAS: u128 = 1_000_000;

/// Input of the `LZ_TRANSFER` action and the `bridge_with_oft` method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BridgeRequest {
    /// Source chain name
    pub from_chain: String,
    /// Destination chain name
    pub to_chain: String,
    /// Amount of native gas to add on the destination chain ("0" for none)
    pub add_gas_qty: String,
    /// ERC20 token contract address
    pub token_address: String,
    /// Amount of tokens to transfer (in token units)
    pub amount: String,
    /// OFT or OFT adapter contract; defaults to the token itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oft_address: Option<String>,
    /// Token symbol used to look the OFT up in the LayerZero metadata API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// LayerZero v2 endpoint id of a supported destination chain.
#[must_use]
pub fn endpoint_id(chain: &str) -> Option<u32> {
    match chain.to_lowercase().as_str() {
        "ethereum" => Some(30101),
        "arbitrum" => Some(30110),
        "base" => Some(30184),
        "abstract" => Some(30324),
        "optimism" => Some(30111),
        _ => None,
    }
}

fn extra_options(add_gas_qty: &str) -> Result<Bytes> {
    let value = to_base_units(add_gas_qty, NATIVE_DECIMALS)?;
    if value.is_zero() {
        return Ok(Options::new().to_bytes());
    }
    let value = u128::try_from(value)
        .map_err(|_| Error::invalid_amount(add_gas_qty, "gas value does not fit in 128 bits"))?;
    Ok(Options::new()
        .add_executor_lz_receive_option(LZ_RECEIVE_GAS, value)
        .to_bytes())
}

/// Returns `(token, oft)`.
async fn resolve_contracts(
    request: &BridgeRequest,
    directory: Option<&dyn OftDirectory>,
) -> Result<(Address, Address)> {
    let token = parse_address("token", &request.token_address)?;

    if let Some(oft) = &request.oft_address {
        return Ok((token, parse_address("OFT", oft)?));
    }

    match (&request.symbol, directory) {
        (Some(symbol), Some(directory)) => {
            let chain = request.from_chain.to_lowercase();
            let deployment = directory.lookup(&chain, symbol).await?.ok_or_else(|| {
                Error::Metadata(format!("no {symbol} OFT deployment on {chain}"))
            })?;
            if deployment.token != token {
                info!(
                    requested = %token,
                    resolved = %deployment.token,
                    symbol = symbol.as_str(),
                    "using token from OFT metadata"
                );
            }
            Ok((deployment.token, deployment.oft))
        }
        (Some(symbol), None) => Err(Error::Config(format!(
            "no OFT directory to look up {symbol}"
        ))),
        (None, _) => Ok((token, token)),
    }
}

/// Bridge tokens through a LayerZero OFT and return the `send` transaction hash.
///
/// A request carrying a `symbol` (and no `oftAddress`) looks the OFT up in the
/// metadata API at `layerzero_metadata_url`, or [`DEFAULT_METADATA_URL`] when
/// none is configured.
pub async fn bridge_with_oft(ctx: &AgentContext, request: &BridgeRequest) -> Result<TxHash> {
    let directory = metadata_directory(ctx.config(), request);
    bridge(ctx, request, directory.as_ref().map(|d| d as &dyn OftDirectory)).await
}

fn metadata_directory(config: &AgentConfig, request: &BridgeRequest) -> Option<LayerZeroMetadata> {
    if request.symbol.is_none() || request.oft_address.is_some() {
        return None;
    }
    let url = config
        .layerzero_metadata_url
        .as_deref()
        .unwrap_or(DEFAULT_METADATA_URL);
    Some(LayerZeroMetadata::new(url))
}

pub(crate) async fn bridge(
    ctx: &AgentContext,
    request: &BridgeRequest,
    directory: Option<&dyn OftDirectory>,
) -> Result<TxHash> {
    let dst_eid =
        endpoint_id(&request.to_chain).ok_or_else(|| Error::UnknownChain(request.to_chain.clone()))?;
    let extra_options = extra_options(&request.add_gas_qty)?;
    let account = require_account(ctx)?;
    let (token, oft) = resolve_contracts(request, directory).await?;
    let connection = ctx.connection();

    let decimals =
        read_contract(connection, Some(account), token, &IERC20::decimalsCall {}).await?;
    let amount = to_base_units(&request.amount, decimals)?;

    let balance = read_contract(
        connection,
        Some(account),
        token,
        &IERC20::balanceOfCall { owner: account },
    )
    .await?;
    if balance < amount {
        return Err(Error::insufficient("token balance", amount, balance));
    }

    let allowance = read_contract(
        connection,
        Some(account),
        token,
        &IERC20::allowanceCall {
            owner: account,
            spender: oft,
        },
    )
    .await?;
    if allowance < amount {
        let approve = ContractCall::new(
            token,
            &IERC20::approveCall {
                spender: oft,
                value: amount,
            },
        )
        .with_from(account);
        let simulated = connection.simulate(approve).await?;
        let approval = ctx.wallet().write_contract(simulated).await?;
        info!(%token, spender = %oft, tx = %approval, "approval submitted");
        connection.wait_for_receipt(approval).await?;
    }

    let native_balance = connection.balance(account).await?;

    let send_param = SendParam {
        dstEid: dst_eid,
        to: account.into_word(),
        amountLD: amount,
        minAmountLD: amount,
        extraOptions: extra_options,
        composeMsg: Bytes::new(),
        oftCmd: Bytes::new(),
    };
    let fee = read_contract(
        connection,
        Some(account),
        oft,
        &IOFT::quoteSendCall {
            sendParam: send_param.clone(),
            payInLzToken: false,
        },
    )
    .await?;
    debug!(native_fee = %fee.nativeFee, lz_token_fee = %fee.lzTokenFee, "quoted send");
    if native_balance < fee.nativeFee {
        return Err(Error::insufficient(
            "native balance for fees",
            fee.nativeFee,
            native_balance,
        ));
    }

    let native_fee = fee.nativeFee;
    let send = ContractCall::new(
        oft,
        &IOFT::sendCall {
            sendParam: send_param,
            fee,
            refundAddress: account,
        },
    )
    .with_from(account)
    .with_value(native_fee);
    let simulated = connection.simulate(send).await?;
    let hash = ctx.wallet().write_contract(simulated).await?;

    info!(
        %oft,
        dst_eid,
        %amount,
        tx = %hash,
        "OFT send submitted"
    );
    Ok(hash)
}
