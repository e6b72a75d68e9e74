//! Input parsing shared by the built-in actions.

use std::sync::LazyLock;

use alloy::primitives::utils::{ParseUnits, parse_units};
use alloy::primitives::{Address, U256};
use regex::Regex;
use tracing::{debug, warn};

use crate::agent::AgentContext;
use crate::error::{Error, Result};

/// Decimals of the native currency.
pub(crate) const NATIVE_DECIMALS: u8 = 18;

static HEX_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("valid regex"));

static ENS_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:[^.\s]+\.)+eth$").expect("valid regex"));

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)?$").expect("valid regex"));

/// Parse a strict `0x`-prefixed 40-hex-digit address.
pub(crate) fn parse_address(field: &'static str, value: &str) -> Result<Address> {
    if !HEX_ADDRESS.is_match(value) {
        return Err(Error::invalid_address(field, value));
    }
    value
        .parse()
        .map_err(|_| Error::invalid_address(field, value))
}

/// Whether `value` looks like an ENS name (`alice.eth`, `pay.alice.eth`).
pub(crate) fn is_ens_name(value: &str) -> bool {
    ENS_NAME.is_match(value)
}

/// Resolve a recipient given as an ENS name or a hex address.
pub(crate) async fn resolve_recipient(ctx: &AgentContext, value: &str) -> Result<Address> {
    if !is_ens_name(value) {
        return parse_address("recipient", value);
    }

    let Some(resolver) = ctx.resolver() else {
        warn!(name = value, "no name resolver configured");
        return Err(Error::AddressResolution(value.to_string()));
    };
    match resolver.resolve(value).await {
        Ok(Some(address)) => {
            debug!(name = value, %address, "resolved name");
            Ok(address)
        }
        Ok(None) => Err(Error::AddressResolution(value.to_string())),
        Err(err) => {
            warn!(name = value, error = %err, "name resolution failed");
            Err(Error::AddressResolution(value.to_string()))
        }
    }
}

/// The wallet's active account.
pub(crate) fn require_account(ctx: &AgentContext) -> Result<Address> {
    ctx.wallet().account().ok_or(Error::NoAccount)
}

/// Scale a decimal amount string to base units, exactly.
///
/// Rejects signs and exponents. Trailing fractional zeros are ignored; any
/// other digit past `decimals` is an error.
pub(crate) fn to_base_units(amount: &str, decimals: u8) -> Result<U256> {
    if !DECIMAL.is_match(amount) {
        return Err(Error::invalid_amount(
            amount,
            "expected a non-negative decimal number",
        ));
    }
    let exact = match amount.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.len() > usize::from(decimals) {
                return Err(Error::invalid_amount(
                    amount,
                    format!("more than {decimals} fractional digits"),
                ));
            }
            if fraction.is_empty() {
                whole.to_string()
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => amount.to_string(),
    };

    match parse_units(&exact, decimals).map_err(|e| Error::invalid_amount(amount, e.to_string()))? {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(_) => Err(Error::invalid_amount(amount, "amount must not be negative")),
    }
}
