//! Chain collaborators consumed by actions.
//!
//! Actions never talk to an RPC node directly. They go through three narrow
//! traits so that the runtime can be driven by a real alloy provider in
//! production and by in-memory fakes in tests:
//!
//! ```text
//! Connection    read-only: eth_call, simulate, balance, wait for receipt
//! Wallet        signing: active account, value transfer, contract write
//! NameResolver  ENS-style name -> address
//! ```
//!
//! [`EvmWallet`] and [`RpcConnection`] implement these traits on top of an
//! alloy provider; [`EnsResolver`] resolves `.eth` names against the ENS
//! registry.

pub mod abi;
mod ens;
mod error;
mod evm;
#[cfg(test)]
pub(crate) mod mock;

use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::sol_types::SolCall;
use async_trait::async_trait;

pub use ens::{EnsResolver, namehash};
pub use error::ChainError;
pub use evm::{EvmWallet, EvmWalletBuilder, RpcConnection};

/// A contract call, used both for reads and for state-changing writes.
///
/// A simulated call is handed back by [`Connection::simulate`] and then
/// submitted unchanged through [`Wallet::write_contract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    /// Sender the call is executed as.
    pub from: Option<Address>,
    /// Target contract.
    pub to: Address,
    /// ABI-encoded calldata.
    pub input: Bytes,
    /// Native value attached to the call.
    pub value: U256,
}

impl ContractCall {
    /// Encode `call` against the contract at `to`.
    #[must_use]
    pub fn new<C: SolCall>(to: Address, call: &C) -> Self {
        Self {
            from: None,
            to,
            input: Bytes::from(call.abi_encode()),
            value: U256::ZERO,
        }
    }

    /// Execute the call as `from`.
    #[must_use]
    pub const fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Attach native value to the call.
    #[must_use]
    pub const fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// The 4-byte function selector, if the calldata has one.
    #[must_use]
    pub fn selector(&self) -> Option<[u8; 4]> {
        self.input.get(..4).and_then(|s| s.try_into().ok())
    }
}

/// A plain native-currency transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueTransfer {
    /// Sending account.
    pub from: Address,
    /// Recipient.
    pub to: Address,
    /// Amount in wei.
    pub value: U256,
}

/// Read-only access to chain state.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Execute a call against the latest block and return the raw output.
    async fn call(&self, call: &ContractCall) -> Result<Bytes, ChainError>;

    /// Dry-run a state-changing call. Returns the request to submit, or the
    /// revert reason.
    async fn simulate(&self, call: ContractCall) -> Result<ContractCall, ChainError>;

    /// Native balance of `address` in wei.
    async fn balance(&self, address: Address) -> Result<U256, ChainError>;

    /// Block until `hash` is mined.
    async fn wait_for_receipt(&self, hash: TxHash) -> Result<(), ChainError>;
}

/// A signing account able to submit transactions.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// The active signing account, if any.
    fn account(&self) -> Option<Address>;

    /// Submit a native-value transfer.
    async fn send_transaction(&self, tx: ValueTransfer) -> Result<TxHash, ChainError>;

    /// Submit a (previously simulated) contract call.
    async fn write_contract(&self, call: ContractCall) -> Result<TxHash, ChainError>;
}

/// Resolves human-readable names (e.g. `alice.eth`) to addresses.
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Returns `None` when the name has no address record.
    async fn resolve(&self, name: &str) -> Result<Option<Address>, ChainError>;
}

/// Execute a typed view call and decode its return value.
pub async fn read_contract<C>(
    connection: &dyn Connection,
    from: Option<Address>,
    to: Address,
    call: &C,
) -> Result<C::Return, ChainError>
where
    C: SolCall + Sync,
{
    let mut request = ContractCall::new(to, call);
    request.from = from;
    let output = connection.call(&request).await?;
    C::abi_decode_returns(&output)
        .map_err(|e| ChainError::Decode(format!("{}: {e}", C::SIGNATURE)))
}

#[cfg(test)]
mod tests {
    use super::abi::IERC20;
    use super::*;

    #[test]
    fn test_contract_call_selector() {
        let call = ContractCall::new(
            Address::ZERO,
            &IERC20::transferCall {
                to: Address::repeat_byte(0x11),
                value: U256::from(5),
            },
        );
        assert_eq!(call.selector(), Some(IERC20::transferCall::SELECTOR));
        assert_eq!(call.input.len(), 4 + 32 * 2);
        assert_eq!(call.value, U256::ZERO);
        assert_eq!(call.from, None);
    }

    #[test]
    fn test_contract_call_builders() {
        let from = Address::repeat_byte(0xaa);
        let call = ContractCall::new(Address::ZERO, &IERC20::decimalsCall {})
            .with_from(from)
            .with_value(U256::from(7));
        assert_eq!(call.from, Some(from));
        assert_eq!(call.value, U256::from(7));
    }
}
