//! alloy-backed chain collaborators.
//!
//! [`EvmWallet`] combines HD key derivation ([`kobe`]), a local
//! `PrivateKeySigner` and a type-erased alloy provider. [`RpcConnection`] is
//! the read-only half, shared with the wallet when both are built together.

use std::sync::Arc;

use alloy::network::{Ethereum, ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::Signer;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use tracing::{debug, info};

use super::{ChainError, Connection, ContractCall, ValueTransfer, Wallet};

fn to_request(call: &ContractCall) -> TransactionRequest {
    let tx = TransactionRequest::default()
        .with_to(call.to)
        .with_input(call.input.clone())
        .with_value(call.value);
    match call.from {
        Some(from) => tx.with_from(from),
        None => tx,
    }
}

/// Read-only JSON-RPC connection.
#[derive(Clone)]
pub struct RpcConnection {
    provider: DynProvider<Ethereum>,
}

impl std::fmt::Debug for RpcConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcConnection").finish_non_exhaustive()
    }
}

impl RpcConnection {
    /// Connect to a JSON-RPC endpoint without a signer.
    pub async fn connect(rpc_url: &str) -> Result<Self, ChainError> {
        let provider = ProviderBuilder::new()
            .connect(rpc_url)
            .await
            .map_err(|e| ChainError::provider(format!("failed to connect to '{rpc_url}': {e}")))?
            .erased();
        Ok(Self { provider })
    }

    /// Wrap an existing provider.
    #[must_use]
    pub const fn from_provider(provider: DynProvider<Ethereum>) -> Self {
        Self { provider }
    }

    /// The underlying provider.
    #[must_use]
    pub const fn provider(&self) -> &DynProvider<Ethereum> {
        &self.provider
    }
}

#[async_trait]
impl Connection for RpcConnection {
    async fn call(&self, call: &ContractCall) -> Result<Bytes, ChainError> {
        self.provider
            .call(to_request(call))
            .await
            .map_err(|e| ChainError::reverted(e.to_string()))
    }

    async fn simulate(&self, call: ContractCall) -> Result<ContractCall, ChainError> {
        debug!(to = %call.to, value = %call.value, "Simulating contract call");
        self.provider
            .call(to_request(&call))
            .await
            .map_err(|e| ChainError::reverted(e.to_string()))?;
        Ok(call)
    }

    async fn balance(&self, address: Address) -> Result<U256, ChainError> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| ChainError::provider(format!("failed to get balance: {e}")))
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<(), ChainError> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), hash)
            .get_receipt()
            .await
            .map_err(|e| ChainError::transaction(format!("receipt failed: {e}")))?;
        if !receipt.status() {
            return Err(ChainError::reverted(format!("transaction {hash:#x} reverted")));
        }
        Ok(())
    }
}

/// Where the signing key comes from.
#[derive(Clone)]
enum KeySource {
    /// BIP39 phrase, derived along the Ethereum HD path at the builder's index.
    Mnemonic(String),
    /// Raw hex key, with or without `0x`.
    PrivateKey(String),
}

impl KeySource {
    fn signer(&self, passphrase: Option<&str>, index: u32) -> Result<PrivateKeySigner, ChainError> {
        match self {
            Self::Mnemonic(phrase) => {
                let seed = kobe::Wallet::from_mnemonic(phrase, passphrase)
                    .map_err(|e| ChainError::Derivation(format!("invalid mnemonic: {e}")))?;
                let derived = kobe_eth::Deriver::new(&seed)
                    .derive(index)
                    .map_err(|e| ChainError::Derivation(format!("key derivation failed: {e}")))?;
                derived
                    .private_key_hex
                    .parse::<PrivateKeySigner>()
                    .map_err(|e| ChainError::Derivation(format!("signer creation failed: {e}")))
            }
            Self::PrivateKey(key) => key
                .strip_prefix("0x")
                .unwrap_or(key)
                .parse::<PrivateKeySigner>()
                .map_err(|e| ChainError::Config(format!("invalid private key: {e}"))),
        }
    }
}

/// Builder for an [`EvmWallet`].
///
/// Actions only need the resulting wallet to expose its account and submit
/// transactions; the builder picks the key (mnemonic or raw key, the last one
/// set wins), connects the provider and pins or detects the chain id.
///
/// ```rust,ignore
/// let wallet = EvmWallet::builder()
///     .private_key("0xabc...")
///     .rpc_url("https://eth-mainnet.g.alchemy.com/v2/xxx")
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct EvmWalletBuilder {
    key: Option<KeySource>,
    passphrase: Option<String>,
    index: u32,
    rpc_url: Option<String>,
    chain_id: Option<u64>,
}

impl std::fmt::Debug for EvmWalletBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = self.key.as_ref().map(|key| match key {
            KeySource::Mnemonic(_) => "mnemonic",
            KeySource::PrivateKey(_) => "private_key",
        });
        f.debug_struct("EvmWalletBuilder")
            .field("key", &key)
            .field("index", &self.index)
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

impl EvmWalletBuilder {
    /// Derive the key from a BIP39 mnemonic.
    #[must_use]
    pub fn mnemonic(mut self, mnemonic: impl Into<String>) -> Self {
        self.key = Some(KeySource::Mnemonic(mnemonic.into()));
        self
    }

    /// BIP39 passphrase for the mnemonic.
    #[must_use]
    pub fn passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }

    /// HD account index (default 0).
    #[must_use]
    pub const fn index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    /// Use a raw private key (hex, with or without `0x`).
    #[must_use]
    pub fn private_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(KeySource::PrivateKey(key.into()));
        self
    }

    /// JSON-RPC endpoint. Required.
    #[must_use]
    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = Some(url.into());
        self
    }

    /// Pin the chain id instead of asking the node.
    #[must_use]
    pub const fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Connect and build the wallet.
    pub async fn build(self) -> Result<EvmWallet, ChainError> {
        let rpc_url = self
            .rpc_url
            .ok_or_else(|| ChainError::Config("rpc_url is required".into()))?;
        let key = self.key.ok_or_else(|| {
            ChainError::Config("either mnemonic or private_key is required".into())
        })?;

        let mut signer = key.signer(self.passphrase.as_deref(), self.index)?;
        signer.set_chain_id(self.chain_id);
        let address = signer.address();

        let provider = ProviderBuilder::new()
            .wallet(signer)
            .connect(&rpc_url)
            .await
            .map_err(|e| ChainError::provider(format!("failed to connect to '{rpc_url}': {e}")))?
            .erased();

        let chain_id = match self.chain_id {
            Some(id) => id,
            None => provider
                .get_chain_id()
                .await
                .map_err(|e| ChainError::provider(format!("failed to get chain ID: {e}")))?,
        };

        info!(%address, chain_id, "EVM wallet ready");
        Ok(EvmWallet {
            provider: Arc::new(provider),
            address,
            chain_id,
        })
    }
}

/// A signing wallet connected to one EVM chain.
pub struct EvmWallet {
    /// Provider with the signer attached; fills nonce, gas and chain id.
    provider: Arc<DynProvider<Ethereum>>,
    address: Address,
    chain_id: u64,
}

impl std::fmt::Debug for EvmWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmWallet")
            .field("address", &self.address)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

impl EvmWallet {
    /// Create a builder for constructing an [`EvmWallet`].
    #[must_use]
    pub fn builder() -> EvmWalletBuilder {
        EvmWalletBuilder::default()
    }

    /// The wallet's address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The chain ID this wallet is connected to.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// A read-only connection sharing this wallet's provider.
    #[must_use]
    pub fn connection(&self) -> RpcConnection {
        RpcConnection::from_provider((*self.provider).clone())
    }

    async fn submit(&self, tx: TransactionRequest) -> Result<TxHash, ChainError> {
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ChainError::transaction(format!("send failed: {e}")))?;
        let hash = *pending.tx_hash();
        info!(hash = %hash, "Transaction submitted");
        Ok(hash)
    }
}

#[async_trait]
impl Wallet for EvmWallet {
    fn account(&self) -> Option<Address> {
        Some(self.address)
    }

    async fn send_transaction(&self, tx: ValueTransfer) -> Result<TxHash, ChainError> {
        let request = TransactionRequest::default()
            .with_from(tx.from)
            .with_to(tx.to)
            .with_value(tx.value);
        self.submit(request).await
    }

    async fn write_contract(&self, call: ContractCall) -> Result<TxHash, ChainError> {
        self.submit(to_request(&call)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_request_copies_call_fields() {
        let call = ContractCall {
            from: Some(Address::repeat_byte(1)),
            to: Address::repeat_byte(2),
            input: Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]),
            value: U256::from(42),
        };
        let tx = to_request(&call);
        assert_eq!(tx.from, Some(Address::repeat_byte(1)));
        assert_eq!(tx.value, Some(U256::from(42)));
        assert_eq!(tx.input.input(), Some(&call.input));
    }

    #[tokio::test]
    async fn test_builder_requires_rpc_url() {
        let err = EvmWallet::builder()
            .private_key("0x01")
            .build()
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::Config(_)));
    }

    #[tokio::test]
    async fn test_builder_requires_key_material() {
        let err = EvmWallet::builder()
            .rpc_url("http://localhost:8545")
            .build()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("mnemonic or private_key"));
    }

    #[test]
    fn test_private_key_source_accepts_optional_prefix() {
        let key = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        let expected = alloy::primitives::address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

        for raw in [key.to_string(), format!("0x{key}")] {
            let signer = KeySource::PrivateKey(raw).signer(None, 0).unwrap();
            assert_eq!(signer.address(), expected);
        }
        assert!(matches!(
            KeySource::PrivateKey("0xzz".into()).signer(None, 0),
            Err(ChainError::Config(_))
        ));
    }
}
