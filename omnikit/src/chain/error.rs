//! Error types for chain collaborators.

/// Failures reported by a [`Connection`](super::Connection),
/// [`Wallet`](super::Wallet) or [`NameResolver`](super::NameResolver).
///
/// Messages carry the underlying RPC or signer text unchanged so that a
/// revert reason reaches the user as the node reported it.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum ChainError {
    /// Invalid client configuration (missing RPC URL, bad key material).
    #[error("configuration error: {0}")]
    Config(String),

    /// HD key derivation failed.
    #[error("key derivation error: {0}")]
    Derivation(String),

    /// The RPC provider failed or was unreachable.
    #[error("provider error: {0}")]
    Provider(String),

    /// A read-only contract call or simulation reverted.
    #[error("execution reverted: {0}")]
    Reverted(String),

    /// Submitting a transaction or waiting for its receipt failed.
    #[error("transaction error: {0}")]
    Transaction(String),

    /// Return data could not be ABI-decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ChainError {
    /// Create a provider error.
    #[must_use]
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create a reverted-call error.
    #[must_use]
    pub fn reverted(msg: impl Into<String>) -> Self {
        Self::Reverted(msg.into())
    }

    /// Create a transaction error.
    #[must_use]
    pub fn transaction(msg: impl Into<String>) -> Self {
        Self::Transaction(msg.into())
    }
}
