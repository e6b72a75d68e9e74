//! ENS name resolution over a [`Connection`].

use std::sync::Arc;

use alloy::primitives::{Address, B256, address, keccak256};
use async_trait::async_trait;
use tracing::debug;

use super::abi::{IEnsRegistry, IEnsResolver};
use super::{ChainError, Connection, NameResolver, read_contract};

/// ENS registry, same address on mainnet and the major testnets.
pub const ENS_REGISTRY: Address = address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e");

/// Compute the EIP-137 namehash of `name`.
#[must_use]
pub fn namehash(name: &str) -> B256 {
    let name = name.to_lowercase();
    name.rsplit('.')
        .filter(|label| !label.is_empty())
        .fold(B256::ZERO, |node, label| {
            let label_hash = keccak256(label.as_bytes());
            keccak256([node.as_slice(), label_hash.as_slice()].concat())
        })
}

/// Resolves names through the ENS registry and the name's public resolver.
#[derive(Clone)]
pub struct EnsResolver {
    connection: Arc<dyn Connection>,
    registry: Address,
}

impl std::fmt::Debug for EnsResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnsResolver")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl EnsResolver {
    /// Resolve against the canonical registry.
    #[must_use]
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self {
            connection,
            registry: ENS_REGISTRY,
        }
    }

    /// Use a non-canonical registry (test networks, forks).
    #[must_use]
    pub const fn with_registry(mut self, registry: Address) -> Self {
        self.registry = registry;
        self
    }
}

#[async_trait]
impl NameResolver for EnsResolver {
    async fn resolve(&self, name: &str) -> Result<Option<Address>, ChainError> {
        let node = namehash(name);
        let resolver = read_contract(
            self.connection.as_ref(),
            None,
            self.registry,
            &IEnsRegistry::resolverCall { node },
        )
        .await?;
        if resolver.is_zero() {
            debug!(name, "No ENS resolver set");
            return Ok(None);
        }

        let resolved = read_contract(
            self.connection.as_ref(),
            None,
            resolver,
            &IEnsResolver::addrCall { node },
        )
        .await?;
        Ok((!resolved.is_zero()).then_some(resolved))
    }
}
