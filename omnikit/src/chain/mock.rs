//! In-memory chain collaborators for tests.
//!
//! Connection and wallet share one [`EventLog`] so tests can assert the exact
//! order of reads, simulations, approvals and sends.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, B256, Bytes, TxHash, U256};
use alloy::sol_types::SolCall;
use async_trait::async_trait;

use super::abi::{IERC20, IEnsRegistry, IEnsResolver, IOFT};
use super::{ChainError, Connection, ContractCall, NameResolver, ValueTransfer, Wallet};

/// One recorded interaction with a mock collaborator.
#[derive(Debug, Clone)]
pub(crate) enum ChainEvent {
    Call(ContractCall),
    Simulate(ContractCall),
    Balance(Address),
    Receipt(TxHash),
    SendValue(ValueTransfer),
    Write(ContractCall),
}

fn function_name(call: &ContractCall) -> &'static str {
    match call.selector() {
        Some(IERC20::decimalsCall::SELECTOR) => "decimals",
        Some(IERC20::balanceOfCall::SELECTOR) => "balanceOf",
        Some(IERC20::allowanceCall::SELECTOR) => "allowance",
        Some(IERC20::approveCall::SELECTOR) => "approve",
        Some(IERC20::transferCall::SELECTOR) => "transfer",
        Some(IOFT::quoteSendCall::SELECTOR) => "quoteSend",
        Some(IOFT::sendCall::SELECTOR) => "send",
        Some(IEnsRegistry::resolverCall::SELECTOR) => "resolver",
        Some(IEnsResolver::addrCall::SELECTOR) => "addr",
        _ => "unknown",
    }
}

impl ChainEvent {
    pub(crate) fn label(&self) -> String {
        match self {
            Self::Call(call) => format!("call:{}", function_name(call)),
            Self::Simulate(call) => format!("simulate:{}", function_name(call)),
            Self::Write(call) => format!("write:{}", function_name(call)),
            Self::Balance(_) => "balance".into(),
            Self::Receipt(_) => "receipt".into(),
            Self::SendValue(_) => "send_value".into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct EventLog(Arc<Mutex<Vec<ChainEvent>>>);

impl EventLog {
    fn push(&self, event: ChainEvent) {
        self.0.lock().unwrap().push(event);
    }

    pub(crate) fn events(&self) -> Vec<ChainEvent> {
        self.0.lock().unwrap().clone()
    }

    pub(crate) fn labels(&self) -> Vec<String> {
        self.events().iter().map(ChainEvent::label).collect()
    }

    pub(crate) fn writes(&self) -> Vec<ContractCall> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ChainEvent::Write(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn value_transfers(&self) -> Vec<ValueTransfer> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ChainEvent::SendValue(tx) => Some(tx),
                _ => None,
            })
            .collect()
    }

    /// Number of state-changing submissions.
    pub(crate) fn submissions(&self) -> usize {
        self.writes().len() + self.value_transfers().len()
    }
}

/// Connection answering view calls from a selector table.
#[derive(Debug, Default)]
pub(crate) struct MockConnection {
    log: EventLog,
    responses: Mutex<HashMap<[u8; 4], Bytes>>,
    native_balance: Mutex<U256>,
    revert: Mutex<Option<String>>,
}

impl MockConnection {
    pub(crate) fn with_log(log: EventLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    pub(crate) fn log(&self) -> EventLog {
        self.log.clone()
    }

    pub(crate) fn respond(&self, selector: [u8; 4], output: Vec<u8>) {
        self.responses
            .lock()
            .unwrap()
            .insert(selector, Bytes::from(output));
    }

    pub(crate) fn set_native_balance(&self, balance: U256) {
        *self.native_balance.lock().unwrap() = balance;
    }

    pub(crate) fn revert_simulations(&self, reason: &str) {
        *self.revert.lock().unwrap() = Some(reason.to_string());
    }
}

#[async_trait]
impl Connection for MockConnection {
    async fn call(&self, call: &ContractCall) -> Result<Bytes, ChainError> {
        self.log.push(ChainEvent::Call(call.clone()));
        let selector = call.selector().unwrap_or_default();
        self.responses
            .lock()
            .unwrap()
            .get(&selector)
            .cloned()
            .ok_or_else(|| ChainError::reverted(format!("no response for {}", function_name(call))))
    }

    async fn simulate(&self, call: ContractCall) -> Result<ContractCall, ChainError> {
        self.log.push(ChainEvent::Simulate(call.clone()));
        match self.revert.lock().unwrap().clone() {
            Some(reason) => Err(ChainError::reverted(reason)),
            None => Ok(call),
        }
    }

    async fn balance(&self, address: Address) -> Result<U256, ChainError> {
        self.log.push(ChainEvent::Balance(address));
        Ok(*self.native_balance.lock().unwrap())
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<(), ChainError> {
        self.log.push(ChainEvent::Receipt(hash));
        Ok(())
    }
}

/// Wallet that records submissions and hands out sequential hashes.
#[derive(Debug, Default)]
pub(crate) struct MockWallet {
    log: EventLog,
    account: Option<Address>,
    nonce: Mutex<u8>,
}

impl MockWallet {
    pub(crate) fn new(log: EventLog, account: Option<Address>) -> Self {
        Self {
            log,
            account,
            nonce: Mutex::new(0),
        }
    }

    fn next_hash(&self) -> TxHash {
        let mut nonce = self.nonce.lock().unwrap();
        *nonce += 1;
        B256::repeat_byte(*nonce)
    }
}

#[async_trait]
impl Wallet for MockWallet {
    fn account(&self) -> Option<Address> {
        self.account
    }

    async fn send_transaction(&self, tx: ValueTransfer) -> Result<TxHash, ChainError> {
        self.log.push(ChainEvent::SendValue(tx));
        Ok(self.next_hash())
    }

    async fn write_contract(&self, call: ContractCall) -> Result<TxHash, ChainError> {
        self.log.push(ChainEvent::Write(call));
        Ok(self.next_hash())
    }
}

/// Resolver backed by a fixed table.
#[derive(Debug, Default)]
pub(crate) struct MockResolver {
    names: HashMap<String, Address>,
}

impl MockResolver {
    pub(crate) fn with_name(mut self, name: &str, address: Address) -> Self {
        self.names.insert(name.to_string(), address);
        self
    }
}

#[async_trait]
impl NameResolver for MockResolver {
    async fn resolve(&self, name: &str) -> Result<Option<Address>, ChainError> {
        Ok(self.names.get(name).copied())
    }
}
