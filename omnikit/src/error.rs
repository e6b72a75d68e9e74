//! Unified error types for omnikit.
//!
//! The hierarchy follows the failure taxonomy of an action run:
//! - validation errors (input does not match the action schema)
//! - precondition errors (malformed address, no account, unknown chain)
//! - insufficient-resource errors (balance, allowance, fees)
//! - chain errors (RPC failure, revert), propagated untouched
//! - composition errors (plugin method collisions)

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

use crate::chain::ChainError;

/// Result type alias for omnikit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A single schema violation, addressed by field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Dotted path to the offending field (`"."` for the root value).
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldViolation {
    /// Create a violation.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The main error type.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Input failed the action's schema.
    #[error("invalid input for '{action}': {}", join_violations(.violations))]
    Validation {
        /// Action whose schema rejected the input.
        action: String,
        /// Field-level violations.
        violations: Vec<FieldViolation>,
    },

    /// An address field is not a 0x-prefixed 20-byte hex string.
    #[error("invalid {field} address format: '{value}'")]
    InvalidAddress {
        /// Which input field.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A human-readable name could not be resolved to an address.
    #[error("address resolution failed for '{0}'")]
    AddressResolution(String),

    /// The wallet has no active signing account.
    #[error("wallet account not found")]
    NoAccount,

    /// Destination chain has no known endpoint identifier.
    #[error("unknown destination chain '{0}'")]
    UnknownChain(String),

    /// An amount could not be scaled to base units.
    #[error("invalid amount '{amount}': {reason}")]
    InvalidAmount {
        /// The rejected amount string.
        amount: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Balance (or allowance) is below what the operation needs.
    #[error("insufficient {asset}. Have: {available}, Need: {required}")]
    InsufficientBalance {
        /// What ran short (`"token balance"`, `"native balance for fees"`).
        asset: &'static str,
        /// Required base units.
        required: U256,
        /// Available base units.
        available: U256,
    },

    /// An action without an input schema was dispatched.
    #[error("action '{0}' has no input schema")]
    MissingSchema(String),

    /// No action with this name is installed.
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    /// No method with this name is installed.
    #[error("unknown method '{0}'")]
    UnknownMethod(String),

    /// Chain collaborator failure.
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// Plugin composition failure.
    #[error(transparent)]
    Plugin(#[from] PluginError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// External metadata service failure.
    #[error("metadata lookup failed: {0}")]
    Metadata(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error.
    #[must_use]
    pub fn validation(action: impl Into<String>, violations: Vec<FieldViolation>) -> Self {
        Self::Validation {
            action: action.into(),
            violations,
        }
    }

    /// Create an invalid address error.
    #[must_use]
    pub fn invalid_address(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidAddress {
            field,
            value: value.into(),
        }
    }

    /// Create an invalid amount error.
    #[must_use]
    pub fn invalid_amount(amount: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            amount: amount.into(),
            reason: reason.into(),
        }
    }

    /// Create an insufficient balance error.
    #[must_use]
    pub const fn insufficient(asset: &'static str, required: U256, available: U256) -> Self {
        Self::InsufficientBalance {
            asset,
            required,
            available,
        }
    }

    /// Field violations carried by a validation error.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::Validation { violations, .. } => violations,
            _ => &[],
        }
    }
}

/// Errors raised while composing plugins into an agent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PluginError {
    /// A method name is already bound on the agent.
    #[error("Method {method} already exists in methods (plugin '{plugin}')")]
    MethodCollision {
        /// The colliding method name.
        method: String,
        /// Plugin whose installation was rejected.
        plugin: String,
    },
}
