//! The uniform result envelope returned by every action.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, FieldViolation};

/// Outcome of an action run, as shown to the user and fed back to the LLM.
///
/// Serializes as `{"status": "success", "message": ..., ...fields}` or
/// `{"status": "error", "message": ..., "violations": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ActionResult {
    /// The action completed.
    Success {
        /// Human-readable summary.
        message: String,
        /// Action-specific fields (transaction hash, echoed parameters).
        #[serde(flatten)]
        data: Map<String, Value>,
    },
    /// The action failed; nothing after the failing step was attempted.
    Error {
        /// Human-readable failure reason.
        message: String,
        /// Field-level detail for schema violations.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        violations: Vec<FieldViolation>,
    },
}

impl ActionResult {
    /// A success result with no extra fields.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
            data: Map::new(),
        }
    }

    /// An error result.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            violations: Vec::new(),
        }
    }

    /// Convert an error into a displayable result, keeping violations.
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        Self::Error {
            message: err.to_string(),
            violations: err.violations().to_vec(),
        }
    }

    /// Attach a field to a success result. No-op on errors.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Self::Success { data, .. } = &mut self {
            data.insert(key.into(), value.into());
        }
        self
    }

    /// Whether the action succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The message of either variant.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. } | Self::Error { message, .. } => message,
        }
    }

    /// Look up an action-specific field on a success result.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Success { data, .. } => data.get(key),
            Self::Error { .. } => None,
        }
    }

    /// Render as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            serde_json::json!({ "status": "error", "message": e.to_string() })
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_success_serializes_flat() {
        let result = ActionResult::success("ERC20 transfer completed successfully")
            .with_field("signature", "0xabc")
            .with_field("amount", "100");
        assert_eq!(
            result.to_value(),
            json!({
                "status": "success",
                "message": "ERC20 transfer completed successfully",
                "signature": "0xabc",
                "amount": "100"
            })
        );
    }

    #[test]
    fn test_error_omits_empty_violations() {
        assert_eq!(
            ActionResult::error("boom").to_value(),
            json!({ "status": "error", "message": "boom" })
        );
    }

    #[test]
    fn test_deserialize_success_collects_fields() {
        let result: ActionResult = serde_json::from_value(json!({
            "status": "success",
            "message": "ok",
            "signature": "0x01"
        }))
        .unwrap();
        assert!(result.is_success());
        assert_eq!(result.field("signature"), Some(&json!("0x01")));
        assert_eq!(result.field("status"), None);
    }

    #[test]
    fn test_from_validation_error_keeps_violations() {
        let err = Error::validation("X", vec![FieldViolation::new("to", "missing")]);
        let result = ActionResult::from_error(&err);
        assert!(!result.is_success());
        assert_eq!(
            result.to_value()["violations"],
            json!([{ "field": "to", "message": "missing" }])
        );
    }
}
