//! Input schemas.
//!
//! An [`InputSchema`] is a JSON Schema document, normally generated from the
//! action's typed input with `schemars`. The same document is handed to the
//! LLM as the tool's parameter schema and used here to validate the payload
//! the LLM sends back, through `jsonschema`.

use jsonschema::error::ValidationErrorKind;
use schemars::{JsonSchema, schema_for};
use serde_json::Value;

use crate::error::FieldViolation;

/// JSON Schema describing an action's input.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSchema(Value);

impl InputSchema {
    /// Generate the schema for `T`.
    #[must_use]
    pub fn of<T: JsonSchema>() -> Self {
        let mut value = Value::from(schema_for!(T));
        if let Some(obj) = value.as_object_mut() {
            obj.remove("$schema");
        }
        Self(value)
    }

    /// Wrap a hand-written schema document.
    #[must_use]
    pub const fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// The schema document.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Top-level property names.
    #[must_use]
    pub fn properties(&self) -> Vec<&str> {
        self.0
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Check `input` against the schema, collecting every violation ordered
    /// by field path.
    ///
    /// A schema that does not compile is reported as a single violation on
    /// the root.
    pub fn validate(&self, input: &Value) -> Result<(), Vec<FieldViolation>> {
        let validator = jsonschema::Validator::new(&self.0)
            .map_err(|e| vec![FieldViolation::new(".", format!("invalid schema: {e}"))])?;
        if validator.is_valid(input) {
            return Ok(());
        }

        let mut violations = Vec::new();
        for error in validator.iter_errors(input) {
            let path = field_path(&error.instance_path.to_string());
            match &error.kind {
                ValidationErrorKind::Required { property } => {
                    let name = property.as_str().map_or_else(|| property.to_string(), str::to_string);
                    violations.push(FieldViolation::new(
                        child_path(&path, &name),
                        "missing required field",
                    ));
                }
                ValidationErrorKind::AdditionalProperties { unexpected } => {
                    violations.extend(
                        unexpected
                            .iter()
                            .map(|name| FieldViolation::new(child_path(&path, name), "unknown field")),
                    );
                }
                _ => violations.push(FieldViolation::new(display_path(&path), error.to_string())),
            }
        }
        violations.sort_by(|a, b| a.field.cmp(&b.field));
        Err(violations)
    }
}

/// `/legs/0/chain` becomes `legs[0].chain`; the root is the empty string.
fn field_path(pointer: &str) -> String {
    let mut path = String::new();
    for segment in pointer.split('/').skip(1) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        if !path.is_empty() && segment.parse::<usize>().is_ok() {
            path.push_str(&format!("[{segment}]"));
        } else {
            path = child_path(&path, &segment);
        }
    }
    path
}

fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "." } else { path }
}
