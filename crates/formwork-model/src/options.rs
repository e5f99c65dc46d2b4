//! Options controlling how definitions are validated.

use serde::{Deserialize, Serialize};

/// How array descriptors longer than `[T, default]` are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayArity {
    /// Accept and ignore every element after the default.
    #[default]
    Lenient,
    /// Reject the field.
    Strict,
}

/// Options for [`define_model_with`](crate::define_model_with).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelOptions {
    pub array_arity: ArrayArity,
}

impl ModelOptions {
    /// Options that reject over-long array descriptors.
    pub fn strict() -> Self {
        Self {
            array_arity: ArrayArity::Strict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_lenient() {
        assert_eq!(ModelOptions::default().array_arity, ArrayArity::Lenient);
    }

    #[test]
    fn deserialize_with_missing_fields() {
        let opts: ModelOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, ModelOptions::default());
    }

    #[test]
    fn deserialize_strict() {
        let opts: ModelOptions = serde_json::from_str(r#"{"array_arity":"strict"}"#).unwrap();
        assert_eq!(opts, ModelOptions::strict());
    }
}
