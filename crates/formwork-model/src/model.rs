//! # Model Factory
//!
//! [`define_model`] is the entry point of the crate. It checks that its
//! argument is a definition, validates every field once, and returns a
//! [`Model`]: a cheaply clonable handle that builds instances on demand and
//! exposes the captured definition for introspection and composition.
//!
//! ## Identity
//!
//! A `Model` is recognized as a field type by its enum variant
//! ([`Descriptor::Model`]), never by name. Two models defined from equal
//! definitions are still distinct: equality on `Model` is identity.
//!
//! ## Thread Safety
//!
//! `Model` is `Send + Sync`. The definition and its typed tree are immutable
//! and shared behind an `Arc`; every build allocates a fresh instance.

use std::fmt;
use std::sync::Arc;

use formwork_core::{ArgumentError, Instance, ModelError, Value};

use crate::build::build_instance;
use crate::descriptor::{Definition, Descriptor, INIT_KEY};
use crate::options::ModelOptions;
use crate::schema::Schema;
use crate::validate::validate;

/// Define a model with default options.
///
/// # Errors
///
/// Returns `ModelError::Argument` if `definition` is not a definition
/// (undefined, a literal, a regex, an array, a function or a model), and
/// `ModelError::Schema` for the first field whose descriptor is invalid.
pub fn define_model(definition: impl Into<Descriptor>) -> Result<Model, ModelError> {
    define_model_with(definition, &ModelOptions::default())
}

/// Define a model with explicit options.
///
/// # Errors
///
/// See [`define_model`].
pub fn define_model_with(
    definition: impl Into<Descriptor>,
    options: &ModelOptions,
) -> Result<Model, ModelError> {
    let definition = match definition.into() {
        Descriptor::Object(def) => def,
        other => return Err(ArgumentError::new(other.describe()).into()),
    };

    let schema = validate(&definition, options)?;

    tracing::debug!(
        fields = schema.fields().len(),
        init = definition.get(INIT_KEY).is_some(),
        "model defined"
    );

    Ok(Model {
        inner: Arc::new(ModelInner { definition, schema }),
    })
}

struct ModelInner {
    definition: Definition,
    schema: Schema,
}

/// A defined model: builds instances of its definition.
#[derive(Clone)]
pub struct Model {
    inner: Arc<ModelInner>,
}

impl Model {
    /// Build an instance with no input data: every field takes its default
    /// or zero value.
    pub fn build(&self) -> Instance {
        build_instance(&self.inner.schema, None)
    }

    /// Build an instance from input data. Keys the definition does not
    /// declare are dropped. Non-object data is treated as absent.
    pub fn build_from(&self, data: &Value) -> Instance {
        self.call(Some(data))
    }

    /// Build from optional input data.
    pub fn call(&self, data: Option<&Value>) -> Instance {
        let data = data.and_then(|value| {
            let object = value.as_object();
            if object.is_none() && !value.is_null() {
                tracing::debug!(kind = value.kind(), "ignoring non-object model input");
            }
            object
        });
        build_instance(&self.inner.schema, data)
    }

    /// The definition this model was created from.
    pub fn definition(&self) -> &Definition {
        &self.inner.definition
    }

    /// The validated field tree.
    pub fn schema(&self) -> &Schema {
        &self.inner.schema
    }

    /// Whether both handles refer to the same model.
    pub fn ptr_eq(&self, other: &Model) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("fields", &self.inner.schema.fields().len())
            .field("init", &self.inner.schema.init().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_core::Primitive;
    use serde_json::json;

    #[test]
    fn model_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Model>();
    }

    #[test]
    fn empty_definition_builds_empty_instance() {
        let model = define_model(Definition::new()).unwrap();
        assert!(model.build().is_empty());
    }

    #[test]
    fn argument_must_be_a_definition() {
        for bad in [
            Descriptor::Undefined,
            Descriptor::Literal(Value::Null),
            Descriptor::from(12),
            Descriptor::from("test"),
            Descriptor::pattern("test").unwrap(),
            Descriptor::Array(vec![]),
        ] {
            let err = define_model(bad.clone()).unwrap_err();
            assert!(err.is_argument(), "expected ArgumentError for {bad:?}, got {err}");
        }
    }

    #[test]
    fn models_are_not_definitions() {
        let model = define_model(Definition::new()).unwrap();
        assert!(define_model(&model).unwrap_err().is_argument());
    }

    #[test]
    fn distinct_models_from_equal_definitions() {
        let def = Definition::new().field("a", Primitive::Text);
        let a = define_model(def.clone()).unwrap();
        let b = define_model(def).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(a.definition(), b.definition());
    }

    #[test]
    fn non_object_input_is_ignored() {
        let model = define_model(Definition::new().field("a", Primitive::Number)).unwrap();
        assert_eq!(model.build_from(&Value::from(42)), model.build());
        assert_eq!(model.call(None), model.build());
        assert_eq!(
            model.build_from(&json!({"a": 3}).into())["a"],
            Value::Number(3.0)
        );
    }

    #[test]
    fn strict_options_reject_long_arrays() {
        let def = Definition::new().field(
            "n",
            Descriptor::Array(vec![Primitive::Number.into(), 1.into(), 2.into()]),
        );
        assert!(define_model(def.clone()).is_ok());
        let err = define_model_with(def, &ModelOptions::strict()).unwrap_err();
        assert_eq!(err.as_schema().map(|e| e.field.as_str()), Some("n"));
    }
}
