//! # Schema Validation
//!
//! Walks a [`Definition`] and either rejects it with a [`SchemaError`] or
//! produces the typed [`Schema`] the builder runs on.
//!
//! ## Rules
//!
//! `_init` must be a function. Any other `_init` value is rejected rather
//! than ignored. For every other entry:
//!
//! 1. A missing or falsy descriptor is rejected.
//! 2. A callable must be a primitive constructor or a model.
//! 3. Dates and regexes are rejected. An array must be non-empty; only its
//!    first element is validated, the second is the default and is not
//!    type-checked. A nested definition is validated field by field.
//! 4. Anything else is rejected.
//!
//! Validation is fail-fast: the first invalid field, in definition order,
//! aborts the walk. Error paths are dotted (`payment.terms`).

use std::sync::Arc;

use formwork_core::SchemaError;

use crate::classify::{
    is_array_descriptor, is_callable, is_date_or_pattern, is_falsy, is_model_factory,
    is_nested_definition, is_supported_primitive,
};
use crate::descriptor::{Definition, Descriptor, INIT_KEY};
use crate::options::{ArrayArity, ModelOptions};
use crate::schema::{DefaultValue, Field, Schema};

/// Validate a definition and build its typed tree.
pub fn validate(definition: &Definition, options: &ModelOptions) -> Result<Schema, SchemaError> {
    validate_definition(definition, "", options)
}

fn validate_definition(
    definition: &Definition,
    prefix: &str,
    options: &ModelOptions,
) -> Result<Schema, SchemaError> {
    let mut fields = Vec::with_capacity(definition.len());
    let mut init = None;

    for (key, descriptor) in definition {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        if key == INIT_KEY {
            match descriptor {
                Descriptor::Function(f) => init = Some(f.clone()),
                other => return Err(reject(&path, other)),
            }
            continue;
        }

        fields.push((key.clone(), validate_field(descriptor, &path, options)?));
    }

    Ok(Schema::new(fields, init, definition.has_default_row()))
}

fn validate_field(
    descriptor: &Descriptor,
    path: &str,
    options: &ModelOptions,
) -> Result<Field, SchemaError> {
    if is_falsy(descriptor) {
        return Err(reject(path, descriptor));
    }

    if is_callable(descriptor) {
        if !(is_supported_primitive(descriptor) || is_model_factory(descriptor)) {
            return Err(reject(path, descriptor));
        }
        return type_field(descriptor, path);
    }

    if is_date_or_pattern(descriptor) {
        return Err(reject(path, descriptor));
    }

    if is_array_descriptor(descriptor) {
        return validate_array(descriptor, path, options);
    }

    if is_nested_definition(descriptor) {
        return validate_nested(descriptor, path, options);
    }

    Err(reject(path, descriptor))
}

fn type_field(descriptor: &Descriptor, path: &str) -> Result<Field, SchemaError> {
    match descriptor {
        Descriptor::Type(p) => Ok(Field::Primitive(*p)),
        Descriptor::Model(m) => Ok(Field::Model(m.clone())),
        other => Err(reject(path, other)),
    }
}

fn validate_nested(
    descriptor: &Descriptor,
    path: &str,
    options: &ModelOptions,
) -> Result<Field, SchemaError> {
    let Descriptor::Object(nested) = descriptor else {
        return Err(reject(path, descriptor));
    };
    Ok(Field::Nested(Arc::new(validate_definition(nested, path, options)?)))
}

fn validate_array(
    descriptor: &Descriptor,
    path: &str,
    options: &ModelOptions,
) -> Result<Field, SchemaError> {
    let Descriptor::Array(items) = descriptor else {
        return Err(reject(path, descriptor));
    };
    let Some((first, rest)) = items.split_first() else {
        return Err(reject(path, descriptor));
    };

    let ty = Box::new(validate_field(first, path, options)?);

    let Some((default, tail)) = rest.split_first() else {
        return Ok(Field::ArrayOf(ty));
    };

    if !tail.is_empty() {
        match options.array_arity {
            ArrayArity::Strict => return Err(reject(path, descriptor)),
            ArrayArity::Lenient => tracing::debug!(
                field = path,
                ignored = tail.len(),
                "ignoring array descriptor elements after the default"
            ),
        }
    }

    let default = match default {
        Descriptor::Function(f) => DefaultValue::Computed(f.clone()),
        literal => DefaultValue::Literal(literal.to_value()),
    };

    Ok(Field::WithDefault { ty, default })
}

fn reject(path: &str, descriptor: &Descriptor) -> SchemaError {
    SchemaError::new(path, descriptor.describe())
}
