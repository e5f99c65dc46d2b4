//! # Instance Building
//!
//! Interprets a validated [`Schema`] against optional input data and returns
//! a fresh [`Instance`]. Building never fails: the schema was validated when
//! the model was defined, and input that does not fit a field degrades to a
//! well-defined value (with a warning where data is dropped).
//!
//! ## Per-field resolution
//!
//! - **Supplied**: array fields build one element per supplied element;
//!   object input for a nested/model field builds a sub-instance; anything
//!   else is adopted verbatim. Supplied scalars are never coerced.
//! - **Not supplied**: `[T, default]` fields resolve their default; every
//!   other field takes its zero value (nested zero instance, empty array or
//!   primitive zero).
//!
//! Fields are resolved in definition order, so a computed default sees every
//! field declared before it. The `_init` hook runs last.

use formwork_core::{Instance, Primitive, Value};

use crate::schema::{DefaultValue, Field, Schema};

/// Build one instance of `schema` from optional input data.
pub fn build_instance(schema: &Schema, data: Option<&Instance>) -> Instance {
    let mut instance = Instance::with_capacity(schema.fields().len());

    for (key, field) in schema.fields() {
        let value = match data.and_then(|d| d.get(key)) {
            Some(supplied) => adopt(field, supplied, key),
            None => synthesize(field, &mut instance, key),
        };
        instance.insert(key.as_str(), value);
    }

    if let Some(init) = schema.init() {
        init.call(&mut instance);
    }

    instance
}

/// Resolve a field from supplied input.
///
/// A `[T, default]` field is resolved as `T`; the default only matters when
/// nothing is supplied.
fn adopt(field: &Field, supplied: &Value, key: &str) -> Value {
    match (field, supplied) {
        (Field::WithDefault { ty, .. }, _) => adopt(ty, supplied, key),
        (Field::ArrayOf(element), _) => Value::Array(build_rows(element, supplied, key)),
        (Field::Nested(_) | Field::Model(_), Value::Object(sub)) => {
            let shape = field.shape().map(|s| build_instance(s, Some(sub)));
            Value::Object(shape.unwrap_or_default())
        }
        _ => supplied.clone(),
    }
}

/// Build the elements of an array field from supplied input.
fn build_rows(element: &Field, supplied: &Value, key: &str) -> Vec<Value> {
    let Value::Array(items) = supplied else {
        tracing::warn!(
            field = key,
            kind = supplied.kind(),
            "array field supplied with a non-array value; using an empty array"
        );
        return Vec::new();
    };

    items
        .iter()
        .map(|item| match element.shape() {
            Some(shape) => Value::Object(build_instance(shape, item.as_object())),
            None => adopt(element, item, key),
        })
        .collect()
}

/// Resolve a field with no supplied input.
fn synthesize(field: &Field, instance: &mut Instance, key: &str) -> Value {
    match field {
        Field::WithDefault { ty, default } => resolve_default(ty, default, instance, key),
        other => zero(other),
    }
}

/// The zero value of a field.
fn zero(field: &Field) -> Value {
    match field {
        Field::Primitive(p) => p.zero(),
        Field::Nested(_) | Field::Model(_) => {
            let shape = field.shape().map(|s| build_instance(s, None));
            Value::Object(shape.unwrap_or_default())
        }
        Field::ArrayOf(element) => match element.shape() {
            Some(shape) if shape.has_default_row() => {
                Value::Array(vec![Value::Object(build_instance(shape, None))])
            }
            _ => Value::Array(Vec::new()),
        },
        Field::WithDefault { ty, .. } => zero(ty),
    }
}

fn resolve_default(ty: &Field, default: &DefaultValue, instance: &mut Instance, key: &str) -> Value {
    let literal = match default {
        DefaultValue::Computed(f) => return f.call(instance),
        DefaultValue::Literal(v) => v,
    };

    match ty {
        Field::Primitive(Primitive::Date) => match Primitive::date_from(literal) {
            Ok(date) => Value::Date(date),
            Err(e) => {
                tracing::warn!(field = key, error = %e, "unusable date default; storing null");
                Value::Null
            }
        },
        Field::Primitive(p) => p.coerce(literal),
        Field::Nested(_) | Field::Model(_) => {
            let shape = ty.shape().map(|s| build_instance(s, literal.as_object()));
            Value::Object(shape.unwrap_or_default())
        }
        Field::ArrayOf(_) | Field::WithDefault { .. } => adopt(ty, literal, key),
    }
}
