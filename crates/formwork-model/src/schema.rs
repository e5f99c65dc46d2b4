//! # Typed Field Tree
//!
//! The validated form of a [`Definition`](crate::Definition). The validator
//! produces a [`Schema`] once, at definition time; the builder interprets
//! only this tree and never re-inspects raw descriptors.

use std::sync::Arc;

use formwork_core::{Primitive, Value};

use crate::descriptor::Func;
use crate::model::Model;

/// A validated field type.
#[derive(Debug, Clone)]
pub enum Field {
    Primitive(Primitive),
    /// A composed model; the builder consumes its schema, never the model.
    Model(Model),
    Nested(Arc<Schema>),
    ArrayOf(Box<Field>),
    WithDefault { ty: Box<Field>, default: DefaultValue },
}

impl Field {
    /// The sub-schema of a nested definition or composed model.
    pub fn shape(&self) -> Option<&Schema> {
        match self {
            Self::Nested(schema) => Some(schema),
            Self::Model(model) => Some(model.schema()),
            _ => None,
        }
    }

    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            Self::Primitive(p) => Some(*p),
            _ => None,
        }
    }
}

/// The default of an array-with-default field.
#[derive(Debug, Clone)]
pub enum DefaultValue {
    Literal(Value),
    /// Called with the in-progress instance on every build.
    Computed(Func),
}

/// A validated definition.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, Field)>,
    init: Option<Func>,
    default_row: bool,
}

impl Schema {
    pub(crate) fn new(fields: Vec<(String, Field)>, init: Option<Func>, default_row: bool) -> Self {
        Self {
            fields,
            init,
            default_row,
        }
    }

    /// Data fields in definition order. `_init` is not among them.
    pub fn fields(&self) -> &[(String, Field)] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find_map(|(key, field)| (key == name).then_some(field))
    }

    pub fn init(&self) -> Option<&Func> {
        self.init.as_ref()
    }

    pub fn has_default_row(&self) -> bool {
        self.default_row
    }
}
