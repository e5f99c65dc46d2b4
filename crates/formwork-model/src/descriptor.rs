//! # Field Descriptors
//!
//! The raw, user-authored side of a model: [`Descriptor`] for a single
//! entry and [`Definition`] for a whole field map.
//!
//! A descriptor can represent illegal shapes (bare literals, regexes, empty
//! arrays, arbitrary functions) so that the validator can reject them with a
//! precise [`SchemaError`](formwork_core::SchemaError) instead of forcing
//! every caller through a type-level encoding. Validation turns a legal
//! definition into the typed tree in [`crate::schema`].
//!
//! ## Shapes
//!
//! | Descriptor | Meaning as a field type |
//! |---|---|
//! | `Type(p)` | primitive constructor |
//! | `Model(m)` | composed model |
//! | `Object(def)` | nested definition |
//! | `Array([t])` | zero or more `t` |
//! | `Array([t, d])` | `t` with default `d` (literal or function) |
//! | `Function(f)` | only legal as `_init` or as a default |
//! | `Literal`, `Pattern`, `Undefined` | never legal as a field type |

use std::fmt;
use std::sync::Arc;

use formwork_core::{temporal, Instance, Primitive, Value};
use indexmap::IndexMap;
use regex::Regex;

use crate::model::Model;

/// Name of the reserved post-construction hook entry.
pub const INIT_KEY: &str = "_init";

type FuncInner = dyn Fn(&mut Instance) -> Value + Send + Sync;

/// A callable taking the in-progress instance.
///
/// Used for computed defaults (the return value is stored) and for the
/// `_init` hook (the return value is discarded). Two `Func`s are equal only
/// if they share the same underlying closure.
#[derive(Clone)]
pub struct Func {
    name: Option<String>,
    f: Arc<FuncInner>,
}

impl Func {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Instance) -> Value + Send + Sync + 'static,
    {
        Self { name: None, f: Arc::new(f) }
    }

    /// A function with a name that shows up in diagnostics.
    pub fn named<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Instance) -> Value + Send + Sync + 'static,
    {
        Self {
            name: Some(name.into()),
            f: Arc::new(f),
        }
    }

    /// A hook that only mutates the instance.
    pub fn hook<F>(f: F) -> Self
    where
        F: Fn(&mut Instance) + Send + Sync + 'static,
    {
        Self::new(move |instance| {
            f(instance);
            Value::Null
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn call(&self, instance: &mut Instance) -> Value {
        (self.f)(instance)
    }
}

impl fmt::Debug for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Func({name})"),
            None => f.write_str("Func(<anonymous>)"),
        }
    }
}

impl PartialEq for Func {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

/// One entry of a definition, as written by the user.
#[derive(Debug, Clone)]
pub enum Descriptor {
    /// An absent value.
    Undefined,
    /// A bare literal, including literal dates.
    Literal(Value),
    /// A regular expression.
    Pattern(Regex),
    /// A primitive type constructor.
    Type(Primitive),
    /// A previously defined model.
    Model(Model),
    /// An arbitrary callable.
    Function(Func),
    /// A nested definition.
    Object(Definition),
    /// An array form: `[T]` or `[T, default]`.
    Array(Vec<Descriptor>),
}

impl Descriptor {
    /// `[T]`: a field holding zero or more `T`.
    pub fn array_of(element: impl Into<Descriptor>) -> Self {
        Self::Array(vec![element.into()])
    }

    /// `[T, default]`: a field of type `T` with an explicit default.
    pub fn with_default(ty: impl Into<Descriptor>, default: impl Into<Descriptor>) -> Self {
        Self::Array(vec![ty.into(), default.into()])
    }

    /// A regex descriptor. Fails on an invalid pattern.
    pub fn pattern(re: &str) -> Result<Self, regex::Error> {
        Regex::new(re).map(Self::Pattern)
    }

    /// Human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Undefined => "undefined".to_string(),
            Self::Literal(Value::Null) => "null".to_string(),
            Self::Literal(Value::Text(s)) => format!("text {s:?}"),
            Self::Literal(Value::Date(d)) => format!("date {}", temporal::to_iso8601(d)),
            Self::Literal(v) => format!("{} {v}", v.kind()),
            Self::Pattern(re) => format!("regex /{}/", re.as_str()),
            Self::Type(p) => format!("type {p}"),
            Self::Model(_) => "model".to_string(),
            Self::Function(f) => match f.name() {
                Some(name) => format!("function {name}"),
                None => "anonymous function".to_string(),
            },
            Self::Object(def) => format!("definition with {} fields", def.len()),
            Self::Array(items) if items.is_empty() => "empty array".to_string(),
            Self::Array(items) => format!("array of {} elements", items.len()),
        }
    }

    /// Read this descriptor as a literal value, for use as a default.
    ///
    /// Literals convert as-is, nested definitions become objects and arrays
    /// become arrays (element-wise). Patterns become their source text.
    /// Type constructors, models, functions and `Undefined` have no literal
    /// reading and become `Null`.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Literal(v) => v.clone(),
            Self::Object(def) => Value::Object(
                def.iter()
                    .map(|(k, d)| (k.clone(), d.to_value()))
                    .collect(),
            ),
            Self::Array(items) => Value::Array(items.iter().map(Descriptor::to_value).collect()),
            Self::Pattern(re) => Value::Text(re.as_str().to_string()),
            Self::Undefined | Self::Type(_) | Self::Model(_) | Self::Function(_) => Value::Null,
        }
    }
}

impl PartialEq for Descriptor {
    /// Structural equality; models and functions compare by identity and
    /// regexes by source text.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) => true,
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            (Self::Type(a), Self::Type(b)) => a == b,
            (Self::Model(a), Self::Model(b)) => a.ptr_eq(b),
            (Self::Function(a), Self::Function(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Primitive> for Descriptor {
    fn from(p: Primitive) -> Self {
        Self::Type(p)
    }
}

impl From<Model> for Descriptor {
    fn from(m: Model) -> Self {
        Self::Model(m)
    }
}

impl From<&Model> for Descriptor {
    fn from(m: &Model) -> Self {
        Self::Model(m.clone())
    }
}

impl From<Func> for Descriptor {
    fn from(f: Func) -> Self {
        Self::Function(f)
    }
}

impl From<Definition> for Descriptor {
    fn from(def: Definition) -> Self {
        Self::Object(def)
    }
}

impl From<Regex> for Descriptor {
    fn from(re: Regex) -> Self {
        Self::Pattern(re)
    }
}

impl From<Vec<Descriptor>> for Descriptor {
    fn from(items: Vec<Descriptor>) -> Self {
        Self::Array(items)
    }
}

impl From<Value> for Descriptor {
    fn from(v: Value) -> Self {
        Self::Literal(v)
    }
}

impl From<serde_json::Value> for Descriptor {
    fn from(v: serde_json::Value) -> Self {
        Self::Literal(v.into())
    }
}

macro_rules! literal_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Descriptor {
                fn from(v: $t) -> Self {
                    Self::Literal(Value::from(v))
                }
            }
        )*
    };
}

literal_from!(bool, f64, i32, i64, u32, &str, String);

impl From<chrono::DateTime<chrono::Utc>> for Descriptor {
    fn from(d: chrono::DateTime<chrono::Utc>) -> Self {
        Self::Literal(Value::Date(d))
    }
}

impl<T: Into<Descriptor>> From<Option<T>> for Descriptor {
    /// `None` is `Undefined`.
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Undefined, Into::into)
    }
}

/// A model definition: an ordered map from field name to descriptor.
///
/// The reserved `_init` entry holds the post-construction hook. The
/// default-row flag makes array-of-one fields whose element is this
/// definition zero-construct with one row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Definition {
    fields: IndexMap<String, Descriptor>,
    default_row: bool,
}

impl Definition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a field.
    pub fn field(mut self, name: impl Into<String>, descriptor: impl Into<Descriptor>) -> Self {
        self.fields.insert(name.into(), descriptor.into());
        self
    }

    /// Set the `_init` hook.
    pub fn init<F>(self, f: F) -> Self
    where
        F: Fn(&mut Instance) + Send + Sync + 'static,
    {
        self.field(INIT_KEY, Func::hook(f))
    }

    /// Mark this definition as always having at least one row when used as
    /// an array element type.
    pub fn default_row(mut self) -> Self {
        self.default_row = true;
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, descriptor: impl Into<Descriptor>) {
        self.fields.insert(name.into(), descriptor.into());
    }

    pub fn get(&self, name: &str) -> Option<&Descriptor> {
        self.fields.get(name)
    }

    pub fn has_default_row(&self) -> bool {
        self.default_row
    }

    /// Number of entries, `_init` included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Descriptor> {
        self.fields.iter()
    }
}

impl<K: Into<String>, D: Into<Descriptor>> FromIterator<(K, D)> for Definition {
    fn from_iter<I: IntoIterator<Item = (K, D)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, d)| (k.into(), d.into())).collect(),
            default_row: false,
        }
    }
}

impl<'a> IntoIterator for &'a Definition {
    type Item = (&'a String, &'a Descriptor);
    type IntoIter = indexmap::map::Iter<'a, String, Descriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_literals() {
        assert_eq!(Descriptor::Undefined.describe(), "undefined");
        assert_eq!(Descriptor::Literal(Value::Null).describe(), "null");
        assert_eq!(Descriptor::from("/astring/").describe(), "text \"/astring/\"");
        assert_eq!(Descriptor::from(42).describe(), "number 42");
        assert_eq!(Descriptor::Array(vec![]).describe(), "empty array");
        assert_eq!(Descriptor::pattern("aregexp").unwrap().describe(), "regex /aregexp/");
        assert_eq!(
            Descriptor::from(temporal::epoch()).describe(),
            "date 1970-01-01T00:00:00.000Z"
        );
    }

    #[test]
    fn describe_functions() {
        assert_eq!(
            Descriptor::from(Func::named("upper", |_| Value::Null)).describe(),
            "function upper"
        );
        assert_eq!(Descriptor::from(Func::new(|_| Value::Null)).describe(), "anonymous function");
    }

    #[test]
    fn helpers_build_array_forms() {
        assert_eq!(
            Descriptor::array_of(Primitive::Number),
            Descriptor::Array(vec![Descriptor::Type(Primitive::Number)])
        );
        assert_eq!(
            Descriptor::with_default(Primitive::Number, 12),
            Descriptor::Array(vec![
                Descriptor::Type(Primitive::Number),
                Descriptor::Literal(Value::Number(12.0)),
            ])
        );
    }

    #[test]
    fn funcs_compare_by_identity() {
        let f = Func::new(|_| Value::Null);
        let g = Func::new(|_| Value::Null);
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
    }

    #[test]
    fn hook_returns_null_and_mutates() {
        let hook = Func::hook(|instance| {
            instance.insert("touched", true);
        });
        let mut instance = Instance::new();
        assert_eq!(hook.call(&mut instance), Value::Null);
        assert_eq!(instance["touched"], Value::Bool(true));
    }

    #[test]
    fn definition_to_value_reads_literals() {
        let def = Definition::new()
            .field("terms", "as usual")
            .field("days", 45)
            .field("kind", Primitive::Text);
        let value = Descriptor::from(def).to_value();
        assert_eq!(value["terms"], Value::from("as usual"));
        assert_eq!(value["days"], Value::from(45));
        assert_eq!(value["kind"], Value::Null);
    }

    #[test]
    fn definition_keeps_insertion_order() {
        let def = Definition::new()
            .field("b", Primitive::Text)
            .field("a", Primitive::Number)
            .init(|_| {});
        let keys: Vec<&str> = def.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", INIT_KEY]);
    }

    #[test]
    fn option_none_is_undefined() {
        assert_eq!(Descriptor::from(None::<Primitive>), Descriptor::Undefined);
        assert_eq!(Descriptor::from(Some(Primitive::Date)), Descriptor::Type(Primitive::Date));
    }
}
