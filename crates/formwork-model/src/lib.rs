//! # formwork-model — Runtime Model Definitions
//!
//! Turns a declarative field definition into a reusable [`Model`] that
//! validates the definition once and then builds plain [`Instance`]s on
//! demand: supplied values are kept, missing ones are defaulted or
//! zero-valued, nested definitions, composed models and arrays are built
//! recursively, and an optional `_init` hook runs on every new instance.
//!
//! ```
//! use formwork_model::{define_model, Definition, Descriptor, Primitive, Value};
//!
//! let user = define_model(
//!     Definition::new()
//!         .field("name", Descriptor::with_default(Primitive::Text, "unknown"))
//!         .field("cool", Descriptor::with_default(Primitive::Boolean, true)),
//! )
//! .unwrap();
//!
//! let bill = define_model(
//!     Definition::new()
//!         .field("customer", &user)
//!         .field("rows", Descriptor::array_of(
//!             Definition::new().field("product", Primitive::Text),
//!         )),
//! )
//! .unwrap();
//!
//! let instance = bill.build_from(&serde_json::json!({
//!     "customer": { "name": "Garibaldi" },
//! }).into());
//!
//! assert_eq!(instance["customer"]["name"], Value::from("Garibaldi"));
//! assert_eq!(instance["customer"]["cool"], Value::Bool(true));
//! assert_eq!(instance["rows"], Value::Array(vec![]));
//! ```
//!
//! ## Modules
//!
//! - [`descriptor`] — user-authored descriptors and definitions.
//! - [`classify`] — predicates over descriptors.
//! - [`validate`] — definition-time validation into a typed [`Schema`].
//! - [`build`] — instance building from a schema and input data.
//! - [`model`] — the model factory.
//! - [`options`] — validation options.
//!
//! ## Crate Policy
//!
//! - Depends only on `formwork-core` internally.
//! - All errors surface from `define_model`; building never fails.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod build;
pub mod classify;
pub mod descriptor;
pub mod model;
pub mod options;
pub mod schema;
pub mod validate;

pub use descriptor::{Definition, Descriptor, Func, INIT_KEY};
pub use model::{define_model, define_model_with, Model};
pub use options::{ArrayArity, ModelOptions};
pub use schema::{DefaultValue, Field, Schema};

pub use formwork_core::{ArgumentError, Instance, ModelError, Primitive, SchemaError, Value};
