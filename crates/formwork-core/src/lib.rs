//! # formwork-core — Foundational Types
//!
//! The leaf crate of the formwork workspace. It defines the data that flows
//! through model building and the errors raised while defining models. It
//! depends on nothing internal.
//!
//! ## Contents
//!
//! 1. **[`Value`] and [`Instance`].** The dynamic value model. Input data,
//!    literal defaults and built instances are all `Value`s; an instance is
//!    an insertion-ordered field map. Both convert to and from
//!    `serde_json::Value`.
//!
//! 2. **[`Primitive`].** The closed set of primitive type constructors
//!    (`Text`, `Number`, `Boolean`, `Date`) with their zero values and
//!    literal coercion.
//!
//! 3. **[`temporal`].** UTC date parsing and rendering on top of `chrono`.
//!
//! 4. **[`error`].** `ArgumentError`, `SchemaError` and the `ModelError`
//!    umbrella.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `formwork-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod primitive;
pub mod temporal;
pub mod value;

pub use error::{ArgumentError, DateError, ModelError, SchemaError};
pub use primitive::Primitive;
pub use value::{Instance, Value};
