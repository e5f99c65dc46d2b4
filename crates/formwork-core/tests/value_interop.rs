//! # Value Interop Tests
//!
//! Built instances are handed to callers that usually speak JSON. These
//! tests pin the JSON shape of values, including dates and coerced
//! primitives, as seen from outside the crate.

use formwork_core::{temporal, Instance, Primitive, Value};
use serde_json::json;

#[test]
fn instance_serializes_in_field_order() {
    let mut instance = Instance::new();
    instance.insert("name", "Garibaldi");
    instance.insert("age", 42);
    instance.insert("cool", true);
    assert_eq!(
        serde_json::to_string(&instance).unwrap(),
        r#"{"name":"Garibaldi","age":42,"cool":true}"#
    );
}

#[test]
fn nested_values_serialize_recursively() {
    let born = temporal::parse_date("1976-02-03").unwrap();
    let mut customer = Instance::new();
    customer.insert("born", born);
    customer.insert("tags", vec![Value::from("a"), Value::from(1.5)]);

    let mut bill = Instance::new();
    bill.insert("customer", customer);
    bill.insert("note", None::<String>);

    assert_eq!(
        bill.to_json(),
        json!({
            "customer": {"born": "1976-02-03T00:00:00.000Z", "tags": ["a", 1.5]},
            "note": null,
        })
    );
}

#[test]
fn json_dates_come_back_as_text() {
    let mut instance = Instance::new();
    instance.insert("born", temporal::epoch());
    let text = serde_json::to_string(&instance).unwrap();
    let back: Instance = serde_json::from_str(&text).unwrap();
    assert_eq!(back["born"], Value::from("1970-01-01T00:00:00.000Z"));
    assert_eq!(Primitive::Date.coerce(&back["born"]), Value::Date(temporal::epoch()));
}

#[test]
fn zero_values_serialize_as_json_zeroes() {
    let instance: Instance = Primitive::ALL
        .iter()
        .map(|p| (p.name().to_lowercase(), p.zero()))
        .collect();
    assert_eq!(
        instance.to_json(),
        json!({
            "text": "",
            "number": 0,
            "boolean": false,
            "date": "1970-01-01T00:00:00.000Z",
        })
    );
}
