//! Type classifier: pure predicates over [`Descriptor`]s.
//!
//! Nothing here raises errors; the validator combines these predicates into
//! accept/reject decisions.

use formwork_core::Value;

use crate::descriptor::Descriptor;

/// A previously defined model used as a field type.
pub fn is_model_factory(d: &Descriptor) -> bool {
    matches!(d, Descriptor::Model(_))
}

/// One of the four primitive type constructors.
pub fn is_supported_primitive(d: &Descriptor) -> bool {
    matches!(d, Descriptor::Type(_))
}

/// An ordered sequence, whatever its length.
pub fn is_array_descriptor(d: &Descriptor) -> bool {
    matches!(d, Descriptor::Array(_))
}

/// A plain mapping of field names to descriptors.
pub fn is_nested_definition(d: &Descriptor) -> bool {
    matches!(d, Descriptor::Object(_))
}

/// Type constructors, models and functions.
pub fn is_callable(d: &Descriptor) -> bool {
    matches!(
        d,
        Descriptor::Type(_) | Descriptor::Model(_) | Descriptor::Function(_)
    )
}

/// Values that look like objects but are not definitions.
pub fn is_date_or_pattern(d: &Descriptor) -> bool {
    matches!(d, Descriptor::Pattern(_) | Descriptor::Literal(Value::Date(_)))
}

/// Absent or falsy literals.
pub fn is_falsy(d: &Descriptor) -> bool {
    match d {
        Descriptor::Undefined => true,
        Descriptor::Literal(v) => !v.is_truthy(),
        _ => false,
    }
}
