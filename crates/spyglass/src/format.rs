//! Formatting of payload values inside messages.

use spyglass_core::Value;

use crate::names::describe;

/// A value ready to be placed in a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Formatted<'a> {
    /// Primitive passed through unchanged.
    Literal(&'a Value),
    /// Non-primitive replaced by its parenthesized name.
    Wrapped(String),
}

impl std::fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formatted::Literal(value) => write!(f, "{}", value),
            Formatted::Wrapped(name) => f.write_str(name),
        }
    }
}

/// Format a value: null, undefined, strings and numbers stay literal,
/// anything else becomes `"(<name>)"`.
pub fn format_value(value: &Value) -> Formatted<'_> {
    if value.is_primitive() {
        Formatted::Literal(value)
    } else {
        Formatted::Wrapped(format!("({})", describe(value)))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use spyglass_core::ObservableHandle;

    fn primitive_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            Just(Value::Undefined),
            any::<f64>().prop_map(Value::Number),
            ".{0,20}".prop_map(Value::String),
        ]
    }

    fn object_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<bool>().prop_map(Value::Bool),
            proptest::option::of("[A-Za-z]{0,12}").prop_map(|class| Value::Instance { class }),
            proptest::option::of("[a-z]{1,8}").prop_map(|name| Value::Function { name }),
            proptest::collection::vec(primitive_value(), 0..4).prop_map(Value::List),
            ("[a-z]{1,8}", any::<u64>())
                .prop_map(|(name, id)| Value::Observable(ObservableHandle::keyed(name, id))),
        ]
    }

    proptest! {
        #[test]
        fn primitives_pass_through(v in primitive_value()) {
            match format_value(&v) {
                Formatted::Literal(inner) => prop_assert!(std::ptr::eq(inner, &v)),
                Formatted::Wrapped(text) => prop_assert!(false, "wrapped primitive: {}", text),
            }
        }

        #[test]
        fn objects_are_wrapped(v in object_value()) {
            match format_value(&v) {
                Formatted::Wrapped(text) => {
                    prop_assert!(text.starts_with('('));
                    prop_assert!(text.ends_with(')'));
                    prop_assert!(text.len() > 2, "empty inner name for {:?}", v);
                }
                Formatted::Literal(_) => prop_assert!(false, "literal object: {:?}", v),
            }
        }
    }
}
