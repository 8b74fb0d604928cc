//! Display names for observables and arbitrary values.

use spyglass_core::{ObservableHandle, Value};

/// Stable display name of an observable: `"<name>@<id>"`.
///
/// Array-like containers are named after their internal atom; keyed
/// containers and value holders carry the name themselves. All three end
/// up as an [`spyglass_core::Atom`] once decoded, so this never fails.
pub fn observable_name(handle: &ObservableHandle) -> String {
    match handle {
        ObservableHandle::Array(atom)
        | ObservableHandle::Keyed(atom)
        | ObservableHandle::Value(atom) => format!("{}@{}", atom.name, atom.id),
    }
}

/// Short name for any value, as used inside parentheses.
///
/// Observables render as `"<name>#<id>"`, objects as their constructor
/// name, and everything else as its runtime type tag.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Observable(handle) => {
            let atom = handle.atom();
            format!("{}#{}", atom.name, atom.id)
        }
        Value::Instance { class: Some(class) } if class.is_empty() => "object".to_string(),
        Value::Instance { class: Some(class) } => class.clone(),
        Value::Record(_) => "Object".to_string(),
        Value::List(_) => "Array".to_string(),
        other => other.type_tag().to_string(),
    }
}

/// Parenthesized callee name, or an empty string when there is no target.
pub fn callee(target: Option<&Value>) -> String {
    match target {
        Some(value) => format!("({})", describe(value)),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_observable_names() {
        assert_eq!(observable_name(&ObservableHandle::array("list", 3)), "list@3");
        assert_eq!(observable_name(&ObservableHandle::keyed("user", 7)), "user@7");
        assert_eq!(
            observable_name(&ObservableHandle::value("Reaction", "r2")),
            "Reaction@r2"
        );
    }

    #[test]
    fn test_describe_objects() {
        let todo = Value::Observable(ObservableHandle::keyed("Todo", 12));
        assert_eq!(describe(&todo), "Todo#12");
        assert_eq!(describe(&Value::instance("TodoStore")), "TodoStore");
        assert_eq!(describe(&Value::instance("")), "object");
        assert_eq!(describe(&Value::Instance { class: None }), "object");
        assert_eq!(describe(&Value::Record(BTreeMap::new())), "Object");
        assert_eq!(describe(&Value::List(vec![])), "Array");
    }

    #[test]
    fn test_describe_falls_back_to_type_tag() {
        assert_eq!(describe(&Value::from(true)), "boolean");
        assert_eq!(describe(&Value::Null), "object");
        assert_eq!(describe(&Value::Function { name: None }), "function");
    }

    #[test]
    fn test_callee_omitted_without_target() {
        assert_eq!(callee(None), "");
        assert_eq!(callee(Some(&Value::instance("Store"))), "(Store)");
    }
}
