//! Change events reported by the observable-state engine.

use serde::Deserialize;

use crate::error::{DecodeError, DecodeResult};
use crate::handle::ObservableHandle;
use crate::value::Value;

/// Flag marking a record that opens a span.
const SPAN_START_FLAG: &str = "spyReportStart";
/// Flag marking a record that closes a span.
const SPAN_END_FLAG: &str = "spyReportEnd";

/// One notification from the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    /// A change that does not open a span.
    Change(Change),
    /// A change that opens a span. Everything reported until the matching
    /// [`ChangeEvent::SpanEnd`] belongs to it.
    SpanStart(Change),
    /// Closes the innermost open span.
    SpanEnd {
        /// Elapsed time of the span in milliseconds.
        time: Option<f64>,
    },
}

impl ChangeEvent {
    /// Decode a loosely-typed JSON record.
    ///
    /// Records with a missing or unrecognized `type` decode to
    /// [`Change::Unknown`]. Known kinds with missing or mistyped fields are
    /// rejected.
    pub fn from_json(record: serde_json::Value) -> DecodeResult<Self> {
        let Some(fields) = record.as_object() else {
            return Err(DecodeError::NotAnObject(json_type_name(&record)));
        };

        if is_flag_set(fields, SPAN_END_FLAG) {
            return Ok(ChangeEvent::SpanEnd {
                time: fields.get("time").and_then(serde_json::Value::as_f64),
            });
        }

        let change = match fields.get("type").and_then(serde_json::Value::as_str) {
            Some(kind) => {
                Change::deserialize(&record).map_err(|source| DecodeError::Malformed {
                    kind: kind.to_string(),
                    source,
                })?
            }
            None => Change::Unknown,
        };

        if is_flag_set(fields, SPAN_START_FLAG) {
            Ok(ChangeEvent::SpanStart(change))
        } else {
            Ok(ChangeEvent::Change(change))
        }
    }

    /// Decode a record from JSON text.
    pub fn from_json_str(text: &str) -> DecodeResult<Self> {
        Self::from_json(serde_json::from_str(text)?)
    }

    /// The change carried by this event, if any.
    pub fn change(&self) -> Option<&Change> {
        match self {
            ChangeEvent::Change(change) | ChangeEvent::SpanStart(change) => Some(change),
            ChangeEvent::SpanEnd { .. } => None,
        }
    }

    /// Check if this event opens a span.
    pub fn is_span_start(&self) -> bool {
        matches!(self, ChangeEvent::SpanStart(_))
    }

    /// Check if this event closes a span.
    pub fn is_span_end(&self) -> bool {
        matches!(self, ChangeEvent::SpanEnd { .. })
    }
}

fn is_flag_set(fields: &serde_json::Map<String, serde_json::Value>, flag: &str) -> bool {
    fields.get(flag).and_then(serde_json::Value::as_bool) == Some(true)
}

/// A field that is present, even as `null`, decodes to `Some`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// A single state transition, by kind.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Change {
    /// An action was invoked.
    Action {
        /// Action name.
        name: String,
        /// The object the action was invoked on.
        #[serde(default, deserialize_with = "present")]
        target: Option<Value>,
        /// Arguments passed to the action.
        #[serde(default)]
        arguments: Vec<Value>,
    },
    /// A transaction was started.
    Transaction {
        /// Transaction name.
        name: String,
        /// The object the transaction runs for.
        #[serde(default, deserialize_with = "present")]
        target: Option<Value>,
    },
    /// A reaction was scheduled or ran.
    Reaction {
        /// The reaction.
        object: ObservableHandle,
    },
    /// A computed value was re-evaluated.
    Compute {
        /// The computed value.
        object: ObservableHandle,
        /// The object the computation belongs to.
        #[serde(default, deserialize_with = "present")]
        target: Option<Value>,
    },
    /// An error escaped a reaction or computation.
    Error {
        /// Error message.
        message: String,
    },
    /// A slot in a container, or a plain value, was overwritten.
    #[serde(rename_all = "camelCase")]
    Update {
        /// The container or value holder.
        object: ObservableHandle,
        /// Key within a keyed container.
        #[serde(default)]
        name: Option<String>,
        /// Index within an array-like container.
        #[serde(default)]
        index: Option<usize>,
        /// Value after the update.
        #[serde(default)]
        new_value: Value,
        /// Value before the update.
        #[serde(default)]
        old_value: Value,
    },
    /// Items were spliced into or out of an array-like container.
    #[serde(rename_all = "camelCase")]
    Splice {
        /// The array-like container.
        object: ObservableHandle,
        /// Index of the splice.
        index: usize,
        /// Items inserted.
        #[serde(default)]
        added: Vec<Value>,
        /// Items removed.
        #[serde(default)]
        removed: Vec<Value>,
        /// Number of items inserted.
        added_count: usize,
        /// Number of items removed.
        removed_count: usize,
    },
    /// A key was added to a keyed container.
    #[serde(rename_all = "camelCase")]
    Add {
        /// The keyed container.
        object: ObservableHandle,
        /// The new key.
        name: String,
        /// Value stored under the key.
        #[serde(default)]
        new_value: Value,
    },
    /// A key was removed from a keyed container.
    #[serde(rename_all = "camelCase")]
    Delete {
        /// The keyed container.
        object: ObservableHandle,
        /// The removed key.
        name: String,
        /// Value previously stored under the key.
        #[serde(default)]
        old_value: Value,
    },
    /// A value holder was created.
    #[serde(rename_all = "camelCase")]
    Create {
        /// The new value holder.
        object: ObservableHandle,
        /// Its initial value.
        #[serde(default)]
        new_value: Value,
    },
    /// Any kind this crate does not know about.
    #[serde(other)]
    Unknown,
}

impl Change {
    /// Get the change kind name.
    pub fn kind(&self) -> &'static str {
        match self {
            Change::Action { .. } => "action",
            Change::Transaction { .. } => "transaction",
            Change::Reaction { .. } => "reaction",
            Change::Compute { .. } => "compute",
            Change::Error { .. } => "error",
            Change::Update { .. } => "update",
            Change::Splice { .. } => "splice",
            Change::Add { .. } => "add",
            Change::Delete { .. } => "delete",
            Change::Create { .. } => "create",
            Change::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_array_update() {
        let event = ChangeEvent::from_json(json!({
            "type": "update",
            "object": {"kind": "array", "name": "list", "id": 3},
            "index": 2,
            "newValue": 5,
            "oldValue": 2
        }))
        .unwrap();

        assert_eq!(
            event,
            ChangeEvent::Change(Change::Update {
                object: ObservableHandle::array("list", 3),
                name: None,
                index: Some(2),
                new_value: Value::from(5),
                old_value: Value::from(2),
            })
        );
    }

    #[test]
    fn test_decode_span_start_action() {
        let event = ChangeEvent::from_json(json!({
            "type": "action",
            "name": "addTodo",
            "target": {"$class": "TodoStore"},
            "arguments": ["buy milk"],
            "spyReportStart": true
        }))
        .unwrap();

        assert!(event.is_span_start());
        match event.change() {
            Some(Change::Action {
                name,
                target,
                arguments,
            }) => {
                assert_eq!(name, "addTodo");
                assert_eq!(target, &Some(Value::instance("TodoStore")));
                assert_eq!(arguments, &vec![Value::from("buy milk")]);
            }
            other => panic!("Wrong change: {:?}", other),
        }
    }

    #[test]
    fn test_decode_span_end() {
        let event = ChangeEvent::from_json(json!({"spyReportEnd": true, "time": 12})).unwrap();
        assert_eq!(event, ChangeEvent::SpanEnd { time: Some(12.0) });

        let event = ChangeEvent::from_json(json!({"spyReportEnd": true})).unwrap();
        assert_eq!(event, ChangeEvent::SpanEnd { time: None });

        let event =
            ChangeEvent::from_json(json!({"spyReportEnd": true, "time": "soon"})).unwrap();
        assert_eq!(event, ChangeEvent::SpanEnd { time: None });
    }

    #[test]
    fn test_decode_splice() {
        let event = ChangeEvent::from_json_str(
            r#"{"type":"splice","object":{"kind":"array","name":"arr","id":1},
                "index":0,"added":["a","b"],"removed":["c"],"addedCount":2,"removedCount":1}"#,
        )
        .unwrap();

        match event {
            ChangeEvent::Change(Change::Splice {
                added,
                removed,
                added_count,
                removed_count,
                ..
            }) => {
                assert_eq!(added.len(), 2);
                assert_eq!(removed.len(), 1);
                assert_eq!(added_count, 2);
                assert_eq!(removed_count, 1);
            }
            other => panic!("Wrong event: {:?}", other),
        }
    }

    #[test]
    fn test_decode_remaining_kinds() {
        let decode = |record: serde_json::Value| match ChangeEvent::from_json(record).unwrap() {
            ChangeEvent::Change(change) => change,
            other => panic!("Wrong event: {:?}", other),
        };

        assert_eq!(
            decode(json!({"type": "transaction", "name": "batch"})),
            Change::Transaction {
                name: "batch".to_string(),
                target: None,
            }
        );
        assert_eq!(
            decode(json!({
                "type": "compute",
                "object": {"kind": "computed", "name": "total", "id": 5},
                "target": {"$class": "Cart"}
            })),
            Change::Compute {
                object: ObservableHandle::value("total", 5),
                target: Some(Value::instance("Cart")),
            }
        );
        assert_eq!(
            decode(json!({"type": "error", "message": "boom"})),
            Change::Error {
                message: "boom".to_string(),
            }
        );
        assert_eq!(
            decode(json!({
                "type": "delete",
                "object": {"kind": "map", "name": "settings", "id": 4},
                "name": "theme",
                "oldValue": "dark"
            })),
            Change::Delete {
                object: ObservableHandle::keyed("settings", 4),
                name: "theme".to_string(),
                old_value: Value::from("dark"),
            }
        );
        assert_eq!(
            decode(json!({
                "type": "create",
                "object": {"kind": "value", "name": "flag", "id": 6},
                "newValue": true
            })),
            Change::Create {
                object: ObservableHandle::value("flag", 6),
                new_value: Value::from(true),
            }
        );
        assert_eq!(
            decode(json!({
                "type": "update",
                "object": {"kind": "object", "name": "user", "id": 7},
                "name": "age",
                "newValue": 31,
                "oldValue": 30
            })),
            Change::Update {
                object: ObservableHandle::keyed("user", 7),
                name: Some("age".to_string()),
                index: None,
                new_value: Value::from(31),
                old_value: Value::from(30),
            }
        );
    }

    #[test]
    fn test_decode_null_target_is_kept() {
        let event = ChangeEvent::from_json(json!({
            "type": "action",
            "name": "reset",
            "target": null
        }))
        .unwrap();

        match event.change() {
            Some(Change::Action { target, .. }) => assert_eq!(target, &Some(Value::Null)),
            other => panic!("Wrong change: {:?}", other),
        }
    }

    #[test]
    fn test_decode_unknown_kinds() {
        let event = ChangeEvent::from_json(json!({"type": "scheduled-reaction"})).unwrap();
        assert_eq!(event, ChangeEvent::Change(Change::Unknown));

        let event = ChangeEvent::from_json(json!({"name": "untyped"})).unwrap();
        assert_eq!(event.change().map(Change::kind), Some("unknown"));
    }

    #[test]
    fn test_decode_rejects_malformed() {
        let result = ChangeEvent::from_json(json!({"type": "update", "newValue": 1}));
        assert!(matches!(
            result,
            Err(DecodeError::Malformed { ref kind, .. }) if kind == "update"
        ));

        let result = ChangeEvent::from_json(json!([1, 2]));
        assert!(matches!(result, Err(DecodeError::NotAnObject("array"))));

        assert!(matches!(
            ChangeEvent::from_json_str("{not json"),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn test_change_kind_names() {
        let change = Change::Error {
            message: "boom".to_string(),
        };
        assert_eq!(change.kind(), "error");
        assert_eq!(Change::Unknown.kind(), "unknown");
    }
}
