//! Payload values carried by change events.

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::DecodeError;
use crate::handle::ObservableHandle;

/// Marker keys used when values travel as JSON.
pub mod markers {
    /// Object holding an observable handle.
    pub const OBSERVABLE: &str = "$observable";
    /// Object standing in for an opaque class instance.
    pub const CLASS: &str = "$class";
    /// Object standing in for a function.
    pub const FUNCTION: &str = "$function";
    /// Object standing in for an undefined value.
    pub const UNDEFINED: &str = "$undefined";
}

/// A value observed by the engine.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum Value {
    /// Absent value.
    #[default]
    Undefined,
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Number.
    Number(f64),
    /// String.
    String(String),
    /// Plain list.
    List(Vec<Value>),
    /// Plain key/value object.
    Record(BTreeMap<String, Value>),
    /// Opaque object. `class` is its constructor name, if it has a constructor.
    Instance {
        /// Constructor name.
        class: Option<String>,
    },
    /// Function value.
    Function {
        /// Function name, if any.
        name: Option<String>,
    },
    /// Tracked observable container or value.
    Observable(ObservableHandle),
}

impl Value {
    /// Check if the value is logged as a literal: null, undefined, string or number.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Value::Undefined | Value::Null | Value::String(_) | Value::Number(_)
        )
    }

    /// Runtime type tag of the value.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Function { .. } => "function",
            Value::Null
            | Value::List(_)
            | Value::Record(_)
            | Value::Instance { .. }
            | Value::Observable(_) => "object",
        }
    }

    /// Create an opaque instance of a named class.
    pub fn instance(class: impl Into<String>) -> Self {
        Value::Instance {
            class: Some(class.into()),
        }
    }
}

/// Render a number the way a console prints it.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        // Exponent form, with an explicit sign on positive exponents.
        let text = format!("{:e}", n);
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => text,
        }
    } else {
        n.to_string()
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Value::Record(_) => f.write_str("[object Object]"),
            Value::Instance { class } => {
                write!(f, "[object {}]", class.as_deref().unwrap_or("Object"))
            }
            Value::Function { name } => {
                write!(f, "function {}()", name.as_deref().unwrap_or(""))
            }
            Value::Observable(handle) => {
                let atom = handle.atom();
                write!(f, "{}@{}", atom.name, atom.id)
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                // Integral numbers print without a fraction in dumps.
                if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Record(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Instance { class } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(markers::CLASS, class)?;
                map.end()
            }
            Value::Function { name } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(markers::FUNCTION, name)?;
                map.end()
            }
            Value::Observable(handle) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(markers::OBSERVABLE, handle)?;
                map.end()
            }
        }
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = DecodeError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value as Json;

        Ok(match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::List(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Json::Object(mut fields) => {
                if let Some(handle) = fields.remove(markers::OBSERVABLE) {
                    let handle = serde_json::from_value(handle)
                        .map_err(|e| DecodeError::MalformedHandle(e.to_string()))?;
                    Value::Observable(handle)
                } else if let Some(class) = fields.remove(markers::CLASS) {
                    Value::Instance {
                        class: class.as_str().map(str::to_string),
                    }
                } else if let Some(name) = fields.remove(markers::FUNCTION) {
                    Value::Function {
                        name: name.as_str().map(str::to_string),
                    }
                } else if fields.contains_key(markers::UNDEFINED) {
                    Value::Undefined
                } else {
                    Value::Record(
                        fields
                            .into_iter()
                            .map(|(k, v)| Ok((k, Value::try_from(v)?)))
                            .collect::<Result<_, DecodeError>>()?,
                    )
                }
            }
        })
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<ObservableHandle> for Value {
    fn from(handle: ObservableHandle) -> Self {
        Value::Observable(handle)
    }
}
