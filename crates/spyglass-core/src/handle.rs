//! Handles to observable containers and values.
//!
//! The engine tracks three shapes of observable state. The shape is fixed
//! when an event crosses into Spyglass, so consumers match on
//! [`ObservableHandle`] instead of probing for fields.

use serde::{Deserialize, Serialize};

/// Identity of an atom inside the observable-state engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AtomId {
    /// Numeric identity (the common case).
    Number(u64),
    /// Textual identity.
    Text(String),
}

impl std::fmt::Display for AtomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomId::Number(id) => write!(f, "{}", id),
            AtomId::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for AtomId {
    fn from(id: u64) -> Self {
        AtomId::Number(id)
    }
}

impl From<&str> for AtomId {
    fn from(id: &str) -> Self {
        AtomId::Text(id.to_string())
    }
}

impl From<String> for AtomId {
    fn from(id: String) -> Self {
        AtomId::Text(id)
    }
}

/// Name and identity of a tracked atom.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom {
    /// Debug name given by the engine.
    pub name: String,
    /// Engine-assigned identity.
    pub id: AtomId,
}

impl Atom {
    /// Create a new atom.
    pub fn new(name: impl Into<String>, id: impl Into<AtomId>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

/// Reference to a tracked container or value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ObservableHandle {
    /// Array-like container. Its name lives on the container's internal atom.
    #[serde(rename = "array")]
    Array(Atom),
    /// Map or object-like container.
    #[serde(rename = "object", alias = "map")]
    Keyed(Atom),
    /// Bare value holder, reaction or computed value.
    #[serde(rename = "value", alias = "reaction", alias = "computed")]
    Value(Atom),
}

impl ObservableHandle {
    /// Handle to an array-like container.
    pub fn array(name: impl Into<String>, id: impl Into<AtomId>) -> Self {
        ObservableHandle::Array(Atom::new(name, id))
    }

    /// Handle to a map or object-like container.
    pub fn keyed(name: impl Into<String>, id: impl Into<AtomId>) -> Self {
        ObservableHandle::Keyed(Atom::new(name, id))
    }

    /// Handle to a value holder or reaction.
    pub fn value(name: impl Into<String>, id: impl Into<AtomId>) -> Self {
        ObservableHandle::Value(Atom::new(name, id))
    }

    /// The atom carrying this handle's name and identity.
    pub fn atom(&self) -> &Atom {
        match self {
            ObservableHandle::Array(atom)
            | ObservableHandle::Keyed(atom)
            | ObservableHandle::Value(atom) => atom,
        }
    }

    /// Check if this is an array-like container.
    pub fn is_array(&self) -> bool {
        matches!(self, ObservableHandle::Array(_))
    }

    /// Check if this is a map or object-like container.
    pub fn is_keyed(&self) -> bool {
        matches!(self, ObservableHandle::Keyed(_))
    }
}
