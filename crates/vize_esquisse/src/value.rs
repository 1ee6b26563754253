//! Serializable value model.
//!
//! A [`SerializableValue`] is a language-agnostic value tree that always
//! compiles to a valid JavaScript expression. Values own their data and keep
//! no reference to the [`ValueType`](crate::types::ValueType) they came from.

use serde::{Deserialize, Serialize};

/// A value that can be rendered as source code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SerializableValue {
    Array {
        items: Vec<SerializableValue>,
    },
    Boolean {
        value: bool,
    },
    /// Function literal; `source` is already valid source text.
    Function {
        source: String,
    },
    Map {
        entries: Vec<ObjectEntry>,
    },
    /// Markup element, rendered with JSX syntax.
    Node {
        tag: String,
        #[serde(default)]
        props: Vec<NodeProp>,
        #[serde(default)]
        children: Vec<SerializableValue>,
    },
    Null,
    Number {
        value: f64,
    },
    Object {
        entries: Vec<ObjectEntry>,
    },
    Promise {
        value: PromiseOutcome,
    },
    Set {
        items: Vec<SerializableValue>,
    },
    String {
        value: String,
    },
    Undefined,
    /// Escape hatch for expressions too complex to model.
    Unknown {
        #[serde(default)]
        source: Option<String>,
    },
}

/// Entry of an object or map literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ObjectEntry {
    Property {
        key: SerializableValue,
        value: SerializableValue,
    },
    Spread {
        value: SerializableValue,
    },
}

/// How a generated promise settles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PromiseOutcome {
    Resolve { value: Box<SerializableValue> },
    Reject { message: Option<String> },
}

/// Attribute of a [`SerializableValue::Node`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeProp {
    pub name: String,
    pub value: SerializableValue,
}

pub const UNDEFINED: SerializableValue = SerializableValue::Undefined;
pub const NULL: SerializableValue = SerializableValue::Null;
pub const TRUE: SerializableValue = SerializableValue::Boolean { value: true };
pub const FALSE: SerializableValue = SerializableValue::Boolean { value: false };
pub const EMPTY_OBJECT: SerializableValue = SerializableValue::Object {
    entries: Vec::new(),
};
pub const EMPTY_ARRAY: SerializableValue = SerializableValue::Array { items: Vec::new() };
pub const EMPTY_SET: SerializableValue = SerializableValue::Set { items: Vec::new() };
pub const EMPTY_MAP: SerializableValue = SerializableValue::Map {
    entries: Vec::new(),
};

impl SerializableValue {
    #[inline]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String {
            value: value.into(),
        }
    }

    #[inline]
    pub fn number(value: f64) -> Self {
        Self::Number { value }
    }

    #[inline]
    pub fn boolean(value: bool) -> Self {
        Self::Boolean { value }
    }

    #[inline]
    pub fn array(items: Vec<SerializableValue>) -> Self {
        Self::Array { items }
    }

    #[inline]
    pub fn set(items: Vec<SerializableValue>) -> Self {
        Self::Set { items }
    }

    #[inline]
    pub fn object(entries: Vec<ObjectEntry>) -> Self {
        Self::Object { entries }
    }

    #[inline]
    pub fn map(entries: Vec<ObjectEntry>) -> Self {
        Self::Map { entries }
    }

    #[inline]
    pub fn function(source: impl Into<String>) -> Self {
        Self::Function {
            source: source.into(),
        }
    }

    #[inline]
    pub fn unknown(source: impl Into<String>) -> Self {
        Self::Unknown {
            source: Some(source.into()),
        }
    }

    #[inline]
    pub fn resolved_promise(value: SerializableValue) -> Self {
        Self::Promise {
            value: PromiseOutcome::Resolve {
                value: Box::new(value),
            },
        }
    }

    #[inline]
    pub fn rejected_promise(message: Option<String>) -> Self {
        Self::Promise {
            value: PromiseOutcome::Reject { message },
        }
    }

    #[inline]
    pub fn node(tag: impl Into<String>, props: Vec<NodeProp>, children: Vec<SerializableValue>) -> Self {
        Self::Node {
            tag: tag.into(),
            props,
            children,
        }
    }

    /// `undefined`, or an object literal without entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Undefined => true,
            Self::Object { entries } => entries.is_empty(),
            _ => false,
        }
    }

    /// Key of a property entry, when it is a plain string.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String { value } => Some(value),
            _ => None,
        }
    }
}

impl ObjectEntry {
    /// A `key: value` entry with a string key.
    #[inline]
    pub fn property(key: impl Into<String>, value: SerializableValue) -> Self {
        Self::Property {
            key: SerializableValue::string(key),
            value,
        }
    }

    /// A `...value` entry.
    #[inline]
    pub fn spread(value: SerializableValue) -> Self {
        Self::Spread { value }
    }

    /// String name of a property entry; `None` for spreads and computed keys.
    #[inline]
    pub fn key_name(&self) -> Option<&str> {
        match self {
            Self::Property { key, .. } => key.as_str(),
            Self::Spread { .. } => None,
        }
    }
}

impl NodeProp {
    #[inline]
    pub fn new(name: impl Into<String>, value: SerializableValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emptiness() {
        assert!(UNDEFINED.is_empty());
        assert!(EMPTY_OBJECT.is_empty());
        assert!(!EMPTY_ARRAY.is_empty());
        assert!(!NULL.is_empty());
        assert!(!SerializableValue::object(vec![ObjectEntry::property("a", NULL)]).is_empty());
    }

    #[test]
    fn test_rejected_promise_shape() {
        let json = serde_json::to_value(SerializableValue::rejected_promise(None)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "kind": "promise", "value": { "type": "reject", "message": null } })
        );
    }

    #[test]
    fn test_entry_key_name() {
        assert_eq!(ObjectEntry::property("foo", NULL).key_name(), Some("foo"));
        assert_eq!(ObjectEntry::spread(EMPTY_OBJECT).key_name(), None);
        let computed = ObjectEntry::Property {
            key: SerializableValue::number(1.0),
            value: NULL,
        };
        assert_eq!(computed.key_name(), None);
    }
}
