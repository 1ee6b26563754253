//! Statically resolved type graph.
//!
//! These types are produced by the TypeScript resolver and consumed as
//! plain data: a props [`ValueType`] plus the [`CollectedTypes`]
//! dictionary of every named type it references.

use serde::{Deserialize, Serialize};
use vize_carton::FxHashMap;

/// Dictionary of named types, keyed by (possibly qualified) type name.
pub type CollectedTypes = FxHashMap<String, CollectedType>;

/// A resolved type shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValueType {
    Any,
    Unknown,
    Never,
    Void,
    Null,
    Boolean,
    String,
    Number,
    /// Framework markup (`ReactNode`, `JSX.Element`, slots).
    Node,
    Literal {
        value: LiteralValue,
    },
    Enum {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        options: Vec<EnumOption>,
    },
    Array {
        items: Box<ValueType>,
    },
    Tuple {
        items: Vec<ValueType>,
    },
    Set {
        items: Box<ValueType>,
    },
    Record {
        keys: Box<ValueType>,
        values: Box<ValueType>,
    },
    Map {
        keys: Box<ValueType>,
        values: Box<ValueType>,
    },
    Object {
        fields: Vec<ObjectField>,
    },
    Union {
        types: Vec<ValueType>,
    },
    Intersection {
        types: Vec<ValueType>,
    },
    Function {
        #[serde(rename = "returnType")]
        return_type: Box<ValueType>,
    },
    Promise {
        #[serde(rename = "type")]
        ty: Box<ValueType>,
    },
    /// Reference into [`CollectedTypes`], with positional generic arguments.
    Name {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<ValueType>,
    },
}

/// Value of a literal type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for LiteralValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// A declared enum member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumOption {
    pub key: String,
    pub value: EnumValue,
}

/// Runtime value of an enum member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    Number(f64),
    String(String),
}

/// A field of an object type, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ValueType,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

impl ObjectField {
    /// A required field.
    #[inline]
    pub fn required(name: impl Into<String>, ty: ValueType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }

    /// An optional (`name?: T`) field.
    #[inline]
    pub fn optional(name: impl Into<String>, ty: ValueType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: true,
        }
    }
}

/// A named type's body and its generic parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectedType {
    #[serde(rename = "type")]
    pub ty: ValueType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<TypeParameter>,
}

impl CollectedType {
    /// A non-generic named type.
    #[inline]
    pub fn new(ty: ValueType) -> Self {
        Self {
            ty,
            parameters: Vec::new(),
        }
    }

    /// A generic named type.
    #[inline]
    pub fn generic(ty: ValueType, parameters: Vec<TypeParameter>) -> Self {
        Self { ty, parameters }
    }
}

/// A generic parameter, optionally with a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ValueType>,
}

impl TypeParameter {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    #[inline]
    pub fn with_default(name: impl Into<String>, default: ValueType) -> Self {
        Self {
            name: name.into(),
            default: Some(default),
        }
    }
}

// =============================================================================
// Constructors
// =============================================================================

pub const ANY_TYPE: ValueType = ValueType::Any;
pub const UNKNOWN_TYPE: ValueType = ValueType::Unknown;
pub const NEVER_TYPE: ValueType = ValueType::Never;
pub const VOID_TYPE: ValueType = ValueType::Void;
pub const NULL_TYPE: ValueType = ValueType::Null;
pub const BOOLEAN_TYPE: ValueType = ValueType::Boolean;
pub const STRING_TYPE: ValueType = ValueType::String;
pub const NUMBER_TYPE: ValueType = ValueType::Number;
pub const NODE_TYPE: ValueType = ValueType::Node;

#[inline]
pub fn literal_type(value: impl Into<LiteralValue>) -> ValueType {
    ValueType::Literal {
        value: value.into(),
    }
}

pub fn enum_type<K: Into<String>>(options: impl IntoIterator<Item = (K, EnumValue)>) -> ValueType {
    ValueType::Enum {
        name: None,
        options: options
            .into_iter()
            .map(|(key, value)| EnumOption {
                key: key.into(),
                value,
            })
            .collect(),
    }
}

#[inline]
pub fn array_type(items: ValueType) -> ValueType {
    ValueType::Array {
        items: Box::new(items),
    }
}

#[inline]
pub fn set_type(items: ValueType) -> ValueType {
    ValueType::Set {
        items: Box::new(items),
    }
}

#[inline]
pub fn tuple_type(items: Vec<ValueType>) -> ValueType {
    ValueType::Tuple { items }
}

#[inline]
pub fn record_type(keys: ValueType, values: ValueType) -> ValueType {
    ValueType::Record {
        keys: Box::new(keys),
        values: Box::new(values),
    }
}

#[inline]
pub fn map_type(keys: ValueType, values: ValueType) -> ValueType {
    ValueType::Map {
        keys: Box::new(keys),
        values: Box::new(values),
    }
}

#[inline]
pub fn object_type(fields: Vec<ObjectField>) -> ValueType {
    ValueType::Object { fields }
}

#[inline]
pub fn union_type(types: Vec<ValueType>) -> ValueType {
    ValueType::Union { types }
}

#[inline]
pub fn intersection_type(types: Vec<ValueType>) -> ValueType {
    ValueType::Intersection { types }
}

#[inline]
pub fn function_type(return_type: ValueType) -> ValueType {
    ValueType::Function {
        return_type: Box::new(return_type),
    }
}

#[inline]
pub fn promise_type(ty: ValueType) -> ValueType {
    ValueType::Promise { ty: Box::new(ty) }
}

#[inline]
pub fn named_type(name: impl Into<String>) -> ValueType {
    ValueType::Name {
        name: name.into(),
        args: Vec::new(),
    }
}

#[inline]
pub fn generic_type(name: impl Into<String>, args: Vec<ValueType>) -> ValueType {
    ValueType::Name {
        name: name.into(),
        args,
    }
}

/// Shorthand for `T | undefined` as the resolver emits it for optional values.
#[inline]
pub fn optional_type(ty: ValueType) -> ValueType {
    union_type(vec![ty, VOID_TYPE])
}
