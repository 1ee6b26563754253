//! Values crossing the script engine boundary.

use crate::error::ScriptError;
use std::fmt;
use std::rc::Rc;

type NativeFn = dyn Fn(&[JsValue]) -> Result<JsValue, ScriptError>;

/// A callable value owned by the script engine.
#[derive(Clone)]
pub struct JsFunction(Rc<NativeFn>);

impl JsFunction {
    pub fn new(f: impl Fn(&[JsValue]) -> Result<JsValue, ScriptError> + 'static) -> Self {
        Self(Rc::new(f))
    }

    #[inline]
    pub fn call(&self, args: &[JsValue]) -> Result<JsValue, ScriptError> {
        (self.0)(args)
    }
}

impl fmt::Debug for JsFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JsFunction")
    }
}

impl PartialEq for JsFunction {
    fn eq(&self, other: &Self) -> bool {
        Rc::as_ptr(&self.0) as *const () == Rc::as_ptr(&other.0) as *const ()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum JsValue {
    #[default]
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<JsValue>),
    /// Own enumerable properties in insertion order.
    Object(Vec<(String, JsValue)>),
    Function(JsFunction),
}

impl JsValue {
    #[inline]
    pub fn get(&self, key: &str) -> Option<&JsValue> {
        match self {
            Self::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_function(&self) -> Option<&JsFunction> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }
}

impl From<&str> for JsValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<f64> for JsValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for JsValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Console-style rendering (`String(value)`).
impl fmt::Display for JsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Number(value) if value.is_infinite() => {
                f.write_str(if *value > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Self::Number(value) => write!(f, "{value}"),
            Self::String(value) => f.write_str(value),
            Self::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    match item {
                        Self::Undefined | Self::Null => {}
                        item => write!(f, "{item}")?,
                    }
                }
                Ok(())
            }
            Self::Object(_) => f.write_str("[object Object]"),
            Self::Function(_) => f.write_str("function"),
        }
    }
}

/// Overlay explicit properties on auto-generated defaults. Explicit keys win.
pub fn merge_props(default_props: JsValue, properties: JsValue) -> JsValue {
    match (default_props, properties) {
        (JsValue::Object(mut merged), JsValue::Object(explicit)) => {
            for (key, value) in explicit {
                match merged.iter_mut().find(|(existing, _)| *existing == key) {
                    Some(slot) => slot.1 = value,
                    None => merged.push((key, value)),
                }
            }
            JsValue::Object(merged)
        }
        (defaults @ JsValue::Object(_), JsValue::Undefined | JsValue::Null) => defaults,
        (_, properties) => properties,
    }
}

/// Wrap every function reachable from `value` so each call first reports
/// its property path.
pub fn wrap_functions(value: JsValue, path: &str, report: &Rc<dyn Fn(&str)>) -> JsValue {
    match value {
        JsValue::Function(function) => {
            let report = Rc::clone(report);
            let path = path.to_string();
            JsValue::Function(JsFunction::new(move |args| {
                report(&path);
                function.call(args)
            }))
        }
        JsValue::Object(entries) => JsValue::Object(
            entries
                .into_iter()
                .map(|(key, value)| {
                    let child = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{path}.{key}")
                    };
                    let value = wrap_functions(value, &child, report);
                    (key, value)
                })
                .collect(),
        ),
        JsValue::Array(items) => JsValue::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| wrap_functions(item, &format!("{path}[{i}]"), report))
                .collect(),
        ),
        value => value,
    }
}
