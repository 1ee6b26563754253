//! Serializable-value-to-source compiler.
//!
//! [`to_source`] renders a value tree as a valid JavaScript (JSX) expression
//! with two-space indentation; [`to_formatted_source`] additionally runs it
//! through `vize_glyph`.

use crate::value::{NodeProp, ObjectEntry, PromiseOutcome, SerializableValue};
use std::fmt::Write;
use vize_carton::escape::{is_jsx_attribute_safe, is_jsx_text_safe, quote_js_string};
use vize_carton::ident::is_identifier_name;
use vize_glyph::{format_expression_or_original, FormatOptions};

const INDENT: &str = "  ";

/// Render `value` as an unformatted source expression.
pub fn to_source(value: &SerializableValue) -> String {
    let mut out = String::with_capacity(64);
    write_value(&mut out, value, 0);
    out
}

/// Render `value` and pretty-print it, keeping the unformatted text when
/// the formatter rejects it.
pub fn to_formatted_source(value: &SerializableValue, options: &FormatOptions) -> String {
    format_expression_or_original(&to_source(value), options)
}

/// Render a number the way JavaScript would print it as a literal.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else {
        // f64's Display never uses exponent notation and prints -0 as "-0".
        value.to_string()
    }
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

fn write_value(out: &mut String, value: &SerializableValue, level: usize) {
    match value {
        SerializableValue::Array { items } => {
            out.push('[');
            write_items(out, items, level);
            out.push(']');
        }
        SerializableValue::Boolean { value } => {
            out.push_str(if *value { "true" } else { "false" });
        }
        SerializableValue::Function { source } => out.push_str(source),
        SerializableValue::Map { entries } => {
            out.push_str("new Map(");
            if !entries.is_empty() {
                out.push_str("Object.entries(");
                write_entries(out, entries, level);
                out.push(')');
            }
            out.push(')');
        }
        SerializableValue::Node {
            tag,
            props,
            children,
        } => write_node(out, tag, props, children, level),
        SerializableValue::Null => out.push_str("null"),
        SerializableValue::Number { value } => out.push_str(&format_number(*value)),
        SerializableValue::Object { entries } => write_entries(out, entries, level),
        SerializableValue::Promise { value } => match value {
            PromiseOutcome::Resolve { value } => {
                out.push_str("Promise.resolve(");
                write_value(out, value, level);
                out.push(')');
            }
            PromiseOutcome::Reject { message: None } => out.push_str("Promise.reject()"),
            PromiseOutcome::Reject {
                message: Some(message),
            } => {
                let _ = write!(out, "Promise.reject(new Error({}))", quote_js_string(message));
            }
        },
        SerializableValue::Set { items } => {
            out.push_str("new Set(");
            if !items.is_empty() {
                out.push('[');
                write_items(out, items, level);
                out.push(']');
            }
            out.push(')');
        }
        SerializableValue::String { value } => out.push_str(&quote_js_string(value)),
        SerializableValue::Undefined => out.push_str("undefined"),
        SerializableValue::Unknown { source } => match source.as_deref().map(str::trim) {
            Some(source) if !source.is_empty() => out.push_str(source),
            _ => out.push_str("{}"),
        },
    }
}

fn write_items(out: &mut String, items: &[SerializableValue], level: usize) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_value(out, item, level);
    }
}

fn write_entries(out: &mut String, entries: &[ObjectEntry], level: usize) {
    if entries.is_empty() {
        out.push_str("{}");
        return;
    }

    out.push_str("{\n");
    for (i, entry) in entries.iter().enumerate() {
        push_indent(out, level + 1);
        match entry {
            ObjectEntry::Property { key, value } => {
                write_key(out, key, level + 1);
                out.push_str(": ");
                write_value(out, value, level + 1);
            }
            ObjectEntry::Spread { value } => {
                out.push_str("...");
                write_value(out, value, level + 1);
            }
        }
        if i + 1 < entries.len() {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, level);
    out.push('}');
}

fn write_key(out: &mut String, key: &SerializableValue, level: usize) {
    match key {
        SerializableValue::String { value } if is_identifier_name(value) => out.push_str(value),
        SerializableValue::String { value } => out.push_str(&quote_js_string(value)),
        SerializableValue::Number { value } if value.is_finite() && value.is_sign_positive() => {
            out.push_str(&format_number(*value));
        }
        other => {
            out.push('[');
            write_value(out, other, level);
            out.push(']');
        }
    }
}

fn write_node(
    out: &mut String,
    tag: &str,
    props: &[NodeProp],
    children: &[SerializableValue],
    level: usize,
) {
    out.push('<');
    out.push_str(tag);

    for prop in props {
        match &prop.value {
            SerializableValue::Undefined => continue,
            SerializableValue::Boolean { value: true } => {
                out.push(' ');
                out.push_str(&prop.name);
            }
            SerializableValue::String { value } if is_jsx_attribute_safe(value) => {
                let _ = write!(out, " {}=\"{}\"", prop.name, value);
            }
            other => {
                let _ = write!(out, " {}={{", prop.name);
                write_value(out, other, level);
                out.push('}');
            }
        }
    }

    if children.is_empty() {
        out.push_str(" />");
        return;
    }

    out.push('>');
    for child in children {
        match child {
            SerializableValue::String { value } if is_jsx_text_safe(value) => out.push_str(value),
            SerializableValue::Node { .. } => write_value(out, child, level),
            other => {
                out.push('{');
                write_value(out, other, level);
                out.push('}');
            }
        }
    }
    let _ = write!(out, "</{tag}>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::*;

    fn valid(source: &str) -> bool {
        vize_glyph::is_valid_expression(source, &FormatOptions::default())
    }

    #[test]
    fn test_primitives() {
        assert_eq!(to_source(&SerializableValue::string("foo")), "\"foo\"");
        assert_eq!(to_source(&SerializableValue::number(0.0)), "0");
        assert_eq!(to_source(&SerializableValue::number(-12.5)), "-12.5");
        assert_eq!(to_source(&TRUE), "true");
        assert_eq!(to_source(&NULL), "null");
        assert_eq!(to_source(&UNDEFINED), "undefined");
    }

    #[test]
    fn test_special_numbers() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(-0.0), "-0");
        assert_eq!(format_number(4999.0), "4999");
    }

    #[test]
    fn test_negative_zero_key_is_computed() {
        let value = SerializableValue::object(vec![ObjectEntry::Property {
            key: SerializableValue::number(-0.0),
            value: SerializableValue::number(1.0),
        }]);
        assert_eq!(to_source(&value), "{\n  [-0]: 1\n}");
        assert!(valid(&to_source(&value)));
    }

    #[test]
    fn test_object_single_field() {
        let value = SerializableValue::object(vec![ObjectEntry::property(
            "foo",
            SerializableValue::string("foo"),
        )]);
        assert_eq!(to_source(&value), "{\n  foo: \"foo\"\n}");
    }

    #[test]
    fn test_object_keys_and_spread() {
        let value = SerializableValue::object(vec![
            ObjectEntry::property("aria-label", SerializableValue::string("x")),
            ObjectEntry::Property {
                key: SerializableValue::number(1.0),
                value: TRUE,
            },
            ObjectEntry::Property {
                key: SerializableValue::unknown("Symbol.iterator"),
                value: NULL,
            },
            ObjectEntry::spread(SerializableValue::unknown("rest")),
        ]);
        insta::assert_snapshot!(to_source(&value), @r#"
        {
          "aria-label": "x",
          1: true,
          [Symbol.iterator]: null,
          ...rest
        }
        "#);
        assert!(valid(&to_source(&value)));
    }

    #[test]
    fn test_nested_indentation() {
        let value = SerializableValue::object(vec![ObjectEntry::property(
            "user",
            SerializableValue::object(vec![ObjectEntry::property(
                "tags",
                SerializableValue::array(vec![SerializableValue::string("a")]),
            )]),
        )]);
        assert_eq!(
            to_source(&value),
            "{\n  user: {\n    tags: [\"a\"]\n  }\n}"
        );
    }

    #[test]
    fn test_collections() {
        assert_eq!(to_source(&EMPTY_ARRAY), "[]");
        assert_eq!(to_source(&EMPTY_SET), "new Set()");
        assert_eq!(
            to_source(&SerializableValue::set(vec![SerializableValue::number(1.0)])),
            "new Set([1])"
        );
        assert_eq!(to_source(&EMPTY_MAP), "new Map()");
        let map = SerializableValue::map(vec![ObjectEntry::property("a", TRUE)]);
        assert_eq!(to_source(&map), "new Map(Object.entries({\n  a: true\n}))");
        assert!(valid(&to_source(&map)));
    }

    #[test]
    fn test_promises() {
        assert_eq!(
            to_source(&SerializableValue::rejected_promise(None)),
            "Promise.reject()"
        );
        assert_eq!(
            to_source(&SerializableValue::rejected_promise(Some("nope".into()))),
            "Promise.reject(new Error(\"nope\"))"
        );
        assert_eq!(
            to_source(&SerializableValue::resolved_promise(EMPTY_OBJECT)),
            "Promise.resolve({})"
        );
    }

    #[test]
    fn test_unknown_fallback() {
        assert_eq!(to_source(&SerializableValue::Unknown { source: None }), "{}");
        assert_eq!(to_source(&SerializableValue::unknown("  ")), "{}");
        assert_eq!(to_source(&SerializableValue::unknown("someVar")), "someVar");
    }

    #[test]
    fn test_node_rendering() {
        let node = SerializableValue::node(
            "Button",
            vec![
                NodeProp::new("disabled", TRUE),
                NodeProp::new("hidden", FALSE),
                NodeProp::new("variant", SerializableValue::string("primary")),
                NodeProp::new("title", SerializableValue::string("say \"hi\"")),
                NodeProp::new("skipped", UNDEFINED),
            ],
            vec![
                SerializableValue::string("Click me"),
                SerializableValue::node("Icon", vec![], vec![]),
                SerializableValue::string("{raw}"),
            ],
        );
        let source = to_source(&node);
        assert_eq!(
            source,
            "<Button disabled hidden={false} variant=\"primary\" title={\"say \\\"hi\\\"\"}>Click me<Icon />{\"{raw}\"}</Button>"
        );
        assert!(valid(&source));
    }

    #[test]
    fn test_formatted_source_falls_back() {
        let broken = SerializableValue::unknown("{ a: ");
        assert_eq!(
            to_formatted_source(&broken, &FormatOptions::default()),
            "{ a: "
        );
    }
}
