//! Ambient type declarations for the props editor.
//!
//! Emits `declare let properties: X;` followed by one `type` alias per
//! named type reachable from the props type, so an in-browser editor can
//! offer completions while the user edits the invocation.

use crate::compile::format_number;
use crate::generate::is_representable_key;
use crate::types::{CollectedTypes, EnumValue, LiteralValue, ObjectField, ValueType};
use std::collections::VecDeque;
use std::fmt::Write;
use vize_carton::escape::quote_js_string;
use vize_carton::ident::{is_identifier_name, sanitize_identifier};
use vize_carton::{FxHashMap, FxHashSet};

const INDENT: &str = "  ";

/// Render declarations for `props_type` and everything it references.
pub fn generate_type_declarations(props_type: &ValueType, types: &CollectedTypes) -> String {
    let mut printer = DeclarationPrinter::new(types);
    let mut out = String::new();

    out.push_str("declare let properties: ");
    printer.write_type(&mut out, props_type, &[], 0);
    out.push_str(";\n");

    while let Some(name) = printer.queue.pop_front() {
        out.push('\n');
        printer.write_alias(&mut out, &name);
    }

    out
}

/// Assigns declaration identifiers to dictionary keys, first seen wins.
#[derive(Debug, Default)]
struct Namer {
    assigned: FxHashMap<String, String>,
    taken: FxHashSet<String>,
}

impl Namer {
    /// Returns the identifier and whether it was newly assigned.
    fn name(&mut self, key: &str) -> (String, bool) {
        if let Some(existing) = self.assigned.get(key) {
            return (existing.clone(), false);
        }

        let base = sanitize_identifier(key.rsplit(':').next().unwrap_or(key));
        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.taken.contains(&candidate) {
            candidate = format!("{base}_{suffix}");
            suffix += 1;
        }

        self.taken.insert(candidate.clone());
        self.assigned.insert(key.to_string(), candidate.clone());
        (candidate, true)
    }
}

struct DeclarationPrinter<'a> {
    types: &'a CollectedTypes,
    namer: Namer,
    queue: VecDeque<String>,
}

impl<'a> DeclarationPrinter<'a> {
    fn new(types: &'a CollectedTypes) -> Self {
        Self {
            types,
            namer: Namer::default(),
            queue: VecDeque::new(),
        }
    }

    fn reference(&mut self, key: &str) -> String {
        let (identifier, fresh) = self.namer.name(key);
        if fresh {
            self.queue.push_back(key.to_string());
        }
        identifier
    }

    fn write_alias(&mut self, out: &mut String, key: &str) {
        let identifier = self.reference(key);
        let Some(collected) = self.types.get(key) else {
            let _ = writeln!(out, "type {identifier} = any;");
            return;
        };

        let scope: Vec<&str> = collected
            .parameters
            .iter()
            .map(|parameter| parameter.name.as_str())
            .collect();

        let _ = write!(out, "type {identifier}");
        if !collected.parameters.is_empty() {
            out.push('<');
            for (i, parameter) in collected.parameters.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&parameter.name);
                if let Some(default) = &parameter.default {
                    out.push_str(" = ");
                    self.write_type(out, default, &scope, 0);
                }
            }
            out.push('>');
        }
        out.push_str(" = ");
        self.write_type(out, &collected.ty, &scope, 0);
        out.push_str(";\n");
    }

    fn write_type(&mut self, out: &mut String, ty: &ValueType, scope: &[&str], level: usize) {
        match ty {
            ValueType::Any | ValueType::Node => out.push_str("any"),
            ValueType::Unknown => out.push_str("unknown"),
            ValueType::Never => out.push_str("never"),
            ValueType::Void => out.push_str("void"),
            ValueType::Null => out.push_str("null"),
            ValueType::Boolean => out.push_str("boolean"),
            ValueType::String => out.push_str("string"),
            ValueType::Number => out.push_str("number"),
            ValueType::Literal { value } => match value {
                LiteralValue::Boolean(value) => out.push_str(if *value { "true" } else { "false" }),
                LiteralValue::Number(value) => out.push_str(&number_literal_type(*value)),
                LiteralValue::String(value) => out.push_str(&quote_js_string(value)),
            },
            ValueType::Enum { options, .. } => {
                if options.is_empty() {
                    out.push_str("never");
                }
                for (i, option) in options.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" | ");
                    }
                    match &option.value {
                        EnumValue::Number(value) => out.push_str(&number_literal_type(*value)),
                        EnumValue::String(value) => out.push_str(&quote_js_string(value)),
                    }
                }
            }
            ValueType::Array { items } => {
                self.write_operand(out, items, scope, level);
                out.push_str("[]");
            }
            ValueType::Tuple { items } => {
                out.push('[');
                self.write_list(out, items, ", ", scope, level);
                out.push(']');
            }
            ValueType::Set { items } => {
                out.push_str("Set<");
                self.write_type(out, items, scope, level);
                out.push('>');
            }
            ValueType::Record { keys, values } => {
                out.push_str("Record<");
                self.write_type(out, keys, scope, level);
                out.push_str(", ");
                self.write_type(out, values, scope, level);
                out.push('>');
            }
            ValueType::Map { keys, values } => {
                out.push_str("Map<");
                self.write_type(out, keys, scope, level);
                out.push_str(", ");
                self.write_type(out, values, scope, level);
                out.push('>');
            }
            ValueType::Object { fields } => self.write_object(out, fields, scope, level),
            ValueType::Union { types } => {
                if types.is_empty() {
                    out.push_str("never");
                }
                self.write_operands(out, types, " | ", scope, level);
            }
            ValueType::Intersection { types } => {
                if types.is_empty() {
                    out.push_str("unknown");
                }
                self.write_operands(out, types, " & ", scope, level);
            }
            ValueType::Function { return_type } => {
                out.push_str("(...args: any[]) => ");
                self.write_type(out, return_type, scope, level);
            }
            ValueType::Promise { ty } => {
                out.push_str("Promise<");
                self.write_type(out, ty, scope, level);
                out.push('>');
            }
            ValueType::Name { name, args } => {
                if args.is_empty() && scope.contains(&name.as_str()) {
                    out.push_str(name);
                    return;
                }
                let identifier = self.reference(name);
                out.push_str(&identifier);
                if !args.is_empty() {
                    out.push('<');
                    self.write_list(out, args, ", ", scope, level);
                    out.push('>');
                }
            }
        }
    }

    fn write_object(&mut self, out: &mut String, fields: &[ObjectField], scope: &[&str], level: usize) {
        let fields: Vec<&ObjectField> = fields
            .iter()
            .filter(|field| is_representable_key(&field.name))
            .collect();
        if fields.is_empty() {
            out.push_str("{}");
            return;
        }

        out.push_str("{\n");
        for field in fields {
            push_indent(out, level + 1);
            if is_identifier_name(&field.name) {
                out.push_str(&field.name);
            } else {
                out.push_str(&quote_js_string(&field.name));
            }
            if field.optional {
                out.push('?');
            }
            out.push_str(": ");
            self.write_type(out, &field.ty, scope, level + 1);
            out.push_str(";\n");
        }
        push_indent(out, level);
        out.push('}');
    }

    fn write_list(&mut self, out: &mut String, items: &[ValueType], separator: &str, scope: &[&str], level: usize) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            self.write_type(out, item, scope, level);
        }
    }

    fn write_operands(&mut self, out: &mut String, items: &[ValueType], separator: &str, scope: &[&str], level: usize) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            self.write_operand(out, item, scope, level);
        }
    }

    /// Write `ty` where it binds tighter than a union, parenthesizing
    /// compound types.
    fn write_operand(&mut self, out: &mut String, ty: &ValueType, scope: &[&str], level: usize) {
        let needs_parens = match ty {
            ValueType::Union { types } | ValueType::Intersection { types } => types.len() > 1,
            ValueType::Function { .. } => true,
            ValueType::Enum { options, .. } => options.len() > 1,
            _ => false,
        };
        if needs_parens {
            out.push('(');
            self.write_type(out, ty, scope, level);
            out.push(')');
        } else {
            self.write_type(out, ty, scope, level);
        }
    }
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

/// `NaN` and the infinities have no literal type.
fn number_literal_type(value: f64) -> String {
    if value.is_finite() {
        format_number(value)
    } else {
        "number".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;
    use vize_glyph::{is_valid_script, FormatOptions};

    fn collected(entries: Vec<(&str, CollectedType)>) -> CollectedTypes {
        entries
            .into_iter()
            .map(|(name, ty)| (name.to_string(), ty))
            .collect()
    }

    fn assert_valid_typescript(source: &str) {
        assert!(
            is_valid_script(source, &FormatOptions::typescript()),
            "declarations do not parse:\n{source}"
        );
    }

    #[test]
    fn test_button_props() {
        let types = collected(vec![
            (
                "/src/Button.tsx:ButtonProps",
                CollectedType::new(object_type(vec![
                    ObjectField::required("label", STRING_TYPE),
                    ObjectField::optional("size", named_type("/src/Button.tsx:Size")),
                    ObjectField::optional("onClick", function_type(VOID_TYPE)),
                    ObjectField::required("data-id", NUMBER_TYPE),
                ])),
            ),
            (
                "/src/Button.tsx:Size",
                CollectedType::new(union_type(vec![literal_type("sm"), literal_type("lg")])),
            ),
        ]);

        let source = generate_type_declarations(&named_type("/src/Button.tsx:ButtonProps"), &types);
        insta::assert_snapshot!(source, @r#"
        declare let properties: ButtonProps;

        type ButtonProps = {
          label: string;
          size?: Size;
          onClick?: (...args: any[]) => void;
          "data-id": number;
        };

        type Size = "sm" | "lg";
        "#);
        assert_valid_typescript(&source);
    }

    #[test]
    fn test_name_collisions_get_suffixes() {
        let types = collected(vec![
            (
                "/a.ts:Item",
                CollectedType::new(object_type(vec![ObjectField::required("other", named_type("/b.ts:Item"))])),
            ),
            ("/b.ts:Item", CollectedType::new(array_type(named_type("/c.ts:Item")))),
            ("/c.ts:Item", CollectedType::new(STRING_TYPE)),
        ]);

        let source = generate_type_declarations(&named_type("/a.ts:Item"), &types);
        assert!(source.contains("declare let properties: Item;"));
        assert!(source.contains("type Item = {"));
        assert!(source.contains("other: Item_2;"));
        assert!(source.contains("type Item_2 = Item_3[];"));
        assert!(source.contains("type Item_3 = string;"));
        assert_valid_typescript(&source);
    }

    #[test]
    fn test_missing_type_is_any() {
        let source = generate_type_declarations(&named_type("Ghost"), &CollectedTypes::default());
        assert_eq!(source, "declare let properties: Ghost;\n\ntype Ghost = any;\n");
    }

    #[test]
    fn test_generic_parameters() {
        let types = collected(vec![(
            "Box",
            CollectedType::generic(
                object_type(vec![
                    ObjectField::required("value", named_type("T")),
                    ObjectField::required("next", generic_type("Box", vec![named_type("T")])),
                ]),
                vec![TypeParameter::new("T"), TypeParameter::with_default("U", STRING_TYPE)],
            ),
        )]);

        let source = generate_type_declarations(&generic_type("Box", vec![NUMBER_TYPE]), &types);
        assert!(source.contains("declare let properties: Box<number>;"));
        assert!(source.contains("type Box<T, U = string> = {"));
        assert!(source.contains("value: T;"));
        assert!(source.contains("next: Box<T>;"));
        assert_eq!(source.matches("type Box").count(), 1);
        assert_valid_typescript(&source);
    }

    #[test]
    fn test_operand_parentheses() {
        let ty = object_type(vec![
            ObjectField::required("a", array_type(union_type(vec![STRING_TYPE, NUMBER_TYPE]))),
            ObjectField::required("b", union_type(vec![function_type(STRING_TYPE), NULL_TYPE])),
            ObjectField::required("c", promise_type(tuple_type(vec![BOOLEAN_TYPE, literal_type(1)]))),
            ObjectField::required("d", record_type(STRING_TYPE, set_type(NODE_TYPE))),
        ]);
        let source = generate_type_declarations(&ty, &CollectedTypes::default());
        assert!(source.contains("a: (string | number)[];"));
        assert!(source.contains("b: ((...args: any[]) => string) | null;"));
        assert!(source.contains("c: Promise<[boolean, 1]>;"));
        assert!(source.contains("d: Record<string, Set<any>>;"));
        assert_valid_typescript(&source);
    }

    #[test]
    fn test_reserved_names_are_sanitized() {
        let types = collected(vec![("/x.ts:default", CollectedType::new(STRING_TYPE))]);
        let source = generate_type_declarations(&named_type("/x.ts:default"), &types);
        assert!(source.contains("type _default = string;"));
        assert_valid_typescript(&source);
    }

    #[test]
    fn test_non_finite_literals_widen_to_number() {
        let ty = object_type(vec![
            ObjectField::required("nan", literal_type(f64::NAN)),
            ObjectField::required("inf", literal_type(f64::NEG_INFINITY)),
            ObjectField::required("zero", literal_type(-0.0)),
        ]);
        let source = generate_type_declarations(&ty, &CollectedTypes::default());
        assert!(source.contains("nan: number;"));
        assert!(source.contains("inf: number;"));
        assert!(source.contains("zero: -0;"));
        assert!(!source.contains("NaN"));
        assert!(!source.contains("Infinity"));
        assert_valid_typescript(&source);
    }
}
