//! Default-props and invocation generators.
//!
//! Both artifacts are derived from the same props type. Default props hold
//! one auto-generated callback per function-typed field; the invocation
//! holds everything else and is what the props editor shows.

use crate::compile::{to_formatted_source, to_source};
use crate::generate::{is_representable_key, GenerateOptions, ValueGenerator};
use crate::resolve::dereference;
use crate::types::{object_type, CollectedTypes, ObjectField, ValueType};
use crate::value::{ObjectEntry, SerializableValue};
use std::collections::BTreeSet;
use vize_glyph::{format_script_or_original, FormatOptions};

/// Auto-generated callback props.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultProps {
    /// Object literal source, for example `{ onClick: () => {} }`.
    pub source: String,
    /// Field names covered by `source`.
    pub prop_keys: BTreeSet<String>,
}

/// Generate a callback for every function-typed field of `props_type`.
///
/// Each callback returns a value generated for the field's return type.
/// Reporting invocations as actions is left to the preview runtime.
pub fn generate_default_props(
    props_type: &ValueType,
    types: &CollectedTypes,
    options: &GenerateOptions,
) -> DefaultProps {
    let mut generator = ValueGenerator::new(types, options);
    generator.enter_named(props_type);
    let mut entries = Vec::new();
    let mut prop_keys = BTreeSet::new();

    for field in props_fields(props_type, types) {
        if !is_representable_key(&field.name) || prop_keys.contains(&field.name) {
            continue;
        }
        let Some(return_type) = callback_return_type(&field.ty, types, &mut Vec::new()) else {
            continue;
        };

        let returned = generator.generate_return_value(&return_type, Some(&field.name));
        let source = match returned {
            SerializableValue::Undefined => "() => {}".to_string(),
            value => format!("() => {{ return {}; }}", to_source(&value)),
        };
        entries.push(ObjectEntry::property(
            field.name.as_str(),
            SerializableValue::function(source),
        ));
        prop_keys.insert(field.name);
    }

    DefaultProps {
        source: to_formatted_source(&SerializableValue::object(entries), &FormatOptions::default()),
        prop_keys,
    }
}

/// Generate the `properties = {...};` invocation for `props_type`, leaving
/// out every key in `excluded_keys`.
pub fn generate_invocation(
    props_type: &ValueType,
    types: &CollectedTypes,
    excluded_keys: &BTreeSet<String>,
    options: &GenerateOptions,
) -> String {
    let mut generator = ValueGenerator::new(types, options);
    let fields: Vec<ObjectField> = props_fields(props_type, types)
        .into_iter()
        .filter(|field| !excluded_keys.contains(&field.name))
        .collect();

    let value = if fields.is_empty() && !is_object_like(props_type, types) {
        generator.generate(props_type, None)
    } else {
        generator.enter_named(props_type);
        generator.generate(&object_type(fields), None)
    };
    // Only an object literal is a valid invocation body.
    let value = match value {
        value @ SerializableValue::Object { .. } => without_keys(value, excluded_keys),
        _ => SerializableValue::object(Vec::new()),
    };

    let source = format!("properties = {};", to_source(&value));
    format_script_or_original(&source, &FormatOptions::default())
}

fn without_keys(value: SerializableValue, excluded_keys: &BTreeSet<String>) -> SerializableValue {
    match value {
        SerializableValue::Object { entries } if !excluded_keys.is_empty() => {
            SerializableValue::object(
                entries
                    .into_iter()
                    .filter(|entry| !matches!(entry.key_name(), Some(key) if excluded_keys.contains(key)))
                    .collect(),
            )
        }
        value => value,
    }
}

/// Fields of the dereferenced props type, merging intersection members.
/// Later duplicates of a field name are dropped.
pub fn props_fields(props_type: &ValueType, types: &CollectedTypes) -> Vec<ObjectField> {
    let mut fields = Vec::new();
    collect_fields(props_type, types, &mut Vec::new(), &mut fields);
    fields
}

fn collect_fields(
    ty: &ValueType,
    types: &CollectedTypes,
    visiting: &mut Vec<String>,
    out: &mut Vec<ObjectField>,
) {
    match ty {
        ValueType::Object { fields } => {
            for field in fields {
                if !out.iter().any(|existing| existing.name == field.name) {
                    out.push(field.clone());
                }
            }
        }
        ValueType::Intersection { types: members } => {
            for member in members {
                collect_fields(member, types, visiting, out);
            }
        }
        ValueType::Name { name, args } => {
            if visiting.iter().any(|seen| seen == name) {
                return;
            }
            let Some(body) = dereference(types, name, args) else {
                return;
            };
            visiting.push(name.clone());
            collect_fields(&body, types, visiting, out);
            visiting.pop();
        }
        _ => {}
    }
}

fn is_object_like(ty: &ValueType, types: &CollectedTypes) -> bool {
    match ty {
        ValueType::Object { .. } | ValueType::Intersection { .. } => true,
        ValueType::Name { name, args } => dereference(types, name, args)
            .is_some_and(|body| matches!(body, ValueType::Object { .. } | ValueType::Intersection { .. })),
        _ => false,
    }
}

/// Return type of a callback field: a function, or a union of a function
/// with only `void`/`null` members.
pub fn callback_return_type(
    ty: &ValueType,
    types: &CollectedTypes,
    visiting: &mut Vec<String>,
) -> Option<ValueType> {
    match ty {
        ValueType::Function { return_type } => Some(return_type.as_ref().clone()),
        ValueType::Union { types: members } => {
            let mut return_type = None;
            for member in members {
                match callback_return_type(member, types, visiting) {
                    Some(found) => {
                        return_type.get_or_insert(found);
                    }
                    None if is_nullish(member) => {}
                    None => return None,
                }
            }
            return_type
        }
        ValueType::Name { name, args } => {
            if visiting.iter().any(|seen| seen == name) {
                return None;
            }
            let body = dereference(types, name, args)?;
            visiting.push(name.clone());
            let found = callback_return_type(&body, types, visiting);
            visiting.pop();
            found
        }
        _ => None,
    }
}

#[inline]
fn is_nullish(ty: &ValueType) -> bool {
    matches!(ty, ValueType::Void | ValueType::Null | ValueType::Never)
}
