//! Named type dereferencing and generic substitution.

use crate::types::{CollectedTypes, ObjectField, ValueType, ANY_TYPE};
use vize_carton::FxHashMap;

/// Look up `name` and return its body with generic parameters substituted.
///
/// Parameters are bound positionally to `args`, falling back to their
/// declared default and finally to `any`. Returns `None` on a dictionary miss.
pub fn dereference(types: &CollectedTypes, name: &str, args: &[ValueType]) -> Option<ValueType> {
    let collected = types.get(name)?;
    if collected.parameters.is_empty() {
        return Some(collected.ty.clone());
    }

    let bindings: FxHashMap<&str, ValueType> = collected
        .parameters
        .iter()
        .enumerate()
        .map(|(i, param)| {
            let bound = args
                .get(i)
                .cloned()
                .or_else(|| param.default.clone())
                .unwrap_or(ANY_TYPE);
            (param.name.as_str(), bound)
        })
        .collect();

    Some(substitute(&collected.ty, &bindings))
}

/// Replace generic parameter references in `ty` with their bound types.
pub fn substitute(ty: &ValueType, bindings: &FxHashMap<&str, ValueType>) -> ValueType {
    let sub = |t: &ValueType| -> Box<ValueType> { Box::new(substitute(t, bindings)) };
    let sub_all = |ts: &[ValueType]| -> Vec<ValueType> {
        ts.iter().map(|t| substitute(t, bindings)).collect()
    };

    match ty {
        ValueType::Name { name, args } if args.is_empty() => match bindings.get(name.as_str()) {
            Some(bound) => bound.clone(),
            None => ty.clone(),
        },
        ValueType::Name { name, args } => ValueType::Name {
            name: name.clone(),
            args: sub_all(args),
        },
        ValueType::Array { items } => ValueType::Array { items: sub(items) },
        ValueType::Set { items } => ValueType::Set { items: sub(items) },
        ValueType::Tuple { items } => ValueType::Tuple {
            items: sub_all(items),
        },
        ValueType::Record { keys, values } => ValueType::Record {
            keys: sub(keys),
            values: sub(values),
        },
        ValueType::Map { keys, values } => ValueType::Map {
            keys: sub(keys),
            values: sub(values),
        },
        ValueType::Object { fields } => ValueType::Object {
            fields: fields
                .iter()
                .map(|field| ObjectField {
                    name: field.name.clone(),
                    ty: substitute(&field.ty, bindings),
                    optional: field.optional,
                })
                .collect(),
        },
        ValueType::Union { types } => ValueType::Union {
            types: sub_all(types),
        },
        ValueType::Intersection { types } => ValueType::Intersection {
            types: sub_all(types),
        },
        ValueType::Function { return_type } => ValueType::Function {
            return_type: sub(return_type),
        },
        ValueType::Promise { ty } => ValueType::Promise { ty: sub(ty) },
        ValueType::Any
        | ValueType::Unknown
        | ValueType::Never
        | ValueType::Void
        | ValueType::Null
        | ValueType::Boolean
        | ValueType::String
        | ValueType::Number
        | ValueType::Node
        | ValueType::Literal { .. }
        | ValueType::Enum { .. } => ty.clone(),
    }
}

/// Follow `name` references until a structural type is reached.
///
/// `visiting` holds the names already followed on the current path; a
/// repeated name or a dictionary miss yields `None`.
pub fn resolve_shallow(
    ty: &ValueType,
    types: &CollectedTypes,
    visiting: &mut Vec<String>,
) -> Option<ValueType> {
    let mut current = ty.clone();
    let depth = visiting.len();
    let resolved = loop {
        match current {
            ValueType::Name { ref name, ref args } => {
                if visiting.iter().any(|seen| seen == name) {
                    break None;
                }
                let Some(body) = dereference(types, name, args) else {
                    break None;
                };
                visiting.push(name.clone());
                current = body;
            }
            other => break Some(other),
        }
    };
    visiting.truncate(depth);
    resolved
}
