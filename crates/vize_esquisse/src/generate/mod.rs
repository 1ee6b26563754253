//! Type-value generator.
//!
//! Walks a [`ValueType`] through the [`CollectedTypes`] dictionary and
//! produces a plausible [`SerializableValue`] for it. Generation never fails:
//! unresolvable or recursive references degrade to placeholder values.
//!
//! Defaults are deterministic. Random mode (with an optional seed) produces
//! varied examples for standalone previews.

mod random;
mod union;

pub use random::{Randomness, NUMBER_RANGE};
pub use union::{preferred_union_value, UnionPreference, UNION_PREFERENCES};

use crate::compile::to_source;
use crate::resolve::{dereference, resolve_shallow};
use crate::types::{CollectedTypes, EnumValue, LiteralValue, ObjectField, ValueType};
use crate::value::{
    ObjectEntry, SerializableValue, EMPTY_ARRAY, EMPTY_MAP, EMPTY_OBJECT, EMPTY_SET, UNDEFINED,
};
use vize_carton::escape::quote_js_string;
use vize_carton::{CompactString, SmallVec};

/// Options for [`generate_value`].
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Name of the field being generated, used for string values and
    /// function markers.
    pub field_name: Option<String>,
    /// Randomize choices instead of using defaults.
    pub random: bool,
    /// Seed for random mode.
    pub seed: Option<u64>,
}

impl GenerateOptions {
    #[inline]
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            field_name: Some(name.into()),
            ..Default::default()
        }
    }

    #[inline]
    pub fn random(seed: Option<u64>) -> Self {
        Self {
            random: true,
            seed,
            ..Default::default()
        }
    }
}

/// Generate a value for `ty`.
pub fn generate_value(
    ty: &ValueType,
    types: &CollectedTypes,
    options: &GenerateOptions,
) -> SerializableValue {
    let mut generator = ValueGenerator::new(types, options);
    generator.generate(ty, options.field_name.as_deref())
}

/// TypeScript spells symbol-keyed members as `__@name@id`; such keys
/// cannot be written as property names.
#[inline]
pub fn is_representable_key(name: &str) -> bool {
    !name.starts_with("__@")
}

/// Stateful walker behind [`generate_value`].
pub struct ValueGenerator<'a> {
    types: &'a CollectedTypes,
    random: Option<Randomness>,
    /// Named types dereferenced on the current path.
    rejected: SmallVec<[CompactString; 8]>,
    /// Generating a function's return value.
    in_function_return: bool,
}

impl<'a> ValueGenerator<'a> {
    pub fn new(types: &'a CollectedTypes, options: &GenerateOptions) -> Self {
        Self {
            types,
            random: options.random.then(|| Randomness::new(options.seed)),
            rejected: SmallVec::new(),
            in_function_return: false,
        }
    }

    /// Treat `ty` as already being expanded, so references to it from
    /// inside its own fields become placeholders.
    pub fn enter_named(&mut self, ty: &ValueType) {
        if let ValueType::Name { name, .. } = ty {
            self.rejected.push(CompactString::from(name.as_str()));
        }
    }

    /// Generate in function-return mode, as used for callback results.
    pub fn generate_return_value(
        &mut self,
        ty: &ValueType,
        field_name: Option<&str>,
    ) -> SerializableValue {
        let outer = std::mem::replace(&mut self.in_function_return, true);
        let value = self.generate(ty, field_name);
        self.in_function_return = outer;
        value
    }

    pub fn generate(&mut self, ty: &ValueType, field_name: Option<&str>) -> SerializableValue {
        match ty {
            ValueType::Any | ValueType::Unknown | ValueType::Never | ValueType::Void => UNDEFINED,
            ValueType::Null => SerializableValue::Null,
            ValueType::Boolean => {
                SerializableValue::boolean(self.random.as_mut().is_some_and(|r| r.coin_flip()))
            }
            ValueType::String | ValueType::Node => match self.random.as_mut() {
                Some(random) => SerializableValue::string(random.lorem()),
                None => SerializableValue::string(field_name.unwrap_or_default()),
            },
            ValueType::Number => {
                SerializableValue::number(self.random.as_mut().map_or(0.0, |r| r.number()))
            }
            ValueType::Literal { value } => literal_value(value),
            ValueType::Enum { options, .. } => {
                let index = match self.random.as_mut() {
                    Some(random) if !options.is_empty() => random.index(options.len()),
                    _ => 0,
                };
                options
                    .get(index)
                    .map_or(UNDEFINED, |option| enum_value(&option.value))
            }
            ValueType::Array { items } => match self.single_item(items, field_name) {
                Some(item) => SerializableValue::array(vec![item]),
                None => EMPTY_ARRAY,
            },
            ValueType::Set { items } => match self.single_item(items, field_name) {
                Some(item) => SerializableValue::set(vec![item]),
                None => EMPTY_SET,
            },
            ValueType::Tuple { items } => SerializableValue::array(
                items
                    .iter()
                    .map(|item| self.generate(item, field_name))
                    .collect(),
            ),
            ValueType::Record { keys, values } => {
                SerializableValue::object(self.random_entries(keys, values, field_name))
            }
            ValueType::Map { keys, values } => {
                SerializableValue::map(self.random_entries(keys, values, field_name))
            }
            ValueType::Object { fields } => self.generate_object(fields),
            ValueType::Union { types } => self.generate_union(types, field_name),
            ValueType::Intersection { types } => match types.first() {
                // Only the first member is considered.
                Some(first) => self.generate(first, field_name),
                None => UNDEFINED,
            },
            ValueType::Function { return_type } => self.generate_function(return_type, field_name),
            // Rejected without a message so a made-up value is never mistaken for real data.
            ValueType::Promise { .. } => SerializableValue::rejected_promise(None),
            ValueType::Name { name, args } => self.generate_named(name, args, field_name),
        }
    }

    fn single_item(&mut self, items: &ValueType, field_name: Option<&str>) -> Option<SerializableValue> {
        if self.in_function_return {
            return None;
        }
        let item = self.generate(items, field_name);
        (!item.is_empty()).then_some(item)
    }

    fn random_entries(
        &mut self,
        keys: &ValueType,
        values: &ValueType,
        field_name: Option<&str>,
    ) -> Vec<ObjectEntry> {
        let count = match self.random.as_mut() {
            Some(random) => random.count(3),
            None => return Vec::new(),
        };

        let mut entries: Vec<ObjectEntry> = Vec::with_capacity(count);
        for _ in 0..count {
            let key = match self.generate(keys, field_name) {
                key @ (SerializableValue::String { .. } | SerializableValue::Number { .. }) => key,
                _ => continue,
            };
            let duplicate = entries.iter().any(|entry| {
                matches!(entry, ObjectEntry::Property { key: existing, .. } if *existing == key)
            });
            if duplicate {
                continue;
            }
            let value = self.generate(values, field_name);
            entries.push(ObjectEntry::Property { key, value });
        }
        entries
    }

    fn generate_object(&mut self, fields: &[ObjectField]) -> SerializableValue {
        let mut entries = Vec::with_capacity(fields.len());
        for field in fields {
            if !is_representable_key(&field.name) {
                continue;
            }
            if field.optional && !self.random.as_mut().is_some_and(|r| r.coin_flip()) {
                continue;
            }
            let value = self.generate(&field.ty, Some(&field.name));
            if value == UNDEFINED {
                continue;
            }
            entries.push(ObjectEntry::property(field.name.as_str(), value));
        }
        SerializableValue::object(entries)
    }

    fn generate_union(&mut self, members: &[ValueType], field_name: Option<&str>) -> SerializableValue {
        if let Some(random) = self.random.as_mut() {
            if members.is_empty() {
                return UNDEFINED;
            }
            let index = random.index(members.len());
            return self.generate(&members[index], field_name);
        }

        if let Some(preferred) = preferred_union_value(members, self.types) {
            return preferred;
        }
        match members.first() {
            Some(first) => self.generate(first, field_name),
            None => UNDEFINED,
        }
    }

    fn generate_function(&mut self, return_type: &ValueType, field_name: Option<&str>) -> SerializableValue {
        if self.in_function_return {
            return SerializableValue::function("() => {}");
        }

        let returned = self.generate_return_value(return_type, field_name);
        let marker = quote_js_string(&format!("{} invoked", field_name.unwrap_or("function")));
        let source = match returned {
            SerializableValue::Undefined => format!("() => {{ console.log({marker}); }}"),
            value => format!(
                "() => {{ console.log({marker}); return {}; }}",
                to_source(&value)
            ),
        };
        SerializableValue::function(source)
    }

    fn generate_named(&mut self, name: &str, args: &[ValueType], field_name: Option<&str>) -> SerializableValue {
        if self.rejected.iter().any(|rejected| rejected.as_str() == name) {
            return self.rejected_placeholder(name, args);
        }

        let Some(body) = dereference(self.types, name, args) else {
            tracing::warn!("type {} is not in the collected types, using an empty object", name);
            return EMPTY_OBJECT;
        };

        self.rejected.push(CompactString::from(name));
        let value = self.generate(&body, field_name);
        self.rejected.pop();
        value
    }

    /// Placeholder for a recursive reference, shaped like the referenced type.
    fn rejected_placeholder(&self, name: &str, args: &[ValueType]) -> SerializableValue {
        let reference = ValueType::Name {
            name: name.to_string(),
            args: args.to_vec(),
        };
        match resolve_shallow(&reference, self.types, &mut Vec::new()) {
            Some(ValueType::Object { .. } | ValueType::Record { .. } | ValueType::Intersection { .. }) => {
                EMPTY_OBJECT
            }
            Some(ValueType::Array { .. } | ValueType::Tuple { .. }) => EMPTY_ARRAY,
            Some(ValueType::Set { .. }) => EMPTY_SET,
            Some(ValueType::Map { .. }) => EMPTY_MAP,
            _ => UNDEFINED,
        }
    }
}

fn literal_value(value: &LiteralValue) -> SerializableValue {
    match value {
        LiteralValue::Boolean(value) => SerializableValue::boolean(*value),
        LiteralValue::Number(value) => SerializableValue::number(*value),
        LiteralValue::String(value) => SerializableValue::string(value.as_str()),
    }
}

fn enum_value(value: &EnumValue) -> SerializableValue {
    match value {
        EnumValue::Number(value) => SerializableValue::number(*value),
        EnumValue::String(value) => SerializableValue::string(value.as_str()),
    }
}
