//! Union branch selection for deterministic generation.

use crate::resolve::resolve_shallow;
use crate::types::{CollectedTypes, LiteralValue, ValueType};
use crate::value::{SerializableValue, FALSE, NULL, UNDEFINED};

/// Value a union may collapse to instead of generating a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnionPreference {
    Undefined,
    Null,
    False,
}

/// Tie-break order: the first preference accepted by any member wins;
/// otherwise the first member is generated.
pub const UNION_PREFERENCES: [UnionPreference; 3] = [
    UnionPreference::Undefined,
    UnionPreference::Null,
    UnionPreference::False,
];

impl UnionPreference {
    #[inline]
    pub fn value(self) -> SerializableValue {
        match self {
            Self::Undefined => UNDEFINED,
            Self::Null => NULL,
            Self::False => FALSE,
        }
    }

    /// Whether a member of type `ty` accepts this preference's value.
    pub fn accepts(self, ty: &ValueType, types: &CollectedTypes, visiting: &mut Vec<String>) -> bool {
        match ty {
            ValueType::Any | ValueType::Unknown => true,
            ValueType::Void => self == Self::Undefined,
            ValueType::Null => self == Self::Null,
            ValueType::Boolean => self == Self::False,
            ValueType::Literal {
                value: LiteralValue::Boolean(false),
            } => self == Self::False,
            ValueType::Union { types: members } => {
                members.iter().any(|member| self.accepts(member, types, visiting))
            }
            ValueType::Name { name, .. } => {
                let depth = visiting.len();
                let accepted = match resolve_shallow(ty, types, visiting) {
                    Some(resolved) => {
                        visiting.push(name.clone());
                        self.accepts(&resolved, types, visiting)
                    }
                    None => false,
                };
                visiting.truncate(depth);
                accepted
            }
            _ => false,
        }
    }
}

/// Pick the preferred value for a union, if any member accepts one.
pub fn preferred_union_value(
    members: &[ValueType],
    types: &CollectedTypes,
) -> Option<SerializableValue> {
    let mut visiting = Vec::new();
    UNION_PREFERENCES.iter().find_map(|preference| {
        members
            .iter()
            .any(|member| preference.accepts(member, types, &mut visiting))
            .then(|| preference.value())
    })
}
