//! Preview source orchestration.
//!
//! Combines the declaration, default-props and invocation generators into
//! the three strings the preview UI needs per component.

use crate::declarations::generate_type_declarations;
use crate::error::GenerateError;
use crate::generate::GenerateOptions;
use crate::props::{generate_default_props, generate_invocation};
use crate::types::{CollectedTypes, ValueType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Generated sources for one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSources {
    pub type_declarations_source: String,
    pub default_props_source: String,
    pub default_invocation_source: String,
}

/// Resolver output for one component, as read from JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentAnalysis {
    pub props_type: ValueType,
    #[serde(default)]
    pub types: CollectedTypes,
    /// Keys supplied as call arguments (Storybook-style `args`).
    #[serde(default)]
    pub args_keys: Vec<String>,
}

impl ComponentAnalysis {
    pub fn from_json(json: &str) -> Result<Self, GenerateError> {
        let analysis: Self = serde_json::from_str(json)?;
        if let ValueType::Name { name, .. } = &analysis.props_type {
            if !analysis.types.contains_key(name) {
                return Err(GenerateError::UnknownPropsType(name.clone()));
            }
        }
        Ok(analysis)
    }

    #[inline]
    pub fn preview_sources(&self, options: &GenerateOptions) -> PreviewSources {
        generate_preview_sources_with(&self.props_type, &self.types, &self.args_keys, options)
    }
}

/// Generate deterministic [`PreviewSources`] for `props_type`.
#[inline]
pub fn generate_preview_sources(
    props_type: &ValueType,
    types: &CollectedTypes,
    args_keys: &[String],
) -> PreviewSources {
    generate_preview_sources_with(props_type, types, args_keys, &GenerateOptions::default())
}

/// Generate [`PreviewSources`] with explicit generation options.
///
/// Invocation keys covered by default props or by `args_keys` are left out.
pub fn generate_preview_sources_with(
    props_type: &ValueType,
    types: &CollectedTypes,
    args_keys: &[String],
    options: &GenerateOptions,
) -> PreviewSources {
    let default_props = generate_default_props(props_type, types, options);
    let mut excluded: BTreeSet<String> = args_keys.iter().cloned().collect();
    excluded.extend(default_props.prop_keys.iter().cloned());

    tracing::debug!(
        "generated default props for {} callbacks, excluding {} keys from invocation",
        default_props.prop_keys.len(),
        excluded.len()
    );

    PreviewSources {
        type_declarations_source: generate_type_declarations(props_type, types),
        default_invocation_source: generate_invocation(props_type, types, &excluded, options),
        default_props_source: default_props.source,
    }
}

/// The invocation a reset restores: exactly the generated default.
#[inline]
pub fn reset_invocation(sources: &PreviewSources) -> String {
    sources.default_invocation_source.clone()
}

/// Editable invocation state for one component.
#[derive(Debug, Clone)]
pub struct InvocationEditor {
    sources: PreviewSources,
    invocation: String,
}

impl InvocationEditor {
    pub fn new(sources: PreviewSources) -> Self {
        let invocation = reset_invocation(&sources);
        Self {
            sources,
            invocation,
        }
    }

    #[inline]
    pub fn sources(&self) -> &PreviewSources {
        &self.sources
    }

    /// Current invocation source.
    #[inline]
    pub fn invocation(&self) -> &str {
        &self.invocation
    }

    /// Replace the invocation with user-written source. No validation.
    pub fn edit(&mut self, source: impl Into<String>) {
        self.invocation = source.into();
    }

    /// Discard edits.
    pub fn reset(&mut self) {
        self.invocation = reset_invocation(&self.sources);
    }

    #[inline]
    pub fn is_edited(&self) -> bool {
        self.invocation != self.sources.default_invocation_source
    }
}
