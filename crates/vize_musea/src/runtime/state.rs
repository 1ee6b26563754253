//! The iframe's current preview.
//!
//! A single [`PreviewState`] is held per document. Every render replaces it
//! wholesale; there is no partial update.

use crate::messages::{RenderMessage, WrapperRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewState {
    pub file_path: String,
    pub component_name: String,
    pub default_props_source: String,
    pub props_assignment_source: String,
    pub variant_key: Option<String>,
    pub wrapper: Option<WrapperRef>,
}

/// What a hot update is compared against to decide whether it is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewIdentity {
    pub file_path: String,
    pub component_name: String,
    pub variant_key: Option<String>,
}

impl PreviewState {
    pub fn identity(&self) -> PreviewIdentity {
        PreviewIdentity {
            file_path: self.file_path.clone(),
            component_name: self.component_name.clone(),
            variant_key: self.variant_key.clone(),
        }
    }

    pub fn to_message(&self) -> RenderMessage {
        RenderMessage {
            file_path: self.file_path.clone(),
            component_name: self.component_name.clone(),
            default_props_source: self.default_props_source.clone(),
            props_assignment_source: self.props_assignment_source.clone(),
            variant_key: self.variant_key.clone(),
            wrapper: self.wrapper.clone(),
        }
    }
}

impl From<RenderMessage> for PreviewState {
    fn from(message: RenderMessage) -> Self {
        Self {
            file_path: message.file_path,
            component_name: message.component_name,
            default_props_source: message.default_props_source,
            props_assignment_source: message.props_assignment_source,
            variant_key: message.variant_key,
            wrapper: message.wrapper,
        }
    }
}

#[derive(Debug, Default)]
pub struct PreviewStateStore {
    current: Option<PreviewState>,
}

impl PreviewStateStore {
    #[inline]
    pub fn get(&self) -> Option<&PreviewState> {
        self.current.as_ref()
    }

    #[inline]
    pub fn set(&mut self, state: PreviewState) {
        self.current = Some(state);
    }

    #[inline]
    pub fn clear(&mut self) {
        self.current = None;
    }

    #[inline]
    pub fn identity(&self) -> Option<PreviewIdentity> {
        self.current.as_ref().map(PreviewState::identity)
    }
}
