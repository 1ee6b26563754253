//! Wire messages exchanged between the host page and the preview iframe.
//!
//! Both directions are JSON objects tagged by `kind` in kebab-case, with
//! camelCase fields, as carried over `postMessage`.

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};

/// Host → iframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum HostMessage {
    Render(RenderMessage),
    ShowLoading,
}

/// Payload of a `render` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderMessage {
    pub file_path: String,
    pub component_name: String,
    /// Object literal with auto-generated callback props.
    pub default_props_source: String,
    /// Statement assigning `properties`, as edited by the user.
    pub props_assignment_source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapper: Option<WrapperRef>,
}

/// Module and export name of a component that wraps every preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperRef {
    pub module: String,
    pub name: String,
}

/// Iframe → host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PreviewEvent {
    Bootstrapped,
    BeforeRender,
    #[serde(rename_all = "camelCase")]
    RenderingSetup {
        file_path: String,
        component_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        variants: Option<Vec<Variant>>,
    },
    RenderingSuccess,
    RenderingError {
        message: String,
    },
    Action(Action),
    LogMessage(LogMessage),
    ViteError {
        payload: ViteErrorPayload,
    },
    ViteBeforeUpdate {
        payload: UpdatePayload,
    },
    ViteAfterUpdate {
        payload: UpdatePayload,
    },
    ViteInvalidate,
    ViteBeforeReload,
}

impl PreviewEvent {
    /// Decode an event posted by the iframe.
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Wire name of the event kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bootstrapped => "bootstrapped",
            Self::BeforeRender => "before-render",
            Self::RenderingSetup { .. } => "rendering-setup",
            Self::RenderingSuccess => "rendering-success",
            Self::RenderingError { .. } => "rendering-error",
            Self::Action(_) => "action",
            Self::LogMessage(_) => "log-message",
            Self::ViteError { .. } => "vite-error",
            Self::ViteBeforeUpdate { .. } => "vite-before-update",
            Self::ViteAfterUpdate { .. } => "vite-after-update",
            Self::ViteInvalidate => "vite-invalidate",
            Self::ViteBeforeReload => "vite-before-reload",
        }
    }

    #[inline]
    pub fn action(kind: ActionKind, path: impl Into<String>) -> Self {
        Self::Action(Action {
            kind,
            path: path.into(),
        })
    }

    #[inline]
    pub fn log(level: LogLevel, message: impl Into<String>, timestamp: u64) -> Self {
        Self::LogMessage(LogMessage {
            level,
            message: message.into(),
            timestamp,
        })
    }

    #[inline]
    pub fn vite_error(message: impl Into<String>) -> Self {
        Self::ViteError {
            payload: ViteErrorPayload {
                message: message.into(),
                ..Default::default()
            },
        }
    }
}

impl HostMessage {
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A story variant discovered while loading the previewable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub key: String,
    pub label: String,
}

/// A user-triggered callback or link click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// A function prop was invoked; `path` is the prop path.
    Fn,
    /// A link was clicked; `path` is the href.
    Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMessage {
    pub level: LogLevel,
    pub message: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Log,
    Info,
    Warn,
    Error,
}

/// Error reported by the bundler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViteErrorPayload {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
}

/// Modules touched by a hot update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePayload {
    #[serde(default)]
    pub updates: Vec<ModuleUpdate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleUpdate {
    /// `js-update` or `css-update`.
    #[serde(rename = "type")]
    pub kind: String,
    pub path: String,
    #[serde(default)]
    pub accepted_path: String,
    #[serde(default)]
    pub timestamp: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_message_wire_format() {
        let message = HostMessage::Render(RenderMessage {
            file_path: "/src/Button.tsx".to_string(),
            component_name: "Button".to_string(),
            default_props_source: "{}".to_string(),
            props_assignment_source: "properties = {};".to_string(),
            variant_key: None,
            wrapper: None,
        });
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "kind": "render",
                "filePath": "/src/Button.tsx",
                "componentName": "Button",
                "defaultPropsSource": "{}",
                "propsAssignmentSource": "properties = {};"
            })
        );
        assert_eq!(
            serde_json::to_value(HostMessage::ShowLoading).unwrap(),
            json!({ "kind": "show-loading" })
        );
    }

    #[test]
    fn test_decode_events() {
        assert_eq!(
            PreviewEvent::from_json(r#"{"kind":"bootstrapped"}"#).unwrap(),
            PreviewEvent::Bootstrapped
        );
        assert_eq!(
            PreviewEvent::from_json(r#"{"kind":"action","type":"fn","path":"onClick"}"#).unwrap(),
            PreviewEvent::action(ActionKind::Fn, "onClick")
        );
        assert_eq!(
            PreviewEvent::from_json(
                r#"{"kind":"log-message","level":"warn","message":"careful","timestamp":12}"#
            )
            .unwrap(),
            PreviewEvent::log(LogLevel::Warn, "careful", 12)
        );
        assert_eq!(
            PreviewEvent::from_json(
                r#"{"kind":"rendering-setup","filePath":"/a.tsx","componentName":"A","variants":[{"key":"primary","label":"Primary"}]}"#
            )
            .unwrap(),
            PreviewEvent::RenderingSetup {
                file_path: "/a.tsx".to_string(),
                component_name: "A".to_string(),
                variants: Some(vec![Variant {
                    key: "primary".to_string(),
                    label: "Primary".to_string(),
                }]),
            }
        );

        let event = PreviewEvent::from_json(
            r#"{"kind":"vite-before-update","payload":{"type":"update","updates":[{"type":"js-update","path":"/src/A.tsx","acceptedPath":"/src/A.tsx","timestamp":1}]}}"#,
        )
        .unwrap();
        let PreviewEvent::ViteBeforeUpdate { payload } = event else {
            panic!("unexpected event");
        };
        assert_eq!(payload.updates[0].kind, "js-update");
        assert_eq!(payload.updates[0].accepted_path, "/src/A.tsx");
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!(matches!(
            PreviewEvent::from_json(r#"{"kind":"teleport"}"#),
            Err(ProtocolError::InvalidMessage(_))
        ));
    }

    #[test]
    fn test_kind_matches_wire_tag() {
        let events = [
            PreviewEvent::Bootstrapped,
            PreviewEvent::RenderingSuccess,
            PreviewEvent::vite_error("boom"),
            PreviewEvent::ViteAfterUpdate {
                payload: UpdatePayload::default(),
            },
            PreviewEvent::ViteBeforeReload,
        ];
        for event in events {
            let value = serde_json::to_value(&event).unwrap();
            assert_eq!(value["kind"], event.kind());
        }
    }
}
