//! Host-side snapshot of the preview iframe.
//!
//! The controller owns the state behind an [`Arc`] and updates it with
//! [`Arc::make_mut`], so a snapshot handed to the UI is never mutated.

use crate::messages::{ActionKind, LogLevel};
use serde::Serialize;
use std::sync::Arc;

/// Where an error came from. At most one error per source is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSource {
    /// The previewable module failed to load.
    Load,
    /// Hot module replacement failed.
    Hmr,
    /// The bundler reported an error.
    Vite,
    /// Evaluation or rendering threw.
    Renderer,
}

impl ErrorSource {
    /// Classify a bundler error message.
    pub fn classify_vite_message(message: &str) -> Self {
        if message.starts_with("[hmr]") {
            Self::Hmr
        } else if message.contains(FAILED_DYNAMIC_IMPORT) {
            Self::Load
        } else {
            Self::Vite
        }
    }
}

/// The bundler's generic message when a lazily imported module fails.
pub const FAILED_DYNAMIC_IMPORT: &str = "Failed to fetch dynamically imported module";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewError {
    pub source: ErrorSource,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip)]
    pub(crate) seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: u64,
    #[serde(skip)]
    pub(crate) seq: u64,
}

/// A run of identical consecutive actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionEntry {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub path: String,
    pub count: u32,
}

/// What the UI shows about the iframe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreviewIframeState {
    pub loading: bool,
    pub rendered: bool,
    pub errors: Vec<PreviewError>,
    pub logs: Vec<LogEntry>,
    pub actions: Vec<ActionEntry>,
}

impl PreviewIframeState {
    #[inline]
    pub fn error(&self, source: ErrorSource) -> Option<&PreviewError> {
        self.errors.iter().find(|error| error.source == source)
    }

    /// Record `error`, replacing any earlier error from the same source.
    pub(crate) fn set_error(&mut self, error: PreviewError) {
        self.errors.retain(|existing| existing.source != error.source);
        self.errors.push(error);
    }

    pub(crate) fn clear_errors(&mut self, sources: &[ErrorSource]) {
        self.errors.retain(|error| !sources.contains(&error.source));
    }

    /// Append a log line, dropping the oldest lines beyond `max_logs`.
    pub(crate) fn push_log(&mut self, entry: LogEntry, max_logs: usize) {
        self.logs.push(entry);
        if self.logs.len() > max_logs {
            let overflow = self.logs.len() - max_logs;
            self.logs.drain(..overflow);
        }
    }

    /// Append an action, folding it into the previous one when identical.
    pub(crate) fn push_action(&mut self, kind: ActionKind, path: String) {
        if let Some(last) = self.actions.last_mut() {
            if last.kind == kind && last.path == path {
                last.count += 1;
                return;
            }
        }
        self.actions.push(ActionEntry {
            kind,
            path,
            count: 1,
        });
    }

    /// Drop logs and errors recorded at or after `since`, plus bundler
    /// errors from before it.
    pub(crate) fn prune_update(&mut self, since: u64) {
        self.logs.retain(|entry| entry.seq < since);
        self.errors.retain(|error| {
            error.seq < since && !matches!(error.source, ErrorSource::Vite | ErrorSource::Hmr)
        });
    }
}

/// Shared, copy-on-write handle to a state snapshot.
pub type StateSnapshot = Arc<PreviewIframeState>;

#[cfg(test)]
mod tests {
    use super::*;

    fn error(source: ErrorSource, message: &str, seq: u64) -> PreviewError {
        PreviewError {
            source,
            message: message.to_string(),
            stack: None,
            seq,
        }
    }

    fn log(message: &str, seq: u64) -> LogEntry {
        LogEntry {
            level: LogLevel::Log,
            message: message.to_string(),
            timestamp: 0,
            seq,
        }
    }

    #[test]
    fn test_classify_vite_message() {
        assert_eq!(ErrorSource::classify_vite_message("[hmr] Failed to reload /src/A.tsx"), ErrorSource::Hmr);
        assert_eq!(
            ErrorSource::classify_vite_message(
                "TypeError: Failed to fetch dynamically imported module: http://localhost/src/A.tsx"
            ),
            ErrorSource::Load
        );
        assert_eq!(ErrorSource::classify_vite_message("Transform failed"), ErrorSource::Vite);
    }

    #[test]
    fn test_one_error_per_source() {
        let mut state = PreviewIframeState::default();
        state.set_error(error(ErrorSource::Vite, "first", 0));
        state.set_error(error(ErrorSource::Renderer, "render", 1));
        state.set_error(error(ErrorSource::Vite, "second", 2));

        assert_eq!(state.errors.len(), 2);
        assert_eq!(state.error(ErrorSource::Vite).map(|e| e.message.as_str()), Some("second"));
    }

    #[test]
    fn test_log_cap_drops_oldest() {
        let mut state = PreviewIframeState::default();
        for i in 0..5 {
            state.push_log(log(&i.to_string(), i), 3);
        }
        let messages: Vec<_> = state.logs.iter().map(|entry| entry.message.as_str()).collect();
        assert_eq!(messages, vec!["2", "3", "4"]);
    }

    #[test]
    fn test_actions_coalesce() {
        let mut state = PreviewIframeState::default();
        state.push_action(ActionKind::Fn, "onClick".to_string());
        state.push_action(ActionKind::Fn, "onClick".to_string());
        state.push_action(ActionKind::Url, "onClick".to_string());
        state.push_action(ActionKind::Fn, "onClick".to_string());

        let counts: Vec<_> = state.actions.iter().map(|action| (action.kind, action.count)).collect();
        assert_eq!(counts, vec![(ActionKind::Fn, 2), (ActionKind::Url, 1), (ActionKind::Fn, 1)]);
    }

    #[test]
    fn test_prune_update() {
        let mut state = PreviewIframeState::default();
        state.push_log(log("before", 1), 10);
        state.set_error(error(ErrorSource::Vite, "stale bundler error", 2));
        state.set_error(error(ErrorSource::Renderer, "still broken", 3));
        state.push_log(log("during", 5), 10);
        state.set_error(error(ErrorSource::Hmr, "[hmr] transient", 6));

        state.prune_update(4);

        assert_eq!(state.logs.len(), 1);
        assert_eq!(state.logs[0].message, "before");
        assert_eq!(state.errors.len(), 1);
        assert_eq!(state.errors[0].source, ErrorSource::Renderer);
    }

    #[test]
    fn test_serialize_hides_sequence() {
        let mut state = PreviewIframeState::default();
        state.set_error(error(ErrorSource::Load, "missing", 9));
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["errors"][0]["source"], "load");
        assert!(value["errors"][0].get("seq").is_none());
    }
}
