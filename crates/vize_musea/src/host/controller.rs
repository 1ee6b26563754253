//! Iframe controller state machine.
//!
//! [`IframeController::update`] consumes one [`ControllerInput`] and returns
//! the [`ControllerCommand`]s the driver must execute. It performs no I/O and
//! keeps no clock, so every transition can be tested directly.
//!
//! ```text
//! not-started ──render──▶ pending ──bootstrapped──▶ success
//!                           ▲  ▲                      │
//!                           │  └──before-reload───────┘
//!                           └──────── watchdog ─────▶ failure
//! ```

use super::state::{ErrorSource, LogEntry, PreviewError, PreviewIframeState, StateSnapshot};
use super::url::preview_src;
use crate::messages::{HostMessage, PreviewEvent, RenderMessage};
use std::sync::Arc;
use std::time::Duration;

/// How long a render may take before the iframe is considered stuck.
pub const DEFAULT_RENDER_TIMEOUT: Duration = Duration::from_secs(5);

/// Log lines retained in [`PreviewIframeState::logs`].
pub const DEFAULT_MAX_LOGS: usize = 500;

pub type RenderId = u64;

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Origin and path prefix of the preview server, without `/preview/`.
    pub base_url: String,
    pub render_timeout: Duration,
    pub max_logs: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            render_timeout: DEFAULT_RENDER_TIMEOUT,
            max_logs: DEFAULT_MAX_LOGS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerStatus {
    /// No iframe document has been requested yet.
    NotStarted,
    /// Waiting for a fresh document to report `bootstrapped`.
    Pending,
    /// The document is bootstrapped and accepts render commands.
    Success,
    /// The last render timed out and the iframe was reset.
    Failure,
}

/// A render call, identified by a controller-assigned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub id: RenderId,
    pub previewable_id: String,
    pub message: RenderMessage,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControllerInput {
    Render(RenderRequest),
    Event(PreviewEvent),
    WatchdogFired(RenderId),
}

/// How a render call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    /// The iframe reported a rendering error.
    Failed(String),
    /// A newer render call replaced this one.
    Superseded,
    /// No report arrived in time and the iframe was reset.
    TimedOut,
}

/// Side effects requested by [`IframeController::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerCommand {
    /// Navigate the iframe to a new document.
    ResetIframe { src: String },
    Post(HostMessage),
    /// (Re)arm the render watchdog for this render.
    StartWatchdog(RenderId),
    CancelWatchdog,
    FinishRender { id: RenderId, outcome: RenderOutcome },
    /// The state snapshot changed.
    Publish(StateSnapshot),
}

#[derive(Debug)]
pub struct IframeController {
    config: ControllerConfig,
    status: ControllerStatus,
    state: StateSnapshot,
    /// Previewable the current document was opened for.
    previewable_id: Option<String>,
    /// Render waiting for the document to bootstrap.
    pending: Option<RenderRequest>,
    /// Render posted to the document, waiting for its report.
    in_flight: Option<RenderRequest>,
    /// Most recently posted render, replayed after a full reload.
    current: Option<RenderRequest>,
    watchdog: Option<RenderId>,
    token: u64,
    seq: u64,
    /// Sequence number at the last `vite-before-update`, if still open.
    update_started: Option<u64>,
    /// Sequence number at the start of the current reload or document.
    reload_started: u64,
}

impl IframeController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            status: ControllerStatus::NotStarted,
            state: Arc::new(PreviewIframeState::default()),
            previewable_id: None,
            pending: None,
            in_flight: None,
            current: None,
            watchdog: None,
            token: 0,
            seq: 0,
            update_started: None,
            reload_started: 0,
        }
    }

    #[inline]
    pub fn status(&self) -> ControllerStatus {
        self.status
    }

    #[inline]
    pub fn state(&self) -> &StateSnapshot {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn update(&mut self, input: ControllerInput) -> Vec<ControllerCommand> {
        let before = Arc::clone(&self.state);
        let mut commands = Vec::new();

        match input {
            ControllerInput::Render(request) => self.handle_render(request, &mut commands),
            ControllerInput::Event(event) => self.handle_event(event, &mut commands),
            ControllerInput::WatchdogFired(id) => self.handle_watchdog(id, &mut commands),
        }

        if !Arc::ptr_eq(&before, &self.state) && *before != *self.state {
            commands.push(ControllerCommand::Publish(Arc::clone(&self.state)));
        }
        commands
    }

    fn handle_render(&mut self, request: RenderRequest, commands: &mut Vec<ControllerCommand>) {
        self.supersede(request.id, commands);
        self.watchdog = Some(request.id);
        commands.push(ControllerCommand::StartWatchdog(request.id));

        let same_previewable = self.previewable_id.as_deref() == Some(request.previewable_id.as_str());
        match (same_previewable, self.status) {
            (true, ControllerStatus::Success) => self.post_render(request, commands),
            (true, ControllerStatus::Pending) => {
                tracing::debug!("render {} queued until the iframe bootstraps", request.id);
                self.pending = Some(request);
            }
            _ => {
                tracing::debug!("resetting iframe for {}", request.previewable_id);
                self.previewable_id = Some(request.previewable_id.clone());
                self.hard_reset(commands);
                self.pending = Some(request);
            }
        }
    }

    /// Resolve every waiting render other than `id` as superseded.
    fn supersede(&mut self, id: RenderId, commands: &mut Vec<ControllerCommand>) {
        for request in [self.pending.take(), self.in_flight.take()].into_iter().flatten() {
            if request.id != id {
                commands.push(ControllerCommand::FinishRender {
                    id: request.id,
                    outcome: RenderOutcome::Superseded,
                });
            }
        }
    }

    fn post_render(&mut self, request: RenderRequest, commands: &mut Vec<ControllerCommand>) {
        Arc::make_mut(&mut self.state).loading = true;
        commands.push(ControllerCommand::Post(HostMessage::Render(request.message.clone())));
        self.current = Some(request.clone());
        self.in_flight = Some(request);
    }

    fn hard_reset(&mut self, commands: &mut Vec<ControllerCommand>) {
        self.token += 1;
        self.status = ControllerStatus::Pending;
        self.update_started = None;

        let state = Arc::make_mut(&mut self.state);
        state.loading = true;
        state.rendered = false;

        let previewable_id = self.previewable_id.as_deref().unwrap_or_default();
        commands.push(ControllerCommand::ResetIframe {
            src: preview_src(&self.config.base_url, previewable_id, self.token),
        });
    }

    fn finish_in_flight(&mut self, outcome: RenderOutcome, commands: &mut Vec<ControllerCommand>) {
        let Some(request) = self.in_flight.take() else {
            return;
        };
        if self.watchdog == Some(request.id) {
            self.watchdog = None;
            commands.push(ControllerCommand::CancelWatchdog);
        }
        commands.push(ControllerCommand::FinishRender {
            id: request.id,
            outcome,
        });
    }

    #[inline]
    fn next_seq(&mut self) -> u64 {
        let seq = self.seq;
        self.seq += 1;
        seq
    }

    fn record_error(&mut self, source: ErrorSource, message: String, stack: Option<String>) {
        let seq = self.next_seq();
        Arc::make_mut(&mut self.state).set_error(PreviewError {
            source,
            message,
            stack,
            seq,
        });
    }

    /// Events only count once the current document has bootstrapped;
    /// anything else comes from a document that has been replaced.
    fn accepts(&self, event: &PreviewEvent) -> bool {
        match self.status {
            ControllerStatus::NotStarted => false,
            ControllerStatus::Pending | ControllerStatus::Failure => {
                matches!(event, PreviewEvent::Bootstrapped)
            }
            ControllerStatus::Success => true,
        }
    }

    fn handle_event(&mut self, event: PreviewEvent, commands: &mut Vec<ControllerCommand>) {
        if !self.accepts(&event) {
            tracing::debug!("dropping {} from a stale iframe ({:?})", event.kind(), self.status);
            return;
        }

        match event {
            PreviewEvent::Bootstrapped => {
                tracing::debug!("iframe bootstrapped");
                self.status = ControllerStatus::Success;
                self.update_started = None;
                self.reload_started = self.seq;

                let state = Arc::make_mut(&mut self.state);
                state.errors.clear();
                state.logs.clear();
                state.loading = false;
                state.rendered = false;

                if let Some(request) = self.pending.take() {
                    self.post_render(request, commands);
                }
            }
            PreviewEvent::BeforeRender => {
                Arc::make_mut(&mut self.state).loading = true;
            }
            PreviewEvent::RenderingSetup {
                file_path,
                component_name,
                variants,
            } => {
                tracing::debug!(
                    "rendering {} from {} ({} variants)",
                    component_name,
                    file_path,
                    variants.as_ref().map_or(0, Vec::len)
                );
            }
            PreviewEvent::RenderingSuccess => {
                let state = Arc::make_mut(&mut self.state);
                state.loading = false;
                state.rendered = true;
                state.clear_errors(&[ErrorSource::Renderer, ErrorSource::Load]);
                self.finish_in_flight(RenderOutcome::Rendered, commands);
            }
            PreviewEvent::RenderingError { message } => {
                self.record_error(ErrorSource::Renderer, message.clone(), None);
                let state = Arc::make_mut(&mut self.state);
                state.loading = false;
                state.rendered = false;
                self.finish_in_flight(RenderOutcome::Failed(message), commands);
            }
            PreviewEvent::Action(action) => {
                Arc::make_mut(&mut self.state).push_action(action.kind, action.path);
            }
            PreviewEvent::LogMessage(log) => {
                let seq = self.next_seq();
                let max_logs = self.config.max_logs;
                Arc::make_mut(&mut self.state).push_log(
                    LogEntry {
                        level: log.level,
                        message: log.message,
                        timestamp: log.timestamp,
                        seq,
                    },
                    max_logs,
                );
            }
            PreviewEvent::ViteError { payload } => {
                let source = ErrorSource::classify_vite_message(&payload.message);
                if source == ErrorSource::Load && self.has_specific_error_since_reload() {
                    tracing::debug!("suppressing generic load error: {}", payload.message);
                    return;
                }
                self.record_error(source, payload.message, payload.stack);
            }
            PreviewEvent::ViteBeforeUpdate { .. } => {
                self.update_started = Some(self.seq);
                self.reload_started = self.seq;
            }
            PreviewEvent::ViteAfterUpdate { .. } => {
                let since = self.update_started.take().unwrap_or(self.seq);
                Arc::make_mut(&mut self.state).prune_update(since);
            }
            PreviewEvent::ViteInvalidate | PreviewEvent::ViteBeforeReload => {
                tracing::debug!("iframe is reloading");
                self.status = ControllerStatus::Pending;
                self.update_started = None;
                if self.pending.is_none() {
                    self.pending = self.in_flight.take().or_else(|| self.current.clone());
                }
                Arc::make_mut(&mut self.state).loading = true;
            }
        }
    }

    fn has_specific_error_since_reload(&self) -> bool {
        self.state
            .errors
            .iter()
            .any(|error| error.source != ErrorSource::Load && error.seq >= self.reload_started)
    }

    fn handle_watchdog(&mut self, id: RenderId, commands: &mut Vec<ControllerCommand>) {
        if self.watchdog != Some(id) {
            return;
        }
        self.watchdog = None;

        tracing::warn!(
            "render {} did not complete within {:?}, resetting the iframe",
            id,
            self.config.render_timeout
        );

        let stuck = self.in_flight.take().or_else(|| self.pending.take());
        if let Some(request) = &stuck {
            commands.push(ControllerCommand::FinishRender {
                id: request.id,
                outcome: RenderOutcome::TimedOut,
            });
        }

        self.hard_reset(commands);
        self.status = ControllerStatus::Failure;
        // Replayed once the new document bootstraps, without a new watchdog.
        self.pending = stuck;
    }
}
