//! Async driver for [`IframeController`].
//!
//! A single tokio task owns the controller and the [`IframeHost`]. Callers
//! talk to it through a cloneable [`PreviewController`] handle; state
//! snapshots are published on a `watch` channel.

use super::controller::{
    ControllerCommand, ControllerConfig, ControllerInput, IframeController, RenderId, RenderOutcome,
    RenderRequest,
};
use super::state::StateSnapshot;
use crate::error::ProtocolError;
use crate::messages::{HostMessage, PreviewEvent, RenderMessage};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Sleep};
use vize_carton::FxHashMap;

/// The page element hosting the preview document.
pub trait IframeHost: Send + 'static {
    /// Replace the iframe document with `src`.
    fn navigate(&mut self, src: &str);

    /// Post a message to the current document.
    fn post(&mut self, message: &HostMessage) -> Result<(), ProtocolError>;
}

enum Request {
    Render {
        previewable_id: String,
        message: RenderMessage,
        reply: oneshot::Sender<RenderOutcome>,
    },
    Event(PreviewEvent),
}

/// Handle to a running controller task.
#[derive(Debug, Clone)]
pub struct PreviewController {
    requests: mpsc::UnboundedSender<Request>,
    state: watch::Receiver<StateSnapshot>,
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render { previewable_id, .. } => {
                f.debug_struct("Render").field("previewable_id", previewable_id).finish()
            }
            Self::Event(event) => f.debug_tuple("Event").field(&event.kind()).finish(),
        }
    }
}

impl PreviewController {
    /// Spawn the controller task on the current tokio runtime.
    ///
    /// The task stops once every handle has been dropped.
    pub fn spawn<H: IframeHost>(host: H, config: ControllerConfig) -> (Self, JoinHandle<()>) {
        let controller = IframeController::new(config);
        let (requests_tx, requests_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(Arc::clone(controller.state()));

        let task = ControllerTask {
            controller,
            host,
            requests: requests_rx,
            state: state_tx,
            replies: FxHashMap::default(),
            watchdog: None,
            next_render_id: 1,
        };
        let handle = tokio::spawn(task.run());

        (
            Self {
                requests: requests_tx,
                state: state_rx,
            },
            handle,
        )
    }

    /// Render `message` for `previewable_id`.
    ///
    /// The request is queued immediately; the returned future resolves once
    /// the iframe reports the render, a newer render replaces it, or the
    /// watchdog resets the iframe.
    pub fn render(
        &self,
        previewable_id: impl Into<String>,
        message: RenderMessage,
    ) -> impl Future<Output = Result<RenderOutcome, ProtocolError>> + Send + 'static {
        let (reply, outcome) = oneshot::channel();
        let sent = self
            .requests
            .send(Request::Render {
                previewable_id: previewable_id.into(),
                message,
                reply,
            })
            .map_err(|_| ProtocolError::ControllerClosed);

        async move {
            sent?;
            outcome.await.map_err(|_| ProtocolError::ControllerClosed)
        }
    }

    /// Feed an event received from the iframe.
    pub fn handle_event(&self, event: PreviewEvent) -> Result<(), ProtocolError> {
        self.requests
            .send(Request::Event(event))
            .map_err(|_| ProtocolError::ControllerClosed)
    }

    /// Decode and feed a raw `postMessage` payload.
    pub fn handle_message(&self, json: &str) -> Result<(), ProtocolError> {
        self.handle_event(PreviewEvent::from_json(json)?)
    }

    /// Latest published snapshot.
    #[inline]
    pub fn state(&self) -> StateSnapshot {
        Arc::clone(&self.state.borrow())
    }

    #[inline]
    pub fn subscribe(&self) -> watch::Receiver<StateSnapshot> {
        self.state.clone()
    }
}

struct ControllerTask<H> {
    controller: IframeController,
    host: H,
    requests: mpsc::UnboundedReceiver<Request>,
    state: watch::Sender<StateSnapshot>,
    replies: FxHashMap<RenderId, oneshot::Sender<RenderOutcome>>,
    watchdog: Option<RenderId>,
    next_render_id: RenderId,
}

impl<H: IframeHost> ControllerTask<H> {
    async fn run(mut self) {
        let timeout = self.controller.config().render_timeout;
        let sleep = tokio::time::sleep(timeout);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                request = self.requests.recv() => {
                    let Some(request) = request else {
                        break;
                    };
                    let input = self.input_for(request);
                    self.apply(input, sleep.as_mut(), timeout);
                }
                () = &mut sleep, if self.watchdog.is_some() => {
                    if let Some(id) = self.watchdog.take() {
                        self.apply(ControllerInput::WatchdogFired(id), sleep.as_mut(), timeout);
                    }
                }
            }
        }

        tracing::debug!("preview controller stopped");
    }

    fn input_for(&mut self, request: Request) -> ControllerInput {
        match request {
            Request::Render {
                previewable_id,
                message,
                reply,
            } => {
                let id = self.next_render_id;
                self.next_render_id += 1;
                self.replies.insert(id, reply);
                ControllerInput::Render(RenderRequest {
                    id,
                    previewable_id,
                    message,
                })
            }
            Request::Event(event) => ControllerInput::Event(event),
        }
    }

    fn apply(&mut self, input: ControllerInput, mut sleep: Pin<&mut Sleep>, timeout: Duration) {
        for command in self.controller.update(input) {
            match command {
                ControllerCommand::ResetIframe { src } => {
                    tracing::debug!("navigating preview iframe to {}", src);
                    self.host.navigate(&src);
                }
                ControllerCommand::Post(message) => {
                    if let Err(err) = self.host.post(&message) {
                        tracing::warn!("{}", err);
                    }
                }
                ControllerCommand::StartWatchdog(id) => {
                    self.watchdog = Some(id);
                    sleep.as_mut().reset(Instant::now() + timeout);
                }
                ControllerCommand::CancelWatchdog => self.watchdog = None,
                ControllerCommand::FinishRender { id, outcome } => {
                    if let Some(reply) = self.replies.remove(&id) {
                        let _ = reply.send(outcome);
                    }
                }
                ControllerCommand::Publish(state) => {
                    self.state.send_replace(state);
                }
            }
        }
    }
}
