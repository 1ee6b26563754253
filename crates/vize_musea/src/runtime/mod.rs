//! Iframe-side preview runtime.
//!
//! Runs inside the preview document. It evaluates the sources sent by the
//! host, mounts the component through a [`FrameworkRenderer`], and reports
//! lifecycle events, console output, and actions through a
//! [`PreviewTransport`].
//!
//! The document is single-threaded, so the runtime uses `Rc` and `Cell`
//! rather than locks.

mod console;
mod engine;
mod hmr;
mod links;
mod renderer;
mod state;
mod value;

pub use console::{console_event, format_console_args};
pub use engine::{evaluation_script, ScriptBindings, ScriptEngine};
pub use hmr::{HmrEvent, HmrFilter};
pub use links::link_action;
pub use renderer::{AbortSignal, FrameworkRenderer, LoadRequest, LoadedPreview};
pub use state::{PreviewIdentity, PreviewState, PreviewStateStore};
pub use value::{merge_props, wrap_functions, JsFunction, JsValue};

use crate::error::RuntimeError;
use crate::messages::{ActionKind, HostMessage, LogLevel, PreviewEvent, RenderMessage};
use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Delivers events to the host page (`window.parent.postMessage`).
pub trait PreviewTransport {
    fn send(&self, event: PreviewEvent);
}

pub struct PreviewRuntime<E, R> {
    engine: E,
    renderer: R,
    transport: Rc<dyn PreviewTransport>,
    store: PreviewStateStore,
    hmr: HmrFilter,
    latest_render: Rc<Cell<u64>>,
}

impl<E: ScriptEngine, R: FrameworkRenderer> PreviewRuntime<E, R> {
    pub fn new(engine: E, renderer: R, transport: Rc<dyn PreviewTransport>) -> Self {
        Self {
            engine,
            renderer,
            transport,
            store: PreviewStateStore::default(),
            hmr: HmrFilter::default(),
            latest_render: Rc::new(Cell::new(0)),
        }
    }

    /// Announce that the document is ready for render commands.
    pub fn bootstrap(&mut self) {
        self.store.clear();
        self.transport.send(PreviewEvent::Bootstrapped);
    }

    /// Drop the current preview, as when the document unloads.
    pub fn teardown(&mut self) {
        self.store.clear();
        self.latest_render.set(self.latest_render.get() + 1);
    }

    #[inline]
    pub fn state(&self) -> Option<&PreviewState> {
        self.store.get()
    }

    pub fn handle_message(&mut self, message: HostMessage) {
        match message {
            HostMessage::Render(message) => self.render(message),
            HostMessage::ShowLoading => self.renderer.show_loading(),
        }
    }

    /// Report one intercepted console call.
    pub fn handle_console(&self, level: LogLevel, args: &[JsValue]) {
        let message = format_console_args(args);
        self.transport.send(console_event(level, &message, now_millis()));
    }

    /// Report a link click. Returns whether navigation must be prevented.
    pub fn handle_link_click(&self, href: Option<&str>) -> bool {
        match link_action(href) {
            Some(event) => {
                self.transport.send(event);
                true
            }
            None => false,
        }
    }

    pub fn handle_hmr(&mut self, event: HmrEvent) {
        match event {
            HmrEvent::BeforeUpdate(payload) => {
                self.hmr.before_update(self.store.identity());
                self.transport.send(PreviewEvent::ViteBeforeUpdate { payload });
            }
            HmrEvent::AfterUpdate(payload) => {
                let current = self.store.identity();
                let rerender = self.hmr.after_update(current.as_ref());
                self.transport.send(PreviewEvent::ViteAfterUpdate { payload });
                let message = self.store.get().map(PreviewState::to_message);
                match message {
                    Some(message) if rerender => self.render(message),
                    _ => tracing::debug!("skipping re-render for a stale hot update"),
                }
            }
            HmrEvent::Error(payload) => self.transport.send(PreviewEvent::ViteError { payload }),
            HmrEvent::Invalidate => self.transport.send(PreviewEvent::ViteInvalidate),
            HmrEvent::BeforeReload => self.transport.send(PreviewEvent::ViteBeforeReload),
        }
    }

    fn render(&mut self, message: RenderMessage) {
        let render_id = self.latest_render.get() + 1;
        self.latest_render.set(render_id);
        let abort = AbortSignal::new(render_id, Rc::clone(&self.latest_render));

        self.store.set(PreviewState::from(message));
        self.transport.send(PreviewEvent::BeforeRender);

        match self.try_render(&abort) {
            Ok(()) => {}
            Err(_) if abort.should_abort_render() => {}
            Err(err) => {
                tracing::debug!("render {} failed: {}", render_id, err);
                self.transport.send(PreviewEvent::RenderingError {
                    message: err.to_string(),
                });
            }
        }
    }

    fn try_render(&mut self, abort: &AbortSignal) -> Result<(), RuntimeError> {
        let Some(state) = self.store.get().cloned() else {
            return Ok(());
        };

        let mut preview = self.renderer.load(LoadRequest {
            wrapper: state.wrapper.as_ref(),
            file_path: &state.file_path,
            component_name: &state.component_name,
            variant_key: state.variant_key.as_deref(),
            abort: abort.clone(),
        })?;
        if abort.should_abort_render() {
            return Ok(());
        }

        self.transport.send(PreviewEvent::RenderingSetup {
            file_path: state.file_path.clone(),
            component_name: state.component_name.clone(),
            variants: preview.variants(),
        });

        let script = evaluation_script(&state.default_props_source, &state.props_assignment_source);
        let bindings = self.engine.evaluate(&script)?;

        let transport = Rc::clone(&self.transport);
        let report: Rc<dyn Fn(&str)> =
            Rc::new(move |path: &str| transport.send(PreviewEvent::action(ActionKind::Fn, path)));
        let props = wrap_functions(merge_props(bindings.default_props, bindings.properties), "", &report);

        if abort.should_abort_render() {
            return Ok(());
        }
        preview.render(props)?;
        if !abort.should_abort_render() {
            self.transport.send(PreviewEvent::RenderingSuccess);
        }
        Ok(())
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as u64)
}
