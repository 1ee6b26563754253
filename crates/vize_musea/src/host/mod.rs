//! Host-side iframe controller.

mod controller;
mod driver;
mod state;
mod url;

pub use controller::{
    ControllerCommand, ControllerConfig, ControllerInput, ControllerStatus, IframeController,
    RenderId, RenderOutcome, RenderRequest, DEFAULT_MAX_LOGS, DEFAULT_RENDER_TIMEOUT,
};
pub use driver::{IframeHost, PreviewController};
pub use state::{
    ActionEntry, ErrorSource, LogEntry, PreviewError, PreviewIframeState, StateSnapshot,
    FAILED_DYNAMIC_IMPORT,
};
pub use url::preview_src;
