//! # vize_musea
//!
//! Musea - The gallery where Vize previews are shown.
//!
//! ## Name Origin
//!
//! **Musea** (plural of museum) represents a gallery space where art is
//! displayed. `vize_musea` is the protocol that hangs a component in its
//! frame: the host page drives a sandboxed preview iframe, and the iframe
//! reports back what happened on the wall.
//!
//! ## Layout
//!
//! - [`messages`]: JSON wire format for both directions of `postMessage`
//! - [`host`]: the iframe controller, a pure state machine plus a tokio
//!   driver that enforces the render watchdog
//! - [`runtime`]: the code running inside the iframe (scoped evaluation,
//!   console and link interception, function-prop actions, HMR filtering)
//!
//! ## Usage
//!
//! ```ignore
//! use vize_musea::host::{ControllerConfig, PreviewController};
//!
//! let (controller, _task) = PreviewController::spawn(host, ControllerConfig::default());
//! let outcome = controller.render("src/Button.tsx:Button", message).await?;
//! // Events posted by the iframe:
//! controller.handle_message(r#"{"kind":"bootstrapped"}"#)?;
//! ```

mod error;
pub mod host;
pub mod messages;
pub mod runtime;

pub use error::*;
pub use host::{IframeController, PreviewController, PreviewIframeState};
pub use messages::{HostMessage, PreviewEvent, RenderMessage};
