//! Framework renderer contract.

use super::value::JsValue;
use crate::error::RuntimeError;
use crate::messages::{Variant, WrapperRef};
use std::cell::Cell;
use std::rc::Rc;

/// Lets a slow load or render notice that a newer render has started.
#[derive(Debug, Clone)]
pub struct AbortSignal {
    render_id: u64,
    latest: Rc<Cell<u64>>,
}

impl AbortSignal {
    pub(crate) fn new(render_id: u64, latest: Rc<Cell<u64>>) -> Self {
        Self { render_id, latest }
    }

    #[inline]
    pub fn render_id(&self) -> u64 {
        self.render_id
    }

    #[inline]
    pub fn should_abort_render(&self) -> bool {
        self.latest.get() != self.render_id
    }
}

#[derive(Debug, Clone)]
pub struct LoadRequest<'a> {
    pub wrapper: Option<&'a WrapperRef>,
    pub file_path: &'a str,
    pub component_name: &'a str,
    pub variant_key: Option<&'a str>,
    pub abort: AbortSignal,
}

/// Per-framework loader (React, Vue, Svelte, Solid, Preact).
pub trait FrameworkRenderer {
    type Preview: LoadedPreview;

    /// Import the previewable (and wrapper) modules.
    fn load(&mut self, request: LoadRequest<'_>) -> Result<Self::Preview, RuntimeError>;

    /// Show a loading indicator until the next render.
    fn show_loading(&mut self) {}
}

/// A loaded previewable, ready to mount with props.
pub trait LoadedPreview {
    /// Story variants exported alongside the component.
    fn variants(&self) -> Option<Vec<Variant>> {
        None
    }

    fn render(&mut self, props: JsValue) -> Result<(), RuntimeError>;
}
