//! Link click interception.

use crate::messages::{ActionKind, PreviewEvent};

/// Action to report for a click on a link with `href`, if the click
/// should be intercepted. Fragment-only links navigate normally.
pub fn link_action(href: Option<&str>) -> Option<PreviewEvent> {
    let href = href?.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    Some(PreviewEvent::action(ActionKind::Url, href))
}
