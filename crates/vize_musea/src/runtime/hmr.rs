//! Hot-update staleness tracking.

use super::state::PreviewIdentity;
use crate::messages::{UpdatePayload, ViteErrorPayload};

/// Events from the bundler's HMR client inside the iframe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HmrEvent {
    BeforeUpdate(UpdatePayload),
    AfterUpdate(UpdatePayload),
    Error(ViteErrorPayload),
    Invalidate,
    BeforeReload,
}

/// Remembers which preview was showing when an update started.
#[derive(Debug, Default)]
pub struct HmrFilter {
    started_with: Option<Option<PreviewIdentity>>,
}

impl HmrFilter {
    pub fn before_update(&mut self, current: Option<PreviewIdentity>) {
        self.started_with = Some(current);
    }

    /// Whether the finished update should re-render `current`. An update is
    /// stale when a different preview was rendered while it was applied.
    pub fn after_update(&mut self, current: Option<&PreviewIdentity>) -> bool {
        match (self.started_with.take(), current) {
            (Some(Some(started)), Some(current)) => started == *current,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(component: &str) -> PreviewIdentity {
        PreviewIdentity {
            file_path: "/src/App.tsx".to_string(),
            component_name: component.to_string(),
            variant_key: None,
        }
    }

    #[test]
    fn test_unchanged_preview_rerenders() {
        let mut filter = HmrFilter::default();
        filter.before_update(Some(identity("App")));
        assert!(filter.after_update(Some(&identity("App"))));
    }

    #[test]
    fn test_changed_preview_is_stale() {
        let mut filter = HmrFilter::default();
        filter.before_update(Some(identity("App")));
        assert!(!filter.after_update(Some(&identity("Other"))));
    }

    #[test]
    fn test_unmatched_after_update_is_stale() {
        let mut filter = HmrFilter::default();
        assert!(!filter.after_update(Some(&identity("App"))));

        filter.before_update(None);
        assert!(!filter.after_update(Some(&identity("App"))));

        filter.before_update(Some(identity("App")));
        assert!(filter.after_update(Some(&identity("App"))));
        assert!(!filter.after_update(Some(&identity("App"))));
    }
}
