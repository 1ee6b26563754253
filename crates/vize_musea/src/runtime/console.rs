//! Console interception.
//!
//! Every `console.log/info/warn/error` call inside the iframe is re-emitted
//! to the host. Bundler failures that only surface as console errors are
//! turned into `vite-error` events.

use super::value::JsValue;
use crate::messages::{LogLevel, PreviewEvent};

const HMR_RELOAD_FAILURE: &str = "[hmr] Failed to reload";
const VITE_INTERNAL_ERROR: &str = "[vite] Internal Server Error";

/// Join console arguments the way browsers print them.
pub fn format_console_args(args: &[JsValue]) -> String {
    let mut message = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            message.push(' ');
        }
        message.push_str(&arg.to_string());
    }
    message
}

/// Event to report for one console call.
pub fn console_event(level: LogLevel, message: &str, timestamp: u64) -> PreviewEvent {
    if level == LogLevel::Error {
        if message.starts_with(HMR_RELOAD_FAILURE) {
            return PreviewEvent::vite_error(message);
        }
        if let Some(rest) = message.strip_prefix(VITE_INTERNAL_ERROR) {
            let detail = rest.trim_start_matches(':').trim();
            return PreviewEvent::vite_error(if detail.is_empty() { message } else { detail });
        }
    }
    PreviewEvent::log(level, message, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::ViteErrorPayload;

    fn vite_message(event: PreviewEvent) -> String {
        match event {
            PreviewEvent::ViteError {
                payload: ViteErrorPayload { message, .. },
            } => message,
            other => panic!("expected vite-error, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_logs() {
        assert_eq!(
            console_event(LogLevel::Info, "hello", 7),
            PreviewEvent::log(LogLevel::Info, "hello", 7)
        );
        // Only error-level logs are inspected.
        assert_eq!(
            console_event(LogLevel::Warn, "[hmr] Failed to reload /a.tsx", 1),
            PreviewEvent::log(LogLevel::Warn, "[hmr] Failed to reload /a.tsx", 1)
        );
    }

    #[test]
    fn test_hmr_failure_becomes_vite_error() {
        let event = console_event(
            LogLevel::Error,
            "[hmr] Failed to reload /src/Button.tsx. This could be due to syntax errors",
            1,
        );
        assert!(vite_message(event).starts_with("[hmr] Failed to reload /src/Button.tsx"));
    }

    #[test]
    fn test_internal_server_error_detail() {
        let event = console_event(
            LogLevel::Error,
            "[vite] Internal Server Error\nTransform failed with 1 error",
            1,
        );
        assert_eq!(vite_message(event), "Transform failed with 1 error");

        let event = console_event(LogLevel::Error, "[vite] Internal Server Error", 1);
        assert_eq!(vite_message(event), "[vite] Internal Server Error");
    }

    #[test]
    fn test_format_args() {
        let args = [JsValue::from("count"), JsValue::Number(3.0), JsValue::Boolean(true)];
        assert_eq!(format_console_args(&args), "count 3 true");
    }
}
