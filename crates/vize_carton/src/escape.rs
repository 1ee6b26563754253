//! String literal quoting for generated JavaScript.

/// Quote `value` as a double-quoted JavaScript string literal.
///
/// JSON string escaping is a subset of JavaScript string syntax, so the
/// output of `serde_json` is always a valid literal.
#[inline]
pub fn quote_js_string(value: &str) -> String {
    // Serializing a &str cannot fail.
    serde_json::to_string(value).unwrap_or_else(|_| String::from("\"\""))
}

/// Whether `value` can be written verbatim between double quotes in a JSX
/// attribute (`attr="..."`). JSX attribute strings have no escapes.
#[inline]
pub fn is_jsx_attribute_safe(value: &str) -> bool {
    !value.contains(['"', '\n', '\r'])
}

/// Whether `value` can be written as raw JSX text without being parsed as
/// markup or an expression container.
#[inline]
pub fn is_jsx_text_safe(value: &str) -> bool {
    !value.is_empty() && !value.contains(['{', '}', '<', '>']) && value.trim() == value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_js_string() {
        assert_eq!(quote_js_string("foo"), "\"foo\"");
        assert_eq!(quote_js_string("a\"b"), "\"a\\\"b\"");
        assert_eq!(quote_js_string("line\nbreak"), "\"line\\nbreak\"");
        assert_eq!(quote_js_string("back\\slash"), "\"back\\\\slash\"");
    }

    #[test]
    fn test_jsx_safety() {
        assert!(is_jsx_attribute_safe("primary"));
        assert!(!is_jsx_attribute_safe("say \"hi\""));
        assert!(is_jsx_text_safe("Click me"));
        assert!(!is_jsx_text_safe("{count}"));
        assert!(!is_jsx_text_safe(" padded "));
    }
}
