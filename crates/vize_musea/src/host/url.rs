//! Iframe document URLs.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// URL of a fresh preview document for `previewable_id`.
///
/// `token` must change on every reset so the browser never reuses the
/// previous document.
pub fn preview_src(base_url: &str, previewable_id: &str, token: u64) -> String {
    format!(
        "{}/preview/?p={}&t={}",
        base_url.trim_end_matches('/'),
        utf8_percent_encode(previewable_id, COMPONENT),
        token
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_src() {
        assert_eq!(
            preview_src("http://localhost:3140/", "src/Button.tsx:Button", 3),
            "http://localhost:3140/preview/?p=src%2FButton.tsx%3AButton&t=3"
        );
        assert_eq!(preview_src("", "a b", 1), "/preview/?p=a%20b&t=1");
        assert_eq!(preview_src("/base", "it's(ok)", 2), "/base/preview/?p=it's(ok)&t=2");
    }
}
