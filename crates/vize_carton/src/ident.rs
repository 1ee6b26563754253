//! JavaScript identifier helpers.
//!
//! Generated source emits object keys and declaration names; these checks
//! decide between a bare identifier and a quoted or computed form.

use phf::phf_set;

/// Words that cannot be used as a binding name in strict-mode module code.
pub static RESERVED_WORDS: phf::Set<&'static str> = phf_set! {
    "await", "break", "case", "catch", "class", "const", "continue",
    "debugger", "default", "delete", "do", "else", "enum", "export",
    "extends", "false", "finally", "for", "function", "if", "implements",
    "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static",
    "super", "switch", "this", "throw", "true", "try", "typeof", "var",
    "void", "while", "with", "yield",
};

/// Type names that TypeScript reserves in type position.
pub static RESERVED_TYPE_NAMES: phf::Set<&'static str> = phf_set! {
    "any", "unknown", "never", "void", "null", "undefined", "boolean",
    "string", "number", "bigint", "symbol", "object",
};

#[inline]
fn is_id_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphabetic()
}

#[inline]
fn is_id_continue(c: char) -> bool {
    c == '$' || c == '_' || c == '\u{200c}' || c == '\u{200d}' || c.is_alphanumeric()
}

/// Check whether `name` is an IdentifierName (valid after `.` or as a bare
/// object key). Reserved words are allowed here.
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_id_start(c) => chars.all(is_id_continue),
        _ => false,
    }
}

/// Check whether `name` can be used as a binding (variable or type alias).
#[inline]
pub fn is_binding_identifier(name: &str) -> bool {
    is_identifier_name(name) && !RESERVED_WORDS.contains(name)
}

/// Turn an arbitrary string into a usable binding identifier.
///
/// Invalid characters become `_`; a leading digit or a reserved word gets a
/// `_` prefix. Empty input yields `_`.
pub fn sanitize_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 1);
    for (i, c) in name.chars().enumerate() {
        let ok = if i == 0 { is_id_start(c) } else { is_id_continue(c) };
        if ok {
            out.push(c);
        } else if i == 0 && c.is_ascii_digit() {
            out.push('_');
            out.push(c);
        } else {
            out.push('_');
        }
    }

    if out.is_empty() || RESERVED_WORDS.contains(out.as_str()) {
        out.insert(0, '_');
    }
    if RESERVED_TYPE_NAMES.contains(out.as_str()) {
        out.insert(0, '_');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_name() {
        assert!(is_identifier_name("foo"));
        assert!(is_identifier_name("$el"));
        assert!(is_identifier_name("_private"));
        assert!(is_identifier_name("class"));
        assert!(is_identifier_name("café"));
        assert!(!is_identifier_name(""));
        assert!(!is_identifier_name("1st"));
        assert!(!is_identifier_name("data-id"));
        assert!(!is_identifier_name("with space"));
    }

    #[test]
    fn test_binding_identifier() {
        assert!(is_binding_identifier("props"));
        assert!(!is_binding_identifier("default"));
        assert!(!is_binding_identifier("new"));
    }

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("ButtonProps"), "ButtonProps");
        assert_eq!(sanitize_identifier("my-props"), "my_props");
        assert_eq!(sanitize_identifier("1up"), "_1up");
        assert_eq!(sanitize_identifier("default"), "_default");
        assert_eq!(sanitize_identifier("string"), "_string");
        assert_eq!(sanitize_identifier(""), "_");
    }
}
